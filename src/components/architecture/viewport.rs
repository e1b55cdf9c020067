use super::types::Point;

pub const MIN_SCALE: f64 = 0.3;
pub const MAX_SCALE: f64 = 3.0;
pub const DEFAULT_SCALE: f64 = 1.0;
/// Starting scale on narrow screens.
pub const COMPACT_SCALE: f64 = 0.5;
/// Window widths below this are treated as compact (phones).
pub const COMPACT_BREAKPOINT: f64 = 768.0;
pub const ZOOM_STEP: f64 = 0.2;
pub const WHEEL_ZOOM_FACTOR: f64 = 0.001;
pub const PINCH_ZOOM_FACTOR: f64 = 0.01;

pub fn is_compact(window_width: f64) -> bool {
	window_width < COMPACT_BREAKPOINT
}

pub fn default_scale(compact: bool) -> f64 {
	if compact { COMPACT_SCALE } else { DEFAULT_SCALE }
}

/// Zoom scale plus pixel offset applied to the whole diagram layer.
///
/// `scale` never leaves `[MIN_SCALE, MAX_SCALE]`; every mutation goes
/// through [`Viewport::set_scale`].
#[derive(Clone, Debug, PartialEq)]
pub struct Viewport {
	scale: f64,
	offset: Point,
}

impl Default for Viewport {
	fn default() -> Self {
		Self {
			scale: DEFAULT_SCALE,
			offset: Point::ORIGIN,
		}
	}
}

impl Viewport {
	pub fn scale(&self) -> f64 {
		self.scale
	}

	pub fn offset(&self) -> Point {
		self.offset
	}

	/// Rounded percentage for display, e.g. `150` for scale 1.5.
	pub fn zoom_percent(&self) -> i32 {
		(self.scale * 100.0).round() as i32
	}

	pub fn set_scale(&mut self, candidate: f64) {
		// NaN would slip through clamp; keep the current value instead
		if candidate.is_nan() {
			return;
		}
		self.scale = candidate.clamp(MIN_SCALE, MAX_SCALE);
	}

	pub fn set_offset(&mut self, x: f64, y: f64) {
		self.offset = Point::new(x, y);
	}

	pub fn zoom_by(&mut self, delta: f64) {
		self.set_scale(self.scale + delta);
	}

	pub fn zoom_in(&mut self) {
		self.zoom_by(ZOOM_STEP);
	}

	pub fn zoom_out(&mut self) {
		self.zoom_by(-ZOOM_STEP);
	}

	pub fn reset(&mut self, default_scale: f64) {
		self.set_scale(default_scale);
		self.offset = Point::ORIGIN;
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	/// Deterministic pseudo-random sequence in [0, 1).
	fn rand_simple(seed: usize) -> f64 {
		let x = ((seed + 1) * 9301 + 49297) % 233280;
		(x as f64) / 233280.0
	}

	#[test]
	fn scale_stays_in_bounds_for_any_sequence() {
		let mut vp = Viewport::default();
		for i in 0..500 {
			let candidate = (rand_simple(i) - 0.5) * 20.0;
			vp.set_scale(candidate);
			assert!(vp.scale() >= MIN_SCALE && vp.scale() <= MAX_SCALE);
		}
	}

	#[test]
	fn out_of_range_requests_are_clamped() {
		let mut vp = Viewport::default();
		vp.set_scale(10.0);
		assert_eq!(vp.scale(), MAX_SCALE);
		vp.set_scale(-1.0);
		assert_eq!(vp.scale(), MIN_SCALE);
		vp.set_scale(f64::INFINITY);
		assert_eq!(vp.scale(), MAX_SCALE);
	}

	#[test]
	fn nan_is_ignored() {
		let mut vp = Viewport::default();
		vp.set_scale(1.7);
		vp.set_scale(f64::NAN);
		assert_eq!(vp.scale(), 1.7);
	}

	#[test]
	fn offset_is_unconstrained() {
		let mut vp = Viewport::default();
		vp.set_offset(-12_000.0, 45_000.5);
		assert_eq!(vp.offset(), Point::new(-12_000.0, 45_000.5));
	}

	#[test]
	fn reset_restores_default_and_origin() {
		let mut vp = Viewport::default();
		vp.set_scale(2.4);
		vp.set_offset(30.0, -40.0);
		vp.reset(COMPACT_SCALE);
		assert_eq!(vp.scale(), COMPACT_SCALE);
		assert_eq!(vp.offset(), Point::ORIGIN);

		vp.reset(DEFAULT_SCALE);
		assert_eq!(vp.scale(), DEFAULT_SCALE);
	}

	#[test]
	fn zoom_buttons_step_and_saturate() {
		let mut vp = Viewport::default();
		vp.zoom_in();
		assert!((vp.scale() - 1.2).abs() < 1e-9);
		for _ in 0..20 {
			vp.zoom_in();
		}
		assert_eq!(vp.scale(), MAX_SCALE);
		for _ in 0..20 {
			vp.zoom_out();
		}
		assert_eq!(vp.scale(), MIN_SCALE);
	}

	#[test]
	fn zoom_percent_rounds() {
		let mut vp = Viewport::default();
		vp.set_scale(0.456);
		assert_eq!(vp.zoom_percent(), 46);
	}

	#[test]
	fn compact_breakpoint() {
		assert!(is_compact(767.0));
		assert!(!is_compact(768.0));
		assert_eq!(default_scale(true), COMPACT_SCALE);
		assert_eq!(default_scale(false), DEFAULT_SCALE);
	}
}
