//! Turns raw mouse, touch and wheel input into viewport changes.

use log::debug;

use super::types::Point;
use super::viewport::{PINCH_ZOOM_FACTOR, Viewport, WHEEL_ZOOM_FACTOR};

/// Pointer input in container coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum PointerInput {
	MouseDown(Point),
	MouseMove(Point),
	MouseUp,
	MouseLeave,
	/// All contact points currently on the surface.
	TouchStart(Vec<Point>),
	TouchMove(Vec<Point>),
	TouchEnd,
	Wheel { delta_y: f64 },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum GestureState {
	#[default]
	Idle,
	/// `anchor` is pointer position minus the offset at drag start.
	Dragging { anchor: Point },
	Pinching { last_distance: f64 },
}

#[derive(Clone, Debug, Default)]
pub struct GestureRecognizer {
	state: GestureState,
}

impl GestureRecognizer {
	pub fn state(&self) -> &GestureState {
		&self.state
	}

	pub fn is_dragging(&self) -> bool {
		matches!(self.state(), GestureState::Dragging { .. })
	}

	/// Feed one input event. Returns `true` when the event changed the
	/// viewport or gesture and the host should suppress its default action.
	pub fn handle(&mut self, input: PointerInput, viewport: &mut Viewport) -> bool {
		match input {
			PointerInput::Wheel { delta_y } => {
				viewport.zoom_by(-delta_y * WHEEL_ZOOM_FACTOR);
				true
			}
			PointerInput::MouseDown(p) => {
				self.start_drag(p, viewport);
				true
			}
			PointerInput::TouchStart(touches) => match touches.as_slice() {
				[a, b] => {
					let distance = a.distance_to(*b);
					debug!("pinch start at distance {distance:.1}");
					self.state = GestureState::Pinching {
						last_distance: distance,
					};
					true
				}
				[p] => {
					self.start_drag(*p, viewport);
					true
				}
				_ => false,
			},
			PointerInput::MouseMove(p) => self.drag_to(p, viewport),
			PointerInput::TouchMove(touches) => match touches.as_slice() {
				[a, b] => self.pinch_to(a.distance_to(*b), viewport),
				[p] => self.drag_to(*p, viewport),
				_ => false,
			},
			PointerInput::MouseUp | PointerInput::MouseLeave | PointerInput::TouchEnd => {
				if self.state != GestureState::Idle {
					debug!("gesture end: {:?}", self.state);
				}
				self.state = GestureState::Idle;
				false
			}
		}
	}

	fn start_drag(&mut self, pointer: Point, viewport: &Viewport) {
		let offset = viewport.offset();
		let anchor = Point::new(pointer.x - offset.x, pointer.y - offset.y);
		debug!("drag start, anchor ({:.1}, {:.1})", anchor.x, anchor.y);
		self.state = GestureState::Dragging { anchor };
	}

	fn drag_to(&mut self, pointer: Point, viewport: &mut Viewport) -> bool {
		let GestureState::Dragging { anchor } = self.state else {
			return false;
		};
		viewport.set_offset(pointer.x - anchor.x, pointer.y - anchor.y);
		true
	}

	fn pinch_to(&mut self, distance: f64, viewport: &mut Viewport) -> bool {
		let GestureState::Pinching { last_distance } = &mut self.state else {
			return false;
		};
		// zero start distance never pinches
		if *last_distance == 0.0 {
			return false;
		}
		viewport.zoom_by((distance - *last_distance) * PINCH_ZOOM_FACTOR);
		*last_distance = distance;
		true
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::architecture::viewport::MAX_SCALE;

	fn touches(points: &[(f64, f64)]) -> Vec<Point> {
		points.iter().map(|&(x, y)| Point::new(x, y)).collect()
	}

	#[test]
	fn zero_length_drag_does_not_drift() {
		let mut vp = Viewport::default();
		vp.set_offset(25.0, -10.0);
		let mut g = GestureRecognizer::default();

		g.handle(PointerInput::MouseDown(Point::new(200.0, 150.0)), &mut vp);
		g.handle(PointerInput::MouseMove(Point::new(200.0, 150.0)), &mut vp);
		assert_eq!(vp.offset(), Point::new(25.0, -10.0));
	}

	#[test]
	fn drag_follows_pointer_delta() {
		let mut vp = Viewport::default();
		vp.set_offset(10.0, 10.0);
		let mut g = GestureRecognizer::default();

		g.handle(PointerInput::MouseDown(Point::new(100.0, 100.0)), &mut vp);
		assert!(g.is_dragging());
		g.handle(PointerInput::MouseMove(Point::new(130.0, 80.0)), &mut vp);
		assert_eq!(vp.offset(), Point::new(40.0, -10.0));
		g.handle(PointerInput::MouseMove(Point::new(90.0, 100.0)), &mut vp);
		assert_eq!(vp.offset(), Point::new(0.0, 10.0));
	}

	#[test]
	fn move_without_gesture_is_noop() {
		let mut vp = Viewport::default();
		let mut g = GestureRecognizer::default();
		let before = vp.clone();

		assert!(!g.handle(PointerInput::MouseMove(Point::new(50.0, 50.0)), &mut vp));
		assert!(!g.handle(PointerInput::TouchMove(touches(&[(5.0, 5.0)])), &mut vp));
		assert!(!g.handle(
			PointerInput::TouchMove(touches(&[(0.0, 0.0), (100.0, 0.0)])),
			&mut vp
		));
		assert_eq!(vp, before);
	}

	#[test]
	fn pinch_scales_by_distance_delta() {
		let mut vp = Viewport::default();
		let mut g = GestureRecognizer::default();

		g.handle(PointerInput::TouchStart(touches(&[(0.0, 0.0), (30.0, 40.0)])), &mut vp);
		assert_eq!(g.state(), &GestureState::Pinching { last_distance: 50.0 });

		// distance grows by 20 -> +0.2
		g.handle(PointerInput::TouchMove(touches(&[(0.0, 0.0), (42.0, 56.0)])), &mut vp);
		assert!((vp.scale() - 1.2).abs() < 1e-9);
		assert_eq!(g.state(), &GestureState::Pinching { last_distance: 70.0 });

		// shrinks by 40 from the updated distance -> -0.4
		g.handle(PointerInput::TouchMove(touches(&[(0.0, 0.0), (18.0, 24.0)])), &mut vp);
		assert!((vp.scale() - 0.8).abs() < 1e-9);
	}

	#[test]
	fn pinch_is_clamped() {
		let mut vp = Viewport::default();
		let mut g = GestureRecognizer::default();
		g.handle(PointerInput::TouchStart(touches(&[(0.0, 0.0), (10.0, 0.0)])), &mut vp);
		g.handle(PointerInput::TouchMove(touches(&[(0.0, 0.0), (1000.0, 0.0)])), &mut vp);
		assert_eq!(vp.scale(), MAX_SCALE);
	}

	#[test]
	fn wheel_down_zooms_out() {
		let mut vp = Viewport::default();
		let mut g = GestureRecognizer::default();
		g.handle(PointerInput::Wheel { delta_y: 100.0 }, &mut vp);
		assert!((vp.scale() - 0.9).abs() < 1e-9);
		g.handle(PointerInput::Wheel { delta_y: -300.0 }, &mut vp);
		assert!((vp.scale() - 1.2).abs() < 1e-9);
	}

	#[test]
	fn release_ends_any_gesture() {
		let mut vp = Viewport::default();
		for end in [PointerInput::MouseUp, PointerInput::MouseLeave, PointerInput::TouchEnd] {
			let mut g = GestureRecognizer::default();
			g.handle(PointerInput::TouchStart(touches(&[(0.0, 0.0), (10.0, 0.0)])), &mut vp);
			g.handle(end.clone(), &mut vp);
			assert_eq!(g.state(), &GestureState::Idle);

			g.handle(PointerInput::MouseDown(Point::new(1.0, 1.0)), &mut vp);
			g.handle(end, &mut vp);
			assert_eq!(g.state(), &GestureState::Idle);
		}
	}

	#[test]
	fn single_touch_after_pinch_starts_fresh_anchor() {
		let mut vp = Viewport::default();
		let mut g = GestureRecognizer::default();

		g.handle(PointerInput::TouchStart(touches(&[(0.0, 0.0), (10.0, 0.0)])), &mut vp);
		g.handle(PointerInput::TouchEnd, &mut vp);
		// lifted finger's remaining touch doesn't pan until a new start
		assert!(!g.handle(PointerInput::TouchMove(touches(&[(40.0, 40.0)])), &mut vp));

		g.handle(PointerInput::TouchStart(touches(&[(40.0, 40.0)])), &mut vp);
		g.handle(PointerInput::TouchMove(touches(&[(40.0, 40.0)])), &mut vp);
		assert_eq!(vp.offset(), Point::ORIGIN);
		g.handle(PointerInput::TouchMove(touches(&[(45.0, 35.0)])), &mut vp);
		assert_eq!(vp.offset(), Point::new(5.0, -5.0));
	}

	#[test]
	fn degenerate_pinch_start_is_ignored() {
		let mut vp = Viewport::default();
		let mut g = GestureRecognizer::default();
		g.handle(PointerInput::TouchStart(touches(&[(5.0, 5.0), (5.0, 5.0)])), &mut vp);
		assert!(!g.handle(
			PointerInput::TouchMove(touches(&[(0.0, 0.0), (100.0, 0.0)])),
			&mut vp
		));
		assert_eq!(vp.scale(), 1.0);
	}

	#[test]
	fn three_finger_touch_leaves_state_alone() {
		let mut vp = Viewport::default();
		let mut g = GestureRecognizer::default();
		g.handle(PointerInput::MouseDown(Point::new(0.0, 0.0)), &mut vp);
		assert!(!g.handle(
			PointerInput::TouchStart(touches(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)])),
			&mut vp
		));
		assert!(g.is_dragging());
	}
}
