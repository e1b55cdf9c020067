use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use leptos::prelude::*;
use log::{debug, error, info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, DomRect, HtmlCanvasElement, HtmlElement, MouseEvent, TouchEvent,
	WheelEvent, Window,
};

use super::gesture::PointerInput;
use super::render;
use super::state::ArchitectureState;
use super::types::{GraphData, Point};
use super::viewport::is_compact;

type CanvasRef = NodeRef<leptos::html::Canvas>;
type Shared<T> = Rc<RefCell<Option<T>>>;

const FRAME_DT: f64 = 0.016;

fn window_is_compact(window: &Window) -> bool {
	window
		.inner_width()
		.ok()
		.and_then(|w| w.as_f64())
		.is_some_and(is_compact)
}

fn canvas_size(
	canvas: &HtmlCanvasElement,
	width: Option<f64>,
	height: Option<f64>,
	compact: bool,
) -> (f64, f64) {
	let w = width.unwrap_or_else(|| {
		canvas
			.parent_element()
			.map(|p| p.client_width() as f64)
			.unwrap_or(800.0)
	});
	let h = height.unwrap_or(if compact { 500.0 } else { 700.0 });
	(w, h)
}

fn canvas_rect(canvas_ref: CanvasRef) -> Option<DomRect> {
	let canvas: HtmlCanvasElement = canvas_ref.get_untracked()?.into();
	Some(canvas.get_bounding_client_rect())
}

fn mouse_point(canvas_ref: CanvasRef, ev: &MouseEvent) -> Option<Point> {
	let rect = canvas_rect(canvas_ref)?;
	Some(Point::new(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

fn touch_points(canvas_ref: CanvasRef, ev: &TouchEvent) -> Vec<Point> {
	let Some(rect) = canvas_rect(canvas_ref) else {
		return Vec::new();
	};
	let touches = ev.touches();
	(0..touches.length())
		.filter_map(|i| touches.get(i))
		.map(|t| {
			Point::new(
				t.client_x() as f64 - rect.left(),
				t.client_y() as f64 - rect.top(),
			)
		})
		.collect()
}

/// Detach the resize listener and release both closures once unmounted.
fn teardown(resize_cb: &Shared<Closure<dyn FnMut()>>, animate: &Shared<Closure<dyn FnMut()>>) {
	if let (Some(win), Some(cb)) = (web_sys::window(), resize_cb.borrow_mut().take()) {
		let _ = win.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
	}
	// dropping a closure mid-call is deferred until it returns
	animate.borrow_mut().take();
	debug!("architecture map torn down");
}

fn set_cursor(canvas_ref: CanvasRef, dragging: bool) {
	if let Some(canvas) = canvas_ref.get_untracked() {
		let canvas: HtmlCanvasElement = canvas.into();
		let cursor = if dragging { "grabbing" } else { "grab" };
		let _ = HtmlElement::style(&canvas).set_property("cursor", cursor);
	}
}

/// Pan/zoom canvas with hover highlighting, plus zoom controls.
#[component]
pub fn ArchitectureMap(
	#[prop(into)] data: Signal<GraphData>,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = CanvasRef::new();
	let state: Shared<ArchitectureState> = Rc::new(RefCell::new(None));
	let animate: Shared<Closure<dyn FnMut()>> = Rc::new(RefCell::new(None));
	let resize_cb: Shared<Closure<dyn FnMut()>> = Rc::new(RefCell::new(None));
	let mounted = Arc::new(AtomicBool::new(true));
	let zoom_percent = RwSignal::new(100);
	let compact = RwSignal::new(false);

	let (state_init, animate_init, resize_cb_init, mounted_init) = (
		state.clone(),
		animate.clone(),
		resize_cb.clone(),
		mounted.clone(),
	);

	Effect::new(move |_| {
		let graph = data.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if let Some(s) = state_init.borrow_mut().as_mut() {
			s.set_data(&graph);
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			error!("no window; architecture map not mounted");
			return;
		};

		let is_compact = window_is_compact(&window);
		let (w, h) = canvas_size(&canvas, width, height, is_compact);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			error!("canvas 2d context unavailable");
			return;
		};

		let s = ArchitectureState::new(&graph, w, h, is_compact);
		compact.set(is_compact);
		zoom_percent.set(s.viewport.zoom_percent());
		*state_init.borrow_mut() = Some(s);
		info!("architecture map mounted at {w}x{h}, compact: {is_compact}");

		let (state_resize, canvas_resize, mounted_resize) =
			(state_init.clone(), canvas.clone(), mounted_init.clone());
		*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
			if !mounted_resize.load(Ordering::Relaxed) {
				return;
			}
			let Some(win) = web_sys::window() else {
				return;
			};
			let now_compact = window_is_compact(&win);
			let (nw, nh) = canvas_size(&canvas_resize, width, height, now_compact);
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			if let Some(ref mut s) = *state_resize.borrow_mut() {
				s.resize(nw, nh, now_compact);
				zoom_percent.set(s.viewport.zoom_percent());
			}
			compact.set(now_compact);
		}));
		if let Some(ref cb) = *resize_cb_init.borrow() {
			if window
				.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref())
				.is_err()
			{
				warn!("could not listen for window resize");
			}
		}

		let (state_anim, animate_inner, resize_anim, mounted_anim) = (
			state_init.clone(),
			animate_init.clone(),
			resize_cb_init.clone(),
			mounted_init.clone(),
		);
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if !mounted_anim.load(Ordering::Relaxed) {
				state_anim.borrow_mut().take();
				teardown(&resize_anim, &animate_inner);
				return;
			}
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				s.tick(FRAME_DT);
				render::render(s, &ctx);
			}
			if let (Some(win), Some(cb)) = (web_sys::window(), animate_inner.borrow().as_ref()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let mounted_cleanup = mounted.clone();
	on_cleanup(move || {
		mounted_cleanup.store(false, Ordering::Relaxed);
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some(p) = mouse_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_md.borrow_mut() {
			s.handle_input(PointerInput::MouseDown(p));
			set_cursor(canvas_ref, s.gesture.is_dragging());
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(p) = mouse_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			s.pointer_moved(p);
			s.handle_input(PointerInput::MouseMove(p));
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_mu.borrow_mut() {
			s.handle_input(PointerInput::MouseUp);
		}
		set_cursor(canvas_ref, false);
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.handle_input(PointerInput::MouseLeave);
			s.set_hover(None);
		}
		set_cursor(canvas_ref, false);
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		if let Some(ref mut s) = *state_wh.borrow_mut() {
			s.handle_input(PointerInput::Wheel {
				delta_y: ev.delta_y(),
			});
			zoom_percent.set(s.viewport.zoom_percent());
		}
	};

	let state_ts = state.clone();
	let on_touchstart = move |ev: TouchEvent| {
		let points = touch_points(canvas_ref, &ev);
		if let Some(ref mut s) = *state_ts.borrow_mut() {
			if let [p] = points.as_slice() {
				s.tap(*p);
			}
			s.handle_input(PointerInput::TouchStart(points));
		}
	};

	let state_tm = state.clone();
	let on_touchmove = move |ev: TouchEvent| {
		let points = touch_points(canvas_ref, &ev);
		if let Some(ref mut s) = *state_tm.borrow_mut() {
			if s.handle_input(PointerInput::TouchMove(points)) {
				ev.prevent_default();
				zoom_percent.set(s.viewport.zoom_percent());
			}
		}
	};

	let state_te = state.clone();
	let on_touchend = move |_: TouchEvent| {
		if let Some(ref mut s) = *state_te.borrow_mut() {
			s.handle_input(PointerInput::TouchEnd);
		}
	};

	let state_zi = state.clone();
	let on_zoom_in = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_zi.borrow_mut() {
			s.zoom_in();
			zoom_percent.set(s.viewport.zoom_percent());
		}
	};

	let state_zo = state.clone();
	let on_zoom_out = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_zo.borrow_mut() {
			s.zoom_out();
			zoom_percent.set(s.viewport.zoom_percent());
		}
	};

	let state_rs = state.clone();
	let on_reset = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_rs.borrow_mut() {
			s.reset();
			zoom_percent.set(s.viewport.zoom_percent());
		}
	};

	view! {
		<p class="map-instructions">
			{move || {
				if compact.get() {
					"Pinch to zoom, drag to pan, tap services for details"
				} else {
					"Hover over services to see connections and details"
				}
			}}
		</p>

		<div class="zoom-controls">
			<button class="btn btn-primary" on:click=on_zoom_in>"Zoom In +"</button>
			<button class="btn btn-primary" on:click=on_zoom_out>"Zoom Out -"</button>
			<button class="btn btn-secondary" on:click=on_reset>"Reset"</button>
		</div>
		<div class="zoom-readout">{move || format!("Zoom: {}%", zoom_percent.get())}</div>

		<div class="map-frame">
			<canvas
				node_ref=canvas_ref
				class="architecture-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				on:touchstart=on_touchstart
				on:touchmove=on_touchmove
				on:touchend=on_touchend
				style="display: block; cursor: grab; touch-action: none;"
			/>
		</div>
	}
}
