//! Interactive graph panel: hosts the engine, the frame loop and the
//! pointer gestures, and forwards timing records to the page.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::warn;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Element, HtmlCanvasElement, MouseEvent, WheelEvent};

use crate::engine::{Backend, EventKind, FrameSink, GraphEngine, Settings};

use super::canvas::CanvasBackend;
use super::svg::SvgBackend;

const ZOOM_IN_FACTOR: f64 = 1.1;
const ZOOM_OUT_FACTOR: f64 = 0.9;

#[derive(Clone, Copy, Debug, Default)]
struct PanState {
	active: bool,
	last_x: f64,
	last_y: f64,
}

/// Milliseconds since time origin, from the monotonic performance clock.
fn now() -> f64 {
	web_sys::window()
		.and_then(|w| w.performance())
		.map(|p| p.now())
		.unwrap_or(0.0)
}

/// The benchmark panel. Regenerates the graph whenever `settings` changes
/// and reports the four phase-boundary timestamps through the callbacks;
/// computing durations is the caller's business.
#[component]
pub fn GraphPanel(
	#[prop(into)] settings: Signal<Settings>,
	#[prop(into)] on_draw_start: Callback<f64>,
	#[prop(into)] on_draw_end: Callback<f64>,
	#[prop(into)] on_stabilize_start: Callback<f64>,
	#[prop(into)] on_stabilize_end: Callback<f64>,
) -> impl IntoView {
	let container_ref = NodeRef::<leptos::html::Div>::new();
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let svg_ref = NodeRef::<leptos::html::Div>::new();

	let engine: Rc<RefCell<Option<GraphEngine>>> = Rc::new(RefCell::new(None));
	let sink: Rc<RefCell<Option<Box<dyn FrameSink>>>> = Rc::new(RefCell::new(None));
	let pan: Rc<RefCell<PanState>> = Rc::new(RefCell::new(PanState::default()));
	let dragged: Rc<RefCell<Option<usize>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));

	let (engine_init, sink_init, animate_init) = (engine.clone(), sink.clone(), animate.clone());
	Effect::new(move |_| {
		let settings = settings.get();
		let Some(container) = container_ref.get() else {
			return;
		};
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let Some(svg_host) = svg_ref.get() else {
			return;
		};
		let container: web_sys::HtmlDivElement = container.into();
		let canvas: HtmlCanvasElement = canvas.into();
		let svg_host: Element = {
			let el: web_sys::HtmlDivElement = svg_host.into();
			el.into()
		};

		let w = match container.client_width() {
			0 => 800.0,
			w => w as f64,
		};
		let h = match container.client_height() {
			0 => 600.0,
			h => h as f64,
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let mut rng = SmallRng::seed_from_u64(js_sys::Date::now() as u64);
		let starting = {
			let mut slot = engine_init.borrow_mut();
			match slot.as_mut() {
				Some(engine) => {
					engine.regenerate(settings, &mut rng, now());
					false
				}
				None => {
					*slot = Some(GraphEngine::new(settings, &mut rng, w, h, now()));
					true
				}
			}
		};

		*sink_init.borrow_mut() = Some(match settings.backend {
			Backend::Canvas => {
				let ctx: CanvasRenderingContext2d = canvas
					.get_context("2d")
					.ok()
					.flatten()
					.and_then(|c| c.dyn_into().ok())
					.expect("canvas 2d context");
				svg_host.set_inner_html("");
				Box::new(CanvasBackend::new(ctx)) as Box<dyn FrameSink>
			}
			Backend::Svg => Box::new(SvgBackend::new(svg_host)) as Box<dyn FrameSink>,
		});

		if !starting {
			return;
		}

		// One requestAnimationFrame loop for the lifetime of the panel:
		// tick, draw, then hand the queued records to the callbacks.
		let (engine_anim, sink_anim, animate_inner) =
			(engine_init.clone(), sink_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut engine) = *engine_anim.borrow_mut() {
				engine.tick(now());
				engine.begin_draw(now());
				if let Some(ref mut sink) = *sink_anim.borrow_mut() {
					sink.submit_frame(&engine.frame());
				}
				engine.end_draw(now());
				for event in engine.drain_events() {
					match event.kind {
						EventKind::DrawStart => on_draw_start.run(event.timestamp),
						EventKind::DrawEnd => on_draw_end.run(event.timestamp),
						EventKind::StabilizeStart => on_stabilize_start.run(event.timestamp),
						EventKind::StabilizeEnd => on_stabilize_end.run(event.timestamp),
					}
				}
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				let _ = web_sys::window()
					.unwrap()
					.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = web_sys::window()
				.unwrap()
				.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let pointer_pos = move |ev: &MouseEvent| -> (f64, f64) {
		let Some(container) = container_ref.get() else {
			return (0.0, 0.0);
		};
		let container: web_sys::HtmlDivElement = container.into();
		let rect = container.get_bounding_client_rect();
		(
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		)
	};

	let (engine_md, pan_md, dragged_md) = (engine.clone(), pan.clone(), dragged.clone());
	let on_mousedown = move |ev: MouseEvent| {
		let (x, y) = pointer_pos(&ev);
		if let Some(ref mut engine) = *engine_md.borrow_mut() {
			if let Some(id) = engine.node_at(x, y) {
				let pos = engine.viewport().screen_to_world(x, y);
				match engine.drag_start(id, pos, now()) {
					Ok(()) => *dragged_md.borrow_mut() = Some(id),
					Err(e) => warn!("ignoring drag on missing node: {e}"),
				}
			} else {
				*pan_md.borrow_mut() = PanState {
					active: true,
					last_x: x,
					last_y: y,
				};
			}
		}
	};

	let (engine_mm, pan_mm, dragged_mm) = (engine.clone(), pan.clone(), dragged.clone());
	let on_mousemove = move |ev: MouseEvent| {
		let (x, y) = pointer_pos(&ev);
		if let Some(ref mut engine) = *engine_mm.borrow_mut() {
			if let Some(id) = *dragged_mm.borrow() {
				let pos = engine.viewport().screen_to_world(x, y);
				if let Err(e) = engine.drag_move(id, pos) {
					warn!("ignoring drag on missing node: {e}");
				}
			} else {
				let mut pan = pan_mm.borrow_mut();
				if pan.active {
					let (dx, dy) = (x - pan.last_x, y - pan.last_y);
					engine.viewport_mut().pan(dx, dy);
					pan.last_x = x;
					pan.last_y = y;
				}
			}
		}
	};

	let (engine_mu, pan_mu, dragged_mu) = (engine.clone(), pan.clone(), dragged.clone());
	let end_gesture = move || {
		if let Some(ref mut engine) = *engine_mu.borrow_mut() {
			if let Some(id) = dragged_mu.borrow_mut().take() {
				if let Err(e) = engine.drag_end(id) {
					warn!("ignoring drag on missing node: {e}");
				}
			}
		}
		pan_mu.borrow_mut().active = false;
	};
	let end_gesture_ml = end_gesture.clone();
	let on_mouseup = move |_: MouseEvent| end_gesture();
	let on_mouseleave = move |_: MouseEvent| end_gesture_ml();

	let engine_wh = engine.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let (x, y) = pointer_pos(&ev);
		if let Some(ref mut engine) = *engine_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 {
				ZOOM_OUT_FACTOR
			} else {
				ZOOM_IN_FACTOR
			};
			engine.viewport_mut().apply_gesture(0.0, 0.0, factor, (x, y));
		}
	};

	view! {
		<div
			node_ref=container_ref
			class="graph-panel"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="position: relative; width: 100%; height: 100vh; cursor: grab; overflow: hidden;"
		>
			<canvas
				node_ref=canvas_ref
				style:display=move || {
					if settings.get().backend == Backend::Canvas { "block" } else { "none" }
				}
			/>
			<div
				node_ref=svg_ref
				style="width: 100%; height: 100%;"
				style:display=move || {
					if settings.get().backend == Backend::Svg { "block" } else { "none" }
				}
			/>
		</div>
	}
}
