//! Leptos component wrapping the trade graph canvas.
//!
//! The component creates an HTML canvas element and wires up mouse/wheel event
//! handlers for orbiting, zooming, hovering and clicking. There is no
//! animation loop: the canvas is redrawn after each event that changes what
//! is shown.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::render;
use super::scale::ScaleConfig;
use super::scene::TradeGraphState;
use super::theme::Theme;
use crate::network::TradeNetwork;

/// Bundles scene state with the drawing context and visual configuration.
struct GraphContext {
	state: TradeGraphState,
	ctx: CanvasRenderingContext2d,
	scale: ScaleConfig,
	theme: Theme,
}

type SharedContext = Rc<RefCell<Option<GraphContext>>>;

fn redraw(context: &SharedContext) {
	if let Some(ref c) = *context.borrow() {
		render::render(&c.state, &c.ctx, &c.scale, &c.theme);
	}
}

fn window_size(window: &Window) -> (f64, f64) {
	let dim = |v: Result<JsValue, JsValue>, fallback| v.ok().and_then(|v| v.as_f64()).unwrap_or(fallback);
	(dim(window.inner_width(), 1280.0), dim(window.inner_height(), 800.0))
}

/// Canvas-relative pointer position.
fn pointer(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Renders the three-layer trade network on a canvas element.
///
/// Drag to orbit the camera, scroll to zoom, click a node to highlight its
/// transactions, click empty space to clear the highlight. The component
/// sizes itself to its parent container by default; set `fullscreen = true`
/// to fill the viewport and resize automatically with the window. Explicit
/// `width`/`height` override automatic sizing.
#[component]
pub fn TradeGraphCanvas(
	#[prop(into)] network: Signal<TradeNetwork>,
	#[prop(into, default = "Trade Network".to_string())] title: String,
	#[prop(default = Theme::default())] theme: Theme,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: SharedContext = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (context_init, resize_cb_init) = (context.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = if fullscreen {
			window_size(&window)
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			warn!("trade-network: canvas 2d context unavailable");
			return;
		};

		*context_init.borrow_mut() = Some(GraphContext {
			state: TradeGraphState::new(network.get(), &title, w, h),
			ctx,
			scale: ScaleConfig::default(),
			theme: theme.clone(),
		});

		if fullscreen {
			let (context_resize, canvas_resize) = (context_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let Some(win) = web_sys::window() else {
					return;
				};
				let (nw, nh) = window_size(&win);
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut c) = *context_resize.borrow_mut() {
					c.state.resize(nw, nh);
				}
				redraw(&context_resize);
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		redraw(&context_init);
	});

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = pointer(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut c) = *context_md.borrow_mut() {
			c.state.orbit.begin(x, y);
		}
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = pointer(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut c) = *context_mm.borrow_mut() {
			if c.state.orbit.active {
				let (dx, dy) = c.state.orbit.drag_to(x, y);
				if c.state.orbit.moved {
					c.state.camera_mut().orbit(dx, dy);
				}
			} else {
				let hovered = c.state.node_at_position(x, y, &c.scale);
				if hovered == c.state.hovered {
					return;
				}
				c.state.set_hover(hovered);
			}
		}
		redraw(&context_mm);
	};

	let context_mu = context.clone();
	let on_mouseup = move |ev: MouseEvent| {
		let Some((x, y)) = pointer(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut c) = *context_mu.borrow_mut() {
			if !c.state.orbit.end() {
				return;
			}
			let clicked = c.state.node_at_position(x, y, &c.scale);
			debug!("trade-network: click at ({x}, {y}) -> {clicked:?}");
			c.state.click(clicked);
		}
		redraw(&context_mu);
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_ml.borrow_mut() {
			c.state.orbit.end();
			c.state.set_hover(None);
		}
		redraw(&context_ml);
	};

	let context_wh = context.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		if let Some(ref mut c) = *context_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 1.1 } else { 0.9 };
			c.state.camera_mut().zoom(factor);
		}
		redraw(&context_wh);
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="trade-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}
