use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::debug;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::layout::GraphLayout;
use super::paint;
use crate::types::{Graph, SiteTheme};

type Shared<T> = Rc<RefCell<Option<T>>>;

/// A `window` event listener that unregisters itself when dropped.
struct WindowListener {
	event: &'static str,
	callback: Closure<dyn FnMut()>,
}

impl WindowListener {
	fn add(event: &'static str, f: impl FnMut() + 'static) -> Option<Self> {
		let window = web_sys::window()?;
		let callback = Closure::<dyn FnMut()>::new(f);
		window
			.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
			.ok()?;
		Some(Self { event, callback })
	}
}

impl Drop for WindowListener {
	fn drop(&mut self) {
		if let Some(window) = web_sys::window() {
			let _ = window
				.remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
		}
	}
}

fn parent_width(canvas: &HtmlCanvasElement) -> f64 {
	canvas
		.parent_element()
		.map(|p| p.client_width() as f64)
		.filter(|w| *w > 0.0)
		.unwrap_or(600.0)
}

fn local_point(canvas: Option<HtmlCanvasElement>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let rect = canvas?.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Interactive force-directed drawing of the generated graph. Nodes can be
/// dragged (and stay pinned), the background pans and the wheel zooms.
#[component]
pub fn GraphView(
	#[prop(into)] graph: Signal<Option<Graph>>,
	#[prop(into)] site_theme: Signal<SiteTheme>,
	#[prop(default = 320.0)] height: f64,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let layout: Shared<GraphLayout> = Rc::new(RefCell::new(None));
	let theme = Rc::new(Cell::new(SiteTheme::default()));
	let frame: Shared<Closure<dyn FnMut()>> = Rc::new(RefCell::new(None));
	let on_resize: Shared<WindowListener> = Rc::new(RefCell::new(None));

	let theme_fx = theme.clone();
	Effect::new(move |_| theme_fx.set(site_theme.get()));

	let (layout_fx, theme_loop) = (layout.clone(), theme.clone());
	Effect::new(move |_| {
		let data = graph.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let width = parent_width(&canvas);
		canvas.set_width(width as u32);
		canvas.set_height(height as u32);
		*layout_fx.borrow_mut() = data.as_ref().map(|g| GraphLayout::new(g, width, height));
		debug!(
			"graph view rebuilt with {} nodes",
			data.as_ref().map_or(0, |g| g.nodes.len())
		);

		if frame.borrow().is_some() {
			return;
		}
		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			return;
		};
		let Some(window) = web_sys::window() else {
			return;
		};

		let (layout_resize, canvas_resize) = (layout_fx.clone(), canvas.clone());
		*on_resize.borrow_mut() = WindowListener::add("resize", move || {
			let w = parent_width(&canvas_resize);
			canvas_resize.set_width(w as u32);
			if let Some(ref mut l) = *layout_resize.borrow_mut() {
				l.resize(w, height);
			}
		});

		let (layout_anim, frame_inner, theme_anim, resize_stop) = (
			layout_fx.clone(),
			frame.clone(),
			theme_loop.clone(),
			on_resize.clone(),
		);
		*frame.borrow_mut() = Some(Closure::new(move || {
			// Stop once the canvas has left the document.
			if !canvas.is_connected() {
				if resize_stop.borrow_mut().take().is_some() {
					debug!("graph view detached");
				}
				return;
			}
			match *layout_anim.borrow_mut() {
				Some(ref mut l) => {
					l.tick(0.016);
					paint::paint(l, theme_anim.get(), &ctx);
				}
				None => ctx.clear_rect(0.0, 0.0, canvas.width() as f64, canvas.height() as f64),
			}
			if let (Some(cb), Some(win)) = (frame_inner.borrow().as_ref(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *frame.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let layout_down = layout.clone();
	let on_mousedown = move |ev: MouseEvent| {
		if let (Some((x, y)), Some(l)) = (
			local_point(canvas_ref.get(), &ev),
			layout_down.borrow_mut().as_mut(),
		) {
			l.press(x, y);
		}
	};

	let layout_move = layout.clone();
	let on_mousemove = move |ev: MouseEvent| {
		if let (Some((x, y)), Some(l)) = (
			local_point(canvas_ref.get(), &ev),
			layout_move.borrow_mut().as_mut(),
		) {
			l.drag(x, y);
		}
	};

	let layout_up = layout.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(l) = layout_up.borrow_mut().as_mut() {
			l.release();
		}
	};

	let layout_leave = layout.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(l) = layout_leave.borrow_mut().as_mut() {
			l.leave();
		}
	};

	let layout_wheel = layout.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		if let (Some((x, y)), Some(l)) = (
			local_point(canvas_ref.get(), &ev),
			layout_wheel.borrow_mut().as_mut(),
		) {
			l.zoom_at(x, y, if ev.delta_y() > 0.0 { 0.9 } else { 1.1 });
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="graph-view"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; width: 100%; cursor: grab;"
		/>
	}
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
	use std::cell::Cell;
	use std::rc::Rc;

	use wasm_bindgen_test::*;

	use super::WindowListener;

	wasm_bindgen_test_configure!(run_in_browser);

	fn fire_resize() {
		let window = web_sys::window().unwrap();
		let event = web_sys::Event::new("resize").unwrap();
		window.dispatch_event(&event).unwrap();
	}

	#[wasm_bindgen_test]
	fn dropped_listener_stops_receiving_events() {
		let hits = Rc::new(Cell::new(0));
		let counter = hits.clone();
		let listener = WindowListener::add("resize", move || counter.set(counter.get() + 1)).unwrap();
		fire_resize();
		assert_eq!(hits.get(), 1);
		drop(listener);
		fire_resize();
		assert_eq!(hits.get(), 1);
	}
}
