use leptos::prelude::*;
use log::debug;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlImageElement, MouseEvent, WheelEvent, Window};

use super::highlight::{ElementKind, HIGHLIGHT_DURATION, RevertTicket};
use super::scene::arrow_marker_id;
use super::state::{StatusKind, TopologyMapState};
use super::types::{LinkStatus, Topology};
use super::viewport::{TRANSFORM_ORIGIN, ViewTransform, ViewportConfig};

/// An element the host wants emphasized for a moment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
	pub kind: ElementKind,
	pub id: String,
}

fn layer_style(transform: &ViewTransform) -> String {
	format!(
		"transform: {}; transform-origin: {TRANSFORM_ORIGIN};",
		transform.css()
	)
}

fn report(on_status: Option<Callback<(String, StatusKind)>>, message: String, kind: StatusKind) {
	if let Some(cb) = on_status {
		cb.run((message, kind));
	}
}

fn schedule_revert(state: RwSignal<TopologyMapState>, ticket: RevertTicket) {
	let Some(window) = web_sys::window() else {
		return;
	};
	let revert = Closure::once_into_js(move || {
		state.maybe_update(|s| s.revert_highlight(ticket));
	});
	let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
		revert.unchecked_ref::<js_sys::Function>(),
		HIGHLIGHT_DURATION.as_millis() as i32,
	);
}

fn sync_with_image(state: RwSignal<TopologyMapState>, image: &HtmlImageElement, loaded: bool) {
	state.update(|s| {
		let transform = s.viewport.composed_transform();
		let frame = if loaded {
			s.overlay.image_loaded(
				image.natural_width() as f64,
				image.natural_height() as f64,
				image,
				&transform,
			)
		} else {
			s.overlay.sync(image, &transform)
		};
		if frame.is_some() {
			s.rerender();
		}
	});
}

fn arrow_defs() -> impl IntoView {
	let arrow = |status: LinkStatus, at_end: bool| {
		let (ref_x, path) = if at_end {
			("9", "M 0 0 L 10 5 L 0 10 z")
		} else {
			("1", "M 10 0 L 0 5 L 10 10 z")
		};
		view! {
			<marker
				id=arrow_marker_id(at_end, status)
				viewBox="0 0 10 10"
				refX=ref_x
				refY="5"
				markerWidth="8"
				markerHeight="8"
				orient="auto"
			>
				<path d=path fill=status.color() />
			</marker>
		}
	};
	LinkStatus::ALL
		.into_iter()
		.flat_map(|status| [arrow(status, true), arrow(status, false)])
		.collect_view()
}

/// World map with the topology drawn on a pannable, zoomable overlay.
#[component]
pub fn TopologyMap(
	#[prop(into)] topology: Signal<Option<Topology>>,
	#[prop(into, default = String::from("world-map.svg"))] map_src: String,
	#[prop(optional)] viewport: ViewportConfig,
	#[prop(optional, into)] highlight: Option<Signal<Option<Selection>>>,
	#[prop(optional, into)] on_node_selected: Option<Callback<String>>,
	#[prop(optional, into)] on_link_selected: Option<Callback<String>>,
	#[prop(optional, into)] on_status: Option<Callback<(String, StatusKind)>>,
	#[prop(optional, into)] on_visible_nodes: Option<Callback<usize>>,
) -> impl IntoView {
	let image_ref = NodeRef::<leptos::html::Img>::new();
	let state = RwSignal::new(TopologyMapState::new(viewport));
	let resize_cb = StoredValue::new_local(None::<Closure<dyn FnMut()>>);

	Effect::new(move |_| {
		let next = topology.get();
		if let Some((message, kind)) = state.try_update(|s| s.replace_topology(next)) {
			report(on_status, message, kind);
		}
	});

	Effect::new(move |_| {
		let Some(image) = image_ref.get() else {
			return;
		};
		let image: HtmlImageElement = image.into();
		if image.complete() {
			sync_with_image(state, &image, true);
		}
		if resize_cb.with_value(Option::is_some) {
			return;
		}
		let Some(window): Option<Window> = web_sys::window() else {
			return;
		};
		let cb = Closure::<dyn FnMut()>::new(move || {
			if let Some(image) = image_ref.try_get_untracked().flatten() {
				sync_with_image(state, &image.into(), false);
			}
		});
		let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		resize_cb.set_value(Some(cb));
	});

	on_cleanup(move || {
		let Some(cb) = resize_cb.try_update_value(Option::take).flatten() else {
			return;
		};
		if let Some(window) = web_sys::window() {
			let _ = window.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}
		debug!("removed map resize listener");
	});

	if let Some(highlight) = highlight {
		Effect::new(move |_| {
			let Some(selection) = highlight.get() else {
				return;
			};
			debug!("highlighting {:?} {}", selection.kind, selection.id);
			if let Some(ticket) = state.try_update(|s| s.highlight(selection.kind, &selection.id)) {
				schedule_revert(state, ticket);
			}
		});
	}

	if let Some(cb) = on_visible_nodes {
		Effect::new(move |_| {
			cb.run(state.with(|s| s.visible_node_count()));
		});
	}

	let on_image_load = move |_| {
		if let Some(image) = image_ref.get() {
			sync_with_image(state, &image.into(), true);
		}
	};
	let on_image_error = move |_| {
		report(on_status, "Failed to load the world map image".to_string(), StatusKind::Error);
	};

	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		if ev.delta_y() < 0.0 {
			state.maybe_update(|s| s.viewport.zoom_in());
		} else {
			state.maybe_update(|s| s.viewport.zoom_out());
		}
	};
	let on_mousedown = move |ev: MouseEvent| {
		let (x, y) = (ev.client_x() as f64, ev.client_y() as f64);
		if state.try_update(|s| s.viewport.begin_drag(x, y)) == Some(true) {
			ev.prevent_default();
		}
	};
	let on_mousemove = move |ev: MouseEvent| {
		let (x, y) = (ev.client_x() as f64, ev.client_y() as f64);
		state.maybe_update(|s| s.viewport.drag_to(x, y));
	};
	let end_drag = move |_: MouseEvent| {
		state.maybe_update(|s| {
			let was_dragging = s.viewport.pan.active;
			s.viewport.end_drag();
			was_dragging
		});
	};

	let image_style = move || state.with(|s| layer_style(&s.viewport.composed_transform()));
	let overlay_style = move || {
		state.with(|s| {
			let frame = s.overlay.frame().map(|f| f.css()).unwrap_or_default();
			format!("{frame} {}", layer_style(&s.viewport.composed_transform()))
		})
	};
	let container_style = move || state.with(|s| format!("cursor: {};", s.viewport.cursor()));
	let view_box = move || state.with(|s| s.overlay.view_box());
	let zoom_label = move || state.with(|s| s.viewport.zoom_label());

	let edges = move || {
		state.with(|s| {
			s.scene
				.edges()
				.iter()
				.map(|edge| {
					let spec = &edge.spec;
					let link_id = spec.link_id.clone();
					let data_id = link_id.clone();
					let on_click = move |_: MouseEvent| {
						if let Some(cb) = on_link_selected {
							cb.run(link_id.clone());
						}
					};
					view! {
						<line
							class=spec.class()
							data-link-id=data_id
							x1=spec.from.x.to_string()
							y1=spec.from.y.to_string()
							x2=spec.to.x.to_string()
							y2=spec.to.y.to_string()
							stroke=spec.color()
							stroke-width=edge.visual.stroke_width.to_string()
							opacity=edge.visual.opacity.to_string()
							marker-start=spec.marker_start()
							marker-end=spec.marker_end()
							style="pointer-events: stroke; cursor: pointer;"
							on:click=on_click
						/>
					}
				})
				.collect_view()
		})
	};

	let markers = move || {
		state.with(|s| {
			s.scene
				.markers()
				.iter()
				.map(|marker| {
					let key = marker.spec.key.clone();
					let data_id = key.clone();
					let label_at = marker.label_position();
					let on_click = move |_: MouseEvent| {
						if let Some(cb) = on_node_selected {
							cb.run(key.clone());
						}
					};
					view! {
						<g
							class="node"
							data-node-id=data_id
							opacity=marker.visual.opacity.to_string()
							on:click=on_click
						>
							<circle
								cx=marker.spec.position.x.to_string()
								cy=marker.spec.position.y.to_string()
								r=marker.visual.radius.to_string()
							/>
							<text x=label_at.x.to_string() y=label_at.y.to_string()>
								{marker.spec.label.clone()}
							</text>
						</g>
					}
				})
				.collect_view()
		})
	};

	view! {
		<div class="topology-map">
			<div class="map-controls">
				<button title="Zoom in" on:click=move |_| state.maybe_update(|s| s.viewport.zoom_in())>
					"+"
				</button>
				<button title="Zoom out" on:click=move |_| state.maybe_update(|s| s.viewport.zoom_out())>
					"-"
				</button>
				<button title="Reset zoom" on:click=move |_| state.update(|s| s.viewport.reset())>
					"Reset"
				</button>
				<span class="zoom-level">{zoom_label}</span>
			</div>
			<div
				class="map-container"
				style=container_style
				on:wheel=on_wheel
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=end_drag
				on:mouseleave=end_drag
			>
				<img
					node_ref=image_ref
					class="world-map"
					src=map_src
					alt="World map"
					draggable="false"
					style=image_style
					on:load=on_image_load
					on:error=on_image_error
				/>
				<svg class="overlay-svg" viewBox=view_box preserveAspectRatio="none" style=overlay_style>
					<defs>{arrow_defs()}</defs>
					<g class="links">{edges}</g>
					<g class="nodes">{markers}</g>
				</svg>
			</div>
		</div>
	}
}
