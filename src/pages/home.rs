use leptos::prelude::*;

use crate::components::topology_map::{
	ElementKind, Link, LinkDirection, LinkStatus, ListPager, Location, Node, Page, Selection,
	StatusKind, Topology, TopologyMap, format_number,
};

/// (city, latitude, longitude)
const CITIES: &[(&str, f64, f64)] = &[
	("NYC", 40.71, -74.01),
	("CHI", 41.88, -87.63),
	("LAX", 34.05, -118.24),
	("GRU", -23.55, -46.63),
	("LON", 51.51, -0.13),
	("FRA", 50.11, 8.68),
	("JNB", -26.20, 28.05),
	("DXB", 25.20, 55.27),
	("BOM", 19.08, 72.88),
	("SIN", 1.35, 103.82),
	("TYO", 35.68, 139.69),
	("SYD", -33.87, 151.21),
];

const SAMPLES: &[&str] = &["backbone", "atlantic"];

/// Rough equirectangular placement around the null island anchor.
fn project(lat: f64, lon: f64) -> Location {
	Location::at(986.0 + lon * 5.45, 497.0 - lat * 5.45)
}

/// Deterministic demo topology; some links use the structured endpoint form.
fn sample_topology(name: &str) -> Topology {
	let cities: Vec<_> = match name {
		"atlantic" => CITIES.iter().filter(|(_, _, lon)| *lon < 10.0).collect(),
		_ => CITIES.iter().collect(),
	};
	let mut topology = Topology {
		name: name.to_string(),
		..Topology::default()
	};
	for (i, (city, lat, lon)) in cities.iter().enumerate() {
		topology.locations.insert(city.to_string(), project(*lat, *lon));
		topology.nodes.insert(city.to_string(), Node {
			node_id: format!("{city}{i}"),
			location: city.to_string(),
			name: format!("{city} core router"),
		});
	}
	// A node whose site has no coordinates lands on the null island.
	topology.nodes.insert("LAB".into(), Node {
		node_id: "LAB0".into(),
		location: "LAB".into(),
		name: "Lab router".into(),
	});

	let ids: Vec<String> = topology.nodes.values().map(|n| n.node_id.clone()).collect();
	for (i, pair) in ids.windows(2).enumerate() {
		let aside = if i % 2 == 0 {
			format!("networkdevice<{{24}}{{24}}{}>.physicals.eth{i}", pair[0])
		} else {
			pair[0].clone()
		};
		let link_id = format!("{}<->{}", pair[0], pair[1]);
		topology.links.insert(link_id.clone(), Link {
			link_id,
			aside,
			zside: pair[1].clone(),
			direction: LinkDirection::from((i % 4) as i32),
			status: LinkStatus::from((i % 4) as i32),
		});
	}
	// Dangling endpoint; skipped when drawn.
	topology.links.insert("LAB0<->GHOST".into(), Link {
		link_id: "LAB0<->GHOST".into(),
		aside: "LAB0".into(),
		zside: "networkdevice<{24}{24}GHOST>.physicals.eth0".into(),
		direction: LinkDirection::AsideToZside,
		status: LinkStatus::Down,
	});
	topology
}

#[component]
fn PagerControls<T: Send + Sync + 'static>(
	page: Signal<Page<T>>,
	pager: RwSignal<ListPager>,
) -> impl IntoView {
	let summary = move || {
		page.with(|p| {
			format!(
				"Page {} of {} ({} matches)",
				p.index + 1,
				p.count,
				format_number(p.matches)
			)
		})
	};
	view! {
		<div class="pager">
			<input
				type="search"
				placeholder="Filter"
				prop:value=move || pager.with(|p| p.filter().to_string())
				on:input=move |ev| pager.update(|p| p.set_filter(&event_target_value(&ev)))
			/>
			<button
				disabled=move || page.with(|p| p.index == 0)
				on:click=move |_| {
					let shown = page.with_untracked(|p| p.index);
					pager.update(|p| p.show_page(shown.saturating_sub(1)));
				}
			>
				"Prev"
			</button>
			<span>{summary}</span>
			<button
				disabled=move || page.with(|p| p.index + 1 >= p.count)
				on:click=move |_| {
					let shown = page.with_untracked(|p| p.index);
					pager.update(|p| p.show_page(shown + 1));
				}
			>
				"Next"
			</button>
		</div>
	}
}

/// Topology browser page
#[component]
pub fn Home() -> impl IntoView {
	let selected_name = RwSignal::new(SAMPLES[0].to_string());
	let topology = RwSignal::new(Some(sample_topology(SAMPLES[0])));
	let selection = RwSignal::new(None::<Selection>);
	let status = RwSignal::new((String::from("Loading..."), StatusKind::Info));
	let visible = RwSignal::new(0usize);
	let node_pager = RwSignal::new(ListPager::default());
	let link_pager = RwSignal::new(ListPager::default());

	Effect::new(move |_| {
		topology.track();
		node_pager.update(ListPager::reset);
		link_pager.update(ListPager::reset);
		selection.set(None);
	});

	let load = move |name: String| {
		topology.set((!name.is_empty()).then(|| sample_topology(&name)));
		selected_name.set(name);
	};

	let node_page = Signal::derive(move || {
		let mut pager = node_pager.get();
		topology.with(|t| {
			let rows = t
				.iter()
				.flat_map(|t| t.nodes.iter())
				.map(|(key, node)| (key.clone(), node.label().to_string(), node.location.clone()));
			pager.paginate(rows, |(key, label, location)| format!("{key} {label} {location}"))
		})
	});
	let link_page = Signal::derive(move || {
		let mut pager = link_pager.get();
		topology.with(|t| {
			let rows = t
				.iter()
				.flat_map(|t| t.links.values())
				.map(|link| (link.link_id.clone(), link.status));
			pager.paginate(rows, |(id, status)| format!("{id} {}", status.label()))
		})
	});

	let select_node = move |key: String| {
		selection.set(Some(Selection {
			kind: ElementKind::Node,
			id: key,
		}))
	};
	let select_link = move |id: String| {
		selection.set(Some(Selection {
			kind: ElementKind::Link,
			id,
		}))
	};

	let details = move || {
		let current = selection.get()?;
		topology.with(|t| {
			let t = t.as_ref()?;
			let text = match current.kind {
				ElementKind::Node => {
					let node = t.nodes.get(&current.id)?;
					format!("{} ({}) at {}", node.label(), node.name, node.location)
				}
				ElementKind::Link => {
					let link = t.links.get(&current.id)?;
					format!(
						"{}: {} -> {}, status {}",
						link.link_id,
						link.aside,
						link.zside,
						link.status.label()
					)
				}
			};
			Some(view! { <div class="details">{text}</div> })
		})
	};

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="topology-browser">
				<header class="toolbar">
					<h1>"Topology Browser"</h1>
					<select on:change=move |ev| load(event_target_value(&ev))>
						<option value="">"No topology"</option>
						{SAMPLES
							.iter()
							.map(|name| {
								view! {
									<option
										value=*name
										selected=move || selected_name.with(|s| s == name)
									>
										{*name}
									</option>
								}
							})
							.collect_view()}
					</select>
					<button on:click=move |_| load(selected_name.get_untracked())>"Refresh"</button>
					<span class="in-view">
						{move || format!("{} nodes in view", format_number(visible.get()))}
					</span>
				</header>

				<TopologyMap
					topology=topology
					highlight=selection
					on_node_selected=Callback::new(select_node)
					on_link_selected=Callback::new(select_link)
					on_status=Callback::new(move |next: (String, StatusKind)| status.set(next))
					on_visible_nodes=Callback::new(move |count: usize| visible.set(count))
				/>

				{details}

				<div class="lists">
					<section>
						<h2>"Nodes"</h2>
						<PagerControls page=node_page pager=node_pager />
						<ul>
							{move || {
								node_page
									.get()
									.items
									.into_iter()
									.map(|(key, label, location)| {
										let id = key.clone();
										view! {
											<li on:click=move |_| select_node(id.clone())>
												{label} " - " {location}
											</li>
										}
									})
									.collect_view()
							}}
						</ul>
					</section>
					<section>
						<h2>"Links"</h2>
						<PagerControls page=link_page pager=link_pager />
						<ul>
							{move || {
								link_page
									.get()
									.items
									.into_iter()
									.map(|(id, link_status)| {
										let link_id = id.clone();
										view! {
											<li
												class=format!("status-{}", link_status.code())
												on:click=move |_| select_link(link_id.clone())
											>
												{id}
											</li>
										}
									})
									.collect_view()
							}}
						</ul>
					</section>
				</div>

				<footer id="status-bar" class=move || status.with(|(_, kind)| kind.class())>
					{move || status.with(|(message, _)| message.clone())}
				</footer>
			</div>
		</ErrorBoundary>
	}
}
