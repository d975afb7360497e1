use log::info;

use super::highlight::{ElementKind, RevertTicket, SelectionHighlighter};
use super::listing::format_number;
use super::overlay::OverlaySynchronizer;
use super::render::{RenderStats, render};
use super::scene::Scene;
use super::types::{Bounds, Point, Topology};
use super::viewport::{ViewportConfig, ViewportTransform};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusKind {
	Info,
	Success,
	Error,
}

impl StatusKind {
	pub fn class(self) -> &'static str {
		match self {
			Self::Info => "",
			Self::Success => "success",
			Self::Error => "error",
		}
	}
}

/// Everything the map view mutates, owned by one component instance.
#[derive(Clone, Debug, Default)]
pub struct TopologyMapState {
	pub topology: Option<Topology>,
	pub viewport: ViewportTransform,
	pub overlay: OverlaySynchronizer,
	pub scene: Scene,
	highlighter: SelectionHighlighter,
}

impl TopologyMapState {
	pub fn new(config: ViewportConfig) -> Self {
		Self {
			viewport: ViewportTransform::new(config),
			..Self::default()
		}
	}

	/// Swaps in a new topology and rebuilds the scene. The viewport is kept.
	pub fn load_topology(&mut self, topology: Topology) -> RenderStats {
		info!(
			"loading topology {:?} ({} nodes, {} links, {} locations)",
			topology.name,
			topology.nodes.len(),
			topology.links.len(),
			topology.locations.len()
		);
		let stats = render(&topology, &mut self.scene);
		self.topology = Some(topology);
		stats
	}

	pub fn clear_topology(&mut self) {
		if let Some(old) = self.topology.take() {
			info!("cleared topology {:?}", old.name);
		}
		self.scene.clear();
	}

	/// Loads or clears, returning a status line for the host.
	pub fn replace_topology(&mut self, next: Option<Topology>) -> (String, StatusKind) {
		let Some(topology) = next else {
			self.clear_topology();
			return ("No topology selected".to_string(), StatusKind::Info);
		};
		let name = topology.name.clone();
		let stats = self.load_topology(topology);
		let mut message = format!(
			"Loaded {name}: {} nodes, {} links",
			format_number(stats.markers),
			format_number(stats.edges)
		);
		if stats.skipped_links > 0 {
			message.push_str(&format!(" ({} unresolved)", format_number(stats.skipped_links)));
		}
		(message, StatusKind::Success)
	}

	/// Rebuilds the scene for the current topology, if any.
	pub fn rerender(&mut self) -> Option<RenderStats> {
		let topology = self.topology.as_ref()?;
		Some(render(topology, &mut self.scene))
	}

	pub fn highlight(&mut self, kind: ElementKind, id: &str) -> RevertTicket {
		match kind {
			ElementKind::Node => self.highlighter.highlight_node(&mut self.scene, id),
			ElementKind::Link => self.highlighter.highlight_link(&mut self.scene, id),
		}
	}

	pub fn revert_highlight(&mut self, ticket: RevertTicket) -> bool {
		self.highlighter.revert(&mut self.scene, ticket)
	}

	/// Map region currently on screen, in the overlay's native coordinates.
	pub fn visible_bounds(&self) -> Bounds {
		let (native_w, native_h) = self.overlay.native_size();
		let (frame_w, frame_h) = self
			.overlay
			.frame()
			.map(|f| (f.width, f.height))
			.unwrap_or((native_w, native_h));
		let region = self.viewport.visible_region(frame_w, frame_h);
		let (sx, sy) = (native_w / frame_w, native_h / frame_h);
		Bounds {
			min: Point::new(region.min.x * sx, region.min.y * sy),
			max: Point::new(region.max.x * sx, region.max.y * sy),
		}
	}

	pub fn visible_node_count(&self) -> usize {
		self.topology
			.as_ref()
			.map_or(0, |t| t.nodes_within(&self.visible_bounds()))
	}
}

#[cfg(test)]
mod tests {
	use rstest::{fixture, rstest};

	use super::*;
	use crate::components::topology_map::overlay::{FrameSource, LayoutBox, SyncError};
	use crate::components::topology_map::types::{Link, LinkDirection, Location, Node};

	struct FixedLayout(LayoutBox);

	impl FrameSource for FixedLayout {
		fn image_box(&self) -> LayoutBox {
			self.0
		}

		fn container_box(&self) -> Result<LayoutBox, SyncError> {
			Ok(LayoutBox::default())
		}
	}

	#[fixture]
	fn topology() -> Topology {
		let mut t = Topology {
			name: "backbone".into(),
			..Topology::default()
		};
		t.locations.insert("west".into(), Location::at(100.0, 100.0));
		t.locations.insert("east".into(), Location::at(1900.0, 700.0));
		for (key, id, loc) in [("w", "W1", "west"), ("e", "E1", "east")] {
			t.nodes.insert(key.into(), Node {
				node_id: id.into(),
				location: loc.into(),
				name: String::new(),
			});
		}
		t.links.insert("L1".into(), Link {
			link_id: "L1".into(),
			aside: "W1".into(),
			zside: "E1".into(),
			direction: LinkDirection::Bidirectional,
			..Link::default()
		});
		t.links.insert("L2".into(), Link {
			link_id: "L2".into(),
			aside: "W1".into(),
			zside: "nowhere".into(),
			..Link::default()
		});
		t
	}

	#[rstest]
	fn load_renders_and_reports(topology: Topology) {
		let mut state = TopologyMapState::default();
		let (message, kind) = state.replace_topology(Some(topology));
		assert_eq!(message, "Loaded backbone: 2 nodes, 1 links (1 unresolved)");
		assert_eq!(kind, StatusKind::Success);
		assert_eq!(state.scene.edges().len(), 1);
		assert_eq!(state.scene.markers().len(), 2);
	}

	#[rstest]
	fn clear_drops_scene_and_keeps_viewport(topology: Topology) {
		let mut state = TopologyMapState::default();
		state.viewport.zoom_in();
		state.load_topology(topology);
		let (_, kind) = state.replace_topology(None);
		assert_eq!(kind, StatusKind::Info);
		assert!(state.topology.is_none());
		assert!(state.scene.is_empty());
		assert!(state.viewport.zoom() > 1.0);
		assert_eq!(state.rerender(), None);
	}

	#[rstest]
	fn rerender_resets_highlight(topology: Topology) {
		let mut state = TopologyMapState::default();
		state.load_topology(topology);
		state.highlight(ElementKind::Link, "L1");
		assert_ne!(state.scene.edges()[0].visual.stroke_width, 2.0);
		let stats = state.rerender().unwrap();
		assert_eq!(stats.edges, 1);
		assert_eq!(state.scene.edges()[0].visual.stroke_width, 2.0);
	}

	#[rstest]
	fn highlight_round_trip_through_state(topology: Topology) {
		let mut state = TopologyMapState::default();
		state.load_topology(topology);
		let ticket = state.highlight(ElementKind::Node, "e");
		assert_eq!(state.scene.markers()[0].visual.opacity, 0.3);
		assert!(state.revert_highlight(ticket));
		assert_eq!(state.scene.markers()[0].visual.opacity, 1.0);
	}

	#[rstest]
	fn visible_nodes_follow_zoom(topology: Topology) {
		let mut state = TopologyMapState::default();
		let identity = state.viewport.composed_transform();
		state.overlay.image_loaded(
			2000.0,
			857.0,
			&FixedLayout(LayoutBox {
				left: 0.0,
				top: 0.0,
				width: 1000.0,
				height: 428.5,
			}),
			&identity,
		);
		state.load_topology(topology);
		assert_eq!(state.visible_node_count(), 2);

		for _ in 0..4 {
			state.viewport.zoom_in();
		}
		// Zoomed around the center, both corner nodes leave the view.
		assert_eq!(state.visible_node_count(), 0);

		let bounds = state.visible_bounds();
		assert!(bounds.contains(Point::new(1000.0, 428.5)));
	}
}
