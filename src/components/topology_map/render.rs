use log::debug;

use super::resolve::resolve_endpoint;
use super::scene::{EdgeSpec, MarkerSpec, SceneBuilder};
use super::types::Topology;

/// Counts from one render pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
	pub edges: usize,
	pub markers: usize,
	pub skipped_links: usize,
}

/// Rebuilds the whole scene from `topology`.
pub fn render(topology: &Topology, scene: &mut impl SceneBuilder) -> RenderStats {
	let mut stats = RenderStats::default();

	scene.begin_scene();
	draw_edges(topology, scene, &mut stats);
	draw_nodes(topology, scene, &mut stats);
	scene.commit();

	debug!(
		"rendered {:?}: {} edges, {} markers, {} links skipped",
		topology.name, stats.edges, stats.markers, stats.skipped_links
	);
	stats
}

fn draw_edges(topology: &Topology, scene: &mut impl SceneBuilder, stats: &mut RenderStats) {
	for link in topology.links.values() {
		let aside = resolve_endpoint(&link.aside, &topology.nodes);
		let zside = resolve_endpoint(&link.zside, &topology.nodes);
		let Some((a, z)) = aside.zip(zside) else {
			debug!("skipping link {:?}: {:?} -> {:?} unresolved", link.link_id, link.aside, link.zside);
			stats.skipped_links += 1;
			continue;
		};

		scene.add_edge(EdgeSpec {
			link_id: link.link_id.clone(),
			from: topology.position(a),
			to: topology.position(z),
			direction: link.direction,
			status: link.status,
			arrows: link.direction.into(),
		});
		stats.edges += 1;
	}
}

fn draw_nodes(topology: &Topology, scene: &mut impl SceneBuilder, stats: &mut RenderStats) {
	for (key, node) in &topology.nodes {
		scene.add_marker(MarkerSpec {
			key: key.clone(),
			node_id: node.node_id.clone(),
			label: node.label().to_string(),
			position: topology.position(node),
		});
		stats.markers += 1;
	}
}
