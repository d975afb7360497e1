use std::time::Duration;

use super::scene::{EdgeVisual, LINK_WIDTH, MarkerVisual, NODE_RADIUS, Scene};

pub const HIGHLIGHT_DURATION: Duration = Duration::from_millis(2000);

pub const FOCUS_NODE_RADIUS: f64 = 8.0;
pub const DIM_NODE_OPACITY: f64 = 0.3;
pub const FOCUS_LINK_WIDTH: f64 = 4.0;
pub const DIM_LINK_OPACITY: f64 = 0.2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ElementKind {
	Node,
	Link,
}

/// Handed out by each highlight call; redeem it after [`HIGHLIGHT_DURATION`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RevertTicket {
	pub kind: ElementKind,
	generation: u64,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SelectionHighlighter {
	node_generation: u64,
	link_generation: u64,
}

impl SelectionHighlighter {
	/// Emphasizes the marker with collection key `key` and dims the others.
	pub fn highlight_node(&mut self, scene: &mut Scene, key: &str) -> RevertTicket {
		for marker in scene.markers_mut() {
			if marker.spec.key == key {
				marker.visual = MarkerVisual {
					opacity: 1.0,
					radius: FOCUS_NODE_RADIUS,
				};
			} else {
				marker.visual = MarkerVisual {
					opacity: DIM_NODE_OPACITY,
					radius: NODE_RADIUS,
				};
			}
		}
		self.node_generation += 1;
		RevertTicket {
			kind: ElementKind::Node,
			generation: self.node_generation,
		}
	}

	pub fn highlight_link(&mut self, scene: &mut Scene, link_id: &str) -> RevertTicket {
		for edge in scene.edges_mut() {
			if edge.spec.link_id == link_id {
				edge.visual = EdgeVisual {
					opacity: 1.0,
					stroke_width: FOCUS_LINK_WIDTH,
				};
			} else {
				edge.visual = EdgeVisual {
					opacity: DIM_LINK_OPACITY,
					stroke_width: LINK_WIDTH,
				};
			}
		}
		self.link_generation += 1;
		RevertTicket {
			kind: ElementKind::Link,
			generation: self.link_generation,
		}
	}

	/// Restores every element of the ticket's kind to its default look.
	///
	/// A ticket superseded by a newer highlight of the same kind does nothing,
	/// so an older timer cannot cut a newer highlight short.
	pub fn revert(&self, scene: &mut Scene, ticket: RevertTicket) -> bool {
		match ticket.kind {
			ElementKind::Node if ticket.generation == self.node_generation => {
				for marker in scene.markers_mut() {
					marker.visual = MarkerVisual::default();
				}
				true
			}
			ElementKind::Link if ticket.generation == self.link_generation => {
				for edge in scene.edges_mut() {
					edge.visual = EdgeVisual::default();
				}
				true
			}
			_ => false,
		}
	}
}
