use super::types::{LinkDirection, LinkStatus, Point};

pub const NODE_RADIUS: f64 = 6.0;
pub const LINK_WIDTH: f64 = 2.0;
pub const LINK_OPACITY: f64 = 0.7;
pub const LABEL_OFFSET: f64 = 10.0;

/// Which ends of an edge carry an arrowhead.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ArrowHeads {
	pub start: bool,
	pub end: bool,
}

impl From<LinkDirection> for ArrowHeads {
	fn from(direction: LinkDirection) -> Self {
		match direction {
			LinkDirection::AsideToZside => Self { start: false, end: true },
			LinkDirection::ZsideToAside => Self { start: true, end: false },
			LinkDirection::Bidirectional => Self { start: true, end: true },
			LinkDirection::Invalid => Self::default(),
		}
	}
}

/// Id of the `<marker>` definition for an arrowhead of the given status.
pub fn arrow_marker_id(at_end: bool, status: LinkStatus) -> String {
	let side = if at_end { "end" } else { "start" };
	format!("arrow-{side}-status-{}", status.code())
}

#[derive(Clone, Debug, PartialEq)]
pub struct EdgeSpec {
	pub link_id: String,
	pub from: Point,
	pub to: Point,
	pub direction: LinkDirection,
	pub status: LinkStatus,
	pub arrows: ArrowHeads,
}

impl EdgeSpec {
	pub fn class(&self) -> String {
		format!(
			"link direction-{} status-{}",
			self.direction.code(),
			self.status.code()
		)
	}

	pub fn color(&self) -> &'static str {
		self.status.color()
	}

	pub fn marker_start(&self) -> Option<String> {
		self.arrows
			.start
			.then(|| format!("url(#{})", arrow_marker_id(false, self.status)))
	}

	pub fn marker_end(&self) -> Option<String> {
		self.arrows
			.end
			.then(|| format!("url(#{})", arrow_marker_id(true, self.status)))
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct MarkerSpec {
	/// Collection key of the node, reported back on selection.
	pub key: String,
	pub node_id: String,
	pub label: String,
	pub position: Point,
}

/// Drawing surface for one render pass.
pub trait SceneBuilder {
	fn begin_scene(&mut self);
	fn add_edge(&mut self, edge: EdgeSpec);
	fn add_marker(&mut self, marker: MarkerSpec);
	fn commit(&mut self);
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeVisual {
	pub opacity: f64,
	pub stroke_width: f64,
}

impl Default for EdgeVisual {
	fn default() -> Self {
		Self {
			opacity: LINK_OPACITY,
			stroke_width: LINK_WIDTH,
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarkerVisual {
	pub opacity: f64,
	pub radius: f64,
}

impl Default for MarkerVisual {
	fn default() -> Self {
		Self {
			opacity: 1.0,
			radius: NODE_RADIUS,
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneEdge {
	pub spec: EdgeSpec,
	pub visual: EdgeVisual,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneMarker {
	pub spec: MarkerSpec,
	pub visual: MarkerVisual,
}

impl SceneMarker {
	pub fn label_position(&self) -> Point {
		Point::new(self.spec.position.x, self.spec.position.y - LABEL_OFFSET)
	}
}

/// Retained scene. Elements staged between `begin_scene` and `commit` replace
/// the visible ones in one step.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
	edges: Vec<SceneEdge>,
	markers: Vec<SceneMarker>,
	staged: Option<(Vec<SceneEdge>, Vec<SceneMarker>)>,
}

impl Scene {
	pub fn edges(&self) -> &[SceneEdge] {
		&self.edges
	}

	pub fn markers(&self) -> &[SceneMarker] {
		&self.markers
	}

	pub fn edges_mut(&mut self) -> &mut [SceneEdge] {
		&mut self.edges
	}

	pub fn markers_mut(&mut self) -> &mut [SceneMarker] {
		&mut self.markers
	}

	pub fn clear(&mut self) {
		self.edges.clear();
		self.markers.clear();
		self.staged = None;
	}

	pub fn is_empty(&self) -> bool {
		self.edges.is_empty() && self.markers.is_empty()
	}
}

impl SceneBuilder for Scene {
	fn begin_scene(&mut self) {
		self.staged = Some((Vec::new(), Vec::new()));
	}

	fn add_edge(&mut self, edge: EdgeSpec) {
		if let Some((edges, _)) = self.staged.as_mut() {
			edges.push(SceneEdge {
				spec: edge,
				visual: EdgeVisual::default(),
			});
		}
	}

	fn add_marker(&mut self, marker: MarkerSpec) {
		if let Some((_, markers)) = self.staged.as_mut() {
			markers.push(SceneMarker {
				spec: marker,
				visual: MarkerVisual::default(),
			});
		}
	}

	fn commit(&mut self) {
		if let Some((edges, markers)) = self.staged.take() {
			self.edges = edges;
			self.markers = markers;
		}
	}
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	fn edge(direction: LinkDirection, status: LinkStatus) -> EdgeSpec {
		EdgeSpec {
			link_id: "L1".into(),
			from: Point::new(0.0, 0.0),
			to: Point::new(10.0, 10.0),
			direction,
			status,
			arrows: direction.into(),
		}
	}

	#[rstest]
	#[case(LinkDirection::Invalid, None, None)]
	#[case(LinkDirection::AsideToZside, None, Some("url(#arrow-end-status-2)"))]
	#[case(LinkDirection::ZsideToAside, Some("url(#arrow-start-status-2)"), None)]
	#[case(
		LinkDirection::Bidirectional,
		Some("url(#arrow-start-status-2)"),
		Some("url(#arrow-end-status-2)")
	)]
	fn arrowheads_follow_direction(
		#[case] direction: LinkDirection,
		#[case] start: Option<&str>,
		#[case] end: Option<&str>,
	) {
		let spec = edge(direction, LinkStatus::Down);
		assert_eq!(spec.marker_start().as_deref(), start);
		assert_eq!(spec.marker_end().as_deref(), end);
	}

	#[test]
	fn edge_class_carries_codes() {
		assert_eq!(
			edge(LinkDirection::Bidirectional, LinkStatus::Partial).class(),
			"link direction-3 status-3"
		);
		assert_eq!(edge(LinkDirection::Invalid, LinkStatus::Invalid).color(), "#757575");
	}

	#[test]
	fn commit_replaces_previous_scene() {
		let mut scene = Scene::default();
		scene.begin_scene();
		scene.add_edge(edge(LinkDirection::Invalid, LinkStatus::Up));
		scene.commit();
		assert_eq!(scene.edges().len(), 1);

		scene.begin_scene();
		scene.add_marker(MarkerSpec {
			key: "k".into(),
			node_id: "n".into(),
			label: "n".into(),
			position: Point::new(1.0, 2.0),
		});
		// Nothing visible changes until commit.
		assert_eq!(scene.edges().len(), 1);
		scene.commit();
		assert!(scene.edges().is_empty());
		assert_eq!(scene.markers().len(), 1);
		assert_eq!(scene.markers()[0].visual, MarkerVisual::default());
		assert_eq!(scene.markers()[0].label_position(), Point::new(1.0, -8.0));
	}

	#[test]
	fn elements_outside_a_pass_are_ignored() {
		let mut scene = Scene::default();
		scene.add_edge(edge(LinkDirection::Invalid, LinkStatus::Up));
		scene.commit();
		assert!(scene.is_empty());
	}
}
