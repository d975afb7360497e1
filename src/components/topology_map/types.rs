use indexmap::IndexMap;
use serde::Deserialize;

/// Fallback anchor for nodes whose location has no projected coordinates.
pub const NULL_ISLAND: Point = Point { x: 986.0, y: 497.0 };

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

/// Axis-aligned rectangle in image space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
	pub min: Point,
	pub max: Point,
}

impl Bounds {
	pub fn contains(&self, p: Point) -> bool {
		p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "Option<i32>")]
pub enum LinkDirection {
	#[default]
	Invalid = 0,
	AsideToZside = 1,
	ZsideToAside = 2,
	Bidirectional = 3,
}

/// Null and missing codes both decode as `Invalid`.
impl From<Option<i32>> for LinkDirection {
	fn from(code: Option<i32>) -> Self {
		code.map_or(Self::Invalid, Self::from)
	}
}

impl From<i32> for LinkDirection {
	fn from(code: i32) -> Self {
		match code {
			1 => Self::AsideToZside,
			2 => Self::ZsideToAside,
			3 => Self::Bidirectional,
			_ => Self::Invalid,
		}
	}
}

impl LinkDirection {
	pub fn code(self) -> i32 {
		self as i32
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "Option<i32>")]
pub enum LinkStatus {
	#[default]
	Invalid = 0,
	Up = 1,
	Down = 2,
	Partial = 3,
}

/// Null and missing codes both decode as `Invalid`.
impl From<Option<i32>> for LinkStatus {
	fn from(code: Option<i32>) -> Self {
		code.map_or(Self::Invalid, Self::from)
	}
}

impl From<i32> for LinkStatus {
	fn from(code: i32) -> Self {
		match code {
			1 => Self::Up,
			2 => Self::Down,
			3 => Self::Partial,
			_ => Self::Invalid,
		}
	}
}

impl LinkStatus {
	pub const ALL: [LinkStatus; 4] = [Self::Invalid, Self::Up, Self::Down, Self::Partial];

	pub fn code(self) -> i32 {
		self as i32
	}

	/// Stroke and arrowhead color for links in this state.
	pub fn color(self) -> &'static str {
		match self {
			Self::Invalid => "#757575",
			Self::Up => "#00c853",
			Self::Down => "#ff3d00",
			Self::Partial => "#ffc107",
		}
	}

	pub fn label(self) -> &'static str {
		match self {
			Self::Invalid => "Unknown",
			Self::Up => "Up",
			Self::Down => "Down",
			Self::Partial => "Partial",
		}
	}
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Location {
	#[serde(default, rename = "svgX")]
	pub svg_x: Option<f64>,
	#[serde(default, rename = "svgY")]
	pub svg_y: Option<f64>,
}

impl Location {
	pub fn at(x: f64, y: f64) -> Self {
		Self {
			svg_x: Some(x),
			svg_y: Some(y),
		}
	}

	/// Projected coordinates, only when both axes are known.
	pub fn point(&self) -> Option<Point> {
		Some(Point::new(self.svg_x?, self.svg_y?))
	}
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
	#[serde(default)]
	pub node_id: String,
	#[serde(default)]
	pub location: String,
	#[serde(default)]
	pub name: String,
}

impl Node {
	pub fn label(&self) -> &str {
		if self.node_id.is_empty() {
			&self.name
		} else {
			&self.node_id
		}
	}
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
	#[serde(default)]
	pub link_id: String,
	#[serde(default)]
	pub aside: String,
	#[serde(default)]
	pub zside: String,
	#[serde(default)]
	pub direction: LinkDirection,
	#[serde(default)]
	pub status: LinkStatus,
}

/// A decoded topology snapshot. Replaced wholesale on every load.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Topology {
	#[serde(default)]
	pub name: String,
	#[serde(default)]
	pub nodes: IndexMap<String, Node>,
	#[serde(default)]
	pub links: IndexMap<String, Link>,
	#[serde(default)]
	pub locations: IndexMap<String, Location>,
}

impl Topology {
	/// Where `node` sits on the map, or [`NULL_ISLAND`] when its location is unknown.
	pub fn position(&self, node: &Node) -> Point {
		self.locations
			.get(&node.location)
			.and_then(Location::point)
			.unwrap_or(NULL_ISLAND)
	}

	pub fn nodes_within(&self, bounds: &Bounds) -> usize {
		self.nodes
			.values()
			.filter(|node| bounds.contains(self.position(node)))
			.count()
	}
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	#[test]
	fn decoding_defaults_missing_enums_to_invalid() {
		let link: Link = serde_json::from_str(r#"{"linkId":"L1","aside":"A","zside":"B"}"#).unwrap();
		assert_eq!(link.direction, LinkDirection::Invalid);
		assert_eq!(link.status, LinkStatus::Invalid);
	}

	#[test]
	fn decoding_treats_null_enums_as_invalid() {
		let topology: Topology = serde_json::from_str(
			r#"{"links": {"L1": {"linkId": "L1", "aside": "A", "zside": "B", "direction": null, "status": null}}}"#,
		)
		.unwrap();
		let link = &topology.links["L1"];
		assert_eq!(link.direction, LinkDirection::Invalid);
		assert_eq!(link.status, LinkStatus::Invalid);
	}

	#[rstest]
	#[case(0, LinkDirection::Invalid)]
	#[case(1, LinkDirection::AsideToZside)]
	#[case(2, LinkDirection::ZsideToAside)]
	#[case(3, LinkDirection::Bidirectional)]
	#[case(7, LinkDirection::Invalid)]
	#[case(-1, LinkDirection::Invalid)]
	fn direction_codes(#[case] code: i32, #[case] expected: LinkDirection) {
		assert_eq!(LinkDirection::from(code), expected);
	}

	#[test]
	fn decodes_wire_names() {
		let topology: Topology = serde_json::from_str(
			r#"{
				"name": "core",
				"nodes": {"k1": {"nodeId": "FW1", "location": "NYC", "name": "Firewall"}},
				"links": {"L1": {"linkId": "L1", "aside": "FW1", "zside": "FW2", "direction": 3, "status": 2}},
				"locations": {"NYC": {"svgX": 590.5, "svgY": 310.0}}
			}"#,
		)
		.unwrap();
		let link = &topology.links["L1"];
		assert_eq!(link.direction, LinkDirection::Bidirectional);
		assert_eq!(link.status, LinkStatus::Down);
		assert_eq!(topology.nodes["k1"].node_id, "FW1");
		assert_eq!(topology.locations["NYC"].point(), Some(Point::new(590.5, 310.0)));
	}

	#[test]
	fn missing_location_falls_back_to_null_island() {
		let mut topology = Topology::default();
		topology.locations.insert("half".into(), Location {
			svg_x: Some(10.0),
			svg_y: None,
		});
		let orphan = Node {
			node_id: "A".into(),
			location: "nowhere".into(),
			name: String::new(),
		};
		let half = Node {
			node_id: "B".into(),
			location: "half".into(),
			name: String::new(),
		};
		assert_eq!(topology.position(&orphan), NULL_ISLAND);
		assert_eq!(topology.position(&half), NULL_ISLAND);
		assert_ne!(NULL_ISLAND, Point::default());
	}

	#[test]
	fn label_falls_back_to_name() {
		let node = Node {
			node_id: String::new(),
			location: String::new(),
			name: "Edge Router".into(),
		};
		assert_eq!(node.label(), "Edge Router");
	}

	#[test]
	fn counts_nodes_inside_bounds() {
		let mut topology = Topology::default();
		topology.locations.insert("a".into(), Location::at(10.0, 10.0));
		topology.locations.insert("b".into(), Location::at(500.0, 500.0));
		for (key, loc) in [("n1", "a"), ("n2", "b"), ("n3", "missing")] {
			topology.nodes.insert(key.into(), Node {
				node_id: key.into(),
				location: loc.into(),
				name: String::new(),
			});
		}
		let bounds = Bounds {
			min: Point::new(0.0, 0.0),
			max: Point::new(900.0, 520.0),
		};
		// n3 sits on the null island, which is outside these bounds.
		assert_eq!(topology.nodes_within(&bounds), 2);
	}
}
