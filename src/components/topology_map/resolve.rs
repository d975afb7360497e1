use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;

use super::types::Node;

/// Structured endpoint form, e.g. `networkdevice<{24}{24}FW1>.physicals.eth0`.
static DEVICE_REF: LazyLock<Option<Regex>> =
	LazyLock::new(|| Regex::new(r"networkdevice<\{\d+\}\{\d+\}(\w+)>").ok());

/// Node identifier embedded in a structured endpoint reference, if any.
pub fn embedded_node_id(reference: &str) -> Option<&str> {
	let pattern = DEVICE_REF.as_ref()?;
	pattern
		.captures(reference)
		.and_then(|caps| caps.get(1))
		.map(|m| m.as_str())
}

/// Resolves a link endpoint reference to a node.
///
/// The embedded identifier of a structured reference (or the bare reference
/// itself) is matched against `nodeId` first. When that finds nothing the raw
/// reference is tried as a collection key, even if the structured form matched.
pub fn resolve_endpoint<'a>(reference: &str, nodes: &'a IndexMap<String, Node>) -> Option<&'a Node> {
	let wanted = embedded_node_id(reference).unwrap_or(reference);
	nodes
		.values()
		.find(|node| node.node_id == wanted)
		.or_else(|| nodes.get(reference))
}
