mod component;
mod highlight;
mod listing;
mod overlay;
mod render;
mod resolve;
mod scene;
mod state;
mod types;
mod viewport;

pub use component::{Selection, TopologyMap};
pub use highlight::ElementKind;
pub use listing::{ListPager, Page, format_number};
pub use state::StatusKind;
pub use types::{Link, LinkDirection, LinkStatus, Location, Node, Topology};
