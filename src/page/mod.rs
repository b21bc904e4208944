mod producer;
mod registry;

pub use producer::{Markup, Page};
pub use registry::{ROOT_PATH, Resolution, Resolved, RouteTable, RouteTableBuilder};
