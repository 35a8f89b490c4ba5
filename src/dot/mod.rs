mod graph;
mod load;
mod parse;

pub use graph::{GraphNode, NodeSet, ParsedGraph};
pub use load::read_graph_source;
pub use parse::parse_graph;
