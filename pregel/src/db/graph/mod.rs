pub mod graph;
pub mod vertex;
