pub mod hashmin;
pub mod scc;
