pub mod sssp;
