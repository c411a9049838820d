pub mod eval_vertex;
