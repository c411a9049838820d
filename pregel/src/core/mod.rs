pub mod state;
pub mod utils;

pub use pregel_api::core::{
    entities::{EdgeWeight, VertexId, VID},
    Direction,
};
