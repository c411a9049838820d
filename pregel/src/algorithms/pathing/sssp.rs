//! Single-source shortest paths over weighted out-edges.

use pregel_api::core::{
    entities::{EdgeWeight, VertexId},
    state::agg::MinDef,
};

use crate::{
    core::state::inbox::Combined,
    db::task::{
        task::{Program, Step},
        vertex::eval_vertex::EvalVertexView,
    },
};

/// Distance from `source` to every vertex, `f32::INFINITY` where unreachable.
///
/// Edges without weights count as `1.0`, so on an unweighted graph this is
/// the hop distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sssp {
    source: VertexId,
}

impl Sssp {
    pub fn new(source: VertexId) -> Self {
        Self { source }
    }

    pub fn source(&self) -> VertexId {
        self.source
    }
}

impl Program for Sssp {
    type State = EdgeWeight;
    type Message = EdgeWeight;
    type Inbox = Combined<EdgeWeight, MinDef<EdgeWeight>>;

    fn compute(&self, vv: &mut EvalVertexView<'_, Self>) -> Step {
        if vv.is_first_superstep() {
            if vv.id() == self.source {
                *vv.get_mut() = 0.0;
                vv.send_weighted(|w| w);
            } else {
                *vv.get_mut() = EdgeWeight::INFINITY;
            }
        } else if let Some(dist) = vv.next_message() {
            if dist < *vv.get() {
                *vv.get_mut() = dist;
                vv.send_weighted(|w| dist + w);
            }
        }
        Step::Done
    }
}
