//! Two-phase strongly connected component colouring.
//!
//! Phase 0 pushes the smallest id along out-edges, so every vertex learns
//! `min_f`, the smallest id that reaches it. Vertices with `min_f == id` are
//! roots. Phase 1 walks in-edges backwards from every root through the
//! vertices of the same colour, setting `min_b` to the root id. A vertex whose
//! `min_f` and `min_b` agree lies in the strongly connected component of that
//! root. Vertices left with `min_b == u32::MAX` belong to no root's component.
//!
//! The graph must be loaded with in-neighbours.

use std::io::{Read, Write};

use bytemuck::{Pod, Zeroable};
use pregel_api::core::{entities::VertexId, Direction};

use crate::{
    core::{state::inbox::Mailbox, utils::errors::GraphError},
    db::task::{
        task::{Program, Step},
        vertex::eval_vertex::EvalVertexView,
    },
    serialise::{read_pod, write_pod, VertexCodec},
};

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct SccState {
    pub min_f: VertexId,
    pub min_b: VertexId,
}

impl SccState {
    /// The root of the component this vertex belongs to, if any.
    pub fn component(&self) -> Option<VertexId> {
        (self.min_f == self.min_b).then_some(self.min_f)
    }
}

impl VertexCodec for SccState {
    fn serialise<W: Write>(&self, writer: &mut W) -> Result<(), GraphError> {
        write_pod(writer, self)
    }

    fn deserialise<R: Read>(reader: &mut R) -> Result<Self, GraphError> {
        read_pod(reader, "scc state")
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Scc;

impl Scc {
    fn forward(vv: &mut EvalVertexView<'_, Self>) {
        if vv.is_first_superstep() {
            // in-neighbours reach this vertex in one hop
            let min_f = vv.in_neighbours().iter().copied().fold(vv.id(), VertexId::min);
            vv.get_mut().min_f = min_f;
            vv.broadcast(min_f);
        } else {
            let current = vv.get().min_f;
            let min_f = vv.messages().fold(current, VertexId::min);
            if min_f < current {
                vv.get_mut().min_f = min_f;
                vv.broadcast(min_f);
            }
        }
    }

    fn backward(vv: &mut EvalVertexView<'_, Self>) {
        if vv.is_first_superstep() {
            let id = vv.id();
            if vv.get().min_f == id {
                vv.get_mut().min_b = id;
                vv.broadcast_to(Direction::IN, id);
            } else {
                vv.get_mut().min_b = VertexId::MAX;
            }
        } else {
            let SccState { min_f, min_b } = *vv.get();
            let reached = vv.messages().fold(false, |found, root| found || root == min_f);
            if reached && min_b != min_f {
                vv.get_mut().min_b = min_f;
                vv.broadcast_to(Direction::IN, min_f);
            }
        }
    }
}

impl Program for Scc {
    type State = SccState;
    type Message = VertexId;
    type Inbox = Mailbox<VertexId>;

    fn compute(&self, vv: &mut EvalVertexView<'_, Self>) -> Step {
        if vv.is_first_meta_superstep() {
            Self::forward(vv);
        } else {
            Self::backward(vv);
        }
        Step::Done
    }

    fn meta_superstep_count(&self) -> usize {
        2
    }
}
