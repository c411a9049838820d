//! PageRank over a fixed number of iterations.

use pregel_api::core::state::agg::SumDef;

use crate::{
    core::state::inbox::Combined,
    db::task::{
        task::{Program, Step},
        vertex::eval_vertex::EvalVertexView,
    },
};

pub const DEFAULT_DAMPING: f64 = 0.85;

/// Classic Pregel PageRank. Every vertex stays active for `iterations`
/// supersteps after the first one, then votes to halt. Rank held by vertices
/// without out-edges is not redistributed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageRank {
    iterations: usize,
    damping: f64,
}

impl PageRank {
    pub fn new(iterations: usize) -> Self {
        Self {
            iterations,
            damping: DEFAULT_DAMPING,
        }
    }

    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }
}

impl Program for PageRank {
    type State = f64;
    type Message = f64;
    type Inbox = Combined<f64, SumDef<f64>>;

    fn compute(&self, vv: &mut EvalVertexView<'_, Self>) -> Step {
        let n = vv.num_vertices() as f64;
        let rank = if vv.is_first_superstep() {
            1.0 / n
        } else {
            let sum = vv.next_message().unwrap_or(0.0);
            (1.0 - self.damping) / n + self.damping * sum
        };
        *vv.get_mut() = rank;

        if vv.superstep() < self.iterations {
            let degree = vv.out_degree();
            if degree > 0 {
                vv.broadcast(rank / degree as f64);
            }
            Step::Continue
        } else {
            Step::Done
        }
    }
}
