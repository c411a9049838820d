use crate::{core::state::inbox::Inbox, db::task::vertex::eval_vertex::EvalVertexView};

/// Outcome of one compute invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Vote to halt. The vertex sleeps until a message reaches it.
    Done,
    /// Stay active for the next superstep whether or not a message arrives.
    Continue,
}

/// A vertex program, the logic run on every active vertex in every superstep.
///
/// The payload lives in `State`, messages of type `Message` travel along edges
/// and are collected in an `Inbox`. Use [`Mailbox`](crate::core::state::inbox::Mailbox)
/// to see every message, or [`Combined`](crate::core::state::inbox::Combined) to fold
/// them on arrival.
pub trait Program: Send + Sync + Sized + 'static {
    type State: Default + Send + Sync + 'static;
    type Message: Send + Sync + 'static;
    type Inbox: Inbox<Self::Message>;

    fn compute(&self, vv: &mut EvalVertexView<'_, Self>) -> Step;

    /// Number of chained phases. Vertex state persists from one phase to the next.
    fn meta_superstep_count(&self) -> usize {
        1
    }
}
