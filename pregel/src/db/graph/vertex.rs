//! Defines the `Vertex` struct, one entry of the vertex store.

use std::{
    cell::UnsafeCell,
    fmt,
    sync::atomic::{AtomicBool, Ordering},
};

use pregel_api::core::{
    entities::{EdgeWeight, VertexId},
    storage::lock::{LockStrategy, VertexLock},
    Direction,
};

use crate::{core::state::inbox::Inbox, db::task::task::Program};

/// Neighbour ids in load order, optionally paired with edge weights.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Adjacency {
    ids: Box<[VertexId]>,
    weights: Option<Box<[EdgeWeight]>>,
}

impl Adjacency {
    pub fn new(ids: Vec<VertexId>, weights: Option<Vec<EdgeWeight>>) -> Self {
        debug_assert!(weights.as_ref().map_or(true, |w| w.len() == ids.len()));
        Self {
            ids: ids.into_boxed_slice(),
            weights: weights.map(Vec::into_boxed_slice),
        }
    }

    pub fn ids(&self) -> &[VertexId] {
        &self.ids
    }

    pub fn weights(&self) -> Option<&[EdgeWeight]> {
        self.weights.as_deref()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

// the part of a vertex that only the worker running it may touch
pub(crate) struct VertexBody<S, I> {
    pub(crate) state: S,
    pub(crate) halted: bool,
    pub(crate) inbox: I,
}

pub struct Vertex<P: Program> {
    id: VertexId,
    out_neighbours: Adjacency,
    in_neighbours: Option<Adjacency>,
    body: UnsafeCell<VertexBody<P::State, P::Inbox>>,
    next: VertexLock<P::Inbox>,
    scheduled: AtomicBool,
}

// Safety: `body` is only reached mutably through `body_mut`, and the task
// runner hands every vertex location to exactly one worker per phase while it
// holds the graph exclusively. Everything else is either immutable after load,
// behind `next`'s lock, or atomic. Shared reads of the body need `State: Sync`
// and `Inbox: Sync`, both required by their traits.
unsafe impl<P: Program> Sync for Vertex<P> {}

impl<P: Program> Vertex<P> {
    pub(crate) fn new(
        id: VertexId,
        out_neighbours: Adjacency,
        in_neighbours: Option<Adjacency>,
        lock_strategy: LockStrategy,
    ) -> Self {
        Self {
            id,
            out_neighbours,
            in_neighbours,
            body: UnsafeCell::new(VertexBody {
                state: P::State::default(),
                halted: false,
                inbox: P::Inbox::default(),
            }),
            next: VertexLock::with_default(lock_strategy),
            scheduled: AtomicBool::new(false),
        }
    }

    pub fn id(&self) -> VertexId {
        self.id
    }

    pub fn out_neighbours(&self) -> &[VertexId] {
        self.out_neighbours.ids()
    }

    pub fn out_weights(&self) -> Option<&[EdgeWeight]> {
        self.out_neighbours.weights()
    }

    /// Empty when the graph was loaded without in-neighbours.
    pub fn in_neighbours(&self) -> &[VertexId] {
        self.in_neighbours.as_ref().map_or(&[], |adj| adj.ids())
    }

    pub fn in_weights(&self) -> Option<&[EdgeWeight]> {
        self.in_neighbours.as_ref().and_then(|adj| adj.weights())
    }

    pub fn has_in_neighbours(&self) -> bool {
        self.in_neighbours.is_some()
    }

    pub fn neighbours(&self, dir: Direction) -> impl Iterator<Item = VertexId> + '_ {
        let (out, inn): (&[VertexId], &[VertexId]) = match dir {
            Direction::OUT => (self.out_neighbours(), &[]),
            Direction::IN => (&[], self.in_neighbours()),
            Direction::BOTH => (self.out_neighbours(), self.in_neighbours()),
        };
        out.iter().chain(inn.iter()).copied()
    }

    pub fn state(&self) -> &P::State {
        // Safety: the runner borrows the graph mutably while workers write
        // bodies, so no shared reference can observe a write in progress.
        unsafe { &(*self.body.get()).state }
    }

    pub fn state_mut(&mut self) -> &mut P::State {
        &mut self.body.get_mut().state
    }

    pub fn is_halted(&self) -> bool {
        unsafe { (*self.body.get()).halted }
    }

    /// Whether a message is readable in the current superstep.
    pub fn has_message(&self) -> bool {
        unsafe { (*self.body.get()).inbox.has_message() }
    }

    /// # Safety
    /// The caller must be the only worker touching this vertex in the current phase.
    #[allow(clippy::mut_from_ref)]
    #[inline]
    pub(crate) unsafe fn body_mut(&self) -> &mut VertexBody<P::State, P::Inbox> {
        &mut *self.body.get()
    }

    pub(crate) fn parts_mut(
        &mut self,
    ) -> (&mut VertexBody<P::State, P::Inbox>, &mut P::Inbox) {
        (self.body.get_mut(), self.next.get_mut())
    }

    #[inline]
    pub(crate) fn deliver(&self, msg: P::Message) {
        self.next.with(|inbox| inbox.deliver(msg));
    }

    #[inline]
    pub(crate) fn next(&self) -> &VertexLock<P::Inbox> {
        &self.next
    }

    /// Marks the vertex for the next superstep, true if it was not marked yet.
    #[inline]
    pub(crate) fn schedule(&self) -> bool {
        !self.scheduled.swap(true, Ordering::AcqRel)
    }

    pub(crate) fn unschedule(&self) {
        self.scheduled.store(false, Ordering::Release);
    }

    /// Clears halted flag, both inboxes and the schedule mark.
    pub(crate) fn reset(&mut self) {
        let (body, next) = self.parts_mut();
        body.halted = false;
        body.inbox.clear();
        next.clear();
        *self.scheduled.get_mut() = false;
    }
}

impl<P: Program> fmt::Debug for Vertex<P>
where
    P::State: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vertex")
            .field("id", &self.id)
            .field("out_neighbours", &self.out_neighbours())
            .field("in_neighbours", &self.in_neighbours())
            .field("state", self.state())
            .field("halted", &self.is_halted())
            .finish()
    }
}
