use pregel_api::core::{
    entities::{EdgeWeight, VertexId, VID},
    Direction,
};

use crate::{
    core::{state::inbox::Inbox, utils::errors::GraphError},
    db::{
        graph::{
            graph::Graph,
            vertex::{Vertex, VertexBody},
        },
        task::{context::Context, spread::Shard, task::Program},
    },
};

/// The view of one vertex handed to [`Program::compute`].
///
/// It reads the vertex's adjacency and its current messages, owns its payload
/// for the duration of the call, and sends messages to any vertex of the graph.
/// Messages sent here become visible to their targets in the next superstep.
pub struct EvalVertexView<'a, P: Program> {
    ctx: &'a Context,
    graph: &'a Graph<P>,
    vertex: &'a Vertex<P>,
    vid: VID,
    body: &'a mut VertexBody<P::State, P::Inbox>,
    shard: &'a mut Shard,
    spread: bool,
}

impl<'a, P: Program> EvalVertexView<'a, P> {
    pub(crate) fn new(
        ctx: &'a Context,
        graph: &'a Graph<P>,
        vid: VID,
        body: &'a mut VertexBody<P::State, P::Inbox>,
        shard: &'a mut Shard,
        spread: bool,
    ) -> Self {
        Self {
            ctx,
            graph,
            vertex: graph.vertex(vid),
            vid,
            body,
            shard,
            spread,
        }
    }

    pub fn id(&self) -> VertexId {
        self.vertex.id()
    }

    pub fn vid(&self) -> VID {
        self.vid
    }

    pub fn out_neighbours(&self) -> &'a [VertexId] {
        self.vertex.out_neighbours()
    }

    pub fn out_weights(&self) -> Option<&'a [EdgeWeight]> {
        self.vertex.out_weights()
    }

    /// Empty unless the graph was loaded with in-neighbours.
    pub fn in_neighbours(&self) -> &'a [VertexId] {
        self.vertex.in_neighbours()
    }

    pub fn in_weights(&self) -> Option<&'a [EdgeWeight]> {
        self.vertex.in_weights()
    }

    pub fn out_degree(&self) -> usize {
        self.vertex.out_neighbours().len()
    }

    pub fn neighbours(&self, dir: Direction) -> impl Iterator<Item = VertexId> + 'a {
        let vertex: &'a Vertex<P> = self.vertex;
        vertex.neighbours(dir)
    }

    /// Out-edges with their weights, `1.0` when the graph carries none.
    pub fn out_edges(&self) -> impl Iterator<Item = (VertexId, EdgeWeight)> + 'a {
        let vertex: &'a Vertex<P> = self.vertex;
        let ids = vertex.out_neighbours();
        let weights = vertex.out_weights();
        ids.iter()
            .enumerate()
            .map(move |(i, &dst)| (dst, weights.map_or(1.0, |w| w[i])))
    }

    pub fn get(&self) -> &P::State {
        &self.body.state
    }

    pub fn get_mut(&mut self) -> &mut P::State {
        &mut self.body.state
    }

    /// Takes one message received in the previous superstep.
    pub fn next_message(&mut self) -> Option<P::Message> {
        self.body.inbox.next_message()
    }

    /// Drains the messages received in the previous superstep.
    pub fn messages(&mut self) -> impl Iterator<Item = P::Message> + '_ + use<'_, 'a, P> {
        std::iter::from_fn(move || self.body.inbox.next_message())
    }

    pub fn has_message(&self) -> bool {
        self.body.inbox.has_message()
    }

    /// Sends `msg` to the vertex with id `target` for the next superstep.
    pub fn send(&mut self, target: VertexId, msg: P::Message) -> Result<(), GraphError> {
        let vid = self.graph.vid(target)?;
        self.deliver(vid, msg);
        Ok(())
    }

    #[inline]
    fn deliver(&mut self, vid: VID, msg: P::Message) {
        let target = self.graph.vertex(vid);
        target.deliver(msg);
        self.shard.messages += 1;
        if self.spread && target.schedule() {
            self.shard.activated.push(vid);
        }
    }

    /// Sends `msg` along every out-edge.
    pub fn broadcast(&mut self, msg: P::Message)
    where
        P::Message: Clone,
    {
        self.broadcast_to(Direction::OUT, msg)
    }

    pub fn broadcast_to(&mut self, dir: Direction, msg: P::Message)
    where
        P::Message: Clone,
    {
        let offset = self.graph.id_offset();
        let vertex = self.vertex;
        // neighbour ids were range-checked on load
        for dst in vertex.neighbours(dir) {
            self.deliver(VID((dst - offset) as usize), msg.clone());
        }
    }

    /// Sends along every out-edge the message `msg` builds from the edge weight.
    pub fn send_weighted(&mut self, mut msg: impl FnMut(EdgeWeight) -> P::Message) {
        let offset = self.graph.id_offset();
        for (dst, w) in self.out_edges() {
            self.deliver(VID((dst - offset) as usize), msg(w));
        }
    }

    pub(crate) fn continue_next(&mut self) {
        if self.spread && self.vertex.schedule() {
            self.shard.activated.push(self.vid);
        }
    }

    pub fn superstep(&self) -> usize {
        self.ctx.ss()
    }

    pub fn is_first_superstep(&self) -> bool {
        self.ctx.ss() == 0
    }

    pub fn meta_superstep(&self) -> usize {
        self.ctx.meta_ss()
    }

    pub fn is_first_meta_superstep(&self) -> bool {
        self.ctx.meta_ss() == 0
    }

    pub fn meta_superstep_count(&self) -> usize {
        self.ctx.meta_count()
    }

    pub fn num_vertices(&self) -> usize {
        self.ctx.num_vertices()
    }
}
