use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use pregel_api::core::entities::VID;
use rayon::{prelude::*, ThreadPool};
use tracing::{debug, info};

use crate::{
    core::{state::inbox::Inbox, utils::errors::GraphError},
    db::{
        graph::{graph::Graph, vertex::VertexBody},
        task::{
            config::EngineConfig,
            context::Context,
            custom_pool,
            spread::{Shard, WorkingSet},
            task::{Program, Step},
            vertex::eval_vertex::EvalVertexView,
            POOL,
        },
    },
};

/// Where the scheduler stands. [`TaskRunner::step`] moves it one transition forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    MetaInit,
    SuperstepRun,
    Barrier,
    MetaAdvance,
    Terminated,
}

/// Outcome of one meta-superstep.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhaseSummary {
    pub meta_superstep: usize,
    pub supersteps: usize,
    pub messages: usize,
    /// False when the phase stopped on the superstep cap.
    pub converged: bool,
}

#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub phases: Vec<PhaseSummary>,
    pub elapsed: Duration,
}

impl RunSummary {
    pub fn supersteps(&self) -> usize {
        self.phases.iter().map(|p| p.supersteps).sum()
    }

    pub fn messages(&self) -> usize {
        self.phases.iter().map(|p| p.messages).sum()
    }

    pub fn converged(&self) -> bool {
        self.phases.iter().all(|p| p.converged)
    }
}

/// Drives a [`Program`] over a graph, one superstep at a time.
///
/// The runner borrows the graph exclusively for its whole life, payloads can be
/// read back from the graph once the runner is dropped.
pub struct TaskRunner<'a, P: Program> {
    graph: &'a mut Graph<P>,
    program: P,
    ctx: Context,
    config: EngineConfig,
    pool: Arc<ThreadPool>,
    working_set: WorkingSet,
    pending: Option<Shard>,
    state: EngineState,
    phase: PhaseSummary,
    phase_start: Instant,
    summary: RunSummary,
}

impl<'a, P: Program> TaskRunner<'a, P> {
    pub fn new(graph: &'a mut Graph<P>, program: P, config: EngineConfig) -> Result<Self, GraphError> {
        let pool = match config.num_threads {
            Some(n) => custom_pool(n)?,
            None => POOL.clone(),
        };
        let meta_count = config
            .meta_superstep_count
            .unwrap_or_else(|| program.meta_superstep_count());
        let ctx = Context::new(graph.count(), meta_count);
        let state = if meta_count == 0 {
            EngineState::Terminated
        } else {
            EngineState::MetaInit
        };

        Ok(Self {
            graph,
            program,
            ctx,
            config,
            pool,
            working_set: WorkingSet::All,
            pending: None,
            state,
            phase: PhaseSummary::default(),
            phase_start: Instant::now(),
            summary: RunSummary::default(),
        })
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn program(&self) -> &P {
        &self.program
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    pub fn graph(&self) -> &Graph<P> {
        &*self.graph
    }

    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }

    /// Runs every remaining meta-superstep to convergence. A no-op once terminated.
    pub fn run(&mut self) -> RunSummary {
        while self.step() != EngineState::Terminated {}
        self.summary.clone()
    }

    /// Runs meta-superstep `meta` alone, on whatever payload the vertices hold.
    ///
    /// The runner is left where the phase ended, so a following [`run`](Self::run)
    /// carries on with the phases after `meta`.
    pub fn run_meta(&mut self, meta: usize) -> Result<PhaseSummary, GraphError> {
        let count = self.ctx.meta_count();
        if meta >= count {
            return Err(GraphError::MetaSuperstepOutOfRange { meta, count });
        }
        self.ctx.set_meta_ss(meta);
        self.state = EngineState::MetaInit;
        while !matches!(
            self.step(),
            EngineState::MetaAdvance | EngineState::Terminated
        ) {}
        Ok(self.phase.clone())
    }

    /// Advances the state machine by one transition and returns the new state.
    pub fn step(&mut self) -> EngineState {
        self.state = match self.state {
            EngineState::MetaInit => {
                self.init_phase();
                if self.config.max_supersteps == 0 {
                    self.finish_phase(false)
                } else {
                    EngineState::SuperstepRun
                }
            }
            EngineState::SuperstepRun => {
                self.pending = Some(self.run_superstep());
                EngineState::Barrier
            }
            EngineState::Barrier => {
                let converged = self.barrier();
                if converged || self.ctx.ss() >= self.config.max_supersteps {
                    self.finish_phase(converged)
                } else {
                    EngineState::SuperstepRun
                }
            }
            EngineState::MetaAdvance => {
                self.ctx.set_meta_ss(self.ctx.meta_ss() + 1);
                EngineState::MetaInit
            }
            EngineState::Terminated => EngineState::Terminated,
        };
        self.state
    }

    fn init_phase(&mut self) {
        let meta = self.ctx.meta_ss();
        info!(
            meta_superstep = meta,
            vertices = self.graph.count(),
            spread = self.config.spread,
            "starting meta-superstep"
        );
        self.phase = PhaseSummary {
            meta_superstep: meta,
            ..Default::default()
        };
        self.phase_start = Instant::now();
        self.ctx.reset_ss();
        self.ctx.set_counts(self.graph.count(), 0);
        self.working_set = WorkingSet::All;
        self.pending = None;

        let vertices = self.graph.vertices_mut();
        self.pool
            .install(|| vertices.par_iter_mut().for_each(|v| v.reset()));
    }

    fn finish_phase(&mut self, converged: bool) -> EngineState {
        let elapsed = self.phase_start.elapsed();
        self.phase.converged = converged;
        self.summary.phases.push(self.phase.clone());
        self.summary.elapsed += elapsed;
        info!(
            meta_superstep = self.phase.meta_superstep,
            supersteps = self.phase.supersteps,
            messages = self.phase.messages,
            converged,
            "finished meta-superstep in {:?}",
            elapsed
        );

        if self.ctx.meta_ss() + 1 < self.ctx.meta_count() {
            EngineState::MetaAdvance
        } else {
            EngineState::Terminated
        }
    }

    fn run_superstep(&self) -> Shard {
        let ctx = &self.ctx;
        let graph: &Graph<P> = &*self.graph;
        let program = &self.program;
        let spread = self.config.spread;
        let chunk_size = self.config.chunk_size.max(1);

        self.pool.install(|| match &self.working_set {
            WorkingSet::All => graph
                .vertices()
                .par_chunks(chunk_size)
                .enumerate()
                .map(|(i, morsel)| {
                    let mut shard = Shard::default();
                    for (j, v) in morsel.iter().enumerate() {
                        // Safety: chunks are disjoint, every location is visited once
                        let body = unsafe { v.body_mut() };
                        if !body.halted {
                            let vid = VID(i * chunk_size + j);
                            Self::run_vertex(ctx, graph, program, vid, body, &mut shard, spread);
                        }
                    }
                    shard
                })
                .reduce(Shard::default, Shard::merge),
            WorkingSet::Set(active) => active
                .par_chunks(chunk_size)
                .map(|morsel| {
                    let mut shard = Shard::default();
                    for &vid in morsel {
                        // Safety: the active set holds each location at most once
                        let body = unsafe { graph.vertex(vid).body_mut() };
                        Self::run_vertex(ctx, graph, program, vid, body, &mut shard, spread);
                    }
                    shard
                })
                .reduce(Shard::default, Shard::merge),
        })
    }

    #[inline]
    fn run_vertex(
        ctx: &Context,
        graph: &Graph<P>,
        program: &P,
        vid: VID,
        body: &mut VertexBody<P::State, P::Inbox>,
        shard: &mut Shard,
        spread: bool,
    ) {
        let mut vv = EvalVertexView::new(ctx, graph, vid, &mut *body, &mut *shard, spread);
        let step = program.compute(&mut vv);
        if step == Step::Continue {
            vv.continue_next();
        }
        body.inbox.clear();
        body.halted = step == Step::Done;
        shard.executed += 1;
    }

    /// Makes the messages of the finished superstep current and decides convergence.
    fn barrier(&mut self) -> bool {
        let shard = self.pending.take().unwrap_or_default();

        let (active, converged) = if self.config.spread {
            let activated = shard.activated;
            let graph: &Graph<P> = &*self.graph;
            self.pool.install(|| {
                activated.par_iter().for_each(|&vid| {
                    let v = graph.vertex(vid);
                    // Safety: no compute runs during the barrier and each location appears once
                    let body = unsafe { v.body_mut() };
                    v.next()
                        .with(|next| std::mem::swap(&mut body.inbox, next));
                    body.halted = false;
                    v.unschedule();
                })
            });
            let active = activated.len();
            self.working_set = WorkingSet::Set(activated);
            (active, active == 0)
        } else {
            let vertices = self.graph.vertices_mut();
            let active: usize = self.pool.install(|| {
                vertices
                    .par_iter_mut()
                    .map(|v| {
                        let (body, next) = v.parts_mut();
                        if next.has_message() {
                            std::mem::swap(&mut body.inbox, next);
                            body.halted = false;
                        }
                        usize::from(!body.halted)
                    })
                    .sum()
            });
            self.working_set = WorkingSet::All;
            (active, active == 0)
        };

        debug!(
            meta_superstep = self.ctx.meta_ss(),
            superstep = self.ctx.ss(),
            executed = shard.executed,
            messages = shard.messages,
            active_next = active,
            "superstep done"
        );

        self.ctx.increment_ss();
        self.ctx.set_counts(active, shard.messages);
        self.phase.supersteps += 1;
        self.phase.messages += shard.messages;
        converged
    }
}
