mod common;

use common::{configs, run_states, union_find_labels};
use pregel::prelude::*;
use pretty_assertions::assert_eq;
use quickcheck::TestResult;
use quickcheck_macros::quickcheck;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn path(n: VertexId) -> Vec<(VertexId, VertexId)> {
    (0..n - 1).map(|i| (i, i + 1)).collect()
}

fn random_edges(n: usize, m: usize, seed: u64) -> Vec<(VertexId, VertexId)> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..m)
        .map(|_| {
            (
                rng.gen_range(0..n) as VertexId,
                rng.gen_range(0..n) as VertexId,
            )
        })
        .collect()
}

#[test]
fn directed_path_labels_flow_downstream() {
    let (labels, summary) = run_states(
        4,
        &path(4),
        LoadOptions::default(),
        HashMin::new(),
        EngineConfig::default(),
    );
    assert_eq!(labels, vec![0, 0, 0, 0]);
    assert_eq!(summary.supersteps(), 4);
    assert_eq!(summary.messages(), 5);
    assert!(summary.converged());
}

#[test]
fn directed_path_never_flows_upstream() {
    let edges: Vec<_> = path(4).into_iter().map(|(a, b)| (b, a)).collect();
    let (labels, _) = run_states(
        4,
        &edges,
        LoadOptions::default(),
        HashMin::new(),
        EngineConfig::default(),
    );
    // 1 -> 0, 2 -> 1, 3 -> 2: every vertex only sees itself and smaller ids downstream
    assert_eq!(labels, vec![0, 0, 1, 2]);
}

#[test]
fn undirected_path_settles_before_it_goes_quiet() {
    let options = LoadOptions::default().with_undirected(true);

    let (labels, capped) = run_states(
        4,
        &path(4),
        options,
        HashMin::new(),
        EngineConfig::default().with_max_supersteps(3),
    );
    assert_eq!(labels, vec![0, 0, 0, 0]);
    assert_eq!(capped.supersteps(), 3);
    assert!(!capped.converged());

    let (labels, full) = run_states(4, &path(4), options, HashMin::new(), EngineConfig::default());
    assert_eq!(labels, vec![0, 0, 0, 0]);
    assert_eq!(full.supersteps(), 4);
    assert!(full.converged());
}

#[quickcheck]
fn hashmin_finds_undirected_components(n: u8, edges: Vec<(u8, u8)>) -> TestResult {
    if n == 0 {
        return TestResult::discard();
    }
    let n = n as usize % 48 + 1;
    let edges: Vec<(VertexId, VertexId)> = edges
        .into_iter()
        .map(|(a, b)| ((a as usize % n) as VertexId, (b as usize % n) as VertexId))
        .collect();

    let (labels, summary) = run_states(
        n,
        &edges,
        LoadOptions::default().with_undirected(true),
        HashMin::new(),
        EngineConfig::default().with_chunk_size(7),
    );
    TestResult::from_bool(summary.converged() && labels == union_find_labels(n, &edges))
}

#[quickcheck]
fn combined_and_direct_delivery_agree(
    n: u8,
    edges: Vec<(u8, u8)>,
    undirected: bool,
    spread: bool,
) -> TestResult {
    if n == 0 {
        return TestResult::discard();
    }
    let n = n as usize % 48 + 1;
    let edges: Vec<(VertexId, VertexId)> = edges
        .into_iter()
        .map(|(a, b)| ((a as usize % n) as VertexId, (b as usize % n) as VertexId))
        .collect();
    let options = LoadOptions::default().with_undirected(undirected);
    let config = EngineConfig::default()
        .with_chunk_size(5)
        .with_spread(spread);

    let (combined, left) = run_states(n, &edges, options, HashMin::new(), config.clone());
    let (direct, right) = run_states(
        n,
        &edges,
        options,
        HashMin::<Mailbox<VertexId>>::with_inbox(),
        config,
    );
    TestResult::from_bool(
        left.converged()
            && right.converged()
            && left.supersteps() == right.supersteps()
            && combined == direct,
    )
}

#[test]
fn results_do_not_depend_on_scheduling_or_delivery() {
    let n = 200;
    let edges = random_edges(n, 260, 42);
    let options = LoadOptions::default().with_undirected(true);
    let expected = union_find_labels(n, &edges);

    for (lock, config) in configs() {
        let options = options.with_lock_strategy(lock);

        let (combined, summary) = run_states(n, &edges, options, HashMin::new(), config.clone());
        assert_eq!(combined, expected, "combined {lock:?} {config:?}");
        assert!(summary.converged());

        let (direct, _) = run_states(
            n,
            &edges,
            options,
            HashMin::<Mailbox<VertexId>>::with_inbox(),
            config.clone(),
        );
        assert_eq!(direct, expected, "direct {lock:?} {config:?}");
    }
}

#[test]
fn sssp_is_the_same_under_every_config() {
    let n = 120;
    let edges = random_edges(n, 400, 7);
    let (expected, _) = run_states(
        n,
        &edges,
        LoadOptions::default(),
        Sssp::new(0),
        EngineConfig::default().with_num_threads(1),
    );
    assert_eq!(expected[0], 0.0);

    for (lock, config) in configs() {
        let options = LoadOptions::default().with_lock_strategy(lock);
        let (dist, _) = run_states(n, &edges, options, Sssp::new(0), config);
        assert_eq!(dist, expected);
    }
}

#[test]
fn finished_runs_stay_finished() {
    let mut graph: Graph<HashMin> =
        Graph::from_edges(4, path(4), &LoadOptions::default()).unwrap();
    let mut runner = TaskRunner::new(&mut graph, HashMin::new(), EngineConfig::default()).unwrap();
    let first = runner.run();
    assert_eq!(runner.state(), EngineState::Terminated);

    let second = runner.run();
    assert_eq!(first.phases, second.phases);
    assert_eq!(runner.step(), EngineState::Terminated);
    assert_eq!(runner.context().ss(), 4);
    drop(runner);

    let labels: Vec<_> = graph.states().map(|(_, l)| *l).collect();
    assert_eq!(labels, vec![0, 0, 0, 0]);
}

fn scc_graph() -> Graph<Scc> {
    let edges = [(0, 1), (1, 2), (2, 0), (2, 3), (3, 4), (4, 5), (5, 3), (6, 6)];
    Graph::from_edges(7, edges, &LoadOptions::default().with_in_neighbours(true)).unwrap()
}

fn scc_states(graph: &Graph<Scc>) -> Vec<SccState> {
    graph.states().map(|(_, s)| *s).collect()
}

#[test]
fn meta_supersteps_chain_over_the_same_payload() {
    let mut chained = scc_graph();
    let summary = TaskRunner::new(&mut chained, Scc, EngineConfig::default())
        .unwrap()
        .run();
    assert_eq!(summary.phases.len(), 2);
    assert!(summary.converged());

    let components: Vec<_> = scc_states(&chained).iter().map(|s| s.component()).collect();
    assert_eq!(
        components,
        vec![Some(0), Some(0), Some(0), None, None, None, Some(6)]
    );

    // phase by phase on one runner
    let mut stepped = scc_graph();
    {
        let mut runner = TaskRunner::new(&mut stepped, Scc, EngineConfig::default()).unwrap();
        let forward = runner.run_meta(0).unwrap();
        assert_eq!(forward, summary.phases[0]);
        assert_eq!(runner.state(), EngineState::MetaAdvance);
        let backward = runner.run_meta(1).unwrap();
        assert_eq!(backward, summary.phases[1]);
        assert_eq!(runner.state(), EngineState::Terminated);
    }
    assert_eq!(scc_states(&stepped), scc_states(&chained));

    // the second phase only needs the payload the first one left behind
    let mut seeded = scc_graph();
    for (id, state) in chained.states().map(|(id, s)| (id, *s)).collect::<Vec<_>>() {
        seeded.get_mut(id).unwrap().state_mut().min_f = state.min_f;
    }
    TaskRunner::new(&mut seeded, Scc, EngineConfig::default())
        .unwrap()
        .run_meta(1)
        .unwrap();
    assert_eq!(scc_states(&seeded), scc_states(&chained));
}

#[test]
fn run_meta_rejects_unknown_phases() {
    let mut graph = scc_graph();
    let mut runner = TaskRunner::new(&mut graph, Scc, EngineConfig::default()).unwrap();
    assert!(matches!(
        runner.run_meta(2),
        Err(GraphError::MetaSuperstepOutOfRange { meta: 2, count: 2 })
    ));
}

#[test]
fn meta_superstep_count_can_be_overridden() {
    let mut graph = scc_graph();
    let config = EngineConfig::default().with_meta_superstep_count(1);
    let summary = TaskRunner::new(&mut graph, Scc, config).unwrap().run();
    assert_eq!(summary.phases.len(), 1);
    // the backward phase never ran
    assert!(graph.states().all(|(_, s)| s.min_b == 0));
}

// records whether a send to an unknown id was refused
struct SendFar;

impl Program for SendFar {
    type State = bool;
    type Message = ();
    type Inbox = Mailbox<()>;

    fn compute(&self, vv: &mut EvalVertexView<'_, Self>) -> Step {
        if vv.is_first_superstep() {
            let far = vv.id() + vv.num_vertices() as VertexId;
            let refused = matches!(
                vv.send(far, ()),
                Err(GraphError::VertexOutOfRange { id, .. }) if id == far
            );
            let accepted = vv.send(vv.id(), ()).is_ok();
            *vv.get_mut() = refused && accepted;
        }
        Step::Done
    }
}

#[test]
fn sending_outside_the_graph_is_an_error() {
    let options = LoadOptions::default().with_id_offset(1);
    let mut graph: Graph<SendFar> = Graph::from_edges(3, std::iter::empty(), &options).unwrap();
    let summary = TaskRunner::new(&mut graph, SendFar, EngineConfig::default())
        .unwrap()
        .run();
    assert!(graph.states().all(|(_, ok)| *ok));
    // the self-sends wake every vertex for one more superstep
    assert_eq!(summary.phases[0].messages, 3);
    assert_eq!(summary.supersteps(), 2);
}
