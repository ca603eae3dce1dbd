//! Greedy Eliminator — the main loop.

use std::collections::VecDeque;

use crate::bucket_array::{BucketArray, Placement};
use crate::error::FasResult;
use crate::graph::Graph;
use crate::score::init_scores;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum PlacementKind {
    Source,
    Sink,
    Interior,
    Removed,
}

struct VertexState {
    residual_in: usize,
    residual_out: usize,
    score: i64,
    w_in: f64,
    w_out: f64,
    placement: PlacementKind,
}

/// Result of a full elimination run: the left/right order accumulators
/// (concatenated to form the final order) plus which vertices were isolated.
pub struct EliminationResult {
    pub s_left: Vec<usize>,
    pub s_right: VecDeque<usize>,
}

/// Runs the greedy elimination engine to completion.
///
/// Mutates `graph` only to record per-arc normalized weights; the
/// arc set itself is never mutated — residual structure lives entirely in
/// side counters here, sidestepping the "mutation during iteration" hazard
/// by construction.
pub fn eliminate(graph: &mut Graph, weighted: bool) -> FasResult<EliminationResult> {
    let score_table = init_scores(graph, weighted)?;
    let n = graph.vertex_count();

    let mut state: Vec<VertexState> = Vec::with_capacity(n);
    for v in 0..n {
        let s = &score_table.scores[v];
        state.push(VertexState {
            residual_in: graph.in_degree(v),
            residual_out: graph.out_degree(v),
            score: s.score,
            w_in: s.w_in,
            w_out: s.w_out,
            placement: PlacementKind::Removed, // placeholder, set below
        });
    }

    let mut s_left: Vec<usize> = Vec::new();
    let mut s_right: VecDeque<usize> = VecDeque::new();
    let mut bucket_array = BucketArray::new(n);

    for v in 0..n {
        let (rin, rout) = (state[v].residual_in, state[v].residual_out);
        if rin == 0 && rout == 0 {
            // Isolated: deposited directly into S_L at initialization
            // (invariant 3).
            state[v].placement = PlacementKind::Removed;
            s_left.push(v);
        } else if rin == 0 {
            state[v].placement = PlacementKind::Source;
            bucket_array.seed(v, Placement::Source);
        } else if rout == 0 {
            state[v].placement = PlacementKind::Sink;
            bucket_array.seed(v, Placement::Sink);
        } else {
            state[v].placement = PlacementKind::Interior;
            bucket_array.seed(v, Placement::Interior(state[v].score));
        }
    }

    loop {
        while let Some(v) = bucket_array.drain_sink() {
            state[v].placement = PlacementKind::Removed;
            s_right.push_front(v);
            update_neighbors(graph, &mut state, &mut bucket_array, v, weighted);
        }
        while let Some(v) = bucket_array.drain_source() {
            state[v].placement = PlacementKind::Removed;
            s_left.push(v);
            update_neighbors(graph, &mut state, &mut bucket_array, v, weighted);
        }
        if bucket_array.interior_count() == 0
            && bucket_array.is_source_empty()
            && bucket_array.is_sink_empty()
        {
            break;
        }
        let v = bucket_array.evict_min();
        state[v].placement = PlacementKind::Removed;
        s_left.push(v);
        update_neighbors(graph, &mut state, &mut bucket_array, v, weighted);
    }

    Ok(EliminationResult { s_left, s_right })
}

/// Neighbor-update protocol for a just-removed vertex `v`.
///
/// Arc lists are snapshotted from the immutable graph before any state is
/// touched, so there is nothing to protect against concurrent
/// mutation of the traversal target.
fn update_neighbors(
    graph: &Graph,
    state: &mut [VertexState],
    bucket_array: &mut BucketArray,
    v: usize,
    weighted: bool,
) {
    let incoming: Vec<(usize, f64)> = graph.in_arcs(v).map(|a| (a.tail, a.normalized_weight)).collect();
    let outgoing: Vec<(usize, f64)> = graph.out_arcs(v).map(|a| (a.head, a.normalized_weight)).collect();

    for (u, nw) in incoming {
        if state[u].placement != PlacementKind::Interior {
            continue;
        }
        let old_score = state[u].score;
        state[u].residual_out -= 1;
        if weighted {
            state[u].w_out -= nw;
            state[u].score = (state[u].w_in - state[u].w_out).floor() as i64;
        } else {
            state[u].score += 1;
        }

        if state[u].residual_in > 0 && state[u].residual_out > 0 {
            bucket_array.relocate_from_interior(u, old_score, Placement::Interior(state[u].score));
        } else {
            log::debug!("vertex {u} drained to sink pile (residual_out exhausted)");
            state[u].placement = PlacementKind::Sink;
            bucket_array.relocate_from_interior(u, old_score, Placement::Sink);
        }
    }

    for (w, nw) in outgoing {
        if state[w].placement != PlacementKind::Interior {
            continue;
        }
        let old_score = state[w].score;
        state[w].residual_in -= 1;
        if weighted {
            state[w].w_in -= nw;
            state[w].score = (state[w].w_in - state[w].w_out).floor() as i64;
        } else {
            state[w].score -= 1;
        }

        // `residual_out` can't be zero here: a vertex leaves `Interior` the
        // instant its `residual_out` hits zero (see the branch above), so
        // reaching this point with placement still `Interior` guarantees
        // `residual_out > 0` — the only way out of the interior bucket from
        // this loop is via `residual_in` running out.
        if state[w].residual_in > 0 && state[w].residual_out > 0 {
            bucket_array.relocate_from_interior(w, old_score, Placement::Interior(state[w].score));
        } else {
            log::debug!("vertex {w} drained to source pile (residual_in exhausted)");
            state[w].placement = PlacementKind::Source;
            bucket_array.relocate_from_interior(w, old_score, Placement::Source);
        }
    }
}
