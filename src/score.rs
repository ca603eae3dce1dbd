//! Score Initializer.

use crate::error::{FasError, FasResult};
use crate::graph::Graph;

/// Per-vertex score state. In unweighted mode `score` is exactly
/// `residual_in - residual_out` and is maintained by integer increments. In
/// weighted mode `w_in`/`w_out` are residual sums of normalized arc weight,
/// refloored into `score` after every update: residual normalized sums are
/// maintained per vertex and refloored on each update rather than
/// recomputed from scratch.
#[derive(Debug, Clone, Default)]
pub struct VertexScore {
    pub score: i64,
    pub w_in: f64,
    pub w_out: f64,
}

pub struct ScoreTable {
    pub scores: Vec<VertexScore>,
    pub weighted: bool,
}

/// Computes the initial per-vertex delta score, unweighted or
/// weighted-with-normalization.
///
/// In weighted mode, normalizes each arc's weight to its share of its
/// head's incoming mass (per-destination normalization), mutating the
/// arcs' `normalized_weight` field in place.
pub fn init_scores(graph: &mut Graph, weighted: bool) -> FasResult<ScoreTable> {
    if graph.vertex_count() == 0 {
        return Err(FasError::DegenerateGraph);
    }
    if graph.arc_count() == 0 {
        // every vertex isolated
        return Err(FasError::DegenerateGraph);
    }

    let n = graph.vertex_count();
    let mut scores = vec![VertexScore::default(); n];

    if !weighted {
        for v in graph.vertices() {
            let s = graph.in_degree(v) as i64 - graph.out_degree(v) as i64;
            scores[v] = VertexScore {
                score: s,
                w_in: graph.in_degree(v) as f64,
                w_out: graph.out_degree(v) as f64,
            };
        }
        return Ok(ScoreTable { scores, weighted });
    }

    // Weighted: per-destination normalization. For each head v, normalize
    // incoming arc weight by W_in(v) = sum of incoming weight at v.
    let w_in_totals: Vec<f64> = graph.vertices().map(|v| graph.in_weight(v)).collect();

    let arc_count = graph.arc_count();
    for idx in 0..arc_count {
        let (head, weight) = {
            let a = graph.arcs()[idx];
            (a.head, a.weight)
        };
        let total = w_in_totals[head];
        let normalized = if total > 0.0 { weight / total } else { 0.0 };
        *graph.normalized_weight_mut(idx) = normalized;
    }

    for v in graph.vertices() {
        let w_in: f64 = graph.in_arcs(v).map(|a| a.normalized_weight).sum();
        let w_out: f64 = graph.out_arcs(v).map(|a| a.normalized_weight).sum();
        scores[v] = VertexScore {
            score: (w_in - w_out).floor() as i64,
            w_in,
            w_out,
        };
    }

    Ok(ScoreTable { scores, weighted })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;

    #[test]
    fn unweighted_score_is_in_minus_out_degree() {
        let mut b = GraphBuilder::new();
        b.add_arc("A", "B", 1.0).unwrap();
        b.add_arc("C", "B", 1.0).unwrap();
        let mut g = b.build();
        let st = init_scores(&mut g, false).unwrap();
        // B has in_degree 2, out_degree 0 -> score 2
        let b_idx = (0..g.vertex_count()).find(|&v| g.key(v) == "B").unwrap();
        assert_eq!(st.scores[b_idx].score, 2);
    }

    #[test]
    fn weighted_score_floors_and_preserves_sign() {
        let mut b = GraphBuilder::new();
        b.add_arc("A", "B", 2.0).unwrap();
        b.add_arc("B", "A", 1.0).unwrap();
        let mut g = b.build();
        let st = init_scores(&mut g, true).unwrap();
        let a_idx = (0..g.vertex_count()).find(|&v| g.key(v) == "A").unwrap();
        let b_idx = (0..g.vertex_count()).find(|&v| g.key(v) == "B").unwrap();
        // A: w_in=1 (all of B's out mass normalized to 1), w_out=1 -> 0
        // B: w_in=1 (all of A's out mass normalized to 1), w_out=1 -> 0
        // Both single-destination arcs normalize their weight to 1.0, so
        // scores are w_in - w_out = 1 - 1 = 0 for both; sign is preserved
        // trivially. Verify no panics and exact floor semantics instead.
        assert_eq!(st.scores[a_idx].score, 0);
        assert_eq!(st.scores[b_idx].score, 0);
    }

    #[test]
    fn empty_graph_is_degenerate() {
        let mut g = GraphBuilder::new().build();
        assert!(matches!(
            init_scores(&mut g, false),
            Err(FasError::DegenerateGraph)
        ));
    }
}
