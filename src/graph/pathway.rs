//! Pathway scoring: wrap a path returned by the shortest-path query in a
//! graph and score it by the mean interaction probability of its edges.

use crate::graph::assembly::VisualizationGraph;
use crate::graph::models::round3;

/// One source-to-target path, carried as a small visualization graph so it
/// can be merged straight into a larger view.
#[derive(Debug, Clone)]
pub struct Pathway {
    pub graph: VisualizationGraph,
}

impl Pathway {
    pub fn new(graph: VisualizationGraph) -> Self {
        Self { graph }
    }

    /// Mean interaction probability over the path's edges, rounded to three
    /// decimals. A path with no scored edges gets 0.0 rather than a NaN.
    pub fn score(&self) -> f64 {
        let probabilities: Vec<f64> = self
            .graph
            .edges()
            .iter()
            .filter_map(|e| e.probability())
            .collect();
        if probabilities.is_empty() {
            return 0.0;
        }
        round3(probabilities.iter().sum::<f64>() / probabilities.len() as f64)
    }
}

/// Order pathways by descending score. The sort is stable, so paths with
/// equal scores keep the order the store returned them in.
pub fn rank_pathways(pathways: &mut [Pathway]) {
    pathways.sort_by(|a, b| {
        b.score()
            .partial_cmp(&a.score())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}
