//! KEGG pathway import via the TOGOWS REST service.
//!
//! A pathway code is resolved to its human gene list, and the genes are
//! mapped onto planarian contigs and their interconnections. Network and
//! decode failures degrade to an empty graph rather than an error, since a
//! missing pathway and an unreachable upstream look the same to the user.

use crate::datasets::DatasetRegistry;
use crate::error::Result;
use crate::graph::VisualizationGraph;
use crate::neo4j::GraphStore;
use std::collections::HashMap;
use std::time::Duration;

const TOGOWS_BASE_URL: &str = "http://togows.dbcls.jp";
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the TOGOWS pathway endpoint.
pub struct KeggClient {
    http: reqwest::Client,
    base_url: String,
}

impl Default for KeggClient {
    fn default() -> Self {
        Self::new()
    }
}

impl KeggClient {
    pub fn new() -> Self {
        Self::with_base_url(TOGOWS_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(FETCH_TIMEOUT)
                .build()
                .unwrap_or_default(),
            base_url: base_url.into(),
        }
    }

    /// Fetch the human gene symbols of a KEGG pathway. Empty on any upstream
    /// failure.
    pub async fn pathway_genes(&self, pathway: &str) -> Vec<String> {
        let url = format!("{}/entry/pathway/{}/genes.json", self.base_url, pathway);
        let response = match self.http.get(&url).send().await {
            Ok(response) if response.status().is_success() => response,
            Ok(response) => {
                tracing::warn!("kegg fetch for {} returned {}", pathway, response.status());
                return Vec::new();
            }
            Err(err) => {
                tracing::warn!("kegg fetch for {} failed: {}", pathway, err);
                return Vec::new();
            }
        };
        let entries: Vec<HashMap<String, String>> = match response.json().await {
            Ok(entries) => entries,
            Err(err) => {
                tracing::warn!("kegg response for {} not decodable: {}", pathway, err);
                return Vec::new();
            }
        };
        parse_gene_entries(&entries)
    }

    /// Build the planarian graph for a KEGG pathway code: map its genes to
    /// contigs in `database` and connect them.
    pub async fn pathway_graph(
        &self,
        store: &dyn GraphStore,
        registry: &DatasetRegistry,
        pathway: &str,
        database: &str,
    ) -> Result<VisualizationGraph> {
        let genes = self.pathway_genes(pathway).await;
        let mut graph = VisualizationGraph::new();
        if genes.is_empty() {
            return Ok(graph);
        }
        graph.new_nodes(store, registry, &genes, database).await?;
        graph.get_connections(store).await?;
        Ok(graph)
    }
}

/// TOGOWS returns one object mapping gene ids to "SYMBOL; description".
fn parse_gene_entries(entries: &[HashMap<String, String>]) -> Vec<String> {
    let Some(first) = entries.first() else {
        return Vec::new();
    };
    let mut genes: Vec<String> = first
        .values()
        .filter_map(|v| v.split(';').next())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    genes.sort();
    genes.dedup();
    genes
}
