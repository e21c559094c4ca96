//! API request handlers

use crate::datasets::DatasetRegistry;
use crate::error::Error;
use crate::export::{self, ExportKind};
use crate::graph::pathway::rank_pathways;
use crate::graph::{resolver, GraphElement, VisualizationGraph};
use crate::kegg::KeggClient;
use crate::neo4j::GraphStore;
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashSet;
use std::sync::Arc;

/// Shared server state
pub struct ServerState {
    pub store: Arc<dyn GraphStore>,
    pub registry: DatasetRegistry,
    pub kegg: KeggClient,
}

pub type AppState = Arc<ServerState>;

/// API error, mapped onto HTTP status codes at the boundary. Validation
/// failures are the client's fault, store failures are the backend's.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    BadGateway(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::BadGateway(msg) => (StatusCode::BAD_GATEWAY, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

impl From<Error> for AppError {
    fn from(err: Error) -> Self {
        match &err {
            Error::NodeNotFound { .. } => AppError::NotFound(err.to_string()),
            Error::InvalidSourceDatabase { .. }
            | Error::InvalidAccessionFormat { .. }
            | Error::WrongGraphElement { .. } => AppError::BadRequest(err.to_string()),
            Error::Store(_) | Error::Row(_) => {
                tracing::error!("graph store failure: {}", err);
                AppError::BadGateway("graph store unavailable".to_string())
            }
            _ => AppError::Internal(err.to_string()),
        }
    }
}

// ============================================================================
// Health check
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============================================================================
// Datasets
// ============================================================================

pub async fn list_datasets(State(state): State<AppState>) -> Json<serde_json::Value> {
    let datasets: Vec<serde_json::Value> = state
        .registry
        .iter()
        .map(|d| {
            json!({
                "name": d.name,
                "year": d.year,
                "citation_url": d.citation_url,
            })
        })
        .collect();
    Json(json!({ "datasets": datasets }))
}

// ============================================================================
// Search
// ============================================================================

#[derive(Deserialize)]
pub struct SearchQuery {
    pub term: String,
    /// "Human", "Smesgene", "ALL", or a dataset name.
    #[serde(default = "default_database")]
    pub database: String,
}

fn default_database() -> String {
    "ALL".to_string()
}

pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let term = resolver::sanitize(&params.term);
    if term.is_empty() {
        return Err(AppError::BadRequest("empty search term".to_string()));
    }

    let entities =
        resolver::resolve_in_database(state.store.as_ref(), &state.registry, &term, &params.database)
            .await?;
    if entities.is_empty() {
        return Err(AppError::NotFound(format!("no match for {}", term)));
    }

    let results: Vec<serde_json::Value> = entities
        .iter()
        .map(|e| {
            json!({
                "symbol": e.symbol(),
                "database": e.database(),
                "name": e.display_name(),
                "homolog": e.homolog_symbol(),
            })
        })
        .collect();
    Ok(Json(json!({ "results": results })))
}

// ============================================================================
// Network
// ============================================================================

#[derive(Deserialize)]
pub struct NetworkRequest {
    pub symbols: Vec<String>,
    pub database: String,
}

/// Build an interaction network around seed symbols: resolve them to
/// contigs, pull each contig's neighbours, and mark the seeds important.
/// Expansion uses the shallow lookup; homology details are fetched per
/// node on demand.
pub async fn network(
    State(state): State<AppState>,
    Json(request): Json<NetworkRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let store = state.store.as_ref();
    let mut graph = VisualizationGraph::new();
    graph
        .new_nodes(store, &state.registry, &request.symbols, &request.database)
        .await?;

    let seeds: HashSet<String> = graph
        .nodes()
        .iter()
        .map(|n| n.entity.symbol().to_string())
        .collect();

    let mut expansion = Vec::new();
    for node in graph.nodes() {
        let symbol = node.entity.symbol();
        let database = node.entity.database();
        match store.neighbours_shallow(symbol, database).await {
            Ok(Some(interactions)) => {
                for interaction in interactions {
                    expansion.push(GraphElement::Node(interaction.target.clone()));
                    expansion.push(GraphElement::Edge(interaction));
                }
            }
            Ok(None) => continue,
            Err(Error::NodeNotFound { .. }) | Err(Error::InvalidSourceDatabase { .. }) => continue,
            Err(err) => return Err(err.into()),
        }
    }
    graph.add_elements(expansion);
    graph.define_important(&seeds);

    if graph.is_empty() {
        return Err(AppError::NotFound("no network for given symbols".to_string()));
    }
    Ok(Json(graph.to_graph_elements()))
}

// ============================================================================
// Graph upload
// ============================================================================

#[derive(Deserialize)]
pub struct UploadGraphRequest {
    pub elements: Vec<serde_json::Value>,
}

/// Rebuild a graph from cytoscape.js elements posted by the front end, so a
/// previously exported network can be displayed again without re-querying
/// the store. A malformed element is the client's fault.
pub async fn upload_graph(
    State(state): State<AppState>,
    Json(request): Json<UploadGraphRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let mut graph = VisualizationGraph::new();
    for element in &request.elements {
        graph.add_serialized_element(element, &state.registry)?;
    }
    if graph.is_empty() {
        return Err(AppError::BadRequest("no graph elements given".to_string()));
    }
    Ok(Json(graph.to_graph_elements()))
}

// ============================================================================
// KEGG pathways
// ============================================================================

#[derive(Deserialize)]
pub struct KeggRequest {
    pub pathway: String,
    pub database: String,
}

pub async fn kegg_pathway(
    State(state): State<AppState>,
    Json(request): Json<KeggRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let graph = state
        .kegg
        .pathway_graph(
            state.store.as_ref(),
            &state.registry,
            &request.pathway,
            &request.database,
        )
        .await?;
    if graph.is_empty() {
        return Err(AppError::NotFound(format!(
            "no pathway mapping for {}",
            request.pathway
        )));
    }
    Ok(Json(graph.to_graph_elements()))
}

// ============================================================================
// Pathways between two contigs
// ============================================================================

#[derive(Deserialize)]
pub struct PathsQuery {
    pub source: String,
    pub target: String,
    pub database: String,
    #[serde(default = "default_max_length")]
    pub max_length: i64,
}

fn default_max_length() -> i64 {
    3
}

pub async fn paths(
    State(state): State<AppState>,
    Query(params): Query<PathsQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let source = resolver::sanitize(&params.source);
    let target = resolver::sanitize(&params.target);
    let found = state
        .store
        .shortest_paths(&source, &target, &params.database, params.max_length)
        .await?;

    let Some(mut pathways) = found else {
        return Err(AppError::NotFound(format!(
            "no path between {} and {}",
            source, target
        )));
    };
    rank_pathways(&mut pathways);

    // Union of all ranked paths, for rendering in one panel.
    let mut merged = VisualizationGraph::new();
    for pathway in &pathways {
        merged.add_graph(pathway.graph.clone());
    }

    let body: Vec<serde_json::Value> = pathways
        .iter()
        .map(|p| {
            json!({
                "score": p.score(),
                "graph": p.graph.to_graph_elements(),
            })
        })
        .collect();
    Ok(Json(json!({
        "paths": body,
        "graph": merged.to_graph_elements(),
    })))
}

// ============================================================================
// Node details
// ============================================================================

pub async fn contig_details(
    State(state): State<AppState>,
    Path((database, symbol)): Path<(String, String)>,
) -> Result<Json<serde_json::Value>, AppError> {
    let store = state.store.as_ref();
    let mut contig = store.contig(&symbol, &database).await?;
    contig.fetch_neighbours(store).await?;
    let domains = store.domains(&contig.symbol, &database).await?;
    let go_terms = match &contig.homolog {
        Some(homology) => store.gene_ontology(&homology.human.symbol).await?,
        None => Vec::new(),
    };
    let summary = match &contig.homolog {
        Some(homology) => store
            .human_summary(&homology.human.symbol)
            .await?
            .unwrap_or_else(|| "NA".to_string()),
        None => "NA".to_string(),
    };

    Ok(Json(json!({
        "symbol": contig.symbol,
        "database": contig.database,
        "sequence": contig.sequence,
        "orf": contig.orf,
        "length": contig.length,
        "orf_length": contig.orf_length(),
        "gene": contig.gene,
        "name": contig.name,
        "degree": contig.degree,
        "homolog": contig.homolog,
        "summary": summary,
        "domains": domains.map(|d| d.iter().map(|a| a.to_element()).collect::<Vec<_>>()),
        "gene_ontology": go_terms,
    })))
}

// ============================================================================
// Homologs
// ============================================================================

#[derive(Deserialize)]
pub struct HomologsQuery {
    pub symbol: String,
    /// Missing means every dataset.
    pub dataset: Option<String>,
}

pub async fn homologs(
    State(state): State<AppState>,
    Query(params): Query<HomologsQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let partitions = state
        .store
        .homologs(&params.symbol.to_uppercase(), params.dataset.as_deref())
        .await?;
    Ok(Json(json!({ "homologs": partitions })))
}

// ============================================================================
// Exports
// ============================================================================

#[derive(Deserialize)]
pub struct ExportRequest {
    pub identifiers: Vec<String>,
    pub database: String,
    pub data: String,
}

pub async fn export(
    State(state): State<AppState>,
    Json(request): Json<ExportRequest>,
) -> Result<impl IntoResponse, AppError> {
    let kind = ExportKind::parse(&request.data)
        .ok_or_else(|| AppError::BadRequest(format!("unknown export type: {}", request.data)))?;
    let file = export::download_data(
        state.store.as_ref(),
        &state.registry,
        &request.identifiers,
        &request.database,
        kind,
    )
    .await?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={}", file.filename),
            ),
        ],
        file.content,
    ))
}
