//! API route definitions

use super::handlers::{self, AppState};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(handlers::health))
        // Datasets available for browsing
        .route("/api/datasets", get(handlers::list_datasets))
        // Symbol search across partitions
        .route("/api/search", get(handlers::search))
        // Interaction network around seed symbols
        .route("/api/network", post(handlers::network))
        // Re-display a previously exported graph
        .route("/api/graph", post(handlers::upload_graph))
        // KEGG pathway projection onto the planarian graph
        .route("/api/kegg", post(handlers::kegg_pathway))
        // Shortest paths between two contigs
        .route("/api/paths", get(handlers::paths))
        // Full annotation card for one contig
        .route(
            "/api/node/{database}/{symbol}",
            get(handlers::contig_details),
        )
        // Homologs of a human gene, partitioned by dataset
        .route("/api/homologs", get(handlers::homologs))
        // Downloadable FASTA/CSV exports
        .route("/api/export", post(handlers::export))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
