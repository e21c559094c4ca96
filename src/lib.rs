//! PlanNET server
//!
//! A web service for exploring predicted protein-protein interaction
//! networks in planaria:
//! - Neo4j graph of contigs, genes, human homologs, domains, and GO terms
//! - Symbol resolution across transcriptome datasets
//! - Network assembly, shortest-path scoring, and KEGG pathway projection
//! - FASTA/CSV exports of search results

pub mod api;
pub mod datasets;
pub mod error;
pub mod export;
pub mod graph;
pub mod kegg;
pub mod neo4j;

use crate::datasets::{DatasetConfig, DatasetRegistry};
use anyhow::Result;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;

// ============================================================================
// YAML config structs (deserialization targets)
// ============================================================================

/// Top-level YAML configuration file structure
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct YamlConfig {
    pub server: ServerYamlConfig,
    pub neo4j: Neo4jYamlConfig,
    /// Dataset overrides; entries replace the builtin dataset of the same
    /// name, unknown names are appended.
    pub datasets: Vec<DatasetConfig>,
}

/// Server configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerYamlConfig {
    pub port: u16,
}

impl Default for ServerYamlConfig {
    fn default() -> Self {
        Self { port: 8080 }
    }
}

/// Neo4j configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Neo4jYamlConfig {
    pub uri: String,
    pub user: String,
    pub password: String,
}

impl Default for Neo4jYamlConfig {
    fn default() -> Self {
        Self {
            uri: "bolt://localhost:7687".into(),
            user: "neo4j".into(),
            password: "plannet123".into(),
        }
    }
}

// ============================================================================
// Runtime config (what the application actually uses)
// ============================================================================

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub neo4j_uri: String,
    pub neo4j_user: String,
    pub neo4j_password: String,
    pub server_port: u16,
    pub dataset_overrides: Vec<DatasetConfig>,
}

impl Config {
    /// Load configuration from environment variables only.
    /// Equivalent to from_yaml_and_env(None).
    pub fn from_env() -> Result<Self> {
        Self::from_yaml_and_env(None)
    }

    /// Load configuration from an optional YAML file, then override with env vars.
    ///
    /// Priority: env var > YAML > default
    ///
    /// If `yaml_path` is None, tries "config.yaml" in CWD. If the file doesn't
    /// exist, falls back to pure env var / defaults.
    pub fn from_yaml_and_env(yaml_path: Option<&Path>) -> Result<Self> {
        let yaml = Self::load_yaml(yaml_path);

        Ok(Self {
            neo4j_uri: std::env::var("NEO4J_URI").unwrap_or(yaml.neo4j.uri),
            neo4j_user: std::env::var("NEO4J_USER").unwrap_or(yaml.neo4j.user),
            neo4j_password: std::env::var("NEO4J_PASSWORD").unwrap_or(yaml.neo4j.password),
            server_port: std::env::var("SERVER_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(yaml.server.port),
            dataset_overrides: yaml.datasets,
        })
    }

    /// The dataset registry this deployment serves.
    pub fn registry(&self) -> crate::error::Result<DatasetRegistry> {
        if self.dataset_overrides.is_empty() {
            Ok(DatasetRegistry::builtin())
        } else {
            DatasetRegistry::with_entries(&self.dataset_overrides)
        }
    }

    /// Try to load and parse a YAML config file. Returns defaults on any failure.
    fn load_yaml(yaml_path: Option<&Path>) -> YamlConfig {
        let default_path = Path::new("config.yaml");
        let path = yaml_path.unwrap_or(default_path);

        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_yaml::from_str(&contents) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {}. Using defaults.", path.display(), e);
                    YamlConfig::default()
                }
            },
            Err(_) => {
                tracing::debug!(
                    "No config file at {}, using env vars / defaults",
                    path.display()
                );
                YamlConfig::default()
            }
        }
    }
}

/// Connect to the backing services and serve the API until shutdown.
pub async fn start_server(config: Config) -> Result<()> {
    let registry = config.registry()?;
    let client = neo4j::Neo4jClient::connect(
        &config.neo4j_uri,
        &config.neo4j_user,
        &config.neo4j_password,
        registry.clone(),
    )
    .await?;

    let state: api::AppState = Arc::new(api::ServerState {
        store: Arc::new(client),
        registry,
        kegg: kegg::KeggClient::new(),
    });

    let router = api::create_router(state);
    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("listening on {}", addr);
    axum::serve(listener, router).await?;
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
