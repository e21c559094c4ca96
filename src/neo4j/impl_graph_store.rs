//! GraphStore implementation for Neo4jClient
//!
//! Delegates every trait method to the corresponding inherent method.

use crate::error::Result;
use crate::graph::models::{
    DomainAnnotation, GoTerm, Homology, HumanGene, PfamDomain, PlanarianContig, PlanarianGene,
    PredictedInteraction,
};
use crate::graph::pathway::Pathway;
use crate::neo4j::client::Neo4jClient;
use crate::neo4j::traits::GraphStore;
use async_trait::async_trait;
use std::collections::HashMap;

#[async_trait]
impl GraphStore for Neo4jClient {
    async fn contig(&self, symbol: &str, dataset: &str) -> Result<PlanarianContig> {
        Neo4jClient::contig(self, symbol, dataset).await
    }

    async fn contigs_bulk(
        &self,
        symbols: &[String],
        dataset: &str,
    ) -> Result<Vec<PlanarianContig>> {
        Neo4jClient::contigs_bulk(self, symbols, dataset).await
    }

    async fn contigs_for_gene(
        &self,
        gene_symbol: &str,
        dataset: Option<&str>,
    ) -> Result<Vec<PlanarianContig>> {
        Neo4jClient::contigs_for_gene(self, gene_symbol, dataset).await
    }

    async fn contigs_for_domain(
        &self,
        domain: &PfamDomain,
        dataset: &str,
    ) -> Result<Vec<PlanarianContig>> {
        Neo4jClient::contigs_for_domain(self, domain, dataset).await
    }

    async fn contigs_for_go(
        &self,
        accession: &str,
        dataset: &str,
    ) -> Result<Vec<PlanarianContig>> {
        Neo4jClient::contigs_for_go(self, accession, dataset).await
    }

    async fn contigs_for_human(
        &self,
        human_symbol: &str,
        dataset: &str,
    ) -> Result<Vec<PlanarianContig>> {
        Neo4jClient::contigs_for_human(self, human_symbol, dataset).await
    }

    async fn planarian_gene(&self, symbol: &str) -> Result<PlanarianGene> {
        Neo4jClient::planarian_gene(self, symbol).await
    }

    async fn genes_for_domain(&self, domain: &PfamDomain) -> Result<Vec<PlanarianGene>> {
        Neo4jClient::genes_for_domain(self, domain).await
    }

    async fn genes_for_human(
        &self,
        human_symbol: &str,
        dataset: &str,
    ) -> Result<Vec<PlanarianGene>> {
        Neo4jClient::genes_for_human(self, human_symbol, dataset).await
    }

    async fn genes_by_name(&self, name: &str) -> Result<Vec<PlanarianGene>> {
        Neo4jClient::genes_by_name(self, name).await
    }

    async fn gene_wildcard(&self, pattern: &str) -> Result<Vec<PlanarianGene>> {
        Neo4jClient::gene_wildcard(self, pattern).await
    }

    async fn human_gene(&self, symbol: &str) -> Result<HumanGene> {
        Neo4jClient::human_gene(self, symbol).await
    }

    async fn human_wildcard(&self, pattern: &str) -> Result<Vec<HumanGene>> {
        Neo4jClient::human_wildcard(self, pattern).await
    }

    async fn humans_for_go(&self, accession: &str) -> Result<Vec<HumanGene>> {
        Neo4jClient::humans_for_go(self, accession).await
    }

    async fn human_summary(&self, symbol: &str) -> Result<Option<String>> {
        Neo4jClient::human_summary(self, symbol).await
    }

    async fn neighbours(
        &self,
        symbol: &str,
        database: &str,
    ) -> Result<Option<Vec<PredictedInteraction>>> {
        Neo4jClient::neighbours(self, symbol, database).await
    }

    async fn neighbours_shallow(
        &self,
        symbol: &str,
        database: &str,
    ) -> Result<Option<Vec<PredictedInteraction>>> {
        Neo4jClient::neighbours_shallow(self, symbol, database).await
    }

    async fn connections(&self, symbols: &[String]) -> Result<Vec<PredictedInteraction>> {
        Neo4jClient::connections(self, symbols).await
    }

    async fn shortest_paths(
        &self,
        source: &str,
        target: &str,
        database: &str,
        max_length: i64,
    ) -> Result<Option<Vec<Pathway>>> {
        Neo4jClient::shortest_paths(self, source, target, database, max_length).await
    }

    async fn homologs(
        &self,
        human_symbol: &str,
        dataset: Option<&str>,
    ) -> Result<HashMap<String, Vec<Homology>>> {
        Neo4jClient::homologs(self, human_symbol, dataset).await
    }

    async fn domains(
        &self,
        symbol: &str,
        database: &str,
    ) -> Result<Option<Vec<DomainAnnotation>>> {
        Neo4jClient::domains(self, symbol, database).await
    }

    async fn gene_ontology(&self, human_symbol: &str) -> Result<Vec<GoTerm>> {
        Neo4jClient::gene_ontology(self, human_symbol).await
    }
}
