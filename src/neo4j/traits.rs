//! GraphStore trait definition
//!
//! Defines the abstract interface for all Neo4j graph operations.
//! This trait mirrors all public async methods of `Neo4jClient`,
//! enabling testing with mock implementations and future backend swaps.

use crate::error::Result;
use crate::graph::models::{
    DomainAnnotation, GoTerm, Homology, HumanGene, PfamDomain, PlanarianContig, PlanarianGene,
    PredictedInteraction,
};
use crate::graph::pathway::Pathway;
use async_trait::async_trait;
use std::collections::HashMap;

/// Abstract interface for all graph database operations.
///
/// Every public async method of `Neo4jClient` (excluding `connect` and
/// private helpers) is represented here. Single-node lookups fail with
/// `Error::NodeNotFound`; collection lookups return an empty vector for
/// a symbol with no matches.
#[async_trait]
pub trait GraphStore: Send + Sync {
    // ========================================================================
    // Contig operations
    // ========================================================================

    /// Get one contig by symbol from a dataset, homology attached when present
    async fn contig(&self, symbol: &str, dataset: &str) -> Result<PlanarianContig>;

    /// Fetch many contigs from one dataset in a single round trip.
    ///
    /// Symbols with no matching node are silently absent from the result.
    async fn contigs_bulk(&self, symbols: &[String], dataset: &str)
        -> Result<Vec<PlanarianContig>>;

    /// Contigs associated with a planarian gene, in one dataset or all of them
    async fn contigs_for_gene(
        &self,
        gene_symbol: &str,
        dataset: Option<&str>,
    ) -> Result<Vec<PlanarianContig>>;

    /// Contigs in a dataset whose protein carries a Pfam domain.
    ///
    /// A versioned accession (PF00001.21) matches exactly; an unversioned one
    /// matches any version.
    async fn contigs_for_domain(
        &self,
        domain: &PfamDomain,
        dataset: &str,
    ) -> Result<Vec<PlanarianContig>>;

    /// Contigs in a dataset homologous to a human gene annotated with a GO term
    async fn contigs_for_go(&self, accession: &str, dataset: &str)
        -> Result<Vec<PlanarianContig>>;

    /// Contigs in a dataset homologous to a human gene symbol
    async fn contigs_for_human(
        &self,
        human_symbol: &str,
        dataset: &str,
    ) -> Result<Vec<PlanarianContig>>;

    // ========================================================================
    // Gene operations
    // ========================================================================

    /// Get one planarian gene by symbol
    async fn planarian_gene(&self, symbol: &str) -> Result<PlanarianGene>;

    /// Planarian genes carrying a Pfam domain on any of their contigs
    async fn genes_for_domain(&self, domain: &PfamDomain) -> Result<Vec<PlanarianGene>>;

    /// Planarian genes homologous to a human gene symbol
    async fn genes_for_human(
        &self,
        human_symbol: &str,
        dataset: &str,
    ) -> Result<Vec<PlanarianGene>>;

    /// Planarian genes by assigned gene name (exact, case-insensitive)
    async fn genes_by_name(&self, name: &str) -> Result<Vec<PlanarianGene>>;

    /// Planarian genes whose name matches a wildcard-derived regex pattern
    async fn gene_wildcard(&self, pattern: &str) -> Result<Vec<PlanarianGene>>;

    // ========================================================================
    // Human gene operations
    // ========================================================================

    /// Get one human gene by symbol
    async fn human_gene(&self, symbol: &str) -> Result<HumanGene>;

    /// Human genes whose symbol matches a wildcard-derived regex pattern
    async fn human_wildcard(&self, pattern: &str) -> Result<Vec<HumanGene>>;

    /// Human genes annotated with a GO accession
    async fn humans_for_go(&self, accession: &str) -> Result<Vec<HumanGene>>;

    /// Free-text functional summary for a human gene, if any is recorded
    async fn human_summary(&self, symbol: &str) -> Result<Option<String>>;

    // ========================================================================
    // Interaction operations
    // ========================================================================

    /// Predicted interactions of one contig, sorted by descending probability.
    ///
    /// `Ok(None)` means the contig exists but has no interactions.
    async fn neighbours(
        &self,
        symbol: &str,
        database: &str,
    ) -> Result<Option<Vec<PredictedInteraction>>>;

    /// Lighter neighbourhood lookup for graph expansion: targets carry only
    /// their symbol and degree, homology lookups are skipped.
    async fn neighbours_shallow(
        &self,
        symbol: &str,
        database: &str,
    ) -> Result<Option<Vec<PredictedInteraction>>>;

    /// All interactions among a set of symbols, each pair reported once
    async fn connections(&self, symbols: &[String]) -> Result<Vec<PredictedInteraction>>;

    /// All shortest interaction paths between two contigs up to `max_length`
    /// hops. `Ok(None)` means the endpoints are not connected.
    async fn shortest_paths(
        &self,
        source: &str,
        target: &str,
        database: &str,
        max_length: i64,
    ) -> Result<Option<Vec<Pathway>>>;

    // ========================================================================
    // Annotation operations
    // ========================================================================

    /// Homologous contigs of a human gene, partitioned by dataset.
    ///
    /// With `dataset == None` every registered dataset appears as a key,
    /// empty datasets included.
    async fn homologs(
        &self,
        human_symbol: &str,
        dataset: Option<&str>,
    ) -> Result<HashMap<String, Vec<Homology>>>;

    /// Domain annotations of a contig's protein, sorted by sequence start.
    ///
    /// `Ok(None)` means the contig has no annotated domains.
    async fn domains(
        &self,
        symbol: &str,
        database: &str,
    ) -> Result<Option<Vec<DomainAnnotation>>>;

    /// GO terms annotated on a human gene
    async fn gene_ontology(&self, human_symbol: &str) -> Result<Vec<GoTerm>>;
}
