//! Symbol resolution: classify a raw search string into an entity variant
//! and, with the query layer, turn it into typed seed entities.
//!
//! Classification is pure and never fails: anything that matches no known
//! pattern falls through to the human gene variant. The async `resolve_*`
//! helpers combine classification with graph lookups.

use crate::datasets::{DatasetRegistry, GENE_DATABASE, HUMAN_DATABASE, PREFERRED_DATASET};
use crate::error::Result;
use crate::graph::models::{
    Entity, GoTerm, HumanGene, PfamDomain, PlanarianContig, PlanarianGene,
};
use crate::neo4j::GraphStore;

/// Inferred variant (and source database) for a search term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolKind {
    /// The term follows a registered dataset's identifier convention.
    Contig { dataset: String },
    /// Planarian gene (`SMESG...`).
    Gene,
    /// PFAM domain accession.
    Domain,
    /// Gene Ontology accession.
    GoTerm,
    /// Fallback: anything else is treated as a human gene symbol.
    Human,
}

/// Classify `term` in fixed priority order: dataset identifier conventions
/// first, then planarian gene, PFAM, GO, and finally the human fallback.
pub fn classify(term: &str, registry: &DatasetRegistry) -> SymbolKind {
    if let Some(dataset) = registry.classify(term) {
        return SymbolKind::Contig {
            dataset: dataset.name.clone(),
        };
    }
    if PlanarianGene::is_symbol_valid(term) {
        SymbolKind::Gene
    } else if PfamDomain::is_symbol_valid(term) {
        SymbolKind::Domain
    } else if GoTerm::is_symbol_valid(term) {
        SymbolKind::GoTerm
    } else {
        SymbolKind::Human
    }
}

/// Strip characters that routinely leak in from URLs and form submissions.
/// `%7C` appears when pipe-containing identifiers get double-encoded by
/// templating layers.
pub fn sanitize(term: &str) -> String {
    term.replace(' ', "")
        .replace('\'', "")
        .replace('"', "")
        .replace("%7C", "|")
}

/// Whether the term is a wildcard search.
pub fn is_wildcard(term: &str) -> bool {
    term.contains('*')
}

/// Translate a `*` wildcard term into the regex dialect the graph store
/// matches with. The term is upper-cased since symbol and name properties
/// are stored upper-case.
pub fn wildcard_to_pattern(term: &str) -> String {
    term.to_uppercase().replace('*', ".*")
}

/// Resolve a search term into planarian contigs of `dataset`, whatever the
/// term refers to (contig, gene, domain, GO term or human gene).
pub async fn resolve_to_contigs(
    store: &dyn GraphStore,
    registry: &DatasetRegistry,
    term: &str,
    dataset: &str,
) -> Result<Vec<PlanarianContig>> {
    let term = sanitize(term);
    match classify(&term, registry) {
        SymbolKind::Contig { dataset: own } => {
            // The term already names a contig; fetch it from its own dataset.
            Ok(vec![store.contig(&term, &own).await?])
        }
        SymbolKind::Gene => store.contigs_for_gene(&term.to_uppercase(), Some(dataset)).await,
        SymbolKind::Domain => {
            let domain = PfamDomain::new(term)?;
            store.contigs_for_domain(&domain, dataset).await
        }
        SymbolKind::GoTerm => {
            let go = GoTerm::new(term)?;
            store.contigs_for_go(&go.accession, dataset).await
        }
        SymbolKind::Human => {
            let mut contigs = Vec::new();
            if is_wildcard(&term) {
                for human in store.human_wildcard(&wildcard_to_pattern(&term)).await? {
                    contigs.extend(store.contigs_for_human(&human.symbol, dataset).await?);
                }
            } else {
                contigs = store
                    .contigs_for_human(&term.to_uppercase(), dataset)
                    .await?;
            }
            Ok(contigs)
        }
    }
}

/// Resolve a search term into planarian genes.
pub async fn resolve_to_genes(
    store: &dyn GraphStore,
    registry: &DatasetRegistry,
    term: &str,
) -> Result<Vec<PlanarianGene>> {
    let term = sanitize(term);
    match classify(&term, registry) {
        SymbolKind::Gene => Ok(vec![store.planarian_gene(&term.to_uppercase()).await?]),
        SymbolKind::Contig { dataset } => {
            let contig = store.contig(&term, &dataset).await?;
            match contig.gene {
                Some(gene_symbol) => Ok(vec![store.planarian_gene(&gene_symbol).await?]),
                None => Ok(Vec::new()),
            }
        }
        SymbolKind::Domain => {
            let domain = PfamDomain::new(term)?;
            store.genes_for_domain(&domain).await
        }
        SymbolKind::GoTerm => {
            let go = GoTerm::new(term)?;
            let contigs = store.contigs_for_go(&go.accession, PREFERRED_DATASET).await?;
            genes_of_contigs(store, &contigs).await
        }
        SymbolKind::Human => {
            let mut genes = Vec::new();
            if is_wildcard(&term) {
                for gene in store.gene_wildcard(&wildcard_to_pattern(&term)).await? {
                    genes.push(gene);
                }
            } else {
                genes = store
                    .genes_for_human(&term.to_uppercase(), PREFERRED_DATASET)
                    .await?;
                // A human symbol may also be a planarian gene name (e.g. WNT1).
                genes.extend(store.genes_by_name(&term.to_uppercase()).await?);
            }
            Ok(genes)
        }
    }
}

/// Resolve a search term into human genes.
pub async fn resolve_to_humans(store: &dyn GraphStore, term: &str) -> Result<Vec<HumanGene>> {
    let term = sanitize(term);
    if is_wildcard(&term) {
        store.human_wildcard(&wildcard_to_pattern(&term)).await
    } else if GoTerm::is_symbol_valid(&term) {
        store.humans_for_go(&term).await
    } else {
        Ok(vec![store.human_gene(&term.to_uppercase()).await?])
    }
}

/// Resolve a search term against every partition: the matching planarian
/// genes plus contigs from either the term's own dataset or all of them.
/// Per-dataset misses are skipped; partial success is the norm.
pub async fn quick_search(
    store: &dyn GraphStore,
    registry: &DatasetRegistry,
    term: &str,
) -> Result<Vec<Entity>> {
    let term = sanitize(term);
    let mut results: Vec<Entity> = Vec::new();

    match resolve_to_genes(store, registry, &term).await {
        Ok(genes) => results.extend(genes.into_iter().map(Entity::Gene)),
        Err(err) if err_is_not_found(&err) => {}
        Err(err) => return Err(err),
    }

    match classify(&term, registry) {
        SymbolKind::Contig { dataset } => {
            if let Ok(contig) = store.contig(&term, &dataset).await {
                results.push(Entity::Contig(contig));
            }
        }
        _ => {
            for dataset in registry.names() {
                match resolve_to_contigs(store, registry, &term, dataset).await {
                    Ok(contigs) => results.extend(contigs.into_iter().map(Entity::Contig)),
                    Err(err) if err_is_not_found(&err) => continue,
                    Err(err) => return Err(err),
                }
            }
        }
    }
    Ok(results)
}

/// Resolve a search term within one named partition, for callers that carry
/// a database hint ("Human", "Smesgene", "ALL", or a dataset name).
pub async fn resolve_in_database(
    store: &dyn GraphStore,
    registry: &DatasetRegistry,
    term: &str,
    database: &str,
) -> Result<Vec<Entity>> {
    match database {
        HUMAN_DATABASE => Ok(resolve_to_humans(store, term)
            .await?
            .into_iter()
            .map(Entity::Human)
            .collect()),
        GENE_DATABASE => Ok(resolve_to_genes(store, registry, term)
            .await?
            .into_iter()
            .map(Entity::Gene)
            .collect()),
        "ALL" => quick_search(store, registry, term).await,
        dataset => Ok(resolve_to_contigs(store, registry, term, dataset)
            .await?
            .into_iter()
            .map(Entity::Contig)
            .collect()),
    }
}

async fn genes_of_contigs(
    store: &dyn GraphStore,
    contigs: &[PlanarianContig],
) -> Result<Vec<PlanarianGene>> {
    let mut genes = Vec::new();
    for contig in contigs {
        if let Some(gene_symbol) = &contig.gene {
            match store.planarian_gene(gene_symbol).await {
                Ok(gene) => genes.push(gene),
                Err(err) if err_is_not_found(&err) => continue,
                Err(err) => return Err(err),
            }
        }
    }
    Ok(genes)
}

fn err_is_not_found(err: &crate::error::Error) -> bool {
    matches!(err, crate::error::Error::NodeNotFound { .. })
}
