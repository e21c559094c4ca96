//! Downloadable exports: FASTA for sequences and ORFs, CSV for homology,
//! domain, GO, and interaction tables. Missing values are written as "NA".

use crate::datasets::DatasetRegistry;
use crate::error::{Error, Result};
use crate::graph::models::PlanarianContig;
use crate::graph::resolver;
use crate::neo4j::GraphStore;
use std::collections::HashMap;
use std::fmt;

const MISSING: &str = "NA";
const FASTA_WIDTH: usize = 64;

/// What an export request asks for; maps one to one to the exported columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Contig,
    Orf,
    Homology,
    Pfam,
    Go,
    Interactions,
}

impl ExportKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "contig" => Some(Self::Contig),
            "orf" => Some(Self::Orf),
            "homology" => Some(Self::Homology),
            "pfam" => Some(Self::Pfam),
            "go" => Some(Self::Go),
            "interactions" => Some(Self::Interactions),
            _ => None,
        }
    }

    pub fn filename(&self) -> &'static str {
        match self {
            Self::Contig | Self::Orf => "fasta.fa",
            Self::Homology => "homologs.csv",
            Self::Pfam => "domains.csv",
            Self::Interactions => "interactions.csv",
            Self::Go => "gene_ontologies.csv",
        }
    }

    fn header(&self) -> Option<&'static str> {
        match self {
            Self::Homology => {
                Some("NAME,GENE,HUMAN,BLAST_EVALUE,BLAST_COVERAGE,EGGNOG_EVALUE,META_ALIGNMENT_SCORE")
            }
            _ => None,
        }
    }

    fn is_fasta(&self) -> bool {
        matches!(self, Self::Contig | Self::Orf)
    }
}

impl fmt::Display for ExportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Contig => "contig",
            Self::Orf => "orf",
            Self::Homology => "homology",
            Self::Pfam => "pfam",
            Self::Go => "go",
            Self::Interactions => "interactions",
        };
        f.write_str(name)
    }
}

/// A rendered export: filename plus its full text content.
#[derive(Debug, Clone)]
pub struct ExportFile {
    pub filename: String,
    pub content: String,
}

/// Build an export for a list of identifiers. Identifiers that resolve to
/// nothing are skipped so one bad row never sinks the whole file.
pub async fn download_data(
    store: &dyn GraphStore,
    registry: &DatasetRegistry,
    identifiers: &[String],
    database: &str,
    kind: ExportKind,
) -> Result<ExportFile> {
    let mut rows: Vec<Vec<String>> = Vec::new();

    let mut resolved: Vec<PlanarianContig> = Vec::new();
    for identifier in identifiers {
        match resolver::resolve_to_contigs(store, registry, identifier, database).await {
            Ok(contigs) => resolved.extend(contigs),
            Err(Error::NodeNotFound { .. }) | Err(Error::InvalidAccessionFormat { .. }) => {
                continue;
            }
            Err(err) => return Err(err),
        }
    }

    // One round trip per dataset for the full records instead of one per
    // contig; a symbol the bulk lookup misses keeps its resolved shell.
    let mut by_database: HashMap<String, Vec<String>> = HashMap::new();
    for contig in &resolved {
        let symbols = by_database.entry(contig.database.clone()).or_default();
        if !symbols.contains(&contig.symbol) {
            symbols.push(contig.symbol.clone());
        }
    }
    let mut full: HashMap<(String, String), PlanarianContig> = HashMap::new();
    for (dataset, symbols) in &by_database {
        for contig in store.contigs_bulk(symbols, dataset).await? {
            full.insert((contig.database.clone(), contig.symbol.clone()), contig);
        }
    }

    for contig in resolved {
        let contig = full
            .get(&(contig.database.clone(), contig.symbol.clone()))
            .cloned()
            .unwrap_or(contig);
        let gene = contig.gene.clone().unwrap_or_else(|| MISSING.to_string());

        match kind {
            ExportKind::Contig => {
                rows.push(vec![
                    contig.symbol.clone(),
                    contig.sequence.clone().unwrap_or_default(),
                    contig.database.clone(),
                    gene,
                ]);
            }
            ExportKind::Orf => {
                rows.push(vec![
                    contig.symbol.clone(),
                    contig.orf.clone().unwrap_or_default(),
                    contig.database.clone(),
                    gene,
                ]);
            }
            ExportKind::Homology => {
                let row = match &contig.homolog {
                    Some(homology) => vec![
                        contig.symbol.clone(),
                        gene,
                        homology.human.symbol.clone(),
                        float_or_na(homology.scores.blast_eval),
                        float_or_na(homology.scores.blast_cov),
                        float_or_na(homology.scores.nog_eval),
                        float_or_na(homology.scores.pfam_sc),
                    ],
                    None => vec![
                        contig.symbol.clone(),
                        gene,
                        MISSING.to_string(),
                        MISSING.to_string(),
                        MISSING.to_string(),
                        MISSING.to_string(),
                        MISSING.to_string(),
                    ],
                };
                rows.push(row);
            }
            ExportKind::Pfam => {
                let domains = store.domains(&contig.symbol, &contig.database).await?;
                let joined = domains
                    .filter(|d| !d.is_empty())
                    .map(|d| {
                        d.iter()
                            .map(|a| {
                                format!("{}:{}-{}", a.domain.accession, a.s_start, a.s_end)
                            })
                            .collect::<Vec<_>>()
                            .join(";")
                    })
                    .unwrap_or_else(|| MISSING.to_string());
                rows.push(vec![contig.symbol.clone(), gene, joined]);
            }
            ExportKind::Go => {
                let terms = match &contig.homolog {
                    Some(homology) => {
                        store.gene_ontology(&homology.human.symbol).await?
                    }
                    None => Vec::new(),
                };
                let joined = if terms.is_empty() {
                    MISSING.to_string()
                } else {
                    terms
                        .iter()
                        .map(|t| {
                            format!(
                                "{}={}={}",
                                t.accession,
                                t.domain.as_deref().unwrap_or(MISSING),
                                t.name.as_deref().unwrap_or(MISSING)
                            )
                        })
                        .collect::<Vec<_>>()
                        .join(";")
                };
                rows.push(vec![contig.symbol.clone(), gene, joined]);
            }
            ExportKind::Interactions => {
                match store.neighbours(&contig.symbol, &contig.database).await? {
                    Some(neighbours) => {
                        for interaction in neighbours {
                            let target_gene = interaction
                                .target
                                .homolog_symbol()
                                .map(str::to_string)
                                .unwrap_or_else(|| MISSING.to_string());
                            rows.push(vec![
                                contig.symbol.clone(),
                                gene.clone(),
                                interaction.target.symbol().to_string(),
                                target_gene,
                                float_or_na(interaction.probability()),
                            ]);
                        }
                    }
                    None => {
                        rows.push(vec![
                            contig.symbol.clone(),
                            gene,
                            MISSING.to_string(),
                            MISSING.to_string(),
                            MISSING.to_string(),
                        ]);
                    }
                }
            }
        }
    }

    Ok(ExportFile {
        filename: kind.filename().to_string(),
        content: render(kind, &rows),
    })
}

fn render(kind: ExportKind, rows: &[Vec<String>]) -> String {
    let mut out = String::new();
    if let Some(header) = kind.header() {
        out.push_str(header);
        out.push('\n');
    }
    for row in rows {
        if kind.is_fasta() {
            // >symbol|database|gene followed by the sequence wrapped at 64.
            out.push_str(&format!(">{}|{}|{}\n", row[0], row[2], row[3]));
            let sequence = row[1].as_bytes();
            for chunk in sequence.chunks(FASTA_WIDTH) {
                out.push_str(&String::from_utf8_lossy(chunk));
                out.push('\n');
            }
        } else {
            out.push_str(&row.join(","));
            out.push('\n');
        }
    }
    out
}

fn float_or_na(value: Option<f64>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| MISSING.to_string())
}
