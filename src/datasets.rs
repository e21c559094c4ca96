//! Dataset registry: the source databases (transcriptome datasets) contigs
//! can belong to, each with its identifier naming convention.
//!
//! The registry is built once at startup from the built-in defaults plus any
//! entries in the YAML config, and is read-only afterwards. It is the single
//! injection barrier for Cypher label interpolation: only names present here
//! are ever formatted into query text.

use crate::error::{Error, Result};
use regex::Regex;
use serde::Deserialize;

/// Label of the human gene partition.
pub const HUMAN_DATABASE: &str = "Human";

/// Label of the planarian gene annotation partition.
pub const GENE_DATABASE: &str = "Smesgene";

/// Dataset used to pick a gene's representative (best) transcript.
pub const PREFERRED_DATASET: &str = "Smest";

/// A transcriptome dataset contigs can belong to.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub name: String,
    /// Anchored regex for symbols of this dataset.
    pub identifier_regex: Regex,
    pub year: u16,
    pub citation_url: Option<String>,
}

impl Dataset {
    /// Whether `symbol` follows this dataset's naming convention.
    pub fn is_symbol_valid(&self, symbol: &str) -> bool {
        self.identifier_regex.is_match(symbol)
    }
}

/// A registry entry as it appears in the YAML config.
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetConfig {
    pub name: String,
    pub identifier_regex: String,
    #[serde(default)]
    pub year: u16,
    #[serde(default)]
    pub citation_url: Option<String>,
}

/// Immutable set of known datasets plus extra contig labels that are valid
/// partitions but carry no identifier convention of their own.
#[derive(Debug, Clone)]
pub struct DatasetRegistry {
    datasets: Vec<Dataset>,
    extra_contig_labels: Vec<String>,
}

/// Default deployment: name, anchored identifier regex, year.
const BUILTIN: &[(&str, &str, u16)] = &[
    ("Dresden", r"^dd_Smed_v6_\d+_\d+_\d+$", 2016),
    ("Consolidated", r"^OX_Smed_v\d+_\d+_\d+$", 2018),
    ("Smest", r"^SMEST\d+(\.\d+)*$", 2019),
    ("Graveley", r"^gra_asm_\d+(\.\d+)?$", 2011),
    ("Illuminaplus", r"^ip_Smed_\d+$", 2015),
    ("Smed454", r"^Smed454_\d+$", 2010),
    ("Smedgd", r"^mk4\.\d+(\.\d+)*$", 2008),
    ("Adamidi", r"^adam_contig_\d+$", 2011),
    ("Blythe", r"^blythe_\d+$", 2010),
    ("Pearson", r"^pearson_contig_\d+$", 2009),
    ("Gbrna", r"^gb_[A-Z]{1,2}\d+(\.\d+)?$", 2012),
];

impl DatasetRegistry {
    /// Registry with the built-in dataset set only.
    pub fn builtin() -> Self {
        Self::with_entries(&[]).expect("built-in dataset regexes are valid")
    }

    /// Registry with the built-in set plus `extra` config entries. An entry
    /// whose name matches a built-in dataset replaces it.
    pub fn with_entries(extra: &[DatasetConfig]) -> Result<Self> {
        let mut datasets = Vec::with_capacity(BUILTIN.len() + extra.len());
        for (name, pattern, year) in BUILTIN {
            if extra.iter().any(|e| e.name == *name) {
                continue;
            }
            datasets.push(Dataset {
                name: (*name).to_string(),
                identifier_regex: Regex::new(pattern).expect("built-in regex"),
                year: *year,
                citation_url: None,
            });
        }
        for entry in extra {
            let identifier_regex =
                Regex::new(&entry.identifier_regex).map_err(|source| Error::DatasetRegex {
                    dataset: entry.name.clone(),
                    source,
                })?;
            datasets.push(Dataset {
                name: entry.name.clone(),
                identifier_regex,
                year: entry.year,
                citation_url: entry.citation_url.clone(),
            });
        }
        Ok(Self {
            datasets,
            // Cthulhu carries no public identifier convention but is a valid
            // contig partition in the graph.
            extra_contig_labels: vec!["Cthulhu".to_string()],
        })
    }

    /// First dataset whose identifier convention matches `symbol`, in
    /// registry order.
    pub fn classify(&self, symbol: &str) -> Option<&Dataset> {
        self.datasets.iter().find(|d| d.is_symbol_valid(symbol))
    }

    /// Look a dataset up by name (case-sensitive; labels are canonical).
    pub fn get(&self, name: &str) -> Option<&Dataset> {
        self.datasets.iter().find(|d| d.name == name)
    }

    /// Whether `label` is an acceptable source database for a contig.
    pub fn is_allowed_contig_label(&self, label: &str) -> bool {
        self.get(label).is_some() || self.extra_contig_labels.iter().any(|l| l == label)
    }

    /// Dataset names in registry order. This is the iteration set for
    /// `get_homologs(.., None)` partitioning.
    pub fn names(&self) -> Vec<&str> {
        self.datasets.iter().map(|d| d.name.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Dataset> {
        self.datasets.iter()
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }
}

impl Default for DatasetRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
