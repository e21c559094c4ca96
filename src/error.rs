//! Error taxonomy for the network explorer core.
//!
//! Absence of a path is not an error: `get_shortest_paths` returns
//! `Option::None` and callers check for it. Everything else that can go
//! wrong during resolution, validation or traversal is a variant here.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Which accession format failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessionKind {
    Pfam,
    GeneOntology,
}

impl std::fmt::Display for AccessionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pfam => write!(f, "PFAM (PF\\d{{5}})"),
            Self::GeneOntology => write!(f, "Gene Ontology (GO:\\d{{7}})"),
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    /// An entity was constructed with a database label outside its
    /// variant's allow-list.
    #[error("'{database}' is not a valid source database")]
    InvalidSourceDatabase { database: String },

    /// A lookup that requires existence returned zero rows.
    #[error("symbol '{symbol}' not found in database '{database}'")]
    NodeNotFound { symbol: String, database: String },

    /// A PFAM or GO accession failed its format check at construction.
    #[error("'{value}' is not a valid {kind} accession")]
    InvalidAccessionFormat { kind: AccessionKind, value: String },

    /// An element of unsupported kind was handed to graph assembly at the
    /// API boundary (in-process the element enum is closed).
    #[error("cannot add element of kind '{kind}' to a visualization graph")]
    WrongGraphElement { kind: String },

    /// Transport-level failure from the graph store. Not retried; surfaces
    /// at the request boundary.
    #[error("graph store error: {0}")]
    Store(#[from] neo4rs::Error),

    /// A result row did not have the expected shape.
    #[error("malformed row from graph store: {0}")]
    Row(#[from] neo4rs::DeError),

    /// Configuration file could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_yaml::Error),

    /// A dataset registry entry carries an unparseable identifier regex.
    #[error("invalid identifier regex for dataset '{dataset}': {source}")]
    DatasetRegex {
        dataset: String,
        source: regex::Error,
    },
}

impl Error {
    /// Shorthand used throughout the query layer.
    pub fn not_found(symbol: impl Into<String>, database: impl Into<String>) -> Self {
        Self::NodeNotFound {
            symbol: symbol.into(),
            database: database.into(),
        }
    }
}
