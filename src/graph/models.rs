//! Entity and relationship model for the biological graph.
//!
//! The original system modelled graph nodes as a subclass hierarchy with
//! runtime type checks; here the variant set is closed in the [`Entity`]
//! sum type and matched explicitly wherever behavior differs (query
//! construction, JSON shaping, validation).
//!
//! Identity is `(symbol, database)` for nodes and
//! `(source, target, database)` for edges. The visualization-only
//! `important` marker does not participate in identity; it lives on the
//! assembly layer's node wrapper (see `graph::assembly`).

use crate::error::{AccessionKind, Error, Result};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::LazyLock;

/// Neo4j label of PFAM domain nodes.
pub const PFAM_DATABASE: &str = "Pfam";
/// Neo4j label of Gene Ontology nodes.
pub const GO_DATABASE: &str = "Go";

static PFAM_REGEX: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"^PF\d{5}").expect("pfam regex"));
static GO_REGEX: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"^GO:\d{7}").expect("go regex"));
static SMESGENE_REGEX: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"(?i)^SMESG\d+").expect("smesgene regex"));

/// Round to 3 decimal places; interaction scores are stored denormalized in
/// the graph and presented rounded.
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

// ============================================================================
// Identity
// ============================================================================

/// Node identity: `(symbol, database)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct NodeId {
    pub symbol: String,
    pub database: String,
}

/// Edge identity: `(source, target, database)` as constructed. The pair is
/// not order-normalized here; serialization sorts it for the stable edge id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct EdgeId {
    pub source: String,
    pub target: String,
    pub database: String,
}

// ============================================================================
// Node variants
// ============================================================================

/// A human gene, identified by its upper-cased HGNC symbol.
#[derive(Debug, Clone, Serialize)]
pub struct HumanGene {
    pub symbol: String,
    pub summary: Option<String>,
    pub summary_source: Option<String>,
}

impl HumanGene {
    pub fn new(symbol: impl AsRef<str>) -> Self {
        Self {
            symbol: symbol.as_ref().to_uppercase(),
            summary: None,
            summary_source: None,
        }
    }
}

/// A planarian transcript (contig) belonging to one transcriptome dataset.
///
/// `degree` doubles as the "has `get_neighbours` run" marker: `None` means
/// the neighbourhood was never fetched, `Some(0)` means it was fetched and
/// came back empty (in which case `neighbours` stays `None`).
#[derive(Debug, Clone, Serialize)]
pub struct PlanarianContig {
    pub symbol: String,
    pub database: String,
    pub sequence: Option<String>,
    pub orf: Option<String>,
    pub length: Option<i64>,
    /// Symbol of the annotated gene this contig is a transcript of.
    pub gene: Option<String>,
    /// Gene name from the annotation, when one exists.
    pub name: Option<String>,
    pub homolog: Option<Homology>,
    pub neighbours: Option<Vec<PredictedInteraction>>,
    pub degree: Option<u32>,
}

impl PlanarianContig {
    /// Validates the database label against the registry. Symbols starting
    /// with `_` are legacy short forms of Dresden identifiers.
    pub fn new(
        symbol: impl AsRef<str>,
        database: impl Into<String>,
        registry: &crate::datasets::DatasetRegistry,
    ) -> Result<Self> {
        let database = database.into();
        if !registry.is_allowed_contig_label(&database) {
            return Err(Error::InvalidSourceDatabase { database });
        }
        let mut symbol = symbol.as_ref().to_string();
        if symbol.starts_with('_') {
            symbol = format!("dd_Smed_v6{symbol}");
        }
        Ok(Self {
            symbol,
            database,
            sequence: None,
            orf: None,
            length: None,
            gene: None,
            name: None,
            homolog: None,
            neighbours: None,
            degree: None,
        })
    }

    /// Length of the ORF in amino acids, when the ORF is loaded.
    pub fn orf_length(&self) -> Option<usize> {
        self.orf.as_ref().map(|o| o.len())
    }

    /// Fetch and attach this contig's neighbourhood. A contig with no
    /// interactions keeps `neighbours` at `None` and gets `degree = Some(0)`,
    /// so "queried and empty" stays distinguishable from "never queried".
    pub async fn fetch_neighbours(&mut self, store: &dyn crate::neo4j::GraphStore) -> Result<()> {
        match store.neighbours(&self.symbol, &self.database).await? {
            Some(interactions) => {
                self.degree = Some(interactions.len() as u32);
                self.neighbours = Some(interactions);
            }
            None => {
                self.degree = Some(0);
                self.neighbours = None;
            }
        }
        Ok(())
    }
}

/// A planarian gene from the genome annotation (`SMESG...`), with genomic
/// coordinates and a back-reference to its best (representative) transcript.
#[derive(Debug, Clone, Serialize)]
pub struct PlanarianGene {
    pub symbol: String,
    pub name: Option<String>,
    pub chromosome: Option<String>,
    /// +1 forward, -1 reverse.
    pub strand: Option<i32>,
    pub start: Option<i64>,
    pub end: Option<i64>,
    pub sequence: Option<String>,
    pub homolog: Option<Homology>,
    /// Symbol of the representative transcript this gene's homology was
    /// derived from, when known.
    pub best_contig: Option<String>,
}

/// Padding added around a gene locus for genome-browser framing.
pub const GENE_WINDOW_PADDING: i64 = 5000;

impl PlanarianGene {
    pub fn new(symbol: impl AsRef<str>) -> Self {
        Self {
            symbol: symbol.as_ref().to_uppercase(),
            name: None,
            chromosome: None,
            strand: None,
            start: None,
            end: None,
            sequence: None,
            homolog: None,
            best_contig: None,
        }
    }

    /// Whether `symbol` follows the planarian gene naming convention.
    pub fn is_symbol_valid(symbol: &str) -> bool {
        SMESGENE_REGEX.is_match(symbol)
    }

    /// Locus coordinates padded on both sides for visualization.
    pub fn display_window(&self) -> Option<(i64, i64)> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Some((start - GENE_WINDOW_PADDING, end + GENE_WINDOW_PADDING)),
            _ => None,
        }
    }
}

/// A PFAM protein domain. The accession is validated at construction.
#[derive(Debug, Clone, Serialize)]
pub struct PfamDomain {
    pub accession: String,
    pub description: Option<String>,
    pub identifier: Option<String>,
    /// Model length of the domain in amino acids.
    pub mlength: Option<i64>,
}

impl PfamDomain {
    pub fn new(accession: impl Into<String>) -> Result<Self> {
        let accession = accession.into();
        if !PFAM_REGEX.is_match(&accession) {
            return Err(Error::InvalidAccessionFormat {
                kind: AccessionKind::Pfam,
                value: accession,
            });
        }
        Ok(Self {
            accession,
            description: None,
            identifier: None,
            mlength: None,
        })
    }

    pub fn is_symbol_valid(symbol: &str) -> bool {
        PFAM_REGEX.is_match(symbol)
    }

    /// Accessions without a version suffix (`PF00069` vs `PF00069.12`) are
    /// matched fuzzily in the graph.
    pub fn is_versioned(&self) -> bool {
        static VERSIONED: LazyLock<regex::Regex> =
            LazyLock::new(|| regex::Regex::new(r"^PF\d{5}\.\d+$").expect("versioned pfam regex"));
        VERSIONED.is_match(&self.accession)
    }
}

/// A Gene Ontology term. The accession is validated at construction.
#[derive(Debug, Clone, Serialize)]
pub struct GoTerm {
    pub accession: String,
    /// One of "molecular_function", "cellular_component",
    /// "biological_process".
    pub domain: Option<String>,
    pub name: Option<String>,
}

impl GoTerm {
    pub fn new(accession: impl Into<String>) -> Result<Self> {
        let accession = accession.into();
        if !GO_REGEX.is_match(&accession) {
            return Err(Error::InvalidAccessionFormat {
                kind: AccessionKind::GeneOntology,
                value: accession,
            });
        }
        Ok(Self {
            accession,
            domain: None,
            name: None,
        })
    }

    pub fn is_symbol_valid(symbol: &str) -> bool {
        GO_REGEX.is_match(symbol)
    }
}

// ============================================================================
// Entity: closed variant set
// ============================================================================

/// A typed, identified node in the biological graph.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Entity {
    Human(HumanGene),
    Contig(PlanarianContig),
    Gene(PlanarianGene),
    Domain(PfamDomain),
    Go(GoTerm),
}

impl Entity {
    pub fn symbol(&self) -> &str {
        match self {
            Self::Human(h) => &h.symbol,
            Self::Contig(c) => &c.symbol,
            Self::Gene(g) => &g.symbol,
            Self::Domain(d) => &d.accession,
            Self::Go(t) => &t.accession,
        }
    }

    /// The logical partition (Neo4j label) the entity lives in.
    pub fn database(&self) -> &str {
        match self {
            Self::Human(_) => crate::datasets::HUMAN_DATABASE,
            Self::Contig(c) => &c.database,
            Self::Gene(_) => crate::datasets::GENE_DATABASE,
            Self::Domain(_) => PFAM_DATABASE,
            Self::Go(_) => GO_DATABASE,
        }
    }

    pub fn node_id(&self) -> NodeId {
        NodeId {
            symbol: self.symbol().to_string(),
            database: self.database().to_string(),
        }
    }

    /// Human homolog symbol, for variants that can carry one.
    pub fn homolog_symbol(&self) -> Option<&str> {
        match self {
            Self::Contig(c) => c.homolog.as_ref().map(|h| h.human.symbol.as_str()),
            Self::Gene(g) => g.homolog.as_ref().map(|h| h.human.symbol.as_str()),
            _ => None,
        }
    }

    /// Cytoscape.js element for this node. `important` is the assembly
    /// layer's highlight marker and only affects presentation.
    pub fn to_element(&self, important: bool) -> Value {
        let mut data = json!({
            "id": self.symbol(),
            "name": self.display_name(),
            "database": self.database(),
            "colorNODE": "#404040",
        });
        match self {
            Self::Contig(c) => {
                if let Some(homolog) = &c.homolog {
                    data["homolog"] = json!(homolog.human.symbol);
                }
                if let Some(degree) = c.degree {
                    data["degree"] = json!(degree);
                }
            }
            Self::Gene(g) => {
                if let Some(homolog) = &g.homolog {
                    data["homolog"] = json!(homolog.human.symbol);
                }
            }
            _ => {}
        }
        let mut element = json!({ "data": data });
        if important {
            element["classes"] = json!("important");
        }
        element
    }

    /// Human-readable label; falls back to the symbol.
    pub fn display_name(&self) -> &str {
        match self {
            Self::Gene(g) => g.name.as_deref().unwrap_or(&g.symbol),
            Self::Domain(d) => d.identifier.as_deref().unwrap_or(&d.accession),
            Self::Go(t) => t.name.as_deref().unwrap_or(&t.accession),
            _ => self.symbol(),
        }
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.database(), self.symbol())
    }
}

// ============================================================================
// Relationships
// ============================================================================

/// Alignment-derived scores carried by a homology relationship.
#[derive(Debug, Clone, Default, Serialize)]
pub struct HomologyScores {
    pub blast_cov: Option<f64>,
    pub blast_eval: Option<f64>,
    pub blast_brh: Option<bool>,
    pub nog_eval: Option<f64>,
    pub nog_brh: Option<bool>,
    pub pfam_sc: Option<f64>,
    pub pfam_brh: Option<bool>,
}

/// Homology between a planarian entity and a human gene.
///
/// The planarian end is a non-owning back-reference by symbol; the human end
/// is owned. Neither side is the single owner of the relationship.
#[derive(Debug, Clone, Serialize)]
pub struct Homology {
    pub human: HumanGene,
    /// Symbol of the planarian contig this homology was called for.
    pub contig: Option<String>,
    pub scores: HomologyScores,
}

impl Homology {
    pub fn new(human: HumanGene, contig: Option<String>) -> Self {
        Self {
            human,
            contig,
            scores: HomologyScores::default(),
        }
    }

    pub fn with_scores(human: HumanGene, contig: Option<String>, scores: HomologyScores) -> Self {
        Self {
            human,
            contig,
            scores,
        }
    }
}

/// A PFAM domain annotated on an entity's sequence. Coordinates are
/// 1-indexed; `p_*` on the domain model, `s_*` on the sequence.
#[derive(Debug, Clone, Serialize)]
pub struct DomainAnnotation {
    pub domain: PfamDomain,
    pub p_start: i64,
    pub p_end: i64,
    pub s_start: i64,
    pub s_end: i64,
    /// Fraction of the domain model covered by the alignment, in %.
    pub perc: Option<f64>,
}

impl DomainAnnotation {
    pub fn to_element(&self) -> Value {
        json!({
            "accession": self.domain.accession,
            "description": self.domain.description,
            "identifier": self.domain.identifier,
            "mlength": self.domain.mlength,
            "p_start": self.p_start,
            "p_end": self.p_end,
            "s_start": self.s_start,
            "s_end": self.s_end,
            "perc": self.perc,
        })
    }
}

/// Numeric attributes of a predicted interaction edge.
#[derive(Debug, Clone, Serialize)]
pub struct InteractionParams {
    /// Interaction probability in [0, 1], rounded to 3 decimals.
    pub probability: f64,
    pub path_length: i64,
    pub cellcom_nto: Option<f64>,
    pub molfun_nto: Option<f64>,
    pub bioproc_nto: Option<f64>,
    pub dom_int_sc: Option<f64>,
}

impl InteractionParams {
    /// Round the probability and every topological-overlap score to three
    /// decimals; the graph stores them at full precision.
    pub fn rounded(self) -> Self {
        Self {
            probability: round3(self.probability),
            path_length: self.path_length,
            cellcom_nto: self.cellcom_nto.map(round3),
            molfun_nto: self.molfun_nto.map(round3),
            bioproc_nto: self.bioproc_nto.map(round3),
            dom_int_sc: self.dom_int_sc.map(round3),
        }
    }
}

/// Edge color for direct (1-hop) interactions.
const EDGE_COLOR_DIRECT: &str = "#72a555";
/// Edge color for multi-hop (inferred) interactions.
const EDGE_COLOR_INDIRECT: &str = "#CA6347";

/// A predicted protein interaction between a source symbol and a target
/// entity, both in the same dataset.
#[derive(Debug, Clone, Serialize)]
pub struct PredictedInteraction {
    pub source: String,
    pub target: Entity,
    pub database: String,
    pub params: Option<InteractionParams>,
}

impl PredictedInteraction {
    pub fn edge_id(&self) -> EdgeId {
        EdgeId {
            source: self.source.clone(),
            target: self.target.symbol().to_string(),
            database: self.database.clone(),
        }
    }

    pub fn probability(&self) -> Option<f64> {
        self.params.as_ref().map(|p| p.probability)
    }

    /// Cytoscape.js element. The edge id is the sorted symbol pair so the
    /// same undirected interaction always serializes to the same id.
    pub fn to_element(&self) -> Value {
        let mut pair = [self.source.as_str(), self.target.symbol()];
        pair.sort_unstable();
        let mut data = json!({
            "id": pair.join("-"),
            "source": self.source,
            "target": self.target.symbol(),
        });
        match &self.params {
            Some(params) => {
                data["pathlength"] = json!(params.path_length);
                data["probability"] = json!(params.probability);
                data["colorEDGE"] = if params.path_length == 1 {
                    json!(EDGE_COLOR_DIRECT)
                } else {
                    json!(EDGE_COLOR_INDIRECT)
                };
            }
            None => {
                data["colorEDGE"] = json!(EDGE_COLOR_INDIRECT);
            }
        }
        json!({ "data": data })
    }
}
