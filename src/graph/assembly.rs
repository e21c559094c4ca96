//! Graph assembly: accumulate entities and interactions from multiple
//! queries into one deduplicated visualization graph.
//!
//! Nodes and edges are kept in insertion order with identity sets guarding
//! against duplicates, so serialization is deterministic while the dedup
//! invariants (no duplicate `(symbol, database)` node, no duplicate
//! `(source, target, database)` edge) hold. The `important` highlight
//! marker lives on the node wrapper, not on entity identity.

use crate::datasets::{DatasetRegistry, GENE_DATABASE, HUMAN_DATABASE};
use crate::error::{Error, Result};
use crate::graph::models::{
    EdgeId, Entity, GoTerm, HumanGene, InteractionParams, NodeId, PfamDomain, PlanarianContig,
    PlanarianGene, PredictedInteraction,
};
use crate::graph::resolver;
use crate::neo4j::GraphStore;
use serde_json::{json, Value};
use std::collections::HashSet;

/// An element routed into the node or edge set of a graph.
#[derive(Debug, Clone)]
pub enum GraphElement {
    Node(Entity),
    Edge(PredictedInteraction),
}

impl From<Entity> for GraphElement {
    fn from(entity: Entity) -> Self {
        Self::Node(entity)
    }
}

impl From<PredictedInteraction> for GraphElement {
    fn from(interaction: PredictedInteraction) -> Self {
        Self::Edge(interaction)
    }
}

/// A node as it appears in a visualization graph: the entity plus its
/// presentation-only highlight marker.
#[derive(Debug, Clone)]
pub struct VizNode {
    pub entity: Entity,
    pub important: bool,
}

/// The assembled, deduplicated node/edge structure handed to the rendering
/// layer. Created empty per request, populated by expansion operations,
/// optionally filtered, then serialized.
#[derive(Debug, Clone, Default)]
pub struct VisualizationGraph {
    nodes: Vec<VizNode>,
    edges: Vec<PredictedInteraction>,
    node_ids: HashSet<NodeId>,
    edge_ids: HashSet<EdgeId>,
}

impl VisualizationGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node unless an entity with the same identity is present.
    pub fn add_node(&mut self, entity: Entity) {
        if self.node_ids.insert(entity.node_id()) {
            self.nodes.push(VizNode {
                entity,
                important: false,
            });
        }
    }

    /// Add an edge unless an interaction with the same identity is present.
    pub fn add_edge(&mut self, interaction: PredictedInteraction) {
        if self.edge_ids.insert(interaction.edge_id()) {
            self.edges.push(interaction);
        }
    }

    /// Route a mixed sequence of entities and interactions into the graph.
    pub fn add_elements(&mut self, elements: impl IntoIterator<Item = GraphElement>) {
        for element in elements {
            match element {
                GraphElement::Node(entity) => self.add_node(entity),
                GraphElement::Edge(interaction) => self.add_edge(interaction),
            }
        }
    }

    /// Merge another graph into this one, keeping dedup invariants.
    pub fn add_graph(&mut self, other: VisualizationGraph) {
        for node in other.nodes {
            if self.node_ids.insert(node.entity.node_id()) {
                self.nodes.push(node);
            }
        }
        for edge in other.edges {
            self.add_edge(edge);
        }
    }

    /// Rebuild a cytoscape.js element posted back by the front end (e.g.
    /// for export of the currently displayed graph). The element's `group`
    /// decides the routing; anything else is a `WrongGraphElement`.
    pub fn add_serialized_element(
        &mut self,
        element: &Value,
        registry: &DatasetRegistry,
    ) -> Result<()> {
        let group = element
            .get("group")
            .and_then(Value::as_str)
            .unwrap_or("unknown");
        let data = element.get("data").cloned().unwrap_or_else(|| json!({}));
        match group {
            "nodes" => {
                let symbol = data.get("id").and_then(Value::as_str).unwrap_or_default();
                let database = data
                    .get("database")
                    .and_then(Value::as_str)
                    .unwrap_or(HUMAN_DATABASE);
                self.add_node(entity_from_parts(symbol, database, registry)?);
                Ok(())
            }
            "edges" => {
                let source = data
                    .get("source")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string();
                let target = data.get("target").and_then(Value::as_str).unwrap_or_default();
                let database = data
                    .get("database")
                    .and_then(Value::as_str)
                    .unwrap_or(HUMAN_DATABASE)
                    .to_string();
                let params = data.get("probability").and_then(Value::as_f64).map(|p| {
                    InteractionParams {
                        probability: p,
                        path_length: data
                            .get("pathlength")
                            .and_then(Value::as_i64)
                            .unwrap_or(1),
                        cellcom_nto: None,
                        molfun_nto: None,
                        bioproc_nto: None,
                        dom_int_sc: None,
                    }
                });
                self.add_edge(PredictedInteraction {
                    source,
                    target: entity_from_parts(target, &database, registry)?,
                    database,
                    params,
                });
                Ok(())
            }
            other => Err(Error::WrongGraphElement {
                kind: other.to_string(),
            }),
        }
    }

    /// Retain only nodes whose symbol is allowed, and only edges with both
    /// endpoints allowed. Idempotent.
    pub fn filter(&mut self, allowed: &HashSet<String>) {
        self.nodes.retain(|n| allowed.contains(n.entity.symbol()));
        self.edges
            .retain(|e| allowed.contains(&e.source) && allowed.contains(e.target.symbol()));
        self.node_ids = self.nodes.iter().map(|n| n.entity.node_id()).collect();
        self.edge_ids = self.edges.iter().map(|e| e.edge_id()).collect();
    }

    /// Mark all contained nodes whose symbol is listed as important; used to
    /// highlight seed/query nodes versus expansion nodes.
    pub fn define_important(&mut self, symbols: &HashSet<String>) {
        for node in &mut self.nodes {
            if symbols.contains(node.entity.symbol()) {
                node.important = true;
            }
        }
    }

    /// Resolve raw symbols through the symbol resolver and add every entity
    /// they produce. A symbol that resolves to nothing is skipped; callers
    /// get partial success, never a per-symbol failure.
    pub async fn new_nodes(
        &mut self,
        store: &dyn GraphStore,
        registry: &DatasetRegistry,
        symbols: &[String],
        database: &str,
    ) -> Result<()> {
        for raw in symbols {
            let term = resolver::sanitize(raw);
            if term.is_empty() {
                continue;
            }
            match resolver::resolve_in_database(store, registry, &term, database).await {
                Ok(entities) => {
                    self.add_elements(entities.into_iter().map(GraphElement::Node));
                }
                Err(Error::NodeNotFound { symbol, database }) => {
                    tracing::debug!("node not found, skipping: {} - {}", symbol, database);
                    continue;
                }
                Err(Error::InvalidAccessionFormat { value, .. }) => {
                    tracing::debug!("invalid accession, skipping: {}", value);
                    continue;
                }
                Err(err) => return Err(err),
            }
        }
        Ok(())
    }

    /// Fetch the interactions among the nodes currently in the graph and
    /// add them as edges.
    pub async fn get_connections(&mut self, store: &dyn GraphStore) -> Result<()> {
        let symbols: Vec<String> = self
            .nodes
            .iter()
            .map(|n| n.entity.symbol().to_string())
            .collect();
        if symbols.is_empty() {
            return Ok(());
        }
        let interactions = store.connections(&symbols).await?;
        for interaction in interactions {
            self.add_edge(interaction);
        }
        Ok(())
    }

    /// A graph with zero nodes and zero edges; callers use this to decide
    /// between "show results" and "no results" responses.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn nodes(&self) -> &[VizNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[PredictedInteraction] {
        &self.edges
    }

    /// Serialize to the `{nodes, edges}` structure cytoscape.js consumes.
    pub fn to_graph_elements(&self) -> Value {
        json!({
            "nodes": self
                .nodes
                .iter()
                .map(|n| n.entity.to_element(n.important))
                .collect::<Vec<_>>(),
            "edges": self.edges.iter().map(|e| e.to_element()).collect::<Vec<_>>(),
        })
    }
}

/// Lazily rebuild an entity from a `(symbol, database)` pair that came from
/// a previously serialized graph; no store round trip.
fn entity_from_parts(symbol: &str, database: &str, registry: &DatasetRegistry) -> Result<Entity> {
    match database {
        HUMAN_DATABASE => Ok(Entity::Human(HumanGene::new(symbol))),
        GENE_DATABASE => Ok(Entity::Gene(PlanarianGene::new(symbol))),
        crate::graph::models::PFAM_DATABASE => Ok(Entity::Domain(PfamDomain::new(symbol)?)),
        crate::graph::models::GO_DATABASE => Ok(Entity::Go(GoTerm::new(symbol)?)),
        other => Ok(Entity::Contig(PlanarianContig::new(
            symbol, other, registry,
        )?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::models::HumanGene;

    fn registry() -> DatasetRegistry {
        DatasetRegistry::builtin()
    }

    fn contig(symbol: &str) -> Entity {
        Entity::Contig(PlanarianContig::new(symbol, "Dresden", &registry()).unwrap())
    }

    fn edge(source: &str, target: &str, probability: f64) -> PredictedInteraction {
        PredictedInteraction {
            source: source.into(),
            target: contig(target),
            database: "Dresden".into(),
            params: Some(InteractionParams {
                probability,
                path_length: 1,
                cellcom_nto: None,
                molfun_nto: None,
                bioproc_nto: None,
                dom_int_sc: None,
            }),
        }
    }

    #[test]
    fn test_duplicate_nodes_collapse() {
        let mut graph = VisualizationGraph::new();
        graph.add_elements([
            GraphElement::Node(contig("dd_Smed_v6_1_0_1")),
            GraphElement::Node(contig("dd_Smed_v6_1_0_1")),
            GraphElement::Node(contig("dd_Smed_v6_2_0_1")),
        ]);
        assert_eq!(graph.node_count(), 2);
        let elements = graph.to_graph_elements();
        assert_eq!(elements["nodes"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_same_symbol_different_database_are_distinct() {
        let mut graph = VisualizationGraph::new();
        graph.add_node(Entity::Human(HumanGene::new("WNT1")));
        graph.add_node(Entity::Gene(PlanarianGene::new("WNT1")));
        assert_eq!(graph.node_count(), 2);
    }

    #[test]
    fn test_duplicate_edges_collapse() {
        let mut graph = VisualizationGraph::new();
        graph.add_edge(edge("a", "dd_Smed_v6_1_0_1", 0.5));
        graph.add_edge(edge("a", "dd_Smed_v6_1_0_1", 0.9));
        assert_eq!(graph.edge_count(), 1);
        // First insertion wins.
        assert_eq!(graph.edges()[0].probability(), Some(0.5));
    }

    #[test]
    fn test_filter_prunes_nodes_and_dangling_edges() {
        let mut graph = VisualizationGraph::new();
        graph.add_node(contig("dd_Smed_v6_1_0_1"));
        graph.add_node(contig("dd_Smed_v6_2_0_1"));
        graph.add_node(contig("dd_Smed_v6_3_0_1"));
        graph.add_edge(edge("dd_Smed_v6_1_0_1", "dd_Smed_v6_2_0_1", 0.8));
        graph.add_edge(edge("dd_Smed_v6_1_0_1", "dd_Smed_v6_3_0_1", 0.7));

        let allowed: HashSet<String> = ["dd_Smed_v6_1_0_1", "dd_Smed_v6_2_0_1"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        graph.filter(&allowed);
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);

        // Idempotent: filtering again changes nothing.
        let nodes_before = graph.node_count();
        let edges_before = graph.edge_count();
        graph.filter(&allowed);
        assert_eq!(graph.node_count(), nodes_before);
        assert_eq!(graph.edge_count(), edges_before);
    }

    #[test]
    fn test_define_important_marks_only_listed_symbols() {
        let mut graph = VisualizationGraph::new();
        graph.add_node(contig("dd_Smed_v6_1_0_1"));
        graph.add_node(contig("dd_Smed_v6_2_0_1"));
        let vip: HashSet<String> = ["dd_Smed_v6_1_0_1".to_string()].into_iter().collect();
        graph.define_important(&vip);

        let elements = graph.to_graph_elements();
        let nodes = elements["nodes"].as_array().unwrap();
        let marked: Vec<bool> = nodes
            .iter()
            .map(|n| n.get("classes").is_some())
            .collect();
        assert_eq!(marked, vec![true, false]);
        // Marking does not duplicate the node.
        assert_eq!(graph.node_count(), 2);
    }

    #[test]
    fn test_empty_graph() {
        let graph = VisualizationGraph::new();
        assert!(graph.is_empty());
        let elements = graph.to_graph_elements();
        assert_eq!(elements["nodes"].as_array().unwrap().len(), 0);
        assert_eq!(elements["edges"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_add_serialized_element_rejects_unknown_group() {
        let mut graph = VisualizationGraph::new();
        let err = graph
            .add_serialized_element(&json!({"group": "clusters", "data": {}}), &registry())
            .unwrap_err();
        assert!(matches!(err, Error::WrongGraphElement { .. }));
    }

    #[test]
    fn test_add_serialized_elements_round_trip() {
        let mut graph = VisualizationGraph::new();
        let registry = registry();
        graph
            .add_serialized_element(
                &json!({"group": "nodes", "data": {"id": "dd_Smed_v6_1_0_1", "database": "Dresden"}}),
                &registry,
            )
            .unwrap();
        graph
            .add_serialized_element(
                &json!({"group": "nodes", "data": {"id": "BRCA1", "database": "Human"}}),
                &registry,
            )
            .unwrap();
        graph
            .add_serialized_element(
                &json!({"group": "edges", "data": {
                    "source": "dd_Smed_v6_1_0_1",
                    "target": "dd_Smed_v6_2_0_1",
                    "database": "Dresden",
                    "probability": 0.75,
                    "pathlength": 1
                }}),
                &registry,
            )
            .unwrap();
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
    }
}
