//! In-memory mock implementation of GraphStore for testing.
//!
//! Holds fixture maps keyed the way the live store is keyed: contigs by
//! `(dataset, symbol)`, genes and humans by symbol, interactions as an
//! undirected edge list. Conditionally compiled with `#[cfg(test)]`.

use crate::datasets::DatasetRegistry;
use crate::error::{Error, Result};
use crate::graph::models::{
    DomainAnnotation, Entity, GoTerm, Homology, HumanGene, InteractionParams, PfamDomain,
    PlanarianContig, PlanarianGene, PredictedInteraction,
};
use crate::graph::pathway::Pathway;
use crate::graph::VisualizationGraph;
use crate::neo4j::traits::GraphStore;
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};

/// In-memory mock implementation of GraphStore for testing.
pub(crate) struct MockGraphStore {
    pub registry: DatasetRegistry,
    pub contigs: HashMap<(String, String), PlanarianContig>,
    pub genes: HashMap<String, PlanarianGene>,
    pub humans: HashMap<String, HumanGene>,
    /// Undirected edges: (dataset, a, b, params).
    pub interactions: Vec<(String, String, String, InteractionParams)>,
    pub domain_annotations: HashMap<(String, String), Vec<DomainAnnotation>>,
    /// GO terms per human symbol.
    pub go_terms: HashMap<String, Vec<GoTerm>>,
}

impl MockGraphStore {
    pub fn new() -> Self {
        Self {
            registry: DatasetRegistry::builtin(),
            contigs: HashMap::new(),
            genes: HashMap::new(),
            humans: HashMap::new(),
            interactions: Vec::new(),
            domain_annotations: HashMap::new(),
            go_terms: HashMap::new(),
        }
    }

    pub fn insert_contig(&mut self, contig: PlanarianContig) {
        self.contigs
            .insert((contig.database.clone(), contig.symbol.clone()), contig);
    }

    pub fn insert_gene(&mut self, gene: PlanarianGene) {
        self.genes.insert(gene.symbol.clone(), gene);
    }

    pub fn insert_human(&mut self, human: HumanGene) {
        self.humans.insert(human.symbol.clone(), human);
    }

    pub fn insert_interaction(&mut self, dataset: &str, a: &str, b: &str, probability: f64) {
        self.interactions.push((
            dataset.to_string(),
            a.to_string(),
            b.to_string(),
            InteractionParams {
                probability,
                path_length: 1,
                cellcom_nto: None,
                molfun_nto: None,
                bioproc_nto: None,
                dom_int_sc: None,
            },
        ));
    }

    fn check_label(&self, dataset: &str) -> Result<()> {
        if self.registry.is_allowed_contig_label(dataset) {
            Ok(())
        } else {
            Err(Error::InvalidSourceDatabase {
                database: dataset.to_string(),
            })
        }
    }

    fn degree_of(&self, dataset: &str, symbol: &str) -> u32 {
        self.interactions
            .iter()
            .filter(|(d, a, b, _)| d == dataset && (a == symbol || b == symbol))
            .count() as u32
    }

    fn contig_fixture(&self, symbol: &str, dataset: &str) -> Result<PlanarianContig> {
        self.contigs
            .get(&(dataset.to_string(), symbol.to_string()))
            .cloned()
            .ok_or_else(|| Error::not_found(symbol, dataset))
    }

    fn homolog_symbol_of(&self, contig: &PlanarianContig) -> Option<String> {
        contig.homolog.as_ref().map(|h| h.human.symbol.clone())
    }
}

#[async_trait]
impl GraphStore for MockGraphStore {
    async fn contig(&self, symbol: &str, dataset: &str) -> Result<PlanarianContig> {
        self.check_label(dataset)?;
        self.contig_fixture(symbol, dataset)
    }

    async fn contigs_bulk(
        &self,
        symbols: &[String],
        dataset: &str,
    ) -> Result<Vec<PlanarianContig>> {
        self.check_label(dataset)?;
        Ok(symbols
            .iter()
            .filter_map(|s| self.contigs.get(&(dataset.to_string(), s.clone())))
            .cloned()
            .collect())
    }

    async fn contigs_for_gene(
        &self,
        gene_symbol: &str,
        dataset: Option<&str>,
    ) -> Result<Vec<PlanarianContig>> {
        if let Some(dataset) = dataset {
            self.check_label(dataset)?;
        }
        Ok(self
            .contigs
            .values()
            .filter(|c| c.gene.as_deref() == Some(gene_symbol))
            .filter(|c| dataset.map_or(true, |d| c.database == d))
            .cloned()
            .collect())
    }

    async fn contigs_for_domain(
        &self,
        domain: &PfamDomain,
        dataset: &str,
    ) -> Result<Vec<PlanarianContig>> {
        self.check_label(dataset)?;
        let mut contigs = Vec::new();
        for ((db, symbol), annotations) in &self.domain_annotations {
            if db != dataset {
                continue;
            }
            let hit = annotations.iter().any(|a| {
                if domain.is_versioned() {
                    a.domain.accession == domain.accession
                } else {
                    a.domain
                        .accession
                        .split('.')
                        .next()
                        .is_some_and(|base| base == domain.accession)
                }
            });
            if hit {
                contigs.push(self.contig_fixture(symbol, db)?);
            }
        }
        Ok(contigs)
    }

    async fn contigs_for_go(
        &self,
        accession: &str,
        dataset: &str,
    ) -> Result<Vec<PlanarianContig>> {
        self.check_label(dataset)?;
        let annotated: Vec<&String> = self
            .go_terms
            .iter()
            .filter(|(_, terms)| terms.iter().any(|t| t.accession == accession))
            .map(|(human, _)| human)
            .collect();
        Ok(self
            .contigs
            .values()
            .filter(|c| c.database == dataset)
            .filter(|c| {
                self.homolog_symbol_of(c)
                    .is_some_and(|h| annotated.iter().any(|a| **a == h))
            })
            .cloned()
            .collect())
    }

    async fn contigs_for_human(
        &self,
        human_symbol: &str,
        dataset: &str,
    ) -> Result<Vec<PlanarianContig>> {
        self.check_label(dataset)?;
        Ok(self
            .contigs
            .values()
            .filter(|c| c.database == dataset)
            .filter(|c| self.homolog_symbol_of(c).as_deref() == Some(human_symbol))
            .cloned()
            .collect())
    }

    async fn planarian_gene(&self, symbol: &str) -> Result<PlanarianGene> {
        self.genes
            .get(symbol)
            .cloned()
            .ok_or_else(|| Error::not_found(symbol, crate::datasets::GENE_DATABASE))
    }

    async fn genes_for_domain(&self, domain: &PfamDomain) -> Result<Vec<PlanarianGene>> {
        let mut genes = Vec::new();
        for dataset in self.registry.names() {
            for contig in self.contigs_for_domain(domain, dataset).await? {
                if let Some(gene_symbol) = &contig.gene {
                    if let Some(gene) = self.genes.get(gene_symbol) {
                        if !genes.iter().any(|g: &PlanarianGene| g.symbol == gene.symbol) {
                            genes.push(gene.clone());
                        }
                    }
                }
            }
        }
        Ok(genes)
    }

    async fn genes_for_human(
        &self,
        human_symbol: &str,
        dataset: &str,
    ) -> Result<Vec<PlanarianGene>> {
        let contigs = self.contigs_for_human(human_symbol, dataset).await?;
        let mut genes = Vec::new();
        for contig in contigs {
            if let Some(gene_symbol) = &contig.gene {
                if let Some(gene) = self.genes.get(gene_symbol) {
                    if !genes.iter().any(|g: &PlanarianGene| g.symbol == gene.symbol) {
                        genes.push(gene.clone());
                    }
                }
            }
        }
        Ok(genes)
    }

    async fn genes_by_name(&self, name: &str) -> Result<Vec<PlanarianGene>> {
        Ok(self
            .genes
            .values()
            .filter(|g| {
                g.name
                    .as_deref()
                    .is_some_and(|n| n.eq_ignore_ascii_case(name))
            })
            .cloned()
            .collect())
    }

    async fn gene_wildcard(&self, pattern: &str) -> Result<Vec<PlanarianGene>> {
        let re = regex::Regex::new(&format!("^{}$", pattern)).unwrap();
        Ok(self
            .genes
            .values()
            .filter(|g| {
                re.is_match(&g.symbol)
                    || g.name
                        .as_deref()
                        .is_some_and(|n| re.is_match(&n.to_uppercase()))
            })
            .cloned()
            .collect())
    }

    async fn human_gene(&self, symbol: &str) -> Result<HumanGene> {
        self.humans
            .get(symbol)
            .cloned()
            .ok_or_else(|| Error::not_found(symbol, "Human"))
    }

    async fn human_wildcard(&self, pattern: &str) -> Result<Vec<HumanGene>> {
        let re = regex::Regex::new(&format!("^{}$", pattern)).unwrap();
        Ok(self
            .humans
            .values()
            .filter(|h| re.is_match(&h.symbol))
            .cloned()
            .collect())
    }

    async fn humans_for_go(&self, accession: &str) -> Result<Vec<HumanGene>> {
        Ok(self
            .go_terms
            .iter()
            .filter(|(_, terms)| terms.iter().any(|t| t.accession == accession))
            .filter_map(|(symbol, _)| self.humans.get(symbol))
            .cloned()
            .collect())
    }

    async fn human_summary(&self, symbol: &str) -> Result<Option<String>> {
        Ok(self.humans.get(symbol).and_then(|h| h.summary.clone()))
    }

    async fn neighbours(
        &self,
        symbol: &str,
        database: &str,
    ) -> Result<Option<Vec<PredictedInteraction>>> {
        self.check_label(database)?;
        let mut interactions = Vec::new();
        for (dataset, a, b, params) in &self.interactions {
            if dataset != database {
                continue;
            }
            let other = if a == symbol {
                b
            } else if b == symbol {
                a
            } else {
                continue;
            };
            let mut target = self.contig_fixture(other, database)?;
            target.degree = Some(self.degree_of(database, other));
            interactions.push(PredictedInteraction {
                source: symbol.to_string(),
                target: Entity::Contig(target),
                database: database.to_string(),
                params: Some(params.clone().rounded()),
            });
        }
        if interactions.is_empty() {
            return Ok(None);
        }
        interactions.sort_by(|x, y| {
            y.probability()
                .partial_cmp(&x.probability())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Ok(Some(interactions))
    }

    async fn neighbours_shallow(
        &self,
        symbol: &str,
        database: &str,
    ) -> Result<Option<Vec<PredictedInteraction>>> {
        self.check_label(database)?;
        let mut interactions = Vec::new();
        for (dataset, a, b, params) in &self.interactions {
            if dataset != database {
                continue;
            }
            let other = if a == symbol {
                b
            } else if b == symbol {
                a
            } else {
                continue;
            };
            // Targets stay shallow: symbol and degree, no homology.
            let mut target = PlanarianContig::new(other, database, &self.registry)?;
            target.degree = Some(self.degree_of(database, other));
            interactions.push(PredictedInteraction {
                source: symbol.to_string(),
                target: Entity::Contig(target),
                database: database.to_string(),
                params: Some(
                    InteractionParams {
                        probability: params.probability,
                        path_length: params.path_length,
                        cellcom_nto: None,
                        molfun_nto: None,
                        bioproc_nto: None,
                        dom_int_sc: None,
                    }
                    .rounded(),
                ),
            });
        }
        if interactions.is_empty() {
            return Ok(None);
        }
        interactions.sort_by(|x, y| {
            y.probability()
                .partial_cmp(&x.probability())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Ok(Some(interactions))
    }

    async fn connections(&self, symbols: &[String]) -> Result<Vec<PredictedInteraction>> {
        let mut result = Vec::new();
        for (dataset, a, b, params) in &self.interactions {
            if !symbols.contains(a) || !symbols.contains(b) {
                continue;
            }
            let target = self.contig_fixture(b, dataset)?;
            result.push(PredictedInteraction {
                source: a.clone(),
                target: Entity::Contig(target),
                database: dataset.clone(),
                params: Some(params.clone()),
            });
        }
        Ok(result)
    }

    async fn shortest_paths(
        &self,
        source: &str,
        target: &str,
        database: &str,
        max_length: i64,
    ) -> Result<Option<Vec<Pathway>>> {
        self.check_label(database)?;
        // BFS over the fixture edge list; all paths of the first depth that
        // reaches the target.
        let mut queue: VecDeque<Vec<String>> = VecDeque::new();
        queue.push_back(vec![source.to_string()]);
        let mut found: Vec<Vec<String>> = Vec::new();
        let mut found_depth: Option<usize> = None;

        while let Some(path) = queue.pop_front() {
            let depth = path.len() - 1;
            if let Some(d) = found_depth {
                if depth >= d {
                    continue;
                }
            }
            if depth as i64 >= max_length {
                continue;
            }
            let last = path.last().cloned().unwrap_or_default();
            for (dataset, a, b, _) in &self.interactions {
                if dataset != database {
                    continue;
                }
                let next = if *a == last {
                    b
                } else if *b == last {
                    a
                } else {
                    continue;
                };
                if path.contains(next) {
                    continue;
                }
                let mut extended = path.clone();
                extended.push(next.clone());
                if next == target {
                    found_depth = Some(extended.len() - 1);
                    found.push(extended);
                } else {
                    queue.push_back(extended);
                }
            }
        }

        if found.is_empty() {
            return Ok(None);
        }

        let mut pathways = Vec::new();
        for symbols in found {
            let mut graph = VisualizationGraph::new();
            for symbol in &symbols {
                graph.add_node(Entity::Contig(self.contig_fixture(symbol, database)?));
            }
            for pair in symbols.windows(2) {
                let params = self
                    .interactions
                    .iter()
                    .find(|(d, a, b, _)| {
                        d == database
                            && ((*a == pair[0] && *b == pair[1])
                                || (*a == pair[1] && *b == pair[0]))
                    })
                    .map(|(_, _, _, p)| p.clone());
                graph.add_edge(PredictedInteraction {
                    source: pair[0].clone(),
                    target: Entity::Contig(self.contig_fixture(&pair[1], database)?),
                    database: database.to_string(),
                    params,
                });
            }
            pathways.push(Pathway::new(graph));
        }
        Ok(Some(pathways))
    }

    async fn homologs(
        &self,
        human_symbol: &str,
        dataset: Option<&str>,
    ) -> Result<HashMap<String, Vec<Homology>>> {
        let mut partitions: HashMap<String, Vec<Homology>> = match dataset {
            Some(d) => {
                self.check_label(d)?;
                HashMap::from([(d.to_string(), Vec::new())])
            }
            None => self
                .registry
                .names()
                .iter()
                .map(|name| (name.to_string(), Vec::new()))
                .collect(),
        };
        for contig in self.contigs.values() {
            if let Some(d) = dataset {
                if contig.database != d {
                    continue;
                }
            }
            if let Some(homology) = &contig.homolog {
                if homology.human.symbol == human_symbol {
                    partitions
                        .entry(contig.database.clone())
                        .or_default()
                        .push(homology.clone());
                }
            }
        }
        Ok(partitions)
    }

    async fn domains(
        &self,
        symbol: &str,
        database: &str,
    ) -> Result<Option<Vec<DomainAnnotation>>> {
        self.check_label(database)?;
        let mut annotations = match self
            .domain_annotations
            .get(&(database.to_string(), symbol.to_string()))
        {
            Some(annotations) if !annotations.is_empty() => annotations.clone(),
            _ => return Ok(None),
        };
        annotations.sort_by_key(|a| a.s_start);
        Ok(Some(annotations))
    }

    async fn gene_ontology(&self, human_symbol: &str) -> Result<Vec<GoTerm>> {
        Ok(self.go_terms.get(human_symbol).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::resolver;

    fn contig_fixture(
        store: &MockGraphStore,
        symbol: &str,
        dataset: &str,
        human: Option<&str>,
        gene: Option<&str>,
    ) -> PlanarianContig {
        let mut contig = PlanarianContig::new(symbol, dataset, &store.registry).unwrap();
        contig.homolog = human.map(|h| {
            Homology::new(HumanGene::new(h), Some(symbol.to_string()))
        });
        contig.gene = gene.map(str::to_string);
        contig
    }

    fn seeded_store() -> MockGraphStore {
        let mut store = MockGraphStore::new();
        let c1 = contig_fixture(
            &store,
            "dd_Smed_v6_1_0_1",
            "Dresden",
            Some("WNT1"),
            Some("SMESG000001"),
        );
        let c2 = contig_fixture(&store, "dd_Smed_v6_2_0_1", "Dresden", Some("TP53"), None);
        let c3 = contig_fixture(&store, "dd_Smed_v6_3_0_1", "Dresden", None, None);
        let c4 = contig_fixture(&store, "dd_Smed_v6_4_0_1", "Dresden", None, None);
        store.insert_contig(c1);
        store.insert_contig(c2);
        store.insert_contig(c3);
        store.insert_contig(c4);

        let smest = contig_fixture(
            &store,
            "SMEST000001.1",
            "Smest",
            Some("WNT1"),
            Some("SMESG000001"),
        );
        store.insert_contig(smest);

        let mut gene = PlanarianGene::new("SMESG000001");
        gene.name = Some("WNT1".to_string());
        store.insert_gene(gene);

        let mut wnt1 = HumanGene::new("WNT1");
        wnt1.summary = Some("Wnt family ligand".to_string());
        store.insert_human(wnt1);
        store.insert_human(HumanGene::new("TP53"));

        store.insert_interaction("Dresden", "dd_Smed_v6_1_0_1", "dd_Smed_v6_2_0_1", 0.41);
        store.insert_interaction("Dresden", "dd_Smed_v6_1_0_1", "dd_Smed_v6_3_0_1", 0.93);
        store.insert_interaction("Dresden", "dd_Smed_v6_3_0_1", "dd_Smed_v6_4_0_1", 0.55);
        store
    }

    #[tokio::test]
    async fn test_neighbours_sorted_by_descending_probability() {
        let store = seeded_store();
        let neighbours = store
            .neighbours("dd_Smed_v6_1_0_1", "Dresden")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(neighbours.len(), 2);
        assert_eq!(neighbours[0].probability(), Some(0.93));
        assert_eq!(neighbours[1].probability(), Some(0.41));
    }

    #[tokio::test]
    async fn test_neighbours_none_when_isolated() {
        let mut store = seeded_store();
        let lonely = contig_fixture(&store, "dd_Smed_v6_9_0_1", "Dresden", None, None);
        store.insert_contig(lonely);
        let neighbours = store.neighbours("dd_Smed_v6_9_0_1", "Dresden").await.unwrap();
        assert!(neighbours.is_none());
    }

    #[tokio::test]
    async fn test_neighbour_targets_carry_degree() {
        let store = seeded_store();
        let neighbours = store
            .neighbours("dd_Smed_v6_1_0_1", "Dresden")
            .await
            .unwrap()
            .unwrap();
        // dd_Smed_v6_3_0_1 touches two interactions.
        let Entity::Contig(target) = &neighbours[0].target else {
            panic!("neighbour target must be a contig");
        };
        assert_eq!(target.degree, Some(2));
    }

    #[tokio::test]
    async fn test_shallow_neighbours_skip_homology() {
        let store = seeded_store();
        let neighbours = store
            .neighbours_shallow("dd_Smed_v6_3_0_1", "Dresden")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(neighbours.len(), 2);
        // dd_Smed_v6_1_0_1 has a WNT1 homolog in the fixture, but shallow
        // targets only carry symbol and degree.
        for neighbour in &neighbours {
            let Entity::Contig(target) = &neighbour.target else {
                panic!("neighbour target must be a contig");
            };
            assert!(target.homolog.is_none());
            assert!(target.degree.is_some());
        }
        assert_eq!(neighbours[0].probability(), Some(0.93));
    }

    #[tokio::test]
    async fn test_fetch_neighbours_sets_degree() {
        let store = seeded_store();
        let mut contig = store.contig("dd_Smed_v6_1_0_1", "Dresden").await.unwrap();
        assert_eq!(contig.degree, None);
        contig.fetch_neighbours(&store).await.unwrap();
        assert_eq!(contig.degree, Some(2));
        assert_eq!(contig.neighbours.as_ref().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn test_fetch_neighbours_marks_isolated_contig() {
        let mut store = seeded_store();
        let lonely = contig_fixture(&store, "dd_Smed_v6_9_0_1", "Dresden", None, None);
        store.insert_contig(lonely);
        let mut contig = store.contig("dd_Smed_v6_9_0_1", "Dresden").await.unwrap();
        contig.fetch_neighbours(&store).await.unwrap();
        // Queried-and-empty: degree is zero, neighbours stays unset.
        assert_eq!(contig.degree, Some(0));
        assert!(contig.neighbours.is_none());
    }

    #[tokio::test]
    async fn test_contigs_bulk_skips_missing_symbols() {
        let store = seeded_store();
        let symbols = vec![
            "dd_Smed_v6_1_0_1".to_string(),
            "dd_Smed_v6_404_0_1".to_string(),
            "dd_Smed_v6_2_0_1".to_string(),
        ];
        let contigs = store.contigs_bulk(&symbols, "Dresden").await.unwrap();
        assert_eq!(contigs.len(), 2);
        assert!(contigs.iter().any(|c| c.symbol == "dd_Smed_v6_1_0_1"));
        assert!(contigs.iter().any(|c| c.symbol == "dd_Smed_v6_2_0_1"));
    }

    #[tokio::test]
    async fn test_unknown_dataset_rejected() {
        let store = seeded_store();
        let err = store
            .neighbours("dd_Smed_v6_1_0_1", "Robert'); DROP TABLE")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidSourceDatabase { .. }));
    }

    #[tokio::test]
    async fn test_homologs_all_preseeds_every_dataset() {
        let store = seeded_store();
        let partitions = store.homologs("WNT1", None).await.unwrap();
        assert_eq!(partitions.len(), store.registry.len());
        assert_eq!(partitions["Dresden"].len(), 1);
        assert_eq!(partitions["Smest"].len(), 1);
        // Untouched datasets are present with empty lists.
        assert!(partitions["Adamidi"].is_empty());
        assert!(partitions["Gbrna"].is_empty());
    }

    #[tokio::test]
    async fn test_homologs_single_dataset_is_scoped() {
        let store = seeded_store();
        let partitions = store.homologs("WNT1", Some("Dresden")).await.unwrap();
        assert_eq!(partitions.len(), 1);
        assert_eq!(partitions["Dresden"].len(), 1);
    }

    #[tokio::test]
    async fn test_shortest_paths_found_and_not_found() {
        let store = seeded_store();
        let paths = store
            .shortest_paths("dd_Smed_v6_2_0_1", "dd_Smed_v6_4_0_1", "Dresden", 5)
            .await
            .unwrap()
            .unwrap();
        // 2 - 1 - 3 - 4 is the only route.
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].graph.node_count(), 4);
        assert_eq!(paths[0].graph.edge_count(), 3);

        let mut store = store;
        let island = contig_fixture(&store, "dd_Smed_v6_9_0_1", "Dresden", None, None);
        store.insert_contig(island);
        let none = store
            .shortest_paths("dd_Smed_v6_1_0_1", "dd_Smed_v6_9_0_1", "Dresden", 5)
            .await
            .unwrap();
        assert!(none.is_none());
    }

    #[tokio::test]
    async fn test_shortest_paths_respects_max_length() {
        let store = seeded_store();
        let none = store
            .shortest_paths("dd_Smed_v6_2_0_1", "dd_Smed_v6_4_0_1", "Dresden", 2)
            .await
            .unwrap();
        assert!(none.is_none());
    }

    #[tokio::test]
    async fn test_resolver_routes_human_symbol_to_contigs() {
        let store = seeded_store();
        let contigs = resolver::resolve_to_contigs(&store, &store.registry, "wnt1", "Dresden")
            .await
            .unwrap();
        assert_eq!(contigs.len(), 1);
        assert_eq!(contigs[0].symbol, "dd_Smed_v6_1_0_1");
    }

    #[tokio::test]
    async fn test_resolver_wildcard_human() {
        let store = seeded_store();
        let humans = resolver::resolve_to_humans(&store, "WNT*").await.unwrap();
        assert_eq!(humans.len(), 1);
        assert_eq!(humans[0].symbol, "WNT1");
    }

    #[tokio::test]
    async fn test_resolver_gene_symbol() {
        let store = seeded_store();
        let genes = resolver::resolve_to_genes(&store, &store.registry, "SMESG000001")
            .await
            .unwrap();
        assert_eq!(genes.len(), 1);
        assert_eq!(genes[0].name.as_deref(), Some("WNT1"));
    }

    #[tokio::test]
    async fn test_new_nodes_partial_success() {
        let store = seeded_store();
        let mut graph = VisualizationGraph::new();
        let symbols = vec![
            "dd_Smed_v6_1_0_1".to_string(),
            "dd_Smed_v6_404_0_1".to_string(),
        ];
        graph
            .new_nodes(&store, &store.registry, &symbols, "Dresden")
            .await
            .unwrap();
        assert_eq!(graph.node_count(), 1);
    }

    #[tokio::test]
    async fn test_get_connections_fills_edges() {
        let store = seeded_store();
        let mut graph = VisualizationGraph::new();
        let symbols = vec![
            "dd_Smed_v6_1_0_1".to_string(),
            "dd_Smed_v6_2_0_1".to_string(),
            "dd_Smed_v6_3_0_1".to_string(),
        ];
        graph
            .new_nodes(&store, &store.registry, &symbols, "Dresden")
            .await
            .unwrap();
        graph.get_connections(&store).await.unwrap();
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
    }
}
