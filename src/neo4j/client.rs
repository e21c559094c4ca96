//! Neo4j client for querying the interaction graph.
//!
//! Node labels are the only query fragment that cannot be bound as a Bolt
//! parameter, so every label is checked against the dataset registry before
//! it is formatted into Cypher. Symbols, accessions, and patterns always go
//! through `.param()`.

use crate::datasets::{DatasetRegistry, GENE_DATABASE};
use crate::error::{Error, Result};
use crate::graph::assembly::VisualizationGraph;
use crate::graph::models::{
    round3, DomainAnnotation, Entity, GoTerm, Homology, HomologyScores, HumanGene,
    InteractionParams, PfamDomain, PlanarianContig, PlanarianGene, PredictedInteraction,
};
use crate::graph::pathway::Pathway;
use neo4rs::{query, Graph, Query};
use std::collections::HashMap;
use std::sync::Arc;

/// Hop ceiling for shortest-path searches; requests above it are clamped.
pub const MAX_PATH_LENGTH: i64 = 10;

/// Client for Neo4j operations
pub struct Neo4jClient {
    graph: Arc<Graph>,
    registry: DatasetRegistry,
}

impl Neo4jClient {
    /// Connect to a Neo4j server.
    pub async fn connect(
        uri: &str,
        user: &str,
        password: &str,
        registry: DatasetRegistry,
    ) -> Result<Self> {
        let graph = Graph::new(uri, user, password).await?;
        Ok(Self {
            graph: Arc::new(graph),
            registry,
        })
    }

    pub fn registry(&self) -> &DatasetRegistry {
        &self.registry
    }

    /// Execute a parameterized Cypher query and collect all rows.
    pub(crate) async fn execute(&self, q: Query) -> Result<Vec<neo4rs::Row>> {
        let mut result = self.graph.execute(q).await?;
        let mut rows = Vec::new();
        while let Some(row) = result.next().await? {
            rows.push(row);
        }
        Ok(rows)
    }

    /// Validate a dataset name before it is formatted into Cypher as a node
    /// label. This is the injection barrier for label positions.
    fn contig_label<'a>(&self, dataset: &'a str) -> Result<&'a str> {
        if self.registry.is_allowed_contig_label(dataset) {
            Ok(dataset)
        } else {
            Err(Error::InvalidSourceDatabase {
                database: dataset.to_string(),
            })
        }
    }

    /// First node label that names a registered dataset, for queries that
    /// match contigs without a label.
    fn dataset_from_labels(&self, labels: &[String]) -> Option<String> {
        labels
            .iter()
            .find(|l| self.registry.get(l).is_some())
            .cloned()
    }

    // ========================================================================
    // Contig operations
    // ========================================================================

    pub async fn contig(&self, symbol: &str, dataset: &str) -> Result<PlanarianContig> {
        let label = self.contig_label(dataset)?;
        let q = query(&format!(
            r#"
            MATCH (n:{label} {{symbol: $symbol}})
            OPTIONAL MATCH (n)-[r:HOMOLOG_OF]-(h:Human)
            OPTIONAL MATCH (n)-[:HAS_GENE]->(g:Smesgene)
            RETURN n.symbol     AS symbol,
                   n.sequence   AS sequence,
                   n.orf        AS orf,
                   n.length     AS length,
                   g.symbol     AS gene,
                   g.name       AS name,
                   h.symbol     AS human,
                   r.blast_cov  AS blast_cov,
                   r.blast_eval AS blast_eval,
                   r.nog_brh    AS nog_brh,
                   r.pfam_sc    AS pfam_sc,
                   r.nog_eval   AS nog_eval,
                   r.blast_brh  AS blast_brh,
                   r.pfam_brh   AS pfam_brh
            LIMIT 1
            "#
        ))
        .param("symbol", symbol);

        let rows = self.execute(q).await?;
        let row = rows
            .first()
            .ok_or_else(|| Error::not_found(symbol, dataset))?;

        self.contig_from_detail_row(row, dataset)
    }

    pub async fn contigs_bulk(
        &self,
        symbols: &[String],
        dataset: &str,
    ) -> Result<Vec<PlanarianContig>> {
        let label = self.contig_label(dataset)?;
        let q = query(&format!(
            r#"
            MATCH (n:{label})
            WHERE n.symbol IN $symbols
            OPTIONAL MATCH (n)-[r:HOMOLOG_OF]-(h:Human)
            OPTIONAL MATCH (n)-[:HAS_GENE]->(g:Smesgene)
            RETURN n.symbol     AS symbol,
                   n.sequence   AS sequence,
                   n.orf        AS orf,
                   n.length     AS length,
                   g.symbol     AS gene,
                   g.name       AS name,
                   h.symbol     AS human,
                   r.blast_cov  AS blast_cov,
                   r.blast_eval AS blast_eval,
                   r.nog_brh    AS nog_brh,
                   r.pfam_sc    AS pfam_sc,
                   r.nog_eval   AS nog_eval,
                   r.blast_brh  AS blast_brh,
                   r.pfam_brh   AS pfam_brh
            "#
        ))
        .param("symbols", symbols.to_vec());

        let rows = self.execute(q).await?;
        let mut contigs = Vec::with_capacity(rows.len());
        for row in &rows {
            contigs.push(self.contig_from_detail_row(row, dataset)?);
        }
        Ok(contigs)
    }

    fn contig_from_detail_row(&self, row: &neo4rs::Row, dataset: &str) -> Result<PlanarianContig> {
        let mut contig =
            PlanarianContig::new(&row.get::<String>("symbol")?, dataset, &self.registry)?;
        contig.sequence = row.get("sequence").ok();
        contig.orf = row.get("orf").ok();
        contig.length = row.get("length").ok();
        contig.gene = row.get("gene").ok();
        contig.name = row.get("name").ok();
        if let Ok(human) = row.get::<String>("human") {
            contig.homolog = Some(Homology::with_scores(
                HumanGene::new(&human),
                Some(contig.symbol.clone()),
                scores_from_row(row),
            ));
        }
        Ok(contig)
    }

    pub async fn contigs_for_gene(
        &self,
        gene_symbol: &str,
        dataset: Option<&str>,
    ) -> Result<Vec<PlanarianContig>> {
        let rows = match dataset {
            Some(dataset) => {
                let label = self.contig_label(dataset)?;
                let q = query(&format!(
                    r#"
                    MATCH (g:Smesgene {{symbol: $symbol}})<-[:HAS_GENE]-(c:{label})
                    RETURN c.symbol AS symbol, labels(c) AS database, c.length AS length
                    "#
                ))
                .param("symbol", gene_symbol);
                self.execute(q).await?
            }
            None => {
                let q = query(
                    r#"
                    MATCH (g:Smesgene {symbol: $symbol})<-[:HAS_GENE]-(c)
                    RETURN c.symbol AS symbol, labels(c) AS database, c.length AS length
                    "#,
                )
                .param("symbol", gene_symbol);
                self.execute(q).await?
            }
        };

        let mut contigs = Vec::new();
        for row in &rows {
            let labels: Vec<String> = row.get("database")?;
            let Some(database) = self.dataset_from_labels(&labels) else {
                continue;
            };
            let mut contig =
                PlanarianContig::new(&row.get::<String>("symbol")?, &database, &self.registry)?;
            contig.length = row.get("length").ok();
            contig.gene = Some(gene_symbol.to_string());
            contigs.push(contig);
        }
        Ok(contigs)
    }

    pub async fn contigs_for_domain(
        &self,
        domain: &PfamDomain,
        dataset: &str,
    ) -> Result<Vec<PlanarianContig>> {
        let label = self.contig_label(dataset)?;
        // A versioned accession matches exactly; an unversioned one matches
        // every version of the domain.
        let predicate = if domain.is_versioned() {
            "m.accession = $accession"
        } else {
            "split(m.accession, '.')[0] = $accession"
        };
        let q = query(&format!(
            r#"
            MATCH (n:{label})-[:HAS_DOMAIN]->(m:Pfam)
            WHERE {predicate}
            RETURN DISTINCT n.symbol AS symbol
            "#
        ))
        .param("accession", domain.accession.clone());

        let rows = self.execute(q).await?;
        rows.iter()
            .map(|row| {
                PlanarianContig::new(&row.get::<String>("symbol")?, dataset, &self.registry)
            })
            .collect()
    }

    pub async fn contigs_for_go(
        &self,
        accession: &str,
        dataset: &str,
    ) -> Result<Vec<PlanarianContig>> {
        let label = self.contig_label(dataset)?;
        let q = query(&format!(
            r#"
            MATCH (go:Go {{accession: $accession}})-[:HAS_GO]-(h:Human)-[:HOMOLOG_OF]-(n:{label})
            RETURN DISTINCT n.symbol AS symbol
            "#
        ))
        .param("accession", accession);

        let rows = self.execute(q).await?;
        rows.iter()
            .map(|row| {
                PlanarianContig::new(&row.get::<String>("symbol")?, dataset, &self.registry)
            })
            .collect()
    }

    pub async fn contigs_for_human(
        &self,
        human_symbol: &str,
        dataset: &str,
    ) -> Result<Vec<PlanarianContig>> {
        let label = self.contig_label(dataset)?;
        let q = query(&format!(
            r#"
            MATCH (h:Human {{symbol: $symbol}})-[r:HOMOLOG_OF]-(n:{label})
            RETURN n.symbol     AS symbol,
                   h.symbol     AS human,
                   r.blast_cov  AS blast_cov,
                   r.blast_eval AS blast_eval,
                   r.nog_brh    AS nog_brh,
                   r.pfam_sc    AS pfam_sc,
                   r.nog_eval   AS nog_eval,
                   r.blast_brh  AS blast_brh,
                   r.pfam_brh   AS pfam_brh
            "#
        ))
        .param("symbol", human_symbol);

        let rows = self.execute(q).await?;
        let mut contigs = Vec::new();
        for row in &rows {
            let mut contig =
                PlanarianContig::new(&row.get::<String>("symbol")?, dataset, &self.registry)?;
            contig.homolog = Some(Homology::with_scores(
                HumanGene::new(&row.get::<String>("human")?),
                Some(contig.symbol.clone()),
                scores_from_row(row),
            ));
            contigs.push(contig);
        }
        Ok(contigs)
    }

    // ========================================================================
    // Gene operations
    // ========================================================================

    pub async fn planarian_gene(&self, symbol: &str) -> Result<PlanarianGene> {
        let q = query(
            r#"
            MATCH (g:Smesgene {symbol: $symbol})
            OPTIONAL MATCH (g)<-[:HAS_GENE]-(c:Smest)-[r:HOMOLOG_OF]-(h:Human)
            WITH g, c, h, r
            ORDER BY c.length DESC
            RETURN g.symbol     AS symbol,
                   g.name       AS name,
                   g.sequence   AS sequence,
                   g.chromosome AS chromosome,
                   g.strand     AS strand,
                   g.start      AS start,
                   g.end        AS end,
                   c.symbol     AS best_contig,
                   h.symbol     AS human,
                   r.blast_cov  AS blast_cov,
                   r.blast_eval AS blast_eval,
                   r.nog_brh    AS nog_brh,
                   r.pfam_sc    AS pfam_sc,
                   r.nog_eval   AS nog_eval,
                   r.blast_brh  AS blast_brh,
                   r.pfam_brh   AS pfam_brh
            LIMIT 1
            "#,
        )
        .param("symbol", symbol);

        let rows = self.execute(q).await?;
        let row = rows
            .first()
            .ok_or_else(|| Error::not_found(symbol, GENE_DATABASE))?;
        self.gene_from_row(row)
    }

    pub async fn genes_for_domain(&self, domain: &PfamDomain) -> Result<Vec<PlanarianGene>> {
        let predicate = if domain.is_versioned() {
            "d.accession = $accession"
        } else {
            "split(d.accession, '.')[0] = $accession"
        };
        let q = query(&format!(
            r#"
            MATCH (d:Pfam)<-[:HAS_DOMAIN]-(c)-[:HAS_GENE]->(g:Smesgene)
            WHERE {predicate}
            RETURN DISTINCT g.symbol AS symbol, g.name AS name
            "#
        ))
        .param("accession", domain.accession.clone());

        let rows = self.execute(q).await?;
        rows.iter().map(|row| self.gene_from_row(row)).collect()
    }

    pub async fn genes_for_human(
        &self,
        human_symbol: &str,
        dataset: &str,
    ) -> Result<Vec<PlanarianGene>> {
        let label = self.contig_label(dataset)?;
        let q = query(&format!(
            r#"
            MATCH (h:Human {{symbol: $symbol}})-[:HOMOLOG_OF]-(c:{label})-[:HAS_GENE]->(g:Smesgene)
            RETURN DISTINCT g.symbol AS symbol, g.name AS name
            "#
        ))
        .param("symbol", human_symbol);

        let rows = self.execute(q).await?;
        rows.iter().map(|row| self.gene_from_row(row)).collect()
    }

    pub async fn genes_by_name(&self, name: &str) -> Result<Vec<PlanarianGene>> {
        let q = query(
            r#"
            MATCH (g:Smesgene)
            WHERE toUpper(g.name) = $name
            RETURN g.symbol     AS symbol,
                   g.name       AS name,
                   g.sequence   AS sequence,
                   g.chromosome AS chromosome,
                   g.strand     AS strand,
                   g.start      AS start,
                   g.end        AS end
            "#,
        )
        .param("name", name.to_uppercase());

        let rows = self.execute(q).await?;
        rows.iter().map(|row| self.gene_from_row(row)).collect()
    }

    pub async fn gene_wildcard(&self, pattern: &str) -> Result<Vec<PlanarianGene>> {
        let q = query(
            r#"
            MATCH (g:Smesgene)
            WHERE toUpper(g.name) =~ $pattern OR g.symbol =~ $pattern
            RETURN g.symbol AS symbol, g.name AS name
            "#,
        )
        .param("pattern", pattern);

        let rows = self.execute(q).await?;
        rows.iter().map(|row| self.gene_from_row(row)).collect()
    }

    // ========================================================================
    // Human gene operations
    // ========================================================================

    pub async fn human_gene(&self, symbol: &str) -> Result<HumanGene> {
        let q = query(
            r#"
            MATCH (n:Human {symbol: $symbol})
            RETURN n.symbol AS symbol,
                   n.summary AS summary,
                   n.summary_source AS summary_source
            LIMIT 1
            "#,
        )
        .param("symbol", symbol);

        let rows = self.execute(q).await?;
        let row = rows
            .first()
            .ok_or_else(|| Error::not_found(symbol, "Human"))?;
        let mut human = HumanGene::new(&row.get::<String>("symbol")?);
        human.summary = row.get("summary").ok();
        human.summary_source = row.get("summary_source").ok();
        Ok(human)
    }

    pub async fn human_wildcard(&self, pattern: &str) -> Result<Vec<HumanGene>> {
        let q = query(
            r#"
            MATCH (n:Human)
            WHERE n.symbol =~ $pattern
            RETURN n.symbol AS symbol
            "#,
        )
        .param("pattern", pattern);

        let rows = self.execute(q).await?;
        rows.iter()
            .map(|row| Ok(HumanGene::new(&row.get::<String>("symbol")?)))
            .collect()
    }

    pub async fn humans_for_go(&self, accession: &str) -> Result<Vec<HumanGene>> {
        let q = query(
            r#"
            MATCH (go:Go {accession: $accession})-[:HAS_GO]-(n:Human)
            RETURN n.symbol AS symbol
            "#,
        )
        .param("accession", accession);

        let rows = self.execute(q).await?;
        rows.iter()
            .map(|row| Ok(HumanGene::new(&row.get::<String>("symbol")?)))
            .collect()
    }

    pub async fn human_summary(&self, symbol: &str) -> Result<Option<String>> {
        let q = query(
            r#"
            MATCH (n:Human {symbol: $symbol})
            RETURN n.summary AS summary
            LIMIT 1
            "#,
        )
        .param("symbol", symbol);

        let rows = self.execute(q).await?;
        Ok(rows.first().and_then(|row| row.get("summary").ok()))
    }

    // ========================================================================
    // Interaction operations
    // ========================================================================

    pub async fn neighbours(
        &self,
        symbol: &str,
        database: &str,
    ) -> Result<Option<Vec<PredictedInteraction>>> {
        let label = self.contig_label(database)?;
        let q = query(&format!(
            r#"
            MATCH (n:{label} {{symbol: $symbol}})-[r:INTERACT_WITH]-(m:{label})
            OPTIONAL MATCH (m)-[s:HOMOLOG_OF]-(h:Human)
            WITH m, r, h, s
            OPTIONAL MATCH (m)-[t:INTERACT_WITH]-()
            RETURN m.symbol      AS target,
                   count(t)      AS degree,
                   h.symbol      AS human,
                   r.int_prob    AS int_prob,
                   r.path_length AS path_length,
                   r.cellcom_nto AS cellcom_nto,
                   r.molfun_nto  AS molfun_nto,
                   r.bioproc_nto AS bioproc_nto,
                   r.dom_int_sc  AS dom_int_sc,
                   s.blast_cov   AS blast_cov,
                   s.blast_eval  AS blast_eval,
                   s.nog_brh     AS nog_brh,
                   s.pfam_sc     AS pfam_sc,
                   s.nog_eval    AS nog_eval,
                   s.blast_brh   AS blast_brh,
                   s.pfam_brh    AS pfam_brh
            ORDER BY r.int_prob DESC
            "#
        ))
        .param("symbol", symbol);

        let rows = self.execute(q).await?;
        if rows.is_empty() {
            return Ok(None);
        }

        let mut interactions = Vec::new();
        for row in &rows {
            let mut target =
                PlanarianContig::new(&row.get::<String>("target")?, database, &self.registry)?;
            target.degree = row.get::<i64>("degree").ok().map(|d| d as u32);
            if let Ok(human) = row.get::<String>("human") {
                target.homolog = Some(Homology::with_scores(
                    HumanGene::new(&human),
                    Some(target.symbol.clone()),
                    scores_from_row(row),
                ));
            }
            interactions.push(PredictedInteraction {
                source: symbol.to_string(),
                target: Entity::Contig(target),
                database: database.to_string(),
                params: params_from_row(row),
            });
        }
        Ok(Some(interactions))
    }

    /// Shallow neighbourhood for graph expansion. Skips the homology join, so
    /// targets carry only their symbol and degree.
    pub async fn neighbours_shallow(
        &self,
        symbol: &str,
        database: &str,
    ) -> Result<Option<Vec<PredictedInteraction>>> {
        let label = self.contig_label(database)?;
        let q = query(&format!(
            r#"
            MATCH (n:{label} {{symbol: $symbol}})-[r:INTERACT_WITH]-(m:{label})
            OPTIONAL MATCH (m)-[t:INTERACT_WITH]-()
            RETURN m.symbol      AS target,
                   count(t)      AS degree,
                   r.int_prob    AS int_prob,
                   r.path_length AS path_length
            ORDER BY r.int_prob DESC
            "#
        ))
        .param("symbol", symbol);

        let rows = self.execute(q).await?;
        if rows.is_empty() {
            return Ok(None);
        }

        let mut interactions = Vec::new();
        for row in &rows {
            let mut target =
                PlanarianContig::new(&row.get::<String>("target")?, database, &self.registry)?;
            target.degree = row.get::<i64>("degree").ok().map(|d| d as u32);
            interactions.push(PredictedInteraction {
                source: symbol.to_string(),
                target: Entity::Contig(target),
                database: database.to_string(),
                params: params_from_row(row),
            });
        }
        Ok(Some(interactions))
    }

    pub async fn connections(&self, symbols: &[String]) -> Result<Vec<PredictedInteraction>> {
        // n.symbol < m.symbol reports each undirected pair once.
        let q = query(
            r#"
            MATCH (n)-[r:INTERACT_WITH]-(m)
            WHERE n.symbol IN $symbols
              AND m.symbol IN $symbols
              AND n.symbol < m.symbol
            RETURN n.symbol      AS source,
                   m.symbol      AS target,
                   labels(m)     AS database,
                   r.int_prob    AS int_prob,
                   r.path_length AS path_length,
                   r.cellcom_nto AS cellcom_nto,
                   r.molfun_nto  AS molfun_nto,
                   r.bioproc_nto AS bioproc_nto,
                   r.dom_int_sc  AS dom_int_sc
            "#,
        )
        .param("symbols", symbols.to_vec());

        let rows = self.execute(q).await?;
        let mut interactions = Vec::new();
        for row in &rows {
            let labels: Vec<String> = row.get("database")?;
            let Some(database) = self.dataset_from_labels(&labels) else {
                continue;
            };
            let target =
                PlanarianContig::new(&row.get::<String>("target")?, &database, &self.registry)?;
            interactions.push(PredictedInteraction {
                source: row.get("source")?,
                target: Entity::Contig(target),
                database,
                params: params_from_row(row),
            });
        }
        Ok(interactions)
    }

    pub async fn shortest_paths(
        &self,
        source: &str,
        target: &str,
        database: &str,
        max_length: i64,
    ) -> Result<Option<Vec<Pathway>>> {
        let label = self.contig_label(database)?;
        let hops = max_length.clamp(1, MAX_PATH_LENGTH);
        let q = query(&format!(
            r#"
            MATCH p=allShortestPaths(
                (n:{label} {{symbol: $source}})-[:INTERACT_WITH*..{hops}]-(m:{label} {{symbol: $target}})
            )
            RETURN [x IN nodes(p) | x.symbol]                          AS symbols,
                   [rel IN relationships(p) | toFloat(rel.int_prob)]   AS int_prob,
                   [rel IN relationships(p) | rel.path_length]         AS path_length
            "#
        ))
        .param("source", source)
        .param("target", target);

        let rows = self.execute(q).await?;
        if rows.is_empty() {
            return Ok(None);
        }

        let mut pathways = Vec::new();
        for row in &rows {
            let symbols: Vec<String> = row.get("symbols")?;
            let probabilities: Vec<f64> = row.get("int_prob")?;
            let path_lengths: Vec<i64> = row.get("path_length").unwrap_or_default();

            let mut graph = VisualizationGraph::new();
            for symbol in &symbols {
                graph.add_node(Entity::Contig(PlanarianContig::new(
                    symbol,
                    database,
                    &self.registry,
                )?));
            }
            for (i, pair) in symbols.windows(2).enumerate() {
                let edge_target =
                    PlanarianContig::new(&pair[1], database, &self.registry)?;
                graph.add_edge(PredictedInteraction {
                    source: pair[0].clone(),
                    target: Entity::Contig(edge_target),
                    database: database.to_string(),
                    params: probabilities.get(i).map(|p| InteractionParams {
                        probability: round3(*p),
                        path_length: path_lengths.get(i).copied().unwrap_or(1),
                        cellcom_nto: None,
                        molfun_nto: None,
                        bioproc_nto: None,
                        dom_int_sc: None,
                    }),
                });
            }
            pathways.push(Pathway::new(graph));
        }
        Ok(Some(pathways))
    }

    // ========================================================================
    // Annotation operations
    // ========================================================================

    pub async fn homologs(
        &self,
        human_symbol: &str,
        dataset: Option<&str>,
    ) -> Result<HashMap<String, Vec<Homology>>> {
        let mut partitions: HashMap<String, Vec<Homology>> = match dataset {
            Some(dataset) => {
                self.contig_label(dataset)?;
                HashMap::from([(dataset.to_string(), Vec::new())])
            }
            // Every dataset appears as a key even when it has no homologs.
            None => self
                .registry
                .names()
                .iter()
                .map(|name| (name.to_string(), Vec::new()))
                .collect(),
        };

        let rows = match dataset {
            Some(dataset) => {
                let label = self.contig_label(dataset)?;
                let q = query(&format!(
                    r#"
                    MATCH (n:Human {{symbol: $symbol}})-[r:HOMOLOG_OF]-(m:{label})
                    RETURN m.symbol    AS homolog,
                           labels(m)   AS database,
                           r.blast_cov AS blast_cov,
                           r.blast_eval AS blast_eval,
                           r.nog_brh   AS nog_brh,
                           r.pfam_sc   AS pfam_sc,
                           r.nog_eval  AS nog_eval,
                           r.blast_brh AS blast_brh,
                           r.pfam_brh  AS pfam_brh
                    "#
                ))
                .param("symbol", human_symbol);
                self.execute(q).await?
            }
            None => {
                let q = query(
                    r#"
                    MATCH (n:Human {symbol: $symbol})-[r:HOMOLOG_OF]-(m)
                    RETURN m.symbol    AS homolog,
                           labels(m)   AS database,
                           r.blast_cov AS blast_cov,
                           r.blast_eval AS blast_eval,
                           r.nog_brh   AS nog_brh,
                           r.pfam_sc   AS pfam_sc,
                           r.nog_eval  AS nog_eval,
                           r.blast_brh AS blast_brh,
                           r.pfam_brh  AS pfam_brh
                    "#,
                )
                .param("symbol", human_symbol);
                self.execute(q).await?
            }
        };

        for row in &rows {
            let labels: Vec<String> = row.get("database")?;
            let Some(database) = self.dataset_from_labels(&labels) else {
                continue;
            };
            let homology = Homology::with_scores(
                HumanGene::new(human_symbol),
                Some(row.get::<String>("homolog")?),
                scores_from_row(row),
            );
            partitions.entry(database).or_default().push(homology);
        }
        Ok(partitions)
    }

    pub async fn domains(
        &self,
        symbol: &str,
        database: &str,
    ) -> Result<Option<Vec<DomainAnnotation>>> {
        let label = self.contig_label(database)?;
        let q = query(&format!(
            r#"
            MATCH (n:{label} {{symbol: $symbol}})-[r:HAS_DOMAIN]->(dom:Pfam)
            RETURN dom.accession   AS accession,
                   dom.description AS description,
                   dom.identifier  AS identifier,
                   dom.mlength     AS mlength,
                   r.pfam_start    AS p_start,
                   r.pfam_end      AS p_end,
                   r.s_start       AS s_start,
                   r.s_end         AS s_end,
                   r.perc          AS perc
            ORDER BY r.s_start
            "#
        ))
        .param("symbol", symbol);

        let rows = self.execute(q).await?;
        if rows.is_empty() {
            return Ok(None);
        }

        let mut annotations = Vec::new();
        for row in &rows {
            let mut domain = PfamDomain::new(&row.get::<String>("accession")?)?;
            domain.description = row.get("description").ok();
            domain.identifier = row.get("identifier").ok();
            domain.mlength = row.get("mlength").ok();
            annotations.push(DomainAnnotation {
                domain,
                p_start: row.get("p_start")?,
                p_end: row.get("p_end")?,
                s_start: row.get("s_start")?,
                s_end: row.get("s_end")?,
                perc: row.get("perc").ok(),
            });
        }
        Ok(Some(annotations))
    }

    pub async fn gene_ontology(&self, human_symbol: &str) -> Result<Vec<GoTerm>> {
        let q = query(
            r#"
            MATCH (go:Go)-[:HAS_GO]-(n:Human {symbol: $symbol})
            RETURN go.accession AS accession,
                   go.domain    AS domain,
                   go.name      AS name
            ORDER BY go.domain
            "#,
        )
        .param("symbol", human_symbol);

        let rows = self.execute(q).await?;
        let mut terms = Vec::new();
        for row in &rows {
            let mut term = GoTerm::new(&row.get::<String>("accession")?)?;
            term.domain = row.get("domain").ok();
            term.name = row.get("name").ok();
            terms.push(term);
        }
        Ok(terms)
    }

    // ========================================================================
    // Row mapping helpers
    // ========================================================================

    fn gene_from_row(&self, row: &neo4rs::Row) -> Result<PlanarianGene> {
        let mut gene = PlanarianGene::new(&row.get::<String>("symbol")?);
        gene.name = row.get("name").ok();
        gene.sequence = row.get("sequence").ok();
        gene.chromosome = row.get("chromosome").ok();
        gene.strand = row.get::<i64>("strand").ok().map(|s| s as i32);
        gene.start = row.get("start").ok();
        gene.end = row.get("end").ok();
        gene.best_contig = row.get("best_contig").ok();
        if let Ok(human) = row.get::<String>("human") {
            gene.homolog = Some(Homology::with_scores(
                HumanGene::new(&human),
                gene.best_contig.clone(),
                scores_from_row(row),
            ));
        }
        Ok(gene)
    }
}

fn scores_from_row(row: &neo4rs::Row) -> HomologyScores {
    HomologyScores {
        blast_cov: row.get("blast_cov").ok(),
        blast_eval: row.get("blast_eval").ok(),
        blast_brh: row.get("blast_brh").ok(),
        nog_eval: row.get("nog_eval").ok(),
        nog_brh: row.get("nog_brh").ok(),
        pfam_sc: row.get("pfam_sc").ok(),
        pfam_brh: row.get("pfam_brh").ok(),
    }
}

fn params_from_row(row: &neo4rs::Row) -> Option<InteractionParams> {
    let probability: f64 = row.get("int_prob").ok()?;
    Some(
        InteractionParams {
            probability,
            path_length: row.get("path_length").unwrap_or(1),
            cellcom_nto: row.get("cellcom_nto").ok(),
            molfun_nto: row.get("molfun_nto").ok(),
            bioproc_nto: row.get("bioproc_nto").ok(),
            dom_int_sc: row.get("dom_int_sc").ok(),
        }
        .rounded(),
    )
}
