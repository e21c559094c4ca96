//! Domain model for the interaction graph: entity types, symbol
//! resolution, visualization graph assembly, and pathway scoring.

pub mod assembly;
pub mod models;
pub mod pathway;
pub mod resolver;

pub use assembly::{GraphElement, VisualizationGraph, VizNode};
pub use models::{
    DomainAnnotation, Entity, GoTerm, Homology, HomologyScores, HumanGene, InteractionParams,
    PfamDomain, PlanarianContig, PlanarianGene, PredictedInteraction,
};
pub use pathway::{rank_pathways, Pathway};
