//! Neo4j client and store abstraction for the interaction graph

pub mod client;
mod impl_graph_store;
pub mod traits;

pub use client::{Neo4jClient, MAX_PATH_LENGTH};
pub use traits::GraphStore;

#[cfg(test)]
pub(crate) mod mock;
