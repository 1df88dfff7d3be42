//! RCSB PDB client for protein structure lookups
//!
//! Wraps the Data API (entry and polymer entity documents), the Search API
//! (sequence similarity) and the file download service.

pub mod client;
pub mod models;
pub(crate) mod responses;
pub mod search;

pub use client::{DEFAULT_ENTITY_ID, MIN_STRUCTURE_FILE_LEN, RcsbClient};
pub use models::{BestMatch, SearchMatch, StructureInfo};
pub use search::{SequenceSearchOptions, SequenceType, clean_sequence};
