//! Identifier types shared by the PubChem and RCSB clients

pub mod ids;

pub use ids::{CompoundId, PdbId, is_pdb_code};
