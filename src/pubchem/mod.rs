//! PubChem PUG REST client for small-molecule lookups
//!
//! Resolves SMILES notation to a compound identifier (CID) and fetches
//! computed properties, description text and 3D conformer files for it.

pub mod client;
pub mod models;
pub(crate) mod responses;

pub use client::{DEFAULT_IMAGE_SIZE, PROPERTY_NAMES, PubChemClient};
pub use models::{CompoundProperties, CompoundRecord};
