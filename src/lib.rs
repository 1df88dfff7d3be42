//! # Affinity Data Client
//!
//! Async clients for the two public databases a protein-ligand binding
//! affinity front-end needs: PubChem for ligands and RCSB PDB for protein
//! structures.
//!
//! ## Features
//!
//! - **PubChem**: SMILES to CID resolution, batch property lookup, description
//!   text, 3D SDF download and 2D depiction URLs
//! - **RCSB PDB**: entry metadata, raw PDB files, sequence similarity search,
//!   polymer entity documents and best-match lookup
//! - **Absent on failure**: lookups return `None` or an empty `Vec`, with the
//!   cause handed to an injectable [`DiagnosticSink`]; `try_*` methods keep it
//!
//! ## Quick Start
//!
//! ### Looking up a ligand
//!
//! ```no_run
//! use affinity_data_client::PubChemClient;
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = PubChemClient::new();
//!
//!     if let Some(props) = client.fetch_properties("CC(=O)OC1=CC=CC=C1C(=O)O").await {
//!         println!("{} ({} g/mol)", props.molecular_formula, props.molecular_weight);
//!         println!("Image: {}", client.image_url(&props.cid));
//!     }
//! }
//! ```
//!
//! ### Finding a structure for a sequence
//!
//! ```no_run
//! use affinity_data_client::RcsbClient;
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = RcsbClient::new();
//!     let fasta = ">HBA_HUMAN\nMVLSPADKTNVKAAWGKVGAHAGEYGAEALERMFLSFPTTKTYFPHFDLSH";
//!
//!     if let Some(best) = client.find_best_match(fasta).await {
//!         println!("{} (score {})", best.pdb_id, best.score);
//!         let pdb = client.fetch_structure_file(&best.pdb_id).await;
//!         println!("Downloaded: {}", pdb.is_some());
//!     }
//! }
//! ```

pub mod common;
pub mod config;
pub mod diagnostics;
pub mod error;
mod http;
pub mod pubchem;
pub mod rate_limit;
pub mod rcsb;

// Re-export main types for convenience
pub use common::{CompoundId, PdbId};
pub use config::ClientConfig;
pub use diagnostics::{DiagnosticSink, RecordingDiagnostics, TracingDiagnostics};
pub use error::{ClientError, Result};
pub use pubchem::{CompoundProperties, CompoundRecord, PubChemClient};
pub use rcsb::{
    BestMatch, RcsbClient, SearchMatch, SequenceSearchOptions, SequenceType, StructureInfo,
};
