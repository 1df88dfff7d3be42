use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Summary metadata for a PDB entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureInfo {
    /// Uppercase 4-character code
    pub pdb_id: String,
    /// `"Unknown"` when the entry has no title
    pub title: String,
    pub description: Option<String>,
    /// e.g. `"X-RAY DIFFRACTION"`
    pub experimental_method: Option<String>,
    /// Best resolution in angstroms
    pub resolution: Option<f64>,
    pub deposition_date: Option<String>,
    pub release_date: Option<String>,
    /// Polymer entity ids within the entry
    pub entity_ids: Vec<String>,
}

/// One ranked hit from the sequence search service
///
/// Keys beyond `identifier` and `score` are kept as returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchMatch {
    /// Polymer entity identifier, e.g. `4HHB_1`
    pub identifier: String,
    pub score: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Top search hit resolved to a PDB entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestMatch {
    pub pdb_id: String,
    pub entity_id: String,
    pub score: f64,
    pub info: Option<StructureInfo>,
}
