use serde::{Deserialize, Serialize};

/// Computed physicochemical properties of a PubChem compound
///
/// Optional descriptors are `None` when PubChem does not supply them, which
/// is distinct from a value of zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundProperties {
    /// PubChem compound identifier
    pub cid: String,
    pub molecular_weight: f64,
    pub molecular_formula: String,
    /// Connectivity-only SMILES
    pub canonical_smiles: String,
    /// SMILES including stereochemistry and isotopes
    pub isomeric_smiles: String,
    pub iupac_name: String,
    /// Computed octanol/water partition coefficient (XLogP3)
    pub xlogp: Option<f64>,
    /// Topological polar surface area in square angstroms
    pub tpsa: Option<f64>,
    pub h_bond_donor_count: Option<u32>,
    pub h_bond_acceptor_count: Option<u32>,
    pub rotatable_bond_count: Option<u32>,
    pub complexity: Option<f64>,
    /// logP as read by affinity front-ends; mirrors `xlogp`
    pub log_p: Option<f64>,
}

/// Properties plus descriptive text for a compound
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundRecord {
    pub properties: CompoundProperties,
    pub description: Option<String>,
    /// Not fetched by this client; always `None`
    pub synonyms: Option<Vec<String>>,
}
