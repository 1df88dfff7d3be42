use serde::{Deserialize, Deserializer};

#[derive(Debug, Deserialize)]
pub(crate) struct IdentifierListResponse {
    #[serde(rename = "IdentifierList")]
    pub identifier_list: Option<IdentifierList>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct IdentifierList {
    #[serde(rename = "CID", default)]
    pub cid: Vec<u64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PropertyTableResponse {
    #[serde(rename = "PropertyTable")]
    pub property_table: Option<PropertyTable>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PropertyTable {
    #[serde(rename = "Properties", default)]
    pub properties: Vec<PropertyData>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct PropertyData {
    #[serde(rename = "CID")]
    pub cid: Option<u64>,
    #[serde(rename = "MolecularFormula")]
    pub molecular_formula: Option<String>,
    // PubChem serializes the weight as a string
    #[serde(rename = "MolecularWeight", default, deserialize_with = "number_or_string")]
    pub molecular_weight: Option<f64>,
    #[serde(rename = "CanonicalSMILES", alias = "ConnectivitySMILES")]
    pub canonical_smiles: Option<String>,
    #[serde(rename = "IsomericSMILES", alias = "SMILES")]
    pub isomeric_smiles: Option<String>,
    #[serde(rename = "IUPACName")]
    pub iupac_name: Option<String>,
    #[serde(rename = "XLogP", default, deserialize_with = "number_or_string")]
    pub xlogp: Option<f64>,
    #[serde(rename = "TPSA", default, deserialize_with = "number_or_string")]
    pub tpsa: Option<f64>,
    #[serde(rename = "HBondDonorCount")]
    pub h_bond_donor_count: Option<u32>,
    #[serde(rename = "HBondAcceptorCount")]
    pub h_bond_acceptor_count: Option<u32>,
    #[serde(rename = "RotatableBondCount")]
    pub rotatable_bond_count: Option<u32>,
    #[serde(rename = "Complexity", default, deserialize_with = "number_or_string")]
    pub complexity: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DescriptionResponse {
    #[serde(rename = "InformationList")]
    pub information_list: Option<InformationList>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct InformationList {
    #[serde(rename = "Information", default)]
    pub information: Vec<Information>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Information {
    #[serde(rename = "Description")]
    pub description: Option<String>,
}

fn number_or_string<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        Text(String),
    }

    Ok(
        match Option::<NumberOrString>::deserialize(deserializer)? {
            Some(NumberOrString::Number(n)) => Some(n),
            Some(NumberOrString::Text(s)) => s.trim().parse().ok(),
            None => None,
        },
    )
}
