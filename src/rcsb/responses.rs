use serde::Deserialize;

use crate::rcsb::models::SearchMatch;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct EntryResponse {
    #[serde(rename = "struct")]
    pub struct_: Option<EntryStruct>,
    pub exptl: Option<Vec<Exptl>>,
    pub rcsb_entry_info: Option<EntryInfo>,
    pub rcsb_accession_info: Option<AccessionInfo>,
    pub rcsb_entry_container_identifiers: Option<ContainerIdentifiers>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EntryStruct {
    pub title: Option<String>,
    pub pdbx_descriptor: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Exptl {
    pub method: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EntryInfo {
    pub resolution_combined: Option<Vec<f64>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AccessionInfo {
    pub deposit_date: Option<String>,
    pub initial_release_date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ContainerIdentifiers {
    pub entity_ids: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub result_set: Vec<SearchMatch>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PolymerEntityResponse {
    pub entity_poly: Option<EntityPoly>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EntityPoly {
    pub pdbx_seq_one_letter_code_can: Option<String>,
    pub pdbx_seq_one_letter_code: Option<String>,
}
