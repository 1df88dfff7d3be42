use std::sync::Arc;

use reqwest::Client;
use tracing::{debug, info, instrument};

use crate::common::CompoundId;
use crate::config::ClientConfig;
use crate::diagnostics::{DiagnosticSink, absorb, default_sink};
use crate::error::{ClientError, Result};
use crate::http::{HttpClient, JSON, TEXT, read_json};
use crate::pubchem::models::{CompoundProperties, CompoundRecord};
use crate::pubchem::responses::{
    DescriptionResponse, IdentifierListResponse, PropertyData, PropertyTableResponse,
};

/// Properties requested in the single batch property call
pub const PROPERTY_NAMES: [&str; 11] = [
    "MolecularFormula",
    "MolecularWeight",
    "CanonicalSMILES",
    "IsomericSMILES",
    "IUPACName",
    "XLogP",
    "TPSA",
    "HBondDonorCount",
    "HBondAcceptorCount",
    "RotatableBondCount",
    "Complexity",
];

/// Width and height used by [`PubChemClient::image_url`]
pub const DEFAULT_IMAGE_SIZE: u32 = 300;

// Longest status body kept in an error message
const STATUS_EXCERPT_LEN: usize = 200;

/// Client for the PubChem PUG REST API
///
/// Every public lookup returns `None` on failure and reports the cause to the
/// configured [`DiagnosticSink`]. The `try_*` methods return the cause instead.
///
/// # Example
///
/// ```no_run
/// use affinity_data_client::PubChemClient;
///
/// #[tokio::main]
/// async fn main() {
///     let client = PubChemClient::new();
///     if let Some(record) = client.fetch_full_record("CC(=O)OC1=CC=CC=C1C(=O)O").await {
///         println!("CID {}: {}", record.properties.cid, record.properties.molecular_formula);
///     }
/// }
/// ```
#[derive(Clone)]
pub struct PubChemClient {
    http: HttpClient,
    base_url: String,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl PubChemClient {
    pub fn new() -> Self {
        Self::with_config(ClientConfig::new())
    }

    pub fn with_config(config: ClientConfig) -> Self {
        Self {
            http: HttpClient::from_config(&config),
            base_url: config.effective_pubchem_base_url().to_string(),
            diagnostics: default_sink(),
        }
    }

    /// Use a preconfigured reqwest client with default service URLs
    pub fn with_client(client: Client) -> Self {
        let config = ClientConfig::new();
        Self {
            http: HttpClient::with_client(client, &config),
            base_url: config.effective_pubchem_base_url().to_string(),
            diagnostics: default_sink(),
        }
    }

    /// Replace the sink that receives absorbed failures
    pub fn with_diagnostics(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.diagnostics = sink;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve a SMILES string to a PubChem CID
    pub async fn resolve_identifier(&self, smiles: &str) -> Option<CompoundId> {
        absorb(
            self.diagnostics.as_ref(),
            "resolve_identifier",
            self.try_resolve_identifier(smiles).await,
        )
    }

    #[instrument(skip(self))]
    pub async fn try_resolve_identifier(&self, smiles: &str) -> Result<CompoundId> {
        let notation = smiles.trim();
        if notation.is_empty() {
            return Err(ClientError::EmptyNotation);
        }

        let url = format!(
            "{}/compound/smiles/{}/cids/JSON",
            self.base_url,
            urlencoding::encode(notation)
        );
        let response: IdentifierListResponse = read_json(self.http.get(&url, JSON).await?).await?;

        let cid = response
            .identifier_list
            .ok_or(ClientError::MissingField {
                field: "IdentifierList",
            })?
            .cid
            .into_iter()
            .next()
            .ok_or(ClientError::MissingField {
                field: "IdentifierList.CID",
            })?;

        CompoundId::try_from_u64(cid).map_err(|_| ClientError::NotFound {
            resource: format!("SMILES {notation}"),
        })
    }

    /// Resolve `smiles` and fetch its computed properties
    ///
    /// No property request is made when the SMILES cannot be resolved.
    pub async fn fetch_properties(&self, smiles: &str) -> Option<CompoundProperties> {
        absorb(
            self.diagnostics.as_ref(),
            "fetch_properties",
            self.try_fetch_properties(smiles).await,
        )
    }

    #[instrument(skip(self))]
    pub async fn try_fetch_properties(&self, smiles: &str) -> Result<CompoundProperties> {
        let cid = self.try_resolve_identifier(smiles).await?;

        let url = format!(
            "{}/compound/cid/{}/property/{}/JSON",
            self.base_url,
            cid,
            PROPERTY_NAMES.join(",")
        );
        debug!(%cid, "Fetching compound properties");
        let response: PropertyTableResponse = read_json(self.http.get(&url, JSON).await?).await?;

        let data = response
            .property_table
            .and_then(|table| table.properties.into_iter().next())
            .ok_or(ClientError::MissingField {
                field: "PropertyTable.Properties",
            })?;

        let properties = normalize_properties(cid, data);
        info!(cid = %properties.cid, "Compound properties retrieved");
        Ok(properties)
    }

    /// Fetch the 3D conformer of a compound as SDF text
    pub async fn fetch_3d_structure(&self, cid: &str) -> Option<String> {
        absorb(
            self.diagnostics.as_ref(),
            "fetch_3d_structure",
            self.try_fetch_3d_structure(cid).await,
        )
    }

    #[instrument(skip(self))]
    pub async fn try_fetch_3d_structure(&self, cid: &str) -> Result<String> {
        let cid = CompoundId::parse(cid)?;
        let url = format!("{}/compound/cid/{}/SDF?record_type=3d", self.base_url, cid);
        let body = self.http.get(&url, TEXT).await?.text().await?;
        check_sdf_body(body)
    }

    /// Fetch the first descriptive paragraph PubChem holds for a compound
    pub async fn fetch_description(&self, cid: &str) -> Option<String> {
        absorb(
            self.diagnostics.as_ref(),
            "fetch_description",
            self.try_fetch_description(cid).await,
        )
    }

    #[instrument(skip(self))]
    pub async fn try_fetch_description(&self, cid: &str) -> Result<String> {
        let cid = CompoundId::parse(cid)?;
        let url = format!("{}/compound/cid/{}/description/JSON", self.base_url, cid);
        let response: DescriptionResponse = read_json(self.http.get(&url, JSON).await?).await?;

        // The first entry usually carries only the compound title
        response
            .information_list
            .and_then(|list| {
                list.information
                    .into_iter()
                    .find_map(|entry| entry.description)
            })
            .ok_or(ClientError::MissingField {
                field: "InformationList.Information.Description",
            })
    }

    /// URL of a PNG depiction of the compound; makes no request
    ///
    /// ```
    /// use affinity_data_client::PubChemClient;
    ///
    /// let client = PubChemClient::new();
    /// assert_eq!(
    ///     client.build_2d_image_url("2244", 200, 150),
    ///     "https://pubchem.ncbi.nlm.nih.gov/rest/pug/compound/cid/2244/PNG?image_size=200x150"
    /// );
    /// ```
    pub fn build_2d_image_url(&self, cid: &str, width: u32, height: u32) -> String {
        format!(
            "{}/compound/cid/{}/PNG?image_size={}x{}",
            self.base_url,
            urlencoding::encode(cid.trim()),
            width,
            height
        )
    }

    /// [`build_2d_image_url`](Self::build_2d_image_url) at 300x300
    pub fn image_url(&self, cid: &str) -> String {
        self.build_2d_image_url(cid, DEFAULT_IMAGE_SIZE, DEFAULT_IMAGE_SIZE)
    }

    /// Properties and description for a SMILES string
    ///
    /// The description is only requested once properties resolved. A missing
    /// description leaves `description` as `None`.
    pub async fn fetch_full_record(&self, smiles: &str) -> Option<CompoundRecord> {
        absorb(
            self.diagnostics.as_ref(),
            "fetch_full_record",
            self.try_fetch_full_record(smiles).await,
        )
    }

    #[instrument(skip(self))]
    pub async fn try_fetch_full_record(&self, smiles: &str) -> Result<CompoundRecord> {
        let properties = self.try_fetch_properties(smiles).await?;
        let description = self.fetch_description(&properties.cid).await;

        Ok(CompoundRecord {
            properties,
            description,
            synonyms: None,
        })
    }
}

impl Default for PubChemClient {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize_properties(cid: CompoundId, data: PropertyData) -> CompoundProperties {
    CompoundProperties {
        cid: data.cid.unwrap_or(cid.as_u64()).to_string(),
        molecular_weight: data.molecular_weight.unwrap_or_default(),
        molecular_formula: data.molecular_formula.unwrap_or_default(),
        canonical_smiles: data.canonical_smiles.unwrap_or_default(),
        isomeric_smiles: data.isomeric_smiles.unwrap_or_default(),
        iupac_name: data.iupac_name.unwrap_or_default(),
        xlogp: data.xlogp,
        tpsa: data.tpsa,
        h_bond_donor_count: data.h_bond_donor_count,
        h_bond_acceptor_count: data.h_bond_acceptor_count,
        rotatable_bond_count: data.rotatable_bond_count,
        complexity: data.complexity,
        log_p: data.xlogp,
    }
}

/// PubChem reports some failures as a `Status` text body with HTTP 200
fn check_sdf_body(body: String) -> Result<String> {
    if body.is_empty() || body.contains("Status") {
        return Err(ClientError::UpstreamStatus {
            body: body.chars().take(STATUS_EXCERPT_LEN).collect(),
        });
    }
    Ok(body)
}
