use std::sync::Arc;

use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::common::{PdbId, is_pdb_code};
use crate::config::ClientConfig;
use crate::diagnostics::{DiagnosticSink, absorb, default_sink};
use crate::error::{ClientError, Result};
use crate::http::{HttpClient, JSON, TEXT, read_json};
use crate::rcsb::models::{BestMatch, SearchMatch, StructureInfo};
use crate::rcsb::responses::{EntryResponse, PolymerEntityResponse, SearchResponse};
use crate::rcsb::search::{SearchRequest, SequenceSearchOptions, clean_sequence};

/// Raw structure files shorter than this are treated as error placeholders
pub const MIN_STRUCTURE_FILE_LEN: usize = 100;

/// Polymer entity read by [`RcsbClient::fetch_chain_sequences`] callers by default
pub const DEFAULT_ENTITY_ID: u32 = 1;

const UNKNOWN_TITLE: &str = "Unknown";

/// Client for the RCSB PDB Data, Search and file download services
///
/// Public lookups return `None` or an empty `Vec` on failure and report the
/// cause to the configured [`DiagnosticSink`]. The `try_*` methods return the
/// cause instead.
///
/// # Example
///
/// ```no_run
/// use affinity_data_client::RcsbClient;
///
/// #[tokio::main]
/// async fn main() {
///     let client = RcsbClient::new();
///     if let Some(info) = client.fetch_structure_info("4hhb").await {
///         println!("{}: {}", info.pdb_id, info.title);
///     }
/// }
/// ```
#[derive(Clone)]
pub struct RcsbClient {
    http: HttpClient,
    data_url: String,
    search_url: String,
    files_url: String,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl RcsbClient {
    pub fn new() -> Self {
        Self::with_config(ClientConfig::new())
    }

    pub fn with_config(config: ClientConfig) -> Self {
        let http = HttpClient::from_config(&config);
        Self::from_parts(http, &config)
    }

    /// Use a preconfigured reqwest client with default service URLs
    pub fn with_client(client: Client) -> Self {
        let config = ClientConfig::new();
        let http = HttpClient::with_client(client, &config);
        Self::from_parts(http, &config)
    }

    fn from_parts(http: HttpClient, config: &ClientConfig) -> Self {
        Self {
            http,
            data_url: config.effective_rcsb_data_url().to_string(),
            search_url: config.effective_rcsb_search_url().to_string(),
            files_url: config.effective_rcsb_files_url().to_string(),
            diagnostics: default_sink(),
        }
    }

    /// Replace the sink that receives absorbed failures
    pub fn with_diagnostics(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.diagnostics = sink;
        self
    }

    /// Check a PDB code without making a request
    ///
    /// ```
    /// use affinity_data_client::RcsbClient;
    ///
    /// assert!(RcsbClient::validate_structure_code("1abc"));
    /// assert!(!RcsbClient::validate_structure_code("ABCD"));
    /// ```
    pub fn validate_structure_code(code: &str) -> bool {
        is_pdb_code(code)
    }

    /// Download the PDB-format coordinate file for an entry
    pub async fn fetch_structure_file(&self, code: &str) -> Option<String> {
        absorb(
            self.diagnostics.as_ref(),
            "fetch_structure_file",
            self.try_fetch_structure_file(code).await,
        )
    }

    #[instrument(skip(self))]
    pub async fn try_fetch_structure_file(&self, code: &str) -> Result<String> {
        let pdb_id = PdbId::parse(code)?;
        let url = format!("{}/download/{}.pdb", self.files_url, pdb_id);

        let body = self.http.get(&url, TEXT).await?.text().await?;
        let length = body.chars().count();
        if length < MIN_STRUCTURE_FILE_LEN {
            return Err(ClientError::UndersizedStructureFile { length });
        }

        debug!(%pdb_id, bytes = body.len(), "Structure file downloaded");
        Ok(body)
    }

    /// Fetch summary metadata for an entry
    ///
    /// Missing sections of the entry document leave the matching fields unset;
    /// a missing title becomes `"Unknown"`.
    pub async fn fetch_structure_info(&self, code: &str) -> Option<StructureInfo> {
        absorb(
            self.diagnostics.as_ref(),
            "fetch_structure_info",
            self.try_fetch_structure_info(code).await,
        )
    }

    #[instrument(skip(self))]
    pub async fn try_fetch_structure_info(&self, code: &str) -> Result<StructureInfo> {
        let pdb_id = PdbId::parse(code)?;
        let url = format!("{}/entry/{}", self.data_url, pdb_id);

        let entry: EntryResponse = read_json(self.http.get(&url, JSON).await?).await?;
        let info = structure_info_from_entry(&pdb_id, entry);

        info!(pdb_id = %info.pdb_id, entities = info.entity_ids.len(), "Structure info retrieved");
        Ok(info)
    }

    /// Rank PDB polymer entities by similarity to `sequence`
    ///
    /// FASTA headers and whitespace are removed first. Hits are returned in the
    /// order the search service ranked them.
    pub async fn search_by_sequence(
        &self,
        sequence: &str,
        options: &SequenceSearchOptions,
    ) -> Vec<SearchMatch> {
        absorb(
            self.diagnostics.as_ref(),
            "search_by_sequence",
            self.try_search_by_sequence(sequence, options).await,
        )
        .unwrap_or_default()
    }

    #[instrument(skip(self, sequence), fields(sequence_len = sequence.len()))]
    pub async fn try_search_by_sequence(
        &self,
        sequence: &str,
        options: &SequenceSearchOptions,
    ) -> Result<Vec<SearchMatch>> {
        let cleaned = clean_sequence(sequence);
        if cleaned.is_empty() {
            return Err(ClientError::InvalidSequence);
        }

        let url = format!("{}/query", self.search_url);
        let request = SearchRequest::sequence(&cleaned, options);
        let response = self.http.post_json(&url, &request).await?;

        // The search service answers 204 when nothing passes the cutoffs
        if response.status() == StatusCode::NO_CONTENT {
            debug!("Sequence search returned no hits");
            return Ok(Vec::new());
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(Vec::new());
        }

        let results: SearchResponse = serde_json::from_str(&body)?;
        info!(hits = results.result_set.len(), "Sequence search completed");
        Ok(results.result_set)
    }

    /// Fetch the polymer entity document for an identifier like `4HHB_1`
    pub async fn fetch_entity_details(&self, entity_id: &str) -> Option<Value> {
        absorb(
            self.diagnostics.as_ref(),
            "fetch_entity_details",
            self.try_fetch_entity_details(entity_id).await,
        )
    }

    #[instrument(skip(self))]
    pub async fn try_fetch_entity_details(&self, entity_id: &str) -> Result<Value> {
        let (entry, entity) = split_entity_id(entity_id)?;
        let url = format!("{}/polymer_entity/{}/{}", self.data_url, entry, entity);
        read_json(self.http.get(&url, JSON).await?).await
    }

    /// Best-scoring PDB entry for a sequence, with its summary metadata
    ///
    /// Uses relaxed cutoffs (e-value 0.1, no identity floor). If the metadata
    /// lookup fails the match is still returned with `info` unset.
    pub async fn find_best_match(&self, sequence: &str) -> Option<BestMatch> {
        absorb(
            self.diagnostics.as_ref(),
            "find_best_match",
            self.try_find_best_match(sequence).await,
        )
    }

    #[instrument(skip(self, sequence))]
    pub async fn try_find_best_match(&self, sequence: &str) -> Result<BestMatch> {
        let top = self
            .try_search_by_sequence(sequence, &SequenceSearchOptions::relaxed())
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| ClientError::NotFound {
                resource: "sequence search hits".to_string(),
            })?;

        let pdb_id = PdbId::extract(&top.identifier).ok_or_else(|| ClientError::NotFound {
            resource: format!("PDB code in {}", top.identifier),
        })?;

        let info = self.fetch_structure_info(pdb_id.as_str()).await;

        Ok(BestMatch {
            pdb_id: pdb_id.to_string(),
            entity_id: top.identifier,
            score: top.score,
            info,
        })
    }

    /// One-letter sequences of a polymer entity ([`DEFAULT_ENTITY_ID`] is the
    /// first entity of an entry)
    pub async fn fetch_chain_sequences(&self, code: &str, entity_id: u32) -> Vec<String> {
        absorb(
            self.diagnostics.as_ref(),
            "fetch_chain_sequences",
            self.try_fetch_chain_sequences(code, entity_id).await,
        )
        .unwrap_or_default()
    }

    #[instrument(skip(self))]
    pub async fn try_fetch_chain_sequences(
        &self,
        code: &str,
        entity_id: u32,
    ) -> Result<Vec<String>> {
        let pdb_id = PdbId::parse(code)?;
        let url = format!("{}/polymer_entity/{}/{}", self.data_url, pdb_id, entity_id);

        let entity: PolymerEntityResponse = read_json(self.http.get(&url, JSON).await?).await?;
        let sequence = entity
            .entity_poly
            .and_then(|poly| {
                poly.pdbx_seq_one_letter_code_can
                    .or(poly.pdbx_seq_one_letter_code)
            })
            .ok_or(ClientError::MissingField {
                field: "entity_poly.pdbx_seq_one_letter_code_can",
            })?;

        Ok(vec![sequence])
    }
}

impl Default for RcsbClient {
    fn default() -> Self {
        Self::new()
    }
}

fn structure_info_from_entry(pdb_id: &PdbId, entry: EntryResponse) -> StructureInfo {
    let (title, description) = match entry.struct_ {
        Some(s) => (s.title, s.pdbx_descriptor),
        None => (None, None),
    };
    let (deposition_date, release_date) = match entry.rcsb_accession_info {
        Some(a) => (a.deposit_date, a.initial_release_date),
        None => (None, None),
    };

    StructureInfo {
        pdb_id: pdb_id.to_string(),
        title: title.unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
        description,
        experimental_method: entry
            .exptl
            .and_then(|methods| methods.into_iter().next())
            .and_then(|e| e.method),
        resolution: entry
            .rcsb_entry_info
            .and_then(|info| info.resolution_combined)
            .and_then(|r| r.first().copied()),
        deposition_date,
        release_date,
        entity_ids: entry
            .rcsb_entry_container_identifiers
            .and_then(|ids| ids.entity_ids)
            .unwrap_or_default(),
    }
}

/// Split `4HHB_1` into a validated entry code and the entity number
fn split_entity_id(entity_id: &str) -> Result<(PdbId, &str)> {
    let invalid = || ClientError::InvalidEntityId {
        entity_id: entity_id.to_string(),
    };

    let (entry, entity) = entity_id.trim().split_once('_').ok_or_else(invalid)?;
    if entity.is_empty() || !entity.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(invalid());
    }
    let entry = PdbId::parse(entry).map_err(|_| invalid())?;
    Ok((entry, entity))
}
