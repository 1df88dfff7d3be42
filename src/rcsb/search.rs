//! Sequence similarity query documents for the RCSB Search API
//!
//! See <https://search.rcsb.org/#search-api> for the request schema.

use serde::Serialize;

/// Polymer type searched against
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SequenceType {
    #[default]
    Protein,
    Dna,
    Rna,
}

/// Cutoffs for a sequence similarity search
///
/// # Example
///
/// ```
/// use affinity_data_client::rcsb::{SequenceSearchOptions, SequenceType};
///
/// let options = SequenceSearchOptions::default()
///     .with_evalue_cutoff(1e-5)
///     .with_identity_cutoff(90.0);
/// assert_eq!(options.sequence_type, SequenceType::Protein);
/// assert_eq!(options.rows, 100);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceSearchOptions {
    pub evalue_cutoff: f64,
    /// Minimum percent identity, 0-100
    pub identity_cutoff: f64,
    pub sequence_type: SequenceType,
    /// Number of ranked hits requested
    pub rows: usize,
}

impl Default for SequenceSearchOptions {
    fn default() -> Self {
        Self {
            evalue_cutoff: 0.01,
            identity_cutoff: 30.0,
            sequence_type: SequenceType::Protein,
            rows: 100,
        }
    }
}

impl SequenceSearchOptions {
    /// Loose cutoffs used to find the single best match for a sequence
    pub fn relaxed() -> Self {
        Self {
            evalue_cutoff: 0.1,
            identity_cutoff: 0.0,
            ..Self::default()
        }
    }

    pub fn with_evalue_cutoff(mut self, evalue_cutoff: f64) -> Self {
        self.evalue_cutoff = evalue_cutoff;
        self
    }

    pub fn with_identity_cutoff(mut self, percent: f64) -> Self {
        self.identity_cutoff = percent;
        self
    }

    pub fn with_sequence_type(mut self, sequence_type: SequenceType) -> Self {
        self.sequence_type = sequence_type;
        self
    }

    pub fn with_rows(mut self, rows: usize) -> Self {
        self.rows = rows;
        self
    }
}

/// Remove FASTA header lines and all whitespace from a sequence
///
/// ```
/// use affinity_data_client::rcsb::clean_sequence;
///
/// let fasta = ">sp|P69905|HBA_HUMAN\nMVLSPADKTN\nVKAAWGKVGA\n";
/// assert_eq!(clean_sequence(fasta), "MVLSPADKTNVKAAWGKVGA");
/// ```
pub fn clean_sequence(raw: &str) -> String {
    raw.lines()
        .filter(|line| !line.trim_start().starts_with('>'))
        .flat_map(|line| line.chars())
        .filter(|c| !c.is_whitespace())
        .collect()
}

#[derive(Debug, Serialize)]
pub(crate) struct SearchRequest<'a> {
    query: TerminalQuery<'a>,
    request_options: RequestOptions,
    return_type: &'static str,
}

#[derive(Debug, Serialize)]
struct TerminalQuery<'a> {
    #[serde(rename = "type")]
    type_: &'static str,
    service: &'static str,
    parameters: SequenceParameters<'a>,
}

#[derive(Debug, Serialize)]
struct SequenceParameters<'a> {
    evalue_cutoff: f64,
    /// Fraction 0-1, unlike the percentage in the options
    identity_cutoff: f64,
    sequence_type: SequenceType,
    value: &'a str,
}

#[derive(Debug, Serialize)]
struct RequestOptions {
    paginate: Paginate,
    scoring_strategy: &'static str,
    sort: [Sort; 1],
}

#[derive(Debug, Serialize)]
struct Paginate {
    start: usize,
    rows: usize,
}

#[derive(Debug, Serialize)]
struct Sort {
    sort_by: &'static str,
    direction: &'static str,
}

impl<'a> SearchRequest<'a> {
    /// `sequence` must already be cleaned
    pub(crate) fn sequence(sequence: &'a str, options: &SequenceSearchOptions) -> Self {
        Self {
            query: TerminalQuery {
                type_: "terminal",
                service: "sequence",
                parameters: SequenceParameters {
                    evalue_cutoff: options.evalue_cutoff,
                    identity_cutoff: options.identity_cutoff / 100.0,
                    sequence_type: options.sequence_type,
                    value: sequence,
                },
            },
            request_options: RequestOptions {
                paginate: Paginate {
                    start: 0,
                    rows: options.rows,
                },
                scoring_strategy: "sequence",
                sort: [Sort {
                    sort_by: "score",
                    direction: "desc",
                }],
            },
            return_type: "polymer_entity",
        }
    }
}
