//! RCSB client tests against mocked Data, Search and file services

mod common;

use affinity_data_client::rcsb::DEFAULT_ENTITY_ID;
use affinity_data_client::{RcsbClient, SequenceSearchOptions};
use common::{rcsb_client, sample_entry_json, sample_pdb_file};
use rstest::rstest;
use serde_json::json;
use tracing_test::traced_test;
use wiremock::matchers::{body_partial_json, header, method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn search_results(identifiers: &[(&str, f64)]) -> serde_json::Value {
    let result_set: Vec<_> = identifiers
        .iter()
        .map(|(identifier, score)| json!({"identifier": identifier, "score": score}))
        .collect();
    json!({
        "query_id": "2e3a1c1c-0000-0000-0000-000000000000",
        "result_type": "polymer_entity",
        "total_count": result_set.len(),
        "result_set": result_set
    })
}

#[tokio::test]
#[traced_test]
async fn test_fetch_structure_file_normalizes_code() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/download/4HHB.pdb"))
        .and(header("accept", "text/plain"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_pdb_file()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (client, _) = rcsb_client(&mock_server);
    let file = client.fetch_structure_file("4hhb").await;
    assert_eq!(file, Some(sample_pdb_file()));
}

#[rstest]
#[case(200)]
#[case(404)]
#[tokio::test]
async fn test_fetch_structure_file_short_body_is_absent(#[case] status: u16) {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/download/1ABC.pdb"))
        .respond_with(ResponseTemplate::new(status).set_body_string("Not Found"))
        .mount(&mock_server)
        .await;

    let (client, sink) = rcsb_client(&mock_server);
    assert!(client.fetch_structure_file("1abc").await.is_none());
    assert_eq!(sink.reports_for("fetch_structure_file").len(), 1);
}

#[tokio::test]
async fn test_fetch_structure_file_boundary_length() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/download/1ABC.pdb"))
        .respond_with(ResponseTemplate::new(200).set_body_string("A".repeat(99)))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/download/2ABC.pdb"))
        .respond_with(ResponseTemplate::new(200).set_body_string("A".repeat(100)))
        .mount(&mock_server)
        .await;

    let (client, _) = rcsb_client(&mock_server);
    assert!(client.fetch_structure_file("1ABC").await.is_none());
    assert_eq!(client.fetch_structure_file("2ABC").await.map(|f| f.len()), Some(100));
}

#[tokio::test]
async fn test_fetch_structure_info() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/entry/4HHB"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_entry_json()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (client, _) = rcsb_client(&mock_server);
    let info = client.fetch_structure_info("4hhb").await.expect("info should load");

    assert_eq!(info.pdb_id, "4HHB");
    assert!(info.title.contains("DEOXYHAEMOGLOBIN"));
    assert_eq!(info.description.as_deref(), Some("HEMOGLOBIN (DEOXY)"));
    assert_eq!(info.experimental_method.as_deref(), Some("X-RAY DIFFRACTION"));
    assert_eq!(info.resolution, Some(1.74));
    assert_eq!(info.release_date.as_deref(), Some("1984-07-17T00:00:00+0000"));
    assert_eq!(info.entity_ids, vec!["1", "2", "3", "4"]);
}

#[tokio::test]
async fn test_fetch_structure_info_partial_schema() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/entry/1ABC"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "rcsb_id": "1ABC",
            "struct": {"title": null},
            "exptl": []
        })))
        .mount(&mock_server)
        .await;

    let (client, _) = rcsb_client(&mock_server);
    let info = client.fetch_structure_info("1abc").await.expect("partial entry still loads");

    assert_eq!(info.title, "Unknown");
    assert!(info.experimental_method.is_none());
    assert!(info.resolution.is_none());
    assert!(info.deposition_date.is_none());
    assert!(info.entity_ids.is_empty());
}

#[tokio::test]
async fn test_search_by_sequence_strips_fasta() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/query"))
        .and(body_partial_json(json!({
            "query": {
                "type": "terminal",
                "service": "sequence",
                "parameters": {
                    "value": "MVLSPADKTNVKAAWGKVGA",
                    "evalue_cutoff": 0.01,
                    "identity_cutoff": 0.3,
                    "sequence_type": "protein"
                }
            },
            "request_options": {"paginate": {"start": 0, "rows": 100}},
            "return_type": "polymer_entity"
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(search_results(&[("4HHB_1", 1.0), ("2HHB_1", 0.98)])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let (client, _) = rcsb_client(&mock_server);
    let fasta = ">sp|P69905|HBA_HUMAN Hemoglobin subunit alpha\nMVLSPADKTN VKAAWGKVGA\n";
    let hits = client
        .search_by_sequence(fasta, &SequenceSearchOptions::default())
        .await;

    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].identifier, "4HHB_1");
    assert_eq!(hits[1].identifier, "2HHB_1");
    assert_eq!(hits[1].score, 0.98);
}

#[tokio::test]
async fn test_search_by_sequence_no_content() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/query"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let (client, sink) = rcsb_client(&mock_server);
    let hits = client
        .search_by_sequence("MKVLAAGIVG", &SequenceSearchOptions::default())
        .await;
    assert!(hits.is_empty());
    assert!(sink.reports().is_empty());
}

#[tokio::test]
async fn test_search_by_sequence_error_returns_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/query"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let (client, sink) = rcsb_client(&mock_server);
    let hits = client
        .search_by_sequence("MKVLAAGIVG", &SequenceSearchOptions::default())
        .await;
    assert!(hits.is_empty());

    let reports = sink.reports_for("search_by_sequence");
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].cause, "Server error");
}

#[tokio::test]
async fn test_fetch_entity_details_passthrough() {
    let mock_server = MockServer::start().await;

    let document = json!({
        "rcsb_id": "4HHB_1",
        "entity_poly": {"type": "polypeptide(L)", "pdbx_strand_id": "A,C"},
        "rcsb_polymer_entity": {"pdbx_description": "Hemoglobin subunit alpha"}
    });

    Mock::given(method("GET"))
        .and(path("/polymer_entity/4HHB/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(document.clone()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (client, _) = rcsb_client(&mock_server);
    assert_eq!(client.fetch_entity_details("4hhb_1").await, Some(document));
}

#[tokio::test]
async fn test_find_best_match() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/query"))
        .and(body_partial_json(json!({
            "query": {"parameters": {"evalue_cutoff": 0.1, "identity_cutoff": 0.0}}
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(search_results(&[("4hhb_1", 1.0), ("1A00_1", 0.9)])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/entry/4HHB"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_entry_json()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (client, _) = rcsb_client(&mock_server);
    let best = client
        .find_best_match("MVLSPADKTNVKAAWGKVGA")
        .await
        .expect("best match should exist");

    assert_eq!(best.pdb_id, "4HHB");
    assert_eq!(best.entity_id, "4hhb_1");
    assert_eq!(best.score, 1.0);
    assert_eq!(best.info.map(|i| i.resolution), Some(Some(1.74)));
}

#[tokio::test]
async fn test_find_best_match_empty_search() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_results(&[])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/entry/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let (client, sink) = rcsb_client(&mock_server);
    assert!(client.find_best_match("MVLSPADKTN").await.is_none());
    assert_eq!(sink.reports_for("find_best_match")[0].cause, "Not found");
}

#[tokio::test]
async fn test_find_best_match_without_extractable_code() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_results(&[("AF_000", 0.5)])))
        .mount(&mock_server)
        .await;

    let (client, _) = rcsb_client(&mock_server);
    assert!(client.find_best_match("MVLSPADKTN").await.is_none());
}

#[tokio::test]
async fn test_find_best_match_keeps_hit_when_info_fails() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_results(&[("3ERT_1", 0.7)])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/entry/3ERT"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let (client, sink) = rcsb_client(&mock_server);
    let best = client.find_best_match("MVLSPADKTN").await.expect("hit is kept");
    assert_eq!(best.pdb_id, "3ERT");
    assert!(best.info.is_none());
    assert_eq!(sink.reports_for("fetch_structure_info").len(), 1);
}

#[tokio::test]
async fn test_fetch_chain_sequences() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/polymer_entity/4HHB/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "entity_poly": {
                "pdbx_seq_one_letter_code": "VLSPADKTNVKAAWGKVGAHAGEYGAEALERMFLSF",
                "pdbx_seq_one_letter_code_can": "VLSPADKTNVKAAWGKVGAHAGEYGAEALERMFLSF"
            }
        })))
        .mount(&mock_server)
        .await;

    let (client, _) = rcsb_client(&mock_server);
    let sequences = client.fetch_chain_sequences("4hhb", DEFAULT_ENTITY_ID).await;
    assert_eq!(sequences, vec!["VLSPADKTNVKAAWGKVGAHAGEYGAEALERMFLSF"]);
}

#[tokio::test]
async fn test_fetch_chain_sequences_failure_is_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/polymer_entity/4HHB/9"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let (client, sink) = rcsb_client(&mock_server);
    assert!(client.fetch_chain_sequences("4HHB", 9).await.is_empty());
    assert_eq!(sink.reports_for("fetch_chain_sequences").len(), 1);
}

#[test]
fn test_validate_structure_code_is_pure() {
    for code in ["1abc", "4HHB", "9zzz"] {
        assert!(RcsbClient::validate_structure_code(code), "{code} should be valid");
    }
    for code in ["0ABC", "ABCD", "12AB5", "", "4HH"] {
        assert!(!RcsbClient::validate_structure_code(code), "{code} should be invalid");
    }
}
