//! Fallback chain behaviour against mocked sources.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use barbometro_core::{AppConfig, Environment, Restaurant};
use barbometro_sheets::{
    first_success, CredentialSource, PublicCsvSource, SheetsClient, SourceChain, SourceError,
    SourceErrorKind, SourceStrategy, StructuredApiSource,
};
use futures::future::BoxFuture;
use futures::FutureExt;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CSV: &str = "Nome,Localidade,GPS,Maps,Cozinha,Visitado,Rating,QP,Preço,Site,Barbudo,Notas,Lat,Lng\n\
                   Zé Manel,Lisboa,,,Portuguesa,não,4.1,,15€,,7,,38.7,-9.1\n\
                   Adega,Évora,,,Alentejana,sim,4.5,,25€,,8,,38.5,-7.9\n";

fn test_config(sheets_api_key: Option<&str>, key_endpoint: Option<String>) -> AppConfig {
    AppConfig {
        env: Environment::Test,
        bind_addr: "127.0.0.1:0".parse().expect("addr"),
        log_level: "debug".to_string(),
        sheet_id: "sheet-1".to_string(),
        sheet_range: "Lista!A:N".to_string(),
        csv_gid: 0,
        sheets_api_key: sheets_api_key.map(str::to_string),
        maps_api_key: None,
        sheets_key_endpoint: key_endpoint,
        request_timeout_secs: 5,
        user_agent: "barbometro-test".to_string(),
        map_load_timeout_ms: 1_000,
        map_poll_interval_ms: 10,
        guides_path: "./config/guides.yaml".into(),
    }
}

fn chain_for(server: &MockServer, config: &AppConfig) -> SourceChain {
    let client = SheetsClient::with_base_urls(5, "barbometro-test", &server.uri(), &server.uri())
        .expect("client");
    SourceChain::with_client(config, client)
}

#[tokio::test]
async fn structured_api_wins_when_available() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/v4/spreadsheets/sheet-1/values/.*$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "values": [["Nome"], ["Sushi House", "Lisboa"], ["Adega", "Évora"]]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/spreadsheets/d/e/sheet-1/pub"))
        .respond_with(ResponseTemplate::new(200).set_body_string(CSV))
        .expect(0)
        .mount(&server)
        .await;

    let outcome = chain_for(&server, &test_config(Some("k"), None))
        .fetch_restaurants()
        .await;

    assert_eq!(outcome.source, Some("structured-api"));
    assert!(outcome.failures.is_empty());
    let names: Vec<&str> = outcome.restaurants.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Adega", "Sushi House"]);
}

#[tokio::test]
async fn key_endpoint_failure_falls_through_to_csv() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/sheets-key"))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
            "error": "Google Sheets API key not configured"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/spreadsheets/d/e/sheet-1/pub"))
        .respond_with(ResponseTemplate::new(200).set_body_string(CSV))
        .mount(&server)
        .await;

    let config = test_config(None, Some(format!("{}/api/sheets-key", server.uri())));
    let outcome = chain_for(&server, &config).fetch_restaurants().await;

    assert_eq!(outcome.source, Some("public-csv"));
    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].stage, "structured-api");
    assert_eq!(outcome.failures[0].kind, SourceErrorKind::MissingCredential);

    let names: Vec<&str> = outcome.restaurants.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Adega", "Zé Manel"]);
    assert_eq!(outcome.restaurants[0].locality, "Évora");
}

#[tokio::test]
async fn both_remote_sources_failing_serves_static_data() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let outcome = chain_for(&server, &test_config(Some("k"), None))
        .fetch_restaurants()
        .await;

    assert_eq!(outcome.source, Some("static"));
    assert_eq!(outcome.restaurants.len(), 6);
    let kinds: Vec<SourceErrorKind> = outcome.failures.iter().map(|f| f.kind).collect();
    assert_eq!(
        kinds,
        vec![SourceErrorKind::SourceUnavailable, SourceErrorKind::SourceUnavailable]
    );
}

#[tokio::test]
async fn every_stage_failing_yields_empty_outcome() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(""))
        .mount(&server)
        .await;

    let client = SheetsClient::with_base_urls(5, "barbometro-test", &server.uri(), &server.uri())
        .expect("client");
    let remote_only = SourceChain::new(vec![
        Box::new(StructuredApiSource {
            client: client.clone(),
            credentials: CredentialSource::new(None, None),
            sheet_id: "sheet-1".to_string(),
            range: "Lista!A:N".to_string(),
        }),
        Box::new(PublicCsvSource {
            client,
            sheet_id: "sheet-1".to_string(),
            gid: 0,
        }),
    ]);
    let outcome = remote_only.fetch_restaurants().await;

    assert!(outcome.restaurants.is_empty());
    assert!(outcome.source.is_none());
    let kinds: Vec<SourceErrorKind> = outcome.failures.iter().map(|f| f.kind).collect();
    assert_eq!(
        kinds,
        vec![SourceErrorKind::MissingCredential, SourceErrorKind::MalformedSource]
    );
}

#[test]
fn configured_chain_always_ends_with_static_data() {
    let client = SheetsClient::with_base_urls(5, "t", "http://127.0.0.1:9", "http://127.0.0.1:9")
        .expect("client");
    for config in [
        test_config(None, None),
        test_config(Some("k"), Some("http://127.0.0.1:9/api/sheets-key".to_string())),
    ] {
        assert_eq!(
            SourceChain::with_client(&config, client.clone()).stage_names(),
            vec!["structured-api", "public-csv", "static"]
        );
    }
}

#[tokio::test]
async fn unconfigured_chain_still_serves_records() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(""))
        .mount(&server)
        .await;

    let outcome = chain_for(&server, &test_config(None, None))
        .fetch_restaurants()
        .await;

    assert_eq!(outcome.source, Some("static"));
    assert!(!outcome.restaurants.is_empty());
    assert_eq!(outcome.failures.len(), 2);
}

struct Counting {
    name: &'static str,
    calls: Arc<AtomicUsize>,
    succeed: bool,
}

impl SourceStrategy for Counting {
    fn name(&self) -> &'static str {
        self.name
    }

    fn fetch(&self) -> BoxFuture<'_, Result<Vec<Restaurant>, SourceError>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let result = if self.succeed {
            Ok(Vec::new())
        } else {
            Err(SourceError::SourceUnavailable {
                source_name: self.name,
                reason: "down".to_string(),
            })
        };
        futures::future::ready(result).boxed()
    }
}

#[tokio::test]
async fn stages_after_the_first_success_are_never_attempted() {
    let calls: Vec<Arc<AtomicUsize>> = (0..3).map(|_| Arc::new(AtomicUsize::new(0))).collect();
    let strategies: Vec<Box<dyn SourceStrategy>> = vec![
        Box::new(Counting { name: "a", calls: Arc::clone(&calls[0]), succeed: false }),
        Box::new(Counting { name: "b", calls: Arc::clone(&calls[1]), succeed: true }),
        Box::new(Counting { name: "c", calls: Arc::clone(&calls[2]), succeed: true }),
    ];

    let (winner, failures) = first_success(&strategies).await;

    assert_eq!(winner.map(|(name, _)| name), Some("b"));
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].stage, "a");
    let counts: Vec<usize> = calls.iter().map(|c| c.load(Ordering::SeqCst)).collect();
    assert_eq!(counts, vec![1, 1, 0]);
}
