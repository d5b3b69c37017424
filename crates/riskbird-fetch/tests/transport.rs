#![cfg(feature = "reqwest")]

use httpmock::prelude::*;
use riskbird_fetch::{Category, Client, ClientConfig, Error, ErrorKind, RetryPolicy};
use serde_json::json;

const ENTITY: &str = "91110000000000000X";

fn client(server: &MockServer, config: ClientConfig) -> Client<riskbird_fetch::ReqwestClient> {
    Client::new(config.base_url(server.base_url()).delay_secs(0)).unwrap()
}

#[tokio::test]
async fn identity_headers_and_cookie_are_sent() {
    let server = MockServer::start();
    let query = server.mock(|when, then| {
        when.method(GET)
            .path("/api/ent/query")
            .query_param("entId", ENTITY)
            .header("cookie", "sid=abc")
            .header("user-agent", "riskbird-test/1.0")
            .header("app-device", "WEB")
            .header("referer", format!("{}/ent/", server.base_url()));
        then.status(200).json_body(json!({
            "orderNo": "ORD1",
            "basicResult": { "apiData": {
                "list": { "jbxxInfo": { "entName": "Acme Ltd" } },
                "count": { "propertyIcp": 1 }
            }}
        }));
    });

    let client = client(&server, ClientConfig::default().cookie("sid=abc").user_agent("riskbird-test/1.0"));
    let info = client.entity_info(ENTITY).await.unwrap();

    assert_eq!(info.order_no, "ORD1");
    assert_eq!(info.profile.ent_name, "Acme Ltd");
    assert_eq!(query.calls(), 1);
}

#[tokio::test]
async fn entity_id_is_sent_as_a_single_query_value() {
    let server = MockServer::start();
    let query = server.mock(|when, then| {
        when.method(GET)
            .path("/api/ent/query")
            .query_param("entId", "a&b=c#d");
        then.status(200).json_body(json!({ "orderNo": "ORD1" }));
    });

    let client = client(&server, ClientConfig::default());
    assert_eq!(client.resolve_session("a&b=c#d").await.unwrap(), "ORD1");
    assert_eq!(query.calls(), 1);
}

#[tokio::test]
async fn category_and_search_round_trip() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/ent/query");
        then.status(200).json_body(json!({ "orderNo": "ORD1" }));
    });
    let list = server.mock(|when, then| {
        when.method(POST)
            .path("/riskbird-api/companyInfo/list")
            .header("xs-content-type", "application/json")
            .header("content-type", "application/json");
        then.status(200).json_body(json!({
            "code": "20000",
            "data": { "totalCount": 1, "apiData": [{ "webname": "acme" }] }
        }));
    });
    let search = server.mock(|when, then| {
        when.method(POST).path("/riskbird-api/newSearch");
        then.status(200).json_body(json!({
            "success": true,
            "data": { "total": 1, "list": [{ "ENTNAME": "Acme Ltd", "entid": ENTITY }] }
        }));
    });

    let client = client(&server, ClientConfig::default());

    let records = client.fetch_all(ENTITY, Category::PropertyIcp).await.unwrap();
    assert_eq!(records, vec![json!({ "webname": "acme" })]);
    assert_eq!(list.calls(), 1);

    let hits = client.search("Acme").await.unwrap();
    assert_eq!(hits[0].ent_id, ENTITY);
    assert_eq!(search.calls(), 1);
}

#[tokio::test]
async fn statuses_map_to_errors_without_retry() {
    let cases = [
        (401, ErrorKind::Access),
        (403, ErrorKind::Access),
        (404, ErrorKind::NotFound),
        (418, ErrorKind::Protocol),
    ];

    for (status, kind) in cases {
        let server = MockServer::start();
        let query = server.mock(|when, then| {
            when.method(GET).path("/api/ent/query");
            then.status(status);
        });

        let client = client(&server, ClientConfig::default());
        let err = client.resolve_session(ENTITY).await.unwrap_err();

        assert_eq!(err.kind(), kind, "status {status}: {err}");
        assert_eq!(query.calls(), 1, "status {status} was retried");
    }
}

#[tokio::test]
async fn redirect_is_classified_not_followed() {
    let server = MockServer::start();
    let login = server.mock(|when, then| {
        when.path("/login");
        then.status(200).body("login page");
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/ent/query");
        then.status(302)
            .header("location", format!("{}/login", server.base_url()));
    });

    let client = client(&server, ClientConfig::default());
    let err = client.resolve_session(ENTITY).await.unwrap_err();

    assert!(matches!(err, Error::AuthStale));
    assert_eq!(login.calls(), 0);
}

#[tokio::test]
async fn quota_state_surfaces_as_quota_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/ent/query");
        then.status(200).json_body(json!({ "state": "limit:auth" }));
    });

    let client = client(&server, ClientConfig::default());
    let err = client.company_info(ENTITY).await.unwrap_err();

    assert!(matches!(err, Error::QuotaExceeded));
    assert_eq!(err.kind(), ErrorKind::Quota);
}

#[tokio::test]
async fn refused_connection_exhausts_capped_policy() {
    // Nothing listens on port 9 of localhost in the test environment.
    let config = ClientConfig::default()
        .base_url("http://127.0.0.1:9")
        .delay_secs(0)
        .retry(RetryPolicy::default().capped(1).cooldown_secs(0));
    let client = Client::new(config).unwrap();

    match client.resolve_session(ENTITY).await {
        Err(Error::RetriesExhausted { attempts, .. }) => assert_eq!(attempts, 2),
        other => panic!("expected RetriesExhausted, got {other:?}"),
    }
}
