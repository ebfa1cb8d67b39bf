#![allow(clippy::unwrap_used)]
// Integration tests for route endpoints, confirmed delete and
// cross-network resolution using wiremock.

use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ovpncloud_api::{
    CloudClient, DeletePolicies, DeletePolicy, Error, NetworkRoute, ResourceKind, Route, RouteType,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, CloudClient) {
    let server = MockServer::start().await;
    let client = CloudClient::from_reqwest(&server.uri(), reqwest::Client::new())
        .unwrap()
        .with_delete_policies(DeletePolicies {
            route: DeletePolicy::confirmed().with_delay(Duration::ZERO),
            ..DeletePolicies::default()
        });
    (server, client)
}

fn routes_path(network_id: &str) -> String {
    format!("/api/beta/networks/{network_id}/routes")
}

fn ip_route(id: &str, subnet: &str) -> serde_json::Value {
    json!({ "id": id, "type": "IP_V4", "subnet": subnet, "description": "" })
}

async fn mount_routes(server: &MockServer, network_id: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(routes_path(network_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Route listing that shows `route` for the first `visible` reads and is
/// empty afterwards.
async fn mount_lingering_route(
    server: &MockServer,
    network_id: &str,
    route: serde_json::Value,
    visible: u64,
) {
    if visible > 0 {
        Mock::given(method("GET"))
            .and(path(routes_path(network_id)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([route])))
            .up_to_n_times(visible)
            .with_priority(1)
            .mount(server)
            .await;
    }
    Mock::given(method("GET"))
        .and(path(routes_path(network_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .with_priority(2)
        .mount(server)
        .await;
}

async fn mount_delete(server: &MockServer, network_id: &str, route_id: &str, times: u64) {
    Mock::given(method("DELETE"))
        .and(path(format!("{}/{route_id}", routes_path(network_id))))
        .respond_with(ResponseTemplate::new(200))
        .expect(times)
        .mount(server)
        .await;
}

// ── CRUD ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_then_read_ip_route() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(routes_path("n1")))
        .and(body_partial_json(json!({ "type": "IP_V4", "value": "10.0.0.0/24" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(ip_route("r-1", "10.0.0.0/24")))
        .expect(1)
        .mount(&server)
        .await;
    mount_routes(&server, "n1", json!([ip_route("r-1", "10.0.0.0/24")])).await;

    let created = client
        .create_route(&Route::new(RouteType::IpV4, "10.0.0.0/24", ""), "n1")
        .await
        .unwrap();
    assert_eq!(created.network_id, "n1");
    let id = created.id().unwrap();

    let read = client.get_route_in_network("n1", id).await.unwrap().unwrap();
    assert_eq!(read.route.route_type, RouteType::IpV4);
    assert_eq!(read.route.subnet.as_deref(), Some("10.0.0.0/24"));
    assert_eq!(read.route.target(), Some("10.0.0.0/24"));
}

#[tokio::test]
async fn test_create_then_read_domain_route() {
    let (server, client) = setup().await;
    let stored = json!({ "id": "r-2", "type": "DOMAIN", "domain": "intranet.example.com" });

    Mock::given(method("POST"))
        .and(path(routes_path("n1")))
        .and(body_partial_json(json!({ "type": "DOMAIN", "value": "intranet.example.com" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&stored))
        .mount(&server)
        .await;
    mount_routes(&server, "n1", json!([stored])).await;

    let created = client
        .create_route(&Route::new(RouteType::Domain, "intranet.example.com", "wiki"), "n1")
        .await
        .unwrap();
    let read = client
        .get_route_in_network("n1", created.id().unwrap())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(read.route.domain.as_deref(), Some("intranet.example.com"));
    assert_eq!(read.route.subnet, None);
    assert_eq!(read.route.target(), Some("intranet.example.com"));
}

#[tokio::test]
async fn test_update_route_puts_to_its_id() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path(format!("{}/r-1", routes_path("n1"))))
        .and(body_partial_json(json!({ "id": "r-1", "value": "10.1.0.0/16", "description": "wider" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "r-1",
            "type": "IP_V4",
            "subnet": "10.1.0.0/16",
            "description": "wider",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let route = Route::new(RouteType::IpV4, "10.1.0.0/16", "wider").with_id("r-1");
    let updated = client.update_route(&route, "n1").await.unwrap();

    assert_eq!(updated.network_id, "n1");
    assert_eq!(updated.route.target(), Some("10.1.0.0/16"));
}

#[tokio::test]
async fn test_get_route_in_network_absent() {
    let (server, client) = setup().await;
    mount_routes(&server, "n1", json!([ip_route("r-1", "10.0.0.0/24")])).await;

    let found = client.get_route_in_network("n1", "r-404").await.unwrap();
    assert_eq!(found, None);
}

#[tokio::test]
async fn test_get_route_in_network_listing_failure() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(routes_path("n1")))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = client.get_route_in_network("n1", "r-1").await;
    assert!(
        matches!(result, Err(Error::Api { status: 500, .. })),
        "expected Api error, got: {result:?}"
    );
}

// ── Confirmed delete ────────────────────────────────────────────────

#[tokio::test]
async fn test_delete_route_confirmed_on_first_read_back() {
    let (server, client) = setup().await;
    mount_delete(&server, "n1", "r-1", 1).await;
    mount_lingering_route(&server, "n1", ip_route("r-1", "10.0.0.0/24"), 0).await;

    client.delete_route("n1", "r-1").await.unwrap();
    server.verify().await;
}

#[tokio::test]
async fn test_delete_route_retries_until_gone() {
    let (server, client) = setup().await;
    mount_delete(&server, "n1", "r-1", 3).await;
    mount_lingering_route(&server, "n1", ip_route("r-1", "10.0.0.0/24"), 2).await;

    client.delete_route("n1", "r-1").await.unwrap();
    server.verify().await;
}

#[tokio::test]
async fn test_delete_route_gives_up_after_four_attempts() {
    let (server, client) = setup().await;
    mount_delete(&server, "n1", "r-1", 4).await;
    mount_routes(&server, "n1", json!([ip_route("r-1", "10.0.0.0/24")])).await;

    let err = client.delete_route("n1", "r-1").await.unwrap_err();
    server.verify().await;

    match err {
        Error::DeleteNotConfirmed {
            kind,
            id,
            attempts,
            last_seen,
        } => {
            assert_eq!(kind, ResourceKind::Route);
            assert_eq!(id, "r-1");
            assert_eq!(attempts, 4);
            assert_eq!(last_seen["subnet"], "10.0.0.0/24");
            assert_eq!(last_seen["networkId"], "n1");
        }
        other => panic!("expected DeleteNotConfirmed, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_delete_route_id_cannot_escape_its_network() {
    let (server, client) = setup().await;
    let sneaky = "../../n2/routes/r9";

    Mock::given(method("DELETE"))
        .and(path(format!("{}/..%2F..%2Fn2%2Froutes%2Fr9", routes_path("n1"))))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;
    mount_delete(&server, "n2", "r9", 0).await;
    mount_routes(&server, "n1", json!([])).await;

    let err = client.delete_route("n1", sneaky).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    server.verify().await;
}

#[tokio::test]
async fn test_delete_route_api_error_is_not_retried() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path(format!("{}/r-1", routes_path("n1"))))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "route not found" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let err = client.delete_route("n1", "r-1").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_cancelled_client_sends_nothing() {
    let (server, client) = setup().await;
    let cancel = CancellationToken::new();
    let client = client.with_cancellation(cancel.clone());
    cancel.cancel();

    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let result = client.delete_route("n1", "r-1").await;
    assert!(matches!(result, Err(Error::Cancelled)));
}

#[tokio::test]
async fn test_cancellation_aborts_in_flight_request() {
    let (server, client) = setup().await;
    let cancel = CancellationToken::new();
    let client = client.with_cancellation(cancel.clone());

    Mock::given(method("GET"))
        .and(path(routes_path("n1")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_secs(30)),
        )
        .mount(&server)
        .await;

    let canceller = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        cancel.cancel();
    });

    let result = client.list_routes("n1").await;
    canceller.await.unwrap();
    assert!(matches!(result, Err(Error::Cancelled)));
}

// ── Cross-network resolution ────────────────────────────────────────

async fn mount_networks(server: &MockServer, ids: &[&str]) {
    let body: Vec<serde_json::Value> = ids
        .iter()
        .map(|id| json!({ "id": id, "name": format!("net-{id}") }))
        .collect();
    Mock::given(method("GET"))
        .and(path("/api/beta/networks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_resolve_route_by_id_scans_in_network_order() {
    let (server, client) = setup().await;
    mount_networks(&server, &["N1", "N2"]).await;

    Mock::given(method("GET"))
        .and(path(routes_path("N1")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([ip_route("r1", "10.1.0.0/24")])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(routes_path("N2")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([ip_route("r2", "10.2.0.0/24")])))
        .expect(1)
        .mount(&server)
        .await;

    let found = client.resolve_route_by_id("r2").await.unwrap().unwrap();
    server.verify().await;

    assert_eq!(
        found,
        NetworkRoute::new(
            "N2",
            Route {
                id: Some("r2".into()),
                description: String::new(),
                route_type: RouteType::IpV4,
                subnet: Some("10.2.0.0/24".into()),
                domain: None,
                value: None,
            }
        )
    );
}

#[tokio::test]
async fn test_resolve_route_by_id_first_network_wins() {
    let (server, client) = setup().await;
    mount_networks(&server, &["N1", "N2"]).await;
    mount_routes(&server, "N1", json!([ip_route("dup", "10.1.0.0/24")])).await;

    Mock::given(method("GET"))
        .and(path(routes_path("N2")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([ip_route("dup", "10.2.0.0/24")])))
        .expect(0)
        .mount(&server)
        .await;

    let found = client.resolve_route_by_id("dup").await.unwrap().unwrap();
    assert_eq!(found.network_id, "N1");
}

#[tokio::test]
async fn test_resolve_route_by_id_absent_after_full_scan() {
    let (server, client) = setup().await;
    mount_networks(&server, &["N1", "N2", "N3"]).await;
    for network in ["N1", "N2", "N3"] {
        Mock::given(method("GET"))
            .and(path(routes_path(network)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([ip_route("other", "10.9.0.0/24")])))
            .expect(1)
            .mount(&server)
            .await;
    }

    let found = client.resolve_route_by_id("r-404").await.unwrap();
    assert_eq!(found, None);
    server.verify().await;
}

#[tokio::test]
async fn test_resolve_route_by_id_propagates_scan_failure() {
    let (server, client) = setup().await;
    mount_networks(&server, &["N1", "N2"]).await;

    Mock::given(method("GET"))
        .and(path(routes_path("N1")))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;
    mount_routes(&server, "N2", json!([ip_route("r2", "10.2.0.0/24")])).await;

    let result = client.resolve_route_by_id("r2").await;
    assert!(
        matches!(result, Err(Error::Api { status: 502, .. })),
        "expected Api error, got: {result:?}"
    );
}
