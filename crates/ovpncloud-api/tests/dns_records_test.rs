#![allow(clippy::unwrap_used)]
// Integration tests for DNS record and network endpoints using wiremock.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ovpncloud_api::{CloudClient, DeletePolicies, DeletePolicy, DnsRecord, Error, ResourceKind};

async fn setup() -> (MockServer, CloudClient) {
    let server = MockServer::start().await;
    let client = CloudClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
    (server, client)
}

fn record() -> DnsRecord {
    DnsRecord {
        id: None,
        domain: "db.internal".into(),
        description: "primary".into(),
        ipv4_addresses: vec!["10.0.0.5".into()],
        ipv6_addresses: vec![],
    }
}

#[tokio::test]
async fn test_create_dns_record() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/beta/dns-records"))
        .and(body_json(json!({
            "domain": "db.internal",
            "description": "primary",
            "ipV4Addresses": ["10.0.0.5"],
            "ipV6Addresses": [],
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "d-1",
            "domain": "db.internal",
            "description": "primary",
            "ipV4Addresses": ["10.0.0.5"],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let created = client.create_dns_record(&record()).await.unwrap();
    assert_eq!(created.id.as_deref(), Some("d-1"));
    assert!(created.ipv6_addresses.is_empty());
}

#[tokio::test]
async fn test_update_dns_record_requires_id() {
    let (_server, client) = setup().await;
    let result = client.update_dns_record(&record()).await;
    assert!(matches!(
        result,
        Err(Error::MissingId {
            kind: ResourceKind::DnsRecord
        })
    ));
}

#[tokio::test]
async fn test_get_dns_record_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/beta/dns-records/d-404"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    assert!(client.get_dns_record("d-404").await.unwrap_err().is_not_found());
    assert_eq!(client.find_dns_record("d-404").await.unwrap(), None);
}

#[tokio::test]
async fn test_delete_dns_record_confirmed_by_404() {
    let (server, client) = setup().await;
    let client = client.with_delete_policies(DeletePolicies {
        dns_record: DeletePolicy::confirmed().with_delay(Duration::ZERO),
        ..DeletePolicies::default()
    });

    Mock::given(method("DELETE"))
        .and(path("/api/beta/dns-records/d-1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/beta/dns-records/d-1"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    client.delete_dns_record("d-1").await.unwrap();
    server.verify().await;
}

#[tokio::test]
async fn test_list_networks_tolerates_extra_fields() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/beta/networks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": "n1",
                "name": "office",
                "egress": true,
                "internetAccess": "LOCAL",
                "connectors": [{ "id": "c-1" }],
                "routes": [],
            },
            { "id": "n2" },
        ])))
        .mount(&server)
        .await;

    let networks = client.list_networks().await.unwrap();
    assert_eq!(networks.len(), 2);
    assert!(networks[0].egress);
    assert_eq!(networks[0].internet_access.as_deref(), Some("LOCAL"));
    assert_eq!(networks[1].name, "");
}

#[tokio::test]
async fn test_get_network_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/beta/networks/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client.get_network("gone").await.unwrap_err();
    assert!(matches!(
        err,
        Error::NotFound {
            kind: ResourceKind::Network,
            ..
        }
    ));
}
