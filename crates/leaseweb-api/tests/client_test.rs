#![allow(clippy::unwrap_used)]
// Integration tests for `LeasewebClient` using wiremock.

use secrecy::SecretString;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use leaseweb_api::types::{CredentialType, NetworkInterfaceType, ServerListOptions};
use leaseweb_api::{ClientConfig, Error, LeasewebClient, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, LeasewebClient) {
    let server = MockServer::start().await;
    let config = ClientConfig {
        base_url: Url::parse(&server.uri()).unwrap(),
        token: SecretString::from("secret-token".to_owned()),
        transport: TransportConfig::default(),
    };
    let client = LeasewebClient::new(&config).unwrap();
    (server, client)
}

fn api_path(suffix: &str) -> String {
    format!("/bareMetals/v2/{suffix}")
}

// ── Authentication ──────────────────────────────────────────────────

#[tokio::test]
async fn test_token_header_is_sent() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(api_path("servers/42/powerInfo")))
        .and(header("X-LSW-Auth", "secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "pdu": { "status": "on" },
            "ipmi": { "status": "off" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let info = client.get_power_info("42").await.unwrap();
    assert_eq!(info.pdu.into_option().unwrap().status.as_str_or_empty(), "on");
    assert_eq!(info.ipmi.into_option().unwrap().status.as_str_or_empty(), "off");
}

#[tokio::test]
async fn test_token_with_newline_is_rejected() {
    let config = ClientConfig {
        base_url: Url::parse("https://api.leaseweb.com").unwrap(),
        token: SecretString::from("bad\ntoken".to_owned()),
        transport: TransportConfig::default(),
    };
    let result = LeasewebClient::new(&config);
    assert!(
        matches!(result, Err(Error::InvalidToken { .. })),
        "expected InvalidToken, got: {result:?}"
    );
}

// ── Server ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_get_server() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(api_path("servers/12345")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "12345",
            "contract": { "reference": "db-1", "deliveryStatus": "ACTIVE" },
            "location": { "rack": "13", "site": "AMS-01", "suite": "A6", "unit": "16-17" },
            "networkInterfaces": {
                "public": { "mac": "AA:BB:CC:DD:EE:FF", "ip": "192.0.2.10/24", "nullRouted": false },
                "remoteManagement": { "ip": "10.0.0.5/29" }
            }
        })))
        .mount(&server)
        .await;

    let s = client.get_server("12345").await.unwrap();
    assert_eq!(s.id, "12345");
    let contract = s.contract.into_option().unwrap();
    assert_eq!(contract.reference.as_str_or_empty(), "db-1");
    let location = s.location.into_option().unwrap();
    assert_eq!(location.site.as_str_or_empty(), "AMS-01");
    let nics = s.network_interfaces.into_option().unwrap();
    assert!(nics.internal.is_absent());
    assert_eq!(
        nics.remote_management.into_option().unwrap().ip.as_str_or_empty(),
        "10.0.0.5/29"
    );
}

#[tokio::test]
async fn test_update_reference_sends_body() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path(api_path("servers/42")))
        .and(body_json(json!({ "reference": "web-1" })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client.update_server_reference("42", "web-1").await.unwrap();
}

#[tokio::test]
async fn test_power_on_and_off() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(api_path("servers/42/powerOn")))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(api_path("servers/42/powerOff")))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;

    client.power_on("42").await.unwrap();
    client.power_off("42").await.unwrap();
}

// ── Errors ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_error_keeps_response_envelope() {
    let (server, client) = setup().await;

    let body = json!({
        "errorMessage": "Server not found",
        "errorCode": "404",
        "correlationId": "b6d2f5e0"
    });
    Mock::given(method("GET"))
        .and(path(api_path("servers/nope")))
        .respond_with(ResponseTemplate::new(404).set_body_json(&body))
        .mount(&server)
        .await;

    let err = client.get_server("nope").await.unwrap_err();
    assert!(err.is_not_found());
    let response = err.response().unwrap();
    assert_eq!(response.status, 404);
    let decoded: serde_json::Value =
        serde_json::from_str(response.body.as_deref().unwrap()).unwrap();
    assert_eq!(decoded, body);
    assert_eq!(err.to_string(), "404 Not Found");
}

#[tokio::test]
async fn test_malformed_body_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(api_path("servers/42/leases")))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let result = client.list_leases("42").await;
    assert!(
        matches!(result, Err(Error::Deserialization { .. })),
        "expected Deserialization error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_multibyte_body_at_preview_cut_is_deserialization_error() {
    let (server, client) = setup().await;

    let body = format!("{}é and more", "a".repeat(199));
    Mock::given(method("GET"))
        .and(path(api_path("servers/42")))
        .respond_with(ResponseTemplate::new(200).set_body_string(body.clone()))
        .mount(&server)
        .await;

    match client.get_server("42").await {
        Err(Error::Deserialization { body: raw, .. }) => assert_eq!(raw, body),
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}

// ── Network ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_network_interface_paths() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(api_path("servers/42/networkInterfaces/public")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "open",
            "linkSpeed": "1Gbps"
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(api_path("servers/42/networkInterfaces/public/close")))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;

    let nic = client
        .get_network_interface("42", NetworkInterfaceType::Public)
        .await
        .unwrap();
    assert_eq!(nic.status.as_str_or_empty(), "open");

    client
        .close_network_interface("42", NetworkInterfaceType::Public)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_ip_profile_and_null_route() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path(api_path("servers/42/ips/192.0.2.10")))
        .and(body_json(json!({ "reverseLookup": "host.example.com" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ip": "192.0.2.10/24" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(api_path("servers/42/ips/192.0.2.10/null")))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(api_path("servers/42/ips/192.0.2.10/unnull")))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;

    client
        .update_ip_profile("42", "192.0.2.10", "host.example.com")
        .await
        .unwrap();
    client.null_ip_route("42", "192.0.2.10").await.unwrap();
    client.remove_null_ip_route("42", "192.0.2.10").await.unwrap();
}

// ── Leases ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_and_delete_lease() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(api_path("servers/42/leases")))
        .and(body_json(json!({ "bootfile": "http://pxe/boot.img" })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(api_path("servers/42/leases")))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client.create_lease("42", "http://pxe/boot.img").await.unwrap();
    client.delete_lease("42").await.unwrap();
}

// ── Listings ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_all_servers_follows_pages() {
    let (server, client) = setup().await;

    let first: Vec<_> = (0..50).map(|i| json!({ "id": format!("s{i}") })).collect();
    Mock::given(method("GET"))
        .and(path(api_path("servers")))
        .and(query_param("offset", "0"))
        .and(query_param("limit", "50"))
        .and(query_param("site", "AMS-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "servers": first,
            "_metadata": { "limit": 50, "offset": 0, "totalCount": 52 }
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(api_path("servers")))
        .and(query_param("offset", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "servers": [{ "id": "s50" }, { "id": "s51" }],
            "_metadata": { "limit": 50, "offset": 50, "totalCount": 52 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let options = ServerListOptions {
        site: Some("AMS-01".into()),
        ..ServerListOptions::default()
    };
    let servers = client.list_all_servers(&options).await.unwrap();
    assert_eq!(servers.len(), 52);
    assert_eq!(servers[51].id, "s51");
}

#[tokio::test]
async fn test_list_operating_systems_filter() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(api_path("operatingSystems")))
        .and(query_param("controlPanelId", "PLESK_12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "operatingSystems": [
                { "id": "UBUNTU_22_04_64BIT", "name": "Ubuntu 22.04 LTS (x86_64)" }
            ],
            "_metadata": { "limit": 50, "offset": 0, "totalCount": 1 }
        })))
        .mount(&server)
        .await;

    let systems = client
        .list_all_operating_systems(Some("PLESK_12"))
        .await
        .unwrap();
    assert_eq!(systems.len(), 1);
    assert_eq!(systems[0].id, "UBUNTU_22_04_64BIT");
}

#[tokio::test]
async fn test_get_credential() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(api_path("servers/42/credentials/REMOTE_MANAGEMENT/admin")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "type": "REMOTE_MANAGEMENT",
            "username": "admin",
            "password": "hunter2"
        })))
        .mount(&server)
        .await;

    let credential = client
        .get_credential("42", CredentialType::RemoteManagement, "admin")
        .await
        .unwrap();
    assert_eq!(credential.username, "admin");
    assert_eq!(credential.password.as_str_or_empty(), "hunter2");
}
