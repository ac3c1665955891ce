#![allow(clippy::unwrap_used)]
// Controller scenarios against a wiremock control plane.

use std::time::Duration;

use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use scom_api::ApiClient;
use scom_core::{
    ConsistencyError, CoreError, HostBinding, L2SegmentSpec, Operation, PtrSpec, Resource,
    ResourceKind, SegmentType, ServerSpec, Session, SessionConfig,
};

// ── Helpers ─────────────────────────────────────────────────────────

const PASSWORD: &str = "s3cret";
const TEMPLATE: &str = r#"{"hostname":"%s","plan":12}"#;

async fn setup() -> (MockServer, Session) {
    let server = MockServer::start().await;
    let client = ApiClient::with_client(
        reqwest::Client::new(),
        Url::parse(&server.uri()).unwrap(),
        "ops@example.com".into(),
        SecretString::from("tok"),
    );
    (server, Session::from_parts(client, SecretString::from(PASSWORD)))
}

fn host(id: u64, title: &str, location: u64) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "type": 1,
        "location": { "id": location, "name": format!("DC{location}") },
        "networks": [
            { "id": id * 10, "host_ip": format!("10.0.0.{id}"), "pool_type": "private", "size": 29, "netmask": "255.255.255.248" },
            { "id": id * 10 + 1, "host_ip": format!("203.0.113.{id}"), "pool_type": "public", "size": 29, "netmask": "255.255.255.248" }
        ],
        "scheduled_release_at": null
    })
}

fn data(value: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "data": value }))
}

async fn mount_get(server: &MockServer, route: &str, value: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(data(value))
        .mount(server)
        .await;
}

async fn forbid(server: &MockServer, verb: &str, route: &str) {
    Mock::given(method(verb))
        .and(path(route))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .named(format!("forbidden {verb} {route}"))
        .mount(server)
        .await;
}

fn segment(id: u64, status: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": "backend",
        "status": status,
        "type": 0,
        "location": { "id": 10, "name": "DC10" },
        "hosts": [{ "id": 1, "mode": "native", "title": "a", "vlan": null }]
    })
}

fn l2_spec(names: &[&str]) -> L2SegmentSpec {
    L2SegmentSpec {
        name: "backend".into(),
        segment_type: SegmentType::Private,
        hosts: names.iter().map(|n| HostBinding::new(*n)).collect(),
    }
}

// ── Session ─────────────────────────────────────────────────────────

#[tokio::test]
async fn establish_logs_in_once() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/p/login_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "tok" })))
        .expect(1)
        .mount(&server)
        .await;

    let config = SessionConfig::new(
        Url::parse(&server.uri()).unwrap(),
        "ops@example.com",
        SecretString::from(PASSWORD),
    );
    let session = Session::establish(&config).await.unwrap();
    assert_eq!(session.client().email(), "ops@example.com");
}

#[tokio::test]
async fn establish_reports_rejected_login() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/p/login_token"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let config = SessionConfig::new(
        Url::parse(&server.uri()).unwrap(),
        "ops@example.com",
        SecretString::from("wrong"),
    );
    let err = Session::establish(&config).await.unwrap_err();
    assert!(matches!(err, CoreError::LoginFailed { status: 401 }));
    assert!(err.is_auth_rejected());
}

// ── Servers ─────────────────────────────────────────────────────────

#[tokio::test]
async fn hostname_in_live_order_is_in_use() {
    let (server, session) = setup().await;
    mount_get(&server, "/rest/hosts", json!([])).await;
    mount_get(&server, "/rest/hosts_pending", json!([])).await;
    mount_get(
        &server,
        "/rest/orders",
        json!([
            { "id": 1, "status": 2, "description": ["web-02"] },
            { "id": 2, "status": 1, "description": ["web-01"] }
        ]),
    )
    .await;

    let servers = session.servers();
    assert!(servers.hostname_in_use("web-01").await.unwrap());
    // Only a cancelled order mentions web-02.
    assert!(!servers.hostname_in_use("web-02").await.unwrap());
}

#[tokio::test]
async fn active_server_short_circuits_lookup() {
    let (server, session) = setup().await;
    mount_get(&server, "/rest/hosts", json!([host(7, "web-01", 10)])).await;
    forbid(&server, "GET", "/rest/hosts_pending").await;
    forbid(&server, "GET", "/rest/orders").await;

    assert!(session.servers().hostname_in_use("web-01").await.unwrap());
}

#[tokio::test]
async fn create_refuses_hostname_in_order_before_cart() {
    let (server, session) = setup().await;
    mount_get(&server, "/rest/hosts", json!([])).await;
    mount_get(&server, "/rest/hosts_pending", json!([])).await;
    mount_get(
        &server,
        "/rest/orders",
        json!([{ "id": 2, "status": 1, "description": ["web-01"] }]),
    )
    .await;
    forbid(&server, "POST", "/rest/server_cart_items").await;
    forbid(&server, "POST", "/rest/orders").await;

    let spec = ServerSpec {
        hostname: "web-01".into(),
        config: TEMPLATE.into(),
    };
    let err = session.servers().create(&spec).await.unwrap_err();

    assert!(matches!(
        err,
        CoreError::Consistency(ConsistencyError::HostnameInUse { ref hostname }) if hostname == "web-01"
    ));
}

#[tokio::test]
async fn create_orders_through_cart_and_checkout() {
    let (server, session) = setup().await;
    mount_get(&server, "/rest/hosts", json!([])).await;
    mount_get(&server, "/rest/hosts_pending", json!([])).await;
    mount_get(&server, "/rest/orders", json!([])).await;

    Mock::given(method("POST"))
        .and(path("/rest/server_cart_items"))
        .and(body_json(json!({ "hostname": "web-01", "plan": 12 })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rest/orders"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let spec = ServerSpec {
        hostname: "web-01".into(),
        config: TEMPLATE.into(),
    };
    let applied = session.servers().create(&spec).await.unwrap();

    assert_eq!(applied.id, "web-01");
    assert_eq!(applied.state.hostname, "web-01");
}

#[tokio::test]
async fn read_of_unclaimed_hostname_is_not_found() {
    let (server, session) = setup().await;
    mount_get(&server, "/rest/hosts", json!([])).await;
    mount_get(&server, "/rest/hosts_pending", json!([])).await;
    mount_get(&server, "/rest/orders", json!([])).await;

    let spec = ServerSpec {
        hostname: "web-09".into(),
        config: TEMPLATE.into(),
    };
    let err = session.servers().read("web-09", &spec).await.unwrap_err();

    assert!(matches!(
        err,
        CoreError::NotFound { kind: ResourceKind::Server, ref identifier } if identifier == "web-09"
    ));
}

#[tokio::test]
async fn delete_schedules_release_with_account_password() {
    let (server, session) = setup().await;

    Mock::given(method("GET"))
        .and(path("/rest/hosts"))
        .and(query_param("title", "web-01"))
        .respond_with(data(json!([host(7, "web-01", 10)])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rest/hosts/7/schedule_release"))
        .and(body_json(json!({ "token": PASSWORD })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": {} })))
        .expect(1)
        .mount(&server)
        .await;

    let spec = ServerSpec {
        hostname: "web-01".into(),
        config: TEMPLATE.into(),
    };
    session.servers().delete("web-01", &spec).await.unwrap();
}

#[tokio::test]
async fn delete_refuses_already_scheduled_release() {
    let (server, session) = setup().await;

    let mut scheduled = host(7, "web-01", 10);
    scheduled["scheduled_release_at"] = json!("2026-11-30T00:00:00Z");
    Mock::given(method("GET"))
        .and(path("/rest/hosts"))
        .and(query_param("title", "web-01"))
        .respond_with(data(json!([scheduled])))
        .mount(&server)
        .await;
    forbid(&server, "POST", "/rest/hosts/7/schedule_release").await;

    let err = session.servers().release("web-01").await.unwrap_err();
    assert!(matches!(err, CoreError::AlreadyScheduled { ref hostname } if hostname == "web-01"));
}

#[tokio::test]
async fn rename_releases_old_then_orders_new() {
    let (server, session) = setup().await;

    Mock::given(method("GET"))
        .and(path("/rest/hosts"))
        .and(query_param("title", "web-01"))
        .respond_with(data(json!([host(7, "web-01", 10)])))
        .with_priority(1)
        .mount(&server)
        .await;
    mount_get(&server, "/rest/hosts", json!([host(7, "web-01", 10)])).await;
    mount_get(&server, "/rest/hosts_pending", json!([])).await;
    mount_get(&server, "/rest/orders", json!([])).await;

    Mock::given(method("POST"))
        .and(path("/rest/hosts/7/schedule_release"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rest/server_cart_items"))
        .and(body_json(json!({ "hostname": "web-02", "plan": 12 })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rest/orders"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let prior = ServerSpec {
        hostname: "web-01".into(),
        config: TEMPLATE.into(),
    };
    let next = ServerSpec {
        hostname: "web-02".into(),
        config: TEMPLATE.into(),
    };
    let applied = session
        .servers()
        .update("web-01", Some(&prior), &next)
        .await
        .unwrap();
    assert_eq!(applied.id, "web-02");
}

#[tokio::test]
async fn pending_server_claims_hostname_before_orders() {
    let (server, session) = setup().await;
    mount_get(&server, "/rest/hosts", json!([])).await;
    mount_get(&server, "/rest/hosts_pending", json!([host(9, "web-01", 10)])).await;
    forbid(&server, "GET", "/rest/orders").await;

    assert!(session.servers().hostname_in_use("web-01").await.unwrap());
}

#[tokio::test]
async fn null_order_fields_do_not_break_lookup() {
    let (server, session) = setup().await;
    mount_get(&server, "/rest/hosts", json!([])).await;
    mount_get(&server, "/rest/hosts_pending", json!([])).await;
    mount_get(
        &server,
        "/rest/orders",
        json!([
            { "id": 1, "status": 2, "description": null, "currency": null, "created_time": null },
            { "id": 2, "status": 1, "description": ["web-01"] }
        ]),
    )
    .await;

    assert!(session.servers().hostname_in_use("web-01").await.unwrap());
}

#[tokio::test]
async fn null_host_fields_do_not_break_listing() {
    let (server, session) = setup().await;
    mount_get(
        &server,
        "/rest/hosts",
        json!([{
            "id": 7,
            "title": "web-01",
            "conf": null,
            "networks": null,
            "location": { "id": 10, "name": null }
        }]),
    )
    .await;

    let hosts = session.servers().list_servers().await.unwrap();
    assert_eq!(hosts.len(), 1);
    assert!(hosts[0].networks.is_empty());
}

#[tokio::test]
async fn several_servers_for_one_title_are_ambiguous() {
    let (server, session) = setup().await;
    Mock::given(method("GET"))
        .and(path("/rest/hosts"))
        .and(query_param("title", "web-01"))
        .respond_with(data(json!([host(7, "web-01", 10), host(8, "web-01", 12)])))
        .expect(1)
        .mount(&server)
        .await;

    let err = session
        .servers()
        .find_server_by_hostname("web-01")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        CoreError::Consistency(ConsistencyError::AmbiguousHostname { ref hostname, matches: 2 })
            if hostname == "web-01"
    ));
}

#[tokio::test]
async fn failed_checkout_is_reported_after_one_cart_add() {
    let (server, session) = setup().await;
    mount_get(&server, "/rest/hosts", json!([])).await;
    mount_get(&server, "/rest/hosts_pending", json!([])).await;
    mount_get(&server, "/rest/orders", json!([])).await;

    Mock::given(method("POST"))
        .and(path("/rest/server_cart_items"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rest/orders"))
        .respond_with(ResponseTemplate::new(402).set_body_string("payment declined"))
        .expect(1)
        .mount(&server)
        .await;

    let spec = ServerSpec {
        hostname: "web-01".into(),
        config: TEMPLATE.into(),
    };
    let err = session.servers().create(&spec).await.unwrap_err();
    assert!(matches!(
        err,
        CoreError::RemoteApi { status: 402, ref body } if body == "payment declined"
    ));
}

#[tokio::test]
async fn slow_reply_becomes_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/p/login_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "tok" })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/hosts"))
        .respond_with(data(json!([])).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let mut config = SessionConfig::new(
        Url::parse(&server.uri()).unwrap(),
        "ops@example.com",
        SecretString::from(PASSWORD),
    );
    config.timeout = Duration::from_secs(1);
    let session = Session::establish(&config).await.unwrap();

    let err = session.servers().list_servers().await.unwrap_err();
    assert!(matches!(err, CoreError::Timeout { timeout_secs: 1 }));
}

// ── PTR records ─────────────────────────────────────────────────────

fn ptr_record(id: u64, address: &str, target: &str) -> serde_json::Value {
    json!({
        "id": id,
        "domain_id": 9,
        "type": "PTR",
        "name": address,
        "ttl": 3600,
        "priority": 0,
        "data": target,
        "disabled": false
    })
}

#[tokio::test]
async fn ptr_create_binds_public_address() {
    let (server, session) = setup().await;

    Mock::given(method("GET"))
        .and(path("/rest/hosts"))
        .and(query_param("title", "web-01"))
        .respond_with(data(json!([host(7, "web-01", 10)])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rest/dns/records//"))
        .and(body_json(json!({ "data": "web-01.example.com", "name": "203.0.113.7" })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({ "data": ptr_record(55, "203.0.113.7", "web-01.example.com") })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let spec = PtrSpec {
        hostname: "web-01".into(),
        ptr: "web-01.example.com".into(),
    };
    let applied = session.ptr_records().create(&spec).await.unwrap();

    assert_eq!(applied.id, "55");
    assert_eq!(applied.state.address, "203.0.113.7");
    assert_eq!(applied.state.domain_id, 9);
}

#[tokio::test]
async fn ptr_for_unknown_server_is_not_found() {
    let (server, session) = setup().await;
    mount_get(&server, "/rest/hosts", json!([])).await;
    forbid(&server, "POST", "/rest/dns/records//").await;

    let err = session
        .ptr_records()
        .resolve_public_address("ghost")
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::NotFound { kind: ResourceKind::Server, .. }));
}

#[tokio::test]
async fn ptr_for_server_without_public_network_is_refused() {
    let (server, session) = setup().await;
    let mut private_only = host(7, "web-01", 10);
    private_only["networks"] = json!([
        { "id": 70, "host_ip": "10.0.0.7", "pool_type": "private", "size": 29, "netmask": "255.255.255.248" }
    ]);
    Mock::given(method("GET"))
        .and(path("/rest/hosts"))
        .and(query_param("title", "web-01"))
        .respond_with(data(json!([private_only])))
        .mount(&server)
        .await;
    forbid(&server, "POST", "/rest/dns/records//").await;

    let spec = PtrSpec {
        hostname: "web-01".into(),
        ptr: "web-01.example.com".into(),
    };
    let err = session.ptr_records().create(&spec).await.unwrap_err();
    assert!(matches!(err, CoreError::NoPublicNetwork { ref hostname } if hostname == "web-01"));
}

#[tokio::test]
async fn ptr_update_failure_window_leaves_no_record() {
    let (server, session) = setup().await;

    // First listing still has the record; later listings do not.
    Mock::given(method("GET"))
        .and(path("/rest/dns/records//"))
        .respond_with(data(json!([ptr_record(55, "203.0.113.7", "old.example.com")])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_get(&server, "/rest/dns/records//", json!([])).await;

    Mock::given(method("GET"))
        .and(path("/rest/hosts"))
        .and(query_param("title", "web-01"))
        .respond_with(data(json!([host(7, "web-01", 10)])))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/rest/dns/records///55"))
        .and(body_json(json!({ "domain_id": 9 })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rest/dns/records//"))
        .respond_with(ResponseTemplate::new(500).set_body_string("dns backend down"))
        .expect(1)
        .mount(&server)
        .await;

    let prior = PtrSpec {
        hostname: "web-01".into(),
        ptr: "old.example.com".into(),
    };
    let next = PtrSpec {
        hostname: "web-01".into(),
        ptr: "new.example.com".into(),
    };
    let ptrs = session.ptr_records();

    let err = ptrs.update("55", Some(&prior), &next).await.unwrap_err();
    assert!(matches!(
        err,
        CoreError::RemoteApi { status: 500, ref body } if body == "dns backend down"
    ));

    let err = ptrs.read("55", &next).await.unwrap_err();
    assert!(matches!(err, CoreError::NotFound { kind: ResourceKind::PtrRecord, .. }));
}

#[tokio::test]
async fn ptr_update_without_change_issues_no_mutation() {
    let (server, session) = setup().await;
    mount_get(
        &server,
        "/rest/dns/records//",
        json!([ptr_record(55, "203.0.113.7", "web-01.example.com")]),
    )
    .await;
    forbid(&server, "DELETE", "/rest/dns/records///55").await;
    forbid(&server, "POST", "/rest/dns/records//").await;

    let spec = PtrSpec {
        hostname: "web-01".into(),
        ptr: "web-01.example.com".into(),
    };
    let applied = session
        .ptr_records()
        .update("55", Some(&spec), &spec)
        .await
        .unwrap();
    assert_eq!(applied.id, "55");
}

// ── L2 segments ─────────────────────────────────────────────────────

#[tokio::test]
async fn segment_across_locations_is_refused_without_mutation() {
    let (server, session) = setup().await;
    mount_get(
        &server,
        "/rest/hosts",
        json!([host(1, "a", 10), host(2, "b", 12)]),
    )
    .await;
    forbid(&server, "POST", "/rest/l2_segments/").await;

    let err = session
        .l2_segments()
        .create(&l2_spec(&["a", "b"]))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Hosts have different locations.");
    assert!(matches!(
        err,
        CoreError::Consistency(ConsistencyError::MixedLocation { .. })
    ));
}

#[tokio::test]
async fn segment_without_members_is_a_validation_error() {
    let (server, session) = setup().await;
    mount_get(&server, "/rest/hosts", json!([host(1, "a", 10)])).await;
    forbid(&server, "POST", "/rest/l2_segments/").await;

    let err = session.l2_segments().create(&l2_spec(&[])).await.unwrap_err();
    assert!(matches!(err, CoreError::Validation { ref field, .. } if field == "hosts"));
}

#[tokio::test]
async fn segment_with_unready_host_is_refused() {
    let (server, session) = setup().await;
    mount_get(&server, "/rest/hosts", json!([host(1, "a", 10)])).await;
    forbid(&server, "POST", "/rest/l2_segments/").await;

    let err = session
        .l2_segments()
        .create(&l2_spec(&["a", "b"]))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Not all hosts are ready.");
}

#[tokio::test]
async fn segment_in_one_location_is_created_once() {
    let (server, session) = setup().await;
    mount_get(
        &server,
        "/rest/hosts",
        json!([host(1, "a", 10), host(2, "b", 10), host(3, "c", 12)]),
    )
    .await;

    Mock::given(method("POST"))
        .and(path("/rest/l2_segments/"))
        .and(body_json(json!({
            "delete_ips": null,
            "hosts": [{ "id": 1, "mode": "native" }, { "id": 2, "mode": "trunk" }],
            "location_id": 10,
            "name": "backend",
            "type": 0
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "data": segment(4, "new") })))
        .expect(1)
        .mount(&server)
        .await;

    let mut spec = l2_spec(&["a"]);
    spec.hosts.push(HostBinding::with_mode("b", "trunk"));
    let applied = session.l2_segments().create(&spec).await.unwrap();

    assert_eq!(applied.id, "4");
    assert_eq!(applied.state.location_id, Some(10));
}

#[tokio::test]
async fn inactive_segment_refuses_update_and_delete() {
    let (server, session) = setup().await;
    mount_get(&server, "/rest/l2_segments", json!([segment(4, "pending")])).await;
    mount_get(&server, "/rest/hosts", json!([host(1, "a", 10)])).await;
    forbid(&server, "PUT", "/rest/l2_segments/4").await;
    forbid(&server, "DELETE", "/rest/l2_segments/4/").await;

    let segments = session.l2_segments();

    let err = segments.update("4", None, &l2_spec(&["a"])).await.unwrap_err();
    assert!(matches!(
        err,
        CoreError::InvalidStatus { segment_id: 4, ref status, operation: Operation::Update }
            if status == "pending"
    ));

    let err = segments.delete_segment(4).await.unwrap_err();
    assert!(matches!(
        err,
        CoreError::InvalidStatus { operation: Operation::Delete, .. }
    ));
}

#[tokio::test]
async fn active_segment_update_puts_resolved_members() {
    let (server, session) = setup().await;
    mount_get(&server, "/rest/l2_segments", json!([segment(4, "active")])).await;
    mount_get(&server, "/rest/hosts", json!([host(1, "a", 10), host(2, "b", 10)])).await;

    Mock::given(method("PUT"))
        .and(path("/rest/l2_segments/4"))
        .and(body_json(json!({
            "delete_ips": null,
            "hosts": [{ "id": 1, "mode": "native" }, { "id": 2, "mode": "native" }],
            "location_id": 10,
            "name": "backend",
            "type": 0
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": segment(4, "active") })))
        .expect(1)
        .mount(&server)
        .await;

    let applied = session
        .l2_segments()
        .update("4", None, &l2_spec(&["a", "b"]))
        .await
        .unwrap();
    assert_eq!(applied.id, "4");
}

#[tokio::test]
async fn confirmed_segment_delete_then_read_is_not_found() {
    let (server, session) = setup().await;

    Mock::given(method("GET"))
        .and(path("/rest/l2_segments"))
        .respond_with(data(json!([segment(4, "active")])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_get(&server, "/rest/l2_segments", json!([])).await;

    Mock::given(method("DELETE"))
        .and(path("/rest/l2_segments/4/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    let segments = session.l2_segments();
    assert!(segments.delete_segment(4).await.unwrap());

    let err = segments.read("4", &l2_spec(&["a"])).await.unwrap_err();
    assert!(matches!(
        err,
        CoreError::NotFound { kind: ResourceKind::L2Segment, ref identifier } if identifier == "4"
    ));
}

#[tokio::test]
async fn unconfirmed_segment_delete_is_an_error() {
    let (server, session) = setup().await;
    mount_get(&server, "/rest/l2_segments", json!([segment(4, "active")])).await;

    Mock::given(method("DELETE"))
        .and(path("/rest/l2_segments/4/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": false })))
        .mount(&server)
        .await;

    let err = session
        .l2_segments()
        .delete("4", &l2_spec(&["a"]))
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::DeletionNotConfirmed { segment_id: 4 }));
}
