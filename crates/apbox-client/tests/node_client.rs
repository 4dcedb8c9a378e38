//! Integration tests for `AptosNodeClient` against a local fake fullnode.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use apbox_client::panels::{fetch_sales, TOPAZ_EVENTS_FIELD, TOPAZ_EVENTS_STRUCT, TOPAZ_OWNER};
use apbox_client::{
    AdapterKind, AptosNodeClient, ClientError, FakeWalletAdapter, NodeClient, NodeClients,
    SessionController,
};
use apbox_core::NetworkName;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::HashMap;
use tokio::net::TcpListener;

#[derive(Clone, Default)]
struct Recorded {
    requests: Arc<Mutex<Vec<String>>>,
}

async fn resources(
    State(recorded): State<Recorded>,
    Path(address): Path<String>,
) -> Result<Json<Value>, (StatusCode, String)> {
    recorded.requests.lock().push(format!("resources {address}"));
    match address.as_str() {
        "0xa" => Ok(Json(json!([
            { "type": "0x1::account::Account", "data": { "sequence_number": "3" } },
            { "type": "0x1::coin::CoinStore<0x1::aptos_coin::AptosCoin>", "data": { "coin": { "value": "100" } } }
        ]))),
        _ => Err((
            StatusCode::NOT_FOUND,
            r#"{"message":"Account not found","error_code":"account_not_found"}"#.to_string(),
        )),
    }
}

async fn events(
    State(recorded): State<Recorded>,
    Path((owner, tag, field)): Path<(String, String, String)>,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Value> {
    let limit = query.get("limit").cloned().unwrap_or_default();
    recorded
        .requests
        .lock()
        .push(format!("events {owner} {tag} {field} limit={limit}"));
    Json(json!([
        {
            "version": "2061427",
            "sequence_number": "7",
            "type": format!("{owner}::events::BuyEvent"),
            "data": {
                "price": "250000000",
                "timestamp": "1663000000000000",
                "token_id": {
                    "property_version": "0",
                    "token_data_id": { "collection": "Aptomingos", "creator": "0x1", "name": "Aptomingo #7" }
                }
            }
        }
    ]))
}

async fn start_fullnode() -> (SocketAddr, Recorded) {
    let recorded = Recorded::default();
    let app = Router::new()
        .route("/v1/accounts/{address}/resources", get(resources))
        .route("/v1/accounts/{owner}/events/{tag}/{field}", get(events))
        .with_state(recorded.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("should bind");
    let addr = listener.local_addr().expect("should have address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("fake fullnode should run");
    });
    (addr, recorded)
}

fn client_for(addr: SocketAddr) -> AptosNodeClient {
    AptosNodeClient::new(&format!("http://{addr}/v1"), Duration::from_secs(5))
        .expect("should build client")
}

#[tokio::test]
async fn fetches_account_resources() {
    let (addr, recorded) = start_fullnode().await;
    let client = client_for(addr);

    let resources = client.account_resources("0xa").await.expect("should fetch");

    assert_eq!(resources.len(), 2);
    assert_eq!(
        resources[1].resource_type,
        "0x1::coin::CoinStore<0x1::aptos_coin::AptosCoin>"
    );
    assert_eq!(recorded.requests.lock().as_slice(), ["resources 0xa"]);
}

#[tokio::test]
async fn maps_error_status() {
    let (addr, _) = start_fullnode().await;
    let client = client_for(addr);

    let err = client.account_resources("0xmissing").await.unwrap_err();
    assert!(matches!(
        &err,
        ClientError::Node { status: 404, message } if message.contains("account_not_found")
    ));
}

#[tokio::test]
async fn fetches_topaz_sales_page() {
    let (addr, recorded) = start_fullnode().await;
    let client = client_for(addr);

    let sales = fetch_sales(&client).await.expect("should fetch");

    assert_eq!(sales.len(), 1);
    assert_eq!(sales[0].token_name, "Aptomingo #7");
    assert_eq!(sales[0].price_octas, 250_000_000);
    assert_eq!(
        recorded.requests.lock().as_slice(),
        [format!("events {TOPAZ_OWNER} {TOPAZ_EVENTS_STRUCT} {TOPAZ_EVENTS_FIELD} limit=25")]
    );
}

#[tokio::test]
async fn unreachable_node_is_http_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("should bind");
    let addr = listener.local_addr().expect("should have address");
    drop(listener);

    let err = client_for(addr).account_resources("0xa").await.unwrap_err();
    assert!(matches!(err, ClientError::Http(_)));
}

#[tokio::test]
async fn controller_loads_resources_over_http() {
    let (addr, _) = start_fullnode().await;
    let base = format!("http://{addr}/v1");
    let clients = Arc::new(
        NodeClients::from_urls(&base, &base, Duration::from_secs(5)).expect("should build clients"),
    );
    let controller = SessionController::new(clients);

    let wallet =
        FakeWalletAdapter::new(AdapterKind::Petra, "0xa").with_network(NetworkName::Devnet);
    controller.connect(wallet).await.expect("should connect");

    let snapshot = controller.snapshot();
    let resources = snapshot.resources.expect("resources should be fetched");
    assert!(resources.contains_type("0x1::coin::CoinStore<0x1::aptos_coin::AptosCoin>"));
}
