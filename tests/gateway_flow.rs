//! End-to-end tests for the gateway HTTP surface.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use legacy_gateway::config::GatewayConfig;
use legacy_gateway::crypto::FieldCipher;
use legacy_gateway::gateway::Gateway;
use legacy_gateway::http::HttpServer;
use legacy_gateway::legacy::InMemoryLegacyStore;

const TEST_TOKEN: &str = "123";

/// Boot a gateway on `addr` and return a handle to its legacy store.
async fn start_gateway(addr: SocketAddr) -> Arc<InMemoryLegacyStore> {
    let mut config = GatewayConfig::default();
    config.listener.bind_address = addr.to_string();
    config.auth.bearer_token = TEST_TOKEN.into();
    config.crypto.passphrase = "test-passphrase".into();
    config.crypto.salt = "test-salt".into();

    let cipher =
        FieldCipher::from_passphrase(&config.crypto.passphrase, &config.crypto.salt).unwrap();
    let store = Arc::new(InMemoryLegacyStore::new());
    let gateway = Gateway::new(cipher, store.clone());

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    let server = HttpServer::new(config, gateway);
    tokio::spawn(async move {
        let _ = server.run(listener).await;
    });

    tokio::time::sleep(Duration::from_millis(100)).await;
    store
}

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

fn bearer() -> String {
    format!("Bearer {TEST_TOKEN}")
}

#[tokio::test]
async fn register_then_lookup_round_trip() {
    let addr: SocketAddr = "127.0.0.1:28481".parse().unwrap();
    start_gateway(addr).await;
    let client = client();

    let res = client
        .post(format!("http://{addr}/api/clientes"))
        .header("Authorization", bearer())
        .json(&serde_json::json!({
            "name": "Ana",
            "email": "a@x.com",
            "cpf": "111"
        }))
        .send()
        .await
        .expect("gateway unreachable");

    assert_eq!(res.status(), 200);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["status"], "sucesso");
    assert_eq!(body["id"], 1);
    assert_eq!(body["mensagem"], "Cliente processado pelo legado.");

    let res = client
        .get(format!("http://{addr}/api/clientes/1"))
        .header("Authorization", bearer())
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["id"], 1);
    assert_eq!(body["nome"], "Ana");
    assert_eq!(body["email"], "a@x.com");
    assert_eq!(body["cpf"], "111");
}

#[tokio::test]
async fn requests_without_valid_credential_are_denied_and_change_nothing() {
    let addr: SocketAddr = "127.0.0.1:28482".parse().unwrap();
    let store = start_gateway(addr).await;
    let client = client();

    let res = client
        .post(format!("http://{addr}/api/clientes"))
        .json(&serde_json::json!({ "name": "Ana", "cpf": "111" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 401);

    let res = client
        .post(format!("http://{addr}/api/clientes"))
        .header("Authorization", "Bearer wrong-token")
        .json(&serde_json::json!({ "name": "Ana", "cpf": "111" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 401);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["erro"], "Não autorizado. Token inválido ou ausente.");

    let res = client
        .get(format!("http://{addr}/api/clientes/1"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 401);

    assert!(store.is_empty(), "denied request mutated the store");
}

#[tokio::test]
async fn lookup_of_unknown_id_is_404_with_the_legacy_message() {
    let addr: SocketAddr = "127.0.0.1:28483".parse().unwrap();
    start_gateway(addr).await;

    let res = client()
        .get(format!("http://{addr}/api/clientes/42"))
        .header("Authorization", bearer())
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 404);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["mensagem"], "Cliente nao encontrado");
}

#[tokio::test]
async fn registration_with_missing_fields_is_400() {
    let addr: SocketAddr = "127.0.0.1:28484".parse().unwrap();
    let store = start_gateway(addr).await;
    let client = client();

    let res = client
        .post(format!("http://{addr}/api/clientes"))
        .header("Authorization", bearer())
        .json(&serde_json::json!({ "email": "a@x.com" }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 400);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["erro"], "Dados incompletos");
    assert!(store.is_empty());
}

#[tokio::test]
async fn lookup_with_non_numeric_id_is_400() {
    let addr: SocketAddr = "127.0.0.1:28485".parse().unwrap();
    start_gateway(addr).await;

    let res = client()
        .get(format!("http://{addr}/api/clientes/abc"))
        .header("Authorization", bearer())
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 400);
}

#[tokio::test]
async fn legacy_client_spelling_is_accepted_on_registration() {
    let addr: SocketAddr = "127.0.0.1:28486".parse().unwrap();
    start_gateway(addr).await;

    let res = client()
        .post(format!("http://{addr}/api/clientes"))
        .header("Authorization", bearer())
        .json(&serde_json::json!({ "nome": "Bia", "cpf": "222" }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["status"], "sucesso");
}
