//! Serving over a real listener and shutting down gracefully.

use std::time::Duration;

use reqwest::StatusCode;

mod common;

#[tokio::test]
async fn test_serves_and_stops_on_shutdown() {
    let (addr, shutdown, handle) = common::start_server().await;
    let client = reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .build()
        .unwrap();

    let res = client
        .get(format!("http://{addr}/healthcheck"))
        .header("request-id", "lifecycle-1")
        .send()
        .await
        .expect("server unreachable");
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers().get("request-id").unwrap(), "lifecycle-1");
    assert_eq!(res.text().await.unwrap(), "OK!");

    shutdown.trigger("test finished");

    let result = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("server did not stop")
        .unwrap();
    assert!(result.is_ok());

    assert!(client
        .get(format!("http://{addr}/healthcheck"))
        .send()
        .await
        .is_err());
}

#[tokio::test]
async fn test_generated_request_id_over_the_wire() {
    let (addr, shutdown, _handle) = common::start_server().await;

    let res = reqwest::get(format!("http://{addr}/api/todos/1"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let request_id = res.headers().get("request-id").unwrap().to_str().unwrap();
    assert_eq!(request_id.len(), 36);

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["code"], "not_found");

    shutdown.trigger("test finished");
}
