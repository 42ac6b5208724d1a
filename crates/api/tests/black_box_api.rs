use chrono::{Duration, Utc};
use reqwest::StatusCode;
use serde_json::json;

use stockage_api::app::{build_app, AppConfig};

const PASSWORD: &str = "test-password";

struct TestServer {
    base_url: String,
    data_dir: std::path::PathBuf,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    /// Build the prod router over a throwaway data directory and bind it to
    /// an ephemeral port.
    async fn spawn(fixtures: &[(&str, serde_json::Value)]) -> Self {
        let data_dir = std::env::temp_dir().join(format!("stockage-test-{}", uuid::Uuid::now_v7()));
        std::fs::create_dir_all(&data_dir).expect("failed to create fixture dir");
        for (collection, documents) in fixtures {
            std::fs::write(
                data_dir.join(format!("{collection}.json")),
                serde_json::to_vec(documents).unwrap(),
            )
            .expect("failed to write fixture");
        }

        let app = build_app(AppConfig {
            password: PASSWORD.to_string(),
            data_dir: data_dir.clone(),
        })
        .await
        .expect("failed to build app");

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            data_dir,
            handle,
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
        std::fs::remove_dir_all(&self.data_dir).ok();
    }
}

/// Four documents, one per bucket: stocks 10/20/30/40 at roughly 2/8/15/30
/// months on the shelf (dates are written relative to now, since the report
/// endpoint classifies against the wall clock).
fn columbia_fixture() -> serde_json::Value {
    let now = Utc::now();
    let intake = |months: i64| (now - Duration::days(months * 30 + 1)).to_rfc3339();
    json!([
        {"_id": "a1", "Pais": "GT", "Codigo_SAP": "SAP-1", "Fecha_Ingreso": intake(2),  "Stock_Actual": 10, "U_Estilo": "EST-A"},
        {"_id": "a2", "Pais": "GT", "Codigo_SAP": "SAP-2", "Fecha_Ingreso": intake(8),  "Stock_Actual": 20, "U_Estilo": "EST-A"},
        {"_id": "a3", "Pais": "SV", "Codigo_SAP": "SAP-3", "Fecha_Ingreso": intake(15), "Stock_Actual": 30, "U_Estilo": "EST-B"},
        {"_id": "a4", "Pais": "SV", "Codigo_SAP": "SAP-4", "Fecha_Ingreso": intake(30), "Stock_Actual": 40, "U_Estilo": "EST-B"},
        {"_id": "a5", "Pais": "HN", "Codigo_SAP": "SAP-5", "Fecha_Ingreso": intake(3),  "Stock_Actual": 0,  "U_Estilo": "EST-C"}
    ])
}

async fn open_session(client: &reqwest::Client, base_url: &str) -> String {
    let res = client
        .post(format!("{base_url}/auth/session"))
        .json(&json!({ "password": PASSWORD }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: serde_json::Value = res.json().await.unwrap();
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_is_reachable_without_a_session() {
    let srv = TestServer::spawn(&[("COLUMBIA_GT", columbia_fixture())]).await;

    let res = reqwest::get(format!("{}/health", srv.base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn report_routes_fail_closed_without_a_session() {
    let srv = TestServer::spawn(&[("COLUMBIA_GT", columbia_fixture())]).await;
    let client = reqwest::Client::new();

    for url in [
        format!("{}/collections", srv.base_url),
        format!("{}/collections/COLUMBIA_GT/report", srv.base_url),
    ] {
        let res = client.get(&url).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

        let res = client.get(&url).bearer_auth("not-a-token").send().await.unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}

#[tokio::test]
async fn wrong_password_opens_no_session() {
    let srv = TestServer::spawn(&[("COLUMBIA_GT", columbia_fixture())]).await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/auth/session", srv.base_url))
        .json(&json!({ "password": "guess" }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "invalid_credentials");
}

#[tokio::test]
async fn full_report_over_the_fixture() {
    let srv = TestServer::spawn(&[("COLUMBIA_GT", columbia_fixture())]).await;
    let client = reqwest::Client::new();
    let token = open_session(&client, &srv.base_url).await;

    let res = client
        .get(format!("{}/collections/COLUMBIA_GT/report", srv.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();

    // Zero-stock row is dropped before the headline.
    assert_eq!(body["total_stock"], "100");
    assert_eq!(body["no_data"], false);

    let kpis = body["kpis"].as_array().unwrap();
    assert_eq!(kpis.len(), 4);
    assert_eq!(kpis[0]["label"], "1-6 months");
    assert_eq!(kpis[0]["value"], "10.00%");
    assert_eq!(kpis[3]["value"], "40.00%");

    let buckets = body["buckets"].as_array().unwrap();
    assert_eq!(buckets.len(), 4);
    assert_eq!(buckets[2]["total_stock"], "30");
    assert_eq!(buckets[2]["percent_of_total"], "30.00%");

    let monthly = body["monthly"].as_array().unwrap();
    assert_eq!(monthly.len(), 4);
    assert_eq!(monthly[3]["months_in_inventory"], "24+ months");
    assert_eq!(monthly[3]["percent_of_total"], "40.00% (24+ months)");

    // Option domains come from the unfiltered snapshot (minus the zero-stock row).
    let countries = body["filters"]["countries"].as_array().unwrap();
    assert_eq!(countries.len(), 2);
    let months = body["filters"]["months"].as_array().unwrap();
    assert!(months.iter().all(|m| m["name"].is_string()));
}

#[tokio::test]
async fn filters_narrow_the_report() {
    let srv = TestServer::spawn(&[("COLUMBIA_GT", columbia_fixture())]).await;
    let client = reqwest::Client::new();
    let token = open_session(&client, &srv.base_url).await;

    let res = client
        .get(format!(
            "{}/collections/COLUMBIA_GT/report?country=GT",
            srv.base_url
        ))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();

    // Headline stays unfiltered; the working set narrows.
    assert_eq!(body["total_stock"], "100");
    assert_eq!(body["filtered_stock"], "30");
    let kpis = body["kpis"].as_array().unwrap();
    assert_eq!(kpis[0]["value"], "33.33%");
    assert_eq!(kpis[2]["value"], "0.00%");
}

#[tokio::test]
async fn repeated_filter_params_union_instead_of_overwriting() {
    let srv = TestServer::spawn(&[("COLUMBIA_GT", columbia_fixture())]).await;
    let client = reqwest::Client::new();
    let token = open_session(&client, &srv.base_url).await;

    // Both occurrences of `country` must count; were only the last one kept,
    // the working set would silently shrink to the SV rows.
    let res = client
        .get(format!(
            "{}/collections/COLUMBIA_GT/report?country=GT&country=SV",
            srv.base_url
        ))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["filtered_stock"], "100");

    // Same selection in comma-separated form yields the same report.
    let res = client
        .get(format!(
            "{}/collections/COLUMBIA_GT/report?country=GT,SV",
            srv.base_url
        ))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    let comma: serde_json::Value = res.json().await.unwrap();
    assert_eq!(comma["filtered_stock"], "100");
    assert_eq!(comma["kpis"], body["kpis"]);
}

#[tokio::test]
async fn filtering_everything_out_reports_no_data() {
    let srv = TestServer::spawn(&[("COLUMBIA_GT", columbia_fixture())]).await;
    let client = reqwest::Client::new();
    let token = open_session(&client, &srv.base_url).await;

    let res = client
        .get(format!(
            "{}/collections/COLUMBIA_GT/report?style=EST-NONE",
            srv.base_url
        ))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();

    assert_eq!(body["no_data"], true);
    assert_eq!(body["total_stock"], "100");
    assert!(body["buckets"].as_array().unwrap().is_empty());
    assert!(body["monthly"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn collections_are_listed_and_unknown_ones_are_404() {
    let srv = TestServer::spawn(&[
        ("COLUMBIA_GT", columbia_fixture()),
        ("SKECHERS_GT", columbia_fixture()),
    ])
    .await;
    let client = reqwest::Client::new();
    let token = open_session(&client, &srv.base_url).await;

    let res = client
        .get(format!("{}/collections", srv.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    let ids: Vec<String> = res.json().await.unwrap();
    assert_eq!(ids, vec!["COLUMBIA_GT", "SKECHERS_GT"]);

    let res = client
        .get(format!("{}/collections/NEW_ERA_GT/report", srv.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_filter_params_are_rejected() {
    let srv = TestServer::spawn(&[("COLUMBIA_GT", columbia_fixture())]).await;
    let client = reqwest::Client::new();
    let token = open_session(&client, &srv.base_url).await;

    let res = client
        .get(format!(
            "{}/collections/COLUMBIA_GT/report?month=13",
            srv.base_url
        ))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = client
        .get(format!(
            "{}/collections/COLUMBIA_GT/report?year=twenty24",
            srv.base_url
        ))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}
