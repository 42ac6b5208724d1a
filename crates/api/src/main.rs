use stockage_api::app::{build_app, AppConfig};

#[tokio::main]
async fn main() {
    stockage_observability::init();

    let password = std::env::var("STOCKAGE_PASSWORD").unwrap_or_else(|_| {
        tracing::warn!("STOCKAGE_PASSWORD not set; using insecure dev default");
        "dev-password".to_string()
    });
    let data_dir = std::env::var("STOCKAGE_DATA_DIR").unwrap_or_else(|_| "data".to_string());
    let addr = std::env::var("STOCKAGE_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

    let app = build_app(AppConfig {
        password,
        data_dir: data_dir.into(),
    })
    .await
    .expect("failed to build application");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {addr}: {e}"));

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
