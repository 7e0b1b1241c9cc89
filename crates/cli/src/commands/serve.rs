use anyhow::{Context, Result};
use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use serde_json::{Value, json};
use sitemap_kit_fetcher::ApiClient;
use sitemap_kit_generator::INDEX_FILE;
use std::{
    net::SocketAddr,
    path::{Path, PathBuf},
};
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::error;

use super::load_site_config;

#[derive(Clone)]
struct AppState {
    api: ApiClient,
}

/// Serve generated files and the booking proxy for local checks.
///
/// This command:
/// - Loads site.toml for the backend address
/// - Serves `output` (sitemap.xml, chunks, robots.txt) as static files
/// - Forwards `POST /api/bookings` to the backend's `POST /bookings`
///
/// # Arguments
///
/// * `path` - Site directory containing site.toml
/// * `output` - Directory written by `generate`
/// * `port` - Port to serve on (default: 8080)
pub async fn run(path: PathBuf, output: PathBuf, port: u16) -> Result<()> {
    println!("🌍 Starting local server...");
    println!("   Site: {}", path.display());

    let config = load_site_config(&path)?;
    println!("   ✓ Backend: {}", config.api.base_url);

    if !output.join(INDEX_FILE).exists() {
        println!(
            "   ⚠ {} not found in {}; run 'sitemap-kit generate' first",
            INDEX_FILE,
            output.display()
        );
    }

    let api = ApiClient::new(&config.api).context("Failed to create API client")?;
    let app = router(api, &output);

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    println!("\n🚀 Serving at: http://localhost:{}", port);
    println!("   Sitemap: http://localhost:{}/{}", port, INDEX_FILE);
    println!("   Booking proxy: POST http://localhost:{}/api/bookings", port);
    println!("   Press Ctrl+C to stop\n");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to port")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

fn router(api: ApiClient, output: &Path) -> Router {
    Router::new()
        .route("/api/bookings", post(booking_handler))
        .fallback_service(ServeDir::new(output))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { api })
}

/// Relay a booking to the backend and pass its answer through unchanged.
/// Anything that goes wrong on the way yields a generic 500.
async fn booking_handler(State(state): State<AppState>, body: Bytes) -> Response {
    let payload: Value = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(err) => {
            error!("Booking request body is not JSON: {}", err);
            return internal_error();
        }
    };

    match state.api.forward_booking(&payload).await {
        Ok(reply) => match StatusCode::from_u16(reply.status) {
            Ok(status) => (status, Json(reply.body)).into_response(),
            Err(_) => internal_error(),
        },
        Err(err) => {
            error!("Booking proxy failed: {}", err);
            internal_error()
        }
    }
}

fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"error": "Internal server error"})),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{Body, to_bytes},
        http::{Request, header},
    };
    use sitemap_kit_core::ApiConfig;
    use std::fs;
    use tempfile::TempDir;
    use tower::ServiceExt;

    async fn spawn_backend(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn api(base_url: String) -> ApiClient {
        ApiClient::new(&ApiConfig {
            base_url,
            page_size: 1000,
        })
        .unwrap()
    }

    fn booking_request(body: &str) -> Request<Body> {
        Request::post("/api/bookings")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn read_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_booking_relays_backend_reply() {
        let backend = Router::new().route(
            "/bookings",
            post(|Json(body): Json<Value>| async move {
                (
                    StatusCode::CREATED,
                    Json(json!({"id": 1, "guests": body["guests"]})),
                )
            }),
        );
        let dir = TempDir::new().unwrap();
        let app = router(api(spawn_backend(backend).await), dir.path());

        let response = app
            .oneshot(booking_request(r#"{"villa_id": 3, "guests": 6}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(read_json(response).await, json!({"id": 1, "guests": 6}));
    }

    #[tokio::test]
    async fn test_booking_relays_backend_error_status() {
        let backend = Router::new().route(
            "/bookings",
            post(|| async {
                (
                    StatusCode::CONFLICT,
                    Json(json!({"error": "Villa already booked for these dates"})),
                )
            }),
        );
        let dir = TempDir::new().unwrap();
        let app = router(api(spawn_backend(backend).await), dir.path());

        let response = app.oneshot(booking_request("{}")).await.unwrap();

        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(
            read_json(response).await["error"],
            "Villa already booked for these dates"
        );
    }

    #[tokio::test]
    async fn test_booking_backend_unreachable_is_500() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let dir = TempDir::new().unwrap();
        let app = router(api(format!("http://{}", addr)), dir.path());

        let response = app.oneshot(booking_request("{}")).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            read_json(response).await,
            json!({"error": "Internal server error"})
        );
    }

    #[tokio::test]
    async fn test_booking_non_json_body_is_500() {
        let dir = TempDir::new().unwrap();
        let app = router(api("http://127.0.0.1:9".to_string()), dir.path());

        let response = app.oneshot(booking_request("not json")).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            read_json(response).await,
            json!({"error": "Internal server error"})
        );
    }

    #[tokio::test]
    async fn test_serves_generated_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(INDEX_FILE), "<sitemapindex/>").unwrap();
        let app = router(api("http://127.0.0.1:9".to_string()), dir.path());

        let response = app
            .oneshot(
                Request::get(format!("/{}", INDEX_FILE))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"<sitemapindex/>");
    }
}
