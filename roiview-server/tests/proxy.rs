use std::net::SocketAddr;
use std::time::Duration;

use axum::body::Body;
use axum::extract::{OriginalUri, Path, RawQuery};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use roiview_core::{BackendConfig, ImageGrid, RoiList};
use roiview_io::BackendClient;
use roiview_server::{router, ProxyState};
use serde_json::{json, Value};

async fn spawn(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

async fn mock_image(
    Path(idx): Path<String>,
    RawQuery(query): RawQuery,
    OriginalUri(uri): OriginalUri,
) -> Response {
    match idx.as_str() {
        // Echo the path as received to check the index segment was not decoded.
        "a/b" => uri.path().to_string().into_response(),
        // Echo the query so tests can check it was forwarded verbatim.
        "7" => (
            [(header::CONTENT_TYPE, "image/jpeg")],
            query.unwrap_or_default(),
        )
            .into_response(),
        "8" => Response::new(Body::from(vec![0x89, b'P', b'N', b'G'])),
        _ => (StatusCode::NOT_FOUND, "ROI index out of range").into_response(),
    }
}

/// `Cache-Control` of the incoming request, echoed back in JSON bodies.
fn cache_control(headers: &HeaderMap) -> Value {
    headers
        .get(header::CACHE_CONTROL)
        .and_then(|v| v.to_str().ok())
        .map_or(Value::Null, Value::from)
}

fn mock_backend() -> Router {
    Router::new()
        .route(
            "/api/roi/all",
            get(|headers: HeaderMap| async move {
                Json(json!({
                    "data": [
                        {"x": 10.0, "y": 20.0, "cy0": 255, "cy1": 255},
                        {"x": 30.0, "y": 40.0, "cy0": 255, "cy1": 255}
                    ],
                    "request_cache_control": cache_control(&headers)
                }))
            }),
        )
        .route(
            "/api/stats",
            get(|headers: HeaderMap| async move {
                Json(json!({
                    "filtered_rois": 2,
                    "total_rois_in_csv": 100,
                    "filter_criteria": "cy0==255 and cy1==255",
                    "row0_image_loaded": true,
                    "row1_image_loaded": true,
                    "request_cache_control": cache_control(&headers)
                }))
            }),
        )
        .route("/api/roi/:idx/image", get(mock_image))
}

fn broken_backend() -> Router {
    Router::new()
        .route("/api/stats", get(|| async { "<html>oops</html>" }))
        .route(
            "/api/roi/all",
            get(|| async {
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    Json(json!({"error": "images not loaded"})),
                )
            }),
        )
}

async fn proxy_for(backend: &str) -> String {
    let config = BackendConfig::new(backend).unwrap();
    let state = ProxyState::new(config, Duration::from_secs(5)).unwrap();
    let addr = spawn(router(state)).await;
    format!("http://{addr}")
}

async fn closed_port() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

#[tokio::test]
async fn test_image_query_forwarded_verbatim() {
    let backend = spawn(mock_backend()).await;
    let proxy = proxy_for(&format!("http://{backend}")).await;

    let res = reqwest::get(format!("{proxy}/api/roi/7/image?size=9&row=1&channel=4"))
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 200);
    assert_eq!(res.headers()["content-type"], "image/jpeg");
    assert_eq!(res.text().await.unwrap(), "size=9&row=1&channel=4");
}

#[tokio::test]
async fn test_image_content_type_defaults_to_png() {
    let backend = spawn(mock_backend()).await;
    let proxy = proxy_for(&format!("http://{backend}")).await;

    let res = reqwest::get(format!("{proxy}/api/roi/8/image?row=0&channel=0&size=5"))
        .await
        .unwrap();
    assert_eq!(res.headers()["content-type"], "image/png");
    assert_eq!(res.bytes().await.unwrap().as_ref(), &[0x89, b'P', b'N', b'G']);
}

#[tokio::test]
async fn test_image_upstream_status_relayed() {
    let backend = spawn(mock_backend()).await;
    let proxy = proxy_for(&format!("http://{backend}")).await;

    let res = reqwest::get(format!("{proxy}/api/roi/999/image?row=0&channel=0&size=5"))
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 404);
    assert_eq!(res.text().await.unwrap(), "ROI index out of range");
}

#[tokio::test]
async fn test_image_index_segment_not_decoded() {
    let backend = spawn(mock_backend()).await;
    let proxy = proxy_for(&format!("http://{backend}")).await;

    let res = reqwest::get(format!("{proxy}/api/roi/a%2Fb/image?row=0&channel=0&size=5"))
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 200);
    assert_eq!(res.text().await.unwrap(), "/api/roi/a%2Fb/image");
}

#[tokio::test]
async fn test_stats_and_roi_list_relayed() {
    let backend = spawn(mock_backend()).await;
    let proxy = proxy_for(&format!("http://{backend}")).await;

    let res = reqwest::get(format!("{proxy}/api/stats")).await.unwrap();
    assert_eq!(res.status().as_u16(), 200);
    assert_eq!(res.headers()["cache-control"], "no-store");
    let stats: Value = res.json().await.unwrap();
    assert_eq!(stats["total_rois_in_csv"], 100);

    let res = reqwest::get(format!("{proxy}/api/roi/all")).await.unwrap();
    assert_eq!(res.status().as_u16(), 200);
    assert_eq!(res.headers()["cache-control"], "no-store");
    let list: RoiList = res.json().await.unwrap();
    assert_eq!(list.data.len(), 2);
}

#[tokio::test]
async fn test_upstream_requests_disable_caching() {
    let backend = spawn(mock_backend()).await;
    let proxy = proxy_for(&format!("http://{backend}")).await;

    for path in ["/api/stats", "/api/roi/all"] {
        let body: Value = reqwest::get(format!("{proxy}{path}"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["request_cache_control"], "no-store", "{path}");
    }
}

#[tokio::test]
async fn test_client_sees_missing_image_as_status() {
    let backend = spawn(mock_backend()).await;
    let proxy = proxy_for(&format!("http://{backend}")).await;

    // The blocking client owns its own runtime, so keep it off this one.
    let err = tokio::task::spawn_blocking(move || {
        let client = BackendClient::new(
            BackendConfig::new(&proxy).unwrap(),
            Duration::from_secs(5),
        )
        .unwrap();
        let grid = ImageGrid::for_roi(999, 5);
        client.fetch_image(&grid.rows[0][0]).unwrap_err()
    })
    .await
    .unwrap();
    assert!(matches!(err, roiview_io::Error::Status { status: 404, .. }));
}

#[tokio::test]
async fn test_unparseable_stats_is_500() {
    let backend = spawn(broken_backend()).await;
    let proxy = proxy_for(&format!("http://{backend}")).await;

    let res = reqwest::get(format!("{proxy}/api/stats")).await.unwrap();
    assert_eq!(res.status().as_u16(), 500);
    let body: Value = res.json().await.unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_roi_list_keeps_upstream_status() {
    let backend = spawn(broken_backend()).await;
    let proxy = proxy_for(&format!("http://{backend}")).await;

    let res = reqwest::get(format!("{proxy}/api/roi/all")).await.unwrap();
    assert_eq!(res.status().as_u16(), 503);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "images not loaded");
}

#[tokio::test]
async fn test_backend_down_is_500_json_everywhere() {
    let proxy = proxy_for(&closed_port().await).await;

    for path in [
        "/api/stats",
        "/api/roi/all",
        "/api/roi/3/image?row=0&channel=1&size=5",
    ] {
        let res = reqwest::get(format!("{proxy}{path}")).await.unwrap();
        assert_eq!(res.status().as_u16(), 500, "{path}");
        let body: Value = res.json().await.unwrap();
        assert!(
            body["error"].as_str().is_some_and(|m| !m.is_empty()),
            "{path}"
        );
    }
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let backend = spawn(mock_backend()).await;
    let proxy = proxy_for(&format!("http://{backend}")).await;

    let res = reqwest::get(format!("{proxy}/api/nope")).await.unwrap();
    assert_eq!(res.status().as_u16(), 404);
}
