use std::sync::Arc;
use std::time::Instant;
use axum::{routing::{get, post}, Router, Json};
use axum::extract::Query;
use tower_http::cors::{CorsLayer, Any};
use serde::{Deserialize, Serialize};
use axum::http::StatusCode;
use tracing::{debug, info, warn};
use crate::attribute::{Attribute, Bound};
use crate::error::Result;
use crate::interface::BrushInterface;

#[derive(Deserialize)]
pub struct AdjustRequest {
    pub attribute: Attribute,
    pub bound: Bound,
    pub value: f64,
}

#[derive(Deserialize)]
pub struct SelectionQuery {
    #[serde(default)]
    pub indices: bool,
}

#[derive(Serialize)]
pub struct Reply<T> {
    pub status: String,
    pub elapsed_ms: f64,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub body: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Serialize)]
pub struct BoundsBody {
    pub bounds: Vec<crate::interface::AttributeBounds>,
}

// The brush is synchronous, so every request runs on the blocking pool while
// the interface lock serializes adjustments.
async fn run<T, F>(interface: Arc<BrushInterface>, job: F) -> (StatusCode, Json<Reply<T>>)
where
    T: Serialize + Send + 'static,
    F: FnOnce(&BrushInterface) -> Result<T> + Send + 'static,
{
    let started = Instant::now();
    let outcome = tokio::task::spawn_blocking(move || job(interface.as_ref())).await;
    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
    let (status, body, error) = match outcome {
        Ok(Ok(body)) => (StatusCode::OK, Some(body), None),
        Ok(Err(e)) => {
            let msg = format!("{e}");
            warn!(%msg, "request failed");
            (StatusCode::INTERNAL_SERVER_ERROR, None, Some(msg))
        }
        Err(e) => {
            warn!(error=%e, "Join error");
            (StatusCode::INTERNAL_SERVER_ERROR, None, Some(String::from("Join error")))
        }
    };
    let label = if error.is_none() { "ok" } else { "error" };
    (status, Json(Reply { status: label.into(), elapsed_ms, body, error }))
}

pub fn router(interface: Arc<BrushInterface>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
        .allow_headers(Any);
    let adjust_interface = Arc::clone(&interface);
    let selection_interface = Arc::clone(&interface);
    let bounds_interface = interface;
    Router::new()
        .route("/v1/adjust", post(move |Json(req): Json<AdjustRequest>| {
            let iface = Arc::clone(&adjust_interface);
            async move {
                let reply = run(iface, move |i| i.adjust(req.attribute, req.bound, req.value)).await;
                if let Some(adjustment) = &reply.1.body {
                    debug!(change=%adjustment.change, delta=adjustment.delta.len(), selected=adjustment.selected, "adjust complete");
                }
                reply
            }
        }))
        .route("/v1/selection", get(move |Query(query): Query<SelectionQuery>| {
            let iface = Arc::clone(&selection_interface);
            async move { run(iface, move |i| i.selection(query.indices)).await }
        }))
        .route("/v1/bounds", get(move || {
            let iface = Arc::clone(&bounds_interface);
            async move { run(iface, |i| Ok(BoundsBody { bounds: i.bounds()? })).await }
        }))
        .layer(cors)
}

pub async fn serve(bind: &str, interface: Arc<BrushInterface>) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!(%bind, "listening");
    axum::serve(listener, router(interface)).await?;
    Ok(())
}
