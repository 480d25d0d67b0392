use crate::environment::EnvironmentMap;
use crate::offer::OfferLookup;
use crate::page_context::PageContext;
use crate::plan::select_plan;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub struct AppState {
    pub env: EnvironmentMap,
    pub lookup: Box<dyn OfferLookup>,
}

#[derive(Debug, Deserialize)]
pub struct PlanQuery {
    plan: String,
    page: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/plan", get(plan))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

async fn index() -> &'static str {
    "pricing columns: GET /api/plan?plan=<checkout url>&page=<page url>"
}

async fn plan(State(state): State<Arc<AppState>>, Query(query): Query<PlanQuery>) -> Response {
    let page = match PageContext::new(&query.page) {
        Ok(page) => page,
        Err(e) => return (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    };
    match select_plan(state.lookup.as_ref(), &page, &state.env, &query.plan).await {
        Ok(selected) => Json(selected).into_response(),
        Err(e) => {
            tracing::info!("rejected plan request: {e}");
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
    }
}
