use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::help;
use crate::html;
use crate::store::AssignmentStore;
use crate::types::{Assignment, AssignmentDraft};
use crate::view;

/// Application state shared across requests.
///
/// The store owns a database connection, so all access goes through a
/// mutex; mutations stay serialized on a single logical writer.
pub struct AppState {
    pub store: Mutex<AssignmentStore>,
}

/// Start the web server
pub async fn serve(port: u16, store: AssignmentStore) -> anyhow::Result<()> {
    let state = Arc::new(AppState {
        store: Mutex::new(store),
    });

    let app = router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    println!("\nServer running at http://{}", addr);
    println!("Press Ctrl+C to stop\n");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/api/assignments", get(list_handler).post(add_handler))
        .route("/api/assignments/{id}/toggle", post(toggle_handler))
        .route("/api/assignments/{id}", delete(delete_handler))
        .route("/api/help", get(help_handler))
        .with_state(state)
}

/// Outcome of a toggle or delete. `changed` is false for unknown ids,
/// which the API treats as a successful no-op rather than an error.
#[derive(Serialize)]
struct MutationOutcome {
    changed: bool,
}

#[derive(Serialize)]
struct HelpResponse {
    tip: String,
}

/// Serve the main HTML page
async fn index_handler(State(state): State<Arc<AppState>>) -> Html<String> {
    let store = state.store.lock().await;
    let tip = help::tip_for_day(Utc::now().date_naive());
    let markup = html::render_page(store.assignments(), tip);
    Html(markup.into_string())
}

/// Return assignments as JSON, in display order
async fn list_handler(State(state): State<Arc<AppState>>) -> Json<Vec<Assignment>> {
    let store = state.store.lock().await;
    let ordered: Vec<Assignment> = view::display_order(store.assignments())
        .into_iter()
        .cloned()
        .collect();
    Json(ordered)
}

/// Create an assignment from a validated draft
async fn add_handler(
    State(state): State<Arc<AppState>>,
    Json(draft): Json<AssignmentDraft>,
) -> Result<(StatusCode, Json<Assignment>), (StatusCode, &'static str)> {
    if draft.name.trim().is_empty() {
        return Err((StatusCode::UNPROCESSABLE_ENTITY, "name must not be empty"));
    }

    let mut store = state.store.lock().await;
    let assignment = store.add(draft);
    Ok((StatusCode::CREATED, Json(assignment)))
}

/// Flip an assignment's completion flag
async fn toggle_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Json<MutationOutcome> {
    let mut store = state.store.lock().await;
    Json(MutationOutcome {
        changed: store.toggle_complete(&id),
    })
}

/// Delete an assignment
async fn delete_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Json<MutationOutcome> {
    let mut store = state.store.lock().await;
    Json(MutationOutcome {
        changed: store.remove(&id),
    })
}

/// Return the study tip of the day
async fn help_handler() -> Json<HelpResponse> {
    Json(HelpResponse {
        tip: help::tip_for_day(Utc::now().date_naive()).to_string(),
    })
}
