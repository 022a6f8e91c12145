//! Serve command - runs the Doable REST server.
//!
//! The server is thin plumbing over `doable::ListService`: it resolves the
//! caller identity from the `x-auth-token` header, forwards each route to
//! the matching service operation, and maps the library's error classes
//! onto HTTP status codes. List state lives in the in-memory store, loaded
//! from a JSON snapshot at startup and saved back on graceful shutdown.

use std::{path::PathBuf, sync::Arc};

use axum::{
    Json, Router,
    extract::{FromRequestParts, Path, State},
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use serde::{Deserialize, Serialize};
use tokio::signal::unix::{SignalKind, signal};
use tracing_subscriber::EnvFilter;

use doable::{
    ItemId, ListId, ListService, UserId,
    ordering::DeletePolicy,
    store::{InMemory, ListStore},
};

use crate::cli::ServeArgs;

const SNAPSHOT_FILE: &str = "doable.json";
const AUTH_HEADER: &str = "x-auth-token";

/// Shared application state
#[derive(Clone)]
struct AppState {
    service: Arc<ListService>,
}

/// Create list request body
#[derive(Deserialize)]
struct CreateListRequest {
    list_name: String,
    #[serde(rename = "type")]
    list_type: Option<String>,
}

/// Update list request body; omitted fields are left untouched
#[derive(Deserialize)]
struct UpdateListRequest {
    list_name: Option<String>,
    #[serde(rename = "type")]
    list_type: Option<String>,
}

/// Item create/edit request body
#[derive(Deserialize)]
struct ItemContentRequest {
    content: String,
}

/// Reorder request body: the full item id sequence in the desired order
#[derive(Deserialize)]
struct ReorderRequest {
    new_order: Vec<String>,
}

/// Error response body
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

fn error_body(message: impl Into<String>) -> Json<ErrorBody> {
    Json(ErrorBody {
        error: message.into(),
    })
}

/// Run the Doable server
pub async fn run(args: &ServeArgs) -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("doable=info".parse().unwrap()),
        )
        .init();

    let data_dir = args.data_dir.clone().unwrap_or_else(|| PathBuf::from("."));
    let snapshot_path = data_dir.join(SNAPSHOT_FILE);

    // Load or create the store
    let store = match InMemory::load_from_file(&snapshot_path).await {
        Ok(store) => {
            tracing::info!("Loaded store from {}", snapshot_path.display());
            store
        }
        Err(e) => {
            tracing::warn!("Failed to load store: {e:?}. Starting with an empty one.");
            InMemory::new()
        }
    };

    let delete_policy = if args.preserve_gaps {
        DeletePolicy::PreserveGaps
    } else {
        DeletePolicy::RenumberSurvivors
    };

    let service = Arc::new(
        ListService::new(Arc::new(store) as Arc<dyn ListStore>).with_delete_policy(delete_policy),
    );
    let app_state = AppState {
        service: service.clone(),
    };

    // Build router
    let app = Router::new()
        .route("/health", get(handle_health))
        .route("/api/lists", post(handle_create_list))
        .route(
            "/api/lists/{id}",
            get(handle_owner_lists)
                .put(handle_update_list)
                .delete(handle_delete_list),
        )
        .route("/api/lists/{id}/items", post(handle_add_item))
        .route(
            "/api/lists/{id}/items/{item_id}",
            put(handle_edit_item).delete(handle_delete_item),
        )
        .route("/api/lists/{id}/reorder", put(handle_reorder_items))
        .with_state(app_state.clone());

    // Bind server
    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    let local_addr = listener.local_addr()?;

    // Print startup message
    println!(
        "Doable server starting on http://localhost:{}",
        local_addr.port()
    );
    println!();
    println!("Available endpoints:");
    println!("  GET    /health                            - Liveness probe");
    println!("  POST   /api/lists                         - Create a list");
    println!("  GET    /api/lists/{{user_id}}               - Lists owned by a user");
    println!("  PUT    /api/lists/{{id}}                    - Update list name/type");
    println!("  DELETE /api/lists/{{id}}                    - Delete a list");
    println!("  POST   /api/lists/{{id}}/items              - Append an item");
    println!("  PUT    /api/lists/{{id}}/items/{{item_id}}    - Edit item content");
    println!("  DELETE /api/lists/{{id}}/items/{{item_id}}    - Delete an item");
    println!("  PUT    /api/lists/{{id}}/reorder            - Reorder items");
    println!();
    println!("Press Ctrl+C to shutdown");

    // Start server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let mut sigterm =
                signal(SignalKind::terminate()).expect("failed to set up SIGTERM handler");
            let mut sigint =
                signal(SignalKind::interrupt()).expect("failed to set up SIGINT handler");

            tokio::select! {
                _ = sigterm.recv() => tracing::info!("Received SIGTERM, initiating graceful shutdown..."),
                _ = sigint.recv() => tracing::info!("Received SIGINT, initiating graceful shutdown..."),
            }

            // Save the store on shutdown (only needed for the InMemory backend)
            if let Some(in_memory) = app_state
                .service
                .store()
                .as_any()
                .downcast_ref::<InMemory>()
            {
                match in_memory.save_to_file(&snapshot_path).await {
                    Ok(()) => {
                        tracing::info!("Store saved to {}", snapshot_path.display());
                        println!("\nStore saved successfully");
                    }
                    Err(e) => {
                        tracing::error!("Failed to save store: {e:?}");
                        eprintln!("Failed to save store: {e:?}");
                    }
                }
            }
        })
        .await?;

    println!("Server shut down");
    Ok(())
}

/// The resolved caller identity, extracted from the `x-auth-token` header.
///
/// Token issuance and verification live outside this server; what arrives
/// here is treated as the already-resolved user id. A real deployment
/// swaps [`resolve_token`] for a verifier that validates the token and
/// extracts the subject.
struct Caller(UserId);

/// Resolves a presented bearer token to a caller identity.
fn resolve_token(token: &str) -> Option<UserId> {
    if token.is_empty() {
        None
    } else {
        Some(UserId::from(token))
    }
}

impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTH_HEADER)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("");

        match resolve_token(token) {
            Some(user_id) => Ok(Caller(user_id)),
            None => Err((
                StatusCode::UNAUTHORIZED,
                error_body("Access denied. No token provided."),
            )
                .into_response()),
        }
    }
}

/// Maps a library error onto an HTTP response.
fn error_response(err: &doable::Error) -> Response {
    let status = if err.is_not_found() {
        StatusCode::NOT_FOUND
    } else if err.is_permission_denied() {
        StatusCode::FORBIDDEN
    } else if err.is_invalid_order() || err.is_validation_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    (status, error_body(err.to_string())).into_response()
}

/// Handler for GET /health - liveness probe
async fn handle_health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// Handler for POST /api/lists - create a list owned by the caller
async fn handle_create_list(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Json(req): Json<CreateListRequest>,
) -> Response {
    match state
        .service
        .create_list(&caller, req.list_name, req.list_type)
        .await
    {
        Ok(list) => (StatusCode::CREATED, Json(list)).into_response(),
        Err(e) => error_response(&e),
    }
}

/// Handler for GET /api/lists/{id} - lists owned by the given user
async fn handle_owner_lists(
    State(state): State<AppState>,
    Caller(_caller): Caller,
    Path(user_id): Path<String>,
) -> Response {
    match state.service.lists_for_owner(&UserId::from(user_id)).await {
        Ok(lists) => (StatusCode::OK, Json(lists)).into_response(),
        Err(e) => error_response(&e),
    }
}

/// Handler for PUT /api/lists/{id} - update name/type
async fn handle_update_list(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Path(list_id): Path<String>,
    Json(req): Json<UpdateListRequest>,
) -> Response {
    match state
        .service
        .update_list(&caller, &ListId::from(list_id), req.list_name, req.list_type)
        .await
    {
        Ok(list) => (StatusCode::OK, Json(list)).into_response(),
        Err(e) => error_response(&e),
    }
}

/// Handler for DELETE /api/lists/{id}
async fn handle_delete_list(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Path(list_id): Path<String>,
) -> Response {
    match state
        .service
        .delete_list(&caller, &ListId::from(list_id))
        .await
    {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({ "deleted": true })),
        )
            .into_response(),
        Err(e) => error_response(&e),
    }
}

/// Handler for POST /api/lists/{id}/items - append an item
async fn handle_add_item(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Path(list_id): Path<String>,
    Json(req): Json<ItemContentRequest>,
) -> Response {
    match state
        .service
        .add_item(&caller, &ListId::from(list_id), req.content)
        .await
    {
        Ok(list) => (StatusCode::CREATED, Json(list)).into_response(),
        Err(e) => error_response(&e),
    }
}

/// Handler for PUT /api/lists/{id}/items/{item_id} - edit item content
async fn handle_edit_item(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Path((list_id, item_id)): Path<(String, String)>,
    Json(req): Json<ItemContentRequest>,
) -> Response {
    match state
        .service
        .edit_item(
            &caller,
            &ListId::from(list_id),
            &ItemId::from(item_id),
            req.content,
        )
        .await
    {
        Ok(list) => (StatusCode::OK, Json(list)).into_response(),
        Err(e) => error_response(&e),
    }
}

/// Handler for DELETE /api/lists/{id}/items/{item_id}
async fn handle_delete_item(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Path((list_id, item_id)): Path<(String, String)>,
) -> Response {
    match state
        .service
        .delete_item(&caller, &ListId::from(list_id), &ItemId::from(item_id))
        .await
    {
        Ok(list) => (StatusCode::OK, Json(list)).into_response(),
        Err(e) => error_response(&e),
    }
}

/// Handler for PUT /api/lists/{id}/reorder - reorder items
async fn handle_reorder_items(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Path(list_id): Path<String>,
    Json(req): Json<ReorderRequest>,
) -> Response {
    let proposed: Vec<ItemId> = req.new_order.into_iter().map(ItemId::from).collect();

    match state
        .service
        .reorder_items(&caller, &ListId::from(list_id), &proposed)
        .await
    {
        Ok(list) => (StatusCode::OK, Json(list)).into_response(),
        Err(e) => error_response(&e),
    }
}
