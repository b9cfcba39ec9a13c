//! HTTP surface: router, handlers, and the typed-body extractor.
//!
//! Endpoints mirror the original client contract exactly: `/api/signup`,
//! `/api/login`, `/api/movies`, `/api/feedback`, `/api/feedback/{id}`.
//! Mutating responses are `{"status": "success"}`; failures are
//! `{"error": "..."}` (see [`crate::error::ApiError`]).

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Path, Request, State};
use axum::http::header::{HeaderValue, CONTENT_TYPE, SET_COOKIE};
use axum::http::{HeaderMap, Method};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{async_trait, Json, Router};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::auth::CredentialService;
use crate::error::ApiError;
use crate::feedback::FeedbackService;
use crate::model::{Feedback, FeedbackRequest, FeedbackUpdate, LoginRequest, Movie, SignupRequest};
use crate::session::{session_cookie, token_from_headers, SessionStore};
use crate::storage::StorageBackend;

/// Everything the handlers need, constructed once at startup and injected.
pub struct AppState {
    pub auth: CredentialService,
    pub feedback: FeedbackService,
    pub sessions: SessionStore,
    pub storage: Arc<dyn StorageBackend>,
}

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    // The browser client sends the session cookie cross-origin, so the CORS
    // layer must echo the origin rather than use a wildcard.
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE])
        .allow_credentials(true);

    Router::new()
        .route("/api/signup", post(signup))
        .route("/api/login", post(login))
        .route("/api/movies", get(movies))
        .route("/api/feedback", get(list_feedback).post(create_feedback))
        .route(
            "/api/feedback/:id",
            axum::routing::put(update_feedback).delete(delete_feedback),
        )
        .layer(cors)
        .with_state(state)
}

// =============================================================================
// Typed Body Extraction
// =============================================================================

/// Json extractor whose rejection is a clean 400 `ValidationMissing` instead
/// of axum's default plain-text response. A request missing a required field
/// fails here, before any handler logic runs.
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| ApiError::ValidationMissing(rejection.body_text()))?;
        Ok(Self(value))
    }
}

fn status_success() -> Json<Value> {
    Json(json!({ "status": "success" }))
}

// =============================================================================
// Handlers
// =============================================================================

async fn signup(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<SignupRequest>,
) -> Result<Json<Value>, ApiError> {
    state.auth.signup(request).await?;
    Ok(status_success())
}

async fn login(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Response, ApiError> {
    let user = state.auth.login(request).await?;
    let token = state.sessions.create(&user.id).await;

    let mut response = Json(user).into_response();
    let cookie = HeaderValue::from_str(&session_cookie(&token))
        .map_err(|e| ApiError::internal(format!("session cookie: {e}")))?;
    response.headers_mut().insert(SET_COOKIE, cookie);
    Ok(response)
}

async fn movies(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Movie>>, ApiError> {
    let movies = state.storage.list_movies().await?;
    Ok(Json(movies))
}

async fn list_feedback(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Feedback>>, ApiError> {
    let records = state.feedback.list().await?;
    Ok(Json(records))
}

async fn create_feedback(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<FeedbackRequest>,
) -> Result<Json<Value>, ApiError> {
    state.feedback.create(request).await?;
    Ok(status_success())
}

async fn update_feedback(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    ApiJson(update): ApiJson<FeedbackUpdate>,
) -> Result<Json<Value>, ApiError> {
    let caller = session_user(&state, &headers).await;
    state.feedback.update(&id, &update, caller.as_deref()).await?;
    Ok(status_success())
}

async fn delete_feedback(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    let caller = session_user(&state, &headers).await;
    state.feedback.delete(&id, caller.as_deref()).await?;
    Ok(status_success())
}

/// Resolve the request's session cookie to a user id, if a session exists.
async fn session_user(state: &AppState, headers: &HeaderMap) -> Option<String> {
    let token = token_from_headers(headers)?;
    state.sessions.get(&token).await
}
