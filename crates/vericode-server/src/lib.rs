//! Vericode Server - HTTP front-end
//!
//! Routes:
//! - `POST /generate` `{user_id, ...params}` -> `{"code": ...}`
//! - `POST /validate` `{user_id, code, ...params}` -> `{"valid": ...}`
//! - `GET /health` -> `{"status": "ok"}`
//!
//! Omitted parameters fall back to the server's configured defaults.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use vericode_core::{CharClasses, Clock, GenerationParams, Vericode, VericodeError};

/// Default listen port
pub const DEFAULT_PORT: u16 = 5000;

/// Listener configuration from `HOST` / `PORT`
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|s| {
                s.parse()
                    .map_err(|e| {
                        tracing::warn!("Invalid PORT value '{}': {}", s, e);
                        e
                    })
                    .ok()
            })
            .unwrap_or(DEFAULT_PORT);

        let host: IpAddr = std::env::var("HOST")
            .ok()
            .and_then(|s| {
                s.parse()
                    .map_err(|e| {
                        tracing::warn!("Invalid HOST value '{}': {}", s, e);
                        e
                    })
                    .ok()
            })
            .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST));

        ServerConfig {
            bind_addr: SocketAddr::new(host, port),
        }
    }
}

/// Shared handler state
pub struct AppState<C: Clock> {
    pub vericode: Vericode<C>,
    pub defaults: GenerationParams,
}

impl<C: Clock> AppState<C> {
    pub fn new(vericode: Vericode<C>, defaults: GenerationParams) -> Self {
        AppState { vericode, defaults }
    }
}

/// Per-request parameter overrides
#[derive(Debug, Default, Deserialize)]
pub struct ParamOverrides {
    pub period: Option<u64>,
    pub length: Option<usize>,
    pub use_digits: Option<bool>,
    pub use_uppercase: Option<bool>,
    pub use_lowercase: Option<bool>,
    pub counter: Option<u64>,
}

impl ParamOverrides {
    fn resolve(&self, defaults: GenerationParams) -> GenerationParams {
        GenerationParams {
            period: self.period.unwrap_or(defaults.period),
            length: self.length.unwrap_or(defaults.length),
            classes: CharClasses::new(
                self.use_digits.unwrap_or(defaults.classes.digits),
                self.use_uppercase.unwrap_or(defaults.classes.uppercase),
                self.use_lowercase.unwrap_or(defaults.classes.lowercase),
            ),
            counter: self.counter.or(defaults.counter),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub user_id: Option<String>,
    #[serde(flatten)]
    pub params: ParamOverrides,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub code: String,
}

#[derive(Debug, Deserialize)]
pub struct ValidateRequest {
    pub user_id: Option<String>,
    pub code: Option<String>,
    #[serde(flatten)]
    pub params: ParamOverrides,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ValidateResponse {
    pub valid: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("User ID is required")]
    MissingUserId,

    #[error("User ID and Code are required")]
    MissingUserIdOrCode,

    #[error(transparent)]
    Config(#[from] VericodeError),

    #[error(transparent)]
    Body(#[from] JsonRejection),
}

/// Result type for request handlers
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::MissingUserId | AppError::MissingUserIdOrCode | AppError::Config(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Body(rejection) => rejection.status(),
        };
        let body = Json(ErrorResponse {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

pub async fn generate<C: Clock + 'static>(
    State(state): State<Arc<AppState<C>>>,
    body: Result<Json<GenerateRequest>, JsonRejection>,
) -> AppResult<Json<GenerateResponse>> {
    let Json(body) = body?;
    let user_id = non_empty(body.user_id).ok_or(AppError::MissingUserId)?;
    let params = body.params.resolve(state.defaults);

    let code = state.vericode.generate(&user_id, &params)?;
    tracing::info!(length = params.length, "code issued");
    Ok(Json(GenerateResponse { code }))
}

pub async fn validate<C: Clock + 'static>(
    State(state): State<Arc<AppState<C>>>,
    body: Result<Json<ValidateRequest>, JsonRejection>,
) -> AppResult<Json<ValidateResponse>> {
    let Json(body) = body?;
    let (Some(user_id), Some(code)) = (non_empty(body.user_id), non_empty(body.code)) else {
        return Err(AppError::MissingUserIdOrCode);
    };
    let params = body.params.resolve(state.defaults);

    let valid = state.vericode.validate(&code, &user_id, &params)?;
    tracing::info!(valid, "code checked");
    Ok(Json(ValidateResponse { valid }))
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Build the router over shared state
pub fn app<C: Clock + 'static>(state: Arc<AppState<C>>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/generate", post(generate::<C>))
        .route("/validate", post(validate::<C>))
        .with_state(state)
}
