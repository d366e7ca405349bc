//! HTTP transport implementation.
//!
//! JSON over POST: `{"operation": "mul", "a": "4", "b": "5"}` is answered with
//! `{"result": "20"}`, failures with `{"error": "<message>"}`.
//!
//! On startup the bound port is printed to stdout as `PORT:<port>` so that a
//! parent process can discover it when port 0 was requested.

use std::any::Any;
use std::io::Write;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{ConnectInfo, Request, State},
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Map, Value, json};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any as CorsAny, CorsLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, error, info, info_span, instrument, warn};

use super::{TransportError, TransportResult, config::HttpConfig};
use crate::core::config::ServerConfig;
use crate::domains::calculator::{CalcError, Calculator, Number, Operation, parse_json_operand};

/// Message for a request lacking `operation`, `a` or `b`.
pub const MISSING_ARGUMENTS: &str = "Missing arguments";

/// Message for operands that are not numbers.
pub const INVALID_NUMBERS: &str = "Invalid numbers";

/// HTTP transport handler.
pub struct HttpTransport {
    config: HttpConfig,
}

/// Application state shared across HTTP handlers.
///
/// Immutable for the lifetime of the server.
#[derive(Debug, Clone)]
pub struct AppState {
    calculator: Calculator,
    name: Arc<str>,
    version: Arc<str>,
}

impl AppState {
    /// Create handler state around a calculator.
    pub fn new(calculator: Calculator, server: &ServerConfig) -> Self {
        Self {
            calculator,
            name: server.name.as_str().into(),
            version: server.version.as_str().into(),
        }
    }
}

/// An error answered as `{"error": message}`.
#[derive(Debug, Clone)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// 400 with the given message.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    /// 500 with the given message.
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl From<CalcError> for ApiError {
    fn from(e: CalcError) -> Self {
        let status =
            StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        Self {
            status,
            message: e.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl HttpTransport {
    /// Create a new HTTP transport with the given config.
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        self.config.address()
    }

    /// Build the router with all routes and layers.
    pub fn router(&self, state: AppState) -> Router {
        let mut app = Router::new()
            .route("/", get(root_handler))
            .route(&self.config.calc_path, post(handle_calculate))
            .route("/health", get(health_check))
            .fallback(not_found)
            .with_state(state);

        // Add CORS if enabled
        if self.config.enable_cors {
            let cors = CorsLayer::new()
                .allow_origin(CorsAny)
                .allow_methods(CorsAny)
                .allow_headers(CorsAny);
            app = app.layer(cors);
        }

        let trace = TraceLayer::new_for_http()
            .make_span_with(|req: &Request| {
                let client = req
                    .extensions()
                    .get::<ConnectInfo<SocketAddr>>()
                    .map(|ConnectInfo(addr)| addr.to_string())
                    .unwrap_or_else(|| "-".to_string());
                info_span!(
                    "request",
                    client = %client,
                    method = %req.method(),
                    uri = %req.uri(),
                    version = ?req.version(),
                )
            })
            .on_response(DefaultOnResponse::new().level(Level::INFO));

        app.layer(
            ServiceBuilder::new()
                .layer(trace)
                .layer(CatchPanicLayer::custom(handle_panic)),
        )
    }

    /// Bind the listener.
    pub async fn bind(&self) -> TransportResult<TcpListener> {
        let addr = self.address();
        TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))
    }

    /// Run the HTTP transport.
    ///
    /// Binds, announces the port, then serves until Ctrl-C.
    pub async fn run(self, state: AppState) -> crate::Result<()> {
        let listener = self.bind().await?;
        let local = listener.local_addr()?;

        announce_port(local.port())?;

        let cors_status = if self.config.enable_cors {
            "enabled"
        } else {
            "disabled"
        };
        info!(
            "Ready - listening on {} (backend {}, CORS {})",
            local,
            state.calculator.backend_name(),
            cors_status
        );
        info!("  → Calculate: POST {}", self.config.calc_path);
        info!("  → Health:    GET /health");

        let app = self.router(state);

        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| TransportError::http(e.to_string()))?;

        Ok(())
    }
}

/// Print the `PORT:<port>` handshake line.
fn announce_port(port: u16) -> std::io::Result<()> {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "PORT:{}", port)?;
    stdout.flush()?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}

/// Root handler - provides API info.
async fn root_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "name": &*state.name,
        "version": &*state.version,
        "transport": "HTTP",
        "backend": state.calculator.backend_name(),
        "operations": Operation::ALL,
        "documentation": "POST {\"operation\": ..., \"a\": ..., \"b\": ...} to the calculate endpoint"
    }))
}

/// Health check endpoint.
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "backend": state.calculator.backend_name(),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn not_found(uri: Uri) -> ApiError {
    ApiError {
        status: StatusCode::NOT_FOUND,
        message: format!("Not found: {}", uri.path()),
    }
}

/// Handle a calculation request.
///
/// The body is read raw so that malformed JSON is answered like any other
/// unhandled failure (500) instead of by the extractor's own rejection.
#[instrument(skip_all)]
async fn handle_calculate(State(state): State<AppState>, body: Bytes) -> Response {
    match process_request(&state.calculator, &body).await {
        Ok(result) => (StatusCode::OK, Json(json!({ "result": result.to_string() }))).into_response(),
        Err(e) => {
            if e.status.is_server_error() {
                error!("Request failed: {}", e.message);
            } else {
                info!("Request rejected: {}", e.message);
            }
            e.into_response()
        }
    }
}

/// Validate a request body and dispatch it.
async fn process_request(calculator: &Calculator, body: &[u8]) -> Result<Number, ApiError> {
    let value: Value =
        serde_json::from_slice(body).map_err(|e| ApiError::internal(e.to_string()))?;
    let Value::Object(fields) = value else {
        return Err(ApiError::internal("Request body must be a JSON object"));
    };

    let (Some(operation), Some(a), Some(b)) = (
        truthy_field(&fields, "operation"),
        truthy_field(&fields, "a"),
        truthy_field(&fields, "b"),
    ) else {
        return Err(ApiError::bad_request(MISSING_ARGUMENTS));
    };

    let (Ok(a), Ok(b)) = (parse_json_operand(a), parse_json_operand(b)) else {
        return Err(ApiError::bad_request(INVALID_NUMBERS));
    };

    let operation = match operation {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };

    Ok(calculator.calculate(&operation, a, b).await?)
}

/// Look up a field, treating falsy JSON values as absent.
fn truthy_field<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    fields.get(key).filter(|v| is_truthy(v))
}

/// JSON truthiness: null, false, zero, "" and empty containers are falsy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|x| x != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Turn a handler panic into a 500 carrying the panic message.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown panic".to_string()
    };
    error!("Handler panicked: {}", message);
    ApiError::internal(message).into_response()
}
