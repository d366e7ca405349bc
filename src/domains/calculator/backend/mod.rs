//! Arithmetic backends and startup backend selection.
//!
//! A backend provides the four arithmetic entry points. Two implementations
//! exist:
//!
//! - [`NativeBackend`] - checked `i64` arithmetic, always available.
//! - [`ExternalBackend`] - the mathformer service, reached over HTTP.
//!
//! Which one is used is decided exactly once, at process start, by
//! [`BackendSelection::resolve`], and the result is handed to the
//! dispatcher. Nothing switches backends afterwards.

mod external;
mod native;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use super::error::CalcResult;
use super::number::Number;
use crate::core::config::{BackendConfig, BackendMode};

pub use external::{BackendLoadError, ExternalBackend};
pub use native::NativeBackend;

/// Name reported for the native arithmetic path.
pub const NATIVE_BACKEND_NAME: &str = "lite";

/// Name reported for the external mathformer backend.
pub const EXTERNAL_BACKEND_NAME: &str = "mathformer";

/// The four arithmetic entry points a backend must provide.
///
/// Division is never called with a zero divisor; the dispatcher rejects that
/// case before reaching the backend.
#[async_trait]
pub trait ArithmeticBackend: Send + Sync {
    /// Short name used in logs and health reports.
    fn name(&self) -> &str;

    async fn add(&self, a: i64, b: i64) -> CalcResult<Number>;

    async fn sub(&self, a: i64, b: i64) -> CalcResult<Number>;

    async fn mul(&self, a: i64, b: i64) -> CalcResult<Number>;

    async fn div(&self, a: i64, b: i64) -> CalcResult<Number>;
}

/// Outcome of backend selection at startup.
#[derive(Debug, Clone)]
pub enum BackendSelection {
    /// Native arithmetic was requested explicitly.
    ForcedNative,

    /// The external backend answered its probe and will serve every request.
    External(ExternalBackend),

    /// The external backend could not be loaded; native arithmetic is used.
    Fallback {
        /// Why loading failed. Only ever logged.
        reason: String,
    },
}

impl BackendSelection {
    /// Resolve the backend according to configuration.
    ///
    /// Never fails: a load failure becomes [`BackendSelection::Fallback`].
    pub async fn resolve(config: &BackendConfig) -> Self {
        let selection = match config.mode {
            BackendMode::ForcedNative => Self::ForcedNative,
            BackendMode::Auto => match ExternalBackend::load(config).await {
                Ok(backend) => Self::External(backend),
                Err(e) => Self::Fallback {
                    reason: e.to_string(),
                },
            },
        };
        selection.log();
        selection
    }

    /// Name of the backend that will serve requests.
    pub fn name(&self) -> &'static str {
        match self {
            Self::External(_) => EXTERNAL_BACKEND_NAME,
            Self::ForcedNative | Self::Fallback { .. } => NATIVE_BACKEND_NAME,
        }
    }

    /// Whether the external backend is in use.
    pub fn is_external(&self) -> bool {
        matches!(self, Self::External(_))
    }

    /// The backend implementation to dispatch to.
    pub fn backend(&self) -> Arc<dyn ArithmeticBackend> {
        match self {
            Self::External(backend) => Arc::new(backend.clone()),
            Self::ForcedNative | Self::Fallback { .. } => Arc::new(NativeBackend),
        }
    }

    fn log(&self) {
        match self {
            Self::ForcedNative => info!("Backend: native arithmetic (forced by configuration)"),
            Self::External(backend) => info!("Backend: mathformer at {}", backend.base_url()),
            Self::Fallback { reason } => {
                warn!("Backend: mathformer unavailable, using native arithmetic ({reason})")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(mode: BackendMode) -> BackendConfig {
        BackendConfig {
            mode,
            // Port 1 is never listening; connection is refused immediately.
            url: "http://127.0.0.1:1".to_string(),
            probe_timeout_ms: 200,
        }
    }

    #[tokio::test]
    async fn test_forced_native_never_probes() {
        let selection = BackendSelection::resolve(&config(BackendMode::ForcedNative)).await;
        assert!(matches!(selection, BackendSelection::ForcedNative));
        assert_eq!(selection.name(), "lite");
        assert_eq!(selection.backend().name(), "lite");
    }

    #[tokio::test]
    async fn test_unreachable_backend_falls_back() {
        let selection = BackendSelection::resolve(&config(BackendMode::Auto)).await;
        match &selection {
            BackendSelection::Fallback { reason } => assert!(!reason.is_empty()),
            other => panic!("expected fallback, got {:?}", other),
        }
        assert!(!selection.is_external());
        assert_eq!(selection.backend().name(), "lite");
    }
}
