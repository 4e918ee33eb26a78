//! Unified Timeout Configuration
//!
//! Centralized timeout management:
//! - Operation-specific timeout defaults
//! - Helper function for wrapping async operations
//! - Consistent timeout error handling
//!
//! ## Usage
//!
//! ```ignore
//! use crate::ai::timeout::{TimeoutConfig, with_timeout};
//!
//! let config = TimeoutConfig::default();
//! let result = with_timeout(
//!     config.llm_request,
//!     async { /* generation call */ },
//!     "draft stage"
//! ).await?;
//! ```

use std::future::Future;
use std::time::Duration;

use crate::constants::network as net_constants;
use crate::types::{MillError, Result};

/// Unified timeout configuration for bounded operations.
///
/// Connection establishment is bounded separately, on the HTTP clients
/// themselves ([`crate::constants::network::CONNECTION_TIMEOUT_SECS`]).
#[derive(Debug, Clone)]
pub struct TimeoutConfig {
    /// Timeout for a single generation call (default: 2 minutes)
    pub llm_request: Duration,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            llm_request: Duration::from_secs(net_constants::DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl TimeoutConfig {
    pub fn with_llm_request_secs(secs: u64) -> Self {
        Self {
            llm_request: Duration::from_secs(secs),
        }
    }
}

/// Execute an async operation with a timeout
///
/// Returns a timeout error if the operation doesn't complete within the
/// specified duration.
pub async fn with_timeout<T, F>(timeout: Duration, future: F, operation_name: &str) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(timeout, future).await {
        Ok(result) => result,
        Err(_) => Err(MillError::timeout(operation_name, timeout)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_config_defaults() {
        let config = TimeoutConfig::default();
        assert_eq!(config.llm_request.as_secs(), 120);
    }

    #[tokio::test]
    async fn test_with_timeout_success() {
        let result = with_timeout(
            Duration::from_secs(1),
            async { Ok::<_, MillError>(42) },
            "test operation",
        )
        .await;
        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_with_timeout_expires() {
        let result = with_timeout(
            Duration::from_millis(10),
            async {
                tokio::time::sleep(Duration::from_secs(1)).await;
                Ok::<_, MillError>(42)
            },
            "slow operation",
        )
        .await;
        assert!(matches!(result.unwrap_err(), MillError::Timeout { .. }));
    }
}
