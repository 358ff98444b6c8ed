use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::conf::{self, Validate};
use crate::constants::{DEFAULT_GLOBAL_TIMEOUT, MAX_TIMEOUT_SECS, MIN_TIMEOUT_SECS};
use crate::error::ConfError;

// ============================================================================
// Host Configuration Models
// ============================================================================

/// Defaults shared by every plugin the host loads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlobalOptions {
    pub timeout: Duration,
}

impl Default for GlobalOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_GLOBAL_TIMEOUT,
        }
    }
}

impl Validate for GlobalOptions {
    /// Plugins inherit the global timeout, so it obeys the same bounds.
    fn validate(&self) -> Result<(), ConfError> {
        let secs = i64::try_from(self.timeout.as_secs()).unwrap_or(i64::MAX);
        conf::check_range("Timeout", secs, MIN_TIMEOUT_SECS, MAX_TIMEOUT_SECS)
    }
}

/// Options block specific to the weather plugin
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PluginOptions {
    /// Maximum time to wait for wttr.in, in seconds. Falls back to the global
    /// timeout when unset.
    #[serde(rename = "Timeout", default, deserialize_with = "conf::optional_int")]
    pub timeout: Option<i64>,
}

impl PluginOptions {
    /// Timeout to build the HTTP client with
    pub fn effective_timeout(&self, global: &GlobalOptions) -> Duration {
        self.timeout
            .and_then(|secs| u64::try_from(secs).ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(global.timeout)
    }
}

impl Validate for PluginOptions {
    fn validate(&self) -> Result<(), ConfError> {
        match self.timeout {
            Some(secs) => conf::check_range("Timeout", secs, MIN_TIMEOUT_SECS, MAX_TIMEOUT_SECS),
            None => Ok(()),
        }
    }
}

// ============================================================================
// Invocation Models
// ============================================================================

/// Opaque per-invocation context handed over by the host. The weather
/// export never inspects it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportContext;

/// A metric key this plugin answers for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Metric {
    pub key: &'static str,
    pub description: &'static str,
}

// ============================================================================
// MCP Tool Request Models
// ============================================================================

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct ExportRequest {
    /// Metric parameters in order; `weather.temp` expects exactly one, the location
    pub params: Vec<String>,
}
