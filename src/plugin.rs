use std::collections::BTreeMap;
use std::future::Future;

use serde_json::Value;

use crate::error::{ConfError, RegistryError, WeatherError};
use crate::models::{ExportContext, GlobalOptions, Metric};

/// A plugin that answers metric requests routed to it by the host
pub trait Exporter: Send + Sync {
    /// Name the plugin registers under
    fn name(&self) -> &'static str;

    /// Metric keys served by [`Exporter::export`]
    fn metrics(&self) -> &'static [Metric];

    /// Produces the value for `key`.
    fn export(
        &self,
        key: &str,
        params: &[String],
        ctx: &ExportContext,
    ) -> impl Future<Output = Result<String, WeatherError>> + Send;
}

/// A plugin that accepts an options block from the host at startup
pub trait Configurator {
    /// Applies host configuration. Decode failures are logged, never fatal.
    fn configure(&mut self, global: &GlobalOptions, options: &Value);

    /// Checks an options block without applying it
    fn validate(&self, options: &Value) -> Result<(), ConfError>;
}

#[derive(Debug, Clone, Copy)]
struct Registration {
    plugin: &'static str,
    description: &'static str,
}

/// Maps metric keys to the plugins that serve them
#[derive(Debug, Default)]
pub struct Registry {
    metrics: BTreeMap<&'static str, Registration>,
}

impl Registry {
    /// Registers every metric of `plugin`. Nothing is registered if any key is
    /// already taken.
    pub fn register<P: Exporter>(&mut self, plugin: &P) -> Result<(), RegistryError> {
        for metric in plugin.metrics() {
            if let Some(existing) = self.metrics.get(metric.key) {
                return Err(RegistryError::DuplicateMetric {
                    key: metric.key,
                    plugin: existing.plugin,
                });
            }
        }

        for metric in plugin.metrics() {
            self.metrics.insert(
                metric.key,
                Registration {
                    plugin: plugin.name(),
                    description: metric.description,
                },
            );
        }
        Ok(())
    }

    pub fn plugin_for(&self, key: &str) -> Option<&'static str> {
        self.metrics.get(key).map(|r| r.plugin)
    }

    /// Registered `(key, description)` pairs in key order
    pub fn metrics(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.metrics.iter().map(|(key, r)| (*key, r.description))
    }
}
