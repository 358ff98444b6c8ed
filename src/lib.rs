//! Monitoring plugin that reports the current temperature of a location as
//! read from wttr.in.

pub mod conf;
pub mod constants;
pub mod error;
pub mod formatters;
pub mod models;
pub mod plugin;
pub mod service;

pub use error::{ConfError, RegistryError, WeatherError};
pub use models::{ExportContext, GlobalOptions, Metric, PluginOptions};
pub use plugin::{Configurator, Exporter, Registry};
pub use service::Weather;
