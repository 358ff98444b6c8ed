use std::time::Duration;

use anyhow::{Context, Result};
use rmcp::ServiceExt;
use serde_json::Value;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use weather_metric::constants::{GLOBAL_TIMEOUT_ENV, PLUGIN_OPTIONS_ENV};
use weather_metric::conf::Validate;
use weather_metric::{Configurator, GlobalOptions, Registry, Weather};

fn global_options() -> Result<GlobalOptions> {
    let Ok(raw) = std::env::var(GLOBAL_TIMEOUT_ENV) else {
        return Ok(GlobalOptions::default());
    };

    let secs: u64 = raw
        .trim()
        .parse()
        .with_context(|| format!("Invalid {}: {:?}", GLOBAL_TIMEOUT_ENV, raw))?;

    let global = GlobalOptions {
        timeout: Duration::from_secs(secs),
    };
    global
        .validate()
        .with_context(|| format!("Invalid {}", GLOBAL_TIMEOUT_ENV))?;

    Ok(global)
}

fn plugin_options() -> Result<Value> {
    match std::env::var(PLUGIN_OPTIONS_ENV) {
        Ok(raw) => serde_json::from_str(&raw)
            .with_context(|| format!("Invalid {}: not valid JSON", PLUGIN_OPTIONS_ENV)),
        Err(_) => Ok(Value::Null),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "weather_metric=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting weather metric plugin");

    let global = global_options()?;
    let options = plugin_options()?;

    let mut weather = Weather::new()?;
    weather
        .validate(&options)
        .with_context(|| format!("Invalid {}", PLUGIN_OPTIONS_ENV))?;
    weather.configure(&global, &options);

    let mut registry = Registry::default();
    registry.register(&weather)?;
    for (key, description) in registry.metrics() {
        let plugin = registry.plugin_for(key).unwrap_or("unknown");
        tracing::info!("Registered metric {} ({}): {}", key, plugin, description);
    }

    let server = weather.serve(rmcp::transport::stdio()).await?;
    server.waiting().await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}
