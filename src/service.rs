use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use reqwest::{Client, Url};
use rmcp::{
    handler::server::{tool::ToolRouter, wrapper::Parameters, ServerHandler},
    model::{CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
    ErrorData as McpError,
};
use serde_json::Value;

use crate::conf;
use crate::constants::{
    DEFAULT_GLOBAL_TIMEOUT, PLUGIN_NAME, TEMP_METRIC_DESCRIPTION, TEMP_METRIC_KEY, USER_AGENT,
    WTTR_API_BASE, WTTR_FORMAT,
};
use crate::error::{ConfError, WeatherError};
use crate::formatters::strip_unit_suffix;
use crate::models::{ExportContext, ExportRequest, GlobalOptions, Metric, PluginOptions};
use crate::plugin::{Configurator, Exporter};

const METRICS: &[Metric] = &[Metric {
    key: TEMP_METRIC_KEY,
    description: TEMP_METRIC_DESCRIPTION,
}];

/// Temperature metric provider backed by wttr.in
#[derive(Clone)]
pub struct Weather {
    client: Arc<Client>,
    timeout: Duration,
    base_url: Url,
    tool_router: ToolRouter<Self>,
}

impl Weather {
    /// Creates a provider using the host default timeout until configured
    pub fn new() -> Result<Self> {
        Self::with_base_url(WTTR_API_BASE)
    }

    /// Creates a provider that talks to a wttr.in compatible service at `base`
    pub fn with_base_url(base: &str) -> Result<Self> {
        let base_url = Url::parse(base)?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("Base URL cannot carry a path: {}", base);
        }

        Ok(Self {
            client: Arc::new(build_client(DEFAULT_GLOBAL_TIMEOUT)?),
            timeout: DEFAULT_GLOBAL_TIMEOUT,
            base_url,
            tool_router: Self::tool_router(),
        })
    }

    /// Timeout the current HTTP client was built with
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Builds `{base}/~{location}?format=%t` with the location as one path segment
    pub fn temperature_url(&self, location: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(&format!("~{}", location));
        }
        url.set_query(Some(WTTR_FORMAT));
        url
    }

    async fn fetch_temperature(&self, location: &str) -> Result<String, WeatherError> {
        let url = self.temperature_url(location);
        tracing::debug!("Requesting {} with timeout {:?}", url, self.timeout);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(WeatherError::from_send)?;

        let body = response.bytes().await.map_err(WeatherError::from_body)?;

        Ok(strip_unit_suffix(&body))
    }
}

fn build_client(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder().user_agent(USER_AGENT).timeout(timeout).build()
}

impl Configurator for Weather {
    fn configure(&mut self, global: &GlobalOptions, options: &Value) {
        let options = conf::unmarshal::<PluginOptions>(options).unwrap_or_else(|e| {
            tracing::error!("Cannot unmarshal configuration options: {}", e);
            PluginOptions::default()
        });

        let timeout = options.effective_timeout(global);
        match build_client(timeout) {
            Ok(client) => {
                self.client = Arc::new(client);
                self.timeout = timeout;
                tracing::info!("Configured with request timeout {:?}", timeout);
            }
            Err(e) => {
                tracing::error!("Cannot build HTTP client, keeping previous one: {}", e);
            }
        }
    }

    fn validate(&self, options: &Value) -> Result<(), ConfError> {
        conf::unmarshal::<PluginOptions>(options).map(|_| ())
    }
}

impl Exporter for Weather {
    fn name(&self) -> &'static str {
        PLUGIN_NAME
    }

    fn metrics(&self) -> &'static [Metric] {
        METRICS
    }

    async fn export(
        &self,
        key: &str,
        params: &[String],
        _ctx: &ExportContext,
    ) -> Result<String, WeatherError> {
        let [location] = params else {
            return Err(WeatherError::InvalidParameters);
        };
        if key != TEMP_METRIC_KEY {
            return Err(WeatherError::UnknownMetric(key.to_string()));
        }

        tracing::info!("Getting temperature for location: {}", location);

        self.fetch_temperature(location).await.inspect_err(|e| {
            tracing::warn!("Failed to get temperature for {}: {}", location, e);
        })
    }
}

fn to_mcp_error(err: WeatherError) -> McpError {
    if err.is_caller_error() {
        McpError::invalid_params(err.to_string(), None)
    } else {
        McpError::internal_error(err.to_string(), None)
    }
}

#[tool_handler]
impl ServerHandler for Weather {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "weather-metric".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some(
                "Monitoring metrics powered by wttr.in. Call weather.temp with a single \
                location parameter to read its current temperature."
                    .to_string(),
            ),
        }
    }
}

#[tool_router]
impl Weather {
    #[tool(name = "weather.temp", description = "Returns Celsius temperature.")]
    async fn weather_temp(
        &self,
        Parameters(request): Parameters<ExportRequest>,
    ) -> Result<CallToolResult, McpError> {
        let value = self
            .export(TEMP_METRIC_KEY, &request.params, &ExportContext::default())
            .await
            .map_err(to_mcp_error)?;

        Ok(CallToolResult::success(vec![Content::text(value)]))
    }
}
