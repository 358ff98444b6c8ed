use std::time::Duration;

/// User agent string for HTTP requests
pub const USER_AGENT: &str = concat!("weather-metric/", env!("CARGO_PKG_VERSION"));

/// wttr.in text weather service base URL
pub const WTTR_API_BASE: &str = "https://wttr.in";

/// wttr.in format string: temperature only, in the location's default unit
pub const WTTR_FORMAT: &str = "format=%t";

/// Width of the unit suffix trailing every temperature response, in bytes
pub const UNIT_SUFFIX_LEN: usize = 4;

/// Name the plugin registers under
pub const PLUGIN_NAME: &str = "Weather";

/// Metric key routed to the temperature export
pub const TEMP_METRIC_KEY: &str = "weather.temp";

pub const TEMP_METRIC_DESCRIPTION: &str = "Returns Celsius temperature.";

/// Bounds for the plugin `Timeout` option, in seconds
pub const MIN_TIMEOUT_SECS: i64 = 1;
pub const MAX_TIMEOUT_SECS: i64 = 30;

/// Host-wide request timeout used when the environment does not set one
pub const DEFAULT_GLOBAL_TIMEOUT: Duration = Duration::from_secs(3);

/// Environment variable carrying the host's global timeout, in seconds
pub const GLOBAL_TIMEOUT_ENV: &str = "WEATHER_GLOBAL_TIMEOUT";

/// Environment variable carrying the plugin options block as JSON
pub const PLUGIN_OPTIONS_ENV: &str = "WEATHER_PLUGIN_OPTIONS";
