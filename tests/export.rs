//! Export tests against a mock wttr.in backend.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;
use std::time::Duration;

use serde_json::json;
use weather_metric::{Configurator, ExportContext, Exporter, GlobalOptions, Weather, WeatherError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn location(name: &str) -> Vec<String> {
    vec![name.to_string()]
}

async fn weather_for(server: &MockServer, timeout_secs: u64) -> Weather {
    let mut weather = Weather::with_base_url(&server.uri()).unwrap();
    weather.configure(
        &GlobalOptions {
            timeout: Duration::from_secs(timeout_secs),
        },
        &serde_json::Value::Null,
    );
    weather
}

/// Serves one response that promises 100 body bytes but sends two, then
/// holds the connection for `hold` before closing it.
fn serve_truncated_body(hold: Duration) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut request = [0u8; 1024];
        let _ = stream.read(&mut request);
        stream
            .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 100\r\n\r\n21")
            .unwrap();
        stream.flush().unwrap();
        thread::sleep(hold);
    });

    format!("http://{}", addr)
}

#[tokio::test]
async fn test_export_strips_unit_suffix() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/~London"))
        .respond_with(ResponseTemplate::new(200).set_body_string("21°C\n"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let weather = weather_for(&mock_server, 5).await;
    let value = weather
        .export("weather.temp", &location("London"), &ExportContext::default())
        .await
        .unwrap();

    assert_eq!(value, "21");
}

#[tokio::test]
async fn test_export_sends_temperature_format() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("-4°C\n"))
        .mount(&mock_server)
        .await;

    let weather = weather_for(&mock_server, 5).await;
    weather
        .export("weather.temp", &location("Riga"), &ExportContext::default())
        .await
        .unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.path(), "/~Riga");
    assert_eq!(requests[0].url.query(), Some("format=%t"));
}

#[tokio::test]
async fn test_export_encodes_location() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/~New%20York"))
        .respond_with(ResponseTemplate::new(200).set_body_string("30°C\n"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let weather = weather_for(&mock_server, 5).await;
    let value = weather
        .export("weather.temp", &location("New York"), &ExportContext::default())
        .await
        .unwrap();

    assert_eq!(value, "30");
}

#[tokio::test]
async fn test_export_suffix_only_body_is_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("°C\n"))
        .mount(&mock_server)
        .await;

    let weather = weather_for(&mock_server, 5).await;
    let value = weather
        .export("weather.temp", &location("Nowhere"), &ExportContext::default())
        .await
        .unwrap();

    assert_eq!(value, "");
}

#[tokio::test]
async fn test_export_short_body_does_not_panic() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("C"))
        .mount(&mock_server)
        .await;

    let weather = weather_for(&mock_server, 5).await;
    let value = weather
        .export("weather.temp", &location("Nowhere"), &ExportContext::default())
        .await
        .unwrap();

    assert_eq!(value, "");
}

#[tokio::test]
async fn test_export_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("21°C\n")
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let mut weather = Weather::with_base_url(&mock_server.uri()).unwrap();
    weather.configure(
        &GlobalOptions {
            timeout: Duration::from_secs(10),
        },
        &json!({ "Timeout": "1" }),
    );
    assert_eq!(weather.timeout(), Duration::from_secs(1));

    let err = weather
        .export("weather.temp", &location("London"), &ExportContext::default())
        .await
        .unwrap_err();

    assert!(matches!(err, WeatherError::Timeout), "got {:?}", err);
    assert_eq!(err.to_string(), "Request timeout.");
}

#[tokio::test]
async fn test_export_connection_refused_is_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let weather = Weather::with_base_url(&format!("http://{}", addr)).unwrap();
    let err = weather
        .export("weather.temp", &location("London"), &ExportContext::default())
        .await
        .unwrap_err();

    assert!(matches!(err, WeatherError::Transport(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_export_wrong_parameter_count() {
    let mock_server = MockServer::start().await;
    let weather = weather_for(&mock_server, 5).await;
    let ctx = ExportContext::default();

    let none = weather.export("weather.temp", &[], &ctx).await.unwrap_err();
    let two = weather
        .export(
            "weather.temp",
            &["London".to_string(), "Paris".to_string()],
            &ctx,
        )
        .await
        .unwrap_err();

    assert!(matches!(none, WeatherError::InvalidParameters));
    assert!(matches!(two, WeatherError::InvalidParameters));
    assert_eq!(none.to_string(), "Wrong parameters.");
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_export_truncated_body_is_read_error() {
    let base = serve_truncated_body(Duration::ZERO);

    let weather = Weather::with_base_url(&base).unwrap();
    let err = weather
        .export("weather.temp", &location("London"), &ExportContext::default())
        .await
        .unwrap_err();

    assert!(matches!(err, WeatherError::BodyRead(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_export_stalled_body_is_timeout() {
    let base = serve_truncated_body(Duration::from_secs(3));

    let mut weather = Weather::with_base_url(&base).unwrap();
    weather.configure(
        &GlobalOptions {
            timeout: Duration::from_secs(1),
        },
        &serde_json::Value::Null,
    );

    let err = weather
        .export("weather.temp", &location("London"), &ExportContext::default())
        .await
        .unwrap_err();

    assert!(matches!(err, WeatherError::Timeout), "got {:?}", err);
}
