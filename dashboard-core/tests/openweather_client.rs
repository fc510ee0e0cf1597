//! Integration tests for OpenWeatherClient using wiremock.

use dashboard_core::{FetchError, OpenWeatherClient, WeatherSource};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const KEY: &str = "test-key";

fn london(temp: f64) -> serde_json::Value {
    serde_json::json!({
        "id": 2643743,
        "name": "London",
        "main": {
            "temp": temp,
            "feels_like": 14.2,
            "temp_min": 12.0,
            "temp_max": 18.0,
            "pressure": 1013,
            "humidity": 72
        },
        "weather": [{ "id": 800, "main": "Clear", "description": "clear sky", "icon": "01d" }],
        "wind": { "speed": 3.5, "deg": 180 },
        "clouds": { "all": 0 },
        "sys": { "country": "GB", "sunrise": 1640000000, "sunset": 1640030000 },
        "dt": 1640015000,
        "timezone": 0,
        "cod": 200
    })
}

fn client_for(server: &MockServer) -> OpenWeatherClient {
    OpenWeatherClient::with_base_url(KEY.to_string(), server.uri())
}

async fn mount_status(server: &MockServer, status: u16) {
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(status).set_body_string("nope"))
        .mount(server)
        .await;
}

#[tokio::test]
async fn fetch_current_sends_expected_query_and_transforms() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "London"))
        .and(query_param("appid", KEY))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(london(15.5)))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let weather = client.fetch_current("London").await.unwrap();

    assert_eq!(weather.city, "London");
    assert_eq!(weather.temperature, 16);
    assert_eq!(weather.condition, "Clear");
    assert_eq!(weather.description, "clear sky");
    assert_eq!(weather.icon, "01d");
    assert_eq!(weather.country, "GB");
    assert_eq!(weather.humidity_pct, 72);
    assert_eq!(weather.wind_speed, 3.5);
    assert!(weather.id.starts_with("2643743-"));
}

#[tokio::test]
async fn fetch_current_rounds_down_below_half() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(london(15.4)))
        .mount(&server)
        .await;

    let weather = client_for(&server).fetch_current("London").await.unwrap();
    assert_eq!(weather.temperature, 15);
}

#[tokio::test]
async fn repeated_fetches_get_distinct_ids() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(london(10.0)))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let first = client.fetch_current("London").await.unwrap();
    let second = client.fetch_current("London").await.unwrap();

    assert_ne!(first.id, second.id);
}

#[tokio::test]
async fn not_found_maps_to_spelling_hint() {
    let server = MockServer::start().await;
    mount_status(&server, 404).await;

    let err = client_for(&server).fetch_current("NonExistentCity").await.unwrap_err();

    assert_eq!(err, FetchError::NotFound);
    assert_eq!(err.to_string(), "City not found. Please check the spelling and try again.");
}

#[tokio::test]
async fn unauthorized_maps_to_invalid_key() {
    let server = MockServer::start().await;
    mount_status(&server, 401).await;

    let err = client_for(&server).fetch_current("London").await.unwrap_err();
    assert_eq!(err.to_string(), "Invalid API key.");
}

#[tokio::test]
async fn rate_limited_maps_to_try_later() {
    let server = MockServer::start().await;
    mount_status(&server, 429).await;

    let err = client_for(&server).fetch_current("London").await.unwrap_err();
    assert_eq!(err.to_string(), "Too many requests. Please try again later.");
}

#[tokio::test]
async fn server_error_reports_code() {
    let server = MockServer::start().await;
    mount_status(&server, 500).await;

    let err = client_for(&server).fetch_current("London").await.unwrap_err();
    let msg = err.to_string();

    assert!(msg.contains("Error Code: 500"), "unexpected message: {msg}");
    assert!(msg.contains("Message: Internal Server Error"), "unexpected message: {msg}");
}

#[tokio::test]
async fn malformed_success_body_is_a_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_current("London").await.unwrap_err();

    assert!(matches!(err, FetchError::Decode { status: 200, .. }));
    assert!(err.to_string().contains("Error Code: 200"));
}

#[tokio::test]
async fn empty_conditions_is_a_decode_error() {
    let server = MockServer::start().await;

    let mut body = london(10.0);
    body["weather"] = serde_json::json!([]);

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_current("London").await.unwrap_err();
    assert!(matches!(err, FetchError::Decode { .. }));
}

#[tokio::test]
async fn truncated_success_body_is_a_decode_error() {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    // Promise 100 bytes, send a few, then hang up.
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 512];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }
        socket
            .write_all(b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 100\r\n\r\n{\"id\":")
            .await
            .unwrap();
    });

    let client = OpenWeatherClient::with_base_url(KEY.to_string(), format!("http://{addr}"));
    let err = client.fetch_current("London").await.unwrap_err();

    assert!(matches!(err, FetchError::Decode { status: 200, .. }), "unexpected error: {err:?}");
    assert!(!err.to_string().starts_with("Error: "));
}

#[tokio::test]
async fn transport_failure_is_prefixed_with_error() {
    // Nothing listens on port 1.
    let client = OpenWeatherClient::with_base_url(KEY.to_string(), "http://127.0.0.1:1");

    let err = client.fetch_current("London").await.unwrap_err();

    assert!(matches!(err, FetchError::Transport(_)));
    assert!(err.to_string().starts_with("Error: "));
}

#[tokio::test]
async fn fetch_forecast_passes_payload_through() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("q", "London"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "list": [{
                "dt": 1640015000,
                "main": { "temp": 15.5, "temp_min": 12.0, "temp_max": 18.0 },
                "weather": [{ "main": "Clear", "description": "clear sky", "icon": "01d" }],
                "dt_txt": "2021-12-20 15:00:00"
            }],
            "city": { "name": "London", "country": "GB" }
        })))
        .mount(&server)
        .await;

    let forecast = client_for(&server).fetch_forecast("London").await.unwrap();

    assert_eq!(forecast.city.name, "London");
    assert_eq!(forecast.list.len(), 1);
    assert_eq!(forecast.list[0].main.temp, 15.5);
    assert_eq!(forecast.list[0].dt_txt, "2021-12-20 15:00:00");
}

#[tokio::test]
async fn fetch_forecast_shares_error_taxonomy() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_forecast("Atlantis").await.unwrap_err();
    assert_eq!(err, FetchError::NotFound);
}
