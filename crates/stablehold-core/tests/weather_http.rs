//! Weather client against a mocked OpenWeatherMap endpoint.

use chrono::{TimeZone, Utc};
use mockito::Matcher;
use stablehold_core::{current_or_fallback, WeatherClient, WeatherError, WeatherReading};

const BODY: &str = r#"{
    "coord": {"lon": -84.5153, "lat": 38.0389},
    "weather": [{"id": 500, "main": "Rain", "description": "light rain", "icon": "10d"}],
    "main": {"temp": 54.3, "feels_like": 52.9, "temp_min": 52.0, "temp_max": 56.1, "pressure": 1012, "humidity": 81},
    "wind": {"speed": 9.2, "deg": 200},
    "name": "Lexington-Fayette"
}"#;

fn client(server: &mockito::ServerGuard) -> WeatherClient {
    WeatherClient::new(Some("owm-key".into()))
        .with_base_url(format!("{}/data/2.5/weather", server.url()))
}

#[tokio::test]
async fn parses_current_conditions() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/data/2.5/weather")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("lat".into(), "38.0389".into()),
            Matcher::UrlEncoded("lon".into(), "-84.5153".into()),
            Matcher::UrlEncoded("appid".into(), "owm-key".into()),
            Matcher::UrlEncoded("units".into(), "imperial".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(BODY)
        .create_async()
        .await;

    let now = Utc.with_ymd_and_hms(2025, 4, 2, 17, 0, 0).unwrap();
    let reading = client(&server).current(now).await.unwrap();

    mock.assert_async().await;
    assert_eq!(reading.temp, 54.3);
    assert_eq!(reading.feels_like, 52.9);
    assert_eq!(reading.wind_speed, 9.2);
    assert_eq!(reading.humidity, 81.0);
    assert_eq!(reading.pressure, 1012.0);
    assert_eq!(reading.description, "light rain");
    assert_eq!(reading.icon, "10d");
    assert_eq!(reading.city_name, "Lexington-Fayette");
    assert_eq!(reading.timestamp, now);
}

#[tokio::test]
async fn unauthorized_maps_to_invalid_key() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/data/2.5/weather")
        .match_query(Matcher::Any)
        .with_status(401)
        .with_body(r#"{"cod":401,"message":"Invalid API key."}"#)
        .create_async()
        .await;

    let err = client(&server).current(Utc::now()).await.unwrap_err();
    assert!(matches!(err, WeatherError::InvalidApiKey));
}

#[tokio::test]
async fn server_errors_fall_back_to_canned_reading() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/data/2.5/weather")
        .match_query(Matcher::Any)
        .with_status(502)
        .with_body("bad gateway")
        .create_async()
        .await;

    let now = Utc.with_ymd_and_hms(2025, 4, 2, 17, 0, 0).unwrap();
    let (reading, err) = current_or_fallback(&client(&server), now).await;
    assert_eq!(reading, WeatherReading::fallback(now));
    assert!(matches!(err, Some(WeatherError::Upstream { status: 502, .. })));
}

#[tokio::test]
async fn garbage_payload_is_malformed() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/data/2.5/weather")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"main": "nope"}"#)
        .create_async()
        .await;

    let err = client(&server).current(Utc::now()).await.unwrap_err();
    assert!(matches!(err, WeatherError::Malformed(_)));
}
