mod common;

use common::{StubServer, USD_RATES};
use kiosk::application::converter::CurrencyConverter;
use kiosk::domain::currency::CurrencyCode;
use kiosk::domain::ports::RateSource;
use kiosk::error::KioskError;
use kiosk::infrastructure::open_er_api::OpenErApiSource;
use rust_decimal_macros::dec;
use std::time::Duration;

fn code(s: &str) -> CurrencyCode {
    CurrencyCode::parse(s).unwrap()
}

fn source(server: &StubServer, timeout: Duration) -> OpenErApiSource {
    OpenErApiSource::with_config(server.base_url.clone(), timeout).unwrap()
}

#[tokio::test]
async fn test_fetch_parses_rates() {
    let server = StubServer::start("200 OK", USD_RATES).await;

    let table = source(&server, Duration::from_secs(5))
        .latest(&code("USD"))
        .await
        .unwrap();

    assert_eq!(table.base(), &code("USD"));
    assert_eq!(table.len(), 4);
    assert_eq!(table.rate(&code("JPY")), Some(dec!(150.5)));
    assert_eq!(server.requests(), ["GET /v6/latest/USD HTTP/1.1"]);
}

#[tokio::test]
async fn test_non_200_is_a_failure() {
    let server = StubServer::start("404 Not Found", r#"{"result":"error"}"#).await;

    let result = source(&server, Duration::from_secs(5))
        .latest(&code("USD"))
        .await;

    assert!(matches!(result, Err(KioskError::RateFetchError(m)) if m.contains("404")));
}

#[tokio::test]
async fn test_body_without_rates_is_a_failure() {
    let server = StubServer::start("200 OK", r#"{"result":"error","error-type":"unsupported-code"}"#).await;

    let result = source(&server, Duration::from_secs(5))
        .latest(&code("ABC"))
        .await;

    assert!(matches!(result, Err(KioskError::RateFetchError(m)) if m.contains("'rates'")));
}

#[tokio::test]
async fn test_unresponsive_server_times_out() {
    let server = StubServer::silent().await;

    let result = source(&server, Duration::from_millis(300))
        .latest(&code("USD"))
        .await;

    assert!(matches!(result, Err(KioskError::HttpError(e)) if e.is_timeout()));
}

#[tokio::test]
async fn test_converter_fetches_once_over_http() {
    let server = StubServer::start("200 OK", USD_RATES).await;
    let mut converter = CurrencyConverter::new(Box::new(source(&server, Duration::from_secs(5))));

    let first = converter
        .convert(dec!(100), &code("USD"), &code("EUR"))
        .await
        .unwrap();
    let second = converter
        .convert(dec!(10), &code("USD"), &code("GBP"))
        .await
        .unwrap();

    assert_eq!(first.converted, dec!(90.0));
    assert_eq!(second.converted, dec!(8.0));
    assert_eq!(server.requests().len(), 1);
}
