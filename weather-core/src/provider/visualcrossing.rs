use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::{
    FetchError,
    config::DEFAULT_TIMELINE_URL,
    model::{WeatherResult, number_or_string},
};

use super::WeatherProvider;

#[derive(Clone)]
pub struct VisualCrossingProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl std::fmt::Debug for VisualCrossingProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VisualCrossingProvider")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl VisualCrossingProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_TIMELINE_URL.to_string())
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url,
            http: Client::new(),
        }
    }

    /// Timeline URL for a location, without the query string.
    fn timeline_url(&self, location: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(location)
        )
    }

    async fn fetch_current(&self, location: &str) -> Result<WeatherResult, FetchError> {
        let url = self.timeline_url(location);
        tracing::debug!(%location, "requesting current conditions");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("unitGroup", "metric"),
                ("key", self.api_key.as_str()),
                ("contentType", "json"),
            ])
            .send()
            .await?;

        let status = res.status();
        if status == StatusCode::NOT_FOUND {
            // The body is irrelevant for a 404, even when it cannot be read.
            tracing::debug!(%status, "location not found");
            return Err(FetchError::NotFound);
        }

        let body = res.text().await?;
        tracing::debug!(%status, bytes = body.len(), "received timeline response");

        check_status(status, &body)?;
        parse_current(&body)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VcTimelineResponse {
    resolved_address: String,
    current_conditions: VcCurrentConditions,
}

#[derive(Debug, Deserialize)]
struct VcCurrentConditions {
    #[serde(deserialize_with = "number_or_string")]
    temp: String,
    conditions: String,
}

#[async_trait]
impl WeatherProvider for VisualCrossingProvider {
    async fn current_conditions(&self, location: &str) -> Result<WeatherResult, FetchError> {
        let result = self.fetch_current(location).await;
        if let Err(err) = &result {
            tracing::warn!(%location, error = %err, "weather lookup failed");
        }
        result
    }
}

fn check_status(status: StatusCode, body: &str) -> Result<(), FetchError> {
    if status == StatusCode::NOT_FOUND {
        return Err(FetchError::NotFound);
    }

    if !status.is_success() {
        return Err(FetchError::Status {
            status,
            body: truncate_body(body),
        });
    }

    Ok(())
}

fn parse_current(body: &str) -> Result<WeatherResult, FetchError> {
    let parsed: VcTimelineResponse = serde_json::from_str(body)?;

    Ok(WeatherResult {
        resolved_address: parsed.resolved_address,
        temperature: parsed.current_conditions.temp,
        conditions: parsed.current_conditions.conditions,
    })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{
        io::{Read, Write},
        net::TcpListener,
        thread,
    };

    const PARIS: &str = r#"{
        "queryCost": 1,
        "resolvedAddress": "Paris",
        "timezone": "Europe/Paris",
        "currentConditions": { "datetime": "12:00:00", "temp": 18, "conditions": "Clear" }
    }"#;

    #[test]
    fn timeline_url_encodes_location_as_path_segment() {
        let provider = VisualCrossingProvider::new("KEY".into());

        assert_eq!(
            provider.timeline_url("New York/NY"),
            format!("{DEFAULT_TIMELINE_URL}/New%20York%2FNY")
        );
    }

    #[test]
    fn timeline_url_tolerates_trailing_slash_in_base() {
        let provider =
            VisualCrossingProvider::with_base_url("KEY".into(), "http://localhost:9/tl/".into());

        assert_eq!(provider.timeline_url("Oslo"), "http://localhost:9/tl/Oslo");
    }

    #[test]
    fn parses_numeric_temperature() {
        let result = parse_current(PARIS).expect("valid body");

        assert_eq!(
            result,
            WeatherResult {
                resolved_address: "Paris".into(),
                temperature: "18".into(),
                conditions: "Clear".into(),
            }
        );
    }

    #[test]
    fn keeps_fractional_and_string_temperatures_verbatim() {
        let fractional = r#"{"resolvedAddress":"Oslo","currentConditions":{"temp":-3.5,"conditions":"Snow"}}"#;
        let text = r#"{"resolvedAddress":"Oslo","currentConditions":{"temp":"7.0","conditions":"Rain"}}"#;

        assert_eq!(parse_current(fractional).unwrap().temperature, "-3.5");
        assert_eq!(parse_current(text).unwrap().temperature, "7.0");
    }

    #[test]
    fn missing_fields_are_malformed() {
        let err = parse_current(r#"{"resolvedAddress":"Paris"}"#).unwrap_err();
        assert!(matches!(err, FetchError::Malformed(_)));

        let err = parse_current("City not found").unwrap_err();
        assert!(matches!(err, FetchError::Malformed(_)));
    }

    #[test]
    fn status_404_is_not_found() {
        let err = check_status(StatusCode::NOT_FOUND, "").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn other_statuses_are_generic_failures() {
        for status in [
            StatusCode::BAD_REQUEST,
            StatusCode::UNAUTHORIZED,
            StatusCode::TOO_MANY_REQUESTS,
            StatusCode::INTERNAL_SERVER_ERROR,
        ] {
            let err = check_status(status, "nope").unwrap_err();
            assert!(matches!(err, FetchError::Status { status: s, .. } if s == status));
        }

        assert!(check_status(StatusCode::OK, PARIS).is_ok());
    }

    #[test]
    fn truncate_body_limits_long_bodies() {
        let long = "é".repeat(300);
        let truncated = truncate_body(&long);

        assert_eq!(truncated.chars().count(), 203);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncate_body("short"), "short");
    }

    /// Serves one canned response on a local port and returns the request line it received.
    fn serve_once(response: String) -> (String, thread::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}/timeline", listener.local_addr().unwrap());

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut head = Vec::new();
            let mut chunk = [0u8; 1024];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut chunk).unwrap();
                if n == 0 {
                    break;
                }
                head.extend_from_slice(&chunk[..n]);
            }
            stream.write_all(response.as_bytes()).unwrap();

            let head = String::from_utf8_lossy(&head).into_owned();
            head.lines().next().unwrap_or_default().to_string()
        });

        (base_url, handle)
    }

    fn http_response(status: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        )
    }

    #[tokio::test]
    async fn sends_metric_json_query_and_decodes_success() {
        let (base_url, server) = serve_once(http_response("200 OK", PARIS));
        let provider = VisualCrossingProvider::with_base_url("K&Y".into(), base_url);

        let result = provider.current_conditions("São Paulo").await.unwrap();

        assert_eq!(
            server.join().unwrap(),
            "GET /timeline/S%C3%A3o%20Paulo?unitGroup=metric&key=K%26Y&contentType=json HTTP/1.1"
        );
        assert_eq!(result.resolved_address, "Paris");
        assert_eq!(result.temperature, "18");
        assert_eq!(result.conditions, "Clear");
    }

    #[tokio::test]
    async fn http_404_is_not_found_even_with_truncated_body() {
        let response = "HTTP/1.1 404 Not Found\r\nContent-Length: 100\r\nConnection: close\r\n\r\nshort";
        let (base_url, server) = serve_once(response.to_string());
        let provider = VisualCrossingProvider::with_base_url("KEY".into(), base_url);

        let err = provider.current_conditions("Atlantis").await.unwrap_err();
        server.join().unwrap();

        assert!(matches!(err, FetchError::NotFound), "got {err:?}");
    }

    #[tokio::test]
    async fn http_500_is_status_failure() {
        let (base_url, server) =
            serve_once(http_response("500 Internal Server Error", "upstream down"));
        let provider = VisualCrossingProvider::with_base_url("KEY".into(), base_url);

        let err = provider.current_conditions("Paris").await.unwrap_err();
        server.join().unwrap();

        match err {
            FetchError::Status { status, body } => {
                assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
                assert_eq!(body, "upstream down");
            }
            other => panic!("expected status failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn http_200_with_wrong_shape_is_malformed() {
        let (base_url, server) =
            serve_once(http_response("200 OK", r#"{"resolvedAddress":"Paris"}"#));
        let provider = VisualCrossingProvider::with_base_url("KEY".into(), base_url);

        let err = provider.current_conditions("Paris").await.unwrap_err();
        server.join().unwrap();

        assert!(matches!(err, FetchError::Malformed(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn unreachable_host_is_transport_failure() {
        // Nothing listens on the local discard port.
        let provider =
            VisualCrossingProvider::with_base_url("KEY".into(), "http://127.0.0.1:9".into());

        let err = provider.current_conditions("Paris").await.unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
        assert!(!err.is_not_found());
    }
}
