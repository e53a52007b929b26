use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::provider::{
    Endpoint, ProviderError, WeatherProvider,
    payload::{OwCurrentResponse, OwForecastResponse, OwGeocodeEntry, OwOneCallResponse},
};

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

/// OpenWeatherMap client. Cloning shares the underlying connection pool.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: Option<String>,
    base_url: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            base_url: DEFAULT_BASE_URL.to_string(),
            http: Client::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Single GET against `path`; the credential is appended as `appid`.
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ProviderError> {
        let api_key = self.api_key.as_deref().ok_or(ProviderError::MissingCredential { endpoint })?;
        let url = format!("{}{}", self.base_url, path);

        debug!(%endpoint, %url, "sending provider request");

        let res = self
            .http
            .get(&url)
            .query(query)
            .query(&[("appid", api_key)])
            .send()
            .await
            .map_err(|e| {
                ProviderError::transport(endpoint, format!("failed to send request: {e}"))
            })?;

        let status = res.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(ProviderError::Auth { endpoint });
        }

        let body = res.text().await.map_err(|e| {
            ProviderError::transport(endpoint, format!("failed to read response body: {e}"))
        })?;

        if !status.is_success() {
            return Err(ProviderError::transport(
                endpoint,
                format!("status {}: {}", status, truncate_body(&body)),
            ));
        }

        serde_json::from_str(&body).map_err(|e| {
            ProviderError::transport(endpoint, format!("failed to parse JSON: {e}"))
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    async fn fetch_current(&self, city: &str) -> Result<OwCurrentResponse, ProviderError> {
        self.get_json(
            Endpoint::Current,
            "/data/2.5/weather",
            &[("q", city.to_string()), ("units", "metric".to_string())],
        )
        .await
    }

    async fn fetch_forecast(&self, city: &str) -> Result<OwForecastResponse, ProviderError> {
        self.get_json(
            Endpoint::Forecast,
            "/data/2.5/forecast",
            &[("q", city.to_string()), ("units", "metric".to_string())],
        )
        .await
    }

    async fn geocode(&self, city: &str) -> Result<Vec<OwGeocodeEntry>, ProviderError> {
        self.get_json(
            Endpoint::Geocode,
            "/geo/1.0/direct",
            &[("q", city.to_string()), ("limit", "1".to_string())],
        )
        .await
    }

    async fn fetch_alerts(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<OwOneCallResponse, ProviderError> {
        self.get_json(
            Endpoint::Alerts,
            "/data/3.0/onecall",
            &[
                ("lat", latitude.to_string()),
                ("lon", longitude.to_string()),
                ("exclude", "current,minutely,hourly,daily".to_string()),
            ],
        )
        .await
    }
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
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
        task::JoinHandle,
    };

    /// Serves one canned HTTP response on a free local port. The handle
    /// resolves to the request line that was received.
    async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();

            let mut request: Vec<u8> = Vec::new();
            let mut chunk = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&chunk[..n]);
            }

            let response = format!(
                "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();

            String::from_utf8_lossy(&request).lines().next().unwrap_or_default().to_string()
        });

        (base_url, handle)
    }

    #[tokio::test]
    async fn unauthorized_alerts_response_is_auth_error() {
        let (base_url, server) = serve_once("401 Unauthorized", r#"{"cod":401,"message":"Invalid API key"}"#).await;
        let client = OpenWeatherClient::new(Some("KEY".into())).with_base_url(base_url);

        let err = client.fetch_alerts(51.5, -0.12).await.unwrap_err();
        let request_line = server.await.unwrap();

        assert!(matches!(err, ProviderError::Auth { endpoint: Endpoint::Alerts }));
        assert!(request_line.starts_with("GET /data/3.0/onecall?"));
        assert!(request_line.contains("lat=51.5"));
        assert!(request_line.contains("lon=-0.12"));
        assert!(request_line.contains("appid=KEY"));
    }

    #[tokio::test]
    async fn non_json_body_is_transport_error() {
        let (base_url, server) = serve_once("200 OK", "not json").await;
        let client = OpenWeatherClient::new(Some("KEY".into())).with_base_url(base_url);

        let err = client.fetch_current("London").await.unwrap_err();
        server.await.unwrap();

        match err {
            ProviderError::Transport { endpoint, message } => {
                assert_eq!(endpoint, Endpoint::Current);
                assert!(message.contains("failed to parse JSON"));
            }
            other => panic!("expected transport error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn not_found_status_is_transport_error() {
        let (base_url, server) = serve_once("404 Not Found", r#"{"cod":"404","message":"city not found"}"#).await;
        let client = OpenWeatherClient::new(Some("KEY".into())).with_base_url(base_url);

        let err = client.fetch_forecast("Lndon").await.unwrap_err();
        server.await.unwrap();

        assert!(!err.is_auth());
        assert!(err.to_string().contains("404"));
        assert!(err.to_string().contains("city not found"));
    }

    #[tokio::test]
    async fn city_is_percent_encoded_and_key_appended() {
        let (base_url, server) = serve_once(
            "200 OK",
            r#"{"name":"São Paulo","weather":[{"description":"haze"}],"main":{"temp":24.0,"feels_like":25.1,"humidity":70,"pressure":1015}}"#,
        )
        .await;
        let client = OpenWeatherClient::new(Some("KEY".into())).with_base_url(base_url);

        let payload = client.fetch_current("São Paulo & Co").await.unwrap();
        let request_line = server.await.unwrap();

        assert_eq!(payload.name, "São Paulo");
        assert!(request_line.starts_with("GET /data/2.5/weather?"));
        assert!(request_line.contains("q=S%C3%A3o+Paulo+%26+Co"));
        assert!(request_line.contains("units=metric"));
        assert!(request_line.contains("appid=KEY"));
    }

    #[test]
    fn blank_key_counts_as_missing() {
        assert!(!OpenWeatherClient::new(Some("   ".into())).has_credential());
        assert!(!OpenWeatherClient::new(None).has_credential());
        assert!(OpenWeatherClient::new(Some("abc".into())).has_credential());
    }

    #[test]
    fn base_url_trailing_slash_is_dropped() {
        let client = OpenWeatherClient::new(None).with_base_url("http://localhost:8080/");
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[tokio::test]
    async fn request_without_key_fails_before_sending() {
        let client = OpenWeatherClient::new(None).with_base_url("http://127.0.0.1:9");
        let err = client.fetch_current("London").await.unwrap_err();
        assert!(!err.is_auth());
        assert!(matches!(err, ProviderError::MissingCredential { endpoint: Endpoint::Current }));
    }

    #[tokio::test]
    async fn unreachable_host_is_transport_error() {
        // Port 9 (discard) is not expected to accept HTTP connections locally.
        let client =
            OpenWeatherClient::new(Some("KEY".into())).with_base_url("http://127.0.0.1:9");
        let err = client.fetch_current("London").await.unwrap_err();
        assert!(!err.is_auth());
        assert!(matches!(err, ProviderError::Transport { endpoint: Endpoint::Current, .. }));
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let long = "é".repeat(300);
        let truncated = truncate_body(&long);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncated.chars().count(), 203);
        assert_eq!(truncate_body("short"), "short");
    }
}
