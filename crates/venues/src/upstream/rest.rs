//! JSON-over-HTTP venue provider.
//!
//! Endpoints, relative to the configured base URL:
//!
//! - `GET venues/search?ll={lat},{lng}` -> `{ "venues": [Venue, ...] }`
//! - `GET venues/{id}` -> `{ "venue": VenueDetails }`, 404 when unknown
//!
//! Credentials are sent as `client_id` / `client_secret` query parameters.

use std::time::Duration;

use anyhow::{anyhow, Context};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use url::Url;

use venues_core::venues::{Coordinates, Venue, VenueDetails, VenueProvider};

use crate::time::millis;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    venues: Vec<Venue>,
}

#[derive(Debug, Deserialize)]
struct DetailsResponse {
    venue: VenueDetails,
}

/// Venue provider reached over HTTP.
#[derive(Debug, Clone)]
pub struct RestVenueProvider {
    client: reqwest::Client,
    base_url: Url,
    client_id: String,
    client_secret: String,
}

impl RestVenueProvider {
    /// Creates a provider. `timeout` bounds each request end to end.
    pub fn new(
        base_url: Url,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        if base_url.cannot_be_a_base() {
            return Err(anyhow!("venue provider URL cannot be a base: {base_url}"));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url,
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        })
    }

    /// Builds `{base}/{segments...}` with each segment percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn fetch(&self, url: Url, extra: &[(&str, String)]) -> anyhow::Result<reqwest::Response> {
        let started = std::time::Instant::now();
        let response = self
            .client
            .get(url.clone())
            .query(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
            ])
            .query(extra)
            .send()
            .await
            .with_context(|| format!("request to venue provider failed: GET {}", url.path()))?;

        tracing::debug!(
            path = url.path(),
            status = response.status().as_u16(),
            elapsed_ms = millis(started.elapsed()),
            "Venue provider responded"
        );

        Ok(response)
    }
}

#[async_trait]
impl VenueProvider for RestVenueProvider {
    async fn search(&self, coords: Coordinates) -> anyhow::Result<Vec<Venue>> {
        let url = self.endpoint(&["venues", "search"]);
        let response = self
            .fetch(url, &[("ll", coords.to_string())])
            .await?
            .error_for_status()
            .context("venue search rejected by provider")?;

        let body: SearchResponse = response
            .json()
            .await
            .context("invalid venue search response")?;
        Ok(body.venues)
    }

    async fn details(&self, venue_id: &str) -> anyhow::Result<Option<VenueDetails>> {
        let url = self.endpoint(&["venues", venue_id]);
        let response = self.fetch(url, &[]).await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let body: DetailsResponse = response
            .error_for_status()
            .context("venue details rejected by provider")?
            .json()
            .await
            .context("invalid venue details response")?;
        Ok(Some(body.venue))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use axum::{
        extract::{Path, Query},
        http::StatusCode as AxumStatus,
        routing::get,
        Json, Router,
    };
    use serde_json::json;
    use tokio::net::TcpListener;

    async fn search(Query(params): Query<HashMap<String, String>>) -> Json<serde_json::Value> {
        assert_eq!(params.get("client_id").map(String::as_str), Some("id"));
        assert_eq!(params.get("client_secret").map(String::as_str), Some("secret"));
        Json(json!({
            "venues": [{
                "id": "v1",
                "name": format!("near {}", params["ll"]),
                "latitude": 1.0,
                "longitude": 2.0
            }]
        }))
    }

    async fn details(Path(id): Path<String>) -> Result<Json<serde_json::Value>, AxumStatus> {
        match id.as_str() {
            "v1" => Ok(Json(json!({
                "venue": {
                    "id": "v1",
                    "name": "Rambla",
                    "latitude": 1.0,
                    "longitude": 2.0,
                    "rating": 8.5
                }
            }))),
            "broken" => Err(AxumStatus::INTERNAL_SERVER_ERROR),
            _ => Err(AxumStatus::NOT_FOUND),
        }
    }

    /// Serves a fake provider under `/v2` and returns its base URL.
    async fn spawn_fake_provider() -> Url {
        let app = Router::new()
            .route("/v2/venues/search", get(search))
            .route("/v2/venues/{id}", get(details));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Url::parse(&format!("http://{addr}/v2")).unwrap()
    }

    fn provider(base_url: Url) -> RestVenueProvider {
        RestVenueProvider::new(base_url, "id", "secret", Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let provider = provider(Url::parse("https://api.example.com/v2").unwrap());
        assert_eq!(
            provider.endpoint(&["venues", "search"]).as_str(),
            "https://api.example.com/v2/venues/search"
        );
    }

    #[test]
    fn test_endpoint_encodes_ids() {
        let provider = provider(Url::parse("https://api.example.com/v2/").unwrap());
        assert_eq!(
            provider.endpoint(&["venues", "a/b c"]).as_str(),
            "https://api.example.com/v2/venues/a%2Fb%20c"
        );
    }

    #[tokio::test]
    async fn test_search() {
        let provider = provider(spawn_fake_provider().await);
        let coords = Coordinates::new(1.5, -2.5).unwrap();

        let venues = provider.search(coords).await.unwrap();

        assert_eq!(venues.len(), 1);
        assert_eq!(venues[0].name, "near 1.5,-2.5");
    }

    #[tokio::test]
    async fn test_details_found() {
        let provider = provider(spawn_fake_provider().await);

        let details = provider.details("v1").await.unwrap().unwrap();

        assert_eq!(details.venue.name, "Rambla");
        assert_eq!(details.rating, Some(8.5));
    }

    #[tokio::test]
    async fn test_details_not_found_is_none() {
        let provider = provider(spawn_fake_provider().await);
        assert!(provider.details("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_details_server_error_is_err() {
        let provider = provider(spawn_fake_provider().await);
        let err = provider.details("broken").await.unwrap_err();
        assert!(format!("{err:#}").contains("rejected by provider"));
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_err() {
        let provider = provider(Url::parse("http://127.0.0.1:1/v2").unwrap());
        let coords = Coordinates::new(0.0, 0.0).unwrap();
        assert!(provider.search(coords).await.is_err());
    }
}
