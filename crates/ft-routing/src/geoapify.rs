//! Geoapify routing client (feature `http`).
//!
//! `GET {endpoint}?waypoints=lat,lon|lat,lon|…&mode=<mode>&apiKey=<key>`
//! returning a GeoJSON feature collection whose first feature carries the
//! route as a `MultiLineString`, one line per leg.

use std::time::Duration;

use reqwest::{Client, Url};

use ft_core::GeoPoint;

use crate::provider::parse_geojson_route;
use crate::{RouteProvider, RoutingError, RoutingResult};

/// Public Geoapify routing endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.geoapify.com/v1/routing";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Thin async HTTP client for the Geoapify routing API.
#[derive(Debug, Clone)]
pub struct GeoapifyProvider {
    client:   Client,
    endpoint: String,
    api_key:  String,
    /// Vehicle profile passed as `mode` (`drive`, `truck`, `bus`, …).
    mode:     String,
}

impl GeoapifyProvider {
    /// Client for the public endpoint with the `truck` profile.
    pub fn new(api_key: impl Into<String>) -> RoutingResult<Self> {
        Self::with_endpoint(DEFAULT_ENDPOINT, api_key, "truck")
    }

    /// Client for a custom endpoint (self-hosted or a test server).
    pub fn with_endpoint(
        endpoint: &str,
        api_key:  impl Into<String>,
        mode:     impl Into<String>,
    ) -> RoutingResult<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key:  api_key.into(),
            mode:     mode.into(),
        })
    }

    fn request_url(&self, waypoints: &[GeoPoint]) -> RoutingResult<Url> {
        let mut url = Url::parse(&self.endpoint)
            .map_err(|err| RoutingError::Api(format!("failed to build routing URL: {err}")))?;
        url.query_pairs_mut()
            .append_pair("waypoints", &encode_waypoints(waypoints))
            .append_pair("mode", &self.mode)
            .append_pair("apiKey", &self.api_key);
        Ok(url)
    }
}

/// `lat,lon` pairs joined by `|`, the provider's waypoint syntax.
pub fn encode_waypoints(waypoints: &[GeoPoint]) -> String {
    waypoints
        .iter()
        .map(|p| format!("{},{}", p.lat, p.lon))
        .collect::<Vec<_>>()
        .join("|")
}

impl RouteProvider for GeoapifyProvider {
    async fn route(&self, waypoints: &[GeoPoint]) -> RoutingResult<Vec<GeoPoint>> {
        let url = self.request_url(waypoints)?;
        let response = self.client.get(url).send().await?.error_for_status()?;
        let body = response.text().await?;
        parse_geojson_route(&body)
    }
}
