//! The routing-provider seam.
//!
//! # Pluggability
//!
//! [`PathBuilder`][crate::PathBuilder] talks to the external routing service
//! only through [`RouteProvider`], so the HTTP client can be swapped for a
//! fixture in tests or a different vendor in production without touching the
//! runner.  The provider is a type parameter, resolved at compile time.

use std::future::Future;

use serde::Deserialize;

use ft_core::GeoPoint;

use crate::{RoutingError, RoutingResult};

/// External routing service: ordered waypoints in, dense geometry out.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` because one provider is shared by
/// every vehicle task through the [`PathBuilder`][crate::PathBuilder].
pub trait RouteProvider: Send + Sync {
    /// Request a path visiting `waypoints` in order.
    ///
    /// Returns the dense geometry in travel order.  Any transport or protocol
    /// failure, and a response without geometry, is an `Err`.
    fn route(
        &self,
        waypoints: &[GeoPoint],
    ) -> impl Future<Output = RoutingResult<Vec<GeoPoint>>> + Send;
}

// ── GeoJSON response parsing ──────────────────────────────────────────────────

#[derive(Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Deserialize)]
struct Feature {
    geometry: Geometry,
}

/// Coordinates are `[lon, lat]`.  A multi-leg route comes back as one
/// `LineString` per leg.
#[derive(Deserialize)]
#[serde(tag = "type", content = "coordinates")]
enum Geometry {
    LineString(Vec<[f64; 2]>),
    MultiLineString(Vec<Vec<[f64; 2]>>),
}

/// Extract the first feature's geometry from a GeoJSON `FeatureCollection`,
/// concatenating legs in order.
///
/// # Errors
///
/// [`RoutingError::Malformed`] if the body is not a feature collection with a
/// line geometry; [`RoutingError::EmptyGeometry`] if there is no feature or
/// the geometry has no coordinates.
pub fn parse_geojson_route(body: &str) -> RoutingResult<Vec<GeoPoint>> {
    let collection: FeatureCollection = serde_json::from_str(body)?;
    let feature = collection
        .features
        .into_iter()
        .next()
        .ok_or(RoutingError::EmptyGeometry)?;

    let points: Vec<GeoPoint> = match feature.geometry {
        Geometry::LineString(coords) => coords.into_iter().map(GeoPoint::from_lon_lat).collect(),
        Geometry::MultiLineString(legs) => legs
            .into_iter()
            .flatten()
            .map(GeoPoint::from_lon_lat)
            .collect(),
    };

    if points.is_empty() {
        return Err(RoutingError::EmptyGeometry);
    }
    Ok(points)
}
