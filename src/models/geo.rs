//! Department boundaries (GeoJSON) and their projection onto a flat canvas.
//!
//! Only what the choropleth needs is decoded: `properties.code`,
//! `properties.nom` and polygon rings. Other geometry types are skipped.

use serde::Deserialize;

use super::code::Keyed;
use super::lenient;

/// A ring of `[lon, lat, ...]` positions.
pub type Ring = Vec<Vec<f64>>;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub properties: FeatureProperties,
    #[serde(default)]
    pub geometry: Option<Geometry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeatureProperties {
    #[serde(default, deserialize_with = "lenient::text")]
    pub code: String,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub nom: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Polygon {
        coordinates: Vec<Ring>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Ring>>,
    },
    #[serde(other)]
    Unsupported,
}

impl Geometry {
    /// Every ring (outer boundaries and holes) of the geometry.
    pub fn rings(&self) -> Vec<&Ring> {
        match self {
            Geometry::Polygon { coordinates } => coordinates.iter().collect(),
            Geometry::MultiPolygon { coordinates } => coordinates.iter().flatten().collect(),
            Geometry::Unsupported => Vec::new(),
        }
    }
}

impl Keyed for Feature {
    fn raw_code(&self) -> &str {
        &self.properties.code
    }
}

/// Equirectangular projection fitted to a viewport.
///
/// Longitudes are scaled by cos(mean latitude) so mainland France keeps its
/// familiar shape; y grows downwards as in SVG.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    min_lon: f64,
    max_lat: f64,
    lon_factor: f64,
    scale: f64,
}

impl Projection {
    /// Fit every position of `rings` into `width` x `height`.
    /// Returns `None` when there is no usable position.
    pub fn fit<'a, I>(rings: I, width: f64, height: f64) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Ring>,
    {
        let mut bounds: Option<(f64, f64, f64, f64)> = None;
        for position in rings.into_iter().flatten() {
            let (Some(&lon), Some(&lat)) = (position.first(), position.get(1)) else {
                continue;
            };
            if !lon.is_finite() || !lat.is_finite() {
                continue;
            }
            bounds = Some(match bounds {
                None => (lon, lon, lat, lat),
                Some((min_lon, max_lon, min_lat, max_lat)) => (
                    min_lon.min(lon),
                    max_lon.max(lon),
                    min_lat.min(lat),
                    max_lat.max(lat),
                ),
            });
        }

        let (min_lon, max_lon, min_lat, max_lat) = bounds?;
        let lon_factor = ((min_lat + max_lat) / 2.0).to_radians().cos();
        let span_x = (max_lon - min_lon) * lon_factor;
        let span_y = max_lat - min_lat;

        let scale_x = if span_x > 0.0 { width / span_x } else { f64::INFINITY };
        let scale_y = if span_y > 0.0 { height / span_y } else { f64::INFINITY };
        let scale = scale_x.min(scale_y);

        Some(Self {
            min_lon,
            max_lat,
            lon_factor,
            scale: if scale.is_finite() { scale } else { 1.0 },
        })
    }

    pub fn project(&self, lon: f64, lat: f64) -> (f64, f64) {
        (
            (lon - self.min_lon) * self.lon_factor * self.scale,
            (self.max_lat - lat) * self.scale,
        )
    }
}
