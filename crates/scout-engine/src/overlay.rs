use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum OverlayError {
    #[error("coordinate out of range: lat {latitude}, lon {longitude}")]
    InvalidCoordinate { latitude: f64, longitude: f64 },
}

/// A WGS84 position, validated on construction.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, OverlayError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(OverlayError::InvalidCoordinate { latitude, longitude });
        }
        Ok(Self { latitude, longitude })
    }
}

/// A disaster zone to mark on the map.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DisasterArea {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// A deployable resource (ambulance, shelter, rescue team) to mark on the
/// map.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ResourcePoint {
    pub kind: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerKind {
    Hazard,
    Resource,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Marker {
    pub kind: MarkerKind,
    pub label: String,
    pub position: Coordinate,
}

/// Clustering annotation over the union of all markers.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClusterAnnotation {
    pub positions: Vec<Coordinate>,
}

/// A renderable map value: center, individual markers, and one cluster
/// annotation covering every marker.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MapOverlay {
    pub center: Coordinate,
    pub markers: Vec<Marker>,
    pub cluster: ClusterAnnotation,
}

/// Compose disaster areas and resource points into a map overlay: one
/// marker per input (hazards first), plus a cluster annotation over the
/// union of both sets. Any out-of-range coordinate — center included —
/// rejects the whole overlay; no partial map is produced.
pub fn build_overlay(
    center: (f64, f64),
    disaster_areas: &[DisasterArea],
    resource_points: &[ResourcePoint],
) -> Result<MapOverlay, OverlayError> {
    let center = Coordinate::new(center.0, center.1)?;

    let mut markers = Vec::with_capacity(disaster_areas.len() + resource_points.len());
    for area in disaster_areas {
        markers.push(Marker {
            kind: MarkerKind::Hazard,
            label: area.name.clone(),
            position: Coordinate::new(area.latitude, area.longitude)?,
        });
    }
    for resource in resource_points {
        markers.push(Marker {
            kind: MarkerKind::Resource,
            label: resource.kind.clone(),
            position: Coordinate::new(resource.latitude, resource.longitude)?,
        });
    }

    let cluster = ClusterAnnotation {
        positions: markers.iter().map(|m| m.position).collect(),
    };

    Ok(MapOverlay {
        center,
        markers,
        cluster,
    })
}
