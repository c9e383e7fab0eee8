//! Country outlines decoded from a TopoJSON topology.
//!
//! Only the shared `arcs` are needed to draw borders, so objects and their
//! geometry indices are skipped. Each arc becomes a projected polyline.

use super::DataError;
use crate::projection::natural_earth1;
use serde::Deserialize;

/// Minimum projected distance between kept points, about a quarter degree.
const MIN_POINT_SPACING: f64 = 0.004;

#[derive(Debug, Deserialize)]
struct RawTopology {
    #[serde(default)]
    arcs: Vec<Vec<Vec<f64>>>,
    transform: Option<RawTransform>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct RawTransform {
    scale: [f64; 2],
    translate: [f64; 2],
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorldOutline {
    /// Projected polylines, split wherever an arc crosses the antimeridian.
    pub lines: Vec<Vec<(f64, f64)>>,
}

impl WorldOutline {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, DataError> {
        let topology: RawTopology =
            serde_json::from_slice(bytes).map_err(|source| DataError::Json {
                document: "topology".to_string(),
                source,
            })?;
        Ok(Self::decode(&topology))
    }

    fn decode(topology: &RawTopology) -> Self {
        let lines = topology
            .arcs
            .iter()
            .flat_map(|arc| split_at_antimeridian(&arc_positions(arc, topology.transform)))
            .map(|segment| {
                segment
                    .into_iter()
                    .map(|(lon, lat)| natural_earth1(lon, lat))
                    .collect::<Vec<_>>()
            })
            .map(|segment| thin(segment, MIN_POINT_SPACING))
            .filter(|segment| segment.len() > 1)
            .collect();
        Self { lines }
    }

    pub fn segment_count(&self) -> usize {
        self.lines.iter().map(|line| line.len().saturating_sub(1)).sum()
    }
}

/// Absolute `(lon, lat)` positions of an arc. Quantised topologies store
/// delta-encoded integer positions.
fn arc_positions(arc: &[Vec<f64>], transform: Option<RawTransform>) -> Vec<(f64, f64)> {
    let points = arc
        .iter()
        .filter_map(|point| Some((*point.first()?, *point.get(1)?)));

    match transform {
        Some(RawTransform { scale, translate }) => {
            let (mut x, mut y) = (0.0, 0.0);
            points
                .map(|(dx, dy)| {
                    x += dx;
                    y += dy;
                    (x.mul_add(scale[0], translate[0]), y.mul_add(scale[1], translate[1]))
                })
                .collect()
        }
        None => points.collect(),
    }
}

/// Drops points closer than `spacing` to the previously kept one. The end
/// points always survive so neighbouring arcs still meet.
fn thin(line: Vec<(f64, f64)>, spacing: f64) -> Vec<(f64, f64)> {
    let Some(&last) = line.last() else {
        return line;
    };
    let mut kept: Vec<(f64, f64)> = Vec::with_capacity(line.len());
    for point in line {
        match kept.last() {
            Some(previous) if (point.0 - previous.0).hypot(point.1 - previous.1) < spacing => {}
            _ => kept.push(point),
        }
    }
    if kept.last() != Some(&last) {
        kept.push(last);
    }
    kept
}

fn split_at_antimeridian(positions: &[(f64, f64)]) -> Vec<Vec<(f64, f64)>> {
    let mut segments = Vec::new();
    let mut current: Vec<(f64, f64)> = Vec::new();
    for &position in positions {
        if let Some(&(previous_lon, _)) = current.last() {
            if (position.0 - previous_lon).abs() > 180.0 {
                segments.push(std::mem::take(&mut current));
            }
        }
        current.push(position);
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}
