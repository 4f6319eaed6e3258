//! TopoJSON decoding and conversion into boundary shapes.
//!
//! A topology stores shared arcs once; geometries reference them by index.
//! Conversion resolves those references into standalone `Region`s, matching
//! the behaviour of the reference `topojson-client` `feature` function.

use std::collections::HashMap;

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::domain::{Geometry, Position, Region, RegionId};
use crate::error::AppError;

/// Raw topology document.
#[derive(Debug, Clone, Deserialize)]
pub struct Topology {
    #[serde(default)]
    pub transform: Option<Transform>,
    pub objects: HashMap<String, TopoGeometry>,
    #[serde(default)]
    pub arcs: Vec<Vec<Vec<f64>>>,
}

/// Quantization transform.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Transform {
    pub scale: [f64; 2],
    pub translate: [f64; 2],
}

impl Transform {
    fn apply(&self, x: f64, y: f64) -> Position {
        [
            x * self.scale[0] + self.translate[0],
            y * self.scale[1] + self.translate[1],
        ]
    }
}

/// One geometry object inside a topology.
///
/// Kept loosely typed so that `"type": null` geometries and unknown members
/// decode; the shape-specific fields are interpreted during conversion.
#[derive(Debug, Clone, Deserialize)]
pub struct TopoGeometry {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    #[serde(default)]
    pub arcs: Option<serde_json::Value>,
    #[serde(default)]
    pub coordinates: Option<serde_json::Value>,
    #[serde(default)]
    pub geometries: Vec<TopoGeometry>,
}

impl TopoGeometry {
    fn field<T: DeserializeOwned>(&self, value: &Option<serde_json::Value>, name: &str) -> Result<T, AppError> {
        let kind = self.kind.as_deref().unwrap_or("null");
        let value = value
            .as_ref()
            .ok_or_else(|| AppError::fetch(format!("{kind} geometry is missing '{name}'.")))?;
        serde_json::from_value(value.clone())
            .map_err(|e| AppError::fetch(format!("{kind} geometry has malformed '{name}': {e}")))
    }

    fn arcs<T: DeserializeOwned>(&self) -> Result<T, AppError> {
        self.field(&self.arcs, "arcs")
    }

    fn coordinates<T: DeserializeOwned>(&self) -> Result<T, AppError> {
        self.field(&self.coordinates, "coordinates")
    }
}

impl Topology {
    pub fn from_json(raw: &str) -> Result<Self, AppError> {
        serde_json::from_str(raw)
            .map_err(|e| AppError::fetch(format!("Invalid topology JSON: {e}")))
    }

    /// Convert the named object into regions.
    ///
    /// A `GeometryCollection` yields one region per member; any other object
    /// yields a single region.
    pub fn regions(&self, object: &str) -> Result<Vec<Region>, AppError> {
        let geometry = self
            .objects
            .get(object)
            .ok_or_else(|| AppError::fetch(format!("Topology has no object named '{object}'.")))?;

        let arcs = self.decode_arcs()?;
        let ctx = Context {
            arcs: &arcs,
            transform: self.transform,
        };

        match geometry.kind.as_deref() {
            Some("GeometryCollection") => geometry.geometries.iter().map(|g| ctx.region(g)).collect(),
            _ => Ok(vec![ctx.region(geometry)?]),
        }
    }

    /// Absolute arc positions, with delta decoding applied when quantized.
    fn decode_arcs(&self) -> Result<Vec<Vec<Position>>, AppError> {
        let mut out = Vec::with_capacity(self.arcs.len());
        for (idx, arc) in self.arcs.iter().enumerate() {
            let mut points = Vec::with_capacity(arc.len());
            let (mut x, mut y) = (0.0, 0.0);
            for raw in arc {
                let [px, py] = pair(raw)
                    .ok_or_else(|| AppError::fetch(format!("Arc {idx} has a malformed position.")))?;
                match self.transform {
                    Some(t) => {
                        x += px;
                        y += py;
                        points.push(t.apply(x, y));
                    }
                    None => points.push([px, py]),
                }
            }
            out.push(points);
        }
        Ok(out)
    }
}

struct Context<'a> {
    arcs: &'a [Vec<Position>],
    transform: Option<Transform>,
}

impl Context<'_> {
    fn region(&self, geometry: &TopoGeometry) -> Result<Region, AppError> {
        Ok(Region {
            id: geometry.id.as_ref().and_then(RegionId::from_json),
            geometry: self.geometry(geometry)?,
        })
    }

    fn geometry(&self, geometry: &TopoGeometry) -> Result<Option<Geometry>, AppError> {
        let g = match geometry.kind.as_deref() {
            None | Some("null") => return Ok(None),
            Some("Point") => Geometry::Point(self.point(&geometry.coordinates::<Vec<f64>>()?)?),
            Some("MultiPoint") => Geometry::MultiPoint(
                geometry
                    .coordinates::<Vec<Vec<f64>>>()?
                    .iter()
                    .map(|c| self.point(c))
                    .collect::<Result<_, _>>()?,
            ),
            Some("LineString") => Geometry::LineString(self.line(&geometry.arcs::<Vec<i64>>()?)?),
            Some("MultiLineString") => Geometry::MultiLineString(
                geometry
                    .arcs::<Vec<Vec<i64>>>()?
                    .iter()
                    .map(|a| self.line(a))
                    .collect::<Result<_, _>>()?,
            ),
            Some("Polygon") => Geometry::Polygon(self.polygon(&geometry.arcs::<Vec<Vec<i64>>>()?)?),
            Some("MultiPolygon") => Geometry::MultiPolygon(
                geometry
                    .arcs::<Vec<Vec<Vec<i64>>>>()?
                    .iter()
                    .map(|p| self.polygon(p))
                    .collect::<Result<_, _>>()?,
            ),
            Some("GeometryCollection") => {
                let mut members = Vec::with_capacity(geometry.geometries.len());
                for member in &geometry.geometries {
                    if let Some(g) = self.geometry(member)? {
                        members.push(g);
                    }
                }
                Geometry::GeometryCollection(members)
            }
            Some(other) => {
                return Err(AppError::fetch(format!("Unsupported geometry type '{other}'.")));
            }
        };
        Ok(Some(g))
    }

    fn point(&self, raw: &[f64]) -> Result<Position, AppError> {
        let [x, y] = pair(raw).ok_or_else(|| AppError::fetch("Point has a malformed position."))?;
        Ok(match self.transform {
            Some(t) => t.apply(x, y),
            None => [x, y],
        })
    }

    /// Stitch arcs end to end, dropping the shared joint between them.
    fn stitch(&self, arcs: &[i64]) -> Result<Vec<Position>, AppError> {
        let mut points: Vec<Position> = Vec::new();
        for &index in arcs {
            let (arc_idx, reversed) = if index < 0 {
                ((!index) as usize, true)
            } else {
                (index as usize, false)
            };
            let arc = self
                .arcs
                .get(arc_idx)
                .ok_or_else(|| AppError::fetch(format!("Arc index {index} is out of range.")))?;

            if !points.is_empty() {
                points.pop();
            }
            if reversed {
                points.extend(arc.iter().rev().copied());
            } else {
                points.extend(arc.iter().copied());
            }
        }
        Ok(points)
    }

    fn line(&self, arcs: &[i64]) -> Result<Vec<Position>, AppError> {
        let mut points = self.stitch(arcs)?;
        if let Some(&first) = points.first() {
            if points.len() < 2 {
                points.push(first);
            }
        }
        Ok(points)
    }

    fn ring(&self, arcs: &[i64]) -> Result<Vec<Position>, AppError> {
        let mut points = self.stitch(arcs)?;
        if let Some(&first) = points.first() {
            while points.len() < 4 {
                points.push(first);
            }
        }
        Ok(points)
    }

    fn polygon(&self, rings: &[Vec<i64>]) -> Result<Vec<Vec<Position>>, AppError> {
        rings.iter().map(|r| self.ring(r)).collect()
    }
}

fn pair(raw: &[f64]) -> Option<[f64; 2]> {
    match raw {
        [x, y, ..] => Some([*x, *y]),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_topology() -> Topology {
        // Two unit squares sharing the edge x=1. Arc 0 is the shared edge.
        Topology::from_json(
            r#"{
                "type": "Topology",
                "objects": {
                    "counties": {
                        "type": "GeometryCollection",
                        "geometries": [
                            {"type": "Polygon", "id": 1001, "arcs": [[0, 1]]},
                            {"type": "Polygon", "id": "01003", "arcs": [[2, -1]]},
                            {"type": null}
                        ]
                    },
                    "states": {"type": "Polygon", "id": "01", "arcs": [[1, 2]]}
                },
                "arcs": [
                    [[1, 0], [1, 1]],
                    [[1, 1], [0, 1], [0, 0], [1, 0]],
                    [[1, 0], [2, 0], [2, 1], [1, 1]]
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn stitches_forward_and_reversed_arcs_into_closed_rings() {
        let regions = square_topology().regions("counties").unwrap();
        assert_eq!(regions.len(), 3);

        assert_eq!(regions[0].id, Some(RegionId(1001)));
        assert_eq!(
            regions[0].geometry,
            Some(Geometry::Polygon(vec![vec![
                [1.0, 0.0],
                [1.0, 1.0],
                [0.0, 1.0],
                [0.0, 0.0],
                [1.0, 0.0],
            ]]))
        );

        assert_eq!(regions[1].id, Some(RegionId(1003)));
        assert_eq!(
            regions[1].geometry,
            Some(Geometry::Polygon(vec![vec![
                [1.0, 0.0],
                [2.0, 0.0],
                [2.0, 1.0],
                [1.0, 1.0],
                [1.0, 0.0],
            ]]))
        );

        assert_eq!(regions[2].id, None);
        assert_eq!(regions[2].geometry, None);
    }

    #[test]
    fn single_geometry_object_yields_one_region() {
        let regions = square_topology().regions("states").unwrap();
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].id, Some(RegionId(1)));
    }

    #[test]
    fn quantized_arcs_are_delta_decoded() {
        let topo = Topology::from_json(
            r#"{
                "type": "Topology",
                "transform": {"scale": [0.5, 2.0], "translate": [10.0, 100.0]},
                "objects": {"lines": {"type": "LineString", "arcs": [0]}},
                "arcs": [[[2, 1], [2, 0], [0, 3]]]
            }"#,
        )
        .unwrap();
        let regions = topo.regions("lines").unwrap();
        assert_eq!(
            regions[0].geometry,
            Some(Geometry::LineString(vec![[11.0, 102.0], [12.0, 102.0], [12.0, 108.0]]))
        );
    }

    #[test]
    fn short_rings_are_padded_with_first_point() {
        let topo = Topology::from_json(
            r#"{
                "type": "Topology",
                "objects": {"p": {"type": "Polygon", "arcs": [[0]]}},
                "arcs": [[[0, 0], [1, 1]]]
            }"#,
        )
        .unwrap();
        let regions = topo.regions("p").unwrap();
        assert_eq!(
            regions[0].geometry,
            Some(Geometry::Polygon(vec![vec![[0.0, 0.0], [1.0, 1.0], [0.0, 0.0], [0.0, 0.0]]]))
        );
    }

    #[test]
    fn missing_object_and_bad_arc_index_are_errors() {
        let topo = square_topology();
        let err = topo.regions("nation").unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_FETCH);

        let bad = Topology::from_json(
            r#"{"type":"Topology","objects":{"x":{"type":"LineString","arcs":[7]}},"arcs":[]}"#,
        )
        .unwrap();
        assert!(bad.regions("x").is_err());
    }
}
