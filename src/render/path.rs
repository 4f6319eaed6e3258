//! Projection-less geographic path generator.
//!
//! Geometries are already in screen space, so positions are written straight
//! into SVG path data. Polygon rings drop their closing position and end with
//! `Z`; points are drawn as small circles.

use std::fmt::Write;

use crate::domain::{Geometry, Position};

#[derive(Debug, Clone, Copy)]
pub struct PathGenerator {
    /// Decimal places kept for coordinates.
    pub digits: i32,
    pub point_radius: f64,
}

impl Default for PathGenerator {
    fn default() -> Self {
        Self {
            digits: 3,
            point_radius: 4.5,
        }
    }
}

impl PathGenerator {
    /// Path data for `geometry`, or `None` when nothing would be drawn.
    pub fn path(&self, geometry: &Geometry) -> Option<String> {
        let mut out = String::new();
        self.write_geometry(&mut out, geometry);
        if out.is_empty() { None } else { Some(out) }
    }

    fn write_geometry(&self, out: &mut String, geometry: &Geometry) {
        match geometry {
            Geometry::Point(p) => self.write_point(out, p),
            Geometry::MultiPoint(ps) => ps.iter().for_each(|p| self.write_point(out, p)),
            Geometry::LineString(line) => self.write_line(out, line, false),
            Geometry::MultiLineString(lines) => lines.iter().for_each(|l| self.write_line(out, l, false)),
            Geometry::Polygon(rings) => self.write_polygon(out, rings),
            Geometry::MultiPolygon(polys) => polys.iter().for_each(|p| self.write_polygon(out, p)),
            Geometry::GeometryCollection(members) => {
                members.iter().for_each(|g| self.write_geometry(out, g))
            }
        }
    }

    fn write_polygon(&self, out: &mut String, rings: &[Vec<Position>]) {
        for ring in rings {
            // Rings repeat their first position at the end; the `Z` closes it.
            let open = match ring.split_last() {
                Some((last, rest)) if !rest.is_empty() && last == &rest[0] => rest,
                _ => ring.as_slice(),
            };
            self.write_line(out, open, true);
        }
    }

    fn write_line(&self, out: &mut String, line: &[Position], closed: bool) {
        if line.is_empty() {
            return;
        }
        for (i, p) in line.iter().enumerate() {
            let cmd = if i == 0 { 'M' } else { 'L' };
            let _ = write!(out, "{cmd}{},{}", self.coord(p[0]), self.coord(p[1]));
        }
        if closed {
            out.push('Z');
        }
    }

    fn write_point(&self, out: &mut String, p: &Position) {
        let r = self.coord(self.point_radius);
        let d = self.coord(self.point_radius * 2.0);
        let _ = write!(
            out,
            "M{},{}m0,{r}a{r},{r} 0 1,1 0,-{d}a{r},{r} 0 1,1 0,{d}z",
            self.coord(p[0]),
            self.coord(p[1]),
        );
    }

    fn coord(&self, v: f64) -> String {
        let k = 10f64.powi(self.digits);
        super::svg::num((v * k).round() / k)
    }
}
