// src/geometry/tiling.rs

use bevy::math::Rect;
use geo::{Area, BooleanOps, Coord, MultiPolygon, Polygon};

use super::Triangle;

/// Flächenbilanz einer Zerlegung: deckt die Dreiecksmenge das Rechteck
/// lückenlos und überlappungsfrei ab?
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TilingReport {
    /// Fläche des Rechtecks.
    pub rect_area: f64,
    /// Summe der Dreiecksflächen.
    pub shard_area: f64,
    /// Summe der paarweisen Überlappungsflächen.
    pub overlap_area: f64,
    /// Dreiecksfläche außerhalb des Rechtecks.
    pub out_of_bounds_area: f64,
}

impl TilingReport {
    pub fn is_exact_cover(&self, tolerance: f64) -> bool {
        (self.shard_area - self.rect_area).abs() <= tolerance
            && self.overlap_area <= tolerance
            && self.out_of_bounds_area <= tolerance
    }
}

/// Bewertet eine Zerlegung über boolesche Polygon-Operationen. Gedacht für
/// Tests und Diagnose, nicht für den Frame-Takt.
pub fn assess_tiling(rect: Rect, triangles: &[Triangle]) -> TilingReport {
    let rect_polygon = rect_to_polygon(rect);
    let shard_polygons: Vec<Polygon<f64>> = triangles.iter().map(triangle_to_polygon).collect();

    let shard_area: f64 = shard_polygons.iter().map(|p| p.unsigned_area()).sum();

    let mut overlap_area = 0.0;
    for i in 0..shard_polygons.len() {
        for j in (i + 1)..shard_polygons.len() {
            let shared: MultiPolygon<f64> = shard_polygons[i].intersection(&shard_polygons[j]);
            overlap_area += shared.unsigned_area();
        }
    }

    let mut out_of_bounds_area = 0.0;
    for polygon in &shard_polygons {
        out_of_bounds_area += polygon.difference(&rect_polygon).unsigned_area();
    }

    TilingReport {
        rect_area: f64::from(rect.width()) * f64::from(rect.height()),
        shard_area,
        overlap_area,
        out_of_bounds_area,
    }
}

fn triangle_to_polygon(triangle: &Triangle) -> Polygon<f64> {
    let [a, b, c] = triangle.vertices().map(|v| Coord {
        x: f64::from(v.x),
        y: f64::from(v.y),
    });
    geo::Triangle::new(a, b, c).to_polygon()
}

fn rect_to_polygon(rect: Rect) -> Polygon<f64> {
    geo::Rect::new(
        Coord {
            x: f64::from(rect.min.x),
            y: f64::from(rect.min.y),
        },
        Coord {
            x: f64::from(rect.max.x),
            y: f64::from(rect.max.y),
        },
    )
    .to_polygon()
}
