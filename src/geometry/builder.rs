// src/geometry/builder.rs

use bevy::math::Rect;
use rand::Rng;

use crate::config::ShatterConfig;
use crate::error::ShatterResult;
use crate::geometry::{break_points, delaunay, Triangle};

/// Zerlegt ein Rechteck in eine zufällige, lückenlose Dreiecksparkettierung.
///
/// Der Builder kapselt nur die Sampling-Parameter; Rechteck und Zufallsquelle
/// werden pro Aufruf übergeben, damit derselbe Builder mehrere Sprites
/// zerlegen kann und Tests einen festen Seed injizieren können.
#[derive(Debug, Clone, Copy)]
pub struct ShardGeometryBuilder {
    point_count: usize,
    edge_snap_threshold: f32,
}

impl ShardGeometryBuilder {
    pub fn new(point_count: usize, edge_snap_threshold: f32) -> Self {
        Self {
            point_count,
            edge_snap_threshold: edge_snap_threshold.max(0.0),
        }
    }

    pub fn from_config(config: &ShatterConfig) -> Self {
        Self::new(config.point_count, config.edge_snap_threshold)
    }

    /// Baut die Dreieckszerlegung von `rect`.
    ///
    /// Die Index-Tripel der Triangulierung werden in umgekehrter Reihenfolge
    /// (2, 1, 0) übernommen; die Dreiecke laufen dadurch im Uhrzeigersinn.
    /// Eine degenerierte Punktmenge (etwa ein Rechteck ohne Fläche) ergibt
    /// eine leere Liste.
    pub fn build<R: Rng + ?Sized>(&self, rect: Rect, rng: &mut R) -> ShatterResult<Vec<Triangle>> {
        let points =
            break_points::collect_break_points(rect, self.point_count, self.edge_snap_threshold, rng);
        let triples = delaunay::triangulate(&points)?;

        let mut triangles = Vec::with_capacity(triples.len());
        for [a, b, c] in triples {
            triangles.push(Triangle::new(points[c], points[b], points[a]));
        }
        Ok(triangles)
    }
}
