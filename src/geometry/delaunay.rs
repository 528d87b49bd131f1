// src/geometry/delaunay.rs

use std::collections::HashMap;

use bevy::math::Vec2;
use spade::{DelaunayTriangulation, Point2, Triangulation};

use crate::error::{ShatterError, ShatterResult};

/// Delaunay-Triangulierung einer Punktliste.
///
/// Liefert Index-Tripel in die übergebene Liste, gegen den Uhrzeigersinn
/// gewunden (Konvention von `spade`). Doppelte Punkte (nach dem Kantenfang
/// keine Seltenheit) kollabieren auf den Index ihres ersten Auftretens,
/// ohne die Indizes der übrigen Punkte zu verschieben.
///
/// Eine degenerierte Punktmenge (weniger als drei verschiedene Punkte,
/// alle kollinear) ergibt eine leere Liste, keinen Fehler.
pub fn triangulate(points: &[Vec2]) -> ShatterResult<Vec<[usize; 3]>> {
    let mut triangulation: DelaunayTriangulation<Point2<f64>> = DelaunayTriangulation::new();
    let mut first_index = HashMap::new();

    for (index, point) in points.iter().enumerate() {
        let handle = triangulation
            .insert(Point2::new(point.x as f64, point.y as f64))
            .map_err(|e| ShatterError::TriangulationFailed {
                reason: format!("point {index} at {point:?} rejected: {e:?}"),
            })?;
        first_index.entry(handle).or_insert(index);
    }

    let mut triples = Vec::with_capacity(triangulation.num_inner_faces());
    for face in triangulation.inner_faces() {
        let [a, b, c] = face.vertices();
        triples.push([
            resolve_index(&first_index, a.fix())?,
            resolve_index(&first_index, b.fix())?,
            resolve_index(&first_index, c.fix())?,
        ]);
    }

    Ok(triples)
}

fn resolve_index(
    first_index: &HashMap<spade::handles::FixedVertexHandle, usize>,
    handle: spade::handles::FixedVertexHandle,
) -> ShatterResult<usize> {
    first_index
        .get(&handle)
        .copied()
        .ok_or_else(|| ShatterError::GeometricFailure {
            operation: "triangulation vertex lookup".to_string(),
        })
}
