// src/geometry/mod.rs
//
// Reine 2D-Geometrie der Zerlegung. Kein ECS, keine Physik, nur Punkte,
// Dreiecke und Polygone. Die Engine-Anbindung lebt unter `crate::shatter`.

pub mod break_points;
pub mod builder;
pub mod delaunay;
pub mod offset;
pub mod tiling;
pub mod triangle;

pub use break_points::{collect_break_points, rect_corners};
pub use builder::ShardGeometryBuilder;
pub use offset::offset_polygon;
pub use tiling::{assess_tiling, TilingReport};
pub use triangle::{Orientation, Triangle};

/// Toleranz für geometrische Vergleiche.
pub const EPSILON: f32 = 1e-6;
