// src/shatter/descriptor.rs

use bevy::math::Vec2;

use crate::geometry::{offset_polygon, Triangle};

/// Geometrische Beschreibung einer einzelnen Scherbe in lokalen Koordinaten.
///
/// `origin` ist der Schwerpunkt des Quelldreiecks im Rechteck-Raum; beide
/// Polygone sind um diesen Schwerpunkt zentriert. Das Sichtpolygon um
/// `origin` verschoben ergibt wieder das Quelldreieck.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShardDescriptor {
    /// Sichtpolygon der Scherbe, lokal zum Schwerpunkt.
    pub visual: [Vec2; 3],
    /// Kollisionspolygon, lokal zum Schwerpunkt: das geschrumpfte
    /// Sichtpolygon oder, falls das Schrumpfen kein Ergebnis liefert,
    /// das Sichtpolygon selbst.
    pub collision: [Vec2; 3],
    /// Schwerpunkt des Quelldreiecks im Rechteck-Raum.
    pub origin: Vec2,
}

impl ShardDescriptor {
    /// Baut die Scherbenbeschreibung eines Dreiecks. `overlap` wird als
    /// Offset-Distanz an das Kollisionspolygon durchgereicht; negative Werte
    /// schrumpfen es nach innen.
    pub fn from_triangle(triangle: &Triangle, overlap: f32) -> Self {
        let origin = triangle.centroid();
        let visual = [
            triangle.a - origin,
            triangle.b - origin,
            triangle.c - origin,
        ];
        let collision = match offset_polygon(&visual, overlap) {
            Some(offset) if offset.len() == 3 => [offset[0], offset[1], offset[2]],
            _ => visual,
        };

        Self {
            visual,
            collision,
            origin,
        }
    }

    /// Rekonstruiert das Quelldreieck aus Sichtpolygon und Ursprung.
    pub fn source_triangle(&self) -> Triangle {
        Triangle::new(
            self.visual[0] + self.origin,
            self.visual[1] + self.origin,
            self.visual[2] + self.origin,
        )
    }
}

/// Erzeugt die Scherbenbeschreibungen einer kompletten Zerlegung, in der
/// Reihenfolge der Dreiecke.
pub fn synthesize_shards(triangles: &[Triangle], overlap: f32) -> Vec<ShardDescriptor> {
    triangles
        .iter()
        .map(|triangle| ShardDescriptor::from_triangle(triangle, overlap))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample_triangle() -> Triangle {
        Triangle::new(
            Vec2::new(20.0, 30.0),
            Vec2::new(120.0, 40.0),
            Vec2::new(50.0, 140.0),
        )
    }

    #[test]
    fn test_origin_is_centroid() {
        let triangle = sample_triangle();
        let descriptor = ShardDescriptor::from_triangle(&triangle, 0.0);
        assert_relative_eq!(descriptor.origin.x, (20.0 + 120.0 + 50.0) / 3.0);
        assert_relative_eq!(descriptor.origin.y, (30.0 + 40.0 + 140.0) / 3.0);
    }

    #[test]
    fn test_visual_polygon_reconstructs_triangle() {
        let triangle = sample_triangle();
        let descriptor = ShardDescriptor::from_triangle(&triangle, -5.0);
        let rebuilt = descriptor.source_triangle();
        for (rebuilt, original) in rebuilt.vertices().iter().zip(triangle.vertices()) {
            assert_relative_eq!(rebuilt.x, original.x, epsilon = 1e-4);
            assert_relative_eq!(rebuilt.y, original.y, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_zero_overlap_keeps_polygons_identical() {
        let descriptor = ShardDescriptor::from_triangle(&sample_triangle(), 0.0);
        assert_eq!(descriptor.visual, descriptor.collision);
    }

    #[test]
    fn test_negative_overlap_shrinks_collision_polygon() {
        let descriptor = ShardDescriptor::from_triangle(&sample_triangle(), -5.0);
        assert_ne!(descriptor.visual, descriptor.collision);

        let visual = Triangle::new(
            descriptor.visual[0],
            descriptor.visual[1],
            descriptor.visual[2],
        );
        let collision = Triangle::new(
            descriptor.collision[0],
            descriptor.collision[1],
            descriptor.collision[2],
        );
        for vertex in descriptor.collision {
            assert!(visual.contains_point(vertex));
        }
        assert!(collision.area() < visual.area());
    }

    #[test]
    fn test_infeasible_shrink_falls_back_to_visual() {
        // Inkreisradius ~2.93, Schrumpfen um 5 liefert kein Polygon.
        let tiny = Triangle::new(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(0.0, 10.0),
        );
        let descriptor = ShardDescriptor::from_triangle(&tiny, -5.0);
        assert_eq!(descriptor.visual, descriptor.collision);
    }

    #[test]
    fn test_synthesis_preserves_order() {
        let triangles = vec![
            sample_triangle(),
            sample_triangle().translated(Vec2::new(200.0, 0.0)),
        ];
        let descriptors = synthesize_shards(&triangles, -5.0);
        assert_eq!(descriptors.len(), 2);
        for (descriptor, triangle) in descriptors.iter().zip(&triangles) {
            assert_relative_eq!(descriptor.origin.x, triangle.centroid().x);
            assert_relative_eq!(descriptor.origin.y, triangle.centroid().y);
        }
    }
}
