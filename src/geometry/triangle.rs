// src/geometry/triangle.rs

use bevy::math::Vec2;

use super::EPSILON;

/// Umlaufsinn eines Dreiecks bzw. Polygons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Clockwise,
    CounterClockwise,
    Collinear,
}

/// Ein Dreieck als geordnetes Tripel von Eckpunkten.
///
/// Die Reihenfolge der Punkte ist Teil der Daten: der Builder liefert
/// Dreiecke im Uhrzeigersinn (negative vorzeichenbehaftete Fläche), und die
/// Offset-Richtung des Kollisionspolygons leitet sich aus dem Umlaufsinn ab.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub a: Vec2,
    pub b: Vec2,
    pub c: Vec2,
}

impl Triangle {
    pub fn new(a: Vec2, b: Vec2, c: Vec2) -> Self {
        Self { a, b, c }
    }

    pub fn vertices(&self) -> [Vec2; 3] {
        [self.a, self.b, self.c]
    }

    /// Arithmetisches Mittel der drei Eckpunkte.
    pub fn centroid(&self) -> Vec2 {
        (self.a + self.b + self.c) / 3.0
    }

    /// Doppelte vorzeichenbehaftete Fläche (Kreuzprodukt der Kantenvektoren).
    /// Positiv für Dreiecke gegen den Uhrzeigersinn.
    pub fn signed_area_doubled(&self) -> f32 {
        (self.b.x - self.a.x) * (self.c.y - self.a.y)
            - (self.b.y - self.a.y) * (self.c.x - self.a.x)
    }

    pub fn area(&self) -> f32 {
        self.signed_area_doubled().abs() * 0.5
    }

    pub fn orientation(&self) -> Orientation {
        let doubled = self.signed_area_doubled();
        if doubled.abs() <= EPSILON {
            Orientation::Collinear
        } else if doubled > 0.0 {
            Orientation::CounterClockwise
        } else {
            Orientation::Clockwise
        }
    }

    /// Punkt-im-Dreieck-Test über die Vorzeichen der Kanten-Kreuzprodukte.
    /// Punkte auf einer Kante gelten als enthalten.
    pub fn contains_point(&self, point: Vec2) -> bool {
        let d1 = edge_sign(point, self.a, self.b);
        let d2 = edge_sign(point, self.b, self.c);
        let d3 = edge_sign(point, self.c, self.a);

        let has_negative = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
        let has_positive = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;

        !(has_negative && has_positive)
    }

    /// Dreieck um einen Versatz verschoben.
    pub fn translated(&self, offset: Vec2) -> Self {
        Self::new(self.a + offset, self.b + offset, self.c + offset)
    }
}

fn edge_sign(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    (p.x - b.x) * (a.y - b.y) - (a.x - b.x) * (p.y - b.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn right_triangle() -> Triangle {
        Triangle::new(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(0.0, 10.0),
        )
    }

    #[test]
    fn test_area_of_right_triangle() {
        assert_relative_eq!(right_triangle().area(), 50.0);
    }

    #[test]
    fn test_centroid_is_vertex_mean() {
        let centroid = right_triangle().centroid();
        assert_relative_eq!(centroid.x, 10.0 / 3.0);
        assert_relative_eq!(centroid.y, 10.0 / 3.0);
    }

    #[test]
    fn test_orientation() {
        let ccw = right_triangle();
        assert_eq!(ccw.orientation(), Orientation::CounterClockwise);

        let cw = Triangle::new(ccw.c, ccw.b, ccw.a);
        assert_eq!(cw.orientation(), Orientation::Clockwise);

        let collinear = Triangle::new(
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(2.0, 2.0),
        );
        assert_eq!(collinear.orientation(), Orientation::Collinear);
    }

    #[test]
    fn test_contains_point() {
        let triangle = right_triangle();
        assert!(triangle.contains_point(Vec2::new(2.0, 2.0)));
        assert!(triangle.contains_point(Vec2::new(0.0, 0.0)));
        assert!(!triangle.contains_point(Vec2::new(8.0, 8.0)));
        assert!(!triangle.contains_point(Vec2::new(-1.0, 5.0)));
    }

    #[test]
    fn test_contains_point_regardless_of_winding() {
        let ccw = right_triangle();
        let cw = Triangle::new(ccw.c, ccw.b, ccw.a);
        assert!(cw.contains_point(Vec2::new(2.0, 2.0)));
        assert!(!cw.contains_point(Vec2::new(11.0, 0.0)));
    }

    #[test]
    fn test_translated_preserves_shape() {
        let triangle = right_triangle();
        let moved = triangle.translated(Vec2::new(5.0, -3.0));
        assert_relative_eq!(moved.area(), triangle.area());
        assert_relative_eq!(moved.a.x, 5.0);
        assert_relative_eq!(moved.a.y, -3.0);
        assert_eq!(moved.orientation(), triangle.orientation());
    }
}
