// src/geometry/break_points.rs

use bevy::math::{Rect, Vec2};
use rand::Rng;

/// Die vier Eckpunkte eines Rechtecks in deterministischer Reihenfolge:
/// `min`, `max`, `(max.x, min.y)`, `(min.x, max.y)`.
///
/// Die Reihenfolge hat keinen Einfluss auf die Zerlegung, muss aber bei
/// festem Seed reproduzierbar bleiben.
pub fn rect_corners(rect: Rect) -> [Vec2; 4] {
    [
        rect.min,
        rect.max,
        Vec2::new(rect.max.x, rect.min.y),
        Vec2::new(rect.min.x, rect.max.y),
    ]
}

/// Sammelt die Bruchpunkte für die Triangulierung: zuerst die vier Ecken,
/// danach `count` gleichverteilt gesampelte Punkte im Rechteck, jeweils
/// achsenweise auf die Kante gezogen, wenn sie näher als `snap_threshold`
/// an ihr liegen. Die Ecken selbst werden nie gefangen.
pub fn collect_break_points<R: Rng + ?Sized>(
    rect: Rect,
    count: usize,
    snap_threshold: f32,
    rng: &mut R,
) -> Vec<Vec2> {
    let mut points = Vec::with_capacity(count + 4);
    points.extend(rect_corners(rect));

    for _ in 0..count {
        let sampled = Vec2::new(
            rect.min.x + rng.random_range(0.0..=rect.width()),
            rect.min.y + rng.random_range(0.0..=rect.height()),
        );
        points.push(snap_to_edges(sampled, rect, snap_threshold));
    }

    points
}

/// Achsenweiser Kantenfang mit strikten Vergleichen: erst die nahe, dann die
/// ferne Kante. Kein genereller Clamp, Punkte außerhalb des Bandes bleiben
/// unverändert.
fn snap_to_edges(mut point: Vec2, rect: Rect, threshold: f32) -> Vec2 {
    if point.x < rect.min.x + threshold {
        point.x = rect.min.x;
    } else if point.x > rect.max.x - threshold {
        point.x = rect.max.x;
    }

    if point.y < rect.min.y + threshold {
        point.y = rect.min.y;
    } else if point.y > rect.max.y - threshold {
        point.y = rect.max.y;
    }

    point
}
