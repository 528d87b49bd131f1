// src/geometry/offset.rs

use bevy::math::Vec2;

use super::EPSILON;

/// Verschiebt jede Kante eines konvexen Polygons um `delta` entlang ihrer
/// Außennormale und schneidet benachbarte Kanten neu. Positive Distanzen
/// vergrößern das Polygon, negative schrumpfen es nach innen, jeweils
/// unabhängig vom Umlaufsinn der Eingabe, der erhalten bleibt.
///
/// Liefert `None`, wenn kein gültiges Polygon entsteht: weniger als drei
/// Punkte, kollineare Eingabe, nicht-endliche Distanz oder ein Schrumpfen
/// über den Inkreis hinaus, bei dem die Halbebenen-Schnittmenge leer wird.
/// Der Aufrufer fällt dann auf das ungeschrumpfte Polygon zurück.
pub fn offset_polygon(vertices: &[Vec2], delta: f32) -> Option<Vec<Vec2>> {
    if vertices.len() < 3 || !delta.is_finite() {
        return None;
    }
    if delta == 0.0 {
        return Some(vertices.to_vec());
    }

    let area_doubled = polygon_signed_area_doubled(vertices);
    if area_doubled.abs() <= EPSILON {
        return None;
    }
    let winding = if area_doubled > 0.0 { 1.0 } else { -1.0 };

    let vertex_count = vertices.len();
    let mut edges = Vec::with_capacity(vertex_count);
    for i in 0..vertex_count {
        let from = vertices[i];
        let to = vertices[(i + 1) % vertex_count];
        let along = to - from;
        let length = along.length();
        if length <= EPSILON {
            return None;
        }
        let direction = along / length;
        // Für Umlauf gegen den Uhrzeigersinn zeigt die Außennormale nach
        // rechts der Kantenrichtung, für Uhrzeigersinn nach links.
        let outward = Vec2::new(direction.y, -direction.x) * winding;
        edges.push(ShiftedEdge {
            support: from + outward * delta,
            direction,
            outward,
        });
    }

    let mut result = Vec::with_capacity(vertex_count);
    for i in 0..vertex_count {
        let previous = &edges[(i + vertex_count - 1) % vertex_count];
        let current = &edges[i];
        result.push(line_intersection(previous, current)?);
    }

    // Beim Schrumpfen über den Inkreis hinaus bilden die Geradenschnitte ein
    // gespiegeltes Polygon. Jeder Ergebnispunkt muss deshalb auf der
    // Innenseite aller verschobenen Kanten liegen.
    let extent = vertices
        .iter()
        .fold(0.0_f32, |acc, v| acc.max(v.x.abs()).max(v.y.abs()));
    let slack = (extent + delta.abs()) * 1e-5 + EPSILON;
    for vertex in &result {
        if !vertex.x.is_finite() || !vertex.y.is_finite() {
            return None;
        }
        for edge in &edges {
            if (*vertex - edge.support).dot(edge.outward) > slack {
                return None;
            }
        }
    }

    let result_area_doubled = polygon_signed_area_doubled(&result);
    if result_area_doubled.abs() <= EPSILON
        || result_area_doubled.signum() != area_doubled.signum()
    {
        return None;
    }

    Some(result)
}

struct ShiftedEdge {
    support: Vec2,
    direction: Vec2,
    outward: Vec2,
}

/// Schnittpunkt zweier Geraden in Parameterform.
/// `None` bei (nahezu) parallelen Geraden.
fn line_intersection(first: &ShiftedEdge, second: &ShiftedEdge) -> Option<Vec2> {
    let denominator = first.direction.perp_dot(second.direction);
    if denominator.abs() <= EPSILON {
        return None;
    }
    let t = (second.support - first.support).perp_dot(second.direction) / denominator;
    Some(first.support + first.direction * t)
}

/// Doppelte vorzeichenbehaftete Fläche nach der Schuhbandformel.
pub fn polygon_signed_area_doubled(vertices: &[Vec2]) -> f32 {
    let mut sum = 0.0;
    for i in 0..vertices.len() {
        let a = vertices[i];
        let b = vertices[(i + 1) % vertices.len()];
        sum += a.x * b.y - b.x * a.y;
    }
    sum
}
