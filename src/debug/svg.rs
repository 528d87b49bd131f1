// src/debug/svg.rs
use bevy::log::info;
use bevy::math::{Rect, Vec2};
use std::io::Write;

use crate::shatter::descriptor::ShardDescriptor;

/// Ein Helfer zum Erstellen einer SVG-Datei.
struct SvgBuilder {
    content: String,
    // Relative Größen, die vom Builder berechnet werden
    point_radius: f64,
}

impl SvgBuilder {
    /// Erstellt ein neues SVG-Grundgerüst mit Header, Stil und Hintergrund.
    fn new(rect: Rect, svg_pixel_size: f64) -> Self {
        let viewbox_min_x = rect.min.x as f64;
        let viewbox_min_y = rect.min.y as f64;
        let viewbox_width = rect.width() as f64;
        let viewbox_height = rect.height() as f64;

        let stroke_w_normal = (viewbox_width + viewbox_height) / 2.0 * 0.005;
        let stroke_w_thin = (viewbox_width + viewbox_height) / 2.0 * 0.002;
        let point_radius = (viewbox_width + viewbox_height) / 2.0 * 0.004;
        let font_size_coord = point_radius * 1.1;

        let content = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<svg width="{svg_pixel_size}" height="{svg_pixel_size}" viewBox="{viewbox_min_x} {viewbox_min_y} {viewbox_width} {viewbox_height}" xmlns="http://www.w3.org/2000/svg">
  <style>
    .background {{ fill: #f0f0f0; fill-opacity: 1.0; }}
    .pane-bounds {{ fill: none; stroke: #888888; stroke-width: {stroke_w_thin}; stroke-dasharray: 2,2; }}
    .shard-triangle {{ fill: rgba(150, 200, 255, 0.4); stroke: #0055aa; stroke-width: {stroke_w_thin}; }}
    .shard-collision {{ fill: none; stroke: #cc0000; stroke-width: {stroke_w_normal}; }}
    .break-point {{ fill: #ffaaaa; stroke: #cc0000; stroke-width: {stroke_w_thin}; }}
    .shard-index {{
        font-family: monospace;
        font-size: {font_size_coord:.3}px;
        fill: #000000;
        text-anchor: middle;
        dominant-baseline: middle;
    }}
  </style>
  <rect x="{viewbox_min_x}" y="{viewbox_min_y}" width="{viewbox_width}" height="{viewbox_height}" class="background" />
"#,
        );

        Self {
            content,
            point_radius,
        }
    }

    /// Zeichnet ein Polygon.
    fn draw_polygon(&mut self, vertices: &[Vec2], class: &str) {
        if vertices.len() < 2 {
            return;
        }
        let points_str: String = vertices
            .iter()
            .map(|p| format!("{:.3},{:.3}", p.x, p.y))
            .collect::<Vec<_>>()
            .join(" ");
        self.content.push_str(&format!(
            r#"  <polygon points="{}" class="{}" />
"#,
            points_str, class
        ));
    }

    /// Zeichnet einen Kreis.
    fn draw_circle(&mut self, center: &Vec2, radius: f64, class: &str) {
        self.content.push_str(&format!(
            r#"  <circle cx="{:.3}" cy="{:.3}" r="{:.3}" class="{}" />
"#,
            center.x, center.y, radius, class
        ));
    }

    /// Zeichnet Text.
    fn draw_text(&mut self, pos: &Vec2, text: &str, class: &str) {
        self.content.push_str(&format!(
            r#"  <text x="{:.3}" y="{:.3}" class="{}">{}</text>
"#,
            pos.x, pos.y, class, text
        ));
    }

    /// Zeichnet ein Rechteck.
    fn draw_rect(&mut self, rect: Rect, class: &str) {
        self.content.push_str(&format!(
            r#"  <rect x="{}" y="{}" width="{}" height="{}" class="{}" />
"#,
            rect.min.x,
            rect.min.y,
            rect.width(),
            rect.height(),
            class
        ));
    }

    /// Speichert die SVG-Datei und schließt die Tags.
    fn save(mut self, filename: &str) -> Result<(), Box<dyn std::error::Error>> {
        self.content.push_str("</svg>");
        let mut file = std::fs::File::create(filename)?;
        file.write_all(self.content.as_bytes())?;
        info!("Debug SVG '{}' wurde erstellt.", filename);
        Ok(())
    }
}

/// Erstellt eine SVG-Datei, die ein Bruchmuster anzeigt: Sprite-Rechteck,
/// Bruchpunkte, Scherben-Dreiecke und deren (geschrumpfte) Kollisionspolygone.
///
/// # Arguments
/// * `filename` - Der Dateipfad für die zu erstellende SVG.
/// * `rect` - Das Rechteck des zersplitterten Sprites ("ViewBox").
/// * `break_points` - Die Punktmenge, aus der die Triangulierung entstand.
/// * `shards` - Die erzeugten Scherben-Beschreibungen.
/// * `svg_pixel_size` - Die Größe der SVG in Pixeln (Breite und Höhe).
#[cfg(debug_assertions)]
pub fn create_fracture_debug_svg(
    filename: &str,
    rect: Rect,
    break_points: &[Vec2],
    shards: &[ShardDescriptor],
    svg_pixel_size: f64,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut svg = SvgBuilder::new(rect, svg_pixel_size);
    svg.draw_rect(rect, "pane-bounds");

    // Zeichne Scherben-Dreiecke und Kollisionspolygone in Weltkoordinaten
    for (index, shard) in shards.iter().enumerate() {
        let visual: Vec<Vec2> = shard.visual.iter().map(|v| shard.origin + *v).collect();
        svg.draw_polygon(&visual, "shard-triangle");

        let collision: Vec<Vec2> = shard.collision.iter().map(|v| shard.origin + *v).collect();
        svg.draw_polygon(&collision, "shard-collision");

        svg.draw_text(&shard.origin, &index.to_string(), "shard-index");
    }

    // Zeichne Bruchpunkte
    for p in break_points {
        svg.draw_circle(p, svg.point_radius, "break-point");
    }

    svg.save(filename)
}
