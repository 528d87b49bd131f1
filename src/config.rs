// src/config.rs

use crate::error::{ShatterError, ShatterResult};
use serde::{Deserialize, Serialize};

/// Konfiguration für einen Glasbruch-Effekt.
///
/// Die Default-Werte entsprechen dem abgestimmten Verhalten des Effekts:
/// zehn zusätzliche Bruchpunkte, Kantenfang innerhalb von 10 Einheiten,
/// Impulsstärken zwischen 150 und 800 (mal Multiplikator 10) und drei
/// Sekunden Lebenszeit der Scherben.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShatterConfig {
    /// Anzahl der zufällig gesampelten Bruchpunkte (zusätzlich zu den vier Ecken).
    pub point_count: usize,
    /// Abstand, innerhalb dessen ein gesampelter Punkt achsenweise exakt auf die
    /// Rechteckkante gezogen wird. Verhindert Splitter-Dreiecke am Rand.
    pub edge_snap_threshold: f32,
    /// Untere Grenze der zufälligen Impulsstärke pro Scherbe.
    pub min_shatter_force: f32,
    /// Obere Grenze der zufälligen Impulsstärke pro Scherbe.
    pub max_shatter_force: f32,
    /// Skalierung, die auf jeden Scherben-Impuls multipliziert wird.
    pub force_multiplier: f32,
    /// Lebenszeit der Scherben in Sekunden. Nach Ablauf wird die gesamte
    /// Baugruppe (Sprite und Scherben) entfernt.
    pub shard_lifetime: f32,
    /// Offset-Distanz für das Kollisionspolygon. Negative Werte schrumpfen das
    /// Polygon nach innen und lassen sichtbare Fugen zwischen den Scherben.
    pub shard_overlap: f32,
}

impl Default for ShatterConfig {
    fn default() -> Self {
        Self {
            point_count: 10,
            edge_snap_threshold: 10.0,
            min_shatter_force: 150.0,
            max_shatter_force: 800.0,
            force_multiplier: 10.0,
            shard_lifetime: 3.0,
            shard_overlap: -5.0,
        }
    }
}

impl ShatterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_point_count(mut self, count: usize) -> Self {
        self.point_count = count;
        self
    }

    pub fn with_edge_snap_threshold(mut self, threshold: f32) -> Self {
        self.edge_snap_threshold = threshold.max(0.0);
        self
    }

    pub fn with_force_range(mut self, min: f32, max: f32) -> Self {
        self.min_shatter_force = min;
        self.max_shatter_force = max;
        self
    }

    pub fn with_force_multiplier(mut self, multiplier: f32) -> Self {
        self.force_multiplier = multiplier;
        self
    }

    pub fn with_shard_lifetime(mut self, seconds: f32) -> Self {
        self.shard_lifetime = seconds;
        self
    }

    pub fn with_shard_overlap(mut self, overlap: f32) -> Self {
        self.shard_overlap = overlap;
        self
    }

    pub fn validate(&self) -> ShatterResult<()> {
        if !self.edge_snap_threshold.is_finite() || self.edge_snap_threshold < 0.0 {
            return Err(ShatterError::InvalidConfiguration {
                message: "Edge snap threshold must be finite and non-negative.".to_string(),
            });
        }
        if !self.min_shatter_force.is_finite()
            || !self.max_shatter_force.is_finite()
            || self.min_shatter_force < 0.0
        {
            return Err(ShatterError::InvalidConfiguration {
                message: "Shatter forces must be finite and non-negative.".to_string(),
            });
        }
        if self.min_shatter_force > self.max_shatter_force {
            return Err(ShatterError::InvalidConfiguration {
                message: "Minimum shatter force exceeds the maximum.".to_string(),
            });
        }
        if !self.force_multiplier.is_finite() || self.force_multiplier < 0.0 {
            return Err(ShatterError::InvalidConfiguration {
                message: "Force multiplier must be finite and non-negative.".to_string(),
            });
        }
        if !self.shard_lifetime.is_finite() || self.shard_lifetime <= 0.0 {
            return Err(ShatterError::InvalidConfiguration {
                message: "Shard lifetime must be a positive number of seconds.".to_string(),
            });
        }
        if !self.shard_overlap.is_finite() {
            return Err(ShatterError::InvalidConfiguration {
                message: "Shard overlap must be finite.".to_string(),
            });
        }
        Ok(())
    }
}
