// src/shatter/components.rs

use bevy::prelude::*;

use crate::config::ShatterConfig;
use crate::shatter::descriptor::ShardDescriptor;

/// Markiert ein Sprite als zerbrechlich und trägt die Effekt-Parameter.
///
/// Das Setup-System des Plugins baut daraus die Scherben-Baugruppe; fehlt
/// dem Sprite die Textur, wird die Komponente wieder entfernt und das
/// Sprite bleibt unangetastet.
#[derive(Component, Debug, Clone)]
pub struct ShatterGlass {
    /// Rechteck des Sprites in dessen lokalem Raum.
    pub rect: Rect,
    pub config: ShatterConfig,
}

impl ShatterGlass {
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            config: ShatterConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ShatterConfig) -> Self {
        self.config = config;
        self
    }
}

/// Lebenszyklus einer aufgebauten Baugruppe.
///
/// Der Countdown existiert erst ab dem Auslösen; ein zweites Scharfschalten
/// des Timers ist damit nicht darstellbar.
#[derive(Debug)]
pub enum AssemblyState {
    /// Aufgebaut und wartend; Scherben sind unsichtbar und ohne Kollision.
    Armed,
    /// Ausgelöst; nach Ablauf des Countdowns wird alles entfernt.
    Smashed { lifetime: Timer },
}

/// Die aufgebaute Scherben-Baugruppe am Sprite: geordnete Scherben-Entities
/// plus Zustand. Die Scherben sind Kinder des Sprites, der Abbau ist damit
/// ein einziges rekursives Despawn.
#[derive(Component, Debug)]
pub struct ShatterAssembly {
    pub shards: Vec<Entity>,
    pub state: AssemblyState,
}

impl ShatterAssembly {
    pub fn new(shards: Vec<Entity>) -> Self {
        Self {
            shards,
            state: AssemblyState::Armed,
        }
    }

    pub fn is_armed(&self) -> bool {
        matches!(self.state, AssemblyState::Armed)
    }
}

/// Eine einzelne Scherbe samt ihrer lokalen Geometrie.
#[derive(Component, Debug, Clone)]
pub struct GlassShard {
    pub descriptor: ShardDescriptor,
}

/// Verlaufskurven für zeitgesteuerte Interpolationen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    #[default]
    Linear,
    QuadIn,
    QuadOut,
}

impl Easing {
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::QuadIn => t * t,
            Easing::QuadOut => t * (2.0 - t),
        }
    }
}

/// Zeitgesteuerte Alpha-Interpolation einer Scherbe: Startwert, Zielwert,
/// Dauer und Kurve. Wird beim Auslösen eingefügt und nach Abschluss wieder
/// entfernt.
#[derive(Component, Debug, Clone)]
pub struct ShardFade {
    start: f32,
    end: f32,
    elapsed: f32,
    duration: f32,
    easing: Easing,
}

impl ShardFade {
    pub fn new(start: f32, end: f32, duration: f32, easing: Easing) -> Self {
        Self {
            start,
            end,
            elapsed: 0.0,
            duration: duration.max(f32::EPSILON),
            easing,
        }
    }

    /// Rückt die Zeit vor und liefert den aktuellen Wert.
    pub fn advance(&mut self, delta_seconds: f32) -> f32 {
        self.elapsed = (self.elapsed + delta_seconds.max(0.0)).min(self.duration);
        self.value()
    }

    pub fn value(&self) -> f32 {
        let t = (self.elapsed / self.duration).clamp(0.0, 1.0);
        self.start + (self.end - self.start) * self.easing.apply(t)
    }

    pub fn finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}
