// src/shatter/rng.rs

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Zufallsquelle des Effekts. Eine Session, ein Seed: sowohl das Sampling
/// der Bruchpunkte als auch Richtung und Stärke der Impulse ziehen aus
/// dieser Quelle, damit ein fester Seed den kompletten Bruch reproduziert.
///
/// Vor dem Hinzufügen des Plugins eingefügt, gewinnt eine eigene Instanz
/// gegen den zufällig geseedeten Default.
#[derive(Resource, Debug, Clone)]
pub struct ShatterRng {
    seed: u64,
    rng: StdRng,
}

impl ShatterRng {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_text<S: AsRef<str>>(text: S) -> Self {
        let mut hasher = DefaultHasher::new();
        text.as_ref().hash(&mut hasher);
        Self::from_seed(hasher.finish())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Default for ShatterRng {
    fn default() -> Self {
        Self::from_seed(rand::random::<u64>())
    }
}

impl RngCore for ShatterRng {
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.rng.fill_bytes(dest)
    }
}
