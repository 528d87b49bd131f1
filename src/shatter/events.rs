// src/shatter/events.rs

use bevy::prelude::*;

/// Löst den Bruch einer Glasscheibe aus.
///
/// Zeigt auf das Sprite-Entity, das die Baugruppe trägt. Wiederholte Events
/// für dieselbe Scheibe sind erlaubt und wirkungslos, sobald sie zerbrochen
/// ist; Events für unbekannte Entities werden verworfen.
#[derive(Event, Debug, Clone, Copy)]
pub struct SmashGlass {
    pub target: Entity,
}
