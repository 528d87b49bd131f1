// src/shatter/plugin.rs

use bevy::prelude::*;

use crate::shatter::events::SmashGlass;
use crate::shatter::physics::ShardSpace;
use crate::shatter::rng::ShatterRng;
use crate::shatter::systems::{
    expire_smashed_assemblies, fade_smashed_shards, setup_shatter_assemblies,
    smash_triggered_assemblies, step_shard_physics, sync_shard_poses,
};

/// Bevy-Plugin des Glasbruch-Effekts.
///
/// Registriert Zufallsquelle, Physikraum, das `SmashGlass`-Event und die
/// Systemkette des Effekts. Ein Sprite wird zerbrechlich, sobald es eine
/// [`ShatterGlass`](crate::shatter::components::ShatterGlass)-Komponente
/// trägt. Wer reproduzierbare Brüche braucht, fügt vor dem Plugin eine
/// geseedete [`ShatterRng`] als Ressource ein.
pub struct ShatterGlassPlugin;

impl Plugin for ShatterGlassPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<SmashGlass>()
            .init_resource::<ShatterRng>()
            .init_resource::<ShardSpace>()
            .add_systems(Startup, log_session_seed)
            .add_systems(
                Update,
                (
                    setup_shatter_assemblies,
                    smash_triggered_assemblies,
                    step_shard_physics,
                    sync_shard_poses,
                    fade_smashed_shards,
                    expire_smashed_assemblies,
                )
                    .chain(),
            );
    }
}

fn log_session_seed(rng: Res<ShatterRng>) {
    info!("Shatter RNG seeded with {}", rng.seed());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shatter::components::{ShatterAssembly, ShatterGlass};

    #[test]
    fn test_plugin_registers_effect_pipeline() {
        let mut app = App::new();
        app.init_resource::<Time>();
        app.init_resource::<Assets<Mesh>>();
        app.init_resource::<Assets<ColorMaterial>>();
        app.add_plugins(ShatterGlassPlugin);

        let pane = app
            .world
            .spawn((
                SpriteBundle::default(),
                ShatterGlass::new(Rect::new(0.0, 0.0, 64.0, 64.0)),
            ))
            .id();
        app.update();

        assert!(app.world.get::<ShatterAssembly>(pane).is_some());
        assert!(app.world.contains_resource::<ShatterRng>());
        assert!(app.world.contains_resource::<ShardSpace>());
    }

    #[test]
    fn test_plugin_keeps_preseeded_rng() {
        let mut app = App::new();
        app.insert_resource(ShatterRng::from_seed(7));
        app.init_resource::<Time>();
        app.init_resource::<Assets<Mesh>>();
        app.init_resource::<Assets<ColorMaterial>>();
        app.add_plugins(ShatterGlassPlugin);
        app.update();

        assert_eq!(app.world.resource::<ShatterRng>().seed(), 7);
    }
}
