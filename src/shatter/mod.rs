// src/shatter/mod.rs

pub mod components;
pub mod descriptor;
pub mod events;
pub mod physics;
pub mod plugin;
pub mod rng;
pub mod systems;

pub use components::{
    AssemblyState, Easing, GlassShard, ShardFade, ShatterAssembly, ShatterGlass,
};
pub use descriptor::{synthesize_shards, ShardDescriptor};
pub use events::SmashGlass;
pub use physics::{ShardBody, ShardSpace};
pub use plugin::ShatterGlassPlugin;
pub use rng::ShatterRng;
