// src/lib.rs

//! Prozeduraler Glasbruch-Effekt für 2D-Sprites.
//!
//! Das Rechteck eines Sprites wird über eine Delaunay-Triangulierung
//! zufälliger Bruchpunkte lückenlos in Scherben-Dreiecke zerlegt. Jede
//! Scherbe bekommt Mesh, Material und einen eigenen Physikkörper; ein
//! [`SmashGlass`](shatter::SmashGlass)-Event lässt die Scheibe zerspringen,
//! die Scherben fliegen auseinander, verblassen und werden nach Ablauf
//! ihrer Lebenszeit gemeinsam mit dem Sprite entfernt.
//!
//! Einstieg: [`ShatterGlassPlugin`](shatter::ShatterGlassPlugin) registrieren
//! und einem Sprite eine [`ShatterGlass`](shatter::ShatterGlass)-Komponente
//! geben.

pub mod config;
pub mod debug;
pub mod error;
pub mod geometry;
pub mod shatter;

// Re-exports für einfache Verwendung
pub use config::ShatterConfig;
pub use error::{ShatterError, ShatterResult};

// Öffentliche API
pub mod prelude {
    pub use super::{
        config::ShatterConfig,
        error::{ShatterError, ShatterResult},
        geometry::{ShardGeometryBuilder, Triangle},
        shatter::{
            GlassShard, ShardDescriptor, ShatterAssembly, ShatterGlass, ShatterGlassPlugin,
            ShatterRng, SmashGlass,
        },
    };
}
