// ./src/main.rs
use std::f32::consts::TAU;

use bevy::prelude::*;
use bevy::render::render_asset::RenderAssetUsages;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};

use shatter_glass::prelude::*;

#[cfg(debug_assertions)]
use shatter_glass::debug::svg::create_fracture_debug_svg;

/// Größe der Demo-Scheibe in Weltkoordinaten (und Pixeln der Textur).
const PANE_SIZE: Vec2 = Vec2::new(240.0, 320.0);

fn main() {
    let mut app = App::new();
    app.add_plugins(DefaultPlugins)
        .add_plugins(ShatterGlassPlugin)
        .insert_resource(ClearColor(Color::rgb(0.05, 0.07, 0.09)))
        .add_systems(Startup, setup_scene)
        .add_systems(Update, smash_on_space);

    #[cfg(debug_assertions)]
    app.add_systems(Update, dump_fracture_on_f12);

    // Fester Seed über die Umgebung, z.B. SHATTER_SEED=42
    if let Ok(seed) = std::env::var("SHATTER_SEED") {
        let rng = match seed.parse::<u64>() {
            Ok(numeric) => ShatterRng::from_seed(numeric),
            Err(_) => ShatterRng::from_text(&seed),
        };
        app.insert_resource(rng);
    }

    app.run();
}

fn setup_scene(mut commands: Commands, mut images: ResMut<Assets<Image>>) {
    commands.spawn(Camera2dBundle::default());

    let texture = images.add(glass_pane_image());
    let rect = Rect::from_center_size(Vec2::ZERO, PANE_SIZE);
    commands.spawn((
        SpriteBundle {
            texture,
            transform: Transform::from_xyz(0.0, 60.0, 0.0),
            ..default()
        },
        ShatterGlass::new(rect),
    ));

    info!("Press SPACE to smash the glass");
}

/// Löst den Bruch aller Scheiben aus, einmalig pro Programmlauf.
fn smash_on_space(
    mut commands: Commands,
    keys: Res<ButtonInput<KeyCode>>,
    mut smashed: Local<bool>,
    mut events: EventWriter<SmashGlass>,
    mut audio_sources: ResMut<Assets<AudioSource>>,
    panes: Query<Entity, With<ShatterGlass>>,
) {
    if *smashed || !keys.just_pressed(KeyCode::Space) {
        return;
    }
    *smashed = true;

    for pane in &panes {
        events.send(SmashGlass { target: pane });
    }
    commands.spawn(AudioBundle {
        source: audio_sources.add(glass_break_chime()),
        settings: PlaybackSettings::DESPAWN,
    });
}

/// Schreibt das Bruchmuster jeder aufgebauten Scheibe als SVG ins
/// Arbeitsverzeichnis.
#[cfg(debug_assertions)]
fn dump_fracture_on_f12(
    keys: Res<ButtonInput<KeyCode>>,
    panes: Query<(&ShatterGlass, &ShatterAssembly)>,
    shards: Query<&GlassShard>,
) {
    if !keys.just_pressed(KeyCode::F12) {
        return;
    }
    for (index, (glass, assembly)) in panes.iter().enumerate() {
        let descriptors: Vec<ShardDescriptor> = assembly
            .shards
            .iter()
            .filter_map(|shard| shards.get(*shard).ok())
            .map(|shard| shard.descriptor)
            .collect();

        // Die Bruchpunkte sind die gemeinsamen Ecken der Scherben-Dreiecke.
        let mut break_points: Vec<Vec2> = Vec::new();
        for descriptor in &descriptors {
            for vertex in descriptor.visual {
                let world = descriptor.origin + vertex;
                if !break_points.iter().any(|p| p.distance_squared(world) < 1e-4) {
                    break_points.push(world);
                }
            }
        }

        let filename = format!("fracture_{index}.svg");
        if let Err(error) =
            create_fracture_debug_svg(&filename, glass.rect, &break_points, &descriptors, 1024.0)
        {
            warn!("Could not write '{filename}': {error}");
        }
    }
}

/// Baut die Textur einer Glasscheibe: getöntes Glas mit hellem Rahmen und
/// zwei diagonalen Glanzstreifen.
fn glass_pane_image() -> Image {
    const WIDTH: u32 = 240;
    const HEIGHT: u32 = 320;
    const BORDER: u32 = 6;

    let mut data = Vec::with_capacity((WIDTH * HEIGHT * 4) as usize);
    for y in 0..HEIGHT {
        for x in 0..WIDTH {
            let border =
                x < BORDER || y < BORDER || x >= WIDTH - BORDER || y >= HEIGHT - BORDER;

            let diagonal = x as i32 + y as i32;
            let mut highlight: u16 = 0;
            for (center, half_width) in [(180_i32, 28_i32), (340, 16)] {
                let distance = (diagonal - center).abs();
                if distance < half_width {
                    highlight += (40 * (half_width - distance) / half_width) as u16;
                }
            }

            let (r, g, b, a): (u16, u16, u16, u16) = if border {
                (205, 225, 235, 255)
            } else {
                (
                    (140 + highlight).min(255),
                    (185 + highlight).min(255),
                    (205 + highlight).min(255),
                    225,
                )
            };
            data.extend_from_slice(&[r as u8, g as u8, b as u8, a as u8]);
        }
    }

    Image::new(
        Extent3d {
            width: WIDTH,
            height: HEIGHT,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        data,
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::default(),
    )
}

/// Baut ein kurzes Klirr-Geräusch als WAV im Speicher: drei hohe Teiltöne
/// plus Rauschen, exponentiell abklingend.
fn glass_break_chime() -> AudioSource {
    const SAMPLE_RATE: u32 = 44_100;
    const DURATION: f32 = 0.5;
    let sample_count = (SAMPLE_RATE as f32 * DURATION) as usize;

    let mut samples = Vec::with_capacity(sample_count);
    let mut noise_state = 0x2F6E_2B1E_u32;
    for i in 0..sample_count {
        let t = i as f32 / SAMPLE_RATE as f32;
        let tone = (t * 2093.0 * TAU).sin() * 0.4
            + (t * 2794.0 * TAU).sin() * 0.3
            + (t * 3520.0 * TAU).sin() * 0.2;
        noise_state = noise_state
            .wrapping_mul(1_664_525)
            .wrapping_add(1_013_904_223);
        let noise = (noise_state >> 16) as f32 / 32_768.0 - 1.0;
        let envelope = (-t * 9.0).exp();
        let value = (tone + noise * 0.25) * envelope;
        samples.push((value.clamp(-1.0, 1.0) * f32::from(i16::MAX)) as i16);
    }

    let data_len = (samples.len() * 2) as u32;
    let mut bytes = Vec::with_capacity(44 + samples.len() * 2);
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&(36 + data_len).to_le_bytes());
    bytes.extend_from_slice(b"WAVE");
    bytes.extend_from_slice(b"fmt ");
    bytes.extend_from_slice(&16_u32.to_le_bytes());
    bytes.extend_from_slice(&1_u16.to_le_bytes()); // PCM
    bytes.extend_from_slice(&1_u16.to_le_bytes()); // Mono
    bytes.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
    bytes.extend_from_slice(&(SAMPLE_RATE * 2).to_le_bytes()); // Byte-Rate
    bytes.extend_from_slice(&2_u16.to_le_bytes()); // Block-Align
    bytes.extend_from_slice(&16_u16.to_le_bytes()); // Bits pro Sample
    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&data_len.to_le_bytes());
    for sample in samples {
        bytes.extend_from_slice(&sample.to_le_bytes());
    }

    AudioSource {
        bytes: bytes.into(),
    }
}
