// src/shatter/systems.rs

use std::f32::consts::TAU;

use bevy::prelude::*;
use bevy::render::mesh::Indices;
use bevy::render::render_asset::RenderAssetUsages;
use bevy::render::render_resource::PrimitiveTopology;
use bevy::sprite::{MaterialMesh2dBundle, Mesh2dHandle};
use rand::Rng;

use crate::error::ShatterError;
use crate::geometry::ShardGeometryBuilder;
use crate::shatter::components::{
    AssemblyState, Easing, GlassShard, ShardFade, ShatterAssembly, ShatterGlass,
};
use crate::shatter::descriptor::{synthesize_shards, ShardDescriptor};
use crate::shatter::events::SmashGlass;
use crate::shatter::physics::{ShardBody, ShardSpace};
use crate::shatter::rng::ShatterRng;

/// Z-Versatz der Scherben gegenüber dem Sprite, damit sie darüber gezeichnet
/// werden.
const SHARD_Z: f32 = 0.1;

/// Baut das Render-Mesh einer Scherbe: Positionen relativ zum Schwerpunkt,
/// UV-Koordinaten aus der Lage des Dreiecks im Sprite-Rechteck.
fn shard_mesh(descriptor: &ShardDescriptor, rect: Rect) -> Mesh {
    let width = rect.width().max(f32::EPSILON);
    let height = rect.height().max(f32::EPSILON);

    let mut positions = Vec::with_capacity(3);
    let mut uvs = Vec::with_capacity(3);
    for vertex in descriptor.visual {
        let world = descriptor.origin + vertex;
        positions.push([vertex.x, vertex.y, 0.0]);
        // Bildkoordinaten laufen von oben nach unten.
        uvs.push([
            (world.x - rect.min.x) / width,
            (rect.max.y - world.y) / height,
        ]);
    }
    let normals = vec![[0.0, 0.0, 1.0]; 3];

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::default(),
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
    mesh.insert_indices(Indices::U32(vec![0, 1, 2]));
    mesh
}

/// Baut für jedes frisch markierte Sprite die Scherben-Baugruppe auf.
///
/// Die Scherben entstehen als versteckte Kinder des Sprites, jede mit eigenem
/// Mesh, Material und deaktiviertem Physikkörper. Schlägt die Validierung
/// fehl oder fehlt dem Sprite die Textur, wird der Effekt abgebrochen und die
/// Markierung wieder entfernt; das Sprite selbst bleibt unverändert.
pub fn setup_shatter_assemblies(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut rng: ResMut<ShatterRng>,
    mut space: ResMut<ShardSpace>,
    panes: Query<
        (Entity, &ShatterGlass, Option<&Handle<Image>>),
        (With<Sprite>, Without<ShatterAssembly>),
    >,
) {
    for (pane, glass, texture) in &panes {
        if let Err(error) = glass.config.validate() {
            error!("Shatter setup for {pane:?} aborted: {error}");
            commands.entity(pane).remove::<ShatterGlass>();
            continue;
        }
        let Some(texture) = texture else {
            let error = ShatterError::MissingResource {
                resource: "sprite texture".to_string(),
            };
            error!("Shatter setup for {pane:?} aborted: {error}");
            commands.entity(pane).remove::<ShatterGlass>();
            continue;
        };

        let builder = ShardGeometryBuilder::from_config(&glass.config);
        let triangles = match builder.build(glass.rect, &mut *rng) {
            Ok(triangles) => triangles,
            Err(error) => {
                error!("Shatter setup for {pane:?} aborted: {error}");
                commands.entity(pane).remove::<ShatterGlass>();
                continue;
            }
        };

        let descriptors = synthesize_shards(&triangles, glass.config.shard_overlap);
        let mut shards = Vec::with_capacity(descriptors.len());
        for descriptor in descriptors {
            let body = space.spawn_shard(descriptor.origin, &descriptor.collision);
            let mesh = Mesh2dHandle(meshes.add(shard_mesh(&descriptor, glass.rect)));
            let material = materials.add(ColorMaterial {
                color: Color::WHITE,
                texture: Some(texture.clone()),
            });
            let shard = commands
                .spawn((
                    GlassShard { descriptor },
                    body,
                    MaterialMesh2dBundle {
                        mesh,
                        material,
                        transform: Transform::from_translation(descriptor.origin.extend(SHARD_Z)),
                        visibility: Visibility::Hidden,
                        ..default()
                    },
                ))
                .id();
            shards.push(shard);
        }

        debug!("Built {} glass shards for {pane:?}", shards.len());
        commands
            .entity(pane)
            .push_children(&shards)
            .insert(ShatterAssembly::new(shards));
    }
}

/// Verarbeitet `SmashGlass`-Events.
///
/// Beim ersten Event für eine wartende Scheibe wird das Sprite unsichtbar
/// geschaltet, jede Scherbe erhält einen zufälligen Impuls, Kollision und
/// Sichtbarkeit, und der gemeinsame Countdown startet. Weitere Events für
/// dieselbe Scheibe sind wirkungslos, Events für unbekannte Ziele werden
/// verworfen.
pub fn smash_triggered_assemblies(
    mut commands: Commands,
    mut events: EventReader<SmashGlass>,
    mut rng: ResMut<ShatterRng>,
    mut space: ResMut<ShardSpace>,
    mut panes: Query<(&ShatterGlass, &mut ShatterAssembly, &mut Sprite)>,
    mut shard_views: Query<(&ShardBody, &mut Visibility), With<GlassShard>>,
) {
    for event in events.read() {
        let Ok((glass, mut assembly, mut sprite)) = panes.get_mut(event.target) else {
            debug!("Dropping smash event for unknown target {:?}", event.target);
            continue;
        };
        if !assembly.is_armed() {
            debug!("Glass {:?} is already smashed", event.target);
            continue;
        }

        let config = &glass.config;
        sprite.color.set_a(0.0);

        for &shard in &assembly.shards {
            let Ok((body, mut visibility)) = shard_views.get_mut(shard) else {
                continue;
            };
            let angle = rng.random_range(0.0..TAU);
            let magnitude =
                rng.random_range(config.min_shatter_force..=config.max_shatter_force);
            let impulse = Vec2::from_angle(angle) * magnitude * config.force_multiplier;

            space.set_simulated(*body, true);
            space.apply_impulse(*body, impulse);
            *visibility = Visibility::Visible;
            commands.entity(shard).insert(ShardFade::new(
                1.0,
                0.0,
                config.shard_lifetime,
                Easing::Linear,
            ));
        }

        assembly.state = AssemblyState::Smashed {
            lifetime: Timer::from_seconds(config.shard_lifetime, TimerMode::Once),
        };
        info!(
            "Smashed glass {:?} into {} shards",
            event.target,
            assembly.shards.len()
        );
    }
}

/// Treibt den Physikraum der Scherben mit der Frame-Zeit voran.
pub fn step_shard_physics(time: Res<Time>, mut space: ResMut<ShardSpace>) {
    space.step(time.delta_seconds());
}

/// Überträgt die Posen der Physikkörper auf die Scherben-Transforms.
pub fn sync_shard_poses(
    space: Res<ShardSpace>,
    mut shards: Query<(&ShardBody, &mut Transform), With<GlassShard>>,
) {
    for (body, mut transform) in &mut shards {
        let Some((translation, angle)) = space.body_pose(*body) else {
            continue;
        };
        transform.translation.x = translation.x;
        transform.translation.y = translation.y;
        transform.rotation = Quat::from_rotation_z(angle);
    }
}

/// Blendet ausgelöste Scherben über ihre Materialfarbe aus und entfernt die
/// Fade-Komponente, sobald das Ziel erreicht ist.
pub fn fade_smashed_shards(
    mut commands: Commands,
    time: Res<Time>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut shards: Query<(Entity, &mut ShardFade, &Handle<ColorMaterial>)>,
) {
    for (shard, mut fade, material) in &mut shards {
        let alpha = fade.advance(time.delta_seconds());
        if let Some(material) = materials.get_mut(material) {
            material.color.set_a(alpha);
        }
        if fade.finished() {
            commands.entity(shard).remove::<ShardFade>();
        }
    }
}

/// Tickt die Countdown-Timer ausgelöster Baugruppen und entfernt nach Ablauf
/// Sprite, Scherben und deren Physikkörper in einem Zug.
pub fn expire_smashed_assemblies(
    mut commands: Commands,
    time: Res<Time>,
    mut space: ResMut<ShardSpace>,
    mut panes: Query<(Entity, &mut ShatterAssembly)>,
    bodies: Query<&ShardBody>,
) {
    for (pane, mut assembly) in &mut panes {
        let finished = match &mut assembly.state {
            AssemblyState::Smashed { lifetime } => lifetime.tick(time.delta()).finished(),
            AssemblyState::Armed => false,
        };
        if !finished {
            continue;
        }

        for &shard in &assembly.shards {
            if let Ok(body) = bodies.get(shard) {
                space.remove_shard(*body);
            }
        }
        info!("Shatter assembly {pane:?} expired, removing sprite and shards");
        commands.entity(pane).despawn_recursive();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ShatterConfig;
    use crate::geometry::Triangle;
    use approx::assert_relative_eq;
    use bevy::render::mesh::VertexAttributeValues;
    use std::time::Duration;

    fn test_app() -> App {
        let mut app = App::new();
        app.add_event::<SmashGlass>();
        app.insert_resource(ShatterRng::from_seed(42));
        app.insert_resource(ShardSpace::default());
        app.init_resource::<Time>();
        app.init_resource::<Assets<Mesh>>();
        app.init_resource::<Assets<ColorMaterial>>();
        app.add_systems(
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
        app
    }

    fn spawn_pane(app: &mut App, rect: Rect) -> Entity {
        app.world
            .spawn((SpriteBundle::default(), ShatterGlass::new(rect)))
            .id()
    }

    fn advance(app: &mut App, seconds: f32) {
        app.world
            .resource_mut::<Time>()
            .advance_by(Duration::from_secs_f32(seconds));
        app.update();
    }

    fn assembly_shards(app: &App, pane: Entity) -> Vec<Entity> {
        app.world
            .get::<ShatterAssembly>(pane)
            .expect("pane should carry an assembly")
            .shards
            .clone()
    }

    fn shard_velocities(app: &App, shards: &[Entity]) -> Vec<Vec2> {
        let space = app.world.resource::<ShardSpace>();
        shards
            .iter()
            .map(|shard| {
                let body = app.world.get::<ShardBody>(*shard).unwrap();
                space.linear_velocity(*body).unwrap()
            })
            .collect()
    }

    fn pane_rect() -> Rect {
        Rect::new(0.0, 0.0, 100.0, 100.0)
    }

    #[test]
    fn test_shard_mesh_maps_uvs_into_rect() {
        let rect = Rect::new(0.0, 0.0, 100.0, 50.0);
        let triangle = Triangle::new(
            Vec2::new(0.0, 0.0),
            Vec2::new(100.0, 0.0),
            Vec2::new(0.0, 50.0),
        );
        let descriptor = ShardDescriptor::from_triangle(&triangle, 0.0);

        let mesh = shard_mesh(&descriptor, rect);
        let Some(VertexAttributeValues::Float32x2(uvs)) = mesh.attribute(Mesh::ATTRIBUTE_UV_0)
        else {
            panic!("expected float UV coordinates");
        };

        // Die linke untere Sprite-Ecke liegt im Bild links unten: u=0, v=1.
        assert_relative_eq!(uvs[0][0], 0.0, epsilon = 1e-6);
        assert_relative_eq!(uvs[0][1], 1.0, epsilon = 1e-6);
        assert_relative_eq!(uvs[1][0], 1.0, epsilon = 1e-6);
        assert_relative_eq!(uvs[1][1], 1.0, epsilon = 1e-6);
        assert_relative_eq!(uvs[2][0], 0.0, epsilon = 1e-6);
        assert_relative_eq!(uvs[2][1], 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_setup_builds_hidden_disabled_assembly() {
        let mut app = test_app();
        let pane = spawn_pane(&mut app, pane_rect());
        app.update();

        let shards = assembly_shards(&app, pane);
        assert!(!shards.is_empty());
        assert!(app.world.get::<ShatterAssembly>(pane).unwrap().is_armed());

        let children: Vec<Entity> = app
            .world
            .get::<Children>(pane)
            .unwrap()
            .iter()
            .copied()
            .collect();
        assert_eq!(children, shards);

        let space = app.world.resource::<ShardSpace>();
        assert_eq!(space.body_count(), shards.len());
        for shard in &shards {
            assert_eq!(
                *app.world.get::<Visibility>(*shard).unwrap(),
                Visibility::Hidden
            );
            let body = app.world.get::<ShardBody>(*shard).unwrap();
            assert!(!space.simulated(*body));
            assert!(!space.collision_enabled(*body));

            let descriptor = app.world.get::<GlassShard>(*shard).unwrap().descriptor;
            let transform = app.world.get::<Transform>(*shard).unwrap();
            assert_eq!(transform.translation.truncate(), descriptor.origin);
            assert_eq!(transform.translation.z, SHARD_Z);
        }
    }

    #[test]
    fn test_setup_without_texture_aborts() {
        let mut app = test_app();
        let pane = app
            .world
            .spawn((Sprite::default(), ShatterGlass::new(pane_rect())))
            .id();
        app.update();

        assert!(app.world.get::<ShatterGlass>(pane).is_none());
        assert!(app.world.get::<ShatterAssembly>(pane).is_none());
        assert!(app.world.get::<Sprite>(pane).is_some());
        assert_eq!(app.world.resource::<ShardSpace>().body_count(), 0);
    }

    #[test]
    fn test_setup_with_invalid_config_aborts() {
        let mut app = test_app();
        let config = ShatterConfig::new().with_force_range(500.0, 100.0);
        let pane = app
            .world
            .spawn((
                SpriteBundle::default(),
                ShatterGlass::new(pane_rect()).with_config(config),
            ))
            .id();
        app.update();

        assert!(app.world.get::<ShatterGlass>(pane).is_none());
        assert!(app.world.get::<ShatterAssembly>(pane).is_none());
    }

    #[test]
    fn test_armed_assembly_holds_position() {
        let mut app = test_app();
        let pane = spawn_pane(&mut app, pane_rect());
        app.update();

        advance(&mut app, 1.0);
        advance(&mut app, 1.0);

        assert!(app.world.get::<ShatterAssembly>(pane).unwrap().is_armed());
        for shard in assembly_shards(&app, pane) {
            let descriptor = app.world.get::<GlassShard>(shard).unwrap().descriptor;
            let transform = app.world.get::<Transform>(shard).unwrap();
            assert_eq!(transform.translation.truncate(), descriptor.origin);
        }
    }

    #[test]
    fn test_smash_reveals_and_launches_shards() {
        let mut app = test_app();
        let pane = spawn_pane(&mut app, pane_rect());
        app.update();

        app.world.send_event(SmashGlass { target: pane });
        app.update();

        assert_eq!(app.world.get::<Sprite>(pane).unwrap().color.a(), 0.0);
        assert!(!app.world.get::<ShatterAssembly>(pane).unwrap().is_armed());

        let shards = assembly_shards(&app, pane);
        let space = app.world.resource::<ShardSpace>();
        for shard in &shards {
            assert_eq!(
                *app.world.get::<Visibility>(*shard).unwrap(),
                Visibility::Visible
            );
            assert!(app.world.get::<ShardFade>(*shard).is_some());
            let body = app.world.get::<ShardBody>(*shard).unwrap();
            assert!(space.simulated(*body));
            assert!(space.collision_enabled(*body));
            let velocity = space.linear_velocity(*body).unwrap();
            assert!(velocity.length() > 0.0, "shard was not launched");
        }
    }

    #[test]
    fn test_second_smash_is_a_no_op() {
        let mut app = test_app();
        let pane = spawn_pane(&mut app, pane_rect());
        app.update();

        app.world.send_event(SmashGlass { target: pane });
        app.update();

        let shards = assembly_shards(&app, pane);
        let before = shard_velocities(&app, &shards);

        app.world.send_event(SmashGlass { target: pane });
        app.update();

        let after = shard_velocities(&app, &shards);
        assert_eq!(before, after);
        assert_eq!(app.world.get::<Sprite>(pane).unwrap().color.a(), 0.0);
        assert!(!app.world.get::<ShatterAssembly>(pane).unwrap().is_armed());
    }

    #[test]
    fn test_smash_event_for_unknown_target_is_dropped() {
        let mut app = test_app();
        let pane = spawn_pane(&mut app, pane_rect());
        app.update();

        app.world.send_event(SmashGlass {
            target: Entity::from_raw(9999),
        });
        app.update();

        assert!(app.world.get::<ShatterAssembly>(pane).unwrap().is_armed());
        assert_eq!(app.world.get::<Sprite>(pane).unwrap().color.a(), 1.0);
    }

    #[test]
    fn test_lifetime_expiry_tears_everything_down() {
        let mut app = test_app();
        let pane = spawn_pane(&mut app, pane_rect());
        app.update();

        app.world.send_event(SmashGlass { target: pane });
        app.update();
        let shards = assembly_shards(&app, pane);

        advance(&mut app, 3.1);

        assert!(app.world.get_entity(pane).is_none());
        for shard in shards {
            assert!(app.world.get_entity(shard).is_none());
        }
        assert_eq!(app.world.resource::<ShardSpace>().body_count(), 0);

        // Ein Event auf die bereits entfernte Scheibe bleibt folgenlos.
        app.world.send_event(SmashGlass { target: pane });
        app.update();
    }

    #[test]
    fn test_lifetime_survives_partial_ticks() {
        let mut app = test_app();
        let pane = spawn_pane(&mut app, pane_rect());
        app.update();

        app.world.send_event(SmashGlass { target: pane });
        app.update();

        advance(&mut app, 1.0);
        assert!(app.world.get_entity(pane).is_some());
        advance(&mut app, 1.0);
        assert!(app.world.get_entity(pane).is_some());
        advance(&mut app, 1.1);
        assert!(app.world.get_entity(pane).is_none());
    }

    #[test]
    fn test_degenerate_rect_yields_empty_assembly_that_still_expires() {
        let mut app = test_app();
        let pane = spawn_pane(&mut app, Rect::new(5.0, 5.0, 5.0, 5.0));
        app.update();

        let shards = assembly_shards(&app, pane);
        assert!(shards.is_empty());

        app.world.send_event(SmashGlass { target: pane });
        app.update();
        assert_eq!(app.world.get::<Sprite>(pane).unwrap().color.a(), 0.0);
        assert!(!app.world.get::<ShatterAssembly>(pane).unwrap().is_armed());

        advance(&mut app, 3.1);
        assert!(app.world.get_entity(pane).is_none());
    }

    #[test]
    fn test_fade_reaches_zero_alpha_before_expiry() {
        let mut app = test_app();
        let pane = spawn_pane(&mut app, pane_rect());
        app.update();

        app.world.send_event(SmashGlass { target: pane });
        app.update();
        let shards = assembly_shards(&app, pane);

        advance(&mut app, 1.5);
        {
            let materials = app.world.resource::<Assets<ColorMaterial>>();
            let handle = app.world.get::<Handle<ColorMaterial>>(shards[0]).unwrap();
            let alpha = materials.get(handle).unwrap().color.a();
            assert_relative_eq!(alpha, 0.5, epsilon = 1e-4);
        }

        advance(&mut app, 1.4);
        {
            let materials = app.world.resource::<Assets<ColorMaterial>>();
            let handle = app.world.get::<Handle<ColorMaterial>>(shards[0]).unwrap();
            let alpha = materials.get(handle).unwrap().color.a();
            assert!(alpha < 0.05, "alpha should be nearly faded out, got {alpha}");
        }
    }
}
