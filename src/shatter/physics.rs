// src/shatter/physics.rs

use bevy::math::Vec2;
use bevy::prelude::{Component, Resource};
use nalgebra::{point, vector};
use rapier2d::prelude::*;

use crate::geometry::offset::polygon_signed_area_doubled;

/// Mindestmasse eines Scherbenkörpers, falls das Kollisionsdreieck
/// (nahezu) keine Fläche hat.
const MIN_SHARD_MASS: f32 = 1.0e-3;

/// Physikraum der Scherben: eine eigene rapier-Welt.
///
/// Die Koordinaten entsprechen dem lokalen Raum des zersplitterten Sprites;
/// die Schwerkraft zieht in negativer y-Richtung. Körper werden beim Aufbau
/// einer Baugruppe angelegt und beim Ablauf ihres Countdowns wieder
/// entfernt.
#[derive(Resource)]
pub struct ShardSpace {
    pub gravity: Vector<Real>,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
}

impl Default for ShardSpace {
    fn default() -> Self {
        Self {
            gravity: vector![0.0, -980.0],
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
        }
    }
}

/// Körper- und Collider-Handle einer einzelnen Scherbe.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShardBody {
    pub body: RigidBodyHandle,
    pub collider: ColliderHandle,
}

impl ShardSpace {
    /// Legt den dynamischen Körper einer Scherbe am Schwerpunkt `origin` an,
    /// mit dem lokalen Kollisionsdreieck als Form. Körper und Collider
    /// starten deaktiviert; bis zum Auslösen nimmt die Scherbe nicht an der
    /// Simulation teil und bleibt an Ort und Stelle. Die Masse hängt am
    /// Körper selbst, damit Impulse auch bei deaktiviertem Collider wirken.
    pub fn spawn_shard(&mut self, origin: Vec2, collision: &[Vec2; 3]) -> ShardBody {
        let mass = (polygon_signed_area_doubled(collision).abs() * 0.5).max(MIN_SHARD_MASS);
        let body = RigidBodyBuilder::dynamic()
            .translation(vector![origin.x, origin.y])
            .additional_mass(mass)
            .enabled(false)
            .build();
        let body_handle = self.bodies.insert(body);

        let collider = ColliderBuilder::triangle(
            point![collision[0].x, collision[0].y],
            point![collision[1].x, collision[1].y],
            point![collision[2].x, collision[2].y],
        )
        .enabled(false)
        .build();
        let collider_handle =
            self.colliders
                .insert_with_parent(collider, body_handle, &mut self.bodies);

        ShardBody {
            body: body_handle,
            collider: collider_handle,
        }
    }

    /// Wendet einen zentralen Impuls auf den Scherbenkörper an.
    pub fn apply_impulse(&mut self, shard: ShardBody, impulse: Vec2) {
        if let Some(body) = self.bodies.get_mut(shard.body) {
            body.apply_impulse(vector![impulse.x, impulse.y], true);
        }
    }

    /// Schaltet Körper und Collider einer Scherbe gemeinsam aktiv oder
    /// inaktiv.
    pub fn set_simulated(&mut self, shard: ShardBody, enabled: bool) {
        if let Some(body) = self.bodies.get_mut(shard.body) {
            body.set_enabled(enabled);
        }
        if let Some(collider) = self.colliders.get_mut(shard.collider) {
            collider.set_enabled(enabled);
        }
    }

    pub fn simulated(&self, shard: ShardBody) -> bool {
        self.bodies
            .get(shard.body)
            .is_some_and(|body| body.is_enabled())
    }

    pub fn collision_enabled(&self, shard: ShardBody) -> bool {
        self.colliders
            .get(shard.collider)
            .is_some_and(|collider| collider.is_enabled())
    }

    /// Position und Drehwinkel des Scherbenkörpers.
    pub fn body_pose(&self, shard: ShardBody) -> Option<(Vec2, f32)> {
        self.bodies.get(shard.body).map(|body| {
            let translation = body.translation();
            (
                Vec2::new(translation.x, translation.y),
                body.rotation().angle(),
            )
        })
    }

    pub fn linear_velocity(&self, shard: ShardBody) -> Option<Vec2> {
        self.bodies.get(shard.body).map(|body| {
            let velocity = body.linvel();
            Vec2::new(velocity.x, velocity.y)
        })
    }

    /// Entfernt Körper samt Collider aus der Welt.
    pub fn remove_shard(&mut self, shard: ShardBody) {
        self.bodies.remove(
            shard.body,
            &mut self.island_manager,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Treibt die Simulation um `dt` Sekunden voran.
    pub fn step(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }
        self.integration_parameters.dt = dt;

        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );
    }
}
