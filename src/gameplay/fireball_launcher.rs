//! Fireball launcher trap: a block that fires a fireball every few seconds.

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::GameSet;
use crate::blocks::{Block, BlockItem, BlockItemPlaced, BlockToItem};
use crate::mechanics::IntervalTrigger;
use crate::prefab::{FIREBALL, Prefabs, ProjectilePrefab};
use crate::third_party::CollisionGroup;

// === Components ===

/// Launcher configuration and firing state. Carried by the block item and
/// handed over to the block when placed (and back when broken).
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct FireballLauncher {
    pub trigger: IntervalTrigger,
}

impl FireballLauncher {
    #[must_use]
    pub const fn every(seconds: f32) -> Self {
        Self {
            trigger: IntervalTrigger::new(seconds),
        }
    }
}

/// Radius of a fireball's hit volume before the prefab's scale is applied.
pub const FIREBALL_RADIUS: f32 = 0.5;

/// A fireball in flight. Moved by the physics solver via `LinearVelocity`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Fireball {
    /// Where the fireball was launched from.
    pub origin: Vec3,
    pub direction: Vec3,
    /// Removed once this far from `origin`.
    pub max_distance: f32,
}

/// Spawn a fireball one unit in front of `launcher_position` along `direction`.
pub fn spawn_fireball(
    commands: &mut Commands,
    launcher_position: Vec3,
    direction: Vec3,
    prefab: ProjectilePrefab,
) -> Entity {
    let origin = launcher_position + direction;
    commands
        .spawn((
            Name::new("Fireball"),
            Fireball {
                origin,
                direction,
                max_distance: prefab.max_distance,
            },
            RigidBody::Kinematic,
            LinearVelocity(direction * prefab.speed),
            // Sensor hit volume; scaled with the transform.
            Collider::sphere(FIREBALL_RADIUS),
            Sensor,
            CollisionEventsEnabled,
            CollisionLayers::new(
                CollisionGroup::Projectile,
                [
                    CollisionGroup::Default,
                    CollisionGroup::Character,
                    CollisionGroup::World,
                ],
            ),
            Transform::from_translation(origin).with_scale(Vec3::splat(prefab.scale)),
        ))
        .id()
}

// === Observers ===

/// Placing a launcher item hands its configuration to the new block.
fn hand_launcher_to_block(
    placed: On<BlockItemPlaced>,
    items: Query<&FireballLauncher, With<BlockItem>>,
    mut commands: Commands,
) {
    let Ok(launcher) = items.get(placed.entity) else {
        return;
    };
    commands.entity(placed.placed_block).try_insert(*launcher);
}

/// Breaking a launcher block hands its configuration back to the dropped item.
fn hand_launcher_to_item(
    broken: On<BlockToItem>,
    blocks: Query<&FireballLauncher>,
    mut commands: Commands,
) {
    let Ok(launcher) = blocks.get(broken.entity) else {
        return;
    };
    commands.entity(broken.item).try_insert(*launcher);
}

// === Systems ===

/// Fires every placed launcher whose interval has elapsed.
/// Runs in `GameSet::Traps`.
fn fire_launchers(
    time: Res<Time>,
    prefabs: Res<Prefabs>,
    mut launchers: Query<(Entity, &mut FireballLauncher, &GlobalTransform), With<Block>>,
    mut commands: Commands,
) {
    let Some(prefab) = prefabs.projectile(FIREBALL) else {
        warn_once!("prefab {FIREBALL} is missing; fireball launchers are idle");
        return;
    };
    let now = time.elapsed_secs();
    for (entity, mut launcher, transform) in &mut launchers {
        if !launcher.trigger.try_fire(now) {
            continue;
        }
        info!(launcher = %entity, interval = launcher.trigger.interval, "launch");
        let direction = transform.rotation() * Vec3::Z;
        spawn_fireball(&mut commands, transform.translation(), direction, prefab);
    }
}

/// Removes fireballs that have flown past their range.
/// Runs in `GameSet::Projectiles`.
fn expire_fireballs(mut commands: Commands, fireballs: Query<(Entity, &Fireball, &Transform)>) {
    for (entity, fireball, transform) in &fireballs {
        if transform.translation.distance(fireball.origin) > fireball.max_distance {
            commands.entity(entity).despawn();
        }
    }
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.register_type::<FireballLauncher>()
        .register_type::<Fireball>();

    app.add_observer(hand_launcher_to_block)
        .add_observer(hand_launcher_to_item);

    app.add_systems(Update, fire_launchers.in_set(GameSet::Traps))
        .add_systems(Update, expire_fireballs.in_set(GameSet::Projectiles));
}
