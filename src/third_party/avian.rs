//! Avian3d physics configuration: collision groups and impulses.

use avian3d::prelude::*;
use bevy::prelude::*;

// === Collision Groups ===

/// Physics collision groups.
///
/// - **Default**: Anything not in a more specific group.
/// - **Character**: Player-controlled bodies.
/// - **World**: Placed blocks and movable structures.
/// - **Projectile**: Launched projectiles.
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum CollisionGroup {
    #[default]
    Default,
    Character,
    World,
    Projectile,
}

// === Impulse ===

/// Apply an instantaneous `impulse` to the rigid body `entity`.
#[derive(EntityEvent, Debug, Clone, Copy)]
pub struct Impulse {
    pub entity: Entity,
    pub impulse: Vec3,
}

/// Hands the impulse to the body's solver-facing forces, so mass, locked
/// axes and sleeping are handled the same way as any other physics impulse.
fn apply_impulse(impulse: On<Impulse>, mut bodies: Query<Forces>) {
    let Ok(mut forces) = bodies.get_mut(impulse.entity) else {
        return;
    };
    forces.apply_linear_impulse(impulse.impulse);
}

// === Plugin ===

/// Registers the physics simulation itself. Kept separate from [`plugin`] so
/// headless tests can exercise gameplay without stepping the solver.
pub fn simulation_plugin(app: &mut App) {
    app.add_plugins(PhysicsPlugins::default());
}

pub(super) fn plugin(app: &mut App) {
    app.add_observer(apply_impulse);
}
