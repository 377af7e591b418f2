//! Movable platform: carries at most one rider and gets knocked upward when hit.
//!
//! While carrying a rider the platform stops colliding with characters and
//! default bodies, so the rider does not push against what it stands on.

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::character::{Character, MovementMode, SetMovementMode};
use crate::config::AdventureConfig;
use crate::interaction::{Activate, Damaged};
use crate::mechanics::{Attachments, Slot, Transition, occupants_of};
use crate::third_party::{CollisionGroup, Impulse};

/// Collision filters removed from a platform while it carries a rider.
const RIDER_FILTERS: [CollisionGroup; 2] = [CollisionGroup::Character, CollisionGroup::Default];

// === Components ===

#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Platform {
    pub rider: Slot<Entity>,
    /// Filters this platform had before the current rider mounted.
    pub stripped: LayerMask,
}

impl Default for Platform {
    fn default() -> Self {
        Self {
            rider: Slot::empty(),
            stripped: LayerMask::NONE,
        }
    }
}

impl Platform {
    fn strip_filters(&mut self, layers: &mut CollisionLayers) {
        self.stripped = layers.filters & LayerMask::from(RIDER_FILTERS);
        layers.filters.remove(self.stripped);
    }

    fn restore_filters(&mut self, layers: &mut CollisionLayers) {
        layers.filters.add(self.stripped);
        self.stripped = LayerMask::NONE;
    }
}

/// Spawn an empty platform body at `transform`.
pub fn spawn_platform(commands: &mut Commands, transform: Transform) -> Entity {
    commands
        .spawn((
            Name::new("Platform"),
            Platform::default(),
            RigidBody::Dynamic,
            Collider::cuboid(2.0, 0.25, 2.0),
            CollisionLayers::new(CollisionGroup::World, LayerMask::ALL),
            transform,
        ))
        .id()
}

// === Observers ===

/// Any hit knocks the platform up by the same amount.
fn knock_back_platform(
    damaged: On<Damaged>,
    platforms: Query<(), With<Platform>>,
    config: Res<AdventureConfig>,
    mut commands: Commands,
) {
    if !platforms.contains(damaged.entity) {
        return;
    }
    commands.trigger(Impulse {
        entity: damaged.entity,
        impulse: config.platform_knockback(),
    });
}

/// Mounts, dismounts or swaps the rider.
fn toggle_rider(
    activate: On<Activate>,
    mut platforms: Query<(&mut Platform, &mut CollisionLayers)>,
    characters: Query<(), With<Character>>,
    attachments: Attachments,
    config: Res<AdventureConfig>,
    mut commands: Commands,
) {
    let platform_entity = activate.entity;
    let Ok((mut platform, mut layers)) = platforms.get_mut(platform_entity) else {
        return;
    };
    let instigator = activate.instigator;
    if !characters.contains(instigator) {
        return;
    }

    let mut rider = platform.rider.clone();
    let transition = rider.activate(instigator);
    if let Some(&mounting) = transition.occupant() {
        if let Err(error) = attachments.attach(
            &mut commands,
            platform_entity,
            mounting,
            config.rider_offset(),
            Quat::IDENTITY,
        ) {
            warn!("cannot mount platform: {error}");
            return;
        }
    }
    if let Some(&leaving) = transition.released() {
        attachments.detach(&mut commands, platform_entity, leaving);
        commands.trigger(SetMovementMode {
            entity: leaving,
            mode: MovementMode::Walking,
        });
    }
    if let Some(&mounting) = transition.occupant() {
        commands.trigger(SetMovementMode {
            entity: mounting,
            mode: MovementMode::Disabled,
        });
    }

    match transition {
        Transition::Activated(_) => platform.strip_filters(&mut layers),
        Transition::Deactivated(_) => platform.restore_filters(&mut layers),
        Transition::Switched { .. } => {}
    }
    platform.rider = rider;
    debug!(platform = %platform_entity, ?transition, "platform activated");
}

/// A character that stops being a character mid-ride leaves its platform
/// empty and gets its own movement back. A despawning rider is simply dropped.
fn release_removed_rider(
    remove: On<Remove, Character>,
    mut platforms: Query<(Entity, &mut Platform, &mut CollisionLayers)>,
    attachments: Attachments,
    mut commands: Commands,
) {
    let rider = remove.entity;
    let ridden = occupants_of(
        platforms
            .iter()
            .map(|(entity, platform, _)| (entity, platform.rider.occupant())),
        &rider,
    );
    for entity in ridden {
        let Ok((_, mut platform, mut layers)) = platforms.get_mut(entity) else {
            continue;
        };
        platform.rider.clear();
        platform.restore_filters(&mut layers);
        attachments.detach(&mut commands, entity, rider);
        commands.trigger(SetMovementMode {
            entity: rider,
            mode: MovementMode::Walking,
        });
    }
}

/// A platform that goes away puts its rider back on its own feet where it stood.
fn release_rider_of_removed_platform(
    remove: On<Remove, Platform>,
    platforms: Query<&Platform>,
    attachments: Attachments,
    mut commands: Commands,
) {
    let Ok(platform) = platforms.get(remove.entity) else {
        return;
    };
    let Some(&rider) = platform.rider.occupant() else {
        return;
    };
    attachments.detach(&mut commands, remove.entity, rider);
    commands.trigger(SetMovementMode {
        entity: rider,
        mode: MovementMode::Walking,
    });
    debug!(platform = %remove.entity, %rider, "platform removed under its rider");
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.register_type::<Platform>();

    app.add_observer(knock_back_platform)
        .add_observer(toggle_rider)
        .add_observer(release_removed_rider)
        .add_observer(release_rider_of_removed_platform);
}
