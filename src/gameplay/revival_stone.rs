//! Revival stones: a player binds their respawn point to a placed stone.
//!
//! Each stone block gets an invisible collider on top of it that forwards
//! activations and attacks to the stone. Activating a stone toggles it as the
//! activating player's revival target; activating a different stone switches
//! the target over in a single step. Removing a stone releases every player
//! bound to it.

use avian3d::prelude::*;
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::blocks::Block;
use crate::character::Character;
use crate::config::AdventureConfig;
use crate::interaction::{Activate, ForwardToParent};
use crate::mechanics::{Attachments, Slot, Transition, occupants_of};
use crate::prefab::{Prefabs, REVIVAL_STONE_COLLIDER};
use crate::respawn::{RespawnRequest, RespawnStage};
use crate::ui::Notification;

// === Messages ===

pub const ACTIVATED: &str = "Activated Revival Stone";
pub const DEACTIVATED: &str = "Deactivated Revival Stone";
pub const SWITCHED: &str = "Activated this Revival Stone and deactivated the previous.";
pub const DESTROYED: &str = "Deactivated Revival Stone due to destruction";

// === Components ===

/// A placed revival stone.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct RevivalStone {
    /// Hit volume spawned for this stone; `None` until the stone is placed as a block.
    pub collider: Option<Entity>,
}

/// Marker for the hit volume sitting on a revival stone.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct RevivalStoneCollider;

/// Where a player comes back after dying. Lives on the player entity and only
/// while the player is bound to a stone.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct RevivalTarget {
    pub stone: Entity,
    pub location: Vec3,
}

// === Observers ===

/// Everything needed to give a stone its collider.
#[derive(SystemParam)]
struct ColliderSpawner<'w, 's> {
    stones: Query<'w, 's, &'static mut RevivalStone, With<Block>>,
    prefabs: Res<'w, Prefabs>,
    config: Res<'w, AdventureConfig>,
    attachments: Attachments<'w, 's>,
    commands: Commands<'w, 's>,
}

impl ColliderSpawner<'_, '_> {
    /// Spawns and attaches the collider once `stone` is both a revival stone
    /// and a block, whichever came first. Does nothing for a stone that
    /// already has one.
    fn ensure_collider(&mut self, stone: Entity) {
        let Ok(mut revival_stone) = self.stones.get_mut(stone) else {
            return;
        };
        if revival_stone.collider.is_some() {
            return;
        }
        let Some(prefab) = self.prefabs.collider(REVIVAL_STONE_COLLIDER) else {
            warn!("prefab {REVIVAL_STONE_COLLIDER} is missing; revival stone has no collider");
            return;
        };

        let [x, y, z] = prefab.size;
        let collider = self
            .commands
            .spawn((
                Name::new("Revival Stone Collider"),
                RevivalStoneCollider,
                ForwardToParent,
                Collider::cuboid(x, y, z),
            ))
            .id();
        if let Err(error) = self.attachments.attach(
            &mut self.commands,
            stone,
            collider,
            self.config.collider_offset(),
            Quat::IDENTITY,
        ) {
            warn!("could not attach revival stone collider: {error}");
            self.commands.entity(collider).despawn();
            return;
        }
        revival_stone.collider = Some(collider);
    }
}

fn collider_for_new_stone(add: On<Add, RevivalStone>, mut spawner: ColliderSpawner) {
    spawner.ensure_collider(add.entity);
}

fn collider_for_new_block(add: On<Add, Block>, mut spawner: ColliderSpawner) {
    spawner.ensure_collider(add.entity);
}

/// Toggles the stone as the activating player's revival target.
fn toggle_revival_target(
    activate: On<Activate>,
    stones: Query<&GlobalTransform, With<RevivalStone>>,
    characters: Query<&Character>,
    targets: Query<&RevivalTarget>,
    config: Res<AdventureConfig>,
    mut notifications: MessageWriter<Notification>,
    mut commands: Commands,
) {
    let stone = activate.entity;
    let Ok(stone_transform) = stones.get(stone) else {
        return;
    };
    let Ok(character) = characters.get(activate.instigator) else {
        return;
    };
    let player = character.player;

    let mut slot = Slot::from(targets.get(player).ok().map(|target| target.stone));
    let transition = slot.activate(stone);
    let text = match transition {
        Transition::Deactivated(_) => {
            commands.entity(player).remove::<RevivalTarget>();
            DEACTIVATED
        }
        // Inserting over an existing target replaces it in place, so a switch
        // surfaces to change listeners as one update.
        Transition::Activated(_) | Transition::Switched { .. } => {
            commands.entity(player).insert(RevivalTarget {
                stone,
                location: stone_transform.translation() + config.revival_offset(),
            });
            if matches!(transition, Transition::Activated(_)) {
                ACTIVATED
            } else {
                SWITCHED
            }
        }
    };
    debug!(%player, %stone, ?transition, "revival stone activated");
    notifications.write(Notification::new(player, text));
}

/// Removes the stone's collider and releases every player bound to it.
fn release_removed_stone(
    remove: On<Remove, RevivalStone>,
    stones: Query<&RevivalStone>,
    targets: Query<(Entity, &RevivalTarget)>,
    mut notifications: MessageWriter<Notification>,
    mut commands: Commands,
) {
    let stone = remove.entity;
    if let Some(collider) = stones.get(stone).ok().and_then(|stone| stone.collider) {
        // The collider may already be despawned.
        if let Ok(mut collider) = commands.get_entity(collider) {
            collider.try_despawn();
        }
    }

    let bound = occupants_of(
        targets
            .iter()
            .map(|(player, target)| (player, Some(&target.stone))),
        &stone,
    );
    for player in bound {
        commands.entity(player).try_remove::<RevivalTarget>();
        notifications.write(Notification::new(player, DESTROYED));
    }
}

// === Systems ===

/// Moves respawning characters to their player's revival target.
/// Runs in `RespawnStage::Override`, after the default placement.
fn respawn_at_revival_stone(
    mut requests: MessageReader<RespawnRequest>,
    characters: Query<&Character>,
    targets: Query<&RevivalTarget>,
    mut transforms: Query<&mut Transform>,
) {
    for request in requests.read() {
        let Ok(character) = characters.get(request.character) else {
            continue;
        };
        let Ok(target) = targets.get(character.player) else {
            continue;
        };
        let Ok(mut transform) = transforms.get_mut(request.character) else {
            continue;
        };
        transform.translation = target.location;
        transform.rotation = Quat::IDENTITY;
    }
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.register_type::<RevivalStone>()
        .register_type::<RevivalStoneCollider>()
        .register_type::<RevivalTarget>();

    app.add_observer(collider_for_new_stone)
        .add_observer(collider_for_new_block)
        .add_observer(toggle_revival_target)
        .add_observer(release_removed_stone);

    app.add_systems(
        Update,
        respawn_at_revival_stone.in_set(RespawnStage::Override),
    );
}
