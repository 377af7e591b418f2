//! Players and the characters they control.

use bevy::prelude::*;

/// A connected player. Outlives the characters it controls, so per-player
/// state (like a revival target) lives here.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Player;

/// The in-world body a player controls.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
#[require(MovementMode)]
pub struct Character {
    pub player: Entity,
}

/// How a character's own movement input is applied.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub enum MovementMode {
    #[default]
    Walking,
    /// No self-driven movement; the character is carried by whatever it is attached to.
    Disabled,
}

/// Ask the host's movement controller to switch `entity` to `mode`.
#[derive(EntityEvent, Debug, Clone, Copy)]
pub struct SetMovementMode {
    pub entity: Entity,
    pub mode: MovementMode,
}

/// The character driven by this client, if one is spawned.
#[derive(Resource, Default, Debug, Reflect)]
#[reflect(Resource)]
pub struct LocalPlayer(pub Option<Entity>);

impl LocalPlayer {
    #[must_use]
    pub fn is(&self, character: Entity) -> bool {
        self.0 == Some(character)
    }
}

fn apply_movement_mode(event: On<SetMovementMode>, mut modes: Query<&mut MovementMode>) {
    let Ok(mut mode) = modes.get_mut(event.entity) else {
        return;
    };
    *mode = event.mode;
}

pub(super) fn plugin(app: &mut App) {
    app.register_type::<Player>()
        .register_type::<Character>()
        .register_type::<MovementMode>()
        .register_type::<LocalPlayer>()
        .init_resource::<LocalPlayer>();

    app.add_observer(apply_movement_mode);
}
