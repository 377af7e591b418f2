//! Gameplay features: revival stones, fireball launchers, password doors, platforms.

pub mod fireball_launcher;
pub mod password_door;
pub mod platform;
pub mod revival_stone;

use bevy::prelude::*;

pub(super) fn plugin(app: &mut App) {
    app.add_plugins((
        revival_stone::plugin,
        fireball_launcher::plugin,
        password_door::plugin,
        platform::plugin,
    ));
}
