//! Adventure gameplay add-ons for a voxel world: revival stones, fireball
//! launchers, password doors and movable platforms.

pub mod blocks;
pub mod character;
pub mod config;
pub mod gameplay;
pub mod interaction;
pub mod mechanics;
pub mod prefab;
pub mod prelude;
pub mod respawn;
pub mod third_party;
pub mod ui;

#[cfg(test)]
pub mod testing;

use bevy::prelude::*;

/// High-level ordering of per-frame gameplay systems in `Update`.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameSet {
    /// Respawn placement (see [`respawn::RespawnStage`]).
    Respawn,
    /// Timed traps.
    Traps,
    /// Projectile bookkeeping after traps have fired.
    Projectiles,
}

/// Every gameplay feature. The physics simulation is added separately with
/// [`third_party::simulation_plugin`] so hosts and tests can leave it out.
pub fn plugin(app: &mut App) {
    app.configure_sets(
        Update,
        (GameSet::Respawn, GameSet::Traps, GameSet::Projectiles).chain(),
    );

    app.add_plugins((
        third_party::plugin,
        config::plugin,
        prefab::plugin,
        mechanics::plugin,
        blocks::plugin,
        character::plugin,
        interaction::plugin,
        ui::plugin,
        respawn::plugin,
        gameplay::plugin,
    ));
}
