//! Respawn placement pipeline.
//!
//! A `RespawnRequest` is handled in ordered stages within one update:
//! `Place` puts the character at the world spawn point, then `Override`
//! lets features move it somewhere else. Later stages always win.

use bevy::prelude::*;

use crate::GameSet;
use crate::config::AdventureConfig;

/// A character is being brought back into the world.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RespawnRequest {
    pub character: Entity,
}

#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RespawnStage {
    /// Default placement from world generation.
    Place,
    /// Feature-specific overrides of the default placement.
    Override,
}

fn place_at_world_spawn(
    mut requests: MessageReader<RespawnRequest>,
    config: Res<AdventureConfig>,
    mut transforms: Query<&mut Transform>,
) {
    for request in requests.read() {
        let Ok(mut transform) = transforms.get_mut(request.character) else {
            continue;
        };
        transform.translation = config.world_spawn();
    }
}

pub(super) fn plugin(app: &mut App) {
    app.add_message::<RespawnRequest>();

    app.configure_sets(
        Update,
        (RespawnStage::Place, RespawnStage::Override)
            .chain()
            .in_set(GameSet::Respawn),
    );

    app.add_systems(Update, place_at_world_spawn.in_set(RespawnStage::Place));
}
