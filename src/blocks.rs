//! Block and block-item markers, and the events fired when one turns into the other.

use bevy::prelude::*;

/// Marker: entity is a block placed in the world.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Block;

/// Marker: entity is an inventory item that places a block.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct BlockItem;

/// The item `entity` was used to place `placed_block`.
#[derive(EntityEvent, Debug, Clone, Copy)]
pub struct BlockItemPlaced {
    pub entity: Entity,
    pub placed_block: Entity,
}

/// The block `entity` was broken and turned into `item`.
#[derive(EntityEvent, Debug, Clone, Copy)]
pub struct BlockToItem {
    pub entity: Entity,
    pub item: Entity,
}

pub(super) fn plugin(app: &mut App) {
    app.register_type::<Block>().register_type::<BlockItem>();
}
