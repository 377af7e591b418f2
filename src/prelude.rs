//! Common imports for hosts embedding the adventure features.

pub use bevy::prelude::*;

pub use crate::GameSet;
pub use crate::blocks::{Block, BlockItem, BlockItemPlaced, BlockToItem};
pub use crate::character::{Character, LocalPlayer, MovementMode, Player, SetMovementMode};
pub use crate::config::{AdventureConfig, Settings};
pub use crate::gameplay::fireball_launcher::{Fireball, FireballLauncher};
pub use crate::gameplay::password_door::{
    DoorLock, DoorPlaced, OpenDoorRequest, PasswordDoor, SetDoorPassword, SubmitDoorPassword,
};
pub use crate::gameplay::platform::Platform;
pub use crate::gameplay::revival_stone::{RevivalStone, RevivalTarget};
pub use crate::interaction::{Activate, Attack, Damaged};
pub use crate::prefab::Prefabs;
pub use crate::respawn::RespawnRequest;
pub use crate::ui::{Notification, Screen, ScreenRequest};
