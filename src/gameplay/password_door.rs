//! Password doors: locked until someone enters the password chosen by the
//! player who placed them.

use bevy::prelude::*;
use thiserror::Error;

use crate::character::{Character, LocalPlayer};
use crate::interaction::Activate;
use crate::mechanics::Slot;
use crate::ui::{Notification, Screen, ScreenRequest};

/// Name shown in the door's world tooltip.
pub const TOOLTIP_NAME: &str = "Password Door";

pub const UNLOCKED: &str = "Door unlocked";

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DoorError {
    #[error("This door has no password")]
    NoPassword,
    #[error("This door already has a password")]
    PasswordAlreadySet,
    #[error("Incorrect password")]
    WrongPassword,
}

// === Components ===

/// Marker for a door that is opened with a password.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(DoorLock)]
pub struct PasswordDoor;

/// Lock state of a password door.
///
/// The first password set on a door is final. While it has one, the door is
/// locked unless `opened_by` holds the character who last unlocked it. A door
/// without a password never locks.
#[derive(Component, Debug, Clone, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct DoorLock {
    password: Option<String>,
    opened_by: Slot<Entity>,
}

impl DoorLock {
    #[must_use]
    pub const fn is_locked(&self) -> bool {
        self.password.is_some() && !self.opened_by.is_occupied()
    }

    #[must_use]
    pub const fn has_password(&self) -> bool {
        self.password.is_some()
    }

    /// The character that unlocked the door, while it stays open.
    #[must_use]
    pub fn opened_by(&self) -> Option<Entity> {
        self.opened_by.occupant().copied()
    }

    /// Give the door its password and lock it. Only the first call succeeds.
    pub fn set_password(&mut self, password: impl Into<String>) -> Result<(), DoorError> {
        if self.password.is_some() {
            return Err(DoorError::PasswordAlreadySet);
        }
        self.password = Some(password.into());
        self.opened_by.clear();
        Ok(())
    }

    /// Open the door for `opener` if `attempt` matches the password. A door
    /// that is already open keeps its first opener.
    pub fn unlock(&mut self, attempt: &str, opener: Entity) -> Result<(), DoorError> {
        match self.password.as_deref() {
            None => Err(DoorError::NoPassword),
            Some(password) if password == attempt => {
                if !self.opened_by.is_occupied() {
                    self.opened_by.activate(opener);
                }
                Ok(())
            }
            Some(_) => Err(DoorError::WrongPassword),
        }
    }

    /// Lock the door again. Does nothing for a door without a password.
    pub fn lock(&mut self) {
        self.opened_by.clear();
    }
}

// === Events ===

/// `instigator` just placed the door `entity`.
#[derive(EntityEvent, Debug, Clone, Copy)]
pub struct DoorPlaced {
    pub entity: Entity,
    pub instigator: Entity,
}

/// Ask the character `entity` for the password of `door`.
#[derive(EntityEvent, Debug, Clone, Copy)]
pub struct OpenDoorRequest {
    pub entity: Entity,
    pub door: Entity,
}

/// Set-password screen submitted for the door `entity`.
#[derive(EntityEvent, Debug, Clone)]
pub struct SetDoorPassword {
    pub entity: Entity,
    pub password: String,
}

/// Password-entry screen submitted for the door `entity`.
#[derive(EntityEvent, Debug, Clone)]
pub struct SubmitDoorPassword {
    pub entity: Entity,
    pub instigator: Entity,
    pub attempt: String,
}

// === Client Observers ===

/// Only the placing player sees the set-password screen.
fn prompt_password_setup(
    placed: On<DoorPlaced>,
    doors: Query<(), With<PasswordDoor>>,
    local: Res<LocalPlayer>,
    mut screens: MessageWriter<ScreenRequest>,
) {
    if !doors.contains(placed.entity) || !local.is(placed.instigator) {
        return;
    }
    screens.write(ScreenRequest {
        screen: Screen::SetDoorPassword,
        door: placed.entity,
    });
}

/// Only the requesting player sees the password-entry screen, scoped to the requested door.
fn prompt_password_entry(
    request: On<OpenDoorRequest>,
    local: Res<LocalPlayer>,
    mut screens: MessageWriter<ScreenRequest>,
) {
    if !local.is(request.entity) {
        return;
    }
    screens.write(ScreenRequest {
        screen: Screen::EnterDoorPassword,
        door: request.door,
    });
}

fn name_password_door(add: On<Add, PasswordDoor>, mut commands: Commands) {
    commands
        .entity(add.entity)
        .insert_if_new(Name::new(TOOLTIP_NAME));
}

// === Authority Observers ===

/// A locked door asks the activating character for its password; an open one locks again.
fn request_door_password(
    activate: On<Activate>,
    mut doors: Query<&mut DoorLock, With<PasswordDoor>>,
    mut commands: Commands,
) {
    let Ok(mut lock) = doors.get_mut(activate.entity) else {
        return;
    };
    if lock.is_locked() {
        commands.trigger(OpenDoorRequest {
            entity: activate.instigator,
            door: activate.entity,
        });
    } else {
        lock.lock();
    }
}

/// Stores the password chosen on the set-password screen. Later submissions
/// for a door that already has one are dropped.
fn store_door_password(set: On<SetDoorPassword>, mut doors: Query<&mut DoorLock>) {
    let Ok(mut lock) = doors.get_mut(set.entity) else {
        return;
    };
    if let Err(error) = lock.set_password(set.password.clone()) {
        warn!(door = %set.entity, "ignoring password change: {error}");
    }
}

fn check_door_password(
    submit: On<SubmitDoorPassword>,
    mut doors: Query<&mut DoorLock>,
    characters: Query<&Character>,
    mut notifications: MessageWriter<Notification>,
) {
    let Ok(mut lock) = doors.get_mut(submit.entity) else {
        return;
    };
    let text = match lock.unlock(&submit.attempt, submit.instigator) {
        Ok(()) => {
            debug!(door = %submit.entity, opened_by = ?lock.opened_by(), "door unlocked");
            UNLOCKED.to_string()
        }
        Err(error) => error.to_string(),
    };
    if let Ok(character) = characters.get(submit.instigator) {
        notifications.write(Notification::new(character.player, text));
    }
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.register_type::<PasswordDoor>()
        .register_type::<DoorLock>();

    app.add_observer(prompt_password_setup)
        .add_observer(prompt_password_entry)
        .add_observer(name_password_door)
        .add_observer(request_door_password)
        .add_observer(store_door_password)
        .add_observer(check_door_password);
}
