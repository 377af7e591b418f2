//! Messages for the host UI: player notifications and modal screens.

use bevy::prelude::*;

/// Short text shown to one player.
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub recipient: Entity,
    pub text: String,
}

impl Notification {
    pub fn new(recipient: Entity, text: impl Into<String>) -> Self {
        Self {
            recipient,
            text: text.into(),
        }
    }
}

/// Modal screens gameplay can open on the local client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum Screen {
    /// Choose the password for a freshly placed door.
    SetDoorPassword,
    /// Type the password to open a door.
    EnterDoorPassword,
}

impl Screen {
    #[must_use]
    pub const fn asset_id(self) -> &'static str {
        match self {
            Self::SetDoorPassword => "AdventureAssets:setPasswordDoorScreen",
            Self::EnterDoorPassword => "AdventureAssets:passwordDoorScreen",
        }
    }
}

/// Push `screen` onto the local UI stack, scoped to `door`.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenRequest {
    pub screen: Screen,
    pub door: Entity,
}

/// Stand-in sink until a real UI consumes notifications.
fn log_notifications(mut notifications: MessageReader<Notification>) {
    for notification in notifications.read() {
        info!(recipient = %notification.recipient, "{}", notification.text);
    }
}

fn log_screen_requests(mut requests: MessageReader<ScreenRequest>) {
    for request in requests.read() {
        debug!(door = %request.door, "push screen {}", request.screen.asset_id());
    }
}

pub(super) fn plugin(app: &mut App) {
    app.register_type::<Screen>()
        .add_message::<Notification>()
        .add_message::<ScreenRequest>();

    app.add_systems(PostUpdate, (log_notifications, log_screen_requests));
}
