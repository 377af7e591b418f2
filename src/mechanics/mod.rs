//! Entity coordination building blocks shared by every gameplay feature:
//! parent/child attachment, single-occupant slots, and interval triggers.

pub mod attachment;
pub mod interval;
pub mod slot;

pub use attachment::{AttachError, AttachedTo, Attachments, AttachmentOffset};
pub use interval::IntervalTrigger;
pub use slot::{Slot, Transition, occupants_of};

use bevy::prelude::*;

pub(super) fn plugin(app: &mut App) {
    app.add_plugins(attachment::plugin);
}
