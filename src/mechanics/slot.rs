//! Single-occupant slot: at most one value held per key, toggled by activation.

use bevy::prelude::*;

/// The single observable change produced by [`Slot::activate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition<V> {
    /// The slot was empty and now holds `V`.
    Activated(V),
    /// The slot held `V` and was activated with it again, so it is now empty.
    Deactivated(V),
    /// The slot held `from` and now holds `to`. Reported once, never as a
    /// deactivate followed by an activate.
    Switched { from: V, to: V },
}

impl<V> Transition<V> {
    /// The value the slot holds after this transition, if any.
    #[must_use]
    pub const fn occupant(&self) -> Option<&V> {
        match self {
            Self::Activated(value) | Self::Switched { to: value, .. } => Some(value),
            Self::Deactivated(_) => None,
        }
    }

    /// The value the slot released in this transition, if any.
    #[must_use]
    pub const fn released(&self) -> Option<&V> {
        match self {
            Self::Deactivated(value) | Self::Switched { from: value, .. } => Some(value),
            Self::Activated(_) => None,
        }
    }
}

/// Holds zero or one occupant.
#[derive(Debug, Clone, PartialEq, Eq, Reflect)]
pub struct Slot<V> {
    occupant: Option<V>,
}

impl<V> Default for Slot<V> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<V> From<Option<V>> for Slot<V> {
    fn from(occupant: Option<V>) -> Self {
        Self { occupant }
    }
}

impl<V> Slot<V> {
    #[must_use]
    pub const fn empty() -> Self {
        Self { occupant: None }
    }

    #[must_use]
    pub const fn occupant(&self) -> Option<&V> {
        self.occupant.as_ref()
    }

    #[must_use]
    pub const fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    /// Force the slot empty, returning whatever it held.
    pub fn clear(&mut self) -> Option<V> {
        self.occupant.take()
    }
}

impl<V: PartialEq + Clone> Slot<V> {
    /// Toggle `value` in the slot.
    ///
    /// - empty: `value` moves in ([`Transition::Activated`])
    /// - holding `value`: the slot empties ([`Transition::Deactivated`])
    /// - holding something else: `value` replaces it ([`Transition::Switched`])
    pub fn activate(&mut self, value: V) -> Transition<V> {
        match self.occupant.take() {
            None => {
                self.occupant = Some(value.clone());
                Transition::Activated(value)
            }
            Some(current) if current == value => Transition::Deactivated(current),
            Some(current) => {
                self.occupant = Some(value.clone());
                Transition::Switched {
                    from: current,
                    to: value,
                }
            }
        }
    }

    #[must_use]
    pub fn is_occupied_by(&self, value: &V) -> bool {
        self.occupant.as_ref() == Some(value)
    }
}

/// Every key whose occupant is currently `value`.
///
/// Linear scan; removal of an occupant is rare compared to activation, so no
/// reverse index is kept. Entries pair a key with its slot's current occupant
/// (see [`Slot::occupant`]).
pub fn occupants_of<'a, K, V>(
    entries: impl IntoIterator<Item = (K, Option<&'a V>)>,
    value: &V,
) -> Vec<K>
where
    V: PartialEq + 'a,
{
    entries
        .into_iter()
        .filter(|(_, occupant)| *occupant == Some(value))
        .map(|(key, _)| key)
        .collect()
}
