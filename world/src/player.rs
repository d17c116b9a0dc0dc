//! Players that move along the neighbor graph and carry items.

use std::hash::{Hash, Hasher};

use manor_core::{Item, PlaceId, PlayerId, PlayerKind, ValidationError};

/// A human- or computer-controlled participant.
///
/// Two players are the same logical player when their name and kind match,
/// regardless of where they stand or what they carry.
#[derive(Clone, Debug)]
pub struct Player {
    id: PlayerId,
    name: String,
    kind: PlayerKind,
    carry_limit: u32,
    pub(crate) place: PlaceId,
    pub(crate) items: Vec<Item>,
}

impl Player {
    /// Creates a player standing in `place` with an empty inventory.
    pub fn new(
        id: PlayerId,
        name: impl Into<String>,
        kind: PlayerKind,
        carry_limit: u32,
        place: PlaceId,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyName { what: "player" });
        }
        if carry_limit == 0 {
            return Err(ValidationError::ZeroCarryLimit);
        }

        Ok(Self {
            id,
            name,
            kind,
            carry_limit,
            place,
            items: Vec::new(),
        })
    }

    /// Identifier allocated by the town.
    #[must_use]
    pub const fn id(&self) -> PlayerId {
        self.id
    }

    /// Name of the player.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether a person or the program controls the player.
    #[must_use]
    pub const fn kind(&self) -> PlayerKind {
        self.kind
    }

    /// Maximum number of items the player may carry.
    #[must_use]
    pub const fn carry_limit(&self) -> u32 {
        self.carry_limit
    }

    /// Place the player stands in.
    #[must_use]
    pub const fn place(&self) -> PlaceId {
        self.place
    }

    /// Items carried, in pickup order.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Reports whether another item would exceed the carry limit.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.items.len() >= self.carry_limit as usize
    }

    pub(crate) fn drop_carried(&mut self, item: &Item) -> Option<Item> {
        let position = self.items.iter().position(|candidate| candidate == item)?;
        Some(self.items.remove(position))
    }
}

impl PartialEq for Player {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.kind == other.kind
    }
}

impl Eq for Player {}

impl Hash for Player {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.kind.hash(state);
    }
}
