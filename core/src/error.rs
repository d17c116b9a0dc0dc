//! Error taxonomy shared by the town and its adapters.

use thiserror::Error;

use crate::{PlaceId, PlayerId};

/// Broad classification of a failed command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed input rejected while constructing an entity.
    Validation,
    /// The requested transition is not legal from the current state.
    IllegalTransition,
    /// The transition would exceed a bounded resource.
    Capacity,
}

/// Structural problems detected while constructing places, items, or players.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The rectangle's lower-right corner lies above or left of its upper-left corner.
    #[error("rectangle ({row1}, {col1}) to ({row2}, {col2}) has inverted corners")]
    InvalidRect {
        /// Top row.
        row1: u32,
        /// Left column.
        col1: u32,
        /// Bottom row.
        row2: u32,
        /// Right column.
        col2: u32,
    },
    /// A rectangle extends past the town's grid.
    #[error("place `{place}` does not fit inside a {rows}x{columns} grid")]
    RectOutOfBounds {
        /// Name of the offending place.
        place: String,
        /// Number of rows in the grid.
        rows: u32,
        /// Number of columns in the grid.
        columns: u32,
    },
    /// A name was empty or contained only whitespace.
    #[error("{what} name must not be empty")]
    EmptyName {
        /// Kind of entity whose name was empty.
        what: &'static str,
    },
    /// An item was declared with negative damage.
    #[error("item `{item}` has negative damage {damage}")]
    NegativeDamage {
        /// Name of the offending item.
        item: String,
        /// Damage that was provided.
        damage: i32,
    },
    /// The target was declared with no health.
    #[error("target health must be positive, got {health}")]
    NonPositiveHealth {
        /// Health that was provided.
        health: i32,
    },
    /// A player was declared unable to carry anything.
    #[error("carry limit must be positive")]
    ZeroCarryLimit,
    /// A reference named a place index the town does not have.
    #[error("place index {index} does not exist")]
    UnknownPlace {
        /// Index that was provided.
        index: u32,
    },
    /// Two places share a name.
    #[error("place `{name}` is declared more than once")]
    DuplicatePlace {
        /// Repeated place name.
        name: String,
    },
    /// The layout declared no places at all.
    #[error("a town needs at least one place")]
    EmptyTown,
}

/// Reasons a command may be rejected by the town.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ActionError {
    /// No player with the provided identifier exists.
    #[error("player {} does not exist", .0.get())]
    UnknownPlayer(PlayerId),
    /// No place with the provided identifier exists.
    #[error("place {} does not exist", .0.get())]
    UnknownPlace(PlaceId),
    /// A player with the same name and kind already joined.
    #[error("{kind} player `{name}` has already joined")]
    DuplicatePlayer {
        /// Name of the player.
        name: String,
        /// Kind of the player.
        kind: crate::PlayerKind,
    },
    /// The destination is not a neighbor of the player's place.
    #[error("`{to}` is not a neighbor of `{from}`")]
    NotNeighbor {
        /// Name of the place the player stands in.
        from: String,
        /// Name of the requested destination.
        to: String,
    },
    /// The player already carries as many items as it may.
    #[error("cannot carry more than {limit} items")]
    InventoryFull {
        /// Player's carry limit.
        limit: u32,
    },
    /// The requested item is not lying in the player's place.
    #[error("`{item}` is not in `{place}`")]
    ItemNotInPlace {
        /// Name of the requested item.
        item: String,
        /// Name of the player's place.
        place: String,
    },
    /// The requested weapon is not in the player's inventory.
    #[error("`{item}` is not being carried")]
    ItemNotCarried {
        /// Name of the requested item.
        item: String,
    },
    /// A negative amount of damage was applied.
    #[error("damage must not be negative, got {amount}")]
    NegativeDamage {
        /// Amount that was provided.
        amount: i32,
    },
    /// The target is somewhere else.
    #[error("the target is not in `{place}`")]
    TargetNotPresent {
        /// Name of the attacker's place.
        place: String,
    },
    /// Another player stands in the attacker's place.
    #[error("the attack would be seen by {witness}")]
    Witnessed {
        /// Name of the player who would see the attack.
        witness: String,
    },
    /// The target has already been defeated.
    #[error("the target has already been defeated")]
    TargetDefeated,
    /// The town has no pet to move.
    #[error("the town has no pet")]
    NoPet,
    /// A player could not be constructed.
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

impl ActionError {
    /// Classifies the error into the broad taxonomy used by adapters.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InventoryFull { .. } => ErrorKind::Capacity,
            Self::Invalid(_) => ErrorKind::Validation,
            _ => ErrorKind::IllegalTransition,
        }
    }
}
