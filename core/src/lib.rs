#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the manor pursuit game.
//!
//! This crate defines the value types and the message surface that connect the
//! console adapter, the authoritative town, and pure systems. Adapters submit
//! [`Command`] values describing desired mutations, the town executes them via
//! its `apply` entry point, and records [`Event`] values that systems react to
//! deterministically. Systems respond exclusively with new command batches.

mod error;
mod layout;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use error::{ActionError, ErrorKind, ValidationError};
pub use layout::{ItemPlacement, PlaceLayout, TargetLayout, TownLayout};

/// Canonical banner emitted when a session starts.
pub const WELCOME_BANNER: &str = "Welcome to the manor. Corner the target before the turns run out.";

/// Damage dealt by a player who attacks without a weapon.
pub const POKE_DAMAGE: i32 = 1;

/// Describes who decides a player's actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerKind {
    /// Actions are typed in by a person at the console.
    Human,
    /// Actions are chosen by the program; such a player only ever passes.
    Computer,
}

impl fmt::Display for PlayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Human => write!(f, "human"),
            Self::Computer => write!(f, "computer"),
        }
    }
}

/// Identifier of a place, equal to its position in the town's load order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlaceId(u32);

impl PlaceId {
    /// Creates a new place identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Position of the place within the town's ordered place list.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Identifier allocated to a player when it joins the town.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(u32);

impl PlayerId {
    /// Creates a new player identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Axis-aligned grid region bounded by inclusive corner rows and columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "[u32; 4]", into = "[u32; 4]")]
pub struct Rect {
    row1: u32,
    col1: u32,
    row2: u32,
    col2: u32,
}

impl Rect {
    /// Creates a rectangle from its upper-left and lower-right corners.
    ///
    /// Fails when the lower-right corner lies above or left of the upper-left
    /// corner.
    pub fn new(row1: u32, col1: u32, row2: u32, col2: u32) -> Result<Self, ValidationError> {
        if row1 > row2 || col1 > col2 {
            return Err(ValidationError::InvalidRect {
                row1,
                col1,
                row2,
                col2,
            });
        }

        Ok(Self {
            row1,
            col1,
            row2,
            col2,
        })
    }

    /// Top row of the rectangle.
    #[must_use]
    pub const fn row1(&self) -> u32 {
        self.row1
    }

    /// Left column of the rectangle.
    #[must_use]
    pub const fn col1(&self) -> u32 {
        self.col1
    }

    /// Bottom row of the rectangle.
    #[must_use]
    pub const fn row2(&self) -> u32 {
        self.row2
    }

    /// Right column of the rectangle.
    #[must_use]
    pub const fn col2(&self) -> u32 {
        self.col2
    }

    /// Reports whether the rectangle lies inside a grid of the given size.
    #[must_use]
    pub const fn fits_within(&self, rows: u32, columns: u32) -> bool {
        self.row2 < rows && self.col2 < columns
    }
}

impl TryFrom<[u32; 4]> for Rect {
    type Error = ValidationError;

    fn try_from([row1, col1, row2, col2]: [u32; 4]) -> Result<Self, Self::Error> {
        Self::new(row1, col1, row2, col2)
    }
}

impl From<Rect> for [u32; 4] {
    fn from(rect: Rect) -> Self {
        [rect.row1, rect.col1, rect.row2, rect.col2]
    }
}

/// Decides whether two rectangles share a border segment.
///
/// One rectangle's edge must coincide with the opposite edge of the other
/// while the two overlap along the perpendicular axis. The caller excludes
/// self-pairs.
#[must_use]
pub fn is_neighbor(a: Rect, b: Rect) -> bool {
    let horizontally_adjacent = a.col1 == b.col2 || a.col2 == b.col1;
    let vertically_adjacent = a.row1 == b.row2 || a.row2 == b.row1;
    let row_overlap = a.row1 <= b.row2 && a.row2 >= b.row1;
    let column_overlap = a.col1 <= b.col2 && a.col2 >= b.col1;

    (horizontally_adjacent && row_overlap) || (vertically_adjacent && column_overlap)
}

/// Weighted object lying in a place or carried by a player.
///
/// Items compare by value: two items with the same name and damage are equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ItemFields")]
pub struct Item {
    name: String,
    damage: i32,
}

impl Item {
    /// Creates an item, rejecting empty names and negative damage.
    pub fn new(name: impl Into<String>, damage: i32) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyName { what: "item" });
        }
        if damage < 0 {
            return Err(ValidationError::NegativeDamage { item: name, damage });
        }

        Ok(Self { name, damage })
    }

    /// Display name of the item.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Damage dealt to the target when the item is used in an attack.
    #[must_use]
    pub const fn damage(&self) -> i32 {
        self.damage
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.damage)
    }
}

#[derive(Deserialize)]
struct ItemFields {
    name: String,
    damage: i32,
}

impl TryFrom<ItemFields> for Item {
    type Error = ValidationError;

    fn try_from(fields: ItemFields) -> Result<Self, Self::Error> {
        Self::new(fields.name, fields.damage)
    }
}

/// Commands that express all permissible town mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Adds a player standing in the provided place.
    AddPlayer {
        /// Name shown for the player.
        name: String,
        /// Whether a person or the program controls the player.
        kind: PlayerKind,
        /// Maximum number of items the player may carry at once.
        carry_limit: u32,
        /// Place the player starts in.
        start: PlaceId,
    },
    /// Moves a player to a neighbor of its current place.
    MovePlayer {
        /// Player attempting to move.
        player: PlayerId,
        /// Place the player wants to enter.
        destination: PlaceId,
    },
    /// Transfers an item from the player's place into its inventory.
    PickUpItem {
        /// Player picking the item up.
        player: PlayerId,
        /// Item to take, matched by value.
        item: Item,
    },
    /// Attacks the target, optionally spending a carried weapon.
    Attack {
        /// Player performing the attack.
        player: PlayerId,
        /// Carried item used as the weapon; `None` pokes the target.
        weapon: Option<Item>,
    },
    /// Spends the player's action without doing anything.
    Pass {
        /// Player giving up its action.
        player: PlayerId,
    },
    /// Closes the current turn.
    EndTurn,
    /// Moves the target to the next place in load order.
    AdvanceTarget,
    /// Moves the pet to the next place in load order.
    AdvancePet,
}

/// Events recorded by the town after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that a player joined the town.
    PlayerAdded {
        /// Identifier allocated to the player.
        player: PlayerId,
        /// Whether a person or the program controls the player.
        kind: PlayerKind,
        /// Place the player starts in.
        place: PlaceId,
    },
    /// Confirms that a player moved between neighboring places.
    PlayerMoved {
        /// Player that moved.
        player: PlayerId,
        /// Place the player left.
        from: PlaceId,
        /// Place the player entered.
        to: PlaceId,
    },
    /// Confirms that an item moved from a place into a player's inventory.
    ItemPickedUp {
        /// Player that took the item.
        player: PlayerId,
        /// Place the item was taken from.
        place: PlaceId,
        /// Item that changed hands.
        item: Item,
    },
    /// Reports that an attack reduced the target's health.
    TargetDamaged {
        /// Player that attacked.
        player: PlayerId,
        /// Damage applied by the attack.
        amount: i32,
        /// Health remaining after the attack.
        remaining: i32,
    },
    /// Announces that the target's health reached zero.
    TargetDefeated {
        /// Player whose attack defeated the target.
        player: PlayerId,
    },
    /// Confirms that a player spent its action without acting.
    PlayerPassed {
        /// Player that passed.
        player: PlayerId,
    },
    /// Announces that a turn was closed.
    TurnEnded {
        /// Number of turns completed so far.
        turn: u32,
    },
    /// Confirms that the target advanced along the place order.
    TargetMoved {
        /// Place the target left.
        from: PlaceId,
        /// Place the target entered.
        to: PlaceId,
    },
    /// Confirms that the pet advanced along the place order.
    PetMoved {
        /// Place the pet left.
        from: PlaceId,
        /// Place the pet entered.
        to: PlaceId,
    },
}

impl Event {
    /// Reports whether the event completes a player's action for the turn.
    #[must_use]
    pub const fn is_player_action(&self) -> bool {
        matches!(
            self,
            Self::PlayerMoved { .. }
                | Self::ItemPickedUp { .. }
                | Self::TargetDamaged { .. }
                | Self::PlayerPassed { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{de::DeserializeOwned, Serialize};

    fn rect(row1: u32, col1: u32, row2: u32, col2: u32) -> Rect {
        Rect::new(row1, col1, row2, col2).expect("valid rect")
    }

    #[test]
    fn rect_rejects_inverted_corners() {
        assert_eq!(
            Rect::new(3, 0, 2, 4),
            Err(ValidationError::InvalidRect {
                row1: 3,
                col1: 0,
                row2: 2,
                col2: 4,
            })
        );
        assert!(Rect::new(0, 5, 1, 4).is_err());
        assert!(Rect::new(2, 2, 2, 2).is_ok());
    }

    #[test]
    fn side_by_side_rects_are_neighbors() {
        let left = rect(0, 0, 3, 2);
        let right = rect(1, 2, 2, 5);
        assert!(is_neighbor(left, right));
        assert!(is_neighbor(right, left));
    }

    #[test]
    fn stacked_rects_are_neighbors() {
        let top = rect(0, 0, 2, 4);
        let bottom = rect(2, 3, 5, 8);
        assert!(is_neighbor(top, bottom));
        assert!(is_neighbor(bottom, top));
    }

    #[test]
    fn disjoint_rects_are_not_neighbors() {
        let first = rect(0, 0, 1, 1);
        let second = rect(5, 5, 6, 6);
        assert!(!is_neighbor(first, second));
        assert!(!is_neighbor(second, first));
    }

    #[test]
    fn shared_column_without_row_overlap_is_not_a_neighbor() {
        let upper = rect(0, 0, 1, 2);
        let lower = rect(4, 2, 6, 3);
        assert!(!is_neighbor(upper, lower));
    }

    #[test]
    fn shared_corner_cell_counts_as_touching() {
        let first = rect(0, 0, 1, 1);
        let second = rect(1, 1, 2, 2);
        assert!(is_neighbor(first, second));
        assert!(is_neighbor(second, first));
    }

    #[test]
    fn item_rejects_empty_name_and_negative_damage() {
        assert_eq!(
            Item::new("  ", 2),
            Err(ValidationError::EmptyName { what: "item" })
        );
        assert_eq!(
            Item::new("Rope", -1),
            Err(ValidationError::NegativeDamage {
                item: "Rope".to_owned(),
                damage: -1,
            })
        );
        assert!(Item::new("Feather", 0).is_ok());
    }

    #[test]
    fn items_compare_by_value() {
        let first = Item::new("Knife", 3).expect("item");
        let second = Item::new("Knife", 3).expect("item");
        let heavier = Item::new("Knife", 4).expect("item");
        assert_eq!(first, second);
        assert_ne!(first, heavier);
        assert_eq!(first.to_string(), "Knife (3)");
    }

    #[test]
    fn player_action_events_are_classified() {
        assert!(Event::PlayerPassed {
            player: PlayerId::new(0)
        }
        .is_player_action());
        assert!(!Event::TurnEnded { turn: 1 }.is_player_action());
        assert!(!Event::TargetMoved {
            from: PlaceId::new(0),
            to: PlaceId::new(1),
        }
        .is_player_action());
    }

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn value_types_round_trip_through_bincode() {
        assert_round_trip(&rect(1, 2, 3, 4));
        assert_round_trip(&Item::new("Crepe Pan", 3).expect("item"));
        assert_round_trip(&PlaceId::new(7));
        assert_round_trip(&PlayerKind::Computer);
    }

    #[test]
    fn inverted_rect_fails_to_deserialize() {
        let bytes = bincode::serialize(&[4_u32, 0, 1, 1]).expect("serialize");
        assert!(bincode::deserialize::<Rect>(&bytes).is_err());
    }
}
