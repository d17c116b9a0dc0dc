//! Load-time description of a town, supplied by adapters.

use serde::{Deserialize, Serialize};

use crate::Rect;

/// Complete description of a town before it is built.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TownLayout {
    /// Name of the town.
    pub name: String,
    /// Number of grid rows.
    pub rows: u32,
    /// Number of grid columns.
    pub columns: u32,
    /// Roaming target the players pursue.
    pub target: TargetLayout,
    /// Name of the roaming pet, if the town has one.
    pub pet: Option<String>,
    /// Places in load order.
    pub places: Vec<PlaceLayout>,
    /// Items and the places they start in.
    pub items: Vec<ItemPlacement>,
}

/// Starting parameters of the roaming target.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetLayout {
    /// Name of the target.
    pub name: String,
    /// Starting health.
    pub health: i32,
}

/// A place's footprint and name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceLayout {
    /// Region of the grid covered by the place.
    pub rect: Rect,
    /// Unique name of the place.
    pub name: String,
}

/// An item and the index of the place it starts in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemPlacement {
    /// Index of the place in [`TownLayout::places`].
    pub place_index: u32,
    /// Damage dealt by the item.
    pub damage: i32,
    /// Name of the item.
    pub name: String,
}
