//! Places that make up a town.

use manor_core::{Item, PlaceId, PlayerId, Rect};

/// Named rectangular region holding items and tracking who stands in it.
#[derive(Clone, Debug)]
pub struct Place {
    name: String,
    rect: Rect,
    items: Vec<Item>,
    pub(crate) neighbors: Vec<PlaceId>,
    occupants: Vec<PlayerId>,
}

impl Place {
    pub(crate) fn new(name: String, rect: Rect) -> Self {
        Self {
            name,
            rect,
            items: Vec::new(),
            neighbors: Vec::new(),
            occupants: Vec::new(),
        }
    }

    /// Unique name of the place.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Region of the grid covered by the place.
    #[must_use]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Items lying in the place, in the order they were put there.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Places sharing a border with this one, in load order.
    #[must_use]
    pub fn neighbors(&self) -> &[PlaceId] {
        &self.neighbors
    }

    /// Players standing in the place, in arrival order.
    #[must_use]
    pub fn occupants(&self) -> &[PlayerId] {
        &self.occupants
    }

    /// Reports whether `place` is one of this place's neighbors.
    #[must_use]
    pub fn has_neighbor(&self, place: PlaceId) -> bool {
        self.neighbors.contains(&place)
    }

    pub(crate) fn put_item(&mut self, item: Item) {
        self.items.push(item);
    }

    /// Removes the first item equal to `item`, if any.
    pub(crate) fn take_item(&mut self, item: &Item) -> Option<Item> {
        let position = self.items.iter().position(|candidate| candidate == item)?;
        Some(self.items.remove(position))
    }

    pub(crate) fn enter(&mut self, player: PlayerId) {
        self.occupants.push(player);
    }

    pub(crate) fn leave(&mut self, player: PlayerId) {
        self.occupants.retain(|occupant| *occupant != player);
    }
}
