//! Neighbor graph builder used by the world crate.

use manor_core::{PlaceId, Rect};

use crate::Place;

/// Populates every place's neighbor list from its rectangle.
///
/// Each place computes its own outgoing edges by testing every other place in
/// load order, so neighbor lists follow the same order as the places slice.
/// Self-pairs are never tested.
pub(crate) fn link_neighbors_with<F>(places: &mut [Place], mut is_adjacent: F)
where
    F: FnMut(Rect, Rect) -> bool,
{
    let rects: Vec<Rect> = places.iter().map(Place::rect).collect();

    for (index, place) in places.iter_mut().enumerate() {
        let mut neighbors = Vec::new();
        for (other, rect) in rects.iter().enumerate() {
            if other == index {
                continue;
            }

            if is_adjacent(place.rect(), *rect) {
                neighbors.push(PlaceId::new(other as u32));
            }
        }
        place.neighbors = neighbors;
    }
}

/// Total number of directed edges across all places.
#[must_use]
pub(crate) fn edge_count(places: &[Place]) -> usize {
    places.iter().map(|place| place.neighbors().len()).sum()
}
