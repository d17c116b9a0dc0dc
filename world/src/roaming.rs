//! Roaming entities that cycle through the town in load order.

use manor_core::{ActionError, PlaceId, ValidationError};

/// Returns the place after `current` in load order, wrapping to the first.
///
/// The neighbor graph is not consulted.
#[must_use]
pub(crate) fn advance(current: PlaceId, place_count: usize) -> PlaceId {
    let next = current.index() + 1;
    if next >= place_count {
        PlaceId::new(0)
    } else {
        PlaceId::new(next as u32)
    }
}

/// The roaming character the players are trying to defeat.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Target {
    name: String,
    health: i32,
    place: PlaceId,
}

impl Target {
    pub(crate) fn new(name: String, health: i32, place: PlaceId) -> Result<Self, ValidationError> {
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyName { what: "target" });
        }
        if health <= 0 {
            return Err(ValidationError::NonPositiveHealth { health });
        }

        Ok(Self {
            name,
            health,
            place,
        })
    }

    /// Name of the target.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Remaining health, never below zero.
    #[must_use]
    pub const fn health(&self) -> i32 {
        self.health
    }

    /// Place the target currently occupies.
    #[must_use]
    pub const fn place(&self) -> PlaceId {
        self.place
    }

    /// Reports whether the target's health reached zero.
    #[must_use]
    pub const fn is_defeated(&self) -> bool {
        self.health == 0
    }

    /// Lowers health by `amount`, flooring at zero, and reports defeat.
    ///
    /// Negative amounts are rejected without touching health.
    pub fn apply_damage(&mut self, amount: i32) -> Result<bool, ActionError> {
        if amount < 0 {
            return Err(ActionError::NegativeDamage { amount });
        }

        self.health = self.health.saturating_sub(amount).max(0);
        Ok(self.is_defeated())
    }

    pub(crate) fn advance(&mut self, place_count: usize) -> (PlaceId, PlaceId) {
        let from = self.place;
        self.place = advance(from, place_count);
        (from, self.place)
    }
}

/// The harmless roaming character that hides whatever place it is in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pet {
    name: String,
    place: PlaceId,
}

impl Pet {
    pub(crate) fn new(name: String, place: PlaceId) -> Result<Self, ValidationError> {
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyName { what: "pet" });
        }

        Ok(Self { name, place })
    }

    /// Name of the pet.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Place the pet currently occupies.
    #[must_use]
    pub const fn place(&self) -> PlaceId {
        self.place
    }

    pub(crate) fn advance(&mut self, place_count: usize) -> (PlaceId, PlaceId) {
        let from = self.place;
        self.place = advance(from, place_count);
        (from, self.place)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(health: i32) -> Target {
        Target::new("Doctor Lucky".to_owned(), health, PlaceId::new(0)).expect("valid target")
    }

    #[test]
    fn advance_wraps_after_last_place() {
        assert_eq!(advance(PlaceId::new(0), 3), PlaceId::new(1));
        assert_eq!(advance(PlaceId::new(1), 3), PlaceId::new(2));
        assert_eq!(advance(PlaceId::new(2), 3), PlaceId::new(0));
        assert_eq!(advance(PlaceId::new(0), 1), PlaceId::new(0));
    }

    #[test]
    fn full_cycle_visits_every_place_once() {
        let count = 5;
        let mut target = target(10);
        let mut visited = Vec::new();

        for _ in 0..count {
            let (_, to) = target.advance(count);
            visited.push(to.get());
        }

        assert_eq!(visited, vec![1, 2, 3, 4, 0]);
        assert_eq!(target.place(), PlaceId::new(0));
    }

    #[test]
    fn damage_floors_at_zero_and_reports_defeat() {
        let mut target = target(5);

        assert_eq!(target.apply_damage(3), Ok(false));
        assert_eq!(target.health(), 2);
        assert_eq!(target.apply_damage(9), Ok(true));
        assert_eq!(target.health(), 0);
        assert!(target.is_defeated());
    }

    #[test]
    fn zero_damage_leaves_health_alone() {
        let mut target = target(5);
        assert_eq!(target.apply_damage(0), Ok(false));
        assert_eq!(target.health(), 5);
    }

    #[test]
    fn negative_damage_is_rejected_without_mutation() {
        let mut target = target(5);

        assert_eq!(
            target.apply_damage(-2),
            Err(ActionError::NegativeDamage { amount: -2 })
        );
        assert_eq!(target.health(), 5);
    }

    #[test]
    fn construction_validates_name_and_health() {
        assert_eq!(
            Target::new(String::new(), 5, PlaceId::new(0)),
            Err(ValidationError::EmptyName { what: "target" })
        );
        assert_eq!(
            Target::new("Lucky".to_owned(), 0, PlaceId::new(0)),
            Err(ValidationError::NonPositiveHealth { health: 0 })
        );
        assert!(Pet::new(" ".to_owned(), PlaceId::new(0)).is_err());
    }
}
