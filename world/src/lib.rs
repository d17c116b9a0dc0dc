#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative town state for the manor pursuit game.

mod graph;
mod place;
mod player;
mod roaming;

use std::collections::HashSet;

use manor_core::{
    is_neighbor, ActionError, Command, Event, Item, PlaceId, PlayerId, PlayerKind, TownLayout,
    ValidationError, POKE_DAMAGE,
};
use tracing::{debug, trace};

pub use place::Place;
pub use player::Player;
pub use roaming::{Pet, Target};

/// Represents the authoritative state of a town and everyone in it.
#[derive(Debug)]
pub struct Town {
    name: String,
    rows: u32,
    columns: u32,
    places: Vec<Place>,
    target: Target,
    pet: Option<Pet>,
    players: Vec<Player>,
    turn: u32,
}

/// Result of an attack that went through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttackOutcome {
    /// Damage applied to the target.
    pub amount: i32,
    /// Health left afterwards.
    pub remaining: i32,
    /// Whether the attack defeated the target.
    pub defeated: bool,
}

impl Town {
    /// Builds a town from its layout, deriving the neighbor graph.
    ///
    /// Places are validated before any edge is computed. Items are attached
    /// after the graph exists. The target and pet start in the first place.
    pub fn from_layout(layout: TownLayout) -> Result<Self, ValidationError> {
        if layout.name.trim().is_empty() {
            return Err(ValidationError::EmptyName { what: "town" });
        }
        if layout.places.is_empty() {
            return Err(ValidationError::EmptyTown);
        }

        let mut names = HashSet::new();
        let mut places = Vec::with_capacity(layout.places.len());
        for entry in layout.places {
            if entry.name.trim().is_empty() {
                return Err(ValidationError::EmptyName { what: "place" });
            }
            if !entry.rect.fits_within(layout.rows, layout.columns) {
                return Err(ValidationError::RectOutOfBounds {
                    place: entry.name,
                    rows: layout.rows,
                    columns: layout.columns,
                });
            }
            if !names.insert(entry.name.clone()) {
                return Err(ValidationError::DuplicatePlace { name: entry.name });
            }
            places.push(Place::new(entry.name, entry.rect));
        }

        graph::link_neighbors_with(&mut places, is_neighbor);

        for placement in layout.items {
            let item = Item::new(placement.name, placement.damage)?;
            let place = places
                .get_mut(placement.place_index as usize)
                .ok_or(ValidationError::UnknownPlace {
                    index: placement.place_index,
                })?;
            place.put_item(item);
        }

        let start = PlaceId::new(0);
        let target = Target::new(layout.target.name, layout.target.health, start)?;
        let pet = layout.pet.map(|name| Pet::new(name, start)).transpose()?;

        debug!(
            town = %layout.name,
            places = places.len(),
            edges = graph::edge_count(&places),
            "built town"
        );

        Ok(Self {
            name: layout.name,
            rows: layout.rows,
            columns: layout.columns,
            places,
            target,
            pet,
            players: Vec::new(),
            turn: 0,
        })
    }

    /// Adds a player standing in `start` and returns its identifier.
    ///
    /// A player equal to one that already joined is rejected.
    pub fn add_player(
        &mut self,
        name: impl Into<String>,
        kind: PlayerKind,
        carry_limit: u32,
        start: PlaceId,
    ) -> Result<PlayerId, ActionError> {
        if start.index() >= self.places.len() {
            return Err(ValidationError::UnknownPlace { index: start.get() }.into());
        }

        let id = PlayerId::new(self.players.len() as u32);
        let player = Player::new(id, name, kind, carry_limit, start)?;
        if self.players.contains(&player) {
            return Err(ActionError::DuplicatePlayer {
                name: player.name().to_owned(),
                kind,
            });
        }

        self.places[start.index()].enter(id);
        self.players.push(player);
        Ok(id)
    }

    /// Moves a player to a neighbor of its current place and returns the place it left.
    ///
    /// Nothing changes unless `destination` is listed among the current
    /// place's neighbors.
    pub fn move_player(
        &mut self,
        player: PlayerId,
        destination: PlaceId,
    ) -> Result<PlaceId, ActionError> {
        let from = self.player(player)?.place();
        if destination.index() >= self.places.len() {
            return Err(ActionError::UnknownPlace(destination));
        }

        let current = &self.places[from.index()];
        if !current.has_neighbor(destination) {
            return Err(ActionError::NotNeighbor {
                from: current.name().to_owned(),
                to: self.places[destination.index()].name().to_owned(),
            });
        }

        self.places[from.index()].leave(player);
        self.places[destination.index()].enter(player);
        self.player_mut(player)?.place = destination;
        Ok(from)
    }

    /// Moves an item from the player's place into its inventory and returns that place.
    ///
    /// Fails without mutating either side when the player is full or the
    /// place holds no equal item.
    pub fn pick_up(&mut self, player: PlayerId, item: &Item) -> Result<PlaceId, ActionError> {
        let carrier = self.player(player)?;
        let place = carrier.place();
        if carrier.is_full() {
            return Err(ActionError::InventoryFull {
                limit: carrier.carry_limit(),
            });
        }

        let source = &mut self.places[place.index()];
        let taken = source
            .take_item(item)
            .ok_or_else(|| ActionError::ItemNotInPlace {
                item: item.name().to_owned(),
                place: source.name().to_owned(),
            })?;
        self.player_mut(player)?.items.push(taken);
        Ok(place)
    }

    /// Attacks the target with a carried weapon, or pokes it when `weapon` is `None`.
    ///
    /// The target must share the attacker's place and nobody else may stand
    /// there. A weapon is spent by the attack.
    pub fn attack(
        &mut self,
        player: PlayerId,
        weapon: Option<&Item>,
    ) -> Result<AttackOutcome, ActionError> {
        if self.target.is_defeated() {
            return Err(ActionError::TargetDefeated);
        }

        let attacker = self.player(player)?;
        let place = &self.places[attacker.place().index()];
        if self.target.place() != attacker.place() {
            return Err(ActionError::TargetNotPresent {
                place: place.name().to_owned(),
            });
        }
        if let Some(witness) = place
            .occupants()
            .iter()
            .find(|occupant| **occupant != player)
        {
            return Err(ActionError::Witnessed {
                witness: self.player(*witness)?.name().to_owned(),
            });
        }

        let amount = match weapon {
            Some(item) => {
                if !attacker.items().contains(item) {
                    return Err(ActionError::ItemNotCarried {
                        item: item.name().to_owned(),
                    });
                }
                item.damage()
            }
            None => POKE_DAMAGE,
        };

        let defeated = self.target.apply_damage(amount)?;
        if let Some(item) = weapon {
            let _ = self.player_mut(player)?.drop_carried(item);
        }

        Ok(AttackOutcome {
            amount,
            remaining: self.target.health(),
            defeated,
        })
    }

    /// Moves the target to the next place in load order.
    pub fn advance_target(&mut self) -> Result<(PlaceId, PlaceId), ActionError> {
        if self.target.is_defeated() {
            return Err(ActionError::TargetDefeated);
        }

        Ok(self.target.advance(self.places.len()))
    }

    /// Moves the pet to the next place in load order.
    pub fn advance_pet(&mut self) -> Result<(PlaceId, PlaceId), ActionError> {
        let count = self.places.len();
        let pet = self.pet.as_mut().ok_or(ActionError::NoPet)?;
        Ok(pet.advance(count))
    }

    /// Closes the current turn and returns the number of completed turns.
    pub fn end_turn(&mut self) -> u32 {
        self.turn = self.turn.saturating_add(1);
        self.turn
    }

    fn player(&self, player: PlayerId) -> Result<&Player, ActionError> {
        self.players
            .get(player.get() as usize)
            .ok_or(ActionError::UnknownPlayer(player))
    }

    fn player_mut(&mut self, player: PlayerId) -> Result<&mut Player, ActionError> {
        self.players
            .get_mut(player.get() as usize)
            .ok_or(ActionError::UnknownPlayer(player))
    }
}

/// Applies the provided command to the town, recording the resulting events.
///
/// A rejected command leaves the town untouched and records nothing.
pub fn apply(
    town: &mut Town,
    command: Command,
    out_events: &mut Vec<Event>,
) -> Result<(), ActionError> {
    debug!(?command, "applying command");
    let result = execute(town, command, out_events);
    if let Err(error) = &result {
        trace!(%error, "command rejected");
    }
    result
}

fn execute(
    town: &mut Town,
    command: Command,
    out_events: &mut Vec<Event>,
) -> Result<(), ActionError> {
    match command {
        Command::AddPlayer {
            name,
            kind,
            carry_limit,
            start,
        } => {
            let player = town.add_player(name, kind, carry_limit, start)?;
            out_events.push(Event::PlayerAdded {
                player,
                kind,
                place: start,
            });
        }
        Command::MovePlayer {
            player,
            destination,
        } => {
            let from = town.move_player(player, destination)?;
            out_events.push(Event::PlayerMoved {
                player,
                from,
                to: destination,
            });
        }
        Command::PickUpItem { player, item } => {
            let place = town.pick_up(player, &item)?;
            out_events.push(Event::ItemPickedUp {
                player,
                place,
                item,
            });
        }
        Command::Attack { player, weapon } => {
            let outcome = town.attack(player, weapon.as_ref())?;
            out_events.push(Event::TargetDamaged {
                player,
                amount: outcome.amount,
                remaining: outcome.remaining,
            });
            if outcome.defeated {
                out_events.push(Event::TargetDefeated { player });
            }
        }
        Command::Pass { player } => {
            let _ = town.player(player)?;
            out_events.push(Event::PlayerPassed { player });
        }
        Command::EndTurn => {
            let turn = town.end_turn();
            out_events.push(Event::TurnEnded { turn });
        }
        Command::AdvanceTarget => {
            let (from, to) = town.advance_target()?;
            out_events.push(Event::TargetMoved { from, to });
        }
        Command::AdvancePet => {
            let (from, to) = town.advance_pet()?;
            out_events.push(Event::PetMoved { from, to });
        }
    }

    Ok(())
}

/// Query functions that provide read-only access to the town state.
pub mod query {
    use manor_core::{ActionError, Item, PlaceId, PlayerId};

    use super::{Pet, Place, Player, Target, Town};

    /// Name of the town.
    #[must_use]
    pub fn town_name(town: &Town) -> &str {
        &town.name
    }

    /// Grid size as `(rows, columns)`.
    #[must_use]
    pub fn dimensions(town: &Town) -> (u32, u32) {
        (town.rows, town.columns)
    }

    /// Places in load order.
    #[must_use]
    pub fn places(town: &Town) -> &[Place] {
        &town.places
    }

    /// Looks up a place by identifier.
    #[must_use]
    pub fn place(town: &Town, place: PlaceId) -> Option<&Place> {
        town.places.get(place.index())
    }

    /// Finds a place by name, ignoring ASCII case.
    #[must_use]
    pub fn place_named(town: &Town, name: &str) -> Option<PlaceId> {
        town.places
            .iter()
            .position(|place| place.name().eq_ignore_ascii_case(name.trim()))
            .map(|index| PlaceId::new(index as u32))
    }

    /// The roaming target.
    #[must_use]
    pub fn target(town: &Town) -> &Target {
        &town.target
    }

    /// The roaming pet, if the town has one.
    #[must_use]
    pub fn pet(town: &Town) -> Option<&Pet> {
        town.pet.as_ref()
    }

    /// Players in the order they joined.
    #[must_use]
    pub fn players(town: &Town) -> &[Player] {
        &town.players
    }

    /// Looks up a player by identifier.
    #[must_use]
    pub fn player(town: &Town, player: PlayerId) -> Option<&Player> {
        town.players.get(player.get() as usize)
    }

    /// Number of turns completed so far.
    #[must_use]
    pub fn turn(town: &Town) -> u32 {
        town.turn
    }

    /// What a player can see from where it stands.
    pub fn look_around(town: &Town, player: PlayerId) -> Result<LookAround, ActionError> {
        let place = town.player(player)?.place();
        let pet_place = town.pet.as_ref().map(Pet::place);
        let neighbors = town.places[place.index()]
            .neighbors()
            .iter()
            .map(|neighbor| NeighborView {
                id: *neighbor,
                name: town.places[neighbor.index()].name().to_owned(),
                contents: (pet_place != Some(*neighbor)).then(|| snapshot(town, *neighbor)),
            })
            .collect();

        Ok(LookAround {
            here: snapshot(town, place),
            neighbors,
        })
    }

    fn snapshot(town: &Town, place: PlaceId) -> PlaceSnapshot {
        let source = &town.places[place.index()];
        PlaceSnapshot {
            id: place,
            name: source.name().to_owned(),
            items: source.items().to_vec(),
            occupants: source
                .occupants()
                .iter()
                .filter_map(|occupant| town.players.get(occupant.get() as usize))
                .map(|occupant| occupant.name().to_owned())
                .collect(),
            has_target: town.target.place() == place,
            has_pet: town.pet.as_ref().map(Pet::place) == Some(place),
        }
    }

    /// A player's surroundings.
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct LookAround {
        /// The place the player stands in.
        pub here: PlaceSnapshot,
        /// Neighbors of that place, in load order.
        pub neighbors: Vec<NeighborView>,
    }

    /// A neighboring place as seen from next door.
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct NeighborView {
        /// Identifier of the neighbor.
        pub id: PlaceId,
        /// Name of the neighbor.
        pub name: String,
        /// Contents of the neighbor, `None` when the pet hides it.
        pub contents: Option<PlaceSnapshot>,
    }

    /// Immutable representation of a place used for display.
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct PlaceSnapshot {
        /// Identifier of the place.
        pub id: PlaceId,
        /// Name of the place.
        pub name: String,
        /// Items lying in the place.
        pub items: Vec<Item>,
        /// Names of the players standing in the place.
        pub occupants: Vec<String>,
        /// Whether the target is in the place.
        pub has_target: bool,
        /// Whether the pet is in the place.
        pub has_pet: bool,
    }
}
