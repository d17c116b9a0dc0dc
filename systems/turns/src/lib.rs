#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure turn-order system that closes turns after every player action.

use manor_core::{Command, Event, PlayerId, PlayerKind};

/// Configuration parameters required to construct the turn system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    max_turns: u32,
}

impl Config {
    /// Creates a configuration that ends the game after `max_turns` turns.
    #[must_use]
    pub const fn new(max_turns: u32) -> Self {
        Self { max_turns }
    }
}

/// How a finished game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The player's attack defeated the target.
    Won {
        /// Winning player.
        player: PlayerId,
    },
    /// The turn budget ran out with the target still standing.
    TurnsExhausted,
}

/// Round-robin turn order over the players in the order they joined.
#[derive(Debug)]
pub struct Turns {
    max_turns: u32,
    order: Vec<(PlayerId, PlayerKind)>,
    cursor: usize,
    completed: u32,
    winner: Option<PlayerId>,
}

impl Turns {
    /// Creates a new turn system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            max_turns: config.max_turns,
            order: Vec::new(),
            cursor: 0,
            completed: 0,
            winner: None,
        }
    }

    /// Consumes town events and emits `Command::EndTurn` after the current
    /// player's action.
    ///
    /// Actions by players whose turn it is not are ignored, as is everything
    /// once the game is over.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Command>) {
        for event in events {
            match event {
                Event::PlayerAdded { player, kind, .. } => self.order.push((*player, *kind)),
                Event::TargetDefeated { player } => self.winner = Some(*player),
                Event::TurnEnded { turn } => self.completed = *turn,
                _ => {}
            }

            if !event.is_player_action() || actor(event) != self.current() {
                continue;
            }

            if self.completed >= self.max_turns {
                continue;
            }

            out.push(Command::EndTurn);
            self.cursor = (self.cursor + 1) % self.order.len();
        }
    }

    /// Player whose turn it is, if anyone joined.
    #[must_use]
    pub fn current(&self) -> Option<PlayerId> {
        self.order.get(self.cursor).map(|(player, _)| *player)
    }

    /// Reports whether the current player is computer-controlled.
    #[must_use]
    pub fn is_computer_turn(&self) -> bool {
        matches!(self.order.get(self.cursor), Some((_, PlayerKind::Computer)))
    }

    /// Reports whether `player` may act now.
    #[must_use]
    pub fn may_act(&self, player: PlayerId) -> bool {
        self.outcome().is_none() && self.current() == Some(player)
    }

    /// Number of turns completed so far.
    #[must_use]
    pub const fn completed(&self) -> u32 {
        self.completed
    }

    /// Turns left before the budget runs out.
    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.max_turns.saturating_sub(self.completed)
    }

    /// How the game ended, or `None` while it is still running.
    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        if let Some(player) = self.winner {
            return Some(Outcome::Won { player });
        }

        (self.completed >= self.max_turns).then_some(Outcome::TurnsExhausted)
    }
}

fn actor(event: &Event) -> Option<PlayerId> {
    match event {
        Event::PlayerMoved { player, .. }
        | Event::ItemPickedUp { player, .. }
        | Event::TargetDamaged { player, .. }
        | Event::PlayerPassed { player } => Some(*player),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use manor_core::PlaceId;

    fn added(id: u32, kind: PlayerKind) -> Event {
        Event::PlayerAdded {
            player: PlayerId::new(id),
            kind,
            place: PlaceId::new(0),
        }
    }

    fn passed(id: u32) -> Event {
        Event::PlayerPassed {
            player: PlayerId::new(id),
        }
    }

    #[test]
    fn empty_order_has_no_current_player() {
        let turns = Turns::new(Config::new(3));
        assert_eq!(turns.current(), None);
        assert!(!turns.is_computer_turn());
    }

    #[test]
    fn players_rotate_in_join_order() {
        let mut turns = Turns::new(Config::new(10));
        let mut out = Vec::new();
        turns.handle(
            &[added(0, PlayerKind::Human), added(1, PlayerKind::Computer)],
            &mut out,
        );
        assert_eq!(turns.current(), Some(PlayerId::new(0)));
        assert!(!turns.is_computer_turn());

        turns.handle(&[passed(0)], &mut out);
        assert_eq!(turns.current(), Some(PlayerId::new(1)));
        assert!(turns.is_computer_turn());

        turns.handle(&[passed(1)], &mut out);
        assert_eq!(turns.current(), Some(PlayerId::new(0)));
        assert_eq!(out, vec![Command::EndTurn, Command::EndTurn]);
    }

    #[test]
    fn out_of_turn_actions_are_ignored() {
        let mut turns = Turns::new(Config::new(10));
        let mut out = Vec::new();
        turns.handle(
            &[added(0, PlayerKind::Human), added(1, PlayerKind::Human)],
            &mut out,
        );

        turns.handle(&[passed(1)], &mut out);

        assert!(out.is_empty());
        assert!(turns.may_act(PlayerId::new(0)));
        assert!(!turns.may_act(PlayerId::new(1)));
    }

    #[test]
    fn budget_exhaustion_finishes_the_game() {
        let mut turns = Turns::new(Config::new(2));
        let mut out = Vec::new();
        turns.handle(&[added(0, PlayerKind::Human)], &mut out);
        turns.handle(&[passed(0), Event::TurnEnded { turn: 1 }], &mut out);
        assert_eq!(turns.outcome(), None);
        assert_eq!(turns.remaining(), 1);

        turns.handle(&[passed(0), Event::TurnEnded { turn: 2 }], &mut out);
        assert_eq!(turns.outcome(), Some(Outcome::TurnsExhausted));
        assert!(!turns.may_act(PlayerId::new(0)));

        turns.handle(&[passed(0)], &mut out);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn defeat_takes_precedence_over_budget() {
        let mut turns = Turns::new(Config::new(1));
        let mut out = Vec::new();
        turns.handle(&[added(0, PlayerKind::Human)], &mut out);
        turns.handle(
            &[
                Event::TargetDamaged {
                    player: PlayerId::new(0),
                    amount: 4,
                    remaining: 0,
                },
                Event::TargetDefeated {
                    player: PlayerId::new(0),
                },
                Event::TurnEnded { turn: 1 },
            ],
            &mut out,
        );

        assert_eq!(
            turns.outcome(),
            Some(Outcome::Won {
                player: PlayerId::new(0)
            })
        );
        assert_eq!(turns.completed(), 1);
    }
}
