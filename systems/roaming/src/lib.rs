#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that moves the roaming characters once every turn.

use manor_core::{Command, Event};

/// Roaming system that queues advance commands whenever a turn ends.
#[derive(Debug, Default)]
pub struct Roaming {
    target_defeated: bool,
}

impl Roaming {
    /// Creates a new roaming system.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits `Command::AdvanceTarget` and, when `has_pet` holds,
    /// `Command::AdvancePet` for every `Event::TurnEnded`.
    ///
    /// The target stops moving once an `Event::TargetDefeated` has been seen.
    pub fn handle(&mut self, events: &[Event], has_pet: bool, out: &mut Vec<Command>) {
        for event in events {
            match event {
                Event::TargetDefeated { .. } => self.target_defeated = true,
                Event::TurnEnded { .. } => {
                    if !self.target_defeated {
                        out.push(Command::AdvanceTarget);
                    }
                    if has_pet {
                        out.push(Command::AdvancePet);
                    }
                }
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use manor_core::{PlaceId, PlayerId};

    #[test]
    fn quiet_without_turn_end() {
        let mut system = Roaming::new();
        let mut out = Vec::new();

        system.handle(
            &[
                Event::PlayerPassed {
                    player: PlayerId::new(0),
                },
                Event::TargetMoved {
                    from: PlaceId::new(0),
                    to: PlaceId::new(1),
                },
            ],
            true,
            &mut out,
        );

        assert!(out.is_empty());
    }

    #[test]
    fn turn_end_moves_target_then_pet() {
        let mut system = Roaming::new();
        let mut out = Vec::new();

        system.handle(&[Event::TurnEnded { turn: 1 }], true, &mut out);

        assert_eq!(out, vec![Command::AdvanceTarget, Command::AdvancePet]);
    }

    #[test]
    fn pet_command_requires_pet() {
        let mut system = Roaming::new();
        let mut out = Vec::new();

        system.handle(&[Event::TurnEnded { turn: 3 }], false, &mut out);

        assert_eq!(out, vec![Command::AdvanceTarget]);
    }

    #[test]
    fn defeated_target_stays_put() {
        let mut system = Roaming::new();
        let mut out = Vec::new();

        system.handle(
            &[
                Event::TargetDefeated {
                    player: PlayerId::new(1),
                },
                Event::TurnEnded { turn: 4 },
            ],
            true,
            &mut out,
        );
        system.handle(&[Event::TurnEnded { turn: 5 }], true, &mut out);

        assert_eq!(out, vec![Command::AdvancePet, Command::AdvancePet]);
    }
}
