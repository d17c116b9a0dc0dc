//! Console session that drives a town one turn at a time.

use std::io::{BufRead, Write};

use anyhow::{bail, Context, Result};
use manor_core::{ActionError, Command, Event, Item, PlaceId, PlayerId, PlayerKind, WELCOME_BANNER};
use manor_system_roaming::Roaming;
use manor_system_turns::{Config, Outcome, Turns};
use manor_world::{self as world, query, query::LookAround, Pet, Town};
use tracing::warn;

const HELP: &str = "\
Commands:
  look            describe this place and its neighbors
  info            show your inventory
  where           show where the target is
  move <place>    walk to a neighboring place
  pick <item>     pick up an item lying here
  attack [item]   attack the target with a carried item, or poke it
  pass            do nothing this turn
  help            show this list
  quit            leave the game";

/// A running game: the town plus the systems reacting to it.
pub(crate) struct Session {
    town: Town,
    roaming: Roaming,
    turns: Turns,
    carry_limit: u32,
}

impl Session {
    pub(crate) fn new(town: Town, max_turns: u32, carry_limit: u32) -> Self {
        Self {
            town,
            roaming: Roaming::new(),
            turns: Turns::new(Config::new(max_turns)),
            carry_limit,
        }
    }

    pub(crate) fn town(&self) -> &Town {
        &self.town
    }

    /// Adds a player with the session's carry limit.
    pub(crate) fn join(&mut self, name: &str, kind: PlayerKind, start: PlaceId) -> Result<PlayerId> {
        let events = self.submit(Command::AddPlayer {
            name: name.to_owned(),
            kind,
            carry_limit: self.carry_limit,
            start,
        })?;

        events
            .iter()
            .find_map(|event| match event {
                Event::PlayerAdded { player, .. } => Some(*player),
                _ => None,
            })
            .with_context(|| format!("player `{name}` was not added"))
    }

    /// Plays until the game ends, the input runs dry, or a player quits.
    ///
    /// Returns the outcome when the game reached one.
    pub(crate) fn run<R: BufRead, W: Write>(
        &mut self,
        mut input: R,
        mut output: W,
    ) -> Result<Option<Outcome>> {
        writeln!(output, "{WELCOME_BANNER}")?;
        writeln!(
            output,
            "{} has {} places. {} starts in {}.",
            query::town_name(&self.town),
            query::places(&self.town).len(),
            query::target(&self.town).name(),
            self.place_name(query::target(&self.town).place()),
        )?;

        loop {
            if let Some(outcome) = self.turns.outcome() {
                self.announce(outcome, &mut output)?;
                return Ok(Some(outcome));
            }

            let Some(player) = self.turns.current() else {
                bail!("no players have joined");
            };

            if self.turns.is_computer_turn() {
                let events = self.submit(Command::Pass { player })?;
                self.narrate(&events, &mut output)?;
                continue;
            }

            self.prompt(player, &mut output)?;
            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                writeln!(output)?;
                return Ok(None);
            }

            let Some(action) = Action::parse(&line) else {
                writeln!(output, "Unknown command, type `help` for a list.")?;
                continue;
            };

            let command = match action {
                Action::Quit => return Ok(None),
                Action::Help => {
                    writeln!(output, "{HELP}")?;
                    continue;
                }
                Action::Look => {
                    let view = query::look_around(&self.town, player)?;
                    self.describe_look(&view, &mut output)?;
                    continue;
                }
                Action::Info => {
                    self.describe_player(player, &mut output)?;
                    continue;
                }
                Action::Where => {
                    self.describe_roamers(&mut output)?;
                    continue;
                }
                Action::Pass => Command::Pass { player },
                Action::Move(place) => match query::place_named(&self.town, &place) {
                    Some(destination) => Command::MovePlayer {
                        player,
                        destination,
                    },
                    None => {
                        writeln!(output, "There is no place called `{place}`.")?;
                        continue;
                    }
                },
                Action::Pick(name) => match self.item_here(player, &name) {
                    Some(item) => Command::PickUpItem { player, item },
                    None => {
                        writeln!(output, "There is no `{name}` here.")?;
                        continue;
                    }
                },
                Action::Attack(None) => Command::Attack {
                    player,
                    weapon: None,
                },
                Action::Attack(Some(name)) => match self.item_carried(player, &name) {
                    Some(item) => Command::Attack {
                        player,
                        weapon: Some(item),
                    },
                    None => {
                        writeln!(output, "You are not carrying `{name}`.")?;
                        continue;
                    }
                },
            };

            match self.submit(command) {
                Ok(events) => self.narrate(&events, &mut output)?,
                Err(error) => writeln!(output, "{error}")?,
            }
        }
    }

    /// Applies a command and feeds the resulting events through the systems
    /// until they stop issuing follow-up commands.
    fn submit(&mut self, command: Command) -> Result<Vec<Event>, ActionError> {
        let mut recorded = Vec::new();
        let mut pending = Vec::new();
        world::apply(&mut self.town, command, &mut pending)?;

        while !pending.is_empty() {
            let mut commands = Vec::new();
            self.turns.handle(&pending, &mut commands);
            self.roaming
                .handle(&pending, query::pet(&self.town).is_some(), &mut commands);
            recorded.append(&mut pending);

            for command in commands {
                if let Err(error) = world::apply(&mut self.town, command, &mut pending) {
                    warn!(%error, "follow-up command rejected");
                }
            }
        }

        Ok(recorded)
    }

    fn prompt<W: Write>(&self, player: PlayerId, output: &mut W) -> Result<()> {
        let completed = self.turns.completed();
        let total = completed + self.turns.remaining();
        let place = query::player(&self.town, player).map_or(PlaceId::new(0), |p| p.place());
        write!(
            output,
            "[turn {} of {total}] {} in {}> ",
            completed + 1,
            self.player_name(player),
            self.place_name(place),
        )?;
        output.flush()?;
        Ok(())
    }

    fn narrate<W: Write>(&self, events: &[Event], output: &mut W) -> Result<()> {
        let target = query::target(&self.town).name();
        for event in events {
            match event {
                Event::PlayerMoved { player, to, .. } => writeln!(
                    output,
                    "{} moves to {}.",
                    self.player_name(*player),
                    self.place_name(*to)
                )?,
                Event::ItemPickedUp { player, item, .. } => {
                    writeln!(output, "{} picks up {item}.", self.player_name(*player))?;
                }
                Event::TargetDamaged {
                    player,
                    amount,
                    remaining,
                } => writeln!(
                    output,
                    "{} hits {target} for {amount}, {remaining} health left.",
                    self.player_name(*player)
                )?,
                Event::PlayerPassed { player } => {
                    writeln!(output, "{} waits.", self.player_name(*player))?;
                }
                Event::TargetMoved { to, .. } => {
                    writeln!(output, "{target} wanders into {}.", self.place_name(*to))?;
                }
                Event::PetMoved { to, .. } => {
                    if let Some(pet) = query::pet(&self.town) {
                        writeln!(output, "{} slinks into {}.", pet.name(), self.place_name(*to))?;
                    }
                }
                Event::PlayerAdded { .. } | Event::TargetDefeated { .. } | Event::TurnEnded { .. } => {}
            }
        }
        Ok(())
    }

    fn announce<W: Write>(&self, outcome: Outcome, output: &mut W) -> Result<()> {
        let target = query::target(&self.town).name();
        match outcome {
            Outcome::Won { player } => {
                let name = self.player_name(player);
                writeln!(output, "{name} defeated {target}. {name} wins!")?;
            }
            Outcome::TurnsExhausted => writeln!(
                output,
                "{target} escaped after {} turns. Nobody wins.",
                self.turns.completed()
            )?,
        }
        Ok(())
    }

    fn describe_look<W: Write>(&self, view: &LookAround, output: &mut W) -> Result<()> {
        let target = query::target(&self.town).name();
        let pet = query::pet(&self.town).map_or("", Pet::name);

        writeln!(output, "You are in {}.", view.here.name)?;
        writeln!(output, "  Items: {}", list_items(&view.here.items))?;
        writeln!(output, "  Players: {}", list_names(&view.here.occupants))?;
        if view.here.has_target {
            writeln!(output, "  {target} is here.")?;
        }
        if view.here.has_pet {
            writeln!(output, "  {pet} is here.")?;
        }

        if view.neighbors.is_empty() {
            writeln!(output, "There is no way out of here.")?;
            return Ok(());
        }

        writeln!(output, "Neighbors:")?;
        for neighbor in &view.neighbors {
            let Some(contents) = &neighbor.contents else {
                writeln!(output, "  {}: hidden by {pet}", neighbor.name)?;
                continue;
            };
            let mut line = format!(
                "  {}: items {}; players {}",
                neighbor.name,
                list_items(&contents.items),
                list_names(&contents.occupants)
            );
            if contents.has_target {
                line.push_str(&format!("; {target} is there"));
            }
            writeln!(output, "{line}")?;
        }
        Ok(())
    }

    fn describe_player<W: Write>(&self, player: PlayerId, output: &mut W) -> Result<()> {
        let Some(player) = query::player(&self.town, player) else {
            bail!("player {} does not exist", player.get());
        };
        writeln!(
            output,
            "{} ({}) is in {}, carrying {} of {}: {}",
            player.name(),
            player.kind(),
            self.place_name(player.place()),
            player.items().len(),
            player.carry_limit(),
            list_items(player.items()),
        )?;
        Ok(())
    }

    fn describe_roamers<W: Write>(&self, output: &mut W) -> Result<()> {
        let target = query::target(&self.town);
        writeln!(
            output,
            "{} ({} health) is in {}.",
            target.name(),
            target.health(),
            self.place_name(target.place())
        )?;
        if let Some(pet) = query::pet(&self.town) {
            writeln!(output, "{} is in {}.", pet.name(), self.place_name(pet.place()))?;
        }
        Ok(())
    }

    fn item_here(&self, player: PlayerId, name: &str) -> Option<Item> {
        let place = query::player(&self.town, player)?.place();
        query::place(&self.town, place)?
            .items()
            .iter()
            .find(|item| item.name().eq_ignore_ascii_case(name))
            .cloned()
    }

    fn item_carried(&self, player: PlayerId, name: &str) -> Option<Item> {
        query::player(&self.town, player)?
            .items()
            .iter()
            .find(|item| item.name().eq_ignore_ascii_case(name))
            .cloned()
    }

    fn player_name(&self, player: PlayerId) -> &str {
        query::player(&self.town, player).map_or("someone", |player| player.name())
    }

    fn place_name(&self, place: PlaceId) -> &str {
        query::place(&self.town, place).map_or("nowhere", |place| place.name())
    }
}

/// One line of console input.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Action {
    Look,
    Info,
    Where,
    Move(String),
    Pick(String),
    Attack(Option<String>),
    Pass,
    Help,
    Quit,
}

impl Action {
    fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        let (verb, argument) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(verb, argument)| (verb, argument.trim()));

        match (verb.to_ascii_lowercase().as_str(), argument) {
            ("look", "") => Some(Self::Look),
            ("info", "") => Some(Self::Info),
            ("where", "") => Some(Self::Where),
            ("move", place) if !place.is_empty() => Some(Self::Move(place.to_owned())),
            ("pick", item) if !item.is_empty() => Some(Self::Pick(item.to_owned())),
            ("attack", "") => Some(Self::Attack(None)),
            ("attack", item) => Some(Self::Attack(Some(item.to_owned()))),
            ("pass", "") => Some(Self::Pass),
            ("help", "") => Some(Self::Help),
            ("quit" | "exit", "") => Some(Self::Quit),
            _ => None,
        }
    }
}

fn list_items(items: &[Item]) -> String {
    if items.is_empty() {
        return "nothing".to_owned();
    }
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn list_names(names: &[String]) -> String {
    if names.is_empty() {
        return "nobody".to_owned();
    }
    names.join(", ")
}
