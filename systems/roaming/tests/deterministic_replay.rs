use manor_core::{
    Command, Event, Item, ItemPlacement, PlaceId, PlaceLayout, PlayerId, PlayerKind, Rect,
    TargetLayout, TownLayout,
};
use manor_system_roaming::Roaming;
use manor_system_turns::{Config, Outcome, Turns};
use manor_world::{self as world, query, Town};

#[test]
fn replaying_the_same_script_yields_the_same_game() {
    let first = replay(&script());
    let second = replay(&script());

    assert_eq!(first, second, "replay diverged between runs");
    assert_eq!(first.outcome, Some(Outcome::Won { player: ADA }));
    assert_eq!(first.turn, 7);
    assert_eq!(first.target_health, 0);
    assert_eq!(first.target_place, PlaceId::new(0));
    assert_eq!(first.pet_place, Some(PlaceId::new(1)));
    assert_eq!(
        first.rejected, 1,
        "the attack from the wrong place is rejected"
    );
}

const ADA: PlayerId = PlayerId::new(0);
const HAL: PlayerId = PlayerId::new(1);

#[derive(Debug, PartialEq, Eq)]
struct ReplayOutcome {
    events: Vec<Event>,
    rejected: usize,
    turn: u32,
    target_health: i32,
    target_place: PlaceId,
    pet_place: Option<PlaceId>,
    outcome: Option<Outcome>,
}

fn knife() -> Item {
    Item::new("Knife", 2).expect("valid item")
}

fn script() -> Vec<Command> {
    vec![
        Command::AddPlayer {
            name: "Ada".to_owned(),
            kind: PlayerKind::Human,
            carry_limit: 2,
            start: PlaceId::new(0),
        },
        Command::AddPlayer {
            name: "Hal".to_owned(),
            kind: PlayerKind::Computer,
            carry_limit: 2,
            start: PlaceId::new(2),
        },
        // Turn 1: the target starts in A with Ada.
        Command::PickUpItem {
            player: ADA,
            item: knife(),
        },
        Command::Pass { player: HAL },
        // Turn 3: the target is in C.
        Command::Attack {
            player: ADA,
            weapon: None,
        },
        Command::Pass { player: ADA },
        Command::Pass { player: HAL },
        Command::Pass { player: ADA },
        Command::Pass { player: HAL },
        // Turn 7: the target is back in A.
        Command::Attack {
            player: ADA,
            weapon: Some(knife()),
        },
    ]
}

fn town() -> Town {
    let places = [
        ("A", [0, 0, 1, 1]),
        ("B", [1, 1, 2, 2]),
        ("C", [5, 5, 6, 6]),
    ]
    .into_iter()
    .map(|(name, [row1, col1, row2, col2])| PlaceLayout {
        rect: Rect::new(row1, col1, row2, col2).expect("valid rect"),
        name: name.to_owned(),
    })
    .collect();

    Town::from_layout(TownLayout {
        name: "Manor".to_owned(),
        rows: 8,
        columns: 8,
        target: TargetLayout {
            name: "Doctor Lucky".to_owned(),
            health: 1,
        },
        pet: Some("Fortune the Cat".to_owned()),
        places,
        items: vec![ItemPlacement {
            place_index: 0,
            damage: 2,
            name: "Knife".to_owned(),
        }],
    })
    .expect("valid layout")
}

fn replay(commands: &[Command]) -> ReplayOutcome {
    let mut town = town();
    let mut turns = Turns::new(Config::new(10));
    let mut roaming = Roaming::new();
    let mut log = Vec::new();
    let mut rejected = 0;

    for command in commands {
        let mut events = Vec::new();
        if world::apply(&mut town, command.clone(), &mut events).is_err() {
            rejected += 1;
            continue;
        }

        while !events.is_empty() {
            let mut follow_ups = Vec::new();
            turns.handle(&events, &mut follow_ups);
            roaming.handle(&events, query::pet(&town).is_some(), &mut follow_ups);
            log.append(&mut events);

            for follow_up in follow_ups {
                world::apply(&mut town, follow_up, &mut events).expect("follow-up applies");
            }
        }
    }

    let target = query::target(&town);
    ReplayOutcome {
        events: log,
        rejected,
        turn: query::turn(&town),
        target_health: target.health(),
        target_place: target.place(),
        pet_place: query::pet(&town).map(|pet| pet.place()),
        outcome: turns.outcome(),
    }
}
