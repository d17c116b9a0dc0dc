use std::{
    io::Write,
    path::PathBuf,
    process::{Command, Output, Stdio},
};

fn manifest_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(relative)
}

fn run_manor(args: &[&str], script: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_manor"))
        .args(args)
        .env("RUST_LOG", "off")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to launch manor binary");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(script.as_bytes())
        .expect("failed to write script");

    child.wait_with_output().expect("failed to wait for manor")
}

#[test]
fn sample_town_plays_until_the_target_escapes() {
    let town = manifest_path("towns/mansion.txt");
    let config = manifest_path("manor.toml");
    let output = run_manor(
        &[
            town.to_str().expect("utf-8 path"),
            "--config",
            config.to_str().expect("utf-8 path"),
            "--max-turns",
            "3",
            "--human",
            "Ada@Armory",
            "--computer",
            "Hal@Library",
        ],
        "look\nmove Billiard Room\npick revolver\npass\n",
    );

    assert!(output.status.success(), "manor exits cleanly");
    let stdout = String::from_utf8(output.stdout).expect("utf-8 stdout");
    assert!(stdout.contains("Lucky Mansion has 8 places."));
    assert!(stdout.contains("You are in Armory."));
    assert!(stdout.contains("Ada moves to Billiard Room."));
    assert!(stdout.contains("Hal waits."));
    assert!(stdout.contains("There is no `revolver` here."));
    assert!(stdout.contains("Doctor Lucky escaped after 3 turns. Nobody wins."));
}

#[test]
fn missing_town_file_is_reported() {
    let output = run_manor(&["no-such-town.txt", "--human", "Ada"], "");

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).expect("utf-8 stderr");
    assert!(stderr.contains("failed to read town file"));
}

#[test]
fn a_game_needs_players() {
    let town = manifest_path("towns/mansion.txt");
    let output = run_manor(&[town.to_str().expect("utf-8 path")], "");

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).expect("utf-8 stderr");
    assert!(stderr.contains("add at least one player"));
}
