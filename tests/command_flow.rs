// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end command flows through the controller.

use std::time::Duration;

use casectl::persistence::{LoadOutcome, PersistedState, StateStore};
use casectl::{
    CaseMode, Color, CommandError, Controller, ControllerConfig, LOAD_FAILED_NOTICE, LcdMode,
    PersistenceError, TracingTransport,
};
use tokio::time::sleep;

const FADE_PERIOD: Duration = CaseMode::FADE_PERIOD;

fn start_in(dir: &tempfile::TempDir) -> Controller {
    let config = ControllerConfig::new("test-port").with_data_file(dir.path().join("state.json"));
    Controller::start(config, TracingTransport::new("test-port"))
}

fn run_all(controller: &Controller, lines: &[&str]) {
    for line in lines {
        let outcome = controller.execute_line(line);
        assert_eq!(outcome.result, Ok(()), "{line}: {:?}", outcome.output);
    }
}

/// Sleeps until just after the `ticks`-th driver tick from now.
async fn pass_ticks(ticks: u32) {
    sleep(FADE_PERIOD / 2).await;
    for _ in 0..ticks {
        sleep(FADE_PERIOD).await;
    }
}

#[tokio::test(start_paused = true)]
async fn fade_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let controller = start_in(&dir);

    run_all(
        &controller,
        &["casemode fade", "fade add 255 0 0", "fade add 0 0 255"],
    );
    // The list was empty when fade started.
    assert_eq!(controller.state().snapshot().case_color, Color::BLACK);

    // Tick n shows cycle position n - 1; ten ticks per transition.
    pass_ticks(6).await;
    assert_eq!(
        controller.state().snapshot().case_color,
        Color::new(128, 0, 128)
    );

    sleep(FADE_PERIOD * 15).await;
    assert_eq!(
        controller.state().snapshot().case_color,
        Color::new(255, 0, 0)
    );

    controller.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn single_color_fade_is_constant() {
    let dir = tempfile::tempdir().unwrap();
    let controller = start_in(&dir);
    run_all(&controller, &["fade add cyan", "casemode fade"]);

    for _ in 0..25 {
        sleep(FADE_PERIOD).await;
        assert_eq!(
            controller.state().snapshot().case_color,
            Color::new(0, 255, 255)
        );
    }

    controller.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn mode_switch_takes_effect_immediately() {
    let dir = tempfile::tempdir().unwrap();
    let controller = start_in(&dir);
    run_all(
        &controller,
        &["fade add red", "fade add blue", "casemode fade", "casecolor green"],
    );
    pass_ticks(3).await;

    run_all(&controller, &["casemode static"]);
    assert_eq!(
        controller.state().snapshot().case_color,
        Color::new(0, 255, 0)
    );
    for _ in 0..10 {
        sleep(FADE_PERIOD).await;
        assert_eq!(
            controller.state().snapshot().case_color,
            Color::new(0, 255, 0)
        );
    }

    controller.shutdown().await;
}

#[tokio::test]
async fn state_survives_restart() {
    let dir = tempfile::tempdir().unwrap();

    let controller = start_in(&dir);
    run_all(
        &controller,
        &[
            "fade add 255 0 0",
            "fade add #0000ff",
            "fade ticks 25",
            "fade save Police",
            "casemode fade",
            "lcd color 0 128 255",
            "lcd text 0 Hello",
            "lcd mode clock",
        ],
    );
    let before = controller.state().read(|s| PersistedState::from(s));
    controller.shutdown().await;

    let controller = start_in(&dir);
    let after = controller.state().read(|s| PersistedState::from(s));
    assert_eq!(after, before);
    assert_eq!(controller.state().read(|s| s.lcd_mode()), LcdMode::Clock);
    assert_eq!(
        controller.state().read(|s| s.lcd_settings().color),
        Color::new(0, 128, 255)
    );
    assert_eq!(controller.state().read(|s| s.fade_colors().len()), 2);
    controller.shutdown().await;
}

#[tokio::test]
async fn incompatible_data_file_starts_from_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    std::fs::write(&path, r#"{"version": 0, "colors": [1, 2, 3]}"#).unwrap();

    let controller = start_in(&dir);
    assert!(matches!(
        controller.load_error(),
        Some(PersistenceError::IncompatibleSchema { found: Some(0), .. })
    ));
    assert_eq!(
        controller.state().read(|s| PersistedState::from(s)),
        PersistedState::default()
    );

    // The first successful command replaces the old file.
    run_all(&controller, &["fade add white"]);
    controller.shutdown().await;

    let LoadOutcome::Loaded(state) = StateStore::new(&path).load().unwrap() else {
        panic!("data file was not rewritten");
    };
    assert_eq!(state.fade_colors(), [Color::new(255, 255, 255)]);
}

#[tokio::test]
async fn failed_commands_report_errors() {
    let dir = tempfile::tempdir().unwrap();
    let controller = start_in(&dir);

    let outcome = controller.execute_line("sparkle");
    assert_eq!(
        outcome.result,
        Err(CommandError::UnknownCommand("sparkle".to_string()))
    );
    assert_eq!(
        outcome.output,
        ["That was not a valid command. Maybe try 'help'."]
    );

    let before = controller.state().read(Clone::clone);
    let outcome = controller.execute_line("fade add 10 20");
    assert!(matches!(
        outcome.result,
        Err(CommandError::MalformedArguments { ref command }) if command == "fade add"
    ));
    assert_eq!(controller.state().read(Clone::clone), before);

    controller.shutdown().await;
}

#[tokio::test]
async fn run_stops_on_stop_command() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    let controller = start_in(&dir);

    let input: &[u8] = b"fade add red\nFADELIST\nstop\nfade add blue\n";
    let mut output = Vec::new();
    controller.run(input, &mut output).await.unwrap();

    let printed = String::from_utf8(output).unwrap();
    assert!(printed.contains("0 - (255, 0, 0)"));
    assert!(printed.contains("Stopping."));
    assert!(!printed.contains("(0, 0, 255)"));

    let LoadOutcome::Loaded(state) = StateStore::new(&path).load().unwrap() else {
        panic!("final state was not saved");
    };
    assert_eq!(state.fade_colors(), [Color::new(255, 0, 0)]);
}

#[tokio::test]
async fn run_shuts_down_at_end_of_input() {
    let dir = tempfile::tempdir().unwrap();
    let controller = start_in(&dir);

    let input: &[u8] = b"casecolor 1 2 3\n\nstatus\n";
    let mut output = Vec::new();
    controller.run(input, &mut output).await.unwrap();

    let printed = String::from_utf8(output).unwrap();
    assert!(printed.starts_with("> "));
    assert!(printed.contains("Case color set to (1, 2, 3)."));
    assert!(printed.contains("Case mode: off (every 1000 ms)"));
}

#[tokio::test]
async fn run_reports_unloadable_data_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("state.json"), "{ not json").unwrap();
    let controller = start_in(&dir);

    let input: &[u8] = b"stop\n";
    let mut output = Vec::new();
    controller.run(input, &mut output).await.unwrap();

    let printed = String::from_utf8(output).unwrap();
    assert!(printed.starts_with(LOAD_FAILED_NOTICE));
    assert!(printed.contains("Stopping."));
}

#[tokio::test]
async fn fresh_start_prints_no_load_notice() {
    let dir = tempfile::tempdir().unwrap();
    let controller = start_in(&dir);
    assert!(controller.load_error().is_none());

    let input: &[u8] = b"stop\n";
    let mut output = Vec::new();
    controller.run(input, &mut output).await.unwrap();
    assert!(!String::from_utf8(output).unwrap().contains(LOAD_FAILED_NOTICE));
}
