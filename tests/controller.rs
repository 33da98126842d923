use fireside_timer::visuals::CreatureAnimation;
use fireside_timer::{Command, ControlStates, TimeField, TimerController, TimerEvent};

fn controller_with(hours: &str, minutes: &str, seconds: &str) -> TimerController {
    let (mut controller, _) = TimerController::new();
    controller.handle(TimerEvent::InputChanged(TimeField::Hours, hours.to_string()));
    controller.handle(TimerEvent::InputChanged(TimeField::Minutes, minutes.to_string()));
    controller.handle(TimerEvent::InputChanged(TimeField::Seconds, seconds.to_string()));
    controller
}

fn last_display(commands: &[Command]) -> Option<&str> {
    commands.iter().rev().find_map(|c| match c {
        Command::SetDisplay(text) => Some(text.as_str()),
        _ => None,
    })
}

fn last_controls(commands: &[Command]) -> Option<ControlStates> {
    commands.iter().rev().find_map(|c| match c {
        Command::SetControls(controls) => Some(*controls),
        _ => None,
    })
}

fn creature_changes(commands: &[Command]) -> Vec<CreatureAnimation> {
    commands
        .iter()
        .filter_map(|c| match c {
            Command::SetCreature(animation) => Some(*animation),
            _ => None,
        })
        .collect()
}

#[test]
fn start_locks_inputs_and_installs_ticker() {
    let mut controller = controller_with("0", "1", "30");
    let commands = controller.handle(TimerEvent::Start);

    assert_eq!(controller.state().remaining_seconds, 90);
    assert_eq!(controller.state().initial_duration_seconds, 90);
    assert!(controller.state().running);
    assert!(!controller.state().paused);
    assert!(commands.contains(&Command::SetInputsEnabled(false)));
    assert!(commands.contains(&Command::StartTicker));
    assert_eq!(
        last_controls(&commands),
        Some(ControlStates {
            start_disabled: true,
            pause_disabled: false,
            reset_disabled: true,
        })
    );
}

#[test]
fn start_while_running_is_a_no_op() {
    let mut controller = controller_with("0", "0", "10");
    controller.handle(TimerEvent::Start);
    assert!(controller.handle(TimerEvent::Start).is_empty());
}

#[test]
fn five_second_countdown_completes() {
    let mut controller = controller_with("0", "0", "5");
    controller.handle(TimerEvent::Start);

    let mut commands = Vec::new();
    for _ in 0..5 {
        commands = controller.handle(TimerEvent::Tick);
    }
    assert_eq!(last_display(&commands), Some("00:00:00"));
    assert_eq!(controller.state().remaining_seconds, 0);
    // reset opens up as soon as the clock reads zero
    assert_eq!(last_controls(&commands).map(|c| c.reset_disabled), Some(false));

    let commands = controller.handle(TimerEvent::Tick);
    assert!(!controller.state().running);
    assert_eq!(last_display(&commands), Some("Time is Up!"));
    assert!(commands.contains(&Command::StopTicker));
    assert!(commands.contains(&Command::PlayChime));
    assert!(commands.contains(&Command::SetInputsEnabled(true)));
    assert!(commands.contains(&Command::SetFireOpacity(0.1)));
    assert_eq!(creature_changes(&commands), vec![CreatureAnimation::Idle]);
    assert_eq!(
        last_controls(&commands),
        Some(ControlStates {
            start_disabled: false,
            pause_disabled: true,
            reset_disabled: false,
        })
    );

    // the message stays until reset; stray ticks change nothing
    assert!(controller.handle(TimerEvent::Tick).is_empty());
}

#[test]
fn pause_and_resume_keep_remaining_time() {
    let mut controller = controller_with("0", "1", "0");
    controller.handle(TimerEvent::Start);
    for _ in 0..30 {
        controller.handle(TimerEvent::Tick);
    }
    assert_eq!(controller.state().remaining_seconds, 30);

    let commands = controller.handle(TimerEvent::Pause);
    assert!(controller.state().paused);
    assert!(!controller.state().running);
    assert_eq!(controller.state().remaining_seconds, 30);
    assert!(commands.contains(&Command::StopTicker));
    assert!(commands.contains(&Command::SetInputsEnabled(true)));
    assert_eq!(controller.creature(), CreatureAnimation::Idle);
    assert_eq!(
        last_controls(&commands),
        Some(ControlStates {
            start_disabled: false,
            pause_disabled: true,
            reset_disabled: false,
        })
    );

    // edits while paused do not affect the resumed run
    controller.handle(TimerEvent::InputChanged(TimeField::Minutes, "5".to_string()));
    let commands = controller.handle(TimerEvent::Start);
    assert!(commands.contains(&Command::StartTicker));
    assert_eq!(controller.state().remaining_seconds, 30);
    assert_eq!(controller.state().initial_duration_seconds, 60);
    assert_eq!(controller.creature(), CreatureAnimation::Walking);

    let commands = controller.handle(TimerEvent::Tick);
    assert_eq!(controller.state().remaining_seconds, 29);
    assert_eq!(last_display(&commands), Some("00:00:29"));
}

#[test]
fn pause_when_idle_does_nothing() {
    let (mut controller, _) = TimerController::new();
    assert!(controller.handle(TimerEvent::Pause).is_empty());
    assert!(!controller.state().paused);
}

#[test]
fn reset_restores_everything() {
    let mut controller = controller_with("1", "2", "3");
    controller.handle(TimerEvent::Start);
    controller.handle(TimerEvent::Tick);
    controller.handle(TimerEvent::Pause);

    let commands = controller.handle(TimerEvent::Reset);
    let state = controller.state();
    assert!(!state.running);
    assert!(!state.paused);
    assert_eq!(state.remaining_seconds, 0);
    assert_eq!(state.initial_duration_seconds, 0);
    assert_eq!(controller.inputs().get(TimeField::Hours), "0");
    assert_eq!(controller.inputs().get(TimeField::Minutes), "0");
    assert_eq!(controller.inputs().get(TimeField::Seconds), "0");
    assert!(controller.inputs().enabled);

    assert!(commands.contains(&Command::SetInputs {
        hours: "0".to_string(),
        minutes: "0".to_string(),
        seconds: "0".to_string(),
    }));
    assert_eq!(last_display(&commands), Some("00:00:00"));
    assert!(commands.contains(&Command::StopTicker));
    assert!(commands.contains(&Command::StopChime));
    assert!(commands.contains(&Command::SetFireOpacity(1.0)));
    assert_eq!(creature_changes(&commands), vec![CreatureAnimation::Walking]);
    assert_eq!(
        last_controls(&commands),
        Some(ControlStates {
            start_disabled: false,
            pause_disabled: true,
            reset_disabled: false,
        })
    );
}

#[test]
fn empty_duration_shows_message_then_reverts() {
    let (mut controller, _) = TimerController::new();
    let commands = controller.handle(TimerEvent::Start);
    assert_eq!(last_display(&commands), Some("Set a Time!"));
    assert!(commands.contains(&Command::ScheduleRevert));
    assert!(!commands.contains(&Command::StartTicker));
    assert!(!controller.state().running);

    let commands = controller.handle(TimerEvent::RevertInvalidInput);
    assert_eq!(last_display(&commands), Some("00:00:00"));
    assert!(commands.contains(&Command::StopChime));
    assert!(!controller.state().revert_pending);
}

#[test]
fn out_of_range_input_counts_as_no_time() {
    let mut controller = controller_with("0", "75", "0");
    let commands = controller.handle(TimerEvent::Start);
    assert_eq!(last_display(&commands), Some("Set a Time!"));
    assert!(!controller.state().running);

    let mut controller = controller_with("-1", "10", "0");
    let commands = controller.handle(TimerEvent::Start);
    assert_eq!(last_display(&commands), Some("Set a Time!"));
}

#[test]
fn overflowing_duration_counts_as_no_time() {
    let mut controller = controller_with("5124095576030431", "1", "0");
    let commands = controller.handle(TimerEvent::Start);
    assert_eq!(last_display(&commands), Some("Set a Time!"));
    assert!(!controller.state().running);

    let mut controller = controller_with("99999999999999999999", "5", "0");
    let commands = controller.handle(TimerEvent::Start);
    assert_eq!(last_display(&commands), Some("Set a Time!"));
    assert!(!controller.state().running);
}

#[test]
fn valid_start_cancels_pending_revert() {
    let (mut controller, _) = TimerController::new();
    controller.handle(TimerEvent::Start);
    assert!(controller.state().revert_pending);

    controller.handle(TimerEvent::InputChanged(TimeField::Seconds, "20".to_string()));
    let commands = controller.handle(TimerEvent::Start);
    assert!(commands.contains(&Command::CancelRevert));
    assert!(controller.state().running);

    // a revert that slipped through anyway must not clobber the run
    assert!(controller.handle(TimerEvent::RevertInvalidInput).is_empty());
    assert!(controller.state().running);
    assert_eq!(controller.state().remaining_seconds, 20);
}

#[test]
fn creature_walks_sits_then_walks() {
    let mut controller = controller_with("0", "0", "9");
    controller.handle(TimerEvent::Start);

    let mut seen = Vec::new();
    for elapsed in 1..=9 {
        let commands = controller.handle(TimerEvent::Tick);
        for animation in creature_changes(&commands) {
            seen.push((elapsed, animation));
        }
    }
    assert_eq!(
        seen,
        vec![
            (3, CreatureAnimation::Sitting),
            (6, CreatureAnimation::Walking),
        ]
    );
}

#[test]
fn creature_thresholds_are_real_valued() {
    // 10 s: segment 3.33.., so sitting starts at elapsed 4 and ends at 7
    let mut controller = controller_with("0", "0", "10");
    controller.handle(TimerEvent::Start);

    let mut seen = Vec::new();
    for elapsed in 1..=10 {
        let commands = controller.handle(TimerEvent::Tick);
        for animation in creature_changes(&commands) {
            seen.push((elapsed, animation));
        }
    }
    assert_eq!(
        seen,
        vec![
            (4, CreatureAnimation::Sitting),
            (7, CreatureAnimation::Walking),
        ]
    );
}

#[test]
fn fire_dims_monotonically_to_embers() {
    let mut controller = controller_with("0", "0", "40");
    controller.handle(TimerEvent::Start);

    let mut last = 1.0;
    for _ in 0..40 {
        let commands = controller.handle(TimerEvent::Tick);
        let opacity = commands
            .iter()
            .find_map(|c| match c {
                Command::SetFireOpacity(o) => Some(*o),
                _ => None,
            })
            .expect("every tick sets the fire");
        assert!(opacity <= last);
        assert!(opacity >= 0.1);
        last = opacity;
    }
    assert_eq!(last, 0.1);
}
