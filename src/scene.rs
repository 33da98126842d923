//! What the page currently shows.
//!
//! The host folds the controller's display commands into a [`Scene`] and
//! renders it. Scheduling and audio commands are not part of the scene and
//! are left to the host.

use crate::visuals::CreatureAnimation;
use crate::{format_time, Command, ControlStates, TimeInputs, TimerState};

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub display: String,
    pub inputs: TimeInputs,
    pub controls: ControlStates,
    pub fire_opacity: f64,
    pub creature: CreatureAnimation,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            display: format_time(0),
            inputs: TimeInputs::default(),
            controls: TimerState::default().controls(),
            fire_opacity: 1.0,
            creature: CreatureAnimation::default(),
        }
    }
}

impl Scene {
    /// Apply a display command. Returns false for commands the scene does
    /// not own.
    pub fn apply(&mut self, command: &Command) -> bool {
        match command {
            Command::SetDisplay(text) => self.display = text.clone(),
            Command::SetInputs {
                hours,
                minutes,
                seconds,
            } => {
                self.inputs.hours = hours.clone();
                self.inputs.minutes = minutes.clone();
                self.inputs.seconds = seconds.clone();
            }
            Command::SetInputsEnabled(enabled) => self.inputs.enabled = *enabled,
            Command::SetControls(controls) => self.controls = *controls,
            Command::SetFireOpacity(opacity) => self.fire_opacity = *opacity,
            Command::SetCreature(animation) => self.creature = *animation,
            _ => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{TimeField, TimerController, TimerEvent};

    fn drive(scene: &mut Scene, commands: Vec<Command>) {
        for command in &commands {
            scene.apply(command);
        }
    }

    #[test]
    fn scene_follows_a_run() {
        let (mut controller, commands) = TimerController::new();
        let mut scene = Scene::default();
        drive(&mut scene, commands);
        assert_eq!(scene, Scene::default());

        controller.handle(TimerEvent::InputChanged(TimeField::Seconds, "3".to_string()));
        drive(&mut scene, controller.handle(TimerEvent::Start));
        assert!(!scene.inputs.enabled);
        assert!(scene.controls.start_disabled);

        drive(&mut scene, controller.handle(TimerEvent::Tick));
        assert_eq!(scene.display, "00:00:02");
        assert!(scene.fire_opacity < 1.0);

        drive(&mut scene, controller.handle(TimerEvent::Pause));
        assert_eq!(scene.creature, CreatureAnimation::Idle);
        assert!(scene.inputs.enabled);
    }

    #[test]
    fn scheduling_commands_are_not_scene_commands() {
        let mut scene = Scene::default();
        assert!(!scene.apply(&Command::StartTicker));
        assert!(!scene.apply(&Command::PlayChime));
        assert!(scene.apply(&Command::SetFireOpacity(0.5)));
        assert_eq!(scene.fire_opacity, 0.5);
    }
}
