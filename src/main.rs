//! Main module for the Fireside Timer application using Yew.
//! Runs the controller's commands: scheduling, audio, storage and rendering.

use fireside_timer::{
    config::{INVALID_INPUT_REVERT_MS, TICK_INTERVAL_MS},
    preferences::{LocalStore, Preferences},
    scene::Scene,
    Command, TimeField, TimerController, TimerEvent,
};
use gloo_timers::callback::{Interval, Timeout};
use log::debug;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use yew::prelude::*;

mod components;
mod utils;

use components::{ChimeSelect, ClockDisplay, Controls, Creature, Fireplace, TimeInputFields};
use utils::{play_chime, stop_chime};

// ──────────────────────────────────────────────────────────────────────────────
// Timer runtime

/// Everything that outlives a single render: the controller, the scene it
/// draws, the chime preference and the scheduler handles.
struct Runtime {
    controller: TimerController,
    scene: Scene,
    preferences: Preferences,
    store: LocalStore,
    // Dropping either handle cancels the underlying browser timer.
    ticker: Option<Interval>,
    revert: Option<Timeout>,
}

impl Runtime {
    fn new() -> Self {
        let mut store = LocalStore;
        let preferences = Preferences::load(&mut store);
        let (controller, commands) = TimerController::new();

        // Nothing is scheduled or playing yet, so only the scene matters.
        let mut scene = Scene::default();
        for command in &commands {
            scene.apply(command);
        }

        Self {
            controller,
            scene,
            preferences,
            store,
            ticker: None,
            revert: None,
        }
    }
}

/// Handles a scheduler callback needs to feed events back in.
#[derive(Clone)]
struct Dispatcher {
    runtime: Weak<RefCell<Runtime>>,
    scene: UseStateHandle<Scene>,
    audio_ref: NodeRef,
}

impl Dispatcher {
    fn dispatch(&self, event: TimerEvent) {
        let Some(runtime) = self.runtime.upgrade() else {
            return;
        };

        let snapshot = {
            let mut rt = runtime.borrow_mut();
            if let TimerEvent::InputChanged(field, text) = &event {
                rt.scene.inputs.set(*field, text.clone());
            }
            let commands = rt.controller.handle(event);
            debug!("{} commands", commands.len());

            for command in commands {
                match command {
                    Command::StartTicker => {
                        let dispatcher = self.clone();
                        // The tick may stop (and drop) this very interval,
                        // so it runs on its own copy of the handles.
                        rt.ticker = Some(Interval::new(TICK_INTERVAL_MS, move || {
                            dispatcher.clone().dispatch(TimerEvent::Tick)
                        }));
                    }
                    Command::StopTicker => rt.ticker = None,
                    Command::ScheduleRevert => {
                        let dispatcher = self.clone();
                        rt.revert = Some(Timeout::new(INVALID_INPUT_REVERT_MS, move || {
                            dispatcher.dispatch(TimerEvent::RevertInvalidInput)
                        }));
                    }
                    Command::CancelRevert => rt.revert = None,
                    Command::PlayChime => play_chime(&self.audio_ref),
                    Command::StopChime => stop_chime(&self.audio_ref),
                    other => {
                        rt.scene.apply(&other);
                    }
                }
            }
            rt.scene.clone()
        };

        // Runtime borrow is released before the re-render reads it.
        self.scene.set(snapshot);
    }
}

// ──────────────────────────────────────────────────────────────────────────────

/// Primary application component wiring the timer runtime to the view.
#[function_component(App)]
fn app() -> Html {
    let runtime = use_mut_ref(Runtime::new);
    let scene = {
        let runtime = runtime.clone();
        use_state(move || runtime.borrow().scene.clone())
    };
    let chime = {
        let runtime = runtime.clone();
        use_state(move || runtime.borrow().preferences.chime().to_string())
    };
    let audio_ref = use_node_ref();

    let dispatcher = Dispatcher {
        runtime: Rc::downgrade(&runtime),
        scene: scene.clone(),
        audio_ref: audio_ref.clone(),
    };

    let on_event = |event: TimerEvent| {
        let dispatcher = dispatcher.clone();
        Callback::from(move |_: MouseEvent| dispatcher.dispatch(event.clone()))
    };
    let on_start = on_event(TimerEvent::Start);
    let on_pause = on_event(TimerEvent::Pause);
    let on_reset = on_event(TimerEvent::Reset);

    let on_input = {
        let dispatcher = dispatcher.clone();
        Callback::from(move |(field, text): (TimeField, String)| {
            dispatcher.dispatch(TimerEvent::InputChanged(field, text))
        })
    };

    let on_chime = {
        let runtime = runtime.clone();
        let chime_setter = chime.clone();
        Callback::from(move |selected: String| {
            {
                let mut rt = runtime.borrow_mut();
                let rt = &mut *rt;
                rt.preferences.select(&mut rt.store, &selected);
            }
            chime_setter.set(selected);
        })
    };

    let options = runtime.borrow().preferences.options();
    let chime = AttrValue::from((*chime).clone());

    html! {
        <div class="container">
            <h1>{ "Fireside Timer" }</h1>

            <div class="scene">
                <Fireplace opacity={scene.fire_opacity} />
                <Creature animation={scene.creature} />
            </div>

            <ClockDisplay text={scene.display.clone()} />
            <TimeInputFields inputs={scene.inputs.clone()} onchange={on_input} />
            <Controls
                controls={scene.controls}
                {on_start}
                {on_pause}
                {on_reset}
            />
            <ChimeSelect {options} selected={chime.clone()} onchange={on_chime} />
            <audio id="chimeSound" ref={audio_ref} src={chime} preload="auto" />
        </div>
    }
}

/// Entry point: installs the panic hook and console logger, then renders.
fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::new(log::Level::Info));
    yew::Renderer::<App>::new().render();
}
