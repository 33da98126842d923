//! Pure Yew view components for the timer page.
//!
//! These are stateless and render from props; all state lives in the
//! application component in `main.rs`.

use fireside_timer::visuals::CreatureAnimation;
use fireside_timer::{ControlStates, TimeField, TimeInputs};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

/// The big `HH:MM:SS` clock, or one of the override messages.
#[derive(Properties, PartialEq)]
pub struct ClockDisplayProps {
    pub text: AttrValue,
}

#[function_component(ClockDisplay)]
pub fn clock_display(props: &ClockDisplayProps) -> Html {
    html! {
        <div id="timerDisplay" class="timer-display">{ props.text.to_string() }</div>
    }
}

#[derive(Properties, PartialEq)]
pub struct TimeInputFieldsProps {
    pub inputs: TimeInputs,
    pub onchange: Callback<(TimeField, String)>,
}

/// Hours, minutes and seconds fields.
#[function_component(TimeInputFields)]
pub fn time_input_fields(props: &TimeInputFieldsProps) -> Html {
    let render_field = |field: TimeField, label: &'static str, max: Option<&'static str>| {
        let onchange = props.onchange.clone();
        let oninput = Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            onchange.emit((field, input.value()));
        });
        html! {
            <div class="time-field">
                <input type="number"
                    id={format!("{}Input", field)}
                    min="0"
                    max={max.map(AttrValue::from)}
                    value={props.inputs.get(field).to_string()}
                    disabled={!props.inputs.enabled}
                    {oninput}
                />
                <label for={format!("{}Input", field)}>{ label }</label>
            </div>
        }
    };

    html! {
        <div class="time-inputs">
            { render_field(TimeField::Hours, "Hours", None) }
            { render_field(TimeField::Minutes, "Minutes", Some("59")) }
            { render_field(TimeField::Seconds, "Seconds", Some("59")) }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ControlsProps {
    pub controls: ControlStates,
    pub on_start: Callback<MouseEvent>,
    pub on_pause: Callback<MouseEvent>,
    pub on_reset: Callback<MouseEvent>,
}

#[function_component(Controls)]
pub fn controls(props: &ControlsProps) -> Html {
    html! {
        <div class="controls">
            <button id="startButton"
                disabled={props.controls.start_disabled}
                onclick={props.on_start.clone()}>{ "Start" }</button>
            <button id="pauseButton"
                disabled={props.controls.pause_disabled}
                onclick={props.on_pause.clone()}>{ "Pause" }</button>
            <button id="resetButton"
                disabled={props.controls.reset_disabled}
                onclick={props.on_reset.clone()}>{ "Reset" }</button>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct FireplaceProps {
    pub opacity: f64,
}

/// Pixel-art fireplace; the fire layer's opacity tracks remaining time.
#[function_component(Fireplace)]
pub fn fireplace(props: &FireplaceProps) -> Html {
    html! {
        <div class="fireplace">
            <div class="fire" style={format!("opacity: {}", props.opacity)}></div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct CreatureProps {
    pub animation: CreatureAnimation,
}

/// The creature carries exactly one `creature-*` state class at a time.
#[function_component(Creature)]
pub fn creature(props: &CreatureProps) -> Html {
    html! {
        <div id="creature" class={classes!("creature", props.animation.class_name())}></div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ChimeSelectProps {
    pub options: Vec<(String, String)>,
    pub selected: AttrValue,
    pub onchange: Callback<String>,
}

#[function_component(ChimeSelect)]
pub fn chime_select(props: &ChimeSelectProps) -> Html {
    let onchange = {
        let onchange = props.onchange.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            onchange.emit(select.value());
        })
    };

    html! {
        <div class="form-group">
            <label for="chimeSelect">{ "Chime:" }</label>
            <select id="chimeSelect" {onchange}>
                { props.options.iter().map(|(path, label)| {
                    html! {
                        <option value={path.clone()} selected={*path == *props.selected}>
                            { label.clone() }
                        </option>
                    }
                }).collect::<Html>() }
            </select>
        </div>
    }
}
