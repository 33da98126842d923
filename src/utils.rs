use log::{debug, error, warn};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlAudioElement;
use yew::NodeRef;

/// Readable text for a JS exception value.
fn describe(e: &JsValue) -> String {
    e.as_string().unwrap_or_else(|| format!("{:?}", e))
}

fn chime_element(audio_ref: &NodeRef) -> Option<HtmlAudioElement> {
    let audio = audio_ref.cast::<HtmlAudioElement>();
    if audio.is_none() {
        debug!("Chime element not mounted");
    }
    audio
}

/// Start chime playback. A rejected play (e.g. autoplay policy) is logged
/// and otherwise ignored.
pub fn play_chime(audio_ref: &NodeRef) {
    let Some(audio) = chime_element(audio_ref) else {
        return;
    };

    match audio.play() {
        Ok(promise) => wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = JsFuture::from(promise).await {
                error!("Error playing sound: {}", describe(&e));
            }
        }),
        Err(e) => error!("Error playing sound: {}", describe(&e)),
    }
}

/// Stop the chime and rewind it to the beginning.
pub fn stop_chime(audio_ref: &NodeRef) {
    let Some(audio) = chime_element(audio_ref) else {
        return;
    };

    if let Err(e) = audio.pause() {
        warn!("Error stopping sound: {}", describe(&e));
    }
    audio.set_current_time(0.0);
}
