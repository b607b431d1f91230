use std::sync::{Arc, Mutex};

use bevy::prelude::*;

use crate::engine::audio::playback::{MusicToggled, PlaybackState};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{JsCast, closure::Closure};

/// Element id of the page's music checkbox.
#[cfg(target_arch = "wasm32")]
pub const TOGGLE_ELEMENT_ID: &str = "toggle";

/// Checkbox edges pushed by the DOM listener, drained once per frame.
#[derive(Resource, Clone, Default)]
pub struct ToggleQueue(Arc<Mutex<Vec<bool>>>);

impl ToggleQueue {
    pub fn push(&self, checked: bool) {
        if let Ok(mut queue) = self.0.lock() {
            queue.push(checked);
        }
    }

    pub fn drain(&self) -> Vec<bool> {
        match self.0.lock() {
            Ok(mut queue) => std::mem::take(&mut *queue),
            Err(_) => Vec::new(),
        }
    }
}

/// Something that shows a checked state to the user.
pub trait CheckboxView {
    fn set_checked(&self, checked: bool);
}

#[cfg(target_arch = "wasm32")]
impl CheckboxView for web_sys::HtmlInputElement {
    fn set_checked(&self, checked: bool) {
        web_sys::HtmlInputElement::set_checked(self, checked);
    }
}

/// The page checkbox. Non-send because DOM handles are bound to the main thread.
pub struct DomCheckbox(pub Box<dyn CheckboxView>);

/// Startup: register the `change` listener before configuration loads, so no
/// click is lost while the scene is still being built.
#[cfg(target_arch = "wasm32")]
pub fn attach_toggle_listener(world: &mut World) {
    let queue = ToggleQueue::default();
    let listener_queue = queue.clone();
    world.insert_resource(queue);

    let Some(input) = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(TOGGLE_ELEMENT_ID))
        .and_then(|element| element.dyn_into::<web_sys::HtmlInputElement>().ok())
    else {
        warn!("No #{TOGGLE_ELEMENT_ID} checkbox on the page, music stays paused");
        return;
    };

    let target = input.clone();
    let closure = Closure::wrap(Box::new(move |_event: web_sys::Event| {
        listener_queue.push(target.checked());
    }) as Box<dyn FnMut(web_sys::Event)>);

    if let Err(err) =
        input.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref())
    {
        warn!("Failed to register music toggle listener: {err:?}");
    }

    // Ownership passes to JS for the lifetime of the page.
    closure.forget();
    world.insert_non_send_resource(DomCheckbox(Box::new(input)));
}

pub fn forward_dom_toggles(
    queue: Option<Res<ToggleQueue>>,
    mut toggles: EventWriter<MusicToggled>,
) {
    let Some(queue) = queue else {
        return;
    };
    for checked in queue.drain() {
        toggles.write(MusicToggled { checked });
    }
}

/// Keep the page checkbox in step with the state. The first run also clears a
/// box the browser restored from a previous visit.
pub fn reflect_playback_state(state: Res<PlaybackState>, checkbox: Option<NonSend<DomCheckbox>>) {
    let Some(checkbox) = checkbox else {
        return;
    };
    if state.is_changed() || checkbox.is_added() {
        checkbox.0.set_checked(state.is_playing());
    }
}
