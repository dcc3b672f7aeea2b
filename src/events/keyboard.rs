use crate::dom::{self, Listeners};
use ripple_core::KeyRouter;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Movement keys on the window. Key-down is ignored while a text field has
/// focus, key-up always releases, and focus changes drop every held key.
pub fn wire_keyboard(
    window: &web::Window,
    keys: Rc<RefCell<KeyRouter>>,
    listeners: &mut Listeners,
) {
    {
        let keys = keys.clone();
        listeners.on(window, "keydown", move |ev: web::Event| {
            let Some(kev) = ev.dyn_ref::<web::KeyboardEvent>() else {
                return;
            };
            if kev.repeat() || kev.ctrl_key() || kev.meta_key() || kev.alt_key() {
                return;
            }
            let consumed = keys
                .borrow_mut()
                .key_down(&kev.code(), dom::is_text_field(kev.target()));
            if consumed {
                kev.prevent_default();
            }
        });
    }
    {
        let keys = keys.clone();
        listeners.on(window, "keyup", move |ev: web::Event| {
            if let Some(kev) = ev.dyn_ref::<web::KeyboardEvent>() {
                keys.borrow_mut().key_up(&kev.code());
            }
        });
    }
    {
        let keys = keys.clone();
        listeners.on(window, "focusin", move |ev: web::Event| {
            if dom::is_text_field(ev.target()) {
                keys.borrow_mut().set_typing(true);
            }
        });
    }
    {
        let keys = keys.clone();
        listeners.on(window, "focusout", move |ev: web::Event| {
            if dom::is_text_field(ev.target()) {
                keys.borrow_mut().set_typing(false);
            }
        });
    }
    listeners.on(window, "blur", move |_ev: web::Event| {
        keys.borrow_mut().release_all();
        log::debug!("[keys] window blurred, released movement keys");
    });
}
