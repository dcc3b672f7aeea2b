//! Composition HUD: mode toggle, textarea and Submit button. Every action
//! is sent as a [`HudCommand`]; the frame loop owns the reaction.

use crate::constants::HUD_ID;
use crate::dom::{self, Listeners};
use crate::events::Queue;
use crate::input::is_submit_key;
use ripple_core::ComposeMode;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HudCommand {
    ToggleMode,
    Draft(String),
    Submit,
    /// Escape: drop the draft.
    Cancel,
    Focus(bool),
}

pub struct Hud {
    root: web::HtmlElement,
    toggle: web::HtmlButtonElement,
    textarea: web::HtmlTextAreaElement,
    _listeners: Listeners,
}

impl Hud {
    pub fn mount(
        document: &web::Document,
        parent: &web::Node,
        mode: ComposeMode,
        commands: Queue<HudCommand>,
    ) -> anyhow::Result<Self> {
        let root: web::HtmlElement = dom::create_element(document, "div")?;
        root.set_id(HUD_ID);
        dom::set_style(
            &root,
            "position:fixed;left:50%;bottom:1.5rem;transform:translateX(-50%);display:flex;\
             gap:0.5rem;align-items:flex-end;z-index:10;font-family:system-ui,sans-serif",
        );
        let toggle: web::HtmlButtonElement = dom::create_element(document, "button")?;
        let textarea: web::HtmlTextAreaElement = dom::create_element(document, "textarea")?;
        textarea.set_rows(2);
        textarea.set_cols(40);
        let submit: web::HtmlButtonElement = dom::create_element(document, "button")?;
        submit.set_text_content(Some("Submit"));

        dom::append(&root, &toggle)?;
        dom::append(&root, &textarea)?;
        dom::append(&root, &submit)?;
        dom::append(parent, &root)?;

        let mut listeners = Listeners::default();
        {
            let commands = commands.clone();
            listeners.on(&toggle, "click", move |_ev| commands.send(HudCommand::ToggleMode));
        }
        {
            let commands = commands.clone();
            listeners.on(&submit, "click", move |_ev| commands.send(HudCommand::Submit));
        }
        {
            let commands = commands.clone();
            let area = textarea.clone();
            listeners.on(&textarea, "input", move |_ev| {
                commands.send(HudCommand::Draft(area.value()))
            });
        }
        {
            let commands = commands.clone();
            let area = textarea.clone();
            listeners.on(&textarea, "keydown", move |ev: web::Event| {
                let Some(kev) = ev.dyn_ref::<web::KeyboardEvent>() else {
                    return;
                };
                let key = kev.key();
                if is_submit_key(&key, kev.shift_key(), kev.is_composing()) {
                    kev.prevent_default();
                    commands.send(HudCommand::Submit);
                    return;
                }
                match key.as_str() {
                    "Escape" if !kev.is_composing() => {
                        area.set_value("");
                        commands.send(HudCommand::Cancel);
                        _ = area.blur();
                    }
                    _ => {}
                }
            });
        }
        {
            let commands = commands.clone();
            listeners.on(&textarea, "focus", move |_ev| commands.send(HudCommand::Focus(true)));
        }
        listeners.on(&textarea, "blur", move |_ev| commands.send(HudCommand::Focus(false)));

        let hud = Self {
            root,
            toggle,
            textarea,
            _listeners: listeners,
        };
        hud.show_mode(mode);
        Ok(hud)
    }

    pub fn show_mode(&self, mode: ComposeMode) {
        self.toggle.set_text_content(Some(mode.toggle_label()));
        self.textarea.set_placeholder(mode.placeholder());
    }

    pub fn clear(&self) {
        self.textarea.set_value("");
    }
}

impl Drop for Hud {
    fn drop(&mut self) {
        self.root.remove();
    }
}
