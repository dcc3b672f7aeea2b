//! Local Echo page: a plain DOM list backed by `localStorage`.

use crate::dom::{self, Listeners};
use crate::storage::BrowserStorage;
use ripple_core::{EchoBoard, Freshness, Outcome};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

const INDEX_ATTR: &str = "data-index";

pub struct EchoPage {
    container: web::HtmlElement,
    _listeners: Listeners,
}

impl Drop for EchoPage {
    fn drop(&mut self) {
        self.container.remove();
    }
}

pub fn mount(document: &web::Document, root: &web::Element, now_ms: i64) -> anyhow::Result<EchoPage> {
    let storage = BrowserStorage::local()?;
    let (board, freshness) = EchoBoard::load(storage, now_ms);
    if freshness == Freshness::Stale {
        log::info!("[echo] seeded fresh board");
    }
    let board = Rc::new(RefCell::new(board));

    let container: web::HtmlElement = dom::create_element(document, "main")?;
    dom::set_style(
        &container,
        "min-height:100vh;background:#000;color:#fff;padding:2rem;display:flex;\
         flex-direction:column;align-items:center;gap:1.5rem;font-family:monospace",
    );
    let title: web::HtmlElement = dom::create_element(document, "h1")?;
    title.set_text_content(Some("Resonance"));
    let tagline: web::HtmlElement = dom::create_element(document, "p")?;
    tagline.set_text_content(Some("Shape it. Break it. Leave your mark."));
    dom::set_style(&tagline, "opacity:0.6");

    let list: web::HtmlElement = dom::create_element(document, "div")?;
    dom::set_style(&list, "width:100%;max-width:36rem;display:flex;flex-direction:column;gap:1rem");

    let form: web::HtmlElement = dom::create_element(document, "div")?;
    dom::set_style(&form, "display:flex;gap:1rem;margin-top:1.5rem");
    let input: web::HtmlInputElement = dom::create_element(document, "input")?;
    input.set_placeholder("Leave a ripple...");
    let submit: web::HtmlButtonElement = dom::create_element(document, "button")?;
    submit.set_text_content(Some("Submit"));

    dom::append(&form, &input)?;
    dom::append(&form, &submit)?;
    for child in [&title, &tagline, &list, &form] {
        dom::append(&container, child)?;
    }
    dom::append(root, &container)?;

    render_list(document, &list, board.borrow().entries())?;

    let mut listeners = Listeners::default();
    {
        let board = board.clone();
        let list_for_click = list.clone();
        let document = document.clone();
        listeners.on(&list, "click", move |ev: web::Event| {
            let Some(index) = ev
                .target()
                .and_then(|t| t.dyn_into::<web::Element>().ok())
                .and_then(|el| el.get_attribute(INDEX_ATTR))
                .and_then(|raw| raw.parse::<usize>().ok())
            else {
                return;
            };
            let removed = board.borrow_mut().remove(index);
            if removed {
                if let Err(e) = render_list(&document, &list_for_click, board.borrow().entries()) {
                    log::error!("[echo] render failed: {:?}", e);
                }
            }
        });
    }
    {
        let board = board.clone();
        let input = input.clone();
        let list = list.clone();
        let document = document.clone();
        listeners.on(&submit, "click", move |_ev: web::Event| {
            let outcome = board.borrow_mut().submit(&input.value());
            match outcome {
                Outcome::Ok(_) => {
                    input.set_value("");
                    if let Err(e) = render_list(&document, &list, board.borrow().entries()) {
                        log::error!("[echo] render failed: {:?}", e);
                    }
                }
                other => log::debug!("[echo] submit ignored: {:?}", other),
            }
        });
    }

    Ok(EchoPage {
        container,
        _listeners: listeners,
    })
}

fn render_list(
    document: &web::Document,
    list: &web::HtmlElement,
    entries: &[String],
) -> anyhow::Result<()> {
    list.set_inner_html("");
    for (i, entry) in entries.iter().enumerate() {
        let row: web::HtmlElement = dom::create_element(document, "div")?;
        dom::set_style(
            &row,
            "background:#fff;color:#000;padding:0.5rem 1rem;border-radius:4px;display:flex;\
             justify-content:space-between;align-items:center;gap:1rem",
        );
        let text: web::HtmlElement = dom::create_element(document, "span")?;
        dom::set_style(&text, "white-space:pre-wrap");
        text.set_text_content(Some(entry));
        let delete: web::HtmlButtonElement = dom::create_element(document, "button")?;
        delete.set_text_content(Some("delete"));
        delete
            .set_attribute(INDEX_ATTR, &i.to_string())
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        dom::append(&row, &text)?;
        dom::append(&row, &delete)?;
        dom::append(list, &row)?;
    }
    Ok(())
}
