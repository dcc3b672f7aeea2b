use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// An event listener that is removed when the guard is dropped.
pub struct ListenerGuard {
    target: web::EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(web::Event)>,
}

impl ListenerGuard {
    pub fn new(
        target: &web::EventTarget,
        event: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> Self {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        if let Err(e) =
            target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
        {
            log::warn!("[dom] could not listen for {}: {:?}", event, e);
        }
        Self {
            target: target.clone(),
            event,
            callback,
        }
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

/// Listeners owned by one component, all removed together.
#[derive(Default)]
pub struct Listeners(Vec<ListenerGuard>);

impl Listeners {
    pub fn on(
        &mut self,
        target: &web::EventTarget,
        event: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) {
        self.0.push(ListenerGuard::new(target, event, handler));
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

/// True when key events at `target` are meant for a text field.
pub fn is_text_field(target: Option<web::EventTarget>) -> bool {
    let Some(el) = target.and_then(|t| t.dyn_into::<web::Element>().ok()) else {
        return false;
    };
    match el.tag_name().to_ascii_uppercase().as_str() {
        "TEXTAREA" => true,
        "INPUT" => el
            .dyn_ref::<web::HtmlInputElement>()
            .map(|i| !matches!(i.type_().as_str(), "button" | "checkbox" | "radio" | "submit"))
            .unwrap_or(true),
        _ => el
            .dyn_ref::<web::HtmlElement>()
            .map(|h| h.is_content_editable())
            .unwrap_or(false),
    }
}

pub fn create_element<T: JsCast>(document: &web::Document, tag: &str) -> anyhow::Result<T> {
    document
        .create_element(tag)
        .map_err(|e| anyhow::anyhow!("create <{}>: {:?}", tag, e))?
        .dyn_into::<T>()
        .map_err(|_| anyhow::anyhow!("<{}> has an unexpected type", tag))
}

pub fn append(parent: &web::Node, child: &web::Node) -> anyhow::Result<()> {
    parent
        .append_child(child)
        .map(|_| ())
        .map_err(|e| anyhow::anyhow!("append_child: {:?}", e))
}

/// Apply a `;`-separated inline style.
pub fn set_style(el: &web::HtmlElement, css: &str) {
    el.style().set_css_text(css);
}
