use super::Queue;
use crate::dom::Listeners;
use crate::input::{css_to_backing, wheel_notches, PointerGesture};
use glam::Vec2;
use ripple_core::ControlScheme;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Pointer intent, consumed once per frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerInput {
    /// Pressed-pointer motion in CSS pixels.
    Drag(Vec2),
    /// Raw relative motion while the pointer is locked.
    Look(Vec2),
    Wheel(f32),
    /// Click position in canvas backing pixels.
    Click(Vec2),
}

fn css_pos(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> (Vec2, Vec2) {
    let rect = canvas.get_bounding_client_rect();
    let pos = Vec2::new(
        ev.client_x() as f32 - rect.left() as f32,
        ev.client_y() as f32 - rect.top() as f32,
    );
    (pos, Vec2::new(rect.width() as f32, rect.height() as f32))
}

fn is_locked(canvas: &web::HtmlCanvasElement) -> bool {
    let el: &web::Element = canvas.as_ref();
    canvas
        .owner_document()
        .and_then(|d| d.pointer_lock_element())
        .map(|locked| &locked == el)
        .unwrap_or(false)
}

pub fn wire_pointer(
    canvas: &web::HtmlCanvasElement,
    scheme: ControlScheme,
    out: Queue<PointerInput>,
    listeners: &mut Listeners,
) {
    let gesture = Rc::new(RefCell::new(PointerGesture::default()));

    {
        let gesture = gesture.clone();
        let canvas_down = canvas.clone();
        listeners.on(canvas, "pointerdown", move |ev: web::Event| {
            let Some(pev) = ev.dyn_ref::<web::PointerEvent>() else {
                return;
            };
            if pev.button() != 0 {
                return;
            }
            if scheme == ControlScheme::PointerLock && !is_locked(&canvas_down) {
                canvas_down.request_pointer_lock();
            }
            let (pos, _) = css_pos(pev, &canvas_down);
            gesture.borrow_mut().press(pos);
            _ = canvas_down.set_pointer_capture(pev.pointer_id());
        });
    }
    {
        let gesture = gesture.clone();
        let out = out.clone();
        let canvas_move = canvas.clone();
        listeners.on(canvas, "pointermove", move |ev: web::Event| {
            let Some(pev) = ev.dyn_ref::<web::PointerEvent>() else {
                return;
            };
            if is_locked(&canvas_move) {
                out.send(PointerInput::Look(Vec2::new(
                    pev.movement_x() as f32,
                    pev.movement_y() as f32,
                )));
                return;
            }
            let (pos, _) = css_pos(pev, &canvas_move);
            let mut g = gesture.borrow_mut();
            if let Some(delta) = g.moved(pos) {
                if g.dragging {
                    out.send(PointerInput::Drag(delta));
                }
            }
        });
    }
    {
        let gesture = gesture.clone();
        let out = out.clone();
        let canvas_up = canvas.clone();
        listeners.on(canvas, "pointerup", move |ev: web::Event| {
            let Some(pev) = ev.dyn_ref::<web::PointerEvent>() else {
                return;
            };
            let (pos, css_size) = css_pos(pev, &canvas_up);
            _ = canvas_up.release_pointer_capture(pev.pointer_id());
            if gesture.borrow_mut().release(pos) {
                let backing = Vec2::new(canvas_up.width() as f32, canvas_up.height() as f32);
                out.send(PointerInput::Click(css_to_backing(pos, css_size, backing)));
            }
        });
    }
    {
        let gesture = gesture.clone();
        listeners.on(canvas, "pointercancel", move |_ev: web::Event| {
            gesture.borrow_mut().cancel();
        });
    }
    listeners.on(canvas, "wheel", move |ev: web::Event| {
        let Some(wev) = ev.dyn_ref::<web::WheelEvent>() else {
            return;
        };
        wev.prevent_default();
        out.send(PointerInput::Wheel(wheel_notches(wev.delta_y(), wev.delta_mode())));
    });
}
