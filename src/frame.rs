use crate::events::{PointerInput, Queue};
use crate::hud::{Hud, HudCommand};
use crate::render::{self, labels::LabelLayer};
use crate::store::now_ms;
use glam::Vec2;
use ripple_core::camera::{ndc_to_world_ray, pixel_to_ndc};
use ripple_core::constants::{CAMERA_FAR, CAMERA_FOV_DEG, CAMERA_NEAR};
use ripple_core::scene::{object_pick_spheres, pick_label};
use ripple_core::{
    build_scene, CameraPose, CameraRig, Composer, ControlScheme, DotGrid, KeyRouter, Lens,
    Outcome, Placer, RealtimeStore, SharedFeed, SyncStatus,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub canvas: web::HtmlCanvasElement,
    pub collection: String,
    pub store: Rc<dyn RealtimeStore>,
    pub feed: SharedFeed,

    pub rig: CameraRig,
    pub keys: Rc<RefCell<KeyRouter>>,
    pub pointer: Queue<PointerInput>,

    pub hud: Hud,
    pub hud_commands: Queue<HudCommand>,
    pub hud_focused: bool,
    pub composer: Composer,
    pub placer: Placer,

    pub grid: Option<DotGrid>,
    pub gpu: Option<render::GpuState>,
    pub labels: Option<LabelLayer>,
    pub last_status: SyncStatus,
}

impl FrameContext {
    fn lens(&self) -> Lens {
        let w = self.canvas.width().max(1) as f32;
        let h = self.canvas.height().max(1) as f32;
        Lens {
            fovy_radians: CAMERA_FOV_DEG.to_radians(),
            aspect: w / h,
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
        }
    }

    pub fn frame(&mut self) {
        self.handle_pointer();
        self.handle_hud();

        // Held keys are integrated here and nowhere else.
        let input = self.keys.borrow().state;
        self.rig.step(&input);
        let pose = self.rig.pose();

        self.placer.frame(&pose);
        self.composer
            .sync_ghost(&mut self.placer.ghost, self.hud_focused);
        if !self.placer.strategy.uses_ghost() {
            self.placer.ghost.visible = false;
        }
        self.log_status_change();

        let scene = self.feed.with(|feed| {
            build_scene(
                feed.ripples(),
                &self.placer.ghost,
                &pose,
                self.grid.as_ref(),
            )
        });
        let lens = self.lens();
        let (w, h) = (self.canvas.width(), self.canvas.height());
        if let Some(g) = &mut self.gpu {
            g.resize_if_needed(w, h);
            if let Err(e) = g.render(&scene, &pose, &lens) {
                log::error!("render error: {:?}", e);
            }
        }
        if let Some(labels) = &self.labels {
            labels.draw(&scene, &lens.view_projection(&pose), &lens, w, h);
        }
    }

    fn handle_pointer(&mut self) {
        for input in self.pointer.drain() {
            match input {
                PointerInput::Drag(delta) => self.rig.drag(delta),
                PointerInput::Look(delta) => self.rig.locked_look(delta),
                PointerInput::Wheel(notches) => self.rig.wheel(notches),
                PointerInput::Click(px) => self.click(px),
            }
        }
    }

    /// Clicking a text ripple deletes it; any other click is a raycast
    /// placement anchor (ignored by the other strategies).
    fn click(&mut self, px: Vec2) {
        let pose = self.rig.pose();
        let lens = self.lens();
        let ndc = if self.rig.scheme() == ControlScheme::PointerLock {
            Vec2::ZERO
        } else {
            pixel_to_ndc(px, self.canvas.width() as f32, self.canvas.height() as f32)
        };
        let (ro, rd) = ndc_to_world_ray(&pose, &lens, ndc);
        let (picked, spheres) = self.feed.with(|feed| {
            (
                pick_label(feed.ripples(), ro, rd),
                object_pick_spheres(feed.ripples()),
            )
        });
        if let Some(id) = picked {
            let outcome = self.feed.delete(self.store.as_ref(), &self.collection, &id);
            log::info!("[click] delete {} -> {:?}", id, outcome);
            return;
        }
        if let ripple_core::PlacementStrategy::Raycast { .. } = self.placer.strategy {
            match self.placer.click(&pose, &lens, ndc, &spheres) {
                Some(hit) => log::debug!("[click] anchor at {:?} ({:?})", hit.point, hit.target),
                None => log::debug!("[click] anchor cleared"),
            }
        }
    }

    fn handle_hud(&mut self) {
        for command in self.hud_commands.drain() {
            match command {
                HudCommand::ToggleMode => {
                    let mode = self.composer.toggle_mode();
                    self.hud.show_mode(mode);
                }
                HudCommand::Draft(text) => self.composer.set_draft(&text),
                HudCommand::Submit => self.submit(),
                HudCommand::Cancel => {
                    self.composer.clear();
                    self.hud.clear();
                }
                HudCommand::Focus(focused) => self.hud_focused = focused,
            }
        }
    }

    fn submit(&mut self) {
        let pose: CameraPose = self.rig.pose();
        // The ghost must sit where it is drawn right now.
        self.placer.frame(&pose);
        let placement = self.placer.place(&pose);
        match self
            .composer
            .submit(self.store.as_ref(), placement, now_ms())
        {
            Outcome::RejectedEmptyInput => {}
            outcome => {
                log::info!("[submit] {:?} at {:?}", outcome, placement.position);
                self.hud.clear();
            }
        }
    }

    fn log_status_change(&mut self) {
        let status = self.feed.status();
        if status != self.last_status {
            match &status {
                SyncStatus::Connecting => {}
                SyncStatus::Live => log::info!("[feed] live ({} ripples)", self.feed.len()),
                SyncStatus::Lost(e) => log::warn!("[feed] lost: {}", e),
            }
            self.last_status = status;
        }
    }
}

/// requestAnimationFrame loop; dropping it cancels the pending frame and
/// releases the frame context.
pub struct AnimationLoop {
    pending: Rc<Cell<Option<i32>>>,
    tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
}

fn request_frame(
    tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
    pending: &Rc<Cell<Option<i32>>>,
) {
    let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref().map(|c| c.as_ref().clone()))
    else {
        return;
    };
    match w.request_animation_frame(cb.unchecked_ref()) {
        Ok(id) => pending.set(Some(id)),
        Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) -> AnimationLoop {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let pending = Rc::new(Cell::new(None));
    let tick_clone = tick.clone();
    let pending_clone = pending.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        pending_clone.set(None);
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone, &pending_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick, &pending);
    AnimationLoop { pending, tick }
}

impl Drop for AnimationLoop {
    fn drop(&mut self) {
        if let (Some(id), Some(w)) = (self.pending.take(), web::window()) {
            _ = w.cancel_animation_frame(id);
        }
        // Breaks the closure's reference to itself.
        self.tick.borrow_mut().take();
    }
}
