#![cfg(target_arch = "wasm32")]
use ripple_core::grid::DotGrid;
use ripple_core::{
    AppConfig, CameraRig, Composer, KeyRouter, MemoryStore, Placer, Query, RealtimeStore,
    RestEndpoint, SharedFeed, Subscription, SyncStatus,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod dom;
mod echo;
mod events;
mod frame;
mod hud;
mod input;
mod render;
mod storage;
mod store;

use constants::{CANVAS_ID, ECHO_ROOT_ID};
use dom::Listeners;

/// Everything a mounted scene owns. Dropping it stops the frame loop,
/// closes the subscription and removes every listener.
struct SceneHandle {
    _frames: frame::AnimationLoop,
    _subscription: Subscription,
    _listeners: Listeners,
}

enum Mounted {
    Scene(SceneHandle),
    Echo(echo::EchoPage),
}

thread_local! {
    static MOUNTED: RefCell<Option<Mounted>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let search = web::window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default();
    let config = AppConfig::from_query(&search);
    if let Some(level) = config.log_level.to_level() {
        console_log::init_with_level(level).ok();
    }
    log::info!("ripple-web starting");

    spawn_local(async move {
        if let Err(e) = init(config).await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

/// Tear down whatever is mounted. Safe to call more than once.
#[wasm_bindgen]
pub fn unmount() {
    let previous = MOUNTED.with(|m| m.borrow_mut().take());
    match previous {
        Some(Mounted::Scene(_)) => log::info!("scene unmounted"),
        Some(Mounted::Echo(_)) => log::info!("echo unmounted"),
        None => log::debug!("unmount: nothing mounted"),
    }
}

fn mount(mounted: Mounted) {
    MOUNTED.with(|m| *m.borrow_mut() = Some(mounted));
}

async fn init(config: AppConfig) -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    if let Some(root) = document.get_element_by_id(ECHO_ROOT_ID) {
        let page = echo::mount(&document, &root, store::now_ms())?;
        mount(Mounted::Echo(page));
        return Ok(());
    }

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CANVAS_ID))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    let mut listeners = Listeners::default();
    dom::sync_canvas_backing_size(&canvas);
    {
        let canvas_resize = canvas.clone();
        listeners.on(&window, "resize", move |_ev| {
            dom::sync_canvas_backing_size(&canvas_resize)
        });
    }

    let store: Rc<dyn RealtimeStore> = if config.uses_remote_store() {
        log::info!("[store] using {}", config.database_url);
        Rc::new(store::FirebaseStore::new(
            RestEndpoint::new(&config.database_url).with_auth(config.auth_token.clone()),
        ))
    } else {
        log::warn!("[store] no database url configured, using in-memory sandbox");
        let sandbox = MemoryStore::new(store::now_ms() as u64);
        sandbox.set_clock(store::now_ms());
        Rc::new(sandbox)
    };

    let feed = SharedFeed::new();
    let subscription = feed.connect(
        store.as_ref(),
        Query::last(&config.collection, config.snapshot_limit),
    )?;

    let hud_commands = events::Queue::default();
    let composer = Composer::new(&config.collection);
    let body = document
        .body()
        .ok_or_else(|| anyhow::anyhow!("no body"))?;
    let hud = hud::Hud::mount(&document, &body, composer.mode(), hud_commands.clone())?;

    let keys = Rc::new(RefCell::new(KeyRouter::new(config.key_bindings.clone())));
    events::wire_keyboard(&window, keys.clone(), &mut listeners);
    let pointer = events::Queue::default();
    events::wire_pointer(&canvas, config.controls, pointer.clone(), &mut listeners);

    let labels = match render::labels::LabelLayer::mount(&document, &canvas) {
        Ok(l) => Some(l),
        Err(e) => {
            log::error!("label layer unavailable: {:?}", e);
            None
        }
    };
    let gpu = match render::GpuState::new(&canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    };

    let grid = config.grid.map(|g| DotGrid::new(g.size, g.spacing));
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        canvas: canvas.clone(),
        collection: config.collection.clone(),
        store,
        feed,
        rig: CameraRig::new(config.controls, config.camera_start, glam::Vec3::ZERO),
        keys,
        pointer,
        hud,
        hud_commands,
        hud_focused: false,
        composer,
        placer: Placer::new(config.placement),
        grid,
        gpu,
        labels,
        last_status: SyncStatus::Connecting,
    }));
    log::info!(
        "[scene] controls={:?} placement={:?} listeners={}",
        config.controls,
        config.placement,
        listeners.len()
    );

    let frames = frame::start_loop(frame_ctx);
    mount(Mounted::Scene(SceneHandle {
        _frames: frames,
        _subscription: subscription,
        _listeners: listeners,
    }));
    Ok(())
}
