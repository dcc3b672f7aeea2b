pub mod camera;
pub mod color;
pub mod composer;
pub mod config;
pub mod constants;
pub mod controls;
pub mod echo;
pub mod error;
pub mod feed;
pub mod grid;
pub mod memory;
pub mod mesh;
pub mod outcome;
pub mod placement;
pub mod prompt;
pub mod push_id;
pub mod ripple;
pub mod scene;
pub mod store;
pub mod stream;
pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");

pub use camera::{CameraPose, Lens};
pub use composer::{ComposeMode, Composer};
pub use config::AppConfig;
pub use controls::{CameraRig, ControlScheme, InputState, KeyBindings, KeyRouter, MoveAction};
pub use echo::{EchoBoard, Freshness, KeyValueStorage, MemoryStorage};
pub use error::{StorageError, StoreError};
pub use feed::{RippleFeed, SharedFeed, SyncStatus};
pub use grid::DotGrid;
pub use memory::MemoryStore;
pub use outcome::Outcome;
pub use placement::{GhostPreview, Placement, PlacementStrategy, Placer};
pub use prompt::{derive_object, ObjectSpec};
pub use push_id::PushIdGenerator;
pub use ripple::{Ripple, RippleId, RippleKind, RippleRecord, Shape};
pub use scene::{build_scene, SceneFrame};
pub use store::{Query, RealtimeStore, Snapshot, Subscription};
pub use stream::{RestEndpoint, StreamCache, StreamEvent};
