use crate::outcome::Outcome;
use crate::placement::{GhostPreview, Placement};
use crate::prompt::derive_object;
use crate::ripple::{RippleRecord, Shape};
use crate::store::RealtimeStore;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ComposeMode {
    #[default]
    Text,
    Object,
}

impl ComposeMode {
    pub fn toggled(self) -> ComposeMode {
        match self {
            ComposeMode::Text => ComposeMode::Object,
            ComposeMode::Object => ComposeMode::Text,
        }
    }

    /// Caption of the button that switches away from this mode.
    pub fn toggle_label(self) -> &'static str {
        match self {
            ComposeMode::Text => "Switch to Object Mode",
            ComposeMode::Object => "Switch to Text Mode",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            ComposeMode::Text => "Type your ripple...",
            ComposeMode::Object => "Type object prompt (e.g. 'red sphere')...",
        }
    }

    pub fn ghost_shape(self) -> Shape {
        match self {
            ComposeMode::Text => Shape::Box,
            ComposeMode::Object => Shape::Sphere,
        }
    }
}

/// The text being typed and what it will become on submit.
#[derive(Clone, Debug)]
pub struct Composer {
    path: String,
    mode: ComposeMode,
    draft: String,
}

impl Composer {
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            mode: ComposeMode::default(),
            draft: String::new(),
        }
    }

    pub fn mode(&self) -> ComposeMode {
        self.mode
    }

    /// Switching mode only changes the record shape, never placement.
    pub fn toggle_mode(&mut self) -> ComposeMode {
        self.mode = self.mode.toggled();
        self.mode
    }

    pub fn set_draft(&mut self, text: &str) {
        self.draft.clear();
        self.draft.push_str(text);
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn clear(&mut self) {
        self.draft.clear();
    }

    pub fn has_content(&self) -> bool {
        !self.draft.trim().is_empty()
    }

    /// Record the current draft would produce, `None` for blank drafts.
    pub fn build_record(&self, placement: Placement, now_ms: i64) -> Option<RippleRecord> {
        if !self.has_content() {
            return None;
        }
        Some(match self.mode {
            ComposeMode::Text => RippleRecord::text(
                self.draft.clone(),
                placement.position,
                placement.rotation,
                now_ms,
            ),
            ComposeMode::Object => {
                let spec = derive_object(&self.draft);
                RippleRecord::object(
                    spec.shape,
                    spec.color,
                    placement.position,
                    placement.rotation,
                    now_ms,
                )
            }
        })
    }

    /// Write the draft with the given placement. Blank drafts are silently
    /// ignored; a failed write is logged and the draft is still cleared.
    pub fn submit(
        &mut self,
        store: &dyn RealtimeStore,
        placement: Placement,
        now_ms: i64,
    ) -> Outcome {
        let Some(record) = self.build_record(placement, now_ms) else {
            return Outcome::RejectedEmptyInput;
        };
        let outcome = match store.push(&self.path, &record) {
            Ok(id) => {
                log::info!("[compose] submitted {} ripple {}", record.kind, id);
                Outcome::Ok(Some(id))
            }
            Err(e) => {
                log::warn!("[compose] write failed: {}", e);
                Outcome::StoreWriteFailed
            }
        };
        self.draft.clear();
        outcome
    }

    /// Mirror the draft onto the ghost preview.
    pub fn sync_ghost(&self, ghost: &mut GhostPreview, focused: bool) {
        ghost.shape = self.mode.ghost_shape();
        ghost.text.clone_from(&self.draft);
        ghost.visible = focused || self.has_content();
    }
}
