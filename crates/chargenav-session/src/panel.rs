//! Bottom-sheet panel state machine
//!
//! The panel rests in one of three positions. While dragging, the offset
//! follows the pointer and the resting position does not change; on release
//! the panel snaps according to how far it was dragged relative to the
//! viewport height.

use serde::{Deserialize, Serialize};

/// Fraction of the viewport height a drag must exceed to leave `Half`
pub const SNAP_RATIO: f64 = 0.2;

/// Resting position of the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PanelState {
    Closed,
    #[default]
    Half,
    Full,
}

/// Pointer input driving the panel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PanelEvent {
    DragStarted { y: f64 },
    DragMoved { y: f64 },
    DragReleased { viewport_height: f64 },
    DragCancelled,
    Toggled,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct Drag {
    start_y: f64,
    offset: f64,
}

/// Panel position plus any drag in progress
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanelMachine {
    state: PanelState,
    drag: Option<Drag>,
    snap_ratio: f64,
}

impl Default for PanelMachine {
    fn default() -> Self {
        Self { state: PanelState::Half, drag: None, snap_ratio: SNAP_RATIO }
    }
}

impl PanelMachine {
    /// Create a half-open panel
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different snap threshold ratio
    pub fn with_snap_ratio(mut self, ratio: f64) -> Self {
        self.snap_ratio = ratio;
        self
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Current drag offset in pixels; positive is downwards, zero when idle
    pub fn drag_offset(&self) -> f64 {
        self.drag.map(|d| d.offset).unwrap_or(0.0)
    }

    /// Feed a pointer event
    pub fn handle(&mut self, event: PanelEvent) -> PanelState {
        match event {
            PanelEvent::DragStarted { y } => self.start_drag(y),
            PanelEvent::DragMoved { y } => self.drag_to(y),
            PanelEvent::DragReleased { viewport_height } => {
                self.release(viewport_height);
            }
            PanelEvent::DragCancelled => self.cancel_drag(),
            PanelEvent::Toggled => self.toggle(),
        }
        self.state
    }

    pub fn start_drag(&mut self, y: f64) {
        self.drag = Some(Drag { start_y: y, offset: 0.0 });
    }

    /// Track the pointer; ignored when no drag is in progress
    pub fn drag_to(&mut self, y: f64) {
        if let Some(drag) = self.drag.as_mut() {
            drag.offset = y - drag.start_y;
        }
    }

    /// End the drag and snap to a resting position
    pub fn release(&mut self, viewport_height: f64) -> PanelState {
        if let Some(drag) = self.drag.take() {
            self.state = snap(drag.offset, viewport_height, self.snap_ratio);
        }
        self.state
    }

    /// Abandon the drag without changing position
    pub fn cancel_drag(&mut self) {
        self.drag = None;
    }

    /// Open a closed panel to half height, close it otherwise
    pub fn toggle(&mut self) {
        self.drag = None;
        self.state = match self.state {
            PanelState::Closed => PanelState::Half,
            PanelState::Half | PanelState::Full => PanelState::Closed,
        };
    }
}

/// Resting position for a drag of `delta` pixels
pub fn snap(delta: f64, viewport_height: f64, ratio: f64) -> PanelState {
    let threshold = ratio * viewport_height;
    if delta > threshold {
        PanelState::Closed
    } else if delta < -threshold {
        PanelState::Full
    } else {
        PanelState::Half
    }
}
