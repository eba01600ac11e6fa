use eframe::egui::Pos2;

/// Drag-to-move state. The anchor is the pointer position, in window-local
/// coordinates, captured when the primary button went down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    Idle,
    Dragging { anchor: Pos2 },
}

/// Tracks window drag-to-move.
///
/// Movement is delta based: the window is displaced by however far the
/// pointer travelled from the anchor, so it never jumps to align its origin
/// with the cursor.
#[derive(Debug)]
pub struct DragTracker {
    state: DragState,
}

impl Default for DragTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl DragTracker {
    pub fn new() -> Self {
        Self {
            state: DragState::Idle,
        }
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Primary button pressed at `anchor` (window-local). Returns `true` when
    /// this started a new drag.
    pub fn press(&mut self, anchor: Pos2) -> bool {
        match self.state {
            DragState::Idle => {
                self.state = DragState::Dragging { anchor };
                tracing::debug!(x = anchor.x, y = anchor.y, "drag started");
                true
            }
            DragState::Dragging { .. } => false,
        }
    }

    /// Pointer moved to `pointer` (window-local) while the window sits at
    /// `window_pos` (screen). Returns the position the window should move to,
    /// or `None` when no drag is active (a motion with no anchor is a no-op,
    /// not an error).
    pub fn motion(&self, pointer: Pos2, window_pos: Pos2) -> Option<Pos2> {
        match self.state {
            DragState::Dragging { anchor } => Some(window_pos + (pointer - anchor)),
            DragState::Idle => None,
        }
    }

    /// Primary button released; the anchor is discarded. Returns `true` when
    /// a drag actually ended. A release without a prior press is a no-op.
    pub fn release(&mut self) -> bool {
        match self.state {
            DragState::Dragging { .. } => {
                self.state = DragState::Idle;
                tracing::debug!("drag ended");
                true
            }
            DragState::Idle => false,
        }
    }
}
