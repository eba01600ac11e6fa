/// Focus-acceptance controller.
///
/// The overlay must never steal keyboard focus from other applications, so
/// the window only accepts focus while it is being dragged or while the
/// pointer is inside it: `accept = drag_active || pointer_inside`.
#[derive(Debug, Default)]
pub struct FocusAcceptance {
    drag_active: bool,
    pointer_inside: bool,
    applied: Option<bool>,
}

impl FocusAcceptance {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accepts(&self) -> bool {
        self.drag_active || self.pointer_inside
    }

    /// Returns `Some(accept)` only when the window attribute needs to change,
    /// so applying it twice is naturally idempotent.
    pub fn set_drag_active(&mut self, active: bool) -> Option<bool> {
        self.drag_active = active;
        self.refresh()
    }

    pub fn set_pointer_inside(&mut self, inside: bool) -> Option<bool> {
        self.pointer_inside = inside;
        self.refresh()
    }

    fn refresh(&mut self) -> Option<bool> {
        let accept = self.accepts();
        if self.applied == Some(accept) {
            return None;
        }
        self.applied = Some(accept);
        tracing::debug!(accept, "focus acceptance updated");
        Some(accept)
    }
}
