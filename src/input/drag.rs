use glam::Vec2;

/// Whether the primary button is currently held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragPhase {
    /// Button up: pointer moves are only tracked.
    #[default]
    Idle,
    /// Button down: pointer moves rotate the camera.
    Dragging,
}

/// Tracks the last pointer position and the drag phase.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerDragState {
    last: Vec2,
    phase: DragPhase,
}

impl PointerDragState {
    /// Idle state with the pointer at the origin.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Last observed pointer position.
    #[must_use]
    pub fn last_position(&self) -> Vec2 {
        self.last
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    /// Whether the primary button is held.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.phase == DragPhase::Dragging
    }

    /// Primary press: the last position becomes the drag origin.
    pub fn begin(&mut self) {
        self.phase = DragPhase::Dragging;
    }

    /// Primary release.
    pub fn end(&mut self) {
        self.phase = DragPhase::Idle;
    }

    /// Record a new pointer position and return the movement since the last
    /// one, or `None` while idle.
    pub fn track(&mut self, position: Vec2) -> Option<Vec2> {
        let delta = position - self.last;
        self.last = position;
        self.is_dragging().then_some(delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_tracks_without_delta() {
        let mut drag = PointerDragState::new();
        assert_eq!(drag.track(Vec2::new(3.0, 4.0)), None);
        assert_eq!(drag.last_position(), Vec2::new(3.0, 4.0));
    }

    #[test]
    fn drag_reports_delta_from_origin() {
        let mut drag = PointerDragState::new();
        let _ = drag.track(Vec2::new(10.0, 10.0));
        drag.begin();
        assert_eq!(drag.track(Vec2::new(12.0, 7.0)), Some(Vec2::new(2.0, -3.0)));
        drag.end();
        assert_eq!(drag.phase(), DragPhase::Idle);
        assert_eq!(drag.track(Vec2::new(0.0, 0.0)), None);
    }
}
