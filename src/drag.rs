//! Drag controller: a two-state machine driven by click classification.

use crate::hit_test::HitOutcome;
use crate::models::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging,
}

/// Outcome of one click as seen by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickResult {
    pub on_object: bool,
    /// The click flipped the drag state; the DOM layer must stop its
    /// propagation so no other container handler sees it.
    pub toggled: bool,
}

#[derive(Debug, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.state == DragState::Dragging
    }

    /// Apply a classified click.
    pub fn apply(&mut self, outcome: HitOutcome) -> ClickResult {
        if outcome.toggles() {
            self.state = match self.state {
                DragState::Idle => DragState::Dragging,
                DragState::Dragging => DragState::Idle,
            };
        } else {
            self.state = DragState::Idle;
        }
        ClickResult {
            on_object: outcome.on_object(),
            toggled: outcome.toggles(),
        }
    }

    /// New top-left that centers an object of `(width, height)` on `pointer`
    /// (container space), or `None` while idle.
    pub fn follow(&self, pointer: Point, (width, height): (f64, f64)) -> Option<Point> {
        if !self.is_dragging() {
            return None;
        }
        Some(Point::new(pointer.x - width / 2.0, pointer.y - height / 2.0))
    }

    /// Drop back to idle, e.g. on unmount.
    pub fn release(&mut self) {
        self.state = DragState::Idle;
    }
}
