use std::time::Duration;

use crate::capture::countdown::{AutoCapture, CountdownEvent, CountdownToken};
use crate::foundation::error::{BoothError, BoothResult};
use crate::layout::config::LayoutType;
use crate::layout::state::LayoutState;
use crate::raster::buffer::RasterBuffer;

/// Layout session transitions, as data.
#[derive(Clone, Debug, PartialEq)]
pub enum LayoutEvent {
    Initialize(LayoutType),
    /// `None` targets the current slot.
    CaptureSlot {
        index: Option<usize>,
        image: RasterBuffer,
    },
    GoToSlot(usize),
    RetakeSlot(usize),
    Reset,
}

/// Owns the single mutable layout session and its auto-capture countdown.
///
/// Every transition that moves the cursor (capture, go-to, retake, reset, re-initialize)
/// cancels the countdown, so a stale fire cannot land on a slot the user already left.
#[derive(Debug, Default)]
pub struct LayoutController {
    state: Option<LayoutState>,
    countdown: AutoCapture,
}

impl LayoutController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> Option<&LayoutState> {
        self.state.as_ref()
    }

    pub fn is_complete(&self) -> bool {
        self.state.as_ref().is_some_and(|s| s.is_complete)
    }

    pub fn countdown(&self) -> &AutoCapture {
        &self.countdown
    }

    /// Apply one transition. Returns the new state, or `None` after a reset.
    pub fn apply(&mut self, event: LayoutEvent) -> BoothResult<Option<&LayoutState>> {
        match event {
            LayoutEvent::Initialize(layout) => Ok(Some(self.initialize(layout))),
            LayoutEvent::CaptureSlot { index, image } => self.capture_slot(index, image).map(Some),
            LayoutEvent::GoToSlot(i) => self.go_to_slot(i).map(Some),
            LayoutEvent::RetakeSlot(i) => self.retake_slot(i).map(Some),
            LayoutEvent::Reset => {
                self.reset();
                Ok(None)
            }
        }
    }

    pub fn initialize(&mut self, layout: LayoutType) -> &LayoutState {
        self.countdown.cancel();
        tracing::debug!(%layout, "layout session initialized");
        self.state.insert(LayoutState::new(layout))
    }

    pub fn capture_slot(
        &mut self,
        index: Option<usize>,
        image: RasterBuffer,
    ) -> BoothResult<&LayoutState> {
        let state = self.require_state()?;
        let index = index.unwrap_or(state.current_slot_index);
        let next = state.with_capture(index, image)?;
        self.countdown.cancel();
        tracing::debug!(
            slot = index,
            captured = next.captured_count(),
            total = next.total_slots(),
            "slot captured"
        );
        Ok(&*self.state.insert(next))
    }

    pub fn go_to_slot(&mut self, index: usize) -> BoothResult<&LayoutState> {
        let next = self.require_state()?.with_current_slot(index)?;
        self.countdown.cancel();
        Ok(&*self.state.insert(next))
    }

    pub fn retake_slot(&mut self, index: usize) -> BoothResult<&LayoutState> {
        let next = self.require_state()?.with_slot_cleared(index)?;
        self.countdown.cancel();
        Ok(&*self.state.insert(next))
    }

    /// Drop the session entirely.
    pub fn reset(&mut self) {
        self.countdown.cancel();
        self.state = None;
    }

    /// Begin an auto-capture countdown for the current slot.
    pub fn start_countdown(&mut self, secs: u32) -> BoothResult<CountdownToken> {
        let slot = self.require_state()?.current_slot_index;
        Ok(self.countdown.start(slot, secs))
    }

    pub fn cancel_countdown(&mut self) {
        self.countdown.cancel();
    }

    /// Advance the countdown clock. A `Fire` is only ever reported for the live session.
    pub fn tick(&mut self, elapsed: Duration) -> Option<CountdownEvent> {
        let event = self.countdown.tick(elapsed)?;
        match event {
            CountdownEvent::Fire { token, .. } if !self.countdown.is_current(token) => None,
            CountdownEvent::Fire { .. } if self.state.is_none() => None,
            other => Some(other),
        }
    }

    fn require_state(&self) -> BoothResult<&LayoutState> {
        self.state
            .as_ref()
            .ok_or_else(|| BoothError::validation("no layout session; initialize a layout first"))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/controller.rs"]
mod tests;
