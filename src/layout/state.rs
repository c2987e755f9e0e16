use crate::foundation::error::{BoothError, BoothResult};
use crate::layout::config::{LayoutConfig, LayoutType};
use crate::raster::buffer::RasterBuffer;

/// One cell of a layout session.
#[derive(Clone, Debug, PartialEq)]
pub struct Slot {
    pub id: usize,
    pub row: u32,
    pub col: u32,
    pub image: Option<RasterBuffer>,
    pub captured: bool,
}

/// Immutable snapshot of a layout session. Every transition returns a new state.
///
/// `is_complete` holds exactly when every slot is captured.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutState {
    pub config: LayoutConfig,
    pub slots: Vec<Slot>,
    pub current_slot_index: usize,
    pub is_complete: bool,
}

impl LayoutState {
    pub fn new(layout_type: LayoutType) -> Self {
        let config = *layout_type.config();
        let slots = (0..config.rows)
            .flat_map(|row| (0..config.cols).map(move |col| (row, col)))
            .enumerate()
            .map(|(id, (row, col))| Slot {
                id,
                row,
                col,
                image: None,
                captured: false,
            })
            .collect();
        Self {
            config,
            slots,
            current_slot_index: 0,
            is_complete: false,
        }
    }

    pub fn layout_type(&self) -> LayoutType {
        self.config.layout_type
    }

    pub fn total_slots(&self) -> usize {
        self.slots.len()
    }

    pub fn captured_count(&self) -> usize {
        self.slots.iter().filter(|s| s.captured).count()
    }

    pub fn current_slot(&self) -> &Slot {
        &self.slots[self.current_slot_index]
    }

    /// Store `image` in slot `index` and advance to the next slot (clamped to the last).
    pub fn with_capture(&self, index: usize, image: RasterBuffer) -> BoothResult<Self> {
        self.check_index(index)?;
        let mut next = self.clone();
        let slot = &mut next.slots[index];
        slot.image = Some(image);
        slot.captured = true;
        next.current_slot_index = (index + 1).min(next.total_slots() - 1);
        next.is_complete = next.slots.iter().all(|s| s.captured);
        Ok(next)
    }

    pub fn with_current_slot(&self, index: usize) -> BoothResult<Self> {
        self.check_index(index)?;
        Ok(Self {
            current_slot_index: index,
            ..self.clone()
        })
    }

    /// Clear slot `index` and make it current.
    pub fn with_slot_cleared(&self, index: usize) -> BoothResult<Self> {
        self.check_index(index)?;
        let mut next = self.clone();
        let slot = &mut next.slots[index];
        slot.image = None;
        slot.captured = false;
        next.current_slot_index = index;
        next.is_complete = false;
        Ok(next)
    }

    fn check_index(&self, index: usize) -> BoothResult<()> {
        if index >= self.total_slots() {
            return Err(BoothError::validation(format!(
                "slot {index} is out of range for layout '{}' with {} slots",
                self.config.layout_type,
                self.total_slots()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/state.rs"]
mod tests;
