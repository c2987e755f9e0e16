use super::*;
use crate::foundation::core::Rgba8;

fn photo() -> RasterBuffer {
    RasterBuffer::filled(4, 3, Rgba8::opaque(200, 10, 10))
}

#[test]
fn fresh_state_is_empty_and_incomplete() {
    for layout in LayoutType::ALL {
        let state = LayoutState::new(layout);
        assert!(!state.is_complete);
        assert!(state.slots.iter().all(|s| !s.captured && s.image.is_none()));
        assert_eq!(state.total_slots(), layout.config().total_slots as usize);
        assert_eq!(state.current_slot_index, 0);
    }
}

#[test]
fn slots_are_row_major() {
    let state = LayoutState::new(LayoutType::Grid3x3);
    let coords: Vec<_> = state.slots.iter().map(|s| (s.id, s.row, s.col)).collect();
    assert_eq!(coords[1], (1, 0, 1));
    assert_eq!(coords[3], (3, 1, 0));
    assert_eq!(coords[8], (8, 2, 2));
}

#[test]
fn capture_advances_by_one_and_clamps_at_last() {
    let state = LayoutState::new(LayoutType::Grid2x2);
    let next = state.with_capture(0, photo()).unwrap();
    assert_eq!(next.current_slot_index, 1);
    assert!(!next.is_complete);
    // The source snapshot is unchanged.
    assert!(!state.slots[0].captured);

    let last = next.with_capture(3, photo()).unwrap();
    assert_eq!(last.current_slot_index, 3);
}

#[test]
fn capturing_every_slot_in_any_order_completes() {
    let mut state = LayoutState::new(LayoutType::Grid2x2);
    for i in [2, 0, 3, 1] {
        assert!(!state.is_complete);
        state = state.with_capture(i, photo()).unwrap();
    }
    assert!(state.is_complete);
    assert_eq!(state.captured_count(), 4);
}

#[test]
fn clearing_a_slot_marks_incomplete() {
    let mut state = LayoutState::new(LayoutType::LeftRight);
    state = state.with_capture(0, photo()).unwrap();
    state = state.with_capture(1, photo()).unwrap();
    assert!(state.is_complete);

    let cleared = state.with_slot_cleared(0).unwrap();
    assert!(!cleared.is_complete);
    assert!(cleared.slots[0].image.is_none());
    assert_eq!(cleared.current_slot_index, 0);
    assert!(cleared.slots[1].captured);
}

#[test]
fn out_of_range_indices_are_rejected() {
    let state = LayoutState::new(LayoutType::Single);
    assert!(matches!(state.with_capture(1, photo()), Err(BoothError::Validation(_))));
    assert!(state.with_current_slot(5).is_err());
    assert!(state.with_slot_cleared(1).is_err());
    assert_eq!(state.with_current_slot(0).unwrap().current_slot().id, 0);
}
