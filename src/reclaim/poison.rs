//! Slot poisoning.
//!
//! A freed slot keeps its generation and becomes a tombstone: resolving
//! the old identity fails with `StaleIdentity`, a second free fails with
//! `DoubleFree`, and reallocation bumps the generation so the identity can
//! never alias the slot's next occupant. Silent slot reuse behind a live
//! identity is exactly the failure mode this module exists to rule out.

use crate::heap::{Object, Slot, SlotState};

/// Pattern written over released buffers when poison-fill is enabled.
pub const FREED_PATTERN: u8 = 0xCD;

/// Fill a released region with the freed pattern.
///
/// # Safety
///
/// The region must be valid and writable.
pub(crate) unsafe fn fill(ptr: *mut u8, size: usize) {
    std::ptr::write_bytes(ptr, FREED_PATTERN, size);
}

/// Tombstone the slot and recycle its index, returning the object for
/// teardown.
pub(crate) fn retire(slot: &mut Slot, index: u32, free_list: &mut Vec<u32>) -> Object {
    let state = std::mem::replace(&mut slot.state, SlotState::Tombstone);
    free_list.push(index);

    match state {
        SlotState::Occupied(object) => object,
        SlotState::Tombstone => unreachable!("retire called on tombstone slot"),
    }
}
