//! The free pipeline: classify, finalize, tear down, poison.
//!
//! Each free is one synchronous pass over a single object:
//!
//! 1. eligibility — immediates and descriptors are rejected outright;
//! 2. finalizer — an attached hook runs against the pre-free storage, and
//!    a hook failure aborts the free with the object fully intact (the
//!    deliberate non-atomic-on-finalizer-failure policy: the hook may
//!    still need the object on retry);
//! 3. teardown — every backing buffer the object owns is released;
//! 4. poison — the slot becomes a tombstone so the identity is detectably
//!    stale from now on.
//!
//! Batch frees are fail-fast: the first rejection or hook failure stops
//! the batch, leaving earlier elements freed and later elements untouched.

pub(crate) mod classify;
pub(crate) mod deferred;
pub(crate) mod finalizer;
pub(crate) mod poison;
pub(crate) mod teardown;

use std::sync::atomic::Ordering;

use crate::diagnostics::{self, RC001, RC002, RC102, RC201};
use crate::error::{FreeError, FreeResult};
use crate::heap::{Heap, SlotState};
use crate::object::{Category, Value};

impl Heap {
    /// Force-free one value, returning the finalizer's result (or
    /// `Value::Nil` when no hook is attached).
    ///
    /// An ineligible target fails without touching the object: it remains
    /// fully alive and usable.
    pub fn free(&self, value: Value) -> FreeResult<Value> {
        self.free_one(value)
    }

    /// Force-free a batch of values, fail-fast.
    pub fn free_all(&self, values: &[Value]) -> FreeResult<()> {
        for value in values {
            self.free_one(*value)?;
        }
        Ok(())
    }

    /// Eligibility check alone: would `free(value)` be permitted?
    ///
    /// Returns the category teardown would dispatch on. No side effects
    /// beyond stale-identity accounting.
    pub fn classify(&self, value: Value) -> FreeResult<Category> {
        let id = classify::require_heap_ref(value)?;
        self.read(id, classify::eligible_category)?
    }

    fn free_one(&self, value: Value) -> FreeResult<Value> {
        let id = classify::require_heap_ref(value).map_err(|err| {
            diagnostics::emit_with_context(&RC001, value.kind_name());
            err
        })?;

        let mut free_list = self.free_list.lock();
        let mut slots = self.slots.lock();

        let slot = match slots.get_mut(id.raw_index() as usize) {
            Some(slot) if slot.generation == id.raw_generation() => slot,
            _ => return Err(self.stale(id)),
        };

        let object = match &mut slot.state {
            SlotState::Occupied(object) => object,
            SlotState::Tombstone => {
                self.double_free_hits.fetch_add(1, Ordering::Relaxed);
                diagnostics::emit_with_context(&RC102, &self.double_free_context(id));
                return Err(FreeError::DoubleFree { id });
            }
        };

        classify::ensure_eligible(&object.storage).map_err(|err| {
            diagnostics::emit_with_context(&RC002, &format!("{id:?}"));
            err
        })?;

        let hook_value = finalizer::invoke(object).map_err(|err| {
            diagnostics::emit_with_context(&RC201, &format!("{id:?}"));
            err
        })?;

        // Poison first in bookkeeping order: once the storage leaves the
        // slot, no resolution path can observe it.
        let object = poison::retire(slot, id.raw_index(), &mut free_list);
        drop(slots);
        drop(free_list);

        #[cfg(feature = "debug")]
        self.free_sites.record(id.raw_index());

        let bytes = teardown::release(object.storage, self.config.poison_on_free, &self.deferred);

        self.live_count.fetch_sub(1, Ordering::Relaxed);
        self.total_freed.fetch_add(1, Ordering::Relaxed);
        self.bytes_released.fetch_add(bytes as u64, Ordering::Relaxed);

        Ok(hook_value.unwrap_or(Value::Nil))
    }

    #[cfg(feature = "debug")]
    fn double_free_context(&self, id: crate::heap::id::ObjectId) -> String {
        match self.free_sites.describe(id.raw_index()) {
            Some(site) => format!("{id:?}, first freed at:\n{site}"),
            None => format!("{id:?}"),
        }
    }

    #[cfg(not(feature = "debug"))]
    fn double_free_context(&self, id: crate::heap::id::ObjectId) -> String {
        format!("{id:?}")
    }
}
