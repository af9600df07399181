//! The object heap: a slot arena addressed by generational identities.
//!
//! The heap is the identity-resolution facility the free pipeline must
//! keep consistent: after a successful free, the freed identity always
//! resolves to `StaleIdentity`, never to a view of the old storage, and a
//! reused slot hands out a fresh generation so old identities keep
//! failing.

pub mod id;
pub mod symbols;

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};

use crate::api::config::HeapConfig;
use crate::api::stats::HeapStats;
use crate::diagnostics::{self, RC101};
use crate::error::{BoxedError, FreeError, FreeResult};
use crate::object::descriptor::{Builtin, Descriptor};
use crate::object::foreign::{ForeignBuf, ForeignData, ReleaseFn};
use crate::object::{
    DigitBuf, PatternBuf, RecordBuf, SeqBuf, Storage, TableBuf, TextBuf, Value,
};
use crate::reclaim::deferred::DeferredQueue;
use crate::sync::mutex::Mutex;

use self::id::ObjectId;
use self::symbols::{Sym, SymbolTable};

/// Per-instance finalizer hook.
///
/// Invoked with the object's pre-free storage; the returned value becomes
/// the result of `free`. A hook must not call back into the heap that is
/// freeing it: the pipeline holds the slot table for its duration.
pub type Finalizer = Box<dyn FnMut(&Storage) -> Result<Value, BoxedError> + Send>;

/// A live heap object: backing storage plus its optional finalizer.
pub(crate) struct Object {
    pub storage: Storage,
    pub finalizer: Option<Finalizer>,
}

/// Occupancy state of a slot.
pub(crate) enum SlotState {
    /// Slot holds a live object.
    Occupied(Object),
    /// Slot's object was freed; the generation identifies which identities
    /// are now stale.
    Tombstone,
}

/// One slot in the arena.
pub(crate) struct Slot {
    pub generation: u32,
    pub state: SlotState,
}

/// The object heap.
///
/// Internally synchronized so a process-wide instance is sound to share;
/// the free pipeline itself is synchronous and assumes exclusive access to
/// its target for the duration of one call.
pub struct Heap {
    pub(crate) slots: Mutex<Vec<Slot>>,
    pub(crate) free_list: Mutex<Vec<u32>>,
    symbols: Mutex<SymbolTable>,
    builtins: [ObjectId; Builtin::COUNT],
    pub(crate) deferred: DeferredQueue,
    pub(crate) config: HeapConfig,

    pub(crate) live_count: AtomicU32,
    pub(crate) total_allocated: AtomicU64,
    pub(crate) total_freed: AtomicU64,
    pub(crate) bytes_released: AtomicU64,
    pub(crate) double_free_hits: AtomicU64,
    stale_resolves: AtomicU64,

    #[cfg(feature = "debug")]
    pub(crate) free_sites: crate::debug::FreeSiteTable,
}

impl Heap {
    /// Create a heap with the given configuration. The builtin descriptor
    /// set is registered before the heap is handed out.
    pub fn new(config: HeapConfig) -> Self {
        let mut heap = Self {
            slots: Mutex::new(Vec::with_capacity(config.initial_slots)),
            free_list: Mutex::new(Vec::new()),
            symbols: Mutex::new(SymbolTable::new()),
            builtins: [ObjectId::dangling(); Builtin::COUNT],
            deferred: DeferredQueue::new(),
            config,
            live_count: AtomicU32::new(0),
            total_allocated: AtomicU64::new(0),
            total_freed: AtomicU64::new(0),
            bytes_released: AtomicU64::new(0),
            double_free_hits: AtomicU64::new(0),
            stale_resolves: AtomicU64::new(0),
            #[cfg(feature = "debug")]
            free_sites: crate::debug::FreeSiteTable::new(),
        };

        for builtin in Builtin::ALL {
            let id = heap.alloc_object(Storage::Descriptor(Descriptor::builtin(builtin)));
            heap.builtins[builtin as usize] = id;
        }

        heap
    }

    /// Create a heap with the default configuration.
    pub fn with_defaults() -> Self {
        Self::new(HeapConfig::default())
    }

    // =========================================================================
    // Allocation
    // =========================================================================

    /// Allocate a text object.
    pub fn alloc_text(&self, contents: &str) -> ObjectId {
        self.alloc_object(Storage::Text(TextBuf::from_str(contents)))
    }

    /// Allocate a sequence object.
    pub fn alloc_sequence(&self, values: &[Value]) -> ObjectId {
        self.alloc_object(Storage::Sequence(SeqBuf::from_slice(values)))
    }

    /// Allocate a key-value table object.
    pub fn alloc_table(&self, pairs: &[(Value, Value)]) -> ObjectId {
        self.alloc_object(Storage::Table(TableBuf::from_pairs(pairs)))
    }

    /// Allocate a compiled pattern object.
    pub fn alloc_pattern(&self, source: &str) -> ObjectId {
        self.alloc_object(Storage::Pattern(PatternBuf::compile(source)))
    }

    /// Allocate a record of the given descriptor.
    ///
    /// Fails with `StaleIdentity` if the descriptor is not live.
    pub fn alloc_record(
        &self,
        descriptor: ObjectId,
        fields: &[(Sym, Value)],
    ) -> FreeResult<ObjectId> {
        self.resolve(descriptor)?;
        Ok(self.alloc_object(Storage::Record(RecordBuf::new(descriptor, fields))))
    }

    /// Allocate a boxed float object.
    pub fn alloc_float(&self, value: f64) -> ObjectId {
        self.alloc_object(Storage::Float(value))
    }

    /// Allocate a big-integer object from little-endian digits.
    pub fn alloc_bigint(&self, digits: &[u32], negative: bool) -> ObjectId {
        self.alloc_object(Storage::BigInt(DigitBuf::from_digits(digits, negative)))
    }

    /// Allocate a foreign object whose payload simply drops on free.
    pub fn alloc_foreign(&self, data: ForeignData) -> ObjectId {
        self.alloc_object(Storage::Foreign(ForeignBuf::new(data)))
    }

    /// Allocate a foreign object with an external release callback. The
    /// callback runs at `drain_deferred`, not inline during free.
    pub fn alloc_foreign_with_release(&self, data: ForeignData, release: ReleaseFn) -> ObjectId {
        self.alloc_object(Storage::Foreign(ForeignBuf::with_release(data, release)))
    }

    /// Register a user-defined type descriptor. Descriptors are critical:
    /// they can never be force-freed.
    pub fn define_descriptor(&self, name: &str) -> ObjectId {
        self.alloc_object(Storage::Descriptor(Descriptor::named(name)))
    }

    /// Identity of a builtin descriptor.
    pub fn builtin(&self, builtin: Builtin) -> ObjectId {
        self.builtins[builtin as usize]
    }

    pub(crate) fn alloc_object(&self, storage: Storage) -> ObjectId {
        let object = Object {
            storage,
            finalizer: None,
        };

        let mut free_list = self.free_list.lock();
        let mut slots = self.slots.lock();

        let (index, generation) = if let Some(index) = free_list.pop() {
            let slot = &mut slots[index as usize];
            slot.generation = slot.generation.wrapping_add(1);
            slot.state = SlotState::Occupied(object);
            (index, slot.generation)
        } else {
            let index = slots.len() as u32;
            slots.push(Slot {
                generation: 1,
                state: SlotState::Occupied(object),
            });
            (index, 1)
        };

        self.live_count.fetch_add(1, Ordering::Relaxed);
        self.total_allocated.fetch_add(1, Ordering::Relaxed);

        ObjectId::new(index, generation)
    }

    // =========================================================================
    // Resolution
    // =========================================================================

    /// Resolve an identity, returning the live object's category.
    ///
    /// A poisoned or reused identity deterministically fails with
    /// `StaleIdentity`; it never yields a view of the freed storage.
    pub fn resolve(&self, id: ObjectId) -> FreeResult<crate::object::Category> {
        self.read(id, |storage| storage.category())
    }

    /// Whether an identity currently resolves.
    pub fn is_live(&self, id: ObjectId) -> bool {
        let slots = self.slots.lock();
        matches!(
            slots.get(id.raw_index() as usize),
            Some(slot) if slot.generation == id.raw_generation()
                && matches!(slot.state, SlotState::Occupied(_))
        )
    }

    /// Run `f` against the object's storage.
    pub fn read<R>(&self, id: ObjectId, f: impl FnOnce(&Storage) -> R) -> FreeResult<R> {
        let slots = self.slots.lock();
        match slots.get(id.raw_index() as usize) {
            Some(slot) if slot.generation == id.raw_generation() => match &slot.state {
                SlotState::Occupied(object) => Ok(f(&object.storage)),
                SlotState::Tombstone => Err(self.stale(id)),
            },
            _ => Err(self.stale(id)),
        }
    }

    /// Run `f` against the object's storage, mutably.
    pub fn write<R>(&self, id: ObjectId, f: impl FnOnce(&mut Storage) -> R) -> FreeResult<R> {
        let mut slots = self.slots.lock();
        match slots.get_mut(id.raw_index() as usize) {
            Some(slot) if slot.generation == id.raw_generation() => match &mut slot.state {
                SlotState::Occupied(object) => Ok(f(&mut object.storage)),
                SlotState::Tombstone => Err(self.stale(id)),
            },
            _ => Err(self.stale(id)),
        }
    }

    pub(crate) fn stale(&self, id: ObjectId) -> FreeError {
        self.stale_resolves.fetch_add(1, Ordering::Relaxed);
        diagnostics::emit_with_context(&RC101, &format!("{id:?}"));
        FreeError::StaleIdentity { id }
    }

    // =========================================================================
    // Finalizers
    // =========================================================================

    /// Attach a finalizer hook to a live object, replacing any previous
    /// hook. The hook runs immediately before teardown when the object is
    /// freed, observing its pre-free storage.
    pub fn set_finalizer(
        &self,
        id: ObjectId,
        hook: impl FnMut(&Storage) -> Result<Value, BoxedError> + Send + 'static,
    ) -> FreeResult<()> {
        self.with_object_mut(id, |object| {
            object.finalizer = Some(Box::new(hook));
        })
    }

    /// Remove an object's finalizer hook, if any.
    pub fn clear_finalizer(&self, id: ObjectId) -> FreeResult<()> {
        self.with_object_mut(id, |object| {
            object.finalizer = None;
        })
    }

    fn with_object_mut<R>(&self, id: ObjectId, f: impl FnOnce(&mut Object) -> R) -> FreeResult<R> {
        let mut slots = self.slots.lock();
        match slots.get_mut(id.raw_index() as usize) {
            Some(slot) if slot.generation == id.raw_generation() => match &mut slot.state {
                SlotState::Occupied(object) => Ok(f(object)),
                SlotState::Tombstone => Err(self.stale(id)),
            },
            _ => Err(self.stale(id)),
        }
    }

    // =========================================================================
    // Symbols and record fields
    // =========================================================================

    /// Intern a symbol.
    pub fn intern(&self, name: &str) -> Sym {
        self.symbols.lock().intern(name)
    }

    /// Name of an interned symbol.
    pub fn sym_name(&self, sym: Sym) -> Option<String> {
        self.symbols.lock().name(sym).map(str::to_string)
    }

    /// Field value of a record object. Returns `None` for missing fields
    /// and for non-record objects.
    pub fn get_field(&self, id: ObjectId, name: Sym) -> FreeResult<Option<Value>> {
        self.read(id, |storage| match storage {
            Storage::Record(record) => record.get(name),
            _ => None,
        })
    }

    /// Set a field on a record object. Returns false for non-records.
    pub fn set_field(&self, id: ObjectId, name: Sym, value: Value) -> FreeResult<bool> {
        self.write(id, |storage| match storage {
            Storage::Record(record) => {
                record.set(name, value);
                true
            }
            _ => false,
        })
    }

    // =========================================================================
    // Deferred releases and statistics
    // =========================================================================

    /// Run every queued foreign release callback on the calling thread.
    /// Returns the number processed.
    pub fn drain_deferred(&self) -> usize {
        self.deferred.drain()
    }

    /// Current heap statistics.
    pub fn stats(&self) -> HeapStats {
        let total_slots = self.slots.lock().len();
        let free_slots = self.free_list.lock().len();

        HeapStats {
            live_objects: self.live_count.load(Ordering::Relaxed),
            total_allocated: self.total_allocated.load(Ordering::Relaxed),
            total_freed: self.total_freed.load(Ordering::Relaxed),
            bytes_released: self.bytes_released.load(Ordering::Relaxed),
            double_free_attempts: self.double_free_hits.load(Ordering::Relaxed),
            stale_resolves: self.stale_resolves.load(Ordering::Relaxed),
            deferred_pending: self.deferred.len(),
            total_slots,
            free_slots,
        }
    }
}

impl Default for Heap {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl Drop for Heap {
    fn drop(&mut self) {
        self.deferred.drain();
    }
}
