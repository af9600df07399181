//! Heap configuration.

/// Configuration for a [`Heap`](crate::Heap).
#[derive(Debug, Clone)]
pub struct HeapConfig {
    /// Slot capacity reserved up front (default: 1024).
    pub initial_slots: usize,

    /// Fill released buffers with the freed pattern before deallocation.
    /// Defaults on when the `debug` feature is enabled.
    pub poison_on_free: bool,
}

impl Default for HeapConfig {
    fn default() -> Self {
        Self {
            initial_slots: 1024,
            poison_on_free: cfg!(feature = "debug"),
        }
    }
}

impl HeapConfig {
    /// Create a minimal config for testing or constrained environments.
    pub fn minimal() -> Self {
        Self {
            initial_slots: 16,
            poison_on_free: false,
        }
    }

    /// Builder pattern: set reserved slot capacity.
    pub fn with_initial_slots(mut self, slots: usize) -> Self {
        self.initial_slots = slots;
        self
    }

    /// Builder pattern: enable poison-fill of released buffers.
    pub fn with_poison(mut self, poison: bool) -> Self {
        self.poison_on_free = poison;
        self
    }
}
