//! Generic record backing storage: descriptor reference plus field table.

use std::collections::HashMap;

use crate::heap::id::ObjectId;
use crate::heap::symbols::Sym;
use crate::object::Value;

/// Field-slot table for a generic record.
///
/// The descriptor reference is an identity, not owned storage; teardown
/// releases only the field table.
pub struct RecordBuf {
    descriptor: ObjectId,
    fields: HashMap<Sym, Value>,
}

impl RecordBuf {
    /// Create a record of the given descriptor with initial fields.
    pub fn new(descriptor: ObjectId, fields: &[(Sym, Value)]) -> Self {
        Self {
            descriptor,
            fields: fields.iter().copied().collect(),
        }
    }

    /// Identity of the record's type descriptor.
    pub fn descriptor(&self) -> ObjectId {
        self.descriptor
    }

    /// Number of populated fields.
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Value of the field named by `name`.
    pub fn get(&self, name: Sym) -> Option<Value> {
        self.fields.get(&name).copied()
    }

    /// Set a field, returning the previous value if any.
    pub fn set(&mut self, name: Sym, value: Value) -> Option<Value> {
        self.fields.insert(name, value)
    }

    /// Drop the field table, returning an estimate of the bytes freed.
    pub(crate) fn release(&mut self) -> usize {
        let fields = std::mem::take(&mut self.fields);
        let freed = fields.capacity() * std::mem::size_of::<(Sym, Value)>();
        drop(fields);
        freed
    }
}
