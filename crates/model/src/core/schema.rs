use crate::core::{
    data_type::DataType,
    identifiers::{SlotId, TupleId},
};
use serde::{Deserialize, Serialize};

/// A named, typed column position within a row schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotDescriptor {
    pub id: SlotId,
    pub col_name: String,
    pub data_type: DataType,
}

impl SlotDescriptor {
    pub fn new(id: impl Into<SlotId>, col_name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            id: id.into(),
            col_name: col_name.into(),
            data_type,
        }
    }
}

/// Row schema owning the slots a conjunct may reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TupleDescriptor {
    pub id: Option<TupleId>,
    slots: Vec<SlotDescriptor>,
}

impl TupleDescriptor {
    pub fn new(id: impl Into<TupleId>, slots: Vec<SlotDescriptor>) -> Self {
        Self {
            id: Some(id.into()),
            slots,
        }
    }

    pub fn with_slot(mut self, slot: SlotDescriptor) -> Self {
        self.slots.push(slot);
        self
    }

    pub fn slots(&self) -> &[SlotDescriptor] {
        &self.slots
    }

    pub fn column(&self, name: &str) -> Option<&SlotDescriptor> {
        self.slots
            .iter()
            .find(|slot| slot.col_name.eq_ignore_ascii_case(name))
    }
}

/// Lookup of slot descriptors by id.
pub trait SlotLookup {
    fn slot(&self, id: SlotId) -> Option<&SlotDescriptor>;

    /// First slot matching any of the given ids, in `ids` order.
    fn find_any(&self, ids: &[SlotId]) -> Option<&SlotDescriptor> {
        ids.iter().find_map(|id| self.slot(*id))
    }
}

impl SlotLookup for TupleDescriptor {
    fn slot(&self, id: SlotId) -> Option<&SlotDescriptor> {
        self.slots.iter().find(|slot| slot.id == id)
    }
}
