use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlotId(u32);

impl SlotId {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

impl From<u32> for SlotId {
    fn from(id: u32) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slot#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TupleId(u32);

impl TupleId {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

impl From<u32> for TupleId {
    fn from(id: u32) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for TupleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tuple#{}", self.0)
    }
}
