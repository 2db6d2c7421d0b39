use model::{core::value::Value, execution::expr::NodeType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A constant operand pulled out of the expression tree.
///
/// `node_type` is the kind of node the value came from, so the query builder
/// can tell a string literal from a folded cast or a date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtLiteral {
    node_type: NodeType,
    value: Value,
}

impl ExtLiteral {
    pub fn new(node_type: NodeType, value: Value) -> Self {
        Self { node_type, value }
    }

    pub fn node_type(&self) -> NodeType {
        self.node_type
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

impl fmt::Display for ExtLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}
