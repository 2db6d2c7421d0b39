pub mod literal;

use literal::ExtLiteral;
use model::{
    core::data_type::DataType,
    execution::expr::{BinaryOp, NodeType},
};
use serde::{Deserialize, Serialize};
use std::{fmt, ops::Deref};

/// Column reference carried by a backend function predicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtColumnDesc {
    pub name: String,
    pub data_type: DataType,
}

/// A predicate the search backend can evaluate on its own.
///
/// Values of this type own everything they carry and outlive the expression
/// tree they were extracted from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExternalPredicate {
    /// `column <op> literal`
    Comparison {
        col_name: String,
        col_type: DataType,
        op: BinaryOp,
        value: ExtLiteral,
    },
    /// `column [NOT] IN (v1, v2, ...)`
    SetMembership {
        col_name: String,
        col_type: DataType,
        is_not_in: bool,
        values: Vec<ExtLiteral>,
    },
    /// A backend-native function such as the full-text match function.
    FunctionMatch {
        function: String,
        // Reserved: always empty for now.
        columns: Vec<ExtColumnDesc>,
        values: Vec<ExtLiteral>,
    },
}

impl ExternalPredicate {
    /// Kind of the source node this predicate was built from.
    pub fn node_type(&self) -> NodeType {
        match self {
            ExternalPredicate::Comparison { .. } => NodeType::BinaryPred,
            ExternalPredicate::SetMembership { .. } => NodeType::InPred,
            ExternalPredicate::FunctionMatch { .. } => NodeType::FunctionCall,
        }
    }

    pub fn col_name(&self) -> Option<&str> {
        match self {
            ExternalPredicate::Comparison { col_name, .. }
            | ExternalPredicate::SetMembership { col_name, .. } => Some(col_name),
            ExternalPredicate::FunctionMatch { .. } => None,
        }
    }

    pub fn col_type(&self) -> Option<DataType> {
        match self {
            ExternalPredicate::Comparison { col_type, .. }
            | ExternalPredicate::SetMembership { col_type, .. } => Some(*col_type),
            ExternalPredicate::FunctionMatch { .. } => None,
        }
    }

    pub fn values(&self) -> &[ExtLiteral] {
        match self {
            ExternalPredicate::Comparison { value, .. } => std::slice::from_ref(value),
            ExternalPredicate::SetMembership { values, .. }
            | ExternalPredicate::FunctionMatch { values, .. } => values,
        }
    }
}

impl fmt::Display for ExternalPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let join = |values: &[ExtLiteral]| {
            values
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        };

        match self {
            ExternalPredicate::Comparison {
                col_name, op, value, ..
            } => write!(f, "{col_name} {op} {value}"),
            ExternalPredicate::SetMembership {
                col_name,
                is_not_in,
                values,
                ..
            } => {
                let keyword = if *is_not_in { "NOT IN" } else { "IN" };
                write!(f, "{col_name} {keyword} ({})", join(values))
            }
            ExternalPredicate::FunctionMatch {
                function, values, ..
            } => write!(f, "{function}({})", join(values)),
        }
    }
}

/// Leaf predicates of one conjunct; the conjunct holds iff any of them holds.
///
/// Order follows the OR branches of the source tree, left to right.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisjunctList(Vec<ExternalPredicate>);

impl DisjunctList {
    pub fn new(disjuncts: Vec<ExternalPredicate>) -> Self {
        Self(disjuncts)
    }

    pub fn into_inner(self) -> Vec<ExternalPredicate> {
        self.0
    }
}

impl Deref for DisjunctList {
    type Target = [ExternalPredicate];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl IntoIterator for DisjunctList {
    type Item = ExternalPredicate;
    type IntoIter = std::vec::IntoIter<ExternalPredicate>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a DisjunctList {
    type Item = &'a ExternalPredicate;
    type IntoIter = std::slice::Iter<'a, ExternalPredicate>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for DisjunctList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self
            .0
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" OR ");
        f.write_str(&rendered)
    }
}
