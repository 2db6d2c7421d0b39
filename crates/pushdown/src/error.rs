use expression_engine::ExpressionError;
use model::{
    core::{data_type::DataType, identifiers::SlotId},
    execution::expr::{CompoundOp, NodeType},
};
use thiserror::Error;

/// Why a conjunct cannot be handed to the search backend.
///
/// Callers only branch on success vs. failure; the variant exists for
/// diagnostics.
#[derive(Debug, Error, PartialEq)]
pub enum UnsupportedShape {
    #[error("{node:?} node has an unexpected number of children: {actual}")]
    ArityMismatch { node: NodeType, actual: usize },

    #[error("comparison has no column operand")]
    NoColumnOperand,

    #[error("comparison between two columns")]
    BothColumnOperands,

    #[error("no slot in the tuple matches {slots:?}")]
    SlotNotFound { slots: Vec<SlotId> },

    #[error("IN predicate is applied to a {0:?} node, not a column")]
    InHeadNotColumn(NodeType),

    #[error("IN predicate on column '{column}' has no members")]
    EmptyMembership { column: String },

    #[error(
        "IN member #{position} on column '{column}' is {actual}, not compatible with {expected}"
    )]
    IncompatibleMember {
        column: String,
        position: usize,
        expected: DataType,
        actual: DataType,
    },

    #[error("{function}() called with {args} argument(s), the match argument is missing")]
    MissingMatchArgument { function: String, args: usize },

    #[error("compound operator is {0:?}, only OR can be pushed down")]
    NonOrCompound(CompoundOp),

    #[error("{0:?} nodes cannot be pushed down")]
    UnsupportedNode(NodeType),

    #[error("cannot extract a literal from {node}: {source}")]
    LiteralExtraction {
        node: String,
        #[source]
        source: ExpressionError,
    },
}
