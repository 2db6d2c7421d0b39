//! Translation of one WHERE-clause conjunct into search backend predicates.
//!
//! The backend only understands a flat OR of leaf predicates. A conjunct is
//! accepted when it is built from the following shapes:
//!
//! - `column <op> constant` and `constant <op> column`
//! - the backend match function, e.g. `esquery(column, '{"match": ...}')`
//! - `column [NOT] IN (constant, ...)` with members of the column's type family
//! - `A OR B` where both sides are accepted
//!
//! Anything else, including any AND below the root, rejects the whole conjunct
//! so the caller evaluates it locally.

use super::{compiler::FilterCompiler, slot::resolve_slot};
use crate::{
    error::UnsupportedShape,
    predicate::{DisjunctList, ExternalPredicate, literal::ExtLiteral},
    settings::{OperandOrder, PushdownSettings},
};
use expression_engine::LiteralExtractor;
use model::{
    core::schema::{SlotDescriptor, SlotLookup},
    execution::expr::{BinaryOp, CompoundOp, Expr, ExprKind, NodeType},
};
use tracing::{debug, trace};

type Result<T> = std::result::Result<T, UnsupportedShape>;

/// Extracts the disjunct list of a conjunct over one tuple.
///
/// Holds only shared references, so one extractor can serve any number of
/// conjuncts, from any number of threads.
pub struct DisjunctExtractor<'a, S: ?Sized, L: ?Sized> {
    schema: &'a S,
    literals: &'a L,
    settings: &'a PushdownSettings,
}

impl<'a, S, L> DisjunctExtractor<'a, S, L>
where
    S: SlotLookup + ?Sized,
    L: LiteralExtractor + ?Sized,
{
    pub fn new(schema: &'a S, literals: &'a L, settings: &'a PushdownSettings) -> Self {
        Self {
            schema,
            literals,
            settings,
        }
    }

    /// Translate `conjunct` as a whole. On error nothing partial escapes.
    pub fn extract(&self, conjunct: &Expr) -> Result<DisjunctList> {
        match self.build_disjuncts(conjunct) {
            Ok(disjuncts) => {
                trace!("Extracted {} disjunct(s) from {conjunct}", disjuncts.len());
                Ok(DisjunctList::new(disjuncts))
            }
            Err(err) => {
                debug!("Cannot push down conjunct {conjunct}: {err}");
                Err(err)
            }
        }
    }

    fn build_disjuncts(&self, expr: &Expr) -> Result<Vec<ExternalPredicate>> {
        let leaf = match &expr.kind {
            ExprKind::BinaryPred { op, children } => self.comparison(*op, children),

            ExprKind::FunctionCall { name, args } if self.settings.is_match_function(name) => {
                self.match_function(name, args)
            }

            ExprKind::InPred {
                is_not_in,
                children,
            } => self.membership(*is_not_in, children),

            ExprKind::CompoundPred { op, children } => return self.disjunction(*op, children),

            _ => Err(UnsupportedShape::UnsupportedNode(expr.node_type())),
        };

        leaf.map(|predicate| vec![predicate])
            .inspect_err(|err| trace!("Rejected {expr}: {err}"))
    }

    /// `A OR B`: both sides must translate; A's disjuncts come first.
    fn disjunction(&self, op: CompoundOp, children: &[Expr]) -> Result<Vec<ExternalPredicate>> {
        if op != CompoundOp::Or {
            let err = UnsupportedShape::NonOrCompound(op);
            trace!("Rejected {op:?} compound: {err}");
            return Err(err);
        }

        let [left, right] = children else {
            return Err(UnsupportedShape::ArityMismatch {
                node: NodeType::CompoundPred,
                actual: children.len(),
            });
        };

        let mut disjuncts = self.build_disjuncts(left)?;
        disjuncts.extend(self.build_disjuncts(right)?);
        Ok(disjuncts)
    }

    fn comparison(&self, op: BinaryOp, children: &[Expr]) -> Result<ExternalPredicate> {
        let [left, right] = children else {
            return Err(UnsupportedShape::ArityMismatch {
                node: NodeType::BinaryPred,
                actual: children.len(),
            });
        };

        let (column, operand, column_on_right) = match (left.is_slot_ref(), right.is_slot_ref()) {
            (true, false) => (left, right, false),
            (false, true) => (right, left, true),
            (true, true) => return Err(UnsupportedShape::BothColumnOperands),
            (false, false) => return Err(UnsupportedShape::NoColumnOperand),
        };

        let slot = self.resolve(column)?;
        let value = self.literal(operand)?;

        let op = match self.settings.operand_order {
            OperandOrder::Mirror if column_on_right => op.mirrored(),
            _ => op,
        };

        Ok(ExternalPredicate::Comparison {
            col_name: slot.col_name.clone(),
            col_type: slot.data_type,
            op,
            value,
        })
    }

    fn match_function(&self, name: &str, args: &[Expr]) -> Result<ExternalPredicate> {
        // The first argument only tells the planner which table to bind; the
        // query document is the second.
        let query = args.get(1).ok_or_else(|| UnsupportedShape::MissingMatchArgument {
            function: name.to_string(),
            args: args.len(),
        })?;

        Ok(ExternalPredicate::FunctionMatch {
            function: name.to_string(),
            columns: Vec::new(),
            values: vec![self.literal(query)?],
        })
    }

    fn membership(&self, is_not_in: bool, children: &[Expr]) -> Result<ExternalPredicate> {
        let Some((head, members)) = children.split_first() else {
            return Err(UnsupportedShape::ArityMismatch {
                node: NodeType::InPred,
                actual: 0,
            });
        };

        if head.type_without_cast() != NodeType::SlotRef {
            return Err(UnsupportedShape::InHeadNotColumn(head.node_type()));
        }

        let slot = self.resolve(head.strip_casts())?;
        if members.is_empty() {
            return Err(UnsupportedShape::EmptyMembership {
                column: slot.col_name.clone(),
            });
        }

        // Checked against the head as the planner typed it, i.e. after any cast.
        let expected = head.data_type;
        let values = members
            .iter()
            .enumerate()
            .map(|(position, member)| {
                if !expected.is_compatible(&member.data_type) {
                    return Err(UnsupportedShape::IncompatibleMember {
                        column: slot.col_name.clone(),
                        position,
                        expected,
                        actual: member.data_type,
                    });
                }
                self.literal(member)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(ExternalPredicate::SetMembership {
            col_name: slot.col_name.clone(),
            col_type: slot.data_type,
            is_not_in,
            values,
        })
    }

    fn resolve(&self, column: &Expr) -> Result<&'a SlotDescriptor> {
        resolve_slot(column, self.schema).ok_or_else(|| UnsupportedShape::SlotNotFound {
            slots: column.slot_ids(),
        })
    }

    fn literal(&self, expr: &Expr) -> Result<ExtLiteral> {
        self.literals
            .extract(expr)
            .map(|value| ExtLiteral::new(expr.node_type(), value))
            .map_err(|source| UnsupportedShape::LiteralExtraction {
                node: expr.to_string(),
                source,
            })
    }
}

impl<S, L> FilterCompiler for DisjunctExtractor<'_, S, L>
where
    S: SlotLookup + ?Sized,
    L: LiteralExtractor + ?Sized,
{
    type Filter = DisjunctList;
    type Error = UnsupportedShape;

    fn compile(&self, expr: &Expr) -> Result<DisjunctList> {
        self.extract(expr)
    }
}
