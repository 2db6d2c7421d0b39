use crate::core::{data_type::DataType, identifiers::SlotId, value::Value};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Typed expression node as produced by the planner.
///
/// Every node carries the type the planner declared for it; for casts this is
/// the target type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expr {
    pub data_type: DataType,
    pub kind: ExprKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExprKind {
    Literal(Value),
    SlotRef(SlotRef),
    Cast(Box<Expr>),
    BinaryPred {
        op: BinaryOp,
        children: Vec<Expr>,
    },
    InPred {
        is_not_in: bool,
        children: Vec<Expr>,
    },
    CompoundPred {
        op: CompoundOp,
        children: Vec<Expr>,
    },
    FunctionCall {
        name: String,
        args: Vec<Expr>,
    },
    Arithmetic {
        op: ArithmeticOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    IsNull {
        negated: bool,
        operand: Box<Expr>,
    },
    /// Node kinds the planner produces but nothing here introspects
    /// (CASE, LIKE, subqueries...).
    Other {
        name: String,
        children: Vec<Expr>,
    },
}

/// Reference to a column slot of the scanned tuple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotRef {
    pub slot_id: SlotId,
    pub label: Option<String>,
}

/// Node-kind tag, used by downstream builders to decide how a literal renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeType {
    BoolLiteral,
    IntLiteral,
    FloatLiteral,
    DecimalLiteral,
    StringLiteral,
    DateLiteral,
    NullLiteral,
    SlotRef,
    CastExpr,
    BinaryPred,
    InPred,
    CompoundPred,
    FunctionCall,
    ArithmeticExpr,
    IsNullPred,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    Equal,
    NotEqual,
    GreaterThan,
    LessThan,
    GreaterOrEqual,
    LessOrEqual,
    /// Null-safe equality (`<=>`).
    EqualForNull,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompoundOp {
    And,
    Or,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArithmeticOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
}

impl BinaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Equal => "=",
            BinaryOp::NotEqual => "!=",
            BinaryOp::GreaterThan => ">",
            BinaryOp::LessThan => "<",
            BinaryOp::GreaterOrEqual => ">=",
            BinaryOp::LessOrEqual => "<=",
            BinaryOp::EqualForNull => "<=>",
        }
    }

    /// The operator that keeps the predicate's meaning when its operands swap
    /// sides: `a < b` holds iff `b > a`.
    pub fn mirrored(&self) -> Self {
        match self {
            BinaryOp::GreaterThan => BinaryOp::LessThan,
            BinaryOp::LessThan => BinaryOp::GreaterThan,
            BinaryOp::GreaterOrEqual => BinaryOp::LessOrEqual,
            BinaryOp::LessOrEqual => BinaryOp::GreaterOrEqual,
            symmetric => *symmetric,
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl ArithmeticOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            ArithmeticOp::Add => "+",
            ArithmeticOp::Subtract => "-",
            ArithmeticOp::Multiply => "*",
            ArithmeticOp::Divide => "/",
            ArithmeticOp::Modulo => "%",
        }
    }
}

impl Expr {
    pub fn new(data_type: DataType, kind: ExprKind) -> Self {
        Self { data_type, kind }
    }

    pub fn literal(value: impl Into<Value>) -> Self {
        let value = value.into();
        Self::new(value.data_type(), ExprKind::Literal(value))
    }

    pub fn typed_literal(value: impl Into<Value>, data_type: DataType) -> Self {
        Self::new(data_type, ExprKind::Literal(value.into()))
    }

    pub fn null() -> Self {
        Self::literal(Value::Null)
    }

    pub fn slot(slot_id: impl Into<SlotId>, data_type: DataType) -> Self {
        Self::new(
            data_type,
            ExprKind::SlotRef(SlotRef {
                slot_id: slot_id.into(),
                label: None,
            }),
        )
    }

    pub fn labeled_slot(
        slot_id: impl Into<SlotId>,
        label: impl Into<String>,
        data_type: DataType,
    ) -> Self {
        Self::new(
            data_type,
            ExprKind::SlotRef(SlotRef {
                slot_id: slot_id.into(),
                label: Some(label.into()),
            }),
        )
    }

    pub fn cast(self, target: DataType) -> Self {
        Self::new(target, ExprKind::Cast(Box::new(self)))
    }

    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        Self::new(
            DataType::Boolean,
            ExprKind::BinaryPred {
                op,
                children: vec![left, right],
            },
        )
    }

    pub fn equals(left: Expr, right: Expr) -> Self {
        Self::binary(BinaryOp::Equal, left, right)
    }

    pub fn in_list(head: Expr, members: Vec<Expr>, is_not_in: bool) -> Self {
        let mut children = Vec::with_capacity(members.len() + 1);
        children.push(head);
        children.extend(members);
        Self::new(DataType::Boolean, ExprKind::InPred { is_not_in, children })
    }

    pub fn compound(op: CompoundOp, children: Vec<Expr>) -> Self {
        Self::new(DataType::Boolean, ExprKind::CompoundPred { op, children })
    }

    pub fn or(left: Expr, right: Expr) -> Self {
        Self::compound(CompoundOp::Or, vec![left, right])
    }

    pub fn and(left: Expr, right: Expr) -> Self {
        Self::compound(CompoundOp::And, vec![left, right])
    }

    pub fn negate(operand: Expr) -> Self {
        Self::compound(CompoundOp::Not, vec![operand])
    }

    pub fn function(name: impl Into<String>, args: Vec<Expr>, return_type: DataType) -> Self {
        Self::new(
            return_type,
            ExprKind::FunctionCall {
                name: name.into(),
                args,
            },
        )
    }

    pub fn arithmetic(op: ArithmeticOp, left: Expr, right: Expr, data_type: DataType) -> Self {
        Self::new(
            data_type,
            ExprKind::Arithmetic {
                op,
                left: Box::new(left),
                right: Box::new(right),
            },
        )
    }

    pub fn is_null(operand: Expr, negated: bool) -> Self {
        Self::new(
            DataType::Boolean,
            ExprKind::IsNull {
                negated,
                operand: Box::new(operand),
            },
        )
    }

    pub fn node_type(&self) -> NodeType {
        match &self.kind {
            ExprKind::Literal(value) => match value {
                Value::Boolean(_) => NodeType::BoolLiteral,
                Value::Int(_) => NodeType::IntLiteral,
                Value::Float(_) => NodeType::FloatLiteral,
                Value::Decimal(_) => NodeType::DecimalLiteral,
                Value::String(_) => NodeType::StringLiteral,
                Value::Date(_) | Value::Timestamp(_) => NodeType::DateLiteral,
                Value::Null => NodeType::NullLiteral,
            },
            ExprKind::SlotRef(_) => NodeType::SlotRef,
            ExprKind::Cast(_) => NodeType::CastExpr,
            ExprKind::BinaryPred { .. } => NodeType::BinaryPred,
            ExprKind::InPred { .. } => NodeType::InPred,
            ExprKind::CompoundPred { .. } => NodeType::CompoundPred,
            ExprKind::FunctionCall { .. } => NodeType::FunctionCall,
            ExprKind::Arithmetic { .. } => NodeType::ArithmeticExpr,
            ExprKind::IsNull { .. } => NodeType::IsNullPred,
            ExprKind::Other { .. } => NodeType::Other,
        }
    }

    /// Direct children, left to right.
    pub fn children(&self) -> Vec<&Expr> {
        match &self.kind {
            ExprKind::Literal(_) | ExprKind::SlotRef(_) => Vec::new(),
            ExprKind::Cast(inner) => vec![inner.as_ref()],
            ExprKind::BinaryPred { children, .. }
            | ExprKind::InPred { children, .. }
            | ExprKind::CompoundPred { children, .. }
            | ExprKind::Other { children, .. } => children.iter().collect(),
            ExprKind::FunctionCall { args, .. } => args.iter().collect(),
            ExprKind::Arithmetic { left, right, .. } => vec![left.as_ref(), right.as_ref()],
            ExprKind::IsNull { operand, .. } => vec![operand.as_ref()],
        }
    }

    /// The node with every enclosing cast removed.
    pub fn strip_casts(&self) -> &Expr {
        let mut expr = self;
        while let ExprKind::Cast(inner) = &expr.kind {
            expr = inner;
        }
        expr
    }

    pub fn type_without_cast(&self) -> NodeType {
        self.strip_casts().node_type()
    }

    pub fn as_slot_ref(&self) -> Option<&SlotRef> {
        match &self.kind {
            ExprKind::SlotRef(slot_ref) => Some(slot_ref),
            _ => None,
        }
    }

    pub fn is_slot_ref(&self) -> bool {
        self.as_slot_ref().is_some()
    }

    /// Every slot id referenced anywhere in this subtree, in depth-first order.
    pub fn slot_ids(&self) -> Vec<SlotId> {
        let mut ids = Vec::new();
        self.collect_slot_ids(&mut ids);
        ids
    }

    fn collect_slot_ids(&self, ids: &mut Vec<SlotId>) {
        if let ExprKind::SlotRef(slot_ref) = &self.kind {
            ids.push(slot_ref.slot_id);
        }
        for child in self.children() {
            child.collect_slot_ids(ids);
        }
    }

    pub fn is_constant(&self) -> bool {
        self.slot_ids().is_empty()
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let join = |children: &[Expr], sep: &str| {
            children
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(sep)
        };

        match &self.kind {
            ExprKind::Literal(value) => write!(f, "{value}"),
            ExprKind::SlotRef(slot_ref) => match &slot_ref.label {
                Some(label) => f.write_str(label),
                None => write!(f, "{}", slot_ref.slot_id),
            },
            ExprKind::Cast(inner) => write!(f, "CAST({inner} AS {})", self.data_type),
            ExprKind::BinaryPred { op, children } => {
                write!(f, "({})", join(children, &format!(" {op} ")))
            }
            ExprKind::InPred {
                is_not_in,
                children,
            } => {
                let keyword = if *is_not_in { "NOT IN" } else { "IN" };
                match children.split_first() {
                    Some((head, members)) => {
                        write!(f, "{head} {keyword} ({})", join(members, ", "))
                    }
                    None => write!(f, "{keyword} ()"),
                }
            }
            ExprKind::CompoundPred { op, children } => match op {
                CompoundOp::Not => write!(f, "NOT {}", join(children, " ")),
                CompoundOp::And => write!(f, "({})", join(children, " AND ")),
                CompoundOp::Or => write!(f, "({})", join(children, " OR ")),
            },
            ExprKind::FunctionCall { name, args } => write!(f, "{name}({})", join(args, ", ")),
            ExprKind::Arithmetic { op, left, right } => {
                write!(f, "({left} {} {right})", op.symbol())
            }
            ExprKind::IsNull { negated, operand } => {
                let keyword = if *negated { "IS NOT NULL" } else { "IS NULL" };
                write!(f, "{operand} {keyword}")
            }
            ExprKind::Other { name, children } => write!(f, "{name}({})", join(children, ", ")),
        }
    }
}
