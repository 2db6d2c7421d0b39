mod binary;

use crate::{
    error::{ExpressionError, Result},
    functions::FunctionRegistry,
    types::cast_value,
};
use binary::ArithmeticEvaluator;
use model::{
    core::value::Value,
    execution::expr::{Expr, ExprKind},
};

/// Extracts the value of an expression node without any row context.
///
/// Implementations must only succeed for subtrees that evaluate to the same
/// value for every row; anything referencing a slot is an error.
pub trait LiteralExtractor {
    fn extract(&self, expr: &Expr) -> Result<Value>;
}

/// Constant folder over literals, casts, arithmetic and pure functions
pub struct ConstantFolder {
    functions: FunctionRegistry,
}

impl ConstantFolder {
    pub fn new() -> Self {
        Self::with_functions(FunctionRegistry::new())
    }

    pub fn with_functions(functions: FunctionRegistry) -> Self {
        Self { functions }
    }
}

impl Default for ConstantFolder {
    fn default() -> Self {
        Self::new()
    }
}

impl LiteralExtractor for ConstantFolder {
    fn extract(&self, expr: &Expr) -> Result<Value> {
        match &expr.kind {
            ExprKind::Literal(value) => Ok(value.clone()),

            ExprKind::SlotRef(_) => Err(ExpressionError::NotConstant(expr.to_string())),

            ExprKind::Cast(inner) => cast_value(self.extract(inner)?, expr.data_type),

            ExprKind::Arithmetic { op, left, right } => {
                let left = self.extract(left)?;
                let right = self.extract(right)?;
                ArithmeticEvaluator::new(&left, &right, *op, expr.data_type).evaluate()
            }

            ExprKind::FunctionCall { name, args } => {
                let args = args
                    .iter()
                    .map(|arg| self.extract(arg))
                    .collect::<Result<Vec<_>>>()?;
                self.functions.call(name, &args)
            }

            ExprKind::BinaryPred { .. }
            | ExprKind::InPred { .. }
            | ExprKind::CompoundPred { .. }
            | ExprKind::IsNull { .. }
            | ExprKind::Other { .. } => Err(ExpressionError::UnsupportedOperation(format!(
                "cannot fold {:?} node: {expr}",
                expr.node_type()
            ))),
        }
    }
}
