use crate::error::{ExpressionError, Result};
use bigdecimal::{BigDecimal, ToPrimitive};
use model::{
    core::{data_type::DataType, value::Value},
    execution::expr::ArithmeticOp,
};
use tracing::warn;

/// Folds an arithmetic node whose operands are already constants
pub(crate) struct ArithmeticEvaluator<'a> {
    left: &'a Value,
    right: &'a Value,
    op: ArithmeticOp,
    result_type: DataType,
}

impl<'a> ArithmeticEvaluator<'a> {
    pub fn new(left: &'a Value, right: &'a Value, op: ArithmeticOp, result_type: DataType) -> Self {
        Self {
            left,
            right,
            op,
            result_type,
        }
    }

    pub fn evaluate(&self) -> Result<Value> {
        use Value::*;

        match (self.left, self.right) {
            (Null, _) | (_, Null) => Ok(Null),
            (Int(l), Int(r)) if self.op != ArithmeticOp::Divide || self.result_type.is_integer_type() => {
                self.eval_int(*l, *r)
            }
            (Int(_), Int(_)) if self.result_type == DataType::Decimal => self.eval_decimal(),
            (Int(_), Int(_)) | (Int(_), Float(_)) | (Float(_), Int(_)) | (Float(_), Float(_)) => {
                self.eval_float()
            }
            (Decimal(_), Decimal(_)) | (Decimal(_), Int(_)) | (Int(_), Decimal(_)) => {
                self.eval_decimal()
            }
            (Decimal(_), Float(_)) | (Float(_), Decimal(_)) => self.eval_float(),
            _ => Err(ExpressionError::TypeMismatch {
                expected: "numeric operands".to_string(),
                actual: format!("{} {} {}", self.left, self.op.symbol(), self.right),
            }),
        }
    }

    fn eval_int(&self, l: i64, r: i64) -> Result<Value> {
        let result = match self.op {
            ArithmeticOp::Add => l.checked_add(r),
            ArithmeticOp::Subtract => l.checked_sub(r),
            ArithmeticOp::Multiply => l.checked_mul(r),
            ArithmeticOp::Divide | ArithmeticOp::Modulo if r == 0 => {
                return Ok(self.division_by_zero());
            }
            ArithmeticOp::Divide => l.checked_div(r),
            ArithmeticOp::Modulo => l.checked_rem(r),
        };

        result
            .map(Value::Int)
            .ok_or_else(|| ExpressionError::Overflow(format!("{l} {} {r}", self.op.symbol())))
    }

    fn eval_float(&self) -> Result<Value> {
        let l = self.as_float(self.left)?;
        let r = self.as_float(self.right)?;

        Ok(match self.op {
            ArithmeticOp::Add => Value::Float(l + r),
            ArithmeticOp::Subtract => Value::Float(l - r),
            ArithmeticOp::Multiply => Value::Float(l * r),
            ArithmeticOp::Divide | ArithmeticOp::Modulo if r == 0.0 => self.division_by_zero(),
            ArithmeticOp::Divide => Value::Float(l / r),
            ArithmeticOp::Modulo => Value::Float(l % r),
        })
    }

    fn eval_decimal(&self) -> Result<Value> {
        let l = self.as_decimal(self.left)?;
        let r = self.as_decimal(self.right)?;
        let zero = BigDecimal::from(0);

        Ok(match self.op {
            ArithmeticOp::Add => Value::Decimal(l + r),
            ArithmeticOp::Subtract => Value::Decimal(l - r),
            ArithmeticOp::Multiply => Value::Decimal(l * r),
            ArithmeticOp::Divide | ArithmeticOp::Modulo if r == zero => self.division_by_zero(),
            ArithmeticOp::Divide => Value::Decimal(l / r),
            ArithmeticOp::Modulo => Value::Decimal(l % r),
        })
    }

    // SQL semantics: x / 0 is NULL rather than an error.
    fn division_by_zero(&self) -> Value {
        warn!(
            "Division by zero while folding {} {} {}, folding to NULL",
            self.left,
            self.op.symbol(),
            self.right
        );
        Value::Null
    }

    fn as_float(&self, v: &Value) -> Result<f64> {
        match v {
            Value::Int(i) => Ok(*i as f64),
            Value::Float(f) => Ok(*f),
            Value::Decimal(d) => d.to_f64().ok_or_else(|| ExpressionError::TypeMismatch {
                expected: "DOUBLE".to_string(),
                actual: d.to_string(),
            }),
            other => Err(ExpressionError::TypeMismatch {
                expected: "DOUBLE".to_string(),
                actual: other.to_string(),
            }),
        }
    }

    fn as_decimal(&self, v: &Value) -> Result<BigDecimal> {
        match v {
            Value::Int(i) => Ok(BigDecimal::from(*i)),
            Value::Decimal(d) => Ok(d.clone()),
            other => Err(ExpressionError::TypeMismatch {
                expected: "DECIMAL".to_string(),
                actual: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn fold(left: Value, op: ArithmeticOp, right: Value, result_type: DataType) -> Result<Value> {
        ArithmeticEvaluator::new(&left, &right, op, result_type).evaluate()
    }

    #[test]
    fn test_int_arithmetic() {
        assert_eq!(
            fold(Value::Int(2), ArithmeticOp::Add, Value::Int(3), DataType::Long),
            Ok(Value::Int(5))
        );
        assert_eq!(
            fold(Value::Int(7), ArithmeticOp::Divide, Value::Int(2), DataType::Long),
            Ok(Value::Int(3))
        );
    }

    #[test]
    fn test_int_division_with_double_result() {
        assert_eq!(
            fold(Value::Int(7), ArithmeticOp::Divide, Value::Int(2), DataType::Double),
            Ok(Value::Float(3.5))
        );
    }

    #[test]
    fn test_int_division_with_decimal_result() {
        assert_eq!(
            fold(Value::Int(7), ArithmeticOp::Divide, Value::Int(2), DataType::Decimal),
            Ok(Value::Decimal(BigDecimal::from_str("3.5").unwrap()))
        );
    }

    #[test]
    fn test_overflow_is_an_error() {
        assert!(matches!(
            fold(Value::Int(i64::MAX), ArithmeticOp::Add, Value::Int(1), DataType::Long),
            Err(ExpressionError::Overflow(_))
        ));
    }

    #[test]
    fn test_division_by_zero_folds_to_null() {
        assert_eq!(
            fold(Value::Int(1), ArithmeticOp::Modulo, Value::Int(0), DataType::Int),
            Ok(Value::Null)
        );
        assert_eq!(
            fold(Value::Float(1.0), ArithmeticOp::Divide, Value::Float(0.0), DataType::Double),
            Ok(Value::Null)
        );
    }

    #[test]
    fn test_decimal_arithmetic() {
        let result = fold(
            Value::Decimal(BigDecimal::from_str("1.25").unwrap()),
            ArithmeticOp::Add,
            Value::Int(2),
            DataType::Decimal,
        );
        assert_eq!(
            result,
            Ok(Value::Decimal(BigDecimal::from_str("3.25").unwrap()))
        );
    }

    #[test]
    fn test_null_operand() {
        assert_eq!(
            fold(Value::Null, ArithmeticOp::Multiply, Value::Int(3), DataType::Int),
            Ok(Value::Null)
        );
    }

    #[test]
    fn test_string_operands_are_rejected() {
        assert!(matches!(
            fold(Value::from("a"), ArithmeticOp::Add, Value::from("b"), DataType::VarChar),
            Err(ExpressionError::TypeMismatch { .. })
        ));
    }
}
