use model::core::data_type::DataType;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ExpressionError {
    #[error("Expression is not constant: references {0}")]
    NotConstant(String),

    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    #[error("Invalid function arguments for {function}: {message}")]
    InvalidFunctionArgs { function: String, message: String },

    #[error("Type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: String, actual: String },

    #[error("Cannot cast {value} to {target}")]
    InvalidCast { value: String, target: DataType },

    #[error("Arithmetic overflow in {0}")]
    Overflow(String),

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),
}

pub type Result<T> = std::result::Result<T, ExpressionError>;
