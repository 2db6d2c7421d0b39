pub mod error;
pub mod eval;
pub mod functions;
pub mod types;

pub use error::{ExpressionError, Result};
pub use eval::{ConstantFolder, LiteralExtractor};
pub use functions::FunctionRegistry;
pub use types::{cast_value, value_to_string};
