pub mod string;

use crate::error::{ExpressionError, Result};
use model::core::value::Value;
use std::collections::HashMap;

/// Type alias for function implementations
pub type FunctionImpl = fn(&[Value]) -> Result<Value>;

/// Registry of the pure functions a constant can be folded through
pub struct FunctionRegistry {
    functions: HashMap<String, FunctionImpl>,
}

impl FunctionRegistry {
    /// Create a new function registry with all built-in functions
    pub fn new() -> Self {
        let mut registry = Self {
            functions: HashMap::new(),
        };

        registry.register("lower", string::eval_lower);
        registry.register("upper", string::eval_upper);
        registry.register("concat", string::eval_concat);
        registry.register("trim", string::eval_trim);

        registry
    }

    pub fn register(&mut self, name: &str, func: FunctionImpl) {
        self.functions.insert(name.to_lowercase(), func);
    }

    pub fn call(&self, name: &str, args: &[Value]) -> Result<Value> {
        let func = self
            .functions
            .get(&name.to_lowercase())
            .ok_or_else(|| ExpressionError::UnknownFunction(name.to_string()))?;

        func(args)
    }

    pub fn has_function(&self, name: &str) -> bool {
        self.functions.contains_key(&name.to_lowercase())
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
