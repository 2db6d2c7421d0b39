use crate::{
    error::{ExpressionError, Result},
    types::value_to_string,
};
use model::core::value::Value;

fn single_string<'a>(function: &str, args: &'a [Value]) -> Result<Option<&'a str>> {
    match args {
        [Value::String(s)] => Ok(Some(s.as_str())),
        [Value::Null] => Ok(None),
        [other] => Err(ExpressionError::InvalidFunctionArgs {
            function: function.to_string(),
            message: format!("Expected string, got {:?}", other),
        }),
        _ => Err(ExpressionError::InvalidFunctionArgs {
            function: function.to_string(),
            message: format!("Expected 1 argument, got {}", args.len()),
        }),
    }
}

/// Convert string to lowercase
pub fn eval_lower(args: &[Value]) -> Result<Value> {
    Ok(single_string("lower", args)?
        .map(|s| Value::String(s.to_lowercase()))
        .unwrap_or(Value::Null))
}

/// Convert string to uppercase
pub fn eval_upper(args: &[Value]) -> Result<Value> {
    Ok(single_string("upper", args)?
        .map(|s| Value::String(s.to_uppercase()))
        .unwrap_or(Value::Null))
}

/// Strip leading and trailing whitespace
pub fn eval_trim(args: &[Value]) -> Result<Value> {
    Ok(single_string("trim", args)?
        .map(|s| Value::String(s.trim().to_string()))
        .unwrap_or(Value::Null))
}

/// Concatenate multiple values into a string. Any NULL argument yields NULL.
pub fn eval_concat(args: &[Value]) -> Result<Value> {
    if args.iter().any(Value::is_null) {
        return Ok(Value::Null);
    }

    let concatenated = args.iter().map(value_to_string).collect::<String>();
    Ok(Value::String(concatenated))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lower() {
        let args = vec![Value::String("HELLO".to_string())];
        assert_eq!(eval_lower(&args).unwrap(), Value::String("hello".to_string()));
    }

    #[test]
    fn test_upper() {
        let args = vec![Value::String("world".to_string())];
        assert_eq!(eval_upper(&args).unwrap(), Value::String("WORLD".to_string()));
    }

    #[test]
    fn test_lower_rejects_non_string() {
        let err = eval_lower(&[Value::Int(1)]).unwrap_err();
        assert!(matches!(err, ExpressionError::InvalidFunctionArgs { .. }));
        assert!(eval_lower(&[]).is_err());
    }

    #[test]
    fn test_null_propagates() {
        assert_eq!(eval_upper(&[Value::Null]).unwrap(), Value::Null);
        assert_eq!(
            eval_concat(&[Value::from("a"), Value::Null]).unwrap(),
            Value::Null
        );
    }

    #[test]
    fn test_concat_mixed_types() {
        let args = vec![Value::String("Count: ".to_string()), Value::Int(42)];
        assert_eq!(
            eval_concat(&args).unwrap(),
            Value::String("Count: 42".to_string())
        );
    }
}
