use model::execution::expr::Expr;

/// Compiles engine expressions into filters some external evaluator understands.
pub trait FilterCompiler {
    /// What a successfully compiled expression becomes.
    type Filter;

    /// Why an expression could not be compiled.
    type Error: std::error::Error;

    /// Compile one expression into a filter, or refuse it as a whole.
    fn compile(&self, expr: &Expr) -> Result<Self::Filter, Self::Error>;
}
