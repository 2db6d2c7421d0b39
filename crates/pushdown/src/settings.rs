use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Name the planner gives the search backend's native query function.
pub const DEFAULT_MATCH_FUNCTION: &str = "esquery";

/// What to do with the operator of `literal <op> column`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperandOrder {
    /// Emit the operator exactly as written: `5 > col` becomes `col > 5`.
    /// Consumers that build range queries must flip it themselves.
    #[default]
    Preserve,
    /// Rewrite to the column-first form: `5 > col` becomes `col < 5`.
    Mirror,
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Invalid pushdown settings: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Match function name must not be empty")]
    EmptyMatchFunction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PushdownSettings {
    pub match_function: String,
    pub operand_order: OperandOrder,
}

impl PushdownSettings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.match_function.trim().is_empty() {
            return Err(SettingsError::EmptyMatchFunction);
        }
        Ok(())
    }

    pub fn with_operand_order(mut self, operand_order: OperandOrder) -> Self {
        self.operand_order = operand_order;
        self
    }

    pub fn with_match_function(mut self, name: impl Into<String>) -> Self {
        self.match_function = name.into();
        self
    }

    pub fn is_match_function(&self, name: &str) -> bool {
        self.match_function == name
    }
}

impl Default for PushdownSettings {
    fn default() -> Self {
        Self {
            match_function: DEFAULT_MATCH_FUNCTION.to_string(),
            operand_order: OperandOrder::default(),
        }
    }
}
