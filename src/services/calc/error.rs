/*
 * Responsibility
 * - calculation 系のエラー定義 (HTTP は知らない)
 * - AppError への変換は error.rs 側で行う
 */
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("Unsupported calculation type: {0}")]
    UnsupportedType(String),
    #[error("Cannot divide by zero.")]
    DivisionByZero,
    #[error("Root degree cannot be zero.")]
    DegreeZero,
}

impl CalcError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}
