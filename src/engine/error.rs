use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineErrorKind {
    NoActiveGoal,
    UnsupportedGoalType,
    InvalidTarget,
    ContractViolation,
    Serialization,
    Storage,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineError {
    pub kind: EngineErrorKind,
    pub message: String,
}

impl EngineError {
    pub fn new(kind: EngineErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for EngineError {}

pub fn no_active_goal(message: impl Into<String>) -> EngineError {
    EngineError::new(EngineErrorKind::NoActiveGoal, message)
}

pub fn unsupported_goal_type(message: impl Into<String>) -> EngineError {
    EngineError::new(EngineErrorKind::UnsupportedGoalType, message)
}

pub fn invalid_target(message: impl Into<String>) -> EngineError {
    EngineError::new(EngineErrorKind::InvalidTarget, message)
}

pub fn contract_violation(message: impl Into<String>) -> EngineError {
    EngineError::new(EngineErrorKind::ContractViolation, message)
}

pub fn serialization_error(message: impl Into<String>) -> EngineError {
    EngineError::new(EngineErrorKind::Serialization, message)
}

pub fn storage_error(message: impl Into<String>) -> EngineError {
    EngineError::new(EngineErrorKind::Storage, message)
}
