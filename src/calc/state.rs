//! Calculator state types
//!
//! The engine owns one mutable state record; the presentation layer only ever
//! sees value copies of it (`Snapshot`).

use std::fmt;

use serde::{Deserialize, Serialize};

/// The four supported binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "*",
            Operator::Divide => "/",
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Subtract),
            '*' => Some(Operator::Multiply),
            '/' => Some(Operator::Divide),
            _ => None,
        }
    }

    /// Apply the operator to two operands.
    ///
    /// Division by exactly zero is the only failure the engine can produce.
    pub fn apply(self, lhs: f64, rhs: f64) -> Result<f64, CalcError> {
        match self {
            Operator::Add => Ok(lhs + rhs),
            Operator::Subtract => Ok(lhs - rhs),
            Operator::Multiply => Ok(lhs * rhs),
            Operator::Divide => {
                if rhs == 0.0 {
                    Err(CalcError::DivideByZero)
                } else {
                    Ok(lhs / rhs)
                }
            }
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Arithmetic failure, surfaced to the user as a sticky error message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalcError {
    DivideByZero,
}

impl CalcError {
    pub fn message(&self) -> &'static str {
        match self {
            CalcError::DivideByZero => "Cannot divide by zero",
        }
    }
}

/// A binary operation waiting to be resolved.
///
/// The pending operator, the established first operand, and the waiting flag
/// live in one record so that "waiting for an operand with no operator armed"
/// is unrepresentable. `first` is always a parsed, finite number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pending {
    /// Left operand, locked in when the operator was chosen
    pub first: f64,
    pub op: Operator,
    /// True until the first digit of the second operand arrives; decides
    /// whether the next digit replaces or appends to the display
    pub waiting: bool,
}

/// Read-only value copy of the engine state, handed to the presentation layer
/// after each command. Mutating it has no effect on the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Canonical text of the number being edited, e.g. `"0"`, `"-3.5"`, `"12."`
    pub display_value: String,
    pub first_operand: Option<f64>,
    pub operator: Option<Operator>,
    pub waiting_for_operand: bool,
    /// Set only on division by zero; sticky until the next command
    pub error: Option<String>,
}

impl Snapshot {
    /// What the display widget should show: the error message wins over the
    /// edited value while the error is latched.
    pub fn screen_text(&self) -> &str {
        self.error.as_deref().unwrap_or(&self.display_value)
    }
}
