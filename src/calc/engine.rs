//! Command handlers for the calculator engine
//!
//! The engine is driven by discrete commands (digits, operators, equals, ...)
//! and mutates its one state record deterministically. Every handler checks
//! the sticky error first: after a failed division, the next keystroke both
//! dismisses the error (via a full reset) and begins fresh input.

use serde::{Deserialize, Serialize};

use super::state::{Operator, Pending, Snapshot};
use crate::format_value;

/// Four-function calculator state machine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Calculator {
    /// Always a valid numeric token, possibly ending in a decimal point
    display: String,
    /// Pending binary operation, if an operator has been chosen
    pending: Option<Pending>,
    /// Sticky division-by-zero message
    error: Option<String>,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

impl Calculator {
    pub fn new() -> Self {
        Self {
            display: "0".to_string(),
            pending: None,
            error: None,
        }
    }

    /// Value copy of the current state for the presentation layer
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            display_value: self.display.clone(),
            first_operand: self.pending.map(|p| p.first),
            operator: self.pending.map(|p| p.op),
            waiting_for_operand: self.pending.is_some_and(|p| p.waiting),
            error: self.error.clone(),
        }
    }

    /// Unconditionally restore all defaults
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Clear the in-progress entry only, keeping any pending operation armed
    /// so the next digit starts the second operand cleanly
    pub fn clear_entry(&mut self) {
        if self.error.is_some() {
            self.reset();
            return;
        }
        self.set_display_zero();
        if let Some(pending) = self.pending.as_mut() {
            pending.waiting = true;
        }
    }

    pub fn input_digit(&mut self, digit: char) {
        if !digit.is_ascii_digit() {
            return;
        }
        self.dismiss_error();
        if let Some(pending) = self.pending.as_mut().filter(|p| p.waiting) {
            pending.waiting = false;
            self.display.clear();
            self.display.push(digit);
            return;
        }
        if self.display == "0" {
            self.display.clear();
        }
        self.display.push(digit);
    }

    /// Append a decimal point; a second point in the same number is a no-op
    pub fn input_decimal(&mut self) {
        self.dismiss_error();
        if let Some(pending) = self.pending.as_mut().filter(|p| p.waiting) {
            pending.waiting = false;
            self.display.clear();
            self.display.push_str("0.");
            return;
        }
        if !self.display.contains('.') {
            self.display.push('.');
        }
    }

    pub fn toggle_sign(&mut self) {
        self.dismiss_error();
        if self.display == "0" {
            return;
        }
        if self.display.starts_with('-') {
            self.display.remove(0);
        } else {
            self.display.insert(0, '-');
        }
    }

    /// Divide the displayed value by 100
    pub fn apply_percent(&mut self) {
        self.dismiss_error();
        let Some(value) = self.parse_display().filter(|v| v.is_finite()) else {
            return;
        };
        self.display = format_value(value / 100.0);
    }

    pub fn handle_operator(&mut self, op: Operator) {
        self.dismiss_error();

        // Operator re-selected before any second-operand digit: last one wins
        if let Some(pending) = self.pending.as_mut().filter(|p| p.waiting) {
            pending.op = op;
            return;
        }

        match self.pending {
            None => {
                // First operand established from whatever is on the display
                let Some(first) = self.parse_display() else {
                    return;
                };
                self.pending = Some(Pending {
                    first,
                    op,
                    waiting: true,
                });
            }
            Some(_) => {
                // Fold the entered second operand through the pending operator
                let Some(result) = self.calculate() else {
                    return;
                };
                self.display = format_value(result);
                self.pending = Some(Pending {
                    first: result,
                    op,
                    waiting: true,
                });
            }
        }
    }

    /// Resolve the pending operation into the display, ready for a new chain
    pub fn handle_equals(&mut self) {
        self.dismiss_error();
        if self.pending.is_none() {
            return;
        }
        let Some(result) = self.calculate() else {
            return;
        };
        self.display = format_value(result);
        self.pending = None;
    }

    pub fn handle_backspace(&mut self) {
        if self.error.is_some() {
            self.reset();
            return;
        }
        if self.pending.is_some_and(|p| p.waiting) {
            // A backspace right after choosing an operator abandons the whole
            // pending operation, not just one character
            self.pending = None;
            self.set_display_zero();
            return;
        }
        self.display.pop();
        if self.display.is_empty() || self.display == "-" {
            self.set_display_zero();
        }
    }

    /// Apply the pending operator to its first operand and the displayed
    /// second operand. Division by zero latches the sticky error, leaves the
    /// rest of the state untouched and yields `None`.
    fn calculate(&mut self) -> Option<f64> {
        let pending = self.pending?;
        let second = self.parse_display()?;
        match pending.op.apply(pending.first, second) {
            Ok(result) => Some(result),
            Err(err) => {
                self.error = Some(err.message().to_string());
                None
            }
        }
    }

    /// The display is always a valid token, so this only fails on NaN
    fn parse_display(&self) -> Option<f64> {
        self.display.parse::<f64>().ok().filter(|v| !v.is_nan())
    }

    fn dismiss_error(&mut self) {
        if self.error.is_some() {
            self.reset();
        }
    }

    fn set_display_zero(&mut self) {
        self.display.clear();
        self.display.push('0');
    }
}


#[cfg(test)]
mod props {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        /// The display never carries more than one decimal point, whatever
        /// mix of digits, points and backspaces arrives.
        #[test]
        fn display_has_at_most_one_decimal_point(
            keys in proptest::collection::vec(0u8..12, 0..48)
        ) {
            let mut calc = Calculator::new();
            for key in keys {
                match key {
                    10 => calc.input_decimal(),
                    11 => calc.handle_backspace(),
                    d => calc.input_digit((b'0' + d) as char),
                }
                let snap = calc.snapshot();
                prop_assert!(snap.display_value.matches('.').count() <= 1);
                prop_assert!(!snap.display_value.is_empty());
            }
        }

        /// Toggling the sign twice restores the original text for any
        /// non-zero entry.
        #[test]
        fn toggle_sign_twice_is_identity(entry in "[1-9][0-9]{0,8}(\\.[0-9]{1,4})?") {
            let mut calc = Calculator::new();
            for c in entry.chars() {
                if c == '.' {
                    calc.input_decimal();
                } else {
                    calc.input_digit(c);
                }
            }
            let before = calc.snapshot().display_value;
            calc.toggle_sign();
            prop_assert_ne!(&calc.snapshot().display_value, &before);
            calc.toggle_sign();
            prop_assert_eq!(calc.snapshot().display_value, before);
        }

        /// Digit entry from a fresh engine is plain concatenation with
        /// leading-zero collapse.
        #[test]
        fn digit_entry_concatenates(digits in "[0-9]{1,12}") {
            let mut calc = Calculator::new();
            for c in digits.chars() {
                calc.input_digit(c);
            }
            let expected = {
                let trimmed = digits.trim_start_matches('0');
                if trimmed.is_empty() { "0".to_string() } else { trimmed.to_string() }
            };
            prop_assert_eq!(calc.snapshot().display_value, expected);
        }
    }
}
