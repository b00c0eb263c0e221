//! Salary ledger arithmetic.
//!
//! Amounts arrive from clients as JSON numbers or numeric strings. Anything
//! that does not parse as a finite number counts as zero.

use serde_json::Value;

use crate::error::CoreError;

/// Coerce a loosely-typed JSON amount to a number (non-numeric -> 0).
pub fn coerce_amount(value: Option<&Value>) -> f64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|n| n.is_finite()).unwrap_or(0.0)
}

/// The three inputs of a pay entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SalaryAmounts {
    pub basic: f64,
    pub allowances: f64,
    pub deductions: f64,
}

impl SalaryAmounts {
    /// Build from raw JSON values, coercing each one.
    pub fn from_raw(
        basic: Option<&Value>,
        allowances: Option<&Value>,
        deductions: Option<&Value>,
    ) -> Self {
        Self {
            basic: coerce_amount(basic),
            allowances: coerce_amount(allowances),
            deductions: coerce_amount(deductions),
        }
    }

    /// Every component must be non-negative.
    pub fn validate(&self) -> Result<(), CoreError> {
        for (field, amount) in [
            ("basic_salary", self.basic),
            ("allowances", self.allowances),
            ("deductions", self.deductions),
        ] {
            if amount < 0.0 {
                return Err(CoreError::Validation(format!(
                    "{field} must not be negative"
                )));
            }
        }
        Ok(())
    }

    /// `basic + allowances - deductions`. Not floored at zero.
    ///
    /// Finite inputs can still overflow to infinity, which the ledger
    /// cannot store.
    pub fn net(&self) -> Result<f64, CoreError> {
        let net = self.basic + self.allowances - self.deductions;
        if !net.is_finite() {
            return Err(CoreError::Validation(
                "Net salary is out of range".to_string(),
            ));
        }
        Ok(net)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    #[test]
    fn coerces_numbers_and_numeric_strings() {
        assert_eq!(coerce_amount(Some(&json!(1500))), 1500.0);
        assert_eq!(coerce_amount(Some(&json!(12.5))), 12.5);
        assert_eq!(coerce_amount(Some(&json!(" 2000 "))), 2000.0);
    }

    #[test]
    fn non_numeric_coerces_to_zero() {
        assert_eq!(coerce_amount(None), 0.0);
        assert_eq!(coerce_amount(Some(&json!(null))), 0.0);
        assert_eq!(coerce_amount(Some(&json!("abc"))), 0.0);
        assert_eq!(coerce_amount(Some(&json!("NaN"))), 0.0);
        assert_eq!(coerce_amount(Some(&json!([1, 2]))), 0.0);
        assert_eq!(coerce_amount(Some(&json!(true))), 0.0);
    }

    #[test]
    fn net_is_basic_plus_allowances_minus_deductions() {
        let amounts = SalaryAmounts::from_raw(
            Some(&json!(50000)),
            Some(&json!(5000)),
            Some(&json!(2000)),
        );
        assert_eq!(amounts.net().unwrap(), 53000.0);
    }

    #[test]
    fn net_may_be_negative() {
        let amounts = SalaryAmounts::from_raw(Some(&json!(50000)), None, Some(&json!(60000)));
        assert_eq!(amounts.allowances, 0.0);
        assert_eq!(amounts.net().unwrap(), -10000.0);
        assert!(amounts.validate().is_ok());
    }

    #[test]
    fn negative_components_rejected() {
        let amounts = SalaryAmounts {
            basic: 100.0,
            allowances: -1.0,
            deductions: 0.0,
        };
        assert_matches!(amounts.validate(), Err(CoreError::Validation(msg)) if msg.contains("allowances"));
    }

    #[test]
    fn overflowing_net_rejected() {
        let amounts = SalaryAmounts {
            basic: f64::MAX,
            allowances: f64::MAX,
            deductions: 0.0,
        };
        assert!(amounts.validate().is_ok());
        assert_matches!(amounts.net(), Err(CoreError::Validation(msg)) if msg.contains("out of range"));
    }
}
