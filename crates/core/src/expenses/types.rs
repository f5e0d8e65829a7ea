//! Expense domain types.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::ExpenseError;

/// Maximum accepted length of an expense title.
pub const MAX_TITLE_LENGTH: usize = 100;

/// How an expense was paid.
///
/// Persisted as a small integer code (see [`PaymentType::code`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    /// Paid in cash.
    Cash,
    /// Paid by credit card.
    CreditCard,
    /// Paid by debit card.
    DebitCard,
    /// Paid by bank transfer.
    ElectronicTransfer,
    /// A stored code outside the known set.
    Unrecognized(i16),
}

impl PaymentType {
    /// Decodes a stored payment code. Unknown codes are kept, not rejected.
    #[must_use]
    pub const fn from_code(code: i16) -> Self {
        match code {
            0 => Self::Cash,
            1 => Self::CreditCard,
            2 => Self::DebitCard,
            3 => Self::ElectronicTransfer,
            other => Self::Unrecognized(other),
        }
    }

    /// Returns the stored payment code.
    #[must_use]
    pub const fn code(self) -> i16 {
        match self {
            Self::Cash => 0,
            Self::CreditCard => 1,
            Self::DebitCard => 2,
            Self::ElectronicTransfer => 3,
            Self::Unrecognized(code) => code,
        }
    }

    /// Returns true for the four known payment types.
    #[must_use]
    pub const fn is_recognized(self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

/// A recorded expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Expense ID.
    pub id: i64,
    /// Short title.
    pub title: String,
    /// Optional free-form description.
    pub description: Option<String>,
    /// When the expense happened (local wall-clock time).
    pub date: NaiveDateTime,
    /// Amount in the base unit, before any display conversion.
    pub amount: Decimal,
    /// Payment type.
    pub payment_type: PaymentType,
}

impl Expense {
    /// Returns true if the description is present and not blank.
    #[must_use]
    pub fn has_description(&self) -> bool {
        self.description
            .as_deref()
            .is_some_and(|d| !d.trim().is_empty())
    }
}

/// Input for recording a new expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewExpense {
    /// Short title.
    pub title: String,
    /// Optional free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// When the expense happened.
    pub date: NaiveDateTime,
    /// Amount in the base unit.
    pub amount: Decimal,
    /// Payment type.
    pub payment_type: PaymentType,
}

impl NewExpense {
    /// Checks the input before it is stored.
    ///
    /// # Errors
    ///
    /// Returns `ExpenseError::Validation` describing the first failed rule.
    pub fn validate(&self) -> Result<(), ExpenseError> {
        if self.title.trim().is_empty() {
            return Err(ExpenseError::Validation("title is required".to_string()));
        }
        if self.title.chars().count() > MAX_TITLE_LENGTH {
            return Err(ExpenseError::Validation(format!(
                "title must be at most {MAX_TITLE_LENGTH} characters"
            )));
        }
        if self.amount <= Decimal::ZERO {
            return Err(ExpenseError::Validation(
                "amount must be greater than zero".to_string(),
            ));
        }
        if !self.payment_type.is_recognized() {
            return Err(ExpenseError::Validation(format!(
                "unknown payment type code {}",
                self.payment_type.code()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn new_expense() -> NewExpense {
        NewExpense {
            title: "Groceries".to_string(),
            description: None,
            date: NaiveDate::from_ymd_opt(2024, 3, 5)
                .unwrap()
                .and_hms_opt(18, 30, 0)
                .unwrap(),
            amount: dec!(42.10),
            payment_type: PaymentType::DebitCard,
        }
    }

    #[rstest]
    #[case(0, PaymentType::Cash)]
    #[case(1, PaymentType::CreditCard)]
    #[case(2, PaymentType::DebitCard)]
    #[case(3, PaymentType::ElectronicTransfer)]
    #[case(9, PaymentType::Unrecognized(9))]
    fn test_payment_type_codes(#[case] code: i16, #[case] expected: PaymentType) {
        let decoded = PaymentType::from_code(code);
        assert_eq!(decoded, expected);
        assert_eq!(decoded.code(), code);
    }

    #[rstest]
    #[case(None, false)]
    #[case(Some(""), false)]
    #[case(Some("   \t"), false)]
    #[case(Some("lunch with team"), true)]
    fn test_has_description(#[case] description: Option<&str>, #[case] expected: bool) {
        let new = new_expense();
        let expense = Expense {
            id: 1,
            title: new.title,
            description: description.map(String::from),
            date: new.date,
            amount: new.amount,
            payment_type: new.payment_type,
        };
        assert_eq!(expense.has_description(), expected);
    }

    #[test]
    fn test_validate_accepts_valid_input() {
        assert!(new_expense().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_title() {
        let mut input = new_expense();
        input.title = "  ".to_string();
        assert!(matches!(input.validate(), Err(ExpenseError::Validation(_))));
    }

    #[test]
    fn test_validate_rejects_long_title() {
        let mut input = new_expense();
        input.title = "x".repeat(MAX_TITLE_LENGTH + 1);
        assert!(matches!(input.validate(), Err(ExpenseError::Validation(_))));
    }

    #[test]
    fn test_validate_rejects_non_positive_amount() {
        let mut input = new_expense();
        input.amount = Decimal::ZERO;
        assert!(matches!(input.validate(), Err(ExpenseError::Validation(_))));
    }

    #[test]
    fn test_validate_rejects_unrecognized_payment_type() {
        let mut input = new_expense();
        input.payment_type = PaymentType::Unrecognized(7);
        assert!(matches!(input.validate(), Err(ExpenseError::Validation(_))));
    }
}
