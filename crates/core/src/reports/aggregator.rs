//! Turns a month's expenses into a report model.

use cashflow_shared::{ReportLabels, RoundingMode};
use rust_decimal::Decimal;

use super::types::{ExpenseReportLine, ReportModel, ReportMonth};
use crate::currency;
use crate::expenses::{Expense, PaymentType};

/// Long date format, e.g. "Friday, March 1, 2024".
pub const LONG_DATE_FORMAT: &str = "%A, %B %-d, %Y";

/// Short time format, e.g. "14:30".
pub const SHORT_TIME_FORMAT: &str = "%H:%M";

/// Aggregates expenses into report models.
///
/// Pure: no I/O, no filtering, no sorting. The repository is trusted to have
/// restricted the expenses to the month already.
pub struct ReportAggregator;

impl ReportAggregator {
    /// Builds the report model for `month`.
    ///
    /// Returns `None` when there are no expenses; nothing should be rendered then.
    ///
    /// Each line amount is converted and rounded on its own. The total is the
    /// sum of those rounded amounts, rounded again.
    #[must_use]
    pub fn aggregate(
        expenses: &[Expense],
        month: ReportMonth,
        currency_symbol: &str,
        rounding: RoundingMode,
        labels: &ReportLabels,
    ) -> Option<ReportModel> {
        if expenses.is_empty() {
            return None;
        }

        let lines: Vec<ExpenseReportLine> = expenses
            .iter()
            .map(|expense| Self::line(expense, currency_symbol, rounding, labels))
            .collect();

        let sum: Decimal = lines.iter().map(|line| line.amount).sum();

        Some(ReportModel {
            month,
            currency_symbol: currency_symbol.to_string(),
            total: currency::round(sum, rounding),
            rounding,
            lines,
        })
    }

    /// Returns the display label for a payment type.
    ///
    /// Unrecognized stored codes get an empty label rather than an error.
    #[must_use]
    pub fn payment_label(payment_type: PaymentType, labels: &ReportLabels) -> &str {
        match payment_type {
            PaymentType::Cash => &labels.cash,
            PaymentType::CreditCard => &labels.credit_card,
            PaymentType::DebitCard => &labels.debit_card,
            PaymentType::ElectronicTransfer => &labels.electronic_transfer,
            PaymentType::Unrecognized(_) => "",
        }
    }

    fn line(
        expense: &Expense,
        currency_symbol: &str,
        rounding: RoundingMode,
        labels: &ReportLabels,
    ) -> ExpenseReportLine {
        ExpenseReportLine {
            title: expense.title.clone(),
            date: expense.date.format(LONG_DATE_FORMAT).to_string(),
            time: expense.date.format(SHORT_TIME_FORMAT).to_string(),
            payment_label: Self::payment_label(expense.payment_type, labels).to_string(),
            amount: currency::convert(expense.amount, currency_symbol, rounding),
            description: expense.description.clone(),
            has_description: expense.has_description(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn expense(id: i64, amount: Decimal, description: Option<&str>) -> Expense {
        Expense {
            id,
            title: format!("Expense {id}"),
            description: description.map(String::from),
            date: NaiveDate::from_ymd_opt(2024, 3, 1)
                .unwrap()
                .and_hms_opt(14, 30, 0)
                .unwrap(),
            amount,
            payment_type: PaymentType::CreditCard,
        }
    }

    fn march() -> ReportMonth {
        ReportMonth::new(2024, 3).unwrap()
    }

    #[test]
    fn test_empty_input_yields_none() {
        let model = ReportAggregator::aggregate(
            &[],
            march(),
            "R$",
            RoundingMode::HalfAwayFromZero,
            &ReportLabels::default(),
        );
        assert!(model.is_none());
    }

    #[test]
    fn test_real_example() {
        let expenses = vec![
            expense(1, dec!(10.00), None),
            expense(2, dec!(20.005), Some("lunch")),
        ];

        let model = ReportAggregator::aggregate(
            &expenses,
            march(),
            "R$",
            RoundingMode::HalfAwayFromZero,
            &ReportLabels::default(),
        )
        .unwrap();

        let amounts: Vec<Decimal> = model.lines.iter().map(|l| l.amount).collect();
        assert_eq!(amounts, vec![dec!(54.60), dec!(109.23)]);
        assert_eq!(model.total, dec!(163.83));
        assert_eq!(model.currency_symbol, "R$");
        assert_eq!(model.month, march());
    }

    #[test]
    fn test_total_uses_rounded_lines() {
        // Rounding once: 0.010 -> 0.01. Rounding per line: 0.01 + 0.01 = 0.02.
        let expenses = vec![expense(1, dec!(0.005), None), expense(2, dec!(0.005), None)];

        let model = ReportAggregator::aggregate(
            &expenses,
            march(),
            "$",
            RoundingMode::HalfAwayFromZero,
            &ReportLabels::default(),
        )
        .unwrap();

        assert_eq!(model.total, dec!(0.02));
        let rounded_once = currency::round(dec!(0.010), RoundingMode::HalfAwayFromZero);
        assert_ne!(model.total, rounded_once);
    }

    #[test]
    fn test_half_even_total() {
        // 0.125 -> 0.12 and 0.135 -> 0.14 under banker's rounding.
        let expenses = vec![expense(1, dec!(0.125), None), expense(2, dec!(0.135), None)];

        let model = ReportAggregator::aggregate(
            &expenses,
            march(),
            "$",
            RoundingMode::HalfEven,
            &ReportLabels::default(),
        )
        .unwrap();

        assert_eq!(model.lines[0].amount, dec!(0.12));
        assert_eq!(model.lines[1].amount, dec!(0.14));
        assert_eq!(model.total, dec!(0.26));
    }

    #[test]
    fn test_line_formatting() {
        let expenses = vec![expense(1, dec!(5), Some("  "))];

        let model = ReportAggregator::aggregate(
            &expenses,
            march(),
            "$",
            RoundingMode::HalfAwayFromZero,
            &ReportLabels::default(),
        )
        .unwrap();

        let line = &model.lines[0];
        assert_eq!(line.title, "Expense 1");
        assert_eq!(line.date, "Friday, March 1, 2024");
        assert_eq!(line.time, "14:30");
        assert_eq!(line.payment_label, "Credit Card");
        assert!(!line.has_description);
    }

    #[test]
    fn test_payment_labels() {
        let labels = ReportLabels::default();
        assert_eq!(ReportAggregator::payment_label(PaymentType::Cash, &labels), "Cash");
        assert_eq!(
            ReportAggregator::payment_label(PaymentType::DebitCard, &labels),
            "Debit Card"
        );
        assert_eq!(
            ReportAggregator::payment_label(PaymentType::ElectronicTransfer, &labels),
            "Electronic Transfer"
        );
        assert_eq!(
            ReportAggregator::payment_label(PaymentType::Unrecognized(42), &labels),
            ""
        );
    }
}
