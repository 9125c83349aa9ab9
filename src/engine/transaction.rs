use super::currency::format_usd;
use super::Decimal;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// An immutable dated ledger entry.
///
/// User deposits and withdrawals carry `interest: false`; entries appended by
/// interest and fee assessment carry `interest: true` and are exempt from the
/// account limit policies.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Transaction {
    date: NaiveDate,
    amount: Decimal,
    interest: bool,
}

impl Transaction {
    /// Create a user transaction (deposit or withdrawal) dated `date`.
    pub fn new(amount: Decimal, date: NaiveDate) -> Self {
        Self {
            date,
            amount,
            interest: false,
        }
    }

    /// Create an interest-flagged entry (interest accrual or fee).
    pub(super) fn interest(amount: Decimal, date: NaiveDate) -> Self {
        Self {
            date,
            amount,
            interest: true,
        }
    }

    /// Returns the transaction date
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the transaction amount
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns whether this entry was generated by interest or fee assessment
    pub fn is_interest(&self) -> bool {
        self.interest
    }

    /// True when this entry counts against a per-day limit on `date`:
    /// same calendar day and not interest-generated.
    pub(super) fn counts_toward_day_limit(&self, date: NaiveDate) -> bool {
        self.date == date && !self.interest
    }

    /// True when this entry counts against a per-month limit on `date`:
    /// same calendar month and year and not interest-generated.
    pub(super) fn counts_toward_month_limit(&self, date: NaiveDate) -> bool {
        self.date.month() == date.month() && self.date.year() == date.year() && !self.interest
    }

    /// True when interest was already assessed exactly on `date`.
    pub(super) fn is_interest_on(&self, date: NaiveDate) -> bool {
        self.date == date && self.interest
    }
}

impl std::fmt::Display for Transaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.date, format_usd(self.amount))
    }
}
