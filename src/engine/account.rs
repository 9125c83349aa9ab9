use super::currency::format_usd;
use super::error::AccountError;
use super::transaction::Transaction;
use super::Decimal;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

pub type AccountId = u32;

/// The account variety, which selects the interest rate, the fee policy and
/// the transaction limit policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    Checking,
    Savings,
}

impl AccountKind {
    /// Select a kind from a user-supplied label.
    /// `"checking"` opens a checking account; any other label falls through
    /// to savings.
    pub fn from_label(label: &str) -> Self {
        if label == "checking" {
            AccountKind::Checking
        } else {
            AccountKind::Savings
        }
    }

    /// Fixed monthly interest rate for this kind.
    fn interest_rate(self) -> Decimal {
        match self {
            AccountKind::Checking => Decimal::new(12, 4), // 0.12%
            AccountKind::Savings => Decimal::new(29, 3),  // 2.9%
        }
    }

    fn label(self) -> &'static str {
        match self {
            AccountKind::Checking => "Checking",
            AccountKind::Savings => "Savings",
        }
    }
}

impl std::fmt::Display for AccountKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A single bank account: an ordered ledger of transactions, the running
/// balance, and the date of the most recent entry.
///
/// The ledger is append-only and the balance always equals the sum of the
/// ledger amounts. New entries may never be dated before `latest_date`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Account {
    id: AccountId,
    kind: AccountKind,
    balance: Decimal,
    latest_date: NaiveDate,
    transactions: Vec<Transaction>,
}

impl Account {
    /// Open an empty account. `opened_on` seeds `latest_date`, so no
    /// transaction dated before the opening date will be accepted.
    pub(super) fn new(id: AccountId, kind: AccountKind, opened_on: NaiveDate) -> Self {
        log::debug!("Created account: {id}");
        Self {
            id,
            kind,
            balance: Decimal::ZERO,
            latest_date: opened_on,
            transactions: Vec::new(),
        }
    }

    /// Returns the account ID
    pub fn id(&self) -> AccountId {
        self.id
    }

    /// Returns the account kind
    pub fn kind(&self) -> AccountKind {
        self.kind
    }

    /// Returns the current balance
    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// Returns the date of the most recent ledger entry
    /// (the opening date while the ledger is empty)
    pub fn latest_date(&self) -> NaiveDate {
        self.latest_date
    }

    /// Returns the ledger in insertion order
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Determine if this account has the given id.
    /// The id arrives as raw user input; a string that does not parse as an
    /// account number simply matches nothing.
    pub fn id_matches(&self, id: &str) -> bool {
        id.trim().parse::<AccountId>() == Ok(self.id)
    }

    /// Check a pending transaction against the account rules and append it
    /// to the ledger if every rule passes.
    ///
    /// Checks run in a fixed order: overdraw first, then the kind's limit
    /// policy, then date sequencing. A rejected transaction leaves the
    /// account untouched.
    pub fn add_transaction(&mut self, amount: Decimal, date: NaiveDate) -> Result<(), AccountError> {
        // Deposits always pass this check; withdrawals must leave the
        // balance positive.
        if amount < Decimal::ZERO && self.balance <= amount.abs() {
            return Err(AccountError::Overdraw);
        }

        if !self.check_limits(date) {
            return Err(AccountError::TransactionLimit);
        }

        if date < self.latest_date {
            return Err(AccountError::TransactionSequence {
                latest: self.latest_date,
            });
        }

        self.balance += amount;
        self.transactions.push(Transaction::new(amount, date));
        self.latest_date = date;
        log::debug!("Created transaction: {}, {}", self.id, amount);

        #[cfg(debug_assertions)]
        self.assert_invariant();
        Ok(())
    }

    /// The ledger sorted ascending by date. The sort is stable, so same-day
    /// entries keep their insertion order; the stored ledger is not mutated.
    pub fn sort_transactions(&self) -> Vec<Transaction> {
        let mut sorted = self.transactions.clone();
        sorted.sort_by_key(Transaction::date);
        sorted
    }

    /// Assess monthly interest, then any kind-specific fees, dated on the
    /// last day of the month of `latest_date`.
    ///
    /// Interest and fee entries are interest-flagged and exempt from limit
    /// policies. Assessing a second time for the same month-end date fails
    /// with [`AccountError::TransactionSequence`].
    pub fn assess_interest_and_fees(&mut self) -> Result<(), AccountError> {
        let date = month_end(self.latest_date);

        if self.transactions.iter().any(|t| t.is_interest_on(date)) {
            return Err(AccountError::TransactionSequence {
                latest: self.latest_date,
            });
        }

        let amount = self.balance * self.kind.interest_rate();

        self.latest_date = date;
        self.balance += amount;
        self.transactions.push(Transaction::interest(amount, date));
        log::debug!("Created transaction: {}, {}", self.id, amount);

        self.apply_fees(date);

        #[cfg(debug_assertions)]
        self.assert_invariant();
        Ok(())
    }

    /// Kind-specific fee policy, run after interest with the same date.
    /// Checking charges a flat $10 when the balance sits below $100;
    /// savings charges nothing.
    fn apply_fees(&mut self, date: NaiveDate) {
        match self.kind {
            AccountKind::Checking => {
                if self.balance < Decimal::ONE_HUNDRED {
                    let fee = Decimal::new(-10, 0);
                    self.balance += fee;
                    self.transactions.push(Transaction::interest(fee, date));
                    log::debug!("Created transaction: {}, {fee}", self.id);
                }
            }
            AccountKind::Savings => {}
        }
    }

    /// Kind-specific limit policy for a candidate transaction dated `date`.
    /// Counts are taken over the existing ledger, before the candidate is
    /// appended.
    fn check_limits(&self, date: NaiveDate) -> bool {
        match self.kind {
            AccountKind::Checking => true,
            AccountKind::Savings => {
                let day_count = self
                    .transactions
                    .iter()
                    .filter(|t| t.counts_toward_day_limit(date))
                    .count();
                let month_count = self
                    .transactions
                    .iter()
                    .filter(|t| t.counts_toward_month_limit(date))
                    .count();
                day_count < 2 && month_count < 5
            }
        }
    }

    /// Assert the ledger invariant: balance equals the sum of all entries.
    #[cfg(debug_assertions)]
    fn assert_invariant(&self) {
        let sum: Decimal = self.transactions.iter().map(Transaction::amount).sum();
        debug_assert_eq!(
            self.balance, sum,
            "Invariant violated: balance ({}) != ledger sum ({})",
            self.balance, sum
        );
    }
}

impl std::fmt::Display for Account {
    /// Formats the kind, account number, and balance.
    /// For example, `Checking#000000001,<tab>balance: $50.00`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}#{:09},\tbalance: {}",
            self.kind.label(),
            self.id,
            format_usd(self.balance)
        )
    }
}

/// The last calendar day of `date`'s month.
fn month_end(date: NaiveDate) -> NaiveDate {
    let first_of_next = if date.month() == 12 {
        NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
    };
    // The first of a month always exists and always has a predecessor
    first_of_next
        .and_then(|d| d.pred_opt())
        .unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn checking() -> Account {
        Account::new(1, AccountKind::Checking, date(2024, 1, 1))
    }

    fn savings() -> Account {
        Account::new(1, AccountKind::Savings, date(2024, 1, 1))
    }

    #[test]
    fn test_new_account_is_empty() {
        let account = checking();
        assert_eq!(account.balance(), Decimal::ZERO);
        assert_eq!(account.latest_date(), date(2024, 1, 1));
        assert!(account.transactions().is_empty());
    }

    #[test]
    fn test_kind_from_label_falls_through_to_savings() {
        assert_eq!(AccountKind::from_label("checking"), AccountKind::Checking);
        assert_eq!(AccountKind::from_label("savings"), AccountKind::Savings);
        assert_eq!(AccountKind::from_label("gold"), AccountKind::Savings);
    }

    #[test]
    fn test_deposit_updates_balance_and_ledger() {
        let mut account = checking();
        account.add_transaction(dec!(100.5), date(2024, 1, 2)).unwrap();
        assert_eq!(account.balance(), dec!(100.5));
        assert_eq!(account.transactions().len(), 1);
        assert_eq!(account.latest_date(), date(2024, 1, 2));
    }

    #[test]
    fn test_withdrawal_may_not_overdraw() {
        let mut account = checking();
        account.add_transaction(dec!(50), date(2024, 1, 2)).unwrap();

        let err = account.add_transaction(dec!(-60), date(2024, 1, 3)).unwrap_err();
        assert_eq!(err, AccountError::Overdraw);
        assert_eq!(account.balance(), dec!(50));
        assert_eq!(account.transactions().len(), 1);
    }

    #[test]
    fn test_withdrawal_of_entire_balance_overdraws() {
        // The balance must stay strictly positive after a withdrawal
        let mut account = checking();
        account.add_transaction(dec!(50), date(2024, 1, 2)).unwrap();

        let err = account.add_transaction(dec!(-50), date(2024, 1, 3)).unwrap_err();
        assert_eq!(err, AccountError::Overdraw);
    }

    #[test]
    fn test_withdrawal_below_balance_succeeds() {
        let mut account = checking();
        account.add_transaction(dec!(50), date(2024, 1, 2)).unwrap();
        account.add_transaction(dec!(-49.99), date(2024, 1, 3)).unwrap();
        assert_eq!(account.balance(), dec!(0.01));
    }

    #[test]
    fn test_stale_date_is_rejected() {
        let mut account = checking();
        account.add_transaction(dec!(100), date(2024, 1, 10)).unwrap();

        let err = account.add_transaction(dec!(5), date(2024, 1, 9)).unwrap_err();
        assert_eq!(
            err,
            AccountError::TransactionSequence {
                latest: date(2024, 1, 10)
            }
        );
    }

    #[test]
    fn test_same_day_transaction_is_accepted() {
        let mut account = checking();
        account.add_transaction(dec!(100), date(2024, 1, 10)).unwrap();
        account.add_transaction(dec!(5), date(2024, 1, 10)).unwrap();
        assert_eq!(account.balance(), dec!(105));
    }

    #[test]
    fn test_savings_day_limit() {
        let mut account = savings();
        account.add_transaction(dec!(10), date(2024, 1, 5)).unwrap();
        account.add_transaction(dec!(10), date(2024, 1, 5)).unwrap();

        let err = account.add_transaction(dec!(10), date(2024, 1, 5)).unwrap_err();
        assert_eq!(err, AccountError::TransactionLimit);
    }

    #[test]
    fn test_savings_month_limit() {
        let mut account = savings();
        for day in 1..=5 {
            account.add_transaction(dec!(10), date(2024, 1, day)).unwrap();
        }

        let err = account.add_transaction(dec!(10), date(2024, 1, 6)).unwrap_err();
        assert_eq!(err, AccountError::TransactionLimit);

        // A new month resets the count
        account.add_transaction(dec!(10), date(2024, 2, 1)).unwrap();
    }

    #[test]
    fn test_checking_has_no_limits() {
        let mut account = checking();
        for _ in 0..10 {
            account.add_transaction(dec!(1), date(2024, 1, 5)).unwrap();
        }
        assert_eq!(account.balance(), dec!(10));
    }

    #[test]
    fn test_checking_interest_and_low_balance_fee() {
        let mut account = checking();
        account.add_transaction(dec!(50), date(2024, 1, 5)).unwrap();

        account.assess_interest_and_fees().unwrap();

        // 50 * 0.0012 = 0.06 interest, then a -10 fee since 50.06 < 100
        assert_eq!(account.balance(), dec!(40.06));
        assert_eq!(account.transactions().len(), 3);
        assert_eq!(account.latest_date(), date(2024, 1, 31));

        let interest = &account.transactions()[1];
        assert!(interest.is_interest());
        assert_eq!(interest.amount(), dec!(0.06));

        let fee = &account.transactions()[2];
        assert!(fee.is_interest());
        assert_eq!(fee.amount(), dec!(-10));
        assert_eq!(fee.date(), date(2024, 1, 31));
    }

    #[test]
    fn test_checking_no_fee_at_or_above_threshold() {
        let mut account = checking();
        account.add_transaction(dec!(1000), date(2024, 1, 5)).unwrap();

        account.assess_interest_and_fees().unwrap();

        // 1000 * 0.0012 = 1.20 interest, no fee
        assert_eq!(account.balance(), dec!(1001.20));
        assert_eq!(account.transactions().len(), 2);
    }

    #[test]
    fn test_savings_interest_no_fee() {
        let mut account = savings();
        account.add_transaction(dec!(1000), date(2024, 1, 5)).unwrap();

        account.assess_interest_and_fees().unwrap();

        assert_eq!(account.balance(), dec!(1029.0));
        assert_eq!(account.transactions().len(), 2);
        assert_eq!(account.latest_date(), date(2024, 1, 31));
    }

    #[test]
    fn test_double_assessment_same_month_is_rejected() {
        let mut account = savings();
        account.add_transaction(dec!(1000), date(2024, 1, 5)).unwrap();
        account.assess_interest_and_fees().unwrap();

        let err = account.assess_interest_and_fees().unwrap_err();
        assert_eq!(
            err,
            AccountError::TransactionSequence {
                latest: date(2024, 1, 31)
            }
        );
    }

    #[test]
    fn test_assessment_allowed_again_next_month() {
        let mut account = savings();
        account.add_transaction(dec!(1000), date(2024, 1, 5)).unwrap();
        account.assess_interest_and_fees().unwrap();

        account.add_transaction(dec!(1), date(2024, 2, 1)).unwrap();
        account.assess_interest_and_fees().unwrap();
        assert_eq!(account.latest_date(), date(2024, 2, 29));
    }

    #[test]
    fn test_interest_entries_exempt_from_limits() {
        let mut account = savings();
        account.add_transaction(dec!(10), date(2024, 1, 5)).unwrap();
        account.add_transaction(dec!(10), date(2024, 1, 6)).unwrap();
        account.add_transaction(dec!(10), date(2024, 1, 7)).unwrap();
        account.add_transaction(dec!(10), date(2024, 1, 8)).unwrap();
        // Month count is now 4; assessment appends a 5th, interest-flagged
        account.assess_interest_and_fees().unwrap();

        // The interest entry does not count toward the monthly cap
        account.add_transaction(dec!(10), date(2024, 1, 31)).unwrap();
    }

    #[test]
    fn test_sort_transactions_is_stable_and_nonmutating() {
        let mut account = checking();
        account.add_transaction(dec!(1), date(2024, 1, 10)).unwrap();
        account.add_transaction(dec!(2), date(2024, 1, 10)).unwrap();
        account.add_transaction(dec!(3), date(2024, 1, 10)).unwrap();

        let sorted = account.sort_transactions();
        let amounts: Vec<_> = sorted.iter().map(Transaction::amount).collect();
        assert_eq!(amounts, vec![dec!(1), dec!(2), dec!(3)]);
    }

    #[test]
    fn test_balance_equals_ledger_sum() {
        let mut account = checking();
        account.add_transaction(dec!(100), date(2024, 1, 2)).unwrap();
        account.add_transaction(dec!(-30.25), date(2024, 1, 3)).unwrap();
        account.assess_interest_and_fees().unwrap();

        let sum: Decimal = account.transactions().iter().map(Transaction::amount).sum();
        assert_eq!(account.balance(), sum);
    }

    #[test]
    fn test_display_rendering() {
        let mut account = checking();
        account.add_transaction(dec!(1234.5), date(2024, 1, 2)).unwrap();
        assert_eq!(account.to_string(), "Checking#000000001,\tbalance: $1,234.50");

        let savings = Account::new(12, AccountKind::Savings, date(2024, 1, 1));
        assert_eq!(savings.to_string(), "Savings#000000012,\tbalance: $0.00");
    }

    #[test]
    fn test_id_matches_parses_strings() {
        let account = checking();
        assert!(account.id_matches("1"));
        assert!(account.id_matches(" 1 "));
        assert!(!account.id_matches("2"));
        assert!(!account.id_matches("one"));
        assert!(!account.id_matches(""));
    }

    #[test]
    fn test_month_end() {
        assert_eq!(month_end(date(2024, 1, 5)), date(2024, 1, 31));
        assert_eq!(month_end(date(2024, 2, 1)), date(2024, 2, 29)); // leap year
        assert_eq!(month_end(date(2023, 2, 1)), date(2023, 2, 28));
        assert_eq!(month_end(date(2024, 12, 31)), date(2024, 12, 31));
        assert_eq!(month_end(date(2024, 4, 30)), date(2024, 4, 30));
    }
}
