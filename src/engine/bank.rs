use super::account::{Account, AccountId, AccountKind};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// A collection of accounts that can be opened, receive transactions, and
/// be searched by id.
///
/// Ids are assigned sequentially starting at 1, in creation order.
#[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Bank {
    accounts: Vec<Account>,
}

impl Bank {
    /// Create a new `Bank` with no accounts
    pub fn new() -> Self {
        log::trace!("Bank initialized");
        Self {
            accounts: Vec::new(),
        }
    }

    /// Open a new account of the given kind, dated today, and return a
    /// reference to it.
    pub fn open_account(&mut self, kind: AccountKind) -> &mut Account {
        self.open_account_on(kind, Local::now().date_naive())
    }

    /// Open a new account with an explicit opening date.
    pub fn open_account_on(&mut self, kind: AccountKind, opened_on: NaiveDate) -> &mut Account {
        let id = self.next_id();
        self.accounts.push(Account::new(id, kind, opened_on));
        self.accounts
            .last_mut()
            .expect("accounts is non-empty after push")
    }

    /// Returns all accounts in creation order
    pub fn all_accounts(&self) -> &[Account] {
        &self.accounts
    }

    /// Locate the account with the given id. The id is raw user input;
    /// unknown or unparsable ids return `None`.
    pub fn find_account(&self, id: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id_matches(id))
    }

    /// Mutable lookup, used by the front end to apply transactions to a
    /// selected account.
    pub fn find_account_mut(&mut self, id: &str) -> Option<&mut Account> {
        self.accounts.iter_mut().find(|a| a.id_matches(id))
    }

    fn next_id(&self) -> AccountId {
        self.accounts.last().map_or(1, |a| a.id() + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_ids_are_sequential_from_one() {
        let mut bank = Bank::new();
        let opened = date(2024, 1, 1);
        assert_eq!(bank.open_account_on(AccountKind::Checking, opened).id(), 1);
        assert_eq!(bank.open_account_on(AccountKind::Savings, opened).id(), 2);
        assert_eq!(bank.open_account_on(AccountKind::Savings, opened).id(), 3);
    }

    #[test]
    fn test_all_accounts_in_creation_order() {
        let mut bank = Bank::new();
        let opened = date(2024, 1, 1);
        bank.open_account_on(AccountKind::Savings, opened);
        bank.open_account_on(AccountKind::Checking, opened);

        let ids: Vec<_> = bank.all_accounts().iter().map(Account::id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(bank.all_accounts()[0].kind(), AccountKind::Savings);
        assert_eq!(bank.all_accounts()[1].kind(), AccountKind::Checking);
    }

    #[test]
    fn test_find_account() {
        let mut bank = Bank::new();
        let opened = date(2024, 1, 1);
        for _ in 0..3 {
            bank.open_account_on(AccountKind::Checking, opened);
        }

        assert_eq!(bank.find_account("2").map(Account::id), Some(2));
        assert!(bank.find_account("4").is_none());
        assert!(bank.find_account("not a number").is_none());
    }
}
