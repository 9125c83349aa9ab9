//! The interactive menu session (presentation layer).
//!
//! Owns the "currently selected account" state, parses raw user input into
//! the engine's types (reprompting on bad input), and translates engine
//! errors into user-facing messages. Commits the store after every
//! successful mutating operation.

use bank_engine::engine::{Account, AccountError, AccountKind, Bank, Error, Store};
use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use std::io::{BufRead, Write};

const NO_ACCOUNT_SELECTED: &str = "This command requires that you first select an account.";

/// A menu-driven session over any line-based input and output,
/// so tests can drive it with in-memory buffers.
pub struct Session<R, W> {
    input: R,
    output: W,
    bank: Bank,
    store: Store,
    selected: Option<String>,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W, bank: Bank, store: Store) -> Self {
        Self {
            input,
            output,
            bank,
            store,
            selected: None,
        }
    }

    /// Display the bank menu and respond to choices until the user quits or
    /// the input ends.
    pub fn run(&mut self) -> Result<(), Error> {
        loop {
            self.display_menu()?;
            let Some(choice) = self.read_line()? else {
                return Ok(());
            };
            match choice.trim() {
                "1" => self.open_account()?,
                "2" => self.summary()?,
                "3" => self.select_account()?,
                "4" => self.list_transactions()?,
                "5" => self.add_transaction()?,
                "6" => self.interest_and_fees()?,
                "7" => return Ok(()),
                other => writeln!(self.output, "{other} is not a valid choice")?,
            }
        }
    }

    fn display_menu(&mut self) -> Result<(), Error> {
        let selected = match self.selected_account() {
            Some(account) => account.to_string(),
            None => "None".to_string(),
        };
        write!(
            self.output,
            "--------------------------------\n\
             Currently selected account: {selected}\n\
             Enter command\n\
             1: open account\n\
             2: summary\n\
             3: select account\n\
             4: list transactions\n\
             5: add transaction\n\
             6: interest and fees\n\
             7: quit\n\
             >"
        )?;
        self.output.flush()?;
        Ok(())
    }

    fn open_account(&mut self) -> Result<(), Error> {
        self.prompt("Type of account? (checking/savings)")?;
        let Some(label) = self.read_line()? else {
            return Ok(());
        };
        let Some(amount) = self.prompt_amount("Initial deposit amount?")? else {
            return Ok(());
        };

        let kind = AccountKind::from_label(label.trim());
        let account = self.bank.open_account(kind);
        // A negative initial deposit is refused but the account still opens
        if let Err(AccountError::Overdraw) = account.add_transaction(amount, Local::now().date_naive()) {
            writeln!(
                self.output,
                "This transaction could not be completed due to an insufficient account balance."
            )?;
        }
        self.store.commit(&self.bank)?;
        Ok(())
    }

    fn summary(&mut self) -> Result<(), Error> {
        for account in self.bank.all_accounts() {
            writeln!(self.output, "{account}")?;
        }
        Ok(())
    }

    fn select_account(&mut self) -> Result<(), Error> {
        self.prompt("Enter account number")?;
        let Some(id) = self.read_line()? else {
            return Ok(());
        };
        self.selected = self
            .bank
            .find_account(&id)
            .map(|account| account.id().to_string());
        Ok(())
    }

    fn list_transactions(&mut self) -> Result<(), Error> {
        let Some(account) = self.selected_account() else {
            writeln!(self.output, "{NO_ACCOUNT_SELECTED}")?;
            return Ok(());
        };
        let transactions = account.sort_transactions();
        for transaction in transactions {
            writeln!(self.output, "{transaction}")?;
        }
        Ok(())
    }

    fn add_transaction(&mut self) -> Result<(), Error> {
        if self.selected_account().is_none() {
            writeln!(self.output, "{NO_ACCOUNT_SELECTED}")?;
            return Ok(());
        }
        let Some(amount) = self.prompt_amount("Amount?")? else {
            return Ok(());
        };
        let Some(date) = self.prompt_date()? else {
            return Ok(());
        };

        let Some(account) = self.selected_account_mut() else {
            writeln!(self.output, "{NO_ACCOUNT_SELECTED}")?;
            return Ok(());
        };
        match account.add_transaction(amount, date) {
            Ok(()) => self.store.commit(&self.bank)?,
            Err(AccountError::Overdraw) => writeln!(
                self.output,
                "This transaction could not be completed due to an insufficient account balance."
            )?,
            Err(AccountError::TransactionLimit) => writeln!(
                self.output,
                "This transaction could not be completed because the account has reached a transaction limit."
            )?,
            Err(AccountError::TransactionSequence { latest }) => {
                writeln!(self.output, "New transactions must be from {latest} onward.")?;
            }
        }
        Ok(())
    }

    fn interest_and_fees(&mut self) -> Result<(), Error> {
        let Some(account) = self.selected_account_mut() else {
            writeln!(self.output, "{NO_ACCOUNT_SELECTED}")?;
            return Ok(());
        };
        match account.assess_interest_and_fees() {
            Ok(()) => {
                log::debug!("Triggered fees and interest");
                self.store.commit(&self.bank)?;
            }
            Err(AccountError::TransactionSequence { latest }) => {
                writeln!(
                    self.output,
                    "Cannot apply interest and fees again in the month of {}.",
                    latest.format("%B")
                )?;
            }
            // Assessment raises no other error kind
            Err(other) => return Err(other.into()),
        }
        Ok(())
    }

    fn selected_account(&self) -> Option<&Account> {
        self.selected
            .as_deref()
            .and_then(|id| self.bank.find_account(id))
    }

    fn selected_account_mut(&mut self) -> Option<&mut Account> {
        let id = self.selected.clone()?;
        self.bank.find_account_mut(&id)
    }

    /// Print a question followed by the `>` input marker.
    fn prompt(&mut self, question: &str) -> Result<(), Error> {
        write!(self.output, "{question}\n>")?;
        self.output.flush()?;
        Ok(())
    }

    /// Prompt for a dollar amount, reprompting until it parses.
    /// `None` means the input ended.
    fn prompt_amount(&mut self, question: &str) -> Result<Option<Decimal>, Error> {
        loop {
            self.prompt(question)?;
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            match line.trim().parse::<Decimal>() {
                Ok(amount) => return Ok(Some(amount)),
                Err(_) => {
                    writeln!(self.output, "Please try again with a valid dollar amount.")?;
                }
            }
        }
    }

    /// Prompt for a `YYYY-MM-DD` date, reprompting until it parses.
    fn prompt_date(&mut self) -> Result<Option<NaiveDate>, Error> {
        loop {
            self.prompt("Date? (YYYY-MM-DD)")?;
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            match NaiveDate::parse_from_str(line.trim(), "%Y-%m-%d") {
                Ok(date) => return Ok(Some(date)),
                Err(_) => {
                    writeln!(
                        self.output,
                        "Please try again with a valid date in the format YYYY-MM-DD."
                    )?;
                }
            }
        }
    }

    /// Read one line of input; `None` on end of input.
    fn read_line(&mut self) -> Result<Option<String>, Error> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}
