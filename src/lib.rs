//! A small personal-bank ledger engine.
//!
//! The [`engine`] module holds the core rules: which transactions an account
//! accepts, how monthly interest and fees are assessed, and the invariants
//! tying balances to ledgers and dates.

pub mod engine;

pub use engine::{
    Account, AccountError, AccountKind, Bank, Error, Store, Transaction,
};
