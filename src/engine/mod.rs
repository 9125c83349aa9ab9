//! Bank engine module.
//!
//! This module contains the core banking logic including:
//! - `Bank` - The account collection with creation and lookup
//! - `Account` - Ledger state, limit policy, interest and fee assessment
//! - `Transaction` - Immutable dated ledger entries
//! - `Store` - JSON file persistence of the whole bank graph
//! - `Error` types - Engine rule violations and persistence faults

mod account;
mod bank;
mod currency;
mod error;
mod store;
mod transaction;

pub(crate) use rust_decimal::Decimal;

pub use account::{Account, AccountKind};
pub use bank::Bank;
pub use error::{AccountError, Error};
pub use store::Store;
pub use transaction::Transaction;
