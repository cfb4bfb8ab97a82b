// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! # Bank Ledger
//!
//! A minimal retail-banking ledger: clients, accounts, and money-movement
//! transactions (deposits, withdrawals) with an append-only per-account
//! history.
//!
//! ## Core Components
//!
//! - [`Directory`]: client registry, account registry, and account numbering
//! - [`Client`]: owns a list of accounts and authorizes submissions
//! - [`Account`]: balance, withdrawal ceiling, daily quota, and history
//! - [`Transaction`]: deposit/withdrawal with a validate-then-apply contract
//! - [`TransactionError`]: the domain error taxonomy
//!
//! ## Example
//!
//! ```
//! use bank_ledger_rs::{Directory, Transaction};
//! use chrono::NaiveDate;
//! use rust_decimal_macros::dec;
//!
//! let directory = Directory::new();
//!
//! let client = directory
//!     .register(
//!         "12345678901",
//!         "Maria Silva",
//!         NaiveDate::from_ymd_opt(1990, 3, 14).unwrap(),
//!         "Rua das Flores, 100 - Centro",
//!     )
//!     .unwrap();
//!
//! let number = directory.open_account(client.tax_id()).unwrap();
//! directory
//!     .submit(client.tax_id(), number, Transaction::Deposit { amount: dec!(100.00) })
//!     .unwrap();
//!
//! let account = directory.account(number).unwrap();
//! assert_eq!(account.balance(), dec!(100.00));
//! assert_eq!(account.history().len(), 1);
//! ```
//!
//! ## Thread Safety
//!
//! Each account serializes its own applies behind a mutex; operations on
//! different accounts run in parallel. Registration and account opening are
//! atomic against the shared registries.

pub mod account;
mod base;
pub mod clock;
mod client;
mod directory;
pub mod error;
mod history;
pub mod store;
mod transaction;

pub use account::{Account, BRANCH_CODE};
pub use base::{AccountNumber, TaxId};
pub use clock::{Clock, FixedClock, SystemClock};
pub use client::Client;
pub use directory::Directory;
pub use error::{DirectoryError, RegistrationError, StoreError, TransactionError};
pub use history::History;
pub use store::{AccountRecord, JsonStore, Snapshot};
pub use transaction::Transaction;
