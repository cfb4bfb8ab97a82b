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

//! Error types for the ledger.
//!
//! Domain errors are recoverable and never abort the process; a failed
//! operation leaves all state untouched and requires a new, corrected
//! request. Only [`StoreError`] represents infrastructure failures.

use thiserror::Error;

/// Transaction validation and application errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransactionError {
    /// Amount is zero or negative
    #[error("invalid amount (must be positive)")]
    InvalidAmount,

    /// Withdrawal would exceed the current balance
    #[error("insufficient funds")]
    InsufficientFunds,

    /// Withdrawal exceeds the per-operation ceiling
    #[error("amount exceeds the withdrawal ceiling")]
    ExceedsCeiling,

    /// Withdrawal quota for the day is exhausted
    #[error("daily withdrawal limit exceeded")]
    DailyLimitExceeded,

    /// Submit called with an account the client does not hold
    #[error("account is not owned by this client")]
    AccountNotOwned,
}

/// Client registration validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    /// Tax identifier fails the fixed-length/digits-only shape check
    #[error("invalid tax identifier (must be 11 digits)")]
    InvalidTaxId,

    /// Display name is shorter than 3 characters
    #[error("name too short (minimum 3 characters)")]
    InvalidName,

    /// Address is shorter than 10 characters
    #[error("address too short (minimum 10 characters)")]
    InvalidAddress,

    /// A client with this tax identifier already exists
    #[error("a client with this tax identifier already exists")]
    DuplicateClient,
}

/// Directory-level errors: lookup misses plus the domain errors they wrap.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    /// No client registered under the given tax identifier
    #[error("client not found")]
    ClientNotFound,

    /// No account registered under the given number
    #[error("account not found")]
    AccountNotFound,

    #[error(transparent)]
    Registration(#[from] RegistrationError),

    #[error(transparent)]
    Transaction(#[from] TransactionError),
}

/// Infrastructure failures from the snapshot store.
///
/// Distinct from the domain errors above: the presentation layer may retry
/// or report these, the core itself never does.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
