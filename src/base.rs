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

//! Core identifier types for clients and accounts.

use crate::error::RegistrationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unique tax identifier for a client.
///
/// Fixed format: exactly 11 ASCII digits. Immutable after creation and
/// unique across the directory.
///
/// # Example
///
/// ```
/// use bank_ledger_rs::TaxId;
///
/// let id = TaxId::parse("12345678901").unwrap();
/// assert_eq!(id.as_str(), "12345678901");
/// assert!(TaxId::parse("123").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct TaxId(String);

impl TaxId {
    /// Required number of digits.
    pub const LEN: usize = 11;

    /// Validates the fixed-length/digits-only shape and builds a `TaxId`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::InvalidTaxId`] if the input is not
    /// exactly [`TaxId::LEN`] ASCII digits.
    pub fn parse(raw: &str) -> Result<Self, RegistrationError> {
        let raw = raw.trim();
        if raw.len() != Self::LEN || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(RegistrationError::InvalidTaxId);
        }
        Ok(Self(raw.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TaxId {
    type Err = RegistrationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Unique identifier for an account.
///
/// Wraps a `u32`. Numbers are assigned monotonically by the directory and
/// never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct AccountNumber(pub u32);

impl fmt::Display for AccountNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
