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

//! Money-movement transactions.
//!
//! A transaction is constructed transiently per operation request, applied
//! to an account exactly once, then discarded. Only its rendered record
//! survives in the account history.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A deposit or withdrawal of a decimal amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transaction {
    Deposit { amount: Decimal },
    Withdrawal { amount: Decimal },
}

impl Transaction {
    pub fn amount(&self) -> Decimal {
        match self {
            Self::Deposit { amount } => *amount,
            Self::Withdrawal { amount } => *amount,
        }
    }

    /// Lowercase kind label for structured log events.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Deposit { .. } => "deposit",
            Self::Withdrawal { .. } => "withdrawal",
        }
    }

    /// Renders the history record for this transaction.
    ///
    /// Format: `<Weekday>, <dd/mm/yyyy HH:MM> - <Kind>: <amount>`, amount
    /// with two fraction digits. Rounding happens here for display only,
    /// never for validation.
    pub fn record(&self, at: DateTime<Utc>) -> String {
        let label = match self {
            Self::Deposit { .. } => "Deposit",
            Self::Withdrawal { .. } => "Withdrawal",
        };
        format!(
            "{} - {}: {:.2}",
            at.format("%A, %d/%m/%Y %H:%M"),
            label,
            self.amount()
        )
    }
}
