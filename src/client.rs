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

//! Client management.
//!
//! A client is plain data: identity, contact details, and the ordered list
//! of owned account numbers. Accounts are referenced by number and resolved
//! through the directory, never owned directly.

use crate::account::Account;
use crate::base::{AccountNumber, TaxId};
use crate::clock::Clock;
use crate::error::TransactionError;
use crate::transaction::Transaction;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A registered client and the accounts it holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    tax_id: TaxId,
    name: String,
    birth_date: NaiveDate,
    address: String,
    accounts: Vec<AccountNumber>,
}

impl Client {
    pub(crate) fn new(tax_id: TaxId, name: String, birth_date: NaiveDate, address: String) -> Self {
        Self {
            tax_id,
            name,
            birth_date,
            address,
            accounts: Vec::new(),
        }
    }

    pub fn tax_id(&self) -> &TaxId {
        &self.tax_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn birth_date(&self) -> NaiveDate {
        self.birth_date
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Owned account numbers, in the order they were opened.
    pub fn accounts(&self) -> &[AccountNumber] {
        &self.accounts
    }

    pub fn owns(&self, number: AccountNumber) -> bool {
        self.accounts.contains(&number)
    }

    /// Appends an account number to the owned list.
    ///
    /// A number that is already present is a no-op, keeping the list free
    /// of duplicates.
    pub fn add_account(&mut self, number: AccountNumber) {
        if !self.owns(number) {
            self.accounts.push(number);
        }
    }

    /// Submits a transaction against one of this client's accounts.
    ///
    /// The client is the sole entry point authorized to move money: the
    /// account must appear in the owned list, otherwise the submission is
    /// rejected before any validation runs.
    ///
    /// # Errors
    ///
    /// [`TransactionError::AccountNotOwned`] when the account does not
    /// belong to this client, plus every error [`Account::apply`] reports.
    pub fn submit(
        &self,
        account: &Account,
        transaction: Transaction,
        clock: &dyn Clock,
    ) -> Result<(), TransactionError> {
        if !self.owns(account.number()) {
            return Err(TransactionError::AccountNotOwned);
        }
        account.apply(transaction, clock)
    }
}
