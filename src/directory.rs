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

//! Client directory and account registry.
//!
//! The [`Directory`] is the explicit shared state of the ledger, constructed
//! once at process start and passed by reference to whoever needs it. It
//! resolves clients by tax identifier, allocates account numbers, and routes
//! transaction submissions to the owning client.
//!
//! # Concurrency
//!
//! Lookups may run concurrently; registration and account opening preserve
//! uniqueness through the [`DashMap`] entry API and an atomic counter.
//! Per-account serialization is the account's own concern.

use crate::account::Account;
use crate::base::{AccountNumber, TaxId};
use crate::client::Client;
use crate::clock::{Clock, SystemClock};
use crate::error::{DirectoryError, RegistrationError};
use crate::store::{AccountRecord, Snapshot};
use crate::transaction::Transaction;
use chrono::NaiveDate;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

/// Registry of clients and accounts with monotonic account numbering.
pub struct Directory {
    /// Clients indexed by tax identifier.
    clients: DashMap<TaxId, Client>,
    /// Accounts indexed by account number.
    accounts: DashMap<AccountNumber, Account>,
    /// Next account number to hand out. Never reused.
    next_account: AtomicU32,
    /// Timestamp source for transaction records and the daily quota.
    clock: Arc<dyn Clock>,
}

impl Directory {
    const MIN_NAME_LEN: usize = 3;
    const MIN_ADDRESS_LEN: usize = 10;

    /// Creates an empty directory backed by the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Creates an empty directory with an injected clock.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            clients: DashMap::new(),
            accounts: DashMap::new(),
            next_account: AtomicU32::new(1),
            clock,
        }
    }

    /// Registers a new client.
    ///
    /// Validation, in order: tax identifier shape, duplicate identifier,
    /// name length (>= 3), address length (>= 10). Returns a plain-data copy
    /// of the registered client; the directory entry itself is reachable via
    /// [`Directory::find_by_tax_id`].
    ///
    /// # Errors
    ///
    /// One of the [`RegistrationError`] variants; the directory is unchanged
    /// on failure.
    pub fn register(
        &self,
        tax_id: &str,
        name: &str,
        birth_date: NaiveDate,
        address: &str,
    ) -> Result<Client, RegistrationError> {
        let tax_id = TaxId::parse(tax_id)?;
        if self.clients.contains_key(&tax_id) {
            return Err(RegistrationError::DuplicateClient);
        }
        let name = name.trim();
        if name.chars().count() < Self::MIN_NAME_LEN {
            return Err(RegistrationError::InvalidName);
        }
        let address = address.trim();
        if address.chars().count() < Self::MIN_ADDRESS_LEN {
            return Err(RegistrationError::InvalidAddress);
        }

        let client = Client::new(tax_id.clone(), name.to_owned(), birth_date, address.to_owned());

        // Entry API keeps the check-and-insert atomic under concurrent
        // registration.
        match self.clients.entry(tax_id) {
            Entry::Occupied(_) => Err(RegistrationError::DuplicateClient),
            Entry::Vacant(entry) => {
                entry.insert(client.clone());
                tracing::info!(client = %client.tax_id(), name = client.name(), "client registered");
                Ok(client)
            }
        }
    }

    /// Exact-match lookup by tax identifier.
    ///
    /// Repeated calls with the same identifier resolve to the same
    /// directory entry.
    pub fn find_by_tax_id(
        &self,
        tax_id: &TaxId,
    ) -> Option<dashmap::mapref::one::Ref<'_, TaxId, Client>> {
        self.clients.get(tax_id)
    }

    /// Opens a new default-limit account for an existing client.
    ///
    /// Allocates the next account number, registers the account, and appends
    /// it to the client's owned list.
    ///
    /// # Errors
    ///
    /// [`DirectoryError::ClientNotFound`] for an unknown tax identifier.
    pub fn open_account(&self, tax_id: &TaxId) -> Result<AccountNumber, DirectoryError> {
        let mut client = self
            .clients
            .get_mut(tax_id)
            .ok_or(DirectoryError::ClientNotFound)?;

        let number = AccountNumber(self.next_account.fetch_add(1, Ordering::SeqCst));
        self.accounts
            .insert(number, Account::open(tax_id.clone(), number));
        client.add_account(number);
        tracing::info!(client = %tax_id, account = %number, "account opened");
        Ok(number)
    }

    /// Retrieves an account by number.
    pub fn account(
        &self,
        number: AccountNumber,
    ) -> Option<dashmap::mapref::one::Ref<'_, AccountNumber, Account>> {
        self.accounts.get(&number)
    }

    /// Resolves the client and account, then submits the transaction
    /// through the client's authorization check.
    ///
    /// # Errors
    ///
    /// Lookup misses surface as [`DirectoryError::ClientNotFound`] /
    /// [`DirectoryError::AccountNotFound`]; everything else is the wrapped
    /// [`crate::TransactionError`].
    pub fn submit(
        &self,
        tax_id: &TaxId,
        number: AccountNumber,
        transaction: Transaction,
    ) -> Result<(), DirectoryError> {
        let client = self
            .clients
            .get(tax_id)
            .ok_or(DirectoryError::ClientNotFound)?;
        let account = self
            .accounts
            .get(&number)
            .ok_or(DirectoryError::AccountNotFound)?;
        client.submit(account.value(), transaction, self.clock.as_ref())?;
        Ok(())
    }

    /// Returns an iterator over all registered clients.
    pub fn clients(
        &self,
    ) -> impl Iterator<Item = dashmap::mapref::multiple::RefMulti<'_, TaxId, Client>> {
        self.clients.iter()
    }

    /// Returns an iterator over all accounts.
    pub fn accounts(
        &self,
    ) -> impl Iterator<Item = dashmap::mapref::multiple::RefMulti<'_, AccountNumber, Account>> {
        self.accounts.iter()
    }

    pub fn client_count(&self) -> usize {
        self.clients.len()
    }

    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }

    /// Plain-data dump of the whole directory, deterministically ordered.
    pub fn snapshot(&self) -> Snapshot {
        let mut clients: Vec<Client> = self.clients.iter().map(|e| e.value().clone()).collect();
        clients.sort_by(|a, b| a.tax_id().as_str().cmp(b.tax_id().as_str()));

        let mut accounts: Vec<AccountRecord> =
            self.accounts.iter().map(|e| e.value().snapshot()).collect();
        accounts.sort_by_key(|record| record.number);

        Snapshot { clients, accounts }
    }

    /// Rebuilds a directory from a snapshot, using the system clock.
    pub fn restore(snapshot: Snapshot) -> Self {
        Self::restore_with_clock(snapshot, Arc::new(SystemClock))
    }

    /// Rebuilds a directory from a snapshot with an injected clock.
    ///
    /// The account counter resumes past the highest persisted number so
    /// numbers are never reused.
    pub fn restore_with_clock(snapshot: Snapshot, clock: Arc<dyn Clock>) -> Self {
        let next = snapshot
            .accounts
            .iter()
            .map(|record| record.number.0)
            .max()
            .unwrap_or(0)
            + 1;

        let directory = Self {
            clients: DashMap::new(),
            accounts: DashMap::new(),
            next_account: AtomicU32::new(next),
            clock,
        };
        for client in snapshot.clients {
            directory
                .clients
                .insert(client.tax_id().clone(), client);
        }
        for record in snapshot.accounts {
            directory
                .accounts
                .insert(record.number, Account::restore(record));
        }
        directory
    }
}

impl Default for Directory {
    fn default() -> Self {
        Self::new()
    }
}
