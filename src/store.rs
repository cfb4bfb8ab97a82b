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

//! Snapshot persistence collaborator.
//!
//! The core exposes plain data only; this module turns it into a durable
//! JSON file and back. The on-disk format carries no compatibility
//! guarantee beyond round-tripping through the same version.

use crate::base::{AccountNumber, TaxId};
use crate::client::Client;
use crate::error::StoreError;
use crate::history::History;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const TMP_SUFFIX: &str = "tmp";

/// Full plain-data state of one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    pub number: AccountNumber,
    pub branch: String,
    pub owner: TaxId,
    pub balance: Decimal,
    pub ceiling: Decimal,
    pub withdrawals_left: u32,
    pub withdrawal_quota: u32,
    pub last_withdrawal: Option<NaiveDate>,
    pub history: History,
}

/// Opaque dump of every client and account in the directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub clients: Vec<Client>,
    pub accounts: Vec<AccountRecord>,
}

/// Stores a [`Snapshot`] as a JSON file.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Reads the snapshot back from disk.
    ///
    /// # Errors
    ///
    /// [`StoreError`] on a missing/unreadable file or malformed JSON.
    pub fn load(&self) -> Result<Snapshot, StoreError> {
        let data = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Writes the snapshot to disk.
    ///
    /// The data goes to a temp file first and is renamed into place, so a
    /// failed write never truncates an existing snapshot.
    pub fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        let data = serde_json::to_string_pretty(snapshot)?;
        let tmp = self.path.with_extension(TMP_SUFFIX);
        fs::write(&tmp, data)?;
        fs::rename(&tmp, &self.path)?;
        tracing::debug!(path = %self.path.display(), "snapshot saved");
        Ok(())
    }
}
