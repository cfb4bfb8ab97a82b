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

//! Account management.
//!
//! The account is the unit of mutual exclusion: every transaction is
//! validated and applied in one uninterruptible step under the inner mutex,
//! so concurrent applies on the same account are serialized while different
//! accounts proceed independently.
//!
//! # Example
//!
//! ```
//! use bank_ledger_rs::{Account, AccountNumber, TaxId};
//! use rust_decimal_macros::dec;
//!
//! let owner = TaxId::parse("12345678901").unwrap();
//! let account = Account::open(owner, AccountNumber(1));
//! assert_eq!(account.balance(), dec!(0));
//! assert_eq!(account.ceiling(), Account::DEFAULT_CEILING);
//! ```

use crate::base::{AccountNumber, TaxId};
use crate::clock::Clock;
use crate::error::TransactionError;
use crate::history::History;
use crate::store::AccountRecord;
use crate::transaction::Transaction;
use chrono::NaiveDate;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::ser::{Serialize, SerializeStruct, Serializer};

/// Branch code shared by every account.
pub const BRANCH_CODE: &str = "0001";

#[derive(Debug)]
struct AccountData {
    number: AccountNumber,
    branch: String,
    owner: TaxId,
    balance: Decimal,
    ceiling: Decimal,
    withdrawals_left: u32,
    withdrawal_quota: u32,
    /// Day of the last successful withdrawal, for the daily quota reset.
    last_withdrawal: Option<NaiveDate>,
    history: History,
}

impl AccountData {
    fn new(owner: TaxId, number: AccountNumber, ceiling: Decimal, quota: u32) -> Self {
        Self {
            number,
            branch: BRANCH_CODE.to_owned(),
            owner,
            balance: Decimal::ZERO,
            ceiling,
            withdrawals_left: quota,
            withdrawal_quota: quota,
            last_withdrawal: None,
            history: History::new(),
        }
    }

    fn assert_invariants(&self) {
        debug_assert!(
            self.balance >= Decimal::ZERO,
            "Invariant violated: balance went negative: {}",
            self.balance
        );
        debug_assert!(
            self.withdrawals_left <= self.withdrawal_quota,
            "Invariant violated: withdrawals remaining ({}) above quota ({})",
            self.withdrawals_left,
            self.withdrawal_quota
        );
    }

    /// Increases the balance and appends the record.
    fn deposit(&mut self, amount: Decimal, record: String) -> Result<(), TransactionError> {
        if amount <= Decimal::ZERO {
            return Err(TransactionError::InvalidAmount);
        }
        self.balance += amount;
        self.history.append(record);
        self.assert_invariants();
        Ok(())
    }

    /// Decreases the balance after the ordered validation checks.
    ///
    /// Check order is part of the contract: amount, then balance, then
    /// ceiling, then quota. A request failing several checks reports the
    /// first failing one.
    fn withdraw(
        &mut self,
        amount: Decimal,
        today: NaiveDate,
        record: String,
    ) -> Result<(), TransactionError> {
        if amount <= Decimal::ZERO {
            return Err(TransactionError::InvalidAmount);
        }
        self.refresh_quota(today);
        if amount > self.balance {
            return Err(TransactionError::InsufficientFunds);
        }
        if amount > self.ceiling {
            return Err(TransactionError::ExceedsCeiling);
        }
        if self.withdrawals_left == 0 {
            return Err(TransactionError::DailyLimitExceeded);
        }
        self.balance -= amount;
        self.withdrawals_left -= 1;
        self.last_withdrawal = Some(today);
        self.history.append(record);
        self.assert_invariants();
        Ok(())
    }

    /// Restores the withdrawal quota when the calendar day has advanced
    /// past the last successful withdrawal.
    fn refresh_quota(&mut self, today: NaiveDate) {
        if self.last_withdrawal.is_some_and(|day| day < today) {
            self.withdrawals_left = self.withdrawal_quota;
        }
    }
}

/// Ledger account: balance, withdrawal limits, and an append-only history.
#[derive(Debug)]
pub struct Account {
    inner: Mutex<AccountData>,
}

impl Account {
    /// Default per-withdrawal ceiling.
    pub const DEFAULT_CEILING: Decimal = dec!(500.00);

    /// Default number of withdrawals permitted per day.
    pub const DEFAULT_WITHDRAWAL_QUOTA: u32 = 3;

    const DECIMAL_PRECISION: u32 = 2;

    /// Opens a zero-balance account with the default limits.
    pub fn open(owner: TaxId, number: AccountNumber) -> Self {
        Self::with_limits(
            owner,
            number,
            Self::DEFAULT_CEILING,
            Self::DEFAULT_WITHDRAWAL_QUOTA,
        )
    }

    /// Opens a zero-balance account with an explicit ceiling and quota.
    pub fn with_limits(
        owner: TaxId,
        number: AccountNumber,
        ceiling: Decimal,
        quota: u32,
    ) -> Self {
        Self {
            inner: Mutex::new(AccountData::new(owner, number, ceiling, quota)),
        }
    }

    pub fn number(&self) -> AccountNumber {
        self.inner.lock().number
    }

    pub fn branch(&self) -> String {
        self.inner.lock().branch.clone()
    }

    pub fn owner(&self) -> TaxId {
        self.inner.lock().owner.clone()
    }

    pub fn balance(&self) -> Decimal {
        self.inner.lock().balance
    }

    pub fn ceiling(&self) -> Decimal {
        self.inner.lock().ceiling
    }

    pub fn withdrawals_left(&self) -> u32 {
        self.inner.lock().withdrawals_left
    }

    /// Copy of the rendered transaction records, oldest first.
    pub fn history(&self) -> Vec<String> {
        self.inner.lock().history.records().to_vec()
    }

    /// Validates and applies a transaction in one atomic step.
    ///
    /// On failure nothing changes: balance, quota, and history are left
    /// exactly as they were. A structured audit event is emitted either way.
    ///
    /// # Errors
    ///
    /// - [`TransactionError::InvalidAmount`] - amount is zero or negative.
    /// - [`TransactionError::InsufficientFunds`] - withdrawal exceeds the balance.
    /// - [`TransactionError::ExceedsCeiling`] - withdrawal exceeds the per-operation ceiling.
    /// - [`TransactionError::DailyLimitExceeded`] - withdrawal quota exhausted for the day.
    pub fn apply(
        &self,
        transaction: Transaction,
        clock: &dyn Clock,
    ) -> Result<(), TransactionError> {
        let now = clock.now();
        let record = transaction.record(now);

        let mut data = self.inner.lock();
        let result = match transaction {
            Transaction::Deposit { amount } => data.deposit(amount, record),
            Transaction::Withdrawal { amount } => {
                data.withdraw(amount, now.date_naive(), record)
            }
        };

        match &result {
            Ok(()) => tracing::info!(
                account = %data.number,
                kind = transaction.kind(),
                amount = %transaction.amount(),
                "transaction applied"
            ),
            Err(error) => tracing::warn!(
                account = %data.number,
                kind = transaction.kind(),
                amount = %transaction.amount(),
                %error,
                "transaction rejected"
            ),
        }
        result
    }

    /// Plain-data copy of the full account state for persistence.
    pub fn snapshot(&self) -> AccountRecord {
        let data = self.inner.lock();
        AccountRecord {
            number: data.number,
            branch: data.branch.clone(),
            owner: data.owner.clone(),
            balance: data.balance,
            ceiling: data.ceiling,
            withdrawals_left: data.withdrawals_left,
            withdrawal_quota: data.withdrawal_quota,
            last_withdrawal: data.last_withdrawal,
            history: data.history.clone(),
        }
    }

    /// Rebuilds an account from a snapshot record.
    pub fn restore(record: AccountRecord) -> Self {
        Self {
            inner: Mutex::new(AccountData {
                number: record.number,
                branch: record.branch,
                owner: record.owner,
                balance: record.balance,
                ceiling: record.ceiling,
                withdrawals_left: record.withdrawals_left,
                withdrawal_quota: record.withdrawal_quota,
                last_withdrawal: record.last_withdrawal,
                history: record.history,
            }),
        }
    }
}

impl Serialize for Account {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let data = self.inner.lock();
        let mut state = serializer.serialize_struct("Account", 6)?;
        state.serialize_field("number", &data.number)?;
        state.serialize_field("branch", &data.branch)?;
        state.serialize_field("owner", &data.owner)?;
        state.serialize_field(
            "balance",
            &data.balance.round_dp(Account::DECIMAL_PRECISION),
        )?;
        state.serialize_field(
            "ceiling",
            &data.ceiling.round_dp(Account::DECIMAL_PRECISION),
        )?;
        state.serialize_field("withdrawals_left", &data.withdrawals_left)?;
        state.end()
    }
}
