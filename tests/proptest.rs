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

//! Property-based tests for the account invariants.
//!
//! These verify properties that must hold for any sequence of deposits and
//! withdrawals: balance conservation, non-negativity, quota bounds, and
//! history length.

use bank_ledger_rs::{Account, AccountNumber, FixedClock, TaxId, Transaction};
use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;

// =============================================================================
// Arbitrary Strategies
// =============================================================================

/// Generate a positive amount (0.01 to 10000.00, two decimal places).
fn arb_amount() -> impl Strategy<Value = Decimal> {
    (1i64..=1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn owner() -> TaxId {
    TaxId::parse("12345678901").unwrap()
}

fn clock() -> FixedClock {
    FixedClock::new(Utc.with_ymd_and_hms(2024, 7, 15, 10, 30, 0).unwrap())
}

/// Account with limits high enough that only the balance check can fail.
fn unconstrained_account() -> Account {
    Account::with_limits(owner(), AccountNumber(1), Decimal::MAX, u32::MAX)
}

// =============================================================================
// Balance Conservation
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    /// balance == sum(successful deposits) - sum(successful withdrawals).
    #[test]
    fn balance_conservation(
        deposits in prop::collection::vec(arb_amount(), 1..10),
        withdrawals in prop::collection::vec(arb_amount(), 0..10),
    ) {
        let account = unconstrained_account();
        let clock = clock();
        let mut expected = Decimal::ZERO;

        for amount in &deposits {
            if account.apply(Transaction::Deposit { amount: *amount }, &clock).is_ok() {
                expected += *amount;
            }
        }
        for amount in &withdrawals {
            if account.apply(Transaction::Withdrawal { amount: *amount }, &clock).is_ok() {
                expected -= *amount;
            }
        }

        prop_assert_eq!(account.balance(), expected);
    }

    /// Balance is never negative, whatever the request mix.
    #[test]
    fn balance_never_negative(
        deposits in prop::collection::vec(arb_amount(), 1..5),
        withdrawals in prop::collection::vec(arb_amount(), 0..10),
    ) {
        let account = Account::open(owner(), AccountNumber(1));
        let clock = clock();

        for amount in &deposits {
            let _ = account.apply(Transaction::Deposit { amount: *amount }, &clock);
        }
        for amount in &withdrawals {
            let _ = account.apply(Transaction::Withdrawal { amount: *amount }, &clock);
        }

        prop_assert!(account.balance() >= Decimal::ZERO);
    }

    /// Order of deposits doesn't affect the final balance.
    #[test]
    fn deposit_order_independent(
        amounts in prop::collection::vec(arb_amount(), 2..10),
    ) {
        let clock = clock();
        let expected: Decimal = amounts.iter().copied().sum();

        let forward = unconstrained_account();
        for amount in &amounts {
            forward.apply(Transaction::Deposit { amount: *amount }, &clock).unwrap();
        }

        let backward = unconstrained_account();
        for amount in amounts.iter().rev() {
            backward.apply(Transaction::Deposit { amount: *amount }, &clock).unwrap();
        }

        prop_assert_eq!(forward.balance(), expected);
        prop_assert_eq!(backward.balance(), expected);
    }
}

// =============================================================================
// Withdrawal Limits
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Never more than the daily quota of successful withdrawals on one day.
    #[test]
    fn quota_bounds_successful_withdrawals(
        attempts in prop::collection::vec(1i64..=100, 1..20),
    ) {
        let account = Account::open(owner(), AccountNumber(1));
        let clock = clock();
        account
            .apply(Transaction::Deposit { amount: Decimal::new(1_000_000, 2) }, &clock)
            .unwrap();

        let mut successes = 0u32;
        for cents in attempts {
            let amount = Decimal::new(cents, 2);
            if account.apply(Transaction::Withdrawal { amount }, &clock).is_ok() {
                successes += 1;
            }
        }

        prop_assert!(successes <= Account::DEFAULT_WITHDRAWAL_QUOTA);
        prop_assert_eq!(
            account.withdrawals_left(),
            Account::DEFAULT_WITHDRAWAL_QUOTA - successes
        );
    }

    /// No single successful withdrawal above the ceiling.
    #[test]
    fn ceiling_bounds_every_withdrawal(
        amount in arb_amount(),
    ) {
        let account = Account::open(owner(), AccountNumber(1));
        let clock = clock();
        account
            .apply(Transaction::Deposit { amount: Decimal::new(2_000_000, 2) }, &clock)
            .unwrap();

        let result = account.apply(Transaction::Withdrawal { amount }, &clock);
        if amount > Account::DEFAULT_CEILING {
            prop_assert!(result.is_err());
        } else {
            prop_assert!(result.is_ok());
        }
    }
}

// =============================================================================
// History
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// History length equals the number of successful operations.
    #[test]
    fn history_counts_successful_operations(
        deposits in prop::collection::vec(arb_amount(), 0..8),
        withdrawals in prop::collection::vec(arb_amount(), 0..8),
    ) {
        let account = unconstrained_account();
        let clock = clock();
        let mut successes = 0usize;

        for amount in &deposits {
            if account.apply(Transaction::Deposit { amount: *amount }, &clock).is_ok() {
                successes += 1;
            }
        }
        for amount in &withdrawals {
            if account.apply(Transaction::Withdrawal { amount: *amount }, &clock).is_ok() {
                successes += 1;
            }
        }

        prop_assert_eq!(account.history().len(), successes);
    }
}
