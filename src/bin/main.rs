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

use bank_ledger_rs::{
    AccountNumber, BRANCH_CODE, Directory, DirectoryError, JsonStore, TaxId, Transaction,
};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use csv::Writer;
use rust_decimal::Decimal;
use std::io::Write;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

/// Bank Ledger - clients, accounts, deposits, and withdrawals
///
/// Every command loads the snapshot file, runs one operation, and writes the
/// snapshot back.
#[derive(Parser, Debug)]
#[command(name = "bank-ledger-rs")]
#[command(about = "A retail banking ledger over a durable JSON snapshot", long_about = None)]
struct Args {
    /// Path to the snapshot file
    #[arg(long, value_name = "FILE", default_value = "bank.json")]
    data: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Register a new client
    Register {
        /// Tax identifier, 11 digits
        tax_id: String,
        /// Full name (minimum 3 characters)
        name: String,
        /// Birth date, dd/mm/yyyy
        birth_date: String,
        /// Address (minimum 10 characters)
        address: String,
    },
    /// Open a new account for a registered client
    OpenAccount {
        tax_id: TaxId,
    },
    /// Deposit an amount into an account
    Deposit {
        tax_id: TaxId,
        account: u32,
        amount: Decimal,
    },
    /// Withdraw an amount from an account
    Withdraw {
        tax_id: TaxId,
        account: u32,
        amount: Decimal,
    },
    /// Print the statement of an account
    Statement {
        account: u32,
    },
    /// List all accounts as CSV on stdout
    List,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let store = JsonStore::new(&args.data);

    // Load the durable snapshot, or start empty on first use.
    let directory = if store.exists() {
        match store.load() {
            Ok(snapshot) => Directory::restore(snapshot),
            Err(e) => {
                eprintln!("Error loading snapshot '{}': {}", args.data.display(), e);
                process::exit(1);
            }
        }
    } else {
        Directory::new()
    };

    if let Err(e) = run(&args.command, &directory) {
        eprintln!("Error: {e}");
        process::exit(1);
    }

    if let Err(e) = store.save(&directory.snapshot()) {
        eprintln!("Error saving snapshot '{}': {}", args.data.display(), e);
        process::exit(1);
    }
}

fn run(command: &Command, directory: &Directory) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Register {
            tax_id,
            name,
            birth_date,
            address,
        } => {
            let birth_date = NaiveDate::parse_from_str(birth_date, "%d/%m/%Y")?;
            let client = directory.register(tax_id, name, birth_date, address)?;
            println!("Client {} ({}) registered", client.name(), client.tax_id());
        }
        Command::OpenAccount { tax_id } => {
            let number = directory.open_account(tax_id)?;
            println!("Branch: {BRANCH_CODE} | Account: {number}");
        }
        Command::Deposit {
            tax_id,
            account,
            amount,
        } => {
            let number = AccountNumber(*account);
            directory.submit(tax_id, number, Transaction::Deposit { amount: *amount })?;
            print_balance(directory, number)?;
        }
        Command::Withdraw {
            tax_id,
            account,
            amount,
        } => {
            let number = AccountNumber(*account);
            directory.submit(tax_id, number, Transaction::Withdrawal { amount: *amount })?;
            print_balance(directory, number)?;
        }
        Command::Statement { account } => {
            let account = directory
                .account(AccountNumber(*account))
                .ok_or(DirectoryError::AccountNotFound)?;
            println!("======= STATEMENT =======");
            let history = account.history();
            if history.is_empty() {
                println!("No transactions recorded.");
            } else {
                for record in &history {
                    println!("{record}");
                }
            }
            println!("-------------------------");
            println!("Balance: {:.2}", account.balance());
        }
        Command::List => {
            write_accounts(directory, std::io::stdout())?;
        }
    }
    Ok(())
}

fn print_balance(directory: &Directory, number: AccountNumber) -> Result<(), DirectoryError> {
    let account = directory
        .account(number)
        .ok_or(DirectoryError::AccountNotFound)?;
    println!("Account {} balance: {:.2}", number, account.balance());
    Ok(())
}

/// Writes every account to a CSV writer, lowest number first.
///
/// Columns: `number, branch, owner, balance, ceiling, withdrawals_left`,
/// money rounded to 2 decimal places.
fn write_accounts<W: Write>(directory: &Directory, writer: W) -> Result<(), csv::Error> {
    let mut numbers: Vec<AccountNumber> =
        directory.accounts().map(|entry| *entry.key()).collect();
    numbers.sort();

    let mut wtr = Writer::from_writer(writer);
    for number in numbers {
        if let Some(account) = directory.account(number) {
            wtr.serialize(account.value())?;
        }
    }
    wtr.flush()?;
    Ok(())
}
