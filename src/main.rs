use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};

use bankr::observability::init_tracing;
use bankr::policy::load_policy;
use bankr::{AccountNumber, BankAccount, CapPolicy, Config, SecureAccount, TransactionLog};

#[derive(Serialize)]
struct Summary<'a> {
    account: &'a AccountNumber,
    balance: Decimal,
    active: bool,
    notifications: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    init_tracing(&config.log_level);

    let policy = match &config.policy_path {
        Some(path) => load_policy(path)
            .with_context(|| format!("loading policy from {}", path.display()))?,
        None => CapPolicy::default(),
    };

    let number = AccountNumber::new(&config.account_number);
    let mut account = BankAccount::new(number, config.initial_balance);
    info!(account = %account.number(), "Bank Account Created: #{}", account.number());

    let log = TransactionLog::new();
    account.attach(Arc::new(log.clone()));

    // Deposit lands on the base account before it gets wrapped
    if let Some(amount) = config.deposit {
        if let Err(err) = account.deposit(amount) {
            warn!("{err}");
        }
    }

    let mut secure = SecureAccount::with_policy(account, policy);

    if let Some(amount) = config.withdraw {
        match secure.withdraw(amount) {
            Ok(outcome) => info!(%outcome, "withdrawal handled"),
            Err(err) => warn!("{err}"),
        }
    }

    if config.json {
        let summary = Summary {
            account: secure.number(),
            balance: secure.balance(),
            active: secure.inner().is_active(),
            notifications: log.messages(),
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("Final Balance: {}", secure.balance());
    }

    Ok(())
}
