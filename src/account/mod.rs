pub mod error;

pub use error::AccountError;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::notify::{Listener, NotificationChannel};

/// Opaque account identifier. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountNumber(String);

impl AccountNumber {
    pub fn new(number: impl Into<String>) -> Self {
        AccountNumber(number.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single bank account: balance, active flag, and its notification channel.
///
/// Two states, Open and Closed, with a one-way transition via [`close`].
/// Deposits are not gated by state; withdrawals are gated only by the
/// balance check (see DESIGN.md on the closed-account withdrawal behavior).
/// Every successful transaction publishes one message to the channel.
///
/// [`close`]: BankAccount::close
#[derive(Debug)]
pub struct BankAccount {
    number: AccountNumber,
    balance: Decimal,
    active: bool,
    channel: NotificationChannel,
}

impl BankAccount {
    /// Create an open account. The initial balance is caller-supplied and
    /// not validated against negativity.
    pub fn new(number: AccountNumber, initial_balance: Decimal) -> Self {
        BankAccount {
            number,
            balance: initial_balance,
            active: true,
            channel: NotificationChannel::new(),
        }
    }

    pub fn number(&self) -> &AccountNumber {
        &self.number
    }

    /// Current balance. No side effects, callable in any state.
    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Attach a transaction listener to this account's channel.
    pub fn attach(&mut self, listener: Arc<dyn Listener>) {
        self.channel.attach(listener);
    }

    /// Publish a transaction message through this account's channel.
    ///
    /// Crate-visible so the policy wrapper can reach through to the base
    /// channel when it completes a withdrawal of its own.
    pub(crate) fn log_transaction(&self, message: &str) {
        self.channel.publish(message);
    }

    /// Add `amount` to the balance and notify listeners.
    ///
    /// Negative amounts leave the balance unchanged and return
    /// [`AccountError::NegativeDeposit`]. Deposits succeed on closed
    /// accounts; close gates nothing here.
    pub fn deposit(&mut self, amount: Decimal) -> Result<(), AccountError> {
        if amount < Decimal::ZERO {
            return Err(AccountError::NegativeDeposit { amount });
        }
        self.balance += amount;
        tracing::debug!(account = %self.number, %amount, balance = %self.balance, "deposit");
        self.channel.publish(&format!("Transaction made: +{amount}"));
        Ok(())
    }

    /// Deduct `amount` from the balance and notify listeners.
    ///
    /// Fails with [`AccountError::Overdraw`] when `amount` exceeds the
    /// balance, regardless of active status. A withdrawal that clears the
    /// balance check proceeds even on a closed account; the active flag is
    /// enforced only by [`SecureAccount`](crate::policy::SecureAccount).
    pub fn withdraw(&mut self, amount: Decimal) -> Result<(), AccountError> {
        if amount > self.balance {
            return Err(AccountError::Overdraw {
                amount,
                balance: self.balance,
            });
        }
        self.balance -= amount;
        tracing::debug!(account = %self.number, %amount, balance = %self.balance, "withdraw");
        self.channel.publish(&format!("Transaction made: -{amount}"));
        Ok(())
    }

    /// Close the account. Idempotent, one-way, no notification.
    pub fn close(&mut self) {
        self.active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::TransactionLog;

    fn open_account(balance: i64) -> BankAccount {
        BankAccount::new(AccountNumber::new("123456"), Decimal::new(balance, 0))
    }

    #[test]
    fn test_negative_deposit_rejected() {
        let mut account = open_account(100);
        let err = account.deposit(Decimal::new(-50, 0)).unwrap_err();

        assert!(matches!(err, AccountError::NegativeDeposit { .. }));
        assert_eq!(
            err.to_string(),
            "Cannot make a negative deposit! Please enter a positive amount."
        );
        assert_eq!(account.balance(), Decimal::new(100, 0));
    }

    #[test]
    fn test_deposit_increases_balance_and_notifies() {
        let log = TransactionLog::new();
        let mut account = open_account(1000);
        account.attach(Arc::new(log.clone()));

        account.deposit(Decimal::new(2000, 1)).unwrap(); // 200.0

        assert_eq!(account.balance(), Decimal::new(1200, 0));
        assert_eq!(log.messages(), vec!["Transaction made: +200.0"]);
    }

    #[test]
    fn test_zero_deposit_is_valid() {
        let log = TransactionLog::new();
        let mut account = open_account(100);
        account.attach(Arc::new(log.clone()));

        account.deposit(Decimal::ZERO).unwrap();

        assert_eq!(account.balance(), Decimal::new(100, 0));
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_deposit_succeeds_on_closed_account() {
        let mut account = open_account(100);
        account.close();

        account.deposit(Decimal::new(50, 0)).unwrap();
        assert_eq!(account.balance(), Decimal::new(150, 0));
    }

    #[test]
    fn test_overdraw_rejected_regardless_of_state() {
        let log = TransactionLog::new();
        let mut account = open_account(100);
        account.attach(Arc::new(log.clone()));

        let err = account.withdraw(Decimal::new(101, 0)).unwrap_err();
        assert!(matches!(err, AccountError::Overdraw { .. }));
        assert_eq!(account.balance(), Decimal::new(100, 0));
        assert!(log.is_empty());

        // Same outcome on a closed account: the overdraw check runs first
        account.close();
        let err = account.withdraw(Decimal::new(101, 0)).unwrap_err();
        assert!(matches!(err, AccountError::Overdraw { .. }));
        assert_eq!(account.balance(), Decimal::new(100, 0));
    }

    #[test]
    fn test_withdraw_succeeds_on_closed_account() {
        // Surprising but required: a withdrawal that clears the balance
        // check proceeds even after close().
        let mut account = open_account(100);
        account.close();

        account.withdraw(Decimal::new(40, 0)).unwrap();
        assert_eq!(account.balance(), Decimal::new(60, 0));
    }

    #[test]
    fn test_withdraw_entire_balance() {
        let mut account = open_account(100);
        account.withdraw(Decimal::new(100, 0)).unwrap();
        assert_eq!(account.balance(), Decimal::ZERO);
    }

    #[test]
    fn test_withdraw_notifies() {
        let log = TransactionLog::new();
        let mut account = open_account(1000);
        account.attach(Arc::new(log.clone()));

        account.withdraw(Decimal::new(3000, 1)).unwrap(); // 300.0

        assert_eq!(log.messages(), vec!["Transaction made: -300.0"]);
    }

    #[test]
    fn test_close_is_idempotent() {
        let mut account = open_account(100);
        assert!(account.is_active());

        account.close();
        assert!(!account.is_active());

        account.close();
        assert!(!account.is_active());
        assert_eq!(account.balance(), Decimal::new(100, 0));
    }

    #[test]
    fn test_account_number_serde() {
        let number = AccountNumber::new("123456");
        let json = serde_json::to_string(&number).unwrap();
        assert_eq!(json, "\"123456\"");

        let parsed: AccountNumber = serde_json::from_str("\"987\"").unwrap();
        assert_eq!(parsed.as_str(), "987");
    }
}
