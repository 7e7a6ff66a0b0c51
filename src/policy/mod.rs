pub mod loader;

pub use loader::{load_policy, PolicyError};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::account::{AccountError, AccountNumber, BankAccount};
use crate::notify::Listener;

/// Default per-transaction withdrawal cap, in account currency units.
pub const DEFAULT_CAP_PER_TX: Decimal = Decimal::from_parts(500, 0, 0, false, 0);

/// Withdrawal policy applied by [`SecureAccount`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapPolicy {
    /// Policy version string for audit output.
    pub version: String,

    /// Maximum amount a single withdrawal may move.
    pub cap_per_tx: Decimal,
}

impl Default for CapPolicy {
    fn default() -> Self {
        CapPolicy {
            version: "1".to_string(),
            cap_per_tx: DEFAULT_CAP_PER_TX,
        }
    }
}

/// Outcome of a withdrawal attempt against a [`SecureAccount`].
///
/// A policy rejection is not an error: the call returns normally with no
/// state change and no notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WithdrawOutcome {
    /// Balance was debited and listeners notified.
    Completed,
    /// Amount exceeded the per-transaction cap; nothing changed.
    CapExceeded,
}

impl WithdrawOutcome {
    #[inline]
    pub fn is_completed(&self) -> bool {
        *self == WithdrawOutcome::Completed
    }
}

impl fmt::Display for WithdrawOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WithdrawOutcome::Completed => write!(f, "COMPLETED"),
            WithdrawOutcome::CapExceeded => write!(f, "CAP_EXCEEDED"),
        }
    }
}

/// Policy decorator over a [`BankAccount`].
///
/// Wraps exactly one account at construction, copying its number and
/// wrap-time balance into decorator-local state. After wrapping, deposits
/// and withdrawals act on the copied balance while notifications reach
/// through to the base account's channel; the inner balance stays frozen at
/// its wrap-time value and is never resynchronized (see DESIGN.md).
#[derive(Debug)]
pub struct SecureAccount {
    number: AccountNumber,
    balance: Decimal,
    policy: CapPolicy,
    inner: BankAccount,
}

impl SecureAccount {
    /// Wrap an account under the default 500-per-transaction cap.
    pub fn new(inner: BankAccount) -> Self {
        Self::with_policy(inner, CapPolicy::default())
    }

    /// Wrap an account under an explicit policy.
    pub fn with_policy(inner: BankAccount, policy: CapPolicy) -> Self {
        SecureAccount {
            number: inner.number().clone(),
            balance: inner.balance(),
            policy,
            inner,
        }
    }

    pub fn number(&self) -> &AccountNumber {
        &self.number
    }

    /// The decorator's own balance copy, not the wrapped account's.
    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn policy(&self) -> &CapPolicy {
        &self.policy
    }

    /// The wrapped account. Its balance reflects wrap time, not the
    /// transactions applied through this wrapper.
    pub fn inner(&self) -> &BankAccount {
        &self.inner
    }

    pub fn into_inner(self) -> BankAccount {
        self.inner
    }

    /// Attach a listener to the base account's channel.
    pub fn attach(&mut self, listener: Arc<dyn Listener>) {
        self.inner.attach(listener);
    }

    /// Deposit into the decorator's balance; notifies via the base channel.
    pub fn deposit(&mut self, amount: Decimal) -> Result<(), AccountError> {
        if amount < Decimal::ZERO {
            return Err(AccountError::NegativeDeposit { amount });
        }
        self.balance += amount;
        self.inner
            .log_transaction(&format!("Transaction made: +{amount}"));
        Ok(())
    }

    /// Withdraw from the decorator's balance.
    ///
    /// Checks run in order: overdraw against the decorator's own balance,
    /// the base account's active flag, then the per-transaction cap. A cap
    /// miss is a normal return of [`WithdrawOutcome::CapExceeded`] with a
    /// warn diagnostic and no state change.
    pub fn withdraw(&mut self, amount: Decimal) -> Result<WithdrawOutcome, AccountError> {
        if amount > self.balance {
            return Err(AccountError::Overdraw {
                amount,
                balance: self.balance,
            });
        }
        if !self.inner.is_active() {
            return Err(AccountError::InvalidOperation);
        }
        if amount > self.policy.cap_per_tx {
            tracing::warn!(
                account = %self.number,
                %amount,
                cap = %self.policy.cap_per_tx,
                "Cannot withdraw >{} dollars in one transaction! Please try again with a smaller amount.",
                self.policy.cap_per_tx
            );
            return Ok(WithdrawOutcome::CapExceeded);
        }
        self.balance -= amount;
        self.inner
            .log_transaction(&format!("Transaction made: -{amount}"));
        Ok(WithdrawOutcome::Completed)
    }

    /// Close the wrapped account.
    pub fn close(&mut self) {
        self.inner.close();
    }
}
