use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised by account operations.
///
/// The Display text of each variant is the exact diagnostic shown to the
/// user; callers render it verbatim rather than rewording.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccountError {
    /// Deposit amount below zero.
    #[error("Cannot make a negative deposit! Please enter a positive amount.")]
    NegativeDeposit { amount: Decimal },

    /// Withdrawal amount exceeds the current balance.
    #[error("Withdrawal amount exceeds account balance! Please try again with a smaller amount.")]
    Overdraw { amount: Decimal, balance: Decimal },

    /// Operation attempted on a closed account.
    #[error("Account is not active.")]
    InvalidOperation,
}
