pub mod account;
pub mod config;
pub mod notify;
pub mod observability;
pub mod policy;

pub use account::{AccountError, AccountNumber, BankAccount};
pub use config::Config;
pub use notify::{Listener, NotificationChannel, TransactionLog};
pub use policy::{CapPolicy, SecureAccount, WithdrawOutcome};
