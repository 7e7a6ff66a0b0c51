use rust_decimal::Decimal;
use std::path::PathBuf;

use clap::Parser;

/// Driver configuration.
///
/// Amounts are parsed as decimals by clap; a non-numeric value is rejected
/// before any account operation runs, and that rejection ends the session.
#[derive(Debug, Clone, Parser)]
#[command(name = "bankr")]
#[command(about = "Single bank account with notifications and a capped-withdrawal wrapper")]
pub struct Config {
    /// Account identifier
    #[arg(long, default_value = "123456", env = "BANKR_ACCOUNT_NUMBER")]
    pub account_number: String,

    /// Initial account balance
    #[arg(long, default_value = "0", env = "BANKR_INITIAL_BALANCE")]
    pub initial_balance: Decimal,

    /// Amount to deposit before wrapping the account
    #[arg(long)]
    pub deposit: Option<Decimal>,

    /// Amount to withdraw through the secure wrapper
    #[arg(long)]
    pub withdraw: Option<Decimal>,

    /// Path to a withdrawal-policy YAML file (built-in 500 cap if unset)
    #[arg(long, env = "BANKR_POLICY_PATH")]
    pub policy_path: Option<PathBuf>,

    /// Print the final account state as JSON
    #[arg(long, default_value = "false")]
    pub json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            account_number: "123456".to_string(),
            initial_balance: Decimal::ZERO,
            deposit: None,
            withdraw: None,
            policy_path: None,
            json: false,
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.account_number, "123456");
        assert_eq!(config.initial_balance, Decimal::ZERO);
        assert!(config.policy_path.is_none());
        assert!(!config.json);
    }

    #[test]
    fn test_parse_amounts() {
        let config = Config::parse_from([
            "bankr",
            "--initial-balance",
            "1000",
            "--deposit",
            "200.0",
            "--withdraw",
            "300.0",
        ]);

        assert_eq!(config.initial_balance, Decimal::new(1000, 0));
        assert_eq!(config.deposit, Some(Decimal::new(2000, 1)));
        assert_eq!(config.withdraw, Some(Decimal::new(3000, 1)));
    }

    #[test]
    fn test_non_numeric_amount_is_fatal() {
        let result = Config::try_parse_from(["bankr", "--deposit", "abc"]);
        assert!(result.is_err());
    }
}
