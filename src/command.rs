//! Command records for CSV replay and their typed representation.

use crate::money::Money;
use serde::Deserialize;
use std::str::FromStr;

/// Raw command record as read from a replay CSV.
///
/// Columns are `op,username,pin,to,amount`; every field except `op` is
/// optional and only consulted by the operations that need it.
#[derive(Debug, Deserialize)]
pub struct CommandRecord {
    /// Operation name: login, transfer, loan, close
    pub op: String,

    /// Login/confirmation username (login, close)
    #[serde(default)]
    pub username: Option<String>,

    /// Login/confirmation pin (login, close)
    #[serde(default)]
    pub pin: Option<String>,

    /// Recipient username (transfer)
    #[serde(default)]
    pub to: Option<String>,

    /// Monetary amount (transfer, loan)
    #[serde(default)]
    pub amount: Option<String>,
}

impl CommandRecord {
    /// Parses the raw CSV record into a typed command.
    ///
    /// Returns `None` if the record is invalid (unknown op, missing or
    /// unparsable fields).
    pub fn parse(&self) -> Option<Command> {
        let op = self.op.trim().to_lowercase();

        match op.as_str() {
            "login" => Some(Command::Login {
                username: nonempty(&self.username)?,
                pin: self.parse_pin()?,
            }),
            "transfer" => Some(Command::Transfer {
                to: nonempty(&self.to)?,
                amount: self.parse_amount()?,
            }),
            "loan" => Some(Command::Loan {
                amount: self.parse_amount()?,
            }),
            "close" => Some(Command::Close {
                username: nonempty(&self.username)?,
                pin: self.parse_pin()?,
            }),
            _ => None,
        }
    }

    /// Parses the pin field into a number.
    fn parse_pin(&self) -> Option<u32> {
        self.pin.as_ref()?.trim().parse().ok()
    }

    /// Parses the amount field into `Money`.
    fn parse_amount(&self) -> Option<Money> {
        let amount_str = self.amount.as_ref()?;
        let trimmed = amount_str.trim();
        if trimmed.is_empty() {
            return None;
        }
        Money::from_str(trimmed).ok()
    }
}

/// Returns the trimmed field content, or `None` if absent or empty.
fn nonempty(field: &Option<String>) -> Option<String> {
    let trimmed = field.as_ref()?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// A parsed and validated replay command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Authenticate and establish the session.
    Login { username: String, pin: u32 },

    /// Transfer funds from the session's account to another account.
    Transfer { to: String, amount: Money },

    /// Request a loan for the session's account.
    Loan { amount: Money },

    /// Close the session's account after credential re-confirmation.
    Close { username: String, pin: u32 },
}
