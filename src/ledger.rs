//! The ledger: all accounts plus the session-scoped operations.
//!
//! Exactly one session is active at a time. The `Session` value is owned by
//! the caller and passed into every operation that depends on the
//! authenticated account, so there is no hidden process-wide state.
//!
//! All mutations are single-threaded and atomic as seen by the caller: a
//! rejected precondition leaves every account's movement history untouched.
//! Embedding this in a concurrent host requires external locking or a
//! single-writer queue.

use crate::account::Account;
use crate::error::{AuthError, CloseError, LoanError, TransferError};
use crate::money::Money;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// The single active session: the currently authenticated username, if any.
#[derive(Debug, Clone, Default)]
pub struct Session {
    current: Option<String>,
}

impl Session {
    /// Creates a session with no authenticated account.
    pub fn new() -> Self {
        Session { current: None }
    }

    /// The username of the authenticated account, if any.
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Returns `true` if an account is authenticated.
    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }

    /// Ends the session (logout).
    pub fn clear(&mut self) {
        self.current = None;
    }
}

/// The in-memory bank ledger, indexed by username.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    accounts: HashMap<String, Account>,
}

impl Ledger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Ledger {
            accounts: HashMap::new(),
        }
    }

    /// Creates a ledger from a set of accounts.
    ///
    /// Precondition: derived usernames are unique. This is not validated;
    /// a duplicate username silently replaces the earlier account.
    pub fn with_accounts(accounts: impl IntoIterator<Item = Account>) -> Self {
        let accounts = accounts
            .into_iter()
            .map(|account| (account.username().to_string(), account))
            .collect();
        Ledger { accounts }
    }

    /// The four demo accounts the application is seeded with at startup.
    pub fn demo() -> Self {
        Ledger::with_accounts([
            Account::new(
                "Jonas Schmedtmann",
                1111,
                Decimal::new(12, 1),
                movements(&[200, 450, -400, 3000, -650, -130, 70, 1300]),
            ),
            Account::new(
                "Jessica Davis",
                2222,
                Decimal::new(15, 1),
                movements(&[5000, 3400, -150, -790, -3210, -1000, 8500, -30]),
            ),
            Account::new(
                "Steven Thomas Williams",
                3333,
                Decimal::new(7, 1),
                movements(&[200, -200, 340, -300, -20, 50, 400, -460]),
            ),
            Account::new(
                "Sarah Smith",
                4444,
                Decimal::ONE,
                movements(&[430, 1000, 700, 50, 90]),
            ),
        ])
    }

    /// Looks up an account by username.
    pub fn account(&self, username: &str) -> Option<&Account> {
        self.accounts.get(username)
    }

    /// Iterates over all accounts in unspecified order.
    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    /// Number of open accounts.
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Returns `true` if no accounts are open.
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Authenticates a username/pin pair and establishes the session.
    ///
    /// Both the username (case-sensitive) and the pin must match exactly.
    /// On failure the session is left untouched and the error discloses
    /// nothing beyond "invalid credentials".
    pub fn authenticate<'a>(
        &'a self,
        session: &mut Session,
        username: &str,
        pin: u32,
    ) -> Result<&'a Account, AuthError> {
        let account = self.accounts.get(username).ok_or(AuthError)?;
        if !account.pin_matches(pin) {
            return Err(AuthError);
        }
        session.current = Some(account.username().to_string());
        Ok(account)
    }

    /// Transfers `amount` from the session's account to `to_username`.
    ///
    /// Requires a positive amount, a known recipient distinct from the
    /// sender, and a sender balance covering the amount. Appends `-amount`
    /// to the sender and `+amount` to the recipient; on any rejected
    /// precondition neither history changes.
    pub fn transfer(
        &mut self,
        session: &Session,
        to_username: &str,
        amount: Money,
    ) -> Result<(), TransferError> {
        let from_username = session.current().ok_or(TransferError::NoActiveSession)?;
        let sender = self
            .accounts
            .get(from_username)
            .ok_or(TransferError::NoActiveSession)?;

        if amount <= Money::ZERO {
            return Err(TransferError::NonPositiveAmount);
        }
        if !self.accounts.contains_key(to_username) {
            return Err(TransferError::UnknownRecipient(to_username.to_string()));
        }
        if sender.balance() < amount {
            return Err(TransferError::InsufficientBalance);
        }
        if to_username == from_username {
            return Err(TransferError::SelfTransfer);
        }

        let from_username = from_username.to_string();

        // Safety: both accounts were verified above
        self.accounts
            .get_mut(&from_username)
            .expect("sender exists")
            .record(-amount);
        self.accounts
            .get_mut(to_username)
            .expect("recipient exists")
            .record(amount);

        Ok(())
    }

    /// Grants a loan to the session's account.
    ///
    /// The bank only lends if some single past movement reaches 10% of the
    /// requested amount. The scan covers all movements, not only deposits,
    /// with a signed comparison; in practice only deposits can reach the
    /// positive threshold.
    pub fn request_loan(&mut self, session: &Session, amount: Money) -> Result<(), LoanError> {
        let username = session.current().ok_or(LoanError::NoActiveSession)?;
        let account = self
            .accounts
            .get_mut(username)
            .ok_or(LoanError::NoActiveSession)?;

        if amount <= Money::ZERO {
            return Err(LoanError::NonPositiveAmount);
        }

        let threshold = amount.percent(Decimal::TEN);
        if !account.movements().iter().any(|&mov| mov >= threshold) {
            return Err(LoanError::NoQualifyingMovement);
        }

        account.record(amount);
        Ok(())
    }

    /// Closes the session's account after credential re-confirmation.
    ///
    /// The confirmation username and pin must match the authenticated
    /// account itself, not merely any account. On success the account is
    /// removed from the ledger and the session ends.
    pub fn close_account(
        &mut self,
        session: &mut Session,
        username: &str,
        pin: u32,
    ) -> Result<(), CloseError> {
        let current = session
            .current()
            .ok_or(CloseError::NoActiveSession)?
            .to_string();
        let account = self
            .accounts
            .get(&current)
            .ok_or(CloseError::NoActiveSession)?;

        if account.username() != username || !account.pin_matches(pin) {
            return Err(CloseError::ConfirmationMismatch);
        }

        self.accounts.remove(&current);
        session.clear();
        Ok(())
    }
}

fn movements(values: &[i64]) -> Vec<Money> {
    values.iter().map(|&v| Money::from(v)).collect()
}
