//! Error types for the ledger and the command-replay driver.
//!
//! Every ledger operation returns a typed failure for each rejected
//! precondition. None of these are fatal: the caller decides how to surface
//! them, and the core never logs or panics.

use thiserror::Error;

/// Result type alias for replay/driver operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Authentication failure.
///
/// Deliberately opaque: whether the username was unknown or the pin was
/// wrong is not disclosed.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("invalid credentials")]
pub struct AuthError;

/// Rejected transfer preconditions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransferError {
    /// No account is currently authenticated
    #[error("no active session")]
    NoActiveSession,

    /// Transfer amount must be strictly positive
    #[error("transfer amount must be positive")]
    NonPositiveAmount,

    /// No account with the recipient username exists
    #[error("unknown recipient '{0}'")]
    UnknownRecipient(String),

    /// Sender balance is below the requested amount
    #[error("insufficient balance")]
    InsufficientBalance,

    /// Sender and recipient are the same account
    #[error("cannot transfer to own account")]
    SelfTransfer,
}

/// Rejected loan preconditions.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoanError {
    /// No account is currently authenticated
    #[error("no active session")]
    NoActiveSession,

    /// Loan amount must be strictly positive
    #[error("loan amount must be positive")]
    NonPositiveAmount,

    /// No single past movement reaches 10% of the requested amount
    #[error("no qualifying movement for requested amount")]
    NoQualifyingMovement,
}

/// Rejected account-closure preconditions.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseError {
    /// No account is currently authenticated
    #[error("no active session")]
    NoActiveSession,

    /// Confirmation credentials do not match the active session's account
    #[error("confirmation credentials do not match")]
    ConfirmationMismatch,
}

/// Errors that can abort the command-replay driver.
///
/// Domain failures (auth, transfer, loan, close) never abort a replay; they
/// are logged and skipped. Only I/O and CSV-level problems surface here.
#[derive(Error, Debug)]
pub enum AppError {
    /// Failed to open or read the input file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// Missing input file argument
    #[error("Missing input file argument. Usage: bankist-ledger <commands.csv>")]
    MissingArgument,
}
