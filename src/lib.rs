//! # Bankist Ledger
//!
//! An in-memory bank ledger with session-scoped operations: authenticate,
//! transfer, request loan, close account, plus derived balance, summary,
//! and sorted-movement views.
//!
//! ## Design Principles
//!
//! - **Fixed-point arithmetic**: 2 decimal places via `rust_decimal`
//! - **Explicit session**: one authenticated account at a time, passed into
//!   every operation that depends on it, no global state
//! - **Typed failures**: every rejected precondition is a recoverable
//!   `Err`, never a panic; the core itself never logs
//! - **Append-only history**: movements are never reordered; sorting is a
//!   non-mutating view
//!
//! ## Example
//!
//! ```no_run
//! use bankist_ledger::{Ledger, Replay};
//! use std::io::Cursor;
//!
//! let csv = "op,username,pin,to,amount\nlogin,js,1111,,\ntransfer,,,jd,500\n";
//! let mut replay = Replay::new(Ledger::demo());
//! replay.process_csv(Cursor::new(csv)).unwrap();
//! replay.write_output(std::io::stdout()).unwrap();
//! ```

pub mod account;
pub mod command;
pub mod error;
pub mod ledger;
pub mod money;
pub mod replay;

pub use account::{derive_username, Account, Summary};
pub use command::{Command, CommandRecord};
pub use error::{AppError, AuthError, CloseError, LoanError, Result, TransferError};
pub use ledger::{Ledger, Session};
pub use money::Money;
pub use replay::Replay;
