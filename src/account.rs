//! Bank account model and derived computations.
//!
//! Movements are append-only: deposits are positive, withdrawals negative,
//! and insertion order is chronological order. Balance and summary are
//! derived on demand and never stored.

use crate::money::Money;
use rust_decimal::Decimal;

/// Derives a login username from an owner's display name.
///
/// Lowercases the name, splits on whitespace, and concatenates the first
/// letter of each word ("Steven Thomas Williams" becomes "stw"). Called once
/// at account construction; the username is immutable afterwards.
pub fn derive_username(owner: &str) -> String {
    owner
        .to_lowercase()
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .collect()
}

/// Derived income/expense/interest totals for an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    /// Sum of all positive movements.
    pub income: Money,

    /// Absolute value of the sum of all negative movements.
    pub expense: Money,

    /// Sum of per-deposit interest amounts that are at least one unit of
    /// currency.
    pub interest: Money,
}

/// A single bank account.
///
/// # Invariants
///
/// - `username` is derived from `owner` at construction and never changes
/// - `movements` is never reordered; sorting is a non-mutating view
#[derive(Debug, Clone)]
pub struct Account {
    owner: String,
    username: String,
    pin: u32,
    interest_rate: Decimal,
    movements: Vec<Money>,
}

impl Account {
    /// Creates an account, deriving its username from the owner name.
    ///
    /// `interest_rate` is a percentage: `1.2` means 1.2%.
    pub fn new(
        owner: impl Into<String>,
        pin: u32,
        interest_rate: Decimal,
        movements: Vec<Money>,
    ) -> Self {
        let owner = owner.into();
        let username = derive_username(&owner);
        Account {
            owner,
            username,
            pin,
            interest_rate,
            movements,
        }
    }

    /// The owner's display name.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// The derived login username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The account's interest rate as a percentage.
    pub fn interest_rate(&self) -> Decimal {
        self.interest_rate
    }

    /// Returns `true` if the given pin matches exactly.
    pub fn pin_matches(&self, pin: u32) -> bool {
        self.pin == pin
    }

    /// The stored movements in chronological order.
    pub fn movements(&self) -> &[Money] {
        &self.movements
    }

    /// Appends a movement at the end of the history.
    pub(crate) fn record(&mut self, movement: Money) {
        self.movements.push(movement);
    }

    /// Current balance: the sum of all movements.
    pub fn balance(&self) -> Money {
        self.movements
            .iter()
            .fold(Money::ZERO, |total, &mov| total + mov)
    }

    /// Computes the income/expense/interest summary.
    ///
    /// Interest accrues per deposit at `interest_rate` percent, but a
    /// deposit's interest only counts if it reaches one unit of currency.
    pub fn summary(&self) -> Summary {
        let income = self
            .movements
            .iter()
            .filter(|&&mov| mov > Money::ZERO)
            .fold(Money::ZERO, |total, &mov| total + mov);

        let expense = self
            .movements
            .iter()
            .filter(|&&mov| mov < Money::ZERO)
            .fold(Money::ZERO, |total, &mov| total + mov)
            .abs();

        let interest = self
            .movements
            .iter()
            .filter(|&&mov| mov > Money::ZERO)
            .map(|&mov| mov.percent(self.interest_rate))
            .filter(|&int| int >= Money::ONE)
            .fold(Money::ZERO, |total, int| total + int);

        Summary {
            income,
            expense,
            interest,
        }
    }

    /// Returns the movements sorted numerically, ascending or descending.
    ///
    /// Stable for ties and never mutates the stored history.
    pub fn sorted_movements(&self, ascending: bool) -> Vec<Money> {
        let mut movs = self.movements.clone();
        if ascending {
            movs.sort_by(|a, b| a.cmp(b));
        } else {
            movs.sort_by(|a, b| b.cmp(a));
        }
        movs
    }
}
