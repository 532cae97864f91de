//! Command-replay driver over the ledger.
//!
//! Streams a CSV command log through a seeded ledger and a single session,
//! then writes the final account states as CSV. Rejected operations are
//! logged and skipped; only I/O and CSV-level errors abort a replay.

use crate::command::{Command, CommandRecord};
use crate::error::Result;
use crate::ledger::{Ledger, Session};
use csv::{ReaderBuilder, Trim};
use log::{debug, warn};
use std::io::{Read, Write};

/// Replays a command log against a ledger.
///
/// # Output Ordering
///
/// Final account states are written sorted by username in ascending order
/// to ensure deterministic, reproducible output.
pub struct Replay {
    ledger: Ledger,
    session: Session,
}

impl Replay {
    /// Creates a replay over the given ledger with no active session.
    pub fn new(ledger: Ledger) -> Self {
        Replay {
            ledger,
            session: Session::new(),
        }
    }

    /// The ledger in its current state.
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// The current session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Processes commands from a CSV reader in streaming fashion.
    ///
    /// Records are read one at a time. Invalid records and rejected
    /// operations are logged at warn level and skipped.
    pub fn process_csv<R: Read>(&mut self, reader: R) -> Result<()> {
        let mut csv_reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        for (row_idx, result) in csv_reader.deserialize::<CommandRecord>().enumerate() {
            let row_num = row_idx + 2; // 1-indexed, accounting for header row

            match result {
                Ok(record) => {
                    if let Some(command) = record.parse() {
                        self.apply(command, row_num);
                    } else {
                        warn!("Row {}: Failed to parse command record", row_num);
                    }
                }
                Err(e) => {
                    warn!("Row {}: CSV parse error: {}", row_num, e);
                }
            }
        }

        Ok(())
    }

    /// Applies a single parsed command, logging the outcome.
    fn apply(&mut self, command: Command, row: usize) {
        match command {
            Command::Login { username, pin } => {
                match self.ledger.authenticate(&mut self.session, &username, pin) {
                    Ok(account) => {
                        debug!("Row {}: Logged in '{}' ({})", row, username, account.owner());
                    }
                    Err(e) => warn!("Row {}: Login as '{}' rejected: {}", row, username, e),
                }
            }
            Command::Transfer { to, amount } => {
                match self.ledger.transfer(&self.session, &to, amount) {
                    Ok(()) => debug!("Row {}: Transferred {} to '{}'", row, amount, to),
                    Err(e) => warn!("Row {}: Transfer of {} to '{}' rejected: {}", row, amount, to, e),
                }
            }
            Command::Loan { amount } => {
                match self.ledger.request_loan(&self.session, amount) {
                    Ok(()) => debug!("Row {}: Granted loan of {}", row, amount),
                    Err(e) => warn!("Row {}: Loan of {} rejected: {}", row, amount, e),
                }
            }
            Command::Close { username, pin } => {
                match self.ledger.close_account(&mut self.session, &username, pin) {
                    Ok(()) => debug!("Row {}: Closed account '{}'", row, username),
                    Err(e) => warn!("Row {}: Closing account '{}' rejected: {}", row, username, e),
                }
            }
        }
    }

    /// Writes final account states to CSV.
    ///
    /// Output is sorted by username for deterministic results. All monetary
    /// values are formatted with exactly 2 decimal places.
    pub fn write_output<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["username", "owner", "balance", "income", "expense", "interest"])?;

        // Sort by username for deterministic output
        let mut accounts: Vec<_> = self.ledger.accounts().collect();
        accounts.sort_by_key(|a| a.username().to_string());

        for account in accounts {
            let summary = account.summary();
            csv_writer.write_record([
                account.username().to_string(),
                account.owner().to_string(),
                account.balance().to_string(),
                summary.income.to_string(),
                summary.expense.to_string(),
                summary.interest.to_string(),
            ])?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use std::io::Cursor;

    fn replay_csv(csv: &str) -> Replay {
        let mut replay = Replay::new(Ledger::demo());
        replay.process_csv(Cursor::new(csv)).unwrap();
        replay
    }

    #[test]
    fn test_login_and_transfer() {
        let csv = r#"op,username,pin,to,amount
login,js,1111,,
transfer,,,jd,500"#;

        let replay = replay_csv(csv);

        assert_eq!(replay.session().current(), Some("js"));
        let sender = replay.ledger().account("js").unwrap();
        let recipient = replay.ledger().account("jd").unwrap();
        assert_eq!(sender.balance(), Money::from(3340));
        assert_eq!(recipient.movements().last(), Some(&Money::from(500)));
    }

    #[test]
    fn test_commands_before_login_are_skipped() {
        let csv = r#"op,username,pin,to,amount
transfer,,,jd,500
loan,,,,1000"#;

        let replay = replay_csv(csv);

        assert!(!replay.session().is_active());
        assert_eq!(
            replay.ledger().account("js").unwrap().balance(),
            Money::from(3840)
        );
    }

    #[test]
    fn test_failed_login_blocks_following_commands() {
        let csv = r#"op,username,pin,to,amount
login,js,9999,,
transfer,,,jd,500"#;

        let replay = replay_csv(csv);

        assert!(!replay.session().is_active());
        assert_eq!(
            replay.ledger().account("jd").unwrap().movements().len(),
            8
        );
    }

    #[test]
    fn test_loan_appends_movement() {
        let csv = r#"op,username,pin,to,amount
login,js,1111,,
loan,,,,2000"#;

        let replay = replay_csv(csv);
        let account = replay.ledger().account("js").unwrap();
        assert_eq!(account.movements().last(), Some(&Money::from(2000)));
    }

    #[test]
    fn test_close_removes_account_from_output() {
        let csv = r#"op,username,pin,to,amount
login,ss,4444,,
close,ss,4444,,"#;

        let replay = replay_csv(csv);

        assert!(replay.ledger().account("ss").is_none());
        assert!(!replay.session().is_active());

        let mut output = Vec::new();
        replay.write_output(&mut output).unwrap();
        let output_str = String::from_utf8(output).unwrap();
        assert!(!output_str.contains("ss,Sarah Smith"));
    }

    #[test]
    fn test_unknown_op_is_skipped() {
        let csv = r#"op,username,pin,to,amount
login,js,1111,,
withdraw,,,,100
transfer,,,jd,100"#;

        let replay = replay_csv(csv);
        assert_eq!(
            replay.ledger().account("js").unwrap().balance(),
            Money::from(3740)
        );
    }

    #[test]
    fn test_whitespace_handling() {
        let csv = r#"op, username, pin, to, amount
login, js, 1111, ,
transfer, , , jd, 100"#;

        let replay = replay_csv(csv);
        assert_eq!(
            replay.ledger().account("js").unwrap().balance(),
            Money::from(3740)
        );
    }

    #[test]
    fn test_output_format() {
        let csv = r#"op,username,pin,to,amount
login,js,1111,,"#;

        let replay = replay_csv(csv);
        let mut output = Vec::new();
        replay.write_output(&mut output).unwrap();
        let output_str = String::from_utf8(output).unwrap();

        assert!(output_str.starts_with("username,owner,balance,income,expense,interest"));
        assert!(output_str.contains("js,Jonas Schmedtmann,3840.00,5020.00,1180.00,59.40"));
        // usernames sorted ascending
        let usernames: Vec<&str> = output_str
            .lines()
            .skip(1)
            .filter_map(|line| line.split(',').next())
            .collect();
        assert_eq!(usernames, ["jd", "js", "ss", "stw"]);
    }

    #[test]
    fn test_second_login_switches_session() {
        let csv = r#"op,username,pin,to,amount
login,js,1111,,
login,jd,2222,,
transfer,,,js,1000"#;

        let replay = replay_csv(csv);

        assert_eq!(replay.session().current(), Some("jd"));
        let jonas = replay.ledger().account("js").unwrap();
        assert_eq!(jonas.movements().last(), Some(&Money::from(1000)));
    }
}
