//! Range checks and parsers for slash command options.

use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::errors::{WardenError, WardenResult};

pub const TIMEOUT_MINUTES: RangeInclusive<i64> = 1..=10080;
pub const CLEAR_COUNT: RangeInclusive<i64> = 1..=100;
pub const SLOWMODE_SECONDS: RangeInclusive<i64> = 0..=21600;

/// Reason recorded when the invoker did not give one.
pub const DEFAULT_REASON: &str = "No reason given";

/// Longest reason accepted, in characters. Leaves room in a 2000 character
/// message for the text around it.
pub const REASON_LIMIT: usize = 900;

/// Normalise an optional user supplied reason.
pub fn reason_or_default(reason: Option<&str>) -> String {
    match reason.map(str::trim) {
        Some(reason) if !reason.is_empty() => reason.to_string(),
        _ => DEFAULT_REASON.to_string(),
    }
}

fn within(value: i64, range: RangeInclusive<i64>, what: &str) -> WardenResult<i64> {
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(WardenError::Validation(format!(
            "{} must be between {} and {}.",
            what,
            range.start(),
            range.end()
        )))
    }
}

pub fn timeout_minutes(value: i64) -> WardenResult<u32> {
    within(value, TIMEOUT_MINUTES, "Minutes").map(|v| v as u32)
}

pub fn clear_count(value: i64) -> WardenResult<u8> {
    within(value, CLEAR_COUNT, "Count").map(|v| v as u8)
}

pub fn slowmode_seconds(value: i64) -> WardenResult<u64> {
    within(value, SLOWMODE_SECONDS, "Seconds").map(|v| v as u64)
}

fn unknown_action(action: &str) -> WardenError {
    WardenError::Validation(format!("Unknown action `{}`.", action))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketAction {
    Create,
    Close,
}

impl FromStr for TicketAction {
    type Err = WardenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create" => Ok(TicketAction::Create),
            "close" => Ok(TicketAction::Close),
            other => Err(unknown_action(other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoroleAction {
    Set,
    Disable,
    Show,
}

impl FromStr for AutoroleAction {
    type Err = WardenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "set" => Ok(AutoroleAction::Set),
            "disable" => Ok(AutoroleAction::Disable),
            "show" => Ok(AutoroleAction::Show),
            other => Err(unknown_action(other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleAction {
    Add,
    Remove,
}

impl FromStr for RoleAction {
    type Err = WardenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add" => Ok(RoleAction::Add),
            "remove" => Ok(RoleAction::Remove),
            other => Err(unknown_action(other)),
        }
    }
}
