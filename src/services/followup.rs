//! Due-date calculator.
//!
//! Everything here is pure: "today" is always passed in so the results are
//! reproducible in tests and across a single request.

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::domain::client::{Client, ClientDetails};
use crate::domain::relance::RelanceConfig;

/// Display format used for due dates (`16/01/2024`).
pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

fn add_days(date: NaiveDate, days: u32) -> Option<NaiveDate> {
    date.checked_add_days(Days::new(u64::from(days)))
}

/// Next follow-up date of a client, or `None` when nothing is computable.
///
/// Priority: explicit `next_due_date`, then the legacy `next_followup_at`,
/// then the category anchor date plus the configured `initial_days`.
pub fn next_due_date(client: &Client, config: &RelanceConfig) -> Option<NaiveDate> {
    client
        .followup
        .next_due_date
        .or(client.followup.next_followup_at)
        .or_else(|| {
            let category = client.category();
            client
                .details
                .anchor_date()
                .and_then(|anchor| add_days(anchor, config.initial_days(category)))
        })
}

/// Whole days from `today` to `due`; negative when overdue.
pub fn diff_days(due: NaiveDate, today: NaiveDate) -> i64 {
    (due - today).num_days()
}

fn plural_days(n: i64) -> String {
    if n == 1 {
        "1 day".to_string()
    } else {
        format!("{n} days")
    }
}

/// "N days overdue", "due in N days" or "due today".
pub fn delay_label(diff_days: i64) -> String {
    match diff_days {
        d if d < 0 => format!("{} overdue", plural_days(-d)),
        d if d > 0 => format!("due in {}", plural_days(d)),
        _ => "due today".to_string(),
    }
}

/// Due date of a client together with its display labels.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct FollowUpInfo {
    pub due_date: NaiveDate,
    pub diff_days: i64,
    pub label: String,
    pub delay_label: String,
}

impl FollowUpInfo {
    pub fn new(due_date: NaiveDate, today: NaiveDate) -> Self {
        let diff_days = diff_days(due_date, today);
        Self {
            due_date,
            diff_days,
            label: format!(
                "Next follow-up: {}",
                due_date.format(DISPLAY_DATE_FORMAT)
            ),
            delay_label: delay_label(diff_days),
        }
    }
}

pub fn followup_info(
    client: &Client,
    config: &RelanceConfig,
    today: NaiveDate,
) -> Option<FollowUpInfo> {
    next_due_date(client, config).map(|due| FollowUpInfo::new(due, today))
}

/// Due date assigned to a newly created client.
///
/// The category anchor date plus `initial_days`; without an anchor the
/// count starts from `today`, so a new client is always scheduled.
pub fn initial_due_date(
    details: &ClientDetails,
    config: &RelanceConfig,
    today: NaiveDate,
) -> Option<NaiveDate> {
    let base = details.anchor_date().unwrap_or(today);
    add_days(base, config.initial_days(details.category()))
}

/// Due date set when a follow-up is validated without an explicit date.
pub fn default_next_due_date(
    details: &ClientDetails,
    config: &RelanceConfig,
    today: NaiveDate,
) -> Option<NaiveDate> {
    add_days(today, config.default_next_days(details.category()))
}
