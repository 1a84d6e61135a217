//! Completeness and usage score of a client portfolio.

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::domain::client::{Client, ClientCategory, ClientDetails};
use crate::domain::relance::RelanceConfig;
use crate::domain::types::NonEmptyString;
use crate::services::followup::next_due_date;

/// Clients due this many days ago or earlier count as stale.
const STALE_AFTER_DAYS: u64 = 2;

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ScoreReport {
    /// Overall score between 0 and 10, one decimal.
    pub score: f64,
    pub coverage: f64,
    pub timeliness: f64,
    pub completeness: f64,
    pub active_count: usize,
    pub due_count: usize,
    pub stale_count: usize,
    pub reasons: Vec<String>,
    pub tips: Vec<String>,
}

fn coverage_weight(category: ClientCategory) -> f64 {
    match category {
        ClientCategory::Seller => 0.5,
        ClientCategory::Buyer | ClientCategory::After => 0.25,
    }
}

fn noun(category: ClientCategory) -> &'static str {
    match category {
        ClientCategory::Seller => "seller",
        ClientCategory::Buyer => "buyer",
        ClientCategory::After => "after-sale",
    }
}

fn filled(value: &Option<NonEmptyString>) -> bool {
    value.is_some()
}

/// Share of the category checklist that is filled in.
fn completeness_of(client: &Client) -> f64 {
    let contact = &client.contact;
    let base = [filled(&contact.last_name), filled(&contact.phone)];
    let checks: Vec<bool> = match &client.details {
        ClientDetails::Seller(details) => vec![
            filled(&details.property_address),
            filled(&details.project_horizon),
            filled(&client.consultant_feeling),
            filled(&details.seller_kind),
        ],
        ClientDetails::Buyer(details) => vec![
            filled(&details.area),
            filled(&details.budget_max),
            filled(&details.min_surface),
        ],
        ClientDetails::After(details) => vec![
            filled(&details.after_address),
            details.sale_date.is_some(),
            details.client_birthday.is_some(),
            filled(&details.context),
        ],
    };

    let total = base.len() + checks.len();
    let done = base.iter().chain(checks.iter()).filter(|ok| **ok).count();
    done as f64 / total as f64
}

fn round_one(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Scores the active part of the snapshot as of `today`.
pub fn compute_score(clients: &[Client], config: &RelanceConfig, today: NaiveDate) -> ScoreReport {
    let active: Vec<&Client> = clients.iter().filter(|c| !c.is_closed()).collect();

    let mut reasons = Vec::new();
    let mut tips = Vec::new();

    if active.is_empty() {
        reasons.push("no active clients".to_string());
        tips.push("Add your first clients to start tracking follow-ups.".to_string());
        return ScoreReport {
            score: 0.0,
            coverage: 0.0,
            timeliness: 1.0,
            completeness: 0.0,
            active_count: 0,
            due_count: 0,
            stale_count: 0,
            reasons,
            tips,
        };
    }

    let mut coverage = 0.0;
    for category in ClientCategory::ALL {
        if active.iter().any(|client| client.category() == category) {
            coverage += coverage_weight(category);
        } else {
            reasons.push(format!("no active {} client", noun(category)));
            tips.push(format!("Record at least one {} client.", noun(category)));
        }
    }

    let stale_limit = today.checked_sub_days(Days::new(STALE_AFTER_DAYS));
    let due_dates: Vec<NaiveDate> = active
        .iter()
        .filter_map(|client| next_due_date(client, config))
        .filter(|due| *due <= today)
        .collect();
    let due_count = due_dates.len();
    let stale_count = due_dates
        .iter()
        .filter(|due| stale_limit.is_some_and(|limit| **due <= limit))
        .count();
    let timeliness = if due_count == 0 {
        1.0
    } else {
        (due_count - stale_count) as f64 / due_count as f64
    };
    if stale_count > 0 {
        reasons.push(format!(
            "{stale_count} client(s) more than one day overdue"
        ));
        tips.push("Catch up on overdue follow-ups first.".to_string());
    }

    let completeness =
        active.iter().map(|client| completeness_of(client)).sum::<f64>() / active.len() as f64;
    let percent = (completeness * 100.0).round();
    reasons.push(format!("client records {percent}% complete"));
    if completeness < 1.0 {
        tips.push("Fill in missing phone, address and project details.".to_string());
    }

    let raw = 10.0 * coverage * (0.7 + 0.3 * timeliness) * (0.6 + 0.4 * completeness);

    ScoreReport {
        score: round_one(raw.clamp(0.0, 10.0)),
        coverage,
        timeliness,
        completeness,
        active_count: active.len(),
        due_count,
        stale_count,
        reasons,
        tips,
    }
}
