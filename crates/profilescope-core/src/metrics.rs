use serde::{Deserialize, Serialize};

use crate::models::ProfileRecord;

pub const SCORE_PER_REPO: f64 = 2.0;
pub const SCORE_PER_FOLLOWER: f64 = 3.0;
pub const VALUE_PER_REPO: u64 = 500;
pub const VALUE_PER_FOLLOWER: u64 = 1000;
pub const VALUE_PER_GIST: u64 = 300;

/// Score and valuation derived from a profile's public counts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    /// `repos * 2 + followers * 3`
    pub score: f64,
    /// `repos * 500 + followers * 1000 + gists * 300`
    pub valuation: u64,
}

/// Compute the metrics, counting absent fields as zero
///
/// Valuation saturates at `u64::MAX` instead of overflowing.
pub fn derive_metrics(record: &ProfileRecord) -> DerivedMetrics {
    let repos = record.repos();
    let followers = record.followers();
    let gists = record.gists();

    let score = repos as f64 * SCORE_PER_REPO + followers as f64 * SCORE_PER_FOLLOWER;
    let valuation = repos
        .saturating_mul(VALUE_PER_REPO)
        .saturating_add(followers.saturating_mul(VALUE_PER_FOLLOWER))
        .saturating_add(gists.saturating_mul(VALUE_PER_GIST));

    DerivedMetrics { score, valuation }
}

/// Score with one decimal place
pub fn format_score(score: f64) -> String {
    format!("{:.1}", score)
}

/// Valuation with a currency prefix and grouped thousands
pub fn format_valuation(valuation: u64, separator: char) -> String {
    let digits = valuation.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(c);
    }

    format!("${}", grouped)
}

/// Three labelled values for the metrics chart
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub title: &'static str,
    pub labels: [&'static str; 3],
    pub values: [f64; 3],
}

impl ChartSeries {
    pub fn max_value(&self) -> f64 {
        self.values.iter().cloned().fold(0.0f64, f64::max)
    }
}

pub fn chart_series(record: &ProfileRecord) -> ChartSeries {
    ChartSeries {
        title: "Profile metrics",
        labels: ["Public repos", "Followers", "Public gists"],
        values: [
            record.repos() as f64,
            record.followers() as f64,
            record.gists() as f64,
        ],
    }
}

/// Extended explanation shown when the user asks for more detail
pub const EXPLANATION: &[(&str, &str)] = &[
    ("Repos", "Number of public repositories on the profile."),
    ("Followers", "Number of followers on GitHub."),
    ("Gists", "Number of public gists of the account."),
    ("Score", "Computed as 2x Repos + 3x Followers."),
    ("Valuation", "500 per repo + 1000 per follower + 300 per gist."),
];
