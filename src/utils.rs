use chrono::{DateTime, Utc};

pub fn utc_now() -> DateTime<Utc> {
    Utc::now()
}

/// Joins feature names the way the frontend bootstrap expects them.
pub fn join_features(features: &[String]) -> String {
    features
        .iter()
        .map(|f| f.trim())
        .filter(|f| !f.is_empty())
        .collect::<Vec<_>>()
        .join(",")
}
