use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One rendered template in the cache index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub template_name: String,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub mod_time: DateTime<Utc>,
    /// Fully resolved text, emitted verbatim on a hit
    pub template: String,
}

impl CacheEntry {
    pub fn new(
        template_name: impl Into<String>,
        template: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            template_name: template_name.into(),
            mod_time: now,
            template: template.into(),
        }
    }

    /// Age in whole hours, rounded to the nearest hour
    pub fn age_hours(&self, now: DateTime<Utc>) -> u64 {
        let seconds = (now - self.mod_time).num_seconds().unsigned_abs();
        (seconds as f64 / 3600.0).round() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_mod_time_is_unix_seconds() {
        let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let entry = CacheEntry::new("home", "<p>hi</p>", now);

        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(
            json,
            r#"{"template_name":"home","mod_time":1700000000,"template":"<p>hi</p>"}"#
        );
    }

    #[test]
    fn test_age_rounds_to_nearest_hour() {
        let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let entry = CacheEntry::new("home", "", now - Duration::minutes(89));
        assert_eq!(entry.age_hours(now), 1);

        let entry = CacheEntry::new("home", "", now - Duration::minutes(90));
        assert_eq!(entry.age_hours(now), 2);
    }

    #[test]
    fn test_age_of_future_entry_is_absolute() {
        let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let entry = CacheEntry::new("home", "", now + Duration::hours(3));
        assert_eq!(entry.age_hours(now), 3);
    }
}
