//! Duration specs of the form `"7d"`, `"12h"`, `"30m"`, `"45s"`.

use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};

use panelkit_core::error::AppError;

/// A parsed token lifetime: a positive value plus a day/hour/minute/second
/// unit suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TtlSpec {
    duration: Duration,
}

impl TtlSpec {
    /// The lifetime as a `chrono::Duration`.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Computes the absolute expiry from the given instant.
    pub fn expiry_from(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now + self.duration
    }
}

impl FromStr for TtlSpec {
    type Err = AppError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let spec = spec.trim();
        let (value, unit) = spec.split_at(spec.len().saturating_sub(1));

        let value: i64 = value
            .parse()
            .map_err(|_| AppError::configuration(format!("Invalid TTL spec '{spec}'")))?;

        if value <= 0 {
            return Err(AppError::configuration(format!(
                "TTL spec '{spec}' must be positive"
            )));
        }

        let duration = match unit {
            "d" => Duration::days(value),
            "h" => Duration::hours(value),
            "m" => Duration::minutes(value),
            "s" => Duration::seconds(value),
            _ => {
                return Err(AppError::configuration(format!(
                    "Invalid TTL unit in '{spec}' (expected d, h, m, or s)"
                )));
            }
        };

        Ok(Self { duration })
    }
}
