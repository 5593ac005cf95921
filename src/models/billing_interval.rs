use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Billing cadence of a paid plan and the state of the pricing toggle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingInterval {
    #[default]
    Month,
    Year,
}

impl BillingInterval {
    /// Token that plan ids of this interval carry (`student_monthly`).
    pub fn id_token(self) -> &'static str {
        match self {
            BillingInterval::Month => "monthly",
            BillingInterval::Year => "yearly",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BillingInterval::Month => "month",
            BillingInterval::Year => "year",
        }
    }

    /// Lenient parse used for query strings; anything unknown is the default.
    pub fn from_query(raw: Option<&str>) -> Self {
        raw.and_then(|r| r.parse().ok()).unwrap_or_default()
    }
}

impl fmt::Display for BillingInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BillingInterval {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "month" | "monthly" => Ok(BillingInterval::Month),
            "year" | "yearly" | "annual" => Ok(BillingInterval::Year),
            other => Err(format!("unknown billing interval: {}", other)),
        }
    }
}
