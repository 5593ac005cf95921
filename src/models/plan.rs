use super::BillingInterval;

/// A pricing tier. Plans are authored as literals in `catalog` and never
/// change at runtime.
#[derive(Clone, Debug, PartialEq)]
pub struct Plan {
    pub id: &'static str,
    pub name: &'static str,
    pub price_cents: u32,
    pub interval: Option<BillingInterval>,
    pub features: &'static [&'static str],
    pub popular: bool,
    pub savings: Option<&'static str>,
    pub cta: &'static str,
}

impl Plan {
    pub fn is_free(&self) -> bool {
        self.price_cents == 0
    }

    /// Price in dollars, as the public pricing JSON reports it.
    pub fn price(&self) -> f64 {
        f64::from(self.price_cents) / 100.0
    }

    pub fn price_label(&self) -> String {
        if self.price_cents % 100 == 0 {
            format!("${}", self.price_cents / 100)
        } else {
            format!("${}.{:02}", self.price_cents / 100, self.price_cents % 100)
        }
    }

    pub fn interval_label(&self) -> &'static str {
        match self.interval {
            Some(BillingInterval::Month) => "/month",
            Some(BillingInterval::Year) => "/year",
            None => "",
        }
    }

    pub fn savings_label(&self) -> &'static str {
        self.savings.unwrap_or("")
    }
}
