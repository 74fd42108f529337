//! Subscription plans.

use serde::{Deserialize, Serialize};

/// Prefix marking a feature the plan does *not* include.
pub const UNAVAILABLE_FEATURE_MARKER: char = '-';

/// A subscription tier. Read-only from the client's perspective.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(alias = "planName", default)]
    pub name: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub discount_price: Option<f64>,
    #[serde(default)]
    pub discount_percentage: Option<f64>,
    #[serde(default)]
    pub is_active: bool,
}

fn default_currency() -> String {
    "USD".to_string()
}

/// One line of a plan's feature list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanFeature {
    pub label: String,
    pub available: bool,
}

impl PlanFeature {
    /// Parse a raw feature string, stripping the unavailability marker.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.strip_prefix(UNAVAILABLE_FEATURE_MARKER) {
            Some(rest) => Self {
                label: rest.trim().to_string(),
                available: false,
            },
            None => Self {
                label: trimmed.to_string(),
                available: true,
            },
        }
    }
}

impl Plan {
    pub fn is_free(&self) -> bool {
        self.price <= 0.0
    }

    /// Price the reader actually pays.
    pub fn effective_price(&self) -> f64 {
        self.discount_price.unwrap_or(self.price)
    }

    pub fn feature_list(&self) -> Vec<PlanFeature> {
        self.features
            .iter()
            .filter(|f| !f.trim().is_empty())
            .map(|f| PlanFeature::parse(f))
            .collect()
    }

    /// e.g. "USD 4.99 / month"
    pub fn price_label(&self) -> String {
        if self.is_free() {
            return "Free".to_string();
        }
        let mut label = format!("{} {:.2}", self.currency, self.effective_price());
        if !self.duration.is_empty() {
            label.push_str(" / ");
            label.push_str(&self.duration);
        }
        label
    }
}
