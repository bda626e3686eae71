//! Form backing the plan create/edit dialog.

use serde::Deserialize;
use validator::Validate;

use crate::domain::plan::{NewPlan, ServiceType};
use crate::domain::types::Money;
use crate::forms::FormError;

fn default_active() -> bool {
    true
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Raw plan fields as submitted. Features are entered one per line.
pub struct PlanForm {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[validate(range(min = 0.0))]
    pub original_price: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub features: String,
    /// Missing or zero means a single service.
    #[serde(default)]
    pub services_count: Option<u32>,
    #[serde(default)]
    pub service_type: ServiceType,
    #[serde(default)]
    pub popular: bool,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn parse_features(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| ammonia::clean(line).trim().to_string())
        .filter(|line| !line.is_empty())
        .collect()
}

impl TryFrom<PlanForm> for NewPlan {
    type Error = FormError;

    fn try_from(form: PlanForm) -> Result<Self, Self::Error> {
        form.validate()?;
        if form.original_price < form.price {
            return Err(FormError::PriceAboveOriginal);
        }

        let name = ammonia::clean(form.name.trim()).trim().to_string();
        if name.is_empty() {
            return Err(FormError::InvalidName);
        }
        let price = Money::from_decimal(form.price).map_err(|_| FormError::InvalidPrice)?;
        let original_price =
            Money::from_decimal(form.original_price).map_err(|_| FormError::InvalidPrice)?;

        Ok(NewPlan {
            name,
            price,
            original_price,
            description: ammonia::clean(form.description.trim()),
            features: parse_features(&form.features),
            popular: form.popular,
            active: form.active,
            services_count: form.services_count.filter(|&count| count > 0).unwrap_or(1),
            service_type: form.service_type,
        })
    }
}
