//! Display-ready plan cards.

use serde::Serialize;

use crate::domain::plan::{Plan, ServiceType};
use crate::domain::types::{Money, PlanId};

/// Icon drawn on a plan card.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PlanIcon {
    Crown,
    Star,
    Student,
    Family,
    Default,
}

impl PlanIcon {
    /// First matching rule wins: full service, popular, then name hints.
    pub fn for_plan(plan: &Plan) -> Self {
        let name = plan.name.to_lowercase();
        if plan.service_type == ServiceType::FullService {
            PlanIcon::Crown
        } else if plan.popular {
            PlanIcon::Star
        } else if name.contains("estudante") {
            PlanIcon::Student
        } else if name.contains("família") {
            PlanIcon::Family
        } else {
            PlanIcon::Default
        }
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlanCard {
    pub id: PlanId,
    pub name: String,
    pub description: String,
    pub features: Vec<String>,
    pub price: Money,
    pub original_price: Money,
    pub savings: Money,
    pub savings_percent: i64,
    /// Formatted price, e.g. `R$ 80,00`.
    pub price_label: String,
    pub original_price_label: String,
    pub services_count: u32,
    pub popular: bool,
    pub active: bool,
    pub icon: PlanIcon,
}

impl From<&Plan> for PlanCard {
    fn from(plan: &Plan) -> Self {
        Self {
            id: plan.id.clone(),
            name: plan.name.clone(),
            description: plan.description.clone(),
            features: plan.features.clone(),
            price: plan.price,
            original_price: plan.original_price,
            savings: plan.savings(),
            savings_percent: plan.savings_percent(),
            price_label: plan.price.to_string(),
            original_price_label: plan.original_price.to_string(),
            services_count: plan.services_count,
            popular: plan.popular,
            active: plan.active,
            icon: PlanIcon::for_plan(plan),
        }
    }
}
