//! Subscription plan records and their derived pricing.

use serde::{Deserialize, Serialize};

use crate::domain::types::{Money, PlanId};

/// Kind of service a plan covers.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum ServiceType {
    #[default]
    #[serde(rename = "cortes")]
    CutsOnly,
    #[serde(rename = "cortes-barba")]
    CutsAndBeard,
    #[serde(rename = "completo")]
    FullService,
}

impl ServiceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::CutsOnly => "cortes",
            ServiceType::CutsAndBeard => "cortes-barba",
            ServiceType::FullService => "completo",
        }
    }
}

/// Persisted subscription plan.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub id: PlanId,
    pub name: String,
    pub price: Money,
    pub original_price: Money,
    pub description: String,
    pub features: Vec<String>,
    pub popular: bool,
    pub active: bool,
    pub services_count: u32,
    pub service_type: ServiceType,
}

impl Plan {
    /// Builds the stored record from a plan payload and a freshly issued id.
    pub fn from_new(id: PlanId, new_plan: NewPlan) -> Self {
        Self {
            id,
            name: new_plan.name,
            price: new_plan.price,
            original_price: new_plan.original_price,
            description: new_plan.description,
            features: new_plan.features,
            popular: new_plan.popular,
            active: new_plan.active,
            services_count: new_plan.services_count,
            service_type: new_plan.service_type,
        }
    }

    /// Amount saved against the original price.
    pub fn savings(&self) -> Money {
        self.original_price - self.price
    }

    /// Savings as a whole percentage of the original price.
    ///
    /// Halves round towards positive infinity; a zero original price yields 0.
    pub fn savings_percent(&self) -> i64 {
        if self.original_price.cents() == 0 {
            return 0;
        }
        let ratio = self.savings().cents() as f64 / self.original_price.cents() as f64;
        (ratio * 100.0 + 0.5).floor() as i64
    }

    /// Merges every field present in `updates` into the record.
    pub fn apply(&mut self, updates: UpdatePlan) {
        if let Some(name) = updates.name {
            self.name = name;
        }
        if let Some(price) = updates.price {
            self.price = price;
        }
        if let Some(original_price) = updates.original_price {
            self.original_price = original_price;
        }
        if let Some(description) = updates.description {
            self.description = description;
        }
        if let Some(features) = updates.features {
            self.features = features;
        }
        if let Some(popular) = updates.popular {
            self.popular = popular;
        }
        if let Some(active) = updates.active {
            self.active = active;
        }
        if let Some(services_count) = updates.services_count {
            self.services_count = services_count;
        }
        if let Some(service_type) = updates.service_type {
            self.service_type = service_type;
        }
    }
}

/// Plan payload without an identifier; the catalog issues one on insert.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct NewPlan {
    pub name: String,
    pub price: Money,
    pub original_price: Money,
    pub description: String,
    pub features: Vec<String>,
    pub popular: bool,
    pub active: bool,
    pub services_count: u32,
    pub service_type: ServiceType,
}

/// Partial set of plan fields; `None` leaves the stored value untouched.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct UpdatePlan {
    pub name: Option<String>,
    pub price: Option<Money>,
    pub original_price: Option<Money>,
    pub description: Option<String>,
    pub features: Option<Vec<String>>,
    pub popular: Option<bool>,
    pub active: Option<bool>,
    pub services_count: Option<u32>,
    pub service_type: Option<ServiceType>,
}

impl From<NewPlan> for UpdatePlan {
    fn from(plan: NewPlan) -> Self {
        Self {
            name: Some(plan.name),
            price: Some(plan.price),
            original_price: Some(plan.original_price),
            description: Some(plan.description),
            features: Some(plan.features),
            popular: Some(plan.popular),
            active: Some(plan.active),
            services_count: Some(plan.services_count),
            service_type: Some(plan.service_type),
        }
    }
}

fn seed_plan(
    id: &str,
    name: &str,
    price: i64,
    original_price: i64,
    description: &str,
    features: &[&str],
    popular: bool,
    services_count: u32,
    service_type: ServiceType,
) -> Plan {
    Plan {
        id: PlanId::from_trusted(id),
        name: name.to_string(),
        price: Money::from_cents(price * 100),
        original_price: Money::from_cents(original_price * 100),
        description: description.to_string(),
        features: features.iter().map(|f| f.to_string()).collect(),
        popular,
        active: true,
        services_count,
        service_type,
    }
}

/// Plans the catalog starts with when nothing has been persisted yet.
pub fn default_plans() -> Vec<Plan> {
    vec![
        seed_plan(
            "basic",
            "Plano Básico",
            80,
            100,
            "4 cortes por mês",
            &[
                "4 cortes tradicionais por mês",
                "Horário fixo semanal",
                "Desconto de 20%",
                "Prioridade no agendamento",
            ],
            false,
            4,
            ServiceType::CutsOnly,
        ),
        seed_plan(
            "premium",
            "Plano Premium",
            140,
            180,
            "4 cortes + barba por mês",
            &[
                "4 cortes + barba por mês",
                "Horário fixo semanal",
                "Desconto de 22%",
                "Prioridade no agendamento",
                "Produtos premium inclusos",
            ],
            true,
            4,
            ServiceType::CutsAndBeard,
        ),
        seed_plan(
            "vip",
            "Plano VIP",
            200,
            260,
            "6 serviços premium por mês",
            &[
                "6 serviços completos por mês",
                "Horário fixo semanal",
                "Desconto de 25%",
                "Prioridade máxima",
                "Produtos premium inclusos",
                "Atendimento personalizado",
            ],
            false,
            6,
            ServiceType::FullService,
        ),
        seed_plan(
            "student",
            "Plano Estudante",
            60,
            80,
            "3 cortes por mês",
            &[
                "3 cortes tradicionais por mês",
                "Desconto estudantil de 25%",
                "Horário flexível",
                "Válido com carteirinha",
            ],
            false,
            3,
            ServiceType::CutsOnly,
        ),
        seed_plan(
            "family",
            "Plano Família",
            300,
            400,
            "8 cortes para família",
            &[
                "8 cortes por mês para família",
                "Compartilhar entre membros",
                "Desconto de 25%",
                "Agendamento prioritário",
                "Válido para até 4 pessoas",
            ],
            false,
            8,
            ServiceType::CutsOnly,
        ),
    ]
}
