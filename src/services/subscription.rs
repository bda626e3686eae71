//! Plan subscription and the simulated payment step that follows it.
//!
//! There is no gateway: processing a checkout always succeeds immediately.

use chrono::{NaiveDateTime, Utc};
use log::info;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::booking::BookingSummary;
use crate::domain::types::{Money, PlanId};
use crate::domain::user::Session;
use crate::repository::{SnapshotReader, SnapshotWriter};
use crate::services::auth::AuthStore;
use crate::services::plans::PlanCatalogStore;
use crate::services::{ServiceError, ServiceResult};

/// What the client is about to pay for.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Checkout {
    pub description: String,
    pub amount: Money,
    pub is_subscription: bool,
}

impl Checkout {
    /// Single payment for a confirmed booking.
    pub fn for_booking(summary: &BookingSummary) -> Self {
        Self {
            description: format!("{} com {}", summary.service_name, summary.barber_name),
            amount: summary.price,
            is_subscription: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReceipt {
    pub id: Uuid,
    pub description: String,
    pub amount: Money,
    pub paid_at: NaiveDateTime,
    pub message: &'static str,
}

/// Subscribes the signed-in client to an active plan and returns the
/// checkout for its first monthly payment.
pub fn subscribe<A, P>(
    auth: &mut AuthStore<A>,
    catalog: &PlanCatalogStore<P>,
    plan_id: &PlanId,
) -> ServiceResult<Checkout>
where
    A: SnapshotReader + SnapshotWriter,
    P: SnapshotReader + SnapshotWriter,
{
    if !matches!(auth.session(), Some(Session::Client { .. })) {
        return Err(ServiceError::Unauthorized);
    }

    let plan = catalog
        .get(plan_id)
        .filter(|plan| plan.active)
        .ok_or(ServiceError::NotFound)?;

    auth.set_has_monthly_plan(true)?;
    info!("Client subscribed to {}", plan.name);

    Ok(Checkout {
        description: plan.name.clone(),
        amount: plan.price,
        is_subscription: true,
    })
}

/// Settles a checkout. Always succeeds.
pub fn process_payment(checkout: &Checkout) -> PaymentReceipt {
    let message = if checkout.is_subscription {
        "Seu plano foi ativado com sucesso. Agora você pode agendar seus cortes."
    } else {
        "Pagamento confirmado. Obrigado pela preferência!"
    };

    let receipt = PaymentReceipt {
        id: Uuid::new_v4(),
        description: checkout.description.clone(),
        amount: checkout.amount,
        paid_at: Utc::now().naive_utc(),
        message,
    };
    info!("Payment {} processed: {}", receipt.id, receipt.amount);
    receipt
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::types::SlotTime;
    use crate::forms::auth::LoginForm;
    use crate::models::config::AppConfig;
    use crate::repository::InMemoryRepository;

    fn signed_in_client(repo: &InMemoryRepository) -> AuthStore<InMemoryRepository> {
        let mut auth = AuthStore::load(repo.clone(), &AppConfig::default()).unwrap();
        auth.login_client(LoginForm {
            email: "cliente@email.com".to_string(),
            password: "x".to_string(),
        })
        .unwrap();
        auth
    }

    #[test]
    fn subscribing_marks_monthly_plan() {
        let repo = InMemoryRepository::new();
        let mut auth = signed_in_client(&repo);
        let catalog = PlanCatalogStore::load(repo.clone()).unwrap();

        let checkout = subscribe(&mut auth, &catalog, &PlanId::new("premium").unwrap()).unwrap();

        assert!(checkout.is_subscription);
        assert_eq!(checkout.description, "Plano Premium");
        assert_eq!(checkout.amount, Money::from_cents(14000));
        assert!(auth.session().unwrap().has_monthly_plan());
    }

    #[test]
    fn inactive_or_unknown_plans_are_not_offered() {
        let repo = InMemoryRepository::new();
        let mut auth = signed_in_client(&repo);
        let mut catalog = PlanCatalogStore::load(repo.clone()).unwrap();
        let vip = PlanId::new("vip").unwrap();
        catalog.toggle_active(&vip).unwrap();

        assert!(matches!(
            subscribe(&mut auth, &catalog, &vip),
            Err(ServiceError::NotFound)
        ));
        assert!(matches!(
            subscribe(&mut auth, &catalog, &PlanId::new("gold").unwrap()),
            Err(ServiceError::NotFound)
        ));
        assert!(!auth.session().unwrap().has_monthly_plan());
    }

    #[test]
    fn signed_out_users_cannot_subscribe() {
        let repo = InMemoryRepository::new();
        let mut auth = AuthStore::load(repo.clone(), &AppConfig::default()).unwrap();
        let catalog = PlanCatalogStore::load(repo).unwrap();

        assert!(matches!(
            subscribe(&mut auth, &catalog, &PlanId::new("basic").unwrap()),
            Err(ServiceError::Unauthorized)
        ));
    }

    #[test]
    fn payment_always_succeeds() {
        let summary = BookingSummary {
            barber_name: "Julin".to_string(),
            service_name: "Corte + Barba".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 6, 17).unwrap(),
            time: SlotTime::from_hm(9, 0).unwrap(),
            price: Money::from_cents(4000),
        };
        let checkout = Checkout::for_booking(&summary);

        let receipt = process_payment(&checkout);

        assert_eq!(receipt.amount, Money::from_cents(4000));
        assert_eq!(receipt.description, "Corte + Barba com Julin");
        assert!(receipt.message.starts_with("Pagamento confirmado"));
    }
}
