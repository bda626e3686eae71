use barbershop_booking::PLANS_SNAPSHOT_KEY;
use barbershop_booking::domain::plan::{NewPlan, ServiceType, UpdatePlan};
use barbershop_booking::domain::types::{Money, PlanId};
use barbershop_booking::forms::plans::PlanForm;
use barbershop_booking::repository::{DieselRepository, SnapshotReader};
use barbershop_booking::services::plans::PlanCatalogStore;

mod common;

fn test_plan() -> NewPlan {
    NewPlan::try_from(PlanForm {
        name: "Plano Teste".to_string(),
        price: 50.0,
        original_price: 100.0,
        description: "Plano de teste".to_string(),
        features: "2 cortes\nBarba".to_string(),
        services_count: Some(2),
        service_type: ServiceType::CutsAndBeard,
        popular: false,
        active: true,
    })
    .unwrap()
}

fn ids(plans: &[barbershop_booking::domain::plan::Plan]) -> Vec<PlanId> {
    plans.iter().map(|plan| plan.id.clone()).collect()
}

#[test]
fn test_seed_catalog_pricing() {
    let test_db = common::TestDb::new("test_seed_catalog_pricing.db");
    let store = PlanCatalogStore::load(DieselRepository::new(test_db.pool())).unwrap();

    let basic = store
        .plans()
        .iter()
        .find(|plan| plan.name == "Plano Básico")
        .unwrap();
    assert_eq!(basic.price, Money::from_cents(8000));
    assert_eq!(basic.original_price, Money::from_cents(10000));
    assert_eq!(basic.savings(), Money::from_cents(2000));
    assert_eq!(basic.savings_percent(), 20);
}

#[test]
fn test_add_then_remove_restores_catalog() {
    let test_db = common::TestDb::new("test_add_then_remove_restores_catalog.db");
    let repo = DieselRepository::new(test_db.pool());
    let mut store = PlanCatalogStore::load(repo.clone()).unwrap();
    let before = ids(store.plans());

    let plan = store.add(test_plan()).unwrap();
    assert_eq!(plan.features, vec!["2 cortes", "Barba"]);
    assert!(store.remove(&plan.id).unwrap());

    assert_eq!(ids(store.plans()), before);
    let reloaded = PlanCatalogStore::load(repo).unwrap();
    assert_eq!(ids(reloaded.plans()), before);
}

#[test]
fn test_mutations_survive_reload() {
    let test_db = common::TestDb::new("test_mutations_survive_reload.db");
    let repo = DieselRepository::new(test_db.pool());
    let mut store = PlanCatalogStore::load(repo.clone()).unwrap();

    let added = store.add(test_plan()).unwrap();
    let premium = PlanId::new("premium").unwrap();
    store
        .update(
            &premium,
            UpdatePlan {
                price: Some(Money::from_cents(13000)),
                ..Default::default()
            },
        )
        .unwrap();
    store.toggle_active(&added.id).unwrap();

    let reloaded = PlanCatalogStore::load(repo).unwrap();
    assert_eq!(reloaded.plans(), store.plans());
    assert_eq!(
        reloaded.get(&premium).unwrap().price,
        Money::from_cents(13000)
    );
    assert!(!reloaded.get(&added.id).unwrap().active);
}

#[test]
fn test_unknown_id_leaves_snapshot_untouched() {
    let test_db = common::TestDb::new("test_unknown_id_leaves_snapshot_untouched.db");
    let repo = DieselRepository::new(test_db.pool());
    let mut store = PlanCatalogStore::load(repo.clone()).unwrap();
    store.add(test_plan()).unwrap();
    let before = repo.load_snapshot(PLANS_SNAPSHOT_KEY).unwrap();

    let missing = PlanId::new("nonexistent").unwrap();
    assert!(
        !store
            .update(
                &missing,
                UpdatePlan {
                    name: Some("X".to_string()),
                    ..Default::default()
                }
            )
            .unwrap()
    );
    assert!(!store.toggle_active(&missing).unwrap());
    assert!(!store.remove(&missing).unwrap());

    assert_eq!(repo.load_snapshot(PLANS_SNAPSHOT_KEY).unwrap(), before);
}

#[test]
fn test_snapshot_layout_uses_front_end_field_names() {
    let test_db = common::TestDb::new("test_snapshot_layout_uses_front_end_field_names.db");
    let repo = DieselRepository::new(test_db.pool());
    let mut store = PlanCatalogStore::load(repo.clone()).unwrap();
    store.toggle_active(&PlanId::new("basic").unwrap()).unwrap();

    let raw = repo.load_snapshot(PLANS_SNAPSHOT_KEY).unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let first = &json[0];

    assert_eq!(first["id"], "basic");
    assert_eq!(first["price"], 80.0);
    assert_eq!(first["originalPrice"], 100.0);
    assert_eq!(first["servicesCount"], 4);
    assert_eq!(first["serviceType"], "cortes");
    assert_eq!(first["active"], false);
}
