//! Demo session: loads the stores, books one appointment and subscribes to a
//! plan, logging each step.

use std::env;

use chrono::Local;
use config::Config;
use dotenvy::dotenv;

use barbershop_booking::db::{establish_connection_pool, run_migrations};
use barbershop_booking::domain::catalog::{barbers, services};
use barbershop_booking::domain::types::PlanId;
use barbershop_booking::dto::plans::PlanCard;
use barbershop_booking::forms::auth::LoginForm;
use barbershop_booking::models::config::AppConfig;
use barbershop_booking::repository::DieselRepository;
use barbershop_booking::services::ServiceResult;
use barbershop_booking::services::auth::AuthStore;
use barbershop_booking::services::booking::{BookingWizard, RandomAvailability};
use barbershop_booking::services::dashboard::{ScheduleBook, load_dashboard};
use barbershop_booking::services::plans::PlanCatalogStore;
use barbershop_booking::services::subscription::{Checkout, process_payment, subscribe};

fn run_demo(config: &AppConfig, repo: DieselRepository) -> ServiceResult<()> {
    let catalog = PlanCatalogStore::load(repo.clone())?;
    for plan in catalog.active_plans() {
        let card = PlanCard::from(plan);
        log::info!(
            "{}: {} (de {}, economia de {}%)",
            card.name,
            card.price_label,
            card.original_price_label,
            card.savings_percent
        );
    }

    let mut auth = AuthStore::load(repo, config)?;
    if auth.session().is_none() {
        auth.login_client(LoginForm {
            email: "cliente@email.com".to_string(),
            password: "demo".to_string(),
        })?;
    }

    let today = Local::now().date_naive();
    let mut wizard = BookingWizard::new(
        config.business_hours.clone(),
        today,
        RandomAvailability::new(config.slot_availability),
    );

    let barber = barbers().into_iter().next();
    let service = services().into_iter().nth(1);
    let date = wizard
        .date_options()
        .iter()
        .find(|option| option.selectable)
        .map(|option| option.date);
    let time = wizard
        .time_slots()
        .iter()
        .find(|slot| slot.available)
        .map(|slot| slot.time);

    let (Some(barber), Some(service), Some(date), Some(time)) = (barber, service, date, time) else {
        log::warn!("Nothing left to book in the current window");
        return Ok(());
    };

    let transitions = [
        ("select barber", wizard.select_barber(barber.id)),
        ("leave barber step", wizard.advance()),
        ("select service", wizard.select_service(service.id)),
        ("leave service step", wizard.advance()),
        ("select date", wizard.select_date(date)),
        ("leave date step", wizard.advance()),
        ("select time", wizard.select_time(time)),
    ];
    for (transition, accepted) in transitions {
        if !accepted {
            log::warn!("Wizard refused to {transition} at step {:?}", wizard.step());
        }
    }

    match wizard.confirm() {
        Ok(summary) => {
            let receipt = process_payment(&Checkout::for_booking(&summary));
            log::info!("{}", receipt.message);
        }
        Err(err) => log::warn!("Booking not confirmed: {err}"),
    }

    let premium = PlanId::new("premium")?;
    match subscribe(&mut auth, &catalog, &premium) {
        Ok(checkout) => {
            let receipt = process_payment(&checkout);
            log::info!("{}", receipt.message);
        }
        Err(err) => log::warn!("Subscription skipped: {err}"),
    }

    let schedule = ScheduleBook::demo(today);
    let dashboard = load_dashboard(auth.session(), &schedule, catalog.plans())?;
    match serde_json::to_string_pretty(&dashboard) {
        Ok(json) => log::info!("Dashboard:\n{json}"),
        Err(err) => log::error!("Failed to render dashboard: {err}"),
    }

    Ok(())
}

fn main() {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    // Select config profile (defaults to `local`).
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    let settings = Config::builder()
        // Add `./config/default.yaml`
        .add_source(config::File::with_name("config/default").required(false))
        // Add environment-specific overrides
        .add_source(config::File::with_name(&format!("config/{}", app_env)).required(false))
        // Add settings from the environment (with a prefix of APP)
        .add_source(config::Environment::with_prefix("APP"))
        .build();

    let settings = match settings {
        Ok(settings) => settings,
        Err(err) => {
            log::error!("Error loading settings: {}", err);
            std::process::exit(1);
        }
    };

    let app_config = match settings.try_deserialize::<AppConfig>() {
        Ok(app_config) => app_config,
        Err(err) => {
            log::error!("Error loading app config: {}", err);
            std::process::exit(1);
        }
    };

    let pool = match establish_connection_pool(&app_config.database_url) {
        Ok(pool) => pool,
        Err(err) => {
            log::error!("Failed to establish database connection: {}", err);
            std::process::exit(1);
        }
    };

    if let Err(err) = run_migrations(&pool) {
        log::error!("{}", err);
        std::process::exit(1);
    }

    if let Err(err) = run_demo(&app_config, DieselRepository::new(pool)) {
        log::error!("Demo session failed: {}", err);
        std::process::exit(1);
    }
}
