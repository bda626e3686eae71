//! Configuration model loaded from external sources.

use chrono::Weekday;
use serde::Deserialize;

use crate::domain::user::Role;

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
/// Application settings. Every field has a default so an empty configuration
/// is valid.
pub struct AppConfig {
    pub database_url: String,
    pub business_hours: BusinessHours,
    /// Probability that a generated time slot is offered as available.
    pub slot_availability: f64,
    pub demo_client: DemoClient,
    pub staff_accounts: Vec<StaffAccount>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: "barbershop.db".to_string(),
            business_hours: BusinessHours::default(),
            slot_availability: 0.7,
            demo_client: DemoClient::default(),
            staff_accounts: vec![StaffAccount::default()],
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
/// Opening window used to generate bookable slots and dates.
pub struct BusinessHours {
    pub open_hour: u32,
    /// First hour with no slot; the last slot starts before it.
    pub close_hour: u32,
    pub slot_minutes: u32,
    pub booking_window_days: u32,
    pub closed_weekdays: Vec<Weekday>,
}

impl Default for BusinessHours {
    fn default() -> Self {
        Self {
            open_hour: 8,
            close_hour: 18,
            slot_minutes: 30,
            booking_window_days: 14,
            closed_weekdays: vec![Weekday::Sat, Weekday::Sun],
        }
    }
}

impl BusinessHours {
    pub fn is_closed_on(&self, weekday: Weekday) -> bool {
        self.closed_weekdays.contains(&weekday)
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
/// Profile attached to simulated client logins.
pub struct DemoClient {
    pub name: String,
    pub phone: String,
}

impl Default for DemoClient {
    fn default() -> Self {
        Self {
            name: "Cliente Demo".to_string(),
            phone: "(11) 99999-9999".to_string(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
/// One entry of the staff credential table.
pub struct StaffAccount {
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: Role,
}

impl Default for StaffAccount {
    fn default() -> Self {
        Self {
            email: "julin@barbearia.com".to_string(),
            password: "admin123".to_string(),
            name: "Julin".to_string(),
            role: Role::Admin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let settings = config::Config::builder().build().unwrap();
        let cfg: AppConfig = settings.try_deserialize().unwrap();
        assert_eq!(cfg.business_hours, BusinessHours::default());
        assert_eq!(cfg.staff_accounts.len(), 1);
        assert_eq!(cfg.staff_accounts[0].role, Role::Admin);
        assert!((cfg.slot_availability - 0.7).abs() < f64::EPSILON);
    }

    #[test]
    fn yaml_overrides_nested_fields() {
        let yaml = r#"
business_hours:
  open_hour: 9
  closed_weekdays: ["Sun"]
staff_accounts:
  - email: "marquinho@barbearia.com"
    password: "func123"
    name: "Marquinho"
    role: "employee"
"#;
        let settings = config::Config::builder()
            .add_source(config::File::from_str(yaml, config::FileFormat::Yaml))
            .build()
            .unwrap();
        let cfg: AppConfig = settings.try_deserialize().unwrap();
        assert_eq!(cfg.business_hours.open_hour, 9);
        assert_eq!(cfg.business_hours.close_hour, 18);
        assert!(cfg.business_hours.is_closed_on(Weekday::Sun));
        assert!(!cfg.business_hours.is_closed_on(Weekday::Sat));
        assert_eq!(cfg.staff_accounts[0].role, Role::Employee);
    }
}
