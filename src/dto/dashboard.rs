//! Role dashboards. The variant is picked from the session tag.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::appointment::{Appointment, AppointmentStatus};
use crate::domain::types::Money;
use crate::dto::plans::PlanCard;

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Dashboard {
    Client(ClientDashboard),
    Employee(EmployeeDashboard),
    Admin(AdminDashboard),
}

/// Counts over a list of appointments. Revenue sums completed ones only.
#[derive(Clone, Copy, Debug, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleStats {
    pub total: usize,
    pub confirmed: usize,
    pub completed: usize,
    pub no_shows: usize,
    pub revenue: Money,
}

impl ScheduleStats {
    pub fn from_appointments(appointments: &[Appointment]) -> Self {
        appointments
            .iter()
            .fold(ScheduleStats::default(), |mut stats, appointment| {
                stats.total += 1;
                match appointment.status {
                    AppointmentStatus::Confirmed => stats.confirmed += 1,
                    AppointmentStatus::Completed => {
                        stats.completed += 1;
                        stats.revenue = stats.revenue + appointment.price;
                    }
                    AppointmentStatus::NoShow => stats.no_shows += 1,
                }
                stats
            })
    }
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyPlanStatus {
    pub cuts_remaining: u32,
    pub total_cuts: u32,
    pub renewal_date: NaiveDate,
    pub fixed_time: String,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClientDashboard {
    pub user_name: String,
    pub upcoming: Vec<Appointment>,
    pub history: Vec<Appointment>,
    pub monthly_plan: Option<MonthlyPlanStatus>,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDashboard {
    pub user_name: String,
    pub schedule: Vec<Appointment>,
    pub stats: ScheduleStats,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdminDashboard {
    pub user_name: String,
    pub schedule: Vec<Appointment>,
    pub stats: ScheduleStats,
    pub plans: Vec<PlanCard>,
    pub active_plans: usize,
}
