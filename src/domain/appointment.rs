use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::types::{AppointmentId, Money, SlotTime};

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Confirmed,
    Completed,
    NoShow,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::NoShow => "no_show",
        }
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Appointment {
    pub id: AppointmentId,
    pub date: NaiveDate,
    pub time: SlotTime,
    pub client_name: String,
    pub client_phone: Option<String>,
    pub barber_name: String,
    pub service_name: String,
    pub price: Money,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
}
