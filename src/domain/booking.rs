//! Values produced and consumed by the booking wizard.

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use crate::domain::types::{BarberId, Money, ServiceId, SlotTime};

/// One of the four ordered wizard steps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum WizardStep {
    Barber,
    Service,
    Date,
    Time,
}

impl WizardStep {
    pub const fn next(self) -> Option<WizardStep> {
        match self {
            WizardStep::Barber => Some(WizardStep::Service),
            WizardStep::Service => Some(WizardStep::Date),
            WizardStep::Date => Some(WizardStep::Time),
            WizardStep::Time => None,
        }
    }

    pub const fn previous(self) -> Option<WizardStep> {
        match self {
            WizardStep::Barber => None,
            WizardStep::Service => Some(WizardStep::Barber),
            WizardStep::Date => Some(WizardStep::Service),
            WizardStep::Time => Some(WizardStep::Date),
        }
    }

    pub const fn is_last(self) -> bool {
        matches!(self, WizardStep::Time)
    }
}

/// Choices made so far in a wizard session.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingSelection {
    pub barber_id: Option<BarberId>,
    pub service_id: Option<ServiceId>,
    pub date: Option<NaiveDate>,
    pub time: Option<SlotTime>,
}

impl BookingSelection {
    /// Whether the field owned by `step` has been filled in.
    pub fn is_filled(&self, step: WizardStep) -> bool {
        match step {
            WizardStep::Barber => self.barber_id.is_some(),
            WizardStep::Service => self.service_id.is_some(),
            WizardStep::Date => self.date.is_some(),
            WizardStep::Time => self.time.is_some(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.barber_id.is_some()
            && self.service_id.is_some()
            && self.date.is_some()
            && self.time.is_some()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TimeSlot {
    pub time: SlotTime,
    pub available: bool,
}

/// A calendar day offered by the wizard. Closed days are listed but not selectable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct DateOption {
    pub date: NaiveDate,
    pub selectable: bool,
}

/// Immutable result of a confirmed wizard session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingSummary {
    pub barber_name: String,
    pub service_name: String,
    pub date: NaiveDate,
    pub time: SlotTime,
    pub price: Money,
}

/// Reasons a confirmation is refused. The wizard state is left untouched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BookingError {
    #[error("booking can only be confirmed on the last step")]
    NotOnLastStep,
    #[error("booking selection is incomplete")]
    Incomplete,
    #[error("unknown barber {0}")]
    UnknownBarber(BarberId),
    #[error("unknown service {0}")]
    UnknownService(ServiceId),
}
