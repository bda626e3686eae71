//! Four-step appointment wizard: barber, service, date, then time.
//!
//! Transitions never fail loudly. A refused selection or navigation returns
//! `false` and leaves the wizard unchanged so the caller can re-render the
//! current state.

use std::collections::HashSet;

use chrono::{Datelike, Days, NaiveDate};
use log::{debug, info};
use rand::Rng;

use crate::domain::booking::{
    BookingError, BookingSelection, BookingSummary, DateOption, TimeSlot, WizardStep,
};
use crate::domain::catalog::{find_barber, find_service};
use crate::domain::types::{BarberId, ServiceId, SlotTime};
use crate::models::config::BusinessHours;

/// Decides whether a generated slot is offered as free.
pub trait AvailabilityProvider {
    fn is_available(&self, time: SlotTime) -> bool;
}

/// Marks each slot available independently with a fixed probability.
#[derive(Clone, Debug)]
pub struct RandomAvailability {
    probability: f64,
}

impl RandomAvailability {
    /// `probability` is clamped to `0.0..=1.0`; NaN counts as never available.
    pub fn new(probability: f64) -> Self {
        let probability = if probability.is_nan() {
            0.0
        } else {
            probability.clamp(0.0, 1.0)
        };
        Self { probability }
    }
}

impl AvailabilityProvider for RandomAvailability {
    fn is_available(&self, _time: SlotTime) -> bool {
        rand::rng().random_bool(self.probability)
    }
}

/// Deterministic availability: every slot is free except the listed times.
#[derive(Clone, Debug, Default)]
pub struct FixedAvailability {
    unavailable: HashSet<SlotTime>,
}

impl FixedAvailability {
    pub fn all_available() -> Self {
        Self::default()
    }

    pub fn unavailable<I>(times: I) -> Self
    where
        I: IntoIterator<Item = SlotTime>,
    {
        Self {
            unavailable: times.into_iter().collect(),
        }
    }
}

impl AvailabilityProvider for FixedAvailability {
    fn is_available(&self, time: SlotTime) -> bool {
        !self.unavailable.contains(&time)
    }
}

pub struct BookingWizard<A> {
    hours: BusinessHours,
    availability: A,
    step: WizardStep,
    selection: BookingSelection,
    dates: Vec<DateOption>,
    slots: Vec<TimeSlot>,
}

impl<A> BookingWizard<A>
where
    A: AvailabilityProvider,
{
    /// Opens a wizard session. Dates are offered starting at `today`.
    pub fn new(hours: BusinessHours, today: NaiveDate, availability: A) -> Self {
        let dates = date_options(&hours, today);
        let slots = generate_slots(&hours, &availability);
        Self {
            hours,
            availability,
            step: WizardStep::Barber,
            selection: BookingSelection::default(),
            dates,
            slots,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn selection(&self) -> &BookingSelection {
        &self.selection
    }

    pub fn date_options(&self) -> &[DateOption] {
        &self.dates
    }

    pub fn time_slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    /// Whether the field owned by the current step has been filled.
    pub fn can_advance(&self) -> bool {
        self.selection.is_filled(self.step)
    }

    pub fn advance(&mut self) -> bool {
        if !self.can_advance() {
            return false;
        }
        match self.step.next() {
            Some(next) => {
                self.step = next;
                true
            }
            None => false,
        }
    }

    pub fn retreat(&mut self) -> bool {
        match self.step.previous() {
            Some(previous) => {
                self.step = previous;
                true
            }
            None => false,
        }
    }

    /// Accepts only barbers from the shop catalog.
    pub fn select_barber(&mut self, id: BarberId) -> bool {
        if find_barber(&id).is_none() {
            debug!("Rejected unknown barber {id}");
            return false;
        }
        self.selection.barber_id = Some(id);
        true
    }

    /// Accepts only services from the shop catalog.
    pub fn select_service(&mut self, id: ServiceId) -> bool {
        if find_service(&id).is_none() {
            debug!("Rejected unknown service {id}");
            return false;
        }
        self.selection.service_id = Some(id);
        true
    }

    /// Rejects closed weekdays and dates outside the offered window.
    pub fn select_date(&mut self, date: NaiveDate) -> bool {
        let offered = self
            .dates
            .iter()
            .any(|option| option.date == date && option.selectable);
        if !offered {
            debug!("Rejected date {date}");
            return false;
        }
        self.selection.date = Some(date);
        true
    }

    /// Rejects times that are not an available generated slot.
    pub fn select_time(&mut self, time: SlotTime) -> bool {
        let available = self
            .slots
            .iter()
            .any(|slot| slot.time == time && slot.available);
        if !available {
            debug!("Rejected time {time}");
            return false;
        }
        self.selection.time = Some(time);
        true
    }

    /// Resolves the selection into a summary and starts a fresh session.
    ///
    /// On error the wizard is left exactly as it was.
    pub fn confirm(&mut self) -> Result<BookingSummary, BookingError> {
        if !self.step.is_last() {
            return Err(BookingError::NotOnLastStep);
        }
        if !self.selection.is_complete() {
            return Err(BookingError::Incomplete);
        }
        let summary = self.summarize()?;

        info!(
            "Booking confirmed: {} with {} on {} at {} ({})",
            summary.service_name, summary.barber_name, summary.date, summary.time, summary.price
        );

        self.reset();
        Ok(summary)
    }

    fn summarize(&self) -> Result<BookingSummary, BookingError> {
        let selection = &self.selection;
        let barber_id = selection.barber_id.as_ref().ok_or(BookingError::Incomplete)?;
        let service_id = selection.service_id.as_ref().ok_or(BookingError::Incomplete)?;
        let barber =
            find_barber(barber_id).ok_or_else(|| BookingError::UnknownBarber(barber_id.clone()))?;
        let service = find_service(service_id)
            .ok_or_else(|| BookingError::UnknownService(service_id.clone()))?;

        Ok(BookingSummary {
            barber_name: barber.name,
            service_name: service.name,
            date: selection.date.ok_or(BookingError::Incomplete)?,
            time: selection.time.ok_or(BookingError::Incomplete)?,
            price: service.price,
        })
    }

    /// Discards the selection and regenerates slot availability.
    pub fn reset(&mut self) {
        self.step = WizardStep::Barber;
        self.selection = BookingSelection::default();
        self.slots = generate_slots(&self.hours, &self.availability);
    }
}

fn date_options(hours: &BusinessHours, today: NaiveDate) -> Vec<DateOption> {
    (0..u64::from(hours.booking_window_days))
        .filter_map(|offset| today.checked_add_days(Days::new(offset)))
        .map(|date| DateOption {
            date,
            selectable: !hours.is_closed_on(date.weekday()),
        })
        .collect()
}

fn generate_slots<A: AvailabilityProvider>(hours: &BusinessHours, availability: &A) -> Vec<TimeSlot> {
    if hours.slot_minutes == 0 {
        return Vec::new();
    }
    let open = hours.open_hour.min(24) * 60;
    let close = hours.close_hour.min(24) * 60;

    (open..close)
        .step_by(hours.slot_minutes as usize)
        .filter_map(|minute| SlotTime::from_hm(minute / 60, minute % 60).ok())
        .map(|time| TimeSlot {
            time,
            available: availability.is_available(time),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::Money;

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 17).unwrap()
    }

    fn at(hour: u32, minute: u32) -> SlotTime {
        SlotTime::from_hm(hour, minute).unwrap()
    }

    fn wizard() -> BookingWizard<FixedAvailability> {
        BookingWizard::new(
            BusinessHours::default(),
            monday(),
            FixedAvailability::unavailable([at(10, 0), at(14, 30)]),
        )
    }

    #[test]
    fn slots_cover_business_hours_in_half_hours() {
        let wizard = wizard();
        let slots = wizard.time_slots();

        assert_eq!(slots.len(), 20);
        assert_eq!(slots[0].time.to_string(), "08:00");
        assert_eq!(slots[19].time.to_string(), "17:30");
        assert_eq!(slots.iter().filter(|s| !s.available).count(), 2);
    }

    #[test]
    fn out_of_range_hours_are_clamped_to_the_day() {
        let late_open = BookingWizard::new(
            BusinessHours {
                open_hour: 80_000_000,
                ..BusinessHours::default()
            },
            monday(),
            FixedAvailability::all_available(),
        );
        assert!(late_open.time_slots().is_empty());

        let late_close = BookingWizard::new(
            BusinessHours {
                close_hour: u32::MAX,
                ..BusinessHours::default()
            },
            monday(),
            FixedAvailability::all_available(),
        );
        let slots = late_close.time_slots();
        assert_eq!(slots.len(), 32);
        assert_eq!(slots[31].time.to_string(), "23:30");
    }

    #[test]
    fn dates_span_two_weeks_with_weekends_unselectable() {
        let wizard = wizard();
        let dates = wizard.date_options();

        assert_eq!(dates.len(), 14);
        assert_eq!(dates[0].date, monday());
        assert!(dates[0].selectable);
        // 2024-06-22 and 2024-06-23 are Saturday and Sunday.
        assert!(!dates[5].selectable);
        assert!(!dates[6].selectable);
        assert_eq!(dates.iter().filter(|d| d.selectable).count(), 10);
    }

    #[test]
    fn advance_requires_current_field() {
        let mut wizard = wizard();

        assert!(!wizard.advance());
        assert_eq!(wizard.step(), WizardStep::Barber);

        assert!(wizard.select_barber(BarberId::new("1").unwrap()));
        assert!(wizard.advance());
        assert_eq!(wizard.step(), WizardStep::Service);

        assert!(!wizard.advance());
        assert!(wizard.select_service(ServiceId::new("2").unwrap()));
        assert!(wizard.advance());

        assert!(!wizard.advance());
        assert!(wizard.select_date(monday()));
        assert!(wizard.advance());
        assert_eq!(wizard.step(), WizardStep::Time);

        assert!(wizard.select_time(at(9, 0)));
        assert!(!wizard.advance());
        assert_eq!(wizard.step(), WizardStep::Time);
    }

    #[test]
    fn retreat_stops_at_first_step() {
        let mut wizard = wizard();
        assert!(!wizard.retreat());

        wizard.select_barber(BarberId::new("2").unwrap());
        wizard.advance();
        assert!(wizard.retreat());
        assert_eq!(wizard.step(), WizardStep::Barber);
        assert_eq!(
            wizard.selection().barber_id,
            Some(BarberId::new("2").unwrap())
        );
    }

    #[test]
    fn weekend_dates_are_rejected() {
        let mut wizard = wizard();
        let saturday = NaiveDate::from_ymd_opt(2024, 6, 22).unwrap();
        let sunday = NaiveDate::from_ymd_opt(2024, 6, 23).unwrap();

        assert!(!wizard.select_date(saturday));
        assert!(!wizard.select_date(sunday));
        assert_eq!(wizard.selection().date, None);

        assert!(wizard.select_date(monday()));
        assert!(!wizard.select_date(saturday));
        assert_eq!(wizard.selection().date, Some(monday()));
    }

    #[test]
    fn dates_outside_window_are_rejected() {
        let mut wizard = wizard();
        let yesterday = NaiveDate::from_ymd_opt(2024, 6, 16).unwrap();
        let too_far = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();

        assert!(!wizard.select_date(yesterday));
        assert!(!wizard.select_date(too_far));
    }

    #[test]
    fn unavailable_slots_are_rejected() {
        let mut wizard = wizard();

        assert!(!wizard.select_time(at(10, 0)));
        assert_eq!(wizard.selection().time, None);

        assert!(wizard.select_time(at(10, 30)));
        assert_eq!(wizard.selection().time, Some(at(10, 30)));

        assert!(!wizard.select_time(at(14, 30)));
        assert!(!wizard.select_time(at(18, 0)));
        assert_eq!(wizard.selection().time, Some(at(10, 30)));
    }

    #[test]
    fn unknown_catalog_ids_are_rejected() {
        let mut wizard = wizard();
        assert!(!wizard.select_barber(BarberId::new("99").unwrap()));
        assert!(!wizard.select_service(ServiceId::new("99").unwrap()));
        assert_eq!(wizard.selection(), &BookingSelection::default());
    }

    #[test]
    fn confirm_before_last_step_keeps_state() {
        let mut wizard = wizard();
        wizard.select_barber(BarberId::new("1").unwrap());
        wizard.select_service(ServiceId::new("1").unwrap());
        wizard.select_date(monday());
        wizard.select_time(at(9, 0));
        let before = wizard.selection().clone();

        assert_eq!(wizard.confirm(), Err(BookingError::NotOnLastStep));
        assert_eq!(wizard.selection(), &before);
    }

    #[test]
    fn confirm_without_time_is_incomplete() {
        let mut wizard = wizard();
        wizard.select_barber(BarberId::new("1").unwrap());
        wizard.advance();
        wizard.select_service(ServiceId::new("1").unwrap());
        wizard.advance();
        wizard.select_date(monday());
        wizard.advance();
        assert_eq!(wizard.step(), WizardStep::Time);
        let before = wizard.selection().clone();

        assert_eq!(wizard.confirm(), Err(BookingError::Incomplete));
        assert_eq!(wizard.step(), WizardStep::Time);
        assert_eq!(wizard.selection(), &before);
    }

    #[test]
    fn confirm_resolves_catalog_and_resets() {
        let mut wizard = wizard();
        wizard.select_barber(BarberId::new("1").unwrap());
        wizard.advance();
        wizard.select_service(ServiceId::new("2").unwrap());
        wizard.advance();
        wizard.select_date(monday());
        wizard.advance();
        wizard.select_time(at(9, 0));

        let summary = wizard.confirm().unwrap();

        assert_eq!(summary.barber_name, "Julin");
        assert_eq!(summary.service_name, "Corte + Barba");
        assert_eq!(summary.date, monday());
        assert_eq!(summary.time, at(9, 0));
        assert_eq!(summary.price, Money::from_cents(4000));

        assert_eq!(wizard.step(), WizardStep::Barber);
        assert_eq!(wizard.selection(), &BookingSelection::default());
    }

    #[test]
    fn random_availability_respects_extremes() {
        let always = RandomAvailability::new(1.0);
        let never = RandomAvailability::new(0.0);
        let nan = RandomAvailability::new(f64::NAN);

        assert!(always.is_available(at(8, 0)));
        assert!(!never.is_available(at(8, 0)));
        assert!(!nan.is_available(at(8, 0)));

        let wizard = BookingWizard::new(BusinessHours::default(), monday(), always);
        assert!(wizard.time_slots().iter().all(|s| s.available));
    }
}
