//! Role dashboards over the shop's demo schedule.

use chrono::{Days, NaiveDate};
use log::{info, warn};

use crate::domain::appointment::{Appointment, AppointmentStatus};
use crate::domain::catalog::find_service_by_name;
use crate::domain::plan::Plan;
use crate::domain::types::{AppointmentId, Money, SlotTime};
use crate::domain::user::{Session, User};
use crate::dto::dashboard::{
    AdminDashboard, ClientDashboard, Dashboard, EmployeeDashboard, MonthlyPlanStatus,
    ScheduleStats,
};
use crate::dto::plans::PlanCard;
use crate::services::{ServiceError, ServiceResult};

struct DemoEntry {
    id: &'static str,
    hour: u32,
    minute: u32,
    client: &'static str,
    phone: &'static str,
    barber: &'static str,
    service: &'static str,
    status: AppointmentStatus,
    notes: &'static str,
}

const TODAY_SCHEDULE: [DemoEntry; 4] = [
    DemoEntry {
        id: "1",
        hour: 9,
        minute: 0,
        client: "João Silva",
        phone: "(11) 99999-9999",
        barber: "Julin",
        service: "Corte + Barba",
        status: AppointmentStatus::Confirmed,
        notes: "Cliente prefere degradê baixo",
    },
    DemoEntry {
        id: "2",
        hour: 10,
        minute: 30,
        client: "Pedro Santos",
        phone: "(11) 88888-8888",
        barber: "Marquinho",
        service: "Corte Tradicional",
        status: AppointmentStatus::Confirmed,
        notes: "",
    },
    DemoEntry {
        id: "3",
        hour: 14,
        minute: 0,
        client: "Carlos Oliveira",
        phone: "(11) 77777-7777",
        barber: "Julin",
        service: "Apenas Barba",
        status: AppointmentStatus::Completed,
        notes: "Barba modelada",
    },
    DemoEntry {
        id: "4",
        hour: 15,
        minute: 30,
        client: "Roberto Lima",
        phone: "(11) 66666-6666",
        barber: "Marquinho",
        service: "Corte + Barba",
        status: AppointmentStatus::Confirmed,
        notes: "",
    },
];

fn build_appointment(
    id: &str,
    date: NaiveDate,
    time: SlotTime,
    client_name: &str,
    client_phone: Option<&str>,
    barber_name: &str,
    service_name: &str,
    status: AppointmentStatus,
    notes: &str,
) -> Appointment {
    Appointment {
        id: AppointmentId::from_trusted(id),
        date,
        time,
        client_name: client_name.to_string(),
        client_phone: client_phone.map(str::to_string),
        barber_name: barber_name.to_string(),
        service_name: service_name.to_string(),
        price: find_service_by_name(service_name)
            .map(|service| service.price)
            .unwrap_or(Money::ZERO),
        status,
        notes: Some(notes.to_string()).filter(|n| !n.is_empty()),
    }
}

/// The shop's appointments for one day, kept in memory.
#[derive(Clone, Debug)]
pub struct ScheduleBook {
    date: NaiveDate,
    appointments: Vec<Appointment>,
}

impl ScheduleBook {
    /// Fixed demo schedule placed on `date`.
    pub fn demo(date: NaiveDate) -> Self {
        let appointments = TODAY_SCHEDULE
            .iter()
            .filter_map(|entry| {
                let time = SlotTime::from_hm(entry.hour, entry.minute).ok()?;
                Some(build_appointment(
                    entry.id,
                    date,
                    time,
                    entry.client,
                    Some(entry.phone),
                    entry.barber,
                    entry.service,
                    entry.status,
                    entry.notes,
                ))
            })
            .collect();
        Self { date, appointments }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    /// Moves a confirmed appointment to `status`. Returns `false` for
    /// unknown ids and appointments that are no longer confirmed.
    fn transition(&mut self, id: &AppointmentId, status: AppointmentStatus) -> bool {
        match self
            .appointments
            .iter_mut()
            .find(|appointment| &appointment.id == id)
        {
            Some(appointment) if appointment.status == AppointmentStatus::Confirmed => {
                appointment.status = status;
                true
            }
            Some(_) => false,
            None => {
                warn!("Ignoring status change for unknown appointment {id}");
                false
            }
        }
    }
}

/// Appointments shown to a signed-in client: two upcoming, two past.
pub fn client_appointments(today: NaiveDate, user: &User) -> (Vec<Appointment>, Vec<Appointment>) {
    let shift = |days: u64, forward: bool| {
        let shifted = if forward {
            today.checked_add_days(Days::new(days))
        } else {
            today.checked_sub_days(Days::new(days))
        };
        shifted.unwrap_or(today)
    };
    let phone = user.phone.as_ref().map(|p| p.as_str());
    let name = user.name.as_str();
    let at = |hour, minute| SlotTime::from_hm(hour, minute).ok();

    let entries = [
        ("1", shift(3, true), at(14, 30), "Julin", "Corte + Barba", AppointmentStatus::Confirmed),
        ("2", shift(8, true), at(15, 0), "Marquinho", "Corte Tradicional", AppointmentStatus::Confirmed),
        ("3", shift(16, false), at(16, 0), "Julin", "Corte + Barba", AppointmentStatus::Completed),
        ("4", shift(23, false), at(14, 0), "Marquinho", "Corte Tradicional", AppointmentStatus::Completed),
    ];

    entries
        .into_iter()
        .filter_map(|(id, date, time, barber, service, status)| {
            Some(build_appointment(
                id, date, time?, name, phone, barber, service, status, "",
            ))
        })
        .partition(|appointment| appointment.date >= today)
}

fn ensure_staff(session: Option<&Session>) -> ServiceResult<()> {
    match session {
        Some(Session::Employee { .. } | Session::Admin { .. }) => Ok(()),
        _ => Err(ServiceError::Unauthorized),
    }
}

/// Marks a confirmed appointment as attended.
pub fn mark_attended(
    session: Option<&Session>,
    schedule: &mut ScheduleBook,
    id: &AppointmentId,
) -> ServiceResult<bool> {
    ensure_staff(session)?;
    let changed = schedule.transition(id, AppointmentStatus::Completed);
    if changed {
        info!("Appointment {id} marked as attended");
    }
    Ok(changed)
}

/// Marks a confirmed appointment as a no-show.
pub fn mark_no_show(
    session: Option<&Session>,
    schedule: &mut ScheduleBook,
    id: &AppointmentId,
) -> ServiceResult<bool> {
    ensure_staff(session)?;
    let changed = schedule.transition(id, AppointmentStatus::NoShow);
    if changed {
        info!("Appointment {id} marked as no-show");
    }
    Ok(changed)
}

/// Builds the dashboard matching the session's role.
pub fn load_dashboard(
    session: Option<&Session>,
    schedule: &ScheduleBook,
    plans: &[Plan],
) -> ServiceResult<Dashboard> {
    let session = session.ok_or(ServiceError::Unauthorized)?;
    let user_name = session.user().name.to_string();

    let dashboard = match session {
        Session::Client {
            user,
            has_monthly_plan,
        } => {
            let (upcoming, history) = client_appointments(schedule.date(), user);
            let monthly_plan = has_monthly_plan.then(|| MonthlyPlanStatus {
                cuts_remaining: 2,
                total_cuts: 4,
                renewal_date: schedule
                    .date()
                    .checked_add_days(Days::new(30))
                    .unwrap_or(schedule.date()),
                fixed_time: "Quinta, 15:00h".to_string(),
            });
            Dashboard::Client(ClientDashboard {
                user_name,
                upcoming,
                history,
                monthly_plan,
            })
        }
        Session::Employee { .. } => Dashboard::Employee(EmployeeDashboard {
            user_name,
            schedule: schedule.appointments().to_vec(),
            stats: ScheduleStats::from_appointments(schedule.appointments()),
        }),
        Session::Admin { .. } => Dashboard::Admin(AdminDashboard {
            user_name,
            schedule: schedule.appointments().to_vec(),
            stats: ScheduleStats::from_appointments(schedule.appointments()),
            plans: plans.iter().map(PlanCard::from).collect(),
            active_plans: plans.iter().filter(|plan| plan.active).count(),
        }),
    };

    Ok(dashboard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::plan::default_plans;
    use crate::domain::types::{UserEmail, UserId, UserName};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 17).unwrap()
    }

    fn user(name: &str) -> User {
        User {
            id: UserId::new("u1").unwrap(),
            name: UserName::new(name).unwrap(),
            email: UserEmail::new("user@example.com").unwrap(),
            phone: None,
        }
    }

    fn employee() -> Session {
        Session::Employee {
            user: user("Marquinho"),
        }
    }

    #[test]
    fn demo_schedule_prices_come_from_catalog() {
        let book = ScheduleBook::demo(today());
        let stats = ScheduleStats::from_appointments(book.appointments());

        assert_eq!(stats.total, 4);
        assert_eq!(stats.confirmed, 3);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.revenue, Money::from_cents(1500));
        assert_eq!(book.appointments()[0].price, Money::from_cents(4000));
    }

    #[test]
    fn employee_marks_attendance() {
        let mut book = ScheduleBook::demo(today());
        let session = employee();
        let first = AppointmentId::new("1").unwrap();
        let second = AppointmentId::new("2").unwrap();

        assert!(mark_attended(Some(&session), &mut book, &first).unwrap());
        assert!(mark_no_show(Some(&session), &mut book, &second).unwrap());
        // Already settled.
        assert!(!mark_no_show(Some(&session), &mut book, &first).unwrap());
        assert!(!mark_attended(Some(&session), &mut book, &AppointmentId::new("9").unwrap()).unwrap());

        let stats = ScheduleStats::from_appointments(book.appointments());
        assert_eq!(stats.completed, 2);
        assert_eq!(stats.no_shows, 1);
        assert_eq!(stats.revenue, Money::from_cents(5500));
    }

    #[test]
    fn clients_cannot_mark_attendance() {
        let mut book = ScheduleBook::demo(today());
        let client = Session::Client {
            user: user("João"),
            has_monthly_plan: false,
        };
        let id = AppointmentId::new("1").unwrap();

        assert!(matches!(
            mark_attended(Some(&client), &mut book, &id),
            Err(ServiceError::Unauthorized)
        ));
        assert!(matches!(
            mark_no_show(None, &mut book, &id),
            Err(ServiceError::Unauthorized)
        ));
    }

    #[test]
    fn dashboard_follows_session_role() {
        let book = ScheduleBook::demo(today());
        let plans = default_plans();

        let client = Session::Client {
            user: user("João"),
            has_monthly_plan: true,
        };
        match load_dashboard(Some(&client), &book, &plans).unwrap() {
            Dashboard::Client(data) => {
                assert_eq!(data.upcoming.len(), 2);
                assert_eq!(data.history.len(), 2);
                assert!(data.upcoming.iter().all(|a| a.client_name == "João"));
                assert!(data.monthly_plan.is_some());
            }
            other => panic!("unexpected dashboard {other:?}"),
        }

        assert!(matches!(
            load_dashboard(Some(&employee()), &book, &plans).unwrap(),
            Dashboard::Employee(_)
        ));

        let admin = Session::Admin {
            user: user("Julin"),
        };
        match load_dashboard(Some(&admin), &book, &plans).unwrap() {
            Dashboard::Admin(data) => {
                assert_eq!(data.plans.len(), 5);
                assert_eq!(data.active_plans, 5);
            }
            other => panic!("unexpected dashboard {other:?}"),
        }

        assert!(matches!(
            load_dashboard(None, &book, &plans),
            Err(ServiceError::Unauthorized)
        ));
    }
}
