//! Fixed barber and service catalogs offered by the shop.

use serde::Serialize;

use crate::domain::types::{BarberId, Money, ServiceId};

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Barber {
    pub id: BarberId,
    pub name: String,
    pub specialties: Vec<String>,
    /// Single letter shown in place of a photo.
    pub avatar: String,
    pub rating: f32,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Service {
    pub id: ServiceId,
    pub name: String,
    pub duration_minutes: u32,
    pub price: Money,
    pub description: String,
}

pub fn barbers() -> Vec<Barber> {
    vec![
        Barber {
            id: BarberId::from_trusted("1"),
            name: "Julin".to_string(),
            specialties: vec![
                "Cortes Clássicos".to_string(),
                "Barbas".to_string(),
                "Navalha".to_string(),
            ],
            avatar: "J".to_string(),
            rating: 4.9,
        },
        Barber {
            id: BarberId::from_trusted("2"),
            name: "Marquinho".to_string(),
            specialties: vec![
                "Cortes Modernos".to_string(),
                "Degradê".to_string(),
                "Barbas".to_string(),
            ],
            avatar: "M".to_string(),
            rating: 4.8,
        },
    ]
}

pub fn services() -> Vec<Service> {
    vec![
        Service {
            id: ServiceId::from_trusted("1"),
            name: "Corte Tradicional".to_string(),
            duration_minutes: 30,
            price: Money::from_cents(2500),
            description: "Corte clássico com acabamento perfeito".to_string(),
        },
        Service {
            id: ServiceId::from_trusted("2"),
            name: "Corte + Barba".to_string(),
            duration_minutes: 45,
            price: Money::from_cents(4000),
            description: "Corte completo com aparar barba".to_string(),
        },
        Service {
            id: ServiceId::from_trusted("3"),
            name: "Apenas Barba".to_string(),
            duration_minutes: 20,
            price: Money::from_cents(1500),
            description: "Aparar e modelar barba".to_string(),
        },
    ]
}

pub fn find_barber(id: &BarberId) -> Option<Barber> {
    barbers().into_iter().find(|barber| &barber.id == id)
}

pub fn find_service(id: &ServiceId) -> Option<Service> {
    services().into_iter().find(|service| &service.id == id)
}

pub fn find_service_by_name(name: &str) -> Option<Service> {
    services().into_iter().find(|service| service.name == name)
}
