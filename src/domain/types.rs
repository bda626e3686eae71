//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce basic invariants (e.g., non-empty identifiers,
//! normalized/validated email, E.164 phone numbers) so that once a value
//! reaches the domain layer it can be treated as trusted.
use std::fmt::{Display, Formatter};
use std::ops::{Add, Deref, Sub};
use std::str::FromStr;

use chrono::NaiveTime;
use phonenumber::{Mode, country, parse};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;
use validator::ValidateEmail;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided email failed format validation.
    #[error("invalid email address")]
    InvalidEmail,
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Provided value failed custom validation.
    #[error("invalid value: {0}")]
    InvalidValue(String),
    /// Phone number did not meet expected format.
    #[error("invalid phone number")]
    InvalidPhone,
    /// Amount was not a finite number.
    #[error("invalid amount")]
    InvalidAmount,
    /// Time of day was not in `HH:MM` form.
    #[error("invalid time of day")]
    InvalidTime,
}

/// Region assumed for phone numbers written without a country prefix.
pub const DEFAULT_PHONE_REGION: country::Id = country::Id::BR;

/// Normalizes and validates an email string.
fn normalize_email<S: Into<String>>(email: S) -> Result<String, TypeConstraintError> {
    let normalized = email.into().trim().to_lowercase();
    if normalized.validate_email() {
        Ok(normalized)
    } else {
        Err(TypeConstraintError::InvalidEmail)
    }
}

/// Macro to generate lightweight newtypes for string identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier ensuring it is not blank.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let value = value.into();
                if value.trim().is_empty() {
                    Err(TypeConstraintError::EmptyString)
                } else {
                    Ok(Self(value))
                }
            }

            /// Wraps a value already known to be non-blank (seed data, generated ids).
            pub(crate) fn from_trusted<S: Into<String>>(value: S) -> Self {
                Self(value.into())
            }

            /// Borrow the identifier as a `&str`.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

id_newtype!(PlanId, "Unique identifier for a subscription plan.");
id_newtype!(BarberId, "Identifier of a barber in the static catalog.");
id_newtype!(ServiceId, "Identifier of a service in the static catalog.");
id_newtype!(UserId, "Identifier attached to a signed-in user.");
id_newtype!(AppointmentId, "Identifier of a scheduled appointment.");

/// Lower-cased and validated email address.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct UserEmail(String);

impl UserEmail {
    /// Validates and normalizes an email string.
    pub fn new<S: Into<String>>(email: S) -> Result<Self, TypeConstraintError> {
        let normalized = normalize_email(email)?;
        Ok(Self(normalized))
    }

    /// Borrow the email as a `&str`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the owned inner `String`.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for UserEmail {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<&str> for UserEmail {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Wrapper for non-empty, trimmed strings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Trims whitespace and rejects empty inputs.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        Ok(Self(trimmed))
    }

    /// Borrow the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper returning the owned string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

macro_rules! non_empty_string_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed, non-empty value.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let inner = NonEmptyString::new(value)?;
                Ok(Self(inner.into_inner()))
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }
    };
}

non_empty_string_newtype!(UserName, "Display name of a user enforcing non-empty values.");

non_empty_string_newtype!(Password, "Raw password as typed into a login form.");

/// Normalizes a phone number string to E.164 format.
pub fn normalize_phone_to_e164(value: &str) -> Result<String, TypeConstraintError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TypeConstraintError::EmptyString);
    }
    let parsed = parse(Some(DEFAULT_PHONE_REGION), trimmed)
        .map_err(|_| TypeConstraintError::InvalidPhone)?;
    Ok(parsed.format().mode(Mode::E164).to_string())
}

/// Normalized phone number wrapper (expected E.164).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Constructs a phone number ensuring it is valid and normalizes to E.164 format.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let normalized = normalize_phone_to_e164(&value.into())?;
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for PhoneNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monetary amount in Brazilian reais, held as whole centavos.
///
/// Serialized as a plain JSON number (`80` or `80.5`) so persisted snapshots
/// keep the decimal layout used by the booking front-end.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Builds an amount from whole centavos.
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Builds an amount from a decimal value, rounding to the nearest centavo.
    ///
    /// Values whose centavo count does not fit in an `i64` are rejected.
    pub fn from_decimal(value: f64) -> Result<Self, TypeConstraintError> {
        let cents = (value * 100.0).round();
        if !cents.is_finite() || cents < i64::MIN as f64 || cents >= i64::MAX as f64 {
            return Err(TypeConstraintError::InvalidAmount);
        }
        Ok(Self(cents as i64))
    }

    pub const fn cents(self) -> i64 {
        self.0
    }

    pub fn as_decimal(self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0.saturating_sub(rhs.0))
    }
}

impl Display for Money {
    /// Formats as `R$ 1.234,56`.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let reais = (abs / 100).to_string();
        let centavos = abs % 100;

        let mut grouped = String::with_capacity(reais.len() + reais.len() / 3);
        for (i, digit) in reais.chars().enumerate() {
            if i > 0 && (reais.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(digit);
        }

        write!(f, "{sign}R$ {grouped},{centavos:02}")
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_decimal())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Money::from_decimal(value).map_err(serde::de::Error::custom)
    }
}

/// Time of day at minute precision, written as `HH:MM`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotTime(NaiveTime);

impl SlotTime {
    pub fn from_hm(hour: u32, minute: u32) -> Result<Self, TypeConstraintError> {
        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(Self)
            .ok_or(TypeConstraintError::InvalidTime)
    }

    pub fn time(self) -> NaiveTime {
        self.0
    }
}

impl Display for SlotTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

impl FromStr for SlotTime {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveTime::parse_from_str(s.trim(), "%H:%M")
            .map(Self)
            .map_err(|_| TypeConstraintError::InvalidTime)
    }
}

impl Serialize for SlotTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SlotTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_formats_with_brazilian_separators() {
        assert_eq!(Money::from_cents(8000).to_string(), "R$ 80,00");
        assert_eq!(Money::from_cents(123456).to_string(), "R$ 1.234,56");
        assert_eq!(Money::from_cents(-2050).to_string(), "-R$ 20,50");
    }

    #[test]
    fn money_round_trips_as_json_number() {
        let money: Money = serde_json::from_str("80").unwrap();
        assert_eq!(money, Money::from_cents(8000));
        assert_eq!(serde_json::to_string(&Money::from_cents(8050)).unwrap(), "80.5");
        assert!(Money::from_decimal(f64::NAN).is_err());
    }

    #[test]
    fn money_rejects_amounts_beyond_centavo_range() {
        assert!(matches!(
            Money::from_decimal(1e30),
            Err(TypeConstraintError::InvalidAmount)
        ));
        assert!(Money::from_decimal(-1e30).is_err());
        assert!(Money::from_decimal(f64::INFINITY).is_err());
        assert!(serde_json::from_str::<Money>("1e30").is_err());
        assert_eq!(
            Money::from_decimal(1_000_000.25).unwrap(),
            Money::from_cents(100_000_025)
        );
    }

    #[test]
    fn money_arithmetic_saturates() {
        let max = Money::from_cents(i64::MAX);
        let min = Money::from_cents(i64::MIN);
        assert_eq!(max - min, max);
        assert_eq!(min - max, min);
        assert_eq!(max + Money::from_cents(1), max);
        assert_eq!(
            Money::from_cents(500) - Money::from_cents(200),
            Money::from_cents(300)
        );
    }

    #[test]
    fn slot_time_parses_hour_minute() {
        let time: SlotTime = "09:30".parse().unwrap();
        assert_eq!(time, SlotTime::from_hm(9, 30).unwrap());
        assert_eq!(time.to_string(), "09:30");
        assert!("9h30".parse::<SlotTime>().is_err());
    }

    #[test]
    fn email_is_trimmed_and_lowercased() {
        let email = UserEmail::new("  Julin@Barbearia.com ").unwrap();
        assert_eq!(email.as_str(), "julin@barbearia.com");
        assert_eq!(UserEmail::new("nope"), Err(TypeConstraintError::InvalidEmail));
    }

    #[test]
    fn phone_defaults_to_brazilian_region() {
        let phone = PhoneNumber::new("(11) 99999-9999").unwrap();
        assert_eq!(phone.as_str(), "+5511999999999");
        assert!(PhoneNumber::new("   ").is_err());
    }

    #[test]
    fn ids_reject_blank_values() {
        assert!(PlanId::new("basic").is_ok());
        assert_eq!(PlanId::new("  "), Err(TypeConstraintError::EmptyString));
    }
}
