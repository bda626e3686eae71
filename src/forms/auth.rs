//! Sign-in, sign-up and profile forms.

use serde::Deserialize;
use validator::Validate;

use crate::domain::types::{Password, PhoneNumber, UserEmail, UserName};
use crate::domain::user::UpdateUser;
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Credentials with normalized email.
#[derive(Debug)]
pub struct LoginPayload {
    pub email: UserEmail,
    pub password: Password,
}

impl TryFrom<LoginForm> for LoginPayload {
    type Error = FormError;

    fn try_from(form: LoginForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(Self {
            email: UserEmail::new(form.email).map_err(|_| FormError::InvalidEmail)?,
            password: Password::new(form.password).map_err(|_| FormError::InvalidPassword)?,
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct SignupForm {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub phone: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug)]
pub struct SignupPayload {
    pub name: UserName,
    pub email: UserEmail,
    pub phone: PhoneNumber,
    pub password: Password,
}

impl TryFrom<SignupForm> for SignupPayload {
    type Error = FormError;

    fn try_from(form: SignupForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(Self {
            name: UserName::new(form.name).map_err(|_| FormError::InvalidName)?,
            email: UserEmail::new(form.email).map_err(|_| FormError::InvalidEmail)?,
            phone: PhoneNumber::new(form.phone).map_err(|_| FormError::InvalidPhoneNumber)?,
            password: Password::new(form.password).map_err(|_| FormError::InvalidPassword)?,
        })
    }
}

/// Profile edits. Blank or missing fields keep the current value.
#[derive(Debug, Default, Deserialize)]
pub struct ProfileForm {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl TryFrom<ProfileForm> for UpdateUser {
    type Error = FormError;

    fn try_from(form: ProfileForm) -> Result<Self, Self::Error> {
        Ok(Self {
            name: present(form.name)
                .map(UserName::new)
                .transpose()
                .map_err(|_| FormError::InvalidName)?,
            email: present(form.email)
                .map(UserEmail::new)
                .transpose()
                .map_err(|_| FormError::InvalidEmail)?,
            phone: present(form.phone)
                .map(PhoneNumber::new)
                .transpose()
                .map_err(|_| FormError::InvalidPhoneNumber)?,
        })
    }
}
