//! Signed-in users, their roles and the persisted session snapshot.

use serde::{Deserialize, Serialize};

use crate::domain::types::{PhoneNumber, UserEmail, UserId, UserName};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Client,
    Employee,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Client => "client",
            Role::Employee => "employee",
            Role::Admin => "admin",
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: UserName,
    pub email: UserEmail,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<PhoneNumber>,
}

/// Partial profile changes; `None` keeps the current value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UpdateUser {
    pub name: Option<UserName>,
    pub email: Option<UserEmail>,
    pub phone: Option<PhoneNumber>,
}

impl User {
    pub fn apply(&mut self, updates: UpdateUser) {
        if let Some(name) = updates.name {
            self.name = name;
        }
        if let Some(email) = updates.email {
            self.email = email;
        }
        if let Some(phone) = updates.phone {
            self.phone = Some(phone);
        }
    }
}

/// Active session, tagged by the kind of account that opened it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Session {
    Client { user: User, has_monthly_plan: bool },
    Employee { user: User },
    Admin { user: User },
}

impl Session {
    pub fn user(&self) -> &User {
        match self {
            Session::Client { user, .. } | Session::Employee { user } | Session::Admin { user } => {
                user
            }
        }
    }

    pub fn user_mut(&mut self) -> &mut User {
        match self {
            Session::Client { user, .. } | Session::Employee { user } | Session::Admin { user } => {
                user
            }
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Session::Client { .. } => Role::Client,
            Session::Employee { .. } => Role::Employee,
            Session::Admin { .. } => Role::Admin,
        }
    }

    pub fn has_monthly_plan(&self) -> bool {
        matches!(
            self,
            Session::Client {
                has_monthly_plan: true,
                ..
            }
        )
    }

    pub fn open(user: User, role: Role) -> Self {
        match role {
            Role::Client => Session::Client {
                user,
                has_monthly_plan: false,
            },
            Role::Employee => Session::Employee { user },
            Role::Admin => Session::Admin { user },
        }
    }
}

/// Persisted layout of the authentication state.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuthSnapshot {
    pub user: Option<User>,
    pub user_type: Option<Role>,
    #[serde(default)]
    pub has_monthly_plan: bool,
}

impl From<Option<&Session>> for AuthSnapshot {
    fn from(session: Option<&Session>) -> Self {
        match session {
            Some(session) => AuthSnapshot {
                user: Some(session.user().clone()),
                user_type: Some(session.role()),
                has_monthly_plan: session.has_monthly_plan(),
            },
            None => AuthSnapshot::default(),
        }
    }
}

impl AuthSnapshot {
    /// Restores the session; a snapshot missing either the user or the role
    /// counts as signed out.
    pub fn into_session(self) -> Option<Session> {
        let (user, role) = (self.user?, self.user_type?);
        let mut session = Session::open(user, role);
        if let Session::Client {
            has_monthly_plan, ..
        } = &mut session
        {
            *has_monthly_plan = self.has_monthly_plan;
        }
        Some(session)
    }
}
