//! Session store: simulated sign-in flows persisted as a single snapshot.
//!
//! Client logins accept any well-formed credentials. Staff logins are checked
//! against the configured account table. Passwords are never persisted.

use log::{error, info, warn};
use uuid::Uuid;

use crate::AUTH_SNAPSHOT_KEY;
use crate::domain::types::{PhoneNumber, UserEmail, UserId, UserName};
use crate::domain::user::{AuthSnapshot, Role, Session, UpdateUser, User};
use crate::forms::auth::{LoginForm, LoginPayload, ProfileForm, SignupForm, SignupPayload};
use crate::models::config::{AppConfig, DemoClient, StaffAccount};
use crate::repository::errors::RepositoryError;
use crate::repository::{SnapshotReader, SnapshotWriter};
use crate::services::{ServiceError, ServiceResult};

pub struct AuthStore<R> {
    repo: R,
    demo_client: DemoClient,
    staff_accounts: Vec<StaffAccount>,
    session: Option<Session>,
}

impl<R> AuthStore<R>
where
    R: SnapshotReader + SnapshotWriter,
{
    /// Restores the persisted session, if any.
    pub fn load(repo: R, config: &AppConfig) -> ServiceResult<Self> {
        let session = match repo.load_snapshot(AUTH_SNAPSHOT_KEY)? {
            Some(raw) => serde_json::from_str::<AuthSnapshot>(&raw)
                .map_err(|err| {
                    error!("Failed to read auth snapshot: {err}");
                    RepositoryError::from(err)
                })?
                .into_session(),
            None => None,
        };

        Ok(Self {
            repo,
            demo_client: config.demo_client.clone(),
            staff_accounts: config.staff_accounts.clone(),
            session,
        })
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Signs a client in with any valid email and non-empty password.
    pub fn login_client(&mut self, form: LoginForm) -> ServiceResult<&Session> {
        let payload = LoginPayload::try_from(form)?;
        let phone = PhoneNumber::new(self.demo_client.phone.as_str()).ok();
        let user = User {
            id: new_user_id(),
            name: UserName::new(self.demo_client.name.as_str())?,
            email: payload.email,
            phone,
        };
        self.open(Session::open(user, Role::Client))
    }

    /// Creates a client account from the sign-up form and signs it in.
    pub fn register_client(&mut self, form: SignupForm) -> ServiceResult<&Session> {
        let payload = SignupPayload::try_from(form)?;
        let user = User {
            id: new_user_id(),
            name: payload.name,
            email: payload.email,
            phone: Some(payload.phone),
        };
        self.open(Session::open(user, Role::Client))
    }

    /// Signs a staff member in against the configured credential table.
    pub fn login_staff(&mut self, form: LoginForm) -> ServiceResult<&Session> {
        let payload = LoginPayload::try_from(form)?;

        let matched = self.staff_accounts.iter().enumerate().find(|(_, account)| {
            UserEmail::new(account.email.as_str()).is_ok_and(|email| email == payload.email)
                && account.password == payload.password.as_str()
        });

        let Some((index, account)) = matched else {
            warn!("Rejected staff login for {}", payload.email);
            return Err(ServiceError::InvalidCredentials);
        };

        let user = User {
            id: UserId::new(format!("{}{}", account.role.as_str(), index + 1))?,
            name: UserName::new(account.name.as_str())?,
            email: payload.email,
            phone: None,
        };
        let role = account.role;
        self.open(Session::open(user, role))
    }

    /// Clears identity, role and plan flag.
    pub fn logout(&mut self) -> ServiceResult<()> {
        self.persist(None)?;
        if let Some(previous) = self.session.take() {
            info!("Session closed for {}", previous.user().email);
        }
        Ok(())
    }

    /// Merges profile edits into the signed-in user. Returns `false` when
    /// nobody is signed in.
    pub fn update_profile(&mut self, form: ProfileForm) -> ServiceResult<bool> {
        let updates = UpdateUser::try_from(form)?;
        let Some(current) = &self.session else {
            return Ok(false);
        };

        let mut next = current.clone();
        next.user_mut().apply(updates);
        self.persist(Some(&next))?;
        info!("Profile updated for {}", next.user().email);
        self.session = Some(next);
        Ok(true)
    }

    /// Records whether the signed-in client holds a monthly plan. Returns
    /// `false` when there is no client session.
    pub fn set_has_monthly_plan(&mut self, value: bool) -> ServiceResult<bool> {
        let Some(Session::Client { user, .. }) = &self.session else {
            return Ok(false);
        };

        let next = Session::Client {
            user: user.clone(),
            has_monthly_plan: value,
        };
        self.persist(Some(&next))?;
        self.session = Some(next);
        Ok(true)
    }

    fn open(&mut self, session: Session) -> ServiceResult<&Session> {
        self.persist(Some(&session))?;
        info!(
            "Session opened for {} as {}",
            session.user().email,
            session.role().as_str()
        );
        Ok(self.session.insert(session))
    }

    fn persist(&self, session: Option<&Session>) -> ServiceResult<()> {
        let raw = serde_json::to_string(&AuthSnapshot::from(session))
            .map_err(RepositoryError::from)?;
        self.repo
            .save_snapshot(AUTH_SNAPSHOT_KEY, &raw)
            .map_err(|err| {
                error!("Failed to persist session: {err}");
                err
            })?;
        Ok(())
    }
}

fn new_user_id() -> UserId {
    UserId::from_trusted(Uuid::new_v4().to_string())
}
