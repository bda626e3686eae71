//! Subscription plan catalog with snapshot persistence.
//!
//! The catalog is a plain ordered collection. It does not validate prices or
//! names; callers run the plan form first. Every accepted mutation rewrites
//! the whole snapshot before the in-memory list is replaced, so a failed write
//! leaves the catalog exactly as it was.

use chrono::Utc;
use log::{error, info, warn};
use rand::Rng;
use rand::distr::Alphanumeric;

use crate::PLANS_SNAPSHOT_KEY;
use crate::domain::plan::{NewPlan, Plan, UpdatePlan, default_plans};
use crate::domain::types::PlanId;
use crate::repository::errors::RepositoryError;
use crate::repository::{SnapshotReader, SnapshotWriter};
use crate::services::ServiceResult;

const ID_SUFFIX_LEN: usize = 9;

pub struct PlanCatalogStore<R> {
    repo: R,
    plans: Vec<Plan>,
}

impl<R> PlanCatalogStore<R>
where
    R: SnapshotReader + SnapshotWriter,
{
    /// Restores the catalog from its snapshot, or starts from the seed plans
    /// when nothing has been stored yet.
    pub fn load(repo: R) -> ServiceResult<Self> {
        let plans = match repo.load_snapshot(PLANS_SNAPSHOT_KEY)? {
            Some(raw) => serde_json::from_str::<Vec<Plan>>(&raw).map_err(|err| {
                error!("Failed to read plan snapshot: {err}");
                RepositoryError::from(err)
            })?,
            None => {
                info!("No plan snapshot found, starting from seed catalog");
                default_plans()
            }
        };

        Ok(Self { repo, plans })
    }

    /// All plans in insertion order.
    pub fn plans(&self) -> &[Plan] {
        &self.plans
    }

    /// Plans offered to customers.
    pub fn active_plans(&self) -> Vec<&Plan> {
        self.plans.iter().filter(|plan| plan.active).collect()
    }

    pub fn get(&self, id: &PlanId) -> Option<&Plan> {
        self.plans.iter().find(|plan| &plan.id == id)
    }

    /// Appends a plan under a freshly issued id and returns the stored record.
    pub fn add(&mut self, new_plan: NewPlan) -> ServiceResult<Plan> {
        let id = self.issue_id();
        let plan = Plan::from_new(id, new_plan);

        let mut next = self.plans.clone();
        next.push(plan.clone());
        self.commit(next)?;

        info!("Plan {} created: {}", plan.id, plan.name);
        Ok(plan)
    }

    /// Merges `updates` into the plan with `id`. Returns `false` when no such
    /// plan exists, in which case nothing is written.
    pub fn update(&mut self, id: &PlanId, updates: UpdatePlan) -> ServiceResult<bool> {
        let Some(index) = self.position(id) else {
            warn!("Ignoring update for unknown plan {id}");
            return Ok(false);
        };

        let mut next = self.plans.clone();
        next[index].apply(updates);
        self.commit(next)?;

        info!("Plan {id} updated");
        Ok(true)
    }

    /// Deletes the plan with `id`. Returns `false` when no such plan exists.
    pub fn remove(&mut self, id: &PlanId) -> ServiceResult<bool> {
        let Some(index) = self.position(id) else {
            warn!("Ignoring removal of unknown plan {id}");
            return Ok(false);
        };

        let mut next = self.plans.clone();
        next.remove(index);
        self.commit(next)?;

        info!("Plan {id} removed");
        Ok(true)
    }

    /// Flips the `active` flag of the plan with `id`. Returns `false` when no
    /// such plan exists.
    pub fn toggle_active(&mut self, id: &PlanId) -> ServiceResult<bool> {
        let Some(index) = self.position(id) else {
            warn!("Ignoring status toggle for unknown plan {id}");
            return Ok(false);
        };

        let mut next = self.plans.clone();
        next[index].active = !next[index].active;
        let active = next[index].active;
        self.commit(next)?;

        info!("Plan {id} is now {}", if active { "active" } else { "inactive" });
        Ok(true)
    }

    fn position(&self, id: &PlanId) -> Option<usize> {
        self.plans.iter().position(|plan| &plan.id == id)
    }

    fn commit(&mut self, next: Vec<Plan>) -> ServiceResult<()> {
        let raw = serde_json::to_string(&next).map_err(RepositoryError::from)?;
        self.repo
            .save_snapshot(PLANS_SNAPSHOT_KEY, &raw)
            .map_err(|err| {
                error!("Failed to persist plan catalog: {err}");
                err
            })?;
        self.plans = next;
        Ok(())
    }

    fn issue_id(&self) -> PlanId {
        loop {
            let id = generate_plan_id();
            if self.position(&id).is_none() {
                return id;
            }
        }
    }
}

/// Builds an id of the form `plan_<unix millis>_<9 lowercase alphanumerics>`.
fn generate_plan_id() -> PlanId {
    let suffix: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(ID_SUFFIX_LEN)
        .map(|byte| char::from(byte).to_ascii_lowercase())
        .collect();
    PlanId::from_trusted(format!("plan_{}_{suffix}", Utc::now().timestamp_millis()))
}
