use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    auth::Principal,
    id::UserId,
    registration::{
        event::{CancelRegistration, CreateRegistration},
        Registration, RegistrationTarget,
    },
};

#[async_trait]
pub trait RegistrationRepository: Send + Sync {
    /// Admits a registration: target exists and is open, the user holds no
    /// active registration for it, capacity is not reached. All checks and
    /// the insert run in one transaction.
    async fn create(&self, event: CreateRegistration) -> AppResult<Registration>;
    /// Cancels a registration (the registering user or an admin), freeing
    /// its uniqueness slot.
    async fn cancel(&self, event: CancelRegistration) -> AppResult<()>;
    async fn find_active_by_user_id(&self, user_id: UserId) -> AppResult<Vec<Registration>>;
    /// Attendee list for a target; gated by the owner-or-admin policy.
    async fn find_by_target(
        &self,
        target: RegistrationTarget,
        requested_by: Principal,
    ) -> AppResult<Vec<Registration>>;
}
