use derive_new::new;

use crate::model::{auth::Principal, id::RegistrationId, id::UserId};

use super::RegistrationTarget;

#[derive(Debug, new)]
pub struct CreateRegistration {
    pub registered_by: UserId,
    pub target: RegistrationTarget,
}

#[derive(Debug, new)]
pub struct CancelRegistration {
    pub registration_id: RegistrationId,
    pub requested_by: Principal,
}
