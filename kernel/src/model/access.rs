use shared::error::{AppError, AppResult};

use crate::model::{auth::Principal, id::UserId, role::Role};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    Forbidden,
}

/// What a caller who fails the ownership check is told. `Reveal` reports
/// `ForbiddenOperation` (the resource is known to exist), `Conceal` reports
/// `EntityNotFound` so existence cannot be probed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForbiddenDisclosure {
    Reveal,
    Conceal,
}

impl ForbiddenDisclosure {
    pub fn from_conceal_flag(conceal: bool) -> Self {
        if conceal {
            Self::Conceal
        } else {
            Self::Reveal
        }
    }
}

/// The owner-or-admin decision shared by every mutable resource.
///
/// An absent owner means the resource is administratively owned and only an
/// admin may touch it. Existence must be established by the caller before
/// this decision runs.
pub fn decide(owner_id: Option<UserId>, principal: &Principal) -> AccessDecision {
    match (owner_id, principal.role) {
        (_, Role::Admin) => AccessDecision::Allow,
        (Some(owner), Role::User) if owner == principal.user_id => AccessDecision::Allow,
        _ => AccessDecision::Forbidden,
    }
}

pub fn enforce(
    owner_id: Option<UserId>,
    principal: &Principal,
    disclosure: ForbiddenDisclosure,
    entity: &str,
) -> AppResult<()> {
    match decide(owner_id, principal) {
        AccessDecision::Allow => Ok(()),
        AccessDecision::Forbidden => match disclosure {
            ForbiddenDisclosure::Reveal => Err(AppError::ForbiddenOperation),
            ForbiddenDisclosure::Conceal => {
                Err(AppError::EntityNotFound(format!("{entity} not found")))
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn principal(user_id: UserId, role: Role) -> Principal {
        Principal { user_id, role }
    }

    #[test]
    fn decision_table() {
        let owner = UserId::new();
        let other = UserId::new();

        // (owner_id, principal, expected)
        let rows = [
            (Some(owner), principal(other, Role::Admin), AccessDecision::Allow),
            (Some(owner), principal(owner, Role::User), AccessDecision::Allow),
            (Some(owner), principal(other, Role::User), AccessDecision::Forbidden),
            (None, principal(other, Role::Admin), AccessDecision::Allow),
            (None, principal(other, Role::User), AccessDecision::Forbidden),
        ];

        for (owner_id, principal, expected) in rows {
            assert_eq!(decide(owner_id, &principal), expected);
        }
    }

    #[test]
    fn forbidden_is_revealed_by_default_mode() {
        let owner = UserId::new();
        let caller = principal(UserId::new(), Role::User);

        assert!(matches!(
            enforce(Some(owner), &caller, ForbiddenDisclosure::Reveal, "event"),
            Err(AppError::ForbiddenOperation)
        ));
    }

    #[test]
    fn forbidden_is_reported_as_not_found_when_concealing() {
        let owner = UserId::new();
        let caller = principal(UserId::new(), Role::User);

        match enforce(Some(owner), &caller, ForbiddenDisclosure::Conceal, "event") {
            Err(AppError::EntityNotFound(msg)) => assert_eq!(msg, "event not found"),
            other => panic!("expected EntityNotFound, got {other:?}"),
        }
    }

    #[test]
    fn owner_passes_enforcement() {
        let owner = UserId::new();
        let caller = principal(owner, Role::User);

        assert!(enforce(Some(owner), &caller, ForbiddenDisclosure::Reveal, "event").is_ok());
    }
}
