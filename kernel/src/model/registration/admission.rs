use shared::error::{AppError, AppResult};

use super::TargetKind;

/// The slice of a registration target the admission decision needs.
#[derive(Debug, Clone)]
pub struct TargetSnapshot {
    pub title: String,
    pub registration_open: bool,
    pub max_participants: Option<i32>,
}

/// The admission rules, in order: the target must exist, be open, the user
/// must hold no active registration for it, and a finite capacity must not
/// already be reached. Capacity counts current non-cancelled registrations
/// only. Returns the snapshot so callers keep working with the state the
/// decision was made on.
///
/// The caller is responsible for reading `already_registered` and
/// `active_count` in the same transaction that performs the insert.
pub fn check_admission(
    kind: TargetKind,
    target: Option<TargetSnapshot>,
    already_registered: bool,
    active_count: i64,
) -> AppResult<TargetSnapshot> {
    let Some(target) = target else {
        return Err(AppError::EntityNotFound(format!("{kind} not found")));
    };
    if !target.registration_open {
        return Err(AppError::RegistrationClosed);
    }
    if already_registered {
        return Err(AppError::AlreadyRegistered);
    }
    if let Some(max) = target.max_participants {
        if active_count >= i64::from(max) {
            return Err(AppError::CapacityExceeded);
        }
    }
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_target(max_participants: Option<i32>) -> TargetSnapshot {
        TargetSnapshot {
            title: "summer camp".into(),
            registration_open: true,
            max_participants,
        }
    }

    #[test]
    fn missing_target_names_the_kind() {
        match check_admission(TargetKind::Event, None, false, 0) {
            Err(AppError::EntityNotFound(msg)) => assert_eq!(msg, "event not found"),
            other => panic!("expected EntityNotFound, got {other:?}"),
        }
    }

    #[test]
    fn closed_target_is_rejected_before_uniqueness() {
        let target = TargetSnapshot {
            registration_open: false,
            ..open_target(None)
        };
        // Even an already-registered user sees the closed failure first.
        assert!(matches!(
            check_admission(TargetKind::Program, Some(target), true, 0),
            Err(AppError::RegistrationClosed)
        ));
    }

    #[test]
    fn active_registration_blocks_readmission() {
        assert!(matches!(
            check_admission(TargetKind::Event, Some(open_target(Some(10))), true, 3),
            Err(AppError::AlreadyRegistered)
        ));
    }

    #[test]
    fn full_target_is_rejected_at_the_boundary() {
        assert!(matches!(
            check_admission(TargetKind::Event, Some(open_target(Some(5))), false, 5),
            Err(AppError::CapacityExceeded)
        ));
    }

    #[test]
    fn last_place_is_admitted() {
        assert!(check_admission(TargetKind::Event, Some(open_target(Some(5))), false, 4).is_ok());
    }

    #[test]
    fn unlimited_target_never_fails_capacity() {
        assert!(check_admission(TargetKind::Program, Some(open_target(None)), false, 10_000).is_ok());
    }
}
