//! Capability policy.
//!
//! The single authorization check consulted by every service before it
//! touches a resource. Ownership/role branching lives here and nowhere
//! else; handlers and services ask `can_operate` instead of
//! re-implementing the rules per endpoint.

use uuid::Uuid;

use snipshare_core::error::AppError;
use snipshare_entity::user::UserRole;

/// What the caller is trying to do to a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Read a resource the caller can see.
    Read,
    /// Change or delete a resource.
    Modify,
    /// Moderate someone else's content (hide comments, handle reports).
    Moderate,
    /// System administration (settings, user management, broadcasts).
    Administer,
}

/// Capability policy over (actor, resource owner, action) triples.
#[derive(Debug, Clone, Default)]
pub struct Policy;

impl Policy {
    /// Creates the policy.
    pub fn new() -> Self {
        Self
    }

    /// Whether `actor_id` with `role` may perform `action` on a resource
    /// owned by `owner_id`.
    pub fn can_operate(
        &self,
        actor_id: Uuid,
        role: UserRole,
        owner_id: Uuid,
        action: Action,
    ) -> bool {
        if role.is_admin() {
            return true;
        }
        match action {
            Action::Read | Action::Modify => actor_id == owner_id,
            Action::Moderate | Action::Administer => false,
        }
    }

    /// Like [`Self::can_operate`], but returns a `Forbidden` error on
    /// denial so services can use `?`.
    pub fn authorize(
        &self,
        actor_id: Uuid,
        role: UserRole,
        owner_id: Uuid,
        action: Action,
    ) -> Result<(), AppError> {
        if self.can_operate(actor_id, role, owner_id, action) {
            Ok(())
        } else {
            Err(AppError::forbidden(
                "You do not have permission to perform this action",
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_can_read_and_modify() {
        let policy = Policy::new();
        let owner = Uuid::new_v4();
        assert!(policy.can_operate(owner, UserRole::User, owner, Action::Read));
        assert!(policy.can_operate(owner, UserRole::User, owner, Action::Modify));
    }

    #[test]
    fn test_stranger_cannot_modify() {
        let policy = Policy::new();
        let owner = Uuid::new_v4();
        let stranger = Uuid::new_v4();
        assert!(!policy.can_operate(stranger, UserRole::User, owner, Action::Read));
        assert!(!policy.can_operate(stranger, UserRole::User, owner, Action::Modify));
    }

    #[test]
    fn test_regular_users_cannot_moderate_or_administer() {
        let policy = Policy::new();
        let user = Uuid::new_v4();
        // Not even on their own resources.
        assert!(!policy.can_operate(user, UserRole::User, user, Action::Moderate));
        assert!(!policy.can_operate(user, UserRole::User, user, Action::Administer));
    }

    #[test]
    fn test_admin_can_do_everything() {
        let policy = Policy::new();
        let admin = Uuid::new_v4();
        let owner = Uuid::new_v4();
        for action in [
            Action::Read,
            Action::Modify,
            Action::Moderate,
            Action::Administer,
        ] {
            assert!(policy.can_operate(admin, UserRole::Admin, owner, action));
        }
    }

    #[test]
    fn test_authorize_maps_to_forbidden() {
        let policy = Policy::new();
        let err = policy
            .authorize(
                Uuid::new_v4(),
                UserRole::User,
                Uuid::new_v4(),
                Action::Modify,
            )
            .unwrap_err();
        assert_eq!(err.kind, snipshare_core::error::ErrorKind::Forbidden);
    }
}
