//! Role-based access check.
//!
//! One pure function decides whether a request may dispatch: an operation
//! with no policy is public; a policy with no authenticated identity is a
//! denial; the `Any` wildcard admits every authenticated identity; otherwise
//! the identity's role must be a member of the allowed set. The per-operation
//! policy lives in a single static table here instead of annotations
//! scattered over handlers.

use super::user::{Role, User};

/// One entry in an operation's allowed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Any authenticated identity, regardless of role.
    Any,
    /// Identities holding this specific role.
    Role(Role),
}

/// Decide whether `user` may execute an operation guarded by `policy`.
///
/// `None` means the operation is public. `Some(roles)` requires an
/// authenticated identity whose role matches, or the `Any` wildcard.
#[must_use]
pub fn is_allowed(policy: Option<&[Access]>, user: Option<&User>) -> bool {
    let Some(roles) = policy else {
        return true;
    };
    let Some(user) = user else {
        return false;
    };
    roles
        .iter()
        .any(|access| matches!(access, Access::Any) || *access == Access::Role(user.role))
}

/// Allowed roles per operation. Operations absent from this table are public.
#[must_use]
pub fn policy(operation: &str) -> Option<&'static [Access]> {
    const OWNER: &[Access] = &[Access::Role(Role::Owner)];
    const CLIENT: &[Access] = &[Access::Role(Role::Client)];
    const ANY: &[Access] = &[Access::Any];

    match operation {
        "create_restaurant" | "edit_restaurant" | "delete_restaurant" | "create_dish"
        | "edit_dish" | "delete_dish" | "pending_orders" => Some(OWNER),
        "create_order" => Some(CLIENT),
        "me" | "user_profile" | "edit_profile" | "get_orders" | "get_order" | "edit_order" => {
            Some(ANY)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rstest::rstest;

    fn user_with_role(role: Role) -> User {
        User {
            id: 1,
            email: "user@example.com".to_owned(),
            password_hash: "hash".to_owned(),
            role,
            verified: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[rstest]
    fn absent_policy_allows_anyone() {
        assert!(is_allowed(None, None));
        assert!(is_allowed(None, Some(&user_with_role(Role::Client))));
    }

    #[rstest]
    fn present_policy_denies_anonymous() {
        assert!(!is_allowed(Some(&[Access::Any]), None));
        assert!(!is_allowed(Some(&[Access::Role(Role::Owner)]), None));
    }

    #[rstest]
    #[case(Role::Client)]
    #[case(Role::Owner)]
    #[case(Role::Delivery)]
    fn any_wildcard_admits_every_role(#[case] role: Role) {
        let user = user_with_role(role);
        assert!(is_allowed(
            Some(&[Access::Any, Access::Role(Role::Owner)]),
            Some(&user)
        ));
    }

    #[rstest]
    #[case(Role::Owner, true)]
    #[case(Role::Client, false)]
    #[case(Role::Delivery, false)]
    fn membership_decides_otherwise(#[case] role: Role, #[case] allowed: bool) {
        let user = user_with_role(role);
        assert_eq!(
            is_allowed(Some(&[Access::Role(Role::Owner)]), Some(&user)),
            allowed
        );
    }

    #[rstest]
    fn policy_table_matches_operation_surface() {
        assert_eq!(policy("create_restaurant"), Some(&[Access::Role(Role::Owner)][..]));
        assert_eq!(policy("create_order"), Some(&[Access::Role(Role::Client)][..]));
        assert_eq!(policy("get_orders"), Some(&[Access::Any][..]));
        assert_eq!(policy("search_restaurant"), None);
        assert_eq!(policy("login"), None);
    }
}
