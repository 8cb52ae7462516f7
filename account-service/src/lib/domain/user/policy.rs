use crate::domain::user::models::Role;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Self-or-admin authorization rule.
///
/// A caller may modify a target account iff the target is their own account
/// or they hold the admin role. This single rule governs profile updates and
/// password changes.
pub fn may_modify(caller: &User, target: UserId) -> bool {
    caller.id == target || caller.role == Role::Admin
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::models::EmailAddress;

    fn user(id: i64, role: Role) -> User {
        User {
            id: UserId(id),
            name: "Test User".to_string(),
            email: EmailAddress::new(format!("user{}@example.com", id)).unwrap(),
            phone: None,
            role,
            password_hash: "$argon2id$test_hash".to_string(),
            addresses: vec![],
            cart_items: vec![],
        }
    }

    #[test]
    fn test_customer_may_modify_self() {
        let caller = user(1, Role::Customer);
        assert!(may_modify(&caller, UserId(1)));
    }

    #[test]
    fn test_customer_may_not_modify_others() {
        let caller = user(1, Role::Customer);
        assert!(!may_modify(&caller, UserId(2)));
    }

    #[test]
    fn test_editor_may_not_modify_others() {
        let caller = user(1, Role::Editor);
        assert!(!may_modify(&caller, UserId(2)));
    }

    #[test]
    fn test_admin_may_modify_anyone() {
        let caller = user(1, Role::Admin);
        assert!(may_modify(&caller, UserId(1)));
        assert!(may_modify(&caller, UserId(2)));
    }
}
