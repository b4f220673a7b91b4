/// The access policy gating every path-scoped operation
///
/// Every onboarding route embeds a target identity, a `(name, role)` pair,
/// in its path. [`authorize`] binds that claimed identity to the
/// authenticated principal: the role segment must match the principal's
/// role case-insensitively, and the name segment must equal the principal's
/// stored display name exactly. Some operations additionally require the HR
/// role, checked in the same call.
///
/// All failures collapse into a single [`AuthzError::AccessDenied`]; callers
/// never learn which check failed.
///
/// # Example
///
/// ```
/// use hivedesk_shared::auth::authorization::authorize;
/// use hivedesk_shared::models::user::Role;
/// # use hivedesk_shared::models::user::User;
/// # use chrono::Utc;
/// # use uuid::Uuid;
/// # let principal = User {
/// #     id: Uuid::new_v4(),
/// #     name: "John HR".to_string(),
/// #     email: "john.hr@company.com".to_string(),
/// #     password_hash: String::new(),
/// #     role: Role::Hr,
/// #     is_active: true,
/// #     created_at: Utc::now(),
/// #     updated_at: Utc::now(),
/// # };
///
/// // Identity binding only
/// authorize(&principal, "John HR", "hr", None).unwrap();
///
/// // Identity binding plus the HR gate
/// authorize(&principal, "John HR", "HR", Some(Role::Hr)).unwrap();
/// ```

use crate::models::user::{Role, User};

/// Error type for authorization decisions
///
/// Deliberately a single variant: wrong name, wrong role, and missing
/// privilege are indistinguishable to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthzError {
    /// The principal may not perform this operation
    #[error("Access denied")]
    AccessDenied,
}

/// Decides whether `principal` may perform an operation addressed to the
/// target identity `(target_name, target_role)`
///
/// Permitted only when all of the following hold:
///
/// - `target_role` parses to the principal's actual role (case-insensitive)
/// - `target_name` equals the principal's stored name (case-sensitive)
/// - `required_role`, when given, equals the principal's role
///
/// Pure decision function; no side effects.
pub fn authorize(
    principal: &User,
    target_name: &str,
    target_role: &str,
    required_role: Option<Role>,
) -> Result<(), AuthzError> {
    let claimed = Role::parse(target_role).ok_or(AuthzError::AccessDenied)?;

    if claimed != principal.role {
        return Err(AuthzError::AccessDenied);
    }

    if target_name != principal.name {
        return Err(AuthzError::AccessDenied);
    }

    if let Some(required) = required_role {
        if principal.role != required {
            return Err(AuthzError::AccessDenied);
        }
    }

    Ok(())
}
