//! User entity - an account registered under an optional university

use chrono::{DateTime, Utc};

use crate::value_objects::{Snowflake, UserRole};

/// User account. The password hash lives only in storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    pub username: String,
    pub email: String,
    pub role: UserRole,
    pub university_id: Option<Snowflake>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new student account. The email is stored lowercase.
    pub fn new(
        id: Snowflake,
        username: String,
        email: &str,
        university_id: Option<Snowflake>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            username,
            email: normalize_email(email),
            role: UserRole::Student,
            university_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Domain part of the email address, lowercase
    pub fn email_domain(&self) -> Option<&str> {
        email_domain(&self.email)
    }

    /// Whether this user belongs to the given university
    #[inline]
    pub fn is_at(&self, university_id: Snowflake) -> bool {
        self.university_id == Some(university_id)
    }

    /// Promote to `role` if that is an upgrade; returns whether anything changed
    pub fn promote(&mut self, role: UserRole) -> bool {
        let upgrade = matches!(
            (self.role, role),
            (UserRole::Student, UserRole::Admin | UserRole::SuperAdmin)
                | (UserRole::Admin, UserRole::SuperAdmin)
        );
        if upgrade {
            self.role = role;
            self.updated_at = Utc::now();
        }
        upgrade
    }
}

/// Trim and lowercase an email for storage and comparison
pub fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

/// Text after the last `@`, if both sides are non-empty
pub fn email_domain(email: &str) -> Option<&str> {
    let (local, domain) = email.rsplit_once('@')?;
    (!local.is_empty() && !domain.is_empty()).then_some(domain)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(email: &str) -> User {
        User::new(Snowflake::new(1), "alice".to_string(), email, None)
    }

    #[test]
    fn test_new_user_is_student_with_normalized_email() {
        let u = user("  Alice@UNI.edu ");
        assert_eq!(u.email, "alice@uni.edu");
        assert_eq!(u.role, UserRole::Student);
        assert_eq!(u.email_domain(), Some("uni.edu"));
    }

    #[test]
    fn test_email_domain_requires_both_parts() {
        assert_eq!(email_domain("a@b.edu"), Some("b.edu"));
        assert_eq!(email_domain("@b.edu"), None);
        assert_eq!(email_domain("a@"), None);
        assert_eq!(email_domain("plain"), None);
    }

    #[test]
    fn test_promote_is_one_way() {
        let mut u = user("a@uni.edu");
        assert!(u.promote(UserRole::Admin));
        assert_eq!(u.role, UserRole::Admin);

        assert!(!u.promote(UserRole::Student));
        assert_eq!(u.role, UserRole::Admin);
        assert!(!u.promote(UserRole::Admin));
    }
}
