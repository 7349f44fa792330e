//! The authenticated actor behind a request

use crate::entities::User;
use crate::value_objects::{Snowflake, UserRole};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: Snowflake,
    pub role: UserRole,
    pub university_id: Option<Snowflake>,
    pub email: String,
}

impl Principal {
    /// Snapshot a freshly loaded user
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id,
            role: user.role,
            university_id: user.university_id,
            email: user.email.clone(),
        }
    }

    #[inline]
    pub fn is_at(&self, university_id: Snowflake) -> bool {
        self.university_id == Some(university_id)
    }
}

impl From<&User> for Principal {
    fn from(user: &User) -> Self {
        Self::from_user(user)
    }
}
