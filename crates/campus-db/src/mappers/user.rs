//! User and university mappers

use campus_core::entities::{University, User};
use campus_core::{DomainError, Snowflake};

use super::parse_column;
use crate::models::{UniversityModel, UserModel};

impl TryFrom<UserModel> for User {
    type Error = DomainError;

    fn try_from(model: UserModel) -> Result<Self, Self::Error> {
        Ok(User {
            id: Snowflake::new(model.id),
            username: model.username,
            email: model.email,
            role: parse_column("users.role", &model.role)?,
            university_id: model.university_id.map(Snowflake::new),
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

impl From<UniversityModel> for University {
    fn from(model: UniversityModel) -> Self {
        University {
            id: Snowflake::new(model.id),
            name: model.name,
            location: model.location,
            description: model.description,
            created_at: model.created_at,
        }
    }
}
