//! RSO mappers

use campus_core::entities::{Rso, RsoSummary};
use campus_core::{DomainError, Snowflake};

use super::parse_column;
use crate::models::{RsoModel, RsoWithCountModel};

impl TryFrom<RsoModel> for Rso {
    type Error = DomainError;

    fn try_from(model: RsoModel) -> Result<Self, Self::Error> {
        Ok(Rso {
            id: Snowflake::new(model.id),
            name: model.name,
            status: parse_column("rsos.status", &model.status)?,
            university_id: Snowflake::new(model.university_id),
            admin_id: Snowflake::new(model.admin_id),
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

impl TryFrom<RsoWithCountModel> for RsoSummary {
    type Error = DomainError;

    fn try_from(model: RsoWithCountModel) -> Result<Self, Self::Error> {
        Ok(RsoSummary {
            rso: Rso::try_from(model.rso)?,
            member_count: model.member_count,
        })
    }
}
