//! # campus-db
//!
//! PostgreSQL implementations of the `campus-core` repository traits.
//!
//! - Connection pool, readiness ping and migrations
//! - Row models with SQLx `FromRow` derives
//! - Row to entity mappers
//! - Repository implementations, including the transactional RSO founding
//!
//! ```rust,ignore
//! use campus_db::{create_pool, run_migrations, PgUserRepository};
//!
//! let pool = create_pool(&config.database).await?;
//! run_migrations(&pool).await?;
//! let users = PgUserRepository::new(pool.clone());
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

pub use pool::{create_pool, ping, run_migrations, PgPool};
pub use repositories::{
    PgCommentRepository, PgEventRepository, PgRatingRepository, PgRsoRepository,
    PgUniversityRepository, PgUserRepository,
};
