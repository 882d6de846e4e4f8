//! Service layer: one generic CRUD service driven by two traits.
//!
//! [`CrudEntity`] maps a persisted row to its transfer object and names the
//! payload and view types; [`EntityStore`] runs the diesel queries for that
//! row. Both are implemented per entity in [`entities`], and the generic
//! [`CrudService`] is the only caller of the store functions.

use diesel::pg::PgConnection;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::QueryResult;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::audit::AuditStamp;
use crate::dto::EntityDto;
use crate::validation::{Validate, ValidationError};

mod crud;
pub mod entities;

pub use crud::CrudService;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteMode {
    /// Remove the row; foreign keys cascade to dependants.
    Hard,
    /// Stamp `deleted_at` and keep the row readable by id.
    Soft,
}

pub trait CrudEntity: Sized + Send + 'static {
    /// Route segment and log label, e.g. `board-user`.
    const RESOURCE: &'static str;

    type Payload: Validate + DeserializeOwned + Clone + Send + Sync + 'static;
    type View: Serialize + From<EntityDto<Self::Payload>> + Send + 'static;

    fn into_dto(self) -> EntityDto<Self::Payload>;
}

pub trait EntityStore: CrudEntity {
    const DELETE_MODE: DeleteMode;

    /// Loads a record by id, including soft-deleted ones.
    fn find(conn: &mut PgConnection, id: Uuid) -> QueryResult<Option<Self>>;

    fn load_active(conn: &mut PgConnection) -> QueryResult<Vec<Self>>;

    fn insert(
        conn: &mut PgConnection,
        payload: &Self::Payload,
        stamp: AuditStamp,
    ) -> QueryResult<Self>;

    /// Replaces the core attributes of an active record. `None` when no
    /// active record has this id.
    fn update(
        conn: &mut PgConnection,
        id: Uuid,
        payload: &Self::Payload,
        stamp: AuditStamp,
    ) -> QueryResult<Option<Self>>;

    /// Returns the number of rows removed or marked deleted.
    fn remove(conn: &mut PgConnection, id: Uuid, stamp: AuditStamp) -> QueryResult<usize>;

    /// Names the first payload field whose parent is missing or soft-deleted.
    /// Parents without a `deleted_at` column are left to the foreign key.
    fn inactive_reference(
        conn: &mut PgConnection,
        payload: &Self::Payload,
    ) -> QueryResult<Option<&'static str>>;
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{resource} {id} not found")]
    NotFound { resource: &'static str, id: Uuid },
    #[error("referenced record does not exist or was deleted ({0})")]
    MissingReference(String),
    #[error("record already exists ({0})")]
    Duplicate(String),
    #[error("constraint violated ({0})")]
    Constraint(String),
    #[error("database error: {0}")]
    Database(DieselError),
    #[error("database pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    #[error("database task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<DieselError> for ServiceError {
    fn from(value: DieselError) -> Self {
        match value {
            DieselError::DatabaseError(kind, info) => {
                let constraint = info
                    .constraint_name()
                    .unwrap_or_else(|| info.message())
                    .to_string();
                match kind {
                    DatabaseErrorKind::ForeignKeyViolation => {
                        ServiceError::MissingReference(constraint)
                    }
                    DatabaseErrorKind::UniqueViolation => ServiceError::Duplicate(constraint),
                    DatabaseErrorKind::CheckViolation | DatabaseErrorKind::NotNullViolation => {
                        ServiceError::Constraint(constraint)
                    }
                    _ => ServiceError::Database(DieselError::DatabaseError(kind, info)),
                }
            }
            other => ServiceError::Database(other),
        }
    }
}
