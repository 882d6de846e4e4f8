//! Transfer objects crossing the service boundary.
//!
//! Each entity has one payload type holding its core attributes. The same
//! payload is the creation body, and wrapped in [`Identified`] it is the
//! full-record update body. Services hand back [`EntityDto`], which adds the
//! identifier and audit fields to the payload.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::validation::{
    optional_id, optional_text, required_id, required_text, Validate, ValidationError,
};

pub const NAME_MAX_LEN: usize = 100;
pub const SHORT_DESCRIPTION_MAX_LEN: usize = 500;
pub const BOARD_DESCRIPTION_MAX_LEN: usize = 1000;
pub const EMAIL_MAX_LEN: usize = 255;
pub const TASK_TITLE_MAX_LEN: usize = 200;
pub const TASK_DESCRIPTION_MAX_LEN: usize = 4000;
pub const COMMENT_BODY_MAX_LEN: usize = 2000;

/// A payload paired with the identifier of the record it replaces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identified<P> {
    pub id: Uuid,
    #[serde(flatten)]
    pub fields: P,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditFields {
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl AuditFields {
    pub fn from_columns(
        created_at: NaiveDateTime,
        updated_at: Option<NaiveDateTime>,
        deleted_at: Option<NaiveDateTime>,
    ) -> Self {
        Self {
            created_at: to_utc(created_at),
            updated_at: updated_at.map(to_utc),
            deleted_at: deleted_at.map(to_utc),
        }
    }
}

fn to_utc(value: NaiveDateTime) -> DateTime<Utc> {
    DateTime::<Utc>::from_naive_utc_and_offset(value, Utc)
}

/// A persisted record as seen by callers of the service layer.
#[derive(Debug, Clone, Serialize)]
pub struct EntityDto<P> {
    pub id: Uuid,
    #[serde(flatten)]
    pub fields: P,
    #[serde(flatten)]
    pub audit: AuditFields,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyPayload {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Validate for CompanyPayload {
    fn validate(&self) -> Result<(), ValidationError> {
        required_text("name", &self.name, NAME_MAX_LEN)?;
        optional_text(
            "description",
            self.description.as_deref(),
            SHORT_DESCRIPTION_MAX_LEN,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentPayload {
    pub company_id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Validate for DepartmentPayload {
    fn validate(&self) -> Result<(), ValidationError> {
        required_id("company_id", self.company_id)?;
        required_text("name", &self.name, NAME_MAX_LEN)?;
        optional_text(
            "description",
            self.description.as_deref(),
            SHORT_DESCRIPTION_MAX_LEN,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardPayload {
    pub department_id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Validate for BoardPayload {
    fn validate(&self) -> Result<(), ValidationError> {
        required_id("department_id", self.department_id)?;
        required_text("name", &self.name, NAME_MAX_LEN)?;
        optional_text(
            "description",
            self.description.as_deref(),
            BOARD_DESCRIPTION_MAX_LEN,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPayload {
    pub display_name: String,
    pub email: String,
}

impl Validate for UserPayload {
    fn validate(&self) -> Result<(), ValidationError> {
        required_text("display_name", &self.display_name, NAME_MAX_LEN)?;
        required_text("email", &self.email, EMAIL_MAX_LEN)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskPayload {
    pub board_id: Uuid,
    #[serde(default)]
    pub assignee_id: Option<Uuid>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_completed: bool,
}

impl Validate for TaskPayload {
    fn validate(&self) -> Result<(), ValidationError> {
        required_id("board_id", self.board_id)?;
        optional_id("assignee_id", self.assignee_id)?;
        required_text("title", &self.title, TASK_TITLE_MAX_LEN)?;
        optional_text(
            "description",
            self.description.as_deref(),
            TASK_DESCRIPTION_MAX_LEN,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentPayload {
    pub task_id: Uuid,
    pub user_id: Uuid,
    pub body: String,
}

impl Validate for CommentPayload {
    fn validate(&self) -> Result<(), ValidationError> {
        required_id("task_id", self.task_id)?;
        required_id("user_id", self.user_id)?;
        required_text("body", &self.body, COMMENT_BODY_MAX_LEN)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RolePayload {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Validate for RolePayload {
    fn validate(&self) -> Result<(), ValidationError> {
        required_text("name", &self.name, NAME_MAX_LEN)?;
        optional_text(
            "description",
            self.description.as_deref(),
            SHORT_DESCRIPTION_MAX_LEN,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PermissionPayload {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Validate for PermissionPayload {
    fn validate(&self) -> Result<(), ValidationError> {
        required_text("name", &self.name, NAME_MAX_LEN)?;
        optional_text(
            "description",
            self.description.as_deref(),
            SHORT_DESCRIPTION_MAX_LEN,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardUserPayload {
    pub board_id: Uuid,
    pub user_id: Uuid,
}

impl Validate for BoardUserPayload {
    fn validate(&self) -> Result<(), ValidationError> {
        required_id("board_id", self.board_id)?;
        required_id("user_id", self.user_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardUserRolePayload {
    pub board_id: Uuid,
    pub user_id: Uuid,
    pub role_id: Uuid,
}

impl Validate for BoardUserRolePayload {
    fn validate(&self) -> Result<(), ValidationError> {
        required_id("board_id", self.board_id)?;
        required_id("user_id", self.user_id)?;
        required_id("role_id", self.role_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RolePermissionPayload {
    pub role_id: Uuid,
    pub permission_id: Uuid,
}

impl Validate for RolePermissionPayload {
    fn validate(&self) -> Result<(), ValidationError> {
        required_id("role_id", self.role_id)?;
        required_id("permission_id", self.permission_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDepartmentPayload {
    pub user_id: Uuid,
    pub department_id: Uuid,
}

impl Validate for UserDepartmentPayload {
    fn validate(&self) -> Result<(), ValidationError> {
        required_id("user_id", self.user_id)?;
        required_id("department_id", self.department_id)
    }
}
