use chrono::NaiveDateTime;
use diesel::prelude::*;
use uuid::Uuid;

use crate::dto::{
    BoardPayload, BoardUserPayload, BoardUserRolePayload, CommentPayload, CompanyPayload,
    DepartmentPayload, PermissionPayload, RolePayload, RolePermissionPayload, TaskPayload,
    UserDepartmentPayload, UserPayload,
};
use crate::schema::*;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = companies)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Company {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = companies, treat_none_as_null = true)]
pub struct CompanyWrite<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
}

impl<'a> From<&'a CompanyPayload> for CompanyWrite<'a> {
    fn from(payload: &'a CompanyPayload) -> Self {
        Self {
            name: &payload.name,
            description: payload.description.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = departments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Department {
    pub id: Uuid,
    pub company_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
    pub deleted_at: Option<NaiveDateTime>,
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = departments, treat_none_as_null = true)]
pub struct DepartmentWrite<'a> {
    pub company_id: Uuid,
    pub name: &'a str,
    pub description: Option<&'a str>,
}

impl<'a> From<&'a DepartmentPayload> for DepartmentWrite<'a> {
    fn from(payload: &'a DepartmentPayload) -> Self {
        Self {
            company_id: payload.company_id,
            name: &payload.name,
            description: payload.description.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = boards)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Board {
    pub id: Uuid,
    pub department_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
    pub deleted_at: Option<NaiveDateTime>,
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = boards, treat_none_as_null = true)]
pub struct BoardWrite<'a> {
    pub department_id: Uuid,
    pub name: &'a str,
    pub description: Option<&'a str>,
}

impl<'a> From<&'a BoardPayload> for BoardWrite<'a> {
    fn from(payload: &'a BoardPayload) -> Self {
        Self {
            department_id: payload.department_id,
            name: &payload.name,
            description: payload.description.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: Uuid,
    pub display_name: String,
    pub email: String,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
    pub deleted_at: Option<NaiveDateTime>,
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = users, treat_none_as_null = true)]
pub struct UserWrite<'a> {
    pub display_name: &'a str,
    pub email: &'a str,
}

impl<'a> From<&'a UserPayload> for UserWrite<'a> {
    fn from(payload: &'a UserPayload) -> Self {
        Self {
            display_name: &payload.display_name,
            email: &payload.email,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Task {
    pub id: Uuid,
    pub board_id: Uuid,
    pub assignee_id: Option<Uuid>,
    pub title: String,
    pub description: Option<String>,
    pub is_completed: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
    pub deleted_at: Option<NaiveDateTime>,
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = tasks, treat_none_as_null = true)]
pub struct TaskWrite<'a> {
    pub board_id: Uuid,
    pub assignee_id: Option<Uuid>,
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub is_completed: bool,
}

impl<'a> From<&'a TaskPayload> for TaskWrite<'a> {
    fn from(payload: &'a TaskPayload) -> Self {
        Self {
            board_id: payload.board_id,
            assignee_id: payload.assignee_id,
            title: &payload.title,
            description: payload.description.as_deref(),
            is_completed: payload.is_completed,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Comment {
    pub id: Uuid,
    pub task_id: Uuid,
    pub user_id: Uuid,
    pub body: String,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
    pub deleted_at: Option<NaiveDateTime>,
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = comments, treat_none_as_null = true)]
pub struct CommentWrite<'a> {
    pub task_id: Uuid,
    pub user_id: Uuid,
    pub body: &'a str,
}

impl<'a> From<&'a CommentPayload> for CommentWrite<'a> {
    fn from(payload: &'a CommentPayload) -> Self {
        Self {
            task_id: payload.task_id,
            user_id: payload.user_id,
            body: &payload.body,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = roles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Role {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
    pub deleted_at: Option<NaiveDateTime>,
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = roles, treat_none_as_null = true)]
pub struct RoleWrite<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
}

impl<'a> From<&'a RolePayload> for RoleWrite<'a> {
    fn from(payload: &'a RolePayload) -> Self {
        Self {
            name: &payload.name,
            description: payload.description.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = permissions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Permission {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
    pub deleted_at: Option<NaiveDateTime>,
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = permissions, treat_none_as_null = true)]
pub struct PermissionWrite<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
}

impl<'a> From<&'a PermissionPayload> for PermissionWrite<'a> {
    fn from(payload: &'a PermissionPayload) -> Self {
        Self {
            name: &payload.name,
            description: payload.description.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = board_users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BoardUser {
    pub id: Uuid,
    pub board_id: Uuid,
    pub user_id: Uuid,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
    pub deleted_at: Option<NaiveDateTime>,
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = board_users)]
pub struct BoardUserWrite {
    pub board_id: Uuid,
    pub user_id: Uuid,
}

impl From<&BoardUserPayload> for BoardUserWrite {
    fn from(payload: &BoardUserPayload) -> Self {
        Self {
            board_id: payload.board_id,
            user_id: payload.user_id,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = board_user_roles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BoardUserRole {
    pub id: Uuid,
    pub board_id: Uuid,
    pub user_id: Uuid,
    pub role_id: Uuid,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
    pub deleted_at: Option<NaiveDateTime>,
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = board_user_roles)]
pub struct BoardUserRoleWrite {
    pub board_id: Uuid,
    pub user_id: Uuid,
    pub role_id: Uuid,
}

impl From<&BoardUserRolePayload> for BoardUserRoleWrite {
    fn from(payload: &BoardUserRolePayload) -> Self {
        Self {
            board_id: payload.board_id,
            user_id: payload.user_id,
            role_id: payload.role_id,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = role_permissions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RolePermission {
    pub id: Uuid,
    pub role_id: Uuid,
    pub permission_id: Uuid,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
    pub deleted_at: Option<NaiveDateTime>,
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = role_permissions)]
pub struct RolePermissionWrite {
    pub role_id: Uuid,
    pub permission_id: Uuid,
}

impl From<&RolePermissionPayload> for RolePermissionWrite {
    fn from(payload: &RolePermissionPayload) -> Self {
        Self {
            role_id: payload.role_id,
            permission_id: payload.permission_id,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = user_departments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserDepartment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub department_id: Uuid,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
    pub deleted_at: Option<NaiveDateTime>,
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = user_departments)]
pub struct UserDepartmentWrite {
    pub user_id: Uuid,
    pub department_id: Uuid,
}

impl From<&UserDepartmentPayload> for UserDepartmentWrite {
    fn from(payload: &UserDepartmentPayload) -> Self {
        Self {
            user_id: payload.user_id,
            department_id: payload.department_id,
        }
    }
}
