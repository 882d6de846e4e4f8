//! Response bodies for the HTTP layer. Audit timestamps stay behind the
//! service boundary.

use serde::Serialize;
use uuid::Uuid;

use crate::dto::{
    BoardPayload, BoardUserPayload, BoardUserRolePayload, CommentPayload, CompanyPayload,
    DepartmentPayload, EntityDto, PermissionPayload, RolePayload, RolePermissionPayload,
    TaskPayload, UserDepartmentPayload, UserPayload,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyView {
    pub id: Uuid,
    pub name: String,
}

impl From<EntityDto<CompanyPayload>> for CompanyView {
    fn from(dto: EntityDto<CompanyPayload>) -> Self {
        Self {
            id: dto.id,
            name: dto.fields.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentView {
    pub id: Uuid,
    pub company_id: Uuid,
    pub name: String,
}

impl From<EntityDto<DepartmentPayload>> for DepartmentView {
    fn from(dto: EntityDto<DepartmentPayload>) -> Self {
        Self {
            id: dto.id,
            company_id: dto.fields.company_id,
            name: dto.fields.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardView {
    pub id: Uuid,
    pub department_id: Uuid,
    pub name: String,
    pub description: Option<String>,
}

impl From<EntityDto<BoardPayload>> for BoardView {
    fn from(dto: EntityDto<BoardPayload>) -> Self {
        Self {
            id: dto.id,
            department_id: dto.fields.department_id,
            name: dto.fields.name,
            description: dto.fields.description,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserView {
    pub id: Uuid,
    pub display_name: String,
    pub email: String,
}

impl From<EntityDto<UserPayload>> for UserView {
    fn from(dto: EntityDto<UserPayload>) -> Self {
        Self {
            id: dto.id,
            display_name: dto.fields.display_name,
            email: dto.fields.email,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskView {
    pub id: Uuid,
    pub board_id: Uuid,
    pub assignee_id: Option<Uuid>,
    pub title: String,
    pub is_completed: bool,
}

impl From<EntityDto<TaskPayload>> for TaskView {
    fn from(dto: EntityDto<TaskPayload>) -> Self {
        Self {
            id: dto.id,
            board_id: dto.fields.board_id,
            assignee_id: dto.fields.assignee_id,
            title: dto.fields.title,
            is_completed: dto.fields.is_completed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommentView {
    pub id: Uuid,
    pub task_id: Uuid,
    pub user_id: Uuid,
    pub body: String,
}

impl From<EntityDto<CommentPayload>> for CommentView {
    fn from(dto: EntityDto<CommentPayload>) -> Self {
        Self {
            id: dto.id,
            task_id: dto.fields.task_id,
            user_id: dto.fields.user_id,
            body: dto.fields.body,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoleView {
    pub id: Uuid,
    pub name: String,
}

impl From<EntityDto<RolePayload>> for RoleView {
    fn from(dto: EntityDto<RolePayload>) -> Self {
        Self {
            id: dto.id,
            name: dto.fields.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PermissionView {
    pub id: Uuid,
    pub name: String,
}

impl From<EntityDto<PermissionPayload>> for PermissionView {
    fn from(dto: EntityDto<PermissionPayload>) -> Self {
        Self {
            id: dto.id,
            name: dto.fields.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardUserView {
    pub id: Uuid,
    pub board_id: Uuid,
    pub user_id: Uuid,
}

impl From<EntityDto<BoardUserPayload>> for BoardUserView {
    fn from(dto: EntityDto<BoardUserPayload>) -> Self {
        Self {
            id: dto.id,
            board_id: dto.fields.board_id,
            user_id: dto.fields.user_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardUserRoleView {
    pub id: Uuid,
    pub board_id: Uuid,
    pub user_id: Uuid,
    pub role_id: Uuid,
}

impl From<EntityDto<BoardUserRolePayload>> for BoardUserRoleView {
    fn from(dto: EntityDto<BoardUserRolePayload>) -> Self {
        Self {
            id: dto.id,
            board_id: dto.fields.board_id,
            user_id: dto.fields.user_id,
            role_id: dto.fields.role_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RolePermissionView {
    pub id: Uuid,
    pub role_id: Uuid,
    pub permission_id: Uuid,
}

impl From<EntityDto<RolePermissionPayload>> for RolePermissionView {
    fn from(dto: EntityDto<RolePermissionPayload>) -> Self {
        Self {
            id: dto.id,
            role_id: dto.fields.role_id,
            permission_id: dto.fields.permission_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserDepartmentView {
    pub id: Uuid,
    pub user_id: Uuid,
    pub department_id: Uuid,
}

impl From<EntityDto<UserDepartmentPayload>> for UserDepartmentView {
    fn from(dto: EntityDto<UserDepartmentPayload>) -> Self {
        Self {
            id: dto.id,
            user_id: dto.fields.user_id,
            department_id: dto.fields.department_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::AuditFields;
    use chrono::NaiveDateTime;

    fn audit() -> AuditFields {
        let created = NaiveDateTime::parse_from_str("2024-05-02 09:00:00", "%Y-%m-%d %H:%M:%S")
            .unwrap();
        AuditFields::from_columns(created, Some(created), None)
    }

    #[test]
    fn company_view_keeps_only_id_and_name() {
        let id = Uuid::new_v4();
        let view = CompanyView::from(EntityDto {
            id,
            fields: CompanyPayload {
                name: "Acme".into(),
                description: Some("anvils".into()),
            },
            audit: audit(),
        });

        let value = serde_json::to_value(&view).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 2);
        assert_eq!(value["id"], id.to_string());
        assert_eq!(value["name"], "Acme");
    }

    #[test]
    fn task_view_drops_description_and_audit() {
        let view = TaskView::from(EntityDto {
            id: Uuid::new_v4(),
            fields: TaskPayload {
                board_id: Uuid::new_v4(),
                assignee_id: None,
                title: "Ship it".into(),
                description: Some("long text".into()),
                is_completed: true,
            },
            audit: audit(),
        });

        let value = serde_json::to_value(&view).unwrap();
        assert!(value.get("description").is_none());
        assert!(value.get("created_at").is_none());
        assert_eq!(value["is_completed"], true);
    }
}
