//! Per-entity bindings of the CRUD traits.

use diesel::pg::PgConnection;
use diesel::prelude::*;
use uuid::Uuid;

use super::{CrudEntity, DeleteMode, EntityStore};
use crate::audit::AuditStamp;
use crate::dto::*;
use crate::models::*;
use crate::schema::*;
use crate::views::*;

/// A payload field holding a parent id.
trait ReferenceId {
    fn referenced(&self) -> Option<Uuid>;
}

impl ReferenceId for Uuid {
    fn referenced(&self) -> Option<Uuid> {
        Some(*self)
    }
}

impl ReferenceId for Option<Uuid> {
    fn referenced(&self) -> Option<Uuid> {
        *self
    }
}

/// Implements [`EntityStore`] for a row type whose table has `id`,
/// `created_at` and `updated_at` columns, plus `deleted_at` for soft deletes.
///
/// The soft arm lists `field => table` pairs for parents that can be
/// soft-deleted; writes pointing at an inactive parent are refused.
macro_rules! entity_store {
    ($row:ident, $table:ident, $write:ident, hard) => {
        impl EntityStore for $row {
            const DELETE_MODE: DeleteMode = DeleteMode::Hard;

            fn find(conn: &mut PgConnection, id: Uuid) -> QueryResult<Option<Self>> {
                $table::table
                    .find(id)
                    .select($row::as_select())
                    .first(conn)
                    .optional()
            }

            fn load_active(conn: &mut PgConnection) -> QueryResult<Vec<Self>> {
                $table::table
                    .order($table::created_at.asc())
                    .select($row::as_select())
                    .load(conn)
            }

            fn insert(
                conn: &mut PgConnection,
                payload: &Self::Payload,
                stamp: AuditStamp,
            ) -> QueryResult<Self> {
                let write = $write::from(payload);
                diesel::insert_into($table::table)
                    .values((&write, $table::created_at.eq(stamp.at())))
                    .returning($row::as_returning())
                    .get_result(conn)
            }

            fn update(
                conn: &mut PgConnection,
                id: Uuid,
                payload: &Self::Payload,
                stamp: AuditStamp,
            ) -> QueryResult<Option<Self>> {
                let write = $write::from(payload);
                diesel::update($table::table.find(id))
                    .set((&write, $table::updated_at.eq(stamp.at())))
                    .returning($row::as_returning())
                    .get_result(conn)
                    .optional()
            }

            fn remove(
                conn: &mut PgConnection,
                id: Uuid,
                _stamp: AuditStamp,
            ) -> QueryResult<usize> {
                diesel::delete($table::table.find(id)).execute(conn)
            }

            fn inactive_reference(
                _conn: &mut PgConnection,
                _payload: &Self::Payload,
            ) -> QueryResult<Option<&'static str>> {
                Ok(None)
            }
        }
    };
    ($row:ident, $table:ident, $write:ident, soft $(, $field:ident => $parent:ident)*) => {
        impl EntityStore for $row {
            const DELETE_MODE: DeleteMode = DeleteMode::Soft;

            fn find(conn: &mut PgConnection, id: Uuid) -> QueryResult<Option<Self>> {
                $table::table
                    .find(id)
                    .select($row::as_select())
                    .first(conn)
                    .optional()
            }

            fn load_active(conn: &mut PgConnection) -> QueryResult<Vec<Self>> {
                $table::table
                    .filter($table::deleted_at.is_null())
                    .order($table::created_at.asc())
                    .select($row::as_select())
                    .load(conn)
            }

            fn insert(
                conn: &mut PgConnection,
                payload: &Self::Payload,
                stamp: AuditStamp,
            ) -> QueryResult<Self> {
                let write = $write::from(payload);
                diesel::insert_into($table::table)
                    .values((&write, $table::created_at.eq(stamp.at())))
                    .returning($row::as_returning())
                    .get_result(conn)
            }

            fn update(
                conn: &mut PgConnection,
                id: Uuid,
                payload: &Self::Payload,
                stamp: AuditStamp,
            ) -> QueryResult<Option<Self>> {
                let write = $write::from(payload);
                diesel::update(
                    $table::table
                        .filter($table::id.eq(id))
                        .filter($table::deleted_at.is_null()),
                )
                .set((&write, $table::updated_at.eq(stamp.at())))
                .returning($row::as_returning())
                .get_result(conn)
                .optional()
            }

            fn remove(
                conn: &mut PgConnection,
                id: Uuid,
                stamp: AuditStamp,
            ) -> QueryResult<usize> {
                diesel::update(
                    $table::table
                        .filter($table::id.eq(id))
                        .filter($table::deleted_at.is_null()),
                )
                .set($table::deleted_at.eq(stamp.at()))
                .execute(conn)
            }

            #[allow(unused_variables)]
            fn inactive_reference(
                conn: &mut PgConnection,
                payload: &Self::Payload,
            ) -> QueryResult<Option<&'static str>> {
                $(
                    if let Some(parent_id) = ReferenceId::referenced(&payload.$field) {
                        let active: bool = diesel::select(diesel::dsl::exists(
                            $parent::table
                                .filter($parent::id.eq(parent_id))
                                .filter($parent::deleted_at.is_null()),
                        ))
                        .get_result(conn)?;
                        if !active {
                            return Ok(Some(stringify!($field)));
                        }
                    }
                )*
                Ok(None)
            }
        }
    };
}

impl CrudEntity for Company {
    const RESOURCE: &'static str = "company";
    type Payload = CompanyPayload;
    type View = CompanyView;

    fn into_dto(self) -> EntityDto<CompanyPayload> {
        EntityDto {
            id: self.id,
            fields: CompanyPayload {
                name: self.name,
                description: self.description,
            },
            audit: AuditFields::from_columns(self.created_at, self.updated_at, None),
        }
    }
}

entity_store!(Company, companies, CompanyWrite, hard);

impl CrudEntity for Department {
    const RESOURCE: &'static str = "department";
    type Payload = DepartmentPayload;
    type View = DepartmentView;

    fn into_dto(self) -> EntityDto<DepartmentPayload> {
        EntityDto {
            id: self.id,
            fields: DepartmentPayload {
                company_id: self.company_id,
                name: self.name,
                description: self.description,
            },
            audit: AuditFields::from_columns(self.created_at, self.updated_at, self.deleted_at),
        }
    }
}

entity_store!(Department, departments, DepartmentWrite, soft);

impl CrudEntity for Board {
    const RESOURCE: &'static str = "board";
    type Payload = BoardPayload;
    type View = BoardView;

    fn into_dto(self) -> EntityDto<BoardPayload> {
        EntityDto {
            id: self.id,
            fields: BoardPayload {
                department_id: self.department_id,
                name: self.name,
                description: self.description,
            },
            audit: AuditFields::from_columns(self.created_at, self.updated_at, self.deleted_at),
        }
    }
}

entity_store!(Board, boards, BoardWrite, soft, department_id => departments);

impl CrudEntity for User {
    const RESOURCE: &'static str = "user";
    type Payload = UserPayload;
    type View = UserView;

    fn into_dto(self) -> EntityDto<UserPayload> {
        EntityDto {
            id: self.id,
            fields: UserPayload {
                display_name: self.display_name,
                email: self.email,
            },
            audit: AuditFields::from_columns(self.created_at, self.updated_at, self.deleted_at),
        }
    }
}

entity_store!(User, users, UserWrite, soft);

impl CrudEntity for Task {
    const RESOURCE: &'static str = "task";
    type Payload = TaskPayload;
    type View = TaskView;

    fn into_dto(self) -> EntityDto<TaskPayload> {
        EntityDto {
            id: self.id,
            fields: TaskPayload {
                board_id: self.board_id,
                assignee_id: self.assignee_id,
                title: self.title,
                description: self.description,
                is_completed: self.is_completed,
            },
            audit: AuditFields::from_columns(self.created_at, self.updated_at, self.deleted_at),
        }
    }
}

entity_store!(Task, tasks, TaskWrite, soft, board_id => boards, assignee_id => users);

impl CrudEntity for Comment {
    const RESOURCE: &'static str = "comment";
    type Payload = CommentPayload;
    type View = CommentView;

    fn into_dto(self) -> EntityDto<CommentPayload> {
        EntityDto {
            id: self.id,
            fields: CommentPayload {
                task_id: self.task_id,
                user_id: self.user_id,
                body: self.body,
            },
            audit: AuditFields::from_columns(self.created_at, self.updated_at, self.deleted_at),
        }
    }
}

entity_store!(Comment, comments, CommentWrite, soft, task_id => tasks, user_id => users);

impl CrudEntity for Role {
    const RESOURCE: &'static str = "role";
    type Payload = RolePayload;
    type View = RoleView;

    fn into_dto(self) -> EntityDto<RolePayload> {
        EntityDto {
            id: self.id,
            fields: RolePayload {
                name: self.name,
                description: self.description,
            },
            audit: AuditFields::from_columns(self.created_at, self.updated_at, self.deleted_at),
        }
    }
}

entity_store!(Role, roles, RoleWrite, soft);

impl CrudEntity for Permission {
    const RESOURCE: &'static str = "permission";
    type Payload = PermissionPayload;
    type View = PermissionView;

    fn into_dto(self) -> EntityDto<PermissionPayload> {
        EntityDto {
            id: self.id,
            fields: PermissionPayload {
                name: self.name,
                description: self.description,
            },
            audit: AuditFields::from_columns(self.created_at, self.updated_at, self.deleted_at),
        }
    }
}

entity_store!(Permission, permissions, PermissionWrite, soft);

impl CrudEntity for BoardUser {
    const RESOURCE: &'static str = "board-user";
    type Payload = BoardUserPayload;
    type View = BoardUserView;

    fn into_dto(self) -> EntityDto<BoardUserPayload> {
        EntityDto {
            id: self.id,
            fields: BoardUserPayload {
                board_id: self.board_id,
                user_id: self.user_id,
            },
            audit: AuditFields::from_columns(self.created_at, self.updated_at, self.deleted_at),
        }
    }
}

entity_store!(BoardUser, board_users, BoardUserWrite, soft, board_id => boards, user_id => users);

impl CrudEntity for BoardUserRole {
    const RESOURCE: &'static str = "board-user-role";
    type Payload = BoardUserRolePayload;
    type View = BoardUserRoleView;

    fn into_dto(self) -> EntityDto<BoardUserRolePayload> {
        EntityDto {
            id: self.id,
            fields: BoardUserRolePayload {
                board_id: self.board_id,
                user_id: self.user_id,
                role_id: self.role_id,
            },
            audit: AuditFields::from_columns(self.created_at, self.updated_at, self.deleted_at),
        }
    }
}

entity_store!(
    BoardUserRole,
    board_user_roles,
    BoardUserRoleWrite,
    soft,
    board_id => boards,
    user_id => users,
    role_id => roles
);

impl CrudEntity for RolePermission {
    const RESOURCE: &'static str = "role-permission";
    type Payload = RolePermissionPayload;
    type View = RolePermissionView;

    fn into_dto(self) -> EntityDto<RolePermissionPayload> {
        EntityDto {
            id: self.id,
            fields: RolePermissionPayload {
                role_id: self.role_id,
                permission_id: self.permission_id,
            },
            audit: AuditFields::from_columns(self.created_at, self.updated_at, self.deleted_at),
        }
    }
}

entity_store!(
    RolePermission,
    role_permissions,
    RolePermissionWrite,
    soft,
    role_id => roles,
    permission_id => permissions
);

impl CrudEntity for UserDepartment {
    const RESOURCE: &'static str = "user-department";
    type Payload = UserDepartmentPayload;
    type View = UserDepartmentView;

    fn into_dto(self) -> EntityDto<UserDepartmentPayload> {
        EntityDto {
            id: self.id,
            fields: UserDepartmentPayload {
                user_id: self.user_id,
                department_id: self.department_id,
            },
            audit: AuditFields::from_columns(self.created_at, self.updated_at, self.deleted_at),
        }
    }
}

entity_store!(
    UserDepartment,
    user_departments,
    UserDepartmentWrite,
    soft,
    user_id => users,
    department_id => departments
);

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn at(raw: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[test]
    fn company_is_hard_deleted_and_others_soft() {
        assert_eq!(Company::DELETE_MODE, DeleteMode::Hard);
        assert_eq!(Board::DELETE_MODE, DeleteMode::Soft);
        assert_eq!(User::DELETE_MODE, DeleteMode::Soft);
        assert_eq!(RolePermission::DELETE_MODE, DeleteMode::Soft);
    }

    #[test]
    fn board_row_maps_to_dto() {
        let id = Uuid::new_v4();
        let department_id = Uuid::new_v4();
        let dto = Board {
            id,
            department_id,
            name: "Roadmap".into(),
            description: None,
            created_at: at("2024-05-02 09:00:00"),
            updated_at: None,
            deleted_at: Some(at("2024-05-03 10:30:00")),
        }
        .into_dto();

        assert_eq!(dto.id, id);
        assert_eq!(dto.fields.department_id, department_id);
        assert_eq!(dto.fields.name, "Roadmap");
        assert!(dto.audit.deleted_at.is_some());
        assert_eq!(
            dto.audit.deleted_at.map(|ts| ts.to_rfc3339()),
            Some("2024-05-03T10:30:00+00:00".to_string())
        );
    }

    #[test]
    fn optional_references_are_skipped_when_absent() {
        let id = Uuid::new_v4();
        assert_eq!(id.referenced(), Some(id));
        assert_eq!(Some(id).referenced(), Some(id));
        assert_eq!(None::<Uuid>.referenced(), None);
    }

    #[test]
    fn resources_are_unique() {
        let mut resources = vec![
            Company::RESOURCE,
            Department::RESOURCE,
            Board::RESOURCE,
            User::RESOURCE,
            Task::RESOURCE,
            Comment::RESOURCE,
            Role::RESOURCE,
            Permission::RESOURCE,
            BoardUser::RESOURCE,
            BoardUserRole::RESOURCE,
            RolePermission::RESOURCE,
            UserDepartment::RESOURCE,
        ];
        let total = resources.len();
        resources.sort_unstable();
        resources.dedup();
        assert_eq!(resources.len(), total);
    }
}
