use std::marker::PhantomData;

use diesel::pg::PgConnection;
use diesel::Connection;
use tokio::task;
use tracing::{debug, info};
use uuid::Uuid;

use super::{CrudEntity, DeleteMode, EntityStore, ServiceError, ServiceResult};
use crate::audit::AuditStamp;
use crate::db::PgPool;
use crate::dto::{EntityDto, Identified};
use crate::validation::Validate;

/// Create/read/update/delete for one entity type.
///
/// Every call checks out its own pooled connection on the blocking pool.
pub struct CrudService<E> {
    pool: PgPool,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for CrudService<E> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E: EntityStore> CrudService<E> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _entity: PhantomData,
        }
    }

    pub async fn get_by_id(&self, id: Uuid) -> ServiceResult<Option<EntityDto<E::Payload>>> {
        let row = self.run(move |conn| Ok(E::find(conn, id)?)).await?;
        if row.is_none() {
            debug!(resource = E::RESOURCE, %id, "record not found");
        }
        Ok(row.map(CrudEntity::into_dto))
    }

    pub async fn list_active(&self) -> ServiceResult<Vec<EntityDto<E::Payload>>> {
        let rows = self.run(|conn| Ok(E::load_active(conn)?)).await?;
        Ok(rows.into_iter().map(CrudEntity::into_dto).collect())
    }

    pub async fn create(&self, payload: E::Payload) -> ServiceResult<EntityDto<E::Payload>> {
        payload.validate()?;

        let stamp = AuditStamp::now();
        let row = self
            .run(move |conn| {
                conn.transaction::<_, ServiceError, _>(|conn| {
                    ensure_references_active::<E>(conn, &payload)?;
                    Ok(E::insert(conn, &payload, stamp)?)
                })
            })
            .await?;
        let dto = row.into_dto();
        info!(resource = E::RESOURCE, id = %dto.id, "record created");
        Ok(dto)
    }

    pub async fn update(
        &self,
        record: Identified<E::Payload>,
    ) -> ServiceResult<EntityDto<E::Payload>> {
        record.fields.validate()?;

        let Identified { id, fields } = record;
        let stamp = AuditStamp::now();
        let updated = self
            .run(move |conn| {
                conn.transaction::<_, ServiceError, _>(|conn| {
                    ensure_references_active::<E>(conn, &fields)?;
                    Ok(E::update(conn, id, &fields, stamp)?)
                })
            })
            .await?;

        match updated {
            Some(row) => {
                info!(resource = E::RESOURCE, %id, "record updated");
                Ok(row.into_dto())
            }
            None => Err(ServiceError::NotFound {
                resource: E::RESOURCE,
                id,
            }),
        }
    }

    /// Deleting a missing or already deleted record is a no-op.
    pub async fn delete(&self, id: Uuid) -> ServiceResult<()> {
        let stamp = AuditStamp::now();
        let affected = self
            .run(move |conn| Ok(E::remove(conn, id, stamp)?))
            .await?;

        if affected == 0 {
            debug!(resource = E::RESOURCE, %id, "delete matched no active record");
        } else {
            let soft = E::DELETE_MODE == DeleteMode::Soft;
            info!(resource = E::RESOURCE, %id, soft, "record deleted");
        }
        Ok(())
    }

    async fn run<T, F>(&self, operation: F) -> ServiceResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ServiceResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        task::spawn_blocking(move || -> ServiceResult<T> {
            let mut conn = pool.get()?;
            operation(&mut conn)
        })
        .await?
    }
}

fn ensure_references_active<E: EntityStore>(
    conn: &mut PgConnection,
    payload: &E::Payload,
) -> ServiceResult<()> {
    match E::inactive_reference(conn, payload)? {
        Some(field) => {
            debug!(resource = E::RESOURCE, field, "write references an inactive record");
            Err(ServiceError::MissingReference(field.to_string()))
        }
        None => Ok(()),
    }
}
