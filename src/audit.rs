use chrono::{NaiveDateTime, Utc};

/// The single timestamp applied to every audit column touched by one write.
///
/// The service takes one stamp per create, update or delete and hands it to
/// the store, which writes it to `created_at`, `updated_at` or `deleted_at`
/// respectively. Nothing else assigns audit columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuditStamp {
    at: NaiveDateTime,
}

impl AuditStamp {
    pub fn now() -> Self {
        Self {
            at: Utc::now().naive_utc(),
        }
    }

    pub fn at(&self) -> NaiveDateTime {
        self.at
    }
}
