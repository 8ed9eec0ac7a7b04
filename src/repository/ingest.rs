use chrono::Utc;
use diesel::connection::{AnsiTransactionManager, TransactionManager};
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::db::DbConnection;
use crate::domain::category::NewCategory;
use crate::domain::video::NewVideo;
use crate::models::category::NewCategory as DbNewCategory;
use crate::models::video::NewVideo as DbNewVideo;
use crate::repository::errors::RepositoryResult;
use crate::repository::{CatalogWriter, DieselRepository, IngestTransaction};

/// An open SQLite transaction pinned to one pooled connection.
///
/// The transaction has to stay open across upstream fetches, so it is driven
/// through the connection's transaction manager directly instead of the
/// closure-based `Connection::transaction`.
pub struct DieselIngestTransaction {
    conn: DbConnection,
    open: bool,
}

impl DieselIngestTransaction {
    fn connection(&mut self) -> &mut SqliteConnection {
        &mut self.conn
    }

    /// On failure `open` stays set, so `Drop` makes one more rollback attempt.
    fn finish(mut self, commit: bool) -> RepositoryResult<()> {
        let conn = self.connection();
        if commit {
            AnsiTransactionManager::commit_transaction(conn)?;
        } else {
            AnsiTransactionManager::rollback_transaction(conn)?;
        }
        self.open = false;
        Ok(())
    }
}

impl CatalogWriter for DieselRepository {
    type Transaction = DieselIngestTransaction;

    /// Takes the SQLite write lock up front, so a concurrent run waits (or
    /// fails) here instead of on every upsert.
    fn begin_ingest(&self) -> RepositoryResult<DieselIngestTransaction> {
        let mut conn = self.conn()?;
        let sqlite: &mut SqliteConnection = &mut conn;
        AnsiTransactionManager::begin_transaction_sql(sqlite, "BEGIN IMMEDIATE")?;
        Ok(DieselIngestTransaction { conn, open: true })
    }
}

impl IngestTransaction for DieselIngestTransaction {
    fn upsert_category(&mut self, category: &NewCategory) -> RepositoryResult<usize> {
        use crate::schema::vod_class;

        let row = DbNewCategory::from_domain(category, Utc::now().naive_utc());
        let affected = diesel::replace_into(vod_class::table)
            .values(&row)
            .execute(self.connection())?;

        Ok(affected)
    }

    fn upsert_video(&mut self, video: &NewVideo) -> RepositoryResult<usize> {
        use crate::schema::vod_list;

        let row = DbNewVideo::from_domain(video, Utc::now().naive_utc());
        let affected = diesel::replace_into(vod_list::table)
            .values(&row)
            .execute(self.connection())?;

        Ok(affected)
    }

    fn commit(self) -> RepositoryResult<()> {
        self.finish(true)
    }

    fn rollback(self) -> RepositoryResult<()> {
        self.finish(false)
    }
}

impl Drop for DieselIngestTransaction {
    fn drop(&mut self) {
        if !self.open {
            return;
        }
        if let Err(e) = AnsiTransactionManager::rollback_transaction(self.connection()) {
            log::error!("Failed to roll back abandoned ingest transaction: {e}");
        }
    }
}
