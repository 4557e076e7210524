#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use diesel::sqlite::SqliteConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use roster_search::db::{ConnectionOptions, DbPool, establish_connection_pool};
use roster_search::domain::member::MemberTeamRow;
use roster_search::repository::errors::RepositoryResult;
use roster_search::repository::plan::QueryPlan;
use roster_search::repository::{DieselRepository, MemberSearchReader};
use tempfile::TempDir;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

/// Migrated SQLite database living in a temporary directory.
pub struct TestDb {
    _dir: TempDir,
    pool: DbPool,
}

impl TestDb {
    pub fn new(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join(name);
        let url = path.to_str().expect("temp path is not utf-8").to_string();
        let options = ConnectionOptions {
            pool_size: 4,
            ..ConnectionOptions::default()
        };
        let pool = establish_connection_pool(&url, options).expect("failed to create pool");

        let mut pooled = pool.get().expect("failed to get connection");
        let conn: &mut SqliteConnection = &mut pooled;
        conn.run_pending_migrations(MIGRATIONS)
            .expect("failed to run migrations");
        drop(pooled);

        Self { _dir: dir, pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    pub fn repo(&self) -> DieselRepository {
        DieselRepository::new(self.pool.clone())
    }
}

/// Wraps the Diesel repository and records how many queries of each kind ran.
pub struct CountingRepository {
    inner: DieselRepository,
    fetches: AtomicUsize,
    counts: AtomicUsize,
}

impl CountingRepository {
    pub fn new(inner: DieselRepository) -> Self {
        Self {
            inner,
            fetches: AtomicUsize::new(0),
            counts: AtomicUsize::new(0),
        }
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn count_calls(&self) -> usize {
        self.counts.load(Ordering::SeqCst)
    }
}

impl MemberSearchReader for CountingRepository {
    fn fetch_member_rows(&self, plan: &QueryPlan) -> RepositoryResult<Vec<MemberTeamRow>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch_member_rows(plan)
    }

    fn count_member_rows(&self, plan: &QueryPlan) -> RepositoryResult<u64> {
        self.counts.fetch_add(1, Ordering::SeqCst);
        self.inner.count_member_rows(plan)
    }
}
