//! A migrated, throwaway database plus the runtime and pool to drive it.
//!
//! Suites call [`provision`] from a fixture and skip when it yields `None`.
//! Set `REQUIRE_TEST_CLUSTER=1` (as CI does) to turn an unavailable cluster
//! into a failure instead of a skip.

use campgrounds::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use pg_embedded_setup_unpriv::{TemporaryDatabase, TestCluster};
use tokio::runtime::Runtime;
use uuid::Uuid;

use crate::pg_embed::test_cluster;

pub struct TestDatabase {
    pub runtime: Runtime,
    pub pool: DbPool,
    // Dropped before the cluster that hosts it.
    _database: TemporaryDatabase,
    _cluster: TestCluster,
}

fn require_test_cluster() -> bool {
    std::env::var("REQUIRE_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

fn setup() -> Result<TestDatabase, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = test_cluster()?;
    let name = format!("campgrounds_{}", Uuid::new_v4().simple());
    let database = cluster
        .temporary_database(name.as_str())
        .map_err(|err| format!("create database: {err:?}"))?;

    let url = database.url().to_owned();
    let pool = runtime.block_on(async {
        run_pending_migrations(&url)
            .await
            .map_err(|err| err.to_string())?;
        DbPool::new(PoolConfig::new(url).with_max_size(2))
            .await
            .map_err(|err| err.to_string())
    })?;

    Ok(TestDatabase {
        runtime,
        pool,
        _database: database,
        _cluster: cluster,
    })
}

/// Provision a fresh database, or `None` when no cluster can be started.
pub fn provision(suite: &str) -> Option<TestDatabase> {
    match setup() {
        Ok(database) => Some(database),
        Err(reason) if require_test_cluster() => {
            panic!("Test cluster setup failed for {suite}: {reason}")
        }
        Err(reason) => {
            eprintln!("SKIP-TEST-CLUSTER: {suite}: {reason}");
            None
        }
    }
}
