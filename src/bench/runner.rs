//! Benchmark runner for the data-manipulation operations
//!
//! Each measurement acquires its own connection(s) from the provider,
//! times the statements with a monotonic clock and releases everything
//! before returning. Update and delete fan out over a [`TaskGroup`], one
//! connection per chunk task.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use log::{debug, info, warn};
use rusqlite::{params, TransactionBehavior};

use crate::bench::config::RunnerConfig;
use crate::core::chunk::{batch_ranges, chunk_ids, Chunk};
use crate::core::errors::{BenchError, Result};
use crate::core::measurement::{IndexLabel, Measurement};
use crate::core::provider::ConnectionProvider;
use crate::core::task_group::{PoolReport, TaskGroup};
use crate::core::timing::round_duration;

const SELECT_ITEMS: &str = "SELECT id, name, description, price FROM items LIMIT ?1";
const INSERT_ITEM: &str = "INSERT INTO items (name, description, price) VALUES (?1, ?2, ?3)";
const UPDATE_PRICE: &str = "UPDATE items SET price = price + 10 WHERE id = ?1";
const DELETE_ITEM: &str = "DELETE FROM items WHERE id = ?1";

/// A synthetic row written by the insert benchmark
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRecord {
    pub name: String,
    pub description: String,
    pub price: i64,
}

impl ItemRecord {
    /// The `index`-th generated record
    pub fn synthetic(index: usize) -> Self {
        ItemRecord {
            name: "Item".to_string(),
            description: format!("Description for Item {}", index),
            price: 100,
        }
    }
}

/// Statement run once per identifier of a chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkedOp {
    Update,
    Delete,
}

impl ChunkedOp {
    fn sql(&self) -> &'static str {
        match self {
            ChunkedOp::Update => UPDATE_PRICE,
            ChunkedOp::Delete => DELETE_ITEM,
        }
    }
}

impl fmt::Display for ChunkedOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChunkedOp::Update => write!(f, "UPDATE"),
            ChunkedOp::Delete => write!(f, "DELETE"),
        }
    }
}

/// Timing of a chunked operation together with what the pool did
#[derive(Debug, Clone)]
pub struct ChunkedOutcome {
    /// Rounded wall-clock time from first submission to drain
    pub elapsed: f64,
    pub report: PoolReport<Chunk>,
}

/// Runs and times read/insert/update/delete against a provider's store
pub struct BenchmarkRunner<P: ConnectionProvider + 'static> {
    provider: Arc<P>,
    config: RunnerConfig,
    pool: TaskGroup,
}

impl<P: ConnectionProvider + 'static> BenchmarkRunner<P> {
    /// Create a runner; the provider is used for every connection it opens
    pub fn new(provider: P, config: RunnerConfig) -> Result<Self> {
        config.validate()?;
        let pool = TaskGroup::new(config.workers)?;

        Ok(BenchmarkRunner {
            provider: Arc::new(provider),
            config,
            pool,
        })
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Time a bounded SELECT, reading every returned row
    pub fn measure_read(&self) -> Result<f64> {
        info!("Running SELECT query (limit {})...", self.config.select_limit);
        let conn = self.provider.connect()?;

        let start = Instant::now();
        let mut stmt = conn.prepare(SELECT_ITEMS)?;
        let mut rows = stmt.query([self.config.select_limit as i64])?;
        let mut fetched = 0usize;
        while rows.next()?.is_some() {
            fetched += 1;
        }
        let elapsed = start.elapsed();

        debug!("SELECT returned {} rows in {:?}", fetched, elapsed);
        Ok(round_duration(elapsed, self.config.unit))
    }

    /// Time inserting `count` synthetic records, one transaction per batch
    ///
    /// A failing batch aborts the whole operation; batches committed before
    /// it stay in the table.
    pub fn measure_insert(&self, count: usize) -> Result<f64> {
        let records: Vec<ItemRecord> = (0..count).map(ItemRecord::synthetic).collect();
        let batches = batch_ranges(count, self.config.batch_size)?;

        info!("Running INSERT query for {} records in {} batches...", count, batches.len());
        let mut conn = self.provider.connect()?;

        let start = Instant::now();
        for batch in batches {
            let tx = conn.transaction()?;
            {
                let mut stmt = tx.prepare_cached(INSERT_ITEM)?;
                for record in &records[batch] {
                    stmt.execute(params![record.name, record.description, record.price])?;
                }
            }
            tx.commit()?;
        }
        let elapsed = start.elapsed();

        debug!("INSERT of {} records took {:?}", count, elapsed);
        Ok(round_duration(elapsed, self.config.unit))
    }

    /// Time raising the price of records `1..=count`
    pub fn measure_update(&self, count: usize) -> Result<f64> {
        Ok(self.run_chunked(ChunkedOp::Update, count)?.elapsed)
    }

    /// Time deleting records `1..=count`
    pub fn measure_delete(&self, count: usize) -> Result<f64> {
        Ok(self.run_chunked(ChunkedOp::Delete, count)?.elapsed)
    }

    /// Fan `op` out over chunks of `1..=count` and wait for the pool to drain
    ///
    /// Chunk failures are logged; with `strict` set they turn into
    /// [`BenchError::ChunkFailures`] once every chunk has finished.
    pub fn run_chunked(&self, op: ChunkedOp, count: usize) -> Result<ChunkedOutcome> {
        let chunks = chunk_ids(count, self.config.chunk_size)?;
        info!("Running {} query for {} records in {} chunks...", op, count, chunks.len());

        let provider = Arc::clone(&self.provider);
        let sql = op.sql();

        let start = Instant::now();
        let report = self.pool.run(chunks, move |chunk| apply_chunk(&*provider, sql, chunk))?;
        let elapsed = start.elapsed();

        self.check_report(op, &report)?;

        Ok(ChunkedOutcome {
            elapsed: round_duration(elapsed, self.config.unit),
            report,
        })
    }

    fn check_report(&self, op: ChunkedOp, report: &PoolReport<Chunk>) -> Result<()> {
        if report.is_clean() {
            return Ok(());
        }

        for failure in &report.failures {
            warn!("{} chunk #{} {} failed: {}", op, failure.index, failure.item, failure.message);
        }

        if self.config.strict {
            return Err(BenchError::ChunkFailures {
                operation: op.to_string(),
                failed: report.failures.len(),
                total: report.dispatched,
            });
        }

        warn!("{}: {} of {} chunks failed, timing kept", op, report.failures.len(), report.dispatched);
        Ok(())
    }

    /// Run read, insert, update and delete for `count` records
    pub fn measure_suite(&self, count: usize, label: IndexLabel) -> Result<Measurement> {
        info!("{} ({} records)", label, count);

        let select_time = self.measure_read()?;
        let insert_time = self.measure_insert(count)?;
        let update_time = self.measure_update(count)?;
        let delete_time = self.measure_delete(count)?;

        Ok(Measurement {
            record_count: count,
            select_time,
            insert_time,
            update_time,
            delete_time,
            label,
        })
    }
}

/// Body of one chunk task: own connection, one prepared statement, one commit
fn apply_chunk<P: ConnectionProvider + ?Sized>(provider: &P, sql: &str, chunk: &Chunk) -> Result<()> {
    let mut conn = provider.connect()?;
    // Take the write lock up front so concurrent chunks queue on the busy timeout.
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    {
        let mut stmt = tx.prepare(sql)?;
        for id in chunk.ids() {
            stmt.execute([id])?;
        }
    }
    tx.commit()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::SqliteProvider;
    use rusqlite::Connection;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::{tempdir, TempDir};

    fn setup(config: RunnerConfig) -> (TempDir, BenchmarkRunner<SqliteProvider>) {
        let dir = tempdir().unwrap();
        let provider = SqliteProvider::new(dir.path().join("bench.sqlite"));
        provider.ensure_schema().unwrap();
        let runner = BenchmarkRunner::new(provider, config).unwrap();
        (dir, runner)
    }

    fn small_config() -> RunnerConfig {
        RunnerConfig {
            batch_size: 4,
            chunk_size: 3,
            workers: 2,
            ..RunnerConfig::default()
        }
    }

    fn count_items(runner: &BenchmarkRunner<SqliteProvider>) -> i64 {
        runner
            .provider()
            .connect()
            .unwrap()
            .query_row("SELECT COUNT(*) FROM items", [], |row| row.get(0))
            .unwrap()
    }

    fn price_sum(runner: &BenchmarkRunner<SqliteProvider>) -> i64 {
        runner
            .provider()
            .connect()
            .unwrap()
            .query_row("SELECT COALESCE(SUM(price), 0) FROM items", [], |row| row.get(0))
            .unwrap()
    }

    /// Provider whose every connection attempt after the first `allowed` fails
    struct FlakyProvider {
        inner: SqliteProvider,
        allowed: usize,
        calls: AtomicUsize,
    }

    impl ConnectionProvider for FlakyProvider {
        fn connect(&self) -> Result<Connection> {
            if self.calls.fetch_add(1, Ordering::SeqCst) >= self.allowed {
                return Err(BenchError::Runtime("connection refused".to_string()));
            }
            self.inner.connect()
        }
    }

    fn flaky(dir: &TempDir, allowed: usize) -> FlakyProvider {
        let inner = SqliteProvider::new(dir.path().join("bench.sqlite"));
        inner.ensure_schema().unwrap();
        FlakyProvider { inner, allowed, calls: AtomicUsize::new(0) }
    }

    #[test]
    fn test_synthetic_record() {
        let record = ItemRecord::synthetic(7);
        assert_eq!(record.name, "Item");
        assert_eq!(record.description, "Description for Item 7");
        assert_eq!(record.price, 100);
    }

    #[test]
    fn test_insert_writes_every_record() {
        let (_dir, runner) = setup(small_config());

        let elapsed = runner.measure_insert(10).unwrap();
        assert!(elapsed >= 0.0);
        assert_eq!(count_items(&runner), 10);
        assert_eq!(price_sum(&runner), 1000);
    }

    #[test]
    fn test_read_on_empty_and_filled_table() {
        let (_dir, runner) = setup(small_config());
        assert!(runner.measure_read().unwrap() >= 0.0);

        runner.measure_insert(5).unwrap();
        assert!(runner.measure_read().unwrap() >= 0.0);
    }

    #[test]
    fn test_update_touches_each_id_once() {
        let (_dir, runner) = setup(small_config());
        runner.measure_insert(10).unwrap();

        let outcome = runner.run_chunked(ChunkedOp::Update, 10).unwrap();
        assert_eq!(outcome.report.dispatched, 4);
        assert!(outcome.report.is_clean());
        assert_eq!(price_sum(&runner), 10 * 110);
    }

    #[test]
    fn test_delete_removes_requested_ids() {
        let (_dir, runner) = setup(small_config());
        runner.measure_insert(10).unwrap();

        runner.measure_delete(7).unwrap();
        assert_eq!(count_items(&runner), 3);
    }

    #[test]
    fn test_zero_records_dispatch_nothing() {
        let (_dir, runner) = setup(small_config());

        for op in [ChunkedOp::Update, ChunkedOp::Delete] {
            let outcome = runner.run_chunked(op, 0).unwrap();
            assert_eq!(outcome.report.dispatched, 0);
            assert!(outcome.report.failures.is_empty());
            assert!(outcome.elapsed < 0.05);
        }
    }

    #[test]
    fn test_lenient_mode_keeps_timing_on_chunk_failure() {
        let dir = tempdir().unwrap();
        let runner = BenchmarkRunner::new(flaky(&dir, 0), small_config()).unwrap();

        let outcome = runner.run_chunked(ChunkedOp::Update, 9).unwrap();
        assert_eq!(outcome.report.dispatched, 3);
        assert_eq!(outcome.report.failures.len(), 3);
        assert!(outcome.elapsed >= 0.0);
        assert!(runner.measure_delete(9).is_ok());
    }

    #[test]
    fn test_strict_mode_reports_chunk_failures() {
        let dir = tempdir().unwrap();
        let config = RunnerConfig { strict: true, ..small_config() };
        let runner = BenchmarkRunner::new(flaky(&dir, 0), config).unwrap();

        match runner.measure_update(9) {
            Err(BenchError::ChunkFailures { operation, failed, total }) => {
                assert_eq!(operation, "UPDATE");
                assert_eq!(failed, 3);
                assert_eq!(total, 3);
            }
            other => panic!("expected chunk failures, got {:?}", other),
        }
    }

    #[test]
    fn test_connection_error_propagates_from_read_and_insert() {
        let dir = tempdir().unwrap();
        let runner = BenchmarkRunner::new(flaky(&dir, 0), small_config()).unwrap();

        assert!(matches!(runner.measure_read(), Err(BenchError::Runtime(_))));
        assert!(matches!(runner.measure_insert(3), Err(BenchError::Runtime(_))));
    }

    #[test]
    fn test_suite_builds_a_measurement() {
        let (_dir, runner) = setup(small_config());

        let measurement = runner.measure_suite(5, IndexLabel::WithIndex).unwrap();
        assert_eq!(measurement.record_count, 5);
        assert_eq!(measurement.label, IndexLabel::WithIndex);
        assert_eq!(count_items(&runner), 0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let dir = tempdir().unwrap();
        let provider = SqliteProvider::new(dir.path().join("bench.sqlite"));
        let config = RunnerConfig { chunk_size: 0, ..RunnerConfig::default() };
        assert!(matches!(BenchmarkRunner::new(provider, config), Err(BenchError::InvalidConfig(_))));
    }
}
