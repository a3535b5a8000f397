pub mod errors;
pub mod timing;
pub mod chunk;
pub mod measurement;
pub mod provider;
pub mod task_group;


pub use errors::{Result, BenchError};
pub use timing::{round_time, TimeUnit};
pub use chunk::{batch_ranges, chunk_ids, Chunk};
pub use measurement::{IndexLabel, Measurement, HEADERS};
pub use provider::ConnectionProvider;
pub use task_group::{PoolReport, TaskFailure, TaskGroup};
