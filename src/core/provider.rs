use rusqlite::Connection;

use crate::core::errors::Result;

/// Trait defining how the runner obtains connections to the store
///
/// Every measured call acquires its own connection and drops it when done;
/// implementations must not hand out a shared connection.
pub trait ConnectionProvider: Send + Sync {
    /// Open a fresh connection
    fn connect(&self) -> Result<Connection>;

    /// Short human-readable description of the target, for logs
    fn describe(&self) -> String {
        "sqlite".to_string()
    }
}

impl<P: ConnectionProvider + ?Sized> ConnectionProvider for std::sync::Arc<P> {
    fn connect(&self) -> Result<Connection> {
        (**self).connect()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}
