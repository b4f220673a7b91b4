/// Database layer for HiveDesk
///
/// # Modules
///
/// - `pool`: PostgreSQL connection pool management with a health check
/// - `migrations`: Database migration runner

pub mod migrations;
pub mod pool;
