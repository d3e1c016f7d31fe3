//! Built-in database adapters
//!
//! One adapter per supported engine. Each module exports the engine's
//! `DEFAULT_PORT` and `DEFAULT_IMAGE`, which are applied to a configuration
//! whose port is 0 or whose image is empty.

pub mod clickhouse;
pub mod elasticsearch;
pub mod mongodb;
pub mod mysql;
pub mod postgresql;
pub mod redis;

pub use clickhouse::ClickHouseAdapter;
pub use elasticsearch::ElasticsearchAdapter;
pub use mongodb::MongoDbAdapter;
pub use mysql::MySqlAdapter;
pub use postgresql::PostgreSqlAdapter;
pub use redis::RedisAdapter;
