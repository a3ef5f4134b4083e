pub mod cli;
pub mod config;
pub mod ddl;
pub mod errors;
pub mod executor;
pub mod migration;
pub mod schema;
pub mod translate;

// Re-export them for easier access from callers
pub use cli::*;
pub use config::*;
pub use ddl::*;
pub use errors::*;
pub use executor::*;
pub use migration::*;
pub use schema::*;
pub use translate::*;
