//! Data types for content records and the export schema.

mod record;
mod schema;

pub use record::*;
pub use schema::*;
