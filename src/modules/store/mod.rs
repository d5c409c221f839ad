//! Generic record persistence: one entity type per table, one commit per write.

mod entity;
mod record_store;

pub use entity::{Entity, Fields, Filter, Value};
pub use record_store::{RecordStore, SqlRecordStore};
