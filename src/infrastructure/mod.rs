// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod cors;
pub mod memory_store;
pub mod metadata_workbook;
