// Application layer - Use cases and store/parser seams
pub mod dashboard_service;
pub mod error;
pub mod upload_service;
pub mod version_service;
pub mod version_store;
pub mod workbook_parser;
