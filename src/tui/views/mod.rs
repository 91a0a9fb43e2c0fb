pub mod dashboard;
pub mod detail;
pub mod table;
pub mod timeline;
