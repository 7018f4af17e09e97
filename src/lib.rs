pub mod detail;
pub mod export;
pub mod orchestration;
pub mod records;
pub mod render;
pub mod site;

// Re-export commonly used types for convenience.
pub use records::{RecordBatch, RecordSource};
pub use render::{PageTemplate, PlaceholderToken};
pub use site::{AppConfig, MemberRecord, SiteManager};
