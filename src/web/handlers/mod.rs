pub mod analyze;
pub mod comments;
pub mod page;
pub mod report;
