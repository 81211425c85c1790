pub mod doc;
pub mod resume;
