pub mod path;
pub mod plan;
pub mod text;
