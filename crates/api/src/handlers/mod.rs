pub mod comment;
pub mod project;
pub mod screen;
