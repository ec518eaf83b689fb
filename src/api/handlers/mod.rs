pub mod root;
pub mod sprints;
pub mod templates;
pub mod messages;
