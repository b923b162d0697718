pub mod knowledge;
pub mod plan;
pub mod question;
pub mod student;
