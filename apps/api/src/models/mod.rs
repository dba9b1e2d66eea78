pub mod application;
pub mod job;
pub mod matching;
pub mod screening;
pub mod user;
