pub mod handlers;
pub mod outcome;
pub mod service;
