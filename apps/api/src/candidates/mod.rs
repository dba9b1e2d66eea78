pub mod grouping;
pub mod handlers;
pub mod service;
