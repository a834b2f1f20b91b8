pub mod apollo;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod openai;
pub mod search;

pub use handlers::Upstream;
