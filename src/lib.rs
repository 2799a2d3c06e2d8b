pub mod app;
pub mod client;
pub mod config;
pub mod dates;
pub mod errors;
pub mod exchange;
pub mod handlers;
pub mod models;
pub mod state;
pub mod stats;
pub mod storage;
pub mod ui;
pub mod validate;

pub use app::router;
pub use config::AppConfig;
pub use state::AppState;
