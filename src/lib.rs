pub mod app;
pub mod config;
pub mod daily_log;
pub mod errors;
pub mod handlers;
pub mod meal_plan;
pub mod models;
pub mod state;
pub mod stats;
pub mod storage;
pub mod ui;
pub mod webhook;

pub use app::router;
pub use config::Config;
pub use daily_log::DailyLogStore;
pub use meal_plan::MealPlanStore;
pub use state::AppState;
pub use storage::Storage;
pub use webhook::{Transmitter, WebhookTransmitter};
