mod app;
mod config;
mod form;

pub use app::run_app;
pub use config::AutofillConfig;
