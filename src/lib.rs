// Library exports for testing
pub mod breathe;
pub mod chat;
pub mod commands;
pub mod entry;
pub mod export;
pub mod insights;
pub mod insights_builder;
pub mod logging;
pub mod profile;
pub mod renderer;
pub mod reset;
pub mod settings;
pub mod status;
pub mod store;
pub mod timefmt;
pub mod window;
