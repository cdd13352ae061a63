pub mod app_state;
pub mod pipeline;
pub mod server_config;
