// The binary in main.rs drives the terminal; everything it needs lives here so
// integration tests can reach the state machine and the dispatcher directly.
pub mod app;
pub mod config;
pub mod dispatch;
pub mod event;
pub mod logging;
pub mod provider;
pub mod speech;
pub mod state;
pub mod ui;
