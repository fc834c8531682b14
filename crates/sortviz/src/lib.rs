#![forbid(unsafe_code)]

pub mod app;
pub mod cli;
pub mod error;
pub mod info;
pub mod logging;
pub mod view;

pub use app::{Action, App, Msg};
pub use cli::run_from_env;
pub use error::{Result, SortvizError};
