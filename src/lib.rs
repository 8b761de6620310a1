pub mod app;
pub mod cache;
pub mod config;
pub mod crypto;
pub mod error;
pub mod logging;
pub mod model;
pub mod request;

pub use app::{CaptchaSolver, ConsoleSolver, Ehall};
pub use config::Config;
pub use error::{Error, ErrorKind, Result};
pub use model::{CourseRecord, Credentials};
pub use request::{EhallApi, HttpEhallApi};
