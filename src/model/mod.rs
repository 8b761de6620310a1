pub mod dtos;
pub mod structs;

pub use dtos::{Credentials, LoginParams};
pub use structs::{CourseRecord, CourseRow};
