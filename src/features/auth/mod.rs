pub mod dtos;
pub mod service;

pub use dtos::{LoginRequest, LoginResponse};
pub use service::AuthService;
