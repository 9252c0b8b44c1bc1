mod client;

pub use client::{CivicApi, HttpCivicApi};
