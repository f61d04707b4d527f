// src/utils/mod.rs

pub mod handle;
pub mod json;
pub mod phone;
pub mod session;
