//! HTTP handlers

pub mod health;
pub mod pages;
pub mod api;
mod upload;
