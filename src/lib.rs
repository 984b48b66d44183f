pub mod api;
pub mod auth;
pub mod chat;
pub mod config;
pub mod domain;
pub mod terminal;
