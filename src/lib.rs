//! Car Catalog Frontend
//!
//! Browse, search and edit a car catalog served by a REST backend.

pub mod api;
pub mod app;
pub mod auth;
pub mod carousel;
pub mod catalog;
pub mod components;
pub mod config;
pub mod context;
pub mod form;
pub mod format;
pub mod http;
pub mod logger;
pub mod models;
pub mod route;
pub mod store;
pub mod validation;
