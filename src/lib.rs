//! Client library for the resep recipe site API.
//!
//! All backend calls go through [`gateway::ApiClient`], which injects the
//! stored session token and handles expired sessions. The resource modules
//! ([`about`], [`resep`], [`auth`]) build on it.

pub mod about;
pub mod auth;
pub mod cli;
pub mod config;
pub mod gateway;
pub mod models;
pub mod render;
pub mod resep;
pub mod share;
pub mod storage;
