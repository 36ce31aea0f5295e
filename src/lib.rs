//! Multi-tenant note service
//! Users register, authenticate with bearer tokens, and manage
//! personal notes isolated per owner

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;
pub mod telemetry;
