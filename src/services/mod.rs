//! Business services

pub mod auth_service;
pub mod note_service;

pub use auth_service::AuthService;
pub use note_service::NoteService;
