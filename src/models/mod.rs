//! Domain models and request/response DTOs

pub mod note;
pub mod user;

pub use note::{NewNote, Note, NoteRequest};
pub use user::{LoginRequest, LoginResponse, NewUser, RegisterRequest, User, UserResponse};
