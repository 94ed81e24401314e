pub mod auth;

pub use auth::AuthCommands;
