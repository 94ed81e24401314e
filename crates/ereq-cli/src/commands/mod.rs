pub mod auth;
pub mod changelog;
pub mod dispatch;
pub mod edit;
pub mod export;
pub mod history;
pub mod list;
pub mod set;
pub mod setup;
pub mod shared;
pub mod view;
