pub mod auth;
pub mod client;
pub mod error;
pub mod types;

pub use auth::CrunchyrollSession;
pub use client::CrunchyrollClient;
pub use error::CrunchyrollError;
