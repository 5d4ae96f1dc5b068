//! Storage layer (local JSON key-value file).

pub mod local;

pub use local::LocalStore;

/// Record keys as constants.
pub mod keys {
    /// OAuth credential (`accessToken`, `refreshToken`, `expiresAt`)
    pub const TOKEN: &str = "token";
    /// User preferences
    pub const SETTINGS: &str = "settings";
}
