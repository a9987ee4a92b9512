//! Authentication utilities library
//!
//! Provides the credential infrastructure for the catalog service:
//! - Password hashing (Argon2id)
//! - Bearer token issuance and verification (JWT, HS256)
//!
//! Both pieces are driven by explicit configuration values handed to their
//! constructors; nothing is read from the process environment here.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let digest = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &digest).unwrap());
//! ```
//!
//! ## Bearer Tokens
//! ```
//! use auth::{TokenConfig, TokenService};
//!
//! let service = TokenService::new(&TokenConfig {
//!     secret: "secret_key_at_least_32_bytes_long!".to_string(),
//!     access_token_ttl_minutes: 30,
//! });
//! let token = service.issue("alice").unwrap();
//! assert_eq!(service.verify(&token).unwrap(), "alice");
//! ```

pub mod password;
pub mod token;

// Re-export commonly used items
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::Claims;
pub use token::TokenConfig;
pub use token::TokenError;
pub use token::TokenService;
