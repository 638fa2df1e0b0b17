//! Test factories for creating Serenity API objects.
//!
//! This module provides factory functions for creating mock Serenity structs
//! (User, Member) for testing purposes. These factories create valid Serenity
//! objects by deserializing JSON, simulating what Discord's API would return.
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::serenity::{create_test_member, create_test_user};
//!
//! #[test]
//! fn test_directory_member() {
//!     let ana = create_test_member(1, 100, "ana", Some("Ana"), false);
//!     let bot = create_test_user(2, "rafflebot", None, true);
//!     // Use in your tests...
//! }
//! ```
//!
//! # Available Factories
//!
//! - `user::create_test_user` - Create Serenity User objects
//! - `member::create_test_member` - Create Serenity guild Member objects

pub mod member;
pub mod user;

pub use member::create_test_member;
pub use user::create_test_user;
