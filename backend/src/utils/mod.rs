//! Collection of general utility functions and common traits.
//!
//! This module serves as a repository for small, reusable helpers that do not
//! fit into other specific domain modules: token signing, password hashing,
//! and reset-secret generation.

pub mod jwt;
pub mod password;
pub mod reset_token;
