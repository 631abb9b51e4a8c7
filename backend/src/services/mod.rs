//! Module for core business logic collaborators.
//!
//! This module encapsulates services that orchestrate interactions with
//! external systems, such as the SMTP transport used for password-reset
//! emails.

pub mod email_service;
