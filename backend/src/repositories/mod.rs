//! Data-access layer.
//!
//! Repositories own all SQL for their entity and return plain `Result`s;
//! business rules live in the service layer.

pub mod account_repository;
