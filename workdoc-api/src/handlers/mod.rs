//! API request handlers.
//!
//! This module provides handlers for all API endpoints.

pub mod companies;
pub mod health;
pub mod site;
pub mod tenant;
