//! Command handlers grouped by concern.

pub(crate) mod account;
pub(crate) mod favorites;
pub(crate) mod movies;
pub(crate) mod profile;
