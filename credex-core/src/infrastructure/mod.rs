//! Store adapters behind the domain ports.

pub mod repositories;
