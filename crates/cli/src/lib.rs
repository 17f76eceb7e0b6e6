//! Command line front end of the genesis reorder.

pub mod commands;
