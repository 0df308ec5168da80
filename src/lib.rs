#![allow(clippy::doc_markdown)]
#![doc = include_str!("../README.md")]

pub mod appliance;
pub mod cli;
pub mod core;
pub mod prelude;
pub mod quantity;
pub mod session;
pub mod tables;
