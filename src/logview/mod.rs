//! Offline inspection of the gateway's request trace log.
//!
//! A trace log is a flat sequence of `TIMESTAMP - LEVEL - MESSAGE` lines;
//! these modules parse them, group them back into per-request transactions,
//! and render each transaction as labeled terminal sections.

pub mod group;
pub mod parse;
pub mod render;
