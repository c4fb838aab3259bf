//! Parley library exports for testing

pub mod core;
pub mod inference;
pub mod mcp;

#[cfg(test)]
pub mod test_support;
