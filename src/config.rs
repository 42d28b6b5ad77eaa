//! User settings: schema, layered loading and validation.
//!
//! Values come from struct defaults, then the TOML file, then `CANTO__*`
//! environment variables.

mod load;
mod schema;

pub use load::default_state_dir;
pub use schema::*;

#[cfg(test)]
mod tests;
