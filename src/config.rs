//! Settings for the player, layered from built-in defaults, an optional
//! TOML file and `SHUFFLER__*` environment variables.

mod load;
mod schema;

pub use schema::*;

#[cfg(test)]
mod tests;
