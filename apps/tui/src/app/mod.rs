// App module for stance-atlas
// Handles application state and input

pub mod input;
pub mod state;
#[cfg(test)]
pub mod test_support;

pub use input::{handle_key, handle_mouse};
pub use state::{App, Hover, LoadState};
