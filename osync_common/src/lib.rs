pub mod helpers;
mod secret;

pub use secret::Secret;
