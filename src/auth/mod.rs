pub mod tokens;

pub use tokens::{create_token, verify_token, Claims};
