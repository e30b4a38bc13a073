//! Data loading and validation for game content.

pub mod load;
pub mod parse;
pub mod schema;

pub use load::*;
pub use parse::*;
pub use schema::*;
