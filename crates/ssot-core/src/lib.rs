pub mod check;
pub mod config;
pub mod discover;
pub mod error;
pub mod frontmatter;
pub mod io;
pub mod paths;
pub mod site;

pub use error::{Result, SsotError};
