//! Prelude module: `linmath::prelude` re-exports all `linmath` items.
//!
//! # Examples
//! Import all the exports.
//!
//! ```rust
//! use linmath::prelude::*;
//! ```
//!

// re-exports
pub use crate::decompositions::*;
pub use crate::errors::*;
pub use crate::floats::*;
pub use crate::lines::*;
pub use crate::matrices::*;
pub use crate::transforms::*;
pub use crate::vectors::*;
pub use crate::*;
