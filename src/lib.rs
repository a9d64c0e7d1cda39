//! # linmath
//!
//! **linmath** - generic n-dimensional linear algebra engine written in pure Rust.
//!
//! # Model
//! Vectors and matrices are parameterized over a floating point [`Scalar`](floats::Scalar)
//! (`f32` or `f64`). Their dimensions are only known at runtime, so every operation that needs
//! matching shapes returns [`MathResult`](errors::MathResult) instead of panicking.
//!
//! Affine transformations (translation, rotation, scaling, skew) are built as matrices in
//! homogeneous (normal space) coordinates, so composing them is ordinary matrix multiplication.
//!
//! # Prelude
//! All items can be imported with `use linmath::prelude::*`.
//!

#![warn(missing_docs, clippy::missing_docs_in_private_items)] // `missing_docs`
#![warn(unused_import_braces, unused_qualifications, unused_results)] // `unused_*`
#![warn(trivial_casts, trivial_numeric_casts)] // `casts`
#![warn(missing_copy_implementations, missing_debug_implementations)] // `missing_*_implementations`
#![warn(variant_size_differences, unreachable_pub)]

// crates
extern crate bitflags;
extern crate log;
extern crate num_traits;
extern crate serde;

// helpers
mod ext;
pub use ext::*;

// submodules
pub mod decompositions;
pub mod errors;
pub mod floats;
pub mod lines;
pub mod matrices;
pub mod transforms;
pub mod vectors;

// prelude
pub mod prelude;
