//! Alternative solving back-ends. Currently just [`ilp`], selected via
//! [`crate::config::Backend::Ilp`].

#[cfg(feature = "ilp-solver")]
pub mod ilp;
