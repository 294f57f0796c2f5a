//! Animation assembly: run the model, render every step, encode, clean up.

pub(crate) mod assembler;
pub(crate) mod store;
