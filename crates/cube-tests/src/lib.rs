//! Integration tests for the cube-lut crates.
//!
//! End-to-end checks from atlas files on disk to the colour cube buffer
//! handed to the colour-transform operator.
