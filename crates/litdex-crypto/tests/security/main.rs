#![allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]

//! Security-facing checks: output entropy, masked `Debug`, and
//! constant-time comparison behaviour.
