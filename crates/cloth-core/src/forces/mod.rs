//! Force and acceleration models acting on knots.
pub mod gravity;
pub mod spring;
