//! Marker types tagging [`DateTimeOf`] values.
//!
//! [`DateTimeOf`]: crate::DateTimeOf

/// Marker of an entity creation.
#[derive(Clone, Copy, Debug)]
pub struct Creation;

/// Marker of an entity update.
#[derive(Clone, Copy, Debug)]
pub struct Modification;

/// Marker of a settled payment.
#[derive(Clone, Copy, Debug)]
pub struct Settlement;
