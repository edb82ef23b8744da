//! Ratio-check core: measurement modeling, ratio evaluation, and
//! threshold classification.
//!
//! A check run builds two [`measurement::MeasurementRequest`] values (the
//! dividend and the divisor), executes each through a
//! [`executor::QueryExecutor`], combines the results with
//! [`ratio::evaluate`] under the configured zero-divisor policy, and maps
//! the outcome to a [`status::Status`] via [`classify::classify`].

pub mod classify;
pub mod executor;
pub mod kibana;
pub mod measurement;
pub mod ratio;
pub mod status;
pub mod window;
