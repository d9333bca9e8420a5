//! Health-risk scoring for air-quality exposure.
//!
//! The [`assessment`] module holds the pure scoring core (rule-based scorer, AI assessment
//! reconciler, AQI lookup) together with the caller layer that validates inputs, falls back
//! between the generative model and the rule-based scorer, and persists results.

pub mod assessment;
pub mod config;
pub mod error;
pub mod telemetry;
