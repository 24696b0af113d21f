//! Adaptive telemetry panel engine.
//!
//! Platform-agnostic core of the metric panel: it turns a vehicle/device
//! [`StateSnapshot`] into per-slot draw instructions each frame. Rasterizing
//! those instructions is left to the host (the simulator draws them with
//! `embedded-graphics`).
//!
//! - [`catalog`]: metric registry, one compute function per metric
//! - [`grade`]: rolling road grade estimator
//! - [`layout`]: slot grid, font scale and text anchors
//! - [`placement`]: panel rectangle from an anchor and neighbor widgets
//! - [`touch`]: per-frame slot hit regions
//! - [`panel`]: frame driver tying the above together
//! - [`config`]: constants and the runtime [`PanelConfig`]
//! - [`snapshot`]: telemetry records read by the metrics
//! - [`colors`], [`thresholds`], [`units`], [`format`], [`fonts`]: display rules
//!
//! # no_std Compatibility
//!
//! This crate is `no_std` outside of tests and does not allocate.

#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

pub mod catalog;
pub mod colors;
pub mod config;
pub mod fonts;
pub mod format;
pub mod grade;
pub mod layout;
pub mod panel;
pub mod placement;
pub mod snapshot;
pub mod thresholds;
pub mod touch;
pub mod units;

// Re-export commonly used items
pub use catalog::{GradeEstimator, MetricCode, MetricDisplay, MetricId};
pub use config::{ConfigError, PanelConfig};
pub use fonts::FontSizes;
pub use grade::{GradePhase, RollingGradeEstimator};
pub use layout::{LayoutSpec, SlotGeometry, SlotLayout, TextAnchors, UnitRotation, layout};
pub use panel::{PanelFrame, SlotFrame, TelemetryPanel};
pub use placement::PanelAnchor;
pub use snapshot::StateSnapshot;
pub use touch::TouchRegionRegistry;
