//! Example components built on the stream graph.

pub mod labeled_slider;
pub mod bmi;
pub mod calculator;
pub mod circle;
pub mod counter;
pub mod toggle;

pub use labeled_slider::*;
pub use bmi::*;
