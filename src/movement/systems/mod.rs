//! Movement domain: system modules for the fixed-tick update.

pub(crate) mod input;
pub(crate) mod movement;
pub(crate) mod probes;

pub(crate) use input::{clear_input_edges, sample_input};
pub(crate) use movement::{advance_motion, apply_platform_filter};
pub(crate) use probes::update_probes;
