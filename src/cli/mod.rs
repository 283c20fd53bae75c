//! File inputs and text output for the command-line tool

pub mod input;
pub mod render;

pub use input::{
    load_parlay_document, load_signal_document, LegEntry, LegSignals, ParlayDocument,
    SignalDocument,
};
pub use render::render_report;
