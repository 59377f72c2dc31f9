//! `ptpconf` reads and writes the configuration files of the linuxptp family
//! of daemons (ptp4l, ts2phc and synce4l).
//!
//! The configuration format is a list of bracketed sections, each followed by
//! `key value` option lines:
//!
//! ```text
//! [global]
//! domainNumber 24
//! [ens1f0]
//! masterOnly 0
//! ```
//!
//! # Parsing
//! [`parse`] turns text into a [`Document`]. The document keeps sections and
//! options in the order they were written, always has a `[global]` section,
//! and knows which [`ClockRole`] the node plays:
//!
//! ```
//! # use ptpconf::{parse, ClockRole};
//! let document = parse("[global]\n[ens1f0]\nslaveOnly 1").unwrap();
//! assert_eq!(document.clock_role(), ClockRole::OrdinaryClock);
//! ```
//!
//! # Rendering
//! [`render`] writes a document back out and lists the ports it configures,
//! including the [`EventSource`] each port is disciplined from.
//! [`render_synce`] does the same for synce4l configurations, where ports are
//! grouped into SyncE devices (see [`synce`]), and fills in the clock identity
//! of each device.
//!
//! This crate does no I/O. Reading files, decoding profiles and notifying the
//! daemons is left to the caller; `ptpconf-linux` does this on linux.

mod document;
mod parser;
pub mod render;
mod source;
pub mod synce;
mod value;

pub use document::{
    ClockRole, Document, Options, Section, SectionKind, GLOBAL_HEADER, NMEA_HEADER,
};
pub use parser::{parse, ParseError};
pub use render::{render, render_synce, Iface, RenderError, Rendered, RenderedSynce};
pub use source::{resolve_source, EventSource, TS2PHC_MASTER};
pub use synce::{extract_relations, ClockIdAssigner, Relations, SynceDeviceConfig};
pub use value::OptionValueError;
