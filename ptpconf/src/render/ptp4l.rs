use super::{render_with, write_section};
use crate::{
    document::{Document, Section, SectionKind},
    source::{resolve_source, EventSource, TS2PHC_MASTER},
    value::parse_bool,
};

const MASTER_ONLY: &str = "masterOnly";

/// A port found while rendering a ptp4l or ts2phc configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Iface {
    pub name: String,
    pub source: EventSource,
    pub is_master: bool,
    /// The PTP hardware clock of this port. Left empty here, the platform
    /// fills it in.
    pub phc_id: Option<String>,
}

/// Output of [`render`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub text: String,
    /// Port names in configuration order.
    pub mapping: Vec<String>,
    pub ifaces: Vec<Iface>,
}

fn iface_from_section(name: &str, section: &Section, nmea_source: Option<EventSource>) -> Iface {
    let source = match section.options.get(TS2PHC_MASTER) {
        Some(flag) => resolve_source(flag),
        None => nmea_source.unwrap_or_default(),
    };

    let is_master = match section.options.get(MASTER_ONLY) {
        Some(value) => parse_bool(MASTER_ONLY, value).unwrap_or_else(|e| {
            log::warn!("{e} on port {name}, assuming false");
            false
        }),
        None => false,
    };

    Iface {
        name: name.to_owned(),
        source,
        is_master,
        phc_id: None,
    }
}

/// Render a ptp4l (or ts2phc) configuration and collect its ports.
///
/// Every plain section other than `[global]` and `[nmea]` is a port. A port
/// without its own `ts2phc.master` option takes the source of the closest
/// `[nmea]` section before it, or PPS when there is none.
pub fn render(document: &Document, profile: &str) -> Rendered {
    let mut mapping = Vec::new();
    let mut ifaces = Vec::new();
    let mut nmea_source = None;

    let text = render_with(document, profile, |out, section| {
        if section.is_nmea() {
            if let Some(flag) = section.options.get(TS2PHC_MASTER) {
                nmea_source = Some(resolve_source(flag));
            }
        } else if let SectionKind::Plain(name) = &section.kind {
            if !section.is_global() {
                mapping.push(name.clone());
                ifaces.push(iface_from_section(name, section, nmea_source));
            }
        }

        write_section(out, section)
    });

    Rendered {
        text,
        mapping,
        ifaces,
    }
}
