use crate::value::parse_bool;

/// Option that marks a port or the nmea section as driven by a GNSS receiver.
pub const TS2PHC_MASTER: &str = "ts2phc.master";

/// Where the events used to discipline a port's clock come from.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventSource {
    Gnss,
    #[default]
    Pps,
}

/// Map a `ts2phc.master` value to an [`EventSource`].
///
/// Anything that is not a true boolean, including garbage, resolves to
/// [`EventSource::Pps`].
pub fn resolve_source(flag: &str) -> EventSource {
    match parse_bool(TS2PHC_MASTER, flag) {
        Ok(true) => EventSource::Gnss,
        Ok(false) => EventSource::Pps,
        Err(e) => {
            log::debug!("{e}, assuming PPS");
            EventSource::Pps
        }
    }
}

impl std::fmt::Display for EventSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventSource::Gnss => write!(f, "GNSS"),
            EventSource::Pps => write!(f, "PPS"),
        }
    }
}
