//! In-memory model of a parsed linuxptp style configuration file.

/// The header of the section holding instance wide settings.
pub const GLOBAL_HEADER: &str = "[global]";

/// The header of the section describing the nmea (GNSS) time source.
pub const NMEA_HEADER: &str = "[nmea]";

/// The shape of a section header.
///
/// The name carried by every variant has all delimiter characters removed,
/// so `[<synce1>]` becomes `Device("synce1")`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SectionKind {
    /// A regular section, such as `[global]` or an interface like `[eth0]`.
    Plain(String),
    /// A SyncE device marker, written as `[<name>]`. All plain sections
    /// following it (up to the next marker) are ports of this device.
    Device(String),
    /// An external frequency source, written as `[{name}]`.
    ExternalSource(String),
}

impl SectionKind {
    /// Determine the kind of section from its bracketed header.
    pub fn from_header(header: &str) -> Self {
        let name = strip_delimiters(header);

        if header.starts_with("[<") {
            SectionKind::Device(name)
        } else if header.starts_with("[{") {
            SectionKind::ExternalSource(name)
        } else {
            SectionKind::Plain(name)
        }
    }

    pub fn name(&self) -> &str {
        match self {
            SectionKind::Plain(name)
            | SectionKind::Device(name)
            | SectionKind::ExternalSource(name) => name,
        }
    }
}

fn strip_delimiters(header: &str) -> String {
    header
        .chars()
        .filter(|c| !matches!(c, '<' | '>' | '[' | ']' | '{' | '}' | ' '))
        .collect()
}

/// Options of a single section, in the order they were first defined.
///
/// Setting a key a second time replaces the value but keeps the position of
/// the first definition, so rendering a section is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    entries: Vec<(String, String)>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();

        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Options {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut options = Options::new();
        for (key, value) in iter {
            options.insert(key, value);
        }
        options
    }
}

/// A bracket delimited block of options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// The header exactly as written, including the brackets.
    pub header: String,
    pub kind: SectionKind,
    pub options: Options,
}

impl Section {
    pub fn new(header: impl Into<String>) -> Self {
        let header = header.into();
        let kind = SectionKind::from_header(&header);

        Self {
            header,
            kind,
            options: Options::new(),
        }
    }

    pub fn is_global(&self) -> bool {
        self.header == GLOBAL_HEADER
    }

    pub fn is_nmea(&self) -> bool {
        self.header == NMEA_HEADER
    }
}

/// The role this node plays in the PTP topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClockRole {
    /// No port is configured to ever become a slave.
    GrandMaster,
    /// At least one slave port, and more than one port in total.
    BoundaryClock,
    /// A single slave port.
    OrdinaryClock,
}

impl ClockRole {
    pub(crate) fn classify(has_slave_port: bool, section_count: usize) -> Self {
        if !has_slave_port {
            ClockRole::GrandMaster
        } else if section_count > 2 {
            ClockRole::BoundaryClock
        } else {
            ClockRole::OrdinaryClock
        }
    }
}

impl std::fmt::Display for ClockRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClockRole::GrandMaster => write!(f, "GM"),
            ClockRole::BoundaryClock => write!(f, "BC"),
            ClockRole::OrdinaryClock => write!(f, "OC"),
        }
    }
}

/// A parsed configuration file.
///
/// Always contains exactly one `[global]` section. Use [`crate::parse`] to
/// construct one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    sections: Vec<Section>,
    clock_role: ClockRole,
}

impl Document {
    pub(crate) fn new(sections: Vec<Section>, clock_role: ClockRole) -> Self {
        Self {
            sections,
            clock_role,
        }
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn clock_role(&self) -> ClockRole {
        self.clock_role
    }

    pub fn global(&self) -> Option<&Section> {
        self.sections.iter().find(|section| section.is_global())
    }

    pub fn section(&self, header: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.header == header)
    }
}
