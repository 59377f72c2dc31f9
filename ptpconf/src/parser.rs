use thiserror::Error;

use crate::document::{ClockRole, Document, Section, GLOBAL_HEADER};

/// Fatal problems in configuration text. A document that fails to parse
/// must not be applied, not even partially.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Section missing closing ']': {0}")]
    MalformedSection(String),
    #[error("Config option not in section: {0}")]
    OptionOutsideSection(String),
}

/// Option lines that allow a port to end up in the slave state.
const SLAVE_OPTIONS: [(&str, &str); 4] = [
    ("masterOnly", "0"),
    ("serverOnly", "0"),
    ("slaveOnly", "1"),
    ("clientOnly", "1"),
];

fn is_slave_option(key: &str, value: &str) -> bool {
    SLAVE_OPTIONS
        .iter()
        .any(|(k, v)| *k == key && *v == value.trim())
}

/// Repeated `[global]` sections are folded into the first one.
fn push_section(sections: &mut Vec<Section>, section: Section) {
    if section.is_global() {
        if let Some(global) = sections.iter_mut().find(|s| s.is_global()) {
            for (key, value) in section.options.iter() {
                global.options.insert(key, value);
            }
            return;
        }
    }

    sections.push(section);
}

/// Parse configuration text into a [`Document`].
///
/// Blank lines and lines starting with `#` are skipped. Option lines are
/// split at the first space; lines inside a section without a space are
/// ignored. If the text does not define a `[global]` section, an empty one is
/// added at the end.
pub fn parse(text: &str) -> Result<Document, ParseError> {
    let mut sections = Vec::new();
    let mut current: Option<Section> = None;
    let mut has_slave_port = false;

    for line in text.lines() {
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') {
            let end = line
                .find(']')
                .ok_or_else(|| ParseError::MalformedSection(line.to_owned()))?;

            if let Some(section) = current.take() {
                push_section(&mut sections, section);
            }
            current = Some(Section::new(&line[..=end]));
            continue;
        }

        let section = current
            .as_mut()
            .ok_or_else(|| ParseError::OptionOutsideSection(line.to_owned()))?;

        if let Some((key, value)) = line.split_once(' ') {
            has_slave_port |= is_slave_option(key, value);
            section.options.insert(key, value);
        }
    }

    if let Some(section) = current {
        push_section(&mut sections, section);
    }

    if !sections.iter().any(Section::is_global) {
        sections.push(Section::new(GLOBAL_HEADER));
    }

    let clock_role = ClockRole::classify(has_slave_port, sections.len());

    Ok(Document::new(sections, clock_role))
}
