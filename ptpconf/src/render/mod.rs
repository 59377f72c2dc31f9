//! Serialization of a [`Document`] back into configuration text.
//!
//! Output starts with a `#profile: <name>` comment and an empty line,
//! followed by every section header and its `key value` lines, in document
//! order.

use std::fmt::Write;

use crate::document::{Document, Section};

mod ptp4l;
mod synce4l;

pub use ptp4l::{render, Iface, Rendered};
pub use synce4l::{render_synce, RenderError, RenderedSynce};

fn write_profile_header(w: &mut impl Write, profile: &str) -> std::fmt::Result {
    writeln!(w, "#profile: {profile}")?;
    writeln!(w)
}

fn write_section(w: &mut impl Write, section: &Section) -> std::fmt::Result {
    writeln!(w, "{}", section.header)?;
    for (key, value) in section.options.iter() {
        write_option(w, key, value)?;
    }
    Ok(())
}

fn write_option(w: &mut impl Write, key: &str, value: &str) -> std::fmt::Result {
    writeln!(w, "{key} {value}")
}

fn render_with<F>(document: &Document, profile: &str, mut emit: F) -> String
where
    F: FnMut(&mut String, &Section) -> std::fmt::Result,
{
    let mut out = String::with_capacity(1024);

    // writing into a String cannot fail
    let _ = write_profile_header(&mut out, profile);
    for section in document.sections() {
        let _ = emit(&mut out, section);
    }

    out
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::parse;

    fn option_set(document: &Document) -> BTreeSet<(String, String, String)> {
        document
            .sections()
            .iter()
            .flat_map(|section| {
                section.options.iter().map(|(k, v)| {
                    (section.header.clone(), k.to_owned(), v.to_owned())
                })
            })
            .collect()
    }

    #[test]
    fn round_trip_keeps_sections_and_options() {
        let texts = [
            "",
            "[global]\ndomainNumber 24\ntwoStepFlag 1\n[ens1f0]\nmasterOnly 0\n[ens1f1]\nmasterOnly 1",
            "[ens1f0]\nts2phc.extts_polarity rising\n[nmea]\nts2phc.master 1\n[global]\nuse_syslog  0",
            "# comment\n[<synce1>]\nnetwork_option 1\n[{SMA1}]\n[eth0]\ntx_heartbeat_msec 10",
        ];

        for text in texts {
            let document = parse(text).unwrap();
            let rendered = render(&document, "test");
            let reparsed = parse(&rendered.text).unwrap();

            let headers: Vec<_> = document.sections().iter().map(|s| &s.header).collect();
            let reparsed_headers: Vec<_> = reparsed.sections().iter().map(|s| &s.header).collect();
            assert_eq!(headers, reparsed_headers);
            assert_eq!(option_set(&document), option_set(&reparsed));
            assert_eq!(document.clock_role(), reparsed.clock_role());
        }
    }

    #[test]
    fn rendering_is_stable() {
        let text = "[global]\nb 2\na 1\nc 3";
        let document = parse(text).unwrap();

        let first = render(&document, "stable").text;
        let second = render(&parse(&first).unwrap(), "stable").text;

        assert_eq!(first, second);
        assert_eq!(first, "#profile: stable\n\n[global]\nb 2\na 1\nc 3\n");
    }
}
