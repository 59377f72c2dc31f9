use thiserror::Error;

use super::{render_with, write_option, write_section};
use crate::{
    document::{Document, SectionKind},
    synce::{extract_relations, ClockIdAssigner, Relations, CLOCK_ID},
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("found {devices} synce devices for {sections} device sections")]
    StructuralMismatch { devices: usize, sections: usize },
}

/// Output of [`render_synce`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSynce {
    pub text: String,
    pub relations: Relations,
}

/// Render a synce4l configuration, adding the clock identity of every device
/// that does not set one explicitly.
///
/// The n-th device section of the document corresponds to the n-th device in
/// the extracted relations. A `clock_id` written in the configuration always
/// wins over the assigned one.
pub fn render_synce(
    document: &Document,
    profile: &str,
    clock_ids: &impl ClockIdAssigner,
) -> Result<RenderedSynce, RenderError> {
    let mut relations = extract_relations(document);
    clock_ids.assign_clock_ids(&mut relations);

    let sections = document
        .sections()
        .iter()
        .filter(|section| matches!(section.kind, SectionKind::Device(_)))
        .count();

    if sections != relations.len() {
        return Err(RenderError::StructuralMismatch {
            devices: relations.len(),
            sections,
        });
    }

    let mut devices = relations.devices.iter();

    let text = render_with(document, profile, |out, section| {
        write_section(out, section)?;

        if let SectionKind::Device(name) = &section.kind {
            // counts were checked above, so there is always a device left
            let Some(device) = devices.next() else {
                return Ok(());
            };

            if section.options.contains_key(CLOCK_ID) {
                return Ok(());
            }

            if device.clock_id.is_empty() {
                log::warn!("no clock id available for synce device {name}");
            } else {
                write_option(out, CLOCK_ID, &device.clock_id)?;
            }
        }

        Ok(())
    });

    Ok(RenderedSynce { text, relations })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::{parse, synce::clock_id_key};

    fn settings(entries: &[(&str, &str)]) -> HashMap<String, String> {
        entries
            .iter()
            .map(|(iface, id)| (clock_id_key(iface), id.to_string()))
            .collect()
    }

    #[test]
    fn injects_clock_ids() {
        let text = "[global]\nlogging_level 7\n[<synce1>]\nnetwork_option 1\n[ens7f0]\n[<synce2>]\n[ens8f0]";
        let document = parse(text).unwrap();
        let rendered =
            render_synce(&document, "synce", &settings(&[("ens7f0", "111"), ("ens8f0", "222")]))
                .unwrap();

        assert_eq!(
            rendered.text,
            "#profile: synce\n\n[global]\nlogging_level 7\n[<synce1>]\nnetwork_option 1\nclock_id 111\n[ens7f0]\n[<synce2>]\nclock_id 222\n[ens8f0]\n"
        );
        assert_eq!(rendered.relations.devices[0].clock_id, "111");
        assert_eq!(rendered.relations.devices[1].clock_id, "222");
    }

    #[test]
    fn existing_clock_id_is_kept() {
        let text = "[<synce1>]\nclock_id 999\n[ens7f0]\n[<synce2>]\n[ens8f0]";
        let document = parse(text).unwrap();
        let rendered =
            render_synce(&document, "synce", &settings(&[("ens7f0", "111"), ("ens8f0", "222")]))
                .unwrap();

        let reparsed = parse(&rendered.text).unwrap();
        assert_eq!(
            reparsed.section("[<synce1>]").unwrap().options.get(CLOCK_ID),
            Some("999")
        );
        // the second device still gets its own id, not the first one's
        assert_eq!(
            reparsed.section("[<synce2>]").unwrap().options.get(CLOCK_ID),
            Some("222")
        );
        assert_eq!(rendered.text.matches("clock_id").count(), 2);
    }

    #[test]
    fn missing_clock_id_is_not_injected() {
        let document = parse("[<synce1>]\n[ens7f0]").unwrap();
        let rendered = render_synce(&document, "synce", &HashMap::<String, String>::new()).unwrap();

        assert!(!rendered.text.contains("clock_id"));
    }

    #[test]
    fn unnamed_device_is_a_mismatch() {
        let document = parse("[<>]\n[ens7f0]\n[<synce1>]\n[ens8f0]").unwrap();

        assert_eq!(
            render_synce(&document, "synce", &HashMap::<String, String>::new()),
            Err(RenderError::StructuralMismatch {
                devices: 1,
                sections: 2
            })
        );
    }

    #[test]
    fn no_devices() {
        let document = parse("[global]").unwrap();
        let rendered = render_synce(&document, "synce", &HashMap::<String, String>::new()).unwrap();

        assert!(rendered.relations.is_empty());
        assert_eq!(rendered.text, "#profile: synce\n\n[global]\n");
    }
}
