use super::{Relations, SynceDeviceConfig, EXTENDED_TLV, NETWORK_OPTION};
use crate::{
    document::{Document, Section, SectionKind},
    value::parse_int,
};

/// State threaded through the sections while grouping them into devices.
#[derive(Default)]
struct Accumulator {
    relations: Relations,
    current: Option<SynceDeviceConfig>,
    pending_ifaces: Vec<String>,
}

impl Accumulator {
    fn flush(&mut self) {
        let Some(mut device) = self.current.take() else {
            return;
        };

        device.ifaces = std::mem::take(&mut self.pending_ifaces);

        if device.name.is_empty() {
            log::warn!("skipping synce device section without a name");
        } else {
            self.relations.register_device_config(device);
        }
    }

    fn step(mut self, section: &Section) -> Self {
        match &section.kind {
            SectionKind::Device(name) => {
                self.flush();
                self.current = Some(device_from_section(name, section));
            }
            SectionKind::ExternalSource(name) => match self.current.as_mut() {
                Some(device) => device.external_source = Some(name.clone()),
                None => log::warn!("external source {name} is not part of a synce device"),
            },
            SectionKind::Plain(_) if section.is_global() => {}
            SectionKind::Plain(name) => match self.current {
                Some(_) => self.pending_ifaces.push(name.clone()),
                None => log::warn!("port {name} is not part of a synce device"),
            },
        }

        self
    }

    fn finish(mut self) -> Relations {
        self.flush();
        self.relations
    }
}

fn device_from_section(name: &str, section: &Section) -> SynceDeviceConfig {
    let mut device = SynceDeviceConfig::new(name);

    if let Some(value) = section.options.get(NETWORK_OPTION) {
        match parse_int(NETWORK_OPTION, value) {
            Ok(network_option) => device.network_option = network_option,
            Err(e) => log::error!("{e}, setting {NETWORK_OPTION} to default {}", device.network_option),
        }
    }

    if let Some(value) = section.options.get(EXTENDED_TLV) {
        match parse_int(EXTENDED_TLV, value) {
            Ok(extended_tlv) => device.extended_tlv = extended_tlv,
            Err(e) => log::error!("{e}, setting {EXTENDED_TLV} to default {}", device.extended_tlv),
        }
    }

    device
}

/// Group the port sections of a synce4l configuration under their devices.
///
/// Devices and their ports keep the order of the configuration text. A
/// device without ports is valid. Ports and external sources that appear
/// before the first device section are ignored.
pub fn extract_relations(document: &Document) -> Relations {
    document
        .sections()
        .iter()
        .fold(Accumulator::default(), Accumulator::step)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        parse,
        synce::{EXTENDED_TLV_DISABLED, EXTENDED_TLV_ENABLED, NETWORK_OPTION_1, NETWORK_OPTION_2},
    };

    fn extract(text: &str) -> Relations {
        extract_relations(&parse(text).unwrap())
    }

    #[test]
    fn two_devices() {
        let relations = extract("[<dev1>]\nnetwork_option 2\n[eth0]\n[eth1]\n[<dev2>]\n[eth2]");

        assert_eq!(relations.len(), 2);

        let dev1 = &relations.devices[0];
        assert_eq!(dev1.name, "dev1");
        assert_eq!(dev1.ifaces, vec!["eth0", "eth1"]);
        assert_eq!(dev1.network_option, NETWORK_OPTION_2);

        let dev2 = &relations.devices[1];
        assert_eq!(dev2.name, "dev2");
        assert_eq!(dev2.ifaces, vec!["eth2"]);
        assert_eq!(dev2.network_option, NETWORK_OPTION_1);
    }

    #[test]
    fn device_without_ports() {
        let relations = extract("[<dev1>]\n[<dev2>]\n[eth0]");

        assert_eq!(relations.devices[0].name, "dev1");
        assert!(relations.devices[0].ifaces.is_empty());
        assert_eq!(relations.devices[1].ifaces, vec!["eth0"]);
    }

    #[test]
    fn global_is_not_a_port() {
        let relations = extract("[global]\nlogging_level 7\n[<synce1>]\n[global]\n[ens7f0]");

        assert_eq!(relations.devices[0].ifaces, vec!["ens7f0"]);
    }

    #[test]
    fn external_source() {
        let relations = extract("[<synce1>]\nextended_tlv 1\n[{SMA1}]\ninput_QL 0x1\n[ens7f0]");

        let device = &relations.devices[0];
        assert_eq!(device.external_source.as_deref(), Some("SMA1"));
        assert_eq!(device.extended_tlv, EXTENDED_TLV_ENABLED);
        assert_eq!(device.ifaces, vec!["ens7f0"]);
    }

    #[test]
    fn malformed_extended_tlv_keeps_default() {
        let relations = extract("[<synce1>]\nextended_tlv abc\nnetwork_option x\n[eth0]");

        let device = &relations.devices[0];
        assert_eq!(device.extended_tlv, EXTENDED_TLV_DISABLED);
        assert_eq!(device.network_option, NETWORK_OPTION_1);
        assert_eq!(device.ifaces, vec!["eth0"]);
    }

    #[test]
    fn ports_before_first_device_are_ignored() {
        let relations = extract("[eth9]\n[{GNSS}]\n[<synce1>]\n[eth0]");

        assert_eq!(relations.len(), 1);
        assert_eq!(relations.devices[0].ifaces, vec!["eth0"]);
        assert_eq!(relations.devices[0].external_source, None);
    }

    #[test]
    fn unnamed_device_is_dropped() {
        let relations = extract("[<>]\n[eth0]\n[<synce1>]\n[eth1]");

        assert_eq!(relations.len(), 1);
        assert_eq!(relations.devices[0].ifaces, vec!["eth1"]);
    }

    #[test]
    fn no_devices() {
        assert!(extract("[global]\n[eth0]").is_empty());
    }
}
