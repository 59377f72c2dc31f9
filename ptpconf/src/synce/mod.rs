//! SyncE (synchronous ethernet) device and port groupings.
//!
//! A synce4l configuration groups ports into logical devices. A device is
//! opened by a section with an angle bracketed name, e.g. `[<synce1>]`, and
//! every port section after it belongs to that device, until the next device
//! section. An external frequency source for the open device is declared with
//! a curly bracketed section, e.g. `[{SMA1}]`.

use std::{
    collections::{BTreeMap, HashMap},
    hash::BuildHasher,
};

mod extract;

pub use extract::extract_relations;

pub const NETWORK_OPTION_1: i32 = 1;
pub const NETWORK_OPTION_2: i32 = 2;

pub const EXTENDED_TLV_DISABLED: i32 = 0;
pub const EXTENDED_TLV_ENABLED: i32 = 1;

pub const CLOCK_ID: &str = "clock_id";
pub const NETWORK_OPTION: &str = "network_option";
pub const EXTENDED_TLV: &str = "extended_tlv";

/// Last quality level seen on a port. Maintained by the SyncE runtime.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualityLevelInfo {
    pub priority: i32,
    pub ssm: u8,
    pub extended_ssm: u8,
}

/// Configuration of a single SyncE device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynceDeviceConfig {
    pub name: String,
    /// Ports of this device, in configuration order.
    pub ifaces: Vec<String>,
    /// Empty until assigned, see [`ClockIdAssigner`].
    pub clock_id: String,
    pub network_option: i32,
    pub extended_tlv: i32,
    pub external_source: Option<String>,
    pub last_ql_state: HashMap<String, QualityLevelInfo>,
    pub last_clock_state: String,
}

impl Default for SynceDeviceConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            ifaces: Vec::new(),
            clock_id: String::new(),
            network_option: NETWORK_OPTION_1,
            extended_tlv: EXTENDED_TLV_DISABLED,
            external_source: None,
            last_ql_state: HashMap::new(),
            last_clock_state: String::new(),
        }
    }
}

impl SynceDeviceConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// All SyncE devices of a configuration, in configuration order.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct Relations {
    pub devices: Vec<SynceDeviceConfig>,
}

impl Relations {
    pub fn register_device_config(&mut self, config: SynceDeviceConfig) {
        self.devices.push(config);
    }

    pub fn device(&self, name: &str) -> Option<&SynceDeviceConfig> {
        self.devices.iter().find(|device| device.name == name)
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}

/// Provides clock identities for SyncE devices.
pub trait ClockIdAssigner {
    fn assign_clock_ids(&self, relations: &mut Relations);
}

/// Key under which the ptp settings of a profile carry the clock identity of
/// the hardware behind `iface`.
pub fn clock_id_key(iface: &str) -> String {
    format!("clockId[{iface}]")
}

fn assign_from_settings(relations: &mut Relations, lookup: impl Fn(&str) -> Option<String>) {
    for device in &mut relations.devices {
        let found = device
            .ifaces
            .iter()
            .find_map(|iface| lookup(&clock_id_key(iface)));

        match found {
            Some(clock_id) => device.clock_id = clock_id,
            None => log::debug!("no clock id found for synce device {}", device.name),
        }
    }
}

impl<S: BuildHasher> ClockIdAssigner for HashMap<String, String, S> {
    fn assign_clock_ids(&self, relations: &mut Relations) {
        assign_from_settings(relations, |key| self.get(key).cloned())
    }
}

impl ClockIdAssigner for BTreeMap<String, String> {
    fn assign_clock_ids(&self, relations: &mut Relations) {
        assign_from_settings(relations, |key| self.get(key).cloned())
    }
}
