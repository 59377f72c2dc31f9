//! Profiles as handed to the daemon by the controller.
//!
//! The controller writes a JSON list of profiles. Older controllers wrote a
//! single profile object instead, which is still accepted.

use std::collections::HashMap;

use serde::Deserialize;
use thiserror::Error;

#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PtpProfile {
    pub name: Option<String>,
    pub interface: Option<String>,
    pub ptp4l_opts: Option<String>,
    pub phc2sys_opts: Option<String>,
    pub ts2phc_opts: Option<String>,
    pub synce4l_opts: Option<String>,
    pub ptp4l_conf: Option<String>,
    pub ts2phc_conf: Option<String>,
    pub synce4l_conf: Option<String>,
    pub ptp_scheduling_policy: Option<String>,
    pub ptp_scheduling_priority: Option<i64>,
    #[serde(default)]
    pub ptp_settings: HashMap<String, String>,
}

impl PtpProfile {
    /// Old style configurations signal "no profile" with a null name or
    /// interface.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() || self.interface.is_none()
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }
}

/// Which layout the profile JSON had.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Profiles {
    List(Vec<PtpProfile>),
    Single(PtpProfile),
}

#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("unable to load profile config: {0}")]
    Unrecognized(#[source] serde_json::Error),
}

pub fn load_profiles(json: &[u8]) -> Result<Profiles, ProfileError> {
    if let Ok(profiles) = serde_json::from_slice(json) {
        return Ok(Profiles::List(profiles));
    }

    serde_json::from_slice(json)
        .map(Profiles::Single)
        .map_err(ProfileError::Unrecognized)
}
