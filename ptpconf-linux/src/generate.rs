//! Turn a profile into the configuration files of the linuxptp daemons.

use ptpconf::{parse, render, render_synce, ClockRole, Iface, ParseError, Relations, RenderError};
use thiserror::Error;

use crate::profile::PtpProfile;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    #[error("invalid ptp4l config: {0}")]
    Ptp4l(#[source] ParseError),
    #[error("invalid ts2phc config: {0}")]
    Ts2phc(#[source] ParseError),
    #[error("invalid synce4l config: {0}")]
    Synce4lParse(#[source] ParseError),
    #[error("could not render synce4l config: {0}")]
    Synce4lRender(#[from] RenderError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedDaemonConfig {
    pub text: String,
    pub ifaces: Vec<Iface>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedSynceConfig {
    pub text: String,
    pub relations: Relations,
}

/// Everything rendered from a single profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedProfile {
    pub name: String,
    pub clock_role: ClockRole,
    pub ptp4l: GeneratedDaemonConfig,
    pub ts2phc: Option<GeneratedDaemonConfig>,
    pub synce4l: Option<GeneratedSynceConfig>,
}

/// Render all configurations of `profile`.
///
/// A profile without a ptp4l configuration gets `default_ptp4l_config`.
/// Nothing is returned if any of the configurations is invalid, so a profile
/// is never applied halfway.
pub fn generate(
    profile: &PtpProfile,
    default_ptp4l_config: &str,
) -> Result<GeneratedProfile, GenerateError> {
    let name = profile.name();

    let ptp4l_text = profile
        .ptp4l_conf
        .as_deref()
        .unwrap_or(default_ptp4l_config);
    let ptp4l_document = parse(ptp4l_text).map_err(GenerateError::Ptp4l)?;
    let ptp4l = render(&ptp4l_document, name);

    let ts2phc = match profile.ts2phc_conf.as_deref() {
        Some(text) => {
            let document = parse(text).map_err(GenerateError::Ts2phc)?;
            let rendered = render(&document, name);
            Some(GeneratedDaemonConfig {
                text: rendered.text,
                ifaces: rendered.ifaces,
            })
        }
        None => None,
    };

    let synce4l = match profile.synce4l_conf.as_deref() {
        Some(text) => {
            let document = parse(text).map_err(GenerateError::Synce4lParse)?;
            let rendered = render_synce(&document, name, &profile.ptp_settings)?;
            Some(GeneratedSynceConfig {
                text: rendered.text,
                relations: rendered.relations,
            })
        }
        None => None,
    };

    log::debug!(
        "profile {name} configures a {} with {} ports",
        ptp4l_document.clock_role(),
        ptp4l.mapping.len()
    );

    Ok(GeneratedProfile {
        name: name.to_owned(),
        clock_role: ptp4l_document.clock_role(),
        ptp4l: GeneratedDaemonConfig {
            text: ptp4l.text,
            ifaces: ptp4l.ifaces,
        },
        ts2phc,
        synce4l,
    })
}
