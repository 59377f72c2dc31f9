use std::path::Path;

use thiserror::Error;
use tokio::sync::mpsc;

use crate::profile::{load_profiles, ProfileError, Profiles, PtpProfile};

#[derive(Error, Debug)]
pub enum UpdateError {
    #[error("{0} doesn't exist")]
    DefaultConfigMissing(String),
    #[error("failed to read {path}: {source}")]
    DefaultConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Profile(#[from] ProfileError),
    #[error("nobody is listening for configuration updates")]
    ChannelClosed,
}

/// Hands new sets of profiles to whoever renders and applies them.
///
/// Updates are serialized through a single channel, so each set of profiles
/// is processed completely before the next one is looked at.
pub struct ConfUpdate {
    sender: mpsc::Sender<Vec<PtpProfile>>,
    applied_profiles_json: Vec<u8>,
    default_ptp4l_config: String,
}

impl ConfUpdate {
    pub fn new(default_ptp4l_config: String) -> (Self, mpsc::Receiver<Vec<PtpProfile>>) {
        let (sender, receiver) = mpsc::channel(1);

        let update = Self {
            sender,
            applied_profiles_json: Vec::new(),
            default_ptp4l_config,
        };

        (update, receiver)
    }

    /// Read the default ptp4l configuration from disk.
    pub async fn from_file(
        path: impl AsRef<Path>,
    ) -> Result<(Self, mpsc::Receiver<Vec<PtpProfile>>), UpdateError> {
        let path = path.as_ref();
        let display = path.display().to_string();

        let contents = match tokio::fs::read_to_string(path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(UpdateError::DefaultConfigMissing(display));
            }
            Err(source) => {
                return Err(UpdateError::DefaultConfigRead {
                    path: display,
                    source,
                });
            }
        };

        Ok(Self::new(contents))
    }

    pub fn default_ptp4l_config(&self) -> &str {
        &self.default_ptp4l_config
    }

    /// Decode a new set of profiles and pass it on.
    ///
    /// Does nothing if the json is identical to the last applied one, or if
    /// it is an old style configuration without a profile.
    pub async fn update_config(&mut self, profiles_json: &[u8]) -> Result<(), UpdateError> {
        if self.applied_profiles_json == profiles_json {
            return Ok(());
        }

        let profiles = match load_profiles(profiles_json)? {
            Profiles::List(profiles) => {
                log::info!("load profiles");
                profiles
            }
            Profiles::Single(profile) if profile.is_empty() => {
                log::info!("Skip no profile {profile:?}");
                return Ok(());
            }
            Profiles::Single(profile) => {
                log::info!("load profiles using old method");
                vec![profile]
            }
        };

        self.sender
            .send(profiles)
            .await
            .map_err(|_| UpdateError::ChannelClosed)?;
        self.applied_profiles_json = profiles_json.to_vec();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROFILES: &[u8] = br#"[{"name": "gm", "interface": "ens1f0"}]"#;

    #[tokio::test]
    async fn sends_new_profiles_once() {
        let (mut update, mut receiver) = ConfUpdate::new(String::new());

        update.update_config(PROFILES).await.unwrap();
        let profiles = receiver.recv().await.unwrap();
        assert_eq!(profiles[0].name(), "gm");

        update.update_config(PROFILES).await.unwrap();
        assert!(receiver.try_recv().is_err());
    }

    #[tokio::test]
    async fn old_style_profile() {
        let (mut update, mut receiver) = ConfUpdate::new(String::new());

        update
            .update_config(br#"{"name": "oc", "interface": "eth0"}"#)
            .await
            .unwrap();
        let profiles = receiver.recv().await.unwrap();
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].name(), "oc");
    }

    #[tokio::test]
    async fn empty_old_style_profile_is_skipped() {
        let (mut update, mut receiver) = ConfUpdate::new(String::new());

        update
            .update_config(br#"{"name":null,"interface":null}"#)
            .await
            .unwrap();
        assert!(receiver.try_recv().is_err());
    }

    #[tokio::test]
    async fn bad_json() {
        let (mut update, _receiver) = ConfUpdate::new(String::new());

        assert!(matches!(
            update.update_config(b"{").await,
            Err(UpdateError::Profile(_))
        ));
    }

    #[tokio::test]
    async fn closed_channel() {
        let (mut update, receiver) = ConfUpdate::new(String::new());
        drop(receiver);

        assert!(matches!(
            update.update_config(PROFILES).await,
            Err(UpdateError::ChannelClosed)
        ));
    }

    #[tokio::test]
    async fn missing_default_config() {
        assert!(matches!(
            ConfUpdate::from_file("/nonexistent/ptp4l.conf").await,
            Err(UpdateError::DefaultConfigMissing(_))
        ));
    }
}
