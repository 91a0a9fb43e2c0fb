use tokio::sync::mpsc;

use crate::config::AppConfig;
use crate::core::fetch::ProfileClient;

use super::events::AppEvent;

/// Centralized handle to the backend.
///
/// Created once at startup and shared with the views that need it. The
/// only backend here is the profile API client and the event channel.
pub struct Services {
    pub client: ProfileClient,
    pub event_tx: mpsc::UnboundedSender<AppEvent>,
}

impl Services {
    pub fn new(config: &AppConfig, event_tx: mpsc::UnboundedSender<AppEvent>) -> Self {
        let endpoint = config.endpoint();
        log::info!("Profile endpoint: {endpoint}");
        Self {
            client: ProfileClient::new(endpoint),
            event_tx,
        }
    }

    /// Kick off the one-shot profile fetch.
    ///
    /// Success is forwarded into the event loop. Failure is logged and
    /// otherwise dropped, so the dashboard keeps its loading screen.
    pub fn spawn_fetch(&self) {
        let client = self.client.clone();
        let tx = self.event_tx.clone();

        tokio::spawn(async move {
            match client.fetch_profiles().await {
                Ok(profiles) => {
                    log::info!("Fetched {} profiles", profiles.len());
                    let _ = tx.send(AppEvent::ProfilesLoaded(profiles));
                }
                Err(e) => {
                    log::error!("Error fetching data: {e}");
                }
            }
        });
    }
}
