//! Panel application API client.

use botkit_core::{FetchConfig, PanelConfig};
use botkit_fetch::{FetchRequest, Fetcher, RetryPolicy};
use serde_json::json;
use tracing::{debug, info, instrument};

use super::error::PanelError;
use super::types::{NewServer, NewUser, PanelList, PanelObject, PowerAction, Server, User};

// ============================================================================
// Constants
// ============================================================================

const USERS: &str = "api/application/users";
const SERVERS: &str = "api/application/servers";
const CLIENT_SERVERS: &str = "api/client/servers";

// ============================================================================
// API Client
// ============================================================================

/// Panel application API client.
#[derive(Debug, Clone)]
pub struct PanelClient {
    fetcher: Fetcher,
}

impl PanelClient {
    /// Creates a client for the panel at `base_url`.
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, PanelError> {
        Ok(Self::with_fetcher(Fetcher::new(base_url)?, api_key))
    }

    /// Creates a client from the `panel` and `fetch` configuration sections.
    ///
    /// The API key is read from the environment variable named in the
    /// config, never from the file itself.
    pub fn from_config(panel: &PanelConfig, fetch: &FetchConfig) -> Result<Self, PanelError> {
        let base_url = panel.base_url.as_deref().ok_or(PanelError::MissingBaseUrl)?;
        let api_key = panel
            .api_key()
            .ok_or_else(|| PanelError::MissingApiKey(panel.api_key_env.clone()))?;

        let fetcher = Fetcher::from_config(base_url, fetch)?;
        Ok(Self::with_fetcher(fetcher, &api_key))
    }

    /// Wraps an existing fetcher, adding bearer auth and a single-attempt policy.
    pub fn with_fetcher(fetcher: Fetcher, api_key: &str) -> Self {
        let policy = RetryPolicy {
            max_attempts: 1,
            ..fetcher.policy()
        };
        let fetcher = fetcher
            .with_policy(policy)
            .with_header("Authorization", format!("Bearer {api_key}"));
        Self { fetcher }
    }

    // ------------------------------------------------------------------------
    // Users
    // ------------------------------------------------------------------------

    /// Lists users on the first page.
    #[instrument(skip(self))]
    pub async fn list_users(&self) -> Result<Vec<User>, PanelError> {
        let list: PanelList<User> = self.fetcher.fetch_json(FetchRequest::get(USERS)).await?;
        debug!(count = list.data.len(), "Fetched users");
        Ok(list.into_attributes())
    }

    /// Fetches one user by ID.
    #[instrument(skip(self))]
    pub async fn get_user(&self, id: u64) -> Result<User, PanelError> {
        let user: PanelObject<User> = self
            .fetcher
            .fetch_json(FetchRequest::get(format!("{USERS}/{id}")))
            .await?;
        Ok(user.attributes)
    }

    /// Creates a user.
    #[instrument(skip(self, user), fields(username = %user.username))]
    pub async fn create_user(&self, user: &NewUser) -> Result<User, PanelError> {
        let request = FetchRequest::post(USERS).try_json(user)?;
        let created: PanelObject<User> = self.fetcher.fetch_json(request).await?;
        info!(id = created.attributes.id, "Created user");
        Ok(created.attributes)
    }

    /// Deletes a user.
    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: u64) -> Result<(), PanelError> {
        self.fetcher
            .fetch_empty(FetchRequest::delete(format!("{USERS}/{id}")))
            .await?;
        info!("Deleted user");
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Servers
    // ------------------------------------------------------------------------

    /// Lists servers on the first page.
    #[instrument(skip(self))]
    pub async fn list_servers(&self) -> Result<Vec<Server>, PanelError> {
        let list: PanelList<Server> = self.fetcher.fetch_json(FetchRequest::get(SERVERS)).await?;
        debug!(count = list.data.len(), "Fetched servers");
        Ok(list.into_attributes())
    }

    /// Fetches one server by ID.
    #[instrument(skip(self))]
    pub async fn get_server(&self, id: u64) -> Result<Server, PanelError> {
        let server: PanelObject<Server> = self
            .fetcher
            .fetch_json(FetchRequest::get(format!("{SERVERS}/{id}")))
            .await?;
        Ok(server.attributes)
    }

    /// Creates a server.
    #[instrument(skip(self, server), fields(name = %server.name, owner = server.user))]
    pub async fn create_server(&self, server: &NewServer) -> Result<Server, PanelError> {
        let request = FetchRequest::post(SERVERS).try_json(server)?;
        let created: PanelObject<Server> = self.fetcher.fetch_json(request).await?;
        info!(id = created.attributes.id, "Created server");
        Ok(created.attributes)
    }

    /// Suspends a server.
    #[instrument(skip(self))]
    pub async fn suspend_server(&self, id: u64) -> Result<(), PanelError> {
        self.fetcher
            .fetch_empty(FetchRequest::post(format!("{SERVERS}/{id}/suspend")))
            .await?;
        Ok(())
    }

    /// Lifts a suspension.
    #[instrument(skip(self))]
    pub async fn unsuspend_server(&self, id: u64) -> Result<(), PanelError> {
        self.fetcher
            .fetch_empty(FetchRequest::post(format!("{SERVERS}/{id}/unsuspend")))
            .await?;
        Ok(())
    }

    /// Deletes a server.
    #[instrument(skip(self))]
    pub async fn delete_server(&self, id: u64) -> Result<(), PanelError> {
        self.fetcher
            .fetch_empty(FetchRequest::delete(format!("{SERVERS}/{id}")))
            .await?;
        info!("Deleted server");
        Ok(())
    }

    /// Sends a power signal through the client API.
    ///
    /// `identifier` is the server's short identifier, not its numeric ID.
    #[instrument(skip(self), fields(signal = action.as_str()))]
    pub async fn send_power_action(&self, identifier: &str, action: PowerAction) -> Result<(), PanelError> {
        let request = FetchRequest::post(format!("{CLIENT_SERVERS}/{identifier}/power"))
            .json(json!({ "signal": action }));
        self.fetcher.fetch_empty(request).await?;
        Ok(())
    }
}
