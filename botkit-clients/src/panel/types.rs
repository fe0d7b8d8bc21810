//! Application API payloads.
//!
//! Every resource comes wrapped as `{ "object": "...", "attributes": {...} }`;
//! lists add `data` and pagination `meta`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ============================================================================
// Envelopes
// ============================================================================

/// A single resource envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelObject<T> {
    /// Resource kind, e.g. `user` or `server`.
    pub object: String,

    /// The resource itself.
    pub attributes: T,
}

/// A list envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelList<T> {
    /// Always `list`.
    pub object: String,

    /// Wrapped entries.
    #[serde(default = "Vec::new")]
    pub data: Vec<PanelObject<T>>,

    /// Pagination info, passed through.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

impl<T> PanelList<T> {
    /// Unwraps the entries.
    pub fn into_attributes(self) -> Vec<T> {
        self.data.into_iter().map(|o| o.attributes).collect()
    }
}

// ============================================================================
// Users
// ============================================================================

/// A panel user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Numeric ID.
    pub id: u64,

    /// Stable UUID.
    #[serde(default)]
    pub uuid: String,

    /// Login name.
    pub username: String,

    /// Email address.
    pub email: String,

    /// First name.
    #[serde(default)]
    pub first_name: String,

    /// Last name.
    #[serde(default)]
    pub last_name: String,

    /// Whether the user is a panel administrator.
    #[serde(default)]
    pub root_admin: bool,

    /// Everything else.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Payload for creating a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    /// Email address.
    pub email: String,

    /// Login name.
    pub username: String,

    /// First name.
    pub first_name: String,

    /// Last name.
    pub last_name: String,

    /// Initial password; the panel mails a setup link when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Grant administrator rights.
    #[serde(default)]
    pub root_admin: bool,
}

impl NewUser {
    /// Creates a payload using `username` for both name fields.
    pub fn new(email: impl Into<String>, username: impl Into<String>) -> Self {
        let username = username.into();
        Self {
            email: email.into(),
            first_name: username.clone(),
            last_name: username.clone(),
            username,
            password: None,
            root_admin: false,
        }
    }

    /// Sets the initial password.
    #[must_use]
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Grants administrator rights.
    #[must_use]
    pub fn admin(mut self) -> Self {
        self.root_admin = true;
        self
    }
}

// ============================================================================
// Servers
// ============================================================================

/// A game server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Server {
    /// Numeric ID, used by the application API.
    pub id: u64,

    /// Stable UUID.
    #[serde(default)]
    pub uuid: String,

    /// Short identifier, used by the client API.
    #[serde(default)]
    pub identifier: String,

    /// Display name.
    pub name: String,

    /// Description.
    #[serde(default)]
    pub description: String,

    /// Whether the server is suspended.
    #[serde(default)]
    pub suspended: bool,

    /// Owner user ID.
    #[serde(default)]
    pub user: u64,

    /// Resource limits.
    #[serde(default)]
    pub limits: Limits,

    /// Everything else.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Resource limits of a server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limits {
    /// Memory in MiB, 0 for unlimited.
    #[serde(default)]
    pub memory: u64,

    /// Swap in MiB, -1 for unlimited.
    #[serde(default)]
    pub swap: i64,

    /// Disk in MiB, 0 for unlimited.
    #[serde(default)]
    pub disk: u64,

    /// Block IO weight.
    #[serde(default = "default_io")]
    pub io: u64,

    /// CPU percent, 0 for unlimited.
    #[serde(default)]
    pub cpu: u64,
}

fn default_io() -> u64 {
    500
}

/// Feature limits of a server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureLimits {
    /// Databases.
    #[serde(default)]
    pub databases: u32,

    /// Extra allocations.
    #[serde(default)]
    pub allocations: u32,

    /// Backups.
    #[serde(default)]
    pub backups: u32,
}

/// Network allocation for a new server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    /// Primary allocation ID.
    pub default: u64,
}

/// Payload for creating a server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewServer {
    /// Display name.
    pub name: String,

    /// Owner user ID.
    pub user: u64,

    /// Egg ID.
    pub egg: u64,

    /// Docker image.
    pub docker_image: String,

    /// Startup command.
    pub startup: String,

    /// Egg variables.
    #[serde(default)]
    pub environment: Map<String, Value>,

    /// Resource limits.
    pub limits: Limits,

    /// Feature limits.
    pub feature_limits: FeatureLimits,

    /// Network allocation.
    pub allocation: Allocation,
}

/// Power signal for a server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerAction {
    /// Start the server.
    Start,
    /// Stop gracefully.
    Stop,
    /// Stop then start.
    Restart,
    /// Terminate immediately.
    Kill,
}

impl PowerAction {
    /// Wire name of the signal.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Restart => "restart",
            Self::Kill => "kill",
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
