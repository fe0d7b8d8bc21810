//! Game panel application API client.
//!
//! Bearer-authenticated CRUD over users and servers. Calls are attempted
//! once since creates and deletes are not idempotent.

mod api;
mod error;
mod types;

pub use api::PanelClient;
pub use error::PanelError;
pub use types::{
    Allocation, FeatureLimits, Limits, NewServer, NewUser, PanelList, PanelObject, PowerAction,
    Server, User,
};
