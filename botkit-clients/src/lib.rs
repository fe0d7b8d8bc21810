// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

//! # botkit Clients
//!
//! Thin API clients on top of [`botkit_fetch::Fetcher`].
//!
//! - [`scraper`] - search, download and image endpoints of a scraper aggregator
//! - [`panel`] - bearer-authenticated game panel application API
//!
//! Both clients own a fetcher and add nothing but endpoint names,
//! parameters and response envelopes. Payloads are passed through mostly
//! untyped.

pub mod panel;
pub mod scraper;

pub use panel::{PanelClient, PanelError};
pub use scraper::{ScraperClient, ScraperError};
