mod builder;
mod types;

mod contract;
mod sales;

pub use contract::*;
pub use sales::*;

pub(crate) const STANDARD: &str = "ticketing";
pub(crate) const VERSION: &str = "1.0.0";
pub(crate) const PREFIX: &str = "EVENT_JSON:";

pub(crate) const CONTRACT: &str = "CONTRACT_UPDATE";
pub(crate) const TICKET: &str = "TICKET_UPDATE";
pub(crate) const TREASURY: &str = "TREASURY_UPDATE";
