//! Ticket sales: per-event prices in USD stablecoins or gOHM, NEP-141 payment, in-person NFT minting, treasury sweeps.

use near_sdk::store::{LookupMap, LookupSet};
use near_sdk::json_types::U128;
use near_sdk::{
    env, near, AccountId, BorshStorageKey, Gas, PanicOnDefault, Promise, PromiseOrValue,
};

// --- Modules ---

mod admin;
pub mod constants;
mod errors;
mod events;
mod external;
mod guards;
mod purchase;
pub mod types;
mod views;
mod withdraw;

pub use constants::*;
pub use errors::TicketError;
pub use types::*;

// --- Storage Keys ---

#[near]
#[derive(BorshStorageKey)]
pub enum StorageKey {
    UsdTicketPrices,
    GohmTicketPrices,
    OnlineAttendees,
    OnlineSales,
}

// --- Contract State ---

#[near(
    contract_state,
    contract_metadata(
        version = "0.1.0",
        standard(standard = "nep297", version = "1.0.0"),
    )
)]
#[derive(PanicOnDefault)]
pub struct Contract {
    /// From Cargo.toml; updated on each migration.
    pub version: String,

    pub owner_id: AccountId,
    /// Receives every `withdraw_token` sweep.
    pub treasury_id: AccountId,
    /// Unset until the NFT contract is deployed and bound.
    pub in_person_ticket_nft: Option<AccountId>,

    /// Accepted payment tokens with their settled proceeds.
    pub tokens: Vec<TokenConfig>,

    /// Whole-token prices keyed by event tag.
    pub usd_ticket_prices: LookupMap<String, u128>,
    pub gohm_ticket_prices: LookupMap<String, u128>,

    /// Key: "{account_id}:{event_tag}".
    pub online_attendees: LookupSet<String>,
    pub online_sales: LookupMap<String, u64>,
}

impl Contract {
    pub(crate) fn token_by_symbol(&self, token: PaymentToken) -> &TokenConfig {
        // Every variant is configured at init.
        self.tokens
            .iter()
            .find(|t| t.token == token)
            .unwrap_or_else(|| env::panic_str("Payment token not configured"))
    }

    pub(crate) fn token_by_symbol_mut(&mut self, token: PaymentToken) -> &mut TokenConfig {
        self.tokens
            .iter_mut()
            .find(|t| t.token == token)
            .unwrap_or_else(|| env::panic_str("Payment token not configured"))
    }

    pub(crate) fn token_by_account(&self, account_id: &AccountId) -> Option<&TokenConfig> {
        self.tokens.iter().find(|t| &t.account_id == account_id)
    }
}

pub(crate) fn attendee_key(account_id: &AccountId, event_tag: &str) -> String {
    format!("{}{}{}", account_id, DELIMETER, event_tag)
}
