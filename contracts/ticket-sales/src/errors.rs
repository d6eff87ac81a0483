//! Typed error handling for the ticket sales contract.
//!
//! Public methods return `Result<_, TicketError>` under `#[handle_result]`.
//! An `Err` aborts the receipt with the Display message, so a failed
//! purchase reverts exactly like a raw panic would.

use near_sdk_macros::NearSchema;

#[derive(NearSchema, near_sdk::FunctionError)]
#[abi(borsh, json)]
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum TicketError {
    /// Caller lacks permission (not the owner, not an accepted token, etc.)
    Unauthorized(String),
    /// Invalid parameters or malformed transfer message.
    InvalidInput(String),
    /// Requested entity does not exist.
    NotFound(String),
    /// Operation not allowed given current contract state.
    InvalidState(String),
    /// Attached deposit or transferred amount is too low.
    InsufficientDeposit(String),
    /// Internal invariant violation (should never happen).
    InternalError(String),
}

impl std::fmt::Display for TicketError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Self::NotFound(msg) => write!(f, "Not found: {}", msg),
            Self::InvalidState(msg) => write!(f, "Invalid state: {}", msg),
            Self::InsufficientDeposit(msg) => write!(f, "Insufficient deposit: {}", msg),
            Self::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

// ── Factory helpers for common errors ────────────────────────────────────────

impl TicketError {
    pub fn only_owner() -> Self {
        Self::Unauthorized("Only the contract owner can perform this action".into())
    }
    pub fn price_not_set(event_tag: &str, currency: &str) -> Self {
        Self::NotFound(format!("No {} ticket price set for '{}'", currency, event_tag))
    }
    pub fn unknown_token(symbol: &str) -> Self {
        Self::InvalidInput(format!("Unknown payment token: {}", symbol))
    }
    pub fn nft_not_bound() -> Self {
        Self::InvalidState("In-person ticket NFT contract not set".into())
    }
}
