use near_sdk_macros::NearSchema;

/// Returned under `#[handle_result]`; an `Err` aborts the receipt with the Display message.
#[derive(NearSchema, near_sdk::FunctionError)]
#[abi(borsh, json)]
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum TicketNftError {
    Unauthorized(String),
    InvalidInput(String),
    /// Every ticket for the event tag has been minted.
    SoldOut(String),
    InsufficientDeposit(String),
}

impl std::fmt::Display for TicketNftError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Self::SoldOut(msg) => write!(f, "Sold out: {}", msg),
            Self::InsufficientDeposit(msg) => write!(f, "Insufficient deposit: {}", msg),
        }
    }
}
