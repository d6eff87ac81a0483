use crate::*;

/// Tokens the sale accepts. gOHM pays the governance-token price; the stablecoins pay the USD price.
#[near(serializers = [borsh, json])]
#[serde(rename_all = "lowercase")]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaymentToken {
    Gohm,
    Usdc,
    Frax,
    Dai,
}

impl PaymentToken {
    pub const ALL: [PaymentToken; 4] = [Self::Gohm, Self::Usdc, Self::Frax, Self::Dai];

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Gohm => "gohm",
            Self::Usdc => "usdc",
            Self::Frax => "frax",
            Self::Dai => "dai",
        }
    }

    /// Case-insensitive; buyers commonly pass "DAI" or "dai".
    pub fn from_symbol(symbol: &str) -> Result<Self, TicketError> {
        Self::ALL
            .into_iter()
            .find(|t| t.symbol().eq_ignore_ascii_case(symbol.trim()))
            .ok_or_else(|| TicketError::unknown_token(symbol))
    }

    pub fn is_governance(&self) -> bool {
        matches!(self, Self::Gohm)
    }

    pub fn currency(&self) -> &'static str {
        if self.is_governance() { "gOHM" } else { "USD" }
    }

    pub fn default_decimals(&self) -> u8 {
        match self {
            Self::Gohm => GOHM_DECIMALS,
            Self::Usdc => USDC_DECIMALS,
            Self::Frax => FRAX_DECIMALS,
            Self::Dai => DAI_DECIMALS,
        }
    }
}

impl std::fmt::Display for PaymentToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

#[near(serializers = [borsh, json])]
#[derive(Clone, Debug)]
pub struct TokenConfig {
    pub token: PaymentToken,
    pub account_id: AccountId,
    pub decimals: u8,
    /// Settled proceeds not yet swept to the treasury.
    pub balance: U128,
}

impl TokenConfig {
    pub(crate) fn new(token: PaymentToken, account_id: AccountId) -> Self {
        Self {
            token,
            account_id,
            decimals: token.default_decimals(),
            balance: U128(0),
        }
    }

    /// Whole-token price in the token's smallest unit.
    pub(crate) fn scale(&self, whole_units: u128) -> Result<u128, TicketError> {
        10u128
            .checked_pow(self.decimals as u32)
            .and_then(|factor| whole_units.checked_mul(factor))
            .ok_or_else(|| TicketError::InvalidState("Ticket price overflows token units".into()))
    }
}

/// `ft_transfer_call` message: `{"action":"buy_ticket","token_symbol":"dai","event_tag":"2022-in-person","is_in_person":true}`.
#[near(serializers = [json])]
#[serde(tag = "action", rename_all = "snake_case")]
#[derive(Clone, Debug)]
pub enum TicketAction {
    BuyTicket {
        token_symbol: String,
        event_tag: String,
        is_in_person: bool,
    },
}

impl TicketAction {
    pub fn parse(msg: &str) -> Result<Self, TicketError> {
        near_sdk::serde_json::from_str(msg)
            .map_err(|e| TicketError::InvalidInput(format!("Invalid transfer message: {}", e)))
    }
}

/// Minimal view of the NEP-171 token returned by the NFT contract's `mint`.
#[near(serializers = [json])]
#[derive(Clone, Debug)]
pub struct MintedTicket {
    pub token_id: String,
    pub owner_id: AccountId,
}

#[near(serializers = [json])]
#[derive(Clone, Debug)]
pub struct SaleConfig {
    pub version: String,
    pub owner_id: AccountId,
    pub treasury_id: AccountId,
    pub in_person_ticket_nft: Option<AccountId>,
    pub tokens: Vec<TokenConfig>,
}
