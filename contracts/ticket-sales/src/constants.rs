//! Sale-wide constants.

use near_sdk::NearToken;

/// No deposit / 1 yocto
pub const NO_DEPOSIT: NearToken = NearToken::from_yoctonear(0);
pub const ONE_YOCTO: NearToken = NearToken::from_yoctonear(1);

/// ":" is not a valid character in NEAR account IDs, so "{account_id}:{event_tag}" keys cannot collide.
pub const DELIMETER: &str = ":";

/// Event tags are stored as map keys and echoed in every event log.
pub const MAX_EVENT_TAG_LEN: usize = 64;

/// Upper bound for configured decimals; 10^30 times any sane whole-token price still fits in u128.
pub const MAX_TOKEN_DECIMALS: u8 = 30;

// Default decimals for the accepted payment tokens.
pub const GOHM_DECIMALS: u8 = 18;
pub const USDC_DECIMALS: u8 = 6;
pub const FRAX_DECIMALS: u8 = 18;
pub const DAI_DECIMALS: u8 = 18;

// Gas constants (TGas)
pub const GAS_MINT_TICKET_TGAS: u64 = 25;
pub const GAS_MINT_CALLBACK_TGAS: u64 = 15;
pub const GAS_FT_TRANSFER_TGAS: u64 = 15;
pub const GAS_WITHDRAW_CALLBACK_TGAS: u64 = 10;
pub const GAS_WITHDRAW_ALL_CALLBACK_TGAS: u64 = 10;
pub const GAS_MIGRATE_TGAS: u64 = 200;

/// Upper bound on the minted ticket JSON read back in the mint callback.
pub const MAX_MINT_RESULT_LEN: usize = 2_048;
