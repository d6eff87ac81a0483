//! In-person event tickets. NEP-171/177/181 compliant; minted only by the ticket sales contract,
//! capped per event tag by `ticket_inventories`.

use near_contract_standards::non_fungible_token::metadata::{
    NFTContractMetadata, NonFungibleTokenMetadataProvider, TokenMetadata, NFT_METADATA_SPEC,
};
use near_contract_standards::non_fungible_token::{NonFungibleToken, Token, TokenId};
use near_sdk::store::LookupMap;
use near_sdk::{env, near, AccountId, BorshStorageKey, PanicOnDefault};

mod errors;
mod events;
mod mint;
mod nep171;

pub use errors::TicketNftError;

/// Event tags are stored as map keys and copied into token metadata.
pub const MAX_EVENT_TAG_LEN: usize = 64;

pub const ONE_YOCTO: near_sdk::NearToken = near_sdk::NearToken::from_yoctonear(1);

#[derive(BorshStorageKey)]
#[near]
enum StorageKey {
    NonFungibleToken,
    TokenMetadata,
    Enumeration,
    SoldPerEvent,
}

#[near(contract_state)]
#[derive(PanicOnDefault)]
pub struct Contract {
    tokens: NonFungibleToken,
    metadata: NFTContractMetadata,
    owner_id: AccountId,
    /// Sole account allowed to call `mint`.
    ticket_contract: AccountId,
    /// Per-event-tag cap.
    ticket_inventories: u64,
    /// Last issued token id; ids start at 1.
    token_ids: u64,
    sold_per_event: LookupMap<String, u64>,
}

#[near]
impl Contract {
    /// The deploying account becomes the owner; `ticket_contract` becomes the minter.
    #[init]
    pub fn new(ticket_contract: AccountId, metadata: Option<NFTContractMetadata>) -> Self {
        let metadata = metadata.unwrap_or_else(|| NFTContractMetadata {
            spec: NFT_METADATA_SPEC.to_string(),
            name: "In-Person Event Ticket".to_string(),
            symbol: "TICKET".to_string(),
            icon: None,
            base_uri: None,
            reference: None,
            reference_hash: None,
        });
        metadata.assert_valid();

        let owner_id = env::predecessor_account_id();
        Self {
            tokens: NonFungibleToken::new(
                StorageKey::NonFungibleToken,
                owner_id.clone(),
                Some(StorageKey::TokenMetadata),
                Some(StorageKey::Enumeration),
                None::<StorageKey>,
            ),
            metadata,
            owner_id,
            ticket_contract,
            ticket_inventories: 0,
            token_ids: 0,
            sold_per_event: LookupMap::new(StorageKey::SoldPerEvent),
        }
    }

    // --- Admin ---

    /// Owner only. Cap applies to each event tag separately; lowering it below
    /// what is already sold simply stops further mints.
    #[payable]
    #[handle_result]
    pub fn set_ticket_inventories(&mut self, count: u64) -> Result<(), TicketNftError> {
        self.check_owner_call()?;
        let old_count = std::mem::replace(&mut self.ticket_inventories, count);
        events::emit_inventories_updated(&self.owner_id, old_count, count);
        Ok(())
    }

    /// Owner only.
    #[payable]
    #[handle_result]
    pub fn set_ticket_contract(&mut self, ticket_contract: AccountId) -> Result<(), TicketNftError> {
        self.check_owner_call()?;
        let old_contract = std::mem::replace(&mut self.ticket_contract, ticket_contract);
        events::emit_ticket_contract_changed(&self.owner_id, &old_contract, &self.ticket_contract);
        Ok(())
    }

    /// Owner only.
    #[payable]
    #[handle_result]
    pub fn transfer_ownership(&mut self, new_owner: AccountId) -> Result<(), TicketNftError> {
        self.check_owner_call()?;
        if new_owner == self.owner_id {
            return Err(TicketNftError::InvalidInput(
                "New owner must differ from current owner".to_string(),
            ));
        }
        let old_owner = std::mem::replace(&mut self.owner_id, new_owner);
        events::emit_owner_transferred(&old_owner, &self.owner_id);
        Ok(())
    }

    // --- Views ---

    pub fn ticket_inventories(&self) -> u64 {
        self.ticket_inventories
    }

    pub fn token_ids(&self) -> u64 {
        self.token_ids
    }

    pub fn tickets_sold(&self, event_tag: String) -> u64 {
        self.sold_per_event.get(&event_tag).copied().unwrap_or(0)
    }

    pub fn remaining_inventory(&self, event_tag: String) -> u64 {
        self.ticket_inventories
            .saturating_sub(self.tickets_sold(event_tag))
    }

    /// Event tag a ticket admits to.
    pub fn ticket_event(&self, token_id: TokenId) -> Option<String> {
        self.tokens
            .token_metadata_by_id
            .as_ref()
            .and_then(|by_id| by_id.get(&token_id))
            .and_then(|metadata| metadata.extra)
    }

    pub fn get_ticket_contract(&self) -> &AccountId {
        &self.ticket_contract
    }

    pub fn owner(&self) -> &AccountId {
        &self.owner_id
    }

    fn check_owner_call(&self) -> Result<(), TicketNftError> {
        if env::attached_deposit() != ONE_YOCTO {
            return Err(TicketNftError::InsufficientDeposit(
                "Requires attached deposit of exactly 1 yoctoNEAR".into(),
            ));
        }
        if env::predecessor_account_id() != self.owner_id {
            return Err(TicketNftError::Unauthorized(
                "Only the contract owner can perform this action".into(),
            ));
        }
        Ok(())
    }
}

// --- NEP-177: Non-Fungible Token Metadata ---
#[near]
impl NonFungibleTokenMetadataProvider for Contract {
    fn nft_metadata(&self) -> NFTContractMetadata {
        self.metadata.clone()
    }
}

pub(crate) fn ticket_metadata(token_id: &str, event_tag: &str) -> TokenMetadata {
    TokenMetadata {
        title: Some(format!("{} ticket #{}", event_tag, token_id)),
        description: Some(format!("Admits one to {}", event_tag)),
        media: None,
        media_hash: None,
        copies: Some(1),
        issued_at: Some(env::block_timestamp_ms().to_string()),
        expires_at: None,
        starts_at: None,
        updated_at: None,
        extra: Some(event_tag.to_string()),
        reference: None,
        reference_hash: None,
    }
}
