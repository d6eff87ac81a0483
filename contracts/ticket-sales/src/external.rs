// External contract interfaces for cross-contract calls
//
// `#[ext_contract]` generates helper structs that the compiler flags as dead_code
// even though they are used at runtime for cross-contract calls.
#![allow(dead_code)]

use near_sdk::json_types::U128;
use near_sdk::{ext_contract, AccountId};

use crate::MintedTicket;

#[ext_contract(ext_ticket_nft)]
pub trait ExtTicketNft {
    /// Mints one in-person ticket; fails once the event tag's inventory is exhausted.
    fn mint(&mut self, receiver_id: AccountId, event_tag: String) -> MintedTicket;
}

#[ext_contract(ext_ft)]
pub trait ExtFungibleToken {
    fn ft_transfer(&mut self, receiver_id: AccountId, amount: U128, memo: Option<String>);
}
