use near_sdk::AccountId;

use super::builder::EventBuilder;
use super::CONTRACT;

pub fn emit_contract_upgraded(contract_id: &AccountId, old_version: &str, new_version: &str) {
    EventBuilder::new(CONTRACT, "contract_upgrade", contract_id)
        .field("old_version", old_version)
        .field("new_version", new_version)
        .emit();
}

pub fn emit_owner_transferred(old_owner: &AccountId, new_owner: &AccountId) {
    EventBuilder::new(CONTRACT, "owner_transferred", old_owner)
        .field("old_owner", old_owner)
        .field("new_owner", new_owner)
        .emit();
}

pub fn emit_treasury_changed(owner_id: &AccountId, old_treasury: &AccountId, new_treasury: &AccountId) {
    EventBuilder::new(CONTRACT, "treasury_changed", owner_id)
        .field("old_treasury", old_treasury)
        .field("new_treasury", new_treasury)
        .emit();
}

pub fn emit_ticket_nft_bound(owner_id: &AccountId, nft_contract_id: &AccountId) {
    EventBuilder::new(CONTRACT, "in_person_ticket_nft_set", owner_id)
        .field("nft_contract_id", nft_contract_id)
        .emit();
}

pub fn emit_token_decimals_updated(owner_id: &AccountId, token_symbol: &str, old_decimals: u8, new_decimals: u8) {
    EventBuilder::new(CONTRACT, "token_decimals_updated", owner_id)
        .field("token_symbol", token_symbol)
        .field("old_decimals", old_decimals)
        .field("new_decimals", new_decimals)
        .emit();
}
