use near_sdk::AccountId;

use super::builder::EventBuilder;
use super::{TICKET, TREASURY};

pub fn emit_ticket_price_set(owner_id: &AccountId, event_tag: &str, currency: &str, price: u128) {
    EventBuilder::new(TICKET, "price_set", owner_id)
        .field("event_tag", event_tag)
        .field("currency", currency)
        .field("price", price)
        .emit();
}

pub fn emit_ticket_purchased(
    buyer_id: &AccountId,
    event_tag: &str,
    token_symbol: &str,
    price: u128,
    is_in_person: bool,
    token_id: Option<&str>,
) {
    EventBuilder::new(TICKET, "purchase", buyer_id)
        .field("event_tag", event_tag)
        .field("token_symbol", token_symbol)
        .field("price", price)
        .field("is_in_person", is_in_person)
        .field_opt("token_id", token_id)
        .emit();
}

pub fn emit_ticket_purchase_failed(buyer_id: &AccountId, event_tag: &str, token_symbol: &str, refund: u128) {
    EventBuilder::new(TICKET, "purchase_failed", buyer_id)
        .field("event_tag", event_tag)
        .field("token_symbol", token_symbol)
        .field("refund", refund)
        .emit();
}

pub fn emit_withdrawal(treasury_id: &AccountId, token_symbol: &str, amount: u128) {
    EventBuilder::new(TREASURY, "withdraw", treasury_id)
        .field("token_symbol", token_symbol)
        .field("amount", amount)
        .emit();
}

pub fn emit_withdrawal_failed(treasury_id: &AccountId, token_symbol: &str, amount: u128) {
    EventBuilder::new(TREASURY, "withdraw_failed", treasury_id)
        .field("token_symbol", token_symbol)
        .field("amount", amount)
        .emit();
}
