use near_contract_standards::non_fungible_token::events::NftMint;

use crate::*;

#[near]
impl Contract {
    /// Ticket contract only. Issues the next sequential token id to `receiver_id`
    /// while `event_tag` has inventory left; the storage is paid by this contract.
    #[handle_result]
    pub fn mint(&mut self, receiver_id: AccountId, event_tag: String) -> Result<Token, TicketNftError> {
        if env::predecessor_account_id() != self.ticket_contract {
            return Err(TicketNftError::Unauthorized(
                "Only the ticket contract can mint".into(),
            ));
        }
        if event_tag.is_empty() || event_tag.len() > MAX_EVENT_TAG_LEN {
            return Err(TicketNftError::InvalidInput(format!(
                "Event tag must be 1..={} bytes",
                MAX_EVENT_TAG_LEN
            )));
        }

        let sold = self.tickets_sold(event_tag.clone());
        if sold >= self.ticket_inventories {
            return Err(TicketNftError::SoldOut(format!(
                "All {} tickets for '{}' are minted",
                self.ticket_inventories, event_tag
            )));
        }

        self.token_ids += 1;
        let token_id: TokenId = self.token_ids.to_string();
        let metadata = ticket_metadata(&token_id, &event_tag);
        let token = self
            .tokens
            .internal_mint_with_refund(token_id, receiver_id, Some(metadata), None);
        self.sold_per_event.insert(event_tag.clone(), sold + 1);

        NftMint {
            owner_id: &token.owner_id,
            token_ids: &[token.token_id.as_str()],
            memo: Some(event_tag.as_str()),
        }
        .emit();

        Ok(token)
    }
}
