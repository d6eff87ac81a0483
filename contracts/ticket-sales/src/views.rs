use crate::*;

#[near]
impl Contract {
    /// Whole-token USD price; zero when unset.
    pub fn usd_ticket_prices(&self, event_tag: String) -> U128 {
        U128(self.usd_ticket_prices.get(&event_tag).copied().unwrap_or(0))
    }

    /// Whole-token gOHM price; zero when unset.
    pub fn gohm_ticket_prices(&self, event_tag: String) -> U128 {
        U128(self.gohm_ticket_prices.get(&event_tag).copied().unwrap_or(0))
    }

    pub fn owner(&self) -> &AccountId {
        &self.owner_id
    }

    pub fn get_treasury(&self) -> &AccountId {
        &self.treasury_id
    }

    pub fn get_in_person_ticket_nft(&self) -> Option<AccountId> {
        self.in_person_ticket_nft.clone()
    }

    pub fn get_payment_tokens(&self) -> &Vec<TokenConfig> {
        &self.tokens
    }

    /// Settled proceeds awaiting withdrawal, in the token's smallest unit.
    #[handle_result]
    pub fn token_balance(&self, token_symbol: String) -> Result<U128, TicketError> {
        let token = PaymentToken::from_symbol(&token_symbol)?;
        Ok(self.token_by_symbol(token).balance)
    }

    pub fn has_online_ticket(&self, account_id: AccountId, event_tag: String) -> bool {
        self.online_attendees
            .contains(&attendee_key(&account_id, &event_tag))
    }

    pub fn online_tickets_sold(&self, event_tag: String) -> u64 {
        self.online_sales.get(&event_tag).copied().unwrap_or(0)
    }

    pub fn get_config(&self) -> SaleConfig {
        SaleConfig {
            version: self.version.clone(),
            owner_id: self.owner_id.clone(),
            treasury_id: self.treasury_id.clone(),
            in_person_ticket_nft: self.in_person_ticket_nft.clone(),
            tokens: self.tokens.clone(),
        }
    }

    pub fn get_version(&self) -> &str {
        &self.version
    }
}
