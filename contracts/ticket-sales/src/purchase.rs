use crate::external::ext_ticket_nft;
use crate::guards::check_event_tag;
use crate::*;

/// A validated purchase, priced in the paying token's smallest unit.
struct Quote {
    token: PaymentToken,
    event_tag: String,
    is_in_person: bool,
    price: u128,
}

#[near]
impl Contract {
    /// NEP-141 receiver; `msg` carries the `buy_ticket` action.
    /// Returns the unused amount for refund. Any `Err` refunds the full transfer.
    #[handle_result]
    pub fn ft_on_transfer(
        &mut self,
        sender_id: AccountId,
        amount: U128,
        msg: String,
    ) -> Result<PromiseOrValue<U128>, TicketError> {
        let token_account = env::predecessor_account_id();
        let paid_with = self
            .token_by_account(&token_account)
            .map(|t| t.token)
            .ok_or_else(|| {
                TicketError::Unauthorized(format!("{} is not an accepted payment token", token_account))
            })?;

        let TicketAction::BuyTicket {
            token_symbol,
            event_tag,
            is_in_person,
        } = TicketAction::parse(&msg)?;

        let quote = self.quote(paid_with, &token_symbol, event_tag, is_in_person, amount.0)?;
        let change = amount.0 - quote.price;

        if !quote.is_in_person {
            self.settle_online(&sender_id, &quote);
            return Ok(PromiseOrValue::Value(U128(change)));
        }

        let nft_contract = self
            .in_person_ticket_nft
            .clone()
            .ok_or_else(TicketError::nft_not_bound)?;

        // Proceeds are credited only once the mint succeeds.
        Ok(ext_ticket_nft::ext(nft_contract)
            .with_static_gas(Gas::from_tgas(GAS_MINT_TICKET_TGAS))
            .mint(sender_id.clone(), quote.event_tag.clone())
            .then(
                Self::ext(env::current_account_id())
                    .with_static_gas(Gas::from_tgas(GAS_MINT_CALLBACK_TGAS))
                    .on_in_person_ticket_minted(
                        sender_id,
                        quote.token,
                        quote.event_tag,
                        U128(quote.price),
                        amount,
                    ),
            )
            .into())
    }

    /// Success keeps `price` and refunds the rest; failure refunds `amount` in full.
    #[private]
    pub fn on_in_person_ticket_minted(
        &mut self,
        buyer_id: AccountId,
        token: PaymentToken,
        event_tag: String,
        price: U128,
        amount: U128,
    ) -> U128 {
        let minted = if env::promise_results_count() == 1 {
            env::promise_result_checked(0, MAX_MINT_RESULT_LEN).ok()
        } else {
            None
        };

        let Some(data) = minted else {
            events::emit_ticket_purchase_failed(&buyer_id, &event_tag, token.symbol(), amount.0);
            return amount;
        };

        let token_id = near_sdk::serde_json::from_slice::<MintedTicket>(&data)
            .ok()
            .map(|t| t.token_id);
        self.credit_proceeds(token, price.0);
        events::emit_ticket_purchased(
            &buyer_id,
            &event_tag,
            token.symbol(),
            price.0,
            true,
            token_id.as_deref(),
        );
        U128(amount.0.saturating_sub(price.0))
    }
}

impl Contract {
    fn quote(
        &self,
        paid_with: PaymentToken,
        token_symbol: &str,
        event_tag: String,
        is_in_person: bool,
        amount: u128,
    ) -> Result<Quote, TicketError> {
        let token = PaymentToken::from_symbol(token_symbol)?;
        if token != paid_with {
            return Err(TicketError::InvalidInput(format!(
                "Transfer came from {} but message names {}",
                paid_with, token
            )));
        }
        check_event_tag(&event_tag)?;

        let table = if token.is_governance() {
            &self.gohm_ticket_prices
        } else {
            &self.usd_ticket_prices
        };
        let whole_units = table
            .get(&event_tag)
            .copied()
            .ok_or_else(|| TicketError::price_not_set(&event_tag, token.currency()))?;
        let price = self.token_by_symbol(token).scale(whole_units)?;

        if amount < price {
            return Err(TicketError::InsufficientDeposit(format!(
                "Ticket costs {} {} units, received {}",
                price, token, amount
            )));
        }

        Ok(Quote {
            token,
            event_tag,
            is_in_person,
            price,
        })
    }

    fn settle_online(&mut self, buyer_id: &AccountId, quote: &Quote) {
        self.online_attendees
            .insert(attendee_key(buyer_id, &quote.event_tag));
        let sold = self.online_sales.get(&quote.event_tag).copied().unwrap_or(0);
        self.online_sales.insert(quote.event_tag.clone(), sold + 1);
        self.credit_proceeds(quote.token, quote.price);
        events::emit_ticket_purchased(
            buyer_id,
            &quote.event_tag,
            quote.token.symbol(),
            quote.price,
            false,
            None,
        );
    }

    pub(crate) fn credit_proceeds(&mut self, token: PaymentToken, amount: u128) {
        let config = self.token_by_symbol_mut(token);
        config.balance = U128(config.balance.0.saturating_add(amount));
    }
}
