use crate::guards::{check_event_tag, check_one_yocto};
use crate::*;

#[near]
impl Contract {
    // --- Init ---

    /// The deploying account becomes the owner. `in_person_ticket_nft` may be
    /// left unset and bound later, since the NFT contract needs this one's id.
    #[init]
    pub fn new(
        treasury_id: AccountId,
        in_person_ticket_nft: Option<AccountId>,
        gohm: AccountId,
        usdc: AccountId,
        frax: AccountId,
        dai: AccountId,
    ) -> Self {
        let tokens = vec![
            TokenConfig::new(PaymentToken::Gohm, gohm),
            TokenConfig::new(PaymentToken::Usdc, usdc),
            TokenConfig::new(PaymentToken::Frax, frax),
            TokenConfig::new(PaymentToken::Dai, dai),
        ];
        for (i, token) in tokens.iter().enumerate() {
            near_sdk::require!(
                tokens[i + 1..].iter().all(|t| t.account_id != token.account_id),
                "Payment token accounts must be distinct"
            );
        }

        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            owner_id: env::predecessor_account_id(),
            treasury_id,
            in_person_ticket_nft,
            tokens,
            usd_ticket_prices: LookupMap::new(StorageKey::UsdTicketPrices),
            gohm_ticket_prices: LookupMap::new(StorageKey::GohmTicketPrices),
            online_attendees: LookupSet::new(StorageKey::OnlineAttendees),
            online_sales: LookupMap::new(StorageKey::OnlineSales),
        }
    }

    // --- Pricing ---

    /// Owner only. `is_usd` selects the table: `true` sets the stablecoin price,
    /// `false` the gOHM price. Whole-token units; zero closes that currency.
    #[payable]
    #[handle_result]
    pub fn set_ticket_price(
        &mut self,
        event_tag: String,
        is_usd: bool,
        price: U128,
    ) -> Result<(), TicketError> {
        check_one_yocto()?;
        self.check_contract_owner(&env::predecessor_account_id())?;
        check_event_tag(&event_tag)?;

        let (table, currency) = if is_usd {
            (&mut self.usd_ticket_prices, "USD")
        } else {
            (&mut self.gohm_ticket_prices, "gOHM")
        };
        if price.0 == 0 {
            table.remove(&event_tag);
        } else {
            table.insert(event_tag.clone(), price.0);
        }

        events::emit_ticket_price_set(&self.owner_id, &event_tag, currency, price.0);
        Ok(())
    }

    // --- Wiring ---

    /// Owner only.
    #[payable]
    #[handle_result]
    pub fn set_in_person_ticket_nft_addr(&mut self, nft_contract_id: AccountId) -> Result<(), TicketError> {
        check_one_yocto()?;
        self.check_contract_owner(&env::predecessor_account_id())?;
        self.in_person_ticket_nft = Some(nft_contract_id.clone());
        events::emit_ticket_nft_bound(&self.owner_id, &nft_contract_id);
        Ok(())
    }

    /// Owner only.
    #[payable]
    #[handle_result]
    pub fn set_treasury(&mut self, treasury_id: AccountId) -> Result<(), TicketError> {
        check_one_yocto()?;
        self.check_contract_owner(&env::predecessor_account_id())?;
        let old_treasury = std::mem::replace(&mut self.treasury_id, treasury_id);
        events::emit_treasury_changed(&self.owner_id, &old_treasury, &self.treasury_id);
        Ok(())
    }

    /// Owner only. Applies to purchases made after the call.
    #[payable]
    #[handle_result]
    pub fn set_token_decimals(&mut self, token_symbol: String, decimals: u8) -> Result<(), TicketError> {
        check_one_yocto()?;
        self.check_contract_owner(&env::predecessor_account_id())?;
        if decimals > MAX_TOKEN_DECIMALS {
            return Err(TicketError::InvalidInput(format!(
                "Decimals cannot exceed {}",
                MAX_TOKEN_DECIMALS
            )));
        }
        let token = PaymentToken::from_symbol(&token_symbol)?;
        let config = self.token_by_symbol_mut(token);
        let old_decimals = std::mem::replace(&mut config.decimals, decimals);
        events::emit_token_decimals_updated(&self.owner_id, token.symbol(), old_decimals, decimals);
        Ok(())
    }

    // --- Admin ---

    /// Owner only.
    #[payable]
    #[handle_result]
    pub fn transfer_ownership(&mut self, new_owner: AccountId) -> Result<(), TicketError> {
        check_one_yocto()?;
        self.check_contract_owner(&env::predecessor_account_id())?;
        if new_owner == self.owner_id {
            return Err(TicketError::InvalidInput(
                "New owner must differ from current owner".to_string(),
            ));
        }
        let old_owner = std::mem::replace(&mut self.owner_id, new_owner);
        events::emit_owner_transferred(&old_owner, &self.owner_id);
        Ok(())
    }

    // --- Upgrade ---

    /// Owner only. Panics unless 1 yoctoNEAR attached. Reads WASM from `env::input()`.
    pub fn update_contract(&self) -> Promise {
        near_sdk::require!(env::attached_deposit() == ONE_YOCTO, "Attach 1 yoctoNEAR");
        near_sdk::require!(
            env::predecessor_account_id() == self.owner_id,
            "Only contract owner can upgrade"
        );
        let code = env::input().unwrap_or_else(|| env::panic_str("No input"));
        Promise::new(env::current_account_id())
            .deploy_contract(code)
            .function_call(
                "migrate".to_string(),
                vec![],
                NO_DEPOSIT,
                Gas::from_tgas(GAS_MIGRATE_TGAS),
            )
            .as_return()
    }

    /// Called automatically by `update_contract`; runs state migration on upgrade.
    #[private]
    #[init(ignore_state)]
    pub fn migrate() -> Self {
        let mut contract: Self =
            env::state_read().unwrap_or_else(|| env::panic_str("State read failed"));
        let old_version = contract.version.clone();
        contract.version = env!("CARGO_PKG_VERSION").to_string();

        events::emit_contract_upgraded(&env::current_account_id(), &old_version, &contract.version);

        contract
    }
}
