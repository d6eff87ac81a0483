use crate::external::ext_ft;
use crate::guards::check_one_yocto;
use crate::*;

#[near]
impl Contract {
    /// Owner only. Sweeps every settled token balance to the treasury.
    /// Ledger entries are zeroed before the transfers so a concurrent sweep finds nothing.
    /// Resolves to the tokens that actually reached the treasury.
    #[payable]
    #[handle_result]
    pub fn withdraw_token(&mut self) -> Result<Promise, TicketError> {
        check_one_yocto()?;
        self.check_contract_owner(&env::predecessor_account_id())?;

        let treasury_id = self.treasury_id.clone();
        let mut sweep: Option<Promise> = None;
        let mut swept = Vec::new();

        for config in self.tokens.iter_mut() {
            let amount = std::mem::replace(&mut config.balance, U128(0));
            if amount.0 == 0 {
                continue;
            }

            let transfer = ext_ft::ext(config.account_id.clone())
                .with_attached_deposit(ONE_YOCTO)
                .with_static_gas(Gas::from_tgas(GAS_FT_TRANSFER_TGAS))
                .ft_transfer(
                    treasury_id.clone(),
                    amount,
                    Some(format!("Ticket proceeds ({})", config.token)),
                )
                .then(
                    Self::ext(env::current_account_id())
                        .with_static_gas(Gas::from_tgas(GAS_WITHDRAW_CALLBACK_TGAS))
                        .on_token_withdrawn(config.token, treasury_id.clone(), amount),
                );

            swept.push(config.token);
            sweep = Some(match sweep {
                Some(joint) => joint.and(transfer),
                None => transfer,
            });
        }

        let sweep = sweep.ok_or_else(|| TicketError::InvalidState("No proceeds to withdraw".into()))?;
        // A joint promise cannot be returned; it must end in a callback.
        Ok(sweep.then(
            Self::ext(env::current_account_id())
                .with_static_gas(Gas::from_tgas(GAS_WITHDRAW_ALL_CALLBACK_TGAS))
                .on_withdraw_all(swept),
        ))
    }

    /// Restores the ledger entry when the transfer failed.
    #[private]
    pub fn on_token_withdrawn(&mut self, token: PaymentToken, treasury_id: AccountId, amount: U128) -> bool {
        let transferred =
            env::promise_results_count() == 1 && env::promise_result_checked(0, 16).is_ok();

        if transferred {
            events::emit_withdrawal(&treasury_id, token.symbol(), amount.0);
        } else {
            self.credit_proceeds(token, amount.0);
            events::emit_withdrawal_failed(&treasury_id, token.symbol(), amount.0);
        }
        transferred
    }

    /// Collects the per-token outcomes, in the order the transfers were joined.
    #[private]
    pub fn on_withdraw_all(&self, tokens: Vec<PaymentToken>) -> Vec<PaymentToken> {
        let results = env::promise_results_count();
        tokens
            .into_iter()
            .enumerate()
            .filter(|(i, _)| (*i as u64) < results)
            .filter(|(i, _)| {
                env::promise_result_checked(*i as u64, 16)
                    .ok()
                    .and_then(|data| near_sdk::serde_json::from_slice::<bool>(&data).ok())
                    .unwrap_or(false)
            })
            .map(|(_, token)| token)
            .collect()
    }
}
