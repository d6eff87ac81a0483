//! Mock NEP-141 payment token for sandbox tests.
//!
//! One deployment per accepted token (gOHM, USDC, FRAX, DAI). Balances only;
//! no storage registration. `set_fail_next_transfer` makes the next
//! `ft_transfer` panic so treasury-withdrawal failures can be exercised.

use near_sdk::json_types::U128;
use near_sdk::serde_json::json;
use near_sdk::store::LookupMap;
use near_sdk::{env, near, require, AccountId, Gas, NearToken, PanicOnDefault, Promise, PromiseOrValue};

const GAS_FOR_FT_ON_TRANSFER: Gas = Gas::from_tgas(150);
const GAS_FOR_RESOLVE_TRANSFER: Gas = Gas::from_tgas(10);

#[near(contract_state)]
#[derive(PanicOnDefault)]
pub struct MockFT {
    accounts: LookupMap<AccountId, u128>,
    total_supply: u128,
    metadata: FtMetadata,
    fail_next_transfer: bool,
}

#[near(serializers = [borsh, json])]
#[derive(Clone)]
pub struct FtMetadata {
    pub spec: String,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

#[near]
impl MockFT {
    #[init]
    pub fn new(
        owner_id: AccountId,
        total_supply: U128,
        decimals: u8,
        name: String,
        symbol: String,
    ) -> Self {
        let mut accounts = LookupMap::new(b"a");
        accounts.insert(owner_id, total_supply.0);
        Self {
            accounts,
            total_supply: total_supply.0,
            metadata: FtMetadata {
                spec: "ft-1.0.0".to_string(),
                name,
                symbol,
                decimals,
            },
            fail_next_transfer: false,
        }
    }

    // --- NEP-141 ---

    #[payable]
    pub fn ft_transfer(&mut self, receiver_id: AccountId, amount: U128, memo: Option<String>) {
        assert_one_yocto();
        if std::mem::take(&mut self.fail_next_transfer) {
            env::panic_str("MockFT: Simulated transfer failure");
        }
        let sender_id = env::predecessor_account_id();
        self.internal_transfer(&sender_id, &receiver_id, amount.0);
        if let Some(memo) = memo {
            env::log_str(&format!("Memo: {}", memo));
        }
    }

    /// Moves `amount` to `receiver_id`, then lets it keep part of it via `ft_on_transfer`.
    #[payable]
    pub fn ft_transfer_call(
        &mut self,
        receiver_id: AccountId,
        amount: U128,
        memo: Option<String>,
        msg: String,
    ) -> PromiseOrValue<U128> {
        assert_one_yocto();
        let _ = memo;
        let sender_id = env::predecessor_account_id();
        self.internal_transfer(&sender_id, &receiver_id, amount.0);

        let args = json!({ "sender_id": sender_id, "amount": amount, "msg": msg });
        Promise::new(receiver_id.clone())
            .function_call(
                "ft_on_transfer".to_string(),
                args.to_string().into_bytes(),
                NearToken::from_yoctonear(0),
                GAS_FOR_FT_ON_TRANSFER,
            )
            .then(
                Self::ext(env::current_account_id())
                    .with_static_gas(GAS_FOR_RESOLVE_TRANSFER)
                    .ft_resolve_transfer(sender_id, receiver_id, amount),
            )
            .into()
    }

    /// Refunds whatever the receiver reported unused (all of it if the receiver
    /// panicked). Returns the amount the receiver kept.
    #[private]
    pub fn ft_resolve_transfer(
        &mut self,
        sender_id: AccountId,
        receiver_id: AccountId,
        amount: U128,
    ) -> U128 {
        let unused = env::promise_result_checked(0, 64)
            .map(|data| {
                near_sdk::serde_json::from_slice::<U128>(&data)
                    .map(|unused| unused.0.min(amount.0))
                    .unwrap_or(0)
            })
            .unwrap_or(amount.0);

        let refund = unused.min(self.balance(&receiver_id));
        if refund > 0 {
            self.internal_transfer(&receiver_id, &sender_id, refund);
        }
        U128(amount.0 - refund)
    }

    pub fn ft_balance_of(&self, account_id: AccountId) -> U128 {
        U128(self.balance(&account_id))
    }

    pub fn ft_total_supply(&self) -> U128 {
        U128(self.total_supply)
    }

    pub fn ft_metadata(&self) -> FtMetadata {
        self.metadata.clone()
    }

    // --- Test hooks ---

    pub fn set_fail_next_transfer(&mut self, should_fail: bool) {
        self.fail_next_transfer = should_fail;
    }
}

impl MockFT {
    fn balance(&self, account_id: &AccountId) -> u128 {
        self.accounts.get(account_id).copied().unwrap_or(0)
    }

    fn internal_transfer(&mut self, sender_id: &AccountId, receiver_id: &AccountId, amount: u128) {
        require!(sender_id != receiver_id, "Sender and receiver must differ");
        require!(amount > 0, "Amount must be positive");
        let sender_balance = self
            .balance(sender_id)
            .checked_sub(amount)
            .unwrap_or_else(|| env::panic_str("Insufficient balance"));
        let receiver_balance = self
            .balance(receiver_id)
            .checked_add(amount)
            .unwrap_or_else(|| env::panic_str("Balance overflow"));
        self.accounts.insert(sender_id.clone(), sender_balance);
        self.accounts.insert(receiver_id.clone(), receiver_balance);
    }
}

fn assert_one_yocto() {
    require!(
        env::attached_deposit() == NearToken::from_yoctonear(1),
        "Requires 1 yoctoNEAR"
    );
}
