// =============================================================================
// Ticket Sales Integration Tests
// =============================================================================
// Runs against the NEAR sandbox: ticket-sales + in-person-ticket-nft + one
// mock-ft per payment token. Purchases go through `ft_transfer_call`, so the
// refund path is the token's own `ft_resolve_transfer`.
//
// Build the wasm first: cargo near build (per contract), then cargo test -p ticketing-integration-tests

use anyhow::Result;
use near_workspaces::result::ExecutionFinalResult;
use near_workspaces::types::{Gas, NearToken};
use near_workspaces::{Account, Contract};
use serde::Deserialize;
use serde_json::json;

use crate::utils::{deploy_contract, get_wasm_path, setup_sandbox, SandboxWorker};

const ONE_TOKEN: u128 = 1_000_000_000_000_000_000;
const ONE_USDC: u128 = 1_000_000;
const EVENT_TAG: &str = "2022-in-person";
const USD_PRICE: u128 = 33;
const GOHM_PRICE: u128 = 3;

// =============================================================================
// View Structs
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct NftToken {
    pub token_id: String,
    pub owner_id: String,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
pub struct SaleConfig {
    pub version: String,
    pub owner_id: String,
    pub treasury_id: String,
    pub in_person_ticket_nft: Option<String>,
}

// =============================================================================
// Fixture
// =============================================================================

struct Fixture {
    // Dropping the worker stops the sandbox.
    #[allow(dead_code)]
    worker: SandboxWorker,
    owner: Account,
    buyer: Account,
    treasury: Account,
    tickets: Contract,
    nft: Contract,
    gohm: Contract,
    usdc: Contract,
    dai: Contract,
}

async fn setup_mock_ft(
    worker: &SandboxWorker,
    owner: &Account,
    symbol: &str,
    decimals: u8,
    total_supply: u128,
) -> Result<Contract> {
    let ft = deploy_contract(worker, "mock-ft").await?;
    ft.call("new")
        .args_json(json!({
            "owner_id": owner.id().to_string(),
            "total_supply": total_supply.to_string(),
            "decimals": decimals,
            "name": format!("Mock {}", symbol),
            "symbol": symbol
        }))
        .transact()
        .await?
        .into_result()?;
    Ok(ft)
}

async fn ft_transfer(ft: &Contract, from: &Account, to: &Account, amount: u128) -> Result<()> {
    from.call(ft.id(), "ft_transfer")
        .args_json(json!({
            "receiver_id": to.id().to_string(),
            "amount": amount.to_string()
        }))
        .deposit(NearToken::from_yoctonear(1))
        .transact()
        .await?
        .into_result()?;
    Ok(())
}

async fn owner_call(fx: &Fixture, contract: &Contract, method: &str, args: serde_json::Value) -> Result<()> {
    fx.owner
        .call(contract.id(), method)
        .args_json(args)
        .deposit(NearToken::from_yoctonear(1))
        .transact()
        .await?
        .into_result()?;
    Ok(())
}

/// Deploys and wires every contract: one in-person ticket per event, prices 33 USD / 3 gOHM.
async fn setup() -> Result<Fixture> {
    let worker = setup_sandbox().await?;
    let owner = worker.dev_create_account().await?;
    let buyer = worker.dev_create_account().await?;
    let treasury = worker.dev_create_account().await?;

    let gohm = setup_mock_ft(&worker, &owner, "gOHM", 18, 1_000 * ONE_TOKEN).await?;
    let usdc = setup_mock_ft(&worker, &owner, "USDC", 6, 1_000 * ONE_USDC).await?;
    let frax = setup_mock_ft(&worker, &owner, "FRAX", 18, 1_000 * ONE_TOKEN).await?;
    let dai = setup_mock_ft(&worker, &owner, "DAI", 18, 1_000 * ONE_TOKEN).await?;

    let tickets = deploy_contract(&worker, "ticket-sales").await?;
    owner
        .call(tickets.id(), "new")
        .args_json(json!({
            "treasury_id": treasury.id().to_string(),
            "in_person_ticket_nft": null,
            "gohm": gohm.id().to_string(),
            "usdc": usdc.id().to_string(),
            "frax": frax.id().to_string(),
            "dai": dai.id().to_string()
        }))
        .transact()
        .await?
        .into_result()?;

    let nft = deploy_contract(&worker, "in-person-ticket-nft").await?;
    owner
        .call(nft.id(), "new")
        .args_json(json!({ "ticket_contract": tickets.id().to_string() }))
        .transact()
        .await?
        .into_result()?;

    let fx = Fixture {
        worker,
        owner,
        buyer,
        treasury,
        tickets,
        nft,
        gohm,
        usdc,
        dai,
    };

    owner_call(&fx, &fx.nft, "set_ticket_inventories", json!({ "count": 1 })).await?;
    owner_call(
        &fx,
        &fx.tickets,
        "set_in_person_ticket_nft_addr",
        json!({ "nft_contract_id": fx.nft.id().to_string() }),
    )
    .await?;
    owner_call(
        &fx,
        &fx.tickets,
        "set_ticket_price",
        json!({ "event_tag": EVENT_TAG, "is_usd": true, "price": USD_PRICE.to_string() }),
    )
    .await?;
    owner_call(
        &fx,
        &fx.tickets,
        "set_ticket_price",
        json!({ "event_tag": EVENT_TAG, "is_usd": false, "price": GOHM_PRICE.to_string() }),
    )
    .await?;

    // Exactly one USD-priced ticket's worth of DAI; plenty of everything else.
    ft_transfer(&fx.dai, &fx.owner, &fx.buyer, USD_PRICE * ONE_TOKEN).await?;
    ft_transfer(&fx.gohm, &fx.owner, &fx.buyer, 100 * ONE_TOKEN).await?;
    ft_transfer(&fx.usdc, &fx.owner, &fx.buyer, 100 * ONE_USDC).await?;
    ft_transfer(&frax, &fx.owner, &fx.buyer, 100 * ONE_TOKEN).await?;

    Ok(fx)
}

async fn buy_ticket(
    fx: &Fixture,
    ft: &Contract,
    token_symbol: &str,
    amount: u128,
    is_in_person: bool,
) -> Result<ExecutionFinalResult> {
    let msg = json!({
        "action": "buy_ticket",
        "token_symbol": token_symbol,
        "event_tag": EVENT_TAG,
        "is_in_person": is_in_person
    });
    let outcome = fx
        .buyer
        .call(ft.id(), "ft_transfer_call")
        .args_json(json!({
            "receiver_id": fx.tickets.id().to_string(),
            "amount": amount.to_string(),
            "msg": msg.to_string()
        }))
        .deposit(NearToken::from_yoctonear(1))
        .gas(Gas::from_tgas(300))
        .transact()
        .await?;
    Ok(outcome)
}

async fn ft_balance(ft: &Contract, account_id: &str) -> Result<u128> {
    let balance: String = ft
        .view("ft_balance_of")
        .args_json(json!({ "account_id": account_id }))
        .await?
        .json()?;
    Ok(balance.parse()?)
}

async fn proceeds(fx: &Fixture, token_symbol: &str) -> Result<u128> {
    let balance: String = fx
        .tickets
        .view("token_balance")
        .args_json(json!({ "token_symbol": token_symbol }))
        .await?
        .json()?;
    Ok(balance.parse()?)
}

async fn nft_supply_for_owner(fx: &Fixture, account_id: &str) -> Result<u128> {
    let supply: String = fx
        .nft
        .view("nft_supply_for_owner")
        .args_json(json!({ "account_id": account_id }))
        .await?
        .json()?;
    Ok(supply.parse()?)
}

async fn token_ids(fx: &Fixture) -> Result<u64> {
    Ok(fx.nft.view("token_ids").await?.json()?)
}

async fn withdraw(fx: &Fixture) -> Result<ExecutionFinalResult> {
    let outcome = fx
        .owner
        .call(fx.tickets.id(), "withdraw_token")
        .deposit(NearToken::from_yoctonear(1))
        .gas(Gas::from_tgas(200))
        .transact()
        .await?;
    Ok(outcome)
}

// =============================================================================
// Tests: Deployment
// =============================================================================

#[tokio::test]
async fn test_init_prices_and_owner() -> Result<()> {
    let fx = setup().await?;

    let usd: String = fx
        .tickets
        .view("usd_ticket_prices")
        .args_json(json!({ "event_tag": EVENT_TAG }))
        .await?
        .json()?;
    let gohm: String = fx
        .tickets
        .view("gohm_ticket_prices")
        .args_json(json!({ "event_tag": EVENT_TAG }))
        .await?
        .json()?;
    assert_eq!(usd, USD_PRICE.to_string());
    assert_eq!(gohm, GOHM_PRICE.to_string());

    let owner: String = fx.tickets.view("owner").await?.json()?;
    assert_eq!(owner, fx.owner.id().to_string());

    let config: SaleConfig = fx.tickets.view("get_config").await?.json()?;
    assert_eq!(config.treasury_id, fx.treasury.id().to_string());
    assert_eq!(config.in_person_ticket_nft, Some(fx.nft.id().to_string()));

    Ok(())
}

// =============================================================================
// Tests: In-Person Purchases
// =============================================================================

#[tokio::test]
async fn test_buy_in_person_ticket_with_dai() -> Result<()> {
    let fx = setup().await?;
    let buyer_id = fx.buyer.id().to_string();
    let price = USD_PRICE * ONE_TOKEN;

    let outcome = buy_ticket(&fx, &fx.dai, "DAI", price, true).await?;
    assert!(outcome.is_success(), "purchase failed: {:?}", outcome.failures());

    assert_eq!(ft_balance(&fx.dai, &buyer_id).await?, 0);
    assert_eq!(ft_balance(&fx.dai, fx.tickets.id().as_str()).await?, price);
    assert_eq!(proceeds(&fx, "dai").await?, price);

    assert_eq!(nft_supply_for_owner(&fx, &buyer_id).await?, 1);
    let token: NftToken = fx
        .nft
        .view("nft_token")
        .args_json(json!({ "token_id": "1" }))
        .await?
        .json()?;
    assert_eq!(token.token_id, "1");
    assert_eq!(token.owner_id, buyer_id);

    Ok(())
}

#[tokio::test]
async fn test_sold_out_refunds_in_full() -> Result<()> {
    let fx = setup().await?;
    let buyer_id = fx.buyer.id().to_string();
    let price = USD_PRICE * ONE_TOKEN;

    buy_ticket(&fx, &fx.dai, "dai", price, true).await?.into_result()?;
    ft_transfer(&fx.dai, &fx.owner, &fx.buyer, price).await?;
    let balance_before = ft_balance(&fx.dai, &buyer_id).await?;
    assert_eq!(balance_before, price);

    // Inventory is 1: the mint fails and the transfer comes back.
    let outcome = buy_ticket(&fx, &fx.dai, "dai", price, true).await?;
    let used: String = outcome.json()?;
    assert_eq!(used, "0");

    assert_eq!(ft_balance(&fx.dai, &buyer_id).await?, balance_before);
    assert_eq!(proceeds(&fx, "dai").await?, price);
    assert_eq!(token_ids(&fx).await?, 1);
    assert_eq!(nft_supply_for_owner(&fx, &buyer_id).await?, 1);

    Ok(())
}

#[tokio::test]
async fn test_overpayment_is_refunded() -> Result<()> {
    let fx = setup().await?;
    let buyer_id = fx.buyer.id().to_string();
    let price = USD_PRICE * ONE_USDC;

    buy_ticket(&fx, &fx.usdc, "usdc", price + 7 * ONE_USDC, true)
        .await?
        .into_result()?;

    assert_eq!(ft_balance(&fx.usdc, &buyer_id).await?, 100 * ONE_USDC - price);
    assert_eq!(proceeds(&fx, "usdc").await?, price);

    Ok(())
}

#[tokio::test]
async fn test_buy_with_gohm_uses_gohm_price() -> Result<()> {
    let fx = setup().await?;
    let buyer_id = fx.buyer.id().to_string();
    let price = GOHM_PRICE * ONE_TOKEN;

    buy_ticket(&fx, &fx.gohm, "gohm", price, true).await?.into_result()?;

    assert_eq!(ft_balance(&fx.gohm, &buyer_id).await?, 100 * ONE_TOKEN - price);
    assert_eq!(proceeds(&fx, "gohm").await?, price);
    assert_eq!(nft_supply_for_owner(&fx, &buyer_id).await?, 1);

    Ok(())
}

#[tokio::test]
async fn test_underpayment_is_rejected() -> Result<()> {
    let fx = setup().await?;
    let buyer_id = fx.buyer.id().to_string();

    let outcome = buy_ticket(&fx, &fx.dai, "dai", ONE_TOKEN, true).await?;
    let used: String = outcome.json()?;
    assert_eq!(used, "0");

    assert_eq!(ft_balance(&fx.dai, &buyer_id).await?, USD_PRICE * ONE_TOKEN);
    assert_eq!(proceeds(&fx, "dai").await?, 0);
    assert_eq!(token_ids(&fx).await?, 0);

    Ok(())
}

// =============================================================================
// Tests: Online Purchases
// =============================================================================

#[tokio::test]
async fn test_buy_online_ticket() -> Result<()> {
    let fx = setup().await?;
    let buyer_id = fx.buyer.id().to_string();
    let price = USD_PRICE * ONE_TOKEN;

    buy_ticket(&fx, &fx.dai, "dai", price, false).await?.into_result()?;

    let has_ticket: bool = fx
        .tickets
        .view("has_online_ticket")
        .args_json(json!({ "account_id": buyer_id, "event_tag": EVENT_TAG }))
        .await?
        .json()?;
    assert!(has_ticket);
    assert_eq!(proceeds(&fx, "dai").await?, price);
    assert_eq!(nft_supply_for_owner(&fx, &buyer_id).await?, 0);

    Ok(())
}

// =============================================================================
// Tests: Withdrawals
// =============================================================================

#[tokio::test]
async fn test_withdraw_sweeps_to_treasury() -> Result<()> {
    let fx = setup().await?;
    let price = USD_PRICE * ONE_TOKEN;
    buy_ticket(&fx, &fx.dai, "dai", price, true).await?.into_result()?;

    let outcome = withdraw(&fx).await?;
    assert!(outcome.is_success(), "withdraw failed: {:?}", outcome.failures());

    assert_eq!(ft_balance(&fx.dai, fx.treasury.id().as_str()).await?, price);
    assert_eq!(ft_balance(&fx.dai, fx.tickets.id().as_str()).await?, 0);
    assert_eq!(proceeds(&fx, "dai").await?, 0);

    Ok(())
}

#[tokio::test]
async fn test_withdraw_sweeps_every_token() -> Result<()> {
    let fx = setup().await?;
    let dai_price = USD_PRICE * ONE_TOKEN;
    let gohm_price = GOHM_PRICE * ONE_TOKEN;
    buy_ticket(&fx, &fx.dai, "dai", dai_price, false).await?.into_result()?;
    buy_ticket(&fx, &fx.gohm, "gohm", gohm_price, false).await?.into_result()?;

    let outcome = withdraw(&fx).await?;
    assert!(outcome.is_success(), "withdraw failed: {:?}", outcome.failures());
    let swept: Vec<String> = outcome.json()?;
    assert_eq!(swept, vec!["gohm", "dai"]);

    let treasury_id = fx.treasury.id().to_string();
    assert_eq!(ft_balance(&fx.dai, &treasury_id).await?, dai_price);
    assert_eq!(ft_balance(&fx.gohm, &treasury_id).await?, gohm_price);
    assert_eq!(ft_balance(&fx.dai, fx.tickets.id().as_str()).await?, 0);
    assert_eq!(ft_balance(&fx.gohm, fx.tickets.id().as_str()).await?, 0);
    assert_eq!(proceeds(&fx, "dai").await?, 0);
    assert_eq!(proceeds(&fx, "gohm").await?, 0);

    Ok(())
}

#[tokio::test]
async fn test_withdraw_non_owner_fails() -> Result<()> {
    let fx = setup().await?;
    buy_ticket(&fx, &fx.dai, "dai", USD_PRICE * ONE_TOKEN, false)
        .await?
        .into_result()?;

    let outcome = fx
        .buyer
        .call(fx.tickets.id(), "withdraw_token")
        .deposit(NearToken::from_yoctonear(1))
        .gas(Gas::from_tgas(200))
        .transact()
        .await?;
    assert!(outcome.is_failure());
    assert_eq!(proceeds(&fx, "dai").await?, USD_PRICE * ONE_TOKEN);

    Ok(())
}

#[tokio::test]
async fn test_failed_withdrawal_restores_balance() -> Result<()> {
    let fx = setup().await?;
    let price = USD_PRICE * ONE_TOKEN;
    buy_ticket(&fx, &fx.dai, "dai", price, false).await?.into_result()?;

    fx.owner
        .call(fx.dai.id(), "set_fail_next_transfer")
        .args_json(json!({ "should_fail": true }))
        .transact()
        .await?
        .into_result()?;

    let outcome = withdraw(&fx).await?;
    let swept: Vec<String> = outcome.json()?;
    assert!(swept.is_empty());

    assert_eq!(proceeds(&fx, "dai").await?, price);
    assert_eq!(ft_balance(&fx.dai, fx.treasury.id().as_str()).await?, 0);

    // The flag is one-shot; a retry goes through.
    let swept: Vec<String> = withdraw(&fx).await?.json()?;
    assert_eq!(swept, vec!["dai"]);
    assert_eq!(ft_balance(&fx.dai, fx.treasury.id().as_str()).await?, price);

    Ok(())
}

// =============================================================================
// Tests: Upgrade
// =============================================================================

async fn upgrade(fx: &Fixture, caller: &Account, wasm: &[u8]) -> Result<ExecutionFinalResult> {
    let outcome = caller
        .call(fx.tickets.id(), "update_contract")
        .args(wasm.to_vec())
        .deposit(NearToken::from_yoctonear(1))
        .gas(Gas::from_tgas(300))
        .transact()
        .await?;
    Ok(outcome)
}

#[tokio::test]
async fn test_upgrade_keeps_state() -> Result<()> {
    let fx = setup().await?;
    buy_ticket(&fx, &fx.dai, "dai", USD_PRICE * ONE_TOKEN, false)
        .await?
        .into_result()?;

    // Same code again: a no-schema-change upgrade.
    let wasm = std::fs::read(get_wasm_path("ticket-sales"))?;
    let outcome = upgrade(&fx, &fx.owner, &wasm).await?;
    assert!(outcome.is_success(), "upgrade failed: {:?}", outcome.failures());

    let version: String = fx.tickets.view("get_version").await?.json()?;
    assert_eq!(version, "0.1.0");
    let usd: String = fx
        .tickets
        .view("usd_ticket_prices")
        .args_json(json!({ "event_tag": EVENT_TAG }))
        .await?
        .json()?;
    assert_eq!(usd, USD_PRICE.to_string());
    assert_eq!(proceeds(&fx, "dai").await?, USD_PRICE * ONE_TOKEN);

    Ok(())
}

#[tokio::test]
async fn test_upgrade_non_owner_rejected() -> Result<()> {
    let fx = setup().await?;

    let wasm = std::fs::read(get_wasm_path("ticket-sales"))?;
    let outcome = upgrade(&fx, &fx.buyer, &wasm).await?;
    assert!(outcome.is_failure(), "non-owner upgrade should fail");

    let owner: String = fx.tickets.view("owner").await?.json()?;
    assert_eq!(owner, fx.owner.id().to_string());

    Ok(())
}
