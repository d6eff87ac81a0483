use near_sdk::serde_json::{self, json, Value};
use near_sdk::{env, AccountId};

const STANDARD: &str = "ticketing";
const VERSION: &str = "1.0.0";
const PREFIX: &str = "EVENT_JSON:";

const INVENTORY: &str = "INVENTORY_UPDATE";
const CONTRACT: &str = "CONTRACT_UPDATE";

fn emit(event_type: &str, operation: &str, author: &AccountId, extra: Value) {
    let mut data = json!({
        "operation": operation,
        "author": author.to_string(),
    });
    if let (Some(data), Value::Object(extra)) = (data.as_object_mut(), extra) {
        data.extend(extra);
    }
    let event = json!({
        "standard": STANDARD,
        "version": VERSION,
        "event": event_type,
        "data": [data],
    });
    if let Ok(json) = serde_json::to_string(&event) {
        env::log_str(&format!("{PREFIX}{json}"));
    }
}

pub fn emit_inventories_updated(owner_id: &AccountId, old_count: u64, new_count: u64) {
    emit(
        INVENTORY,
        "inventories_set",
        owner_id,
        json!({ "old_count": old_count, "new_count": new_count }),
    );
}

pub fn emit_ticket_contract_changed(owner_id: &AccountId, old_contract: &AccountId, new_contract: &AccountId) {
    emit(
        CONTRACT,
        "ticket_contract_changed",
        owner_id,
        json!({ "old_contract": old_contract, "new_contract": new_contract }),
    );
}

pub fn emit_owner_transferred(old_owner: &AccountId, new_owner: &AccountId) {
    emit(
        CONTRACT,
        "owner_transferred",
        old_owner,
        json!({ "old_owner": old_owner, "new_owner": new_owner }),
    );
}
