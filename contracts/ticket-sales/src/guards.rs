use crate::*;

pub(crate) fn check_one_yocto() -> Result<(), TicketError> {
    if env::attached_deposit() != ONE_YOCTO {
        return Err(TicketError::InsufficientDeposit(
            "Requires attached deposit of exactly 1 yoctoNEAR".into(),
        ));
    }
    Ok(())
}

pub(crate) fn check_event_tag(event_tag: &str) -> Result<(), TicketError> {
    if event_tag.is_empty() {
        return Err(TicketError::InvalidInput("Event tag cannot be empty".into()));
    }
    if event_tag.len() > MAX_EVENT_TAG_LEN {
        return Err(TicketError::InvalidInput(format!(
            "Event tag exceeds max length of {}",
            MAX_EVENT_TAG_LEN
        )));
    }
    Ok(())
}

impl Contract {
    pub(crate) fn check_contract_owner(&self, actor_id: &AccountId) -> Result<(), TicketError> {
        if actor_id != &self.owner_id {
            return Err(TicketError::only_owner());
        }
        Ok(())
    }
}
