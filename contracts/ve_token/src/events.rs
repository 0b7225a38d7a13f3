use soroban_sdk::{contracttype, Address};

#[contracttype]
#[derive(Clone, Debug)]
pub struct LockLevelsSetEvent {
    pub count: u32,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct OperatorAddedEvent {
    pub operator: Address,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct OperatorRemovedEvent {
    pub operator: Address,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct LockCreatedEvent {
    pub lock_id: u64,
    pub owner: Address,
    pub amount: i128,
    pub voting_power: i128,
    pub end_timestamp: u64,
}
