use soroban_sdk::{contracttype, Address};

#[contracttype]
#[derive(Clone, Debug)]
pub struct SaleAddedEvent {
    pub sale_id: u32,
    pub is_ve_token: bool,
    pub locked_period: u64,
    pub price: i128,
    pub total_amount: i128,
    pub deadline: u64,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct SaleStartedEvent {
    pub sale_id: u32,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct PurchaseEvent {
    pub sale_id: u32,
    pub buyer: Address,
    pub amount: i128,
    pub pay_amount: i128,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct SettledEvent {
    pub sale_id: u32,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct ClaimedEvent {
    pub sale_id: u32,
    pub claimant: Address,
    pub amount: i128,
    pub is_ve_token: bool,
}
