use soroban_sdk::{contracttype, Address};

// Constants
pub const SCALE: i128 = 1_000_000_000_000_000_000; // 18 decimals

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SaleStatus {
    /// Sale created but not yet open for purchases
    PendingStart = 1,
    /// Sale is live and accepting purchases until the deadline
    Live = 2,
    /// Sale settled after its deadline, purchases claimable
    Claimable = 3,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct Sale {
    /// Unique sale identifier, assigned from 1
    pub id: u32,
    /// Current sale status
    pub status: SaleStatus,
    /// Payment asset per token, scaled by SCALE
    pub price: i128,
    /// Maximum amount sellable in this sale
    pub total_amount: i128,
    /// Cumulative amount sold, never exceeds total_amount
    pub sold_amount: i128,
    /// Unix timestamp when the buy window closes
    pub deadline: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokenType {
    /// Whether claims pay out as freshly minted locks instead of base asset
    pub is_ve_token: bool,
    /// Lock duration for ve-token sales; informational until claim time
    pub locked_period: u64,
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    PaymentToken,
    BaseToken,
    VeToken,
    /// Last allocated sale id
    SaleCounter,
    Sale(u32),
    TokenType(u32),
    UserBought(Address, u32), // (buyer, sale_id)
    Initialized,
}
