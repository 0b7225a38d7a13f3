use soroban_sdk::{contracttype, Address};

// Constants
pub const SCALE: i128 = 1_000_000_000_000_000_000; // 18 decimals

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LockLevel {
    /// Lock duration in seconds
    pub duration: u64,
    /// Voting power multiplier, scaled by SCALE (1.0 = SCALE)
    pub multiplier: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Lock {
    /// Unique lock identifier, assigned from 1
    pub id: u64,
    /// Account that owns the claim
    pub owner: Address,
    /// Base asset units locked
    pub amount: i128,
    /// Unix timestamp when the lock expires
    pub end_timestamp: u64,
    /// amount * multiplier / SCALE, fixed at creation
    pub voting_power: i128,
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    BaseToken,
    Operators(Address),
    /// Number of configured lock levels; level ids run 1..=count
    LevelCount,
    Level(u32),
    Lock(u64),
    /// Last minted lock id
    LockCounter,
    OwnerLockCount(Address),
    TotalVotingSupply,
    Initialized,
}
