use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // ============================================
    // INITIALIZATION ERRORS (1-5)
    // ============================================
    /// Contract already initialized
    AlreadyInitialized = 1,
    /// Contract not initialized
    NotInitialized = 2,

    // ============================================
    // AUTHORIZATION ERRORS (10-15)
    // ============================================
    /// Caller not authorized (not admin)
    Unauthorized = 10,
    /// Caller is not an allow-listed operator
    NotOperator = 11,

    // ============================================
    // LEVEL CONFIGURATION ERRORS (20-29)
    // ============================================
    /// Mismatched or empty level arrays, or non-positive entries
    InvalidConfig = 20,
    /// Level id is not configured
    InvalidLevel = 21,

    // ============================================
    // LOCK ERRORS (30-39)
    // ============================================
    /// Amount must be positive
    InvalidAmount = 30,
    /// No lock with this id
    UnknownLock = 31,

    // ============================================
    // ARITHMETIC ERRORS (40-49)
    // ============================================
    /// Fixed-point arithmetic overflowed
    Overflow = 40,
}
