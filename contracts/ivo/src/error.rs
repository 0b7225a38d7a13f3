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

    // ============================================
    // SALE MANAGEMENT ERRORS (20-29)
    // ============================================
    /// Zero capacity, negative price, or non-future deadline
    InvalidConfig = 20,
    /// Sale not found
    SaleNotFound = 21,
    /// Operation not valid for the sale's current status
    InvalidTransition = 22,

    // ============================================
    // TEMPORAL GUARD ERRORS (30-39)
    // ============================================
    /// Buy window has closed
    DeadlinePassed = 30,
    /// Deadline has not passed yet
    TooEarly = 31,

    // ============================================
    // PURCHASE ERRORS (40-49)
    // ============================================
    /// Amount must be positive
    InvalidAmount = 40,
    /// Purchase would exceed sale capacity
    CapacityExceeded = 41,
    /// Attached payment does not equal amount * price / SCALE
    WrongPayment = 42,
    /// Nothing bought, or allocation already claimed
    NothingToClaim = 43,

    // ============================================
    // ARITHMETIC ERRORS (50-59)
    // ============================================
    /// Fixed-point arithmetic overflowed
    Overflow = 50,
}
