#![no_std]

mod error;
mod events;
mod power;
mod storage;

use error::Error;
use events::*;
use power::calculate_voting_power;
use storage::{DataKey, Lock, LockLevel};

use soroban_sdk::{contract, contractimpl, token, Address, Env, Symbol, Vec};

#[contract]
pub struct VeToken;

#[contractimpl]
impl VeToken {
    // ============================================
    // INITIALIZATION & ADMIN
    // ============================================

    /// Initialize the registry
    ///
    /// # Errors
    /// - `AlreadyInitialized`: Contract already initialized
    pub fn initialize(env: Env, admin: Address, base_token: Address) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::AlreadyInitialized);
        }

        admin.require_auth();

        env.storage().instance().set(&DataKey::Initialized, &true);
        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage().instance().set(&DataKey::BaseToken, &base_token);
        env.storage().instance().set(&DataKey::LockCounter, &0u64);
        env.storage()
            .instance()
            .set(&DataKey::TotalVotingSupply, &0i128);

        Ok(())
    }

    /// Add an operator (offering engine contract) allowed to mint locks
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `Unauthorized`: Caller is not admin
    pub fn add_operator(env: Env, operator: Address) -> Result<(), Error> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(Error::NotInitialized)?;
        admin.require_auth();

        env.storage()
            .instance()
            .set(&DataKey::Operators(operator.clone()), &true);

        env.events().publish(
            (Symbol::new(&env, "operator_added"),),
            OperatorAddedEvent { operator },
        );

        Ok(())
    }

    /// Remove an operator
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `Unauthorized`: Caller is not admin
    pub fn remove_operator(env: Env, operator: Address) -> Result<(), Error> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(Error::NotInitialized)?;
        admin.require_auth();

        env.storage()
            .instance()
            .remove(&DataKey::Operators(operator.clone()));

        env.events().publish(
            (Symbol::new(&env, "operator_removed"),),
            OperatorRemovedEvent { operator },
        );

        Ok(())
    }

    /// Replace the lock level table
    ///
    /// Level ids are assigned 1..=n by position. Existing locks keep the
    /// voting power and end timestamp computed at creation time.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `Unauthorized`: Caller is not admin
    /// - `InvalidConfig`: Mismatched or empty arrays, non-positive entries
    pub fn set_lock_levels(
        env: Env,
        durations: Vec<u64>,
        multipliers: Vec<i128>,
    ) -> Result<(), Error> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(Error::NotInitialized)?;
        admin.require_auth();

        if durations.len() != multipliers.len() || durations.is_empty() {
            return Err(Error::InvalidConfig);
        }

        for i in 0..durations.len() {
            let duration = durations.get_unchecked(i);
            let multiplier = multipliers.get_unchecked(i);

            if duration == 0 || multiplier <= 0 {
                return Err(Error::InvalidConfig);
            }

            let level = LockLevel {
                duration,
                multiplier,
            };
            env.storage().instance().set(&DataKey::Level(i + 1), &level);
        }

        // Ids beyond the new count stop resolving even if stale entries remain
        let count = durations.len();
        env.storage().instance().set(&DataKey::LevelCount, &count);

        env.events().publish(
            (Symbol::new(&env, "levels_set"),),
            LockLevelsSetEvent { count },
        );

        Ok(())
    }

    // ============================================
    // LOCK CREATION
    // ============================================

    /// Lock base asset for a configured level, minting a claim to `recipient`
    ///
    /// Pulls `amount` of base asset from `from` into the registry.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `InvalidAmount`: amount must be positive
    /// - `InvalidLevel`: level id is not configured
    /// - `Overflow`: voting power computation overflowed
    pub fn create_lock(
        env: Env,
        from: Address,
        amount: i128,
        level: u32,
        recipient: Address,
    ) -> Result<u64, Error> {
        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        from.require_auth();

        let lock_level = Self::resolve_level(&env, level)?;

        let base_token: Address = env
            .storage()
            .instance()
            .get(&DataKey::BaseToken)
            .ok_or(Error::NotInitialized)?;

        let base_client = token::Client::new(&env, &base_token);
        base_client.transfer(&from, &env.current_contract_address(), &amount);

        Self::mint_lock(&env, recipient, amount, &lock_level)
    }

    /// Mint a lock on behalf of a buyer (operators only)
    ///
    /// Used by the offering engine when a settled sale pays out in locked
    /// positions. The caller must already have escrowed `amount` of base
    /// asset to this contract; no transfer happens here. The level is
    /// resolved by matching `locked_period` against configured durations.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `NotOperator`: Caller is not an allow-listed operator
    /// - `InvalidAmount`: amount must be positive
    /// - `InvalidLevel`: no level with this duration
    /// - `Overflow`: voting power computation overflowed
    pub fn mint_locked(
        env: Env,
        operator: Address,
        amount: i128,
        locked_period: u64,
        recipient: Address,
    ) -> Result<u64, Error> {
        if !env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::NotInitialized);
        }

        let is_operator = env
            .storage()
            .instance()
            .get::<DataKey, bool>(&DataKey::Operators(operator.clone()))
            .unwrap_or(false);
        if !is_operator {
            return Err(Error::NotOperator);
        }

        operator.require_auth();

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        let lock_level = Self::resolve_level_by_duration(&env, locked_period)?;

        Self::mint_lock(&env, recipient, amount, &lock_level)
    }

    // ============================================
    // VIEW FUNCTIONS
    // ============================================

    /// Get a lock record
    pub fn get_lock(env: Env, lock_id: u64) -> Result<Lock, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Lock(lock_id))
            .ok_or(Error::UnknownLock)
    }

    /// Get the owner of a lock
    pub fn owner_of(env: Env, lock_id: u64) -> Result<Address, Error> {
        let lock: Lock = env
            .storage()
            .instance()
            .get(&DataKey::Lock(lock_id))
            .ok_or(Error::UnknownLock)?;
        Ok(lock.owner)
    }

    /// Number of locks owned by an account
    pub fn balance_of(env: Env, owner: Address) -> u32 {
        env.storage()
            .instance()
            .get::<DataKey, u32>(&DataKey::OwnerLockCount(owner))
            .unwrap_or(0)
    }

    /// Total voting power across all locks
    pub fn total_supply(env: Env) -> i128 {
        env.storage()
            .instance()
            .get::<DataKey, i128>(&DataKey::TotalVotingSupply)
            .unwrap_or(0)
    }

    /// Total number of locks minted
    pub fn total_ve_nfts(env: Env) -> u64 {
        env.storage()
            .instance()
            .get::<DataKey, u64>(&DataKey::LockCounter)
            .unwrap_or(0)
    }

    /// Get a configured lock level
    pub fn get_lock_level(env: Env, level: u32) -> Result<LockLevel, Error> {
        Self::resolve_level(&env, level)
    }

    /// Number of configured lock levels
    pub fn level_count(env: Env) -> u32 {
        env.storage()
            .instance()
            .get::<DataKey, u32>(&DataKey::LevelCount)
            .unwrap_or(0)
    }

    /// Check if address is an operator
    pub fn is_operator(env: Env, address: Address) -> bool {
        env.storage()
            .instance()
            .get::<DataKey, bool>(&DataKey::Operators(address))
            .unwrap_or(false)
    }

    // ============================================
    // INTERNAL HELPERS
    // ============================================

    fn resolve_level(env: &Env, level: u32) -> Result<LockLevel, Error> {
        let count = env
            .storage()
            .instance()
            .get::<DataKey, u32>(&DataKey::LevelCount)
            .unwrap_or(0);

        if level == 0 || level > count {
            return Err(Error::InvalidLevel);
        }

        env.storage()
            .instance()
            .get(&DataKey::Level(level))
            .ok_or(Error::InvalidLevel)
    }

    fn resolve_level_by_duration(env: &Env, duration: u64) -> Result<LockLevel, Error> {
        let count = env
            .storage()
            .instance()
            .get::<DataKey, u32>(&DataKey::LevelCount)
            .unwrap_or(0);

        for level in 1..=count {
            let lock_level: LockLevel = env
                .storage()
                .instance()
                .get(&DataKey::Level(level))
                .ok_or(Error::InvalidLevel)?;
            if lock_level.duration == duration {
                return Ok(lock_level);
            }
        }

        Err(Error::InvalidLevel)
    }

    fn mint_lock(
        env: &Env,
        recipient: Address,
        amount: i128,
        level: &LockLevel,
    ) -> Result<u64, Error> {
        let voting_power =
            calculate_voting_power(amount, level.multiplier).ok_or(Error::Overflow)?;

        let end_timestamp = env
            .ledger()
            .timestamp()
            .checked_add(level.duration)
            .ok_or(Error::Overflow)?;

        let counter: u64 = env
            .storage()
            .instance()
            .get(&DataKey::LockCounter)
            .unwrap_or(0);
        let lock_id = counter + 1;

        let lock = Lock {
            id: lock_id,
            owner: recipient.clone(),
            amount,
            end_timestamp,
            voting_power,
        };

        let total_supply: i128 = env
            .storage()
            .instance()
            .get(&DataKey::TotalVotingSupply)
            .unwrap_or(0);
        let new_total_supply = total_supply
            .checked_add(voting_power)
            .ok_or(Error::Overflow)?;

        let owner_count_key = DataKey::OwnerLockCount(recipient.clone());
        let owner_count = env
            .storage()
            .instance()
            .get::<DataKey, u32>(&owner_count_key)
            .unwrap_or(0);

        env.storage().instance().set(&DataKey::Lock(lock_id), &lock);
        env.storage().instance().set(&DataKey::LockCounter, &lock_id);
        env.storage()
            .instance()
            .set(&DataKey::TotalVotingSupply, &new_total_supply);
        env.storage()
            .instance()
            .set(&owner_count_key, &(owner_count + 1));

        env.events().publish(
            (Symbol::new(env, "lock_created"), lock_id),
            LockCreatedEvent {
                lock_id,
                owner: recipient,
                amount,
                voting_power,
                end_timestamp,
            },
        );

        Ok(lock_id)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::storage::SCALE;

    use soroban_sdk::{
        testutils::{Address as _, Ledger, LedgerInfo},
        token, vec, Address, Env,
    };

    struct TestContext {
        env: Env,
        admin: Address,
        alice: Address,
        bob: Address,
        base_token: Address,
        ve_token_id: Address,
    }

    fn setup_test() -> TestContext {
        let env = Env::default();
        env.mock_all_auths();

        let admin = Address::generate(&env);
        let alice = Address::generate(&env);
        let bob = Address::generate(&env);
        let token_admin = Address::generate(&env);

        // Base asset (use Stellar Asset Contract)
        let base_token_contract = env.register_stellar_asset_contract_v2(token_admin.clone());
        let base_token = base_token_contract.address();

        let base_token_admin = token::StellarAssetClient::new(&env, &base_token);
        base_token_admin.mint(&alice, &(1000i128 * SCALE));
        base_token_admin.mint(&bob, &(1000i128 * SCALE));

        let ve_token_id = env.register_contract(None, VeToken);
        let client = VeTokenClient::new(&env, &ve_token_id);
        client.initialize(&admin, &base_token);

        client.set_lock_levels(
            &vec![&env, 100u64, 200u64, 300u64, 400u64],
            &vec![
                &env,
                2 * SCALE / 10,
                4 * SCALE / 10,
                6 * SCALE / 10,
                SCALE,
            ],
        );

        TestContext {
            env,
            admin,
            alice,
            bob,
            base_token,
            ve_token_id,
        }
    }

    fn set_time(env: &Env, timestamp: u64) {
        env.ledger().set(LedgerInfo {
            timestamp,
            protocol_version: 22,
            sequence_number: 10,
            network_id: Default::default(),
            base_reserve: 10,
            min_temp_entry_ttl: 10,
            min_persistent_entry_ttl: 10,
            max_entry_ttl: 3110400,
        });
    }

    #[test]
    fn test_initialize_once() {
        let ctx = setup_test();
        let client = VeTokenClient::new(&ctx.env, &ctx.ve_token_id);

        let result = client.try_initialize(&ctx.admin, &ctx.base_token);
        assert_eq!(result, Err(Ok(Error::AlreadyInitialized)));
    }

    #[test]
    fn test_create_lock() {
        let ctx = setup_test();
        let client = VeTokenClient::new(&ctx.env, &ctx.ve_token_id);
        let base = token::Client::new(&ctx.env, &ctx.base_token);

        set_time(&ctx.env, 1000);

        // Lock 100 base tokens at level 1 (duration 100, multiplier 0.2)
        let lock_id = client.create_lock(&ctx.alice, &(100i128 * SCALE), &1u32, &ctx.alice);
        assert_eq!(lock_id, 1);

        assert_eq!(client.balance_of(&ctx.alice), 1);
        assert_eq!(client.owner_of(&1u64), ctx.alice);
        assert_eq!(client.total_ve_nfts(), 1);
        assert_eq!(client.total_supply(), 20i128 * SCALE);

        let lock = client.get_lock(&1u64);
        assert_eq!(lock.amount, 100i128 * SCALE);
        assert_eq!(lock.end_timestamp, 1100);
        assert_eq!(lock.voting_power, 20i128 * SCALE);

        // Locked funds moved into the registry
        assert_eq!(base.balance(&ctx.alice), 900i128 * SCALE);
        assert_eq!(base.balance(&ctx.ve_token_id), 100i128 * SCALE);
    }

    #[test]
    fn test_create_lock_for_recipient() {
        let ctx = setup_test();
        let client = VeTokenClient::new(&ctx.env, &ctx.ve_token_id);

        set_time(&ctx.env, 1000);

        // Alice funds a lock owned by Bob
        client.create_lock(&ctx.alice, &(50i128 * SCALE), &4u32, &ctx.bob);

        assert_eq!(client.balance_of(&ctx.alice), 0);
        assert_eq!(client.balance_of(&ctx.bob), 1);
        assert_eq!(client.owner_of(&1u64), ctx.bob);
        assert_eq!(client.total_supply(), 50i128 * SCALE);
    }

    #[test]
    fn test_create_lock_zero_amount() {
        let ctx = setup_test();
        let client = VeTokenClient::new(&ctx.env, &ctx.ve_token_id);

        let result = client.try_create_lock(&ctx.alice, &0i128, &1u32, &ctx.alice);
        assert_eq!(result, Err(Ok(Error::InvalidAmount)));
    }

    #[test]
    fn test_create_lock_unknown_level() {
        let ctx = setup_test();
        let client = VeTokenClient::new(&ctx.env, &ctx.ve_token_id);

        let result = client.try_create_lock(&ctx.alice, &(100i128 * SCALE), &5u32, &ctx.alice);
        assert_eq!(result, Err(Ok(Error::InvalidLevel)));

        let result = client.try_create_lock(&ctx.alice, &(100i128 * SCALE), &0u32, &ctx.alice);
        assert_eq!(result, Err(Ok(Error::InvalidLevel)));
    }

    #[test]
    fn test_set_lock_levels_mismatched_lengths() {
        let ctx = setup_test();
        let client = VeTokenClient::new(&ctx.env, &ctx.ve_token_id);

        let result = client.try_set_lock_levels(
            &vec![&ctx.env, 100u64, 200u64],
            &vec![&ctx.env, SCALE],
        );
        assert_eq!(result, Err(Ok(Error::InvalidConfig)));
    }

    #[test]
    fn test_set_lock_levels_rejects_bad_entries() {
        let ctx = setup_test();
        let client = VeTokenClient::new(&ctx.env, &ctx.ve_token_id);

        let result =
            client.try_set_lock_levels(&vec![&ctx.env, 0u64], &vec![&ctx.env, SCALE]);
        assert_eq!(result, Err(Ok(Error::InvalidConfig)));

        let result =
            client.try_set_lock_levels(&vec![&ctx.env, 100u64], &vec![&ctx.env, 0i128]);
        assert_eq!(result, Err(Ok(Error::InvalidConfig)));
    }

    #[test]
    fn test_set_lock_levels_replaces_table() {
        let ctx = setup_test();
        let client = VeTokenClient::new(&ctx.env, &ctx.ve_token_id);

        set_time(&ctx.env, 1000);
        client.create_lock(&ctx.alice, &(100i128 * SCALE), &1u32, &ctx.alice);

        // Shrink the table to two levels with a new multiplier
        client.set_lock_levels(
            &vec![&ctx.env, 500u64, 600u64],
            &vec![&ctx.env, SCALE / 2, SCALE],
        );
        assert_eq!(client.level_count(), 2);

        // Stale level ids no longer resolve
        let result = client.try_create_lock(&ctx.alice, &(100i128 * SCALE), &3u32, &ctx.alice);
        assert_eq!(result, Err(Ok(Error::InvalidLevel)));

        let level = client.get_lock_level(&1u32);
        assert_eq!(level.duration, 500);
        assert_eq!(level.multiplier, SCALE / 2);

        // Existing lock is untouched by the new table
        let lock = client.get_lock(&1u64);
        assert_eq!(lock.voting_power, 20i128 * SCALE);
        assert_eq!(lock.end_timestamp, 1100);
    }

    #[test]
    fn test_multiple_locks_accumulate() {
        let ctx = setup_test();
        let client = VeTokenClient::new(&ctx.env, &ctx.ve_token_id);

        set_time(&ctx.env, 1000);

        client.create_lock(&ctx.alice, &(100i128 * SCALE), &1u32, &ctx.alice); // power 20
        client.create_lock(&ctx.alice, &(100i128 * SCALE), &2u32, &ctx.alice); // power 40
        client.create_lock(&ctx.bob, &(100i128 * SCALE), &4u32, &ctx.bob); // power 100

        assert_eq!(client.total_ve_nfts(), 3);
        assert_eq!(client.total_supply(), 160i128 * SCALE);
        assert_eq!(client.balance_of(&ctx.alice), 2);
        assert_eq!(client.balance_of(&ctx.bob), 1);
        assert_eq!(client.owner_of(&2u64), ctx.alice);
        assert_eq!(client.owner_of(&3u64), ctx.bob);
    }

    #[test]
    fn test_mint_locked_requires_operator() {
        let ctx = setup_test();
        let client = VeTokenClient::new(&ctx.env, &ctx.ve_token_id);

        let outsider = Address::generate(&ctx.env);
        let result =
            client.try_mint_locked(&outsider, &(100i128 * SCALE), &100u64, &ctx.alice);
        assert_eq!(result, Err(Ok(Error::NotOperator)));
    }

    #[test]
    fn test_mint_locked_resolves_level_by_duration() {
        let ctx = setup_test();
        let client = VeTokenClient::new(&ctx.env, &ctx.ve_token_id);

        set_time(&ctx.env, 1000);

        let operator = Address::generate(&ctx.env);
        client.add_operator(&operator);
        assert!(client.is_operator(&operator));

        // Duration 200 matches level 2 (multiplier 0.4)
        let lock_id = client.mint_locked(&operator, &(100i128 * SCALE), &200u64, &ctx.bob);
        assert_eq!(lock_id, 1);

        let lock = client.get_lock(&lock_id);
        assert_eq!(lock.owner, ctx.bob);
        assert_eq!(lock.voting_power, 40i128 * SCALE);
        assert_eq!(lock.end_timestamp, 1200);

        // No level with this duration
        let result = client.try_mint_locked(&operator, &(100i128 * SCALE), &999u64, &ctx.bob);
        assert_eq!(result, Err(Ok(Error::InvalidLevel)));
    }

    #[test]
    fn test_remove_operator() {
        let ctx = setup_test();
        let client = VeTokenClient::new(&ctx.env, &ctx.ve_token_id);

        let operator = Address::generate(&ctx.env);
        client.add_operator(&operator);
        client.remove_operator(&operator);

        let result =
            client.try_mint_locked(&operator, &(100i128 * SCALE), &100u64, &ctx.alice);
        assert_eq!(result, Err(Ok(Error::NotOperator)));
    }

    #[test]
    fn test_unknown_lock_views() {
        let ctx = setup_test();
        let client = VeTokenClient::new(&ctx.env, &ctx.ve_token_id);

        assert_eq!(client.try_owner_of(&1u64), Err(Ok(Error::UnknownLock)));
        assert_eq!(client.try_get_lock(&7u64), Err(Ok(Error::UnknownLock)));
        assert_eq!(client.total_ve_nfts(), 0);
        assert_eq!(client.total_supply(), 0);
    }
}
