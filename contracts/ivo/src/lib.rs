#![no_std]

mod error;
mod events;
mod pricing;
mod storage;

use error::Error;
use events::*;
use pricing::calculate_cost;
use storage::{DataKey, Sale, SaleStatus, TokenType};

use soroban_sdk::{contract, contractimpl, token, vec, Address, Env, IntoVal, Symbol};

#[contract]
pub struct InitialVeOffering;

#[contractimpl]
impl InitialVeOffering {
    // ============================================
    // INITIALIZATION
    // ============================================

    /// Initialize the offering engine
    ///
    /// Claims are paid from this contract's own base-asset balance; the
    /// admin funds it with ordinary token transfers.
    ///
    /// # Errors
    /// - `AlreadyInitialized`: Contract already initialized
    pub fn initialize(
        env: Env,
        admin: Address,
        payment_token: Address,
        base_token: Address,
        ve_token: Address,
    ) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::AlreadyInitialized);
        }

        admin.require_auth();

        env.storage().instance().set(&DataKey::Initialized, &true);
        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage()
            .instance()
            .set(&DataKey::PaymentToken, &payment_token);
        env.storage().instance().set(&DataKey::BaseToken, &base_token);
        env.storage().instance().set(&DataKey::VeToken, &ve_token);
        env.storage().instance().set(&DataKey::SaleCounter, &0u32);

        Ok(())
    }

    // ============================================
    // FLOW 1: ADMIN CREATES SALE
    // ============================================

    /// Create a new sale in PendingStart
    ///
    /// `locked_period` is stored as supplied; for ve-token sales it is only
    /// checked against the lock level table when a claim mints the lock.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `Unauthorized`: Caller is not admin
    /// - `InvalidConfig`: Zero capacity, negative price, or deadline not in the future
    pub fn add_new_sale(
        env: Env,
        is_ve_token: bool,
        locked_period: u64,
        price: i128,
        total_amount: i128,
        deadline: u64,
    ) -> Result<u32, Error> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(Error::NotInitialized)?;
        admin.require_auth();

        if total_amount <= 0 || price < 0 {
            return Err(Error::InvalidConfig);
        }

        if deadline <= env.ledger().timestamp() {
            return Err(Error::InvalidConfig);
        }

        let counter: u32 = env
            .storage()
            .instance()
            .get(&DataKey::SaleCounter)
            .unwrap_or(0);
        let sale_id = counter + 1;

        let sale = Sale {
            id: sale_id,
            status: SaleStatus::PendingStart,
            price,
            total_amount,
            sold_amount: 0,
            deadline,
        };
        let token_type = TokenType {
            is_ve_token,
            locked_period,
        };

        env.storage().instance().set(&DataKey::Sale(sale_id), &sale);
        env.storage()
            .instance()
            .set(&DataKey::TokenType(sale_id), &token_type);
        env.storage().instance().set(&DataKey::SaleCounter, &sale_id);

        env.events().publish(
            (Symbol::new(&env, "sale_added"), sale_id),
            SaleAddedEvent {
                sale_id,
                is_ve_token,
                locked_period,
                price,
                total_amount,
                deadline,
            },
        );

        Ok(sale_id)
    }

    // ============================================
    // FLOW 2: ADMIN STARTS SALE
    // ============================================

    /// Open a sale for purchases
    ///
    /// The deadline is not re-checked here; scheduling a start close to or
    /// past the deadline is the admin's responsibility.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `Unauthorized`: Caller is not admin
    /// - `SaleNotFound`: Sale doesn't exist
    /// - `InvalidTransition`: Sale not in PendingStart status
    pub fn start_sale(env: Env, sale_id: u32) -> Result<(), Error> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(Error::NotInitialized)?;
        admin.require_auth();

        let mut sale: Sale = env
            .storage()
            .instance()
            .get(&DataKey::Sale(sale_id))
            .ok_or(Error::SaleNotFound)?;

        if sale.status != SaleStatus::PendingStart {
            return Err(Error::InvalidTransition);
        }

        sale.status = SaleStatus::Live;
        env.storage().instance().set(&DataKey::Sale(sale_id), &sale);

        env.events().publish(
            (Symbol::new(&env, "sale_started"), sale_id),
            SaleStartedEvent { sale_id },
        );

        Ok(())
    }

    // ============================================
    // FLOW 3: USER BUYS
    // ============================================

    /// Buy into a live sale
    ///
    /// `pay_amount` must equal `amount * price / SCALE` exactly; there is
    /// no overpay or underpay tolerance.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `SaleNotFound`: Sale doesn't exist
    /// - `InvalidTransition`: Sale not in Live status
    /// - `DeadlinePassed`: Buy window has closed
    /// - `InvalidAmount`: amount must be positive
    /// - `CapacityExceeded`: Would exceed the sale's total_amount
    /// - `WrongPayment`: pay_amount does not match the exact cost
    pub fn buy(
        env: Env,
        buyer: Address,
        sale_id: u32,
        amount: i128,
        pay_amount: i128,
    ) -> Result<(), Error> {
        buyer.require_auth();

        let mut sale: Sale = env
            .storage()
            .instance()
            .get(&DataKey::Sale(sale_id))
            .ok_or(Error::SaleNotFound)?;

        if sale.status != SaleStatus::Live {
            return Err(Error::InvalidTransition);
        }

        if env.ledger().timestamp() >= sale.deadline {
            return Err(Error::DeadlinePassed);
        }

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        let new_sold = sale
            .sold_amount
            .checked_add(amount)
            .ok_or(Error::Overflow)?;
        if new_sold > sale.total_amount {
            return Err(Error::CapacityExceeded);
        }

        let cost = calculate_cost(amount, sale.price).ok_or(Error::Overflow)?;
        if pay_amount != cost {
            return Err(Error::WrongPayment);
        }

        let payment_token: Address = env
            .storage()
            .instance()
            .get(&DataKey::PaymentToken)
            .ok_or(Error::NotInitialized)?;

        let payment_client = token::Client::new(&env, &payment_token);
        payment_client.transfer(&buyer, &env.current_contract_address(), &pay_amount);

        let bought_key = DataKey::UserBought(buyer.clone(), sale_id);
        let bought = env
            .storage()
            .instance()
            .get::<DataKey, i128>(&bought_key)
            .unwrap_or(0);
        let new_bought = bought.checked_add(amount).ok_or(Error::Overflow)?;

        sale.sold_amount = new_sold;
        env.storage().instance().set(&DataKey::Sale(sale_id), &sale);
        env.storage().instance().set(&bought_key, &new_bought);

        env.events().publish(
            (Symbol::new(&env, "purchase"), sale_id, buyer.clone()),
            PurchaseEvent {
                sale_id,
                buyer,
                amount,
                pay_amount,
            },
        );

        Ok(())
    }

    // ============================================
    // FLOW 4: SETTLEMENT (time-gated, callable by anyone)
    // ============================================

    /// Close a sale's buy window once its deadline has passed
    ///
    /// # Errors
    /// - `SaleNotFound`: Sale doesn't exist
    /// - `InvalidTransition`: Sale not in Live status
    /// - `TooEarly`: Deadline has not passed yet
    pub fn settle(env: Env, sale_id: u32) -> Result<(), Error> {
        let mut sale: Sale = env
            .storage()
            .instance()
            .get(&DataKey::Sale(sale_id))
            .ok_or(Error::SaleNotFound)?;

        if sale.status != SaleStatus::Live {
            return Err(Error::InvalidTransition);
        }

        if env.ledger().timestamp() < sale.deadline {
            return Err(Error::TooEarly);
        }

        sale.status = SaleStatus::Claimable;
        env.storage().instance().set(&DataKey::Sale(sale_id), &sale);

        env.events().publish(
            (Symbol::new(&env, "settled"), sale_id),
            SettledEvent { sale_id },
        );

        Ok(())
    }

    // ============================================
    // FLOW 5: USER CLAIMS
    // ============================================

    /// Redeem a buyer's allocation after settlement
    ///
    /// The allocation entry is removed before any asset moves; the removal
    /// is what makes a repeat claim fail. Base-asset sales pay out
    /// directly; ve-token sales escrow the amount into the lock registry
    /// and mint a lock for the claimant.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `SaleNotFound`: Sale doesn't exist
    /// - `InvalidTransition`: Sale not in Claimable status
    /// - `NothingToClaim`: Never bought, or already claimed
    pub fn claim(env: Env, claimant: Address, sale_id: u32) -> Result<(), Error> {
        claimant.require_auth();

        let sale: Sale = env
            .storage()
            .instance()
            .get(&DataKey::Sale(sale_id))
            .ok_or(Error::SaleNotFound)?;

        if sale.status != SaleStatus::Claimable {
            return Err(Error::InvalidTransition);
        }

        let bought_key = DataKey::UserBought(claimant.clone(), sale_id);
        let amount = env
            .storage()
            .instance()
            .get::<DataKey, i128>(&bought_key)
            .unwrap_or(0);
        if amount == 0 {
            return Err(Error::NothingToClaim);
        }

        // Zero the allocation before paying it out
        env.storage().instance().remove(&bought_key);

        let token_type: TokenType = env
            .storage()
            .instance()
            .get(&DataKey::TokenType(sale_id))
            .ok_or(Error::SaleNotFound)?;

        let base_token: Address = env
            .storage()
            .instance()
            .get(&DataKey::BaseToken)
            .ok_or(Error::NotInitialized)?;
        let base_client = token::Client::new(&env, &base_token);

        if token_type.is_ve_token {
            let ve_token: Address = env
                .storage()
                .instance()
                .get(&DataKey::VeToken)
                .ok_or(Error::NotInitialized)?;

            // Escrow the backing amount into the registry, then mint the lock
            base_client.transfer(&env.current_contract_address(), &ve_token, &amount);

            env.invoke_contract::<u64>(
                &ve_token,
                &Symbol::new(&env, "mint_locked"),
                vec![
                    &env,
                    env.current_contract_address().to_val(),
                    amount.into_val(&env),
                    token_type.locked_period.into_val(&env),
                    claimant.to_val(),
                ],
            );
        } else {
            base_client.transfer(&env.current_contract_address(), &claimant, &amount);
        }

        env.events().publish(
            (Symbol::new(&env, "claimed"), sale_id, claimant.clone()),
            ClaimedEvent {
                sale_id,
                claimant,
                amount,
                is_ve_token: token_type.is_ve_token,
            },
        );

        Ok(())
    }

    // ============================================
    // VIEW FUNCTIONS
    // ============================================

    /// Get sale details
    pub fn get_sale(env: Env, sale_id: u32) -> Result<Sale, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Sale(sale_id))
            .ok_or(Error::SaleNotFound)
    }

    /// Get the token type paired with a sale
    pub fn get_token_type(env: Env, sale_id: u32) -> Result<TokenType, Error> {
        env.storage()
            .instance()
            .get(&DataKey::TokenType(sale_id))
            .ok_or(Error::SaleNotFound)
    }

    /// Unclaimed amount bought by an account in a sale
    pub fn user_bought(env: Env, account: Address, sale_id: u32) -> i128 {
        env.storage()
            .instance()
            .get::<DataKey, i128>(&DataKey::UserBought(account, sale_id))
            .unwrap_or(0)
    }

    /// Number of sales created
    pub fn total_sales(env: Env) -> u32 {
        env.storage()
            .instance()
            .get::<DataKey, u32>(&DataKey::SaleCounter)
            .unwrap_or(0)
    }
}
