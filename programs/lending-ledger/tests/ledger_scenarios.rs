use anchor_lang::prelude::*;

use lending_ledger::constants::{DEFAULT_MAX_FEE_VALUE, DEFAULT_ORACLE_MAX_AGE, ONE_DAY, WAD};
use lending_ledger::error::LedgerError;
use lending_ledger::ledger::{LendingLedger, LiquidationRequest, WrappedReceipt};
use lending_ledger::math::fixed_point::wad_mul;
use lending_ledger::oracle::{PriceBook, PriceFeed, PriceOracle};
use lending_ledger::state::{LiquidationParams, PoolParams, ReceiptWrapper};

const NOW: i64 = 1_700_000_000;
const TOKEN: u64 = 1_000_000;
const MIN_POLE: u128 = 1_010_000_000_000_000_000;

fn params(collateral_factor: u128) -> PoolParams {
    PoolParams {
        allow_borrow: true,
        collateral_factor,
        max_deposit_amount: u64::MAX,
        borrow_cap: u64::MAX,
        min_pole: MIN_POLE,
        max_pole: 1_250_000_000_000_000_000,
        multiplicative_factor: 50_000_000_000_000_000,
        pool_fee: 0,
        feed_id: [3u8; 32],
        oracle_max_age: DEFAULT_ORACLE_MAX_AGE,
    }
}

struct Market {
    ledger: LendingLedger,
    book: PriceBook,
    collateral: Pubkey,
    debt: Pubkey,
    owner: Pubkey,
    borrower: Pubkey,
    lender_owner: Pubkey,
    lender: Pubkey,
}

/// A collateral pool at factor 0.85 and a debt pool at 1.0, both priced at one unit per token.
/// The lender supplies 1000 debt tokens, the borrower 100 collateral tokens.
fn market() -> Market {
    market_with(100 * TOKEN, 0)
}

/// Same market with the borrower's collateral split between pooled and bare.
fn market_with(pooled: u64, bare: u64) -> Market {
    let mut ledger = LendingLedger::new(LiquidationParams::default(), Pubkey::new_unique());
    let mut book = PriceBook::new(NOW);
    let collateral = Pubkey::new_unique();
    let debt = Pubkey::new_unique();
    ledger
        .create_pool(collateral, 6, &params(850_000_000_000_000_000), NOW)
        .unwrap();
    ledger.create_pool(debt, 6, &params(WAD), NOW).unwrap();
    book.set_price(collateral, WAD, 6);
    book.set_price(debt, WAD, 6);

    let lender_owner = Pubkey::new_unique();
    let lender = Pubkey::new_unique();
    ledger.create_position(lender, lender_owner).unwrap();
    ledger
        .deposit(lender, lender_owner, debt, 1_000 * TOKEN, NOW)
        .unwrap();

    let owner = Pubkey::new_unique();
    let borrower = Pubkey::new_unique();
    ledger.create_position(borrower, owner).unwrap();
    if pooled > 0 {
        ledger
            .deposit(borrower, owner, collateral, pooled, NOW)
            .unwrap();
    }
    if bare > 0 {
        ledger
            .solely_deposit(borrower, owner, collateral, bare, NOW)
            .unwrap();
    }

    Market {
        ledger,
        book,
        collateral,
        debt,
        owner,
        borrower,
        lender_owner,
        lender,
    }
}

/// Borrower owes 80 debt tokens; returns the liquidator's position and its controlling party.
fn leveraged_market() -> (Market, Pubkey, Pubkey) {
    leveraged_market_with(100 * TOKEN, 0)
}

fn leveraged_market_with(pooled: u64, bare: u64) -> (Market, Pubkey, Pubkey) {
    let mut m = market_with(pooled, bare);
    m.ledger
        .borrow(m.borrower, m.owner, m.debt, 80 * TOKEN, &m.book, NOW)
        .unwrap();
    let liquidator_owner = Pubkey::new_unique();
    let liquidator = Pubkey::new_unique();
    m.ledger
        .create_position(liquidator, liquidator_owner)
        .unwrap();
    (m, liquidator, liquidator_owner)
}

fn request(m: &Market, liquidator: Pubkey, wish_mint: Pubkey, payback_shares: u128) -> LiquidationRequest {
    LiquidationRequest {
        borrower: m.borrower,
        liquidator,
        payback_mint: m.debt,
        wish_mint,
        payback_shares,
    }
}

#[test]
fn fresh_pool_is_seeded_and_credits_a_deposit_in_full() {
    let mut ledger = LendingLedger::new(LiquidationParams::default(), Pubkey::new_unique());
    let mint = Pubkey::new_unique();
    ledger.create_pool(mint, 6, &params(WAD), NOW).unwrap();

    let pool = ledger.pool(&mint).unwrap();
    assert_eq!(pool.total_shares, 1_000);
    assert_eq!(pool.pseudo_total_amount, 1_000);
    assert_eq!(pool.total_pool_amount, 1_000);

    let owner = Pubkey::new_unique();
    let position = Pubkey::new_unique();
    ledger.create_position(position, owner).unwrap();
    let shares = ledger.deposit(position, owner, mint, 40_003, NOW).unwrap();
    assert_eq!(shares, 40_003);
    assert_eq!(ledger.pool(&mint).unwrap().total_pool_amount, 41_003);
    assert_eq!(ledger.lending_amount(&position, &mint).unwrap(), 40_003);
}

#[test]
fn borrow_stops_at_the_weighted_collateral() {
    let mut m = market();
    let err = m
        .ledger
        .borrow(m.borrower, m.owner, m.debt, 86 * TOKEN, &m.book, NOW)
        .unwrap_err();
    assert_eq!(err, LedgerError::ResultsInBadDebt.into());
    assert!(m.ledger.is_idle());

    m.ledger
        .borrow(m.borrower, m.owner, m.debt, 84 * TOKEN, &m.book, NOW)
        .unwrap();
    assert_eq!(m.ledger.borrow_amount(&m.borrower, &m.debt).unwrap(), 84 * TOKEN);
    assert!(m.ledger.debt_ratio(&m.borrower, &m.book).unwrap() < WAD);
    assert!(!m.ledger.is_liquidatable(&m.borrower, &m.book).unwrap());
}

#[test]
fn borrow_limit_is_exact_to_the_unit() {
    let mut m = market();
    let limit = m
        .ledger
        .borrow_limit_amount(&m.borrower, &m.debt, &m.book)
        .unwrap();
    assert_eq!(limit, 85 * TOKEN);

    m.ledger
        .borrow(m.borrower, m.owner, m.debt, limit - 1, &m.book, NOW)
        .unwrap();
    let err = m
        .ledger
        .borrow(m.borrower, m.owner, m.debt, 2, &m.book, NOW)
        .unwrap_err();
    assert_eq!(err, LedgerError::ResultsInBadDebt.into());

    // withdrawing collateral is held to the same bound
    let err = m
        .ledger
        .withdraw(m.borrower, m.owner, m.collateral, TOKEN, &m.book, NOW)
        .unwrap_err();
    assert_eq!(err, LedgerError::ResultsInBadDebt.into());
    assert_eq!(m.ledger.lending_amount(&m.borrower, &m.collateral).unwrap(), 100 * TOKEN);
}

#[test]
fn stale_collateral_price_blocks_borrowing() {
    let mut m = market();
    let mut stale = PriceBook::new(NOW);
    stale.set_price(m.debt, WAD, 6);
    stale.set_feed(
        m.collateral,
        PriceFeed {
            price: WAD,
            decimals: 6,
            publish_time: NOW - DEFAULT_ORACLE_MAX_AGE as i64 - 1,
            max_age: DEFAULT_ORACLE_MAX_AGE,
        },
    );
    let err = m
        .ledger
        .borrow(m.borrower, m.owner, m.debt, 10 * TOKEN, &stale, NOW)
        .unwrap_err();
    assert_eq!(err, LedgerError::StalePrice.into());
    assert!(m.ledger.entry(&m.borrower, &m.debt).is_none());
}

#[test]
fn accrual_never_lowers_the_share_price_and_round_trips_lose_at_most_dust() {
    let mut m = market();
    m.ledger
        .deposit(m.borrower, m.owner, m.collateral, 900 * TOKEN, NOW)
        .unwrap();
    m.ledger
        .borrow(m.borrower, m.owner, m.debt, 500 * TOKEN, &m.book, NOW)
        .unwrap();

    let mut last = m.ledger.pool(&m.debt).unwrap().share_price().unwrap();
    for day in 1..=20 {
        m.ledger
            .deposit(m.lender, m.lender_owner, m.debt, TOKEN, NOW + day * ONE_DAY)
            .unwrap();
        let price = m.ledger.pool(&m.debt).unwrap().share_price().unwrap();
        assert!(price >= last);
        last = price;
    }
    assert!(last > WAD);
    assert!(m.ledger.borrow_amount(&m.borrower, &m.debt).unwrap() > 500 * TOKEN);

    let later = NOW + 20 * ONE_DAY;
    let amount = 12_345_678;
    let shares = m
        .ledger
        .deposit(m.lender, m.lender_owner, m.debt, amount, later)
        .unwrap();
    let returned = m
        .ledger
        .withdraw_shares(m.lender, m.lender_owner, m.debt, shares, &m.book, later)
        .unwrap();
    assert!(returned <= amount);
    assert!(amount - returned <= 2);
}

#[test]
fn sole_borrower_pays_interest_from_the_first_second() {
    let mut m = market();
    m.ledger
        .borrow(m.borrower, m.owner, m.debt, 80 * TOKEN, &m.book, NOW)
        .unwrap();
    let pool = m.ledger.pool(&m.debt).unwrap();
    assert!(pool.utilization > 0);
    assert!(pool.borrow_rate > 0);

    let (_, pulled) = m
        .ledger
        .payback(m.borrower, m.owner, m.debt, u64::MAX, NOW + 29 * ONE_DAY)
        .unwrap();
    assert!(pulled > 80 * TOKEN);
    assert_eq!(m.ledger.borrow_amount(&m.borrower, &m.debt).unwrap(), 0);
    assert!(m.ledger.lending_amount(&m.lender, &m.debt).unwrap() > 1_000 * TOKEN);
}

#[test]
fn payback_by_shares_rounds_the_amount_up() {
    let mut m = market();
    m.ledger
        .borrow(m.borrower, m.owner, m.debt, 80 * TOKEN, &m.book, NOW)
        .unwrap();
    let later = NOW + 10 * ONE_DAY;
    m.ledger
        .deposit(m.lender, m.lender_owner, m.debt, TOKEN, later)
        .unwrap();

    let shares = 30 * TOKEN as u128 + 1;
    let pool = m.ledger.pool(&m.debt).unwrap();
    let ceil = pool.borrow_amount(shares, true).unwrap();
    let floor = pool.borrow_amount(shares, false).unwrap();
    assert_eq!(ceil, floor + 1);

    // anyone may pay down an unlocked position
    let payer = Pubkey::new_unique();
    let pulled = m
        .ledger
        .payback_shares(m.borrower, payer, m.debt, shares, later)
        .unwrap();
    assert_eq!(pulled as u128, ceil);
    assert!(pulled > 30 * TOKEN);
    let entry = m.ledger.entry(&m.borrower, &m.debt).unwrap();
    assert_eq!(entry.borrow_shares, 80 * TOKEN as u128 - shares);
}

#[test]
fn bare_collateral_backs_borrowing_and_withdrawals() {
    let mut m = market_with(0, 100 * TOKEN);
    let (weighted, bare) = m
        .ledger
        .weighted_and_bare_collateral(&m.borrower, &m.book)
        .unwrap();
    assert_eq!(weighted, 85 * WAD);
    assert_eq!(bare, 100 * WAD);
    assert_eq!(m.ledger.pool(&m.collateral).unwrap().total_pool_amount, 1_000);

    m.ledger
        .borrow(m.borrower, m.owner, m.debt, 80 * TOKEN, &m.book, NOW)
        .unwrap();

    let err = m
        .ledger
        .solely_withdraw(m.borrower, m.lender_owner, m.collateral, TOKEN, &m.book, NOW)
        .unwrap_err();
    assert_eq!(err, LedgerError::NotOwner.into());

    // 90 tokens left would weigh 76.5 against 80 owed
    let err = m
        .ledger
        .solely_withdraw(m.borrower, m.owner, m.collateral, 10 * TOKEN, &m.book, NOW)
        .unwrap_err();
    assert_eq!(err, LedgerError::ResultsInBadDebt.into());
    assert_eq!(m.ledger.entry(&m.borrower, &m.collateral).unwrap().bare_amount, 100 * TOKEN);
    assert!(m.ledger.is_idle());

    m.ledger
        .solely_withdraw(m.borrower, m.owner, m.collateral, 5 * TOKEN, &m.book, NOW)
        .unwrap();
    assert_eq!(m.ledger.entry(&m.borrower, &m.collateral).unwrap().bare_amount, 95 * TOKEN);
    assert_eq!(
        m.ledger
            .weighted_and_bare_collateral(&m.borrower, &m.book)
            .unwrap(),
        (80_750_000_000_000_000_000, 95 * WAD)
    );
}

#[test]
fn long_idle_pool_falls_back_to_min_pole() {
    let mut m = market();
    m.ledger
        .deposit(m.lender, m.lender_owner, m.debt, TOKEN, NOW + ONE_DAY)
        .unwrap();
    m.ledger
        .deposit(m.lender, m.lender_owner, m.debt, TOKEN, NOW + 1_000 * ONE_DAY)
        .unwrap();
    assert_eq!(m.ledger.pool(&m.debt).unwrap().pole.current_pole, MIN_POLE);
}

#[test]
fn healthy_position_cannot_be_liquidated() {
    let (mut m, liquidator, liquidator_owner) = leveraged_market();
    let req = request(&m, liquidator, m.collateral, TOKEN as u128);
    let err = m
        .ledger
        .liquidate(&req, liquidator_owner, &m.book, NOW)
        .unwrap_err();
    assert_eq!(err, LedgerError::LiquidationDenied.into());
    assert!(m.ledger.is_idle());
}

#[test]
fn liquidation_reward_is_capped_at_max_fee() {
    let (mut m, liquidator, liquidator_owner) = leveraged_market();
    m.book.set_price(m.collateral, 9 * WAD / 10, 6);
    assert!(m.ledger.is_liquidatable(&m.borrower, &m.book).unwrap());

    // backed by its bare value, so only half the debt may go in one call
    let req = request(&m, liquidator, m.collateral, 40 * TOKEN as u128 + 1);
    let err = m
        .ledger
        .liquidate(&req, liquidator_owner, &m.book, NOW)
        .unwrap_err();
    assert_eq!(err, LedgerError::TooManyShares.into());

    let req = request(&m, liquidator, m.collateral, 40 * TOKEN as u128);
    let err = m
        .ledger
        .liquidate(&req, m.owner, &m.book, NOW)
        .unwrap_err();
    assert_eq!(err, LedgerError::NotOwner.into());

    let outcome = m
        .ledger
        .liquidate(&req, liquidator_owner, &m.book, NOW)
        .unwrap();
    assert_eq!(outcome.payback_amount, 40 * TOKEN);
    assert_eq!(outcome.payback_value, 40 * WAD);
    // 10% of 40 would be 4
    assert_eq!(outcome.reward_value, DEFAULT_MAX_FEE_VALUE);
    assert!(outcome.reward_value < wad_mul(outcome.payback_value, WAD / 10).unwrap());

    assert_eq!(outcome.wish_percentage, 477_777_777_777_777_778);
    assert_eq!(outcome.pool_tokens_received, 47_777_777);
    assert_eq!(outcome.shares_received, 0);
    let seized_value = m.book.value_of(&m.collateral, outcome.tokens_received()).unwrap();
    let settlement = outcome.payback_value + outcome.reward_value;
    assert!(settlement - seized_value < m.book.value_of(&m.collateral, 1).unwrap());

    assert_eq!(m.ledger.borrow_amount(&m.borrower, &m.debt).unwrap(), 40 * TOKEN);
    assert_eq!(
        m.ledger.lending_amount(&m.borrower, &m.collateral).unwrap(),
        100 * TOKEN - 47_777_777
    );
}

#[test]
fn bad_debt_can_be_closed_in_one_call() {
    let (mut m, liquidator, liquidator_owner) = leveraged_market();
    m.book.set_price(m.collateral, 7 * WAD / 10, 6);

    let req = request(&m, liquidator, m.collateral, 80 * TOKEN as u128);
    let outcome = m
        .ledger
        .liquidate(&req, liquidator_owner, &m.book, NOW)
        .unwrap();
    assert_eq!(outcome.wish_percentage, WAD);
    assert_eq!(outcome.pool_tokens_received, 100 * TOKEN);
    // 70 worth of collateral against 80 paid leaves nothing for the liquidator
    assert_eq!(outcome.payback_value, 80 * WAD);
    assert_eq!(outcome.reward_value, 0);
    assert_eq!(m.ledger.borrow_amount(&m.borrower, &m.debt).unwrap(), 0);
    assert_eq!(m.ledger.lending_amount(&m.borrower, &m.collateral).unwrap(), 0);
}

#[test]
fn bare_collateral_is_seized_before_pool_liquidity() {
    let (mut m, liquidator, liquidator_owner) = leveraged_market_with(0, 100 * TOKEN);
    m.book.set_price(m.collateral, 9 * WAD / 10, 6);

    let req = request(&m, liquidator, m.collateral, 40 * TOKEN as u128);
    let outcome = m
        .ledger
        .liquidate(&req, liquidator_owner, &m.book, NOW)
        .unwrap();
    assert_eq!(outcome.wish_percentage, 477_777_777_777_777_778);
    assert_eq!(outcome.bare_received, 47_777_777);
    assert_eq!(outcome.pool_tokens_received, 0);
    assert_eq!(outcome.shares_received, 0);
    assert_eq!(outcome.reward_value, DEFAULT_MAX_FEE_VALUE);

    let seized_value = m.book.value_of(&m.collateral, outcome.tokens_received()).unwrap();
    let settlement = outcome.payback_value + outcome.reward_value;
    assert!(seized_value <= settlement);
    assert!(settlement - seized_value < m.book.value_of(&m.collateral, 1).unwrap());

    let entry = m.ledger.entry(&m.borrower, &m.collateral).unwrap();
    assert_eq!(entry.bare_amount, 100 * TOKEN - 47_777_777);
    assert_eq!(entry.lending_shares, 0);
    assert_eq!(m.ledger.pool(&m.collateral).unwrap().total_pool_amount, 1_000);
    assert_eq!(m.ledger.borrow_amount(&m.borrower, &m.debt).unwrap(), 40 * TOKEN);
}

#[test]
fn partly_liquid_wish_pool_splits_the_payout() {
    let (mut m, liquidator, liquidator_owner) =
        leveraged_market_with(50 * TOKEN, 50 * TOKEN);

    // leave exactly 10 tokens of liquidity in the collateral pool
    let whale_owner = Pubkey::new_unique();
    let whale = Pubkey::new_unique();
    m.ledger.create_position(whale, whale_owner).unwrap();
    m.ledger
        .deposit(whale, whale_owner, m.debt, 500 * TOKEN, NOW)
        .unwrap();
    let liquidity = m.ledger.pool(&m.collateral).unwrap().total_pool_amount;
    m.ledger
        .borrow(whale, whale_owner, m.collateral, liquidity - 10 * TOKEN, &m.book, NOW)
        .unwrap();
    assert_eq!(m.ledger.pool(&m.collateral).unwrap().total_pool_amount, 10 * TOKEN);

    m.book.set_price(m.collateral, 9 * WAD / 10, 6);
    let req = request(&m, liquidator, m.collateral, 40 * TOKEN as u128);
    let outcome = m
        .ledger
        .liquidate(&req, liquidator_owner, &m.book, NOW)
        .unwrap();

    assert_eq!(outcome.bare_received, 23_888_888);
    assert_eq!(outcome.pool_tokens_received, 10 * TOKEN);
    assert_eq!(outcome.shares_received, 13_888_888);
    assert_eq!(m.ledger.pool(&m.collateral).unwrap().total_pool_amount, 0);

    let credited = m.ledger.lending_amount(&liquidator, &m.collateral).unwrap();
    assert_eq!(credited, 13_888_888);
    let delivered = m
        .book
        .value_of(&m.collateral, outcome.tokens_received() + credited)
        .unwrap();
    let settlement = outcome.payback_value + outcome.reward_value;
    assert!(delivered <= settlement);
    // each of the three legs floors once
    assert!(settlement - delivered < m.book.value_of(&m.collateral, 2).unwrap());

    let entry = m.ledger.entry(&m.borrower, &m.collateral).unwrap();
    assert_eq!(entry.bare_amount, 50 * TOKEN - 23_888_888);
    assert_eq!(entry.lending_shares, 50 * TOKEN as u128 - 23_888_888);
}

#[test]
fn wish_token_without_collateral_value_is_rejected() {
    let (mut m, liquidator, liquidator_owner) = leveraged_market();
    m.book.set_price(m.collateral, 9 * WAD / 10, 6);
    let req = request(&m, liquidator, m.debt, TOKEN as u128);
    let err = m
        .ledger
        .liquidate(&req, liquidator_owner, &m.book, NOW)
        .unwrap_err();
    assert_eq!(err, LedgerError::InvalidAction.into());
    assert_eq!(m.ledger.borrow_amount(&m.borrower, &m.debt).unwrap(), 80 * TOKEN);
}

#[test]
fn illiquid_wish_pool_pays_the_liquidator_in_shares() {
    let (mut m, liquidator, liquidator_owner) = leveraged_market();

    // a second borrower drains the collateral pool's liquidity
    let whale_owner = Pubkey::new_unique();
    let whale = Pubkey::new_unique();
    m.ledger.create_position(whale, whale_owner).unwrap();
    m.ledger
        .deposit(whale, whale_owner, m.debt, 500 * TOKEN, NOW)
        .unwrap();
    let liquidity = m.ledger.pool(&m.collateral).unwrap().total_pool_amount;
    m.ledger
        .borrow(whale, whale_owner, m.collateral, liquidity, &m.book, NOW)
        .unwrap();
    assert_eq!(m.ledger.pool(&m.collateral).unwrap().total_pool_amount, 0);

    m.book.set_price(m.collateral, 9 * WAD / 10, 6);
    let req = request(&m, liquidator, m.collateral, 40 * TOKEN as u128);
    let outcome = m
        .ledger
        .liquidate(&req, liquidator_owner, &m.book, NOW)
        .unwrap();

    assert_eq!(outcome.tokens_received(), 0);
    assert_eq!(outcome.shares_received, 47_777_777);
    let entry = m.ledger.entry(&liquidator, &m.collateral).unwrap();
    assert_eq!(entry.lending_shares, outcome.shares_received);
    assert_eq!(
        m.ledger.position(&liquidator).unwrap().tokens,
        vec![m.collateral]
    );

    let credited = m.ledger.lending_amount(&liquidator, &m.collateral).unwrap();
    let credited_value = m.book.value_of(&m.collateral, credited).unwrap();
    let settlement = outcome.payback_value + outcome.reward_value;
    assert!(credited_value <= settlement);
    assert!(settlement - credited_value < m.book.value_of(&m.collateral, 1).unwrap());
}

#[test]
fn wrapped_receipts_book_the_receipt_pool() {
    let mut ledger = LendingLedger::new(LiquidationParams::default(), Pubkey::new_unique());
    let mut book = PriceBook::new(NOW);
    let mut wrapper = ReceiptWrapper {
        base_mint: Pubkey::new_unique(),
        receipt_mint: Pubkey::new_unique(),
        ..ReceiptWrapper::default()
    };
    wrapper.wrap_base(1_000).unwrap();
    wrapper.donate(250).unwrap();

    let mut receipt_params = params(800_000_000_000_000_000);
    receipt_params.allow_borrow = false;
    ledger
        .create_pool(wrapper.receipt_mint, 6, &receipt_params, NOW)
        .unwrap();
    book.set_price(wrapper.receipt_mint, WAD, 6);

    let owner = Pubkey::new_unique();
    let position = Pubkey::new_unique();
    ledger.create_position(position, owner).unwrap();

    let outcome = ledger
        .deposit_via(&WrappedReceipt::new(&wrapper), position, owner, TOKEN, NOW)
        .unwrap();
    assert_eq!(outcome.caller_amount, TOKEN);
    assert_eq!(outcome.pool_amount, 800_000);
    assert_eq!(outcome.shares, 800_000);
    assert_eq!(wrapper.wrap_base(TOKEN).unwrap(), outcome.pool_amount);

    let outcome = ledger
        .withdraw_via(
            &WrappedReceipt::new(&wrapper),
            position,
            owner,
            TOKEN / 2,
            &book,
            NOW,
        )
        .unwrap();
    assert_eq!(outcome.pool_amount, 400_000);
    assert_eq!(outcome.caller_amount, TOKEN / 2);
    assert_eq!(wrapper.unwrap_receipt(outcome.pool_amount).unwrap(), TOKEN / 2);
    assert_eq!(ledger.lending_amount(&position, &wrapper.receipt_mint).unwrap(), 400_000);
}
