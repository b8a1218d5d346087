// ========================================
// INTEGRATION TESTS FOR BIZCHAIN
// ========================================
//
// Test Scenarios:
// 1. Member Journey (checkout -> order -> commission -> rewards)
// 2. Daily Return Cycle Renewal
// 3. Weekly Pool Distribution
// 4. Custom Plan Loaded From Disk
// 5. Error Kinds Surface Unchanged
//
// Usage:
//   cargo test --test integration_test -- --nocapture
//
// ========================================

use biz_core::pool::plan_weekly_distribution;
use biz_core::wallet::validate_withdrawal;
use biz_core::{Account, CalcError, Catalog, CompensationPlan, Order, OrderStatus, PlanConfig};
use tempfile::TempDir;

// ========================================
// TEST 1: MEMBER JOURNEY
// ========================================
#[test]
fn test_member_journey() {
    println!("\n🧪 TEST 1: Member Journey");
    println!("================================================\n");

    let plan = CompensationPlan::standard();
    let catalog = Catalog::standard();

    // Buyer checks out the headphones with the member discount
    let headphones = catalog.get(1).unwrap();
    let quote = plan.checkout_product(headphones).unwrap();
    assert_eq!(quote.product_price, 19_999);
    assert_eq!(quote.total, 17_999);
    assert_eq!(quote.total_savings, 7_000);
    println!("✅ Checkout total: {} cents", quote.total);

    // Order moves pending -> verified -> delivered
    let mut order =
        Order::submit("1700000000000", headphones.id, "0xfeed", true, quote.total).unwrap();
    assert_eq!(order.status, OrderStatus::Pending);
    order.verify().unwrap();
    order.deliver().unwrap();
    assert!(order.status.is_terminal());
    println!("✅ Order delivered");

    // Payment flows up the referral chain
    let payout = plan.commission(quote.total).unwrap();
    assert_eq!(payout.level1, 1_800);
    assert_eq!(payout.level2, 900);
    assert_eq!(payout.level3, 360);
    assert_eq!(payout.total_distributed, 3_060);
    assert!(payout.total_distributed <= quote.total);

    // Referrer standing after the sale
    let referrer = Account::new("USER123456", 45, [12, 8, 3]);
    let projection = plan.project_account(&referrer);
    assert_eq!(projection.daily_rate_bps, 400);
    assert_eq!(projection.pool_rank.as_deref(), Some("Bronze"));
    assert_eq!(projection.salary_rank.as_deref(), Some("Explorer"));
    assert_eq!(projection.weekly_salary, 25_000);
    println!("✅ Referrer projected: {:?}", projection);

    // Wallet breakdown and withdrawal limit
    let breakdown = plan.wallet_split.split(245_678).unwrap();
    assert_eq!(
        breakdown.earnings + breakdown.global_pool + breakdown.tax,
        245_678
    );
    assert!(validate_withdrawal(breakdown.earnings, breakdown.earnings).is_ok());
    assert!(matches!(
        validate_withdrawal(breakdown.earnings + 1, breakdown.earnings),
        Err(CalcError::InsufficientBalance { .. })
    ));

    // Withdrawals pay out net of the 10% fee and start at $50
    let withdrawal = plan.withdraw(breakdown.earnings, breakdown.earnings).unwrap();
    assert_eq!(withdrawal.fee + withdrawal.net_payout, breakdown.earnings);
    assert_eq!(withdrawal.remaining_balance, 0);
    assert!(matches!(
        plan.withdraw(4_999, breakdown.earnings),
        Err(CalcError::InvalidInput(_))
    ));
    println!("✅ Net payout: {} cents", withdrawal.net_payout);

    // Each new member pays $0.50 into the pool buckets
    let joinings = plan.joining_allocation(1_000).unwrap();
    assert_eq!(
        joinings.new_joinings + joinings.weekly_payouts + joinings.growth,
        50_000
    );
    assert_eq!(joinings.new_joinings, 30_000);
}

// ========================================
// TEST 2: DAILY RETURN CYCLE RENEWAL
// ========================================
#[test]
fn test_daily_return_cycle_renewal() {
    println!("\n🧪 TEST 2: Daily Return Cycle Renewal");
    println!("================================================\n");

    let plan = CompensationPlan::standard();

    assert_eq!(plan.rate_for_day(0), 100);
    assert_eq!(plan.rate_for_day(1), 100);
    assert_eq!(plan.rate_for_day(5), 100);
    assert_eq!(plan.rate_for_day(6), 150);
    assert_eq!(plan.rate_for_day(30), 350);
    assert_eq!(plan.rate_for_day(31), 400);
    assert_eq!(plan.rate_for_day(130), 400);
    assert_eq!(plan.rate_for_day(131), plan.rate_for_day(1));

    // $100 over one full cycle
    let first = plan.daily_returns.accrue(10_000, 1, 130).unwrap();
    assert_eq!(first.total_return, 46_750);
    assert_eq!(first.cycles_renewed, 0);

    // The second cycle pays exactly the same
    let second = plan.daily_returns.accrue(10_000, 131, 130).unwrap();
    assert_eq!(second.total_return, first.total_return);
    assert_eq!(second.final_cycle_day, 130);

    let both = plan.daily_returns.accrue(10_000, 1, 260).unwrap();
    assert_eq!(both.total_return, 93_500);
    assert_eq!(both.cycles_renewed, 1);
    println!("✅ Two cycles accrue {} cents", both.total_return);
}

// ========================================
// TEST 3: WEEKLY POOL DISTRIBUTION
// ========================================
#[test]
fn test_weekly_pool_distribution() {
    println!("\n🧪 TEST 3: Weekly Pool Distribution");
    println!("================================================\n");

    let plan = CompensationPlan::standard();
    let pool_total = 12_548_000;

    assert_eq!(plan.weekly_share(pool_total, 30).unwrap(), 4_391_800);

    let accounts = vec![
        Account::new("newcomer", 3, [4, 0, 0]),
        Account::new("bronze", 20, [5, 2, 0]),
        Account::new("gold", 90, [30, 40, 10]),
    ];
    let weekly = plan_weekly_distribution(pool_total, &plan.pool_ranks, &accounts);
    assert_eq!(weekly.eligible_accounts, 2);
    assert_eq!(weekly.skipped_accounts, 1);
    assert_eq!(weekly.entries[0].share_amount, 0);
    assert_eq!(weekly.entries[1].share_amount, 1_882_200);
    assert_eq!(weekly.entries[2].share_amount, 4_391_800);
    assert!(!weekly.is_oversubscribed());

    // Shares are independent percentages, so a large group overshoots the pool
    let crowd: Vec<Account> = (0..3)
        .map(|i| Account::new(format!("diamond-{}", i), 200, [100, 0, 0]))
        .collect();
    let crowded = plan_weekly_distribution(pool_total, &plan.pool_ranks, &crowd);
    assert!(crowded.is_oversubscribed());
    println!("✅ Oversubscription detected: {} requested", crowded.total_requested);

    // Contribution buckets always add back up
    let split = plan.pool_split.allocate(100_001).unwrap();
    assert_eq!(split.new_joinings + split.weekly_payouts + split.growth, 100_001);
}

// ========================================
// TEST 4: CUSTOM PLAN LOADED FROM DISK
// ========================================
#[test]
fn test_custom_plan_from_disk() {
    println!("\n🧪 TEST 4: Custom Plan Loaded From Disk");
    println!("================================================\n");

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("plan.toml");

    let mut config = PlanConfig::default();
    config.member_discount_bps = 0;
    config.save_to_file(&path).unwrap();

    let plan = PlanConfig::load_from_file(&path).unwrap().into_plan().unwrap();
    let quote = plan.checkout(24_999, 2_000).unwrap();
    assert_eq!(quote.total, 19_999);
    assert_eq!(quote.member_discount_amount, 0);

    // Exported config reloads to the same plan
    let export = dir.path().join("export.json");
    std::fs::write(&export, serde_json::to_string(&plan.to_config()).unwrap()).unwrap();
    let reloaded = PlanConfig::load_from_file(&export).unwrap().into_plan().unwrap();
    assert_eq!(reloaded, plan);

    // A broken table loads but cannot become a plan
    std::fs::write(
        &path,
        "[[daily_return_tiers]]\nstart_day = 1\nend_day = 10\nrate_bps = 100\n",
    )
    .unwrap();
    let broken = PlanConfig::load_from_file(&path).unwrap();
    assert!(matches!(
        broken.into_plan(),
        Err(CalcError::Configuration(_))
    ));
    println!("✅ Invalid plan rejected");
}

// ========================================
// TEST 5: ERROR KINDS SURFACE UNCHANGED
// ========================================
#[test]
fn test_error_kinds() {
    println!("\n🧪 TEST 5: Error Kinds Surface Unchanged");
    println!("================================================\n");

    let plan = CompensationPlan::standard();

    assert!(matches!(
        plan.checkout(10_000, 10_000),
        Err(CalcError::InvalidInput(_))
    ));
    assert_eq!(
        plan.pool_rank(4).unwrap_err(),
        CalcError::NotEligible {
            count: 4,
            minimum: 5
        }
    );
    assert!(matches!(
        plan.salary_rank(0),
        Err(CalcError::NotEligible { minimum: 5, .. })
    ));
    assert!(matches!(
        Order::submit("1", 1, "0xabc", false, 100),
        Err(CalcError::InvalidInput(_))
    ));

    let mut order = Order::submit("1", 1, "0xabc", true, 100).unwrap();
    assert_eq!(
        order.deliver(),
        Err(CalcError::InvalidTransition {
            from: OrderStatus::Pending,
            to: OrderStatus::Delivered
        })
    );
}
