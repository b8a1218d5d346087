use super::common::{print_amount, print_field, print_json, print_rate, referral_triple};
use super::Context;
use crate::{print_success, PlanCommands};
use biz_core::money::{format_bps, format_usd};
use biz_core::{Account, PlanConfig};
use colored::*;
use std::path::Path;

pub fn handle(action: PlanCommands, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        PlanCommands::Show => show(ctx)?,
        PlanCommands::Export { output } => {
            ctx.plan.to_config().save_to_file(&output)?;
            if ctx.json {
                return print_json(&status_json("exported", &output));
            }
            print_success(&format!("Plan written to {}", output.display()));
        }
        PlanCommands::Validate { file } => {
            let config = PlanConfig::load_from_file(&file)
                .map_err(|e| format!("Failed to load plan {}: {}", file.display(), e))?;
            config.validate()?;
            if ctx.json {
                return print_json(&status_json("valid", &file));
            }
            print_success(&format!("{} is a valid plan", file.display()));
        }
    }
    Ok(())
}

/// `--json` result for commands that only report a status.
fn status_json(status: &str, path: &Path) -> serde_json::Value {
    serde_json::json!({
        "status": status,
        "path": path.display().to_string(),
    })
}

fn show(ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let plan = &ctx.plan;
    if ctx.json {
        return print_json(&plan.to_config());
    }

    println!();
    print_rate("Member Discount", plan.member_discount_bps);

    println!("\n{}", "Referral Commission".bold());
    for level in plan.commission.levels() {
        println!("  Level {}  {}", level.level, format_bps(level.rate_bps).green());
    }

    println!("\n{}", "Daily Returns".bold());
    for tier in plan.daily_returns.tiers() {
        println!(
            "  Days {:>3}-{:<3}  {}",
            tier.start_day,
            tier.end_day,
            format_bps(tier.rate_bps).green()
        );
    }

    println!("\n{}", "Weekly Pool Ranks".bold());
    for rank in plan.pool_ranks.ranks() {
        println!(
            "  {:<10} {:>4}+ referrals  {}",
            rank.name.yellow(),
            rank.min_referrals,
            format_bps(rank.pool_share_bps).green()
        );
    }

    println!("\n{}", "Salary Ranks".bold());
    for rank in plan.salary_ranks.ranks() {
        println!(
            "  {:<10} {:>4}+ referrals  {}/week",
            rank.name.yellow(),
            rank.min_direct_referrals,
            format_usd(rank.weekly_salary).green()
        );
    }

    println!("\n{}", "Withdrawals".bold());
    println!(
        "  Minimum {}  fee {}",
        format_usd(plan.withdrawal.minimum_amount),
        format_bps(plan.withdrawal.fee_bps)
    );

    let pool = plan.pool_split;
    let wallet = plan.wallet_split;
    println!("\n{}", "Splits".bold());
    println!(
        "  Pool    joinings {} / payouts {} / growth {} ({} per new member)",
        format_bps(pool.new_joinings_bps),
        format_bps(pool.weekly_payouts_bps),
        format_bps(pool.growth_bps),
        format_usd(plan.joining_contribution)
    );
    println!(
        "  Wallet  earnings {} / global pool {} / tax {}",
        format_bps(wallet.earnings_bps),
        format_bps(wallet.global_pool_bps),
        format_bps(wallet.tax_bps)
    );
    Ok(())
}

pub fn project(
    id: &str,
    days: u64,
    referrals: &[u32],
    ctx: &Context,
) -> Result<(), Box<dyn std::error::Error>> {
    let account = Account::new(id, days, referral_triple(referrals)?);
    let projection = ctx.plan.project_account(&account);
    if ctx.json {
        return print_json(&projection);
    }

    println!();
    print_field("Account", projection.account_id.cyan());
    print_field("Cycle Day", format!("{} / 130", projection.cycle_day));
    print_field("Cycles Completed", projection.cycles_completed);
    print_rate("Daily Rate", projection.daily_rate_bps);
    print_field("Network Size", account.network_size());
    print_field(
        "Pool Rank",
        projection.pool_rank.as_deref().unwrap_or("Not eligible"),
    );
    if let Some(missing) = projection.referrals_to_next_pool_rank {
        print_field("Referrals To Next Rank", missing);
    }
    print_field(
        "Salary Rank",
        projection.salary_rank.as_deref().unwrap_or("Not eligible"),
    );
    print_amount("Weekly Salary", projection.weekly_salary);
    Ok(())
}
