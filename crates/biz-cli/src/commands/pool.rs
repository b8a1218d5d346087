use super::common::{print_amount, print_field, print_json, print_rate, usd_arg};
use super::Context;
use crate::{print_success, print_warning, PoolCommands};
use biz_core::money::format_usd;
use biz_core::pool::plan_weekly_distribution;
use biz_core::Account;
use colored::*;
use std::path::Path;

pub fn handle(action: PoolCommands, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        PoolCommands::Rank { referrals } => rank(referrals, ctx)?,
        PoolCommands::Share { total, referrals } => share(&total, referrals, ctx)?,
        PoolCommands::Split { amount } => split(&amount, ctx)?,
        PoolCommands::Joinings { new_members } => joinings(new_members, ctx)?,
        PoolCommands::Plan { total, accounts } => plan(&total, &accounts, ctx)?,
    }
    Ok(())
}

fn rank(referrals: u32, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let rank = ctx.plan.pool_rank(referrals)?;
    if ctx.json {
        return print_json(rank);
    }

    println!();
    print_field("Rank", rank.name.yellow().bold());
    print_rate("Pool Share", rank.pool_share_bps);
    if let Some((next, missing)) = ctx.plan.pool_ranks.next_rank(referrals) {
        print_field("Next Rank", format!("{} ({} more referrals)", next.name, missing));
    }
    Ok(())
}

fn share(total: &str, referrals: u32, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let total = usd_arg("pool total", total)?;
    let rank = ctx.plan.pool_rank(referrals)?;
    let amount = ctx.plan.weekly_share(total, referrals)?;
    if ctx.json {
        return print_json(&serde_json::json!({
            "pool_total": total,
            "rank": rank.name,
            "pool_share_bps": rank.pool_share_bps,
            "share_amount": amount,
        }));
    }

    println!();
    print_amount("Pool Total", total);
    print_field("Rank", rank.name.yellow().bold());
    print_rate("Pool Share", rank.pool_share_bps);
    print_amount("Weekly Share", amount);
    Ok(())
}

fn split(amount: &str, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let amount = usd_arg("amount", amount)?;
    let allocation = ctx.plan.pool_split.allocate(amount)?;
    if ctx.json {
        return print_json(&allocation);
    }

    let s = ctx.plan.pool_split;
    println!();
    print_amount("Contribution", amount);
    print_rate("New Joinings Share", s.new_joinings_bps);
    print_amount("New Joinings", allocation.new_joinings);
    print_rate("Weekly Payouts Share", s.weekly_payouts_bps);
    print_amount("Weekly Payouts", allocation.weekly_payouts);
    print_rate("Growth Share", s.growth_bps);
    print_amount("Growth", allocation.growth);
    Ok(())
}

fn joinings(new_members: u64, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let allocation = ctx.plan.joining_allocation(new_members)?;
    if ctx.json {
        return print_json(&allocation);
    }

    println!();
    print_field("New Members", new_members);
    print_amount("Per Member", ctx.plan.joining_contribution);
    print_amount("New Joinings", allocation.new_joinings);
    print_amount("Weekly Payouts", allocation.weekly_payouts);
    print_amount("Growth", allocation.growth);
    Ok(())
}

fn plan(total: &str, accounts: &Path, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let total = usd_arg("pool total", total)?;
    let data = std::fs::read_to_string(accounts)
        .map_err(|e| format!("Failed to read {}: {}", accounts.display(), e))?;
    let accounts: Vec<Account> = serde_json::from_str(&data)
        .map_err(|e| format!("Invalid accounts file: {}", e))?;

    let plan = plan_weekly_distribution(total, &ctx.plan.pool_ranks, &accounts);
    if ctx.json {
        return print_json(&plan);
    }

    println!();
    for entry in &plan.entries {
        let rank = entry.rank.as_deref().unwrap_or("-");
        println!(
            "  {:<20} {:>5} {:<10} {}",
            entry.account_id.cyan(),
            entry.referrals,
            rank,
            format_usd(entry.share_amount).green()
        );
    }
    println!();
    print_amount("Pool Total", plan.pool_total);
    print_field("Eligible Accounts", plan.eligible_accounts);
    print_field("Skipped Accounts", plan.skipped_accounts);
    let requested = u64::try_from(plan.total_requested).unwrap_or(u64::MAX);
    print_amount("Total Requested", requested);

    if plan.is_oversubscribed() {
        print_warning("Requested shares exceed the pool total");
    } else {
        print_success("Pool covers all requested shares");
    }
    Ok(())
}

/// Salary ranks share the pool's referral-ladder mechanics.
pub fn salary(referrals: u32, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let rank = ctx.plan.salary_rank(referrals)?;
    if ctx.json {
        return print_json(rank);
    }

    println!();
    print_field("Salary Rank", rank.name.yellow().bold());
    print_amount("Weekly Salary", rank.weekly_salary);
    if let Some((next, missing)) = ctx.plan.salary_ranks.next_rank(referrals) {
        print_field(
            "Next Rank",
            format!(
                "{} at {} ({} more referrals)",
                next.name,
                format_usd(next.weekly_salary),
                missing
            ),
        );
    }
    Ok(())
}
