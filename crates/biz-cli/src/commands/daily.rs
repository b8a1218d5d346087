use super::common::{print_amount, print_field, print_json, print_rate, usd_arg};
use super::Context;
use crate::{print_info, DailyCommands};
use biz_core::daily_return::{cycle_day, cycles_completed};
use biz_core::money::format_bps;
use colored::*;
use serde::Serialize;

#[derive(Serialize)]
struct DayRate {
    active_days_elapsed: u64,
    cycle_day: u32,
    cycles_completed: u64,
    rate_bps: u32,
}

pub fn handle(action: DailyCommands, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        DailyCommands::Rate { days } => rate(days, ctx)?,
        DailyCommands::Accrue {
            principal,
            from,
            days,
        } => accrue(&principal, from, days, ctx)?,
        DailyCommands::Tiers => tiers(ctx)?,
    }
    Ok(())
}

fn rate(days: u64, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let info = DayRate {
        active_days_elapsed: days,
        cycle_day: cycle_day(days),
        cycles_completed: cycles_completed(days),
        rate_bps: ctx.plan.rate_for_day(days),
    };
    if ctx.json {
        return print_json(&info);
    }

    println!();
    print_field("Active Days", info.active_days_elapsed);
    print_field("Cycle Day", format!("{} / 130", info.cycle_day));
    print_field("Cycles Completed", info.cycles_completed);
    print_rate("Daily Rate", info.rate_bps);
    Ok(())
}

fn accrue(
    principal: &str,
    from: u64,
    days: u64,
    ctx: &Context,
) -> Result<(), Box<dyn std::error::Error>> {
    let principal = usd_arg("principal", principal)?;
    let summary = ctx.plan.daily_returns.accrue(principal, from, days)?;
    if ctx.json {
        return print_json(&summary);
    }

    print_info(&format!(
        "Accruing days {} through {}",
        summary.first_day, summary.last_day
    ));
    println!();
    print_amount("Principal", summary.principal);
    print_amount("Total Return", summary.total_return);
    print_field("Cycle Renewals", summary.cycles_renewed);
    print_field("Final Cycle Day", summary.final_cycle_day);
    Ok(())
}

fn tiers(ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let tiers = ctx.plan.daily_returns.tiers();
    if ctx.json {
        return print_json(&tiers);
    }

    println!();
    println!("{}", "Daily Return Schedule".bold());
    for tier in tiers {
        println!(
            "  {} {}",
            format!("Days {:>3}-{:<3}", tier.start_day, tier.end_day).cyan(),
            format_bps(tier.rate_bps).green()
        );
    }
    Ok(())
}
