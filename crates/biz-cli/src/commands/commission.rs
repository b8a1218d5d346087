use super::common::{print_amount, print_json, print_rate, referral_triple, usd_arg};
use super::Context;
use biz_core::Account;
use colored::*;

pub fn handle(
    payment: &str,
    referrals: Option<&[u32]>,
    ctx: &Context,
) -> Result<(), Box<dyn std::error::Error>> {
    let payment = usd_arg("payment", payment)?;

    let payout = match referrals {
        Some(counts) => {
            let account = Account::new("network", 0, referral_triple(counts)?);
            ctx.plan.network_commission(payment, &account)?
        }
        None => ctx.plan.commission(payment)?,
    };

    if ctx.json {
        return print_json(&payout);
    }

    println!();
    print_amount("Payment", payment);
    if referrals.is_some() {
        println!("{}", "Totals across all referrals at each level".dimmed());
    }
    for (level, amount) in ctx.plan.commission.levels().iter().zip(payout.by_level()) {
        print_rate(&format!("Level {} Rate", level.level), level.rate_bps);
        print_amount(&format!("Level {} Commission", level.level), amount);
    }
    print_amount("Total Distributed", payout.total_distributed);
    Ok(())
}
