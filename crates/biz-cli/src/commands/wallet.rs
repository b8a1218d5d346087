use super::common::{print_amount, print_json, print_rate, usd_arg};
use super::Context;
use crate::{print_success, WalletCommands};

pub fn handle(action: WalletCommands, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        WalletCommands::Split { balance } => {
            let balance = usd_arg("balance", &balance)?;
            let breakdown = ctx.plan.wallet_split.split(balance)?;
            if ctx.json {
                return print_json(&breakdown);
            }
            println!();
            print_amount("Total Balance", balance);
            print_amount("Earnings", breakdown.earnings);
            print_amount("Global Pool", breakdown.global_pool);
            print_amount("Tax", breakdown.tax);
        }
        WalletCommands::Withdraw { amount, available } => {
            let amount = usd_arg("amount", &amount)?;
            let available = usd_arg("available balance", &available)?;
            let quote = ctx.plan.withdraw(amount, available)?;
            if ctx.json {
                return print_json(&quote);
            }
            print_success("Withdrawal accepted");
            println!();
            print_amount("Amount", quote.amount);
            print_rate("Processing Fee Rate", ctx.plan.withdrawal.fee_bps);
            print_amount("Processing Fee", quote.fee);
            print_amount("Net Payout", quote.net_payout);
            print_amount("Remaining", quote.remaining_balance);
        }
    }
    Ok(())
}
