use super::common::{print_amount, print_field, print_json};
use super::Context;
use crate::{print_info, print_success, OrderCommands};
use biz_core::{Catalog, Order};
use colored::*;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

pub fn handle(action: OrderCommands, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        OrderCommands::Submit {
            product,
            tx,
            screenshot,
            output,
        } => {
            let screenshot_present = match &screenshot {
                Some(path) => path.is_file(),
                None => false,
            };
            let catalog = Catalog::standard();
            let item = catalog
                .get(product)
                .ok_or_else(|| format!("Product {} not found", product))?;
            let quote = ctx.plan.checkout_product(item)?;

            let order = Order::submit(order_id()?, product, &tx, screenshot_present, quote.total)?;
            save_order(&order, &output)?;

            if ctx.json {
                return print_json(&order);
            }
            print_success(&format!("Order {} submitted", order.id));
            print_order(&order);
            print_info("Payment will be verified by an administrator");
        }
        OrderCommands::Advance { file } => {
            let mut order = load_order(&file)?;
            let next = order
                .status
                .next()
                .ok_or_else(|| format!("Order {} is already {}", order.id, order.status))?;
            order.transition_to(next)?;
            save_order(&order, &file)?;

            if ctx.json {
                return print_json(&order);
            }
            print_success(&format!("Order {} is now {}", order.id, order.status.label()));
        }
        OrderCommands::Status { file } => {
            let order = load_order(&file)?;
            if ctx.json {
                return print_json(&order);
            }
            print_order(&order);
        }
    }
    Ok(())
}

fn print_order(order: &Order) {
    println!();
    print_field("Order", order.id.cyan());
    print_field("Product", order.product_id);
    print_field("Transaction", &order.transaction_id);
    print_amount("Total", order.total);
    print_field("Status", order.status.label().yellow());
}

/// Order ids are the submission time in milliseconds.
fn order_id() -> Result<String, Box<dyn std::error::Error>> {
    let millis = SystemTime::now().duration_since(UNIX_EPOCH)?.as_millis();
    Ok(millis.to_string())
}

fn load_order(path: &Path) -> Result<Order, Box<dyn std::error::Error>> {
    let data = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read order {}: {}", path.display(), e))?;
    let order: Order = serde_json::from_str(&data)?;
    order.validate()?;
    Ok(order)
}

fn save_order(order: &Order, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::write(path, serde_json::to_string_pretty(order)?)?;
    Ok(())
}
