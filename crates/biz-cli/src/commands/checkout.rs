use super::common::{print_amount, print_json, print_rate, usd_arg};
use super::Context;
use crate::print_info;
use biz_core::money::parse_percent;
use biz_core::CheckoutQuote;

pub fn handle(
    price: Option<&str>,
    discount: &str,
    product: Option<u32>,
    ctx: &Context,
) -> Result<(), Box<dyn std::error::Error>> {
    let quote = match (product, price) {
        (Some(id), _) => {
            let catalog = biz_core::Catalog::standard();
            let product = catalog
                .get(id)
                .ok_or_else(|| format!("Product {} not found", id))?;
            if !ctx.json {
                print_info(&format!("Quoting {}", product.name));
            }
            ctx.plan.checkout_product(product)?
        }
        (None, Some(price)) => {
            let list_price = usd_arg("price", price)?;
            let discount_bps = parse_percent(discount)?;
            ctx.plan.checkout(list_price, discount_bps)?
        }
        (None, None) => return Err("Either --price or --product is required".into()),
    };

    if ctx.json {
        return print_json(&quote);
    }
    print_quote(&quote, ctx.plan.member_discount_bps);
    Ok(())
}

pub fn print_quote(quote: &CheckoutQuote, member_discount_bps: u32) {
    println!();
    print_amount("List Price", quote.list_price);
    print_amount("Product Price", quote.product_price);
    print_rate("Member Discount", member_discount_bps);
    print_amount("Member Savings", quote.member_discount_amount);
    print_amount("Total", quote.total);
    print_amount("You Save", quote.total_savings);
}
