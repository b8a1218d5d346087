use super::checkout::print_quote;
use super::common::{print_field, print_json};
use super::Context;
use crate::{print_info, CatalogCommands};
use biz_core::money::{format_bps, format_usd};
use biz_core::{Catalog, Product};
use colored::*;

pub fn handle(action: CatalogCommands, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = Catalog::standard();
    match action {
        CatalogCommands::List {
            category,
            search,
            featured,
        } => {
            let products = filter(&catalog, &category, search.as_deref(), featured);
            if ctx.json {
                return print_json(&products);
            }
            if products.is_empty() {
                print_info("No products match");
                return Ok(());
            }
            println!();
            for p in products {
                println!(
                    "  {:>2} {:<32} {:<12} {} {}",
                    p.id,
                    p.name.bold(),
                    p.category,
                    format_usd(p.base_price).green(),
                    format_usd(p.list_price).dimmed().strikethrough()
                );
            }
        }
        CatalogCommands::Show { id } => {
            let product = catalog
                .get(id)
                .ok_or_else(|| format!("Product {} not found", id))?;
            let quote = ctx.plan.checkout_product(product)?;
            if ctx.json {
                return print_json(&serde_json::json!({
                    "product": product,
                    "quote": quote,
                }));
            }
            println!();
            print_field("Product", product.name.bold());
            print_field("Category", &product.category);
            print_field(
                "Rating",
                format!(
                    "{}.{} ({} reviews)",
                    product.rating_tenths / 10,
                    product.rating_tenths % 10,
                    product.reviews
                ),
            );
            print_field("Discount", format_bps(product.discount_bps).cyan());
            print_quote(&quote, ctx.plan.member_discount_bps);
        }
    }
    Ok(())
}

fn filter<'a>(
    catalog: &'a Catalog,
    category: &str,
    search: Option<&str>,
    featured_only: bool,
) -> Vec<&'a Product> {
    let matches_search: Vec<u32> = match search {
        Some(term) => catalog.search(term).iter().map(|p| p.id).collect(),
        None => catalog.products().iter().map(|p| p.id).collect(),
    };
    catalog
        .by_category(category)
        .into_iter()
        .filter(|p| matches_search.contains(&p.id))
        .filter(|p| !featured_only || p.featured)
        .collect()
}
