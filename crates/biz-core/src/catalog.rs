use crate::pricing::{quote_sale_price, CheckoutQuote};
use crate::CalcError;
use serde::{Deserialize, Serialize};

/// Store categories.
pub const CATEGORIES: [&str; 6] = [
    "electronics",
    "fashion",
    "health",
    "home",
    "beauty",
    "sports",
];

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: u32,
    pub name: String,
    pub category: String,
    /// Advertised sale price (cents); checkout starts here
    pub base_price: u64,
    /// Price before the product discount (cents)
    pub list_price: u64,
    /// Advertised discount badge; the sale price is authoritative
    pub discount_bps: u32,
    /// Average rating in tenths of a star (48 = 4.8)
    pub rating_tenths: u8,
    pub reviews: u32,
    pub featured: bool,
}

impl Product {
    #[allow(clippy::too_many_arguments)]
    fn new(
        id: u32,
        name: &str,
        category: &str,
        base_price: u64,
        list_price: u64,
        discount_pct: u32,
        rating_tenths: u8,
        reviews: u32,
        featured: bool,
    ) -> Self {
        Self {
            id,
            name: name.to_string(),
            category: category.to_string(),
            base_price,
            list_price,
            discount_bps: discount_pct * crate::BPS_PER_PERCENT,
            rating_tenths,
            reviews,
            featured,
        }
    }

    pub fn validate(&self) -> Result<(), CalcError> {
        if self.name.trim().is_empty() {
            return Err(CalcError::InvalidInput(format!(
                "product {} has no name",
                self.id
            )));
        }
        if self.base_price == 0 {
            return Err(CalcError::InvalidInput(format!(
                "product {} has no sale price",
                self.id
            )));
        }
        if self.list_price < self.base_price {
            return Err(CalcError::InvalidInput(format!(
                "product {} list price is below its sale price",
                self.id
            )));
        }
        Ok(())
    }

    /// Checkout quote for one unit: the member discount comes off the sale price.
    pub fn checkout_quote(&self, member_discount_bps: u32) -> Result<CheckoutQuote, CalcError> {
        quote_sale_price(self.list_price, self.base_price, member_discount_bps)
    }

    /// Advertised saving of the sale price against the list price.
    pub fn advertised_savings(&self) -> u64 {
        self.list_price.saturating_sub(self.base_price)
    }
}

/// The store's fixed product list.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl Catalog {
    #[rustfmt::skip]
    pub fn standard() -> Self {
        Self {
            products: vec![
                Product::new(1, "Wireless Bluetooth Headphones", "electronics", 19_999, 24_999, 20, 48, 324, true),
                Product::new(2, "Premium Skincare Set", "beauty", 8_999, 11_999, 25, 49, 156, false),
                Product::new(3, "Smart Fitness Tracker", "electronics", 29_999, 34_999, 15, 47, 892, true),
                Product::new(4, "Organic Health Supplements", "health", 4_999, 6_999, 30, 46, 203, false),
                Product::new(5, "Designer Fashion Jacket", "fashion", 15_999, 19_999, 20, 48, 76, false),
                Product::new(6, "Smart Home Hub", "home", 12_999, 16_999, 25, 45, 445, true),
                Product::new(7, "Professional Yoga Mat", "sports", 7_999, 9_999, 20, 47, 234, false),
                Product::new(8, "Luxury Watch Collection", "fashion", 39_999, 49_999, 20, 49, 89, true),
            ],
        }
    }

    /// Build a catalog from arbitrary products; ids must be unique.
    pub fn new(products: Vec<Product>) -> Result<Self, CalcError> {
        for (i, p) in products.iter().enumerate() {
            p.validate()?;
            if products[..i].iter().any(|q| q.id == p.id) {
                return Err(CalcError::InvalidInput(format!(
                    "duplicate product id {}",
                    p.id
                )));
            }
        }
        Ok(Self { products })
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, id: u32) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Products in `category`; `"all"` returns everything.
    pub fn by_category(&self, category: &str) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| {
                category.eq_ignore_ascii_case("all") || p.category.eq_ignore_ascii_case(category)
            })
            .collect()
    }

    pub fn featured(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.featured).collect()
    }

    /// Case-insensitive substring search on product names.
    pub fn search(&self, term: &str) -> Vec<&Product> {
        let needle = term.to_lowercase();
        self.products
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .collect()
    }
}
