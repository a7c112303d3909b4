//! Fixed product taxonomy, regions, and seasonality.

/// A product category with its price band and product list.
#[derive(Debug, Clone, Copy)]
pub struct ProductCategory {
    pub name: &'static str,
    /// Inclusive unit price range.
    pub price_range: (f64, f64),
    pub products: [&'static str; 6],
}

pub const CATEGORIES: [ProductCategory; 5] = [
    ProductCategory {
        name: "Electronics",
        price_range: (50.0, 1500.0),
        products: [
            "Laptop",
            "Smartphone",
            "Tablet",
            "Smartwatch",
            "Headphones",
            "Camera",
        ],
    },
    ProductCategory {
        name: "Clothing",
        price_range: (15.0, 150.0),
        products: ["T-Shirt", "Jeans", "Jacket", "Dress", "Sneakers", "Backpack"],
    },
    ProductCategory {
        name: "Home & Living",
        price_range: (25.0, 300.0),
        products: [
            "Coffee Maker",
            "Blender",
            "Vacuum Cleaner",
            "Bedding Set",
            "Lamp",
            "Cookware Set",
        ],
    },
    ProductCategory {
        name: "Books",
        price_range: (10.0, 50.0),
        products: [
            "Fiction Novel",
            "Business Book",
            "Cookbook",
            "Self-Help Book",
            "Biography",
            "Magazine",
        ],
    },
    ProductCategory {
        name: "Sports",
        price_range: (20.0, 800.0),
        products: [
            "Yoga Mat",
            "Dumbbells",
            "Running Shoes",
            "Bicycle",
            "Tennis Racket",
            "Sports Bottle",
        ],
    },
];

pub const REGIONS: [&str; 6] = [
    "Jakarta", "Surabaya", "Bandung", "Medan", "Semarang", "Makassar",
];

/// Months with boosted demand (mid-year sale and the holiday season).
pub const HIGH_SEASON_MONTHS: [u32; 4] = [6, 7, 11, 12];

pub const HIGH_SEASON_MULTIPLIER: f64 = 1.5;

/// Largest quantity a single order may carry.
pub const MAX_QUANTITY: u32 = 10;

/// Look up a category by name.
pub fn category(name: &str) -> Option<&'static ProductCategory> {
    CATEGORIES.iter().find(|c| c.name == name)
}

/// Quantity multiplier for a calendar month.
pub fn seasonal_multiplier(month: u32) -> f64 {
    if HIGH_SEASON_MONTHS.contains(&month) {
        HIGH_SEASON_MULTIPLIER
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_products_are_unique_across_categories() {
        let mut all: Vec<&str> = CATEGORIES.iter().flat_map(|c| c.products).collect();
        let before = all.len();
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), before);
    }

    #[test]
    fn test_price_ranges_are_ordered() {
        for entry in &CATEGORIES {
            assert!(entry.price_range.0 < entry.price_range.1, "{}", entry.name);
        }
    }

    #[test]
    fn test_seasonal_multiplier() {
        assert_eq!(seasonal_multiplier(12), 1.5);
        assert_eq!(seasonal_multiplier(6), 1.5);
        assert_eq!(seasonal_multiplier(3), 1.0);
    }

    #[test]
    fn test_category_lookup() {
        assert_eq!(category("Books").map(|c| c.price_range), Some((10.0, 50.0)));
        assert!(category("Groceries").is_none());
    }
}
