//! Demo catalog loaded at startup when seeding is enabled.

use rust_decimal::Decimal;

use crate::models::Product;

const ACTIVE_WEAR: i32 = 1;
const MENS_CLOTHING: i32 = 2;
const WOMENS_CLOTHING: i32 = 3;
const ACCESSORIES: i32 = 4;

// (name, sku, price in cents, description, available, category)
const CATALOG: &[(&str, &str, i64, &str, bool, i32)] = &[
    ("Grunge Skater Jeans", "AWMGSJ", 6800, "Loose fit denim with a worn finish", true, MENS_CLOTHING),
    ("Polo Shirt", "AWMPS", 3500, "Classic cotton pique polo", true, MENS_CLOTHING),
    ("Skater Graphic T-Shirt", "AWMSGT", 3300, "Heavyweight tee with a screen print", true, MENS_CLOTHING),
    ("Slicker Jacket", "AWMSJ", 12500, "Waterproof shell with taped seams", true, MENS_CLOTHING),
    ("Thermal Fleece Jacket", "AWMTFJ", 6000, "Mid-layer fleece for cold mornings", true, ACTIVE_WEAR),
    ("Unisex Thermal Vest", "AWMUTV", 9500, "Insulated vest that packs small", false, ACTIVE_WEAR),
    ("V-Neck Pullover", "AWMVNP", 6500, "Lightweight merino pullover", true, MENS_CLOTHING),
    ("V-Neck Sweater", "AWMVNS", 6500, "Chunky knit sweater", false, WOMENS_CLOTHING),
    ("V-Neck T-Shirt", "AWMVNT", 1700, "Everyday cotton tee", true, WOMENS_CLOTHING),
    ("Bamboo Shell Jacket", "AWWBSJ", 8500, "Breathable shell from bamboo fibre", false, WOMENS_CLOTHING),
    ("Sleeveless Running Top", "AWWSRT", 2800, "Quick-dry mesh running top", true, ACTIVE_WEAR),
    ("Trail Running Shorts", "AWWTRS", 3900, "Shorts with a zip pocket", true, ACTIVE_WEAR),
    ("Leather Belt", "AWABLT", 4500, "Full grain leather belt", true, ACCESSORIES),
    ("Wool Beanie", "AWAWBN", 2200, "Ribbed beanie in merino wool", false, ACCESSORIES),
];

/// The demo products with ids 1..=n in catalog order
pub fn catalog() -> Vec<Product> {
    CATALOG
        .iter()
        .zip(1..)
        .map(
            |(&(name, sku, cents, description, is_available, category_id), id)| Product {
                id,
                name: name.to_string(),
                sku: sku.to_string(),
                price: Decimal::new(cents, 2),
                description: description.to_string(),
                is_available,
                category_id,
            },
        )
        .collect()
}
