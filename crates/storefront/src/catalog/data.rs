//! Built-in product catalog.

use std::collections::BTreeSet;

use enzobay_core::{CurrencyCode, Product, ProductId, VariantOptions};
use rust_decimal::Decimal;

struct Seed {
    id: &'static str,
    name: &'static str,
    price_cents: i64,
    discount: Option<i64>,
    category: &'static str,
    brand: &'static str,
    tags: &'static [&'static str],
    rating: f32,
    review_count: u32,
    in_stock: bool,
    description: &'static str,
}

impl Seed {
    fn into_product(self) -> Product {
        Product {
            id: ProductId::new(self.id),
            name: self.name.to_string(),
            price: Decimal::new(self.price_cents, 2),
            currency: CurrencyCode::USD,
            description: self.description.to_string(),
            images: vec![
                format!("/images/products/{}-1.jpg", self.id),
                format!("/images/products/{}-2.jpg", self.id),
            ],
            category: self.category.to_string(),
            tags: self.tags.iter().map(|t| (*t).to_string()).collect::<BTreeSet<_>>(),
            rating: self.rating,
            review_count: self.review_count,
            in_stock: self.in_stock,
            discount: self.discount.map(|d| Decimal::new(d, 0)),
            brand: Some(self.brand.to_string()),
            model: None,
            material: None,
            dimensions: None,
            weight: None,
            variants: None,
        }
    }
}

const SEEDS: [Seed; 16] = [
    Seed {
        id: "p-1",
        name: "Wireless Noise-Cancelling Headphones",
        price_cents: 19_999,
        discount: Some(15),
        category: "electronics",
        brand: "SoundMax",
        tags: &["audio", "wireless", "bluetooth"],
        rating: 4.6,
        review_count: 1284,
        in_stock: true,
        description: "Over-ear headphones with adaptive noise cancelling and 30-hour battery.",
    },
    Seed {
        id: "p-2",
        name: "Smart Fitness Watch",
        price_cents: 14_950,
        discount: Some(10),
        category: "electronics",
        brand: "Pulse",
        tags: &["wearable", "fitness", "bluetooth"],
        rating: 4.3,
        review_count: 842,
        in_stock: true,
        description: "Heart-rate, sleep and GPS tracking in a water-resistant case.",
    },
    Seed {
        id: "p-3",
        name: "Portable Bluetooth Speaker",
        price_cents: 5_999,
        discount: None,
        category: "electronics",
        brand: "SoundMax",
        tags: &["audio", "wireless", "bluetooth", "outdoor"],
        rating: 4.4,
        review_count: 611,
        in_stock: true,
        description: "Rugged speaker with 12 hours of playback and IP67 rating.",
    },
    Seed {
        id: "p-4",
        name: "Ultrabook 14\" Laptop",
        price_cents: 109_900,
        discount: Some(5),
        category: "electronics",
        brand: "Nimbus",
        tags: &["computer", "work", "portable"],
        rating: 4.7,
        review_count: 356,
        in_stock: true,
        description: "Lightweight aluminium laptop with 16 GB RAM and 1 TB SSD.",
    },
    Seed {
        id: "p-5",
        name: "Classic Denim Jacket",
        price_cents: 7_900,
        discount: Some(20),
        category: "fashion",
        brand: "Urban Thread",
        tags: &["outerwear", "denim", "casual"],
        rating: 4.2,
        review_count: 203,
        in_stock: true,
        description: "Washed denim jacket with a relaxed fit.",
    },
    Seed {
        id: "p-6",
        name: "Leather Chelsea Boots",
        price_cents: 12_900,
        discount: None,
        category: "fashion",
        brand: "Strider",
        tags: &["footwear", "leather", "casual"],
        rating: 4.5,
        review_count: 178,
        in_stock: false,
        description: "Full-grain leather boots with elastic side panels.",
    },
    Seed {
        id: "p-7",
        name: "Cotton Crew T-Shirt 3-Pack",
        price_cents: 2_999,
        discount: None,
        category: "fashion",
        brand: "Urban Thread",
        tags: &["basics", "cotton", "casual"],
        rating: 4.1,
        review_count: 932,
        in_stock: true,
        description: "Organic cotton tees in black, white and grey.",
    },
    Seed {
        id: "p-8",
        name: "Ceramic Pour-Over Coffee Set",
        price_cents: 4_500,
        discount: Some(10),
        category: "home",
        brand: "Hearth",
        tags: &["kitchen", "coffee", "ceramic"],
        rating: 4.8,
        review_count: 145,
        in_stock: true,
        description: "Hand-glazed dripper, carafe and two cups.",
    },
    Seed {
        id: "p-9",
        name: "Linen Duvet Cover",
        price_cents: 8_900,
        discount: None,
        category: "home",
        brand: "Hearth",
        tags: &["bedroom", "linen"],
        rating: 4.4,
        review_count: 98,
        in_stock: true,
        description: "Stonewashed French linen, queen size.",
    },
    Seed {
        id: "p-10",
        name: "Smart LED Desk Lamp",
        price_cents: 3_999,
        discount: Some(25),
        category: "home",
        brand: "Lumen",
        tags: &["lighting", "work", "smart"],
        rating: 4.0,
        review_count: 267,
        in_stock: true,
        description: "Dimmable lamp with colour temperature control and USB-C charging.",
    },
    Seed {
        id: "p-11",
        name: "Yoga Mat Pro",
        price_cents: 6_800,
        discount: None,
        category: "sports",
        brand: "Flowfit",
        tags: &["fitness", "yoga", "outdoor"],
        rating: 4.6,
        review_count: 512,
        in_stock: true,
        description: "6 mm non-slip natural rubber mat.",
    },
    Seed {
        id: "p-12",
        name: "Adjustable Dumbbell Set",
        price_cents: 24_900,
        discount: Some(10),
        category: "sports",
        brand: "IronCore",
        tags: &["fitness", "strength"],
        rating: 4.5,
        review_count: 389,
        in_stock: true,
        description: "Two dumbbells adjustable from 2 to 24 kg.",
    },
    Seed {
        id: "p-13",
        name: "Trail Running Shoes",
        price_cents: 13_500,
        discount: None,
        category: "sports",
        brand: "Strider",
        tags: &["footwear", "running", "outdoor"],
        rating: 4.3,
        review_count: 441,
        in_stock: true,
        description: "Grippy outsole and rock plate for technical trails.",
    },
    Seed {
        id: "p-14",
        name: "The Pragmatic Engineer",
        price_cents: 3_450,
        discount: None,
        category: "books",
        brand: "Pressworks",
        tags: &["technology", "career", "work"],
        rating: 4.7,
        review_count: 1021,
        in_stock: true,
        description: "Essays on building software and careers that last.",
    },
    Seed {
        id: "p-15",
        name: "Vitamin C Brightening Serum",
        price_cents: 2_800,
        discount: Some(15),
        category: "beauty",
        brand: "Glow Lab",
        tags: &["skincare", "serum"],
        rating: 4.2,
        review_count: 654,
        in_stock: true,
        description: "15% vitamin C with hyaluronic acid.",
    },
    Seed {
        id: "p-16",
        name: "Bamboo Hair Brush",
        price_cents: 1_500,
        discount: None,
        category: "beauty",
        brand: "Glow Lab",
        tags: &["haircare", "bamboo"],
        rating: 3.9,
        review_count: 87,
        in_stock: true,
        description: "Detangling brush with bamboo pins.",
    },
];

/// The storefront's product list, in display order.
#[must_use]
pub fn builtin_products() -> Vec<Product> {
    let mut products: Vec<Product> = SEEDS.into_iter().map(Seed::into_product).collect();

    // Optional detail fields, only on listings that have them.
    for product in &mut products {
        match product.id.as_str() {
            "p-1" => {
                product.model = Some("SM-700".to_string());
                product.weight = Some("250 g".to_string());
                product.variants = Some(VariantOptions {
                    colors: vec!["Black".to_string(), "Silver".to_string()],
                    sizes: Vec::new(),
                });
            }
            "p-4" => {
                product.model = Some("Nimbus Air 14".to_string());
                product.dimensions = Some("31.2 x 22.1 x 1.5 cm".to_string());
                product.weight = Some("1.2 kg".to_string());
                product.material = Some("Aluminium".to_string());
            }
            "p-5" | "p-7" => {
                product.material = Some("Cotton".to_string());
                product.variants = Some(VariantOptions {
                    colors: vec!["Blue".to_string(), "Black".to_string()],
                    sizes: ["S", "M", "L", "XL"].map(str::to_string).to_vec(),
                });
            }
            "p-6" | "p-13" => {
                product.variants = Some(VariantOptions {
                    colors: vec!["Brown".to_string()],
                    sizes: ["8", "9", "10", "11"].map(str::to_string).to_vec(),
                });
            }
            _ => {}
        }
    }

    products
}
