//! Catalog domain: records owned by the hosted data store plus the pure
//! filter/sort/facet engine that the storefront applies to them.
//!
//! Everything in this module is side-effect free. Records are created and
//! updated externally; the storefront only reads them (and appends contact
//! submissions and newsletter subscriptions through the store client).

pub mod facets;
pub mod featured;
pub mod filter;
pub mod records;

pub use facets::{PriceRange, PRICE_RANGES};
pub use filter::{ProductFilter, SortKey};
pub use records::{
    BlogPost, Category, ContactSubmission, Faq, NewsletterSubscription, Product, Testimonial,
};

#[cfg(test)]
pub(crate) mod fixtures {
    use super::records::Product;

    /// One product per entry of the storefront's sample catalog, trimmed to
    /// the fields the engine looks at.
    #[allow(clippy::too_many_arguments)]
    fn product(
        id: &str,
        name: &str,
        price: f64,
        rating: f64,
        category: &str,
        material: &str,
        colors: &[&str],
        is_best_seller: bool,
        is_new: bool,
        deal_end_time: Option<&str>,
    ) -> Product {
        Product {
            id: id.to_owned(),
            name: name.to_owned(),
            slug: name.to_lowercase().replace(' ', "-"),
            price,
            original_price: None,
            discount: None,
            rating,
            reviews: 0,
            image: String::new(),
            images: None,
            category_id: Some(id.to_owned()),
            category: Some(category.to_owned()),
            material: Some(material.to_owned()),
            color: Some(colors.iter().map(|c| (*c).to_owned()).collect()),
            size: None,
            in_stock: true,
            stock_count: 1,
            description: None,
            features: None,
            is_best_seller,
            is_new,
            deal_end_time: deal_end_time
                .map(|s| s.parse().expect("fixture deal_end_time must parse")),
            created_at: None,
            updated_at: None,
        }
    }

    /// The eight sample products from the seed catalog.
    pub fn sample_products() -> Vec<Product> {
        vec![
            product(
                "1",
                "Luxe Shaggy Ivory Rug",
                299.0,
                4.8,
                "Shaggy Rugs",
                "Wool Blend",
                &["Ivory", "Cream"],
                true,
                false,
                None,
            ),
            product(
                "2",
                "Boho Geometric Pattern Rug",
                249.0,
                4.6,
                "Boho Patterns",
                "Cotton",
                &["Multi", "Beige", "Terracotta"],
                false,
                true,
                None,
            ),
            product(
                "3",
                "Modern Abstract Area Rug",
                349.0,
                4.9,
                "Area Rugs",
                "Silk & Wool",
                &["Grey", "Blue", "Gold"],
                true,
                false,
                None,
            ),
            product(
                "4",
                "Kids Safari Adventure Rug",
                179.0,
                4.7,
                "Kids Rugs",
                "Synthetic",
                &["Multi", "Green", "Brown"],
                false,
                true,
                None,
            ),
            product(
                "5",
                "Traditional Persian Handloom",
                599.0,
                5.0,
                "Handloom Carpets",
                "Pure Wool",
                &["Red", "Navy", "Gold"],
                true,
                false,
                Some("2025-12-31T23:59:59"),
            ),
            product(
                "6",
                "Minimalist Jute Runner",
                129.0,
                4.5,
                "Area Rugs",
                "Jute",
                &["Natural", "Beige"],
                false,
                false,
                None,
            ),
            product(
                "7",
                "Vintage Distressed Rug",
                279.0,
                4.6,
                "Area Rugs",
                "Cotton & Polyester",
                &["Grey", "Beige", "Blue"],
                false,
                false,
                None,
            ),
            product(
                "8",
                "Plush Cloud Shaggy Rug",
                319.0,
                4.9,
                "Shaggy Rugs",
                "Microfiber",
                &["White", "Light Grey"],
                true,
                true,
                None,
            ),
        ]
    }
}
