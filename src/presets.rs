use crate::schema::{Field, Schema};
use once_cell::sync::Lazy;

/// Line items on the marketplace cart page.
pub static CART_ITEMS: Lazy<Schema> = Lazy::new(|| Schema {
    container: "ul.item-content".to_string(),
    fields: vec![
        Field::text("title", "a.item-title"),
        Field::text("price", "em.J_Price .price-now"),
        Field::attribute("img", "img.itempic", "src"),
        Field::attribute("link", "a.item-title", "href"),
    ],
});
