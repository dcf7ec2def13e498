//! Promotion overlay.

use crate::model::{Product, Promotion};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Apply current promotions to products.
///
/// A product with an active, unexpired promotion takes the promotion's price,
/// original price, discount and artwork. The promotion's original price wins
/// over any the product already carried. The first such promotion for a
/// product id is used.
pub fn apply_promotions(products: &[Product], promotions: &[Promotion]) -> Vec<Product> {
    apply_promotions_at(products, promotions, Utc::now())
}

/// [`apply_promotions`] evaluated at time `now`.
pub fn apply_promotions_at(
    products: &[Product],
    promotions: &[Promotion],
    now: DateTime<Utc>,
) -> Vec<Product> {
    let mut active: HashMap<&str, &Promotion> = HashMap::new();
    for promo in promotions.iter().filter(|p| p.is_current_at(now)) {
        active.entry(promo.product_id.as_str()).or_insert(promo);
    }

    let mut applied = 0usize;
    let result = products
        .iter()
        .map(|product| match active.get(product.id.as_str()) {
            Some(promo) => {
                applied += 1;
                Product {
                    price: promo.new_price,
                    original_price: Some(promo.original_price),
                    discount: Some(promo.discount),
                    promotion_image: promo.image.clone(),
                    ..product.clone()
                }
            }
            None => product.clone(),
        })
        .collect();

    tracing::debug!(
        products = products.len(),
        promotions = active.len(),
        applied,
        "applied promotions"
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn promo(product_id: &str, new_price: f64, active: bool) -> Promotion {
        Promotion {
            id: format!("promo-{product_id}"),
            product_id: product_id.to_string(),
            new_price,
            original_price: 12.0,
            discount: 25.0,
            is_active: active,
            product_name: None,
            image: None,
            valid_until: None,
        }
    }

    #[test]
    fn test_active_promotion_overrides_price() {
        let products = vec![
            Product::new("1", "Azeite", "Mercearia", 30.0).with_original_price(35.0),
            Product::new("2", "Vinagre", "Mercearia", 4.0),
        ];
        let result = apply_promotions(&products, &[promo("1", 9.0, true)]);

        assert_eq!(result[0].price, 9.0);
        assert_eq!(result[0].original_price, Some(12.0));
        assert!(result[0].is_on_sale());
        assert_eq!(result[1], products[1]);
    }

    #[test]
    fn test_promotion_carries_discount_and_image() {
        let products = vec![Product::new("1", "Azeite", "Mercearia", 30.0)];
        let mut with_art = promo("1", 9.0, true);
        with_art.image = Some("/promocoes/azeite.png".to_string());

        let result = apply_promotions(&products, &[with_art]);

        assert_eq!(result[0].discount, Some(25.0));
        assert_eq!(result[0].promotion_image.as_deref(), Some("/promocoes/azeite.png"));

        let json = serde_json::to_value(&result[0]).unwrap();
        assert_eq!(json["discount"], 25.0);
        assert_eq!(json["promotionImage"], "/promocoes/azeite.png");
        assert!(serde_json::to_value(&products[0]).unwrap().get("discount").is_none());
    }

    #[test]
    fn test_inactive_promotion_ignored() {
        let products = vec![Product::new("1", "Azeite", "Mercearia", 30.0)];
        let result = apply_promotions(&products, &[promo("1", 9.0, false)]);
        assert_eq!(result, products);
    }

    #[test]
    fn test_expired_promotion_ignored() {
        use chrono::TimeZone;

        let now = Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap();
        let products = vec![Product::new("1", "Azeite", "Mercearia", 30.0)];
        let mut expired = promo("1", 9.0, true);
        expired.valid_until = Some(Utc.with_ymd_and_hms(2024, 6, 30, 23, 59, 59).unwrap());

        assert_eq!(apply_promotions_at(&products, &[expired.clone()], now), products);

        expired.valid_until = Some(Utc.with_ymd_and_hms(2024, 7, 2, 0, 0, 0).unwrap());
        assert_eq!(apply_promotions_at(&products, &[expired], now)[0].price, 9.0);
    }

    #[test]
    fn test_first_active_promotion_wins() {
        let products = vec![Product::new("1", "Azeite", "Mercearia", 30.0)];
        let result = apply_promotions(
            &products,
            &[promo("1", 20.0, false), promo("1", 9.0, true), promo("1", 5.0, true)],
        );
        assert_eq!(result[0].price, 9.0);
    }
}
