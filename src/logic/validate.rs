use rust_decimal::{Decimal, RoundingStrategy};

use crate::logic::error::{ServiceError, ServiceResult};
use crate::model::{ItemPayload, TransactionPayload};

pub const SKU_MAX_LEN: usize = 64;
pub const NAME_MAX_LEN: usize = 128;
pub const REFERENCE_MAX_LEN: usize = 256;
pub const MAX_QUANTITY_CHANGE: i32 = 1_000_000;
pub const PRICE_SCALE: u32 = 2;

/// Empty or whitespace-only search text means "no filter".
pub fn normalize_search(search: Option<String>) -> Option<String> {
    search.filter(|s| !s.trim().is_empty())
}

/// Round to the stored scale the same way Postgres NUMERIC does.
pub fn normalize_price(price: Decimal) -> Decimal {
    let mut price = price.round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointAwayFromZero);
    price.rescale(PRICE_SCALE);
    price
}

pub fn validate_item(payload: &ItemPayload) -> ServiceResult<()> {
    if payload.sku.trim().is_empty() || payload.name.trim().is_empty() {
        return Err(ServiceError::validation("SKU and Name are required."));
    }
    if payload.sku.chars().count() > SKU_MAX_LEN {
        return Err(ServiceError::validation(format!(
            "SKU must be at most {} characters.",
            SKU_MAX_LEN
        )));
    }
    if payload.name.chars().count() > NAME_MAX_LEN {
        return Err(ServiceError::validation(format!(
            "Name must be at most {} characters.",
            NAME_MAX_LEN
        )));
    }
    if payload.unit_price < Decimal::ZERO {
        return Err(ServiceError::validation("UnitPrice cannot be negative."));
    }
    if payload.low_stock_threshold < 0 {
        return Err(ServiceError::validation(
            "LowStockThreshold cannot be negative.",
        ));
    }
    Ok(())
}

pub fn validate_transaction(payload: &TransactionPayload) -> ServiceResult<()> {
    if payload.quantity_change == 0 {
        return Err(ServiceError::validation("QuantityChange cannot be 0."));
    }
    if payload.quantity_change.unsigned_abs() > MAX_QUANTITY_CHANGE.unsigned_abs() {
        return Err(ServiceError::validation(format!(
            "QuantityChange must be between -{0} and {0}.",
            MAX_QUANTITY_CHANGE
        )));
    }
    let reference_len = payload.reference.as_deref().map_or(0, |r| r.chars().count());
    if reference_len > REFERENCE_MAX_LEN {
        return Err(ServiceError::validation(format!(
            "Reference must be at most {} characters.",
            REFERENCE_MAX_LEN
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(sku: &str, name: &str) -> ItemPayload {
        ItemPayload {
            sku: sku.to_string(),
            name: name.to_string(),
            unit_price: Decimal::new(1000, 2),
            low_stock_threshold: 5,
            ..Default::default()
        }
    }

    #[test]
    fn test_blank_sku_or_name_rejected() {
        assert!(validate_item(&payload("", "Widget")).is_err());
        assert!(validate_item(&payload("SKU-1", "   ")).is_err());
        assert!(validate_item(&payload("SKU-1", "Widget")).is_ok());
    }

    #[test]
    fn test_length_bounds() {
        assert!(validate_item(&payload(&"S".repeat(SKU_MAX_LEN), "Widget")).is_ok());
        assert!(validate_item(&payload(&"S".repeat(SKU_MAX_LEN + 1), "Widget")).is_err());
        assert!(validate_item(&payload("SKU-1", &"n".repeat(NAME_MAX_LEN + 1))).is_err());
    }

    #[test]
    fn test_negative_numbers_rejected() {
        let mut negative_price = payload("SKU-1", "Widget");
        negative_price.unit_price = Decimal::new(-1, 2);
        assert!(validate_item(&negative_price).is_err());

        let mut negative_threshold = payload("SKU-1", "Widget");
        negative_threshold.low_stock_threshold = -1;
        assert!(validate_item(&negative_threshold).is_err());

        let mut free = payload("SKU-1", "Widget");
        free.unit_price = Decimal::ZERO;
        free.low_stock_threshold = 0;
        assert!(validate_item(&free).is_ok());
    }

    #[test]
    fn test_transaction_quantity_bounds() {
        let tx = |quantity_change| TransactionPayload {
            quantity_change,
            ..Default::default()
        };
        assert!(matches!(
            validate_transaction(&tx(0)),
            Err(ServiceError::Validation(m)) if m == "QuantityChange cannot be 0."
        ));
        assert!(validate_transaction(&tx(MAX_QUANTITY_CHANGE)).is_ok());
        assert!(validate_transaction(&tx(-MAX_QUANTITY_CHANGE)).is_ok());
        assert!(validate_transaction(&tx(MAX_QUANTITY_CHANGE + 1)).is_err());
        assert!(validate_transaction(&tx(i32::MIN)).is_err());
    }

    #[test]
    fn test_reference_length() {
        let long = TransactionPayload {
            quantity_change: 1,
            reference: Some("r".repeat(REFERENCE_MAX_LEN + 1)),
            ..Default::default()
        };
        assert!(validate_transaction(&long).is_err());
    }

    #[test]
    fn test_search_normalization() {
        assert_eq!(normalize_search(None), None);
        assert_eq!(normalize_search(Some("  \t".to_string())), None);
        assert_eq!(
            normalize_search(Some(" wid".to_string())),
            Some(" wid".to_string())
        );
    }

    #[test]
    fn test_price_rounds_half_away_from_zero() {
        assert_eq!(normalize_price(Decimal::new(10125, 3)), Decimal::new(1013, 2));
        assert_eq!(normalize_price(Decimal::new(1000, 2)), Decimal::new(1000, 2));
        assert_eq!(normalize_price(Decimal::from(100)).to_string(), "100.00");
    }
}
