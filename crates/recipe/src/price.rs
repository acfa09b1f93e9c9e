use rust_decimal::Decimal;
use validator::ValidationError;

pub const MAX_DIGITS: u32 = 5;
pub const DECIMAL_PLACES: u32 = 2;

/// Accepts prices with at most five digits, two of them after the point.
pub fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    let normalized = price.normalize();

    if normalized.scale() > DECIMAL_PLACES {
        return Err(ValidationError::new("max_decimal_places").with_message(
            format!("Ensure that there are no more than {DECIMAL_PLACES} decimal places.").into(),
        ));
    }

    let whole_digits = MAX_DIGITS - DECIMAL_PLACES;
    if normalized.abs().trunc() >= Decimal::from(10i64.pow(whole_digits)) {
        return Err(ValidationError::new("max_whole_digits").with_message(
            format!("Ensure that there are no more than {whole_digits} digits before the decimal point.")
                .into(),
        ));
    }

    Ok(())
}

/// Canonical text form stored in the database, always two decimal places.
pub(crate) fn to_db(price: Decimal) -> String {
    let mut price = price;
    price.rescale(DECIMAL_PLACES);
    price.to_string()
}
