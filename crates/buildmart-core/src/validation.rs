//! # Input Validation
//!
//! Checks run on the order form and on admin edits before anything is
//! computed, stored or sent over the network.
//!
//! ## Order Form Rules
//! ```text
//! ┌──────────────┬──────────────────────────────────────────────────────────┐
//! │ Field        │ Rule                                                     │
//! ├──────────────┼──────────────────────────────────────────────────────────┤
//! │ name         │ required                                                 │
//! │ phone        │ required, at least MIN_PHONE_LENGTH characters           │
//! │ address      │ required                                                 │
//! │ pincode      │ required                                                 │
//! │ quantity     │ never rejected: anything unusable becomes 1             │
//! └──────────────┴──────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{CustomerDetails, TaxRate};
use crate::{MAX_ORDER_QUANTITY, MAX_UNIT_PRICE, MIN_PHONE_LENGTH};

/// Result alias for validators.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Order Form
// =============================================================================

/// Validates that a string field is present after trimming.
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates a customer phone number.
pub fn validate_phone(phone: &str) -> ValidationResult<()> {
    validate_required("phone", phone)?;

    if phone.trim().chars().count() < MIN_PHONE_LENGTH {
        return Err(ValidationError::TooShort {
            field: "phone".to_string(),
            min: MIN_PHONE_LENGTH,
        });
    }
    Ok(())
}

/// Validates every customer field, in form order.
///
/// The first failing field is reported.
pub fn validate_customer(customer: &CustomerDetails) -> ValidationResult<()> {
    validate_required("name", &customer.name)?;
    validate_phone(&customer.phone)?;
    validate_required("address", &customer.address)?;
    validate_required("pincode", &customer.pincode)?;
    Ok(())
}

/// Parses the quantity field, treating anything unusable as 1.
///
/// ```rust
/// use buildmart_core::validation::clamp_quantity;
///
/// assert_eq!(clamp_quantity("12"), 12);
/// assert_eq!(clamp_quantity("0"), 1);
/// assert_eq!(clamp_quantity("lots"), 1);
/// ```
pub fn clamp_quantity(input: &str) -> u32 {
    match input.trim().parse::<i64>() {
        Ok(n) if n >= 1 => n.min(i64::from(MAX_ORDER_QUANTITY)) as u32,
        _ => 1,
    }
}

/// Builds the text sent to the distance lookup.
///
/// ## Errors
/// `Required { field: "address" }` when both parts are blank.
pub fn delivery_destination(address: &str, pincode: &str) -> ValidationResult<String> {
    let address = address.trim();
    let pincode = pincode.trim();

    let destination = match (address.is_empty(), pincode.is_empty()) {
        (true, true) => {
            return Err(ValidationError::Required {
                field: "address".to_string(),
            })
        }
        (false, false) => format!("{}, {}", address, pincode),
        (false, true) => address.to_string(),
        (true, false) => pincode.to_string(),
    };
    Ok(destination)
}

// =============================================================================
// Admin Edits
// =============================================================================

/// Validates a unit price or a charge: not negative, at most `MAX_UNIT_PRICE`.
pub fn validate_amount(field: &str, amount: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }
    if amount.rupees() > MAX_UNIT_PRICE {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: MAX_UNIT_PRICE,
        });
    }
    Ok(())
}

/// Validates a GST rate (0% to 100%).
pub fn validate_tax_rate(rate: TaxRate) -> ValidationResult<()> {
    if rate.bps() > 10_000 {
        return Err(ValidationError::OutOfRange {
            field: "gst_rate".to_string(),
            min: 0,
            max: 100,
        });
    }
    Ok(())
}

/// Validates a WhatsApp number: country code and number, digits only.
pub fn validate_whatsapp_number(number: &str) -> ValidationResult<()> {
    validate_required("whatsapp_number", number)?;

    if !number.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "whatsapp_number".to_string(),
            reason: "digits only, including country code".to_string(),
        });
    }
    Ok(())
}

/// Validates a payment link URL.
pub fn validate_payment_link(link: &str) -> ValidationResult<()> {
    validate_required("payment_link", link)?;

    let scheme_ok = link.starts_with("https://") || link.starts_with("http://");
    if !scheme_ok || url::Url::parse(link).is_err() {
        return Err(ValidationError::InvalidFormat {
            field: "payment_link".to_string(),
            reason: "must be an http(s) URL".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn customer() -> CustomerDetails {
        CustomerDetails {
            name: "Ravi Kumar".to_string(),
            phone: "9812345678".to_string(),
            address: "Plot 14, Sector 62, Noida".to_string(),
            pincode: "201301".to_string(),
        }
    }

    #[test]
    fn test_valid_customer() {
        assert!(validate_customer(&customer()).is_ok());
    }

    #[test]
    fn test_missing_name_reported_first() {
        let mut c = customer();
        c.name = "   ".to_string();
        c.phone = String::new();

        let err = validate_customer(&c).unwrap_err();
        assert!(matches!(err, ValidationError::Required { field } if field == "name"));
    }

    #[test]
    fn test_short_phone() {
        let mut c = customer();
        c.phone = "98123".to_string();

        let err = validate_customer(&c).unwrap_err();
        assert!(matches!(err, ValidationError::TooShort { min: 10, .. }));
    }

    #[test]
    fn test_missing_pincode() {
        let mut c = customer();
        c.pincode = String::new();

        let err = validate_customer(&c).unwrap_err();
        assert!(matches!(err, ValidationError::Required { field } if field == "pincode"));
    }

    #[test]
    fn test_clamp_quantity() {
        assert_eq!(clamp_quantity(" 7 "), 7);
        assert_eq!(clamp_quantity("-3"), 1);
        assert_eq!(clamp_quantity(""), 1);
        assert_eq!(clamp_quantity("2.5"), 1);
        assert_eq!(clamp_quantity("999999999"), MAX_ORDER_QUANTITY);
    }

    #[test]
    fn test_delivery_destination() {
        assert_eq!(
            delivery_destination("Sector 62, Noida", "201301").unwrap(),
            "Sector 62, Noida, 201301"
        );
        assert_eq!(delivery_destination("Sector 62", "").unwrap(), "Sector 62");
        assert_eq!(delivery_destination("", "110001").unwrap(), "110001");
        assert!(delivery_destination("  ", " ").is_err());
    }

    #[test]
    fn test_admin_values() {
        assert!(validate_amount("price", Money::from_rupees(0)).is_ok());
        assert!(validate_amount("price", Money::from_rupees(-1)).is_err());
        assert!(validate_amount("price", Money::from_rupees(MAX_UNIT_PRICE)).is_ok());

        let err = validate_amount("price", Money::from_rupees(1_000_000_000_000_000)).unwrap_err();
        assert!(matches!(err, ValidationError::OutOfRange { ref field, .. } if field == "price"));
        assert_eq!(err.to_string(), "price must be between 0 and 10000000");

        assert!(validate_tax_rate(TaxRate::from_percent(28)).is_ok());
        assert!(validate_tax_rate(TaxRate::from_percent(101)).is_err());
    }

    #[test]
    fn test_whatsapp_number() {
        assert!(validate_whatsapp_number("919876543210").is_ok());
        assert!(validate_whatsapp_number("+91 98765").is_err());
        assert!(validate_whatsapp_number("").is_err());
    }

    #[test]
    fn test_payment_link() {
        assert!(validate_payment_link("https://rzp.io/l/your-payment-link").is_ok());
        assert!(validate_payment_link("ftp://example.com").is_err());
        assert!(validate_payment_link("https://").is_err());
    }
}
