//! End-to-end behaviour of the public parsing surface.

use gtin_core::checksum::ChecksumAlgorithm;
use gtin_core::{
    parse, EmbeddedValuePackingOrder, FormatDescriptor, FormatRegistry, Money, ParseError,
    ABSENT_EMBEDDED_VALUE, MODULO_10,
};

/// A 12-digit layout whose embedded field can exceed 9999.
static WIDE12: FormatDescriptor = FormatDescriptor::new("WIDE12", 12, &MODULO_10)
    .product_id(3, 3)
    .embedded_value(6, 5, EmbeddedValuePackingOrder::End)
    .price_identifiers(&["20", "208"])
    .with_max_embedded_value(9999);

#[test]
fn test_ean8_parses() {
    let barcode = parse("96385074").unwrap();
    assert_eq!(barcode.format().name(), "EAN8");
    assert_eq!(barcode.area_id(), "963");
    assert_eq!(barcode.product_id(), "85074");
    assert_eq!(barcode.checksum(), 4);
}

#[test]
fn test_upc12_embedded_price() {
    let barcode = parse("208000021999").unwrap();
    assert!(barcode.has_embedded_price());
    assert_eq!(barcode.embedded_price().unwrap(), 1999);
    assert_eq!(barcode.product_id(), "00002");
    assert_eq!(barcode.product_id().len(), 5);

    let info = barcode.info().unwrap();
    assert_eq!(info.embedded_price, Some(Money::from_cents(1999)));
    assert_eq!(info.embedded_price.map(|p| p.to_string()), Some("$19.99".to_string()));
}

#[test]
fn test_upc12_plain_area_widens_product_id() {
    let barcode = parse("012345678905").unwrap();
    assert!(!barcode.has_embedded_price());
    assert!(!barcode.has_embedded_weight());
    assert_eq!(barcode.product_id(), "345678905");
    assert_eq!(barcode.embedded_price().unwrap(), ABSENT_EMBEDDED_VALUE);
}

#[test]
fn test_non_digit_rejected() {
    assert_eq!(
        parse("9638A074").unwrap_err(),
        ParseError::NonDigitCharacter {
            character: 'A',
            position: 4
        }
    );
}

#[test]
fn test_bad_checksum_unrecognized() {
    assert!(matches!(
        parse("96385075"),
        Err(ParseError::UnrecognizedFormat { .. })
    ));
    assert!(matches!(
        parse("012345678904"),
        Err(ParseError::UnrecognizedFormat { .. })
    ));
    // No standard format is 10 digits long
    assert!(matches!(
        parse("0123456789"),
        Err(ParseError::UnrecognizedFormat { .. })
    ));
}

#[test]
fn test_empty_input_unrecognized() {
    assert_eq!(
        parse("").unwrap_err(),
        ParseError::UnrecognizedFormat {
            barcode: String::new()
        }
    );
}

#[test]
fn test_embedded_value_over_max_is_unrecognized() {
    let mut registry = FormatRegistry::new();
    registry.register(&WIDE12).unwrap();

    let over = MODULO_10.append_checksum("20123410000").unwrap();
    assert!(matches!(
        registry.parse(&over),
        Err(ParseError::UnrecognizedFormat { .. })
    ));

    let at_max = MODULO_10.append_checksum("20123409999").unwrap();
    let barcode = registry.parse(&at_max).unwrap();
    assert_eq!(barcode.area_id(), "201");
    // Full area id "201" is not an identifier, so no embedded price is reported
    assert!(!barcode.has_embedded_price());
    assert_eq!(barcode.product_id(), "23409999");
}

#[test]
fn test_registration_order_breaks_ties() {
    let mut registry = FormatRegistry::new();
    registry.register(&WIDE12).unwrap();
    registry.register(&gtin_core::UPC12).unwrap();

    let barcode = registry.parse("012345678905").unwrap();
    assert_eq!(barcode.format().name(), "WIDE12");
    assert_eq!(
        gtin_core::standard_registry()
            .parse("012345678905")
            .unwrap()
            .format()
            .name(),
        "UPC12"
    );
}
