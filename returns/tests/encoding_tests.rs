use common::test_helpers::TestResult;
use common::test_assert_eq;
use returns::model::{
    CodChoice, CustomerLocation, CustomerTier, FEATURE_COLUMNS, Label, OrderDetails,
    ProductCategory, ReturnReason,
};

#[test]
fn category_codes_match_the_training_table() {
    assert_eq!(ProductCategory::Electronics.code(), 0);
    assert_eq!(ProductCategory::Clothing.code(), 1);
    assert_eq!(ProductCategory::Home.code(), 2);
    assert_eq!(ProductCategory::Books.code(), 3);
    assert_eq!(ProductCategory::Beauty.code(), 4);
}

#[test]
fn tier_codes_match_the_training_table() {
    assert_eq!(CustomerTier::Bronze.code(), 0);
    assert_eq!(CustomerTier::Silver.code(), 1);
    assert_eq!(CustomerTier::Gold.code(), 2);
    assert_eq!(CustomerTier::Platinum.code(), 3);
}

#[test]
fn location_codes_match_the_training_table() {
    assert_eq!(CustomerLocation::North.code(), 0);
    assert_eq!(CustomerLocation::South.code(), 1);
    assert_eq!(CustomerLocation::East.code(), 2);
    assert_eq!(CustomerLocation::West.code(), 3);
    assert_eq!(CustomerLocation::Central.code(), 4);
}

#[test]
fn reason_codes_match_the_training_table() {
    assert_eq!(ReturnReason::None.code(), 0);
    assert_eq!(ReturnReason::Defective.code(), 1);
    assert_eq!(ReturnReason::WrongItem.code(), 2);
    assert_eq!(ReturnReason::ChangedMind.code(), 3);
    assert_eq!(ReturnReason::LateDelivery.code(), 4);
    assert_eq!(ReturnReason::Other.code(), 5);
}

#[test]
fn cod_codes_match_the_training_table() {
    assert_eq!(CodChoice::Yes.code(), 1);
    assert_eq!(CodChoice::No.code(), 0);
}

#[test]
fn feature_columns_follow_the_training_order() {
    assert_eq!(
        FEATURE_COLUMNS,
        [
            "product_category",
            "price",
            "delivery_days",
            "customer_tier",
            "is_cod",
            "product_rating",
            "customer_location",
            "return_reason",
            "product_weight_grams",
            "days_to_return",
        ]
    );
}

#[test]
fn order_encodes_in_column_order() {
    let order = OrderDetails {
        product_category: ProductCategory::Electronics,
        price: 499.0,
        delivery_days: 3,
        customer_tier: CustomerTier::Gold,
        is_cod: CodChoice::Yes,
        product_rating: 4.0,
        customer_location: CustomerLocation::West,
        return_reason: ReturnReason::Defective,
        product_weight_grams: 1200,
        days_to_return: 0,
    };

    assert_eq!(
        order.to_feature_vector(),
        [0.0, 499.0, 3.0, 2.0, 1.0, 4.0, 3.0, 1.0, 1200.0, 0.0]
    );
}

#[test]
fn default_order_encodes_with_the_default_codes() {
    let vector = OrderDetails::default().to_feature_vector();
    assert_eq!(vector, [0.0, 499.0, 3.0, 0.0, 1.0, 4.0, 0.0, 0.0, 1200.0, 0.0]);
}

#[test]
fn encoded_vector_width_matches_the_column_count() -> TestResult {
    let vector = OrderDetails::default().to_feature_vector();
    test_assert_eq!(vector.len(), FEATURE_COLUMNS.len());
    Ok(())
}

#[test]
fn multiword_reasons_round_trip_through_serde() {
    let json = serde_json::to_string(&ReturnReason::WrongItem).unwrap();
    assert_eq!(json, "\"Wrong Item\"");
    let parsed: ReturnReason = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, ReturnReason::WrongItem);

    assert_eq!(
        serde_json::to_string(&ReturnReason::ChangedMind).unwrap(),
        "\"Changed Mind\""
    );
    assert_eq!(
        serde_json::to_string(&ReturnReason::LateDelivery).unwrap(),
        "\"Late Delivery\""
    );
}

#[test]
fn multiword_reasons_display_with_spaces() {
    assert_eq!(ReturnReason::WrongItem.to_string(), "Wrong Item");
    assert_eq!(ReturnReason::ChangedMind.to_string(), "Changed Mind");
    assert_eq!(ReturnReason::LateDelivery.to_string(), "Late Delivery");
    assert_eq!(ReturnReason::Defective.to_string(), "Defective");
}

#[test]
fn unknown_reason_string_is_rejected() {
    let result: Result<ReturnReason, _> = serde_json::from_str("\"Lost Parcel\"");
    assert!(result.is_err());
}

#[test]
fn labels_map_to_display_strings() {
    assert_eq!(Label::Return.to_string(), "Return");
    assert_eq!(Label::NotReturn.to_string(), "Not Return");
    assert_eq!(
        serde_json::to_string(&Label::NotReturn).unwrap(),
        "\"Not Return\""
    );
}

#[test]
fn label_decoding_treats_any_nonzero_code_as_return() {
    assert_eq!(Label::from_code(0), Label::NotReturn);
    assert_eq!(Label::from_code(1), Label::Return);
    assert_eq!(Label::from_code(7), Label::Return);
    assert_eq!(Label::Return.code(), 1);
    assert_eq!(Label::NotReturn.code(), 0);
}
