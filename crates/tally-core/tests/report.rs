//! End-to-end tests of the public report API.

use rust_decimal::Decimal;
use serde_json::json;
use tally_core::{
    analyze_sales_data, Dataset, LineItem, Money, Product, ReferenceError, ReportError,
    ReportOptions, SalesReport, SellerStats, ValidationError,
};

fn two_seller_dataset() -> Dataset {
    let json = json!({
        "sellers": [
            {"id": "S1", "first_name": "A", "last_name": "B"},
            {"id": "S2", "first_name": "C", "last_name": "D"}
        ],
        "products": [
            {"sku": "SKU1", "purchase_price": 10},
            {"sku": "SKU2", "purchase_price": 5}
        ],
        "purchase_records": [
            {"seller_id": "S1", "total_amount": 100,
             "items": [{"sku": "SKU1", "quantity": 2, "sale_price": 20, "discount": 10}]},
            {"seller_id": "S2", "total_amount": 50,
             "items": [{"sku": "SKU2", "quantity": 5, "sale_price": 10, "discount": 0}]}
        ],
        "customers": [{"id": "C1"}]
    });
    serde_json::from_value(json).unwrap()
}

/// `n` sellers, seller `i` makes one sale with profit `(n - i) × 10.00`.
fn roster(n: usize) -> Dataset {
    let sellers: Vec<_> = (0..n)
        .map(|i| json!({"id": format!("S{i}"), "first_name": "F", "last_name": "L"}))
        .collect();
    let records: Vec<_> = (0..n)
        .map(|i| {
            json!({
                "seller_id": format!("S{i}"),
                "total_amount": 10,
                "items": [{"sku": "P", "quantity": n - i, "sale_price": 11, "discount": 0}]
            })
        })
        .collect();
    serde_json::from_value(json!({
        "sellers": sellers,
        "products": [{"sku": "P", "purchase_price": 1}],
        "purchase_records": records,
        "customers": [{"id": "C"}]
    }))
    .unwrap()
}

#[test]
fn two_sellers_ranked_with_reference_policies() {
    let dataset = two_seller_dataset();
    let rows = analyze_sales_data(Some(&dataset), Some(&ReportOptions::reference())).unwrap();

    let output = serde_json::to_value(&rows).unwrap();
    assert_eq!(
        output,
        json!([
            {
                "seller_id": "S2",
                "name": "C D",
                "revenue": 50.0,
                "profit": 25.0,
                "sales_count": 1,
                "top_products": [{"sku": "SKU2", "quantity": 5}],
                "bonus": 3.75
            },
            {
                "seller_id": "S1",
                "name": "A B",
                "revenue": 100.0,
                "profit": 16.0,
                "sales_count": 1,
                "top_products": [{"sku": "SKU1", "quantity": 2}],
                "bonus": 1.6
            }
        ])
    );
}

#[test]
fn sales_report_rollups() {
    let report = SalesReport::generate(&two_seller_dataset(), &ReportOptions::reference()).unwrap();
    assert_eq!(report.len(), 2);
    assert_eq!(report.total_revenue(), Money::from_cents(15000));
    assert_eq!(report.total_profit(), Money::from_cents(4100));
    assert_eq!(report.total_bonus(), Money::from_cents(535));
}

#[test]
fn bottom_performer_rule_only_applies_beyond_three_sellers() {
    for total in 1..=3 {
        let rows = analyze_sales_data(Some(&roster(total)), Some(&ReportOptions::reference())).unwrap();
        assert_eq!(rows.len(), total);
        assert!(
            rows.iter().all(|row| row.bonus > Money::zero()),
            "total={total}: no seller may get the zero bonus"
        );
    }

    for total in 4..=8 {
        let rows = analyze_sales_data(Some(&roster(total)), Some(&ReportOptions::reference())).unwrap();
        let zero: Vec<usize> = rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.bonus.is_zero())
            .map(|(i, _)| i)
            .collect();
        assert_eq!(zero, vec![total - 1], "total={total}");
    }
}

#[test]
fn custom_policies_are_used() {
    let options = ReportOptions::new()
        .with_revenue(|item: &LineItem, _: &Product| item.sale_price.checked_mul_quantity(item.quantity))
        .with_bonus(|index: usize, _: usize, _: &SellerStats| Some(Money::from_cents(index as i64 + 1)));

    let rows = analyze_sales_data(Some(&two_seller_dataset()), Some(&options)).unwrap();
    // Discount ignored: S1 revenue 40 − cost 20 = 20, S2 50 − 25 = 25
    assert_eq!(rows[0].seller_id, "S2");
    assert_eq!(rows[1].profit, Money::from_cents(2000));
    assert_eq!(rows[0].bonus, Money::from_cents(1));
    assert_eq!(rows[1].bonus, Money::from_cents(2));
}

#[test]
fn missing_or_empty_collections_fail_validation() {
    for field in ["sellers", "products", "purchase_records", "customers"] {
        let mut value = serde_json::to_value(two_seller_dataset()).unwrap();
        value.as_object_mut().unwrap().remove(field);
        let dataset: Dataset = serde_json::from_value(value).unwrap();
        let err = analyze_sales_data(Some(&dataset), Some(&ReportOptions::reference())).unwrap_err();
        assert!(
            matches!(&err, ReportError::Validation(ValidationError::MissingCollection { field: f }) if f == field),
            "{field}: {err}"
        );

        let mut value = serde_json::to_value(two_seller_dataset()).unwrap();
        value[field] = json!([]);
        let dataset: Dataset = serde_json::from_value(value).unwrap();
        let err = analyze_sales_data(Some(&dataset), Some(&ReportOptions::reference())).unwrap_err();
        assert!(
            matches!(&err, ReportError::Validation(ValidationError::EmptyCollection { field: f }) if f == field),
            "{field}: {err}"
        );
    }
}

#[test]
fn missing_inputs_fail_validation() {
    let dataset = two_seller_dataset();
    assert!(matches!(
        analyze_sales_data(None, Some(&ReportOptions::reference())),
        Err(ReportError::Validation(ValidationError::MissingDataset))
    ));
    assert!(matches!(
        analyze_sales_data(Some(&dataset), None),
        Err(ReportError::Validation(ValidationError::MissingOptions))
    ));
    assert!(matches!(
        analyze_sales_data(Some(&dataset), Some(&ReportOptions::new())),
        Err(ReportError::Validation(ValidationError::MissingPolicy { .. }))
    ));
}

#[test]
fn unknown_references_abort_the_run() {
    let mut value = serde_json::to_value(two_seller_dataset()).unwrap();
    value["purchase_records"][1]["seller_id"] = json!("S9");
    let dataset: Dataset = serde_json::from_value(value).unwrap();
    let err = analyze_sales_data(Some(&dataset), Some(&ReportOptions::reference())).unwrap_err();
    assert!(matches!(
        err,
        ReportError::Reference(ReferenceError::UnknownSeller { record: 1, .. })
    ));

    let mut value = serde_json::to_value(two_seller_dataset()).unwrap();
    value["purchase_records"][0]["items"][0]["sku"] = json!("SKU9");
    let dataset: Dataset = serde_json::from_value(value).unwrap();
    let err = analyze_sales_data(Some(&dataset), Some(&ReportOptions::reference())).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Reference error: purchase record 0 references unknown sku 'SKU9'"
    );
}

#[test]
fn money_is_rounded_once_per_row() {
    let dataset: Dataset = serde_json::from_value(json!({
        "sellers": [{"id": "S1", "first_name": "A", "last_name": "B"}],
        "products": [{"sku": "CHEAP", "purchase_price": 0}],
        "purchase_records": [{
            "seller_id": "S1",
            "total_amount": 0.405,
            "items": [
                {"sku": "CHEAP", "quantity": 1, "sale_price": 0.15, "discount": 10},
                {"sku": "CHEAP", "quantity": 1, "sale_price": 0.15, "discount": 10},
                {"sku": "CHEAP", "quantity": 1, "sale_price": 0.15, "discount": 10}
            ]
        }],
        "customers": [{"id": "C"}]
    }))
    .unwrap();

    let rows = analyze_sales_data(Some(&dataset), Some(&ReportOptions::reference())).unwrap();
    let output = serde_json::to_value(&rows).unwrap();
    // 3 × 0.135 = 0.405; bonus 15% of 0.405 = 0.06075
    assert_eq!(output[0]["revenue"], json!(0.41));
    assert_eq!(output[0]["profit"], json!(0.41));
    assert_eq!(output[0]["bonus"], json!(0.06));
}

#[test]
fn large_lines_within_range_are_exact() {
    let dataset: Dataset = serde_json::from_value(json!({
        "sellers": [{"id": "S1", "first_name": "A", "last_name": "B"}],
        "products": [{"sku": "GOLD", "purchase_price": 1}],
        "purchase_records": [{
            "seller_id": "S1",
            "total_amount": 1e21,
            "items": [{"sku": "GOLD", "quantity": 1000000, "sale_price": 1e15, "discount": 0}]
        }],
        "customers": [{"id": "C"}]
    }))
    .unwrap();

    let rows = analyze_sales_data(Some(&dataset), Some(&ReportOptions::reference())).unwrap();
    // 1e21 − 1 000 000 × 1
    assert_eq!(
        rows[0].profit,
        Money::new(Decimal::from_i128_with_scale(999_999_999_999_999_000_000, 0))
    );
}

#[test]
fn out_of_range_totals_fail_instead_of_wrapping() {
    let dataset: Dataset = serde_json::from_value(json!({
        "sellers": [{"id": "S1", "first_name": "A", "last_name": "B"}],
        "products": [{"sku": "GOLD", "purchase_price": 1}],
        "purchase_records": [{
            "seller_id": "S1",
            "total_amount": 1,
            "items": [{"sku": "GOLD", "quantity": i64::MAX, "sale_price": 1e15, "discount": 0}]
        }],
        "customers": [{"id": "C"}]
    }))
    .unwrap();

    let err = analyze_sales_data(Some(&dataset), Some(&ReportOptions::reference())).unwrap_err();
    assert!(matches!(err, ReportError::Overflow { .. }), "{err}");
}
