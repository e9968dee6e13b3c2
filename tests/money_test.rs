use asa_reports::domain::money::Cents;
use asa_reports::{cents_or_zero, AsaError, Money};

#[test]
fn test_every_cent_value_round_trips() {
    for cents in (0..100_000).chain([1_234_567_890, 9_007_199_254_740_993]) {
        let money = Money::with_cents(cents, "USD");
        assert_eq!(money.amount_cents(), cents, "rendered as {}", money.amount);
    }
}

#[test]
fn test_rendering_rules() {
    assert_eq!(Money::with_cents(0, "USD").amount, "0");
    assert_eq!(Money::with_cents(5, "USD").amount, "0.05");
    assert_eq!(Money::with_cents(53, "USD").amount, "0.53");
    assert_eq!(Money::with_cents(100, "USD").amount, "1.00");
    assert_eq!(Money::with_cents(10012, "USD").amount, "100.12");
}

#[test]
fn test_parsing_pads_fraction() {
    assert_eq!(cents_or_zero("100"), 10000);
    assert_eq!(cents_or_zero("100.1"), 10010);
    assert_eq!(cents_or_zero("100.12"), 10012);
    assert_eq!(cents_or_zero("abc"), 0);
}

#[test]
fn test_strict_and_lenient_paths_agree_on_valid_input() {
    for amount in ["0", "0.5", "12.34", "-7.01", "1000000"] {
        let money = Money::new(amount, "EUR");
        assert_eq!(money.try_amount_cents().unwrap(), money.amount_cents());
    }

    let err = Money::new("12,34", "EUR").try_amount_cents().unwrap_err();
    assert!(matches!(err, AsaError::InvalidAmount { ref value, .. } if value == "12,34"));
}

#[test]
fn test_scaling_keeps_currency() {
    assert_eq!(Money::new("1.00", "GBP").scale(2.0), Money::new("2.00", "GBP"));
    assert_eq!(Money::new("1.00", "GBP").scale(0.0), Money::new("0", "GBP"));
    assert_eq!(Money::new("100", "GBP").scale(10.0), Money::new("1000.00", "GBP"));

    let scaled = Money::new("19.99", "CHF").scale(1.5);
    assert_eq!(scaled.currency, "CHF");
    // 1999 * 1.5 = 2998.5, truncated
    assert_eq!(scaled.amount, "29.98");
}

#[test]
fn test_budget_from_api_json() {
    let body = r#"{"amount": "2500.5", "currency": "USD"}"#;
    let budget: Money = serde_json::from_str(body).unwrap();

    let daily_cap = budget.scale(0.1);
    assert_eq!(daily_cap, Money::new("250.05", "USD"));
    assert_eq!(Cents::new(daily_cap.amount_cents()).to_string(), daily_cap.amount);
}
