//! Integration tests for the cart state machine fed from derived catalog products.

use testresult::TestResult;

use frutos::prelude::*;

fn assert_totals(state: &CartState) {
    let items: u64 = state.items().iter().map(|l| u64::from(l.quantity())).sum();
    let amount: u64 = state.items().iter().map(CartLine::total).sum();

    assert_eq!(state.total_items(), items);
    assert_eq!(state.total_amount(), amount);
}

#[test]
fn shopping_session_keeps_totals_consistent() -> TestResult {
    let fixture = Fixture::from_set("catalogo")?;
    let almendras = fixture.product("almendras")?;
    let pistachos = fixture.product("pistachos")?;

    let almendras_100 = CartItem::from_product("almendras", &almendras, Weight::Grams100, 2)
        .ok_or("almendras should sell 100g")?;
    let pistachos_500 = CartItem::from_product("pistachos", &pistachos, Weight::Grams500, 1)
        .ok_or("pistachos should sell 500g")?;

    let key = almendras_100.key();

    let mut state = CartState::new()
        .apply(CartAction::Add(almendras_100.clone()))
        .apply(CartAction::Add(pistachos_500))
        .apply(CartAction::Add(almendras_100));

    assert_eq!(state.items().len(), 2);
    assert_eq!(state.line(&key).map(CartLine::quantity), Some(4));

    // 4 * 1500 + 12000
    assert_eq!(state.total_amount(), 18_000);
    assert_totals(&state);

    state = increment(state, &key);
    assert_eq!(state.line(&key).map(CartLine::quantity), Some(5));

    state = increment(state, &key);
    assert_eq!(
        state.line(&key).map(CartLine::quantity),
        Some(5),
        "stock ceiling of 5 should hold"
    );

    state = state.apply(CartAction::SetQuantity {
        key: key.clone(),
        quantity: 0,
    });
    assert_eq!(state.line(&key).map(CartLine::quantity), Some(1));
    assert_totals(&state);

    state = state.apply(CartAction::Remove(key.clone()));
    assert!(state.line(&key).is_none());
    assert_eq!(state.total_amount(), 12_000);

    Ok(())
}

#[test]
fn persisted_cart_survives_a_reload() -> TestResult {
    let fixture = Fixture::from_set("catalogo")?;
    let nueces = fixture.product("nueces")?;
    let almendras = fixture.product("almendras")?;

    let state = CartState::new()
        .apply(CartAction::Add(
            CartItem::from_product("nueces", &nueces, Weight::Grams250, 3)
                .ok_or("nueces should sell 250g")?,
        ))
        .apply(CartAction::Add(
            CartItem::from_product("almendras", &almendras, Weight::Grams500, 2)
                .ok_or("almendras should sell 500g")?,
        ))
        .apply(CartAction::Add(
            CartItem::from_product("nueces", &nueces, Weight::Kilo, 1)
                .ok_or("nueces should sell 1kg")?,
        ));

    let (restored, dropped) = CartState::load(&state.to_json()?);

    assert_eq!(dropped, 0);
    assert_eq!(restored, state);

    let order: Vec<(&str, u32)> = restored
        .items()
        .iter()
        .map(|line| (line.product_id(), line.weight()))
        .collect();

    assert_eq!(
        order,
        [("nueces", 250), ("almendras", 500), ("nueces", 1000)]
    );

    Ok(())
}

#[test]
fn reload_prunes_malformed_entries_and_merges_duplicates() {
    let raw = r#"[
        {"productId":"a","name":"Almendras","price":1500,"weight":100,"quantity":2,"image":"","total":3000,"stock":5},
        {"productId":"a","name":"Almendras","price":1500,"weight":100,"quantity":1,"image":"","total":999999},
        {"productId":"b","name":"Nueces","price":"gratis","weight":250,"quantity":1,"image":""},
        {"productId":"c","name":"Pistachos","price":12000,"weight":500,"image":""}
    ]"#;

    let (state, dropped) = CartState::load(raw);

    assert_eq!(dropped, 2);
    assert_eq!(state.items().len(), 1);
    assert_eq!(state.total_items(), 3);
    assert_eq!(state.total_amount(), 4_500);
    assert_eq!(
        state.line(&LineKey::new("a", Weight::Grams100)).map(CartLine::stock),
        Some(5)
    );
}

#[test]
fn corrupt_storage_starts_an_empty_cart() {
    let (state, dropped) = CartState::load("{\"cart\": ");

    assert!(state.is_empty());
    assert_eq!(state.total_amount(), 0);
    assert_eq!(dropped, 1);
}

#[test]
fn summary_shows_formatted_totals() -> TestResult {
    let fixture = Fixture::from_set("catalogo")?;
    let mix = fixture.product("mix")?;

    let state = CartState::new().apply(CartAction::Add(
        CartItem::from_product("mix", &mix, Weight::Grams250, 2).ok_or("mix should sell 250g")?,
    ));

    let summary = render_summary(&state);

    assert!(summary.contains("Mix Energético"));
    assert!(summary.contains("250g"));
    assert!(summary.contains(&format_price(4_996)));

    Ok(())
}
