use promo_tickets::animation::CounterFormat;
use promo_tickets::checkout::INCOMPLETE_FORM_MESSAGE;
use promo_tickets::{
    reveal_mode, submit, AnimatedCounter, EffectSettings, Money, PageConfig, PurchaseForm, QuantityStep,
    RevealEffect, RevealKind, RevealMode, RevealSet, TicketOrder, TicketSettings,
};

fn animated_settings() -> TicketSettings {
    PageConfig::default().resolve().unwrap().tickets
}

fn animated_effects() -> EffectSettings {
    PageConfig::default().resolve().unwrap().effects
}

#[test]
fn typed_quantities_are_clamped_and_priced() {
    let mut order = TicketOrder::new(animated_settings());

    for (raw, quantity, total) in [
        ("0", 1, "3,50\u{a0}€"),
        ("15", 10, "35,00\u{a0}€"),
        ("abc", 1, "3,50\u{a0}€"),
        ("4", 4, "14,00\u{a0}€"),
    ] {
        assert_eq!(order.set_quantity(raw), quantity, "input {raw:?}");
        assert_eq!(order.total_label(), total, "input {raw:?}");
    }
}

#[test]
fn buttons_walk_the_full_range_and_stop_at_the_ends() {
    let settings = animated_settings();
    let mut order = TicketOrder::new(settings);

    for expected in 2..=settings.max {
        assert_eq!(order.step(QuantityStep::Increment), expected);
    }
    assert_eq!(order.step(QuantityStep::Increment), settings.max);
    assert_eq!(order.total(), Money::from_cents(3500));

    for _ in 0..20 {
        order.step(QuantityStep::Decrement);
    }
    assert_eq!(order.quantity(), settings.min);
}

#[test]
fn confirmed_purchase_then_reset() {
    let settings = animated_settings();
    let mut order = TicketOrder::new(settings);
    order.step(QuantityStep::Increment);

    let form = PurchaseForm {
        name: "Ana".into(),
        email: "ana@x.com".into(),
        quantity_text: order.quantity().to_string(),
    };
    let confirmation = submit(&form, &settings).unwrap();
    assert!(confirmation.message.contains("2 boletos"));
    assert!(confirmation.message.contains("7,00\u{a0}€"));

    order.reset();
    assert_eq!(order.quantity(), 1);
}

#[test]
fn incomplete_forms_never_confirm() {
    let settings = animated_settings();
    let cases = [
        ("", "ana@x.com", "2"),
        ("Ana", "", "2"),
        ("Ana", "ana@x.com", ""),
        ("Ana", "ana@x.com", "muchos"),
        ("Ana", "ana@x.com", "\u{663}"),
    ];
    for (name, email, quantity) in cases {
        let form = PurchaseForm {
            name: name.into(),
            email: email.into(),
            quantity_text: quantity.into(),
        };
        let err = submit(&form, &settings).unwrap_err();
        assert_eq!(err.to_string(), INCOMPLETE_FORM_MESSAGE);
    }
}

#[test]
fn classic_variant_prices_in_whole_euros() {
    let settings = PageConfig::from_json(r#"{"preset":"classic"}"#)
        .unwrap()
        .resolve()
        .unwrap()
        .tickets;
    let mut order = TicketOrder::new(settings);
    order.set_quantity("7");
    assert_eq!(order.total_label(), "21\u{a0}€");
}

#[test]
fn reduced_motion_page_shows_final_values_once() {
    let effects = animated_effects();
    let mut reveals = RevealSet::new(vec![
        ("visitors", RevealKind::from_attrs(Some("1200"), None, None)),
        ("raised", RevealKind::from_attrs(Some("2500"), Some("currency"), None)),
        ("goal", RevealKind::from_attrs(None, None, Some("68"))),
    ]);

    let mode = reveal_mode(effects.enabled, true, true);
    assert_eq!(mode, RevealMode::Immediate);

    assert_eq!(
        reveals.fire(&"visitors", mode, effects.counter_duration_ms),
        Some(RevealEffect::FinalText("1200".into()))
    );
    assert_eq!(
        reveals.fire(&"raised", mode, effects.counter_duration_ms),
        Some(RevealEffect::FinalText("2500\u{a0}€".into()))
    );
    assert_eq!(
        reveals.fire(&"goal", mode, effects.counter_duration_ms),
        Some(RevealEffect::Fill("68%".into()))
    );

    // A later visibility event after motion is re-enabled changes nothing.
    for id in ["visitors", "raised", "goal"] {
        assert_eq!(reveals.fire(&id, RevealMode::Animate, effects.counter_duration_ms), None);
    }
}

#[test]
fn classic_page_never_animates() {
    let effects = PageConfig::from_json(r#"{"preset":"classic"}"#)
        .unwrap()
        .resolve()
        .unwrap()
        .effects;
    assert_eq!(reveal_mode(effects.enabled, false, true), RevealMode::Immediate);

    let counter = RevealKind::Counter(AnimatedCounter::new(15000.0, CounterFormat::Plain));
    assert_eq!(
        counter.effect(RevealMode::Immediate, effects.counter_duration_ms),
        RevealEffect::FinalText("15.000".into())
    );
}
