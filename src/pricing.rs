//! Ticket quantity clamping and euro price formatting.
//!
//! Quantities are always kept inside the configured `[min, max]` range and
//! prices are held in integer cents so that `total = quantity × unit_price`
//! is exact for every quantity.

use crate::config::{ANIMATED_FRACTION_DIGITS, ANIMATED_UNIT_PRICE, DEFAULT_MAX_TICKETS, DEFAULT_MIN_TICKETS};
use crate::utils::{group_digits, parse_leading_int};

/// Quantity substituted for input that holds no usable number.
pub const FALLBACK_QUANTITY: i64 = 1;

const EURO_SUFFIX: &str = "\u{a0}€";
const DECIMAL_SEPARATOR: char = ',';

/// A euro amount in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money {
    cents: i64,
}

impl Money {
    pub const fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    /// Round a decimal euro amount to the nearest cent.
    pub fn from_decimal(euros: f64) -> Self {
        Self {
            cents: (euros * 100.0).round() as i64,
        }
    }

    pub const fn cents(self) -> i64 {
        self.cents
    }

    pub fn times(self, quantity: u32) -> Self {
        Self {
            cents: self.cents.saturating_mul(quantity as i64),
        }
    }

    /// Render as es-ES euros, e.g. `"3,50 €"` or `"12.000 €"`.
    ///
    /// With zero fraction digits the amount is rounded half away from zero;
    /// any other value renders two digits.
    pub fn format(self, fraction_digits: u8) -> String {
        let sign = if self.cents < 0 { "-" } else { "" };
        let abs = self.cents.unsigned_abs();
        if fraction_digits == 0 {
            let euros = (abs + 50) / 100;
            format!("{}{}{}", sign, group_digits(&euros.to_string()), EURO_SUFFIX)
        } else {
            format!(
                "{}{}{}{:02}{}",
                sign,
                group_digits(&(abs / 100).to_string()),
                DECIMAL_SEPARATOR,
                abs % 100,
                EURO_SUFFIX
            )
        }
    }
}

/// Render a plain number as a grouped es-ES integer (`12.345`).
pub fn format_plain_number(value: f64) -> String {
    let rounded = value.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{}{}", sign, group_digits(&format!("{:.0}", rounded.abs())))
}

/// Render a plain number as whole euros (`1.250 €` style).
///
/// Rounds once, half away from zero, straight to whole euros.
pub fn format_whole_euros(value: f64) -> String {
    Money::from_decimal(value.round()).format(0)
}

/// Bounds and price of the ticket widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TicketSettings {
    pub min: u32,
    pub max: u32,
    pub unit_price: Money,
    pub fraction_digits: u8,
}

impl Default for TicketSettings {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_TICKETS,
            max: DEFAULT_MAX_TICKETS,
            unit_price: Money::from_decimal(ANIMATED_UNIT_PRICE),
            fraction_digits: ANIMATED_FRACTION_DIGITS,
        }
    }
}

impl TicketSettings {
    /// Restrict `value` to `[min, max]`.
    pub fn clamp(&self, value: i64) -> u32 {
        value.clamp(self.min as i64, self.max as i64) as u32
    }

    /// Interpret raw user text as a quantity: unparseable or zero input
    /// becomes 1, then the result is clamped.
    pub fn quantity_from_raw(&self, raw: &str) -> u32 {
        let parsed = parse_leading_int(raw)
            .filter(|&n| n != 0)
            .unwrap_or(FALLBACK_QUANTITY);
        self.clamp(parsed)
    }

    pub fn total_for(&self, quantity: u32) -> Money {
        self.unit_price.times(quantity)
    }

    pub fn format_money(&self, amount: Money) -> String {
        amount.format(self.fraction_digits)
    }
}

/// Increment/decrement controls, tagged in markup with `data-action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityStep {
    Increment,
    Decrement,
}

impl QuantityStep {
    pub fn from_action(action: &str) -> Option<Self> {
        match action {
            "increment" => Some(QuantityStep::Increment),
            "decrement" => Some(QuantityStep::Decrement),
            _ => None,
        }
    }

    pub fn action(self) -> &'static str {
        match self {
            QuantityStep::Increment => "increment",
            QuantityStep::Decrement => "decrement",
        }
    }
}

/// The quantity currently selected in the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TicketOrder {
    quantity: u32,
    settings: TicketSettings,
}

impl TicketOrder {
    pub fn new(settings: TicketSettings) -> Self {
        Self {
            quantity: settings.min,
            settings,
        }
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn settings(&self) -> &TicketSettings {
        &self.settings
    }

    /// Replace the quantity with parsed and clamped user input. Returns the
    /// canonical value to write back into the field.
    pub fn set_quantity(&mut self, raw: &str) -> u32 {
        self.quantity = self.settings.quantity_from_raw(raw);
        self.quantity
    }

    /// Move one ticket up or down without leaving the bounds.
    pub fn step(&mut self, step: QuantityStep) -> u32 {
        let current = self.quantity as i64;
        let next = match step {
            QuantityStep::Increment => current + 1,
            QuantityStep::Decrement => current - 1,
        };
        self.quantity = self.settings.clamp(next);
        self.quantity
    }

    pub fn reset(&mut self) {
        self.quantity = self.settings.min;
    }

    pub fn total(&self) -> Money {
        self.settings.total_for(self.quantity)
    }

    pub fn total_label(&self) -> String {
        self.settings.format_money(self.total())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> TicketSettings {
        TicketSettings {
            min: 1,
            max: 10,
            unit_price: Money::from_decimal(3.5),
            fraction_digits: 2,
        }
    }

    #[test]
    fn raw_input_is_clamped() {
        let mut order = TicketOrder::new(settings());
        assert_eq!(order.set_quantity("0"), 1);
        assert_eq!(order.total_label(), "3,50\u{a0}€");
        assert_eq!(order.set_quantity("15"), 10);
        assert_eq!(order.total_label(), "35,00\u{a0}€");
        assert_eq!(order.set_quantity("abc"), 1);
        assert_eq!(order.total_label(), "3,50\u{a0}€");
        assert_eq!(order.set_quantity("-4"), 1);
        assert_eq!(order.set_quantity("4 boletos"), 4);
    }

    #[test]
    fn non_ascii_digits_fall_back_to_one() {
        let mut order = TicketOrder::new(settings());
        order.set_quantity("6");
        assert_eq!(order.set_quantity("\u{663}"), 1);
        assert_eq!(order.total_label(), "3,50\u{a0}€");
        assert_eq!(order.set_quantity("\u{ff19}\u{ff19}"), 1);
    }

    #[test]
    fn clamp_stays_in_bounds_for_any_input() {
        let s = TicketSettings {
            min: 2,
            max: 6,
            ..settings()
        };
        for raw in ["", " ", "1", "2", "5", "6", "7", "-100", "1e9", "9999999999999999999999", "x1", "0x10"] {
            let q = s.quantity_from_raw(raw);
            assert!((2..=6).contains(&q), "{raw:?} gave {q}");
        }
    }

    #[test]
    fn steps_never_cross_bounds() {
        let mut order = TicketOrder::new(settings());
        assert_eq!(order.step(QuantityStep::Decrement), 1);
        order.set_quantity("10");
        assert_eq!(order.step(QuantityStep::Increment), 10);
        assert_eq!(order.step(QuantityStep::Decrement), 9);
        assert_eq!(order.step(QuantityStep::Increment), 10);
    }

    #[test]
    fn total_is_exact_for_every_quantity() {
        let s = settings();
        let mut order = TicketOrder::new(s);
        for q in s.min..=s.max {
            order.set_quantity(&q.to_string());
            assert_eq!(order.total().cents(), 350 * q as i64);
        }
    }

    #[test]
    fn reset_returns_to_minimum() {
        let mut order = TicketOrder::new(TicketSettings { min: 3, ..settings() });
        assert_eq!(order.quantity(), 3);
        order.set_quantity("8");
        order.reset();
        assert_eq!(order.quantity(), 3);
    }

    #[test]
    fn whole_euro_formatting() {
        assert_eq!(Money::from_cents(300).format(0), "3\u{a0}€");
        assert_eq!(Money::from_cents(350).format(0), "4\u{a0}€");
        assert_eq!(Money::from_cents(349).format(0), "3\u{a0}€");
        assert_eq!(Money::from_cents(1_234_500).format(0), "12.345\u{a0}€");
        assert_eq!(Money::from_cents(123_400).format(0), "1234\u{a0}€");
    }

    #[test]
    fn two_digit_formatting() {
        assert_eq!(Money::from_cents(5).format(2), "0,05\u{a0}€");
        assert_eq!(Money::from_cents(1_000_050).format(2), "10.000,50\u{a0}€");
        assert_eq!(Money::from_cents(-250).format(2), "-2,50\u{a0}€");
    }

    #[test]
    fn plain_numbers_group_like_es_es() {
        assert_eq!(format_plain_number(0.0), "0");
        assert_eq!(format_plain_number(2500.4), "2500");
        assert_eq!(format_plain_number(15000.6), "15.001");
        assert_eq!(format_whole_euros(12000.0), "12.000\u{a0}€");
    }

    #[test]
    fn whole_euros_round_the_value_once() {
        assert_eq!(format_whole_euros(2.4951), "2\u{a0}€");
        assert_eq!(format_whole_euros(2.495), "2\u{a0}€");
        assert_eq!(format_whole_euros(2.5), "3\u{a0}€");
        assert_eq!(format_whole_euros(12_344.996), "12.345\u{a0}€");
        assert_eq!(format_whole_euros(-2.4951), "-2\u{a0}€");
    }

    #[test]
    fn step_actions_parse() {
        assert_eq!(QuantityStep::from_action("increment"), Some(QuantityStep::Increment));
        assert_eq!(QuantityStep::from_action("decrement"), Some(QuantityStep::Decrement));
        assert_eq!(QuantityStep::from_action("double"), None);
        assert_eq!(QuantityStep::Decrement.action(), "decrement");
    }
}
