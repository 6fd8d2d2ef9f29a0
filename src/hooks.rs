use promo_tickets::{QuantityStep, TicketOrder, TicketSettings};
use web_sys::HtmlInputElement;
use yew::prelude::*;

/// State and callbacks for the ticket quantity field.
#[derive(Clone)]
pub struct TicketOrderHandle {
    /// Current clamped order.
    pub order: TicketOrder,
    /// `oninput` for the quantity field. Clamps and writes the canonical
    /// value straight back into the field.
    pub on_input: Callback<InputEvent>,
    /// Increment/decrement controls.
    pub on_step: Callback<QuantityStep>,
    /// Back to the minimum quantity.
    pub reset: Callback<()>,
}

#[hook]
pub fn use_ticket_order(settings: TicketSettings) -> TicketOrderHandle {
    let order = use_state(|| TicketOrder::new(settings));

    let on_input = {
        let order = order.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = *order;
            let quantity = next.set_quantity(&input.value());
            // The vdom value may not change (e.g. "0" -> 1 while already 1),
            // so the field is corrected directly.
            input.set_value(&quantity.to_string());
            order.set(next);
        })
    };

    let on_step = {
        let order = order.clone();
        Callback::from(move |step: QuantityStep| {
            let mut next = *order;
            next.step(step);
            order.set(next);
        })
    };

    let reset = {
        let order = order.clone();
        Callback::from(move |_| {
            let mut next = *order;
            next.reset();
            order.set(next);
        })
    };

    // New bounds or price from the host page replace the order wholesale.
    {
        let order = order.clone();
        use_effect_with(settings, move |settings| {
            if order.settings() != settings {
                order.set(TicketOrder::new(*settings));
            }
            || ()
        });
    }

    TicketOrderHandle {
        order: *order,
        on_input,
        on_step,
        reset,
    }
}
