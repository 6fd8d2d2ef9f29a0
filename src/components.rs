//! Yew components for the ticket purchase widget.

use crate::dom;
use crate::hooks::use_ticket_order;
use log::{debug, info};
use promo_tickets::checkout::{submit, PurchaseForm};
use promo_tickets::{QuantityStep, TicketSettings};
use web_sys::HtmlInputElement;
use yew::prelude::*;

/// A `±` button; the action is also exposed as `data-action` for styling.
#[derive(Properties, PartialEq)]
pub struct TicketControlProps {
    pub step: QuantityStep,
    pub onstep: Callback<QuantityStep>,
}

#[function_component(TicketControl)]
pub fn ticket_control(props: &TicketControlProps) -> Html {
    let (label, aria) = match props.step {
        QuantityStep::Increment => ("+", "Añadir un boleto"),
        QuantityStep::Decrement => ("−", "Quitar un boleto"),
    };
    let onclick = {
        let onstep = props.onstep.clone();
        let step = props.step;
        Callback::from(move |_: MouseEvent| onstep.emit(step))
    };
    html! {
        <button type="button"
            class="ticket-control"
            data-action={props.step.action()}
            aria-label={aria}
            {onclick}
        >
            { label }
        </button>
    }
}

/// Text field bound to a string state.
#[derive(Properties, PartialEq)]
pub struct TextFieldProps {
    pub id: AttrValue,
    pub label: AttrValue,
    pub kind: AttrValue,
    pub value: AttrValue,
    pub oninput: Callback<InputEvent>,
}

#[function_component(TextField)]
pub fn text_field(props: &TextFieldProps) -> Html {
    html! {
        <div class="form-group">
            <label for={props.id.clone()}>{ props.label.clone() }</label>
            <input id={props.id.clone()}
                name={props.id.clone()}
                type={props.kind.clone()}
                value={props.value.clone()}
                oninput={props.oninput.clone()}
            />
        </div>
    }
}

fn text_setter(state: &UseStateHandle<String>) -> Callback<InputEvent> {
    let state = state.clone();
    Callback::from(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        state.set(input.value());
    })
}

#[derive(Properties, PartialEq)]
pub struct TicketWidgetProps {
    pub settings: TicketSettings,
}

/// Quantity picker, running total and the reservation form.
#[function_component(TicketWidget)]
pub fn ticket_widget(props: &TicketWidgetProps) -> Html {
    let settings = props.settings;
    let ticket = use_ticket_order(settings);
    let name = use_state(String::new);
    let email = use_state(String::new);
    let quantity_ref = use_node_ref();

    let onsubmit = {
        let name = name.clone();
        let email = email.clone();
        let quantity_ref = quantity_ref.clone();
        let quantity = ticket.order.quantity();
        let reset = ticket.reset.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let quantity_text = quantity_ref
                .cast::<HtmlInputElement>()
                .map(|input| input.value())
                .unwrap_or_else(|| quantity.to_string());
            let form = PurchaseForm {
                name: (*name).clone(),
                email: (*email).clone(),
                quantity_text,
            };

            match submit(&form, &settings) {
                Ok(confirmation) => {
                    info!(
                        "Reserved {} tickets for {}",
                        confirmation.quantity,
                        settings.format_money(confirmation.total)
                    );
                    dom::notify(&confirmation.message);
                    name.set(String::new());
                    email.set(String::new());
                    reset.emit(());
                }
                Err(err) => {
                    debug!("Purchase rejected: {:?}", err);
                    dom::notify(&err.to_string());
                }
            }
        })
    };

    html! {
        <form id="purchase-form" class="purchase-form" novalidate={true} {onsubmit}>
            <TextField id="name" label="Nombre" kind="text"
                value={(*name).clone()} oninput={text_setter(&name)} />
            <TextField id="email" label="Correo electrónico" kind="email"
                value={(*email).clone()} oninput={text_setter(&email)} />

            <div class="form-group">
                <label for="tickets">{ "Boletos" }</label>
                <div class="ticket-picker">
                    <TicketControl step={QuantityStep::Decrement} onstep={ticket.on_step.clone()} />
                    <input id="tickets"
                        name="tickets"
                        type="number"
                        inputmode="numeric"
                        ref={quantity_ref}
                        min={settings.min.to_string()}
                        max={settings.max.to_string()}
                        value={ticket.order.quantity().to_string()}
                        oninput={ticket.on_input.clone()}
                    />
                    <TicketControl step={QuantityStep::Increment} onstep={ticket.on_step.clone()} />
                </div>
            </div>

            <p class="ticket-total">
                { "Total: " }
                <output id="total" for="tickets">{ ticket.order.total_label() }</output>
            </p>

            <button type="submit" class="btn-primary">{ "Reservar boletos" }</button>
        </form>
    }
}
