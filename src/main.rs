//! Browser entry point for the concert promotion page.
//! Mounts the ticket widget and wires reveal animations and decorative
//! effects onto the static markup.

use log::{info, warn};
use promo_tickets::config::WIDGET_ROOT_ID;
use promo_tickets::TicketSettings;
use yew::prelude::*;

mod components;
mod dom;
mod hooks;
mod logger;
mod page;
mod reveal;

use components::TicketWidget;
use dom::PageElements;
use page::PageEffects;

#[derive(Properties, PartialEq)]
pub struct AppProps {
    pub settings: TicketSettings,
}

/// Root component rendered into the `#purchase-widget` host.
#[function_component]
pub fn App(props: &AppProps) -> Html {
    html! {
        <TicketWidget settings={props.settings} />
    }
}

/// Entry point: configuration, motion preference, then every component.
fn main() {
    console_error_panic_hook::set_once();
    logger::init(log::LevelFilter::Info);

    let config = dom::read_config();
    log::set_max_level(config.log_level);
    info!(
        "Tickets {}..={} at {}",
        config.tickets.min,
        config.tickets.max,
        config.tickets.format_money(config.tickets.unit_price)
    );

    let motion = dom::watch_reduced_motion();

    match dom::element_by_id(WIDGET_ROOT_ID) {
        Some(root) => {
            yew::Renderer::<App>::with_root_and_props(
                root,
                AppProps {
                    settings: config.tickets,
                },
            )
            .render();
        }
        None => warn!("No #{} element, ticket widget not mounted", WIDGET_ROOT_ID),
    }

    let mut elements = PageElements::collect();
    let reveals = std::mem::take(&mut elements.reveals);
    reveal::install(reveals, &config.effects, motion.clone());
    page::install(PageEffects::new(elements, config.effects, motion));
}
