//! Validation of the purchase form and the confirmation text shown on success.

use crate::pricing::{Money, TicketSettings};
use crate::utils::parse_leading_int;
use std::fmt;

/// Blocking prompt shown whenever the form is incomplete.
pub const INCOMPLETE_FORM_MESSAGE: &str = "Por favor, completa todos los campos antes de continuar.";

const FOLLOW_UP_LINE: &str =
    "En breve recibirás un correo con los métodos de pago y tus números del sorteo.";

/// Raw contents of the purchase form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PurchaseForm {
    pub name: String,
    pub email: String,
    pub quantity_text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionError {
    MissingName,
    MissingEmail,
    InvalidQuantity,
}

impl fmt::Display for SubmissionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // One prompt covers every case; the variant is kept for logging.
        write!(f, "{}", INCOMPLETE_FORM_MESSAGE)
    }
}

impl std::error::Error for SubmissionError {}

/// Accepted purchase, ready to be shown to the buyer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub name: String,
    pub quantity: u32,
    pub total: Money,
    pub message: String,
}

/// `"1 boleto"`, `"3 boletos"`.
pub fn ticket_noun(quantity: u32) -> String {
    if quantity == 1 {
        format!("{} boleto", quantity)
    } else {
        format!("{} boletos", quantity)
    }
}

/// Check the form and build the confirmation.
///
/// The form itself is never modified, so a rejected submission leaves every
/// field in place for correction.
pub fn submit(form: &PurchaseForm, settings: &TicketSettings) -> Result<Confirmation, SubmissionError> {
    let name = form.name.trim();
    if name.is_empty() {
        return Err(SubmissionError::MissingName);
    }
    if form.email.trim().is_empty() {
        return Err(SubmissionError::MissingEmail);
    }
    let parsed = parse_leading_int(&form.quantity_text).ok_or(SubmissionError::InvalidQuantity)?;

    let quantity = settings.clamp(parsed);
    let total = settings.total_for(quantity);
    let message = [
        format!("¡Gracias, {}!", name),
        format!(
            "Has reservado {} por un total de {}.",
            ticket_noun(quantity),
            settings.format_money(total)
        ),
        FOLLOW_UP_LINE.to_string(),
    ]
    .join("\n");

    Ok(Confirmation {
        name: name.to_string(),
        quantity,
        total,
        message,
    })
}
