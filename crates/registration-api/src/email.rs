//! Confirmation message composition.
//!
//! Pure functions of the stored record. The body is Markdown with
//! hard-break trailing spaces; rendering to HTML is the mail relay's
//! concern.

use crate::store::Registration;

/// Fixed subject line for confirmation mail.
pub const CONFIRMATION_SUBJECT: &str = "Confirming your participation in Ubertech ’16";

/// Build the confirmation body for a stored registration.
///
/// Greets by name, lists selected events only when any were chosen, confirms
/// accommodation only when requested, states the assigned token, and closes
/// with the fixed signature. Deterministic for the same record.
pub fn compose_confirmation(registration: &Registration) -> String {
    let mut body = format!(
        "### Hello {},  \n\n\nThank you for participating in **Ubertech ’16**.  \n\n",
        registration.name
    );

    if !registration.events.is_empty() {
        body.push_str("You have participated in the following events:  \n\n");
        for event in &registration.events {
            body.push_str("* ");
            body.push_str(event);
            body.push_str("  \n");
        }
    }

    if registration.accommodation {
        body.push_str("  \n\nJust to confirm, you have applied for accommodation.  ");
    }

    body.push_str(&format!(
        "  \n\nYour token is **{}**.  \nKeep your token safe.  \n\n\nBest regards,  \nThe Ubertech Team",
        registration.token
    ));

    body
}
