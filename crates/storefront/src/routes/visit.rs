//! Appointment calendar and booking.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::Redirect,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use nutribook_core::DATE_FORMAT;

use crate::error;
use crate::filters;
use crate::middleware::{OptionalAuth, RequireAuth};
use crate::models::{FlashLevel, flash};
use crate::routes::PageContext;
use crate::services::{BookingOutcome, BookingService};
use crate::state::AppState;

/// `/visit` query string.
#[derive(Debug, Default, Deserialize)]
pub struct VisitQuery {
    /// `YYYY-MM-DD`; today when absent.
    pub date: Option<String>,
    /// Preselected slot, echoed back to the form.
    pub time: Option<String>,
}

/// Booking form data.
#[derive(Debug, Deserialize)]
pub struct BookForm {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
}

/// One free slot as rendered.
#[derive(Debug, Clone)]
pub struct SlotView {
    pub time: String,
    pub selected: bool,
}

/// Visit calendar template.
#[derive(Template, WebTemplate)]
#[template(path = "visit.html")]
pub struct VisitTemplate {
    pub page: PageContext,
    pub selected_date: String,
    pub slots: Vec<SlotView>,
}

fn today() -> String {
    chrono::Local::now().date_naive().format(DATE_FORMAT).to_string()
}

/// Show the free slots for a day.
///
/// Served for both GET and POST; the date always comes from the query string.
/// Pending flashes are only drained once the page is sure to render.
#[instrument(skip(state, user, session))]
pub async fn show(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    session: Session,
    Query(query): Query<VisitQuery>,
) -> error::Result<VisitTemplate> {
    let selected_date = query
        .date
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
        .unwrap_or_else(today);

    let slots = BookingService::new(state.pool())
        .available_slots(&selected_date)
        .await?
        .into_iter()
        .map(|time| SlotView {
            selected: query.time.as_deref() == Some(time.as_str()),
            time,
        })
        .collect();

    Ok(VisitTemplate {
        page: PageContext::new(user, &session).await,
        selected_date,
        slots,
    })
}

/// Reserve a slot for the logged-in user.
///
/// The submitted time is not checked against the day's candidate hours;
/// only an exact `(date, time)` clash is refused.
#[instrument(skip(state, user, session), fields(user_id = %user.id))]
pub async fn book(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
    Form(form): Form<BookForm>,
) -> error::Result<Redirect> {
    let date = form.date.trim();
    let time = form.time.trim();
    if date.is_empty() || time.is_empty() {
        flash::push(&session, FlashLevel::Danger, "Please choose a date and a time.").await;
        return Ok(Redirect::to("/visit"));
    }

    match BookingService::new(state.pool())
        .book(user.id, date, time)
        .await?
    {
        BookingOutcome::Booked(visit) => {
            flash::push(
                &session,
                FlashLevel::Success,
                format!(
                    "Visit booked for {} at {}! A payment link has been sent to your email.",
                    visit.date, visit.time
                ),
            )
            .await;
        }
        BookingOutcome::SlotTaken => {
            flash::push(
                &session,
                FlashLevel::Danger,
                "That slot is already taken. Please choose another one.",
            )
            .await;
        }
    }

    Ok(Redirect::to("/account"))
}
