//! Request controller for the dashboard.
//!
//! The controller is the single authority over [`ControllerState`]: user
//! intents come in, [`FetchCommand`]s go out, and completed fetches are fed
//! back through [`Controller::apply`]. The controller itself never awaits
//! anything; the only suspension point is [`perform`], which couples a
//! command to a [`DashboardApi`] implementation. That split keeps every
//! state transition synchronous and deterministic.

use crate::{
    client::DashboardApi,
    error::FetchError,
    model::{ConversionResult, CurrencyForm, Quotation, WeatherReading, WidgetKind},
};

/// Per-widget monotonically increasing request token. A completed fetch is
/// applied only if its token is still the latest issued for its widget, so a
/// late arrival can never overwrite the result of a newer request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestToken(u64);

/// Successful payload, tagged by widget.
#[derive(Debug, Clone)]
pub enum WidgetData {
    Weather(WeatherReading),
    Currency(ConversionResult),
    Quote(Quotation),
}

impl WidgetData {
    pub fn kind(&self) -> WidgetKind {
        match self {
            WidgetData::Weather(_) => WidgetKind::Weather,
            WidgetData::Currency(_) => WidgetKind::Currency,
            WidgetData::Quote(_) => WidgetKind::Quote,
        }
    }
}

/// Fetch lifecycle of a single widget.
///
/// `Success` doubles as the session cache: it is kept until the next
/// completed fetch for the same widget overwrites it. There is no TTL and
/// no explicit eviction.
#[derive(Debug, Clone)]
pub enum RequestState {
    Idle,
    Loading { token: RequestToken },
    Success(WidgetData),
    Failed { message: String },
}

impl RequestState {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading { .. })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RequestState::Success(_))
    }
}

/// What the controller wants fetched.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchRequest {
    Weather { city: String },
    Quote,
    Convert { amount: f64, from: String, to: String },
}

/// An outbound request the IO driver must execute via [`perform`].
#[derive(Debug, Clone, PartialEq)]
pub struct FetchCommand {
    pub widget: WidgetKind,
    pub token: RequestToken,
    pub request: FetchRequest,
}

/// Result of an executed command, fed back into [`Controller::apply`].
#[derive(Debug)]
pub struct FetchOutcome {
    pub widget: WidgetKind,
    pub token: RequestToken,
    pub result: Result<WidgetData, FetchError>,
}

/// Fields of the currency form a user can edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrencyField {
    Amount,
    From,
    To,
}

/// Read-only view-model the presentation layer renders from.
#[derive(Debug, Clone)]
pub struct ControllerState {
    pub active: Option<WidgetKind>,
    pub search_input: String,
    pub currency_form: CurrencyForm,
    weather: RequestState,
    currency: RequestState,
    quote: RequestState,
}

impl ControllerState {
    fn new() -> Self {
        Self {
            active: None,
            search_input: String::new(),
            currency_form: CurrencyForm::default(),
            weather: RequestState::Idle,
            currency: RequestState::Idle,
            quote: RequestState::Idle,
        }
    }

    pub fn request_state(&self, kind: WidgetKind) -> &RequestState {
        match kind {
            WidgetKind::Weather => &self.weather,
            WidgetKind::Currency => &self.currency,
            WidgetKind::Quote => &self.quote,
        }
    }

    fn request_state_mut(&mut self, kind: WidgetKind) -> &mut RequestState {
        match kind {
            WidgetKind::Weather => &mut self.weather,
            WidgetKind::Currency => &mut self.currency,
            WidgetKind::Quote => &mut self.quote,
        }
    }
}

/// User-facing error text is fixed per widget; the classified cause only
/// goes to the log.
fn failure_message(kind: WidgetKind) -> &'static str {
    match kind {
        WidgetKind::Weather => "Unable to fetch weather data",
        WidgetKind::Currency => "Conversion failed",
        WidgetKind::Quote => "Unable to fetch quote",
    }
}

const INVALID_AMOUNT_MESSAGE: &str = "Please enter a valid amount";

#[derive(Debug)]
pub struct Controller {
    state: ControllerState,
    default_city: String,
    // Latest issued token per widget, in WidgetKind::all() order.
    issued: [u64; 3],
}

impl Controller {
    pub fn new(default_city: impl Into<String>) -> Self {
        Self {
            state: ControllerState::new(),
            default_city: default_city.into(),
            issued: [0; 3],
        }
    }

    /// Snapshot for the presentation layer. All mutation goes through the
    /// intent methods below.
    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    fn slot(kind: WidgetKind) -> usize {
        match kind {
            WidgetKind::Weather => 0,
            WidgetKind::Currency => 1,
            WidgetKind::Quote => 2,
        }
    }

    /// Transition the widget to `Loading` and hand back the command, so the
    /// loading indicator is observable before the request is dispatched.
    fn issue(&mut self, widget: WidgetKind, request: FetchRequest) -> FetchCommand {
        let slot = Self::slot(widget);
        self.issued[slot] += 1;
        let token = RequestToken(self.issued[slot]);

        *self.state.request_state_mut(widget) = RequestState::Loading { token };
        log::debug!("issuing {widget} fetch, token {}", token.0);

        FetchCommand { widget, token, request }
    }

    /// Select a widget (or `None` to return to the selector view).
    ///
    /// Weather and Quote auto-fetch the first time they are opened while
    /// still `Idle`; any cached `Success` (or a pending `Loading` or
    /// previous `Failed`) suppresses the automatic fetch. Currency is
    /// driven purely by explicit submission.
    pub fn select_widget(&mut self, kind: Option<WidgetKind>) -> Option<FetchCommand> {
        self.state.active = kind;

        match kind {
            Some(WidgetKind::Weather)
                if matches!(self.state.weather, RequestState::Idle) =>
            {
                let city = self.default_city.clone();
                Some(self.issue(WidgetKind::Weather, FetchRequest::Weather { city }))
            }
            Some(WidgetKind::Quote) if matches!(self.state.quote, RequestState::Idle) => {
                Some(self.issue(WidgetKind::Quote, FetchRequest::Quote))
            }
            _ => None,
        }
    }

    /// Explicit city search: always re-fetches, overriding any cached
    /// reading, and switches to the weather widget. Blank input is a no-op
    /// and leaves the active widget unchanged.
    pub fn submit_search(&mut self, city: &str) -> Option<FetchCommand> {
        let trimmed = city.trim();
        if trimmed.is_empty() {
            return None;
        }

        self.state.search_input = trimmed.to_string();
        self.state.active = Some(WidgetKind::Weather);
        Some(self.issue(WidgetKind::Weather, FetchRequest::Weather { city: trimmed.to_string() }))
    }

    /// "New quote": always re-fetches.
    pub fn refresh_quote(&mut self) -> FetchCommand {
        self.issue(WidgetKind::Quote, FetchRequest::Quote)
    }

    /// Pure form edit, never triggers a request.
    pub fn update_currency_form(&mut self, field: CurrencyField, value: impl Into<String>) {
        let value = value.into();
        match field {
            CurrencyField::Amount => self.state.currency_form.amount = value,
            CurrencyField::From => self.state.currency_form.from = value,
            CurrencyField::To => self.state.currency_form.to = value,
        }
    }

    /// Submit the currency form. Invalid amounts are rejected locally and
    /// never reach the adapter.
    pub fn convert_currency(&mut self) -> Option<FetchCommand> {
        let amount = match self.state.currency_form.parse_amount() {
            Ok(amount) => amount,
            Err(err) => {
                log::warn!("rejected conversion input: {err}");
                *self.state.request_state_mut(WidgetKind::Currency) = RequestState::Failed {
                    message: INVALID_AMOUNT_MESSAGE.to_string(),
                };
                return None;
            }
        };

        let from = self.state.currency_form.from.clone();
        let to = self.state.currency_form.to.clone();
        Some(self.issue(WidgetKind::Currency, FetchRequest::Convert { amount, from, to }))
    }

    /// Apply a completed fetch. Outcomes whose token is no longer the
    /// latest issued for their widget are discarded; the widget already
    /// reflects a newer request.
    pub fn apply(&mut self, outcome: FetchOutcome) {
        let latest = self.issued[Self::slot(outcome.widget)];
        let RequestToken(token) = outcome.token;
        if token != latest {
            log::debug!(
                "discarding stale {} response (token {token}, latest {latest})",
                outcome.widget
            );
            return;
        }

        let next = match outcome.result {
            Ok(data) => RequestState::Success(data),
            Err(err) => {
                log::warn!("{} fetch failed ({}): {err}", outcome.widget, err.kind());
                RequestState::Failed { message: failure_message(outcome.widget).to_string() }
            }
        };

        *self.state.request_state_mut(outcome.widget) = next;
    }
}

/// Execute a command against the adapter. The sole suspension point of the
/// whole controller flow.
pub async fn perform(cmd: FetchCommand, api: &dyn DashboardApi) -> FetchOutcome {
    let result = match &cmd.request {
        FetchRequest::Weather { city } => api.weather(city).await.map(WidgetData::Weather),
        FetchRequest::Quote => api.random_quote().await.map(WidgetData::Quote),
        FetchRequest::Convert { amount, from, to } => {
            api.convert(*amount, from, to).await.map(WidgetData::Currency)
        }
    };

    FetchOutcome { widget: cmd.widget, token: cmd.token, result }
}
