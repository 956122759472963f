use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use inquire::{InquireError, Select, Text};

use infodash_core::{
    ApiClient, Config, Controller, CurrencyField, DisplayMode, FetchCommand, WidgetKind, perform,
};

use crate::render::render_widget;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "infodash", version, about = "Information dashboard CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show weather for a city (default city from config if omitted).
    Weather {
        city: Option<String>,
    },

    /// Show a random quotation.
    Quote,

    /// Convert an amount between currencies.
    Convert {
        /// Amount to convert.
        amount: Option<String>,

        /// Source currency code, e.g. "INR".
        #[arg(long)]
        from: Option<String>,

        /// Target currency code, e.g. "USD".
        #[arg(long)]
        to: Option<String>,
    },

    /// Run the interactive dashboard.
    Dashboard,

    /// Show or update the stored configuration.
    Configure {
        /// Base address of the dashboard API.
        #[arg(long)]
        base_url: Option<String>,

        /// City fetched automatically when the weather widget first opens.
        #[arg(long)]
        default_city: Option<String>,

        /// Navigation style: "back-button" or "persistent-nav".
        #[arg(long)]
        display_mode: Option<String>,

        /// Request timeout in seconds.
        #[arg(long)]
        timeout_secs: Option<u64>,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let config = Config::load()?;

        match self.command {
            Command::Weather { city } => {
                let mut session = Session::new(config)?;
                let cmd = match city {
                    Some(city) => session.controller.submit_search(&city),
                    None => session.controller.select_widget(Some(WidgetKind::Weather)),
                };
                session.dispatch(cmd).await;
                render_widget(session.controller.state(), WidgetKind::Weather);
            }
            Command::Quote => {
                let mut session = Session::new(config)?;
                let cmd = session.controller.select_widget(Some(WidgetKind::Quote));
                session.dispatch(cmd).await;
                render_widget(session.controller.state(), WidgetKind::Quote);
            }
            Command::Convert { amount, from, to } => {
                let mut session = Session::new(config)?;
                let ctl = &mut session.controller;
                if let Some(amount) = amount {
                    ctl.update_currency_form(CurrencyField::Amount, amount);
                }
                if let Some(from) = from {
                    ctl.update_currency_form(CurrencyField::From, from);
                }
                if let Some(to) = to {
                    ctl.update_currency_form(CurrencyField::To, to);
                }
                let cmd = session.controller.convert_currency();
                session.dispatch(cmd).await;
                render_widget(session.controller.state(), WidgetKind::Currency);
            }
            Command::Dashboard => {
                let session = Session::new(config)?;
                run_dashboard(session).await?;
            }
            Command::Configure { base_url, default_city, display_mode, timeout_secs } => {
                configure(config, base_url, default_city, display_mode, timeout_secs)?;
            }
        }

        Ok(())
    }
}

/// One controller plus its HTTP adapter, alive for a single CLI invocation
/// or interactive run. Widget data is never persisted across sessions.
struct Session {
    controller: Controller,
    api: ApiClient,
    display_mode: DisplayMode,
}

impl Session {
    fn new(config: Config) -> Result<Self> {
        let api = ApiClient::from_config(&config)
            .context("Failed to construct HTTP client from configuration")?;

        Ok(Self {
            controller: Controller::new(config.default_city.clone()),
            api,
            display_mode: config.display_mode,
        })
    }

    /// Execute a command (if any) and feed the outcome back into the
    /// controller.
    async fn dispatch(&mut self, cmd: Option<FetchCommand>) {
        if let Some(cmd) = cmd {
            let outcome = perform(cmd, &self.api).await;
            self.controller.apply(outcome);
        }
    }
}

fn configure(
    mut config: Config,
    base_url: Option<String>,
    default_city: Option<String>,
    display_mode: Option<String>,
    timeout_secs: Option<u64>,
) -> Result<()> {
    let changed = base_url.is_some()
        || default_city.is_some()
        || display_mode.is_some()
        || timeout_secs.is_some();

    if let Some(base_url) = base_url {
        config.base_url = base_url;
    }
    if let Some(default_city) = default_city {
        config.default_city = default_city;
    }
    if let Some(mode) = display_mode {
        config.display_mode = DisplayMode::try_from(mode.as_str())?;
    }
    if let Some(timeout_secs) = timeout_secs {
        config.timeout_secs = timeout_secs;
    }

    if changed {
        config.save()?;
        println!("Configuration saved to {}", Config::config_file_path()?.display());
    } else {
        println!("base_url     = {}", config.base_url);
        println!("timeout_secs = {}", config.timeout_secs);
        println!("default_city = {}", config.default_city);
        println!("display_mode = {}", config.display_mode);
        println!("(file: {})", Config::config_file_path()?.display());
    }

    Ok(())
}

const CURRENCY_CHOICES: &[&str] = &["INR", "USD", "EUR"];

/// Prompt wrapper that turns Esc/Ctrl-C into `None` instead of an error.
fn prompt_select(prompt: &str, options: Vec<&'static str>) -> Result<Option<&'static str>> {
    match Select::new(prompt, options).prompt() {
        Ok(choice) => Ok(Some(choice)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

fn prompt_text(prompt: &str, initial: &str) -> Result<Option<String>> {
    match Text::new(prompt).with_initial_value(initial).prompt() {
        Ok(text) => Ok(Some(text)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

fn widget_menu(kind: WidgetKind, mode: DisplayMode) -> Vec<&'static str> {
    let mut items = match kind {
        WidgetKind::Weather => vec!["search city"],
        WidgetKind::Currency => vec!["convert"],
        WidgetKind::Quote => vec!["new quote"],
    };

    match mode {
        DisplayMode::BackButton => items.push("back"),
        DisplayMode::PersistentNav => {
            for other in WidgetKind::all() {
                if *other != kind {
                    items.push(other.as_str());
                }
            }
            items.push("quit");
        }
    }

    items
}

async fn run_dashboard(mut session: Session) -> Result<()> {
    println!("infodash — your information dashboard");

    loop {
        let selected = session.controller.state().active;
        let active = match selected {
            Some(kind) => kind,
            None => {
                let choices = vec!["weather", "currency", "quote", "quit"];
                let Some(choice) = prompt_select("Open a widget:", choices)? else {
                    return Ok(());
                };
                if choice == "quit" {
                    return Ok(());
                }

                let kind = WidgetKind::try_from(choice)?;
                let cmd = session.controller.select_widget(Some(kind));
                session.dispatch(cmd).await;
                kind
            }
        };

        render_widget(session.controller.state(), active);

        let menu = widget_menu(active, session.display_mode);
        let Some(action) = prompt_select(&format!("[{active}]"), menu)? else {
            // Cancelling a widget menu behaves like "back".
            session.controller.select_widget(None);
            if session.display_mode == DisplayMode::PersistentNav {
                return Ok(());
            }
            continue;
        };

        match action {
            "quit" => return Ok(()),
            "back" => {
                session.controller.select_widget(None);
            }
            "search city" => {
                let initial = session.controller.state().search_input.clone();
                if let Some(city) = prompt_text("City:", &initial)? {
                    let cmd = session.controller.submit_search(&city);
                    session.dispatch(cmd).await;
                }
            }
            "new quote" => {
                let cmd = session.controller.refresh_quote();
                session.dispatch(Some(cmd)).await;
            }
            "convert" => {
                run_conversion_form(&mut session).await?;
            }
            other => {
                // Direct jump to another widget (persistent navigation).
                let kind = WidgetKind::try_from(other)?;
                let cmd = session.controller.select_widget(Some(kind));
                session.dispatch(cmd).await;
            }
        }
    }
}

async fn run_conversion_form(session: &mut Session) -> Result<()> {
    let form = session.controller.state().currency_form.clone();

    let Some(amount) = prompt_text("Amount:", &form.amount)? else {
        return Ok(());
    };
    let Some(from) = prompt_select("From:", CURRENCY_CHOICES.to_vec())? else {
        return Ok(());
    };
    let Some(to) = prompt_select("To:", CURRENCY_CHOICES.to_vec())? else {
        return Ok(());
    };

    session.controller.update_currency_form(CurrencyField::Amount, amount);
    session.controller.update_currency_form(CurrencyField::From, from);
    session.controller.update_currency_form(CurrencyField::To, to);

    let cmd = session.controller.convert_currency();
    session.dispatch(cmd).await;

    Ok(())
}
