//! Powerdex - paginated creature stat table on tui-dispatch

use std::cell::RefCell;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Frame, Terminal};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem};

use powerdex::action::Action;
use powerdex::components::{Component, PowerDisplay, PowerDisplayProps};
use powerdex::effect::Effect;
use powerdex::loader::{self, DataSource, DEFAULT_DATA_PATH};
use powerdex::reducer::reducer;
use powerdex::state::AppState;
use powerdex::view::{ExtremaScope, PageSize};

/// Browse a creature dataset with name search, power threshold and paging
#[derive(Parser, Debug)]
#[command(name = "powerdex")]
#[command(about = "Paginated, filterable creature stat table")]
struct Args {
    /// Dataset location: a JSON file path or an http(s) URL
    #[arg(long, default_value = DEFAULT_DATA_PATH)]
    data: String,

    /// Rows per page (10, 25 or 100)
    #[arg(long, default_value = "10", value_parser = parse_page_size)]
    page_size: PageSize,

    /// Records the min/max power line covers: "page" or "filtered"
    #[arg(long, default_value = "page", value_parser = parse_extrema_scope)]
    extrema_scope: ExtremaScope,

    /// Log file path
    #[arg(long, default_value = "/tmp/powerdex.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(flatten)]
    debug: DebugCliArgs,
}

fn parse_page_size(value: &str) -> Result<PageSize, String> {
    value
        .trim()
        .parse::<usize>()
        .ok()
        .and_then(PageSize::from_rows)
        .ok_or_else(|| format!("page size must be one of 10, 25, 100 (got '{value}')"))
}

fn parse_extrema_scope(value: &str) -> Result<ExtremaScope, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "page" => Ok(ExtremaScope::Page),
        "filtered" => Ok(ExtremaScope::Filtered),
        _ => Err(format!("expected 'page' or 'filtered' (got '{value}')")),
    }
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum PowerComponentId {
    Display,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum PowerContext {
    Table,
    Input,
}

impl EventRoutingState<PowerComponentId, PowerContext> for AppState {
    fn focused(&self) -> Option<PowerComponentId> {
        Some(PowerComponentId::Display)
    }

    fn modal(&self) -> Option<PowerComponentId> {
        None
    }

    fn binding_context(&self, _id: PowerComponentId) -> PowerContext {
        if self.focus.is_editing() {
            PowerContext::Input
        } else {
            PowerContext::Table
        }
    }

    fn default_context(&self) -> PowerContext {
        PowerContext::Table
    }
}

/// Route log output to a file; the terminal belongs to the UI.
fn setup_tracing(args: &Args) -> WorkerGuard {
    let log_level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("powerdex={log_level}")));

    let log_dir = args
        .log_file
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or(std::path::Path::new("."));
    let log_filename = args
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("powerdex.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    guard
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();
    let _log_guard = setup_tracing(&args);

    let Args {
        data,
        page_size,
        extrema_scope,
        debug: debug_args,
        ..
    } = args;
    let source = DataSource::parse(&data);
    tracing::info!(%source, rows = page_size.rows(), "starting powerdex");

    let debug = DebugSession::new(debug_args);

    let state = debug
        .load_state_or_else_async(move || async move {
            Ok::<AppState, io::Error>(AppState::new(source, page_size, extrema_scope))
        })
        .await
        .map_err(debug_error)?;

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, replay_actions).await;

    // ===== Cleanup =====
    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug
        .save_actions(action_recorder.as_ref())
        .map_err(debug_error)?;

    Ok(())
}

struct PowerUi {
    display: PowerDisplay,
}

impl PowerUi {
    fn new() -> Self {
        Self {
            display: PowerDisplay::new(),
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<PowerComponentId>,
    ) {
        event_ctx.set_component_area(PowerComponentId::Display, area);
        let props = PowerDisplayProps {
            state,
            is_focused: render_ctx.is_focused(),
        };
        self.display.render(frame, area, props);
    }

    fn handle_display_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let props = PowerDisplayProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = self
            .display
            .handle_event(event, props)
            .into_iter()
            .collect();
        if actions.is_empty() && !state.focus.is_editing() {
            HandlerResponse::ignored()
        } else {
            // Inputs swallow every key, even ones that change nothing
            HandlerResponse {
                actions,
                consumed: true,
                needs_render: false,
            }
        }
    }
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(PowerUi::new()));
    let mut bus: EventBus<AppState, Action, PowerComponentId, PowerContext> = EventBus::new();
    let keybindings: Keybindings<PowerContext> = Keybindings::new();

    let ui_display = Rc::clone(&ui);
    bus.register(PowerComponentId::Display, move |event, state| {
        ui_display
            .borrow_mut()
            .handle_display_event(&event.kind, state)
    });

    // Re-render on terminal resize
    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(_, _) => HandlerResponse::ignored().with_render(),
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::DatasetFetch),
            Some(Action::Quit),
            |_runtime| {},
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            handle_effect,
        )
        .await
}

/// Handle effects by spawning tasks
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>) {
    match effect {
        Effect::LoadDataset { source } => {
            ctx.tasks().spawn("dataset", async move {
                match loader::load_dataset(&source).await {
                    Ok(records) => {
                        tracing::info!(%source, count = records.len(), "dataset loaded");
                        Action::DatasetDidLoad(records)
                    }
                    Err(e) => {
                        tracing::error!(%source, error = %e, "dataset load failed");
                        Action::DatasetDidError(e.to_string())
                    }
                }
            });
        }
    }
}
