use std::io;
use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
    MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, Widget};

use golembook::app::App;
use golembook::book::navigation::Step;
use golembook::config::Config;
use golembook::event::{AppEvent, EventHandler};
use golembook::logging;
use golembook::ui::components::book_spread::BookSpread;
use golembook::ui::components::status_bar::{FooterBar, HeaderBar};
use golembook::ui::theme::Theme;

#[derive(Parser)]
#[command(name = "golembook", version, about = "Terminal guide book of buildable golems")]
struct Cli {
    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(short, long, help = "Catalog file (.toml or .json)")]
    catalog: Option<String>,

    #[arg(long, help = "Write logs to this file")]
    log_file: Option<String>,

    #[arg(long, help = "List available themes and exit")]
    list_themes: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.list_themes {
        for name in Theme::available_themes() {
            println!("{name}");
        }
        return Ok(());
    }

    let (mut config, config_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(err) => (Config::default(), Some(err)),
    };
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    if let Some(catalog) = cli.catalog {
        config.catalog_path = Some(catalog);
    }
    if let Some(log_file) = cli.log_file {
        config.log_file = log_file;
    }

    let _log_guard = match logging::init(Path::new(&config.log_file)) {
        Ok(guard) => Some(guard),
        Err(err) => {
            eprintln!("warning: logging disabled: {err:#}");
            None
        }
    };
    if let Some(err) = config_error {
        tracing::warn!(
            path = %Config::config_path().display(),
            "using default config: {err:#}"
        );
    }

    let theme = Theme::load(&config.theme).unwrap_or_else(|| {
        tracing::warn!(theme = %config.theme, "unknown theme, using default");
        Theme::default()
    });
    let theme: &'static Theme = Box::leak(Box::new(theme));
    let tick_rate = Duration::from_millis(config.tick_rate_ms);
    let mut app = App::new(config, theme);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let size = terminal.size()?;
    app.resize(Rect::new(0, 0, size.width, size.height));

    let events = EventHandler::new(tick_rate);

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        tracing::error!("exiting on error: {err:#}");
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Mouse(mouse) => handle_mouse(app, mouse),
            AppEvent::Tick => app.tick(),
            AppEvent::Resize(w, h) => app.resize(Rect::new(0, 0, w, h)),
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Right | KeyCode::PageDown | KeyCode::Char('l') | KeyCode::Char('n') => {
            app.step(Step::Forward)
        }
        KeyCode::Left | KeyCode::PageUp | KeyCode::Char('h') | KeyCode::Char('p') => {
            app.step(Step::Back)
        }
        KeyCode::Home | KeyCode::Char('g') => app.go_to_start(),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_rows(-1),
        KeyCode::Down | KeyCode::Char('j') => app.scroll_rows(1),
        KeyCode::Char(ch @ '1'..='5') => app.open_index_row(ch as usize - '1' as usize),
        KeyCode::Char('r') => app.reload(),
        _ => {}
    }
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            app.press(mouse.column, mouse.row);
            app.hover(mouse.column, mouse.row);
        }
        MouseEventKind::Drag(MouseButton::Left) => app.drag(mouse.row),
        MouseEventKind::Up(MouseButton::Left) => app.release(),
        MouseEventKind::ScrollDown => app.wheel(1),
        MouseEventKind::ScrollUp => app.wheel(-1),
        MouseEventKind::Moved => app.hover(mouse.column, mouse.row),
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let layout = &app.layout;

    Block::default()
        .style(Style::default().bg(app.theme.colors.bg()))
        .render(area, frame.buffer_mut());

    frame.render_widget(HeaderBar::new(&app.navigator, app.theme), layout.header);

    let spread =
        BookSpread::new(&app.navigator, layout, app.clock(), app.theme).hovered(app.hovered);
    frame.render_widget(spread, area);

    frame.render_widget(
        FooterBar::new(app.status.as_deref(), app.theme),
        layout.footer,
    );
}
