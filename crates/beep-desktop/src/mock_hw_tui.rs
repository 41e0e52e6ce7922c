use std::io;
use std::sync::mpsc::{Receiver, Sender, channel};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;
use std::time::{Duration, Instant};

use beep_core::consts;
use beep_core::engine::Engine;
use beep_core::gfx::RingGeometry;
use beep_core::rings::RingPhase;
use beep_core::sequencer::SequencerState;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
        MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{Level, LevelFilter, Metadata, Record};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Block, Borders, Clear, Gauge, List, ListItem, Paragraph,
        canvas::{Canvas, Circle, Context},
    },
};

const POLL_INTERVAL: Duration = Duration::from_millis(16);
const MAX_LOGS: usize = 100;

/// How fast the mock accelerometer settles back to rest, per second.
const ACCEL_DECAY_PER_SEC: f32 = 2.0;

/// Radius step used to fill the core and thicken rings on the canvas.
const RADIUS_STEP: f64 = 1.5;

const RING_COLOR: Color = Color::Rgb(184, 38, 89);
const TITLE_COLOR: Color = Color::Rgb(162, 241, 202);
const BACKGROUND_COLOR: Color = Color::Rgb(10, 18, 34);

// Shared sensor state, read by the main loop every frame
#[derive(Clone, Debug, Default)]
pub struct MockSensorState {
    pub accelerometer: f32, // Movement intensity (0.0 - 1.0)
}

/// What the panel shows of the engine, refreshed every frame.
#[derive(Clone, Debug)]
pub struct ViewSnapshot {
    pub sequencer: SequencerState,
    pub opacities: Vec<f32>,
    pub phase: RingPhase,
    pub alert_visible: bool,
    pub confusion_taps: u8,
    pub beeps: u32,
}

impl ViewSnapshot {
    pub fn capture(engine: &Engine) -> Self {
        let scene = engine.scene();
        Self {
            sequencer: scene.sequencer().state(),
            opacities: scene.rings().opacities().to_vec(),
            phase: scene.rings().phase(),
            alert_visible: scene.alert().is_visible(),
            confusion_taps: scene.confusion().taps(),
            beeps: engine.beep_count(),
        }
    }
}

/// Input from the panel for the main loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelEvent {
    Tap,
    ShowLayers,
    Quit,
}

#[derive(Default)]
struct Shared {
    sensor: MockSensorState,
    view: Option<ViewSnapshot>,
}

fn lock(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    // a panic on the other side doesn't make a float and a snapshot unusable
    shared.lock().unwrap_or_else(|e| e.into_inner())
}

/// One line in the panel's log pane.
#[derive(Clone, Debug)]
pub struct LogEntry {
    pub level: Level,
    pub message: String,
}

// Extension trait for log::Level to provide UI rendering methods
trait LevelExt {
    fn color(&self) -> Color;
    fn prefix(&self) -> &str;
}

impl LevelExt for Level {
    fn color(&self) -> Color {
        match *self {
            Level::Error => Color::Red,
            Level::Warn => Color::Yellow,
            Level::Info => Color::Cyan,
            Level::Debug => Color::Gray,
            Level::Trace => Color::DarkGray,
        }
    }

    fn prefix(&self) -> &str {
        match *self {
            Level::Error => "[ERROR]",
            Level::Warn => "[WARN] ",
            Level::Info => "[INFO] ",
            Level::Debug => "[DEBUG]",
            Level::Trace => "[TRACE]",
        }
    }
}

// TUI state
struct TuiState {
    shared: Arc<Mutex<Shared>>,
    geometry: RingGeometry,
    logs: Vec<LogEntry>,
    rx: Receiver<TuiMessage>,
    events_tx: Sender<PanelEvent>,
    should_quit: bool,
}

impl TuiState {
    fn new(
        shared: Arc<Mutex<Shared>>,
        geometry: RingGeometry,
        rx: Receiver<TuiMessage>,
        events_tx: Sender<PanelEvent>,
    ) -> Self {
        Self {
            shared,
            geometry,
            logs: Vec::new(),
            rx,
            events_tx,
            should_quit: false,
        }
    }

    fn collect_messages(&mut self) {
        // Collect all pending messages
        while let Ok(msg) = self.rx.try_recv() {
            match msg {
                TuiMessage::Log(log) => {
                    self.logs.push(log);
                    if self.logs.len() > MAX_LOGS {
                        self.logs.remove(0);
                    }
                }
                TuiMessage::Shutdown => {
                    self.should_quit = true;
                }
            }
        }
    }

    fn shake(&self) {
        lock(&self.shared).sensor.accelerometer = 1.0;
    }

    fn adjust_accelerometer(&self, increase: bool) {
        let delta = if increase { 0.1 } else { -0.1 };
        let mut shared = lock(&self.shared);
        shared.sensor.accelerometer = (shared.sensor.accelerometer + delta).clamp(0.0, 1.0);
    }

    /// Lets the mock device come to rest a little.
    fn settle(&self, elapsed: Duration) {
        let mut shared = lock(&self.shared);
        let decay = ACCEL_DECAY_PER_SEC * elapsed.as_secs_f32();
        shared.sensor.accelerometer = (shared.sensor.accelerometer - decay).max(0.0);
    }

    fn send(&self, event: PanelEvent) {
        // the main loop may already be gone
        let _ = self.events_tx.send(event);
    }
}

// Shutdown signal for TUI
enum TuiMessage {
    Log(LogEntry),
    Shutdown,
}

// Logger implementation that sends logs to the TUI
pub struct TuiLogger {
    tx: Sender<TuiMessage>,
    max_level: LevelFilter,
}

impl TuiLogger {
    fn new(tx: Sender<TuiMessage>, max_level: LevelFilter) -> Self {
        Self { tx, max_level }
    }
}

impl log::Log for TuiLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.max_level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let entry = LogEntry {
                level: record.level(),
                message: format!("{}", record.args()),
            };
            // Ignore send errors (TUI might have shut down)
            let _ = self.tx.send(TuiMessage::Log(entry));
        }
    }

    fn flush(&self) {}
}

// Public handle for the TUI
pub struct MockHwTui {
    shared: Arc<Mutex<Shared>>,
    tx: Sender<TuiMessage>,
    events_rx: Receiver<PanelEvent>,
}

impl MockHwTui {
    pub fn new(geometry: RingGeometry, max_level: LevelFilter) -> Result<Self, anyhow::Error> {
        let shared = Arc::new(Mutex::new(Shared::default()));
        let (tx, rx) = channel();
        let (events_tx, events_rx) = channel();

        let shared_clone = Arc::clone(&shared);

        // Spawn TUI thread
        thread::spawn(move || {
            let quit_tx = events_tx.clone();
            let state = TuiState::new(shared_clone, geometry, rx, events_tx);
            if let Err(e) = run_tui(state) {
                eprintln!("TUI error: {}", e);
            }
            let _ = quit_tx.send(PanelEvent::Quit);
        });

        // Try to initialize the logger, but don't fail if one is already set
        let logger = TuiLogger::new(tx.clone(), max_level);
        if log::set_boxed_logger(Box::new(logger)).is_ok() {
            log::set_max_level(max_level);
        }

        Ok(Self {
            shared,
            tx,
            events_rx,
        })
    }

    pub fn shutdown(&self) {
        let _ = self.tx.send(TuiMessage::Shutdown);
        // Give the TUI thread time to clean up
        std::thread::sleep(std::time::Duration::from_millis(100));
    }

    /// Panel input gathered since the last call.
    pub fn events(&self) -> impl Iterator<Item = PanelEvent> + '_ {
        self.events_rx.try_iter()
    }

    pub fn accelerometer(&self) -> f32 {
        lock(&self.shared).sensor.accelerometer
    }

    pub fn publish(&self, view: ViewSnapshot) {
        lock(&self.shared).view = Some(view);
    }
}

impl Drop for MockHwTui {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run_tui(mut tui_state: TuiState) -> Result<(), io::Error> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    tui_state.logs.push(LogEntry {
        level: Level::Info,
        message: "Shake with S, tap with Space or a click".to_string(),
    });

    let mut last_frame = Instant::now();

    loop {
        tui_state.collect_messages();

        // Check if we should quit
        if tui_state.should_quit {
            break;
        }

        tui_state.settle(last_frame.elapsed());
        last_frame = Instant::now();

        terminal.draw(|f| ui(f, &tui_state))?;

        // Poll for events with timeout
        if event::poll(POLL_INTERVAL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        log::info!("Ctrl+C pressed, shutting down");
                        break;
                    }
                    KeyCode::Char('s') => tui_state.shake(),
                    KeyCode::Char(' ') => tui_state.send(PanelEvent::Tap),
                    KeyCode::Char('l') => tui_state.send(PanelEvent::ShowLayers),
                    KeyCode::Left | KeyCode::Char('-') => tui_state.adjust_accelerometer(false),
                    KeyCode::Right | KeyCode::Char('+') | KeyCode::Char('=') => {
                        tui_state.adjust_accelerometer(true)
                    }
                    _ => {}
                },
                Event::Mouse(mouse) if matches!(mouse.kind, MouseEventKind::Down(_)) => {
                    tui_state.send(PanelEvent::Tap);
                }
                _ => {}
            }
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}

fn ui(f: &mut Frame, state: &TuiState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(12),   // Display + side panel
            Constraint::Length(3), // Help
        ])
        .split(f.area());

    let title = Paragraph::new("Ominous Beeping")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, rows[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8), // Status
            Constraint::Length(3), // Accelerometer
            Constraint::Min(4),    // Logs
        ])
        .split(columns[1]);

    let shared = lock(&state.shared);

    render_display(f, columns[0], state, shared.view.as_ref());
    render_status(f, side[0], shared.view.as_ref());
    render_accelerometer(f, side[1], &shared.sensor);
    render_logs(f, side[2], state);

    let help = Paragraph::new(
        "S: shake | Space/click: tap | ←/→: nudge accelerometer | L: light all rings | Q/ESC/Ctrl+C: quit",
    )
    .style(Style::default().fg(Color::Gray))
    .block(Block::default().borders(Borders::ALL).title("Help"));
    f.render_widget(help, rows[2]);
}

fn render_display(f: &mut Frame, area: Rect, state: &TuiState, view: Option<&ViewSnapshot>) {
    let geometry = state.geometry;
    let opacities: &[f32] = view.map(|v| v.opacities.as_slice()).unwrap_or(&[]);

    let canvas = Canvas::default()
        .block(Block::default().borders(Borders::ALL).title("Display"))
        .background_color(BACKGROUND_COLOR)
        .marker(Marker::Braille)
        .x_bounds([0.0, consts::WIDTH as f64])
        .y_bounds([0.0, consts::HEIGHT as f64])
        .paint(|ctx| {
            paint_rings(ctx, &geometry, opacities);
            ctx.print(
                consts::WIDTH as f64 / 2.0 - 40.0,
                30.0,
                Span::styled(
                    "OMINOUS BEEPING APP",
                    Style::default().fg(TITLE_COLOR).add_modifier(Modifier::BOLD),
                ),
            );
        });
    f.render_widget(canvas, area);

    if view.is_some_and(|v| v.alert_visible) {
        let popup = centered(area, 34, 6);
        let text = vec![
            Line::from(Span::styled(
                beep_core::scenes::alert::TITLE,
                Style::default().fg(TITLE_COLOR).add_modifier(Modifier::BOLD),
            )),
            Line::from(beep_core::scenes::alert::MESSAGE.replace('\n', " ")),
            Line::from(Span::styled(
                "[ OK: tap ]",
                Style::default().fg(RING_COLOR),
            )),
        ];
        let alert = Paragraph::new(text)
            .style(Style::default().fg(TITLE_COLOR).bg(BACKGROUND_COLOR))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(Clear, popup);
        f.render_widget(alert, popup);
    }
}

fn paint_rings(ctx: &mut Context, geometry: &RingGeometry, opacities: &[f32]) {
    let x = geometry.center().x as f64;
    // the canvas y axis points up, the display's points down
    let y = (consts::HEIGHT as i32 - geometry.center().y) as f64;

    for (index, opacity) in opacities.iter().enumerate() {
        if *opacity <= 0.0 {
            continue;
        }

        let (inner, outer) = if index == 0 {
            (0.0, geometry.core_radius() as f64)
        } else {
            let radius = geometry.ring_radius(index) as f64;
            let half_stroke = geometry.stroke_width() as f64 / 2.0;
            (radius - half_stroke, radius + half_stroke)
        };

        let mut radius = inner;
        while radius <= outer {
            ctx.draw(&Circle {
                x,
                y,
                radius,
                color: RING_COLOR,
            });
            radius += RADIUS_STEP;
        }
    }
}

fn render_status(f: &mut Frame, area: Rect, view: Option<&ViewSnapshot>) {
    let block = Block::default().borders(Borders::ALL).title("Status");

    let lines = match view {
        None => vec![Line::from("waiting for the first frame")],
        Some(view) => {
            let beeping = if view.sequencer.running {
                Span::styled("beeping", Style::default().fg(RING_COLOR).add_modifier(Modifier::BOLD))
            } else {
                Span::raw("idle")
            };
            let rate = if view.sequencer.rate_divisor == 1 {
                "every tick"
            } else {
                "every 2nd tick"
            };
            vec![
                Line::from(vec![Span::raw("State:      "), beeping]),
                Line::from(format!("Tick:       {}", view.sequencer.tick_count)),
                Line::from(format!("Beep rate:  {}", rate)),
                Line::from(format!("Rings:      {:?}", view.phase)),
                Line::from(format!("Beeps:      {}", view.beeps)),
                Line::from(format!("Idle taps:  {}", view.confusion_taps)),
            ]
        }
    };

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_accelerometer(f: &mut Frame, area: Rect, sensor: &MockSensorState) {
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Accelerometer"))
        .gauge_style(Style::default().fg(Color::Yellow))
        .ratio(sensor.accelerometer.clamp(0.0, 1.0) as f64)
        .label(format!("{:.2}", sensor.accelerometer));
    f.render_widget(gauge, area);
}

fn render_logs(f: &mut Frame, area: Rect, state: &TuiState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Logs (scrolls automatically)");

    let inner = block.inner(area);
    f.render_widget(block, area);

    // Show last N logs that fit in the area
    let max_logs = inner.height as usize;
    let start_idx = state.logs.len().saturating_sub(max_logs);

    let log_items: Vec<ListItem> = state.logs[start_idx..]
        .iter()
        .map(|log| {
            let content = Line::from(vec![
                Span::styled(log.level.prefix(), Style::default().fg(log.level.color())),
                Span::raw(" "),
                Span::raw(&log.message),
            ]);
            ListItem::new(content)
        })
        .collect();

    f.render_widget(List::new(log_items), inner);
}

/// A `width` x `height` rectangle in the middle of `area`, clipped to it.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_is_inside() {
        let area = Rect::new(10, 5, 40, 20);
        let popup = centered(area, 34, 6);
        assert_eq!(popup, Rect::new(13, 12, 34, 6));

        let tiny = centered(Rect::new(0, 0, 10, 3), 34, 6);
        assert_eq!(tiny, Rect::new(0, 0, 10, 3));
    }

    #[test]
    fn accelerometer_settles_to_rest() {
        let (_tx, rx) = channel();
        let (events_tx, _events_rx) = channel();
        let shared = Arc::new(Mutex::new(Shared::default()));
        let state = TuiState::new(
            Arc::clone(&shared),
            RingGeometry::for_screen(3),
            rx,
            events_tx,
        );

        state.shake();
        assert_eq!(lock(&shared).sensor.accelerometer, 1.0);

        state.settle(Duration::from_millis(250));
        assert!((lock(&shared).sensor.accelerometer - 0.5).abs() < 0.001);

        state.settle(Duration::from_secs(2));
        assert_eq!(lock(&shared).sensor.accelerometer, 0.0);
    }
}
