//! CryptoVault landing page in the terminal.
//!
//! Run with: `cargo run --bin cryptovault`
//!
//! Scroll with the wheel, arrow keys or `j`/`k`; click a nav item or press
//! `1`-`7` to jump to a section. Press `q` or Esc to quit.

use cryptovault::ansi::ColorMode;
use cryptovault::event::{LogLevel, set_event_callback, set_log_callback};
use cryptovault::input::{Event, InputParser, ResizeEvent};
use cryptovault::page::controls::event_action;
use cryptovault::page::{
    Breakpoint, Flow, LandingPage, PageConfig, RotationPolicy, SectionBounds, SectionId,
};
use cryptovault::terminal::{enable_raw_mode, is_tty, set_nonblocking, terminal_size};
use cryptovault::{FrameBuffer, HitGrid, Renderer, RendererOptions, emit_log};
use serde::Serialize;
use std::ffi::OsString;
use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

// ============================================================================
// CLI Parsing
// ============================================================================

const HELP_TEXT: &str = "cryptovault - CryptoVault landing page in the terminal

USAGE:
    cryptovault [OPTIONS]

OPTIONS:
    -h, --help              Print this help message and exit
    --fps <N>               Cap frames per second (default: 60)

    --no-mouse              Disable mouse tracking
    --no-alt-screen         Don't enter alternate screen
    --color <MODE>          Color output: truecolor, 256, 16, none
                            (default: detected from COLORTERM/TERM)

    --rotation-ms <N>       Testimonial rotation interval (default: 5000)
    --restart-rotation      Restart the rotation countdown on manual navigation
    --reference-units       Use the web page's pixel thresholds at 20 px per row

    --max-frames <N>        Exit after presenting N frames
    --log-file <PATH>       Write page events and diagnostics to PATH

    --headless              Render one frame to stdout (no TTY required)
    --headless-size <WxH>   Headless screen size (default: 80x24)
    --scroll <N>            Headless: scroll offset in rows
    --section <ID>          Headless: jump to a section first (home, features,
                            demo, security, interactive, testimonials, download)
    --dump-json             Headless: print page state as JSON

KEYS:
    j/k, Up/Down            Scroll one row
    Space, PgUp/PgDn        Scroll one page
    g/G, Home/End           Top / bottom
    1-7                     Jump to a section
    h/l, Left/Right         Previous / next testimonial
    m                       Toggle the menu (narrow terminals)
    q, Esc, Ctrl+C          Quit

EXAMPLES:
    cryptovault                                  # Interactive mode
    cryptovault --rotation-ms 2000 --restart-rotation
    cryptovault --headless --headless-size 120x40 --section security
    cryptovault --headless --scroll 40 --dump-json
";

/// Application configuration parsed from command-line arguments.
#[derive(Clone, Debug)]
#[allow(clippy::struct_excessive_bools)]
pub struct Config {
    pub fps_cap: u32,

    // Renderer options
    pub enable_mouse: bool,
    pub use_alt_screen: bool,
    pub color_mode: Option<ColorMode>,

    // Page behavior
    pub rotation: Duration,
    pub restart_rotation: bool,
    pub reference_units: bool,

    // Deterministic termination
    pub max_frames: Option<u64>,
    pub log_file: Option<PathBuf>,

    // Headless
    pub headless: bool,
    pub headless_size: (u16, u16),
    pub scroll: Option<u32>,
    pub section: Option<SectionId>,
    pub dump_json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fps_cap: 60,
            enable_mouse: true,
            use_alt_screen: true,
            color_mode: None,
            rotation: Duration::from_millis(5000),
            restart_rotation: false,
            reference_units: false,
            max_frames: None,
            log_file: None,
            headless: false,
            headless_size: (80, 24),
            scroll: None,
            section: None,
            dump_json: false,
        }
    }
}

/// Result of CLI parsing.
pub enum ParseResult {
    /// Successfully parsed configuration.
    Config(Config),
    /// User requested help.
    Help,
    /// Parse error with message.
    Error(String),
}

impl Config {
    /// Parse configuration from command-line arguments.
    pub fn from_args<I>(args: I) -> ParseResult
    where
        I: IntoIterator<Item = OsString>,
    {
        match Self::parse(args) {
            Ok(Some(config)) => ParseResult::Config(config),
            Ok(None) => ParseResult::Help,
            Err(msg) => ParseResult::Error(msg),
        }
    }

    fn parse<I>(args: I) -> Result<Option<Self>, String>
    where
        I: IntoIterator<Item = OsString>,
    {
        let mut config = Self::default();
        let mut args = args.into_iter();

        // Skip program name
        args.next();

        while let Some(arg) = args.next() {
            let arg_str = arg.to_string_lossy();
            let mut value = |hint: &str| {
                args.next()
                    .map(|v| v.to_string_lossy().to_string())
                    .ok_or_else(|| format!("{arg_str} requires a value{hint}"))
            };

            match arg_str.as_ref() {
                "-h" | "--help" => return Ok(None),

                "--fps" => {
                    let v = value("")?;
                    match v.parse::<u32>() {
                        Ok(n) if n > 0 => config.fps_cap = n,
                        _ => return Err(format!("Invalid --fps value: {v} (must be positive integer)")),
                    }
                }

                "--no-mouse" => config.enable_mouse = false,
                "--no-alt-screen" => config.use_alt_screen = false,

                "--color" => {
                    let v = value(" (truecolor, 256, 16 or none)")?;
                    config.color_mode = Some(ColorMode::from_name(&v).ok_or_else(|| {
                        format!("Unknown --color: {v} (valid: truecolor, 256, 16, none)")
                    })?);
                }

                "--rotation-ms" => {
                    let v = value("")?;
                    match v.parse::<u64>() {
                        Ok(n) if n > 0 => config.rotation = Duration::from_millis(n),
                        _ => {
                            return Err(format!(
                                "Invalid --rotation-ms value: {v} (must be positive integer)"
                            ));
                        }
                    }
                }
                "--restart-rotation" => config.restart_rotation = true,
                "--reference-units" => config.reference_units = true,

                "--max-frames" => {
                    let v = value("")?;
                    let n = v
                        .parse::<u64>()
                        .map_err(|_| format!("Invalid --max-frames value: {v}"))?;
                    config.max_frames = Some(n);
                }

                "--log-file" => config.log_file = Some(PathBuf::from(value("")?)),

                "--headless" => config.headless = true,

                "--headless-size" => {
                    let v = value(" (e.g., 80x24)")?;
                    config.headless_size = parse_size(&v).ok_or_else(|| {
                        format!("Invalid --headless-size: {v} (use WxH format, e.g., 80x24)")
                    })?;
                }

                "--scroll" => {
                    let v = value("")?;
                    let n = v
                        .parse::<u32>()
                        .map_err(|_| format!("Invalid --scroll value: {v}"))?;
                    config.scroll = Some(n);
                }

                "--section" => {
                    let v = value("")?;
                    config.section = Some(v.parse().map_err(|e| format!("Invalid --section: {e}"))?);
                }

                "--dump-json" => config.dump_json = true,

                other => {
                    if other.starts_with('-') {
                        return Err(format!("Unknown option: {other}"));
                    }
                    // Positional arguments are ignored
                }
            }
        }

        Ok(Some(config))
    }

    #[must_use]
    pub fn page_config(&self) -> PageConfig {
        let mut page = if self.reference_units {
            PageConfig::reference()
        } else {
            PageConfig::terminal()
        };
        page.carousel.interval = self.rotation;
        page.carousel.policy = if self.restart_rotation {
            RotationPolicy::RestartOnManual
        } else {
            RotationPolicy::Independent
        };
        page
    }

    #[must_use]
    pub fn renderer_options(&self) -> RendererOptions {
        let defaults = RendererOptions::default();
        RendererOptions {
            use_alt_screen: self.use_alt_screen,
            enable_mouse: self.enable_mouse,
            color_mode: self.color_mode.unwrap_or(defaults.color_mode),
            ..defaults
        }
    }

    /// Get target frame duration.
    #[must_use]
    pub fn frame_duration(&self) -> Duration {
        Duration::from_micros(1_000_000 / u64::from(self.fps_cap))
    }
}

/// Parse a size string like "80x24" into (width, height).
fn parse_size(s: &str) -> Option<(u16, u16)> {
    let (w, h) = s.split_once('x')?;
    let w = w.parse::<u16>().ok()?;
    let h = h.parse::<u16>().ok()?;
    if w == 0 || h == 0 {
        return None;
    }
    Some((w, h))
}

// ============================================================================
// Logging
// ============================================================================

/// Route the page's event and log hooks into `tracing`, written to `path`.
///
/// Nothing is logged to the terminal the page is drawn on.
fn init_logging(path: &PathBuf) -> io::Result<()> {
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .try_init()
        .map_err(io::Error::other)?;

    set_event_callback(|name, data| {
        tracing::info!(target: "cryptovault::page", event = name, data, "page event");
    });
    set_log_callback(|level, message| match level {
        LogLevel::Debug => tracing::debug!(target: "cryptovault", "{message}"),
        LogLevel::Info => tracing::info!(target: "cryptovault", "{message}"),
        LogLevel::Warn => tracing::warn!(target: "cryptovault", "{message}"),
        LogLevel::Error => tracing::error!(target: "cryptovault", "{message}"),
    });
    Ok(())
}

// ============================================================================
// Entry Point
// ============================================================================

fn main() -> io::Result<()> {
    match Config::from_args(std::env::args_os()) {
        ParseResult::Config(config) => {
            if let Some(path) = &config.log_file {
                init_logging(path)?;
            }
            if config.headless {
                run_headless(&config)
            } else {
                run_interactive(&config)
            }
        }
        ParseResult::Help => {
            print!("{HELP_TEXT}");
            Ok(())
        }
        ParseResult::Error(msg) => {
            eprintln!("Error: {msg}");
            eprintln!("Run with --help for usage information.");
            std::process::exit(1);
        }
    }
}

// ============================================================================
// Headless Mode
// ============================================================================

#[derive(Serialize)]
struct SectionEntry {
    id: SectionId,
    #[serde(flatten)]
    bounds: SectionBounds,
}

/// Page state printed by `--dump-json`.
#[derive(Serialize)]
struct Snapshot {
    width: u32,
    height: u32,
    breakpoint: Breakpoint,
    document_height: u32,
    scroll: u32,
    active_section: SectionId,
    scroll_top_visible: bool,
    testimonial: usize,
    sections: Vec<SectionEntry>,
    lines: Vec<String>,
}

impl Snapshot {
    fn capture(page: &LandingPage, buffer: &FrameBuffer) -> Self {
        let (width, height) = page.size();
        Self {
            width,
            height,
            breakpoint: page.breakpoint(),
            document_height: page.layout().document_height(),
            scroll: page.scroll_offset(),
            active_section: page.active_section(),
            scroll_top_visible: page.scroll_top_visible(),
            testimonial: page.testimonial_index(),
            sections: page
                .section_bounds()
                .into_iter()
                .map(|(id, bounds)| SectionEntry { id, bounds })
                .collect(),
            lines: (0..buffer.height()).map(|y| buffer.row_text(y)).collect(),
        }
    }
}

/// Render a single frame without a terminal.
fn run_headless(config: &Config) -> io::Result<()> {
    let (width, height) = config.headless_size;
    let (width, height) = (u32::from(width), u32::from(height));
    let mut page = LandingPage::new(width, height, config.page_config()).map_err(io::Error::other)?;

    let mut now = Instant::now();
    page.mount(now);
    if let Some(offset) = config.scroll {
        page.scroll_to(offset, now);
    }
    if let Some(section) = config.section {
        page.jump_to_section(section, now);
        // let the smooth scroll land before drawing
        now += page.config().scroll.smooth_duration;
        page.tick(now);
    }

    let mut buffer = FrameBuffer::new(width, height);
    let mut hits = HitGrid::new(width, height);
    page.render(&mut buffer, &mut hits, now);
    emit_log(
        LogLevel::Info,
        &format!(
            "headless frame {width}x{height} scroll={} active={}",
            page.scroll_offset(),
            page.active_section()
        ),
    );

    if config.dump_json {
        let snapshot = Snapshot::capture(&page, &buffer);
        let json = serde_json::to_string_pretty(&snapshot).map_err(io::Error::other)?;
        println!("{json}");
    } else {
        println!("{}", buffer.to_plain_text());
    }
    page.teardown();
    Ok(())
}

// ============================================================================
// Interactive Mode
// ============================================================================

/// Run interactive mode with terminal.
fn run_interactive(config: &Config) -> io::Result<()> {
    if !is_tty(&io::stdout()) {
        eprintln!("Error: stdout is not a terminal");
        eprintln!();
        eprintln!("cryptovault requires an interactive terminal to run.");
        eprintln!("For non-interactive use, try: cryptovault --headless");
        std::process::exit(1);
    }

    // Fall back to 80x24 when the size is unknown.
    let (width, height) = terminal_size().unwrap_or((80, 24));
    let mut size = (u32::from(width), u32::from(height));

    let mut page = LandingPage::new(size.0, size.1, config.page_config()).map_err(io::Error::other)?;
    let mut renderer = Renderer::new(io::stdout(), size.0, size.1, config.renderer_options())?;
    renderer.set_title("CryptoVault")?;

    let _raw_guard = enable_raw_mode()?;
    set_nonblocking(&io::stdin())?;

    let mut parser = InputParser::new();
    let mut input_buf = [0u8; 256];
    let frame_duration = config.frame_duration();
    let mut frames: u64 = 0;

    page.mount(Instant::now());
    emit_log(LogLevel::Info, &format!("interactive session {}x{}", size.0, size.1));

    'frames: loop {
        let frame_start = Instant::now();

        // --- Input phase ---
        let mut events = match io::stdin().read(&mut input_buf) {
            Ok(n) => parser.feed(&input_buf[..n]),
            Err(e) if e.kind() == io::ErrorKind::WouldBlock && parser.has_pending() => {
                parser.flush_pending()
            }
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => Vec::new(),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => Vec::new(),
            Err(e) => return Err(e),
        };
        if let Ok((w, h)) = terminal_size() {
            let current = (u32::from(w), u32::from(h));
            if current != size {
                events.push(Event::Resize(ResizeEvent::new(w, h)));
            }
        }

        for event in &events {
            if let Event::Resize(resize) = event {
                size = (u32::from(resize.width), u32::from(resize.height));
                page.resize(size.0, size.1).map_err(io::Error::other)?;
                renderer.resize(size.0, size.1)?;
                emit_log(LogLevel::Debug, &format!("resized to {}x{}", size.0, size.1));
                continue;
            }
            let scroll = page.config().scroll;
            let Some(action) = event_action(event, |x, y| renderer.hit_test(x, y), &scroll) else {
                continue;
            };
            emit_log(LogLevel::Debug, &format!("action {action:?}"));
            if page.apply(action, frame_start) == Flow::Quit {
                break 'frames;
            }
        }

        // --- Update phase ---
        page.tick(frame_start);

        // --- Render phase ---
        let (buffer, hits) = renderer.frame();
        page.render(buffer, hits, frame_start);
        renderer.present()?;

        frames += 1;
        if config.max_frames.is_some_and(|max| frames >= max) {
            break;
        }

        // --- Frame pacing ---
        let frame_deadline = frame_start + frame_duration;
        let wake = page
            .next_deadline()
            .map_or(frame_deadline, |due| due.clamp(frame_start, frame_deadline));
        if let Some(remaining) = wake.checked_duration_since(Instant::now()) {
            std::thread::sleep(remaining);
        }
    }

    page.teardown();
    emit_log(
        LogLevel::Info,
        &format!("session ended after {frames} frames ({} full redraws)", renderer.stats().full_redraws),
    );
    renderer.cleanup()
}

// ============================================================================
// Tests
// ============================================================================
