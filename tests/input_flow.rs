//! Raw terminal bytes through the parser and bindings into page state.
//!
//! Mirrors the interactive loop: feed bytes, resolve each event against the
//! hit grid of the frame on screen, apply the action, tick and redraw.

use cryptovault::input::{Event, InputParser};
use cryptovault::page::controls::event_action;
use cryptovault::page::{Flow, LandingPage, PageConfig, SectionId};
use cryptovault::{Renderer, RendererOptions};
use std::time::{Duration, Instant};

struct App {
    page: LandingPage,
    renderer: Renderer<Vec<u8>>,
    parser: InputParser,
    now: Instant,
}

impl App {
    fn new(width: u32, height: u32) -> Self {
        let mut page = LandingPage::new(width, height, PageConfig::terminal()).unwrap();
        let now = Instant::now();
        page.mount(now);
        let mut app = Self {
            page,
            renderer: Renderer::new(Vec::new(), width, height, RendererOptions::headless()).unwrap(),
            parser: InputParser::new(),
            now,
        };
        app.frame();
        app
    }

    fn frame(&mut self) {
        self.page.tick(self.now);
        let (buffer, hits) = self.renderer.frame();
        self.page.render(buffer, hits, self.now);
        self.renderer.present().unwrap();
    }

    /// Feed one read's worth of bytes; returns `Flow::Quit` if any event quit.
    fn input(&mut self, bytes: &[u8]) -> Flow {
        let mut events = self.parser.feed(bytes);
        events.extend(self.parser.flush_pending());
        self.dispatch(&events)
    }

    fn dispatch(&mut self, events: &[Event]) -> Flow {
        for event in events {
            if let Event::Resize(resize) = event {
                let (w, h) = (u32::from(resize.width), u32::from(resize.height));
                self.page.resize(w, h).unwrap();
                self.renderer.resize(w, h).unwrap();
                continue;
            }
            let scroll = self.page.config().scroll;
            let renderer = &self.renderer;
            if let Some(action) = event_action(event, |x, y| renderer.hit_test(x, y), &scroll) {
                if self.page.apply(action, self.now) == Flow::Quit {
                    return Flow::Quit;
                }
            }
        }
        Flow::Continue
    }

    /// Let animations finish and redraw.
    fn settle(&mut self) {
        self.now += Duration::from_millis(400);
        self.frame();
    }
}

/// SGR mouse report for a left press at a 0-based cell.
fn click(x: u32, y: u32) -> Vec<u8> {
    format!("\x1b[<0;{};{}M", x + 1, y + 1).into_bytes()
}

fn wheel_down(x: u32, y: u32) -> Vec<u8> {
    format!("\x1b[<65;{};{}M", x + 1, y + 1).into_bytes()
}

#[test]
fn digit_keys_jump_to_sections() {
    let mut app = App::new(100, 30);
    app.input(b"4");
    app.settle();
    assert_eq!(app.page.active_section(), SectionId::Security);

    app.input(b"1");
    app.settle();
    assert_eq!(app.page.active_section(), SectionId::Home);
    assert_eq!(app.page.scroll_offset(), 1);
}

#[test]
fn clicking_a_nav_item_jumps_there() {
    let mut app = App::new(100, 30);
    let slot = app.page.layout().header().nav_slot(SectionId::Demo).unwrap();
    app.input(&click(slot.x + 1, 1));
    assert!(app.page.is_animating());
    app.settle();
    assert_eq!(app.page.active_section(), SectionId::Demo);
}

#[test]
fn wheel_and_arrow_keys_scroll() {
    let mut app = App::new(80, 24);
    app.input(&wheel_down(10, 10));
    assert_eq!(app.page.scroll_offset(), 3);
    app.input(b"\x1b[B\x1b[B");
    assert_eq!(app.page.scroll_offset(), 5);
    app.input(b"\x1b[A");
    assert_eq!(app.page.scroll_offset(), 4);
    app.input(b" ");
    assert_eq!(app.page.scroll_offset(), 4 + 24 - 3);
}

#[test]
fn end_and_home_keys() {
    let mut app = App::new(80, 24);
    app.input(b"G");
    assert_eq!(app.page.scroll_offset(), app.page.viewport().max_offset());
    assert!(app.page.scroll_top_visible());

    app.input(b"g");
    app.settle();
    assert_eq!(app.page.scroll_offset(), 0);
    assert!(!app.page.scroll_top_visible());
}

#[test]
fn scroll_top_button_click() {
    let mut app = App::new(80, 24);
    app.input(b"G");
    app.frame();
    let (x, y, w, h) = app.page.layout().scroll_top_rect();
    app.input(&click(x + w / 2, y + h / 2));
    app.settle();
    assert_eq!(app.page.scroll_offset(), 0);
}

#[test]
fn clicks_under_the_header_hit_the_header() {
    let mut app = App::new(100, 30);
    // row 1 is the header even after scrolling
    app.input(b"\x1b[6~");
    app.frame();
    let brand = app.page.layout().header().brand;
    app.input(&click(brand.x, 1));
    app.settle();
    assert_eq!(app.page.scroll_offset(), 1);
    assert_eq!(app.page.active_section(), SectionId::Home);
}

#[test]
fn compact_menu_open_pick_and_close() {
    let mut app = App::new(60, 24);
    let toggle = app.page.layout().header().menu_toggle.unwrap();
    app.input(&click(toggle.x, 1));
    assert!(app.page.menu_open());
    app.frame();

    let (x, y, _, _) = app.page.layout().menu_rect();
    // sixth menu row is Testimonials
    app.input(&click(x + 2, y + 6));
    assert!(!app.page.menu_open());
    app.settle();
    assert_eq!(app.page.active_section(), SectionId::Testimonials);
}

#[test]
fn carousel_keys_wrap() {
    let mut app = App::new(100, 30);
    app.input(b"\x1b[D");
    assert_eq!(app.page.testimonial_index(), 2);
    app.input(b"ll");
    assert_eq!(app.page.testimonial_index(), 1);
}

#[test]
fn resize_report_relayouts_the_page() {
    let mut app = App::new(120, 30);
    app.input(b"\x1b[8;24;60t");
    assert_eq!(app.page.size(), (60, 24));
    assert!(app.page.layout().header().menu_toggle.is_some());
    app.frame();
    assert_eq!(app.renderer.size(), (60, 24));
}

#[test]
fn quit_keys() {
    for bytes in [&b"q"[..], b"\x1b", b"\x03"] {
        let mut app = App::new(80, 24);
        assert_eq!(app.input(bytes), Flow::Quit, "{bytes:?}");
    }
    let mut app = App::new(80, 24);
    assert_eq!(app.input(b"x"), Flow::Continue);
}
