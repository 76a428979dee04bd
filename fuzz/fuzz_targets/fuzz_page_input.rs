//! Fuzz target for the input pipeline of the landing page.
//!
//! Arbitrary terminal bytes are parsed, bound to actions and applied to a
//! small page, with a frame drawn after every chunk. Resize reports in the
//! input resize the page too, so layout is exercised at odd sizes.

#![no_main]

use cryptovault::input::{Event, InputParser};
use cryptovault::page::controls::event_action;
use cryptovault::page::{Flow, LandingPage, PageConfig};
use cryptovault::{FrameBuffer, HitGrid};
use libfuzzer_sys::fuzz_target;
use std::time::{Duration, Instant};

const MAX_SIDE: u16 = 300;

fuzz_target!(|data: &[u8]| {
    let Ok(mut page) = LandingPage::new(40, 12, PageConfig::terminal()) else {
        return;
    };
    let mut now = Instant::now();
    page.mount(now);
    let mut parser = InputParser::new();
    let mut buffer = FrameBuffer::new(40, 12);
    let mut hits = HitGrid::new(40, 12);

    for chunk in data.chunks(16) {
        now += Duration::from_millis(50);
        for event in parser.feed(chunk) {
            if let Event::Resize(resize) = event {
                let (w, h) = (resize.width.min(MAX_SIDE), resize.height.min(MAX_SIDE));
                if page.resize(u32::from(w), u32::from(h)).is_ok() {
                    buffer.resize(u32::from(w), u32::from(h));
                    hits.resize(u32::from(w), u32::from(h));
                }
                continue;
            }
            let scroll = page.config().scroll;
            if let Some(action) = event_action(&event, |x, y| hits.test(x, y), &scroll) {
                if page.apply(action, now) == Flow::Quit {
                    return;
                }
            }
        }
        page.tick(now);
        page.render(&mut buffer, &mut hits, now);
        assert!(page.scroll_offset() <= page.viewport().max_offset());
    }
});
