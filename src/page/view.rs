//! Drawing the page into a frame buffer.
//!
//! Paint order: background, the document blocks visible through the
//! viewport, the fixed header, the menu overlay and the scroll-to-top button.
//! Document blocks are scissored below the header. Each clickable control
//! registers its screen area in the [`HitGrid`]; later registrations win, so
//! overlays shadow whatever they cover.

use crate::buffer::{BoxOptions, BoxStyle, ClipRect, FrameBuffer};
use crate::color::{Gradient, Rgba, palette};
use crate::page::LandingPage;
use crate::page::content::{self, CryptoPrice, SectionCopy};
use crate::page::controls::Control;
use crate::page::layout::{
    self, BUTTON_HEIGHT, Block, BlockKind, Breakpoint, FOOTER_COLUMN_WIDTH, GRID_ROW_GAP,
    HEADER_HEIGHT, INTRO_GAP, Metrics, PRICE_CARD_HEIGHT, SECTION_PAD,
};
use crate::page::section::SectionId;
use crate::renderer::HitGrid;
use crate::style::{Style, TextAttributes};
use crate::unicode::{display_width, truncate_to_width};
use std::f32::consts::TAU;
use std::time::Instant;

/// Color the hero copy fades into.
const HERO_FADE_TARGET: Rgba = palette::INDIGO_950;
const PULSE_PERIOD_SECS: f32 = 2.0;
const PULSE_LEVELS: f32 = 8.0;

/// Draw one frame of `page`.
pub fn render(page: &LandingPage, buffer: &mut FrameBuffer, hits: &mut HitGrid, now: Instant) {
    let (width, height) = buffer.size();
    buffer.clear_scissors();
    hits.clear();

    let elapsed = page
        .mounted_at()
        .map_or(0.0, |t| now.saturating_duration_since(t).as_secs_f32());
    draw_background(buffer, elapsed);

    buffer.push_scissor(ClipRect::new(
        0,
        HEADER_HEIGHT as i32,
        width,
        height.saturating_sub(HEADER_HEIGHT),
    ));
    {
        let mut doc = Doc {
            buffer: &mut *buffer,
            hits: &mut *hits,
            m: *page.layout().metrics(),
            scroll: i64::from(page.scroll_offset()),
            clip_top: HEADER_HEIGHT as i32,
            clip_bottom: height as i32,
        };
        for block in page.layout().blocks() {
            if doc.is_visible(block) {
                doc.draw_block(page, block);
            }
        }
    }
    buffer.pop_scissor();

    draw_header(page, buffer, hits);
    if page.menu_open() {
        draw_menu(page, buffer, hits);
    }
    if page.scroll_top_visible() {
        draw_scroll_top(page, buffer, hits);
    }
}

/// Hero copy opacity: fully visible at the top, gone after half a viewport.
#[must_use]
pub fn hero_opacity(scroll: u32, viewport_height: u32) -> f32 {
    let fade_rows = (viewport_height / 2).max(1);
    (1.0 - scroll as f32 / fade_rows as f32).clamp(0.0, 1.0)
}

/// Upward drift of the hero copy in rows.
///
/// Scaled like [`hero_opacity`]: 80 px over the first 500 px of scrolling
/// becomes `2/15` of a viewport over the first `5/6` of one.
#[must_use]
pub fn hero_drift(scroll: u32, viewport_height: u32) -> u32 {
    let span = (viewport_height * 5 / 6).max(1);
    scroll.min(span) * (viewport_height * 2 / 15) / span
}

/// Brightness of a pulsing background orb, quantized so idle frames repeat.
fn pulse(elapsed: f32, delay: f32) -> f32 {
    let phase = ((elapsed - delay).max(0.0) / PULSE_PERIOD_SECS).fract();
    let level = 0.75 + 0.25 * (TAU * phase).cos();
    (level * PULSE_LEVELS).round() / PULSE_LEVELS
}

// ============================================================================
// Background
// ============================================================================

struct Orb {
    /// Center as fractions of the screen.
    cx: f32,
    cy: f32,
    /// Horizontal radius as a fraction of the width.
    radius: f32,
    gradient: Gradient,
    delay: f32,
}

const ORBS: [Orb; 3] = [
    Orb {
        cx: 0.15,
        cy: 0.25,
        radius: 0.12,
        gradient: Gradient::new(
            palette::CYAN_500.with_alpha(0.2),
            palette::PURPLE_500.with_alpha(0.2),
        ),
        delay: 0.0,
    },
    Orb {
        cx: 0.8,
        cy: 0.45,
        radius: 0.16,
        gradient: Gradient::new(
            palette::PURPLE_500.with_alpha(0.15),
            palette::PINK_500.with_alpha(0.15),
        ),
        delay: 2.0,
    },
    Orb {
        cx: 0.4,
        cy: 0.8,
        radius: 0.14,
        gradient: Gradient::new(
            palette::TEAL_500.with_alpha(0.2),
            palette::CYAN_500.with_alpha(0.2),
        ),
        delay: 4.0,
    },
];

fn draw_background(buffer: &mut FrameBuffer, elapsed: f32) {
    let (width, height) = buffer.size();
    buffer.fill_gradient(0, 0, width, height, &palette::BACKGROUND);
    for orb in &ORBS {
        draw_orb(buffer, orb, pulse(elapsed, orb.delay));
    }
}

/// A soft-edged ellipse; cells are about twice as tall as wide.
fn draw_orb(buffer: &mut FrameBuffer, orb: &Orb, brightness: f32) {
    let (width, height) = buffer.size();
    let rx = orb.radius * width as f32;
    let ry = rx / 2.0;
    if rx < 1.0 || ry < 1.0 {
        return;
    }
    let px = orb.cx * width as f32;
    let py = orb.cy * height as f32;

    for y in (py - ry).floor() as i32..=(py + ry).ceil() as i32 {
        for x in (px - rx).floor() as i32..=(px + rx).ceil() as i32 {
            let dx = (x as f32 - px) / rx;
            let dy = (y as f32 - py) / ry;
            let d = dx * dx + dy * dy;
            if d > 1.0 {
                continue;
            }
            let color = orb
                .gradient
                .at((dx + 1.0) / 2.0)
                .multiply_alpha(brightness * (1.0 - d));
            buffer.fill_rect(x, y, 1, 1, color);
        }
    }
}

// ============================================================================
// Document blocks
// ============================================================================

#[derive(Clone, Copy)]
struct ButtonStyle {
    fill: Option<Gradient>,
    border: Rgba,
    label: Rgba,
}

/// Draws in document rows, shifted by the scroll offset.
struct Doc<'a> {
    buffer: &'a mut FrameBuffer,
    hits: &'a mut HitGrid,
    m: Metrics,
    scroll: i64,
    clip_top: i32,
    clip_bottom: i32,
}

impl Doc<'_> {
    fn y(&self, doc_y: u32) -> i32 {
        (i64::from(doc_y) - self.scroll).clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
    }

    fn is_visible(&self, block: &Block) -> bool {
        self.y(block.bottom()) > self.clip_top && self.y(block.top) < self.clip_bottom
    }

    fn centered_x(&self, width: u32) -> u32 {
        self.m.content_left + self.m.content_width.saturating_sub(width) / 2
    }

    fn text(&mut self, x: u32, doc_y: u32, text: &str, style: Style) -> u32 {
        let y = self.y(doc_y);
        self.buffer.draw_text(x as i32, y, text, style) as u32
    }

    fn gradient_text(&mut self, x: u32, doc_y: u32, text: &str, gradient: &Gradient) -> u32 {
        let y = self.y(doc_y);
        self.buffer
            .draw_gradient_text(x as i32, y, text, gradient, TextAttributes::BOLD) as u32
    }

    fn centered(&mut self, doc_y: u32, text: &str, style: Style) {
        let x = self.centered_x(display_width(text) as u32);
        self.text(x, doc_y, text, style);
    }

    fn fill(&mut self, x: u32, doc_y: u32, w: u32, h: u32, gradient: &Gradient) {
        let y = self.y(doc_y);
        self.buffer.fill_gradient(x as i32, y, w, h, gradient);
    }

    fn tint(&mut self, block: &Block, gradient: &Gradient) {
        let width = self.m.width;
        self.fill(0, block.top, width, block.height, gradient);
    }

    fn card(&mut self, x: u32, doc_y: u32, w: u32, h: u32, options: &BoxOptions) {
        let y = self.y(doc_y);
        self.buffer.draw_box(x as i32, y, w, h, options);
    }

    /// Register a hit area, clipped to the document viewport.
    fn control(&mut self, x: u32, doc_y: u32, w: u32, h: u32, control: Control) {
        let top = self.y(doc_y);
        let bottom = (i64::from(top) + i64::from(h)).min(i64::from(self.clip_bottom)) as i32;
        let top = top.max(self.clip_top);
        if bottom > top {
            self.hits
                .register(x as i32, top, w, (bottom - top) as u32, control.hit_id());
        }
    }

    fn button(&mut self, x: u32, doc_y: u32, w: u32, label: &str, style: ButtonStyle) {
        let mut options = BoxOptions::new(BoxStyle::rounded(Style::fg(style.border)));
        if let Some(fill) = style.fill {
            options = options.with_fill(fill);
        }
        self.card(x, doc_y, w, BUTTON_HEIGHT, &options);
        let label = truncate_to_width(label, w.saturating_sub(2) as usize);
        let lx = x + w.saturating_sub(display_width(&label) as u32) / 2;
        self.text(lx, doc_y + 1, &label, Style::fg(style.label).with_bold());
    }

    fn badge(&mut self, x: u32, doc_y: u32, label: &str, fill: &Gradient, fg: Rgba) {
        let label = format!(" {label} ");
        let w = display_width(&label) as u32;
        self.fill(x, doc_y, w, 1, fill);
        self.text(x, doc_y, &label, Style::fg(fg));
    }

    /// Badge, heading and lead paragraph; returns the rows used.
    fn intro(&mut self, doc_y: u32, copy: &SectionCopy, accent: bool) -> u32 {
        let mut y = doc_y;
        if !copy.badge.is_empty() {
            let w = display_width(copy.badge) as u32 + 2;
            let x = self.centered_x(w);
            self.badge(x, y, copy.badge, &palette::BADGE, palette::CYAN_300);
            y += 2;
        }

        let heading = truncate_to_width(copy.heading, self.m.content_width as usize);
        if accent {
            let x = self.centered_x(display_width(&heading) as u32);
            self.gradient_text(x, y, &heading, &palette::ACCENT);
        } else {
            self.centered(y, &heading, Style::fg(Rgba::WHITE).with_bold());
        }
        y += 2;

        for line in self.m.wrap(copy.body, self.m.text_width) {
            self.centered(y, &line, Style::fg(palette::SLATE_400));
            y += 1;
        }
        y - doc_y
    }

    /// Section padding and intro; returns the first content row.
    fn section(&mut self, block: &Block, copy: &SectionCopy, accent: bool) -> u32 {
        let y = block.top + SECTION_PAD;
        y + self.intro(y, copy, accent) + INTRO_GAP
    }

    /// Lay `count` cards out on the grid, calling `draw(doc, index, x, y, row_height)`.
    fn grid(&mut self, top: u32, card_heights: &[u32], mut draw: impl FnMut(&mut Self, usize, u32, u32, u32)) {
        let rows = self.m.grid_row_heights(card_heights);
        let columns = self.m.columns as usize;
        let mut y = top;
        for (row, &row_height) in rows.iter().enumerate() {
            for col in 0..columns {
                let index = row * columns + col;
                if index >= card_heights.len() {
                    break;
                }
                let x = self.m.column_x(col as u32);
                draw(self, index, x, y, row_height);
            }
            y += row_height + GRID_ROW_GAP;
        }
    }

    fn draw_block(&mut self, page: &LandingPage, block: &Block) {
        match block.kind {
            BlockKind::Hero => {
                let (scroll, vh) = (page.scroll_offset(), page.layout().viewport_height());
                self.hero(block, hero_opacity(scroll, vh), hero_drift(scroll, vh));
            }
            BlockKind::Market => self.market(block),
            BlockKind::Features => self.features(block),
            BlockKind::Demo => self.demos(block),
            BlockKind::Security => self.security(block),
            BlockKind::Interactive => self.interactive(block),
            BlockKind::Testimonials => self.testimonials(block, page.testimonial_index()),
            BlockKind::Download => self.download(block),
            BlockKind::Footer => self.footer(block),
        }
    }

    fn hero(&mut self, block: &Block, opacity: f32, drift: u32) {
        self.tint(
            block,
            &Gradient::with_via(
                palette::CYAN_500.with_alpha(0.1),
                palette::PURPLE_600.with_alpha(0.2),
                palette::PINK_500.with_alpha(0.1),
            ),
        );
        if opacity <= 0.0 {
            return;
        }

        let fade = |color: Rgba| HERO_FADE_TARGET.lerp(color, opacity);
        let m = self.m;
        let hero = content::HERO;
        let left = if m.breakpoint == Breakpoint::Wide {
            m.content_left
        } else {
            m.text_left()
        };
        let mut y = (block.top + HEADER_HEIGHT + SECTION_PAD).saturating_sub(drift);

        self.badge(
            left,
            y,
            &format!("◈ {}", hero.badge),
            &palette::BADGE.with_alpha(opacity),
            fade(palette::CYAN_300),
        );
        y += 2;

        let title = Style::fg(fade(Rgba::WHITE)).with_bold();
        let lead = self.text(left, y, hero.title_lead, title);
        let accent = Gradient::new(fade(palette::CYAN_400), fade(palette::PURPLE_400));
        self.gradient_text(left + lead, y, hero.title_accent, &accent);
        let tail = truncate_to_width(hero.title_tail, m.text_width as usize);
        self.text(left, y + 1, &tail, title);
        y += 3;

        for line in m.wrap(hero.body, m.text_width) {
            self.text(left, y, &line, Style::fg(fade(palette::SLATE_300)));
            y += 1;
        }
        y += 1;

        let (primary_w, secondary_w) = m.hero_button_widths();
        let primary = ButtonStyle {
            fill: Some(Gradient::new(fade(palette::CYAN_500), fade(palette::PURPLE_600))),
            border: fade(palette::CYAN_400),
            label: fade(Rgba::WHITE),
        };
        let secondary = ButtonStyle {
            fill: None,
            border: fade(palette::PURPLE_500),
            label: fade(palette::PURPLE_400),
        };
        let (sx, sy) = if m.hero_buttons_stacked() {
            (left, y + BUTTON_HEIGHT)
        } else {
            (left + primary_w + 2, y)
        };
        self.button(left, y, primary_w, hero.primary, primary);
        self.control(left, y, primary_w, BUTTON_HEIGHT, Control::HeroPrimary);
        self.button(sx, sy, secondary_w, hero.secondary, secondary);
        self.control(sx, sy, secondary_w, BUTTON_HEIGHT, Control::HeroSecondary);
        y = sy + BUTTON_HEIGHT + 1;

        let columns = m.price_columns();
        let card_w = m.price_card_width();
        for (i, price) in content::PRICES.iter().enumerate() {
            let (col, row) = (i as u32 % columns, i as u32 / columns);
            let x = left + col * (card_w + 2);
            let cy = y + row * (PRICE_CARD_HEIGHT + GRID_ROW_GAP);
            self.price_card(x, cy, card_w, price, &fade);
        }

        if m.breakpoint == Breakpoint::Wide {
            self.hologram(block, left + m.text_width + 4, &fade);
        }
    }

    fn price_card(&mut self, x: u32, doc_y: u32, w: u32, price: &CryptoPrice, fade: &impl Fn(Rgba) -> Rgba) {
        let options = BoxOptions::new(BoxStyle::rounded(Style::fg(fade(palette::PURPLE_500))))
            .with_fill(Gradient::new(fade(palette::INDIGO_900), fade(palette::PURPLE_900)));
        self.card(x, doc_y, w, PRICE_CARD_HEIGHT, &options);

        let inner = w.saturating_sub(4);
        let right = x + w.saturating_sub(2);
        let icon = price.icon.to_string();
        self.text(x + 2, doc_y + 1, &icon, Style::fg(fade(price.color.at(0.5))).with_bold());
        let name = truncate_to_width(price.name, inner.saturating_sub(2) as usize);
        let name_w = self.text(x + 4, doc_y + 1, &name, Style::fg(fade(Rgba::WHITE)).with_bold());
        let symbol_x = x + 5 + name_w;
        if symbol_x + display_width(price.symbol) as u32 <= right {
            self.text(symbol_x, doc_y + 1, price.symbol, Style::fg(fade(palette::SLATE_400)));
        }

        let amount = truncate_to_width(&format!("${}", price.price), inner as usize);
        let amount_w = self.text(x + 2, doc_y + 2, &amount, Style::fg(fade(Rgba::WHITE)).with_bold());
        let change_x = x + 3 + amount_w;
        if change_x + display_width(price.change) as u32 <= right {
            let color = if price.is_positive {
                palette::GREEN_400
            } else {
                palette::RED_400
            };
            self.text(change_x, doc_y + 2, price.change, Style::fg(fade(color)));
        }
    }

    /// Two rings around a coin glyph, standing in for the hero illustration.
    fn hologram(&mut self, block: &Block, area_left: u32, fade: &impl Fn(Rgba) -> Rgba) {
        let area_right = self.m.content_left + self.m.content_width;
        let area = area_right.saturating_sub(area_left);
        let max_ry = (block.height / 2).saturating_sub(HEADER_HEIGHT + 1);
        let rx = (area / 2).saturating_sub(2).min(16).min(max_ry * 2);
        let ry = rx / 2;
        if ry < 2 {
            return;
        }

        let cx = area_left + area / 2;
        let cy = block.top + block.height / 2;
        for (radius, glyph) in [(1.0_f32, "·"), (0.6, "∙")] {
            let (rx, ry) = (rx as f32 * radius, ry as f32 * radius);
            for dy in -(ry.ceil() as i32)..=ry.ceil() as i32 {
                for dx in -(rx.ceil() as i32)..=rx.ceil() as i32 {
                    let d = (dx as f32 / rx).powi(2) + (dy as f32 / ry).powi(2);
                    if !(0.8..=1.0).contains(&d) {
                        continue;
                    }
                    let color = fade(palette::ACCENT.at((dx as f32 / rx + 1.0) / 2.0));
                    let x = (cx as i32 + dx) as u32;
                    let y = (cy as i32 + dy) as u32;
                    self.text(x, y, glyph, Style::fg(color));
                }
            }
        }
        self.text(cx, cy, "₿", Style::fg(fade(palette::ORANGE_500)).with_bold());
    }

    fn market(&mut self, block: &Block) {
        // same tint as the header bar
        self.tint(block, &palette::HEADER);
        self.intro(block.top + SECTION_PAD, &content::MARKET, true);
    }

    fn features(&mut self, block: &Block) {
        self.tint(block, &palette::HEADER.with_alpha(0.375));
        let top = self.section(block, &content::FEATURES_INTRO, true);
        let heights: Vec<_> = content::FEATURES
            .iter()
            .map(|f| self.m.feature_card_height(f))
            .collect();
        self.grid(top, &heights, |doc, i, x, y, h| {
            let feature = &content::FEATURES[i];
            let w = doc.m.column_width;
            let options = BoxOptions::new(BoxStyle::rounded(Style::fg(palette::CARD_BORDER)))
                .with_fill(palette::CARD);
            doc.card(x, y, w, h, &options);

            let icon = feature.icon.to_string();
            doc.text(x + 2, y + 1, &icon, Style::fg(feature.gradient.at(0.5)).with_bold());
            let text_w = doc.m.card_text_width();
            let title = truncate_to_width(feature.title, text_w.saturating_sub(2) as usize);
            doc.text(x + 4, y + 1, &title, Style::fg(Rgba::WHITE).with_bold());
            for (row, line) in doc.m.wrap(feature.description, text_w).iter().enumerate() {
                doc.text(x + 2, y + 3 + row as u32, line, Style::fg(palette::SLATE_400));
            }
        });
    }

    fn demos(&mut self, block: &Block) {
        let top = self.section(block, &content::DEMO_INTRO, false);
        let heights: Vec<_> = content::DEMOS
            .iter()
            .map(|d| self.m.demo_card_height(d))
            .collect();
        self.grid(top, &heights, |doc, i, x, y, h| {
            let demo = &content::DEMOS[i];
            let w = doc.m.column_width;
            let options = BoxOptions::new(BoxStyle::rounded(Style::fg(palette::CARD_BORDER)))
                .with_fill(palette::CARD);
            doc.card(x, y, w, h, &options);

            let text_w = doc.m.card_text_width() as usize;
            let image = truncate_to_width(&format!("▣ {}", demo.image), text_w);
            doc.text(x + 2, y + 1, &image, Style::fg(palette::SLATE_600));
            let title = truncate_to_width(demo.title, text_w);
            doc.text(x + 2, y + 3, &title, Style::fg(Rgba::WHITE).with_bold());
            for (row, line) in doc.m.wrap(demo.description, text_w as u32).iter().enumerate() {
                doc.text(x + 2, y + 4 + row as u32, line, Style::fg(palette::SLATE_400));
            }
        });
    }

    fn security(&mut self, block: &Block) {
        self.tint(
            block,
            &Gradient::new(
                palette::CYAN_500.with_alpha(0.05),
                palette::PINK_500.with_alpha(0.05),
            ),
        );
        let mut y = self.section(block, &content::SECURITY_INTRO, false);
        let x = self.m.text_left();
        let text_w = self.m.security_item_text_width();
        for item in &content::SECURITY_ITEMS {
            let icon = item.icon.to_string();
            self.text(x + 1, y, &icon, Style::fg(item.color.at(0.5)).with_bold());
            let title = truncate_to_width(item.title, text_w as usize);
            self.text(x + 4, y, &title, Style::fg(Rgba::WHITE).with_bold());
            y += 1;
            for line in self.m.wrap(item.description, text_w) {
                self.text(x + 4, y, &line, Style::fg(palette::SLATE_400));
                y += 1;
            }
            y += 1;
        }
        self.caption(x, y, content::SECURITY_IMAGE);
    }

    fn interactive(&mut self, block: &Block) {
        let top = self.section(block, &content::INTERACTIVE_INTRO, false);
        let x = self.m.text_left();
        let steps = content::INTERACTIVE_POINTS.len();
        for (i, point) in content::INTERACTIVE_POINTS.iter().enumerate() {
            let y = top + i as u32;
            self.text(x, y, "●", Style::fg(palette::ACCENT.sample(i, steps)));
            let text = truncate_to_width(point, self.m.text_width.saturating_sub(2) as usize);
            self.text(x + 2, y, &text, Style::fg(palette::SLATE_300));
        }
        self.caption(x, top + steps as u32 + 1, content::INTERACTIVE_IMAGE);
    }

    fn caption(&mut self, x: u32, y: u32, image: &str) {
        let label = truncate_to_width(&format!("▣ {image}"), self.m.text_width as usize);
        self.text(x, y, &label, Style::fg(palette::SLATE_600));
    }

    fn testimonials(&mut self, block: &Block, index: usize) {
        let top = self.section(block, &content::TESTIMONIALS_INTRO, false);
        let Some(testimonial) = content::TESTIMONIALS.get(index) else {
            return;
        };

        let card_w = self.m.testimonial_card_width();
        let card_h = self.m.testimonial_card_height();
        let x = self.centered_x(card_w);
        let options = BoxOptions::new(BoxStyle::heavy(Style::fg(palette::PURPLE_500)))
            .with_fill(palette::CARD);
        self.card(x, top, card_w, card_h, &options);

        let center = |text: &str| x + card_w.saturating_sub(display_width(text) as u32) / 2;
        let stars = content::stars(testimonial.rating);
        self.text(center(&stars), top + 1, &stars, Style::fg(palette::YELLOW_400));
        for (row, line) in self.m.testimonial_quote(testimonial).iter().enumerate() {
            let style = Style::fg(palette::SLATE_300).with_attributes(TextAttributes::ITALIC);
            self.text(center(line), top + 3 + row as u32, line, style);
        }
        // quote area is sized for the longest testimonial
        let name_row = top + card_h - 3;
        self.text(center(testimonial.name), name_row, testimonial.name, Style::fg(Rgba::WHITE).with_bold());
        self.text(center(testimonial.role), name_row + 1, testimonial.role, Style::fg(palette::CYAN_400));

        let count = content::TESTIMONIALS.len() as u32;
        let nav_w = 3 + 2 + (2 * count - 1) + 2 + 3;
        let nav_x = self.centered_x(nav_w);
        let row = top + card_h + 1;
        let arrow = Style::fg(palette::SLATE_400);
        self.text(nav_x, row, "[‹]", arrow);
        self.control(nav_x, row, 3, 1, Control::CarouselPrev);
        for k in 0..count {
            let dot_x = nav_x + 5 + 2 * k;
            let color = if k as usize == index {
                palette::CYAN_400
            } else {
                palette::SLATE_600
            };
            self.text(dot_x, row, "●", Style::fg(color));
            self.control(dot_x, row, 1, 1, Control::CarouselDot(k as usize));
        }
        let next_x = nav_x + nav_w - 3;
        self.text(next_x, row, "[›]", arrow);
        self.control(next_x, row, 3, 1, Control::CarouselNext);
    }

    fn download(&mut self, block: &Block) {
        self.tint(
            block,
            &Gradient::new(
                palette::PURPLE_900.with_alpha(0.4),
                palette::CYAN_500.with_alpha(0.15),
            ),
        );
        let top = self.section(block, &content::DOWNLOAD_INTRO, false);
        let [app_w, play_w] = self.m.store_button_widths();
        let (app, play) = if self.m.store_buttons_stacked() {
            (
                (self.centered_x(app_w), top),
                (self.centered_x(play_w), top + BUTTON_HEIGHT + 1),
            )
        } else {
            let x = self.centered_x(app_w + 3 + play_w);
            ((x, top), (x + app_w + 3, top))
        };
        let [app_label, play_label] = content::STORE_BUTTONS;
        self.button(app.0, app.1, app_w, app_label, ButtonStyle {
            fill: Some(Gradient::new(Rgba::BLACK, Rgba::BLACK)),
            border: palette::SLATE_600,
            label: Rgba::WHITE,
        });
        self.button(play.0, play.1, play_w, play_label, ButtonStyle {
            fill: Some(Gradient::new(palette::GREEN_500, palette::GREEN_500)),
            border: palette::GREEN_400,
            label: Rgba::WHITE,
        });
    }

    fn footer(&mut self, block: &Block) {
        self.fill(0, block.top, self.m.width, block.height, &palette::FOOTER);
        let rule = "─".repeat(self.m.width as usize);
        self.text(0, block.top, &rule, Style::fg(palette::CARD_BORDER));

        let m = self.m;
        let x = m.content_left;
        let muted = Style::fg(palette::SLATE_400);
        let heading = Style::fg(Rgba::WHITE).with_bold();
        let mut y = block.top + 1;

        self.gradient_text(x, y, &layout::brand_label(), &palette::ACCENT);
        y += 1;
        for line in m.wrap(content::FOOTER_TAGLINE, m.text_width) {
            self.text(x, y, &line, muted);
            y += 1;
        }
        y += 1;

        let mut sx = x;
        for social in content::SOCIAL_LINKS {
            sx += self.text(sx, y, &format!("[{social}]"), muted) + 1;
        }
        y += 2;

        self.text(x, y, content::QUICK_LINKS_HEADING, heading);
        for (i, id) in content::QUICK_LINKS.iter().enumerate() {
            let row = y + 1 + i as u32;
            let w = self.text(x, row, id.display_name(), muted);
            self.control(x, row, w, 1, Control::FooterLink(*id));
        }

        let quick_rows = 1 + content::QUICK_LINKS.len() as u32;
        let resource_rows = 1 + content::RESOURCES.len() as u32;
        let (rx, ry, links_height) = if m.footer_columns_stacked() {
            (x, y + quick_rows + 1, quick_rows + 1 + resource_rows)
        } else {
            (x + FOOTER_COLUMN_WIDTH, y, quick_rows.max(resource_rows))
        };
        self.text(rx, ry, content::RESOURCES_HEADING, heading);
        for (i, resource) in content::RESOURCES.iter().enumerate() {
            self.text(rx, ry + 1 + i as u32, resource, muted);
        }
        y += links_height + 1;

        let divider = "─".repeat(m.content_width as usize);
        self.text(x, y, &divider, Style::fg(palette::CARD_BORDER));
        y += 1;

        let copyright = content::copyright(content::current_year());
        self.text(x, y, &truncate_to_width(&copyright, m.content_width as usize), muted);
        let legal = content::LEGAL_LINKS.join("  ");
        let fine_print = muted.with_dim();
        if m.legal_inline() {
            let lx = x + m.content_width - m.legal_width();
            self.text(lx, y, &legal, fine_print);
        } else {
            self.text(x, y + 1, &truncate_to_width(&legal, m.content_width as usize), fine_print);
        }
    }
}

// ============================================================================
// Fixed overlays
// ============================================================================

fn draw_header(page: &LandingPage, buffer: &mut FrameBuffer, hits: &mut HitGrid) {
    let width = buffer.width();
    buffer.fill_gradient(0, 0, width, HEADER_HEIGHT, &palette::HEADER);

    let filled = (page.scroll_progress() * width as f32).round() as u32;
    for x in 0..filled.min(width) {
        let color = palette::ACCENT.sample(x as usize, width as usize);
        buffer.fill_rect(x as i32, 0, 1, 1, color);
    }

    let rule = "─".repeat(width as usize);
    buffer.draw_text(0, 2, &rule, Style::fg(palette::CARD_BORDER));

    let header = page.layout().header();
    buffer.draw_gradient_text(
        header.brand.x as i32,
        1,
        &layout::brand_label(),
        &palette::ACCENT,
        TextAttributes::BOLD,
    );
    hits.register(header.brand.x as i32, 1, header.brand.width, 1, Control::Brand.hit_id());

    let active = page.active_section();
    for &(id, slot) in &header.nav {
        let style = if id == active {
            Style::fg(palette::CYAN_400).with_bold()
        } else {
            Style::fg(palette::SLATE_300)
        };
        buffer.draw_text(slot.x as i32, 1, id.display_name(), style);
        if id == active {
            let indicator = "━".repeat(slot.width as usize);
            buffer.draw_text(slot.x as i32, 2, &indicator, Style::fg(palette::CYAN_400));
        }
        hits.register(slot.x as i32, 1, slot.width, 1, Control::Nav(id).hit_id());
    }

    if let Some(slot) = header.get_started {
        buffer.fill_gradient(slot.x as i32, 1, slot.width, 1, &palette::BUTTON);
        buffer.draw_text(
            slot.x as i32 + 1,
            1,
            content::GET_STARTED,
            Style::fg(Rgba::WHITE).with_bold(),
        );
        hits.register(slot.x as i32, 1, slot.width, 1, Control::GetStarted.hit_id());
    }

    if let Some(slot) = header.menu_toggle {
        let label = if page.menu_open() { "✕ Close" } else { "☰ Menu" };
        buffer.draw_text(slot.x as i32, 1, label, Style::fg(palette::SLATE_300));
        hits.register(slot.x as i32, 1, slot.width, 1, Control::MenuToggle.hit_id());
    }
}

fn draw_menu(page: &LandingPage, buffer: &mut FrameBuffer, hits: &mut HitGrid) {
    let (x, y, w, h) = page.layout().menu_rect();
    let (x, y) = (x as i32, y as i32);
    let options = BoxOptions::new(BoxStyle::rounded(Style::fg(palette::CARD_BORDER)))
        .with_fill(palette::FOOTER);
    buffer.draw_box(x, y, w, h, &options);

    let active = page.active_section();
    for (i, id) in SectionId::ALL.into_iter().enumerate() {
        let row = y + 1 + i as i32;
        let style = if id == active {
            Style::fg(palette::CYAN_400).with_bold()
        } else {
            Style::fg(palette::SLATE_300)
        };
        buffer.draw_text(x + 2, row, id.display_name(), style);
        hits.register(x + 1, row, w.saturating_sub(2), 1, Control::Nav(id).hit_id());
    }

    let row = y + 1 + SectionId::ALL.len() as i32;
    let cta_w = display_width(content::GET_STARTED) as u32 + 2;
    buffer.fill_gradient(x + 2, row, cta_w, 1, &palette::BUTTON);
    buffer.draw_text(x + 3, row, content::GET_STARTED, Style::fg(Rgba::WHITE).with_bold());
    hits.register(x + 2, row, cta_w, 1, Control::GetStarted.hit_id());
}

fn draw_scroll_top(page: &LandingPage, buffer: &mut FrameBuffer, hits: &mut HitGrid) {
    let (x, y, w, h) = page.layout().scroll_top_rect();
    let options = BoxOptions::new(BoxStyle::rounded(Style::fg(Rgba::WHITE))).with_fill(palette::BUTTON);
    buffer.draw_box(x as i32, y as i32, w, h, &options);
    buffer.draw_text((x + w / 2) as i32, y as i32 + 1, "↑", Style::fg(Rgba::WHITE).with_bold());
    hits.register(x as i32, y as i32, w, h, Control::ScrollTop.hit_id());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{Action, PageConfig};
    use std::time::Duration;

    struct Screen {
        page: LandingPage,
        buffer: FrameBuffer,
        hits: HitGrid,
        t0: Instant,
    }

    impl Screen {
        fn new(width: u32, height: u32) -> Self {
            let mut page = LandingPage::new(width, height, PageConfig::default()).unwrap();
            let t0 = Instant::now();
            page.mount(t0);
            Self {
                page,
                buffer: FrameBuffer::new(width, height),
                hits: HitGrid::new(width, height),
                t0,
            }
        }

        fn draw(&mut self) {
            self.page.render(&mut self.buffer, &mut self.hits, self.t0);
        }

        fn control_at(&self, x: u32, y: u32) -> Option<Control> {
            self.hits.test(x, y).and_then(Control::from_hit_id)
        }
    }

    #[test]
    fn test_header_row_at_top() {
        let mut screen = Screen::new(100, 30);
        screen.draw();
        insta::assert_snapshot!(
            screen.buffer.row_text(1),
            @"  ◆ CryptoVault                      Home Features Demo Security Interactive Testimonials Download"
        );
        assert!(screen.buffer.row_text(2).starts_with("──"));
    }

    #[test]
    fn test_only_active_nav_item_is_highlighted() {
        let mut screen = Screen::new(100, 30);
        screen.page.apply(Action::JumpTo(SectionId::Demo), screen.t0);
        screen.page.tick(screen.t0 + Duration::from_secs(1));
        screen.draw();

        let header = screen.page.layout().header().clone();
        for (id, slot) in header.nav {
            let cell = screen.buffer.get(slot.x, 1).unwrap();
            let bold = cell.attributes.contains(TextAttributes::BOLD);
            assert_eq!(bold, id == SectionId::Demo, "{id}");
            let under = screen.buffer.get(slot.x, 2).unwrap().content.as_char();
            assert_eq!(under == Some('━'), id == SectionId::Demo, "{id}");
        }
    }

    #[test]
    fn test_scroll_top_button_tracks_visibility() {
        let mut screen = Screen::new(80, 24);
        screen.draw();
        let (x, y, _, _) = screen.page.layout().scroll_top_rect();
        assert_ne!(screen.control_at(x, y), Some(Control::ScrollTop));

        screen.page.scroll_to(40, screen.t0);
        screen.draw();
        assert!(screen.page.scroll_top_visible());
        assert_eq!(screen.control_at(x, y), Some(Control::ScrollTop));
        assert_eq!(screen.buffer.get(x + 2, y + 1).unwrap().content.as_char(), Some('↑'));
    }

    #[test]
    fn test_header_controls_are_hit_testable() {
        let mut screen = Screen::new(120, 30);
        screen.draw();
        let header = screen.page.layout().header().clone();
        assert_eq!(screen.control_at(header.brand.x, 1), Some(Control::Brand));
        let security = header.nav_slot(SectionId::Security).unwrap();
        assert_eq!(
            screen.control_at(security.x + 1, 1),
            Some(Control::Nav(SectionId::Security))
        );
        let cta = header.get_started.unwrap();
        assert_eq!(screen.control_at(cta.x, 1), Some(Control::GetStarted));
        // the border row is not clickable
        assert_eq!(screen.control_at(security.x, 2), None);
    }

    #[test]
    fn test_compact_menu_overlay() {
        let mut screen = Screen::new(60, 24);
        screen.draw();
        let toggle = screen.page.layout().header().menu_toggle.unwrap();
        assert_eq!(screen.control_at(toggle.x, 1), Some(Control::MenuToggle));
        assert!(screen.buffer.row_text(1).ends_with("☰ Menu"));

        screen.page.apply(Action::ToggleMenu, screen.t0);
        screen.draw();
        assert!(screen.buffer.row_text(1).ends_with("✕ Close"));
        let (x, y, _, _) = screen.page.layout().menu_rect();
        assert_eq!(
            screen.control_at(x + 2, y + 3),
            Some(Control::Nav(SectionId::Demo))
        );
        assert!(screen.buffer.row_text(y + 3).contains("Demo"));
    }

    #[test]
    fn test_hero_buttons_and_fade() {
        let mut screen = Screen::new(100, 30);
        screen.draw();
        let text = screen.buffer.to_plain_text();
        assert!(text.contains("Make your Crypto"));
        assert!(text.contains("How It Works"));

        screen.page.scroll_to(15, screen.t0);
        screen.draw();
        let text = screen.buffer.to_plain_text();
        assert!(!text.contains("How It Works"));
    }

    #[test]
    fn test_carousel_controls_follow_index() {
        let mut screen = Screen::new(100, 60);
        let testimonials = screen
            .page
            .layout()
            .block(BlockKind::Testimonials)
            .map(|b| b.top)
            .unwrap();
        screen.page.scroll_to(testimonials.saturating_sub(HEADER_HEIGHT), screen.t0);
        screen.draw();
        assert!(screen.buffer.to_plain_text().contains("Sarah Chen"));

        let (x, y) = find(&screen.buffer, "[›]").unwrap();
        assert_eq!(screen.control_at(x, y), Some(Control::CarouselNext));
        let next = screen.control_at(x, y).unwrap().action();
        screen.page.apply(next, screen.t0);
        screen.draw();
        assert!(screen.buffer.to_plain_text().contains("Marcus Rodriguez"));
    }

    #[test]
    fn test_hero_opacity() {
        assert_eq!(hero_opacity(0, 30), 1.0);
        assert!((hero_opacity(5, 30) - 2.0 / 3.0).abs() < 1e-6);
        assert_eq!(hero_opacity(15, 30), 0.0);
        assert_eq!(hero_opacity(100, 30), 0.0);
        assert_eq!(hero_opacity(0, 1), 1.0);
    }

    #[test]
    fn test_hero_drift() {
        assert_eq!(hero_drift(0, 30), 0);
        assert_eq!(hero_drift(7, 30), 1);
        assert_eq!(hero_drift(25, 30), 4);
        assert_eq!(hero_drift(500, 30), 4);
        assert_eq!(hero_drift(3, 1), 0);
    }

    #[test]
    fn test_hero_copy_drifts_up_while_scrolling() {
        let mut screen = Screen::new(100, 90);
        screen.draw();
        let (_, top) = find(&screen.buffer, "How It Works").unwrap();

        screen.page.scroll_to(7, screen.t0);
        screen.draw();
        let (_, scrolled) = find(&screen.buffer, "How It Works").unwrap();
        assert_eq!(scrolled, top - 7 - hero_drift(7, 90));
        assert_eq!(hero_drift(7, 90), 1);
    }

    #[test]
    fn test_pulse_range() {
        assert_eq!(pulse(0.0, 0.0), 1.0);
        assert_eq!(pulse(1.0, 0.0), 0.5);
        assert_eq!(pulse(1.0, 2.0), 1.0);
        for step in 0..40 {
            let level = pulse(step as f32 * 0.1, 0.0);
            assert!((0.5..=1.0).contains(&level));
        }
    }

    fn find(buffer: &FrameBuffer, needle: &str) -> Option<(u32, u32)> {
        (0..buffer.height()).find_map(|y| {
            let row = buffer.row_text(y);
            row.find(needle)
                .map(|byte| (row[..byte].chars().count() as u32, y))
        })
    }
}
