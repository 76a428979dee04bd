//! Terminal layout of the page: block stacking, grids and header slots.
//!
//! Every height here is measured from the copy in [`content`](super::content)
//! with the same wrap widths the view draws with, so section bounds always
//! match what ends up on screen. A layout is immutable; a resize computes a
//! new one.

use crate::page::content::{self, SectionCopy};
use crate::page::section::{SectionBounds, SectionId, SectionLayout};
use crate::unicode::{display_width, wrap_text};
use serde::Serialize;

/// Rows taken by the fixed header: progress bar, navigation, border.
pub const HEADER_HEIGHT: u32 = 3;

pub(crate) const SECTION_PAD: u32 = 2;
pub(crate) const INTRO_GAP: u32 = 2;
pub(crate) const IMAGE_CAPTION_HEIGHT: u32 = 2;
pub(crate) const GRID_ROW_GAP: u32 = 1;
pub(crate) const BUTTON_HEIGHT: u32 = 3;
pub(crate) const PRICE_CARD_HEIGHT: u32 = 4;
pub(crate) const FOOTER_COLUMN_WIDTH: u32 = 24;
pub(crate) const SCROLL_TOP_SIZE: (u32, u32) = (5, 3);

const MAX_CONTENT_WIDTH: u32 = 116;
const MAX_TEXT_WIDTH: u32 = 72;
const GRID_GAP: u32 = 2;
const MENU_TOGGLE_WIDTH: u32 = 7;

/// Width class selecting grid columns and the navigation variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    /// Below 80 columns: single column, navigation behind a menu toggle.
    Compact,
    /// 80 to 119 columns.
    Medium,
    /// 120 columns and up.
    Wide,
}

impl Breakpoint {
    #[must_use]
    pub const fn from_width(width: u32) -> Self {
        match width {
            0..80 => Self::Compact,
            80..120 => Self::Medium,
            _ => Self::Wide,
        }
    }

    #[must_use]
    pub const fn columns(self) -> u32 {
        match self {
            Self::Compact => 1,
            Self::Medium => 2,
            Self::Wide => 3,
        }
    }

    #[must_use]
    pub const fn collapses_nav(self) -> bool {
        matches!(self, Self::Compact)
    }
}

/// Horizontal measurements shared by layout and drawing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Metrics {
    pub width: u32,
    pub breakpoint: Breakpoint,
    pub content_left: u32,
    pub content_width: u32,
    /// Width of paragraphs and single-column stacks.
    pub text_width: u32,
    pub columns: u32,
    pub column_width: u32,
    /// Left margin of the header row.
    pub header_margin: u32,
}

impl Metrics {
    #[must_use]
    pub fn new(width: u32) -> Self {
        let breakpoint = Breakpoint::from_width(width);
        let margin = if breakpoint.collapses_nav() { 2 } else { 4 };
        let content_width = width
            .saturating_sub(margin * 2)
            .clamp(1, MAX_CONTENT_WIDTH);
        let columns = breakpoint.columns();
        let column_width = (content_width.saturating_sub(GRID_GAP * (columns - 1)) / columns).max(1);
        Self {
            width,
            breakpoint,
            content_left: width.saturating_sub(content_width) / 2,
            content_width,
            text_width: content_width.min(MAX_TEXT_WIDTH),
            columns,
            column_width,
            header_margin: if breakpoint.collapses_nav() { 1 } else { 2 },
        }
    }

    /// Left edge of paragraphs, centered in the content area.
    #[must_use]
    pub fn text_left(&self) -> u32 {
        self.content_left + (self.content_width - self.text_width) / 2
    }

    #[must_use]
    pub fn column_x(&self, column: u32) -> u32 {
        self.content_left + column * (self.column_width + GRID_GAP)
    }

    /// Wrap copy the way the view draws it.
    #[must_use]
    pub fn wrap(&self, text: &str, width: u32) -> Vec<String> {
        wrap_text(text, width.max(1) as usize)
    }

    fn lines(&self, text: &str, width: u32) -> u32 {
        self.wrap(text, width).len() as u32
    }

    /// Optional badge, heading and wrapped lead paragraph.
    #[must_use]
    pub fn intro_height(&self, copy: &SectionCopy) -> u32 {
        let badge = if copy.badge.is_empty() { 0 } else { 2 };
        badge + 2 + self.lines(copy.body, self.text_width)
    }

    /// Inner text width of a grid card.
    #[must_use]
    pub fn card_text_width(&self) -> u32 {
        self.column_width.saturating_sub(4).max(1)
    }

    /// Border, title row, spacer, wrapped description.
    #[must_use]
    pub fn feature_card_height(&self, feature: &content::Feature) -> u32 {
        4 + self.lines(feature.description, self.card_text_width())
    }

    /// Border, image label, spacer, title, wrapped description.
    #[must_use]
    pub fn demo_card_height(&self, demo: &content::Demo) -> u32 {
        5 + self.lines(demo.description, self.card_text_width())
    }

    /// Heights of grid rows; a row is as tall as its tallest card.
    #[must_use]
    pub fn grid_row_heights(&self, card_heights: &[u32]) -> Vec<u32> {
        card_heights
            .chunks(self.columns as usize)
            .map(|row| row.iter().copied().max().unwrap_or(0))
            .collect()
    }

    #[must_use]
    pub fn grid_height(&self, card_heights: &[u32]) -> u32 {
        let rows = self.grid_row_heights(card_heights);
        let gaps = (rows.len() as u32).saturating_sub(1) * GRID_ROW_GAP;
        rows.iter().sum::<u32>() + gaps
    }

    #[must_use]
    pub fn hero_button_widths(&self) -> (u32, u32) {
        (
            display_width(content::HERO.primary) as u32 + 4,
            display_width(content::HERO.secondary) as u32 + 4,
        )
    }

    #[must_use]
    pub fn hero_buttons_stacked(&self) -> bool {
        let (primary, secondary) = self.hero_button_widths();
        primary + 2 + secondary > self.text_width
    }

    #[must_use]
    pub fn price_columns(&self) -> u32 {
        if self.breakpoint.collapses_nav() { 1 } else { 3 }
    }

    #[must_use]
    pub fn price_card_width(&self) -> u32 {
        let cols = self.price_columns();
        (self.text_width.saturating_sub(2 * (cols - 1)) / cols).max(1)
    }

    /// Hero copy from the badge down to the price cards.
    #[must_use]
    pub fn hero_content_height(&self) -> u32 {
        let buttons = if self.hero_buttons_stacked() {
            BUTTON_HEIGHT * 2
        } else {
            BUTTON_HEIGHT
        };
        let price_rows = (content::PRICES.len() as u32).div_ceil(self.price_columns());
        let prices = price_rows * PRICE_CARD_HEIGHT + (price_rows - 1) * GRID_ROW_GAP;
        // badge, spacer, two title rows, spacer
        let lead = 5;
        lead + self.lines(content::HERO.body, self.text_width) + 1 + buttons + 1 + prices
    }

    #[must_use]
    pub fn security_item_text_width(&self) -> u32 {
        self.text_width.saturating_sub(4).max(1)
    }

    #[must_use]
    pub fn security_items_height(&self) -> u32 {
        let items: u32 = content::SECURITY_ITEMS
            .iter()
            .map(|item| 1 + self.lines(item.description, self.security_item_text_width()))
            .sum();
        items + (content::SECURITY_ITEMS.len() as u32 - 1)
    }

    #[must_use]
    pub fn testimonial_card_width(&self) -> u32 {
        self.text_width
    }

    #[must_use]
    pub fn testimonial_quote_width(&self) -> u32 {
        self.testimonial_card_width().saturating_sub(6).max(1)
    }

    /// Wrapped quote, including the quotation marks.
    #[must_use]
    pub fn testimonial_quote(&self, testimonial: &content::Testimonial) -> Vec<String> {
        self.wrap(&format!("\"{}\"", testimonial.text), self.testimonial_quote_width())
    }

    /// Sized for the longest quote so the card does not jump while rotating.
    #[must_use]
    pub fn testimonial_card_height(&self) -> u32 {
        let quote = content::TESTIMONIALS
            .iter()
            .map(|t| self.testimonial_quote(t).len() as u32)
            .max()
            .unwrap_or(1);
        // border, stars, spacer, quote, spacer, name, role
        2 + 2 + quote + 1 + 2
    }

    #[must_use]
    pub fn store_button_widths(&self) -> [u32; 2] {
        content::STORE_BUTTONS.map(|label| display_width(label) as u32 + 4)
    }

    #[must_use]
    pub fn store_buttons_stacked(&self) -> bool {
        let [a, b] = self.store_button_widths();
        a + 3 + b > self.content_width
    }

    #[must_use]
    pub fn footer_columns_stacked(&self) -> bool {
        self.content_width < FOOTER_COLUMN_WIDTH * 2
    }

    #[must_use]
    pub fn legal_width(&self) -> u32 {
        let labels: usize = content::LEGAL_LINKS.iter().map(|l| display_width(l)).sum();
        (labels + 2 * (content::LEGAL_LINKS.len() - 1)) as u32
    }

    /// Whether copyright and legal links share one row.
    #[must_use]
    pub fn legal_inline(&self) -> bool {
        let copyright = display_width(&content::copyright(2000)) as u32;
        copyright + 4 + self.legal_width() <= self.content_width
    }

    #[must_use]
    pub fn footer_height(&self) -> u32 {
        let links = if self.footer_columns_stacked() {
            (1 + content::QUICK_LINKS.len() as u32) + 1 + (1 + content::RESOURCES.len() as u32)
        } else {
            1 + content::QUICK_LINKS.len().max(content::RESOURCES.len()) as u32
        };
        let legal = if self.legal_inline() { 1 } else { 2 };
        // pad, brand, tagline, spacer, socials, spacer, links, spacer, divider, legal, pad
        1 + 1 + self.lines(content::FOOTER_TAGLINE, self.text_width) + 1 + 1 + 1 + links + 1 + 1 + legal + 1
    }

    fn section_height(&self, intro: &SectionCopy, body: u32) -> u32 {
        SECTION_PAD + self.intro_height(intro) + INTRO_GAP + body + SECTION_PAD
    }
}

/// A vertically stacked region of the document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Hero,
    Market,
    Features,
    Demo,
    Security,
    Interactive,
    Testimonials,
    Download,
    Footer,
}

impl BlockKind {
    pub const ALL: [BlockKind; 9] = [
        Self::Hero,
        Self::Market,
        Self::Features,
        Self::Demo,
        Self::Security,
        Self::Interactive,
        Self::Testimonials,
        Self::Download,
        Self::Footer,
    ];

    /// The navigable section this block is anchored to.
    #[must_use]
    pub const fn section(self) -> Option<SectionId> {
        match self {
            Self::Hero => Some(SectionId::Home),
            Self::Features => Some(SectionId::Features),
            Self::Demo => Some(SectionId::Demo),
            Self::Security => Some(SectionId::Security),
            Self::Interactive => Some(SectionId::Interactive),
            Self::Testimonials => Some(SectionId::Testimonials),
            Self::Download => Some(SectionId::Download),
            Self::Market | Self::Footer => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    pub top: u32,
    pub height: u32,
}

impl Block {
    #[must_use]
    pub const fn bottom(&self) -> u32 {
        self.top + self.height
    }
}

/// A horizontal span on the header's navigation row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Slot {
    pub x: u32,
    pub width: u32,
}

impl Slot {
    #[must_use]
    pub const fn end(&self) -> u32 {
        self.x + self.width
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderSlots {
    pub brand: Slot,
    pub nav: Vec<(SectionId, Slot)>,
    pub get_started: Option<Slot>,
    pub menu_toggle: Option<Slot>,
}

impl HeaderSlots {
    fn compute(metrics: &Metrics) -> Self {
        let width = metrics.width;
        let margin = metrics.header_margin;
        let brand = Slot {
            x: margin,
            width: display_width(&brand_label()) as u32,
        };

        if metrics.breakpoint.collapses_nav() {
            return Self {
                brand,
                nav: Vec::new(),
                get_started: None,
                menu_toggle: Some(Slot {
                    x: width.saturating_sub(margin + MENU_TOGGLE_WIDTH),
                    width: MENU_TOGGLE_WIDTH,
                }),
            };
        }

        let wide = metrics.breakpoint == Breakpoint::Wide;
        let gap = if wide { 2 } else { 1 };
        let labels: u32 = SectionId::ALL
            .iter()
            .map(|id| display_width(id.display_name()) as u32)
            .sum();
        let nav_width = labels + gap * (SectionId::ALL.len() as u32 - 1);

        let get_started = wide.then(|| {
            let w = display_width(content::GET_STARTED) as u32 + 2;
            Slot {
                x: width.saturating_sub(margin + w),
                width: w,
            }
        });
        let right = get_started.map_or(width.saturating_sub(margin), |s| s.x.saturating_sub(1));
        let free = right.saturating_sub(brand.end());
        let mut x = if wide {
            brand.end() + free.saturating_sub(nav_width) / 2
        } else {
            right.saturating_sub(nav_width).max(brand.end() + 1)
        };

        let nav = SectionId::ALL
            .iter()
            .map(|&id| {
                let slot = Slot {
                    x,
                    width: display_width(id.display_name()) as u32,
                };
                x = slot.end() + gap;
                (id, slot)
            })
            .collect();

        Self {
            brand,
            nav,
            get_started,
            menu_toggle: None,
        }
    }

    #[must_use]
    pub fn nav_slot(&self, id: SectionId) -> Option<Slot> {
        self.nav.iter().find(|(nav_id, _)| *nav_id == id).map(|&(_, slot)| slot)
    }
}

/// The header brand, icon included.
#[must_use]
pub fn brand_label() -> String {
    format!("{} {}", content::BRAND_ICON, content::BRAND)
}

/// Screen rectangle `(x, y, width, height)`.
pub type Rect = (u32, u32, u32, u32);

/// Where everything goes for one terminal size.
#[derive(Clone, Debug)]
pub struct PageLayout {
    metrics: Metrics,
    viewport_height: u32,
    blocks: Vec<Block>,
    document_height: u32,
    header: HeaderSlots,
}

impl PageLayout {
    #[must_use]
    pub fn compute(width: u32, viewport_height: u32) -> Self {
        let metrics = Metrics::new(width);
        let mut top = 0;
        let blocks = BlockKind::ALL
            .iter()
            .map(|&kind| {
                let height = block_height(kind, &metrics, viewport_height);
                let block = Block { kind, top, height };
                top += height;
                block
            })
            .collect();

        Self {
            metrics,
            viewport_height,
            blocks,
            document_height: top,
            header: HeaderSlots::compute(&metrics),
        }
    }

    #[must_use]
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    #[must_use]
    pub fn breakpoint(&self) -> Breakpoint {
        self.metrics.breakpoint
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.metrics.width
    }

    #[must_use]
    pub fn viewport_height(&self) -> u32 {
        self.viewport_height
    }

    #[must_use]
    pub fn document_height(&self) -> u32 {
        self.document_height
    }

    #[must_use]
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    #[must_use]
    pub fn block(&self, kind: BlockKind) -> Option<&Block> {
        self.blocks.iter().find(|b| b.kind == kind)
    }

    #[must_use]
    pub fn header(&self) -> &HeaderSlots {
        &self.header
    }

    /// Bounds of every section in declared order.
    #[must_use]
    pub fn section_bounds(&self) -> Vec<(SectionId, SectionBounds)> {
        self.blocks
            .iter()
            .filter_map(|b| b.kind.section().map(|id| (id, SectionBounds::new(b.top, b.height))))
            .collect()
    }

    /// Drop-down navigation under the header: every section plus "Get Started".
    #[must_use]
    pub fn menu_rect(&self) -> Rect {
        let margin = self.metrics.header_margin;
        let width = self.metrics.width.saturating_sub(margin * 2).max(1);
        let height = SectionId::ALL.len() as u32 + 1 + 2;
        (margin, HEADER_HEIGHT, width, height)
    }

    /// Floating scroll-to-top button in the bottom-right corner.
    #[must_use]
    pub fn scroll_top_rect(&self) -> Rect {
        let (w, h) = SCROLL_TOP_SIZE;
        let x = self.metrics.width.saturating_sub(self.metrics.header_margin + w);
        let y = self
            .viewport_height
            .saturating_sub(h + 1)
            .max(HEADER_HEIGHT);
        (x, y, w, h)
    }
}

impl SectionLayout for PageLayout {
    fn bounds(&self, id: SectionId) -> Option<SectionBounds> {
        self.blocks
            .iter()
            .find(|b| b.kind.section() == Some(id))
            .map(|b| SectionBounds::new(b.top, b.height))
    }
}

fn block_height(kind: BlockKind, m: &Metrics, viewport_height: u32) -> u32 {
    match kind {
        BlockKind::Hero => {
            let natural = HEADER_HEIGHT + SECTION_PAD + m.hero_content_height() + SECTION_PAD;
            natural.max(viewport_height)
        }
        BlockKind::Market => SECTION_PAD + m.intro_height(&content::MARKET) + SECTION_PAD,
        BlockKind::Features => {
            let cards: Vec<_> = content::FEATURES.iter().map(|f| m.feature_card_height(f)).collect();
            m.section_height(&content::FEATURES_INTRO, m.grid_height(&cards))
        }
        BlockKind::Demo => {
            let cards: Vec<_> = content::DEMOS.iter().map(|d| m.demo_card_height(d)).collect();
            m.section_height(&content::DEMO_INTRO, m.grid_height(&cards))
        }
        BlockKind::Security => m.section_height(
            &content::SECURITY_INTRO,
            m.security_items_height() + IMAGE_CAPTION_HEIGHT,
        ),
        BlockKind::Interactive => m.section_height(
            &content::INTERACTIVE_INTRO,
            content::INTERACTIVE_POINTS.len() as u32 + IMAGE_CAPTION_HEIGHT,
        ),
        BlockKind::Testimonials => {
            // card, spacer, navigation row
            m.section_height(&content::TESTIMONIALS_INTRO, m.testimonial_card_height() + 2)
        }
        BlockKind::Download => {
            let buttons = if m.store_buttons_stacked() {
                BUTTON_HEIGHT * 2 + 1
            } else {
                BUTTON_HEIGHT
            };
            m.section_height(&content::DOWNLOAD_INTRO, buttons)
        }
        BlockKind::Footer => m.footer_height(),
    }
}
