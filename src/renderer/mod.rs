//! Double-buffered terminal renderer with diff detection.
//!
//! The application draws into the back buffer and registers clickable areas
//! in the back hit grid (see [`Renderer::frame`]). [`Renderer::present`]
//! diffs the back buffer against the previously presented frame, writes only
//! the changed cells, then swaps both the buffers and the hit grids so mouse
//! clicks are always tested against what is actually on screen.
//!
//! ```
//! use cryptovault::{Renderer, RendererOptions, Rgba, Style};
//!
//! let mut renderer = Renderer::new(Vec::new(), 40, 5, RendererOptions::headless()).unwrap();
//! let (buffer, hits) = renderer.frame();
//! buffer.draw_text(1, 1, "CryptoVault", Style::fg(Rgba::WHITE));
//! hits.register(1, 1, 11, 1, 7);
//! renderer.present().unwrap();
//! assert_eq!(renderer.hit_test(3, 1), Some(7));
//! ```

mod diff;
mod hitgrid;

pub use diff::{BufferDiff, DirtyRegion};
pub use hitgrid::HitGrid;

use crate::ansi::{AnsiWriter, ColorMode, sequences};
use crate::buffer::FrameBuffer;
use crate::color::Rgba;
use crate::terminal::Terminal;
use std::io::{self, Write};
use std::time::{Duration, Instant};

/// Terminal setup performed by [`Renderer::new`].
#[derive(Clone, Copy, Debug)]
pub struct RendererOptions {
    pub use_alt_screen: bool,
    pub hide_cursor: bool,
    pub enable_mouse: bool,
    /// Wrap every frame in synchronized-output markers.
    pub sync_output: bool,
    pub color_mode: ColorMode,
}

impl RendererOptions {
    /// No terminal modes at all; for tests and offscreen rendering.
    #[must_use]
    pub fn headless() -> Self {
        Self {
            use_alt_screen: false,
            hide_cursor: false,
            enable_mouse: false,
            sync_output: false,
            color_mode: ColorMode::TrueColor,
        }
    }
}

impl Default for RendererOptions {
    fn default() -> Self {
        Self {
            use_alt_screen: true,
            hide_cursor: true,
            enable_mouse: true,
            sync_output: true,
            color_mode: ColorMode::detect(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct RenderStats {
    pub frames: u64,
    pub full_redraws: u64,
    pub last_frame_time: Duration,
    pub last_frame_cells: usize,
    pub last_frame_bytes: usize,
}

/// Renderer over any writer; the terminal modes are restored when it drops.
pub struct Renderer<W: Write> {
    width: u32,
    height: u32,

    front_buffer: FrameBuffer,
    back_buffer: FrameBuffer,
    /// Hit areas of the frame on screen.
    front_hit_grid: HitGrid,
    /// Hit areas of the frame being drawn.
    back_hit_grid: HitGrid,

    terminal: Terminal<W>,
    ansi: AnsiWriter,
    sync_output: bool,

    force_redraw: bool,
    stats: RenderStats,
    last_present_at: Instant,
}

impl<W: Write> Renderer<W> {
    /// Set up the terminal per `options` and allocate both frames.
    pub fn new(writer: W, width: u32, height: u32, options: RendererOptions) -> io::Result<Self> {
        let mut terminal = Terminal::new(writer);
        if options.use_alt_screen {
            terminal.enter_alt_screen()?;
        }
        if options.hide_cursor {
            terminal.hide_cursor()?;
        }
        if options.enable_mouse {
            terminal.enable_mouse()?;
        }
        terminal.flush()?;

        let width = width.max(1);
        let height = height.max(1);
        let mut front_buffer = FrameBuffer::new(width, height);
        front_buffer.clear(Rgba::BLACK);
        let back_buffer = front_buffer.clone();
        Ok(Self {
            width,
            height,
            front_buffer,
            back_buffer,
            front_hit_grid: HitGrid::new(width, height),
            back_hit_grid: HitGrid::new(width, height),
            terminal,
            ansi: AnsiWriter::new(options.color_mode),
            sync_output: options.sync_output,
            force_redraw: true,
            stats: RenderStats::default(),
            last_present_at: Instant::now(),
        })
    }

    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// The back buffer.
    pub fn buffer(&mut self) -> &mut FrameBuffer {
        &mut self.back_buffer
    }

    /// Back buffer and back hit grid together, as the page view needs both.
    pub fn frame(&mut self) -> (&mut FrameBuffer, &mut HitGrid) {
        (&mut self.back_buffer, &mut self.back_hit_grid)
    }

    /// What is currently on screen.
    #[must_use]
    pub fn front_buffer(&self) -> &FrameBuffer {
        &self.front_buffer
    }

    #[must_use]
    pub fn stats(&self) -> &RenderStats {
        &self.stats
    }

    pub fn set_color_mode(&mut self, mode: ColorMode) {
        self.ansi.set_color_mode(mode);
        self.force_redraw = true;
    }

    pub fn terminal(&mut self) -> &mut Terminal<W> {
        &mut self.terminal
    }

    pub fn writer(&self) -> &W {
        self.terminal.writer()
    }

    /// Clear the back buffer and its hit grid.
    pub fn clear(&mut self) {
        self.back_buffer.clear(Rgba::BLACK);
        self.back_hit_grid.clear();
    }

    /// Write the back buffer to the terminal and swap frames.
    pub fn present(&mut self) -> io::Result<()> {
        let started = Instant::now();
        let total_cells = self.width as usize * self.height as usize;
        let diff = BufferDiff::compute(&self.front_buffer, &self.back_buffer);
        let full = self.force_redraw || diff.should_full_redraw(total_cells);

        self.ansi.reset_state();
        if self.sync_output {
            self.ansi.write_str(sequences::sync::BEGIN);
        }
        self.ansi.write_str(sequences::CURSOR_HOME);
        self.ansi.assume_cursor(0, 0);

        let cells_written = if full {
            self.write_full()
        } else {
            self.write_regions(&diff)
        };

        self.ansi.reset();
        if self.sync_output {
            self.ansi.write_str(sequences::sync::END);
        }
        let bytes = self.ansi.finish(self.terminal.writer_mut())?;

        std::mem::swap(&mut self.front_buffer, &mut self.back_buffer);
        std::mem::swap(&mut self.front_hit_grid, &mut self.back_hit_grid);
        self.back_buffer.clear(Rgba::BLACK);
        self.back_hit_grid.clear();

        self.stats.frames += 1;
        if full {
            self.stats.full_redraws += 1;
        }
        self.stats.last_frame_cells = cells_written;
        self.stats.last_frame_bytes = bytes;
        self.stats.last_frame_time = started.duration_since(self.last_present_at);
        self.last_present_at = started;
        self.force_redraw = false;
        Ok(())
    }

    fn write_full(&mut self) -> usize {
        let mut written = 0;
        for y in 0..self.height {
            for x in 0..self.width {
                written += self.write_cell(x, y);
            }
        }
        written
    }

    fn write_regions(&mut self, diff: &BufferDiff) -> usize {
        let mut written = 0;
        for region in &diff.dirty_regions {
            for x in region.x..region.x + region.width {
                written += self.write_cell(x, region.y);
            }
        }
        written
    }

    fn write_cell(&mut self, x: u32, y: u32) -> usize {
        let Some(cell) = self.back_buffer.get(x, y) else {
            return 0;
        };
        if cell.is_continuation() {
            return 0;
        }
        self.ansi.write_cell_at(y, x, cell);
        // pending-wrap state at the right margin differs between terminals
        if x + cell.display_width() as u32 >= self.width {
            self.ansi.forget_cursor();
        }
        1
    }

    /// Resize both frames; the next present redraws everything.
    pub fn resize(&mut self, width: u32, height: u32) -> io::Result<()> {
        self.width = width.max(1);
        self.height = height.max(1);
        self.front_buffer.resize(self.width, self.height);
        self.back_buffer.resize(self.width, self.height);
        self.front_buffer.clear(Rgba::BLACK);
        self.back_buffer.clear(Rgba::BLACK);
        self.front_hit_grid.resize(self.width, self.height);
        self.back_hit_grid.resize(self.width, self.height);
        self.force_redraw = true;
        self.terminal.clear()
    }

    /// Which control id was on screen at a position.
    #[must_use]
    pub fn hit_test(&self, x: u32, y: u32) -> Option<u32> {
        self.front_hit_grid.test(x, y)
    }

    pub fn set_title(&mut self, title: &str) -> io::Result<()> {
        self.terminal.set_title(title)?;
        self.terminal.flush()
    }

    /// Restore the terminal now instead of on drop.
    pub fn cleanup(&mut self) -> io::Result<()> {
        self.terminal.cleanup()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Style;

    fn renderer(width: u32, height: u32) -> Renderer<Vec<u8>> {
        Renderer::new(Vec::new(), width, height, RendererOptions::headless()).unwrap()
    }

    fn drain(renderer: &mut Renderer<Vec<u8>>) -> String {
        let out = String::from_utf8_lossy(renderer.terminal().writer()).into_owned();
        renderer.terminal().writer_mut().clear();
        out
    }

    #[test]
    fn test_options() {
        let headless = RendererOptions::headless();
        assert!(!headless.use_alt_screen && !headless.enable_mouse && !headless.sync_output);
        let interactive = RendererOptions::default();
        assert!(interactive.use_alt_screen && interactive.hide_cursor && interactive.sync_output);
    }

    #[test]
    fn test_setup_writes_requested_modes() {
        let options = RendererOptions {
            color_mode: ColorMode::TrueColor,
            ..RendererOptions::default()
        };
        let mut renderer = Renderer::new(Vec::new(), 10, 2, options).unwrap();
        let out = drain(&mut renderer);
        assert!(out.contains(sequences::ALT_SCREEN_ON));
        assert!(out.contains(sequences::CURSOR_HIDE));
        assert!(out.contains(sequences::MOUSE_ON));
    }

    #[test]
    fn test_first_present_is_full_then_diffed() {
        let mut renderer = renderer(10, 3);
        renderer.buffer().draw_text(0, 0, "Vault", Style::NONE);
        renderer.present().unwrap();
        assert_eq!(renderer.stats().full_redraws, 1);
        assert_eq!(renderer.stats().last_frame_cells, 30);

        renderer.buffer().draw_text(0, 0, "Vault", Style::NONE);
        renderer.present().unwrap();
        assert_eq!(renderer.stats().frames, 2);
        assert_eq!(renderer.stats().full_redraws, 1);
        assert_eq!(renderer.stats().last_frame_cells, 0);

        renderer.buffer().draw_text(0, 0, "Vaulx", Style::NONE);
        renderer.present().unwrap();
        assert_eq!(renderer.stats().last_frame_cells, 1);
    }

    #[test]
    fn test_sync_markers_wrap_frame() {
        let options = RendererOptions {
            sync_output: true,
            ..RendererOptions::headless()
        };
        let mut renderer = Renderer::new(Vec::new(), 4, 1, options).unwrap();
        drain(&mut renderer);
        renderer.present().unwrap();
        let out = drain(&mut renderer);
        assert!(out.starts_with(sequences::sync::BEGIN));
        assert!(out.ends_with(sequences::sync::END));
    }

    #[test]
    fn test_hit_grid_swaps_with_frame() {
        let mut renderer = renderer(20, 5);
        renderer.frame().1.register(0, 0, 5, 1, 9);
        assert_eq!(renderer.hit_test(1, 0), None);

        renderer.present().unwrap();
        assert_eq!(renderer.hit_test(1, 0), Some(9));

        // the next frame registers nothing
        renderer.present().unwrap();
        assert_eq!(renderer.hit_test(1, 0), None);
    }

    #[test]
    fn test_present_clears_back_buffer() {
        let mut renderer = renderer(4, 1);
        renderer.buffer().draw_text(0, 0, "abcd", Style::NONE);
        renderer.present().unwrap();
        assert_eq!(renderer.front_buffer().row_text(0), "abcd");
        assert_eq!(renderer.buffer().row_text(0), "");
        assert_eq!(renderer.buffer().get(0, 0).unwrap().bg, Rgba::BLACK);
    }

    #[test]
    fn test_resize_forces_full_redraw() {
        let mut renderer = renderer(4, 2);
        renderer.present().unwrap();
        renderer.resize(6, 3).unwrap();
        assert_eq!(renderer.size(), (6, 3));
        renderer.present().unwrap();
        assert_eq!(renderer.stats().full_redraws, 2);
        assert_eq!(renderer.stats().last_frame_cells, 18);
    }
}
