use std::{io::{Stdout, Write, stdout}, time::Duration};

use anyhow::{bail, Context, Result};
use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::event::{Event, KeyEvent, KeyEventKind, read, poll};
use crossterm::style::{Color, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use log::{debug, info};

use crate::draw::Surface;
use crate::grid::{Rect, Rgb, BACKGROUND, GRID_HEIGHT, GRID_WIDTH};

const TITLE: &str = "Snake";
const BORDER_COLOR: Color = Color::Grey;

/// A board cell is two terminal columns wide so it looks square.
const COLS_PER_CELL: u16 = 2;
const BOARD_COLS: u16 = GRID_WIDTH as u16 * COLS_PER_CELL;
const BOARD_ROWS: u16 = GRID_HEIGHT as u16;

/// One painted board cell: its fill and, if outlined, the outline color.
type Paint = (Rgb, Option<Rgb>);

pub struct TermManager {
    stdout: Stdout,
    screen: Vec<Paint>,
    active: bool,
}

impl TermManager {
    pub fn new() -> Self {
        TermManager {
            stdout: stdout(),
            screen: vec![(BACKGROUND, None); (GRID_WIDTH * GRID_HEIGHT) as usize],
            active: false,
        }
    }

    pub fn setup(&mut self) -> Result<()> {
        let (width, height) = terminal::size().context("Error reading terminal size")?;
        info!("Terminal is {}x{}", width, height);

        if width < BOARD_COLS + 2 || height < BOARD_ROWS + 2 {
            bail!(
                "terminal is {}x{}, the board needs at least {}x{}",
                width, height, BOARD_COLS + 2, BOARD_ROWS + 2
            );
        }

        execute!(self.stdout, EnterAlternateScreen, terminal::SetTitle(TITLE))
            .context("Error entering alt screen")?;
        self.active = true;
        terminal::enable_raw_mode().context("Error setting raw mode")?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)
            .context("Error hiding cursor")?;

        execute!(self.stdout, terminal::Clear(ClearType::All)).context("Error clearing")?;
        self.draw_borders()?;
        self.fill(BACKGROUND)?;
        self.flush()
    }

    pub fn restore(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        // Every step runs even if an earlier one failed
        let raw = terminal::disable_raw_mode().context("Error setting raw mode");
        let screen = execute!(
            self.stdout,
            style::ResetColor,
            cursor::Show,
            cursor::EnableBlinking,
            LeaveAlternateScreen
        )
        .context("Error leaving alt screen");

        raw.and(screen)
    }

    /// Drains every key press that arrived since the last call, without blocking.
    pub fn read_key_events_queue(&self) -> Result<Vec<KeyEvent>> {
        let mut events = vec![];

        while poll(Duration::ZERO).context("Error polling events")? {
            match read().context("Error reading event")? {
                Event::Key(ev) if ev.kind == KeyEventKind::Press => events.push(ev),
                Event::Resize(w, h) => debug!("Terminal resized to {}x{}", w, h),
                _ => {}
            }
        }

        Ok(events)
    }

    pub fn flush(&mut self) -> Result<()> {
        self.stdout.flush().context("Error flushing")
    }

    ///////////////////////////////////////////////////////////////////////////

    fn draw_borders(&mut self) -> Result<()> {
        let end_x = BOARD_COLS + 1;
        let end_y = BOARD_ROWS + 1;

        queue!(self.stdout, SetForegroundColor(BORDER_COLOR), SetBackgroundColor(Color::Reset))?;

        for x in 0..=end_x {
            let ch = if x == 0 || x == end_x {'+'} else {'-'};
            queue!(self.stdout, cursor::MoveTo(x, 0), style::Print(ch))?;
            queue!(self.stdout, cursor::MoveTo(x, end_y), style::Print(ch))?;
        }

        for y in 1..end_y {
            queue!(self.stdout, cursor::MoveTo(0, y), style::Print('|'))?;
            queue!(self.stdout, cursor::MoveTo(end_x, y), style::Print('|'))?;
        }

        Ok(())
    }

    fn paint(&mut self, (col, row): (i32, i32), paint: Paint) -> Result<()> {
        self.screen[(row * GRID_WIDTH + col) as usize] = paint;

        let (fill, border) = paint;
        let (glyph, fg) = match border {
            Some(color) => ("▏▕", color),
            None => ("  ", fill),
        };

        let x = 1 + col as u16 * COLS_PER_CELL;
        let y = 1 + row as u16;
        queue!(
            self.stdout,
            cursor::MoveTo(x, y),
            SetBackgroundColor(to_color(fill)),
            SetForegroundColor(to_color(fg)),
            style::Print(glyph)
        )?;

        Ok(())
    }
}

impl Surface for TermManager {
    fn fill(&mut self, color: Rgb) -> Result<()> {
        let whole = Rect { x: 0, y: 0, width: i32::MAX, height: i32::MAX };
        self.fill_rect(whole, color)
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb) -> Result<()> {
        for cell in rect.cells() {
            self.paint(cell, (color, None))?;
        }
        Ok(())
    }

    fn stroke_rect(&mut self, rect: Rect, color: Rgb) -> Result<()> {
        for (col, row) in rect.cells() {
            let (fill, _) = self.screen[(row * GRID_WIDTH + col) as usize];
            self.paint((col, row), (fill, Some(color)))?;
        }
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        self.flush()
    }
}

fn to_color(Rgb(r, g, b): Rgb) -> Color {
    Color::Rgb { r, g, b }
}
