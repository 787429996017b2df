use std::num::NonZeroUsize;
use std::ops::Range;

use macroquad::prelude::*;
use tracing::{info, warn};

use crate::chart::{self, ChartSpec};
use crate::config::SIDEBAR_WIDTH;
use crate::data_source::{DataSource, PriceFeed};
use crate::error::DataError;
use crate::frame::PriceTable;
use crate::session::{Event, RenderPlan, Session};
use crate::sidebar::Sidebar;
use crate::widgets::{self, ScrollbarState, BORDER};

pub const TITLE: &str = "US Big Four Stock Trend";
pub const PROMPT: &str =
    "Select the company name and number of days and click the \"Confirm\" button";
pub const FOLLOW_UP: &str =
    "Also select the company name and number of days and click the \"Confirm\" button.";
pub const INVALID_SELECTION: &str = "You have not selected a company name or days";
pub const TABLE_HEADING: &str = "Stock price data of each company(USD)";
pub const CHART_HEADING: &str = "Stock price trend of each company";

const ROW_HEIGHT: f32 = 24.0;
const TABLE_VISIBLE_ROWS: usize = 10;
const CHART_HEIGHT: f32 = 320.0;

/// Sliced prices ready for the table and chart.
#[derive(Debug, Clone, PartialEq)]
pub struct DataView {
    pub frame: PriceTable,
    pub cells: Vec<Vec<String>>,
    pub chart: Option<ChartSpec>,
}

/// Output of one render pass; painted every frame until the next event.
#[derive(Debug, Clone, PartialEq)]
pub struct Screen {
    pub header: String,
    pub prompt: &'static str,
    pub message: Option<String>,
    pub data: Option<DataView>,
}

impl Screen {
    fn idle(message: Option<String>) -> Self {
        Self {
            header: "past ?? days".to_string(),
            prompt: PROMPT,
            message,
            data: None,
        }
    }

    fn showing(days: NonZeroUsize, result: Result<DataView, DataError>) -> Self {
        let (message, data) = match result {
            Ok(view) => (None, Some(view)),
            Err(e) => (Some(format!("Could not load prices: {e}")), None),
        };
        Self {
            header: format!("past {days} days"),
            prompt: FOLLOW_UP,
            message,
            data,
        }
    }
}

pub struct App<F: PriceFeed> {
    data: DataSource<F>,
    session: Session,
    screen: Screen,
    sidebar: Sidebar,
    table_open: bool,
    chart_open: bool,
    table_scroll: f32,
    table_drag: ScrollbarState,
}

impl<F: PriceFeed> App<F> {
    pub fn new(feed: F, max_days: u32) -> Self {
        let data = DataSource::new(feed, max_days);
        let mut app = Self {
            sidebar: Sidebar::new(data.max_days()),
            data,
            session: Session::new(),
            screen: Screen::idle(None),
            table_open: true,
            chart_open: true,
            table_scroll: 0.0,
            table_drag: ScrollbarState::default(),
        };
        app.render_pass();
        app
    }

    /// Apply one user event, then run the render pass it triggers.
    pub fn handle(&mut self, event: &Event) {
        self.session = std::mem::take(&mut self.session).apply(event);
        self.render_pass();
    }

    fn render_pass(&mut self) {
        let (session, plan) = std::mem::take(&mut self.session).render_pass();
        self.session = session;

        self.screen = match plan {
            RenderPlan::Prompt => Screen::idle(None),
            RenderPlan::InvalidSelection => Screen::idle(Some(INVALID_SELECTION.to_string())),
            RenderPlan::Show { companies, days } => {
                let result = self.load(&companies, days);
                if let Err(e) = &result {
                    warn!("failed to load {companies:?}: {e}");
                }
                Screen::showing(days, result)
            }
        };
        self.table_scroll = 0.0;
    }

    fn load(&mut self, companies: &[String], days: NonZeroUsize) -> Result<DataView, DataError> {
        let table = self.data.fetch(companies)?;
        let frame = table.current_frame(companies, days)?;
        info!(
            "showing {} rows of {:?}",
            frame.row_count(),
            frame.tickers().collect::<Vec<_>>()
        );
        Ok(DataView {
            cells: frame.formatted_rows(),
            chart: ChartSpec::from_long(&frame.melt()),
            frame,
        })
    }

    /// Paint one frame and feed back whatever the user did in it.
    pub fn frame(&mut self) {
        let screen_w = screen_width();
        let screen_h = screen_height();

        let events = self
            .sidebar
            .draw(&self.session, 0.0, 0.0, SIDEBAR_WIDTH, screen_h);
        draw_line(SIDEBAR_WIDTH, 0.0, SIDEBAR_WIDTH, screen_h, 2.0, BORDER);

        self.draw_main(SIDEBAR_WIDTH + 20.0, 0.0, screen_w - SIDEBAR_WIDTH - 40.0);

        for event in &events {
            self.handle(event);
        }
    }

    fn draw_main(&mut self, x: f32, y: f32, width: f32) {
        let mut cy = y + 50.0;
        draw_text(TITLE, x, cy, 40.0, WHITE);
        cy += 35.0;

        let showing = self.screen.data.is_some();
        if !showing {
            draw_text(self.screen.prompt, x, cy, 18.0, LIGHTGRAY);
            cy += 30.0;
        }
        draw_text(&self.screen.header, x, cy, 26.0, WHITE);
        cy += 20.0;

        if let Some(message) = &self.screen.message {
            draw_rectangle(x, cy, width, 34.0, Color::from_rgba(90, 30, 35, 255));
            draw_rectangle_lines(x, cy, width, 34.0, 1.0, Color::from_rgba(220, 50, 50, 255));
            draw_text(message, x + 12.0, cy + 23.0, 18.0, Color::from_rgba(255, 170, 170, 255));
            cy += 44.0;
        }

        let Some(view) = self.screen.data.as_ref() else {
            return;
        };

        cy += 10.0;
        cy += widgets::section_header(TABLE_HEADING, x, cy, width, &mut self.table_open);
        if self.table_open {
            cy += draw_table(view, x, cy, width, &mut self.table_scroll, &mut self.table_drag) + 10.0;
        } else {
            cy += 10.0;
        }

        cy += widgets::section_header(CHART_HEADING, x, cy, width, &mut self.chart_open);
        if self.chart_open {
            if let Some(spec) = &view.chart {
                chart::draw_line_chart(spec, x, cy, width, CHART_HEIGHT);
            }
            cy += CHART_HEIGHT + 10.0;
        } else {
            cy += 10.0;
        }

        draw_text(self.screen.prompt, x, cy + 20.0, 18.0, LIGHTGRAY);
    }
}

/// Scrollable price table; returns the height it used.
fn draw_table(
    view: &DataView,
    x: f32,
    y: f32,
    width: f32,
    scroll: &mut f32,
    drag: &mut ScrollbarState,
) -> f32 {
    let rows = view.cells.len();
    let body_h = rows.min(TABLE_VISIBLE_ROWS) as f32 * ROW_HEIGHT;
    let height = body_h + ROW_HEIGHT;
    draw_rectangle(x, y, width, height, Color::from_rgba(30, 30, 40, 255));
    draw_rectangle_lines(x, y, width, height, 1.0, BORDER);

    let col_count = view.frame.columns().len() + 1;
    let col_w = (width - 30.0) / col_count as f32;

    let headers = std::iter::once("Date").chain(view.frame.tickers());
    for (i, header) in headers.enumerate() {
        draw_text(header, x + 10.0 + i as f32 * col_w, y + 17.0, 18.0, WHITE);
    }
    draw_line(x, y + ROW_HEIGHT, x + width, y + ROW_HEIGHT, 1.0, BORDER);

    let body_y = y + ROW_HEIGHT;
    for i in visible_rows(*scroll, rows) {
        let ry = body_y + i as f32 * ROW_HEIGHT - *scroll;
        if i % 2 == 1 {
            draw_rectangle(x + 1.0, ry, width - 20.0, ROW_HEIGHT, Color::from_rgba(35, 35, 46, 255));
        }
        for (c, cell) in view.cells[i].iter().enumerate() {
            let color = if c == 0 { LIGHTGRAY } else { WHITE };
            draw_text(cell, x + 10.0 + c as f32 * col_w, ry + 17.0, 17.0, color);
        }
    }

    let raw = widgets::scrollbar(
        x,
        body_y,
        width,
        body_h,
        *scroll,
        rows as f32 * ROW_HEIGHT,
        body_h,
        drag,
    );
    *scroll = snap_scroll(raw);

    height
}

/// Scroll offsets land on row boundaries so no row is ever half drawn.
fn snap_scroll(offset: f32) -> f32 {
    (offset / ROW_HEIGHT).round().max(0.0) * ROW_HEIGHT
}

/// Rows shown for a row-aligned scroll offset.
fn visible_rows(scroll: f32, rows: usize) -> Range<usize> {
    let first = ((snap_scroll(scroll) / ROW_HEIGHT) as usize).min(rows);
    first..(first + TABLE_VISIBLE_ROWS).min(rows)
}
