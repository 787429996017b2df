use macroquad::prelude::*;

use crate::config::COMPANIES;
use crate::session::{Event, Session};
use crate::widgets::{self, SliderState, BORDER, PANEL_BG};

/// Selection controls on the left: companies, day count and the confirm button.
#[derive(Debug)]
pub struct Sidebar {
    max_days: u32,
    slider: SliderState,
}

/// Day count after a step of `delta` on the −/+ buttons, kept within 0..=max.
pub fn step_days(days: Option<u32>, delta: i32, max: u32) -> Option<u32> {
    match (days, delta.signum()) {
        (None, 1) => Some(1u32.min(max)),
        (None, _) => None,
        (Some(d), _) => Some(d.saturating_add_signed(delta).min(max)),
    }
}

/// Text shown next to the day selector.
pub fn days_label(days: Option<u32>) -> String {
    match days {
        Some(d) => format!("{d}"),
        None => "--".to_string(),
    }
}

impl Sidebar {
    pub fn new(max_days: u32) -> Self {
        Self {
            max_days,
            slider: SliderState::default(),
        }
    }

    /// Draw the panel and return the events raised this frame.
    pub fn draw(&mut self, session: &Session, x: f32, y: f32, width: f32, height: f32) -> Vec<Event> {
        let mut events = Vec::new();

        draw_rectangle(x, y, width, height, PANEL_BG);
        draw_text("COMPANIES", x + 10.0, y + 30.0, 24.0, WHITE);
        draw_text(
            &format!("Selected: {}", session.companies().len()),
            x + width - 120.0,
            y + 30.0,
            18.0,
            LIGHTGRAY,
        );
        draw_line(x, y + 40.0, x + width, y + 40.0, 2.0, BORDER);

        let item_height = 50.0;
        let item_padding = 5.0;
        let mut item_y = y + 50.0;
        for (company, ticker) in COMPANIES {
            if widgets::checkbox_row(
                company,
                ticker,
                x + 10.0,
                item_y,
                width - 20.0,
                item_height,
                session.is_selected(ticker),
            ) {
                events.push(Event::ToggleCompany(ticker.to_string()));
            }
            item_y += item_height + item_padding;
        }

        // day count
        let days_y = item_y + 20.0;
        draw_line(x, days_y - 10.0, x + width, days_y - 10.0, 2.0, BORDER);
        draw_text("DAYS", x + 10.0, days_y + 20.0, 24.0, WHITE);
        draw_text(
            &format!("{} / {}", days_label(session.days()), self.max_days),
            x + width - 120.0,
            days_y + 20.0,
            20.0,
            LIGHTGRAY,
        );

        let step_w = 30.0;
        let slider_x = x + 20.0 + step_w;
        let slider_w = width - 2.0 * (step_w + 30.0);
        if widgets::button("-", x + 10.0, days_y + 35.0, step_w, 22.0) {
            events.push(Event::SetDays(step_days(session.days(), -1, self.max_days)));
        }
        if let Some(days) = widgets::slider(
            session.days(),
            self.max_days,
            slider_x + 10.0,
            days_y + 37.0,
            slider_w,
            &mut self.slider,
        ) {
            events.push(Event::SetDays(Some(days)));
        }
        if widgets::button("+", x + width - step_w - 10.0, days_y + 35.0, step_w, 22.0) {
            events.push(Event::SetDays(step_days(session.days(), 1, self.max_days)));
        }

        if widgets::button("Confirmation", x + 10.0, days_y + 80.0, width - 20.0, 40.0) {
            events.push(Event::Confirm);
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stepping_from_undefined() {
        assert_eq!(step_days(None, 1, 50), Some(1));
        assert_eq!(step_days(None, -1, 50), None);
    }

    #[test]
    fn stepping_stays_in_range() {
        assert_eq!(step_days(Some(0), -1, 50), Some(0));
        assert_eq!(step_days(Some(50), 1, 50), Some(50));
        assert_eq!(step_days(Some(7), 1, 50), Some(8));
        assert_eq!(step_days(Some(7), -1, 50), Some(6));
    }

    #[test]
    fn undefined_days_show_a_placeholder() {
        assert_eq!(days_label(None), "--");
        assert_eq!(days_label(Some(12)), "12");
    }
}
