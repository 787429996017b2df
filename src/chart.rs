use chrono::NaiveDate;
use macroquad::prelude::*;

use crate::config::company_for;
use crate::frame::LongRow;

/// Width of one price band of the y axis.
pub const PRICE_BAND: f64 = 500.0;

// tableau10, one entry per line
const PALETTE: &[(u8, u8, u8)] = &[
    (76, 120, 168),
    (245, 133, 24),
    (228, 87, 86),
    (114, 183, 178),
    (84, 162, 75),
    (238, 202, 59),
    (178, 121, 162),
    (255, 157, 166),
];

const LINE_OPACITY: u8 = 204;

/// One line of the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub company: String,
    pub points: Vec<(NaiveDate, f64)>,
}

/// Everything the painter needs: lines, the date span and the price domain.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub series: Vec<Series>,
    pub first: NaiveDate,
    pub last: NaiveDate,
    pub y_min: f64,
    pub y_max: f64,
}

/// Price axis bounds: the min rounded down to its band, the max pushed to the next band.
pub fn y_domain(prices: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    let (min, max) = prices
        .into_iter()
        .fold(None, |acc: Option<(f64, f64)>, p| match acc {
            None => Some((p, p)),
            Some((lo, hi)) => Some((lo.min(p), hi.max(p))),
        })?;

    let y_min = (min / PRICE_BAND).floor() * PRICE_BAND;
    let y_max = ((max / PRICE_BAND).floor() + 1.0) * PRICE_BAND;
    Some((y_min, y_max))
}

impl ChartSpec {
    /// Group long rows into one series per company, in first-seen order.
    pub fn from_long(rows: &[LongRow]) -> Option<Self> {
        let (y_min, y_max) = y_domain(rows.iter().map(|r| r.price))?;
        let first = rows.iter().map(|r| r.date).min()?;
        let last = rows.iter().map(|r| r.date).max()?;

        let mut series: Vec<Series> = Vec::new();
        for row in rows {
            match series.iter_mut().find(|s| s.company == row.company) {
                Some(s) => s.points.push((row.date, row.price)),
                None => series.push(Series {
                    company: row.company.clone(),
                    points: vec![(row.date, row.price)],
                }),
            }
        }
        for s in &mut series {
            s.points.sort_by_key(|(date, _)| *date);
        }

        Some(Self {
            series,
            first,
            last,
            y_min,
            y_max,
        })
    }

    /// Horizontal position of `date` as a fraction of the date span.
    pub fn x_fraction(&self, date: NaiveDate) -> f32 {
        let span = (self.last - self.first).num_days();
        if span <= 0 {
            return 0.5;
        }
        (date - self.first).num_days() as f32 / span as f32
    }

    /// Vertical position of `price` as a fraction of the domain, clipped to it.
    pub fn y_fraction(&self, price: f64) -> f32 {
        (((price - self.y_min) / (self.y_max - self.y_min)) as f32).clamp(0.0, 1.0)
    }
}

pub fn series_color(index: usize) -> Color {
    let (r, g, b) = PALETTE[index % PALETTE.len()];
    Color::from_rgba(r, g, b, LINE_OPACITY)
}

pub fn draw_line_chart(spec: &ChartSpec, x: f32, y: f32, width: f32, height: f32) {
    draw_rectangle(x, y, width, height, Color::from_rgba(30, 30, 40, 255));
    draw_rectangle_lines(x, y, width, height, 2.0, Color::from_rgba(50, 50, 60, 255));

    let chart_x = x + 70.0;
    let chart_y = y + 20.0;
    let chart_w = width - 90.0;
    let chart_h = height - 75.0;

    // grid + price labels
    let ticks = 4;
    for i in 0..=ticks {
        let frac = i as f32 / ticks as f32;
        let gy = chart_y + frac * chart_h;
        let price = spec.y_max - frac as f64 * (spec.y_max - spec.y_min);
        draw_line(
            chart_x,
            gy,
            chart_x + chart_w,
            gy,
            1.0,
            Color::from_rgba(45, 45, 58, 255),
        );
        draw_text(
            &format!("${:.0}", price),
            x + 8.0,
            gy + 5.0,
            14.0,
            LIGHTGRAY,
        );
    }

    // date labels
    let mid = spec.first + (spec.last - spec.first) / 2;
    for date in [spec.first, mid, spec.last] {
        let gx = chart_x + spec.x_fraction(date) * chart_w;
        let label = date.format("%Y-%m-%d").to_string();
        let dims = measure_text(&label, None, 14, 1.0);
        draw_text(
            &label,
            (gx - dims.width / 2.0).min(x + width - dims.width).max(x),
            chart_y + chart_h + 18.0,
            14.0,
            LIGHTGRAY,
        );
    }

    for (idx, s) in spec.series.iter().enumerate() {
        let color = series_color(idx);
        let to_screen = |(date, price): &(NaiveDate, f64)| {
            vec2(
                chart_x + spec.x_fraction(*date) * chart_w,
                chart_y + chart_h - spec.y_fraction(*price) * chart_h,
            )
        };

        if let [only] = s.points.as_slice() {
            let p = to_screen(only);
            draw_circle(p.x, p.y, 3.0, color);
            continue;
        }
        for pair in s.points.windows(2) {
            let a = to_screen(&pair[0]);
            let b = to_screen(&pair[1]);
            draw_line(a.x, a.y, b.x, b.y, 2.5, color);
        }
    }

    // Legend
    let ly = y + height - 14.0;
    let mut lx = chart_x;
    for (idx, s) in spec.series.iter().enumerate() {
        let label = format!("{} ({})", company_for(&s.company), s.company);
        draw_line(lx, ly - 5.0, lx + 18.0, ly - 5.0, 3.0, series_color(idx));
        draw_text(&label, lx + 23.0, ly, 15.0, WHITE);
        lx += 23.0 + measure_text(&label, None, 15, 1.0).width + 18.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    fn row(d: u32, company: &str, price: f64) -> LongRow {
        LongRow {
            date: day(d),
            company: company.to_string(),
            price,
        }
    }

    #[test]
    fn domain_within_first_band() {
        assert_eq!(y_domain([120.0, 300.0, 480.0]), Some((0.0, 500.0)));
    }

    #[test]
    fn domain_spanning_negative_prices() {
        assert_eq!(y_domain([-50.0, 1050.0]), Some((-500.0, 1500.0)));
    }

    #[test]
    fn domain_of_constant_price_on_band_edge() {
        assert_eq!(y_domain([500.0, 500.0]), Some((500.0, 1000.0)));
    }

    #[test]
    fn domain_of_nothing() {
        assert_eq!(y_domain(std::iter::empty()), None);
    }

    #[test]
    fn chart_groups_rows_by_company() {
        let rows = vec![
            row(1, "AAPL", 180.0),
            row(2, "AAPL", 182.0),
            row(1, "NFLX", 610.0),
            row(2, "NFLX", 605.0),
        ];
        let spec = ChartSpec::from_long(&rows).unwrap();
        assert_eq!(spec.series.len(), 2);
        assert_eq!(spec.series[0].company, "AAPL");
        assert_eq!(spec.series[1].points, vec![(day(1), 610.0), (day(2), 605.0)]);
        assert_eq!((spec.first, spec.last), (day(1), day(2)));
        assert_eq!((spec.y_min, spec.y_max), (0.0, 1000.0));
    }

    #[test]
    fn no_rows_no_chart() {
        assert!(ChartSpec::from_long(&[]).is_none());
    }

    #[test]
    fn fractions_follow_dates_and_domain() {
        let rows = vec![row(1, "A", 100.0), row(3, "A", 200.0), row(5, "A", 400.0)];
        let spec = ChartSpec::from_long(&rows).unwrap();
        assert_eq!(spec.x_fraction(day(1)), 0.0);
        assert_eq!(spec.x_fraction(day(3)), 0.5);
        assert_eq!(spec.x_fraction(day(5)), 1.0);
        assert_eq!(spec.y_fraction(250.0), 0.5);
        assert_eq!(spec.y_fraction(-10.0), 0.0);
        assert_eq!(spec.y_fraction(9000.0), 1.0);
    }

    #[test]
    fn single_date_sits_in_the_middle() {
        let spec = ChartSpec::from_long(&[row(7, "A", 10.0)]).unwrap();
        assert_eq!(spec.x_fraction(day(7)), 0.5);
    }

    #[test]
    fn colors_cycle_through_palette() {
        assert_eq!(series_color(0), series_color(PALETTE.len()));
        assert_ne!(series_color(0), series_color(1));
    }
}
