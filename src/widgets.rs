use macroquad::prelude::*;

pub const PANEL_BG: Color = Color::new(25.0 / 255.0, 25.0 / 255.0, 35.0 / 255.0, 1.0);
pub const BORDER: Color = Color::new(50.0 / 255.0, 50.0 / 255.0, 60.0 / 255.0, 1.0);
pub const ACCENT: Color = Color::new(50.0 / 255.0, 100.0 / 255.0, 200.0 / 255.0, 1.0);

#[derive(Debug, Clone, Default)]
pub struct ScrollbarState {
    pub dragging: bool,
    pub drag_start_y: f32,
    pub drag_start_scroll: f32,
}

#[derive(Debug, Clone, Default)]
pub struct SliderState {
    pub dragging: bool,
}

fn hovered(x: f32, y: f32, width: f32, height: f32) -> bool {
    let (mx, my) = mouse_position();
    mx >= x && mx <= x + width && my >= y && my <= y + height
}

// ────────────────────────────────────────────────
// Buttons
// ────────────────────────────────────────────────

/// Returns true on the frame the button is clicked.
pub fn button(label: &str, x: f32, y: f32, width: f32, height: f32) -> bool {
    let is_hovered = hovered(x, y, width, height);
    let bg = if is_hovered {
        Color::from_rgba(70, 120, 220, 255)
    } else {
        ACCENT
    };
    draw_rectangle(x, y, width, height, bg);
    draw_rectangle_lines(x, y, width, height, 1.0, Color::from_rgba(100, 100, 120, 255));

    let dims = measure_text(label, None, 20, 1.0);
    draw_text(
        label,
        x + (width - dims.width) / 2.0,
        y + height / 2.0 + dims.offset_y / 2.0,
        20.0,
        WHITE,
    );

    is_hovered && is_mouse_button_pressed(MouseButton::Left)
}

// ────────────────────────────────────────────────
// Checkbox row
// ────────────────────────────────────────────────

pub fn checkbox_row(
    title: &str,
    subtitle: &str,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    is_selected: bool,
) -> bool {
    let is_hovered = hovered(x, y, width, height);
    let is_clicked = is_hovered && is_mouse_button_pressed(MouseButton::Left);

    let bg_color = if is_hovered {
        Color::from_rgba(40, 40, 50, 255)
    } else {
        Color::from_rgba(30, 30, 40, 255)
    };
    draw_rectangle(x, y, width, height, bg_color);
    draw_rectangle_lines(x, y, width, height, 1.0, BORDER);

    let cs = 20.0;
    let cx = x + 10.0;
    let cy = y + (height - cs) / 2.0;

    let checkbox_color = if is_selected {
        ACCENT
    } else {
        Color::from_rgba(40, 40, 50, 255)
    };
    draw_rectangle(cx, cy, cs, cs, checkbox_color);
    draw_rectangle_lines(cx, cy, cs, cs, 2.0, Color::from_rgba(100, 100, 120, 255));

    if is_selected {
        draw_line(cx + 4.0, cy + 10.0, cx + 8.0, cy + 16.0, 2.0, WHITE);
        draw_line(cx + 8.0, cy + 16.0, cx + 16.0, cy + 4.0, 2.0, WHITE);
    }

    draw_text(title, x + 45.0, y + height / 2.0 - 2.0, 20.0, WHITE);
    draw_text(subtitle, x + 45.0, y + height / 2.0 + 16.0, 16.0, LIGHTGRAY);

    is_clicked
}

// ────────────────────────────────────────────────
// Horizontal slider over 0..=max
// ────────────────────────────────────────────────

/// Draws the slider and returns the value picked this frame, if any.
pub fn slider(
    value: Option<u32>,
    max: u32,
    x: f32,
    y: f32,
    width: f32,
    state: &mut SliderState,
) -> Option<u32> {
    let track_h = 6.0;
    let knob_r = 9.0;
    let track_y = y + knob_r;

    draw_rectangle(x, track_y - track_h / 2.0, width, track_h, Color::from_rgba(40, 40, 50, 255));

    let frac = match value {
        Some(v) if max > 0 => v.min(max) as f32 / max as f32,
        _ => 0.0,
    };
    draw_rectangle(x, track_y - track_h / 2.0, width * frac, track_h, ACCENT);

    let knob_x = x + width * frac;
    let knob_color = if state.dragging {
        Color::from_rgba(120, 120, 140, 255)
    } else if value.is_some() {
        WHITE
    } else {
        GRAY
    };
    draw_circle(knob_x, track_y, knob_r, knob_color);

    let on_track = hovered(x - knob_r, y, width + knob_r * 2.0, knob_r * 2.0);
    if is_mouse_button_pressed(MouseButton::Left) && on_track {
        state.dragging = true;
    }
    if is_mouse_button_released(MouseButton::Left) {
        state.dragging = false;
    }
    if !state.dragging {
        return None;
    }

    let (mx, _) = mouse_position();
    let picked = slider_value(mx, x, width, max);
    (value != Some(picked)).then_some(picked)
}

fn slider_value(mouse_x: f32, x: f32, width: f32, max: u32) -> u32 {
    (((mouse_x - x) / width).clamp(0.0, 1.0) * max as f32).round() as u32
}

// ────────────────────────────────────────────────
// Scrollbar
// ────────────────────────────────────────────────

pub fn scrollbar(
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    scroll_offset: f32,
    total_content_height: f32,
    visible_height: f32,
    state: &mut ScrollbarState,
) -> f32 {
    let scrollbar_width = 12.0;
    let scrollbar_x = x + width - scrollbar_width - 5.0;
    let scrollbar_y = y;

    let max_scroll = (total_content_height - visible_height).max(0.0);
    if max_scroll <= 0.0 {
        return 0.0;
    }

    draw_rectangle(
        scrollbar_x,
        scrollbar_y,
        scrollbar_width,
        height,
        Color::from_rgba(20, 20, 25, 255),
    );
    draw_rectangle_lines(
        scrollbar_x,
        scrollbar_y,
        scrollbar_width,
        height,
        1.0,
        Color::from_rgba(40, 40, 50, 255),
    );

    let thumb_height = ((visible_height / total_content_height) * height)
        .max(30.0)
        .min(height - 10.0);
    let scroll_range = height - thumb_height;
    let thumb_y = scrollbar_y + (scroll_offset / max_scroll) * scroll_range;

    let (_, my) = mouse_position();
    let is_on_scrollbar = hovered(scrollbar_x, scrollbar_y, scrollbar_width, height);
    let is_on_thumb = is_on_scrollbar && my >= thumb_y && my <= thumb_y + thumb_height;

    let thumb_color = if state.dragging {
        Color::from_rgba(120, 120, 140, 255)
    } else if is_on_thumb {
        Color::from_rgba(100, 100, 120, 255)
    } else {
        Color::from_rgba(60, 60, 80, 255)
    };
    draw_rectangle(
        scrollbar_x + 2.0,
        thumb_y + 2.0,
        scrollbar_width - 4.0,
        thumb_height - 4.0,
        thumb_color,
    );

    if is_mouse_button_pressed(MouseButton::Left) && is_on_thumb {
        state.dragging = true;
        state.drag_start_y = my;
        state.drag_start_scroll = scroll_offset;
    }
    if is_mouse_button_released(MouseButton::Left) {
        state.dragging = false;
    }

    if state.dragging {
        let delta_y = my - state.drag_start_y;
        let scroll_delta = (delta_y / scroll_range) * max_scroll;
        return (state.drag_start_scroll + scroll_delta).clamp(0.0, max_scroll);
    }

    // click on the track jumps there
    if is_mouse_button_pressed(MouseButton::Left) && is_on_scrollbar && !is_on_thumb {
        let click_ratio = (my - scrollbar_y) / height;
        return (click_ratio * max_scroll).clamp(0.0, max_scroll);
    }

    let (_, wheel) = mouse_wheel();
    if hovered(x, y, width, height) && wheel != 0.0 {
        return (scroll_offset - wheel.signum() * 40.0).clamp(0.0, max_scroll);
    }

    scroll_offset.clamp(0.0, max_scroll)
}

// ────────────────────────────────────────────────
// Collapsible section header
// ────────────────────────────────────────────────

/// Header line with an open/closed marker; clicking flips `open`.
pub fn section_header(title: &str, x: f32, y: f32, width: f32, open: &mut bool) -> f32 {
    let height = 30.0;
    let is_hovered = hovered(x, y, width, height);
    let bg = if is_hovered {
        Color::from_rgba(40, 40, 50, 255)
    } else {
        Color::from_rgba(30, 30, 40, 255)
    };
    draw_rectangle(x, y, width, height, bg);
    draw_rectangle_lines(x, y, width, height, 1.0, BORDER);

    let marker = if *open { "v" } else { ">" };
    draw_text(marker, x + 10.0, y + 21.0, 20.0, LIGHTGRAY);
    draw_text(title, x + 30.0, y + 21.0, 20.0, WHITE);

    if is_hovered && is_mouse_button_pressed(MouseButton::Left) {
        *open = !*open;
    }
    height
}
