// main.rs
mod app;
mod chart;
mod config;
mod data_source;
mod error;
mod frame;
mod session;
mod sidebar;
mod widgets;
mod yahoo;

use clap::Parser;
use macroquad::prelude::*;
use tracing::{error, info};

use app::{App, TITLE};
use config::Config;
use yahoo::YahooFeed;

fn window_conf() -> Conf {
    Conf {
        window_title: TITLE.to_owned(),
        window_width: 1400,
        window_height: 920,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let config = Config::parse();
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .init();
    info!("Configuration: {config:?}");

    let feed = match YahooFeed::new() {
        Ok(feed) => feed,
        Err(e) => {
            error!("failed to build http client: {e}");
            return;
        }
    };
    let mut app = App::new(feed, config.max_days);

    loop {
        clear_background(Color::from_rgba(20, 20, 30, 255));

        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        app.frame();

        next_frame().await;
    }
}
