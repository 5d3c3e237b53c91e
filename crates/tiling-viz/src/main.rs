use macroquad::prelude::*;
use tiling_core::Tiling;
use tiling_viz::config::CONFIG_PATH;
use tiling_viz::{draw_tiling, logging, Controls, Screen, ViewerConfig};

fn window_conf() -> Conf {
    Conf {
        window_title: "Polygon Tiling".to_owned(),
        window_width: 800,
        window_height: 800,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let (config, warnings) = ViewerConfig::load(CONFIG_PATH);
    logging::init_logger(config.log_level);
    for warning in &warnings {
        log::warn!("{CONFIG_PATH}: {warning}");
    }

    let mut tiling = match Tiling::with_config(config.tiling_config()) {
        Ok(tiling) => tiling,
        Err(err) => {
            log::error!("{err}, using the default tiling settings");
            Tiling::new()
        }
    };
    let mut controls = Controls::new(config.pan_speed);
    log::info!("viewer ready, seed edge length {}", tiling.config().edge_length);

    loop {
        let screen = Screen::current();
        controls.update(&mut tiling, &screen);

        clear_background(Color::from_rgba(15, 15, 25, 255));
        draw_tiling(&tiling, &screen);

        controls.draw_ui(&tiling, 25.0, config.show_help);
        draw_text(
            &format!("FPS: {}", get_fps()),
            10.0,
            screen_height() - 10.0,
            16.0,
            DARKGRAY,
        );

        next_frame().await
    }
}
