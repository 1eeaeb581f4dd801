//! Interactive terminal visualizer.
//!
//! Run: cargo run --bin gridstar [HxW] [delay-ms]

use std::env;
use std::error::Error;
use std::process;
use std::time::Duration;

use crossterm::event;
use gridstar_core::Dims;
use gridstar_engine::DEFAULT_DELAY;
use gridstar_viz::{App, Screen, input};

/// Poll timeout while no animation is running.
const IDLE_POLL: Duration = Duration::from_millis(100);

struct Config {
    dims: Dims,
    delay: Duration,
}

fn parse_args() -> Result<Config, String> {
    let mut cfg = Config {
        dims: Dims::default(),
        delay: DEFAULT_DELAY,
    };
    for arg in env::args().skip(1) {
        if let Some((h, w)) = arg.split_once('x') {
            match (h.parse::<i32>(), w.parse::<i32>()) {
                (Ok(h), Ok(w)) if h >= 1 && w >= 1 => cfg.dims = Dims::new(h, w),
                _ => return Err(format!("bad grid size: {arg} (expected HxW, e.g. 8x8)")),
            }
        } else if let Ok(ms) = arg.parse::<u64>() {
            cfg.delay = Duration::from_millis(ms);
        } else {
            return Err(format!("unrecognized argument: {arg}"));
        }
    }
    Ok(cfg)
}

fn main() {
    let cfg = match parse_args() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{e}");
            eprintln!("usage: gridstar [HxW] [delay-ms]");
            process::exit(2);
        }
    };

    if let Err(e) = run(cfg) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run(cfg: Config) -> Result<(), Box<dyn Error>> {
    let mut screen = Screen::init()?;
    let mut app = App::new(cfg.dims);
    let result = event_loop(&mut screen, &mut app, cfg.delay);
    screen.close();
    result
}

/// Poll for input, feeding actions to the model; while a search animation
/// is in flight, the poll timeout doubles as the frame delay and each
/// timeout advances the search by one step. Input stays responsive
/// mid-animation, so a new run or board edit cancels the one in flight.
fn event_loop(screen: &mut Screen, app: &mut App, delay: Duration) -> Result<(), Box<dyn Error>> {
    loop {
        screen.draw(app)?;
        if app.should_quit() {
            return Ok(());
        }
        let wait = if app.is_animating() { delay } else { IDLE_POLL };
        if event::poll(wait)? {
            let ev = event::read()?;
            if let Some(action) = input::action_for(&ev) {
                app.apply(action);
            }
        } else if app.is_animating() {
            app.tick();
        }
    }
}
