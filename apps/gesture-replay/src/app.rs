//! Wires recognizers to a touch source and renders their notifications as text.

use crate::trace::TraceStep;
use clap::{Parser, ValueEnum};
use gestura_foundation::{
    GestureResponderHost, PanCallbacks, PanConfig, PanRecognizer, SwipeCallbacks, SwipeConfig,
    SwipeDirection, SwipeRecognizer, TouchSource,
};
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

/// Replays a recorded touch trace through the swipe and pan recognizers.
///
/// Without `--swipe` or `--pan` both recognizers run, the swipe one in all
/// four directions.
#[derive(Clone, Debug, Parser)]
#[command(name = "gesture-replay", version)]
pub struct Cli {
    /// Trace file to replay.
    pub trace: PathBuf,

    /// Swipe directions to recognize, comma separated.
    #[arg(long, value_enum, value_delimiter = ',', value_name = "DIRS")]
    pub swipe: Vec<DirectionArg>,

    /// Report a swipe once per gesture instead of on every frame.
    #[arg(long)]
    pub single_shot: bool,

    /// Minimum swipe velocity.
    #[arg(long, value_name = "PX_PER_MS")]
    pub velocity: Option<f32>,

    /// Track pans.
    #[arg(long)]
    pub pan: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum DirectionArg {
    Horizontal,
    Vertical,
    Left,
    Right,
    Up,
    Down,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ReplayOptions {
    pub trace: PathBuf,
    pub swipe: Option<SwipeConfig>,
    pub pan: bool,
}

impl From<Cli> for ReplayOptions {
    fn from(cli: Cli) -> Self {
        let mut swipe = (!cli.swipe.is_empty()).then(|| {
            cli.swipe
                .iter()
                .fold(SwipeConfig::default(), |config, direction| match direction {
                    DirectionArg::Horizontal => config.horizontal(true),
                    DirectionArg::Vertical => config.vertical(true),
                    DirectionArg::Left => config.with_direction(SwipeDirection::Left),
                    DirectionArg::Right => config.with_direction(SwipeDirection::Right),
                    DirectionArg::Up => config.with_direction(SwipeDirection::Up),
                    DirectionArg::Down => config.with_direction(SwipeDirection::Down),
                })
        });
        let mut pan = cli.pan;
        if swipe.is_none() && !pan {
            swipe = Some(SwipeConfig::default().horizontal(true).vertical(true));
            pan = true;
        }

        let swipe = swipe.map(|config| {
            let config = config.continuous(!cli.single_shot);
            match cli.velocity {
                Some(threshold) => config.initial_velocity_threshold(threshold),
                None => config,
            }
        });

        Self {
            trace: cli.trace,
            swipe,
            pan,
        }
    }
}

/// Runs the trace and returns one line per recognizer notification.
pub fn replay(steps: &[TraceStep], options: &ReplayOptions) -> Vec<String> {
    let output = Rc::new(RefCell::new(Vec::new()));
    let mut host = GestureResponderHost::new();

    // Pan first: it claims at touch start, swipe can still take over on move.
    let pan = options.pan.then(|| {
        let pan = Rc::new(RefCell::new(
            PanRecognizer::new(PanConfig::default().set_gesture_state(false))
                .with_callbacks(pan_printer(&output)),
        ));
        host.register(pan.clone());
        pan
    });

    if let Some(config) = options.swipe {
        let swipe = Rc::new(RefCell::new(
            SwipeRecognizer::new(config.set_gesture_state(false))
                .with_callbacks(swipe_printer(&output)),
        ));
        host.register(swipe);
    }

    let mut source = TouchSource::new();
    for step in steps {
        match step {
            TraceStep::Pointer(sample) => {
                if let Some(event) = source.process(*sample) {
                    host.dispatch(event);
                }
            }
            TraceStep::Reset => {
                if let Some(pan) = &pan {
                    let mut pan = pan.borrow_mut();
                    pan.set_reset_signal(true);
                    pan.set_reset_signal(false);
                    output.borrow_mut().push("pan reset".to_string());
                }
            }
        }
    }

    let lines = output.borrow().clone();
    lines
}

fn pan_printer(output: &Rc<RefCell<Vec<String>>>) -> PanCallbacks {
    let begin = output.clone();
    let pan = output.clone();
    let end = output.clone();
    PanCallbacks::new()
        .on_pan_begin(move |origin| {
            begin.borrow_mut().push(format!(
                "pan begin origin=({}, {})",
                origin.origin_x, origin.origin_y
            ))
        })
        .on_pan(move |state| {
            pan.borrow_mut().push(format!(
                "pan absolute=({}, {}) change=({}, {})",
                state.absolute_change_x, state.absolute_change_y, state.change_x, state.change_y
            ))
        })
        .on_pan_end(move || end.borrow_mut().push("pan end".to_string()))
}

fn swipe_printer(output: &Rc<RefCell<Vec<String>>>) -> SwipeCallbacks {
    let begin = output.clone();
    let swipe = output.clone();
    let end = output.clone();
    let describe = |label: &str, state: gestura_foundation::SwipeState| {
        let direction = state.direction.map(SwipeDirection::as_str).unwrap_or("NONE");
        format!(
            "{} {} distance={} velocity={:.3}",
            direction, label, state.distance, state.velocity
        )
    };
    SwipeCallbacks::new()
        .on_swipe_begin(move |state| begin.borrow_mut().push(describe("begin", state)))
        .on_swipe(move |state| swipe.borrow_mut().push(describe("move", state)))
        .on_swipe_end(move |end_state| {
            end.borrow_mut()
                .push(format!("{} end", end_state.direction.as_str()))
        })
}
