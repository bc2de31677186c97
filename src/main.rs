//! cubit
//!
//! A 3x3x3 packing puzzle played against gravity: tiles from a fixed
//! sequence drop into a cubic grid, the player picks a rotation and a
//! landing column for each, and the game is won when the grid is packed
//! full. Frames render through a built-in software rasterizer onto an
//! 84x48 monochrome surface, shown here as ASCII.

use std::io::{self, BufRead, Write};

use clap::{Parser, Subcommand};

use cubit::display::{DisplaySink, MonoFrame};
use cubit::grid::format_pattern;
use cubit::levels::{level_tiles, LEVEL_COUNT};
use cubit::raster::FrameRasterizer;
use cubit::scene::{draw_session, View};
use cubit::session::{InputMailbox, PuzzleSession, Status};

/// Plays a 3x3x3 tile packing puzzle with a terminal renderer.
#[derive(Parser)]
#[command(name = "cubit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Play a level interactively on stdin/stdout.
    Play {
        /// Level number to play.
        #[arg(default_value_t = 0)]
        level: usize,
    },
    /// Render one frame of a level after a number of automatic commits.
    Render {
        /// Level number to render.
        #[arg(default_value_t = 0)]
        level: usize,
        /// Commits to apply before rendering.
        #[arg(long, default_value_t = 0)]
        commits: usize,
    },
    /// List the built-in levels.
    Levels,
    /// Print the tile sequence of a level as cell patterns.
    Inspect {
        /// Level number to inspect.
        level: usize,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Play { level }) => run_play(level),
        Some(Command::Render { level, commits }) => run_render(level, commits),
        Some(Command::Inspect { level }) => run_inspect(level),
        Some(Command::Levels) | None => run_levels(),
    }
}

/// View orbit step per keypress, in radians.
const ORBIT_STEP: f32 = 0.1;

/// Interactive play loop: one line of input per tick.
///
/// `w`/`s` step the rotation cursor, `a`/`d` the translation cursor,
/// `p` commits, `i`/`k`/`j`/`l` orbit the camera, `r` resets it, `q`
/// quits. A line may carry several commands; they are coalesced into a
/// single tick like simultaneous button presses.
fn run_play(level: usize) {
    let Some(tiles) = level_tiles(level) else {
        eprintln!("No level {level}. Levels run 0 to {}.", LEVEL_COUNT - 1);
        return;
    };

    let mut session = PuzzleSession::new(tiles);
    let mut mailbox = InputMailbox::new();
    let mut raster = FrameRasterizer::new();
    let mut frame = MonoFrame::new();
    let mut view = View::default();
    let stdin = io::stdin();

    println!("Level {level}: w/s rotate, a/d move, p place, ijkl orbit, q quit");
    present(&session, &view, &mut raster, &mut frame);

    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        for c in line.trim().chars() {
            match c {
                'w' => mailbox.post_rotate_next(),
                's' => mailbox.post_rotate_prev(),
                'd' => mailbox.post_translate_next(),
                'a' => mailbox.post_translate_prev(),
                'p' | ' ' => mailbox.post_commit(),
                'i' => view.orbit(ORBIT_STEP, 0.0),
                'k' => view.orbit(-ORBIT_STEP, 0.0),
                'j' => view.orbit(0.0, ORBIT_STEP),
                'l' => view.orbit(0.0, -ORBIT_STEP),
                'r' => view = View::default(),
                'q' => return,
                _ => {}
            }
        }

        let status = session.tick(mailbox.take());
        present(&session, &view, &mut raster, &mut frame);
        match status {
            Status::Won => {
                println!("Packed! You win.");
                return;
            }
            Status::Lost => {
                println!("No fit for the next tile. Game over.");
                return;
            }
            Status::Playing => {}
        }
    }
}

/// Draws the session and prints the frame as ASCII.
fn present(
    session: &PuzzleSession,
    view: &View,
    raster: &mut FrameRasterizer,
    frame: &mut MonoFrame,
) {
    draw_session(session, view, raster, frame);
    frame.refresh();
    print!("{}", frame.to_ascii());
    let _ = io::stdout().flush();
}

/// Applies `commits` automatic placements, then renders a single frame.
fn run_render(level: usize, commits: usize) {
    let Some(tiles) = level_tiles(level) else {
        eprintln!("No level {level}. Levels run 0 to {}.", LEVEL_COUNT - 1);
        return;
    };

    let mut session = PuzzleSession::new(tiles);
    for _ in 0..commits {
        let events = cubit::session::InputEvents {
            commit: true,
            ..Default::default()
        };
        if session.tick(events) != Status::Playing {
            break;
        }
    }

    let mut raster = FrameRasterizer::new();
    let mut frame = MonoFrame::new();
    present(&session, &View::default(), &mut raster, &mut frame);
    println!("status: {:?}", session.status());
}

fn run_levels() {
    println!("{LEVEL_COUNT} levels:");
    for level in 0..LEVEL_COUNT {
        if let Some(tiles) = level_tiles(level) {
            let cells: u32 = tiles.iter().map(|t| t.shape.count_ones()).sum();
            println!("  {level}: {} tiles, {cells} cells", tiles.len());
        }
    }
}

fn run_inspect(level: usize) {
    let Some(tiles) = level_tiles(level) else {
        eprintln!("No level {level}. Levels run 0 to {}.", LEVEL_COUNT - 1);
        return;
    };
    for (index, tile) in tiles.iter().enumerate() {
        println!(
            "tile {index}: {:#09x} dims {:?}",
            tile.shape, tile.dims
        );
        print!("{}", format_pattern(tile.shape));
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubit::grid;
    use cubit::session::InputEvents;

    /// A fixed input script over the all-corner-tromino level. The
    /// snapshot pins the per-tick status, the final grid layout, and the
    /// terminal outcome, so any drift in rotation order, placement order,
    /// or cursor handling shows up as a diff.
    #[test]
    fn test_vee_level_playthrough_snapshot() {
        let tiles = level_tiles(1).unwrap();
        let mut session = PuzzleSession::new(tiles);

        let commit = InputEvents {
            commit: true,
            ..Default::default()
        };
        let script = [
            commit,
            InputEvents {
                translate_next: true,
                ..Default::default()
            },
            commit,
            InputEvents {
                rotate_next: true,
                ..Default::default()
            },
            commit,
            InputEvents {
                translate_next: true,
                commit: true,
                ..Default::default()
            },
            commit,
            InputEvents {
                rotate_next: true,
                translate_next: true,
                ..Default::default()
            },
            commit,
            commit,
            commit,
            commit,
            commit,
            commit,
        ];

        let mut output = String::new();
        for (n, events) in script.into_iter().enumerate() {
            let status = session.tick(events);
            output.push_str(&format!(
                "tick {n}: {status:?}, {} cells\n",
                session.grid().cells().count_ones()
            ));
            if status != Status::Playing {
                break;
            }
        }
        output.push('\n');
        output.push_str(&grid::format_pattern(session.grid().cells()));
        output.push_str(&format!("final: {:?}\n", session.status()));

        insta::assert_snapshot!(output);
    }

    #[test]
    fn test_render_frame_is_stable_for_a_fresh_level() {
        let mut session = PuzzleSession::new(level_tiles(0).unwrap());
        let mut raster = FrameRasterizer::new();
        let (mut a, mut b) = (MonoFrame::new(), MonoFrame::new());
        let view = View::default();
        draw_session(&session, &view, &mut raster, &mut a);
        session.tick(InputEvents::default());
        draw_session(&session, &view, &mut raster, &mut b);
        assert_eq!(a.to_ascii(), b.to_ascii());
    }
}
