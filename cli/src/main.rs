use anyhow::Context;
use clap::Parser;
use std::io::{self, Write};
use std::time::{Duration, Instant, SystemTime};
use sweeper_core::*;

mod render;
mod script;

/// Plays a scripted game of minesweeper in the terminal.
///
/// Moves are read from stdin, one per line: `reveal X Y` or `flag X Y`.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Side length of the square board
    #[arg(short, long, default_value_t = DEFAULT_SIZE)]
    size: Coord,

    /// Number of mines to place at random
    #[arg(short, long, default_value_t = DEFAULT_MINES)]
    mines: CellCount,

    /// Place a mine at X,Y instead of generating the board, can be repeated
    #[arg(long = "mine", value_name = "X,Y", value_parser = script::parse_coords)]
    fixed_mines: Vec<Coord2>,

    /// Force a seed instead of random
    #[arg(long)]
    seed: Option<u64>,

    /// Size of one cell in pixels
    #[arg(long, default_value_t = CELL_PIXELS)]
    cell_pixels: u32,

    /// Frames per second of the input loop
    #[arg(long, default_value_t = TARGET_FPS, value_parser = clap::value_parser!(u32).range(1..=1000))]
    fps: u32,

    /// Print the final state as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let settings = SessionSettings {
        cell_pixels: args.cell_pixels,
        ..Default::default()
    };
    let mut session = create_session(&args, settings)?;

    let moves = script::read_moves(io::stdin().lock())?;
    log::debug!("Loaded {} moves", moves.len());

    let frame_time = Duration::from_secs(1) / args.fps;
    let frames = script::to_frames(&moves, session.mapping(), frame_time, settings.cooldown);
    let state = run(&mut session, frames, frame_time)?;

    let mut stdout = io::stdout().lock();
    if args.json {
        serde_json::to_writer_pretty(&mut stdout, &state).context("could not write final state")?;
        writeln!(stdout)?;
    } else {
        writeln!(stdout, "{}", render::status_label(state.status))?;
    }
    Ok(())
}

fn create_session(args: &Args, settings: SessionSettings) -> anyhow::Result<Session> {
    if !args.fixed_mines.is_empty() {
        let board = Board::from_mine_coords(args.size, &args.fixed_mines).context("invalid mine layout")?;
        return Session::with_board(board, settings).context("invalid mine layout");
    }

    let config = GameConfig::new(args.size, args.mines).context("invalid board")?;
    let seed = args.seed.unwrap_or_else(clock_seed);
    log::info!("seed: {}", seed);
    Session::with_seed(config, seed, settings).context("could not generate board")
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos() as u64)
}

/// Feeds one input frame per tick until the session ends or the script runs out while the game is still going.
fn run(
    session: &mut Session,
    frames: Vec<InputSnapshot>,
    frame_time: Duration,
) -> anyhow::Result<RenderState> {
    let mut stdout = io::stdout().lock();
    let mut frames = frames.into_iter();
    let mut cursor = (0, 0);
    let mut drawn: Option<RenderState> = None;

    loop {
        let frame_start = Instant::now();
        let input = match frames.next() {
            Some(input) => input,
            None if !session.status().is_finished() => {
                log::warn!("Script ended before the game did");
                return Ok(session.render(frame_start));
            }
            None => InputSnapshot::idle(cursor),
        };
        cursor = input.cursor_pixel;

        let state = session.handle_frame(&input, frame_start);
        if drawn.as_ref().is_none_or(|prev| prev.cells != state.cells) {
            write!(stdout, "{}", render::Board(&state))?;
            writeln!(stdout)?;
            stdout.flush()?;
        }
        if state.session_over {
            return Ok(state);
        }
        drawn = Some(state);

        let elapsed = frame_start.elapsed();
        log::trace!("Frame time: {} ms", elapsed.as_millis());
        std::thread::sleep(frame_time.saturating_sub(elapsed));
    }
}
