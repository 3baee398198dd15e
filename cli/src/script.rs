use anyhow::{Context, bail};
use std::io::BufRead;
use std::time::Duration;
use sweeper_core::{Action, CellMapping, Coord, Coord2, InputSnapshot};

/// Frames a button stays down for a single click.
const PRESS_FRAMES: usize = 2;

/// Reads moves, one per line: `reveal X Y` or `flag X Y`. Blank lines and `#` comments are skipped.
pub fn read_moves(reader: impl BufRead) -> anyhow::Result<Vec<Action>> {
    let mut moves = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line.context("could not read script")?;
        let line = line.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }
        let action = parse_move(line).with_context(|| format!("line {}: {:?}", index + 1, line))?;
        moves.push(action);
    }
    Ok(moves)
}

fn parse_move(line: &str) -> anyhow::Result<Action> {
    let mut words = line.split_whitespace();
    let verb = words.next().unwrap_or_default();
    let coords = (parse_coord(words.next())?, parse_coord(words.next())?);
    if words.next().is_some() {
        bail!("trailing input");
    }

    Ok(match verb {
        "reveal" | "r" => Action::Reveal(coords),
        "flag" | "f" => Action::ToggleFlag(coords),
        other => bail!("unknown move {other:?}, expected `reveal` or `flag`"),
    })
}

fn parse_coord(word: Option<&str>) -> anyhow::Result<Coord> {
    let word = word.context("missing coordinate")?;
    word.parse()
        .with_context(|| format!("invalid coordinate {word:?}"))
}

/// Parses `X,Y` as given to `--mine`.
pub fn parse_coords(value: &str) -> anyhow::Result<Coord2> {
    let (x, y) = value.split_once(',').context("expected X,Y")?;
    Ok((parse_coord(Some(x.trim()))?, parse_coord(Some(y.trim()))?))
}

/// Turns every move into the input frames a player would produce: the button goes down over the cell, is released,
/// and the cursor rests until the click cooldown has passed.
pub fn to_frames(
    moves: &[Action],
    mapping: CellMapping,
    frame_time: Duration,
    cooldown: Duration,
) -> Vec<InputSnapshot> {
    let rest_frames = if frame_time.is_zero() {
        1
    } else {
        cooldown.as_nanos().div_ceil(frame_time.as_nanos()) as usize + 1
    };

    let mut frames = Vec::new();
    for &action in moves {
        let pixel = mapping.center_of(action.coords());
        let pressed = match action {
            Action::Reveal(_) => InputSnapshot::left(pixel),
            Action::ToggleFlag(_) => InputSnapshot::right(pixel),
        };
        frames.extend(std::iter::repeat_n(pressed, PRESS_FRAMES));
        frames.extend(std::iter::repeat_n(InputSnapshot::idle(pixel), rest_frames));
    }
    frames
}
