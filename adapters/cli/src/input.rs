use std::{io::BufRead, sync::mpsc::Sender};

use wanderlands_core::Direction;

/// Player intent decoded from a single key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Input {
    /// Step one tile in the given direction.
    Move(Direction),
    /// Leave the session.
    Quit,
}

/// Decodes a key press. Unmapped keys produce nothing.
pub(crate) fn key_input(key: char) -> Option<Input> {
    let input = match key {
        'a' => Input::Move(Direction::West),
        'd' => Input::Move(Direction::East),
        'w' => Input::Move(Direction::North),
        's' => Input::Move(Direction::South),
        'q' => Input::Quit,
        _ => return None,
    };
    Some(input)
}

/// Forwards decoded keys from a line-buffered reader until it closes or the
/// receiving side hangs up.
pub(crate) fn forward_keys<R>(reader: R, sender: Sender<Input>)
where
    R: BufRead,
{
    for line in reader.lines() {
        let Ok(line) = line else {
            return;
        };
        for input in line.chars().filter_map(key_input) {
            if sender.send(input).is_err() {
                return;
            }
        }
    }
}
