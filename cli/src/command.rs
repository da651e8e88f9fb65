use anyhow::{Context, bail};
use sweep_core::{Coord, Coord2};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Start,
    Reveal(Coord2),
    Flag(Coord2),
    Show,
    Json,
    Best,
    History,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  start | n         start a new game
  reveal R C | r    reveal the cell at row R, column C
  flag R C | f      toggle a flag at row R, column C
  show | s          redraw the board
  json              print the board state as JSON
  best              print the best recorded time
  history           list recorded wins
  help | ?          this text
  quit | q          exit";

/// Parses one input line. Blank lines yield `None`.
pub fn parse_command(line: &str) -> anyhow::Result<Option<Command>> {
    let mut words = line.split_whitespace();
    let Some(name) = words.next() else {
        return Ok(None);
    };

    let command = match name.to_ascii_lowercase().as_str() {
        "start" | "new" | "n" => Command::Start,
        "reveal" | "r" => Command::Reveal(parse_coords(&mut words)?),
        "flag" | "f" => Command::Flag(parse_coords(&mut words)?),
        "show" | "s" => Command::Show,
        "json" => Command::Json,
        "best" => Command::Best,
        "history" => Command::History,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => bail!("unknown command {other:?}, try \"help\""),
    };

    if let Some(extra) = words.next() {
        bail!("unexpected argument {extra:?}");
    }
    Ok(Some(command))
}

fn parse_coords<'a>(words: &mut impl Iterator<Item = &'a str>) -> anyhow::Result<Coord2> {
    let row = parse_coord(words.next(), "row")?;
    let col = parse_coord(words.next(), "column")?;
    Ok((row, col))
}

fn parse_coord(word: Option<&str>, what: &str) -> anyhow::Result<Coord> {
    let word = word.with_context(|| format!("missing {what}"))?;
    word.parse()
        .with_context(|| format!("invalid {what} {word:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_cell_commands() {
        assert_eq!(parse_command("reveal 3 4").unwrap(), Some(Command::Reveal((3, 4))));
        assert_eq!(parse_command("  f 0 9 ").unwrap(), Some(Command::Flag((0, 9))));
        assert_eq!(parse_command("R 1 1").unwrap(), Some(Command::Reveal((1, 1))));
    }

    #[test]
    fn parses_plain_commands() {
        assert_eq!(parse_command("start").unwrap(), Some(Command::Start));
        assert_eq!(parse_command("q").unwrap(), Some(Command::Quit));
        assert_eq!(parse_command("history").unwrap(), Some(Command::History));
    }

    #[test]
    fn blank_line_is_nothing() {
        assert_eq!(parse_command("").unwrap(), None);
        assert_eq!(parse_command("   ").unwrap(), None);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse_command("reveal 1").is_err());
        assert!(parse_command("reveal a b").is_err());
        assert!(parse_command("flag -1 2").is_err());
        assert!(parse_command("reveal 300 1").is_err());
        assert!(parse_command("show now").is_err());
        assert!(parse_command("dance").is_err());
    }
}
