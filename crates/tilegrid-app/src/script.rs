// Event script: one command per stdin line, replayed against the launcher.

use tilegrid_core::{InputEvent, Vec2};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Event(InputEvent),
    Show,
    Reset(Option<String>),
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ParseError(pub String);

/// Parse one script line. Blank lines and `#` comments yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<Command>, ParseError> {
    let line = line.split('#').next().unwrap_or("").trim();
    if line.is_empty() {
        return Ok(None);
    }

    let mut words = line.split_whitespace();
    let verb = words.next().unwrap_or("").to_ascii_lowercase();
    let args: Vec<&str> = words.collect();

    let command = match verb.as_str() {
        "down" => Command::Event(InputEvent::PointerDown { position: point(&args)? }),
        "move" => Command::Event(InputEvent::PointerMove { position: point(&args)? }),
        "up" => Command::Event(InputEvent::PointerUp { position: point(&args)? }),
        "click" => Command::Event(InputEvent::Click { position: point(&args)? }),
        "show" => Command::Show,
        "reset" => match args.as_slice() {
            [] => Command::Reset(None),
            [tile] => Command::Reset(Some(tile.to_string())),
            _ => return Err(ParseError("usage: reset [TILE]".to_string())),
        },
        "quit" | "exit" => Command::Quit,
        other => return Err(ParseError(format!("unknown command {:?}", other))),
    };
    Ok(Some(command))
}

fn point(args: &[&str]) -> Result<Vec2, ParseError> {
    let [x, y] = args else {
        return Err(ParseError("expected X Y".to_string()));
    };
    let coord = |s: &str| {
        s.parse::<f32>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| ParseError(format!("bad coordinate {:?}", s)))
    };
    Ok(Vec2::new(coord(*x)?, coord(*y)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_pointer_events() {
        assert_eq!(
            parse_line("down 10 20").unwrap(),
            Some(Command::Event(InputEvent::PointerDown { position: Vec2::new(10.0, 20.0) }))
        );
        assert_eq!(
            parse_line("  MOVE 1.5 -3 ").unwrap(),
            Some(Command::Event(InputEvent::PointerMove { position: Vec2::new(1.5, -3.0) }))
        );
        assert!(matches!(parse_line("up 0 0"), Ok(Some(Command::Event(InputEvent::PointerUp { .. })))));
        assert!(matches!(parse_line("click 0 0"), Ok(Some(Command::Event(InputEvent::Click { .. })))));
    }

    #[test]
    fn skips_blank_and_comment_lines() {
        assert_eq!(parse_line("").unwrap(), None);
        assert_eq!(parse_line("   # just a note").unwrap(), None);
        assert_eq!(parse_line("show # trailing").unwrap(), Some(Command::Show));
    }

    #[test]
    fn parses_reset_and_quit() {
        assert_eq!(parse_line("reset").unwrap(), Some(Command::Reset(None)));
        assert_eq!(
            parse_line("reset orders").unwrap(),
            Some(Command::Reset(Some("orders".to_string())))
        );
        assert_eq!(parse_line("quit").unwrap(), Some(Command::Quit));
    }

    #[test]
    fn rejects_malformed_lines() {
        assert!(parse_line("down 1").is_err());
        assert!(parse_line("down 1 2 3").is_err());
        assert!(parse_line("down x 2").is_err());
        assert!(parse_line("down NaN 2").is_err());
        assert!(parse_line("reset a b").is_err());
        assert!(parse_line("jump 1 2").is_err());
    }
}
