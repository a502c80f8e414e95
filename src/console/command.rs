use crate::error::CommandError;
use region_recolor::{Point, Rgb};
use std::str::FromStr;

/// One line of operator input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Rect { x1: i32, y1: i32, x2: i32, y2: i32 },
    Ellipse { x1: i32, y1: i32, x2: i32, y2: i32 },
    Lasso(Vec<Point>),
    Draw(Vec<Point>),
    Erase(Vec<Point>),
    /// Displayed size region coordinates refer to; `None` = image pixels
    View(Option<(u32, u32)>),
    Undo,
    Redo,
    Preview,
    /// Process the image if it has edits, otherwise skip it
    Next,
    Skip,
    Prev,
    Status,
    Colors,
    TargetAdd(Rgb),
    TargetRemove(Rgb),
    Replace(Rgb),
    Tolerance(u8),
    Saturation(u8),
    Value(u8),
    AutoPreview(bool),
    Rescan,
    Finish,
    Quit,
    Help,
}

pub const HELP: &str = "\
Regions (image pixels, or view coordinates after 'view W H'):
  rect X1 Y1 X2 Y2        filled rectangle, corners inclusive
  ellipse X1 Y1 X2 Y2     ellipse inside the bounding box
  lasso X,Y X,Y X,Y ...   filled polygon (3+ points)
  draw X,Y X,Y X,Y ...    add polygon to the mask
  erase X,Y X,Y X,Y ...   remove polygon from the mask
  view W H | view off     size the image is displayed at
Editing:
  undo | redo             step through region history
  preview                 recolor now and write a highlighted preview
  autopreview on|off      recolor after every edit
Navigation:
  next                    process (if edited) and go to the next image
  skip                    keep this image as is and go on
  prev                    go back one image
  status                  where am I
  finish                  save the document and write reports
  quit                    leave without saving
Colors:
  colors                  list target and replacement colors
  target add|remove COLOR
  replace COLOR           COLOR is #RRGGBB, #RGB or R,G,B
  tolerance N | saturation N | value N
  rescan                  count images matching the current colors
";

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Err(CommandError::Usage("type 'help' for a list of commands"));
        };
        let args: Vec<&str> = words.collect();
        let name = head.to_ascii_lowercase();

        match name.as_str() {
            "rect" | "rectangle" => {
                let [x1, y1, x2, y2] = four_numbers(&args, "rect X1 Y1 X2 Y2")?;
                Ok(Command::Rect { x1, y1, x2, y2 })
            }
            "ellipse" => {
                let [x1, y1, x2, y2] = four_numbers(&args, "ellipse X1 Y1 X2 Y2")?;
                Ok(Command::Ellipse { x1, y1, x2, y2 })
            }
            "lasso" => Ok(Command::Lasso(points(&args, "lasso X,Y X,Y X,Y ...")?)),
            "draw" => Ok(Command::Draw(points(&args, "draw X,Y X,Y X,Y ...")?)),
            "erase" => Ok(Command::Erase(points(&args, "erase X,Y X,Y X,Y ...")?)),
            "view" => match args.as_slice() {
                ["off"] => Ok(Command::View(None)),
                [w, h] => Ok(Command::View(Some((number(w)?, number(h)?)))),
                _ => Err(CommandError::Usage("view W H | view off")),
            },
            "undo" => no_args(&args, Command::Undo, "undo"),
            "redo" => no_args(&args, Command::Redo, "redo"),
            "preview" => no_args(&args, Command::Preview, "preview"),
            "next" | "n" => no_args(&args, Command::Next, "next"),
            "skip" => no_args(&args, Command::Skip, "skip"),
            "prev" | "previous" | "p" => no_args(&args, Command::Prev, "prev"),
            "status" => no_args(&args, Command::Status, "status"),
            "colors" => no_args(&args, Command::Colors, "colors"),
            "rescan" => no_args(&args, Command::Rescan, "rescan"),
            "finish" => no_args(&args, Command::Finish, "finish"),
            "quit" | "exit" | "q" => no_args(&args, Command::Quit, "quit"),
            "help" | "?" => Ok(Command::Help),
            "target" => match args.split_first() {
                Some((&"add", rest)) if !rest.is_empty() => Ok(Command::TargetAdd(color(rest)?)),
                Some((&"remove", rest)) if !rest.is_empty() => {
                    Ok(Command::TargetRemove(color(rest)?))
                }
                _ => Err(CommandError::Usage("target add|remove COLOR")),
            },
            "replace" if !args.is_empty() => Ok(Command::Replace(color(&args)?)),
            "replace" => Err(CommandError::Usage("replace COLOR")),
            "tolerance" => Ok(Command::Tolerance(single_number(&args, "tolerance N")?)),
            "saturation" => Ok(Command::Saturation(single_number(&args, "saturation N")?)),
            "value" => Ok(Command::Value(single_number(&args, "value N")?)),
            "autopreview" => match args.as_slice() {
                ["on"] => Ok(Command::AutoPreview(true)),
                ["off"] => Ok(Command::AutoPreview(false)),
                _ => Err(CommandError::Usage("autopreview on|off")),
            },
            _ => Err(CommandError::Unknown(head.to_string())),
        }
    }
}

fn no_args(args: &[&str], command: Command, usage: &'static str) -> Result<Command, CommandError> {
    if args.is_empty() {
        Ok(command)
    } else {
        Err(CommandError::Usage(usage))
    }
}

fn number<T: FromStr>(s: &str) -> Result<T, CommandError> {
    s.parse().map_err(|_| CommandError::Number(s.to_string()))
}

fn single_number(args: &[&str], usage: &'static str) -> Result<u8, CommandError> {
    match args {
        [n] => number(n),
        _ => Err(CommandError::Usage(usage)),
    }
}

fn four_numbers(args: &[&str], usage: &'static str) -> Result<[i32; 4], CommandError> {
    match args {
        [a, b, c, d] => Ok([number(a)?, number(b)?, number(c)?, number(d)?]),
        _ => Err(CommandError::Usage(usage)),
    }
}

fn points(args: &[&str], usage: &'static str) -> Result<Vec<Point>, CommandError> {
    if args.is_empty() {
        return Err(CommandError::Usage(usage));
    }
    args.iter()
        .map(|arg| {
            let (x, y) = arg
                .split_once(',')
                .ok_or_else(|| CommandError::Point(arg.to_string()))?;
            let x = x.trim().parse().map_err(|_| CommandError::Point(arg.to_string()))?;
            let y = y.trim().parse().map_err(|_| CommandError::Point(arg.to_string()))?;
            Ok(Point::new(x, y))
        })
        .collect()
}

fn color(args: &[&str]) -> Result<Rgb, CommandError> {
    let text = args.join(" ");
    text.parse()
        .map_err(|e: region_recolor::ParseColorError| CommandError::Color(format!("{text} ({e})")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(line: &str) -> Result<Command, CommandError> {
        line.parse()
    }

    #[test]
    fn test_shapes() {
        assert_eq!(
            parse("rect 1 2 30 40").unwrap(),
            Command::Rect {
                x1: 1,
                y1: 2,
                x2: 30,
                y2: 40
            }
        );
        assert_eq!(
            parse("  ELLIPSE 5 5 -1 9 ").unwrap(),
            Command::Ellipse {
                x1: 5,
                y1: 5,
                x2: -1,
                y2: 9
            }
        );
        assert_eq!(
            parse("lasso 0,0 10,0 5,8").unwrap(),
            Command::Lasso(vec![Point::new(0, 0), Point::new(10, 0), Point::new(5, 8)])
        );
        assert_eq!(
            parse("erase 1,1 2,2").unwrap(),
            Command::Erase(vec![Point::new(1, 1), Point::new(2, 2)])
        );
    }

    #[test]
    fn test_view() {
        assert_eq!(parse("view 800 600").unwrap(), Command::View(Some((800, 600))));
        assert_eq!(parse("view off").unwrap(), Command::View(None));
        assert_eq!(
            parse("view 800").unwrap_err(),
            CommandError::Usage("view W H | view off")
        );
    }

    #[test]
    fn test_colors() {
        assert_eq!(
            parse("target add #EC131B").unwrap(),
            Command::TargetAdd(Rgb::new(236, 19, 27))
        );
        assert_eq!(
            parse("target remove 0, 200, 0").unwrap(),
            Command::TargetRemove(Rgb::new(0, 200, 0))
        );
        assert_eq!(parse("replace fff").unwrap(), Command::Replace(Rgb::new(255, 255, 255)));
        assert!(matches!(parse("replace #12"), Err(CommandError::Color(_))));
        assert_eq!(
            parse("target add").unwrap_err(),
            CommandError::Usage("target add|remove COLOR")
        );
    }

    #[test]
    fn test_thresholds_and_toggles() {
        assert_eq!(parse("tolerance 12").unwrap(), Command::Tolerance(12));
        assert_eq!(parse("value 0").unwrap(), Command::Value(0));
        assert_eq!(
            parse("saturation 300").unwrap_err(),
            CommandError::Number("300".to_string())
        );
        assert_eq!(parse("autopreview off").unwrap(), Command::AutoPreview(false));
    }

    #[test]
    fn test_simple_commands() {
        assert_eq!(parse("next").unwrap(), Command::Next);
        assert_eq!(parse("q").unwrap(), Command::Quit);
        assert_eq!(parse("prev").unwrap(), Command::Prev);
        assert_eq!(parse("undo now").unwrap_err(), CommandError::Usage("undo"));
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            parse("frobnicate").unwrap_err(),
            CommandError::Unknown("frobnicate".to_string())
        );
        assert_eq!(
            parse("rect 1 2 x 4").unwrap_err(),
            CommandError::Number("x".to_string())
        );
        assert_eq!(
            parse("lasso 1;2").unwrap_err(),
            CommandError::Point("1;2".to_string())
        );
        assert!(matches!(parse("   "), Err(CommandError::Usage(_))));
    }
}
