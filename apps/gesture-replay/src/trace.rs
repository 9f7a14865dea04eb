//! Plain-text touch trace format.
//!
//! One step per line:
//!
//! ```text
//! down <id> <x> <y> <t_ms>
//! move <id> <x> <y> <t_ms>
//! up <id> <x> <y> <t_ms>
//! cancel <id> <t_ms>
//! reset
//! ```
//!
//! Blank lines and lines starting with `#` are skipped.

use anyhow::{anyhow, bail, Context, Result};
use gestura_foundation::{Point, PointerEventKind, PointerSample};
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TraceStep {
    Pointer(PointerSample),
    /// Assert the pan reset signal.
    Reset,
}

pub fn parse_trace(text: &str) -> Result<Vec<TraceStep>> {
    let mut steps = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let step = parse_line(line).with_context(|| format!("line {}: {:?}", index + 1, line))?;
        steps.extend(step);
    }
    Ok(steps)
}

fn parse_line(line: &str) -> Result<Option<TraceStep>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut fields = line.split_whitespace();
    let keyword = fields.next().unwrap_or_default();
    let args: Vec<&str> = fields.collect();

    let step = match keyword {
        "reset" => {
            expect_arity(&args, 0)?;
            TraceStep::Reset
        }
        "cancel" => {
            expect_arity(&args, 2)?;
            TraceStep::Pointer(PointerSample::new(
                field(&args, 0, "pointer id")?,
                PointerEventKind::Cancel,
                Point::ZERO,
                field(&args, 1, "time")?,
            ))
        }
        "down" | "move" | "up" => {
            expect_arity(&args, 4)?;
            let kind = match keyword {
                "down" => PointerEventKind::Down,
                "move" => PointerEventKind::Move,
                _ => PointerEventKind::Up,
            };
            TraceStep::Pointer(PointerSample::new(
                field(&args, 0, "pointer id")?,
                kind,
                Point::new(field(&args, 1, "x")?, field(&args, 2, "y")?),
                field(&args, 3, "time")?,
            ))
        }
        other => bail!("unknown step {:?}", other),
    };

    Ok(Some(step))
}

fn expect_arity(args: &[&str], expected: usize) -> Result<()> {
    if args.len() != expected {
        bail!("expected {} arguments, found {}", expected, args.len());
    }
    Ok(())
}

fn field<T>(args: &[&str], index: usize, name: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw = args
        .get(index)
        .ok_or_else(|| anyhow!("missing {}", name))?;
    raw.parse::<T>()
        .with_context(|| format!("invalid {} {:?}", name, raw))
}
