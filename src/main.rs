// SPDX-License-Identifier: MIT
//
// n-motion: replay Vim motions against a file.
//
//   n-motion [options] FILE MOTION...
//
// Each MOTION is a key sequence the engine understands ("w", "3j", "fx",
// "/foo", "<C-d>", "iw"), applied in order to one running selection with
// one session, the way a host would feed them:
//
//   args → Buffer::from_file → parse_keys → apply_motion → print selection
//                                              │
//                                              └── ScrollBy → viewport
//
// Every step prints the motion, the resulting regions, and any status
// message. Logging goes to stderr, filtered by N_MOTION_LOG, then RUST_LOG,
// defaulting to `warn`.

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::process;

use n_engine::{
    apply_motion, parse_keys, Mode, MotionOptions, MotionRequest, Outcome, Selection, Session,
    SideEffect, VisualKind,
};
use n_text::{Buffer, Region, TextQuery, Viewport};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
usage: n-motion [options] FILE MOTION...

options:
  --mode <m>       normal, visual, vline, vblock, op, select (default normal)
  --at <a>[:<b>]   starting region as char offsets (default 0)
  --set <args>     :set directives, e.g. \"noic nows scroll=5\"
  --tabstop <n>    tab width (default 8)
  --rows <n>       viewport height in rows (default 24)";

// ─── Arguments ──────────────────────────────────────────────────────────────

#[derive(Debug)]
struct Args {
    mode: Mode,
    at: (usize, Option<usize>),
    set: Vec<String>,
    tabstop: Option<usize>,
    rows: usize,
    file: PathBuf,
    motions: Vec<String>,
}

fn parse_number(flag: &str, value: &str) -> Result<usize, String> {
    value
        .parse()
        .map_err(|_| format!("{flag}: expected a number, got {value:?}"))
}

fn parse_at(value: &str) -> Result<(usize, Option<usize>), String> {
    match value.split_once(':') {
        Some((a, b)) => Ok((parse_number("--at", a)?, Some(parse_number("--at", b)?))),
        None => Ok((parse_number("--at", value)?, None)),
    }
}

fn parse_args(raw: impl IntoIterator<Item = String>) -> Result<Args, String> {
    let mut mode = Mode::Normal;
    let mut at = (0, None);
    let mut set = Vec::new();
    let mut tabstop = None;
    let mut rows = 24;
    let mut positional = Vec::new();

    let mut raw = raw.into_iter();
    while let Some(arg) = raw.next() {
        let mut value = |flag: &str| raw.next().ok_or_else(|| format!("{flag} needs a value"));
        match arg.as_str() {
            "--mode" => mode = value("--mode")?.parse()?,
            "--at" => at = parse_at(&value("--at")?)?,
            "--set" => set.push(value("--set")?),
            "--tabstop" => tabstop = Some(parse_number("--tabstop", &value("--tabstop")?)?),
            "--rows" => rows = parse_number("--rows", &value("--rows")?)?,
            "-h" | "--help" => return Err(USAGE.to_string()),
            // A lone `--` ends the options, so motions like `--` never clash.
            "--" => {
                positional.extend(raw.by_ref());
                break;
            }
            _ => positional.push(arg),
        }
    }

    let mut positional = positional.into_iter();
    let file = positional.next().ok_or_else(|| USAGE.to_string())?;
    Ok(Args {
        mode,
        at,
        set,
        tabstop,
        rows,
        file: PathBuf::from(file),
        motions: positional.collect(),
    })
}

/// Split a leading count off a key sequence: `"3w"` → `(Some(3), "w")`.
/// A leading `0` is the motion, not a count.
fn split_count(keys: &str) -> (Option<usize>, &str) {
    let digits = keys.find(|c: char| !c.is_ascii_digit()).unwrap_or(keys.len());
    if digits == 0 || digits == keys.len() || keys.starts_with('0') {
        return (None, keys);
    }
    (keys[..digits].parse().ok(), &keys[digits..])
}

/// The starting region, clamped to the buffer. Visual modes without an
/// explicit end select the char under the cursor.
fn start_region(at: (usize, Option<usize>), mode: Mode, size: usize) -> Region {
    let a = at.0.min(size);
    let b = match at.1 {
        Some(b) => b.min(size),
        None if mode.is_visual() && a < size => a + 1,
        None => a,
    };
    Region::new(a, b)
}

// ─── Logging ────────────────────────────────────────────────────────────────

fn init_logging() {
    let filter = env::var("N_MOTION_LOG")
        .or_else(|_| env::var("RUST_LOG"))
        .map_or_else(|_| EnvFilter::new("warn"), EnvFilter::new);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// ─── Replay ─────────────────────────────────────────────────────────────────

fn fail(message: impl fmt::Display) -> ! {
    eprintln!("n-motion: {message}");
    process::exit(1);
}

fn mode_suffix(mode: Mode) -> &'static str {
    match mode {
        Mode::Normal => "",
        Mode::Visual(VisualKind::Char) => " (v)",
        Mode::Visual(VisualKind::Line) => " (V)",
        Mode::Visual(VisualKind::Block) => " (^V)",
        Mode::OperatorPending => " (op)",
        Mode::Select => " (select)",
    }
}

fn replay(args: &Args) {
    let mut buffer = Buffer::from_file(&args.file)
        .unwrap_or_else(|e| fail(format!("{}: {e}", args.file.display())));
    if let Some(tabstop) = args.tabstop {
        buffer.set_tab_size(tabstop);
    }
    buffer.set_viewport(Viewport::rows(0, args.rows));

    let mut options = MotionOptions::default();
    for directive in &args.set {
        match options.apply_set(directive) {
            Ok(shown) => shown.iter().for_each(|line| println!("{line}")),
            Err(e) => fail(e),
        }
    }
    info!(file = %args.file.display(), mode = %args.mode, motions = args.motions.len(), "replaying");

    let start = start_region(args.at, args.mode, buffer.size());
    let mut selection = Selection::single(start);
    let mut session = Session::new();
    println!("start{}    {selection}", mode_suffix(args.mode));

    for raw in &args.motions {
        let (count, keys) = split_count(raw);
        let (motion, motion_args) = parse_keys(keys).unwrap_or_else(|e| fail(e));
        let mut request = MotionRequest::new(motion, args.mode).with_args(motion_args);
        request.count = count;

        let out = apply_motion(&buffer, &mut session, &options, &request, &selection)
            .unwrap_or_else(|e| fail(format!("{raw}: {e}")));

        let marker = match out.outcome {
            Outcome::Moved => "",
            Outcome::NoOp => "  (no-op)",
        };
        println!("{raw:<8} {}{marker}", out.selection);
        for effect in &out.effects {
            match effect {
                SideEffect::ScrollBy(rows) => buffer.viewport_mut().scroll_by(*rows),
                SideEffect::Message(message) => println!("         {message}"),
                other => debug!(?other, "host effect"),
            }
        }
        selection = out.selection;
    }
}

fn main() {
    init_logging();
    match parse_args(env::args().skip(1)) {
        Ok(args) => replay(&args),
        Err(message) => {
            eprintln!("{message}");
            process::exit(2);
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<Args, String> {
        parse_args(list.iter().map(ToString::to_string))
    }

    // ── Arguments ─────────────────────────────────────────────────────────

    #[test]
    fn file_and_motions() {
        let a = args(&["notes.txt", "w", "3j"]).unwrap();
        assert_eq!(a.file, PathBuf::from("notes.txt"));
        assert_eq!(a.motions, vec!["w", "3j"]);
        assert_eq!(a.mode, Mode::Normal);
        assert_eq!(a.rows, 24);
    }

    #[test]
    fn flags_before_file() {
        let a = args(&[
            "--mode", "vline", "--at", "4:9", "--set", "noic", "--tabstop", "4", "f.txt",
        ])
        .unwrap();
        assert_eq!(a.mode, Mode::Visual(VisualKind::Line));
        assert_eq!(a.at, (4, Some(9)));
        assert_eq!(a.set, vec!["noic"]);
        assert_eq!(a.tabstop, Some(4));
    }

    #[test]
    fn double_dash_ends_options() {
        let a = args(&["f.txt", "--", "--mode"]).unwrap();
        assert_eq!(a.motions, vec!["--mode"]);
    }

    #[test]
    fn missing_file_is_usage() {
        assert!(args(&[]).unwrap_err().starts_with("usage"));
    }

    #[test]
    fn bad_values_are_reported() {
        assert!(args(&["--rows", "x", "f"]).is_err());
        assert!(args(&["--mode", "insert", "f"]).is_err());
        assert!(args(&["f", "--at"]).is_err());
    }

    // ── Counts ────────────────────────────────────────────────────────────

    #[test]
    fn count_prefix() {
        assert_eq!(split_count("3w"), (Some(3), "w"));
        assert_eq!(split_count("12G"), (Some(12), "G"));
        assert_eq!(split_count("0"), (None, "0"));
        assert_eq!(split_count("w"), (None, "w"));
        assert_eq!(split_count("/12"), (None, "/12"));
    }

    // ── Start region ──────────────────────────────────────────────────────

    #[test]
    fn start_region_clamps_and_selects_in_visual() {
        assert_eq!(start_region((50, None), Mode::Normal, 10), Region::new(10, 10));
        let v = Mode::Visual(VisualKind::Char);
        assert_eq!(start_region((2, None), v, 10), Region::new(2, 3));
        assert_eq!(start_region((2, Some(5)), v, 10), Region::new(2, 5));
        assert_eq!(start_region((0, None), v, 0), Region::new(0, 0));
    }
}
