//! Test helpers shared by the motion modules.

use n_text::{Buffer, Region};

use crate::mode::Mode;
use crate::motion::{apply_motion, parse_keys, MotionOutput, MotionRequest};
use crate::options::MotionOptions;
use crate::selection::Selection;
use crate::session::Session;

/// Build a selection from `(a, b)` pairs.
pub(crate) fn sel(regions: &[(usize, usize)]) -> Selection {
    Selection::new(regions.iter().map(|&r| Region::from(r)).collect()).unwrap()
}

/// Run `keys` once and return the full output.
pub(crate) fn run_with(
    buf: &Buffer,
    session: &mut Session,
    keys: &str,
    mode: Mode,
    count: Option<usize>,
    regions: &[(usize, usize)],
) -> MotionOutput {
    let (motion, args) = parse_keys(keys).unwrap();
    let mut request = MotionRequest::new(motion, mode).with_args(args);
    request.count = count;
    apply_motion(buf, session, &MotionOptions::default(), &request, &sel(regions)).unwrap()
}

/// Run `keys` with a fresh session and return the resulting regions as pairs.
pub(crate) fn run(
    buf: &Buffer,
    keys: &str,
    mode: Mode,
    count: Option<usize>,
    regions: &[(usize, usize)],
) -> Vec<(usize, usize)> {
    let out = run_with(buf, &mut Session::new(), keys, mode, count, regions);
    out.selection.iter().map(|r| (r.a, r.b)).collect()
}

/// Single-caret Normal-mode shorthand: the resulting `b`.
pub(crate) fn normal(buf: &Buffer, keys: &str, count: Option<usize>, pt: usize) -> usize {
    run(buf, keys, Mode::Normal, count, &[(pt, pt)])[0].1
}

/// Single-region shorthand for any mode.
pub(crate) fn one(
    buf: &Buffer,
    keys: &str,
    mode: Mode,
    count: Option<usize>,
    region: (usize, usize),
) -> (usize, usize) {
    run(buf, keys, mode, count, &[region])[0]
}
