use n_engine::{
    apply_motion, parse_keys, Mode, MotionOptions, MotionRequest, Selection, Session, VisualKind,
};
use n_text::{Buffer, Region, TextQuery};
use proptest::prelude::*;

fn apply(
    buf: &Buffer,
    session: &mut Session,
    keys: &str,
    count: Option<usize>,
    pt: usize,
) -> usize {
    let (motion, args) = parse_keys(keys).unwrap();
    let mut request = MotionRequest::new(motion, Mode::Normal).with_args(args);
    request.count = count;
    let out = apply_motion(
        buf,
        session,
        &MotionOptions::default(),
        &request,
        &Selection::caret(pt),
    )
    .unwrap();
    out.selection.first().b
}

fn text_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[a-z .!?()]{0,40}",
        "[a-z (){}\n]{0,120}",
        r"[a-z ]{0,20}\n\n[a-z ]{0,20}",
        "[ \t]{0,6}\n[ \t]{0,6}\n[a-z]{0,10}\n?",
    ]
}

fn motion_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "h", "l", "j", "k", "0", "^", "$", "_", "g_", "w", "W", "b", "B", "e", "E", "ge", "}",
        "{", ")", "(", "%", "gg", "G", "H", "M", "L", "<C-d>", "<C-u>", "<C-f>", "<C-b>",
    ])
}

fn mode_strategy() -> impl Strategy<Value = Mode> {
    prop::sample::select(vec![
        Mode::Normal,
        Mode::OperatorPending,
        Mode::Visual(VisualKind::Char),
        Mode::Visual(VisualKind::Line),
        Mode::Visual(VisualKind::Block),
        Mode::Select,
    ])
}

/// A starting region that fits `mode`: a caret outside the visual modes, one
/// selected char (either direction) inside them.
fn start_region(mode: Mode, size: usize, start: usize, reversed: bool) -> Region {
    let pt = start.min(size);
    if !mode.is_visual() || size == 0 {
        return Region::point(pt);
    }
    let pt = pt.min(size - 1);
    if reversed {
        Region::new(pt + 1, pt)
    } else {
        Region::new(pt, pt + 1)
    }
}

proptest! {
    #[test]
    fn every_mode_stays_in_bounds(
        text in text_strategy(),
        keys in motion_strategy(),
        mode in mode_strategy(),
        count in prop::option::of(1usize..6),
        start in 0usize..200,
        reversed in any::<bool>(),
    ) {
        let buf = Buffer::from_text(&text);
        let (motion, args) = parse_keys(keys).unwrap();
        let mut request = MotionRequest::new(motion, mode).with_args(args);
        request.count = count;
        let selection = Selection::single(start_region(mode, buf.size(), start, reversed));
        let out = apply_motion(
            &buf,
            &mut Session::new(),
            &MotionOptions::default(),
            &request,
            &selection,
        )
        .unwrap();
        for r in out.selection.iter() {
            prop_assert!(r.a <= buf.size() && r.b <= buf.size());
        }
    }

    #[test]
    fn normal_motions_stay_in_bounds(
        text in text_strategy(),
        keys in motion_strategy(),
        count in prop::option::of(1usize..6),
        start in 0usize..200,
    ) {
        let buf = Buffer::from_text(&text);
        let pt = start.min(buf.size());
        let landed = apply(&buf, &mut Session::new(), keys, count, pt);
        prop_assert!(landed <= buf.size());
    }

    #[test]
    fn horizontal_counts_add_up(
        text in "[a-z ]{1,40}",
        start in 0usize..40,
        n in 1usize..10,
        m in 1usize..10,
    ) {
        let buf = Buffer::from_text(&text);
        let pt = start.min(buf.size() - 1);
        for keys in ["h", "l"] {
            let stepped = apply(&buf, &mut Session::new(), keys, Some(n), pt);
            let stepped = apply(&buf, &mut Session::new(), keys, Some(m), stepped);
            let direct = apply(&buf, &mut Session::new(), keys, Some(n + m), pt);
            prop_assert_eq!(stepped, direct);
        }
    }

    #[test]
    fn vertical_counts_add_up(
        lines in prop::collection::vec("[a-z ]{0,12}", 1..12),
        start in 0usize..200,
        n in 1usize..6,
        m in 1usize..6,
    ) {
        let buf = Buffer::from_text(&lines.join("\n"));
        let pt = start.min(buf.size());
        for keys in ["j", "k"] {
            let mut session = Session::new();
            let stepped = apply(&buf, &mut session, keys, Some(n), pt);
            let stepped = apply(&buf, &mut session, keys, Some(m), stepped);
            let direct = apply(&buf, &mut Session::new(), keys, Some(n + m), pt);
            prop_assert_eq!(stepped, direct);
        }
    }

    #[test]
    fn word_forward_then_back_returns(
        words in prop::collection::vec("[a-z]{1,6}", 2..8),
        pick in 0usize..8,
    ) {
        let text = words.join(" ");
        let buf = Buffer::from_text(&text);
        let index = pick % (words.len() - 1);
        let start: usize = words[..index].iter().map(|w| w.len() + 1).sum();

        let next = apply(&buf, &mut Session::new(), "w", None, start);
        prop_assert_eq!(next, start + words[index].len() + 1);
        let back = apply(&buf, &mut Session::new(), "b", None, next);
        prop_assert_eq!(back, start);
    }

    #[test]
    fn percent_round_trips(
        before in "[a-z ]{0,10}",
        inside in "[a-z ]{0,10}",
        after in "[a-z ]{0,10}",
    ) {
        let text = format!("{before}({inside}){after}");
        let buf = Buffer::from_text(&text);
        let open = before.len();
        let close = open + inside.len() + 1;

        prop_assert_eq!(apply(&buf, &mut Session::new(), "%", None, open), close);
        prop_assert_eq!(apply(&buf, &mut Session::new(), "%", None, close), open);
    }
}
