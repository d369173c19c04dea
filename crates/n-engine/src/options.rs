//! Motion options: the `:set` layer.
//!
//! [`MotionOptions`] holds the options motions consult. It is updated from
//! `:set`-style argument strings, parsed into [`SetDirective`]s.
//!
//! # Supported syntax
//!
//! | Syntax           | Effect                        |
//! |------------------|-------------------------------|
//! | `option`         | Enable boolean / show numeric |
//! | `nooption`       | Disable boolean               |
//! | `option!`        | Toggle boolean                |
//! | `option?`        | Query current value           |
//! | `option=N`       | Assign numeric value          |
//! | (empty)          | Show changed options          |
//! | `all`            | Show all options              |
//!
//! # Option names
//!
//! | Full name    | Abbrev | Type    | Default |
//! |--------------|--------|---------|---------|
//! | `ignorecase` | `ic`   | bool    | true    |
//! | `smartcase`  | `scs`  | bool    | true    |
//! | `magic`      |        | bool    | true    |
//! | `wrapscan`   | `ws`   | bool    | true    |
//! | `hlsearch`   | `hls`  | bool    | true    |
//! | `incsearch`  | `is`   | bool    | true    |
//! | `scroll`     | `scr`  | integer | 0       |

use n_text::FindFlags;

use crate::error::OptionError;

/// A parsed `:set` directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetDirective {
    /// `option`: enable a boolean option.
    On(String),
    /// `nooption`: disable a boolean option.
    Off(String),
    /// `option!`: toggle a boolean option.
    Toggle(String),
    /// `option?`: query the current value.
    Query(String),
    /// `option=value`: assign a value.
    Assign(String, String),
    /// No arguments: show changed options.
    ShowChanged,
    /// `all`: show all options.
    ShowAll,
}

/// Returns `true` if `name` is a known boolean option (full name or abbreviation).
#[must_use]
pub fn is_bool_option(name: &str) -> bool {
    matches!(
        name,
        "ignorecase"
            | "ic"
            | "smartcase"
            | "scs"
            | "magic"
            | "wrapscan"
            | "ws"
            | "hlsearch"
            | "hls"
            | "incsearch"
            | "is"
    )
}

/// Returns `true` if `name` is a known numeric option (full name or abbreviation).
#[must_use]
pub fn is_numeric_option(name: &str) -> bool {
    matches!(name, "scroll" | "scr")
}

/// Parse the full `:set` arguments string into directives.
#[must_use]
pub fn parse_set(args: &str) -> Vec<SetDirective> {
    let trimmed = args.trim();
    if trimmed.is_empty() {
        return vec![SetDirective::ShowChanged];
    }
    trimmed.split_whitespace().map(parse_set_arg).collect()
}

/// Parse a single `:set` argument into a directive.
#[must_use]
pub fn parse_set_arg(arg: &str) -> SetDirective {
    if arg == "all" {
        return SetDirective::ShowAll;
    }

    if let Some((name, value)) = arg.split_once('=') {
        return SetDirective::Assign(name.to_string(), value.to_string());
    }

    if let Some(name) = arg.strip_suffix('?') {
        return SetDirective::Query(name.to_string());
    }

    if let Some(name) = arg.strip_suffix('!') {
        return SetDirective::Toggle(name.to_string());
    }

    // `nomagic` → Off("magic"), but never strip "no" off a name that is not
    // a boolean option once stripped.
    if let Some(name) = arg.strip_prefix("no") {
        if !name.is_empty() && is_bool_option(name) {
            return SetDirective::Off(name.to_string());
        }
    }

    if is_numeric_option(arg) {
        return SetDirective::Query(arg.to_string());
    }

    SetDirective::On(arg.to_string())
}

// ---------------------------------------------------------------------------
// MotionOptions
// ---------------------------------------------------------------------------

/// Options read by search and scroll motions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct MotionOptions {
    pub ignorecase: bool,
    pub smartcase: bool,
    /// Off: search terms are literal strings.
    pub magic: bool,
    pub wrapscan: bool,
    pub hlsearch: bool,
    pub incsearch: bool,
    /// Lines for Ctrl-D/Ctrl-U; 0 means half the window.
    pub scroll: usize,
}

impl Default for MotionOptions {
    fn default() -> Self {
        Self {
            ignorecase: true,
            smartcase: true,
            magic: true,
            wrapscan: true,
            hlsearch: true,
            incsearch: true,
            scroll: 0,
        }
    }
}

impl MotionOptions {
    /// Search flags for `term`: literal unless `magic`, case-insensitive when
    /// `ignorecase` holds and `smartcase` does not see an uppercase letter.
    #[must_use]
    pub fn find_flags(&self, term: &str) -> FindFlags {
        let mut flags = FindFlags::empty();
        if !self.magic {
            flags |= FindFlags::LITERAL;
        }
        let has_upper = term.chars().any(char::is_uppercase);
        if self.ignorecase && !(self.smartcase && has_upper) {
            flags |= FindFlags::IGNORECASE;
        }
        flags
    }

    /// Apply a `:set` argument string. Returns the lines to show for queries
    /// and listings.
    ///
    /// # Errors
    ///
    /// Fails on the first unknown option, boolean directive on a numeric
    /// option, or non-numeric assignment. Directives before it stay applied.
    pub fn apply_set(&mut self, args: &str) -> Result<Vec<String>, OptionError> {
        let mut shown = Vec::new();
        for directive in parse_set(args) {
            match directive {
                SetDirective::On(name) => *self.flag_mut(&name)? = true,
                SetDirective::Off(name) => *self.flag_mut(&name)? = false,
                SetDirective::Toggle(name) => {
                    let flag = self.flag_mut(&name)?;
                    *flag = !*flag;
                }
                SetDirective::Query(name) => shown.push(self.format(&name)?),
                SetDirective::Assign(name, value) => {
                    if !is_numeric_option(&name) {
                        return Err(if is_bool_option(&name) {
                            OptionError::NotBoolean(name)
                        } else {
                            OptionError::UnknownOption(name)
                        });
                    }
                    self.scroll = value
                        .parse()
                        .map_err(|_| OptionError::InvalidValue { name, value })?;
                }
                SetDirective::ShowChanged => {
                    let defaults = Self::default();
                    for name in ALL_OPTIONS {
                        let line = self.format(name)?;
                        if line != defaults.format(name)? {
                            shown.push(line);
                        }
                    }
                }
                SetDirective::ShowAll => {
                    for name in ALL_OPTIONS {
                        shown.push(self.format(name)?);
                    }
                }
            }
        }
        Ok(shown)
    }

    fn flag_mut(&mut self, name: &str) -> Result<&mut bool, OptionError> {
        match name {
            "ignorecase" | "ic" => Ok(&mut self.ignorecase),
            "smartcase" | "scs" => Ok(&mut self.smartcase),
            "magic" => Ok(&mut self.magic),
            "wrapscan" | "ws" => Ok(&mut self.wrapscan),
            "hlsearch" | "hls" => Ok(&mut self.hlsearch),
            "incsearch" | "is" => Ok(&mut self.incsearch),
            _ if is_numeric_option(name) => Err(OptionError::NotBoolean(name.to_string())),
            _ => Err(OptionError::UnknownOption(name.to_string())),
        }
    }

    fn format(&self, name: &str) -> Result<String, OptionError> {
        let (full, value) = match name {
            "ignorecase" | "ic" => ("ignorecase", self.ignorecase),
            "smartcase" | "scs" => ("smartcase", self.smartcase),
            "magic" => ("magic", self.magic),
            "wrapscan" | "ws" => ("wrapscan", self.wrapscan),
            "hlsearch" | "hls" => ("hlsearch", self.hlsearch),
            "incsearch" | "is" => ("incsearch", self.incsearch),
            "scroll" | "scr" => return Ok(format!("scroll={}", self.scroll)),
            _ => return Err(OptionError::UnknownOption(name.to_string())),
        };
        Ok(format_bool(full, value))
    }
}

const ALL_OPTIONS: [&str; 7] = [
    "hlsearch",
    "ignorecase",
    "incsearch",
    "magic",
    "scroll",
    "smartcase",
    "wrapscan",
];

/// Format a boolean option for display: `"name"` when true, `"noname"` when
/// false.
#[must_use]
pub fn format_bool(name: &str, value: bool) -> String {
    if value {
        name.to_string()
    } else {
        format!("no{name}")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // ── parse_set_arg ─────────────────────────────────────────────────────

    #[test]
    fn parse_boolean_on_off() {
        assert_eq!(parse_set_arg("ic"), SetDirective::On("ic".into()));
        assert_eq!(parse_set_arg("noic"), SetDirective::Off("ic".into()));
        assert_eq!(parse_set_arg("nomagic"), SetDirective::Off("magic".into()));
    }

    #[test]
    fn parse_toggle_query_assign() {
        assert_eq!(parse_set_arg("ws!"), SetDirective::Toggle("ws".into()));
        assert_eq!(parse_set_arg("hls?"), SetDirective::Query("hls".into()));
        assert_eq!(
            parse_set_arg("scroll=5"),
            SetDirective::Assign("scroll".into(), "5".into())
        );
    }

    #[test]
    fn parse_bare_numeric_is_query() {
        assert_eq!(parse_set_arg("scr"), SetDirective::Query("scr".into()));
    }

    #[test]
    fn parse_empty_and_all() {
        assert_eq!(parse_set("  "), vec![SetDirective::ShowChanged]);
        assert_eq!(parse_set("all"), vec![SetDirective::ShowAll]);
    }

    #[test]
    fn parse_no_prefix_on_unknown_name_stays_on() {
        assert_eq!(parse_set_arg("nothing"), SetDirective::On("nothing".into()));
    }

    // ── MotionOptions ─────────────────────────────────────────────────────

    #[test]
    fn apply_booleans_and_numbers() {
        let mut opts = MotionOptions::default();
        opts.apply_set("noic nows scroll=7 hls!").unwrap();
        assert!(!opts.ignorecase);
        assert!(!opts.wrapscan);
        assert!(!opts.hlsearch);
        assert_eq!(opts.scroll, 7);
    }

    #[test]
    fn query_and_show_changed() {
        let mut opts = MotionOptions::default();
        assert_eq!(opts.apply_set("ic?").unwrap(), vec!["ignorecase".to_string()]);
        opts.apply_set("nomagic").unwrap();
        assert_eq!(opts.apply_set("").unwrap(), vec!["nomagic".to_string()]);
        assert_eq!(opts.apply_set("all").unwrap().len(), ALL_OPTIONS.len());
    }

    #[test]
    fn apply_errors() {
        let mut opts = MotionOptions::default();
        assert_eq!(
            opts.apply_set("bogus"),
            Err(OptionError::UnknownOption("bogus".into()))
        );
        assert_eq!(
            opts.apply_set("scroll"),
            Ok(vec!["scroll=0".to_string()])
        );
        assert_eq!(
            opts.apply_set("scroll!"),
            Err(OptionError::NotBoolean("scroll".into()))
        );
        assert_eq!(
            opts.apply_set("scroll=abc"),
            Err(OptionError::InvalidValue {
                name: "scroll".into(),
                value: "abc".into()
            })
        );
        assert_eq!(
            opts.apply_set("ic=3"),
            Err(OptionError::NotBoolean("ic".into()))
        );
    }

    // ── find_flags ────────────────────────────────────────────────────────

    #[test]
    fn smartcase_lowercase_ignores_case() {
        let opts = MotionOptions::default();
        assert_eq!(opts.find_flags("foo"), FindFlags::IGNORECASE);
    }

    #[test]
    fn smartcase_uppercase_is_case_sensitive() {
        let opts = MotionOptions::default();
        assert_eq!(opts.find_flags("Foo"), FindFlags::empty());
    }

    #[test]
    fn nosmartcase_always_ignores_case() {
        let opts = MotionOptions {
            smartcase: false,
            ..MotionOptions::default()
        };
        assert_eq!(opts.find_flags("Foo"), FindFlags::IGNORECASE);
    }

    #[test]
    fn nomagic_is_literal() {
        let opts = MotionOptions {
            magic: false,
            ignorecase: false,
            ..MotionOptions::default()
        };
        assert_eq!(opts.find_flags("a.b"), FindFlags::LITERAL);
    }
}
