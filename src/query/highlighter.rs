use once_cell::sync::OnceCell;
use regex::{Captures, Regex};
use tracing::debug;

static SHARED: OnceCell<Highlighter> = OnceCell::new();

const TOKEN_KINDS: [&str; 6] = ["comment", "string", "identifier", "parameter", "number", "keyword"];

const SQL_KEYWORDS: &str = "SELECT|FROM|WHERE|LIMIT|AS|AND|OR|NOT|NULL|GROUP|ORDER|BY|JOIN|ON|UNNEST";
const PYTHON_KEYWORDS: &str = "import|from|as|try|except|raise|None|True|False|print|or";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightLanguage {
    Sql,
    Python,
}

/// Turns snippet text into HTML with `<span class="tok-...">` token markers.
///
/// Compiling the token patterns is the costly part, so one instance is meant
/// to be shared; see [`Highlighter::shared`].
#[derive(Debug)]
pub struct Highlighter {
    sql: Regex,
    python: Regex,
}

impl Highlighter {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            sql: token_pattern(&format!(r"(?i:\b(?:{SQL_KEYWORDS})\b)"), r"--[^\n]*|#[^\n]*")?,
            python: token_pattern(&format!(r"\b(?:{PYTHON_KEYWORDS})\b"), r"#[^\n]*")?,
        })
    }

    /// Process-wide instance, created on first use. Concurrent first calls
    /// block on one initialization instead of racing.
    pub fn shared() -> &'static Highlighter {
        SHARED.get_or_init(|| {
            debug!("initializing snippet highlighter");
            Highlighter::new().expect("highlighter token patterns are valid")
        })
    }

    pub fn highlight(&self, code: &str, language: HighlightLanguage) -> String {
        let pattern = match language {
            HighlightLanguage::Sql => &self.sql,
            HighlightLanguage::Python => &self.python,
        };

        let mut out = String::with_capacity(code.len() * 2);
        let mut last = 0;

        for caps in pattern.captures_iter(code) {
            let Some(whole) = caps.get(0) else { continue };
            out.push_str(&escape_html(&code[last..whole.start()]));

            match token_kind(&caps) {
                Some(kind) => {
                    out.push_str(&format!(
                        "<span class=\"tok-{kind}\">{}</span>",
                        escape_html(whole.as_str())
                    ));
                }
                None => out.push_str(&escape_html(whole.as_str())),
            }
            last = whole.end();
        }

        out.push_str(&escape_html(&code[last..]));
        out
    }
}

fn token_pattern(keywords: &str, comment: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(
        concat!(
            r"(?P<comment>{comment})",
            r#"|(?P<string>(?s:""".*?""")|"(?:[^"\\\n]|\\.)*"|'(?:[^'\\\n]|\\.)*')"#,
            r"|(?P<identifier>`(?:[^`\\]|\\.)*`)",
            r"|(?P<parameter>@\w+)",
            r"|(?P<number>\b\d+(?:\.\d+)?\b)",
            r"|(?P<keyword>{keywords})",
        ),
        comment = comment,
        keywords = keywords,
    ))
}

fn token_kind(caps: &Captures) -> Option<&'static str> {
    TOKEN_KINDS.into_iter().find(|kind| caps.name(kind).is_some())
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::generate_select_query;

    #[test]
    fn test_shared_is_initialized_once() {
        let a = Highlighter::shared() as *const Highlighter;
        let handles = (0..4)
            .map(|_| std::thread::spawn(|| Highlighter::shared() as *const Highlighter as usize))
            .collect::<Vec<_>>();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), a as usize);
        }
    }

    #[test]
    fn test_highlight_sql() {
        let sql = generate_select_query("proj", "ds", "tbl", &["id"]);
        let html = Highlighter::shared().highlight(&sql, HighlightLanguage::Sql);

        assert_eq!(
            html,
            "<span class=\"tok-keyword\">SELECT</span>\n  id\n\
             <span class=\"tok-keyword\">FROM</span> <span class=\"tok-identifier\">`proj.ds.tbl`</span>\n\
             <span class=\"tok-keyword\">LIMIT</span> <span class=\"tok-number\">100</span>"
        );
    }

    #[test]
    fn test_highlight_python_escapes_html() {
        let html = Highlighter::shared().highlight("print(\"<b>\")  # done", HighlightLanguage::Python);
        assert_eq!(
            html,
            "<span class=\"tok-keyword\">print</span>(<span class=\"tok-string\">&quot;&lt;b&gt;&quot;</span>)  \
             <span class=\"tok-comment\"># done</span>"
        );
    }

    #[test]
    fn test_highlight_parameter() {
        let html = Highlighter::shared().highlight("LIMIT @limit", HighlightLanguage::Sql);
        assert_eq!(
            html,
            "<span class=\"tok-keyword\">LIMIT</span> <span class=\"tok-parameter\">@limit</span>"
        );
    }
}
