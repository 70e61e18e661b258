//! Content filters applied to each source piece before assembly.

/// A single content transform.
///
/// Filters are pure string transforms, applied per source piece in chain
/// order before the pieces are joined.
pub trait Filter {
    /// Short kebab-case name of this filter, used in log output.
    fn name(&self) -> &'static str;

    /// Transforms one piece of source content.
    fn apply(&self, content: &str) -> String;
}

/// Squeezes stylesheet content: strips block comments and collapses runs
/// of blank lines.
///
/// Quoted strings are respected, so a `/*` inside `url("...")` or a quoted
/// value is left alone.
pub struct CssSqueeze;

impl Filter for CssSqueeze {
    fn name(&self) -> &'static str {
        "css-squeeze"
    }

    fn apply(&self, content: &str) -> String {
        collapse_blank_lines(&strip_comments(content))
    }
}

/// An ordered set of filters for one extension.
pub struct FilterChain {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterChain {
    /// The default chain for an extension. Stylesheets are squeezed;
    /// everything else passes through untouched.
    pub fn for_extension(extension: &str) -> Self {
        let filters: Vec<Box<dyn Filter>> = match extension {
            "css" => vec![Box::new(CssSqueeze)],
            _ => Vec::new(),
        };
        Self { filters }
    }

    /// Runs every filter over the content, in order.
    pub fn apply(&self, content: &str) -> String {
        let mut current = content.to_string();
        for filter in &self.filters {
            current = filter.apply(&current);
        }
        current
    }

    /// Names of the filters in this chain, in application order.
    pub fn names(&self) -> Vec<&'static str> {
        self.filters.iter().map(|f| f.name()).collect()
    }
}

/// Removes `/* ... */` comments outside of quoted strings.
fn strip_comments(content: &str) -> String {
    let bytes = content.as_bytes();
    let mut out = String::with_capacity(content.len());
    let mut start = 0;
    let mut i = 0;
    let mut quote: Option<u8> = None;
    while i < bytes.len() {
        let b = bytes[i];
        match quote {
            Some(q) => {
                if b == b'\\' {
                    i += 2;
                    continue;
                }
                if b == q {
                    quote = None;
                }
                i += 1;
            }
            None => match b {
                b'"' | b'\'' => {
                    quote = Some(b);
                    i += 1;
                }
                b'/' if bytes.get(i + 1) == Some(&b'*') => {
                    out.push_str(&content[start..i]);
                    let mut j = i + 2;
                    while j + 1 < bytes.len() && !(bytes[j] == b'*' && bytes[j + 1] == b'/') {
                        j += 1;
                    }
                    // an unterminated comment runs to the end of input
                    i = if j + 1 < bytes.len() { j + 2 } else { bytes.len() };
                    start = i;
                }
                _ => i += 1,
            },
        }
    }
    out.push_str(&content[start..]);
    out
}

/// Collapses every run of blank lines to a single blank line and drops
/// leading and trailing blanks.
fn collapse_blank_lines(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut pending_blank = false;
    for line in content.lines() {
        if line.trim().is_empty() {
            pending_blank = true;
            continue;
        }
        if pending_blank && !out.is_empty() {
            out.push('\n');
        }
        pending_blank = false;
        out.push_str(line);
        out.push('\n');
    }
    out
}
