//! Server-side HTML rendering for the upload page and the fraud report.
//!
//! Pure functions of state: no I/O, same input gives identical bytes.

mod page;
mod report;

pub use page::render_page;
pub use report::render_report;

/// Minimal append-only HTML buffer.
struct Html {
    buf: String,
}

impl Html {
    fn new() -> Self {
        Self {
            buf: String::with_capacity(4 * 1024),
        }
    }

    fn push<S: AsRef<str>>(&mut self, s: S) {
        self.buf.push_str(s.as_ref());
    }

    /// Pushes escaped text.
    fn text<S: AsRef<str>>(&mut self, s: S) {
        self.buf.push_str(&escape(s.as_ref()));
    }

    fn finish(self) -> String {
        self.buf
    }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 8);
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
