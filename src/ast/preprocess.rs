//! Input normalization ahead of the parser.
//!
//! The editor UI historically accepted a few assignment glyphs and a `►`
//! comment marker; everything is normalized here so the grammar only has to
//! know about `<-` and clean line endings. Semantics are never changed.

/// Normalizes raw pseudocode text for parsing.
///
/// - normalizes CR/LF line endings
/// - strips `►` comments to end of line
/// - maps the assignment glyphs `🡨` and `←` to `<-`
/// - collapses runs of blank lines to a single blank line
pub fn normalize_source(code: &str) -> String {
    let text = code.replace("\r\n", "\n").replace('\r', "\n");

    let mut out_lines: Vec<String> = Vec::new();
    for line in text.split('\n') {
        let line = match line.find('►') {
            Some(pos) => &line[..pos],
            None => line,
        };
        out_lines.push(line.trim_end().to_string());
    }

    let text = out_lines.join("\n").replace('🡨', "<-").replace('←', "<-");

    let mut lines: Vec<&str> = Vec::new();
    let mut prev_blank = false;
    for ln in text.split('\n') {
        if ln.trim().is_empty() {
            if !prev_blank {
                lines.push("");
            }
            prev_blank = true;
        } else {
            lines.push(ln);
            prev_blank = false;
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_comments_and_normalizes_arrows() {
        let src = "x ← 1 ► set x\r\ny 🡨 2";
        assert_eq!(normalize_source(src), "x <- 1\ny <- 2");
    }

    #[test]
    fn collapses_blank_runs() {
        let src = "a\n\n\n\nb";
        assert_eq!(normalize_source(src), "a\n\nb");
    }
}
