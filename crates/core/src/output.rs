//! Final assembly of rendered results into program output.

/// Joins results into the text written to stdout.
///
/// Each result is followed by a newline. With `wrap_in_body` the results are
/// placed in a minimal HTML document. Text output is never wrapped, since
/// it is no longer markup.
pub fn assemble(results: &[String], wrap_in_body: bool, text_mode: bool) -> String {
    let mut out = String::new();
    let wrap = wrap_in_body && !text_mode;

    if wrap {
        out.push_str("<!DOCTYPE html>\n<html>\n<body>\n");
    }

    for result in results {
        out.push_str(result);
        out.push('\n');
    }

    if wrap {
        out.push_str("</body>\n</html>\n");
    }

    out
}
