//! Removal of decompiler diagnostic lines.

/// Drops comment lines that reference an IL offset (`//IL_009a: Unknown result type ...`).
///
/// A line is dropped only if, after leading whitespace, it starts with `//` and contains
/// `il_` in any case. Everything else is kept verbatim. Lines are split on `\r\n` or
/// `\n` and rejoined with `\n`.
///
/// ```rust
/// use dotscribe::knowledge::sanitize;
///
/// let source = "int x = 1;\r\n    //IL_0035: Unknown result type\n// keep me";
/// assert_eq!(sanitize(source), "int x = 1;\n// keep me");
/// ```
#[must_use]
pub fn sanitize(text: &str) -> String {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !is_il_comment(line))
        .collect::<Vec<_>>()
        .join("\n")
}

fn is_il_comment(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with("//") && trimmed.to_ascii_lowercase().contains("il_")
}
