//! Number and string formatting shared by the emitters.

/// Format a number with at most two decimals, without trailing zeros.
pub fn fmt_num(value: f64) -> String {
    fmt_precision(value, 2)
}

/// Format a number with at most `decimals` decimals, without trailing zeros.
pub fn fmt_precision(value: f64, decimals: usize) -> String {
    let s = format!("{:.*}", decimals, value);
    let s = if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    };
    if s == "-0" {
        "0".to_string()
    } else {
        s
    }
}

/// Format a number as a Dart/Swift double literal (`8.0`, `0.5`).
pub fn fmt_double(value: f64) -> String {
    let s = fmt_num(value);
    if s.contains('.') {
        s
    } else {
        format!("{}.0", s)
    }
}

/// Escape text content for HTML.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape a single-quoted Dart string literal body.
pub fn escape_dart(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '$' => out.push_str("\\$"),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape a double-quoted Swift string literal body.
pub fn escape_swift(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out
}

/// Conventional name of a numeric font weight.
pub fn weight_name(weight: u16) -> &'static str {
    match weight {
        0..=149 => "thin",
        150..=249 => "extralight",
        250..=349 => "light",
        350..=449 => "normal",
        450..=549 => "medium",
        550..=649 => "semibold",
        650..=749 => "bold",
        750..=849 => "extrabold",
        _ => "black",
    }
}

/// Placeholder image URL of the given size.
pub fn placeholder_image(width: f64, height: f64) -> String {
    format!(
        "https://placehold.co/{}x{}",
        width.round().max(1.0) as u32,
        height.round().max(1.0) as u32
    )
}
