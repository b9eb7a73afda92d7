use crate::text::font::FontMetric;

/// Greedy word wrap of `text` into lines no wider than `max_width_px`.
///
/// Words are split on Unicode whitespace and re-joined with single spaces. A word that alone
/// exceeds the width gets a line of its own instead of being broken; overflow is accepted.
/// Whitespace-only input yields no lines.
pub fn wrap<F: FontMetric + ?Sized>(text: &str, font: &mut F, max_width_px: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }

        let candidate = format!("{current} {word}");
        if font.measure(&candidate) <= max_width_px {
            current = candidate;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Widest line of a wrapped block.
pub fn block_width<F: FontMetric + ?Sized>(lines: &[String], font: &mut F) -> f32 {
    lines
        .iter()
        .map(|l| font.measure(l))
        .fold(0.0_f32, f32::max)
}

#[cfg(test)]
#[path = "../../tests/unit/text/wrap.rs"]
mod tests;
