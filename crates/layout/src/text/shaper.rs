use tally_style::TextStyle;

/// A styled slice of paragraph text.
#[derive(Debug, Clone, Copy)]
pub struct TextRun<'a> {
    pub text: &'a str,
    pub style: TextStyle,
}

/// One measured word, or a forced line break.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapedWord {
    pub run_index: usize,
    pub text: String,
    pub width: f32,
    /// Whitespace separated this word from the previous one, possibly across runs.
    pub space_before: bool,
    pub line_break: bool,
}

/// Splits runs into words. Whitespace collapses to a single separator and
/// `'\n'` becomes an explicit break marker.
pub fn shape_runs(runs: &[TextRun]) -> Vec<ShapedWord> {
    let mut words = Vec::new();
    let mut pending_space = false;

    for (run_index, run) in runs.iter().enumerate() {
        let mut current = String::new();
        let mut space_before = pending_space;

        let flush = |current: &mut String, space_before: &mut bool, words: &mut Vec<ShapedWord>| {
            if !current.is_empty() {
                let text = std::mem::take(current);
                words.push(ShapedWord {
                    run_index,
                    width: run.style.measure(&text),
                    text,
                    space_before: *space_before,
                    line_break: false,
                });
                *space_before = false;
            }
        };

        for c in run.text.chars() {
            if c == '\n' {
                flush(&mut current, &mut space_before, &mut words);
                words.push(ShapedWord {
                    run_index,
                    text: String::new(),
                    width: 0.0,
                    space_before: false,
                    line_break: true,
                });
                space_before = false;
            } else if c.is_whitespace() {
                flush(&mut current, &mut space_before, &mut words);
                space_before = true;
            } else {
                current.push(c);
            }
        }
        flush(&mut current, &mut space_before, &mut words);
        pending_space = space_before;
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_types::Color;

    #[test]
    fn spacing_is_tracked_across_runs() {
        let style = TextStyle::new(12.0, Color::BLACK);
        let runs = [
            TextRun { text: "Email: ", style },
            TextRun { text: "jane@example.com", style: style.bold() },
            TextRun { text: "!", style },
        ];
        let words = shape_runs(&runs);
        let summary: Vec<_> = words
            .iter()
            .map(|w| (w.run_index, w.text.as_str(), w.space_before))
            .collect();
        assert_eq!(
            summary,
            vec![(0, "Email:", false), (1, "jane@example.com", true), (2, "!", false)]
        );
    }

    #[test]
    fn newline_produces_break_marker() {
        let style = TextStyle::new(10.0, Color::BLACK);
        let words = shape_runs(&[TextRun { text: "a\nb", style }]);
        assert_eq!(words.len(), 3);
        assert!(words[1].line_break);
        assert!(!words[2].space_before);
    }
}
