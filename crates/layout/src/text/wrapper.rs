use super::shaper::{ShapedWord, TextRun, shape_runs};
use tally_style::{TextAlign, TextStyle};

#[derive(Debug, Clone)]
pub struct LineLayout {
    pub items: Vec<LineItem>,
    pub width: f32,
    pub height: f32,
    /// Offset of the shared baseline from the line's top edge.
    pub baseline: f32,
}

/// A contiguous fragment of one run on a line, drawn as a single string.
#[derive(Debug, Clone)]
pub struct LineItem {
    pub run_index: usize,
    pub text: String,
    pub x: f32,
    pub width: f32,
}

fn baseline_of(style: &TextStyle) -> f32 {
    (style.line_height - style.font_size) / 2.0 + style.font_size * 0.8
}

struct LineBuilder<'a> {
    runs: &'a [TextRun<'a>],
    items: Vec<LineItem>,
    width: f32,
    height: f32,
    baseline: f32,
}

impl<'a> LineBuilder<'a> {
    fn new(runs: &'a [TextRun<'a>]) -> Self {
        Self {
            runs,
            items: Vec::new(),
            width: 0.0,
            height: 0.0,
            baseline: 0.0,
        }
    }

    fn space_width(&self, word: &ShapedWord) -> f32 {
        if word.space_before && !self.items.is_empty() {
            self.runs[word.run_index].style.measure(" ")
        } else {
            0.0
        }
    }

    fn fits(&self, word: &ShapedWord, max_width: f32) -> bool {
        self.items.is_empty() || self.width + self.space_width(word) + word.width <= max_width + 0.01
    }

    fn push(&mut self, word: &ShapedWord) {
        let style = self.runs[word.run_index].style;
        let space = self.space_width(word);
        self.height = self.height.max(style.line_height);
        self.baseline = self.baseline.max(baseline_of(&style));

        match self.items.last_mut() {
            Some(last) if last.run_index == word.run_index => {
                if space > 0.0 {
                    last.text.push(' ');
                }
                last.text.push_str(&word.text);
                last.width = style.measure(&last.text);
                self.width = last.x + last.width;
            }
            _ => {
                let x = self.width + space;
                self.items.push(LineItem {
                    run_index: word.run_index,
                    text: word.text.clone(),
                    x,
                    width: word.width,
                });
                self.width = x + word.width;
            }
        }
    }

    fn finish(&mut self, fallback: &TextStyle, max_width: f32, align: TextAlign) -> LineLayout {
        if self.items.is_empty() {
            self.height = fallback.line_height;
            self.baseline = baseline_of(fallback);
        }
        let offset = if max_width.is_finite() {
            match align {
                TextAlign::Left => 0.0,
                TextAlign::Right => (max_width - self.width).max(0.0),
                TextAlign::Center => ((max_width - self.width) / 2.0).max(0.0),
            }
        } else {
            0.0
        };
        let mut items = std::mem::take(&mut self.items);
        for item in &mut items {
            item.x += offset;
        }
        let line = LineLayout {
            items,
            width: self.width,
            height: self.height,
            baseline: self.baseline,
        };
        self.width = 0.0;
        self.height = 0.0;
        self.baseline = 0.0;
        line
    }
}

/// Cuts a word that is wider than a whole line into pieces that each fit,
/// breaking between characters.
fn split_overlong(word: ShapedWord, style: &TextStyle, max_width: f32) -> Vec<ShapedWord> {
    if !max_width.is_finite() || word.width <= max_width + 0.01 {
        return vec![word];
    }
    let mut pieces: Vec<(String, f32)> = Vec::new();
    let mut current = String::new();
    let mut width = 0.0;
    let mut buf = [0u8; 4];
    for c in word.text.chars() {
        let advance = style.measure(c.encode_utf8(&mut buf));
        if !current.is_empty() && width + advance > max_width + 0.01 {
            pieces.push((std::mem::take(&mut current), width));
            width = 0.0;
        }
        current.push(c);
        width += advance;
    }
    pieces.push((current, width));

    pieces
        .into_iter()
        .enumerate()
        .map(|(i, (text, width))| ShapedWord {
            run_index: word.run_index,
            text,
            width,
            space_before: i == 0 && word.space_before,
            line_break: false,
        })
        .collect()
}

/// Greedy line breaking at whitespace. A word wider than `max_width` is cut
/// between characters so no line overflows.
pub fn break_lines(runs: &[TextRun], max_width: f32, align: TextAlign) -> Vec<LineLayout> {
    let words: Vec<ShapedWord> = shape_runs(runs)
        .into_iter()
        .flat_map(|word| {
            let style = runs[word.run_index].style;
            split_overlong(word, &style, max_width)
        })
        .collect();
    let mut lines = Vec::new();
    let Some(first) = runs.first() else {
        return lines;
    };
    let mut fallback = first.style;
    let mut builder = LineBuilder::new(runs);

    for word in &words {
        fallback = runs[word.run_index].style;
        if word.line_break {
            lines.push(builder.finish(&fallback, max_width, align));
            continue;
        }
        if !builder.fits(word, max_width) {
            lines.push(builder.finish(&fallback, max_width, align));
        }
        builder.push(word);
    }
    if !builder.items.is_empty() {
        lines.push(builder.finish(&fallback, max_width, align));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_types::Color;

    fn style(size: f32) -> TextStyle {
        TextStyle::new(size, Color::BLACK)
    }

    #[test]
    fn wraps_at_word_boundaries() {
        let s = style(10.0);
        let runs = [TextRun { text: "alpha beta gamma delta", style: s }];
        let width = s.measure("gamma delta");
        let lines = break_lines(&runs, width, TextAlign::Left);
        let texts: Vec<_> = lines.iter().map(|l| l.items[0].text.as_str()).collect();
        assert_eq!(texts, vec!["alpha beta", "gamma delta"]);
        assert!(lines.iter().all(|l| l.width <= width + 0.01));
    }

    #[test]
    fn runs_on_one_line_keep_separate_fragments() {
        let s = style(12.0);
        let runs = [
            TextRun { text: "Email:", style: s.bold() },
            TextRun { text: " jane@example.com", style: s },
        ];
        let lines = break_lines(&runs, 500.0, TextAlign::Left);
        assert_eq!(lines.len(), 1);
        let items = &lines[0].items;
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].text, "jane@example.com");
        let gap = items[1].x - (items[0].x + items[0].width);
        assert!((gap - s.measure(" ")).abs() < 0.01);
    }

    #[test]
    fn right_alignment_pushes_to_edge() {
        let s = style(11.0);
        let runs = [TextRun { text: "$80.00", style: s }];
        let lines = break_lines(&runs, 100.0, TextAlign::Right);
        let item = &lines[0].items[0];
        assert!((item.x + item.width - 100.0).abs() < 0.01);
    }

    #[test]
    fn centered_line_has_equal_slack() {
        let s = style(8.0);
        let runs = [TextRun { text: "centered", style: s }];
        let lines = break_lines(&runs, 200.0, TextAlign::Center);
        let item = &lines[0].items[0];
        assert!((item.x - (200.0 - item.width - item.x)).abs() < 0.01);
    }

    #[test]
    fn line_metrics_follow_tallest_run() {
        let runs = [
            TextRun { text: "Total ", style: style(16.0) },
            TextRun { text: "$150.00", style: style(18.0) },
        ];
        let lines = break_lines(&runs, 500.0, TextAlign::Left);
        assert!((lines[0].height - 21.6).abs() < 0.01);
        assert!((lines[0].baseline - (1.8 + 14.4)).abs() < 0.01);
    }

    #[test]
    fn empty_text_has_no_lines_and_blank_line_keeps_height() {
        assert!(break_lines(&[TextRun { text: "", style: style(10.0) }], 100.0, TextAlign::Left).is_empty());
        let lines = break_lines(&[TextRun { text: "a\n\nb", style: style(10.0) }], 100.0, TextAlign::Left);
        assert_eq!(lines.len(), 3);
        assert!(lines[1].items.is_empty());
        assert!((lines[1].height - 12.0).abs() < 0.01);
    }

    #[test]
    fn overlong_word_is_cut_between_characters() {
        let s = style(12.0);
        let runs = [TextRun { text: "a supercalifragilistic b", style: s }];
        let lines = break_lines(&runs, 30.0, TextAlign::Left);
        assert!(lines.len() > 3);
        assert!(lines.iter().all(|l| l.width <= 30.01));
        let joined: String = lines
            .iter()
            .flat_map(|l| l.items.iter().map(|i| i.text.as_str()))
            .collect::<String>()
            .replace(' ', "");
        assert_eq!(joined, "asupercalifragilisticb");
    }

    #[test]
    fn long_address_without_spaces_stays_in_bounds() {
        let s = style(11.0).underline();
        let url = "http://localhost:8080/?email=firstname.middlename.lastname.extra.words%40example-customer-domain.com";
        let lines = break_lines(&[TextRun { text: url, style: s }], 200.0, TextAlign::Left);
        assert!(lines.len() >= 2);
        for line in &lines {
            let item = &line.items[0];
            assert!(item.x + item.width <= 200.01, "{} overflows", item.text);
        }
        let rebuilt: String = lines.iter().map(|l| l.items[0].text.as_str()).collect();
        assert_eq!(rebuilt, url);
    }
}
