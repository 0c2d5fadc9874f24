//! Line-oriented YAML text builder

const INDENT: &str = "  ";

/// A line relative to some base indentation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub depth: usize,
    pub text: String,
}

impl Line {
    pub fn new(depth: usize, text: impl Into<String>) -> Self {
        Line {
            depth,
            text: text.into(),
        }
    }

    pub fn comment(depth: usize, text: &str) -> Self {
        Line::new(depth, format!("# {}", text))
    }
}

/// Accumulates indented lines of YAML
#[derive(Debug, Default)]
pub struct YamlWriter {
    lines: Vec<String>,
}

impl YamlWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `text` at `depth` levels of indentation
    pub fn line(&mut self, depth: usize, text: impl AsRef<str>) {
        let text = text.as_ref();
        if text.trim().is_empty() {
            self.lines.push(String::new());
        } else {
            self.lines.push(format!("{}{}", INDENT.repeat(depth), text));
        }
    }

    pub fn comment(&mut self, depth: usize, text: &str) {
        self.line(depth, format!("# {}", text));
    }

    pub fn blank(&mut self) {
        self.lines.push(String::new());
    }

    /// Append relative lines below `base`
    pub fn extend(&mut self, base: usize, lines: &[Line]) {
        for line in lines {
            self.line(base + line.depth, &line.text);
        }
    }

    pub fn finish(self) -> String {
        let mut text = self.lines.join("\n");
        text.push('\n');
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indentation_and_blank_lines() {
        let mut writer = YamlWriter::new();
        writer.line(0, "jobs:");
        writer.line(1, "build:");
        writer.line(2, "   ");
        writer.comment(2, "note");
        writer.extend(2, &[Line::new(0, "run: |"), Line::new(1, "make")]);
        assert_eq!(
            writer.finish(),
            "jobs:\n  build:\n\n    # note\n    run: |\n      make\n"
        );
    }
}
