// file: src/models/document.rs
// description: rendered output document, written once at the end of a run
// reference: internal data structures

use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq)]
pub struct OutputDocument {
    path: PathBuf,
    header: String,
    sections: Vec<String>,
    footer: String,
}

impl OutputDocument {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            header: String::new(),
            sections: Vec::new(),
            footer: String::new(),
        }
    }

    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }

    pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = footer.into();
        self
    }

    pub fn push_section(&mut self, section: impl Into<String>) {
        self.sections.push(section.into());
    }

    pub fn extend_sections<I: IntoIterator<Item = String>>(&mut self, sections: I) {
        self.sections.extend(sections);
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn sections(&self) -> &[String] {
        &self.sections
    }

    pub fn render(&self) -> String {
        let mut output = String::with_capacity(
            self.header.len()
                + self.footer.len()
                + self.sections.iter().map(String::len).sum::<usize>(),
        );

        output.push_str(&self.header);
        for section in &self.sections {
            output.push_str(section);
        }
        output.push_str(&self.footer);

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_concatenates_in_order() {
        let mut doc = OutputDocument::new("results/out.md")
            .with_header("# Title\n\n")
            .with_footer("*Total: 2*");
        doc.push_section("## One\n\n");
        doc.extend_sections(vec!["## Two\n\n".to_string()]);

        assert_eq!(doc.sections().len(), 2);
        assert_eq!(doc.render(), "# Title\n\n## One\n\n## Two\n\n*Total: 2*");
        assert_eq!(doc.path(), Path::new("results/out.md"));
    }
}
