use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use super::{Document, Result};
use crate::constants::report::MARGIN_X;

/// Output backend for a laid-out document
pub trait DocumentWriter {
    fn write(&mut self, document: &Document) -> Result<()>;
}

/// Plain-text backend: one block per page, indentation follows the x offset
#[derive(Debug)]
pub struct TextWriter<W: Write> {
    out: W,
}

impl TextWriter<BufWriter<File>> {
    pub fn create(path: &Path) -> std::io::Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        Ok(Self::new(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write> TextWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> DocumentWriter for TextWriter<W> {
    fn write(&mut self, document: &Document) -> Result<()> {
        let total = document.pages.len();
        for (number, page) in document.pages.iter().enumerate() {
            if number > 0 {
                writeln!(self.out)?;
            }
            writeln!(self.out, "--- Page {} of {total} ---", number + 1)?;
            for line in &page.lines {
                let indent = usize::from(line.x.saturating_sub(MARGIN_X));
                writeln!(self.out, "{:indent$}{}", "", line.text)?;
            }
        }
        self.out.flush()?;
        Ok(())
    }
}
