//! Serialized access to the output stream
//!
//! Every entry point builds its complete fragment in memory and hands it to
//! the sink in one locked write, so fragments from different threads never
//! interleave. [`OutputSink::scoped_section`] holds the same lock across a
//! caller-controlled group of writes.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::annotations::{block_into, Block, Inline, BOX_CLOSE, BOX_OPEN};
use crate::plot::{PlotParams, PlotSeries};
use crate::renderer::{labeled_into, render_plot, PlotConfig};
use crate::value::Render;
use crate::Error;

type Writer = Box<dyn Write + Send>;

/// The process-wide output stream and its lock
pub struct OutputSink {
    inner: Mutex<Writer>,
    plot_config: PlotConfig,
}

impl OutputSink {
    /// Wrap `writer`
    pub fn new(writer: impl Write + Send + 'static) -> Self {
        Self {
            inner: Mutex::new(Box::new(writer)),
            plot_config: PlotConfig::default(),
        }
    }

    /// A sink on standard output
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    /// Set the configuration used by [`OutputSink::plot`]
    pub fn with_plot_config(mut self, config: PlotConfig) -> Self {
        self.plot_config = config;
        self
    }

    /// A panic in an earlier action leaves the writer usable, so poisoning
    /// is ignored.
    fn lock(&self) -> MutexGuard<'_, Writer> {
        tracing::trace!("acquiring output sink");
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `action` with exclusive access to the stream, then flush
    ///
    /// The lock is released on every exit path. When `action` fails its
    /// error is returned and the flush result is discarded.
    pub fn atomic_write<T, F>(&self, action: F) -> Result<T, Error>
    where
        F: FnOnce(&mut dyn Write) -> Result<T, Error>,
    {
        let mut guard = self.lock();
        let result = action(&mut **guard);
        let flushed = guard.flush();
        let value = result?;
        flushed?;
        Ok(value)
    }

    /// Hold the lock for the whole of `action`
    ///
    /// Everything written through the [`Section`] handle appears contiguously
    /// in the output.
    ///
    /// ```rust
    /// use pretty_render::{OutputSink, SharedBuffer};
    ///
    /// let buffer = SharedBuffer::default();
    /// let sink = OutputSink::new(buffer.clone());
    /// sink.scoped_section(|section| {
    ///     section.render(&1)?;
    ///     section.render(&2)
    /// })
    /// .unwrap();
    /// assert_eq!(buffer.contents(), "12");
    /// ```
    pub fn scoped_section<T, F>(&self, action: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Section<'_>) -> Result<T, Error>,
    {
        let plot_config = &self.plot_config;
        self.atomic_write(|writer| {
            let mut section = Section {
                writer,
                plot_config,
            };
            action(&mut section)
        })
    }

    /// Render a value
    pub fn render<T: Render + ?Sized>(&self, value: &T) -> Result<(), Error> {
        self.write_markup(&crate::render_to_string(value))
    }

    /// Render a value as a one-row `label = value` table
    pub fn print_labeled<T: Render + ?Sized>(&self, label: &str, value: &T) -> Result<(), Error> {
        self.write_markup(&labeled_markup(label, value))
    }

    /// Draw one or more series as an SVG figure
    pub fn plot(&self, series: &[PlotSeries], params: &PlotParams) -> Result<(), Error> {
        self.write_markup(&render_plot(series, params, &self.plot_config)?)
    }

    pub fn paragraph(&self, content: &[Inline<'_>]) -> Result<(), Error> {
        self.write_markup(&block_markup(Block::Paragraph, content))
    }

    pub fn section(&self, content: &[Inline<'_>]) -> Result<(), Error> {
        self.write_markup(&block_markup(Block::Section, content))
    }

    pub fn subsection(&self, content: &[Inline<'_>]) -> Result<(), Error> {
        self.write_markup(&block_markup(Block::Subsection, content))
    }

    pub fn subsubsection(&self, content: &[Inline<'_>]) -> Result<(), Error> {
        self.write_markup(&block_markup(Block::Subsubsection, content))
    }

    /// A scoped section wrapped in `<div class="box">`
    pub fn boxed<T, F>(&self, action: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Section<'_>) -> Result<T, Error>,
    {
        self.scoped_section(|section| section.boxed(action))
    }

    /// Write a fragment that was built elsewhere
    pub fn write_markup(&self, markup: &str) -> Result<(), Error> {
        self.atomic_write(|writer| Ok(writer.write_all(markup.as_bytes())?))
    }

    /// Flush any buffered output
    pub fn finish(self) -> Result<(), Error> {
        self.lock().flush()?;
        Ok(())
    }
}

impl Drop for OutputSink {
    fn drop(&mut self) {
        let writer = self
            .inner
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner);
        let _ = writer.flush();
    }
}

/// Write access held for the duration of [`OutputSink::scoped_section`]
pub struct Section<'s> {
    writer: &'s mut dyn Write,
    plot_config: &'s PlotConfig,
}

impl Section<'_> {
    pub fn render<T: Render + ?Sized>(&mut self, value: &T) -> Result<(), Error> {
        self.write_markup(&crate::render_to_string(value))
    }

    pub fn print_labeled<T: Render + ?Sized>(
        &mut self,
        label: &str,
        value: &T,
    ) -> Result<(), Error> {
        self.write_markup(&labeled_markup(label, value))
    }

    pub fn plot(&mut self, series: &[PlotSeries], params: &PlotParams) -> Result<(), Error> {
        let svg = render_plot(series, params, self.plot_config)?;
        self.write_markup(&svg)
    }

    pub fn paragraph(&mut self, content: &[Inline<'_>]) -> Result<(), Error> {
        self.write_markup(&block_markup(Block::Paragraph, content))
    }

    pub fn section(&mut self, content: &[Inline<'_>]) -> Result<(), Error> {
        self.write_markup(&block_markup(Block::Section, content))
    }

    pub fn subsection(&mut self, content: &[Inline<'_>]) -> Result<(), Error> {
        self.write_markup(&block_markup(Block::Subsection, content))
    }

    pub fn subsubsection(&mut self, content: &[Inline<'_>]) -> Result<(), Error> {
        self.write_markup(&block_markup(Block::Subsubsection, content))
    }

    /// Wrap whatever `action` writes in `<div class="box">`
    ///
    /// The box is closed even when `action` fails.
    pub fn boxed<T, F>(&mut self, action: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Section<'_>) -> Result<T, Error>,
    {
        self.write_markup(BOX_OPEN)?;
        let result = action(self);
        self.write_markup(BOX_CLOSE)?;
        result
    }

    pub fn write_markup(&mut self, markup: &str) -> Result<(), Error> {
        self.writer.write_all(markup.as_bytes())?;
        Ok(())
    }
}

fn labeled_markup<T: Render + ?Sized>(label: &str, value: &T) -> String {
    let mut out = String::new();
    labeled_into(&mut out, label, &value.renderable());
    out
}

fn block_markup(block: Block, content: &[Inline<'_>]) -> String {
    let mut out = String::new();
    block_into(&mut out, block, content);
    out
}

/// A cloneable in-memory writer, handy for capturing sink output
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    /// Everything written so far
    pub fn contents(&self) -> String {
        let bytes = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
