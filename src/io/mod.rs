//! Tag stream output
//!
//! Entities serialize themselves as (group code, value) pairs through the
//! [`TagWriter`] seam. The document model does not prescribe a container
//! format; [`TextTagWriter`] provides the ASCII framing used by the
//! exchange format and by tests.

use crate::error::Result;
use crate::types::{Handle, Vector3};
use std::io::Write;

/// Sink for (group code, value) pairs
pub trait TagWriter {
    /// Write one tag
    fn write_tag(&mut self, code: i32, value: &str) -> Result<()>;

    /// Write a string tag
    fn write_str(&mut self, code: i32, value: &str) -> Result<()> {
        self.write_tag(code, value)
    }

    /// Write a floating point tag
    fn write_f64(&mut self, code: i32, value: f64) -> Result<()> {
        self.write_tag(code, &format!("{}", value))
    }

    /// Write an integer tag
    fn write_i32(&mut self, code: i32, value: i32) -> Result<()> {
        self.write_tag(code, &format!("{}", value))
    }

    /// Write a 16-bit integer tag
    fn write_i16(&mut self, code: i32, value: i16) -> Result<()> {
        self.write_tag(code, &format!("{}", value))
    }

    /// Write a handle tag in uppercase hex
    fn write_handle(&mut self, code: i32, handle: Handle) -> Result<()> {
        self.write_tag(code, &format!("{:X}", handle))
    }

    /// Write a point as X/Y/Z tags (`code`, `code + 10`, `code + 20`)
    fn write_point(&mut self, code: i32, point: Vector3) -> Result<()> {
        self.write_f64(code, point.x)?;
        self.write_f64(code + 10, point.y)?;
        self.write_f64(code + 20, point.z)
    }
}

/// Tag writer producing `code\nvalue\n` ASCII framing
pub struct TextTagWriter<W: Write> {
    inner: W,
}

impl<W: Write> TextTagWriter<W> {
    /// Wrap an output stream
    pub fn new(inner: W) -> Self {
        TextTagWriter { inner }
    }

    /// Unwrap the output stream
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> TagWriter for TextTagWriter<W> {
    fn write_tag(&mut self, code: i32, value: &str) -> Result<()> {
        writeln!(self.inner, "{}", code)?;
        writeln!(self.inner, "{}", value)?;
        Ok(())
    }
}
