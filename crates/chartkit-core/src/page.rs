// File: crates/chartkit-core/src/page.rs
// Summary: Host page model: named host elements that charts resolve and mount surfaces into.

use crate::error::{ChartError, Result};
use crate::surface::Surface;

/// Id of the host that always exists and stands for the document body.
pub const BODY: &str = "body";

/// Content placed into one host element, in insertion order.
#[derive(Clone, Debug, PartialEq)]
pub enum Content {
    Surface(Surface),
    Paragraph(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Host {
    pub id: String,
    pub content: Vec<Content>,
}

impl Host {
    pub fn surfaces(&self) -> impl Iterator<Item = &Surface> {
        self.content.iter().filter_map(|c| match c {
            Content::Surface(s) => Some(s),
            Content::Paragraph(_) => None,
        })
    }

    pub fn paragraphs(&self) -> impl Iterator<Item = &str> {
        self.content.iter().filter_map(|c| match c {
            Content::Paragraph(p) => Some(p.as_str()),
            Content::Surface(_) => None,
        })
    }
}

/// A page with a fixed set of host elements.
#[derive(Clone, Debug, PartialEq)]
pub struct Page {
    pub title: String,
    hosts: Vec<Host>,
}

impl Page {
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into(), hosts: vec![Host { id: BODY.to_string(), content: Vec::new() }] }
    }

    /// Declare a host element with the given id.
    pub fn with_host(mut self, id: &str) -> Self {
        let id = id.trim_start_matches('#');
        if self.hosts.iter().all(|h| h.id != id) {
            self.hosts.push(Host { id: id.to_string(), content: Vec::new() });
        }
        self
    }

    pub fn hosts(&self) -> &[Host] { &self.hosts }

    /// Look up a host by selector (`#chart` or `chart`).
    pub fn resolve(&self, selector: &str) -> Result<&Host> {
        let id = selector.trim().trim_start_matches('#');
        self.hosts
            .iter()
            .find(|h| h.id == id)
            .ok_or_else(|| ChartError::HostNotFound(selector.to_string()))
    }

    fn resolve_mut(&mut self, selector: &str) -> Result<&mut Host> {
        let id = selector.trim().trim_start_matches('#');
        self.hosts
            .iter_mut()
            .find(|h| h.id == id)
            .ok_or_else(|| ChartError::HostNotFound(selector.to_string()))
    }

    /// Append a surface to the host.
    pub fn mount(&mut self, selector: &str, surface: Surface) -> Result<()> {
        self.resolve_mut(selector)?.content.push(Content::Surface(surface));
        Ok(())
    }

    /// Append a paragraph of text to the host.
    pub fn append_paragraph(&mut self, selector: &str, text: impl Into<String>) -> Result<()> {
        self.resolve_mut(selector)?.content.push(Content::Paragraph(text.into()));
        Ok(())
    }

    /// Every mounted surface, host by host.
    pub fn surfaces(&self) -> impl Iterator<Item = &Surface> {
        self.hosts.iter().flat_map(Host::surfaces)
    }
}
