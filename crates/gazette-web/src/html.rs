//! HTML page builder on top of the quick-xml writer.
//!
//! Text and attribute values are escaped by the writer; only the embedded
//! stylesheet is written verbatim.

use std::io::Cursor;

use chrono::{Datelike as _, Local};
use quick_xml::{
  Writer,
  events::{BytesEnd, BytesStart, BytesText, Event},
};

use crate::error::Error;

const STYLE: &str = "\
body{margin:0;font-family:Georgia,serif;background:#f7f5ef;color:#222}\
header.site,footer.site{background:#1f1f1f;color:#f7f5ef;padding:1rem 2rem}\
header.site a,footer.site a{color:inherit;text-decoration:none}\
header.site h1{margin:0;font-size:2rem}\
nav.site a{margin-right:1rem}\
main{max-width:960px;margin:0 auto;padding:1.5rem}\
.notice{padding:.75rem 1rem;margin:1rem 0;border-radius:4px}\
.notice.success{background:#e3f4e1}.notice.warning{background:#fdf3d6}\
.notice.error{background:#f9dede}\
.viewer{position:relative;background:#fff;border:1px solid #ccc}\
.viewer.fullscreen{position:fixed;inset:0;z-index:10;background:#111}\
.viewer-stage{overflow:hidden;display:flex;justify-content:center}\
.viewer-page img{max-width:100%;display:block;user-select:none}\
.viewer-controls,.zoom-controls,.pan-controls{display:flex;gap:.5rem;align-items:center;padding:.5rem}\
.button{padding:.25rem .75rem;border:1px solid #888;border-radius:4px;color:inherit;text-decoration:none}\
.button.disabled{opacity:.4}\
.thumbnails{display:flex;flex-wrap:wrap;gap:.25rem;margin-top:1rem}\
.thumb.current{font-weight:bold;border-color:#222}\
ul.archive{list-style:none;padding:0}ul.archive li{margin-bottom:1rem}\
form.stacked label{display:block;margin-top:.75rem}\
";

/// An HTML document under construction.
pub struct Page {
  writer: Writer<Cursor<Vec<u8>>>,
}

impl Page {
  /// Start a document: doctype, `<head>`, and an open `<body>`.
  pub fn new(title: &str) -> Result<Self, Error> {
    let mut page = Self { writer: Writer::new(Cursor::new(Vec::new())) };
    page.emit(Event::DocType(BytesText::from_escaped("html")))?;
    page.open("html", &[("lang", "en")])?;
    page.open("head", &[])?;
    page.void("meta", &[("charset", "utf-8")])?;
    page.void("meta", &[
      ("name", "viewport"),
      ("content", "width=device-width, initial-scale=1"),
    ])?;
    page.element("title", &[], title)?;
    page.open("style", &[])?;
    page.emit(Event::Text(BytesText::from_escaped(STYLE)))?;
    page.close("style")?;
    page.close("head")?;
    page.open("body", &[])?;
    Ok(page)
  }

  fn emit(&mut self, event: Event<'_>) -> Result<(), Error> {
    self
      .writer
      .write_event(event)
      .map_err(|e| Error::Render(e.to_string()))
  }

  pub fn open(&mut self, tag: &str, attrs: &[(&str, &str)]) -> Result<&mut Self, Error> {
    let mut start = BytesStart::new(tag);
    for attr in attrs {
      start.push_attribute(*attr);
    }
    self.emit(Event::Start(start))?;
    Ok(self)
  }

  pub fn close(&mut self, tag: &str) -> Result<&mut Self, Error> {
    self.emit(Event::End(BytesEnd::new(tag)))?;
    Ok(self)
  }

  pub fn text(&mut self, text: &str) -> Result<&mut Self, Error> {
    self.emit(Event::Text(BytesText::new(text)))?;
    Ok(self)
  }

  /// `<tag attrs>text</tag>`
  pub fn element(
    &mut self,
    tag: &str,
    attrs: &[(&str, &str)],
    text: &str,
  ) -> Result<&mut Self, Error> {
    self.open(tag, attrs)?.text(text)?.close(tag)
  }

  /// A void element such as `<img>` or `<input>`.
  pub fn void(&mut self, tag: &str, attrs: &[(&str, &str)]) -> Result<&mut Self, Error> {
    let mut start = BytesStart::new(tag);
    for attr in attrs {
      start.push_attribute(*attr);
    }
    self.emit(Event::Empty(start))?;
    Ok(self)
  }

  pub fn link(&mut self, href: &str, class: &str, text: &str) -> Result<&mut Self, Error> {
    if class.is_empty() {
      self.element("a", &[("href", href)], text)
    } else {
      self.element("a", &[("href", href), ("class", class)], text)
    }
  }

  /// A form that posts to `action` with hidden `fields` and one button.
  pub fn post_button(
    &mut self,
    action: &str,
    fields: &[(&str, &str)],
    label: &str,
  ) -> Result<&mut Self, Error> {
    self.open("form", &[("method", "post"), ("action", action), ("class", "inline")])?;
    for &(name, value) in fields {
      self.void("input", &[("type", "hidden"), ("name", name), ("value", value)])?;
    }
    self.element("button", &[("type", "submit"), ("class", "button")], label)?;
    self.close("form")
  }

  /// Site header with navigation, then an open `<main>`.
  pub fn site_header(&mut self, site_title: &str) -> Result<&mut Self, Error> {
    self.open("header", &[("class", "site")])?;
    self.open("h1", &[])?.link("/", "", site_title)?.close("h1")?;
    self.open("nav", &[("class", "site")])?;
    self.link("/", "", "Latest")?;
    self.link("/archive", "", "Archive")?;
    self.link("/admin", "", "Admin")?;
    self.close("nav")?.close("header")?;
    self.open("main", &[])
  }

  /// Close `<main>` and write the footer.
  pub fn site_footer(&mut self, site_title: &str) -> Result<&mut Self, Error> {
    self.close("main")?;
    let notice = format!("© {} {site_title}", Local::now().year());
    self.open("footer", &[("class", "site")])?;
    self.element("p", &[], &notice)?;
    self.close("footer")
  }

  pub fn notice(&mut self, flash: &Flash) -> Result<&mut Self, Error> {
    let (class, message) = match flash {
      Flash::Success(m) => ("notice success", m),
      Flash::Warning(m) => ("notice warning", m),
      Flash::Error(m) => ("notice error", m),
    };
    self.element("div", &[("class", class), ("role", "status")], message)
  }

  /// Close `<body>` and `<html>` and return the document.
  pub fn finish(mut self) -> Result<String, Error> {
    self.close("body")?.close("html")?;
    String::from_utf8(self.writer.into_inner().into_inner())
      .map_err(|e| Error::Render(e.to_string()))
  }
}

/// One-off status message shown above a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flash {
  Success(String),
  Warning(String),
  Error(String),
}

/// A bare page carrying a heading and a paragraph.
///
/// Used where no configuration is at hand, e.g. when an error becomes a
/// response. Falls back to plain text if rendering fails.
pub fn message_page(heading: &str, body: &str) -> String {
  let render = || -> Result<String, Error> {
    let mut page = Page::new(heading)?;
    page.open("main", &[])?;
    page.element("h2", &[], heading)?;
    page.element("p", &[], body)?;
    page.link("/", "button", "Back to the latest issue")?;
    page.close("main")?;
    page.finish()
  };
  render().unwrap_or_else(|_| format!("{heading}: {body}"))
}
