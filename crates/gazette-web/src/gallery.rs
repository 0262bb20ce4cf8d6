//! Server-rendered page viewer.
//!
//! Every viewer control is a link whose query string describes the viewer
//! state after the action. A request rebuilds that state with
//! [`ViewQuery::restore`] and each link applies one viewer operation to a
//! copy of it.

use std::convert::Infallible;

use gazette_core::viewer::{FullscreenHost, MIN_ZOOM, Point, ViewState, Viewport};
use serde::Deserialize;

use crate::{error::Error, html::Page};

/// The page box the transform is computed against.
pub const VIEWPORT: Viewport = Viewport { width: 850.0, height: 1100.0 };

/// Distance moved by one pan arrow, in pixels.
pub const PAN_STEP: f64 = 100.0;

// ─── Query ───────────────────────────────────────────────────────────────────

/// Viewer state carried in the query string.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ViewQuery {
  /// One-based page number.
  pub page:       Option<usize>,
  pub zoom:       Option<f64>,
  pub x:          Option<f64>,
  pub y:          Option<f64>,
  pub fullscreen: Option<String>,
}

impl ViewQuery {
  pub fn wants_fullscreen(&self) -> bool {
    matches!(self.fullscreen.as_deref(), Some("1" | "true" | "on"))
  }

  /// Rebuild the viewer for an issue with `page_count` pages.
  ///
  /// Values outside the viewer's limits are clamped or ignored the same way
  /// the viewer treats them when set interactively.
  pub fn restore(&self, page_count: usize) -> ViewState {
    let mut view = ViewState::new(page_count, VIEWPORT);
    if let Some(index) = self.page.and_then(|p| p.checked_sub(1)) {
      view.jump(index);
    }
    if let Some(zoom) = self.zoom {
      view.set_zoom(zoom);
    }
    view.pan_to(Point::new(self.x.unwrap_or(0.0), self.y.unwrap_or(0.0)));
    if self.wants_fullscreen() {
      let mut host = PageLayout::default();
      let Ok(()) = view.toggle_fullscreen(&mut host);
    }
    view
  }
}

// ─── Fullscreen ──────────────────────────────────────────────────────────────

/// Fullscreen as a page layout: always available, never refused.
#[derive(Debug, Default, Clone, Copy)]
pub struct PageLayout {
  active: bool,
}

impl PageLayout {
  pub fn new(active: bool) -> Self { Self { active } }
}

impl FullscreenHost for PageLayout {
  type Error = Infallible;

  fn is_supported(&self) -> bool { true }

  fn is_fullscreen(&self) -> bool { self.active }

  fn request_fullscreen(&mut self) -> Result<(), Infallible> {
    self.active = true;
    Ok(())
  }

  fn exit_fullscreen(&mut self) -> Result<(), Infallible> {
    self.active = false;
    Ok(())
  }
}

// ─── Links ───────────────────────────────────────────────────────────────────

/// The URL under `base` that reproduces `view`.
pub fn href(base: &str, view: &ViewState) -> String {
  let mut query = vec![format!("page={}", view.index() + 1)];
  if view.zoom() > MIN_ZOOM {
    query.push(format!("zoom={}", view.zoom()));
    let pan = view.pan();
    if pan != Point::ORIGIN {
      query.push(format!("x={}", pan.x));
      query.push(format!("y={}", pan.y));
    }
  }
  if view.is_fullscreen() {
    query.push("fullscreen=1".to_owned());
  }
  format!("{base}?{}", query.join("&"))
}

fn after(view: &ViewState, action: impl FnOnce(&mut ViewState)) -> ViewState {
  let mut next = view.clone();
  action(&mut next);
  next
}

fn control(
  page: &mut Page,
  base: &str,
  label: &str,
  enabled: bool,
  target: ViewState,
) -> Result<(), Error> {
  if enabled {
    page.link(&href(base, &target), "button", label)?;
  } else {
    page.element("span", &[("class", "button disabled"), ("aria-disabled", "true")], label)?;
  }
  Ok(())
}

// ─── Rendering ───────────────────────────────────────────────────────────────

/// Write the viewer for `images` in state `view`; links point under `base`.
pub fn render(
  page: &mut Page,
  base: &str,
  images: &[String],
  view: &ViewState,
) -> Result<(), Error> {
  let Some(current) = images.get(view.index()) else {
    page.element("div", &[("class", "gallery-empty")], "No images available for this issue.")?;
    return Ok(());
  };

  let class = if view.is_fullscreen() { "viewer fullscreen" } else { "viewer" };
  page.open("section", &[("class", class), ("aria-label", "Newspaper pages")])?;

  let style = format!("transform: {}; transform-origin: center center", view.transform());
  let alt = format!("Newspaper page {}", view.index() + 1);
  page.open("div", &[("class", "viewer-stage")])?;
  page.open("div", &[("class", "viewer-page"), ("style", style.as_str())])?;
  page.void("img", &[("src", current.as_str()), ("alt", alt.as_str()), ("draggable", "false")])?;
  page.close("div")?.close("div")?;

  page.open("nav", &[("class", "viewer-controls")])?;
  control(page, base, "Previous", view.can_navigate(), after(view, ViewState::prev))?;
  page.element("span", &[("class", "page-label")], &view.page_label())?;
  control(page, base, "Next", view.can_navigate(), after(view, ViewState::next))?;
  page.close("nav")?;

  page.open("div", &[("class", "zoom-controls")])?;
  control(page, base, "Zoom out", view.can_zoom_out(), after(view, ViewState::zoom_out))?;
  page.element("span", &[("class", "zoom-level")], &format!("{}%", view.zoom_percent()))?;
  control(page, base, "Zoom in", view.can_zoom_in(), after(view, ViewState::zoom_in))?;
  page.close("div")?;

  if view.can_pan() {
    page.open("div", &[("class", "pan-controls")])?;
    for (label, dx, dy) in [
      ("Left", PAN_STEP, 0.0),
      ("Right", -PAN_STEP, 0.0),
      ("Up", 0.0, PAN_STEP),
      ("Down", 0.0, -PAN_STEP),
    ] {
      control(page, base, label, true, after(view, |v| v.pan_by(dx, dy)))?;
    }
    page.close("div")?;
  }

  let toggled = after(view, |v| {
    let mut host = PageLayout::new(v.is_fullscreen());
    let Ok(()) = v.toggle_fullscreen(&mut host);
  });
  let label = if view.is_fullscreen() { "Exit Full Screen" } else { "Full Screen" };
  control(page, base, label, true, toggled)?;

  page.close("section")?;

  if !view.is_fullscreen() {
    page.open("nav", &[("class", "thumbnails"), ("aria-label", "Pages")])?;
    for index in 0..view.page_count() {
      let target = href(base, &after(view, |v| v.jump(index)));
      let label = (index + 1).to_string();
      if index == view.index() {
        page.element("a", &[
          ("href", target.as_str()),
          ("class", "button thumb current"),
          ("aria-current", "page"),
        ], &label)?;
      } else {
        page.link(&target, "button thumb", &label)?;
      }
    }
    page.close("nav")?;
  }
  Ok(())
}
