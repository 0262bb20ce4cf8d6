//! Page viewer state machine.
//!
//! [`ViewState`] owns everything the viewer renders (current page, zoom, pan,
//! fullscreen) plus transient gesture tracking. Each operation below is the
//! only way that state changes, so the clamping invariants hold no matter
//! which input drives the viewer:
//!
//! - zoom stays in [`MIN_ZOOM`, `MAX_ZOOM`];
//! - pan is zero at zoom 1 and never exceeds half the scaled overflow;
//! - changing the page resets zoom and pan.

/// Smallest zoom factor; the page fits the viewport.
pub const MIN_ZOOM: f64 = 1.0;
/// Largest zoom factor.
pub const MAX_ZOOM: f64 = 3.0;
/// Increment applied by the zoom buttons.
pub const ZOOM_STEP: f64 = 0.25;

// ─── Geometry ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
  pub x: f64,
  pub y: f64,
}

impl Point {
  pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

  pub fn new(x: f64, y: f64) -> Self { Self { x, y } }

  pub fn distance(self, other: Point) -> f64 {
    (self.x - other.x).hypot(self.y - other.y)
  }
}

/// Size of the area the page is drawn into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
  pub width:  f64,
  pub height: f64,
}

// ─── Fullscreen host ─────────────────────────────────────────────────────────

/// The platform's fullscreen capability.
///
/// The viewer never trusts its own toggle intent: after asking the host to
/// change mode it reads the host's actual state back.
pub trait FullscreenHost {
  type Error;

  fn is_supported(&self) -> bool;

  fn is_fullscreen(&self) -> bool;

  fn request_fullscreen(&mut self) -> Result<(), Self::Error>;

  fn exit_fullscreen(&mut self) -> Result<(), Self::Error>;
}

// ─── Gesture tracking ────────────────────────────────────────────────────────

/// Pointer/touch tracking. Never rendered.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Gesture {
  #[default]
  Idle,
  /// One pointer down on a zoomed page; `anchor` is the pointer position
  /// minus the pan at drag start.
  Dragging { anchor: Point },
  /// Two touches down.
  Pinching { start_distance: f64, start_zoom: f64 },
}

// ─── ViewState ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
  page_count: usize,
  viewport:   Viewport,
  index:      usize,
  zoom:       f64,
  pan:        Point,
  fullscreen: bool,
  gesture:    Gesture,
}

impl ViewState {
  pub fn new(page_count: usize, viewport: Viewport) -> Self {
    Self {
      page_count,
      viewport,
      index: 0,
      zoom: MIN_ZOOM,
      pan: Point::ORIGIN,
      fullscreen: false,
      gesture: Gesture::Idle,
    }
  }

  // ── Accessors ─────────────────────────────────────────────────────────

  pub fn page_count(&self) -> usize { self.page_count }

  /// No pages: render the placeholder instead of navigation.
  pub fn is_empty(&self) -> bool { self.page_count == 0 }

  pub fn index(&self) -> usize { self.index }

  pub fn zoom(&self) -> f64 { self.zoom }

  pub fn pan(&self) -> Point { self.pan }

  pub fn is_fullscreen(&self) -> bool { self.fullscreen }

  pub fn gesture(&self) -> Gesture { self.gesture }

  pub fn can_zoom_in(&self) -> bool { self.zoom < MAX_ZOOM }

  pub fn can_zoom_out(&self) -> bool { self.zoom > MIN_ZOOM }

  /// Panning is only meaningful on a zoomed page.
  pub fn can_pan(&self) -> bool { self.zoom > MIN_ZOOM }

  /// Previous/next are disabled for single-page issues.
  pub fn can_navigate(&self) -> bool { self.page_count > 1 }

  pub fn zoom_percent(&self) -> u32 { (self.zoom * 100.0).round() as u32 }

  pub fn page_label(&self) -> String {
    format!("Page {} of {}", self.index + 1, self.page_count)
  }

  /// CSS transform for the page layer.
  pub fn transform(&self) -> String {
    format!(
      "translate({}px, {}px) scale({})",
      self.pan.x, self.pan.y, self.zoom
    )
  }

  // ── Navigation ────────────────────────────────────────────────────────

  pub fn next(&mut self) {
    if self.is_empty() {
      return;
    }
    let next = if self.index + 1 >= self.page_count { 0 } else { self.index + 1 };
    self.set_index(next);
  }

  pub fn prev(&mut self) {
    if self.is_empty() {
      return;
    }
    let prev = if self.index == 0 { self.page_count - 1 } else { self.index - 1 };
    self.set_index(prev);
  }

  /// Thumbnail jump. Out-of-range indices are ignored.
  pub fn jump(&mut self, index: usize) {
    if index < self.page_count {
      self.set_index(index);
    }
  }

  fn set_index(&mut self, index: usize) {
    self.index = index;
    self.zoom = MIN_ZOOM;
    self.pan = Point::ORIGIN;
    self.gesture = Gesture::Idle;
  }

  // ── Zoom ──────────────────────────────────────────────────────────────

  pub fn zoom_in(&mut self) { self.set_zoom(self.zoom + ZOOM_STEP); }

  pub fn zoom_out(&mut self) { self.set_zoom(self.zoom - ZOOM_STEP); }

  /// Set the zoom factor, clamped. Non-finite values are ignored.
  pub fn set_zoom(&mut self, zoom: f64) {
    if !zoom.is_finite() {
      return;
    }
    self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    self.pan = self.clamp_pan(self.pan);
  }

  pub fn pinch_start(&mut self, distance: f64) {
    self.gesture = if distance > 0.0 && distance.is_finite() {
      Gesture::Pinching { start_distance: distance, start_zoom: self.zoom }
    } else {
      Gesture::Idle
    };
  }

  /// Zoom relative to the pinch start: `start_zoom * distance / start_distance`.
  pub fn pinch_move(&mut self, distance: f64) {
    if let Gesture::Pinching { start_distance, start_zoom } = self.gesture {
      self.set_zoom(start_zoom * distance / start_distance);
    }
  }

  // ── Pan ───────────────────────────────────────────────────────────────

  /// Begin a drag. Ignored unless the page is zoomed.
  pub fn drag_start(&mut self, pointer: Point) {
    if !self.can_pan() {
      return;
    }
    self.gesture = Gesture::Dragging {
      anchor: Point::new(pointer.x - self.pan.x, pointer.y - self.pan.y),
    };
  }

  pub fn drag_move(&mut self, pointer: Point) {
    if let Gesture::Dragging { anchor } = self.gesture
      && self.can_pan()
    {
      self.pan = self.clamp_pan(Point::new(pointer.x - anchor.x, pointer.y - anchor.y));
    }
  }

  pub fn drag_end(&mut self) {
    if matches!(self.gesture, Gesture::Dragging { .. }) {
      self.gesture = Gesture::Idle;
    }
  }

  /// Move the page by a fixed offset (keyboard or button pan).
  pub fn pan_by(&mut self, dx: f64, dy: f64) {
    if self.can_pan() {
      self.pan = self.clamp_pan(Point::new(self.pan.x + dx, self.pan.y + dy));
    }
  }

  /// Place the page at an absolute offset, clamped.
  pub fn pan_to(&mut self, pan: Point) {
    self.pan = self.clamp_pan(pan);
  }

  /// Largest allowed offset per axis: half the scaled overflow.
  pub fn pan_limit(&self) -> Point {
    let overflow = self.zoom - MIN_ZOOM;
    Point::new(
      self.viewport.width * overflow / 2.0,
      self.viewport.height * overflow / 2.0,
    )
  }

  fn clamp_pan(&self, pan: Point) -> Point {
    let limit = self.pan_limit();
    let axis = |v: f64, max: f64| if v.is_finite() { v.clamp(-max, max) } else { 0.0 };
    Point::new(axis(pan.x, limit.x), axis(pan.y, limit.y))
  }

  // ── Touch ─────────────────────────────────────────────────────────────

  /// Two touches start a pinch; one touch on a zoomed page starts a drag.
  pub fn touch_start(&mut self, touches: &[Point]) {
    match touches {
      [a, b] => self.pinch_start(a.distance(*b)),
      [one] => self.drag_start(*one),
      _ => {}
    }
  }

  pub fn touch_move(&mut self, touches: &[Point]) {
    match touches {
      [a, b] => self.pinch_move(a.distance(*b)),
      [one] => self.drag_move(*one),
      _ => {}
    }
  }

  pub fn touch_end(&mut self) { self.gesture = Gesture::Idle; }

  // ── Fullscreen ────────────────────────────────────────────────────────

  /// Ask the host to enter or leave fullscreen, then adopt whatever state
  /// the host reports. A host error is returned after re-syncing.
  pub fn toggle_fullscreen<H: FullscreenHost>(&mut self, host: &mut H) -> Result<(), H::Error> {
    let result = if !self.fullscreen {
      if host.is_supported() { host.request_fullscreen() } else { Ok(()) }
    } else if host.is_fullscreen() {
      host.exit_fullscreen()
    } else {
      Ok(())
    };
    self.fullscreen = host.is_fullscreen();
    result
  }

  /// The host changed mode on its own (e.g. the user pressed Escape).
  pub fn on_fullscreen_change(&mut self, active: bool) { self.fullscreen = active; }
}

#[cfg(test)]
mod tests {
  use super::*;

  const VIEWPORT: Viewport = Viewport { width: 800.0, height: 1000.0 };

  fn state(pages: usize) -> ViewState { ViewState::new(pages, VIEWPORT) }

  // ── Navigation ───────────────────────────────────────────────────────────

  #[test]
  fn prev_from_first_wraps_to_last() {
    let mut v = state(4);
    v.prev();
    assert_eq!(v.index(), 3);
  }

  #[test]
  fn next_from_last_wraps_to_first() {
    let mut v = state(4);
    v.jump(3);
    v.next();
    assert_eq!(v.index(), 0);
  }

  #[test]
  fn jump_ignores_out_of_range() {
    let mut v = state(2);
    v.jump(1);
    v.jump(7);
    assert_eq!(v.index(), 1);
  }

  #[test]
  fn empty_sequence_is_inert() {
    let mut v = state(0);
    assert!(v.is_empty());
    v.next();
    v.prev();
    v.jump(0);
    assert_eq!(v.index(), 0);
  }

  #[test]
  fn changing_page_resets_zoom_and_pan() {
    let mut v = state(3);
    v.zoom_in();
    v.zoom_in();
    v.pan_by(50.0, -40.0);
    assert!(v.pan() != Point::ORIGIN);

    v.next();
    assert_eq!(v.zoom(), MIN_ZOOM);
    assert_eq!(v.pan(), Point::ORIGIN);

    v.set_zoom(2.0);
    v.pan_by(10.0, 10.0);
    v.jump(0);
    assert_eq!(v.zoom(), MIN_ZOOM);
    assert_eq!(v.pan(), Point::ORIGIN);
  }

  // ── Zoom ─────────────────────────────────────────────────────────────────

  #[test]
  fn zoom_steps_stay_clamped() {
    let mut v = state(1);
    for _ in 0..20 {
      v.zoom_in();
      assert!(v.zoom() <= MAX_ZOOM);
    }
    assert_eq!(v.zoom(), MAX_ZOOM);
    for _ in 0..20 {
      v.zoom_out();
      assert!(v.zoom() >= MIN_ZOOM);
    }
    assert_eq!(v.zoom(), MIN_ZOOM);
  }

  #[test]
  fn pinch_scales_relative_to_start_and_clamps() {
    let mut v = state(1);
    v.pinch_start(100.0);
    v.pinch_move(150.0);
    assert_eq!(v.zoom(), 1.5);
    v.pinch_move(1000.0);
    assert_eq!(v.zoom(), MAX_ZOOM);
    v.pinch_move(10.0);
    assert_eq!(v.zoom(), MIN_ZOOM);
  }

  #[test]
  fn pinch_with_zero_start_distance_is_ignored() {
    let mut v = state(1);
    v.pinch_start(0.0);
    v.pinch_move(500.0);
    assert_eq!(v.zoom(), MIN_ZOOM);
  }

  #[test]
  fn non_finite_zoom_is_ignored() {
    let mut v = state(1);
    v.set_zoom(2.0);
    v.set_zoom(f64::NAN);
    v.set_zoom(f64::INFINITY);
    assert_eq!(v.zoom(), 2.0);
  }

  // ── Pan ──────────────────────────────────────────────────────────────────

  #[test]
  fn drag_is_ignored_at_base_zoom() {
    let mut v = state(1);
    v.drag_start(Point::new(10.0, 10.0));
    v.drag_move(Point::new(200.0, 200.0));
    assert_eq!(v.pan(), Point::ORIGIN);
    assert_eq!(v.gesture(), Gesture::Idle);
  }

  #[test]
  fn drag_pans_within_half_the_overflow() {
    let mut v = state(1);
    v.set_zoom(2.0);
    // limit = 800 * 1 / 2 = 400 horizontally, 500 vertically
    v.drag_start(Point::new(0.0, 0.0));
    v.drag_move(Point::new(120.0, -80.0));
    assert_eq!(v.pan(), Point::new(120.0, -80.0));
    v.drag_move(Point::new(5000.0, -5000.0));
    assert_eq!(v.pan(), Point::new(400.0, -500.0));
    v.drag_end();
    assert_eq!(v.gesture(), Gesture::Idle);
  }

  #[test]
  fn drag_continues_from_current_pan() {
    let mut v = state(1);
    v.set_zoom(3.0);
    v.pan_to(Point::new(100.0, 0.0));
    v.drag_start(Point::new(10.0, 10.0));
    v.drag_move(Point::new(20.0, 10.0));
    assert_eq!(v.pan(), Point::new(110.0, 0.0));
  }

  #[test]
  fn zooming_out_reclamps_pan() {
    let mut v = state(1);
    v.set_zoom(3.0);
    v.pan_by(800.0, 0.0);
    assert_eq!(v.pan().x, 800.0);
    v.set_zoom(1.5);
    assert_eq!(v.pan().x, 200.0);
    v.set_zoom(1.0);
    assert_eq!(v.pan(), Point::ORIGIN);
  }

  #[test]
  fn touch_dispatches_pinch_and_drag() {
    let mut v = state(1);
    v.touch_start(&[Point::new(0.0, 0.0), Point::new(100.0, 0.0)]);
    v.touch_move(&[Point::new(0.0, 0.0), Point::new(200.0, 0.0)]);
    assert_eq!(v.zoom(), 2.0);
    v.touch_end();

    v.touch_start(&[Point::new(50.0, 50.0)]);
    v.touch_move(&[Point::new(80.0, 60.0)]);
    assert_eq!(v.pan(), Point::new(30.0, 10.0));
  }

  #[test]
  fn transform_reflects_state() {
    let mut v = state(1);
    assert_eq!(v.transform(), "translate(0px, 0px) scale(1)");
    v.set_zoom(1.25);
    v.pan_by(-20.0, 15.0);
    assert_eq!(v.transform(), "translate(-20px, 15px) scale(1.25)");
    assert_eq!(v.zoom_percent(), 125);
  }

  // ── Fullscreen ───────────────────────────────────────────────────────────

  struct FakeHost {
    supported: bool,
    active:    bool,
    refuse:    bool,
  }

  impl FullscreenHost for FakeHost {
    type Error = &'static str;

    fn is_supported(&self) -> bool { self.supported }

    fn is_fullscreen(&self) -> bool { self.active }

    fn request_fullscreen(&mut self) -> Result<(), Self::Error> {
      if self.refuse {
        return Err("denied");
      }
      self.active = true;
      Ok(())
    }

    fn exit_fullscreen(&mut self) -> Result<(), Self::Error> {
      self.active = false;
      Ok(())
    }
  }

  #[test]
  fn toggle_follows_host_state() {
    let mut host = FakeHost { supported: true, active: false, refuse: false };
    let mut v = state(2);
    v.toggle_fullscreen(&mut host).unwrap();
    assert!(v.is_fullscreen());
    v.toggle_fullscreen(&mut host).unwrap();
    assert!(!v.is_fullscreen());
  }

  #[test]
  fn unsupported_or_refused_host_stays_windowed() {
    let mut v = state(2);
    let mut unsupported = FakeHost { supported: false, active: false, refuse: false };
    v.toggle_fullscreen(&mut unsupported).unwrap();
    assert!(!v.is_fullscreen());

    let mut refusing = FakeHost { supported: true, active: false, refuse: true };
    assert_eq!(v.toggle_fullscreen(&mut refusing), Err("denied"));
    assert!(!v.is_fullscreen());
  }

  #[test]
  fn external_exit_is_reflected() {
    let mut host = FakeHost { supported: true, active: false, refuse: false };
    let mut v = state(2);
    v.toggle_fullscreen(&mut host).unwrap();
    host.active = false;
    v.on_fullscreen_change(host.is_fullscreen());
    assert!(!v.is_fullscreen());
    // The next toggle enters again rather than trying to exit.
    v.toggle_fullscreen(&mut host).unwrap();
    assert!(v.is_fullscreen());
  }
}
