//! The upload zone: collects files dropped or picked by the administrator and
//! forwards only the images.

use bytes::Bytes;

/// A file offered for upload, as received from the browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
  pub name:         String,
  /// The declared MIME type, e.g. `image/jpeg`.
  pub content_type: String,
  pub bytes:        Bytes,
}

impl UploadFile {
  pub fn new(
    name: impl Into<String>,
    content_type: impl Into<String>,
    bytes: impl Into<Bytes>,
  ) -> Self {
    Self {
      name:         name.into(),
      content_type: content_type.into(),
      bytes:        bytes.into(),
    }
  }

  /// Whether the declared type is an image type.
  pub fn is_image(&self) -> bool {
    self
      .content_type
      .get(..6)
      .is_some_and(|prefix| prefix.eq_ignore_ascii_case("image/"))
  }

  /// File extension used for the stored object, derived from the declared
  /// type. Unknown image types are stored as `jpg`.
  pub fn extension(&self) -> &'static str {
    let subtype = self
      .content_type
      .split(';')
      .next()
      .unwrap_or_default()
      .trim()
      .to_ascii_lowercase();
    match subtype.as_str() {
      "image/png" => "png",
      "image/gif" => "gif",
      "image/webp" => "webp",
      "image/avif" => "avif",
      "image/tiff" => "tif",
      "image/bmp" => "bmp",
      _ => "jpg",
    }
  }
}

/// Keep only image files, preserving order.
pub fn filter_images(files: impl IntoIterator<Item = UploadFile>) -> Vec<UploadFile> {
  files.into_iter().filter(UploadFile::is_image).collect()
}

// ─── UploadZone ──────────────────────────────────────────────────────────────

/// Drop target state. Non-image files are dropped silently; the handler only
/// runs when at least one image remains.
#[derive(Debug, Default)]
pub struct UploadZone {
  drag_active: bool,
}

impl UploadZone {
  pub fn new() -> Self { Self::default() }

  /// Whether a drag is currently hovering over the zone.
  pub fn is_drag_active(&self) -> bool { self.drag_active }

  pub fn drag_enter(&mut self) { self.drag_active = true; }

  pub fn drag_over(&mut self) { self.drag_active = true; }

  pub fn drag_leave(&mut self) { self.drag_active = false; }

  /// Files released over the zone.
  pub fn drop<F>(&mut self, files: Vec<UploadFile>, on_files: F)
  where
    F: FnOnce(Vec<UploadFile>),
  {
    self.drag_active = false;
    Self::forward(files, on_files);
  }

  /// Files chosen through the file picker.
  pub fn select<F>(&self, files: Vec<UploadFile>, on_files: F)
  where
    F: FnOnce(Vec<UploadFile>),
  {
    Self::forward(files, on_files);
  }

  fn forward<F>(files: Vec<UploadFile>, on_files: F)
  where
    F: FnOnce(Vec<UploadFile>),
  {
    let offered = files.len();
    let images = filter_images(files);
    tracing::debug!(offered, accepted = images.len(), "upload zone filtered files");
    if !images.is_empty() {
      on_files(images);
    }
  }
}
