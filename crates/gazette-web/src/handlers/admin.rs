//! The admin panel: publish pages for a date, delete an issue.
//!
//! Every action answers with the panel itself, carrying a notice that
//! describes the outcome. Deleting asks for confirmation on a separate page
//! first.

use axum::{
  Form,
  extract::{Multipart, State},
  http::StatusCode,
  response::{Html, IntoResponse, Response},
};
use chrono::Utc;
use gazette_core::{
  blob::BlobStore,
  issue::{Issue, IssueDate, IssueSummary, cutoff},
  publish::{self, AdminForm, PublishError},
  store::IssueStore,
  upload::{UploadFile, UploadZone},
};
use serde::Deserialize;

use crate::{
  AppState, ServerConfig,
  auth::Authenticated,
  error::Error,
  html::{Flash, Page},
};

/// Value of the `confirm` field that authorises a delete.
pub const CONFIRM_TOKEN: &str = "yes";

#[derive(Debug, Deserialize)]
pub struct DeleteForm {
  #[serde(default)]
  pub date:    String,
  pub confirm: Option<String>,
}

/// GET /admin
pub async fn panel<S, B>(
  _auth: Authenticated,
  State(state): State<AppState<S, B>>,
) -> Result<Html<String>, Error>
where
  S: IssueStore + 'static,
  B: BlobStore + 'static,
{
  let form = AdminForm::new(IssueDate::today());
  let (recent, notices) = recent_issues(&state, Vec::new()).await;
  Ok(Html(panel_page(&state.config, &form, &notices, &recent)?))
}

/// POST /admin/upload (multipart: `title`, `date`, one or more `files`).
pub async fn upload<S, B>(
  _auth: Authenticated,
  State(state): State<AppState<S, B>>,
  mut multipart: Multipart,
) -> Result<Response, Error>
where
  S: IssueStore + 'static,
  B: BlobStore + 'static,
{
  let today = IssueDate::today();
  let mut form = AdminForm::new(today);
  let mut offered = Vec::new();

  while let Some(field) = multipart.next_field().await? {
    let name = field.name().unwrap_or_default().to_owned();
    match name.as_str() {
      "title" => form.title = field.text().await?,
      "date" => form.date = field.text().await?,
      "files" => {
        let file_name = field.file_name().unwrap_or_default().to_owned();
        let content_type = field.content_type().unwrap_or_default().to_owned();
        let bytes = field.bytes().await?;
        offered.push(UploadFile::new(file_name, content_type, bytes));
      }
      _ => {}
    }
  }
  form.add_files(&UploadZone::new(), offered);

  let outcome = form
    .submit(state.store.as_ref(), state.blobs.as_ref(), Utc::now(), today)
    .await;
  let (status, flash) = match outcome {
    Ok(report) => (StatusCode::OK, Flash::Success(report.message())),
    Err(e) => (failure_status(&e), Flash::Error(e.to_string())),
  };

  let (recent, notices) = recent_issues(&state, vec![flash]).await;
  let body = panel_page(&state.config, &form, &notices, &recent)?;
  Ok((status, Html(body)).into_response())
}

/// POST /admin/delete (form: `date`, optional `confirm`).
pub async fn delete<S, B>(
  _auth: Authenticated,
  State(state): State<AppState<S, B>>,
  Form(input): Form<DeleteForm>,
) -> Result<Response, Error>
where
  S: IssueStore + 'static,
  B: BlobStore + 'static,
{
  let confirmed = input.confirm.as_deref() == Some(CONFIRM_TOKEN);
  let outcome = publish::delete(
    state.store.as_ref(),
    state.blobs.as_ref(),
    &input.date,
    confirmed,
  )
  .await;

  let (status, flash) = match outcome {
    Ok(report) if report.has_orphans() => (StatusCode::OK, Flash::Warning(report.message())),
    Ok(report) => (StatusCode::OK, Flash::Success(report.message())),
    Err(PublishError::ConfirmationRequired(date)) => {
      let existing = state.store.get_issue(date).await.map_err(Error::store)?;
      let body = confirm_page(&state.config, date, existing.as_ref())?;
      return Ok(Html(body).into_response());
    }
    Err(e) => (failure_status(&e), Flash::Error(e.to_string())),
  };

  let form = AdminForm::new(IssueDate::today());
  let (recent, notices) = recent_issues(&state, vec![flash]).await;
  let body = panel_page(&state.config, &form, &notices, &recent)?;
  Ok((status, Html(body)).into_response())
}

fn failure_status(e: &PublishError) -> StatusCode {
  match e {
    PublishError::Validation(_) => StatusCode::BAD_REQUEST,
    PublishError::ConfirmationRequired(_) => StatusCode::OK,
    PublishError::Upload { .. } | PublishError::Store(_) => {
      tracing::error!(error = %e, "admin action failed");
      StatusCode::INTERNAL_SERVER_ERROR
    }
  }
}

/// Issues listed under the panel, with `notices` to show above it.
///
/// The listing is best effort: it is read after an action has already been
/// committed, so a failed read adds a warning instead of failing the request.
async fn recent_issues<S, B>(
  state:       &AppState<S, B>,
  mut notices: Vec<Flash>,
) -> (Vec<IssueSummary>, Vec<Flash>)
where
  S: IssueStore + 'static,
{
  let since = cutoff(IssueDate::today(), state.config.archive_days);
  match state.store.archive(since).await {
    Ok(recent) => (recent, notices),
    Err(e) => {
      tracing::error!(error = %e, "failed to list recent issues");
      notices.push(Flash::Warning(format!("Recent issues could not be loaded: {e}")));
      (Vec::new(), notices)
    }
  }
}

// ─── Pages ───────────────────────────────────────────────────────────────────

fn panel_page(
  config:  &ServerConfig,
  form:    &AdminForm,
  notices: &[Flash],
  recent:  &[IssueSummary],
) -> Result<String, Error> {
  let site_title = &config.site_title;
  let mut page = Page::new(&format!("Admin Panel | {site_title}"))?;
  page.site_header(site_title)?;
  page.element("h2", &[], "Admin Panel")?;
  page.post_button("/admin/logout", &[], "Sign Out")?;
  for notice in notices {
    page.notice(notice)?;
  }

  page.element("h3", &[], "Upload Newspaper")?;
  page.open("form", &[
    ("method", "post"),
    ("action", "/admin/upload"),
    ("enctype", "multipart/form-data"),
    ("class", "stacked"),
  ])?;
  page.open("label", &[])?.text("Publication Date")?;
  page.void("input", &[
    ("type", "date"),
    ("name", "date"),
    ("value", form.date.as_str()),
    ("required", "required"),
  ])?;
  page.close("label")?;
  page.open("label", &[])?.text("Newspaper Title")?;
  page.void("input", &[
    ("type", "text"),
    ("name", "title"),
    ("value", form.title.as_str()),
    ("placeholder", "e.g. Morning Edition"),
    ("required", "required"),
  ])?;
  page.close("label")?;
  page.open("label", &[("class", "upload-zone")])?;
  page.text("Drag and drop newspaper images here, or click to select files")?;
  page.void("input", &[
    ("type", "file"),
    ("name", "files"),
    ("accept", "image/*"),
    ("multiple", "multiple"),
  ])?;
  page.close("label")?;
  page.element("button", &[("type", "submit"), ("class", "button")], "Upload Images")?;
  page.close("form")?;

  page.element("h3", &[], "Delete Newspaper")?;
  page.open("form", &[("method", "post"), ("action", "/admin/delete"), ("class", "stacked")])?;
  page.open("label", &[])?.text("Publication Date")?;
  page.void("input", &[("type", "date"), ("name", "date"), ("required", "required")])?;
  page.close("label")?;
  page.element("button", &[("type", "submit"), ("class", "button")], "Delete Issue")?;
  page.close("form")?;

  page.element("h3", &[], "Recent Issues")?;
  if recent.is_empty() {
    page.element("p", &[], "No recent issues.")?;
  } else {
    page.open("ul", &[("class", "archive")])?;
    for summary in recent {
      let date = summary.date.to_string();
      let href = format!("/newspaper/{date}");
      page.open("li", &[])?;
      page.link(&href, "", &format!("{date} · {}", summary.title))?;
      page.post_button("/admin/delete", &[("date", date.as_str())], "Delete")?;
      page.close("li")?;
    }
    page.close("ul")?;
  }

  page.site_footer(site_title)?;
  page.finish()
}

fn confirm_page(
  config:   &ServerConfig,
  date:     IssueDate,
  existing: Option<&Issue>,
) -> Result<String, Error> {
  let site_title = &config.site_title;
  let date_str = date.to_string();
  let mut page = Page::new(&format!("Confirm Delete | {site_title}"))?;
  page.site_header(site_title)?;
  page.element("h2", &[], "Confirm Delete")?;

  let question = match existing {
    Some(issue) => format!(
      "Delete \"{}\" ({} page(s)) published on {}? This cannot be undone.",
      issue.title,
      issue.page_count(),
      date.long_display(),
    ),
    None => format!(
      "No issue is recorded for {}. Remove any stored files for that date? This cannot be undone.",
      date.long_display(),
    ),
  };
  page.element("p", &[], &question)?;
  page.post_button(
    "/admin/delete",
    &[("date", date_str.as_str()), ("confirm", CONFIRM_TOKEN)],
    "Delete permanently",
  )?;
  page.link("/admin", "button", "Cancel")?;

  page.site_footer(site_title)?;
  page.finish()
}
