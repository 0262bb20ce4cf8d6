//! GET /archive: issues from the configured window, newest first.

use axum::{extract::State, response::Html};
use gazette_core::{
  blob::BlobStore,
  issue::{IssueDate, cutoff},
  store::IssueStore,
};

use crate::{AppState, error::Error, html::Page};

pub async fn handler<S, B>(
  State(state): State<AppState<S, B>>,
) -> Result<Html<String>, Error>
where
  S: IssueStore + 'static,
  B: BlobStore + 'static,
{
  let days = state.config.archive_days;
  let since = cutoff(IssueDate::today(), days);
  let issues = state.store.archive(since).await.map_err(Error::store)?;

  let site_title = &state.config.site_title;
  let mut page = Page::new(&format!("Archive | {site_title}"))?;
  page.site_header(site_title)?;
  page.element("h2", &[], "Archive")?;

  if issues.is_empty() {
    page.element("p", &[], &format!("No newspapers in the last {days} days."))?;
  } else {
    page.element("p", &[], &format!("Issues from the last {days} days."))?;
    page.open("ul", &[("class", "archive")])?;
    for summary in &issues {
      let href = format!("/newspaper/{}", summary.date);
      page.open("li", &[])?;
      page.open("a", &[("href", href.as_str())])?;
      page.element("h3", &[], &summary.title)?;
      page.element("p", &[("class", "issue-date")], &summary.date.long_display())?;
      page.element("span", &[("class", "read-more")], "Read →")?;
      page.close("a")?.close("li")?;
    }
    page.close("ul")?;
  }

  page.site_footer(site_title)?;
  Ok(Html(page.finish()?))
}
