//! GET /: the most recent issue.

use axum::{
  extract::{Query, State},
  response::Html,
};
use gazette_core::{blob::BlobStore, store::IssueStore};

use crate::{AppState, error::Error, gallery::ViewQuery, handlers::issue_page, html::Page};

pub async fn handler<S, B>(
  State(state): State<AppState<S, B>>,
  Query(query): Query<ViewQuery>,
) -> Result<Html<String>, Error>
where
  S: IssueStore + 'static,
  B: BlobStore + 'static,
{
  let latest = state.store.latest().await.map_err(Error::store)?;

  let body = match latest {
    Some(issue) => issue_page(&state.config, &issue, "/", &query)?,
    None => placeholder(&state.config.site_title)?,
  };
  Ok(Html(body))
}

fn placeholder(site_title: &str) -> Result<String, Error> {
  let mut page = Page::new(site_title)?;
  page.site_header(site_title)?;
  page.element("h2", &[], "No newspaper published yet")?;
  page.element("p", &[], "Check back soon for the first edition.")?;
  page.link("/archive", "button", "Browse the archive")?;
  page.site_footer(site_title)?;
  page.finish()
}
