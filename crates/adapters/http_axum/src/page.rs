//! Directory page: the server-side rendered list of services.

use askama::Template;
use axum::extract::{Form, RawQuery, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::Deserialize;

use osmlinks_app::ports::PreferenceStore;
use osmlinks_app::view::{DirectoryView, EXAMPLE_VIEWPORT};
use osmlinks_domain::params::{MAP_KEY, fragment_value};
use osmlinks_domain::prefs::Preferences;

use crate::error::{ApiError, PageError};
use crate::state::AppState;

/// Query key carrying the filter text.
pub const FILTER_KEY: &str = "filter";

/// Directory page template.
#[derive(Template)]
#[template(path = "directory.html")]
pub struct DirectoryTemplate<'a> {
    view: &'a DirectoryView,
    example_viewport: &'static str,
    /// Whether the page is served (forms work) or rendered to a static file.
    interactive: bool,
}

/// Render the directory page to an HTML string.
///
/// # Errors
///
/// Returns [`PageError`] when the template fails to render.
pub fn render(view: &DirectoryView, interactive: bool) -> Result<String, PageError> {
    let page = DirectoryTemplate {
        view,
        example_viewport: EXAMPLE_VIEWPORT,
        interactive,
    };
    Ok(page.render()?)
}

/// `GET /`: the directory, parameterized by `?map=..&filter=..`.
pub async fn index<P>(
    State(state): State<AppState<P>>,
    RawQuery(query): RawQuery,
) -> Result<Html<String>, PageError>
where
    P: PreferenceStore + Send + Sync + 'static,
{
    let query = query.unwrap_or_default();
    let filter = fragment_value(&query, FILTER_KEY).unwrap_or_default();

    let session = state.directory_service.state_for(&query, &filter).await;
    let view = state.directory_service.render(&session);

    Ok(Html(render(&view, true)?))
}

/// Form data posted by the preference checkboxes.
///
/// Unchecked boxes are not submitted at all.
#[derive(Debug, Default, Deserialize)]
pub struct PrefsForm {
    pub target_blank: Option<String>,
    pub show_visited: Option<String>,
    pub map: Option<String>,
    pub filter: Option<String>,
}

impl PrefsForm {
    fn preferences(&self) -> Preferences {
        Preferences {
            target_blank: self.target_blank.is_some(),
            show_visited: self.show_visited.is_some(),
        }
    }

    /// Where to send the browser back to, keeping viewport and filter.
    fn return_location(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        let pairs = [(MAP_KEY, &self.map), (FILTER_KEY, &self.filter)];
        let mut any = false;
        for (key, value) in pairs {
            if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
                serializer.append_pair(key, value);
                any = true;
            }
        }
        if any {
            format!("/?{}", serializer.finish())
        } else {
            "/".to_string()
        }
    }
}

/// Response from the preference form handler (PRG pattern).
pub enum UpdatePrefsResponse {
    /// Redirect back to the directory page.
    Redirect(Redirect),
}

impl IntoResponse for UpdatePrefsResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Redirect(redirect) => redirect.into_response(),
        }
    }
}

/// `POST /prefs`: store preferences, then redirect back.
pub async fn update_prefs<P>(
    State(state): State<AppState<P>>,
    Form(form): Form<PrefsForm>,
) -> Result<UpdatePrefsResponse, ApiError>
where
    P: PreferenceStore + Send + Sync + 'static,
{
    state
        .directory_service
        .save_preferences(form.preferences())
        .await?;

    Ok(UpdatePrefsResponse::Redirect(Redirect::to(
        &form.return_location(),
    )))
}
