use crate::error::AppError;
use crate::member::MemberID;
use crate::profile::{load_page_props, PageProps};
use crate::state::SharedState;
use crate::view::{NotFoundTemplate, ProfileTemplate};
use askama::Template;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::Html;

const NOT_FOUND_TITLE: &str = "Member Not Found | Member Real Dev Squad";

pub(super) async fn get(
    State(state): SharedState,
    Path(member_id): Path<MemberID>,
) -> Result<(HeaderMap, Html<String>), AppError> {
    let mut headers = HeaderMap::new();
    let props = load_page_props(&state, &member_id, &mut headers).await;

    let page = render_page(&props, state.members_url.as_str())?;

    Ok((headers, Html(page)))
}

pub fn render_page(props: &PageProps, members_url: &str) -> Result<String, askama::Error> {
    if props.is_error() {
        return NotFoundTemplate {
            title: NOT_FOUND_TITLE,
            error_msg: &props.error_message,
            members_url,
        }
        .render();
    }

    ProfileTemplate {
        title: props.user.display_title(),
        image_link: &props.image_link,
        members_data: &props.user,
        contributions: &props.contributions,
    }
    .render()
}
