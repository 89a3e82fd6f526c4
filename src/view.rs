use crate::member::{Contributions, User};
use askama::Template;

#[derive(Template)]
#[template(path = "profile.html")]
pub struct ProfileTemplate<'a> {
    pub title: String,
    pub image_link: &'a str,
    pub members_data: &'a User,
    pub contributions: &'a Contributions,
}

#[derive(Template)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate<'a> {
    pub title: &'static str,
    pub error_msg: &'a str,
    pub members_url: &'a str,
}
