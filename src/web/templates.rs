use askama::Template;

#[derive(Template)]
#[template(path = "about.html")]
pub struct AboutTemplate {
    /// Self-referencing `/guest` link, only present after a POST
    pub encoded_url: Option<String>,
}
