use askama::Template;
use askama_web::WebTemplate;

use crate::display::DisplaySnapshot;

#[derive(Template, WebTemplate)]
#[template(path = "display.html")]
pub struct DisplayTemplate {
    pub snapshot: DisplaySnapshot,
    pub canvas_size: f64,
}
