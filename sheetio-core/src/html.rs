//! HTML page templates for exported cell values

const CORE_TEMPLATE: &str = "<html>\
\t<head>\
\t\t<script type=\"text/javascript\" src=\"http://livejs.com/live.js\"></script>\
\t\t<style>body { margin: 0; padding: 0; } <scale> </style>\
\t</head>\
\t<body>\
\t\t<content></content> \
</body>\
</html>";

const SCALE_CSS: &str = "#content { width: 100%; height: 100%; }";

/// 1x1 transparent GIF shown when an image URL is blank
pub const EMPTY_IMG_SRC: &str =
    "data:image/gif;base64,R0lGODlhAQABAIAAAP///wAAACH5BAEAAAAALAAAAAABAAEAAAICRAEAOw==";

/// Builder for a single-element HTML page
///
/// # Examples
/// ```
/// use sheetio_core::html::HtmlBuilder;
///
/// let page = HtmlBuilder::new().div("hello").scale(false).build();
/// assert!(page.contains(r#"<span id="text">hello</span>"#));
/// ```
#[derive(Debug, Clone)]
pub struct HtmlBuilder {
    content: String,
    scale: bool,
}

impl Default for HtmlBuilder {
    fn default() -> Self {
        Self {
            content: String::new(),
            scale: true,
        }
    }
}

impl HtmlBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// `<iframe>` pointing at `url`
    pub fn iframe(mut self, url: &str) -> Self {
        self.content = format!(
            "<iframe src=\"{}\" id=\"content\" frameborder=\"0\"></iframe>",
            url
        );
        self
    }

    /// `<img>` for `url`, or a transparent pixel when `url` is blank
    pub fn img(mut self, url: &str) -> Self {
        let src = if url.trim().is_empty() {
            EMPTY_IMG_SRC
        } else {
            url
        };
        self.content = format!("<img src=\"{}\" id=\"content\" />", src);
        self
    }

    /// Text inside a `<div>`
    pub fn div(mut self, text: &str) -> Self {
        self.content = format!(
            "<div id=\"content\"><span id=\"text\">{}</span></div>",
            text
        );
        self
    }

    /// Looping autoplay `<video>` for `url` with the given content type
    pub fn video(mut self, url: &str, content_type: &str) -> Self {
        self.content = format!(
            "<video width=\"100%\" height=\"100%\" autoplay loop>\
             <source src=\"{}\" type=\"{}\" autoplay></video>",
            url, content_type
        );
        self
    }

    /// Page with no content
    pub fn empty(mut self) -> Self {
        self.content.clear();
        self
    }

    /// Stretch the content to the full page (on by default)
    pub fn scale(mut self, scale: bool) -> Self {
        self.scale = scale;
        self
    }

    pub fn build(&self) -> String {
        CORE_TEMPLATE
            .replace("<content></content>", &self.content)
            .replace("<scale>", if self.scale { SCALE_CSS } else { "" })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_div_with_scale() {
        let page = HtmlBuilder::new().div("hello there").build();
        assert!(page.starts_with("<html>"));
        assert!(page.ends_with("</html>"));
        assert!(page.contains(r#"<div id="content"><span id="text">hello there</span></div>"#));
        assert!(page.contains(SCALE_CSS));
        assert!(!page.contains("<content>"));
        assert!(!page.contains("<scale>"));
    }

    #[test]
    fn test_without_scale() {
        let page = HtmlBuilder::new().iframe("https://obs.ninja").scale(false).build();
        assert!(page.contains(r#"<iframe src="https://obs.ninja" id="content" frameborder="0"></iframe>"#));
        assert!(!page.contains(SCALE_CSS));
    }

    #[test]
    fn test_img_falls_back_to_empty_pixel() {
        let page = HtmlBuilder::new().img("  ").build();
        assert!(page.contains(EMPTY_IMG_SRC));

        let page = HtmlBuilder::new().img("https://i.imgur.com/asd123.png").build();
        assert!(page.contains(r#"<img src="https://i.imgur.com/asd123.png" id="content" />"#));
    }

    #[test]
    fn test_video() {
        let page = HtmlBuilder::new()
            .video("/files/thing.webm", "video/webm")
            .build();
        assert!(page.contains(r#"<source src="/files/thing.webm" type="video/webm" autoplay>"#));
    }

    #[test]
    fn test_empty_replaces_previous_content() {
        let page = HtmlBuilder::new().div("gone").empty().build();
        assert!(!page.contains("gone"));
        assert!(page.contains("<body>\t\t </body>"));
    }
}
