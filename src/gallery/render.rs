//! HTML rendering for the gallery page.

use super::GalleryEntry;

const STYLE: &str = r#"        body {
            background: #0a0a0a;
            color: #fff;
            font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
            margin: 0;
            padding: 20px;
        }
        .container {
            max-width: 1200px;
            margin: 0 auto;
        }
        h1 {
            color: #8a2be2;
            text-align: center;
            margin-bottom: 40px;
            text-shadow: 0 0 10px rgba(138, 43, 226, 0.5);
        }
        .gallery {
            display: grid;
            grid-template-columns: repeat(auto-fill, minmax(300px, 1fr));
            gap: 20px;
        }
        .image-card {
            background: #1a1a1a;
            border-radius: 10px;
            overflow: hidden;
            border: 1px solid #333;
            transition: transform 0.3s, box-shadow 0.3s;
        }
        .image-card:hover {
            transform: translateY(-5px);
            box-shadow: 0 10px 20px rgba(138, 43, 226, 0.3);
        }
        .image-card img {
            width: 100%;
            height: 250px;
            object-fit: cover;
            display: block;
        }
        .image-card .info {
            padding: 15px;
        }
        .image-card h3 {
            margin: 0 0 10px 0;
            color: #8a2be2;
        }
        .image-card p {
            margin: 0;
            color: #aaa;
            font-size: 14px;
        }
"#;

/// Render the gallery document.
///
/// `src_prefix` is prepended to each file name in `<img src>` (e.g. `images/`).
/// Cards appear in the order of `entries`.
pub fn render_gallery(title: &str, src_prefix: &str, entries: &[GalleryEntry]) -> String {
    let title = escape_html(title);
    let mut html = String::with_capacity(STYLE.len() + 512 * (entries.len() + 1));

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("    <meta charset=\"UTF-8\">\n");
    html.push_str(
        "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
    );
    html.push_str(&format!("    <title>{}</title>\n", title));
    html.push_str("    <style>\n");
    html.push_str(STYLE);
    html.push_str("    </style>\n</head>\n<body>\n");
    html.push_str("    <div class=\"container\">\n");
    html.push_str(&format!("        <h1>{}</h1>\n", title));
    html.push_str("        <div class=\"gallery\">\n");

    for entry in entries {
        html.push_str(&render_card(src_prefix, entry));
    }

    html.push_str("        </div>\n    </div>\n</body>\n</html>\n");
    html
}

fn render_card(src_prefix: &str, entry: &GalleryEntry) -> String {
    let caption = escape_html(&entry.caption);
    let file = escape_html(&entry.file_name);
    let src = escape_html(&image_src(src_prefix, &entry.file_name));

    format!(
        r#"            <div class="image-card">
                <img src="{src}" alt="{caption}">
                <div class="info">
                    <h3>{caption}</h3>
                    <p>File: {file}</p>
                </div>
            </div>
"#
    )
}

/// Relative URL of an image: each path segment percent-encoded, so names
/// containing `#`, `?`, `%` or spaces still resolve.
fn image_src(src_prefix: &str, file_name: &str) -> String {
    src_prefix
        .split('/')
        .chain(std::iter::once(file_name))
        .filter(|segment| !segment.is_empty())
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
