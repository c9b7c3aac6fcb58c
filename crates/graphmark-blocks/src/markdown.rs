//! Fallback markdown rendering for blocks no rule claims.
//!
//! A compact event-driven HTML writer over `pulldown-cmark`. The stock
//! `html` module is unavailable with our feature set, and a hand-rolled
//! writer keeps the output byte-stable for tests.

use std::fmt::Write;

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use crate::util::escape_html;

/// Parser options for fallback rendering.
fn parser_options() -> Options {
    Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
}

/// Render one block of markdown to an HTML fragment.
pub(crate) fn render_markdown(text: &str) -> String {
    let mut writer = HtmlWriter::default();
    for event in Parser::new_ext(text, parser_options()) {
        writer.event(event);
    }
    writer.out
}

/// Pending image while its alt-text events are collected.
struct ImageState {
    src: String,
    title: String,
    alt: String,
}

#[derive(Default)]
struct HtmlWriter {
    out: String,
    image: Option<ImageState>,
}

impl HtmlWriter {
    fn event(&mut self, event: Event<'_>) {
        // Events between Start(Image) and End(Image) are the alt text;
        // inline markup inside it is flattened to plain text.
        if let Some(image) = self.image.as_mut() {
            match event {
                Event::Text(text) => image.alt.push_str(&text),
                Event::Code(code) => image.alt.push_str(&code),
                Event::End(TagEnd::Image) => self.flush_image(),
                _ => {}
            }
            return;
        }

        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.out.push_str(&escape_html(&text)),
            Event::Code(code) => {
                write!(self.out, "<code>{}</code>", escape_html(&code)).unwrap();
            }
            Event::Html(html) | Event::InlineHtml(html) => self.out.push_str(&html),
            Event::SoftBreak => self.out.push('\n'),
            Event::HardBreak => self.out.push_str("<br>"),
            Event::Rule => self.out.push_str("<hr>"),
            Event::TaskListMarker(checked) => self.out.push_str(if checked {
                r#"<input type="checkbox" checked disabled> "#
            } else {
                r#"<input type="checkbox" disabled> "#
            }),
            Event::FootnoteReference(_) | Event::InlineMath(_) | Event::DisplayMath(_) => {
                // Not supported
            }
        }
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => self.out.push_str("<p>"),
            Tag::Heading { level, .. } => {
                write!(self.out, "<h{}>", heading_level_to_num(level)).unwrap();
            }
            Tag::BlockQuote(_) => self.out.push_str("<blockquote>"),
            Tag::CodeBlock(kind) => {
                let lang = match kind {
                    CodeBlockKind::Fenced(ref info) if !info.is_empty() => {
                        info.split_whitespace().next().map(str::to_owned)
                    }
                    _ => None,
                };
                if let Some(lang) = lang {
                    write!(
                        self.out,
                        r#"<pre><code class="language-{}">"#,
                        escape_html(&lang)
                    )
                    .unwrap();
                } else {
                    self.out.push_str("<pre><code>");
                }
            }
            Tag::List(Some(1)) => self.out.push_str("<ol>"),
            Tag::List(Some(n)) => {
                write!(self.out, r#"<ol start="{n}">"#).unwrap();
            }
            Tag::List(None) => self.out.push_str("<ul>"),
            Tag::Item => self.out.push_str("<li>"),
            Tag::Emphasis => self.out.push_str("<em>"),
            Tag::Strong => self.out.push_str("<strong>"),
            Tag::Strikethrough => self.out.push_str("<s>"),
            Tag::Link { dest_url, .. } => {
                write!(self.out, r#"<a href="{}">"#, escape_html(&dest_url)).unwrap();
            }
            Tag::Image {
                dest_url, title, ..
            } => {
                self.image = Some(ImageState {
                    src: dest_url.to_string(),
                    title: title.to_string(),
                    alt: String::new(),
                });
            }
            _ => {}
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => self.out.push_str("</p>"),
            TagEnd::Heading(level) => {
                write!(self.out, "</h{}>", heading_level_to_num(level)).unwrap();
            }
            TagEnd::BlockQuote(_) => self.out.push_str("</blockquote>"),
            TagEnd::CodeBlock => self.out.push_str("</code></pre>"),
            TagEnd::List(true) => self.out.push_str("</ol>"),
            TagEnd::List(false) => self.out.push_str("</ul>"),
            TagEnd::Item => self.out.push_str("</li>"),
            TagEnd::Emphasis => self.out.push_str("</em>"),
            TagEnd::Strong => self.out.push_str("</strong>"),
            TagEnd::Strikethrough => self.out.push_str("</s>"),
            TagEnd::Link => self.out.push_str("</a>"),
            _ => {}
        }
    }

    fn flush_image(&mut self) {
        if let Some(ImageState { src, title, alt }) = self.image.take() {
            if title.is_empty() {
                write!(
                    self.out,
                    r#"<img src="{}" alt="{}">"#,
                    escape_html(&src),
                    escape_html(&alt)
                )
                .unwrap();
            } else {
                write!(
                    self.out,
                    r#"<img src="{}" title="{}" alt="{}">"#,
                    escape_html(&src),
                    escape_html(&title),
                    escape_html(&alt)
                )
                .unwrap();
            }
        }
    }
}

/// Convert heading level enum to number (1-6).
fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}
