//! RSS 2.0 feed generation.
//!
//! One channel, one item per post, same order as the collection (date
//! descending). Item HTML content ships inside a CDATA section so feed
//! readers do not reinterpret it as feed markup; titles and channel
//! fields are XML-escaped. The channel `lastBuildDate` is the
//! generation time, never a post date.

use crate::date::PostDate;
use crate::post::PostCollection;

/// Render the full `feed.xml` document.
pub fn render_feed(posts: &PostCollection, site_name: &str, build_time: PostDate) -> String {
    let mut items = String::new();
    for post in posts.posts() {
        let link = format!("https://{}{}", escape_xml(site_name), post.permalink());
        items.push_str(&format!(
            "\
<item>
    <title>{title}</title>
    <link>{link}</link>
    <description><![CDATA[{content}]]></description>
    <pubDate>{pub_date}</pubDate>
    <guid>{link}</guid>
</item>
",
            title = escape_xml(&post.title),
            link = link,
            content = cdata_safe(&post.content),
            pub_date = post.date.rfc822(),
        ));
    }

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" ?>
<rss version="2.0" xmlns:atom="http://www.w3.org/2005/Atom">
<channel>
    <title>{site}</title>
    <link>https://{site}/</link>
    <description>Latest posts from {site}</description>
    <language>en-us</language>
    <lastBuildDate>{build_date}</lastBuildDate>
    <atom:link href="https://{site}/feed.xml" rel="self" type="application/rss+xml" />
{items}</channel>
</rss>
"#,
        site = escape_xml(site_name),
        build_date = build_time.rfc822(),
        items = items,
    )
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// A CDATA section ends at the first `]]>`; split any occurrence in the
/// payload across two sections.
fn cdata_safe(content: &str) -> String {
    content.replace("]]>", "]]]]><![CDATA[>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::post::Post;
    use chrono::NaiveDate;
    use std::path::PathBuf;

    fn build_time() -> PostDate {
        PostDate::new(
            NaiveDate::from_ymd_opt(2025, 2, 3)
                .unwrap()
                .and_hms_opt(8, 30, 0)
                .unwrap(),
        )
    }

    fn post(title: &str, date: &str) -> Post {
        let instant = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        Post {
            title: title.to_string(),
            date: PostDate::new(instant),
            tags: vec![],
            content: format!("<p>Body of {title}.</p>"),
            source_path: PathBuf::from(format!("{title}.md")),
        }
    }

    #[test]
    fn one_item_per_post_in_collection_order() {
        let posts = PostCollection::from_posts(vec![
            post("Hello", "2024-01-01"),
            post("World", "2024-06-15"),
        ]);
        let xml = render_feed(&posts, "blog.example.net", build_time());
        assert_eq!(xml.matches("<item>").count(), 2);
        let world = xml.find("<title>World</title>").unwrap();
        let hello = xml.find("<title>Hello</title>").unwrap();
        assert!(world < hello);
    }

    #[test]
    fn links_and_guids_are_absolute_permalinks() {
        let posts = PostCollection::from_posts(vec![post("Hello", "2023-11-07")]);
        let xml = render_feed(&posts, "blog.example.net", build_time());
        assert!(xml.contains("<link>https://blog.example.net/2023/11/07/</link>"));
        assert!(xml.contains("<guid>https://blog.example.net/2023/11/07/</guid>"));
    }

    #[test]
    fn content_wrapped_in_cdata() {
        let posts = PostCollection::from_posts(vec![post("Hello", "2024-01-01")]);
        let xml = render_feed(&posts, "site", build_time());
        assert!(xml.contains("<![CDATA[<p>Body of Hello.</p>]]>"));
    }

    #[test]
    fn cdata_terminator_in_content_is_split() {
        let mut p = post("Hello", "2024-01-01");
        p.content = "<p>a ]]> b</p>".to_string();
        let posts = PostCollection::from_posts(vec![p]);
        let xml = render_feed(&posts, "site", build_time());
        assert!(!xml.contains("<p>a ]]> b</p>"));
        assert!(xml.contains("]]]]><![CDATA[>"));
    }

    #[test]
    fn titles_are_escaped() {
        let posts = PostCollection::from_posts(vec![post("Cats & <Dogs>", "2024-01-01")]);
        let xml = render_feed(&posts, "site", build_time());
        assert!(xml.contains("<title>Cats &amp; &lt;Dogs&gt;</title>"));
    }

    #[test]
    fn site_name_is_escaped_in_item_links_too() {
        let posts = PostCollection::from_posts(vec![post("Hello", "2023-11-07")]);
        let xml = render_feed(&posts, "cats&dogs.example.net", build_time());
        assert!(!xml.contains("cats&dogs"));
        assert!(xml.contains("<link>https://cats&amp;dogs.example.net/2023/11/07/</link>"));
        assert!(xml.contains("<guid>https://cats&amp;dogs.example.net/2023/11/07/</guid>"));
    }

    #[test]
    fn pub_date_is_rfc822() {
        let posts = PostCollection::from_posts(vec![post("Hello", "2024-06-15")]);
        let xml = render_feed(&posts, "site", build_time());
        assert!(xml.contains("<pubDate>Sat, 15 Jun 2024 00:00:00 +0000</pubDate>"));
    }

    #[test]
    fn build_date_is_generation_time_not_post_date() {
        let posts = PostCollection::from_posts(vec![post("Hello", "2024-06-15")]);
        let xml = render_feed(&posts, "site", build_time());
        assert!(xml.contains("<lastBuildDate>Mon, 03 Feb 2025 08:30:00 +0000</lastBuildDate>"));
    }

    #[test]
    fn empty_collection_yields_empty_channel() {
        let posts = PostCollection::default();
        let xml = render_feed(&posts, "site", build_time());
        assert!(!xml.contains("<item>"));
        assert!(xml.contains("<channel>"));
    }
}
