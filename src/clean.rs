// src/clean.rs

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Node};

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<.*?>").expect("tag regex should compile"));

/// Strip every `<...>` substring and every newline from `fragment`.
pub fn clean_tags(fragment: &str) -> String {
    TAG.replace_all(fragment, "").replace('\n', "")
}

/// Elements serialized without a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Clean the outer markup of a table cell.
///
/// The cell is re-serialized with only `&`, `<` and `>` escaped, in text and
/// in attribute values alike, so no `>` inside an attribute can end a tag
/// early and decoded entities such as U+00A0 stay as characters.
pub fn clean_element(el: ElementRef<'_>) -> String {
    let mut markup = String::new();
    serialize(el, &mut markup);
    clean_tags(&markup)
}

fn serialize(el: ElementRef<'_>, out: &mut String) {
    let name = el.value().name();
    out.push('<');
    out.push_str(name);
    for (key, value) in el.value().attrs() {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        push_escaped(out, value, true);
        out.push('"');
    }
    if VOID_ELEMENTS.contains(&name) {
        out.push_str("/>");
        return;
    }
    out.push('>');

    for child in el.children() {
        if let Some(child_el) = ElementRef::wrap(child) {
            serialize(child_el, out);
            continue;
        }
        match child.value() {
            Node::Text(text) => push_escaped(out, text, false),
            Node::Comment(comment) => {
                out.push_str("<!--");
                out.push_str(comment);
                out.push_str("-->");
            }
            _ => {}
        }
    }

    out.push_str("</");
    out.push_str(name);
    out.push('>');
}

fn push_escaped(out: &mut String, text: &str, in_attribute: bool) {
    for ch in text.chars() {
        match ch {
            '"' if in_attribute => out.push_str("&quot;"),
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    #[test]
    fn strips_tags_and_newlines() {
        assert_eq!(clean_tags("<b>3</b>\n"), "3");
        assert_eq!(
            clean_tags("<td><a href=\"/wiki/ISIS\">ISIS</a>\n</td>"),
            "ISIS"
        );
    }

    #[test]
    fn is_idempotent() {
        let once = clean_tags("<td>Boko <i>Haram</i>\n</td>");
        assert_eq!(once, "Boko Haram");
        assert_eq!(clean_tags(&once), once);
        assert_eq!(clean_tags("already clean"), "already clean");
    }

    #[test]
    fn empty_cells_clean_to_empty() {
        assert_eq!(clean_tags("<td></td>"), "");
        assert_eq!(clean_tags("\n\n"), "");
    }

    #[test]
    fn tag_spanning_a_newline_is_kept_then_newline_removed() {
        // the tag pattern does not cross lines, only the newline itself goes
        assert_eq!(clean_tags("<a\nhref=x>y</a>"), "<ahref=x>y");
    }

    #[test]
    fn cleans_parsed_element() {
        let doc = Html::parse_fragment("<table><tr><td><b>12</b>\n</td></tr></table>");
        let sel = Selector::parse("td").unwrap();
        let td = doc.select(&sel).next().unwrap();
        assert_eq!(clean_element(td), "12");
    }

    fn first_td(html: &str) -> String {
        let doc = Html::parse_fragment(html);
        let sel = Selector::parse("td").unwrap();
        clean_element(doc.select(&sel).next().unwrap())
    }

    #[test]
    fn non_breaking_space_stays_a_character() {
        assert_eq!(
            first_td("<table><tr><td>5&nbsp;March</td></tr></table>"),
            "5\u{a0}March"
        );
    }

    #[test]
    fn angle_bracket_in_attribute_does_not_end_the_tag() {
        assert_eq!(
            first_td(
                "<table><tr><td><a title=\"A &gt; B\" href=\"/wiki/x\">Boko&nbsp;Haram</a></td></tr></table>"
            ),
            "Boko\u{a0}Haram"
        );
    }

    #[test]
    fn markup_characters_in_text_stay_escaped() {
        assert_eq!(
            first_td("<table><tr><td>Fatah &amp; Hamas<br>1 &lt; 2</td></tr></table>"),
            "Fatah &amp; Hamas1 &lt; 2"
        );
    }
}
