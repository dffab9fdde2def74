use std::fmt::Write;

use crate::types::{NavigateToItem, truncate_str};

/// Build the header line: `# Navigate: "query" - N matches in M files`
pub fn search_header(query: &str, items: &[NavigateToItem]) -> String {
    let mut files: Vec<&str> = items.iter().map(|i| i.file_name.as_str()).collect();
    files.dedup();
    let noun = if items.len() == 1 { "match" } else { "matches" };
    format!(
        "# Navigate: \"{query}\" - {} {noun} in {} files",
        items.len(),
        files.len()
    )
}

/// One line per item:
/// `path:offset  name  [matchKind] kind  in Container (container_kind)`
pub fn format_items(query: &str, items: &[NavigateToItem]) -> String {
    let mut out = search_header(query, items);
    for item in items {
        let _ = write!(
            out,
            "\n{}:{}  {}  [{}] {}  in {}",
            item.file_name,
            item.text_span.start,
            item.name,
            item.match_kind,
            item.kind,
            container_label(item)
        );
    }
    out
}

fn container_label(item: &NavigateToItem) -> String {
    if item.container_name.is_empty() {
        return "<file>".into();
    }
    // Multi-line names (e.g. `impl<T> Foo<T>` split across lines) are cut.
    let first_line = item.container_name.lines().next().unwrap_or_default();
    let name = if first_line.len() > 60 {
        format!("{}...", truncate_str(first_line, 57))
    } else {
        first_line.to_string()
    };
    format!("{name} ({})", item.container_kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MatchKind, TextSpan};

    fn item(file: &str, name: &str, container: &str) -> NavigateToItem {
        NavigateToItem {
            name: name.into(),
            kind: "function_declaration".into(),
            match_kind: MatchKind::Prefix,
            is_case_sensitive: true,
            file_name: file.into(),
            container_name: container.into(),
            container_kind: if container.is_empty() {
                "program".into()
            } else {
                "class_declaration".into()
            },
            text_span: TextSpan::new(12, name.len()),
        }
    }

    #[test]
    fn header_counts_files() {
        let items = [item("a.ts", "foo", ""), item("a.ts", "fooBar", "A"), item("b.ts", "foo", "")];
        let header = search_header("foo", &items);
        assert!(header.contains("\"foo\""), "{header}");
        assert!(header.contains("3 matches in 2 files"), "{header}");
    }

    #[test]
    fn item_lines() {
        let out = format_items("foo", &[item("a.ts", "fooBar", "Widget"), item("b.ts", "foo", "")]);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[1],
            "a.ts:12  fooBar  [prefix] function_declaration  in Widget (class_declaration)"
        );
        assert!(lines[2].ends_with("in <file>"), "{}", lines[2]);
    }

    #[test]
    fn long_container_names_are_cut() {
        let long = "X".repeat(100);
        let out = format_items("foo", &[item("a.ts", "foo", &long)]);
        assert!(out.contains("XXX..."), "{out}");
        assert!(!out.contains(&long));
    }
}
