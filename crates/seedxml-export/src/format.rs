//! Rendering of typed field values into output lines.

use std::collections::HashMap;

use quick_xml::escape::escape;
use seedxml_model::{FieldKind, FieldSnapshot, RawValue, SnapshotValue};

/// Column budget a rendered line may occupy before the multi-line
/// fallback kicks in.
pub(crate) const MAX_LINE_WIDTH: usize = 120;

pub(crate) const INDENT: &str = "    ";

/// Render one field into an output line, or suppress it.
///
/// Reference fields are dropped when their related type's order index is
/// lower than the current record's: in the emitted document order that
/// type is declared later, and the line would be a forward reference. The
/// inverse relation declared at the other type carries the relationship
/// instead. One-to-many fields and empty reference lists never render.
pub(crate) fn render_field(
    snapshot: &FieldSnapshot,
    model: &str,
    type_index: &HashMap<String, usize>,
) -> Option<String> {
    if snapshot.kind == FieldKind::OneToMany {
        return None;
    }
    match &snapshot.value {
        SnapshotValue::Scalar(value) => Some(render_scalar(snapshot, value)),
        SnapshotValue::Refs(xids) => {
            if xids.is_empty() {
                return None;
            }
            let related = snapshot.related_model.as_deref()?;
            if is_forward_reference(related, model, type_index) {
                return None;
            }
            match snapshot.kind {
                FieldKind::ManyToOne => Some(render_reference(&snapshot.name, &xids[0])),
                FieldKind::ManyToMany => Some(render_reference_set(&snapshot.name, xids)),
                _ => None,
            }
        }
    }
}

fn is_forward_reference(related: &str, model: &str, type_index: &HashMap<String, usize>) -> bool {
    let (Some(related_index), Some(model_index)) = (type_index.get(related), type_index.get(model))
    else {
        return true;
    };
    related_index < model_index
}

fn render_scalar(snapshot: &FieldSnapshot, value: &RawValue) -> String {
    if snapshot.kind == FieldKind::Boolean {
        let literal = if matches!(value, RawValue::Bool(true)) {
            "True"
        } else {
            "False"
        };
        return format!(
            "{INDENT}{INDENT}<field name=\"{}\" eval=\"{literal}\" />",
            snapshot.name
        );
    }
    format!(
        "{INDENT}{INDENT}<field name=\"{}\">{}</field>",
        snapshot.name,
        scalar_text(value)
    )
}

fn scalar_text(value: &RawValue) -> String {
    match value {
        RawValue::Null | RawValue::Ids(_) => String::new(),
        RawValue::Bool(true) => "True".to_string(),
        RawValue::Bool(false) => "False".to_string(),
        RawValue::Int(number) => number.to_string(),
        RawValue::Float(number) => number.to_string(),
        RawValue::Text(text) => escape(text.as_str()).into_owned(),
    }
}

fn render_reference(name: &str, xid: &str) -> String {
    let line = format!("{INDENT}{INDENT}<field name=\"{name}\" ref=\"{xid}\" />");
    if line.len() <= MAX_LINE_WIDTH {
        return line;
    }
    format!(
        "{INDENT}{INDENT}<field\n\
         {INDENT}{INDENT}{INDENT}name=\"{name}\"\n\
         {INDENT}{INDENT}{INDENT}ref=\"{xid}\"\n\
         {INDENT}{INDENT}/>"
    )
}

fn render_reference_set(name: &str, xids: &[String]) -> String {
    let refs: Vec<String> = xids.iter().map(|xid| format!("ref('{xid}')")).collect();
    let line = format!(
        "{INDENT}{INDENT}<field name=\"{name}\" eval=\"set({})\" />",
        refs.join(", ")
    );
    if line.len() <= MAX_LINE_WIDTH {
        return line;
    }
    let joined = refs.join(&format!(",\n{INDENT}{INDENT}{INDENT}{INDENT}"));
    format!(
        "{INDENT}{INDENT}<field\n\
         {INDENT}{INDENT}{INDENT}name=\"{name}\"\n\
         {INDENT}{INDENT}{INDENT}eval=\"set(\n\
         {INDENT}{INDENT}{INDENT}{INDENT}{joined},\n\
         {INDENT}{INDENT}{INDENT})\"\n\
         {INDENT}{INDENT}/>"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scalar(name: &str, value: RawValue) -> FieldSnapshot {
        FieldSnapshot {
            name: name.to_string(),
            kind: FieldKind::Scalar,
            value: SnapshotValue::Scalar(value),
            related_model: None,
        }
    }

    fn reference(name: &str, kind: FieldKind, related: &str, xids: &[&str]) -> FieldSnapshot {
        FieldSnapshot {
            name: name.to_string(),
            kind,
            value: SnapshotValue::Refs(xids.iter().map(|xid| (*xid).to_string()).collect()),
            related_model: Some(related.to_string()),
        }
    }

    fn index(models: &[&str]) -> HashMap<String, usize> {
        models
            .iter()
            .enumerate()
            .map(|(position, model)| ((*model).to_string(), position))
            .collect()
    }

    #[test]
    fn scalar_lines() {
        let idx = index(&["library.book"]);
        assert_eq!(
            render_field(&scalar("title", RawValue::Text("Dune".to_string())), "library.book", &idx),
            Some("        <field name=\"title\">Dune</field>".to_string())
        );
        assert_eq!(
            render_field(&scalar("page_count", RawValue::Int(412)), "library.book", &idx),
            Some("        <field name=\"page_count\">412</field>".to_string())
        );
    }

    #[test]
    fn text_is_escaped() {
        let idx = index(&["library.book"]);
        let rendered = render_field(
            &scalar("title", RawValue::Text("Dune & \"Arrakis\" <I>".to_string())),
            "library.book",
            &idx,
        )
        .unwrap();
        assert_eq!(
            rendered,
            "        <field name=\"title\">Dune &amp; &quot;Arrakis&quot; &lt;I&gt;</field>"
        );
    }

    #[test]
    fn booleans_use_the_eval_form() {
        let idx = index(&["library.book"]);
        let snapshot = FieldSnapshot {
            name: "archived".to_string(),
            kind: FieldKind::Boolean,
            value: SnapshotValue::Scalar(RawValue::Bool(false)),
            related_model: None,
        };
        assert_eq!(
            render_field(&snapshot, "library.book", &idx),
            Some("        <field name=\"archived\" eval=\"False\" />".to_string())
        );
    }

    #[test]
    fn single_reference_line() {
        let idx = index(&["library.book", "library.author"]);
        let snapshot = reference(
            "author_id",
            FieldKind::ManyToOne,
            "library.author",
            &["authors.frank"],
        );
        assert_eq!(
            render_field(&snapshot, "library.book", &idx),
            Some("        <field name=\"author_id\" ref=\"authors.frank\" />".to_string())
        );
    }

    #[test]
    fn reference_set_line() {
        let idx = index(&["library.book", "library.tag"]);
        let snapshot = reference(
            "tag_ids",
            FieldKind::ManyToMany,
            "library.tag",
            &["library_tag_auto_1", "library_tag_auto_2"],
        );
        assert_eq!(
            render_field(&snapshot, "library.book", &idx),
            Some(
                "        <field name=\"tag_ids\" eval=\"set(ref('library_tag_auto_1'), ref('library_tag_auto_2'))\" />"
                    .to_string()
            )
        );
    }

    #[test]
    fn long_reference_set_wraps() {
        let idx = index(&["library.book", "library.tag"]);
        let xids = [
            "library_tag_auto_90000000000000000000000000001",
            "library_tag_auto_90000000000000000000000000002",
            "library_tag_auto_90000000000000000000000000003",
        ];
        let snapshot = reference("tag_ids", FieldKind::ManyToMany, "library.tag", &xids);
        let rendered = render_field(&snapshot, "library.book", &idx).unwrap();
        let expected = "        <field\n\
                        \x20           name=\"tag_ids\"\n\
                        \x20           eval=\"set(\n\
                        \x20               ref('library_tag_auto_90000000000000000000000000001'),\n\
                        \x20               ref('library_tag_auto_90000000000000000000000000002'),\n\
                        \x20               ref('library_tag_auto_90000000000000000000000000003'),\n\
                        \x20           )\"\n\
                        \x20       />";
        assert_eq!(rendered, expected);
    }

    #[test]
    fn wrapped_form_keeps_the_reference_order() {
        let idx = index(&["library.book", "library.tag"]);
        let xids: Vec<String> = (0..6)
            .map(|n| format!("library_tag_auto_9000000000000000000000000000{n}"))
            .collect();
        let borrowed: Vec<&str> = xids.iter().map(String::as_str).collect();
        let snapshot = reference("tag_ids", FieldKind::ManyToMany, "library.tag", &borrowed);
        let rendered = render_field(&snapshot, "library.book", &idx).unwrap();
        assert!(rendered.contains('\n'));
        let normalized: Vec<String> = rendered
            .split_whitespace()
            .filter(|token| token.starts_with("ref('"))
            .map(|token| token.trim_end_matches(',').to_string())
            .collect();
        let expected: Vec<String> = xids.iter().map(|xid| format!("ref('{xid}')")).collect();
        assert_eq!(normalized, expected);
    }

    #[test]
    fn long_single_reference_wraps() {
        let idx = index(&["library.book", "library.author"]);
        let xid = "library_author_auto_".repeat(6);
        let snapshot = reference(
            "author_id",
            FieldKind::ManyToOne,
            "library.author",
            &[xid.as_str()],
        );
        let rendered = render_field(&snapshot, "library.book", &idx).unwrap();
        assert_eq!(
            rendered,
            format!(
                "        <field\n            name=\"author_id\"\n            ref=\"{xid}\"\n        />"
            )
        );
    }

    #[test]
    fn forward_references_are_suppressed() {
        // library.author is declared after library.book in the emitted
        // order, so a book -> author reference would not resolve.
        let idx = index(&["library.author", "library.book"]);
        let snapshot = reference(
            "author_id",
            FieldKind::ManyToOne,
            "library.author",
            &["authors.frank"],
        );
        assert_eq!(render_field(&snapshot, "library.book", &idx), None);
    }

    #[test]
    fn same_model_references_render() {
        let idx = index(&["library.category"]);
        let snapshot = reference(
            "parent_id",
            FieldKind::ManyToOne,
            "library.category",
            &["library_category_auto_1"],
        );
        assert!(render_field(&snapshot, "library.category", &idx).is_some());
    }

    #[test]
    fn aggregates_and_empty_reference_lists_never_render() {
        let idx = index(&["library.book", "library.author"]);
        let aggregate = reference("book_ids", FieldKind::OneToMany, "library.book", &["x"]);
        assert_eq!(render_field(&aggregate, "library.author", &idx), None);
        let empty = reference("tag_ids", FieldKind::ManyToMany, "library.tag", &[]);
        assert_eq!(render_field(&empty, "library.book", &idx), None);
    }
}
