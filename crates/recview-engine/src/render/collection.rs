use super::fragment::{RenderedFragment, StyleClass};
use super::value::render;
use crate::settings::RenderSettings;
use crate::Result;
use recview_types::{ArrayLike, MapEntry, MapLike};

/// Render an array-like value as `[e0, e1, ..., N more...]`.
///
/// Only the captured elements are visited, once, in order; the declared
/// length contributes nothing but the count in the trailing marker.
pub fn render_collection(array: &ArrayLike, settings: &RenderSettings) -> Result<RenderedFragment> {
    let omitted = array.omitted()?;
    render_sequence(
        "[",
        "]",
        array.elements.iter().map(|element| render(element, settings)),
        omitted,
    )
}

/// Render a map as `{k -> v, ..., N more...}` with the collection truncation rule.
pub fn render_map(map: &MapLike, settings: &RenderSettings) -> Result<RenderedFragment> {
    let omitted = map.omitted()?;
    render_sequence(
        "{",
        "}",
        map.entries.iter().map(|entry| render_entry(entry, settings)),
        omitted,
    )
}

fn render_entry(entry: &MapEntry, settings: &RenderSettings) -> Result<RenderedFragment> {
    let mut builder = RenderedFragment::builder();
    builder
        .push_fragment(render(&entry.key, settings)?)
        .push_atom(" -> ", StyleClass::Separator)
        .push_fragment(render(&entry.value, settings)?);
    Ok(builder.build())
}

fn render_sequence<I>(
    open: &'static str,
    close: &'static str,
    items: I,
    omitted: usize,
) -> Result<RenderedFragment>
where
    I: ExactSizeIterator<Item = Result<RenderedFragment>>,
{
    let captured = items.len();
    let mut builder = RenderedFragment::builder();
    builder.push_atom(open, StyleClass::CollectionBracket);

    for (i, item) in items.enumerate() {
        builder.push_fragment(item?);
        // The separator after the last element only appears when a marker follows.
        if i + 1 < captured || omitted > 0 {
            builder.push_atom(", ", StyleClass::Separator);
        }
    }

    // No leading separator when nothing was captured: `[5 more...]`.
    if omitted > 0 {
        builder.push_atom(format!("{} more...", omitted), StyleClass::TruncationMarker);
    }

    builder.push_atom(close, StyleClass::CollectionBracket);
    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::FragmentPart;
    use recview_types::RecordedValue;

    fn numbers(count: usize) -> Vec<RecordedValue> {
        (0..count)
            .map(|i| RecordedValue::Number {
                type_name: "int".to_string(),
                text: i.to_string(),
            })
            .collect()
    }

    fn element_fragments(fragment: &RenderedFragment) -> usize {
        fragment
            .parts()
            .iter()
            .filter(|part| matches!(part, FragmentPart::Nested(_)))
            .count()
    }

    fn render_array(declared: i64, captured: usize) -> RenderedFragment {
        render_collection(
            &ArrayLike::new(declared, numbers(captured)),
            &RenderSettings::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_complete_capture_has_no_marker() {
        for len in [1usize, 2, 5, 64] {
            let fragment = render_array(len as i64, len);
            assert_eq!(element_fragments(&fragment), len);
            assert_eq!(fragment.count_style(StyleClass::Separator), len - 1);
            assert_eq!(fragment.count_style(StyleClass::TruncationMarker), 0);
        }
    }

    #[test]
    fn test_truncated_capture_has_one_marker_with_missing_count() {
        for (declared, captured) in [(3i64, 1usize), (10, 9), (100, 0), (7, 3)] {
            let fragment = render_array(declared, captured);
            let markers: Vec<_> = fragment
                .atoms()
                .filter(|atom| atom.style == StyleClass::TruncationMarker)
                .collect();
            assert_eq!(markers.len(), 1);
            assert_eq!(
                markers[0].text,
                format!("{} more...", declared as usize - captured)
            );
        }
    }

    #[test]
    fn test_large_truncated_array() {
        let fragment = render_array(10_000, 50);
        let expected_body: Vec<String> = (0..50).map(|i| i.to_string()).collect();
        assert_eq!(
            fragment.plain_text(),
            format!("[{}, 9950 more...]", expected_body.join(", "))
        );
        assert_eq!(element_fragments(&fragment), 50);
        assert_eq!(fragment.count_style(StyleClass::Separator), 50);
    }

    #[test]
    fn test_empty_array() {
        let fragment = render_array(0, 0);
        insta::assert_snapshot!(fragment.plain_text(), @"[]");
        assert_eq!(fragment.atoms().count(), 2);
    }

    #[test]
    fn test_nothing_captured_has_no_leading_separator() {
        let fragment = render_array(5, 0);
        insta::assert_snapshot!(fragment.plain_text(), @"[5 more...]");
        assert_eq!(fragment.count_style(StyleClass::Separator), 0);
    }

    #[test]
    fn test_small_rendering() {
        insta::assert_snapshot!(render_array(3, 3).plain_text(), @"[0, 1, 2]");
        insta::assert_snapshot!(render_array(4, 2).plain_text(), @"[0, 1, 2 more...]");
    }

    #[test]
    fn test_malformed_lengths_fail() {
        let negative = render_collection(&ArrayLike::new(-2, vec![]), &RenderSettings::default());
        assert!(matches!(negative, Err(crate::Error::MalformedRecord(_))));

        let overfull =
            render_collection(&ArrayLike::new(1, numbers(2)), &RenderSettings::default());
        assert!(matches!(overfull, Err(crate::Error::MalformedRecord(_))));
    }
}
