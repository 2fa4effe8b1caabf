use std::num::NonZeroUsize;

use traineval_export::encoding::EncodingPolicy;
use traineval_export::error::ExportError;
use traineval_export::layout::{
    Element, LayoutOptions, PageKind, ReportContent, ResponseSection, assemble, wrap,
};
use traineval_export::styles::DocumentStyles;
use traineval_export::template::TemplateText;

fn answers(prefix: &str, n: usize) -> Vec<String> {
    (1..=n).map(|i| format!("{prefix} answer {i}")).collect()
}

fn content(q24: usize, q25: usize) -> ReportContent {
    ReportContent {
        title: "Training evaluation - Client".to_string(),
        chart_px: (800, 400),
        sections: vec![
            ResponseSection {
                question_id: "Q24".to_string(),
                responses: answers("Q24", q24),
            },
            ResponseSection {
                question_id: "Q25".to_string(),
                responses: answers("Q25", q25),
            },
        ],
    }
}

fn texts(element: &[Element]) -> Vec<&str> {
    element
        .iter()
        .filter_map(|e| match e {
            Element::Text(t) => Some(t.text.as_str()),
            Element::Chart(_) => None,
        })
        .collect()
}

#[test]
fn title_page_then_one_page_per_chunk() {
    let layout = assemble(
        &content(20, 5),
        &DocumentStyles::default(),
        &LayoutOptions::default(),
        None,
    )
    .unwrap();

    assert_eq!(layout.page_count(), 4);
    assert_eq!(layout.chunk_count("Q24"), 2);
    assert_eq!(layout.chunk_count("Q25"), 1);

    let kinds: Vec<_> = layout.pages.iter().map(|p| p.kind.clone()).collect();
    assert_eq!(
        kinds,
        vec![
            PageKind::Title,
            PageKind::Responses { question_id: "Q24".into(), chunk: 1 },
            PageKind::Responses { question_id: "Q24".into(), chunk: 2 },
            PageKind::Responses { question_id: "Q25".into(), chunk: 1 },
        ]
    );
}

#[test]
fn title_page_holds_header_and_scaled_chart() {
    let layout = assemble(
        &content(1, 1),
        &DocumentStyles::default(),
        &LayoutOptions::default(),
        None,
    )
    .unwrap();

    let title = &layout.pages[0];
    assert_eq!(texts(&title.content), vec!["Training evaluation - Client"]);

    let chart = title
        .content
        .iter()
        .find_map(|e| match e {
            Element::Chart(c) => Some(c),
            Element::Text(_) => None,
        })
        .unwrap();
    assert_eq!(chart.width_mm, 180.0);
    assert_eq!(chart.height_mm, 90.0);
    assert_eq!(chart.top_mm, 30.0);
}

#[test]
fn response_pages_have_numbered_headers_and_bullets() {
    let layout = assemble(
        &content(20, 5),
        &DocumentStyles::default(),
        &LayoutOptions::default(),
        None,
    )
    .unwrap();

    let second = texts(&layout.pages[2].content);
    assert_eq!(second[0], "Q24 Responses (Page 2)");
    assert_eq!(
        &second[1..],
        &[
            "\u{2022} Q24 answer 17",
            "\u{2022} Q24 answer 18",
            "\u{2022} Q24 answer 19",
            "\u{2022} Q24 answer 20",
        ]
    );

    let q25 = texts(&layout.pages[3].content);
    assert_eq!(q25[0], "Q25 Responses (Page 1)");
    assert_eq!(q25.len(), 6);
}

#[test]
fn empty_sections_emit_no_pages() {
    let layout = assemble(
        &content(0, 0),
        &DocumentStyles::default(),
        &LayoutOptions::default(),
        None,
    )
    .unwrap();

    assert_eq!(layout.page_count(), 1);
    assert_eq!(layout.chunk_count("Q24"), 0);
}

#[test]
fn page_capacity_is_configurable() {
    let options = LayoutOptions {
        page_capacity: NonZeroUsize::new(2).unwrap(),
        ..LayoutOptions::default()
    };
    let layout = assemble(&content(5, 2), &DocumentStyles::default(), &options, None).unwrap();

    assert_eq!(layout.chunk_count("Q24"), 3);
    assert_eq!(layout.chunk_count("Q25"), 1);
    assert_eq!(layout.page_count(), 5);
}

#[test]
fn long_answers_overflow_onto_continuation_pages() {
    let long = "word ".repeat(400);
    let report = ReportContent {
        sections: vec![ResponseSection {
            question_id: "Q24".to_string(),
            responses: vec![long.clone(), long],
        }],
        ..content(0, 0)
    };

    let layout = assemble(
        &report,
        &DocumentStyles::default(),
        &LayoutOptions::default(),
        None,
    )
    .unwrap();

    assert_eq!(layout.chunk_count("Q24"), 1);
    assert!(layout.page_count() > 2);
    assert!(layout.pages[2..].iter().all(|p| matches!(
        &p.kind,
        PageKind::Continuation { question_id, chunk: 1 } if question_id == "Q24"
    )));

    let bottom = DocumentStyles::default().content_bottom_mm();
    for page in &layout.pages {
        for element in &page.content {
            if let Element::Text(t) = element {
                assert!(t.baseline_mm < bottom);
            }
        }
    }
}

#[test]
fn overlay_is_purely_additive() {
    let styles = DocumentStyles::default();
    let options = LayoutOptions::default();

    let plain = assemble(&content(20, 5), &styles, &options, None).unwrap();
    let blank_template = TemplateText::new(vec![String::new(); 6]);
    let with_blank = assemble(&content(20, 5), &styles, &options, Some(&blank_template)).unwrap();
    assert_eq!(plain, with_blank);

    let template = TemplateText::new(vec!["ACME Corp".into(), "Confidential".into()]);
    let with_text = assemble(&content(20, 5), &styles, &options, Some(&template)).unwrap();

    assert_eq!(with_text.page_count(), plain.page_count());
    for (a, b) in plain.pages.iter().zip(&with_text.pages) {
        assert_eq!(a.content, b.content);
    }
    assert_eq!(with_text.pages[0].overlay[0].text, "ACME Corp");
    assert_eq!(with_text.pages[0].overlay[0].color, [200, 200, 200]);
    assert_eq!(with_text.pages[0].overlay[0].size, 9.0);
    assert_eq!(with_text.pages[1].overlay[0].text, "Confidential");
    assert!(with_text.pages[2].overlay.is_empty());
    assert!(with_text.pages[3].overlay.is_empty());
}

#[test]
fn strict_encoding_fails_on_unsupported_answers() {
    let mut report = content(1, 0);
    report.sections[0].responses = vec!["Excelente ✅".to_string()];

    let strict = LayoutOptions {
        encoding: EncodingPolicy::Strict,
        ..LayoutOptions::default()
    };
    let result = assemble(&report, &DocumentStyles::default(), &strict, None);
    assert!(matches!(result, Err(ExportError::Encoding { character: '✅', .. })));

    let replaced = assemble(&report, &DocumentStyles::default(), &LayoutOptions::default(), None)
        .unwrap();
    assert_eq!(texts(&replaced.pages[1].content)[1], "\u{2022} Excelente ?");
}

#[test]
fn wrap_breaks_on_words_and_splits_long_words() {
    assert_eq!(wrap("aaa bbb ccc", 7), vec!["aaa bbb", "ccc"]);
    assert_eq!(wrap("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
    assert_eq!(wrap("one\n\ntwo", 10), vec!["one", "two"]);
    assert!(wrap("   ", 10).is_empty());
}
