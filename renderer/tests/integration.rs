use pretty_assertions::assert_eq;
use renderer::{AssemblyMode, DataMap, Page, PageOptions, RenderError};

fn render_with(source: &str, data: &DataMap, options: &PageOptions) -> String {
    Page::new(source, 0, data, options)
        .expect("render failed")
        .into_view()
}

fn render(source: &str, data: &[(&str, &str)]) -> String {
    let data: DataMap = data.iter().copied().collect();
    render_with(source, &data, &PageOptions::default())
}

fn strip_markers(source: &str) -> String {
    let mut out = String::new();
    let mut rest = source;
    while let Some(open) = rest.find("<!-- ") {
        out.push_str(&rest[..open]);
        let close = rest[open..].find(" -->").expect("marker close") + open + 4;
        rest = &rest[close..];
    }
    out.push_str(rest);
    out
}

const LAYOUT: &str = "\
<!-- begin-page --><html>
<head><title><!-- begin-title -->Untitled<!-- end-title --></title></head>
<body>
<!-- begin-content --><main>
<!-- begin-article --><p>Nothing yet.</p><!-- end-article -->
</main><!-- end-content -->
</body>
</html><!-- end-page -->";

#[test]
fn empty_data_reproduces_the_template_without_markers() {
    assert_eq!(render(LAYOUT, &[]), strip_markers(LAYOUT));
}

#[test]
fn nested_example_from_the_reference_template() {
    let src = "<!-- begin-a --><!-- begin-b -->X<!-- end-b --><!-- end-a -->";
    assert_eq!(render(src, &[("b", "Y")]), "Y");
}

#[test]
fn substitution_reaches_any_depth() {
    let out = render(LAYOUT, &[("title", "Home"), ("article", "<p>Hello</p>")]);
    assert!(out.contains("<title>Home</title>"), "got: {}", out);
    assert!(out.contains("<main>\n<p>Hello</p>\n</main>"), "got: {}", out);
    assert!(!out.contains("Nothing yet."));
}

#[test]
fn substituting_a_parent_discards_its_children() {
    let out = render(LAYOUT, &[("content", "<p>maintenance</p>"), ("article", "ignored")]);
    assert!(out.contains("<body>\n<p>maintenance</p>\n</body>"), "got: {}", out);
    assert!(!out.contains("ignored"));
}

#[test]
fn typed_values_are_echoed() {
    let src = "<!-- begin-n -->0<!-- end-n -->/<!-- begin-ok -->?<!-- end-ok -->";
    let mut data = DataMap::new();
    data.insert("n", 42_i64);
    data.insert("ok", true);
    // The `/` sits outside every block and is not rendered.
    assert_eq!(render_with(src, &data, &PageOptions::default()), "42true");
}

#[test]
fn unknown_keys_are_ignored() {
    let src = "<!-- begin-a -->kept<!-- end-a -->";
    assert_eq!(render(src, &[("nope", "x")]), "kept");
}

#[test]
fn multiple_children_slotted_and_legacy() {
    let src = "<!-- begin-nav --><ul><!-- begin-home --><li>Home</li><!-- end-home --><!-- begin-about --><li>About</li><!-- end-about --></ul><!-- end-nav -->";
    let data = DataMap::new();

    let slotted = render_with(src, &data, &PageOptions::default());
    assert_eq!(slotted, "<ul><li>Home</li><li>About</li></ul>");

    // Regression baseline for the placeholder-string reassembly.
    let legacy = render_with(
        src,
        &data,
        &PageOptions {
            assembly: AssemblyMode::Legacy,
            ..PageOptions::default()
        },
    );
    assert_eq!(legacy, "<ul><li>Home</li><li>Home</li></ul>");
}

#[test]
fn asset_paths_are_rewritten_after_assembly() {
    let src = r#"<!-- begin-head --><link rel="stylesheet" href="style.css"><!-- end-head --><!-- begin-logo --><img src="logo.png"><!-- end-logo -->"#;
    let options = PageOptions {
        asset_base: Some("/templates/default".into()),
        ..PageOptions::default()
    };
    let data: DataMap = [("logo", r#"<img src="banner.png">"#)].into_iter().collect();
    assert_eq!(
        render_with(src, &data, &options),
        r#"<link rel="stylesheet" href="/templates/default/style.css"><img src="/templates/default/banner.png">"#
    );
}

#[test]
fn asset_rewrite_also_hits_unrelated_occurrences() {
    let src = r#"<!-- begin-a --><img src="foo.png"><p>see foo.png</p><!-- end-a -->"#;
    let options = PageOptions {
        asset_base: Some("/assets".into()),
        ..PageOptions::default()
    };
    assert_eq!(
        render_with(src, &DataMap::new(), &options),
        r#"<img src="/assets/foo.png"><p>see /assets/foo.png</p>"#
    );
}

#[test]
fn structural_errors_abort_the_render() {
    let cases = [
        "<!-- begin-a -->x",
        "<!-- begin-a -->x<!-- end-a --><!-- end-a -->",
        "<!-- begin-a -->1<!-- end-a --><!-- begin-a -->2<!-- end-a -->",
        "<!-- begin-a -->x<!-- end-b -->",
        "<!-- begin-a --><!-- begin-b --><!-- end-a --><!-- end-b -->",
    ];
    for src in cases {
        let result = Page::new(src, 0, &DataMap::new(), &PageOptions::default());
        match result {
            Err(RenderError::Validation(errors)) => {
                assert!(!errors.is_empty(), "no diagnostics for {}", src)
            }
            Ok(page) => panic!("expected failure for {}, got {:?}", src, page.view()),
        }
    }
}

#[test]
fn error_message_summarizes_diagnostics() {
    let err = Page::new(
        "<!-- begin-a -->x<!-- end-b -->",
        0,
        &DataMap::new(),
        &PageOptions::default(),
    )
    .unwrap_err();
    assert_eq!(err.diagnostics().len(), 2);
    assert_eq!(
        err.to_string(),
        "template failed structural validation: `begin-a` has no matching `end-a` (and 1 more)"
    );
}

#[test]
fn page_exposes_merged_tree_and_warnings() {
    let page = Page::new(
        "<!doctype html>\n<!-- begin-a -->x<!-- end-a -->",
        0,
        &[("a", "y")].into_iter().collect(),
        &PageOptions::default(),
    )
    .unwrap();
    assert_eq!(page.view(), "y");
    assert_eq!(page.to_string(), "y");
    assert_eq!(page.blocks().get("a").unwrap().own_text(), "y");
    assert_eq!(page.warnings().len(), 1);
}
