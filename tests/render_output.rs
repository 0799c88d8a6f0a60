use postsmith::render::{render_basic, render_enhanced, render_markdown};

#[test]
fn every_heading_level_renders_in_enhanced() {
    let src = "# 1\n## 2\n### 3\n#### 4\n##### 5\n###### 6";
    let html = render_enhanced(src);
    assert_eq!(
        html,
        "<h1>1</h1>\n<h2>2</h2>\n<h3>3</h3>\n<h4>4</h4>\n<h5>5</h5>\n<h6>6</h6>"
    );
}

#[test]
fn enhanced_is_the_default_flavor() {
    let src = "#### four\n\n_x_ and __y__";
    assert_eq!(render_markdown(src), render_enhanced(src));
}

#[test]
fn basic_output_has_no_raw_newlines() {
    let html = render_basic("# a\n\nb\n- c");
    assert_eq!(html, "<h1>a</h1><br><p>b</p><br><ul><li>c</li></ul>");
}

#[test]
fn enhanced_wraps_each_plain_line() {
    assert_eq!(render_enhanced("a\nb\n\nc"), "<p>a</p>\n<p>b</p>\n<p>c</p>");
}

#[test]
fn links_open_in_a_new_tab() {
    assert_eq!(
        render_enhanced("[site](https://example.com)"),
        r#"<a href="https://example.com" target="_blank">site</a>"#
    );
    assert_eq!(
        render_basic("see [site](https://example.com)"),
        r#"<p>see <a href="https://example.com" target="_blank">site</a></p>"#
    );
}

#[test]
fn images_are_not_mistaken_for_links() {
    let html = render_enhanced("![cat](cat.png)");
    assert_eq!(
        html,
        r#"<img src="cat.png" alt="cat" style="max-width: 100%; height: auto;">"#
    );
}

#[test]
fn underscore_emphasis_is_enhanced_only() {
    assert_eq!(render_enhanced("x __b__ _i_"), "<p>x <strong>b</strong> <em>i</em></p>");
    assert_eq!(render_basic("x __b__ _i_"), "<p>x __b__ _i_</p>");
}

#[test]
fn list_items_keep_inline_markup() {
    assert_eq!(
        render_enhanced("- **a**\n- `b`"),
        "<ul><li><strong>a</strong></li><li><code>b</code></li></ul>"
    );
}

#[test]
fn indented_lines_are_trimmed_before_grouping() {
    assert_eq!(render_enhanced("   - a\n\t- b"), "<ul><li>a</li><li>b</li></ul>");
}

#[test]
fn raw_html_is_passed_through() {
    assert_eq!(render_enhanced("<div>x</div>"), "<div>x</div>");
    assert_eq!(render_basic("<div>x</div>"), "<p><div>x</div></p>");
}
