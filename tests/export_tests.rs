use lucidia::export::export_site;

#[tokio::test]
async fn test_export_writes_every_page() {
    let dir = tempfile::tempdir().unwrap();
    let files = export_site(dir.path(), "").await.unwrap();
    assert_eq!(files.len(), 6);

    for rel in [
        "index.html",
        "pricing/index.html",
        "pricing/yearly/index.html",
        "signup/index.html",
        "static/styles.css",
        "static/site.js",
    ] {
        assert!(dir.path().join(rel).is_file(), "missing {}", rel);
    }

    let css = std::fs::read_to_string(dir.path().join("static/styles.css")).unwrap();
    assert!(css.starts_with(":root {"));
}

#[tokio::test]
async fn test_export_pricing_pages_link_to_each_other() {
    let dir = tempfile::tempdir().unwrap();
    export_site(dir.path(), "/lucidia").await.unwrap();

    let monthly = std::fs::read_to_string(dir.path().join("pricing/index.html")).unwrap();
    let yearly = std::fs::read_to_string(dir.path().join("pricing/yearly/index.html")).unwrap();

    assert!(monthly.contains("data-plan-id=\"student_monthly\""));
    assert!(!monthly.contains("data-plan-id=\"student_yearly\""));
    assert!(yearly.contains("data-plan-id=\"student_yearly\""));
    assert!(yearly.contains("href=\"/lucidia/pricing/\""));
    assert!(monthly.contains("/lucidia/static/styles.css"));
}
