//! Integration tests for the documentation maintenance tools
//!
//! These tests drive complete script pipelines over temporary doc trees:
//! export -> table -> translation, suggestion -> corrections -> translation,
//! structural checks over translated output, and redirect checking against a
//! mock site.

use std::path::Path;
use tempfile::TempDir;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

use mdx_docs_tools::{
    docs::english_sources,
    export::{build_table, EntryIndex, ExportOptions},
    frontmatter::Document,
    redirects::{parse_broken_report, write_reports, LinkStatus, RedirectChecker},
    structure::{check_tree, render_report},
    suggest::{render_mapping_literal, suggest_corrections, TitleIndex},
    table::{LocalizedText, PageRecord, TranslationTable},
    tooltips::{extract_tooltips, write_csv},
    translate,
    url_key::UrlCorrectionMap,
};

// ==================== Test Helpers ====================

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

const INTRO_EN: &str = "# Getting started\n\nThis page explains how to get started quickly.";
const INTRO_FR: &str = "# Premiers pas\n\nCette page explique comment démarrer rapidement.";

fn entity_export() -> String {
    serde_json::json!([
        {
            "sys": {"id": "guides", "contentType": {"sys": {"id": "page"}}},
            "fields": {
                "slug": {"en-US": "guides"},
                "title": {"en-US": "Guides"}
            }
        },
        {
            "sys": {"id": "intro", "contentType": {"sys": {"id": "page"}}},
            "fields": {
                "slug": {"en-US": "intro"},
                "parent": {"en-US": {"sys": {"type": "Link", "id": "guides"}}},
                "title": {"en-US": "Getting started", "fr-CA": "Premiers pas", "ja-JP": "はじめに"},
                "content": {"en-US": INTRO_EN, "fr-CA": INTRO_FR}
            }
        }
    ])
    .to_string()
}

// ==================== Translation Pipeline Tests ====================

#[test]
fn test_export_to_table_to_translated_pages() {
    let dir = TempDir::new().unwrap();
    let docs = dir.path().join("docs");
    write(
        &docs,
        "guides/intro.mdx",
        &format!(
            "---\ntitle: Getting started\nsidebarTitle: Getting started\ndescription: Intro\n---\n\n{}\n",
            INTRO_EN
        ),
    );

    // Stream the export into a table file, then read it back as the scripts do.
    let export_path = dir.path().join("contentful_export.json");
    std::fs::write(&export_path, entity_export()).unwrap();
    let index = EntryIndex::load(&export_path).unwrap();
    let table_path = dir.path().join("page_translations.json");
    build_table(&index, &ExportOptions::default())
        .save(&table_path)
        .unwrap();
    let table = TranslationTable::load(&table_path).unwrap();
    assert_eq!(table.urls().collect::<Vec<_>>(), vec!["/guides", "/guides/intro"]);

    let files = english_sources(&docs);
    let report = translate::run(&docs, &files, &table, &UrlCorrectionMap::default()).report();
    assert_eq!(report.processed, 1);
    assert_eq!(report.written, 2);

    let french = Document::load(&docs.join("fr-ca/guides/intro.mdx")).unwrap();
    assert_eq!(french.title(), Some("Premiers pas"));
    assert_eq!(
        french.metadata.get("sidebarTitle").and_then(|v| v.as_str()),
        Some("Premiers pas")
    );
    assert_eq!(
        french.metadata.get("description").and_then(|v| v.as_str()),
        Some("Intro")
    );
    assert_eq!(french.content, INTRO_FR);

    // Japanese has only a title: the body stays English.
    let japanese = Document::load(&docs.join("ja-jp/guides/intro.mdx")).unwrap();
    assert_eq!(japanese.title(), Some("はじめに"));
    assert_eq!(japanese.content, INTRO_EN);

    // A second run must not pick up its own output as English input.
    assert_eq!(english_sources(&docs).len(), 1);
}

#[test]
fn test_suggested_corrections_feed_translation() {
    let dir = TempDir::new().unwrap();
    let docs = dir.path().join("docs");
    write(&docs, "old-home.mdx", "---\ntitle: Welcome\n---\n\nWelcome to the documentation site.\n");
    write(&docs, "untitled.mdx", "No header on this page at all.\n");

    let mut table = TranslationTable::new();
    table.insert(
        "/new-home",
        PageRecord {
            title: LocalizedText::from([("en", "Welcome"), ("fr", "Bienvenue")]),
            content: LocalizedText::default(),
        },
    );

    let files = english_sources(&docs);
    let suggestions = suggest_corrections(&docs, &files, &TitleIndex::build(&table));
    assert_eq!(suggestions.found, 1);
    assert_eq!(suggestions.not_found, 1);

    // The printed literal is a valid corrections file.
    let corrections_path = dir.path().join("url_corrections.json");
    std::fs::write(
        &corrections_path,
        render_mapping_literal(&suggestions.corrections),
    )
    .unwrap();
    let corrections = UrlCorrectionMap::load(&corrections_path).unwrap();
    assert_eq!(corrections.resolve("/old-home"), "/new-home");

    let report = translate::run(&docs, &files, &table, &corrections).report();
    assert_eq!(report.written, 1);
    assert_eq!(report.skipped_no_entry, 1);

    let french = Document::load(&docs.join("fr-ca/old-home.mdx")).unwrap();
    assert_eq!(french.title(), Some("Bienvenue"));
}

#[test]
fn test_missing_corrections_file_is_empty_map() {
    let dir = TempDir::new().unwrap();
    let corrections = UrlCorrectionMap::load(&dir.path().join("absent.json")).unwrap();
    assert!(corrections.is_empty());
}

// ==================== Structure Check Tests ====================

#[test]
fn test_structure_check_over_translated_tree() {
    let dir = TempDir::new().unwrap();
    let docs = dir.path();
    write(
        docs,
        "setup.mdx",
        "---\ntitle: Setup\n---\n\n# Setup\n\n<table><tr><td>x</td></tr></table>\n\n```bash\nnpm i\n```\n",
    );
    write(docs, "fr-ca/setup.mdx", "---\ntitle: Config\n---\n\n# Config\n\n```bash\nnpm i\n```\n");
    write(
        docs,
        "ja-jp/setup.mdx",
        "# 設定\n\n<TABLE><tr><td>x</td></tr></TABLE>\n\n```bash\nnpm i\n```\n",
    );

    let issues = check_tree(docs);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].translated_path, docs.join("fr-ca/setup.mdx"));

    let report = render_report(&issues);
    assert!(report.contains("[PROBLEM] Structural mismatch in:"));
    assert!(report.contains("FR-CA"));
}

// ==================== Tooltip Export Tests ====================

#[test]
fn test_tooltip_export_covers_translated_trees() {
    let dir = TempDir::new().unwrap();
    let docs = dir.path().join("docs");
    write(
        &docs,
        "a.mdx",
        r#"A <Tooltip tip="Identity provider" href="/glossary#idp">IdP</Tooltip> is required."#,
    );
    write(
        &docs,
        "fr-ca/a.mdx",
        r#"Un <Tooltip tip="Fournisseur d’identité">IdP</Tooltip> est requis."#,
    );

    let rows = extract_tooltips(&docs);
    assert_eq!(rows.len(), 2);

    let out_path = dir.path().join("tooltips_export.csv");
    write_csv(&rows, std::fs::File::create(&out_path).unwrap()).unwrap();
    let csv = std::fs::read_to_string(&out_path).unwrap();

    assert!(csv.starts_with("Word,Tooltip Tip,Glossary Link,File Name\n"));
    assert!(csv.contains("IdP,Identity provider,/glossary#idp,a.mdx\n"));
    assert!(csv.contains("IdP,Fournisseur d’identité,N/A,fr-ca/a.mdx\n"));
}

// ==================== Redirect Checker Tests ====================

#[tokio::test]
async fn test_redirect_check_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/docs/guides/a"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"<html><body><a href="/docs/old">old</a></body></html>"#),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/docs/old"))
        .respond_with(ResponseTemplate::new(308).insert_header("Location", "/docs/new"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/docs/new"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let report_text = "docs/guides/a.mdx\n  ⎿ /docs/old\n  ⎿ /docs/missing\n";
    let pages = parse_broken_report(report_text);

    let checker =
        RedirectChecker::new(&server.uri(), std::time::Duration::from_secs(5)).unwrap();
    let mut results = Vec::new();
    checker.check_pages(&pages, &mut results).await;

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].status, LinkStatus::RedirectFound);
    assert_eq!(
        results[0].final_url.as_deref(),
        Some(format!("{}/docs/new", server.uri()).as_str())
    );
    assert_eq!(results[1].status, LinkStatus::NoRedirectDirect);

    let dir = TempDir::new().unwrap();
    let prefix = dir.path().join("redirect_report");
    let paths = write_reports(&results, &prefix.to_string_lossy(), "20250101_000000").unwrap();

    let summary = std::fs::read_to_string(&paths.summary).unwrap();
    assert!(summary.contains("Total broken links checked: 2"));
    assert!(summary.contains("Success rate: 50.0%"));
    assert!(summary.contains(&format!("/docs/old -> {}/docs/new", server.uri())));
    assert!(paths.csv.exists());
    assert!(paths.json.exists());
}
