//! Tests for the batch loop, driven by a stub generation tool.

#![cfg(unix)]

use super::{ItemOutcome, STDERR_EXCERPT_CHARS, run_batch};
use crate::config::PromptSpec;
use crate::discover::DiscoverySource;
use crate::error::ImgBatchError;
use crate::events::{EventAction, read_events};
use crate::test_support::{StubWorkspace, file_names};
use std::fs::{File, FileTimes};
use std::path::PathBuf;
use std::time::{Duration, SystemTime};

fn prompts(specs: &[(&str, &str)]) -> Vec<PromptSpec> {
    specs
        .iter()
        .map(|(name, prompt)| {
            PromptSpec::new(*name, *prompt).with_caption(format!("{} caption", name))
        })
        .collect()
}

#[test]
fn test_all_succeed_renames_every_image_and_lists_cards_in_order() {
    let ws = StubWorkspace::new();
    let config = ws.config(prompts(&[
        ("alpha", "first image"),
        ("bravo", "second image"),
        ("charlie", "third image"),
    ]));
    let ctx = ws.context(&config);

    let report = run_batch(&config, &ctx).unwrap();

    assert_eq!(report.generated_count(), 3);
    assert_eq!(
        file_names(&ctx.output_dir),
        vec!["alpha.png", "bravo.png", "charlie.png"]
    );

    let gallery = report.gallery_path.clone().unwrap();
    assert_eq!(gallery, ws.root().join("site").join("image_gallery.html"));
    let html = std::fs::read_to_string(&gallery).unwrap();
    assert_eq!(html.matches("class=\"image-card\"").count(), 3);
    let a = html.find("images/alpha.png").unwrap();
    let b = html.find("images/bravo.png").unwrap();
    let c = html.find("images/charlie.png").unwrap();
    assert!(a < b && b < c);
    assert!(html.contains("<h3>bravo caption</h3>"));
}

#[test]
fn test_each_image_keeps_its_own_content() {
    let ws = StubWorkspace::new();
    let config = ws.config(prompts(&[("alpha", "one"), ("bravo", "two")]));
    let ctx = ws.context(&config);

    let report = run_batch(&config, &ctx).unwrap();

    let originals: Vec<_> = report
        .generated()
        .map(|g| (g.original_file.as_str(), g.file_name.as_str()))
        .collect();
    assert_eq!(
        originals,
        vec![("gen_1.png", "alpha.png"), ("gen_2.png", "bravo.png")]
    );
    assert_eq!(
        std::fs::read_to_string(ctx.output_dir.join("alpha.png")).unwrap(),
        "image 1"
    );
    assert_eq!(
        std::fs::read_to_string(ctx.output_dir.join("bravo.png")).unwrap(),
        "image 2"
    );
}

#[test]
fn test_failure_is_isolated_to_its_item() {
    let ws = StubWorkspace::new();
    let config = ws.config(prompts(&[
        ("alpha", "first"),
        ("bravo", "please FAIL"),
        ("charlie", "third"),
    ]));
    let ctx = ws.context(&config);

    let report = run_batch(&config, &ctx).unwrap();

    assert_eq!(report.total(), 3);
    assert_eq!(report.generated_count(), 2);
    match &report.items[1].outcome {
        ItemOutcome::Failed { exit_code, stderr } => {
            assert_eq!(*exit_code, Some(2));
            assert!(stderr.contains("content policy violation"));
            assert!(stderr.chars().count() <= STDERR_EXCERPT_CHARS);
        }
        other => panic!("expected failure, got {:?}", other),
    }
    assert_eq!(file_names(&ctx.output_dir), vec!["alpha.png", "charlie.png"]);

    let html = std::fs::read_to_string(report.gallery_path.unwrap()).unwrap();
    assert_eq!(html.matches("class=\"image-card\"").count(), 2);
    assert!(!html.contains("bravo"));
}

#[test]
fn test_timeout_moves_on_to_next_item() {
    let ws = StubWorkspace::new();
    let mut config = ws.config(prompts(&[("slow", "SLOW please"), ("fast", "quick one")]));
    config.tool.timeout_seconds = 1;
    let ctx = ws.context(&config);

    let report = run_batch(&config, &ctx).unwrap();

    assert_eq!(
        report.items[0].outcome,
        ItemOutcome::TimedOut { timeout_seconds: 1 }
    );
    assert!(report.items[1].outcome.generated().is_some());
    assert_eq!(file_names(&ctx.output_dir), vec!["fast.png"]);
}

#[test]
fn test_zero_successes_writes_no_gallery() {
    let ws = StubWorkspace::new();
    let config = ws.config(prompts(&[("alpha", "FAIL"), ("bravo", "FAIL again")]));
    let ctx = ws.context(&config);

    let report = run_batch(&config, &ctx).unwrap();

    assert_eq!(report.generated_count(), 0);
    assert!(report.gallery_path.is_none());
    assert!(!ctx.gallery_path.exists());
}

#[test]
fn test_success_without_image_is_no_file_found() {
    let ws = StubWorkspace::new();
    let config = ws.config(prompts(&[("alpha", "NOFILE")]));
    let ctx = ws.context(&config);

    let report = run_batch(&config, &ctx).unwrap();

    assert_eq!(report.items[0].outcome, ItemOutcome::NoFileFound);
    assert!(report.gallery_path.is_none());
}

#[test]
fn test_no_file_item_does_not_steal_previous_image() {
    let ws = StubWorkspace::new();
    let config = ws.config(prompts(&[("alpha", "first"), ("bravo", "NOFILE")]));
    let ctx = ws.context(&config);

    let report = run_batch(&config, &ctx).unwrap();

    // alpha.png is fresh, but it was claimed by alpha and must stay put.
    assert!(report.items[0].outcome.generated().is_some());
    assert_eq!(report.items[1].outcome, ItemOutcome::NoFileFound);
    assert_eq!(file_names(&ctx.output_dir), vec!["alpha.png"]);
}

#[test]
fn test_reported_path_is_used() {
    let ws = StubWorkspace::new();
    let config = ws.config(prompts(&[("alpha", "REPORT this")]));
    let ctx = ws.context(&config);

    let report = run_batch(&config, &ctx).unwrap();

    let image = report.items[0].outcome.generated().unwrap();
    assert_eq!(image.source, DiscoverySource::Reported);
    assert_eq!(image.path, ctx.output_dir.join("alpha.png"));
}

#[test]
fn test_reported_path_outside_output_dir_or_stale_is_not_claimed() {
    let ws = StubWorkspace::new();
    let config = ws.config(prompts(&[("alpha", "ECHO only")]));
    let ctx = ws.context(&config);
    std::fs::create_dir_all(&ctx.output_dir).unwrap();

    let photo = ws.root().join("my_photo.png");
    std::fs::write(&photo, b"precious").unwrap();
    let stale = ctx.output_dir.join("old.png");
    std::fs::write(&stale, b"old").unwrap();
    let an_hour_ago = SystemTime::now() - Duration::from_secs(3600);
    File::options()
        .write(true)
        .open(&stale)
        .unwrap()
        .set_times(FileTimes::new().set_modified(an_hour_ago))
        .unwrap();
    ws.set_stdout(&format!(
        "Style reference: {}\nSaved: ../my_photo.png\nSaved: {}\n",
        photo.display(),
        stale.display()
    ));

    let report = run_batch(&config, &ctx).unwrap();

    assert_eq!(report.items[0].outcome, ItemOutcome::NoFileFound);
    assert_eq!(std::fs::read(&photo).unwrap(), b"precious");
    assert_eq!(file_names(&ctx.output_dir), vec!["old.png"]);
    assert!(report.gallery_path.is_none());
}

#[test]
fn test_scan_is_used_without_report() {
    let ws = StubWorkspace::new();
    let config = ws.config(prompts(&[("alpha", "plain")]));
    let ctx = ws.context(&config);

    let report = run_batch(&config, &ctx).unwrap();

    let image = report.items[0].outcome.generated().unwrap();
    assert_eq!(image.source, DiscoverySource::Scanned);
}

#[test]
fn test_tool_receives_size_only_when_set() {
    let ws = StubWorkspace::new();
    let config = ws.config(vec![
        PromptSpec::new("square", "square one"),
        PromptSpec::new("wide", "wide one").with_size("1792x1024"),
    ]);
    let ctx = ws.context(&config);

    run_batch(&config, &ctx).unwrap();

    assert_eq!(ws.calls(), vec!["square one|", "wide one|1792x1024"]);
}

#[test]
fn test_missing_tool_aborts_before_any_work() {
    let ws = StubWorkspace::new();
    let mut config = ws.config(prompts(&[("alpha", "first")]));
    config.tool.entry_point = PathBuf::from("missing/gen.py");
    let ctx = ws.context(&config);

    let err = run_batch(&config, &ctx).unwrap_err();

    assert!(matches!(err, ImgBatchError::MissingTool(_)));
    assert_eq!(err.exit_code(), 1);
    assert!(ws.calls().is_empty());
    assert!(!ctx.output_dir.exists());
}

#[test]
fn test_missing_interpreter_is_item_error() {
    let ws = StubWorkspace::new();
    let mut config = ws.config(prompts(&[("alpha", "first"), ("bravo", "second")]));
    config.tool.interpreter = "imgbatch_no_such_interpreter".to_string();
    let ctx = ws.context(&config);

    let report = run_batch(&config, &ctx).unwrap();

    for item in &report.items {
        match &item.outcome {
            ItemOutcome::InvocationError(msg) => assert!(msg.contains("failed to execute")),
            other => panic!("expected invocation error, got {:?}", other),
        }
    }
    assert!(report.gallery_path.is_none());
}

#[test]
fn test_output_dir_is_created() {
    let ws = StubWorkspace::new();
    let config = ws.config(prompts(&[("alpha", "first")]));
    let ctx = ws.context(&config);
    assert!(!ctx.output_dir.exists());

    run_batch(&config, &ctx).unwrap();

    assert!(ctx.output_dir.is_dir());
}

#[test]
fn test_run_writes_event_log() {
    let ws = StubWorkspace::new();
    let config = ws.config(prompts(&[("alpha", "first"), ("bravo", "FAIL")]));
    let ctx = ws.context(&config);

    run_batch(&config, &ctx).unwrap();

    let events = read_events(&ctx).unwrap();
    let actions: Vec<_> = events.iter().map(|e| e.action).collect();
    assert_eq!(
        actions,
        vec![
            EventAction::RunStart,
            EventAction::ItemRequest,
            EventAction::ItemComplete,
            EventAction::ItemRequest,
            EventAction::ItemComplete,
            EventAction::GalleryWrite,
            EventAction::RunFinish,
        ]
    );
    assert_eq!(events[2].details["outcome"], "generated");
    assert_eq!(events[2].details["file"], "alpha.png");
    assert_eq!(events[4].item.as_deref(), Some("bravo"));
    assert_eq!(events[4].details["outcome"], "failed");
    assert_eq!(events[4].details["exit_code"], 2);
    assert_eq!(events[6].details["generated"], 1);
}

#[test]
fn test_rerun_replaces_previous_images() {
    let ws = StubWorkspace::new();
    let config = ws.config(prompts(&[("alpha", "REPORT first")]));
    let ctx = ws.context(&config);

    run_batch(&config, &ctx).unwrap();
    let report = run_batch(&config, &ctx).unwrap();

    assert_eq!(report.generated_count(), 1);
    assert_eq!(file_names(&ctx.output_dir), vec!["alpha.png"]);
    assert_eq!(
        std::fs::read_to_string(ctx.output_dir.join("alpha.png")).unwrap(),
        "image 2"
    );
}
