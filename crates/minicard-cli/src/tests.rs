use std::path::PathBuf;

use clap::Parser;
use clap_complete::Shell;
use minicard_core::host::Prompt;
use minicard_core::models::{MAX_SIDE_BAR_WIDTH, SEED_NOTE_ID};
use minicard_core::{CardId, Config, NoteId, Point, StylePosition};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

use crate::cli::{Cli, Commands, ExportFormat, TopicCommands};
use crate::commands::cards::{run_add, run_delete, run_drag, run_edit};
use crate::commands::common::{
    finish, load_config, normalize_content, parse_point, resolve_data_dir, CliSession,
    CommandContext,
};
use crate::commands::completions::run_completions;
use crate::commands::data::{export_target, run_export, run_import, run_reset};
use crate::commands::modes::{run_resize, run_secret};
use crate::commands::topic::{joined_label, run_topic};
use crate::editor::{draft_with, fallback_editor};
use crate::error::CliError;
use crate::prompt::CliPrompt;

fn context_in(dir: &TempDir) -> CommandContext {
    CommandContext {
        data_dir: dir.path().join("data"),
        config: Config::default(),
    }
}

fn reopen(context: &CommandContext) -> CliSession {
    context.open_session().unwrap()
}

fn only_card(context: &CommandContext) -> (CardId, String) {
    let session = reopen(context);
    let note = session.state().effective_note().unwrap();
    assert_eq!(note.cards.len(), 1);
    let (id, card) = note.cards.iter().next().unwrap();
    (*id, card.content.clone())
}

#[test]
fn normalize_content_trims_and_rejects_empty() {
    assert_eq!(normalize_content("  hello  "), Some("hello".to_string()));
    assert_eq!(normalize_content(" \n\t "), None);
}

#[test]
fn fallback_editor_is_defined() {
    assert!(!fallback_editor().is_empty());
}

#[test]
fn draft_with_blank_command_is_an_editor_error() {
    let result = draft_with("   ", "text");
    assert!(matches!(result, Err(CliError::EditorFailed(_))));
}

#[test]
fn draft_with_missing_program_is_an_editor_error() {
    let result = draft_with("minicard-no-such-editor-binary", "text");
    assert!(matches!(result, Err(CliError::EditorFailed(_))));
}

#[cfg(unix)]
#[test]
fn draft_with_untouched_draft_returns_trimmed_initial_text() {
    assert_eq!(
        draft_with("true", "  keep me  ").unwrap(),
        Some("keep me".to_string())
    );
    assert_eq!(draft_with("true", " \n ").unwrap(), None);
}

#[cfg(unix)]
#[test]
fn draft_with_failing_editor_is_an_editor_error() {
    let result = draft_with("false", "text");
    assert!(matches!(result, Err(CliError::EditorFailed(_))));
}

#[test]
fn parse_point_accepts_comma_pair() {
    assert_eq!(parse_point("10,20"), Ok(Point::new(10, 20)));
    assert_eq!(parse_point(" -5 , 7 "), Ok(Point::new(-5, 7)));
}

#[test]
fn parse_point_rejects_malformed_input() {
    assert!(parse_point("10").is_err());
    assert!(parse_point("a,2").is_err());
    assert!(parse_point("1,").is_err());
}

#[test]
fn joined_label_keeps_words_together() {
    assert_eq!(joined_label(&[]), None);
    assert_eq!(
        joined_label(&["Object".to_string(), "To".to_string(), "BUY".to_string()]),
        Some("Object To BUY".to_string())
    );
}

#[test]
fn cli_parses_drag_with_points() {
    let cli = Cli::try_parse_from(["minicard", "drag", "17", "--to", "300,-20"]).unwrap();
    match cli.command {
        Some(Commands::Drag { card, to, from }) => {
            assert_eq!(card, CardId::new(17));
            assert_eq!(to, Point::new(300, -20));
            assert_eq!(from, None);
        }
        _ => panic!("expected drag command"),
    }
}

#[test]
fn cli_parses_quick_capture_words() {
    let cli = Cli::try_parse_from(["minicard", "buy", "milk"]).unwrap();
    assert!(cli.command.is_none());
    assert_eq!(cli.card, vec!["buy".to_string(), "milk".to_string()]);
}

#[test]
fn cli_parses_topic_subcommands_and_global_flags() {
    let cli = Cli::try_parse_from([
        "minicard",
        "topic",
        "switch",
        "10000000",
        "--data-dir",
        "/tmp/minicard",
    ])
    .unwrap();
    assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/minicard")));
    assert!(matches!(
        cli.command,
        Some(Commands::Topic {
            command: TopicCommands::Switch { ref id }
        }) if id == "10000000"
    ));
}

#[test]
fn cli_rejects_clipboard_export_with_output() {
    let result = Cli::try_parse_from(["minicard", "export", "--clipboard", "--output", "out.json"]);
    assert!(result.is_err());
}

#[test]
fn resolve_data_dir_prefers_flag_then_env_then_config() {
    let config = Config {
        data_dir: Some(PathBuf::from("/from/config")),
        ..Config::default()
    };

    let resolved = resolve_data_dir(
        Some(PathBuf::from("/from/flag")),
        Some(PathBuf::from("/from/env")),
        &config,
    )
    .unwrap();
    assert_eq!(resolved, PathBuf::from("/from/flag"));

    let resolved = resolve_data_dir(None, Some(PathBuf::from("/from/env")), &config).unwrap();
    assert_eq!(resolved, PathBuf::from("/from/env"));

    let resolved = resolve_data_dir(None, None, &config).unwrap();
    assert_eq!(resolved, PathBuf::from("/from/config"));
}

#[test]
fn load_config_missing_file_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let config = load_config(Some(&dir.path().join("absent.json"))).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn load_config_rejects_unknown_fields() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"stage_widht": 100}"#).unwrap();
    assert!(load_config(Some(&path)).is_err());
}

#[test]
fn answer_prompt_is_handed_out_once() {
    let mut prompt = CliPrompt::answer("Groceries");
    assert_eq!(
        prompt.ask_text("Please input this Topic", None),
        Some("Groceries".to_string())
    );
    assert_eq!(prompt.ask_text("Please input this Topic", None), None);
}

#[test]
fn add_then_delete_card_round_trips_through_disk() {
    let dir = TempDir::new().unwrap();
    let context = context_in(&dir);

    run_add(&["Buy".to_string(), "milk".to_string()], &context).unwrap();
    let (id, content) = only_card(&context);
    assert_eq!(content, "Buy milk");

    run_delete(id, &context).unwrap();
    run_delete(id, &context).unwrap();
    let session = reopen(&context);
    assert!(session.state().effective_note().unwrap().cards.is_empty());
}

#[test]
fn edit_with_text_flag_replaces_content() {
    let dir = TempDir::new().unwrap();
    let context = context_in(&dir);
    run_add(&["draft".to_string()], &context).unwrap();
    let (id, _) = only_card(&context);

    run_edit(id, Some("  final  ".to_string()), &context).unwrap();
    assert_eq!(only_card(&context).1, "final");
}

#[test]
fn edit_of_unknown_card_is_an_error() {
    let dir = TempDir::new().unwrap();
    let context = context_in(&dir);
    let result = run_edit(CardId::new(42), Some("x".to_string()), &context);
    assert!(matches!(result, Err(CliError::CardNotFound(id)) if id == CardId::new(42)));
}

#[test]
fn drag_past_stage_keeps_card_free() {
    let dir = TempDir::new().unwrap();
    let context = context_in(&dir);
    run_add(&["float".to_string()], &context).unwrap();
    let (id, _) = only_card(&context);

    run_drag(id, Point::new(2_000, 50), Some(Point::new(0, 0)), &context).unwrap();
    let session = reopen(&context);
    let card = &session.state().effective_note().unwrap().cards[&id];
    assert_eq!(card.style_position, StylePosition::Absolute);
    assert_eq!(card.z_index, 2);

    run_drag(id, Point::new(100, 50), None, &context).unwrap();
    let session = reopen(&context);
    let card = &session.state().effective_note().unwrap().cards[&id];
    assert_eq!(card.style_position, StylePosition::Static);
}

#[test]
fn resize_is_clamped_and_persisted() {
    let dir = TempDir::new().unwrap();
    let context = context_in(&dir);

    run_resize(10_000, &context).unwrap();
    assert_eq!(reopen(&context).state().side_bar_width, MAX_SIDE_BAR_WIDTH);
}

#[test]
fn secret_toggle_is_persisted() {
    let dir = TempDir::new().unwrap();
    let context = context_in(&dir);

    run_secret(&context).unwrap();
    assert!(reopen(&context).state().secret_mode);
    run_secret(&context).unwrap();
    assert!(!reopen(&context).state().secret_mode);
}

#[test]
fn topic_commands_create_and_switch() {
    let dir = TempDir::new().unwrap();
    let context = context_in(&dir);

    run_topic(
        TopicCommands::New {
            label: vec!["Groceries".to_string()],
        },
        &context,
    )
    .unwrap();
    let session = reopen(&context);
    assert_eq!(session.state().notes.len(), 2);
    assert_eq!(session.surface().topic(), "Groceries");

    run_topic(
        TopicCommands::Switch {
            id: SEED_NOTE_ID.to_string(),
        },
        &context,
    )
    .unwrap();
    let session = reopen(&context);
    assert_eq!(
        session.state().current_note_id,
        Some(NoteId::from(SEED_NOTE_ID))
    );

    let result = run_topic(
        TopicCommands::Switch {
            id: "missing".to_string(),
        },
        &context,
    );
    assert!(matches!(
        result,
        Err(CliError::Core(minicard_core::Error::NotFound(_)))
    ));
}

#[test]
fn failed_import_reports_notification() {
    let dir = TempDir::new().unwrap();
    let context = context_in(&dir);
    let mut session = reopen(&context);

    let result = session.import_text("not json");
    let error = finish(&mut session, result).unwrap_err();
    assert!(matches!(error, CliError::Reported(ref message) if message.starts_with("Import failed")));
}

#[test]
fn export_to_directory_then_import_from_file() {
    let dir = TempDir::new().unwrap();
    let context = context_in(&dir);
    run_add(&["carry over".to_string()], &context).unwrap();

    let exports = dir.path().join("exports");
    std::fs::create_dir_all(&exports).unwrap();
    run_export(ExportFormat::Json, Some(&exports), false, true, &context).unwrap();
    let exported = std::fs::read_dir(&exports)
        .unwrap()
        .next()
        .unwrap()
        .unwrap()
        .path();
    assert_eq!(exported.extension().and_then(|ext| ext.to_str()), Some("json"));

    let other = TempDir::new().unwrap();
    let other_context = context_in(&other);
    run_import(Some(&exported), &other_context).unwrap();
    assert_eq!(
        reopen(&other_context).state(),
        reopen(&context).state()
    );
}

#[test]
fn export_target_keeps_explicit_file_path() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("backup.md");
    assert_eq!(export_target(&file, ExportFormat::Markdown), file);

    let target = export_target(dir.path(), ExportFormat::Markdown);
    assert_eq!(target.parent(), Some(dir.path()));
    assert!(target.to_string_lossy().ends_with(".md"));
}

#[test]
fn reset_requires_confirmation_phrase() {
    let dir = TempDir::new().unwrap();
    let context = context_in(&dir);
    run_add(&["keep".to_string()], &context).unwrap();

    run_reset(Some("delete all".to_string()), &context).unwrap();
    assert_eq!(only_card(&context).1, "keep");

    run_reset(Some("DELETE ALL".to_string()), &context).unwrap();
    let session = reopen(&context);
    assert_eq!(session.state().notes.len(), 1);
    assert_eq!(
        session.state().notes.keys().next(),
        Some(&NoteId::from(SEED_NOTE_ID))
    );
}

#[test]
fn reset_leaves_other_files_in_data_dir() {
    let dir = TempDir::new().unwrap();
    let context = context_in(&dir);
    run_add(&["keep".to_string()], &context).unwrap();
    let package = context.data_dir.join("package.json");
    let config = context.data_dir.join("config.json");
    std::fs::write(&package, "{}").unwrap();
    std::fs::write(&config, "{}").unwrap();

    run_reset(Some("DELETE ALL".to_string()), &context).unwrap();

    assert!(!context.data_dir.join("appState.json").exists());
    assert!(package.exists());
    assert!(config.exists());
}

#[test]
fn completions_are_written_to_output_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("minicard.bash");
    run_completions(Shell::Bash, Some(&path)).unwrap();
    let script = std::fs::read_to_string(&path).unwrap();
    assert!(script.contains("minicard"));
}
