use std::fs;
use std::io::Cursor;

use clap::Parser;
use tempfile::TempDir;

use super::{TableDictionary, open_engine};
use crate::Cli;
use crate::commands::{Command, documents, review};

#[test]
fn question_count_argument() {
    assert_eq!(review::parse_question_count(None, 5), 5);
    assert_eq!(review::parse_question_count(Some("3"), 5), 3);
    assert_eq!(review::parse_question_count(Some("0"), 5), 5);
    assert_eq!(review::parse_question_count(Some("-2"), 5), 5);
    assert_eq!(review::parse_question_count(Some("many"), 5), 5);
}

#[test]
fn negative_count_reaches_the_default() {
    let cli = Cli::try_parse_from(["ago", "test", "-2"]).unwrap();
    let Command::Test { count } = cli.command else {
        panic!("expected the test command");
    };
    assert_eq!(count.as_deref(), Some("-2"));
    assert_eq!(review::parse_question_count(count.as_deref(), 5), 5);
}

#[tokio::test]
async fn session_applies_feedback() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("story.txt");
    fs::write(&source, "moon moon sun").unwrap();

    let mut engine = open_engine(&dir);
    documents::add_documents(&mut engine, &[source], &mut Vec::<u8>::new()).unwrap();

    let dictionary = TableDictionary::new(&[("moon", "satellite"), ("sun", "star")]);
    let input = Cursor::new("yes\n\nno\n\nyes\n");
    let mut out: Vec<u8> = Vec::new();
    review::run_test_session(&mut engine, &dictionary, 5, input, &mut out)
        .await
        .unwrap();

    let transcript = String::from_utf8(out).unwrap();
    assert!(transcript.contains("Question 2/2:"));
    assert!(transcript.contains("your feedback, No applied"));

    let reopened = open_engine(&dir);
    assert_eq!(reopened.words().get("moon").unwrap().failures(), 1);
    assert_eq!(reopened.words().get("sun").unwrap().successes(), 1);
}

#[tokio::test]
async fn declined_session_changes_nothing() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("story.txt");
    fs::write(&source, "moon").unwrap();

    let mut engine = open_engine(&dir);
    documents::add_documents(&mut engine, &[source], &mut Vec::<u8>::new()).unwrap();

    let dictionary = TableDictionary::new(&[]);
    let mut out: Vec<u8> = Vec::new();
    review::run_test_session(&mut engine, &dictionary, 5, Cursor::new("no\n"), &mut out)
        .await
        .unwrap();

    assert!(String::from_utf8(out).unwrap().contains("OK, see you later ;)"));
    let moon = open_engine(&dir).words().get("moon").unwrap().clone();
    assert_eq!((moon.successes(), moon.failures()), (0, 0));
}
