//! End-to-end tests for the library-catalog binary.

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;

const FIXTURE: &str = "tests/fixtures/library.json";

fn cmd() -> Command {
    Command::cargo_bin("library-catalog").unwrap()
}

#[test]
fn test_search_books_is_case_insensitive() {
    cmd()
        .args(["books", "search", "HOBBIT", "--catalog", FIXTURE])
        .assert()
        .success()
        .stdout(contains("Books found:"))
        .stdout(contains("Book{id=1, title='The Hobbit'"))
        .stdout(contains("Book{id=2, title='Hobbiton Tales'"))
        .stdout(contains("Dune").not());
}

#[test]
fn test_search_books_no_match() {
    cmd()
        .args(["books", "search", "zzz", "--catalog", FIXTURE])
        .assert()
        .success()
        .stdout("No books found.\n");
}

#[test]
fn test_search_without_catalog_is_empty() {
    cmd()
        .args(["books", "search", "anything"])
        .assert()
        .success()
        .stdout("No books found.\n");
}

#[test]
fn test_show_book_json() {
    let output = cmd()
        .args(["--format", "json", "books", "show", "2", "--catalog", FIXTURE])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let book: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(book["title"], "Hobbiton Tales");
    assert_eq!(book["availability"], "BORROWED");
}

#[test]
fn test_show_missing_book_fails() {
    cmd()
        .args(["books", "show", "99", "--catalog", FIXTURE])
        .assert()
        .failure()
        .stderr(contains("Book with id 99 not found"));
}

#[test]
fn test_patrons_show_and_search() {
    cmd()
        .args(["patrons", "show", "5", "--catalog", FIXTURE])
        .assert()
        .success()
        .stdout("Patron{id=5, name='Alice', contactInfo='alice@example.com'}\n");

    cmd()
        .args(["patrons", "show", "7", "--catalog", FIXTURE])
        .assert()
        .failure()
        .stderr(contains("Patron with id 7 not found"));

    cmd()
        .args(["--format", "tsv", "patrons", "search", "ali", "--catalog", FIXTURE])
        .assert()
        .success()
        .stdout("id\tname\tcontact_info\n5\tAlice\talice@example.com\n6\tBob Alison\t555-0100\n");
}

#[test]
fn test_books_list_keeps_file_order() {
    let output = cmd()
        .args(["--format", "json", "books", "list", "--catalog", FIXTURE])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let body: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(body["count"], 3);
    let ids: Vec<i64> = body["books"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[test]
fn test_missing_catalog_file_fails() {
    cmd()
        .args(["books", "list", "--catalog", "tests/fixtures/does_not_exist.json"])
        .assert()
        .failure()
        .stderr(contains("Failed to read catalog"));
}

#[test]
fn test_export_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("export.json");

    cmd()
        .args(["export", out.to_str().unwrap(), "--catalog", FIXTURE])
        .assert()
        .success()
        .stderr(contains("Exported 3 books and 2 patrons"));

    cmd()
        .args(["books", "search", "dune", "--catalog", out.to_str().unwrap()])
        .assert()
        .success()
        .stdout(contains("Book{id=3, title='Dune', author='Frank Herbert'"));
}

#[test]
fn test_shell_session() {
    cmd()
        .args(["shell", "--catalog", FIXTURE])
        .write_stdin(
            "search hobbit\n\
             add-book 4|The Hobbit Companion|Foster|Reference\n\
             search HOBBIT\n\
             patron 6\n\
             borrow 1 5\n\
             quit\n",
        )
        .assert()
        .success()
        .stdout(contains("Added Book{id=4, title='The Hobbit Companion'"))
        .stdout(contains("Book{id=4, title='The Hobbit Companion', author='Foster', genre='Reference', availability=AVAILABLE}\n"))
        .stdout(contains("Patron{id=6, name='Bob Alison', contactInfo='555-0100'}"))
        .stdout(contains("Borrow Book functionality not implemented yet."));
}

#[test]
fn test_show_negative_ids() {
    let fixture = "tests/fixtures/negative_ids.json";

    cmd()
        .args(["books", "show", "-1", "--catalog", fixture])
        .assert()
        .success()
        .stdout("Book{id=-1, title='Below Zero', author='N. Egative', genre='Mystery', availability=BORROWED}\n");

    cmd()
        .args(["patrons", "show", "-5", "--catalog", fixture])
        .assert()
        .success()
        .stdout(contains("Patron{id=-5, name='Minus'"));

    cmd()
        .args(["books", "show", "-2", "--catalog", fixture])
        .assert()
        .failure()
        .stderr(contains("Book with id -2 not found"));
}
