//! Tests for building classified errors

use coderr::{newf, wrapf, Category, Failure, OptionExt, ResultExt};
use std::io;

const MSG: &str = "an error with a message";

#[test]
fn test_free_new_is_internal() {
    let err = coderr::new(MSG);

    assert_eq!(coderr::code(&err), Category::Internal);
    assert_eq!(err.to_string(), MSG);
    assert_eq!(coderr::display_message(&err), "Internal Error");
}

#[test]
fn test_every_category_constructs_with_its_label() {
    let expected = [
        (Category::Internal, "Internal Error"),
        (Category::NotFound, "Not Found"),
        (Category::InvalidArgument, "Invalid Argument"),
        (Category::Unauthenticated, "Unauthenticated"),
        (Category::PermissionDenied, "Permission Denied"),
        (Category::Unknown, "Unknown"),
        (Category::AlreadyExists, "Already Exists"),
        (Category::ResourceExhausted, "Resource Exhausted"),
        (Category::Timeout, "Timeout"),
    ];
    assert_eq!(expected.len(), Category::ALL.len());

    for (category, label) in expected {
        let err = category.new(MSG);
        assert_eq!(coderr::code(&err), category);
        assert_eq!(err.to_string(), MSG);
        assert_eq!(coderr::display_message(&err), label);
        assert_eq!(category.to_string(), label);
    }
}

#[test]
fn test_row_missing_scenario() {
    let err = Category::NotFound.new("row missing");

    assert_eq!(coderr::code(&err), Category::NotFound);
    assert_eq!(coderr::display_message(&err), "Not Found");
    assert_eq!(err.to_string(), "row missing");
    assert!(err.is(Category::NotFound));
}

#[test]
fn test_formatted_constructors() {
    let id = 42;
    let err = newf!(NotFound, "row {} missing", id);
    assert_eq!(err.code(), Category::NotFound);
    assert_eq!(err.to_string(), "row 42 missing");

    let err = newf!("{} of {} shards down", 2, 5);
    assert_eq!(err.code(), Category::Internal);
    assert_eq!(err.to_string(), "2 of 5 shards down");

    let err = Category::Timeout.new(format_args!("gave up after {}ms", 250));
    assert_eq!(err.to_string(), "gave up after 250ms");
}

#[test]
fn test_wrap_composes_messages_and_keeps_category() {
    let wrapped = coderr::wrap(Category::NotFound.new("row missing"), "lookup failed");

    assert_eq!(coderr::code(&wrapped), Category::NotFound);
    assert_eq!(wrapped.to_string(), "lookup failed: row missing");
    assert_eq!(coderr::display_message(&wrapped), "Not Found");
}

#[test]
fn test_wrap_of_internal_error() {
    let err = coderr::wrap(coderr::new("an error"), "some other message");

    assert_eq!(coderr::code(&err), Category::Internal);
    assert_eq!(err.to_string(), "some other message: an error");
}

#[test]
fn test_wrap_of_foreign_error_is_internal() {
    let eof = io::Error::new(io::ErrorKind::UnexpectedEof, "EOF");
    let wrapped = coderr::wrap(eof, "reading header");

    assert_eq!(coderr::code(&wrapped), Category::Internal);
    assert_eq!(wrapped.to_string(), "reading header: EOF");
}

#[test]
fn test_category_wrap_overrides_category() {
    let inner = Category::NotFound.new("no such key");
    let wrapped = Category::PermissionDenied.wrap(inner, "vault sealed");

    assert_eq!(coderr::code(&wrapped), Category::PermissionDenied);
    assert_eq!(wrapped.to_string(), "vault sealed: no such key");
}

#[test]
fn test_formatted_wraps() {
    let path = "/etc/app.toml";
    let inner = Category::NotFound.new("missing");

    let kept = wrapf!(inner.clone(), "loading {}", path);
    assert_eq!(kept.code(), Category::NotFound);
    assert_eq!(kept.to_string(), "loading /etc/app.toml: missing");

    let overridden = wrapf!(InvalidArgument => inner, "parsing {}", path);
    assert_eq!(overridden.code(), Category::InvalidArgument);
    assert_eq!(overridden.to_string(), "parsing /etc/app.toml: missing");
}

#[test]
fn test_display_message_overrides_text_not_code() {
    let err = coderr::with_display_message(coderr::new(MSG), "We had a problem");
    assert_eq!(coderr::code(&err), Category::Internal);
    assert_eq!(coderr::display_message(&err), "We had a problem");
    assert_eq!(err.to_string(), MSG);

    let err = coderr::with_display_message(Category::NotFound.new(MSG), "The record was not found");
    assert_eq!(coderr::code(&err), Category::NotFound);
    assert_eq!(coderr::display_message(&err), "The record was not found");
}

#[test]
fn test_display_message_on_foreign_error() {
    let err = coderr::with_display_message(io::Error::new(io::ErrorKind::Other, "boom"), "Try again");
    assert_eq!(err.code(), Category::Internal);
    assert_eq!(err.display_message(), "Try again");
    assert_eq!(err.to_string(), "boom");
}

#[test]
fn test_empty_display_message_falls_back_to_label() {
    let err = Category::Unauthenticated.new("no token").with_display_message("");
    assert!(!err.has_display_message());
    assert_eq!(err.display_message(), "Unauthenticated");
}

#[test]
fn test_display_message_survives_wrapping() {
    let err = Category::NotFound.new("row missing").with_display_message("No such order");

    let wrapped = coderr::wrap(err.clone(), "loading order");
    assert_eq!(coderr::display_message(&wrapped), "No such order");

    let reclassified = Category::PermissionDenied.wrap(err.clone(), "checking owner");
    assert_eq!(coderr::display_message(&reclassified), "No such order");

    let replaced = wrapped.with_display_message("Order unavailable");
    assert_eq!(coderr::display_message(&replaced), "Order unavailable");
    assert_eq!(replaced.code(), Category::NotFound);
}

#[test]
fn test_method_wrap_matches_free_wrap() {
    let err = Category::Unknown.new("strange reply").wrap("calling upstream");
    assert_eq!(err.code(), Category::Unknown);
    assert_eq!(err.to_string(), "calling upstream: strange reply");
}

fn find_user(id: u32) -> coderr::Result<&'static str> {
    coderr::ensure!(id != 0, InvalidArgument, "user id must be non-zero");
    if id > 100 {
        coderr::bail!(NotFound, "user {} does not exist", id);
    }
    Ok("ada")
}

#[test]
fn test_bail_and_ensure() {
    assert_eq!(find_user(7).ok(), Some("ada"));

    let err = find_user(0).unwrap_err();
    assert_eq!(err.code(), Category::InvalidArgument);
    assert_eq!(err.to_string(), "user id must be non-zero");

    let err = find_user(101).unwrap_err();
    assert_eq!(err.code(), Category::NotFound);
    assert_eq!(err.to_string(), "user 101 does not exist");
}

#[test]
fn test_result_extensions() {
    let failed: Result<(), io::Error> = Err(io::Error::new(io::ErrorKind::Other, "reset by peer"));
    let err = failed.wrap_err("sending request").unwrap_err();
    assert_eq!(err.code(), Category::Internal);
    assert_eq!(err.to_string(), "sending request: reset by peer");

    let failed: Result<(), coderr::Error> = Err(Category::NotFound.new("gone"));
    let err = failed
        .classify(Category::Unknown, "remote said")
        .with_display_message("Service unavailable")
        .unwrap_err();
    assert_eq!(err.code(), Category::Unknown);
    assert_eq!(err.display_message(), "Service unavailable");
    assert_eq!(err.to_string(), "remote said: gone");

    let ok: Result<u8, coderr::Error> = Ok(3);
    assert_eq!(ok.wrap_err_with(|| -> String { unreachable!() }).ok(), Some(3));
}

#[test]
fn test_option_extension() {
    let missing: Option<u8> = None;
    let err = missing.ok_or_code(Category::NotFound, "no cached entry").unwrap_err();
    assert_eq!(err.code(), Category::NotFound);
    assert_eq!(err.to_string(), "no cached entry");

    assert_eq!(Some(1).ok_or_code(Category::NotFound, "unused").ok(), Some(1));
}

#[test]
fn test_io_errors_are_classified_by_kind() {
    fn open() -> coderr::Result<()> {
        let read: Result<(), io::Error> = Err(io::Error::new(io::ErrorKind::NotFound, "no such file"));
        read?;
        Ok(())
    }

    let err = open().unwrap_err();
    assert_eq!(err.code(), Category::NotFound);
    assert_eq!(err.to_string(), "I/O error: no such file");
    assert!(coderr::cause(&err).downcast_ref::<io::Error>().is_some());
}

#[test]
fn test_category_parsing_and_serde() {
    assert_eq!("Not Found".parse::<Category>().ok(), Some(Category::NotFound));
    assert_eq!("permissiondenied".parse::<Category>().ok(), Some(Category::PermissionDenied));
    assert!("Teapot".parse::<Category>().is_err());

    let json = serde_json::to_string(&Category::InvalidArgument).unwrap();
    assert_eq!(json, "\"Invalid Argument\"");
    let back: Category = serde_json::from_str(&json).unwrap();
    assert_eq!(back, Category::InvalidArgument);
}

#[test]
fn test_errors_are_shareable_values() {
    fn assert_send_sync<T: Send + Sync + Clone + 'static>() {}
    assert_send_sync::<coderr::Error>();
    assert_send_sync::<Failure>();

    let err = Category::NotFound.new("row missing");
    let copy = err.clone();
    let handle = std::thread::spawn(move || copy.to_string());
    assert_eq!(handle.join().unwrap(), err.to_string());
}
